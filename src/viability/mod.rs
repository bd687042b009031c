//! Business viability projection
//!
//! Projects a pre-tokenization business month by month: CAPEX as a single
//! month-0 outflow, recurring OPEX with annual readjustment, revenue lines
//! compounding per client, and a client ramp toward steady state. The
//! summarizer derives payback, break-even, and margin indicators from the
//! emitted sequence.

mod engine;
mod indicators;
mod input;

pub use engine::{simulate, CashflowMonth};
pub use indicators::{summarize, Indicators};
pub use input::{BusinessInput, CapexItem, ClientRamp, OpexItem, RevenueLine};
