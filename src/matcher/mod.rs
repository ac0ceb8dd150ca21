//! # Cycle Selection Module
//!
//! This module turns enumerated cycles into a conflict-free set of trades.
//!
//! ## Strategies
//!
//! - **Greedy**: each weakly connected component is enumerated on its own.
//!   Cycles are tried longest first and a participant joins at most one
//!   accepted cycle.
//! - **Exhaustive**: every cycle of the whole graph is tried in discovery
//!   order. A participant may appear in several accepted cycles, but no offer
//!   is ever promised twice.
//!
//! Both strategies check offers through [`ConflictValidator`], which only
//! commits a cycle's offers once the whole cycle has passed.
//!
//! ## Auditing
//!
//! [`audit_cycles`] runs both strategies concurrently and reports the
//! exhaustive cycles greedy selection left on the table.

mod audit;
mod selector;
mod validator;

pub use audit::{CycleAudit, audit_cycles};
pub use selector::{
    CycleSelector, MatchingOptions, RejectedCycle, Selection, SelectionState, Strategy,
    select_cycles,
};
pub use validator::{Claim, ConflictValidator, Exchange, OfferKey, Rejection, UsedOffers};
