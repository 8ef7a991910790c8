//! Query expansion.
//!
//! Expands one query term into every term that shares a concept with it. The
//! expansion has three outcomes:
//!
//! | Outcome | `expanded_terms` | `query` |
//! |---|---|---|
//! | not found | the literal term | `"term"` |
//! | found | members of the single concept | `(a OR b OR "c d")` |
//! | ambiguous | members of every matching concept | `(a OR b OR "c d")` |
//!
//! Ambiguous terms are expanded to the union of all their concepts in one
//! combined result; [`ExpansionResult::breakdown`] recovers the per-concept
//! view. Terms in the query are sorted in plain string order, so the same
//! term set always renders to the same bytes.

pub mod expander;
pub mod result;

pub use expander::{disjunction, expand};
pub use result::{ExpansionOutcome, ExpansionResult};
