//! Criteria-based filter engine for survey responses.
//!
//! Given a survey, its responses and a filter selection made in the response
//! view, this crate answers two questions:
//!
//! - which responses satisfy every selected criterion ([`filter::evaluate`]),
//! - what declarative criteria a backend query should use
//!   ([`filter::normalize`]).
//!
//! Both answers are computed from the same operator vocabulary, so filtering
//! in memory and filtering through normalized criteria agree.
//!
//! The [`options`] module enumerates what can be filtered on for a survey and
//! [`validate`] checks a selection against a survey before it is evaluated.

pub mod filter;
pub mod options;
pub mod validate;

pub use filter::{FilterError, FilterResult};
