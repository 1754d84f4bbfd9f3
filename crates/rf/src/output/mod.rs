//! Output formatting utilities for the rf CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by what is printed:
//!
//! - [`responses`] - Filtered responses
//! - [`criteria`] - Normalized filter criteria
//! - [`options`] - Filter targets, operators and values of a survey
//! - [`helpers`] - Common formatting utilities (truncation, timestamps, tags)

mod criteria;
pub mod helpers;
mod options;
mod responses;

pub use criteria::{format_criteria_json, format_criteria_table};
pub use options::{format_options_json, format_options_table};
pub use responses::{format_responses_json, format_responses_table};
