//! Survey data model.
//!
//! This crate provides the types shared by the survey filter engine and the
//! layers around it: survey definitions, collected responses and the tags
//! applied to them.
//!
//! # Quick Start
//!
//! ```
//! use survey_model_rs::prelude::*;
//! ```

pub mod prelude;
pub mod response;
pub mod survey;
