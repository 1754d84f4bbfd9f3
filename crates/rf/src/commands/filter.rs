//! Filter command implementation.
//!
//! Loads a survey, its responses and an optional selection, and prints the
//! responses that satisfy every constraint.

use std::path::PathBuf;

use survey_filter_rs::filter::{FilterSelection, ResponseFilter};
use survey_filter_rs::validate::validate_selection;
use survey_model_rs::prelude::*;
use tracing::{debug, info};

use super::input::{read_json, read_json_or_default, resolve_date_range};
use super::{CommandContext, Result};
use crate::output::{format_responses_json, format_responses_table};

/// Options for the filter command.
#[derive(Debug)]
pub struct FilterOptions {
    /// Survey file.
    pub survey: PathBuf,
    /// Responses file.
    pub responses: PathBuf,
    /// Selection file; none keeps every response.
    pub selection: Option<PathBuf>,
    /// Lower date bound.
    pub from: Option<String>,
    /// Upper date bound.
    pub to: Option<String>,
    /// Force the completion constraint on.
    pub only_complete: bool,
    /// Validate the selection against the survey first.
    pub strict: bool,
    /// Maximum number of responses to print.
    pub limit: Option<usize>,
}

/// Executes the filter command.
///
/// # Errors
///
/// Returns an error if an input cannot be read, the dates are invalid, or
/// `strict` is set and the selection references an unknown or mistyped
/// question.
pub fn execute(ctx: &CommandContext, opts: &FilterOptions) -> Result<()> {
    let survey: Survey = read_json(&opts.survey)?;
    let responses: Vec<Response> = read_json(&opts.responses)?;
    let mut selection: FilterSelection = read_json_or_default(opts.selection.as_deref())?;
    selection.only_complete |= opts.only_complete;
    let range = resolve_date_range(opts.from.as_deref(), opts.to.as_deref())?;

    if opts.strict {
        validate_selection(&selection, &survey)?;
    }

    let filter = ResponseFilter::new(&selection, &survey, range);
    let matched = filter.filter_responses(&responses);
    let matched_count = matched.len();
    info!(
        total = responses.len(),
        matched = matched_count,
        "filtered responses"
    );

    let shown = apply_limit(matched, opts.limit);
    debug!(shown = shown.len(), "applied limit");

    if ctx.json_output {
        println!("{}", format_responses_json(&shown)?);
    } else if !ctx.quiet {
        print!(
            "{}",
            format_responses_table(&shown, ctx.use_colors, ctx.date_format)
        );
        if ctx.verbose {
            eprintln!("{} of {} responses matched", matched_count, responses.len());
        }
    }

    Ok(())
}

/// Truncates the result to `limit` entries, keeping order.
fn apply_limit(mut responses: Vec<&Response>, limit: Option<usize>) -> Vec<&Response> {
    if let Some(limit) = limit {
        responses.truncate(limit);
    }
    responses
}
