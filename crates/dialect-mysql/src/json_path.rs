use std::fmt::Write as _;

use shimql_core::{JsonPath, PathStep, RenderMode, RenderedFragment};

use crate::PLACEHOLDER;

const JSON_EXTRACT_FUNCTION: &str = "JSON_EXTRACT";

// Embedded double quotes in keys are not escaped beyond the wrapping;
// untrusted keys must go through bind mode, never literal mode.
pub(crate) fn format_index_step(step: &PathStep) -> String {
    match step {
        PathStep::Index(index) => format!("$[{index}]"),
        PathStep::Key(key) => format!("$.\"{key}\""),
    }
}

pub(crate) fn format_path(path: &JsonPath) -> String {
    let mut formatted = String::from("$");
    for step in path.steps() {
        match step {
            PathStep::Index(index) => write!(formatted, "[{index}]"),
            PathStep::Key(key) => write!(formatted, ".\"{key}\""),
        }
        .expect("writing to String should not fail");
    }
    formatted
}

pub(crate) fn index_accessor(column: &str, step: &PathStep, mode: RenderMode) -> RenderedFragment {
    accessor(column, format_index_step(step), mode)
}

pub(crate) fn path_accessor(column: &str, path: &JsonPath, mode: RenderMode) -> RenderedFragment {
    debug_assert!(!path.is_empty(), "path accessors require at least one step");
    accessor(column, format_path(path), mode)
}

fn accessor(column: &str, formatted: String, mode: RenderMode) -> RenderedFragment {
    match mode {
        RenderMode::Literal => RenderedFragment::Literal(format!(
            "{JSON_EXTRACT_FUNCTION}({column}, {})",
            quote_string_literal(&formatted)
        )),
        RenderMode::Bind => RenderedFragment::Bound {
            sql: format!("{JSON_EXTRACT_FUNCTION}({column}, {PLACEHOLDER})"),
            value: formatted,
        },
    }
}

fn quote_string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
