//! Ordered fallback chains over content fields.
//!
//! A chain is a list of accessors tried in order; the first one that yields
//! a non-blank value wins. Callers supply the final default.

use masthead_core::FieldSource;

use crate::asset::{DESCRIPTION_FIELD, FOCAL_POINT_FIELD, TITLE_FIELD};

/// Reads one candidate value from a field source.
pub type FieldAccessor = for<'a> fn(&'a dyn FieldSource) -> Option<String>;

/// Focal point: the asset's own hint only.
pub const FOCAL_CHAIN: &[FieldAccessor] = &[focal_point];

/// Alt text: description, then title.
pub const ALT_CHAIN: &[FieldAccessor] = &[description, title];

/// Returns the first non-blank value produced by `chain`.
pub fn first_present(source: &dyn FieldSource, chain: &[FieldAccessor]) -> Option<String> {
    chain
        .iter()
        .find_map(|accessor| accessor(source).filter(|v| !v.trim().is_empty()))
}

/// Like [`first_present`], falling back to `default`.
pub fn first_present_or(source: &dyn FieldSource, chain: &[FieldAccessor], default: &str) -> String {
    first_present(source, chain).unwrap_or_else(|| default.to_string())
}

fn focal_point(source: &dyn FieldSource) -> Option<String> {
    source.get_non_empty(FOCAL_POINT_FIELD)
}

fn description(source: &dyn FieldSource) -> Option<String> {
    source.get_non_empty(DESCRIPTION_FIELD)
}

fn title(source: &dyn FieldSource) -> Option<String> {
    source.get_non_empty(TITLE_FIELD)
}
