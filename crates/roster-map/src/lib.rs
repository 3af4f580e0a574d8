//! Field mapping for roster sheets.
//!
//! Guesses which detected column holds each roster field using bilingual
//! keyword patterns, and applies manual overrides on top of the guess. An
//! incomplete mapping is not an error here: normalization simply yields no
//! rows until `unit` and `full_name` are bound.

mod error;
mod guess;
mod overrides;
mod patterns;

pub use error::{MappingError, Result};
pub use guess::guess_mapping;
pub use overrides::{
    MappingOverride, apply_overrides, parse_mapping_document, parse_override, validate_mapping,
};
pub use patterns::{field_pattern, matches_field};
