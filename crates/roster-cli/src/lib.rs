//! Library half of the `roster-import` binary.

pub mod logging;
pub mod mapping;
