//! Report synthesis stages, from input validation to rendering.

pub mod details;
pub mod reporter;
pub mod scorer;
pub mod synthesizer;
pub mod validation;
