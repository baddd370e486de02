//! Report model, share codec, and the client-side collaborators around an
//! analysis.

pub mod engine;
pub mod error;
pub mod hash;
pub mod i18n;
pub mod progress;
pub mod random;
pub mod share;
pub mod store;
pub mod telemetry;
pub mod time;
pub mod types;
