//! Shared library modules providing error types, workspace layout, command
//! construction, and telemetry initialization.

pub mod errors;
pub mod mlonmcu;
pub mod telemetry;
pub mod workspace;
