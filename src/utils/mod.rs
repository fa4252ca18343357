//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics and data-quality reporting
//! - Error types and result types
//! - Log output setup for the binary

pub mod diagnostics;
pub mod error;
#[cfg(feature = "cli")]
pub mod logging;

// Re-export commonly used items
pub use diagnostics::{check_grid, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel};
pub use error::{ParseOutput, ScheduleError, ScheduleResult};
