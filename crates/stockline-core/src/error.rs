//! # Error Types
//!
//! Precondition-violation errors for stockline-core.
//!
//! ## What Is (And Is Not) An Error Here
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Policy                                       │
//! │                                                                         │
//! │  NOT ERRORS (resolve to defined fallback values)                        │
//! │  ├── No sales report for a date        → gross profit 0                 │
//! │  ├── No permission record for a module → all capabilities false         │
//! │  ├── Expense with no category          → "Other" bucket                 │
//! │  └── Unparsable ISO date               → epoch (1970-01-01)             │
//! │                                                                         │
//! │  ERRORS (structurally invalid input, caller bug)                        │
//! │  └── Calendar month outside 1..=12                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Expected empty-result cases never surface as `Err`; a `CoreError` always
//! means the caller passed something that cannot describe a real request.

use thiserror::Error;

/// Core derivation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Calendar month outside the 1..=12 range.
    #[error("Month {0} is out of range (expected 1..=12)")]
    MonthOutOfRange(u32),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
