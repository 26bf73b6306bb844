//! Common types and utilities shared across birdfeed crates.
//!
//! This crate defines the error taxonomy surfaced by a feed run and the
//! observability helpers every binary and test harness uses. It stays
//! lightweight so that all crates can depend on it without pulling in the
//! HTTP or feed stacks.
//!
//! # Overview
//!
//! - [`BirdfeedError`] and [`Result`]: fatal failures of a feed run
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! Classifying an error for the process exit status:
//!
//! ```rust
//! use birdfeed_common::BirdfeedError;
//!
//! let err = BirdfeedError::Validation("feed name is required".into());
//! assert!(err.is_validation());
//! assert_eq!(err.exit_code(), 2);
//! ```

pub mod observability;

/// Fatal failures of a feed run.
///
/// Anything that merely degrades one source to an empty contribution never
/// becomes a `BirdfeedError`; it is logged and reported instead.
#[derive(thiserror::Error, Debug)]
pub enum BirdfeedError {
    /// A required invocation parameter was missing or malformed.
    #[error("invalid invocation: {0}")]
    Validation(String),

    /// An explicitly requested list does not exist among the account's lists.
    #[error("the specified list does not exist: {name}")]
    ListNotFound { name: String },

    /// The account's lists could not be enumerated at all.
    #[error("failed to enumerate lists: {0}")]
    ListEnumeration(String),

    /// Configuration was incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The feed document could not be serialized.
    #[error("failed to render feed: {0}")]
    Render(String),

    /// A fetch task died before reporting a result.
    #[error("fetch task failed: {0}")]
    Task(String),
}

impl BirdfeedError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Process exit status for this failure: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_validation() {
            2
        } else {
            1
        }
    }
}

/// Convenient alias for results that use [`BirdfeedError`].
pub type Result<T> = std::result::Result<T, BirdfeedError>;
