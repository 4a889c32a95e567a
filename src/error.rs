//! Crate error types.

use thiserror::Error;

/// Errors surfaced by response set construction and registry bookkeeping.
///
/// Name lookups that find nothing return `None` rather than an error; a miss
/// is a normal branch for callers probing for optional overrides.
#[derive(Debug, Error)]
pub enum Error {
    /// A constructor was given an unusable argument, e.g. an empty request
    /// name or an invalid regex/glob pattern.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A response set with this request name is already registered.
    #[error("a response set named {0:?} is already registered")]
    DuplicateName(String),
}
