//! Error types for resource navigation
//!
//! Every navigation failure is local to a single access call and leaves the
//! resource's cache and resolution state untouched, so a caller may retry the
//! same access after a transient failure.

use thiserror::Error;

/// Errors surfaced by [`Resource`](crate::Resource) navigation.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Field access on an object that has no such key.
    #[error("key {0:?} not found in resource")]
    KeyNotFound(String),

    /// The access shape is invalid for the underlying value: a field lookup
    /// on a non-object, or an index lookup on a document without a `Members`
    /// collection.
    #[error("{0}")]
    KeyNotApplicable(String),

    /// Index access beyond the bounds of the `Members` collection.
    #[error("member index {index} out of range for collection of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Attribute-style access (`member`) on a name the resource does not have.
    #[error("resource has no member {0:?}")]
    NoSuchMember(String),

    /// The connector failed to fetch a document. The underlying transport
    /// error is preserved unchanged; no retry is attempted by the proxy.
    #[error("failed to fetch resource {oid:?}")]
    Transport {
        oid: String,
        #[source]
        source: anyhow::Error,
    },
}
