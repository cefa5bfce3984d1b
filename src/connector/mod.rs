//! Connector abstraction
//!
//! A [`Connector`] turns an opaque resource identifier (an "oid", typically an
//! absolute path like `/redfish/v1/Systems`) into a JSON document. Resources
//! never construct connectors; one connector is shared across every resource
//! created under the same root.
//!
//! [`HttpConnector`] is the reqwest-backed implementation used against real
//! services; tests typically substitute an in-memory implementation.

mod http;

use async_trait::async_trait;
use serde_json::Value;

pub use http::HttpConnector;

/// Synchronous-in-spirit fetch capability: one identifier in, one JSON
/// document out. Retries, timeouts, and authentication are the
/// implementation's concern; the resource proxy only propagates failures.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Fetch the document behind `oid`.
    async fn get(&self, oid: &str) -> anyhow::Result<Value>;
}
