//! redtree - lazy, cached navigation over Redfish-style REST resource trees
//!
//! Out-of-band management APIs expose their inventory as a graph of JSON
//! documents linked by `@odata.id` references. This crate wraps that graph in
//! a single proxy type, [`Resource`], that lets callers walk nested objects,
//! linked collections, and cross-document references uniformly: each step is
//! fetched at most once, on first use, and cached on its parent.
//!
//! # Architecture
//!
//! - [`resource`] - the [`Resource`] proxy: lazy resolution, classification,
//!   and the per-node child cache
//! - [`connector`] - the [`Connector`] fetch trait and the reqwest-backed
//!   [`HttpConnector`]
//! - [`error`] - the [`ResourceError`] taxonomy
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use redtree::{HttpConnector, Resource};
//!
//! async fn first_system_name() -> anyhow::Result<String> {
//!     let connector = Arc::new(
//!         HttpConnector::new("https://bmc.example.com")?
//!             .with_basic_auth("admin", "password"),
//!     );
//!     let mut root = Resource::with_oid(connector, "/redfish/v1/Systems");
//!     let name = root.index(0).await?.get("Name").await?.to_text().await?;
//!     Ok(name)
//! }
//! ```

pub mod connector;
pub mod error;
pub mod resource;

pub use connector::{Connector, HttpConnector};
pub use error::ResourceError;
pub use resource::{CacheKey, Resource, MEMBERS_FIELD, ODATA_ID_FIELD};
