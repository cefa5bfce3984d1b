//! Lazy resource proxy
//!
//! A [`Resource`] wraps one JSON document node: either inline content that was
//! embedded in a parent document, or an identifier whose body is fetched from
//! the [`Connector`](crate::Connector) on first access. Navigation (`get`,
//! `index`, `member`) classifies the target value once, wraps it as a child
//! `Resource`, and caches it, so callers never distinguish embedded data from
//! remote links.
//!
//! The proxy is read-only over its backing document. A fetched body is never
//! re-fetched; [`Resource::reset`] only drops derived children, forcing them
//! to be re-classified (and re-fetched where they are references) on the next
//! access.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::connector::Connector;
use crate::error::ResourceError;

/// Field marking a JSON object as a link to another document.
pub const ODATA_ID_FIELD: &str = "@odata.id";

/// Field holding the entries of a linked collection.
pub const MEMBERS_FIELD: &str = "Members";

/// Key under which a child resource is cached by its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Child reached through `get(field)`.
    Field(String),
    /// Child reached through `index(i)` into the `Members` collection.
    Member(usize),
}

/// Resolution state of the backing document. Resolution is one-shot: once a
/// body is fetched the node never reverts to `Unresolved`.
#[derive(Debug)]
enum State {
    Unresolved(String),
    Resolved { oid: Option<String>, raw: Value },
}

/// Lazy proxy over one JSON document node, remote or inline.
pub struct Resource {
    connector: Arc<dyn Connector>,
    state: State,
    cache: HashMap<CacheKey, Resource>,
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("state", &self.state)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl Resource {
    /// Wrap inline JSON content. No fetch ever occurs for this node itself.
    pub fn with_content(connector: Arc<dyn Connector>, content: Value) -> Self {
        Self {
            connector,
            state: State::Resolved {
                oid: None,
                raw: content,
            },
            cache: HashMap::new(),
        }
    }

    /// Defer to a remote identifier. The body is fetched on the first access
    /// of any kind and memoized; a failed fetch leaves the node unresolved so
    /// a later access retries.
    pub fn with_oid(connector: Arc<dyn Connector>, oid: impl Into<String>) -> Self {
        Self {
            connector,
            state: State::Unresolved(oid.into()),
            cache: HashMap::new(),
        }
    }

    /// Identifier this node was constructed from or fetched from, if any.
    pub fn oid(&self) -> Option<&str> {
        match &self.state {
            State::Unresolved(oid) => Some(oid),
            State::Resolved { oid, .. } => oid.as_deref(),
        }
    }

    /// True once the backing document is in memory.
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Resolved { .. })
    }

    /// Read-only view of the backing document. Forces resolution of a
    /// deferred identifier.
    pub async fn raw(&mut self) -> Result<&Value, ResourceError> {
        self.resolve().await
    }

    /// Navigate to the field `key`.
    ///
    /// Returns the cached child when present; otherwise classifies
    /// `raw[key]`, caches the new child under `key`, and returns it. Fails
    /// with [`ResourceError::KeyNotApplicable`] when the document is not an
    /// object and [`ResourceError::KeyNotFound`] when the field is absent.
    pub async fn get(&mut self, key: &str) -> Result<&mut Resource, ResourceError> {
        let cache_key = CacheKey::Field(key.to_string());
        if !self.cache.contains_key(&cache_key) {
            let value = {
                let raw = self.resolve().await?;
                let Some(map) = raw.as_object() else {
                    return Err(ResourceError::KeyNotApplicable(format!(
                        "cannot access field {:?} on a non-object value",
                        key
                    )));
                };
                map.get(key)
                    .cloned()
                    .ok_or_else(|| ResourceError::KeyNotFound(key.to_string()))?
            };
            let child = self.wrap(value);
            self.cache.insert(cache_key.clone(), child);
        }
        Ok(self.cached(&cache_key))
    }

    /// Attribute-style access: `get` with lookup failures translated into
    /// [`ResourceError::NoSuchMember`]. Transport failures pass through
    /// untranslated.
    pub async fn member(&mut self, name: &str) -> Result<&mut Resource, ResourceError> {
        self.get(name).await.map_err(|err| match err {
            ResourceError::KeyNotFound(_) | ResourceError::KeyNotApplicable(_) => {
                ResourceError::NoSuchMember(name.to_string())
            }
            other => other,
        })
    }

    /// Whether `get(key)` would find a field, without classifying or caching
    /// a child (and without fetching a referenced document). Forces
    /// resolution of this node's own body, since field presence cannot be
    /// known before the document is.
    pub async fn has(&mut self, key: &str) -> Result<bool, ResourceError> {
        if self.cache.contains_key(&CacheKey::Field(key.to_string())) {
            return Ok(true);
        }
        let raw = self.resolve().await?;
        Ok(raw.as_object().is_some_and(|map| map.contains_key(key)))
    }

    /// Navigate to the `index`-th entry of the `Members` collection.
    ///
    /// Reference-shaped entries become deferred children fetched on their
    /// first access. Fails with [`ResourceError::IndexOutOfRange`] beyond the
    /// collection bounds and [`ResourceError::KeyNotApplicable`] when the
    /// document has no `Members` array.
    pub async fn index(&mut self, index: usize) -> Result<&mut Resource, ResourceError> {
        let cache_key = CacheKey::Member(index);
        if !self.cache.contains_key(&cache_key) {
            let value = {
                let raw = self.resolve().await?;
                let members = raw
                    .get(MEMBERS_FIELD)
                    .and_then(Value::as_array)
                    .ok_or_else(|| {
                        ResourceError::KeyNotApplicable(
                            "cannot index into a resource without a Members collection"
                                .to_string(),
                        )
                    })?;
                members
                    .get(index)
                    .cloned()
                    .ok_or(ResourceError::IndexOutOfRange {
                        index,
                        len: members.len(),
                    })?
            };
            let child = self.wrap(value);
            self.cache.insert(cache_key.clone(), child);
        }
        Ok(self.cached(&cache_key))
    }

    /// Canonical JSON text of the backing document. Forces resolution.
    pub async fn to_text(&mut self) -> Result<String, ResourceError> {
        let raw = self.resolve().await?;
        Ok(raw.to_string())
    }

    /// Drop all cached children and return the now-empty cache. The node's
    /// own resolved body is untouched; the next access of any child key
    /// re-classifies it, re-fetching referenced documents.
    pub fn reset(&mut self) -> &HashMap<CacheKey, Resource> {
        self.cache.clear();
        &self.cache
    }

    /// Fetch the backing document if this node is still deferred.
    async fn resolve(&mut self) -> Result<&Value, ResourceError> {
        if let State::Unresolved(oid) = &self.state {
            let oid = oid.clone();
            tracing::debug!("resolving deferred resource {}", oid);
            let raw = self
                .connector
                .get(&oid)
                .await
                .map_err(|source| ResourceError::Transport {
                    oid: oid.clone(),
                    source,
                })?;
            self.state = State::Resolved {
                oid: Some(oid),
                raw,
            };
        }
        match &self.state {
            State::Resolved { raw, .. } => Ok(raw),
            State::Unresolved(_) => unreachable!("state is resolved after a successful fetch"),
        }
    }

    /// Classify a raw JSON value and wrap it as a child resource sharing
    /// this node's connector.
    fn wrap(&self, value: Value) -> Resource {
        match reference_target(&value) {
            Some(oid) => Resource::with_oid(Arc::clone(&self.connector), oid),
            None => Resource::with_content(Arc::clone(&self.connector), value),
        }
    }

    fn cached(&mut self, key: &CacheKey) -> &mut Resource {
        self.cache
            .get_mut(key)
            .expect("cache entry checked or inserted by the caller")
    }
}

/// Extract the link target from a reference marker.
///
/// A value is a pure reference iff it is an object whose only key is the
/// `@odata.id` marker with a string value. An object carrying extra keys
/// alongside the marker is treated as embedded data, not a reference.
fn reference_target(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }
    map.get(ODATA_ID_FIELD)?.as_str().map(str::to_owned)
}
