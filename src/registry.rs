//! Registry of response sets and request dispatch.

use crate::error::Error;
use crate::request::{RequestProfile, UrlComponents};
use crate::response::Response;
use crate::set::ResponseSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns every registered [`ResponseSet`] and routes each intercepted request
/// to the first matching set's active response.
///
/// Request names are unique across the registry; [`register`](Self::register)
/// rejects duplicates. Sets are consulted in registration order.
///
/// The registry does no locking of its own. A host serving concurrent
/// requests wraps it at the boundary (e.g. in an `RwLock`): developer tooling
/// is the only writer, request threads only read.
#[derive(Debug, Default)]
pub struct Registry {
    sets: Vec<ResponseSet>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a response set.
    ///
    /// Fails with [`Error::DuplicateName`] if a set with the same request
    /// name is already registered.
    pub fn register(&mut self, set: ResponseSet) -> Result<(), Error> {
        if self.sets.iter().any(|s| s.request_name() == set.request_name()) {
            return Err(Error::DuplicateName(set.request_name().to_string()));
        }
        debug!(
            set = %set.request_name(),
            responses = set.responses().len(),
            "response set registered"
        );
        self.sets.push(set);
        Ok(())
    }

    /// Remove and return the set with the given request name.
    pub fn unregister(&mut self, request_name: &str) -> Option<ResponseSet> {
        let idx = self
            .sets
            .iter()
            .position(|s| s.request_name() == request_name)?;
        Some(self.sets.remove(idx))
    }

    /// Remove all registered sets.
    pub fn clear(&mut self) {
        self.sets.clear();
    }

    /// Number of registered sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether no sets are registered.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Request names of all registered sets, in registration order. This is
    /// the handle a response-switching surface enumerates.
    pub fn names(&self) -> Vec<&str> {
        self.sets.iter().map(|s| s.request_name()).collect()
    }

    /// The set with the given request name, if registered.
    pub fn set_named(&self, request_name: &str) -> Option<&ResponseSet> {
        self.sets.iter().find(|s| s.request_name() == request_name)
    }

    /// Mutable access to the set with the given request name, for switching
    /// its active response.
    pub fn set_named_mut(&mut self, request_name: &str) -> Option<&mut ResponseSet> {
        self.sets
            .iter_mut()
            .find(|s| s.request_name() == request_name)
    }

    /// The first registered set that claims the given request.
    pub fn matching_set(
        &self,
        request: &RequestProfile,
        components: &UrlComponents,
    ) -> Option<&ResponseSet> {
        self.sets.iter().find(|s| s.matches(request, components))
    }

    /// Resolve an intercepted request to a canned response.
    ///
    /// Parses the request url once, asks each set in registration order
    /// whether it matches, and returns the first matching set's active
    /// response. `None` means no set claimed the request (or the claiming
    /// set is empty) and the host should let the request through for real.
    pub fn response_for(&self, request: &RequestProfile) -> Option<Arc<dyn Response>> {
        let components = UrlComponents::parse(&request.url);

        let Some(set) = self.matching_set(request, &components) else {
            debug!(
                method = %request.method,
                path = %components.path,
                "no response set matched"
            );
            return None;
        };

        match set.active_response() {
            Some(response) => {
                debug!(
                    set = %set.request_name(),
                    response = %response.name(),
                    method = %request.method,
                    path = %components.path,
                    "request matched response set"
                );
                Some(Arc::clone(response))
            }
            None => {
                warn!(
                    set = %set.request_name(),
                    path = %components.path,
                    "matching response set has no responses"
                );
                None
            }
        }
    }
}
