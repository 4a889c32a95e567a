//! Response set: the candidate responses for one logical endpoint.

use crate::error::Error;
use crate::predicate::MatchPredicate;
use crate::request::{RequestProfile, UrlComponents};
use crate::response::{Response, StubResponse};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// All responses that might be returned for one logical endpoint, plus the
/// one currently designated to be returned.
///
/// For a request to `/login` a set might hold responses for successful
/// authentication, invalid credentials, a locked-out account, and the server
/// being unreachable. The first response added becomes the active one until a
/// caller overrides it with [`set_active_response`](Self::set_active_response)
/// (typically a developer toggle surface choosing from
/// [`responses`](Self::responses)).
///
/// The set's name and match predicate are fixed at construction. Uniqueness
/// of the name across all registered sets is the registry's contract, not
/// checked here.
pub struct ResponseSet {
    request_name: String,
    responses: Vec<Arc<dyn Response>>,
    active: Option<Arc<dyn Response>>,
    predicate: MatchPredicate,
}

impl ResponseSet {
    /// Create an empty response set for the endpoint identified by
    /// `request_name`, claiming requests for which `predicate` returns true.
    ///
    /// Fails with [`Error::InvalidArgument`] if the name is empty.
    pub fn new(
        request_name: impl Into<String>,
        predicate: impl Fn(&RequestProfile, &UrlComponents) -> bool + Send + Sync + 'static,
    ) -> Result<Self, Error> {
        let request_name = request_name.into();
        if request_name.is_empty() {
            return Err(Error::InvalidArgument(
                "request name cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            request_name,
            responses: Vec::new(),
            active: None,
            predicate: Box::new(predicate),
        })
    }

    /// Developer-facing name of the endpoint this set serves, e.g. "Login".
    pub fn request_name(&self) -> &str {
        &self.request_name
    }

    /// All responses in this set, in insertion order.
    pub fn responses(&self) -> &[Arc<dyn Response>] {
        &self.responses
    }

    /// Add a response to the set.
    ///
    /// The first response ever added becomes the active response; later adds
    /// leave the active response untouched. Every call appends, duplicates
    /// included.
    pub fn add_response(&mut self, response: Arc<dyn Response>) {
        if self.active.is_none() {
            trace!(
                set = %self.request_name,
                response = %response.name(),
                "first response becomes active"
            );
            self.active = Some(Arc::clone(&response));
        }
        self.responses.push(response);
    }

    /// Add a response produced by `builder_fn`. The closure runs exactly
    /// once, immediately.
    pub fn create_response_with<R, F>(&mut self, builder_fn: F)
    where
        R: Response + 'static,
        F: FnOnce() -> R,
    {
        self.add_response(Arc::new(builder_fn()));
    }

    /// Add a [`StubResponse`] pre-populated with `name` and filled in by
    /// `populate_fn`. Mutations made by the closure are visible in the stored
    /// response.
    pub fn create_named_response<F>(&mut self, name: impl Into<String>, populate_fn: F)
    where
        F: FnOnce(&mut StubResponse),
    {
        let mut response = StubResponse::named(name);
        populate_fn(&mut response);
        self.add_response(Arc::new(response));
    }

    /// Return the first response whose name equals `name` exactly.
    ///
    /// `None` is a normal outcome; callers probe for optional overrides.
    pub fn find_response(&self, name: &str) -> Option<Arc<dyn Response>> {
        self.responses
            .iter()
            .find(|r| r.name() == name)
            .map(Arc::clone)
    }

    /// Whether this set claims the given request.
    ///
    /// Delegates to the match predicate and returns its answer unmodified.
    /// The predicate is re-evaluated on every call.
    pub fn matches(&self, request: &RequestProfile, components: &UrlComponents) -> bool {
        (self.predicate)(request, components)
    }

    /// The response currently designated to be returned when this set
    /// matches. `None` only while the set is empty.
    pub fn active_response(&self) -> Option<&Arc<dyn Response>> {
        self.active.as_ref()
    }

    /// Override the active response.
    ///
    /// Callers are expected to pick from [`responses`](Self::responses); the
    /// set does not re-validate membership.
    pub fn set_active_response(&mut self, response: Arc<dyn Response>) {
        trace!(
            set = %self.request_name,
            response = %response.name(),
            "active response overridden"
        );
        self.active = Some(response);
    }
}

impl fmt::Debug for ResponseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseSet")
            .field("request_name", &self.request_name)
            .field(
                "responses",
                &self.responses.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("active", &self.active.as_ref().map(|r| r.name()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::exact_path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn stub(name: &str) -> Arc<dyn Response> {
        Arc::new(StubResponse::named(name))
    }

    fn login_set() -> ResponseSet {
        ResponseSet::new("Login", exact_path("/login")).unwrap()
    }

    #[test]
    fn test_first_added_becomes_active() {
        let mut set = login_set();
        let r1 = stub("success");
        let r2 = stub("locked-out");

        set.add_response(Arc::clone(&r1));
        set.add_response(Arc::clone(&r2));

        let active = set.active_response().unwrap();
        assert!(Arc::ptr_eq(active, &r1));
        assert_eq!(set.responses().len(), 2);
    }

    #[test]
    fn test_explicit_override_persists() {
        let mut set = login_set();
        let r1 = stub("success");
        let r2 = stub("locked-out");
        set.add_response(Arc::clone(&r1));
        set.add_response(Arc::clone(&r2));

        set.set_active_response(Arc::clone(&r2));
        assert!(Arc::ptr_eq(set.active_response().unwrap(), &r2));

        // A later add does not disturb the override
        set.add_response(stub("server-error"));
        assert!(Arc::ptr_eq(set.active_response().unwrap(), &r2));

        set.set_active_response(Arc::clone(&r1));
        assert!(Arc::ptr_eq(set.active_response().unwrap(), &r1));
    }

    #[test]
    fn test_find_response_by_name() {
        let mut set = login_set();
        set.add_response(stub("ok"));
        set.add_response(stub("error"));

        assert_eq!(set.find_response("error").unwrap().name(), "error");
        assert!(set.find_response("missing").is_none());
    }

    #[test]
    fn test_find_returns_first_of_duplicates() {
        let mut set = login_set();
        let first = stub("dup");
        set.add_response(Arc::clone(&first));
        set.add_response(stub("dup"));

        assert!(Arc::ptr_eq(&set.find_response("dup").unwrap(), &first));
    }

    #[test]
    fn test_predicate_delegation_uncached() {
        // A stateful predicate answers true, false, true, ... - the set must
        // report each answer as given, proving nothing is cached.
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut set = ResponseSet::new("Flaky", move |_req, _comps| {
            counter.fetch_add(1, Ordering::SeqCst) % 2 == 0
        })
        .unwrap();
        set.add_response(stub("ok"));

        let req = RequestProfile::get("/anything");
        let comps = UrlComponents::parse("/anything");
        assert!(set.matches(&req, &comps));
        assert!(!set.matches(&req, &comps));
        assert!(set.matches(&req, &comps));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_construction_validation() {
        assert!(matches!(
            ResponseSet::new("", exact_path("/login")),
            Err(Error::InvalidArgument(_))
        ));

        let set = login_set();
        assert!(set.responses().is_empty());
        assert!(set.active_response().is_none());
    }

    #[test]
    fn test_create_response_with_runs_eagerly() {
        let mut set = login_set();
        let ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ran);
        set.create_response_with(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            StubResponse::named("built").with_status(503)
        });

        assert_eq!(ran.load(Ordering::SeqCst), 1);
        assert_eq!(set.active_response().unwrap().name(), "built");
    }

    #[test]
    fn test_create_named_response_population_visible() {
        let mut set = login_set();
        set.create_named_response("invalid-credentials", |response| {
            response.status = 401;
            response.name.push_str("-v2");
        });

        // The stored response carries the closure's mutations
        let found = set.find_response("invalid-credentials-v2").unwrap();
        assert_eq!(found.name(), "invalid-credentials-v2");
        assert!(set.find_response("invalid-credentials").is_none());
        assert_eq!(set.responses().len(), 1);
    }

    #[test]
    fn test_override_without_membership_check() {
        // The set does not verify the override came from its own collection;
        // that boundary belongs to the caller.
        let mut set = login_set();
        set.add_response(stub("success"));

        let foreign = stub("foreign");
        set.set_active_response(Arc::clone(&foreign));
        assert!(Arc::ptr_eq(set.active_response().unwrap(), &foreign));
    }
}
