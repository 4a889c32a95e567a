//! Barricade - in-process request stubbing
//!
//! Substitute canned, deterministic responses for real network calls during
//! development and testing. For each logical endpoint you register a
//! [`ResponseSet`]: every response the server might plausibly return
//! (success, invalid credentials, locked out, offline, ...) plus a predicate
//! deciding which requests belong to that endpoint. A [`Registry`] routes
//! each intercepted request to the first matching set's currently active
//! response - the first-registered response by default, or whichever one the
//! developer has switched to.
//!
//! # Features
//!
//! - **Response sets**: named, ordered candidate responses per endpoint
//! - **Active response**: first-added is the default, switchable at runtime
//! - **Match predicates**: plain closures over the request and its parsed
//!   url components, with ready-made path/method constructors in
//!   [`predicate`]
//! - **Registry dispatch**: first-match routing with enforced request-name
//!   uniqueness
//!
//! # Example
//!
//! ```
//! use barricade::{predicate, Registry, RequestProfile, ResponseSet};
//!
//! let mut registry = Registry::new();
//!
//! let mut login = ResponseSet::new("Login", predicate::exact_path("/login")).unwrap();
//! login.create_named_response("success", |response| {
//!     response.status = 200;
//! });
//! login.create_named_response("locked-out", |response| {
//!     response.status = 403;
//! });
//! registry.register(login).unwrap();
//!
//! // The first-added response answers by default.
//! let reply = registry.response_for(&RequestProfile::post("/login")).unwrap();
//! assert_eq!(reply.name(), "success");
//!
//! // Switch the scenario without touching application code.
//! let login = registry.set_named_mut("Login").unwrap();
//! let locked_out = login.find_response("locked-out").unwrap();
//! login.set_active_response(locked_out);
//!
//! let reply = registry.response_for(&RequestProfile::post("/login")).unwrap();
//! assert_eq!(reply.name(), "locked-out");
//! ```
//!
//! Hooking the HTTP stack, rendering a [`Response`] onto the wire, and any
//! response-switching UI are the host application's concern; this crate only
//! models the sets, the matching, and the selection. Nothing here locks or
//! blocks - hosts serving concurrent requests synchronize around the
//! [`Registry`] at their boundary.

pub mod error;
pub mod predicate;
pub mod registry;
pub mod request;
pub mod response;
pub mod set;

pub use error::Error;
pub use registry::Registry;
pub use request::{RequestProfile, UrlComponents};
pub use response::{Response, StubBody, StubResponse};
pub use set::ResponseSet;
