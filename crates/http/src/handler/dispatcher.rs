use std::rc::Rc;

use tracing::debug;

use crate::handler::{Lookup, Store};
use crate::protocol::{ParsedRequest, ResponseOutcome};

/// The key looked up for `/` under [`EmptyPathPolicy::RootKey`]
pub const ROOT_KEY: &[u8] = b"/";

/// What an empty key, the path `/`, resolves to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPathPolicy {
    /// Look up the literal key `/`.
    #[default]
    RootKey,
    /// Answer `400 Bad Request` without a lookup.
    Reject,
}

/// Maps a parsed request to one read-only store lookup.
///
/// The request method is ignored: every method performs the same lookup.
#[derive(Debug)]
pub struct Dispatcher<S> {
    store: Rc<S>,
    empty_path: EmptyPathPolicy,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self { store: Rc::clone(&self.store), empty_path: self.empty_path }
    }
}

impl<S: Store> Dispatcher<S> {
    pub fn new(store: Rc<S>) -> Self {
        Self { store, empty_path: EmptyPathPolicy::default() }
    }

    #[must_use]
    pub fn with_empty_path(mut self, empty_path: EmptyPathPolicy) -> Self {
        self.empty_path = empty_path;
        self
    }

    pub fn empty_path(&self) -> EmptyPathPolicy {
        self.empty_path
    }

    pub fn dispatch(&self, request: &ParsedRequest) -> ResponseOutcome {
        let key = match (normalize_path(request.path()), self.empty_path) {
            (b"", EmptyPathPolicy::RootKey) => ROOT_KEY,
            (b"", EmptyPathPolicy::Reject) => {
                debug!("empty key rejected");
                return ResponseOutcome::BadRequest;
            }
            (key, _) => key,
        };

        match self.store.lookup(key) {
            Lookup::Found(value) => ResponseOutcome::Ok(value.render()),
            Lookup::Absent => {
                debug!(key = %String::from_utf8_lossy(key), "no content at the specified key");
                ResponseOutcome::NotFound
            }
            Lookup::WrongType => {
                debug!(key = %String::from_utf8_lossy(key), "selected key type is invalid for http output");
                ResponseOutcome::NotFound
            }
        }
    }
}

/// Strips exactly one leading `/`; anything else is passed through.
fn normalize_path(path: &[u8]) -> &[u8] {
    path.strip_prefix(b"/").unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{MockStore, StoredValue};
    use bytes::Bytes;
    use http::{Method, Version};
    use mockall::predicate::eq;

    fn request(method: Method, path: &'static str) -> ParsedRequest {
        ParsedRequest::new(method, Bytes::from_static(path.as_bytes()), Version::HTTP_10, Vec::new())
    }

    fn dispatcher(store: MockStore) -> Dispatcher<MockStore> {
        Dispatcher::new(Rc::new(store))
    }

    #[test]
    fn check_normalize_path() {
        assert_eq!(normalize_path(b"/key"), b"key");
        assert_eq!(normalize_path(b"//key"), b"/key");
        assert_eq!(normalize_path(b"key"), b"key");
        assert_eq!(normalize_path(b"/"), b"");
        assert_eq!(normalize_path(b""), b"");
    }

    #[test]
    fn found_value_is_the_body() {
        let mut store = MockStore::new();
        store
            .expect_lookup()
            .with(eq(&b"greeting"[..]))
            .times(1)
            .returning(|_| Lookup::Found(StoredValue::Raw(Bytes::from_static(b"hello"))));

        let outcome = dispatcher(store).dispatch(&request(Method::GET, "/greeting"));
        assert_eq!(outcome, ResponseOutcome::Ok(Bytes::from_static(b"hello")));
    }

    #[test]
    fn integer_value_renders_as_text() {
        let mut store = MockStore::new();
        store.expect_lookup().times(1).returning(|_| Lookup::Found(StoredValue::Int(42)));

        let outcome = dispatcher(store).dispatch(&request(Method::GET, "/counter"));
        assert_eq!(outcome, ResponseOutcome::Ok(Bytes::from_static(b"42")));
    }

    #[test]
    fn absent_and_wrong_type_look_the_same() {
        let mut store = MockStore::new();
        store.expect_lookup().with(eq(&b"missing"[..])).times(1).returning(|_| Lookup::Absent);
        store.expect_lookup().with(eq(&b"composite"[..])).times(1).returning(|_| Lookup::WrongType);
        let dispatcher = dispatcher(store);

        let absent = dispatcher.dispatch(&request(Method::GET, "/missing"));
        let wrong_type = dispatcher.dispatch(&request(Method::GET, "/composite"));
        assert_eq!(absent, ResponseOutcome::NotFound);
        assert_eq!(absent, wrong_type);
    }

    #[test]
    fn root_path_maps_to_root_key() {
        let mut store = MockStore::new();
        store.expect_lookup().with(eq(ROOT_KEY)).times(1).returning(|_| Lookup::Found(StoredValue::Raw(Bytes::from_static(b"root"))));

        let outcome = dispatcher(store).dispatch(&request(Method::GET, "/"));
        assert_eq!(outcome, ResponseOutcome::Ok(Bytes::from_static(b"root")));
    }

    #[test]
    fn root_path_rejected_without_lookup() {
        let mut store = MockStore::new();
        store.expect_lookup().times(0);

        let dispatcher = dispatcher(store).with_empty_path(EmptyPathPolicy::Reject);
        assert_eq!(dispatcher.dispatch(&request(Method::GET, "/")), ResponseOutcome::BadRequest);
    }

    #[test]
    fn method_does_not_change_the_lookup() {
        let mut store = MockStore::new();
        store.expect_lookup().with(eq(&b"key"[..])).times(3).returning(|_| Lookup::Found(StoredValue::Int(1)));
        let dispatcher = dispatcher(store);

        for method in [Method::GET, Method::POST, Method::DELETE] {
            assert_eq!(dispatcher.dispatch(&request(method, "/key")), ResponseOutcome::Ok(Bytes::from_static(b"1")));
        }
    }

    #[test]
    fn path_without_leading_slash_is_used_as_is() {
        let mut store = MockStore::new();
        store.expect_lookup().with(eq(&b"*"[..])).times(1).returning(|_| Lookup::Absent);

        assert_eq!(dispatcher(store).dispatch(&request(Method::OPTIONS, "*")), ResponseOutcome::NotFound);
    }
}
