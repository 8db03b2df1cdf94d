//! Per-request state: the caller's identity and the memo cache for that request.

use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::future::Future;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::core::SignalistError;

/// The signed-in user as reported by the session collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
}

/// A resolved session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

impl Session {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user: SessionUser {
                id: id.into(),
                email: email.into(),
            },
        }
    }
}

type MemoKey = (&'static str, u64);
type MemoSlot = Arc<OnceCell<Box<dyn Any + Send + Sync>>>;

/// Memoizes operation results for the lifetime of one request.
///
/// Keys are `(operation name, hash of arguments)`. Concurrent callers with the same key wait on
/// a single computation. Failed computations leave the slot empty so a later call can retry.
#[derive(Default)]
pub struct RequestCache {
    slots: Mutex<HashMap<MemoKey, MemoSlot>>,
}

impl std::fmt::Debug for RequestCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("RequestCache").field("entries", &len).finish()
    }
}

impl RequestCache {
    fn slot(&self, key: MemoKey) -> MemoSlot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(key).or_default().clone()
    }

    /// Returns the memoized value for `(op, args)`, computing it with `init` on first use.
    ///
    /// # Errors
    ///
    /// Propagates the error from `init`; nothing is stored in that case.
    pub async fn get_or_try_init<A, T, F, Fut>(
        &self,
        op: &'static str,
        args: &A,
        init: F,
    ) -> Result<T, SignalistError>
    where
        A: Hash + ?Sized,
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, SignalistError>>,
    {
        let mut hasher = DefaultHasher::new();
        args.hash(&mut hasher);
        let key = (op, hasher.finish());
        let slot = self.slot(key);

        let stored = slot
            .get_or_try_init(move || async move {
                let value = init().await?;
                Ok::<_, SignalistError>(Box::new(value) as Box<dyn Any + Send + Sync>)
            })
            .await?;

        stored
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| SignalistError::Data(format!("memo type mismatch for {op}")))
    }

    /// Number of memoized (or in-flight) entries.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything scoped to one logical request: who is calling and what was already computed.
///
/// Create one at request start and drop it at request end; nothing in it outlives the request.
#[derive(Debug, Default)]
pub struct RequestContext {
    session: Option<Session>,
    memo: RequestCache,
}

impl RequestContext {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            session,
            memo: RequestCache::default(),
        }
    }

    /// A context for a signed-in caller.
    pub fn authenticated(session: Session) -> Self {
        Self::new(Some(session))
    }

    /// A context with no caller identity.
    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// # Errors
    ///
    /// Returns [`SignalistError::Unauthenticated`] when the request carries no session.
    pub fn require_session(&self) -> Result<&Session, SignalistError> {
        self.session.as_ref().ok_or(SignalistError::Unauthenticated)
    }

    pub fn memo(&self) -> &RequestCache {
        &self.memo
    }
}
