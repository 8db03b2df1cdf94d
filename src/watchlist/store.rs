use std::collections::HashMap;

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use super::WatchlistItem;
use crate::core::{SignalistError, Symbol};

/// Persistence for users' watchlists.
///
/// Implementations must treat `(user_id, symbol)` as unique and store symbols already
/// normalized (they arrive as [`Symbol`]).
pub trait WatchlistStore: Send + Sync {
    /// Resolves an account email to its user id. `Ok(None)` when no such user exists.
    fn user_id_for_email<'a>(
        &'a self,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>, SignalistError>>;

    /// Every symbol the user watches, in no particular order.
    fn symbols_for_user<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Symbol>, SignalistError>>;

    fn find<'a>(
        &'a self,
        user_id: &'a str,
        symbol: &'a Symbol,
    ) -> BoxFuture<'a, Result<Option<WatchlistItem>, SignalistError>>;

    /// Stores a new row. Fails with `Store` if the `(user_id, symbol)` pair already exists.
    fn insert(&self, item: WatchlistItem) -> BoxFuture<'_, Result<(), SignalistError>>;

    /// Removes a row. Returns whether anything was deleted.
    fn delete<'a>(
        &'a self,
        user_id: &'a str,
        symbol: &'a Symbol,
    ) -> BoxFuture<'a, Result<bool, SignalistError>>;

    /// The user's rows, newest first.
    fn list_for_user<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<WatchlistItem>, SignalistError>>;
}

/// A process-local [`WatchlistStore`], handy for tests and single-node deployments.
#[derive(Debug, Default)]
pub struct InMemoryWatchlistStore {
    users: RwLock<HashMap<String, String>>,
    items: RwLock<Vec<WatchlistItem>>,
}

impl InMemoryWatchlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or re-points) an account email to a user id.
    pub async fn register_user(&self, user_id: impl Into<String>, email: impl Into<String>) {
        self.users
            .write()
            .await
            .insert(email.into().to_lowercase(), user_id.into());
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

impl WatchlistStore for InMemoryWatchlistStore {
    fn user_id_for_email<'a>(
        &'a self,
        email: &'a str,
    ) -> BoxFuture<'a, Result<Option<String>, SignalistError>> {
        Box::pin(async move {
            let key = email.trim().to_lowercase();
            Ok(self.users.read().await.get(&key).cloned())
        })
    }

    fn symbols_for_user<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Symbol>, SignalistError>> {
        Box::pin(async move {
            Ok(self
                .items
                .read()
                .await
                .iter()
                .filter(|i| i.user_id == user_id)
                .map(|i| i.symbol.clone())
                .collect())
        })
    }

    fn find<'a>(
        &'a self,
        user_id: &'a str,
        symbol: &'a Symbol,
    ) -> BoxFuture<'a, Result<Option<WatchlistItem>, SignalistError>> {
        Box::pin(async move {
            Ok(self
                .items
                .read()
                .await
                .iter()
                .find(|i| i.user_id == user_id && &i.symbol == symbol)
                .cloned())
        })
    }

    fn insert(&self, item: WatchlistItem) -> BoxFuture<'_, Result<(), SignalistError>> {
        Box::pin(async move {
            let mut items = self.items.write().await;
            if items
                .iter()
                .any(|i| i.user_id == item.user_id && i.symbol == item.symbol)
            {
                return Err(SignalistError::Store(format!(
                    "duplicate watchlist entry {} for user {}",
                    item.symbol, item.user_id
                )));
            }
            items.push(item);
            Ok(())
        })
    }

    fn delete<'a>(
        &'a self,
        user_id: &'a str,
        symbol: &'a Symbol,
    ) -> BoxFuture<'a, Result<bool, SignalistError>> {
        Box::pin(async move {
            let mut items = self.items.write().await;
            let before = items.len();
            items.retain(|i| !(i.user_id == user_id && &i.symbol == symbol));
            Ok(items.len() != before)
        })
    }

    fn list_for_user<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<WatchlistItem>, SignalistError>> {
        Box::pin(async move {
            let mut rows: Vec<WatchlistItem> = self
                .items
                .read()
                .await
                .iter()
                .filter(|i| i.user_id == user_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.added_at.cmp(&a.added_at));
            Ok(rows)
        })
    }
}
