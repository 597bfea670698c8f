//! Append-only meme collection.

use std::sync::{Arc, Weak};

use mememe_common::error::{MemeError, MemeResult};
use mememe_model::meme::Meme;
use parking_lot::RwLock;

/// Ordered collection of every meme saved this session.
///
/// Index `i` names the `i`-th meme ever appended and keeps naming it for
/// the life of the store: there is no removal, replacement or reordering.
#[derive(Debug, Default)]
pub struct MemeStore {
    memes: RwLock<Vec<Meme>>,
}

impl MemeStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store ready to be shared between a flow and its views.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Add `meme` as the new last element and return its index.
    ///
    /// Never rejects; identical memes become separate entries.
    pub fn append(&self, meme: Meme) -> usize {
        let mut memes = self.memes.write();
        memes.push(meme);
        let index = memes.len() - 1;
        tracing::debug!(index, "Meme appended to store");
        index
    }

    /// A copy of the meme at `index`.
    pub fn get(&self, index: usize) -> MemeResult<Meme> {
        let memes = self.memes.read();
        memes
            .get(index)
            .cloned()
            .ok_or(MemeError::IndexOutOfRange {
                index,
                count: memes.len(),
            })
    }

    /// Number of memes. Never decreases.
    pub fn count(&self) -> usize {
        self.memes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The most recently appended meme.
    pub fn last(&self) -> Option<Meme> {
        self.memes.read().last().cloned()
    }

    /// Copies of all memes in insertion order.
    pub fn snapshot(&self) -> Vec<Meme> {
        self.memes.read().clone()
    }

    /// A non-owning reference for read-side views.
    pub fn view_handle(self: &Arc<Self>) -> StoreHandle {
        StoreHandle {
            store: Arc::downgrade(self),
        }
    }
}

/// Weak back-reference to a [`MemeStore`]; never keeps the store alive.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    store: Weak<MemeStore>,
}

impl StoreHandle {
    /// Resolve the store, failing if it has already been dropped.
    pub fn upgrade(&self) -> MemeResult<Arc<MemeStore>> {
        self.store.upgrade().ok_or(MemeError::StoreUnavailable)
    }

    pub fn count(&self) -> MemeResult<usize> {
        Ok(self.upgrade()?.count())
    }

    pub fn get(&self, index: usize) -> MemeResult<Meme> {
        self.upgrade()?.get(index)
    }
}
