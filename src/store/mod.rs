//! Persistence for reviews: one capability, two implementations chosen per page.
pub mod local;
pub mod remote;

use crate::error::ReviewError;
use crate::models::review::ReviewRecord;
use futures::future::LocalBoxFuture;

pub use local::{BrowserStorage, KeyValueStorage, LocalStore};
pub use remote::{FetchedReviews, HttpCollection, RemoteStore, ReviewCollection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Shared, multi-writer collection on the server.
    Remote,
    /// Single browser profile, synchronous.
    Local,
}

/// Load and write operations the review session needs from a backing store.
///
/// Futures are not `Send`: the page runs on one thread.
pub trait ReviewStore {
    fn kind(&self) -> StoreKind;

    /// Everything the store currently holds, in arrival order.
    fn load(&self) -> LocalBoxFuture<'_, Result<Vec<ReviewRecord>, ReviewError>>;

    /// Persists a new submission. `record` is the new review; `submitted` is the
    /// complete submitted set including `record` (seed excluded). Append-style
    /// stores only need the former, whole-value stores only the latter.
    fn write<'a>(
        &'a self,
        record: &'a ReviewRecord,
        submitted: &'a [ReviewRecord],
    ) -> LocalBoxFuture<'a, Result<(), ReviewError>>;
}
