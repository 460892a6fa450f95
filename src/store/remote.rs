use super::{ReviewStore, StoreKind};
use crate::error::ReviewError;
use crate::models::review::{seed_review, ReviewDocument, ReviewRecord};
use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;
use leptos::logging::{log, warn};

/// One read of the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedReviews {
    /// Mapped documents, ordered by server timestamp ascending.
    pub documents: Vec<ReviewDocument>,
    /// Raw documents that did not form a valid review.
    pub skipped: usize,
}

impl FetchedReviews {
    /// True only when the collection itself held no documents at all.
    pub fn is_empty_collection(&self) -> bool {
        self.documents.is_empty() && self.skipped == 0
    }
}

/// The two operations the review core needs from a shared document collection.
pub trait ReviewCollection {
    fn fetch_ordered(&self) -> LocalBoxFuture<'_, Result<FetchedReviews, ReviewError>>;

    /// Appends one document; the collection assigns its id and timestamp.
    fn append<'a>(&'a self, record: &'a ReviewRecord) -> LocalBoxFuture<'a, Result<(), ReviewError>>;
}

/// Browser client for the server's review endpoints.
#[derive(Debug, Clone)]
pub struct HttpCollection {
    endpoint: String,
}

impl HttpCollection {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    async fn fetch(&self) -> Result<FetchedReviews, ReviewError> {
        let response = Request::get(&self.endpoint)
            .send()
            .await
            .map_err(|e| ReviewError::StoreUnavailable(e.to_string()))?;
        if !response.ok() {
            return Err(ReviewError::StoreUnavailable(format!(
                "GET {} returned {}",
                self.endpoint,
                response.status()
            )));
        }
        let raw: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ReviewError::StoreUnavailable(e.to_string()))?;
        Ok(map_documents(raw))
    }

    async fn post(&self, record: &ReviewRecord) -> Result<(), ReviewError> {
        let response = Request::post(&self.endpoint)
            .json(record)
            .map_err(|e| ReviewError::StoreUnavailable(e.to_string()))?
            .send()
            .await
            .map_err(|e| ReviewError::StoreUnavailable(e.to_string()))?;
        if !response.ok() {
            return Err(ReviewError::StoreUnavailable(format!(
                "POST {} returned {}",
                self.endpoint,
                response.status()
            )));
        }
        Ok(())
    }
}

impl ReviewCollection for HttpCollection {
    fn fetch_ordered(&self) -> LocalBoxFuture<'_, Result<FetchedReviews, ReviewError>> {
        self.fetch().boxed_local()
    }

    fn append<'a>(&'a self, record: &'a ReviewRecord) -> LocalBoxFuture<'a, Result<(), ReviewError>> {
        self.post(record).boxed_local()
    }
}

/// Maps raw documents field by field, skipping any that do not form a valid review.
fn map_documents(raw: Vec<serde_json::Value>) -> FetchedReviews {
    let mut fetched = FetchedReviews::default();
    for value in raw {
        match serde_json::from_value::<ReviewDocument>(value) {
            Ok(doc) => fetched.documents.push(doc),
            Err(e) => {
                warn!("[STORE] Skipping malformed review document: {}", e);
                fetched.skipped += 1;
            }
        }
    }
    fetched
}

/// Review store backed by a shared collection.
///
/// Seeding an empty collection is check-then-act: two clients loading an empty
/// collection at the same time can both write a seed document. Nothing downstream
/// assumes records are unique, so duplicates simply render twice.
pub struct RemoteStore<C> {
    collection: C,
}

impl<C: ReviewCollection> RemoteStore<C> {
    pub fn new(collection: C) -> Self {
        Self { collection }
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    async fn load_or_seed(&self) -> Result<Vec<ReviewRecord>, ReviewError> {
        let fetched = self.collection.fetch_ordered().await?;
        if fetched.is_empty_collection() {
            log!("[STORE] Review collection is empty, writing seed review");
            let seed = seed_review();
            self.collection.append(&seed).await?;
            return Ok(vec![seed]);
        }
        if fetched.documents.is_empty() {
            warn!("[STORE] All {} review documents are malformed, not seeding", fetched.skipped);
        }
        log!("[STORE] Loaded {} reviews from collection", fetched.documents.len());
        Ok(fetched.documents.into_iter().map(|doc| doc.record).collect())
    }
}

impl<C: ReviewCollection> ReviewStore for RemoteStore<C> {
    fn kind(&self) -> StoreKind {
        StoreKind::Remote
    }

    fn load(&self) -> LocalBoxFuture<'_, Result<Vec<ReviewRecord>, ReviewError>> {
        self.load_or_seed().boxed_local()
    }

    fn write<'a>(
        &'a self,
        record: &'a ReviewRecord,
        _submitted: &'a [ReviewRecord],
    ) -> LocalBoxFuture<'a, Result<(), ReviewError>> {
        self.collection.append(record)
    }
}
