//! Per-page review state: one store, one aggregate.
use crate::error::ReviewError;
use crate::models::aggregate::ReviewAggregate;
use crate::models::review::{seed_review, ReviewRecord};
use crate::store::{ReviewStore, StoreKind};
use leptos::logging::{error, log};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Context object for one page session. Created when the review section mounts
/// and dropped on navigation; never a process-wide static.
///
/// Borrows of the aggregate are never held across an await point, so the single
/// page thread sees mutations strictly in order.
pub struct ReviewSession {
    store: Rc<dyn ReviewStore>,
    aggregate: RefCell<ReviewAggregate>,
    writing: Cell<bool>,
}

impl ReviewSession {
    pub fn new(store: Rc<dyn ReviewStore>) -> Self {
        Self {
            store,
            aggregate: RefCell::new(ReviewAggregate::Loading),
            writing: Cell::new(false),
        }
    }

    pub fn kind(&self) -> StoreKind {
        self.store.kind()
    }

    pub fn snapshot(&self) -> ReviewAggregate {
        self.aggregate.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.aggregate.borrow().is_loading()
    }

    /// True while a write to the shared collection is pending.
    pub fn is_writing(&self) -> bool {
        self.writing.get()
    }

    /// Populates the aggregate from the store. Load failures fall back to the
    /// seed review and are only logged.
    pub async fn seed_and_load(&self) -> ReviewAggregate {
        let loaded = self.store.load().await;
        let aggregate = match (self.store.kind(), loaded) {
            (StoreKind::Remote, Ok(records)) => ReviewAggregate::from_records(records),
            (StoreKind::Local, Ok(submitted)) => ReviewAggregate::with_seed(seed_review(), submitted),
            (_, Err(e)) => {
                error!("[REVIEWS] Error loading reviews, showing default review: {}", e);
                ReviewAggregate::from_records(vec![seed_review()])
            }
        };
        log!("[REVIEWS] Aggregate ready with {} reviews", aggregate.count());
        *self.aggregate.borrow_mut() = aggregate.clone();
        aggregate
    }

    /// Persists `record` and appends it once the store has accepted it. A
    /// failed write leaves the aggregate untouched.
    ///
    /// Refused until `seed_and_load` has populated the aggregate, so a late load
    /// can never overwrite a confirmed submission and the local store never
    /// writes a submitted set it has not read yet.
    pub async fn submit(&self, record: ReviewRecord) -> Result<(), ReviewError> {
        if self.is_loading() {
            return Err(ReviewError::NotLoaded);
        }
        let guarded = self.store.kind() == StoreKind::Remote;
        if guarded && self.writing.get() {
            return Err(ReviewError::SubmissionInFlight);
        }

        let submitted = self.aggregate.borrow().submitted_with(&record);
        self.writing.set(true);
        let written = self.store.write(&record, &submitted).await;
        self.writing.set(false);
        written?;

        self.aggregate.borrow_mut().append(record);
        Ok(())
    }
}
