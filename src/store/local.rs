use super::{ReviewStore, StoreKind};
use crate::error::ReviewError;
use crate::models::review::ReviewRecord;
use futures::future::{ready, FutureExt, LocalBoxFuture};
use leptos::logging::{error, log};

/// A durable string slot store, scoped to one browser profile.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ReviewError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ReviewError>;
    fn remove(&self, key: &str) -> Result<(), ReviewError>;
}

/// `window.localStorage`.
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// Returns `None` when the page has no window or storage is disabled.
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

fn js_error(err: wasm_bindgen::JsValue) -> ReviewError {
    ReviewError::StoreUnavailable(format!("{:?}", err))
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ReviewError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ReviewError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), ReviewError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

/// Review store kept in one key of the browser's local storage.
///
/// Only submitted reviews are persisted, as a JSON array that is replaced whole on
/// every write. Two tabs writing at once race and the last write wins.
pub struct LocalStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> LocalStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the submitted set. Missing, empty or unreadable values give `[]`.
    pub fn load_submitted(&self) -> Vec<ReviewRecord> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return Vec::new(),
            Err(e) => {
                error!("[STORE] Could not read local reviews: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<ReviewRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                let err = ReviewError::from(e);
                error!("[STORE] Ignoring stored reviews: {}", err);
                Vec::new()
            }
        }
    }

    /// Overwrites the persisted value with the complete submitted set.
    pub fn write_submitted(&self, submitted: &[ReviewRecord]) -> Result<(), ReviewError> {
        let raw = serde_json::to_string(submitted)?;
        self.storage.set(&self.key, &raw)
    }

    /// Drops every persisted submission.
    pub fn clear(&self) -> Result<(), ReviewError> {
        log!("[STORE] Clearing local reviews under {}", self.key);
        self.storage.remove(&self.key)
    }
}

impl<S: KeyValueStorage> ReviewStore for LocalStore<S> {
    fn kind(&self) -> StoreKind {
        StoreKind::Local
    }

    fn load(&self) -> LocalBoxFuture<'_, Result<Vec<ReviewRecord>, ReviewError>> {
        ready(Ok(self.load_submitted())).boxed_local()
    }

    fn write<'a>(
        &'a self,
        _record: &'a ReviewRecord,
        submitted: &'a [ReviewRecord],
    ) -> LocalBoxFuture<'a, Result<(), ReviewError>> {
        ready(self.write_submitted(submitted)).boxed_local()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::review::seed_review;
    use crate::store::remote::tests::review;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    #[derive(Default)]
    pub(crate) struct MemoryStorage {
        pub values: RefCell<HashMap<String, String>>,
        pub fail_writes: Cell<bool>,
    }

    impl KeyValueStorage for MemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, ReviewError> {
            Ok(self.values.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), ReviewError> {
            if self.fail_writes.get() {
                return Err(ReviewError::StoreUnavailable("quota exceeded".into()));
            }
            self.values.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), ReviewError> {
            if self.fail_writes.get() {
                return Err(ReviewError::StoreUnavailable("storage locked".into()));
            }
            self.values.borrow_mut().remove(key);
            Ok(())
        }
    }

    const KEY: &str = "reviews-under-test";

    #[tokio::test]
    async fn write_then_load_preserves_order() {
        let store = LocalStore::new(MemoryStorage::default(), KEY);
        let submitted = vec![review("Ana", 4), review("Ben", 1), review("Cleo", 5)];

        store.write(&submitted[2], &submitted).await.unwrap();

        assert_eq!(store.load().await.unwrap(), submitted);
    }

    #[tokio::test]
    async fn persisted_value_never_contains_seed() {
        let store = LocalStore::new(MemoryStorage::default(), KEY);
        let submitted = vec![review("Ana", 4)];
        store.write(&submitted[0], &submitted).await.unwrap();

        let raw = store.storage().values.borrow().get(KEY).cloned().unwrap();
        let persisted: Vec<ReviewRecord> = serde_json::from_str(&raw).unwrap();
        assert!(!persisted.contains(&seed_review()));
        assert_eq!(persisted.len(), 1);
    }

    #[test]
    fn missing_or_blank_value_loads_empty() {
        let store = LocalStore::new(MemoryStorage::default(), KEY);
        assert!(store.load_submitted().is_empty());

        store.storage().set(KEY, "  ").unwrap();
        assert!(store.load_submitted().is_empty());
    }

    #[test]
    fn corrupt_value_loads_empty() {
        let store = LocalStore::new(MemoryStorage::default(), KEY);
        store.storage().set(KEY, "{not json").unwrap();
        assert!(store.load_submitted().is_empty());
    }

    #[test]
    fn write_replaces_the_whole_value() {
        let store = LocalStore::new(MemoryStorage::default(), KEY);
        store.write_submitted(&[review("Ana", 4), review("Ben", 2)]).unwrap();
        store.write_submitted(&[review("Cleo", 3)]).unwrap();

        assert_eq!(store.load_submitted(), vec![review("Cleo", 3)]);
    }

    #[test]
    fn clear_removes_persisted_submissions() {
        let store = LocalStore::new(MemoryStorage::default(), KEY);
        store.write_submitted(&[review("Ana", 4)]).unwrap();

        store.clear().unwrap();

        assert!(store.storage().values.borrow().get(KEY).is_none());
        assert!(store.load_submitted().is_empty());
    }
}
