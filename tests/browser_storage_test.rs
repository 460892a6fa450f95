#![cfg(target_arch = "wasm32")]

use studio_reviews::config::RESET_QUERY_PARAM;
use studio_reviews::maintenance::{apply_reset_param, clear_then};
use studio_reviews::models::review::{seed_review, Rating, ReviewRecord};
use studio_reviews::session::ReviewSession;
use studio_reviews::store::{BrowserStorage, KeyValueStorage, LocalStore, ReviewStore};
use std::rc::Rc;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const TEST_KEY: &str = "studio-reviews.browser-test";

fn review(name: &str, rating: u8) -> ReviewRecord {
    ReviewRecord {
        name: name.to_string(),
        handle: format!("@{}", name.to_lowercase()),
        link: String::new(),
        rating: Rating::new(rating).unwrap(),
        comment: "lovely".to_string(),
        avatar: format!("https://unavatar.io/x/{}", name.to_lowercase()),
    }
}

fn fresh_store() -> LocalStore<BrowserStorage> {
    let storage = BrowserStorage::open().expect("localStorage should be available");
    storage.remove(TEST_KEY).unwrap();
    LocalStore::new(storage, TEST_KEY)
}

#[wasm_bindgen_test]
async fn test_local_storage_round_trip() {
    let store = fresh_store();
    let submitted = vec![review("Ana", 5), review("Ben", 3)];

    store.write(&submitted[1], &submitted).await.unwrap();

    assert_eq!(store.load().await.unwrap(), submitted);
    store.clear().unwrap();
}

#[wasm_bindgen_test]
async fn test_corrupt_value_is_ignored() {
    let store = fresh_store();
    store.storage().set(TEST_KEY, "not json at all").unwrap();

    assert!(store.load_submitted().is_empty());
    store.clear().unwrap();
}

#[wasm_bindgen_test]
async fn test_session_prepends_seed_in_browser() {
    let store = Rc::new(fresh_store());
    store.write_submitted(&[review("Cleo", 4)]).unwrap();
    let session = ReviewSession::new(store.clone());

    let aggregate = session.seed_and_load().await;

    assert_eq!(aggregate.records(), &[seed_review(), review("Cleo", 4)]);
    let raw = store.storage().get(TEST_KEY).unwrap().unwrap();
    assert!(!raw.contains("castronft36"));
    store.clear().unwrap();
}


fn replace_url(url: &str) {
    let window = web_sys::window().unwrap();
    window
        .history()
        .unwrap()
        .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url))
        .unwrap();
}

fn current_href() -> String {
    web_sys::window().unwrap().location().href().unwrap()
}

#[wasm_bindgen_test]
async fn test_reset_param_clears_storage_and_url() {
    let original = current_href();
    let store = fresh_store();
    store.write_submitted(&[review("Dana", 2)]).unwrap();
    replace_url(&format!("?keep=1&{RESET_QUERY_PARAM}=1"));

    assert!(apply_reset_param(&store, RESET_QUERY_PARAM));

    assert!(store.load_submitted().is_empty());
    assert_eq!(store.storage().get(TEST_KEY).unwrap(), None);
    let href = current_href();
    assert!(!href.contains(RESET_QUERY_PARAM));
    assert!(href.contains("keep=1"));
    replace_url(&original);
}

#[wasm_bindgen_test]
async fn test_reset_param_absent_keeps_storage() {
    let original = current_href();
    let store = fresh_store();
    store.write_submitted(&[review("Eli", 5)]).unwrap();
    replace_url("?keep=1");

    assert!(!apply_reset_param(&store, RESET_QUERY_PARAM));

    assert_eq!(store.load_submitted(), vec![review("Eli", 5)]);
    replace_url(&original);
    store.clear().unwrap();
}

#[wasm_bindgen_test]
async fn test_clear_then_empties_browser_storage() {
    let store = fresh_store();
    store.write_submitted(&[review("Fay", 3)]).unwrap();
    let mut continued = false;

    assert!(clear_then(&store, || continued = true));

    assert!(continued);
    assert_eq!(store.storage().get(TEST_KEY).unwrap(), None);
}
