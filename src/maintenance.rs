//! Out-of-band controls for the local page variant: wiping the persisted
//! submissions through a query parameter or a double-click on the review count.
use crate::store::{KeyValueStorage, LocalStore};
use leptos::logging::{error, log};
use url::Url;

const AFFIRMATIVE: [&str; 3] = ["1", "true", "yes"];

/// If `href` carries `param` with an affirmative value, returns the same URL with
/// that parameter removed. Other parameters and the fragment are kept.
pub fn take_reset_request(href: &str, param: &str) -> Option<String> {
    let mut url = Url::parse(href).ok()?;
    let requested = url
        .query_pairs()
        .any(|(key, value)| key == param && AFFIRMATIVE.iter().any(|yes| value.eq_ignore_ascii_case(yes)));
    if !requested {
        return None;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != param)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    Some(url.to_string())
}

/// Honors the reset parameter on the current page, then strips it from the
/// address bar without reloading. Returns true when submissions were cleared.
pub fn apply_reset_param<S: KeyValueStorage>(store: &LocalStore<S>, param: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Ok(href) = window.location().href() else {
        return false;
    };
    let Some(sanitized) = take_reset_request(&href, param) else {
        return false;
    };

    if let Err(e) = store.clear() {
        error!("[MAINTENANCE] Could not clear local reviews: {}", e);
        return false;
    }
    log!("[MAINTENANCE] Local reviews cleared via ?{}", param);

    match window.history() {
        Ok(history) => {
            if let Err(e) = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&sanitized)) {
                error!("[MAINTENANCE] Could not rewrite URL: {:?}", e);
            }
        }
        Err(e) => error!("[MAINTENANCE] History unavailable: {:?}", e),
    }
    true
}

/// Clears persisted submissions and reloads the page.
pub fn clear_and_reload<S: KeyValueStorage>(store: &LocalStore<S>) {
    clear_then(store, || {
        log!("[MAINTENANCE] Local reviews cleared, reloading");
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                error!("[MAINTENANCE] Reload failed: {:?}", e);
            }
        }
    });
}

/// Clears persisted submissions and runs `after` only if that succeeded.
pub fn clear_then<S: KeyValueStorage>(store: &LocalStore<S>, after: impl FnOnce()) -> bool {
    if let Err(e) = store.clear() {
        error!("[MAINTENANCE] Could not clear local reviews: {}", e);
        return false;
    }
    after();
    true
}
