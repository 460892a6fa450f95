/// Review section of a page: owns the per-page session and wires the stats line,
/// marquee and form to it through context.
use crate::components::{
    review_form::ReviewForm,
    reviews_list::{ReviewMarquee, ReviewStatsLine},
};
use crate::config::ReviewSettings;
use crate::maintenance::apply_reset_param;
use crate::models::aggregate::ReviewAggregate;
use crate::session::ReviewSession;
use crate::store::{BrowserStorage, HttpCollection, LocalStore, RemoteStore, StoreKind};
use leptos::logging::{log, warn};
use leptos::*;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

/// Shared by the review components of one section.
#[derive(Clone)]
pub struct ReviewContext {
    pub kind: StoreKind,
    pub settings: ReviewSettings,
    /// Mirror of the session's aggregate that the views subscribe to.
    pub aggregate: RwSignal<ReviewAggregate>,
    /// Opened in the browser once the section mounts; `None` on the server.
    pub session: StoredValue<Option<Rc<ReviewSession>>>,
    pub local_store: StoredValue<Option<Rc<LocalStore<BrowserStorage>>>>,
}

type OpenedSession = (Rc<ReviewSession>, Option<Rc<LocalStore<BrowserStorage>>>);

fn open_session(kind: StoreKind, settings: &ReviewSettings) -> Option<OpenedSession> {
    match kind {
        StoreKind::Remote => {
            let store = Rc::new(RemoteStore::new(HttpCollection::new(settings.api_path.clone())));
            Some((Rc::new(ReviewSession::new(store)), None))
        }
        StoreKind::Local => {
            let store = Rc::new(LocalStore::new(BrowserStorage::open()?, settings.storage_key.clone()));
            apply_reset_param(&*store, &settings.reset_param);
            Some((Rc::new(ReviewSession::new(store.clone())), Some(store)))
        }
    }
}

#[component]
pub fn ReviewsSection(
    kind: StoreKind,
    #[prop(optional)] settings: Option<ReviewSettings>,
) -> impl IntoView {
    let settings = settings.unwrap_or_default();
    let aggregate = create_rw_signal(ReviewAggregate::Loading);
    let session = store_value(None::<Rc<ReviewSession>>);
    let local_store = store_value(None::<Rc<LocalStore<BrowserStorage>>>);

    provide_context(ReviewContext {
        kind,
        settings: settings.clone(),
        aggregate,
        session,
        local_store,
    });

    // Effects only run in the browser, where storage and fetch exist.
    create_effect(move |_| {
        let Some((opened, local)) = open_session(kind, &settings) else {
            warn!("[REVIEWS] Browser storage unavailable, review section disabled");
            return;
        };
        log!("[REVIEWS] Opened {:?} review session", kind);
        session.set_value(Some(opened.clone()));
        local_store.set_value(local);

        spawn_local(async move {
            let loaded = opened.seed_and_load().await;
            aggregate.set(loaded);
        });
    });

    view! {
        <section class="reviews" id="reviews">
            <h2>{ "Client Reviews" }</h2>
            <ReviewStatsLine />
            <ReviewMarquee />
            <ReviewForm />
        </section>
    }
}
