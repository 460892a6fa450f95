use crate::components::reviews_section::ReviewContext;
use crate::components::star_rating::StarRatingInput;
use crate::controller::{run_submission, ReviewDraft, SubmissionController};
use crate::error::ReviewError;
use crate::store::StoreKind;
use crate::utils::leptos_owner::with_owner_safe;
use gloo_timers::callback::Timeout;
use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn ReviewForm() -> impl IntoView {
    let ctx = expect_context::<ReviewContext>();
    let kind = ctx.kind;
    let aggregate = ctx.aggregate;
    let session = ctx.session;
    let reset_delay_ms = ctx.settings.reset_delay_ms;

    let name = create_rw_signal(String::new());
    let social = create_rw_signal(String::new());
    let comment = create_rw_signal(String::new());
    let rating = create_rw_signal(0u8);
    let controller = create_rw_signal(SubmissionController::default());
    // Dropping a pending Timeout cancels it.
    let reset_timer = store_value(None::<Timeout>);
    let owner = Owner::current();

    let clear_form = move || {
        name.set(String::new());
        social.set(String::new());
        comment.set(String::new());
        rating.set(0);
    };

    let schedule_reset = move |attempt: u64| {
        let timeout = Timeout::new(reset_delay_ms, move || {
            with_owner_safe(owner, "review form reset", || {
                controller.update(|c| {
                    c.reset(attempt);
                });
            });
        });
        reset_timer.set_value(Some(timeout));
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(session) = session.get_value() else {
            warn!("[REVIEWS] Review form submitted before the session opened");
            return;
        };
        if session.is_loading() {
            return;
        }
        let busy = controller.with_untracked(|c| c.is_busy());
        if kind == StoreKind::Remote && (busy || session.is_writing()) {
            return;
        }

        reset_timer.set_value(None);
        controller.update(|c| {
            c.begin();
        });
        let attempt = controller.with_untracked(|c| c.attempt());
        let draft = ReviewDraft {
            name: name.get_untracked(),
            social_link: social.get_untracked(),
            comment: comment.get_untracked(),
            rating: rating.get_untracked(),
        };

        spawn_local(async move {
            let on_phase = move |phase| controller.update(|c| c.enter(phase));
            match run_submission(&session, draft, on_phase).await {
                Ok(_) => {
                    aggregate.set(session.snapshot());
                    clear_form();
                    schedule_reset(attempt);
                }
                Err(ReviewError::InvalidRating(_)) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message("Please provide a star rating!");
                    }
                    controller.update(|c| {
                        c.reset(attempt);
                    });
                }
                Err(ReviewError::SubmissionInFlight | ReviewError::NotLoaded) => {
                    controller.update(|c| {
                        c.abandon(attempt);
                    });
                }
                Err(_) => schedule_reset(attempt),
            }
        });
    };

    let affordance = move || controller.with(|c| c.affordance(kind));

    view! {
        <form class="review-form" id="review-form" on:submit=on_submit>
            <h3>{ "Leave a Review" }</h3>
            <StarRatingInput rating=rating />
            <input
                type="text"
                id="reviewer-name"
                placeholder="Your name"
                required
                prop:value=move || name.get()
                on:input=move |e| name.set(event_target_value(&e))
            />
            <input
                type="url"
                id="reviewer-social"
                placeholder="X / Twitter profile link (optional)"
                prop:value=move || social.get()
                on:input=move |e| social.set(event_target_value(&e))
            />
            <textarea
                id="reviewer-comment"
                placeholder="How was your experience?"
                prop:value=move || comment.get()
                on:input=move |e| comment.set(event_target_value(&e))
            />
            <button
                type="submit"
                class="submit-review-btn"
                prop:disabled=move || affordance().disabled || aggregate.with(|a| a.is_loading())
                style:background=move || affordance().background
                style:opacity=move || affordance().opacity
            >
                { move || affordance().label }
            </button>
        </form>
    }
}
