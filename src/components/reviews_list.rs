use crate::components::reviews_section::ReviewContext;
use crate::maintenance::clear_and_reload;
use crate::store::StoreKind;
use crate::view::{render, MarqueeCard, ReviewCard};
use leptos::*;

/// Average rating and review count. On the local page a double-click on the
/// count wipes the stored submissions and reloads.
#[component]
pub fn ReviewStatsLine() -> impl IntoView {
    let ctx = expect_context::<ReviewContext>();
    let aggregate = ctx.aggregate;
    let local_store = ctx.local_store;
    let kind = ctx.kind;
    let rendered = create_memo(move |_| render(&aggregate.get()));

    let on_count_dblclick = move |_| {
        if kind != StoreKind::Local {
            return;
        }
        local_store.with_value(|store| {
            if let Some(store) = store {
                clear_and_reload(&**store);
            }
        });
    };

    view! {
        <div class="review-stats">
            <span class="avg-rating" id="avg-rating">{ move || rendered.with(|r| r.mean_text()) }</span>
            <span class="review-stars">{ "★" }</span>
            <span class="total-reviews" id="total-reviews" on:dblclick=on_count_dblclick>
                { move || rendered.with(|r| r.count_text()) }
            </span>
        </div>
    }
}

/// Auto-scrolling track of review cards.
#[component]
pub fn ReviewMarquee() -> impl IntoView {
    let aggregate = expect_context::<ReviewContext>().aggregate;
    let rendered = create_memo(move |_| render(&aggregate.get()));

    view! {
        <div class="marquee">
            <div class="marquee-track" id="marquee-track">
                { move || rendered.get().cards.into_iter().map(card_view).collect::<Vec<_>>() }
            </div>
        </div>
    }
}

fn card_view(card: MarqueeCard) -> View {
    match card {
        MarqueeCard::Placeholder(message) => view! {
            <div class="review-card">
                <p class="review-comment">{ message }</p>
            </div>
        }
        .into_view(),
        MarqueeCard::Review(card) => review_card_view(card).into_view(),
    }
}

fn review_card_view(card: ReviewCard) -> impl IntoView {
    let ReviewCard {
        key: _,
        stars,
        comment,
        avatar,
        fallback_avatar,
        name,
        link,
        handle,
    } = card;
    let alt = name.clone();

    view! {
        <div class="review-card">
            <div class="review-stars">{ stars }</div>
            <p class="review-comment">{ comment }</p>
            <div class="review-author">
                // Unknown handles make the avatar service fail; show a neutral square instead.
                <img
                    src=avatar
                    alt=alt
                    class="client-pfp"
                    on:error=move |ev| {
                        let img = event_target::<web_sys::HtmlImageElement>(&ev);
                        if img.src() != fallback_avatar {
                            img.set_src(fallback_avatar);
                        }
                    }
                />
                <div class="author-info">
                    <span class="author-name">{ name }</span>
                    <a href=link target="_blank" rel="noopener noreferrer" class="client-handle">{ handle }</a>
                </div>
            </div>
        </div>
    }
}
