use crate::models::review::Rating;
use leptos::*;

/// Five clickable stars bound to `rating` (0 while nothing is picked).
/// Hovering previews a value; leaving the row clears the preview.
#[component]
pub fn StarRatingInput(rating: RwSignal<u8>) -> impl IntoView {
    let (hovered, set_hovered) = create_signal(0u8);

    view! {
        <div class="star-rating" id="star-rating-input" on:mouseleave=move |_| set_hovered.set(0)>
            {(Rating::MIN..=Rating::MAX)
                .map(|value| {
                    view! {
                        <span
                            class="star"
                            data-value=value
                            class:hovered=move || value <= hovered.get()
                            class:selected=move || value <= rating.get()
                            on:mouseover=move |_| set_hovered.set(value)
                            on:click=move |_| rating.set(value)
                        >
                            { "★" }
                        </span>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
        <input type="hidden" id="rating-value" name="rating" prop:value=move || rating.get().to_string() />
    }
}
