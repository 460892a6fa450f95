/// Main application entry point for the studio site.
/// Each page picks its review persistence when it builds the review section.
use crate::components::reviews_section::ReviewsSection;
use crate::store::StoreKind;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/studio-reviews.css" />
        <Title text="Studio" />
        <Router>
            <main>
                <Routes>
                    <Route path="" view=HomePage />
                    <Route path="/sketchbook" view=SketchbookPage />
                </Routes>
            </main>
        </Router>
    }
}

/// Landing page; reviews are shared by every visitor through the server.
#[component]
fn HomePage() -> impl IntoView {
    view! {
        <div>
            <h1>{ "Studio" }</h1>
            <ReviewsSection kind=StoreKind::Remote />
        </div>
    }
}

/// Sketchbook page; reviews stay in this browser.
#[component]
fn SketchbookPage() -> impl IntoView {
    view! {
        <div>
            <h1>{ "Sketchbook" }</h1>
            <ReviewsSection kind=StoreKind::Local />
        </div>
    }
}
