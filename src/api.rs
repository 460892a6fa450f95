#[cfg(feature = "ssr")]
use actix_web::{web, HttpResponse};
#[cfg(feature = "ssr")]
use crate::config::REVIEWS_API_PATH;
#[cfg(feature = "ssr")]
use crate::db::Database;
#[cfg(feature = "ssr")]
use crate::models::review::ReviewRecord;
#[cfg(feature = "ssr")]
use leptos::logging::log;

/// Registers the review collection endpoints.
#[cfg(feature = "ssr")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(REVIEWS_API_PATH, web::get().to(get_reviews))
        .route(REVIEWS_API_PATH, web::post().to(create_review));
}

// GET /api/reviews: every review, oldest first
#[cfg(feature = "ssr")]
pub async fn get_reviews(db: web::Data<Database>) -> HttpResponse {
    match db.get_reviews().await {
        Ok(reviews) => {
            log!("[API] Returning {} reviews", reviews.len());
            HttpResponse::Ok().json(reviews)
        }
        Err(err) => {
            leptos::logging::error!("[API] Failed to fetch reviews: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch reviews")
        }
    }
}

// POST /api/reviews: append one review. Bodies with a rating outside 1-5 fail
// to deserialize and are answered with 400 by the Json extractor.
#[cfg(feature = "ssr")]
pub async fn create_review(
    db: web::Data<Database>,
    review: web::Json<ReviewRecord>,
) -> HttpResponse {
    let review = review.into_inner();
    log!("[API] Received review from {} ({} stars)", review.handle, review.rating);

    match db.insert_review(&review).await {
        Ok(document) => {
            log!("[API] Saved review {}", document.id);
            HttpResponse::Created().json(document)
        }
        Err(err) => {
            leptos::logging::error!("[API] Database error: {:?}", err);
            HttpResponse::InternalServerError().body(format!("Database error: {}", err))
        }
    }
}
