pub mod aggregate;
pub mod review;

pub use aggregate::{ReviewAggregate, ReviewStats};
pub use review::{seed_review, Rating, ReviewDocument, ReviewRecord};
