// src/models/review.rs
use crate::error::ReviewError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Star rating, always within 1..=5. Serialized as a bare integer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ReviewError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewError::InvalidRating(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = ReviewError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub name: String,    // Display name of the reviewer
    pub handle: String,  // Social handle, always starts with '@'
    pub link: String,    // Social profile URL, may be empty
    pub rating: Rating,
    pub comment: String,
    pub avatar: String,  // Avatar image URL derived from the handle
}

/// A review as stored in the shared collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReviewDocument {
    pub id: String,
    /// Server-assigned, milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(flatten)]
    pub record: ReviewRecord,
}

/// The well-known default review shown on every page and used to bootstrap an
/// empty collection.
pub fn seed_review() -> ReviewRecord {
    ReviewRecord {
        name: "Castro".to_string(),
        handle: "@castronft36".to_string(),
        link: "https://x.com/castronft36".to_string(),
        rating: Rating(5),
        comment: "The custom PFP was better than I imagined. Brought my brief to life flawlessly. Highly recommend grabbing a slot.".to_string(),
        avatar: "https://unavatar.io/x/castronft36".to_string(),
    }
}
