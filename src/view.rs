//! Pure rendering description of the review marquee and its statistics.
use crate::models::aggregate::{ReviewAggregate, ReviewStats};
use crate::models::review::ReviewRecord;

pub const LOADING_MESSAGE: &str = "Loading reviews...";

/// Neutral grey square swapped in when an avatar fails to load.
pub const FALLBACK_AVATAR: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='48' height='48'><rect width='100%' height='100%' fill='%23eee'/></svg>";

const STAR: char = '\u{2605}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCard {
    /// Unique within one render: `"{copy}-{index}"`.
    pub key: String,
    pub stars: String,
    pub comment: String,
    pub avatar: String,
    pub fallback_avatar: &'static str,
    pub name: String,
    pub link: String,
    pub handle: String,
}

impl ReviewCard {
    fn from_record(copy: usize, index: usize, record: &ReviewRecord) -> Self {
        Self {
            key: format!("{copy}-{index}"),
            stars: STAR.to_string().repeat(usize::from(record.rating.get())),
            comment: format!("\"{}\"", record.comment),
            avatar: record.avatar.clone(),
            fallback_avatar: FALLBACK_AVATAR,
            name: record.name.clone(),
            link: record.link.clone(),
            handle: record.handle.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarqueeCard {
    Placeholder(&'static str),
    Review(ReviewCard),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderDescription {
    pub cards: Vec<MarqueeCard>,
    /// `None` while loading.
    pub stats: Option<ReviewStats>,
}

impl RenderDescription {
    pub fn mean_text(&self) -> String {
        self.stats.map(|s| s.mean_label()).unwrap_or_else(|| "--".to_string())
    }

    pub fn count_text(&self) -> String {
        self.stats
            .map(|s| s.count_label())
            .unwrap_or_else(|| "(Loading...)".to_string())
    }
}

/// Describes the marquee for `aggregate`. The card list is emitted twice back to
/// back so the track can scroll in a loop without a seam; the copy is purely
/// visual and does not touch the statistics.
pub fn render(aggregate: &ReviewAggregate) -> RenderDescription {
    if aggregate.is_loading() {
        return RenderDescription {
            cards: vec![MarqueeCard::Placeholder(LOADING_MESSAGE)],
            stats: None,
        };
    }

    let records = aggregate.records();
    let cards = (0..2)
        .flat_map(|copy| {
            records
                .iter()
                .enumerate()
                .map(move |(index, record)| MarqueeCard::Review(ReviewCard::from_record(copy, index, record)))
        })
        .collect();

    RenderDescription {
        cards,
        stats: aggregate.stats(),
    }
}
