use crate::models::review::ReviewRecord;

/// Derived statistics over a loaded aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewStats {
    pub count: usize,
    /// Arithmetic mean rounded to one decimal.
    pub mean_rating: f64,
}

impl ReviewStats {
    fn compute(records: &[ReviewRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let total: u32 = records.iter().map(|r| u32::from(r.rating.get())).sum();
        let mean = f64::from(total) / records.len() as f64;
        Some(Self {
            count: records.len(),
            mean_rating: (mean * 10.0).round() / 10.0,
        })
    }

    pub fn mean_label(&self) -> String {
        format!("{:.1}", self.mean_rating)
    }

    pub fn count_label(&self) -> String {
        let plural = if self.count == 1 { "" } else { "s" };
        format!("({} Review{})", self.count, plural)
    }
}

/// Ordered reviews of one page session: seed first, then load order, then
/// submission order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReviewAggregate {
    /// Nothing loaded yet; the view shows a loading placeholder.
    #[default]
    Loading,
    Loaded {
        records: Vec<ReviewRecord>,
        /// Leading records that live only in memory and are never persisted.
        seeded: usize,
    },
}

impl ReviewAggregate {
    /// Aggregate adopted verbatim from a store, nothing held back from persistence.
    pub fn from_records(records: Vec<ReviewRecord>) -> Self {
        ReviewAggregate::Loaded { records, seeded: 0 }
    }

    /// `[seed] ++ submitted`, with the seed kept in memory only.
    pub fn with_seed(seed: ReviewRecord, submitted: Vec<ReviewRecord>) -> Self {
        let mut records = Vec::with_capacity(submitted.len() + 1);
        records.push(seed);
        records.extend(submitted);
        ReviewAggregate::Loaded { records, seeded: 1 }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ReviewAggregate::Loading)
    }

    pub fn records(&self) -> &[ReviewRecord] {
        match self {
            ReviewAggregate::Loading => &[],
            ReviewAggregate::Loaded { records, .. } => records,
        }
    }

    pub fn count(&self) -> usize {
        self.records().len()
    }

    pub fn stats(&self) -> Option<ReviewStats> {
        match self {
            ReviewAggregate::Loading => None,
            ReviewAggregate::Loaded { records, .. } => ReviewStats::compute(records),
        }
    }

    /// Records that came from submissions or the store, without in-memory seeds.
    pub fn submitted(&self) -> &[ReviewRecord] {
        match self {
            ReviewAggregate::Loading => &[],
            ReviewAggregate::Loaded { records, seeded } => &records[(*seeded).min(records.len())..],
        }
    }

    /// The submitted set as it will be once `record` is appended.
    pub fn submitted_with(&self, record: &ReviewRecord) -> Vec<ReviewRecord> {
        let mut submitted = self.submitted().to_vec();
        submitted.push(record.clone());
        submitted
    }

    pub fn append(&mut self, record: ReviewRecord) {
        match self {
            ReviewAggregate::Loading => *self = ReviewAggregate::from_records(vec![record]),
            ReviewAggregate::Loaded { records, .. } => records.push(record),
        }
    }
}
