//! Review form submission: validation, record construction and the submit
//! button's state machine.
use crate::config::AVATAR_URL_BASE;
use crate::error::ReviewError;
use crate::models::review::{Rating, ReviewRecord};
use crate::session::ReviewSession;
use crate::store::StoreKind;
use leptos::logging::{error, log};

/// Raw form input. `rating` is 0 until a star has been picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub name: String,
    pub social_link: String,
    pub comment: String,
    pub rating: u8,
}

impl ReviewDraft {
    /// Builds the record to persist. Only the rating is validated; empty names,
    /// links and comments are accepted as typed.
    pub fn into_record(self) -> Result<ReviewRecord, ReviewError> {
        let rating = Rating::new(self.rating)?;
        let link = self.social_link.trim().to_string();
        let handle = derive_handle(&link, &self.name);
        let avatar = derive_avatar(&handle);
        Ok(ReviewRecord {
            name: self.name,
            handle,
            link,
            rating,
            comment: self.comment,
            avatar,
        })
    }
}

/// `@` + the last path segment of the social link, or `@` + the display name
/// without whitespace, lower-cased, when the link yields no segment.
pub fn derive_handle(social_link: &str, name: &str) -> String {
    let segment = social_link.rsplit('/').next().unwrap_or("");
    if segment.is_empty() {
        let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        format!("@{}", compact.to_lowercase())
    } else {
        format!("@{segment}")
    }
}

/// Avatar lookup URL for a handle. Whether the avatar exists is only discovered
/// when the image loads.
pub fn derive_avatar(handle: &str) -> String {
    let bare = handle.strip_prefix('@').unwrap_or(handle);
    format!("{AVATAR_URL_BASE}{}", urlencoding::encode(bare))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Invalid,
    Writing,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SubmissionPhase::Invalid | SubmissionPhase::Succeeded | SubmissionPhase::Failed
        )
    }
}

/// What the submit button shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affordance {
    pub label: &'static str,
    pub background: &'static str,
    pub opacity: &'static str,
    pub disabled: bool,
}

pub const SUBMIT_LABEL: &str = "Submit Review";

/// Submit button state across attempts.
///
/// Each attempt gets a number; a delayed reset only applies to the attempt that
/// scheduled it, so a reset left over from an earlier attempt is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmissionController {
    phase: SubmissionPhase,
    attempt: u64,
}

impl SubmissionController {
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Starts a new attempt and returns its number.
    pub fn begin(&mut self) -> u64 {
        self.attempt += 1;
        self.phase = SubmissionPhase::Validating;
        self.attempt
    }

    pub fn enter(&mut self, phase: SubmissionPhase) {
        self.phase = phase;
    }

    /// True between `begin` and the attempt's terminal phase.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Validating | SubmissionPhase::Writing)
    }

    /// Drops an attempt that was refused before any write, returning to `Idle`.
    pub fn abandon(&mut self, attempt: u64) -> bool {
        if attempt != self.attempt {
            return false;
        }
        self.phase = SubmissionPhase::Idle;
        true
    }

    /// Returns to `Idle` if `attempt` is still current and has finished.
    pub fn reset(&mut self, attempt: u64) -> bool {
        if attempt != self.attempt || !self.phase.is_terminal() {
            return false;
        }
        self.phase = SubmissionPhase::Idle;
        true
    }

    /// The remote variant keeps the button disabled from the write until the reset.
    pub fn affordance(&self, kind: StoreKind) -> Affordance {
        let guarded = kind == StoreKind::Remote;
        match self.phase {
            SubmissionPhase::Idle | SubmissionPhase::Validating | SubmissionPhase::Invalid => Affordance {
                label: SUBMIT_LABEL,
                background: "",
                opacity: "1",
                disabled: false,
            },
            SubmissionPhase::Writing => Affordance {
                label: "Submitting...",
                background: "",
                opacity: "0.7",
                disabled: guarded,
            },
            SubmissionPhase::Succeeded => Affordance {
                label: "Review Submitted! ✓",
                background: "#DCAE96",
                opacity: "1",
                disabled: guarded,
            },
            SubmissionPhase::Failed => Affordance {
                label: "Error, try again",
                background: "#e74c3c",
                opacity: "1",
                disabled: guarded,
            },
        }
    }
}

/// Runs one submission attempt against `session`, reporting every phase change
/// through `on_phase`. An invalid rating never reaches the store.
pub async fn run_submission(
    session: &ReviewSession,
    draft: ReviewDraft,
    mut on_phase: impl FnMut(SubmissionPhase),
) -> Result<ReviewRecord, ReviewError> {
    if session.is_loading() {
        return Err(ReviewError::NotLoaded);
    }
    if session.kind() == StoreKind::Remote && session.is_writing() {
        return Err(ReviewError::SubmissionInFlight);
    }

    on_phase(SubmissionPhase::Validating);
    let record = match draft.into_record() {
        Ok(record) => record,
        Err(e) => {
            on_phase(SubmissionPhase::Invalid);
            return Err(e);
        }
    };

    on_phase(SubmissionPhase::Writing);
    match session.submit(record.clone()).await {
        Ok(()) => {
            log!("[REVIEWS] Saved review from {}", record.handle);
            on_phase(SubmissionPhase::Succeeded);
            Ok(record)
        }
        Err(e) => {
            error!("[REVIEWS] Error saving review: {}", e);
            on_phase(SubmissionPhase::Failed);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::seed_review;
    use crate::store::local::tests::MemoryStorage;
    use crate::store::remote::tests::MemoryCollection;
    use crate::store::{LocalStore, RemoteStore};
    use std::rc::Rc;

    fn draft(name: &str, link: &str, rating: u8) -> ReviewDraft {
        ReviewDraft {
            name: name.into(),
            social_link: link.into(),
            comment: "ok".into(),
            rating,
        }
    }

    #[test]
    fn handle_from_social_link() {
        assert_eq!(derive_handle("https://x.com/jane_doe", "Whoever"), "@jane_doe");
        assert_eq!(derive_handle("jane", "Whoever"), "@jane");
    }

    #[test]
    fn handle_from_name_without_link() {
        assert_eq!(derive_handle("", "Jane Doe"), "@janedoe");
        assert_eq!(derive_handle("https://x.com/", "  Mixed  Case Name"), "@mixedcasename");
    }

    #[test]
    fn avatar_uses_bare_handle() {
        assert_eq!(derive_avatar("@jane_doe"), "https://unavatar.io/x/jane_doe");
        assert_eq!(derive_avatar("@a b"), "https://unavatar.io/x/a%20b");
    }

    #[test]
    fn draft_without_rating_is_rejected() {
        let err = draft("A", "", 0).into_record().unwrap_err();
        assert_eq!(err, ReviewError::InvalidRating(0));
    }

    #[test]
    fn draft_keeps_empty_fields() {
        let record = ReviewDraft {
            name: "Jane Doe".into(),
            social_link: String::new(),
            comment: String::new(),
            rating: 2,
        }
        .into_record()
        .unwrap();
        assert_eq!(record.handle, "@janedoe");
        assert_eq!(record.link, "");
        assert_eq!(record.comment, "");
        assert_eq!(record.avatar, "https://unavatar.io/x/janedoe");
    }

    #[test]
    fn stale_reset_is_ignored() {
        let mut controller = SubmissionController::default();
        let first = controller.begin();
        controller.enter(SubmissionPhase::Failed);

        let second = controller.begin();
        controller.enter(SubmissionPhase::Writing);

        assert!(!controller.reset(first));
        assert_eq!(controller.phase(), SubmissionPhase::Writing);

        controller.enter(SubmissionPhase::Succeeded);
        assert!(controller.reset(second));
        assert_eq!(controller.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn remote_affordance_stays_disabled_until_reset() {
        let mut controller = SubmissionController::default();
        let attempt = controller.begin();
        controller.enter(SubmissionPhase::Writing);
        assert!(controller.affordance(StoreKind::Remote).disabled);
        assert!(!controller.affordance(StoreKind::Local).disabled);
        assert_eq!(controller.affordance(StoreKind::Local).label, "Submitting...");

        controller.enter(SubmissionPhase::Failed);
        let shown = controller.affordance(StoreKind::Remote);
        assert_eq!(shown.label, "Error, try again");
        assert!(shown.disabled);

        controller.reset(attempt);
        assert_eq!(controller.affordance(StoreKind::Remote).label, SUBMIT_LABEL);
        assert!(!controller.affordance(StoreKind::Remote).disabled);
    }

    #[tokio::test]
    async fn zero_rating_never_writes() {
        let store = Rc::new(RemoteStore::new(MemoryCollection::with_records(vec![seed_review()])));
        let session = ReviewSession::new(store.clone());
        session.seed_and_load().await;
        let before = session.snapshot();

        let mut phases = Vec::new();
        let err = run_submission(&session, draft("A", "", 0), |p| phases.push(p))
            .await
            .unwrap_err();

        assert_eq!(err, ReviewError::InvalidRating(0));
        assert_eq!(phases, vec![SubmissionPhase::Validating, SubmissionPhase::Invalid]);
        assert_eq!(store.collection().appends.get(), 0);
        assert_eq!(session.snapshot(), before);
    }

    #[tokio::test]
    async fn successful_remote_submission_appends() {
        let store = Rc::new(RemoteStore::new(MemoryCollection::with_records(vec![seed_review()])));
        let session = ReviewSession::new(store.clone());
        session.seed_and_load().await;

        let mut phases = Vec::new();
        let record = run_submission(&session, draft("A", "https://x.com/a_user", 4), |p| phases.push(p))
            .await
            .unwrap();

        assert_eq!(record.handle, "@a_user");
        assert_eq!(
            phases,
            vec![
                SubmissionPhase::Validating,
                SubmissionPhase::Writing,
                SubmissionPhase::Succeeded
            ]
        );
        assert_eq!(store.collection().appends.get(), 1);
        let stats = session.snapshot().stats().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean_rating, 4.5);
    }

    #[tokio::test]
    async fn failed_remote_submission_reports_failed() {
        let store = Rc::new(RemoteStore::new(MemoryCollection::with_records(vec![seed_review()])));
        let session = ReviewSession::new(store.clone());
        session.seed_and_load().await;
        store.collection().fail_append.set(true);

        let mut phases = Vec::new();
        let result = run_submission(&session, draft("A", "", 3), |p| phases.push(p)).await;

        assert!(matches!(result, Err(ReviewError::StoreUnavailable(_))));
        assert_eq!(phases.last(), Some(&SubmissionPhase::Failed));
        assert_eq!(session.snapshot().count(), 1);
    }

    #[tokio::test]
    async fn submission_before_load_reports_no_phase() {
        let store = Rc::new(RemoteStore::new(MemoryCollection::default()));
        let session = ReviewSession::new(store.clone());
        let mut phases = Vec::new();

        let result = run_submission(&session, draft("A", "", 4), |p| phases.push(p)).await;

        assert_eq!(result, Err(ReviewError::NotLoaded));
        assert!(phases.is_empty());
        assert_eq!(store.collection().appends.get(), 0);
        assert!(session.snapshot().is_loading());
    }

    #[test]
    fn refused_attempt_is_abandoned_to_idle() {
        let mut controller = SubmissionController::default();
        let attempt = controller.begin();
        assert!(controller.is_busy());
        assert!(!controller.reset(attempt));

        assert!(controller.abandon(attempt));
        assert_eq!(controller.phase(), SubmissionPhase::Idle);
        assert!(!controller.is_busy());
        assert!(!controller.affordance(StoreKind::Remote).disabled);
    }

    #[test]
    fn abandoning_an_old_attempt_keeps_the_current_one() {
        let mut controller = SubmissionController::default();
        let old = controller.begin();
        let current = controller.begin();
        controller.enter(SubmissionPhase::Writing);

        assert!(!controller.abandon(old));
        assert_eq!(controller.attempt(), current);
        assert_eq!(controller.phase(), SubmissionPhase::Writing);
    }

    #[tokio::test]
    async fn local_submission_counts_seed_too() {
        let store = Rc::new(LocalStore::new(MemoryStorage::default(), "k"));
        let session = ReviewSession::new(store.clone());
        session.seed_and_load().await;

        run_submission(&session, draft("A", "", 4), |_| {}).await.unwrap();

        let stats = session.snapshot().stats().unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean_rating, 4.5);
        assert_eq!(store.load_submitted().len(), 1);
    }
}
