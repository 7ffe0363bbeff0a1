//! The mood view controller.
//!
//! Owns the in-memory [`ViewState`], issues the two store calls and folds
//! their results back into the view. Store failures are logged and never
//! returned to the caller; every path leaves the view consistent.

use crate::calendar::{apply_submission, today_image, Placement};
use crate::models::{MoodRecord, SubmitRequest, ViewState};
use crate::progress::{ProgressSchedule, ProgressTicker};
use crate::store::MoodStore;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(usize),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input, nothing was sent.
    Rejected,
    Applied {
        record: MoodRecord,
        placement: Placement,
    },
    Failed,
}

#[derive(Clone)]
pub struct MoodController {
    store: Arc<dyn MoodStore>,
    view: Arc<Mutex<ViewState>>,
    schedule: ProgressSchedule,
    submit_gate: Arc<Mutex<()>>,
}

impl MoodController {
    pub fn new(store: Arc<dyn MoodStore>) -> Self {
        Self::with_schedule(store, ProgressSchedule::default())
    }

    pub fn with_schedule(store: Arc<dyn MoodStore>, schedule: ProgressSchedule) -> Self {
        Self {
            store,
            view: Arc::new(Mutex::new(ViewState::default())),
            schedule,
            submit_gate: Arc::new(Mutex::new(())),
        }
    }

    pub async fn snapshot(&self) -> ViewState {
        self.view.lock().await.clone()
    }

    pub async fn load_moods(&self) -> LoadOutcome {
        self.load_moods_on(Utc::now().date_naive()).await
    }

    pub async fn load_moods_on(&self, today: NaiveDate) -> LoadOutcome {
        let result = self.store.fetch_moods().await;

        let mut view = self.view.lock().await;
        let outcome = match result {
            Ok(moods) => {
                let count = moods.len();
                view.today_image = today_image(&moods, today);
                view.moods = moods;
                info!(count, has_today_image = view.today_image.is_some(), "moods loaded");
                LoadOutcome::Loaded(count)
            }
            Err(err) => {
                warn!("failed to load moods: {err}");
                view.moods.clear();
                view.today_image = None;
                LoadOutcome::Failed
            }
        };
        view.loading_initial = false;
        outcome
    }

    pub async fn submit(&self, description: &str) -> SubmitOutcome {
        self.submit_at(description, Utc::now()).await
    }

    /// Submits `description` as of `now`. Submissions are serialized: a second
    /// call waits until the first one has settled.
    pub async fn submit_at(&self, description: &str, now: DateTime<Utc>) -> SubmitOutcome {
        let mood = description.trim();
        if mood.is_empty() {
            debug!("ignoring blank mood");
            return SubmitOutcome::Rejected;
        }

        let _gate = self.submit_gate.lock().await;

        {
            let mut view = self.view.lock().await;
            view.submitting = true;
            view.submit_progress = 0;
            view.draft = mood.to_string();
        }
        let ticker = ProgressTicker::start(Arc::clone(&self.view), self.schedule);

        let request = SubmitRequest::new(mood, now);
        let result = self.store.submit_mood(&request).await;
        ticker.stop();

        let outcome = {
            let mut view = self.view.lock().await;
            let outcome = match result {
                Ok(record) => {
                    let placement = apply_submission(&mut view, record.clone(), now.date_naive());
                    view.draft.clear();
                    info!(?placement, row = record.sequence_number, "mood submitted");
                    SubmitOutcome::Applied { record, placement }
                }
                Err(err) => {
                    error!("failed to submit mood: {err}");
                    SubmitOutcome::Failed
                }
            };
            view.submitting = false;
            view.submit_progress = 100;
            outcome
        };

        self.schedule_progress_reset();
        outcome
    }

    fn schedule_progress_reset(&self) {
        let view = Arc::clone(&self.view);
        let delay = self.schedule.reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut view = view.lock().await;
            if !view.submitting && view.submit_progress == 100 {
                view.submit_progress = 0;
            }
        });
    }
}
