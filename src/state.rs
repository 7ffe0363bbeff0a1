use crate::config::Config;
use crate::controller::MoodController;
use crate::store::{MoodStore, WebhookStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: MoodController,
}

impl AppState {
    pub fn new(store: Arc<dyn MoodStore>) -> Self {
        Self {
            controller: MoodController::new(store),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(WebhookStore::new(
            config.moods_url.clone(),
            config.submit_url.clone(),
        )))
    }
}
