pub mod app;
pub mod calendar;
pub mod config;
pub mod controller;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod state;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use controller::{LoadOutcome, MoodController, SubmitOutcome};
pub use state::AppState;
pub use store::{MoodStore, WebhookStore};
