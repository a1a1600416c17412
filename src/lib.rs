pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notes;
pub mod progress;
pub mod skills;
pub mod state;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod summary;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{DocumentStore, JsonFileStore};
