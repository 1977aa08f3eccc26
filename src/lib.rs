pub mod config;
pub mod database;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use config::AppConfig;
pub use database::Database;
pub use services::KanbanService;
