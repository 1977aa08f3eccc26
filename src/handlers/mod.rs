pub mod activity;
pub mod health;
pub mod member;
pub mod project;
pub mod task;

use actix_web::web;

use crate::utils::errors::ServiceError;

pub use activity::activity_config;
pub use health::health_config;
pub use member::member_config;
pub use project::project_config;
pub use task::task_config;

/// Registers every route plus extractor error handlers that turn malformed
/// bodies, paths and queries into validation errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ServiceError::Validation(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        ServiceError::Validation(format!("Invalid path parameter: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ServiceError::Validation(format!("Invalid query parameter: {}", err)).into()
    }))
    .configure(health_config)
    .configure(project_config)
    .configure(task_config)
    .configure(member_config)
    .configure(activity_config);
}
