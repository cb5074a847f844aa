mod config_service;
mod dashboard_service;
mod dashboard_session;


pub use config_service::{AppConfig, ConfigService, LogLevel, CONFIG_DIR_ENV};
pub use dashboard_service::{DashboardRepositories, DashboardService};
pub use dashboard_session::DashboardSession;
