mod record;
mod repository;

pub use record::UsageLog;
pub use repository::UsageLogRepository;
