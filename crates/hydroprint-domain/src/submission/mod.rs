mod period;
mod repository;
mod window;

pub use period::{is_new_period, PeriodType, WEEKLY_PERIOD_DAYS};
pub use repository::SubmissionWindowRepository;
pub use window::{SubmissionWindow, WindowStatus};
