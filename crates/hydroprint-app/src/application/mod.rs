pub mod clock;
pub mod dtos;
pub mod event_handlers;
pub mod queries;
pub mod services;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use utils::ResultExt;
