mod repository;
mod state;
mod tracker;

#[cfg(test)]
mod tracker_test;

pub use repository::StreakRepository;
pub use state::{StreakPhase, StreakState};
pub use tracker::{StreakOutcome, StreakTracker, StreakTransition};
