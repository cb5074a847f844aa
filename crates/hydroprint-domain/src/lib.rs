// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod events;
pub mod footprint;
pub mod leaderboard;
pub mod shared;
pub mod streak;
pub mod submission;
pub mod usage_log;
pub mod user;

// Re-exports for convenience
pub use events::DomainEvent;
pub use shared::{DomainError, UserId};
