mod profile;
mod repository;

pub use profile::UserProfile;
pub use repository::UserProfileRepository;
