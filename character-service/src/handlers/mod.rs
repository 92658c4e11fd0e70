pub mod characters;
pub mod health;

pub use characters::{create_character, delete_character, get_character, list_characters};
pub use health::{health_check, metrics_endpoint, readiness_check};
