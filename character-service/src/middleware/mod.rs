pub mod character_id;

pub use character_id::CharacterId;
