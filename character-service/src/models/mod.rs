pub mod character;

pub use character::{decode_characters, document_key, Character};
