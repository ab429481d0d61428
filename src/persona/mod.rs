//! Persona model: the ten-field record describing an AI conversational
//! persona and the store that holds it for a session.

pub mod catalog;
pub mod store;
pub mod types;

pub use catalog::FieldCatalog;
pub use store::PersonaStore;
pub use types::{FieldEdit, PersonaField, PersonaRecord};
