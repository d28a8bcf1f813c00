//! Sous core library - conversation messages and cook domain types.
//!
//! This crate provides:
//! - Multi-part chat messages (text and inline-image content)
//! - User profile and recipe context types shared across conversation modes

pub mod message;
pub mod profile;
pub mod recipe;

pub use message::{ChatMessage, ContentPart, Role};
pub use profile::{DishRecord, Profile};
pub use recipe::RecipeContext;

/// Prelude for common imports
pub mod prelude {
    pub use crate::message::{ChatMessage, ContentPart, Role};
    pub use crate::profile::{DishRecord, Profile};
    pub use crate::recipe::RecipeContext;
}
