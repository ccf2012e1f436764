pub mod favorites; // Favorites, FavoritesState

// Re-export the types so everyone can `use crate::state::{...}`.
pub use favorites::{Favorites, FavoritesState};
