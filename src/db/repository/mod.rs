//! Data access over the flat key-value settings space

pub mod progress;
pub mod settings;
