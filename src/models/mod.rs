//! Shared data types

pub mod context;
pub mod progress;
pub mod provider;

pub use context::{PageContext, TitleKind};
pub use progress::ProgressRecord;
pub use provider::{ProviderDefinition, ProviderSettings};
