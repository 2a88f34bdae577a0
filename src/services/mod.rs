//! Business logic: page resolution, URL templating, provider selection,
//! title page fetching

pub mod fetcher;
pub mod providers;
pub mod resolver;
pub mod template;
