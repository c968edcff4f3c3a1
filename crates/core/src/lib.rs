//! Core business logic for tvk-site.

pub mod services;

pub use services::*;
