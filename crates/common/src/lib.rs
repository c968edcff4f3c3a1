//! Common utilities and shared types for tvk-site.
//!
//! This crate provides foundational components used across all tvk-site crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Passwords**: Salted argon2 hashing via [`hash_password`]
//! - **ID Generation**: UUID-based identifiers via [`IdGenerator`]
//! - **Data URLs**: Inline image ingestion with a MIME allow-list
//!
//! # Example
//!
//! ```no_run
//! use tvk_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {} for {}", id, config.server.url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crypto;
pub mod data_url;
pub mod error;
pub mod id;

pub use config::Config;
pub use crypto::{hash_password, verify_password};
pub use data_url::{DataUrl, ImagePolicy};
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
