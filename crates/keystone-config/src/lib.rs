//! # Keystone Config
//!
//! Configuration types for the Keystone API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`server`]: Listen address
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`catalog`]: Source of the permission catalog
//! - [`role_forms`]: Role form session lifetime
//!
//! # Example
//!
//! ```ignore
//! use keystone_config::{CatalogConfig, CorsConfig, RoleFormConfig, ServerConfig};
//!
//! // Load all configs from environment
//! let server_config = ServerConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let catalog = CatalogConfig::from_env().load()?;
//! let role_form_config = RoleFormConfig::from_env();
//! ```

pub mod catalog;
pub mod cors;
pub mod role_forms;
pub mod server;

// Re-export commonly used types at crate root
pub use catalog::CatalogConfig;
pub use cors::CorsConfig;
pub use role_forms::RoleFormConfig;
pub use server::ServerConfig;
