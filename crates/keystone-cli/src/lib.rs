//! # Keystone CLI
//!
//! Terminal rendering and editing of permission trees.
//!
//! This library crate provides the pieces used by the `keystone-cli` binary:
//!
//! - [`render`]: draws a tree as indented tri-state checkboxes
//! - [`editor`]: parses and applies editing commands typed at the prompt
//!
//! ## Usage
//!
//! ```ignore
//! use keystone_cli::render::render_tree;
//!
//! let tree = build_tree(catalog, ["department.read"]);
//! println!("{}", render_tree(&tree));
//! ```

pub mod editor;
pub mod render;
