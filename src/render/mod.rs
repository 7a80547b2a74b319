//! Markdown rendering of resolved documentation.

pub mod composer;

pub use composer::{compose, folder_description};
