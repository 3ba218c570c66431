//! Content backend: project documents, category labels, image URLs.

pub mod api_types;
pub mod category;
pub mod client;
pub mod image;
pub mod types;

pub use client::ContentClient;
pub use types::{Layout, ProcessStep, Project};
