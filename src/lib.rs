//! Fetch-and-normalize layer for a portfolio site.
//!
//! Two independent clients feed the presentation layer:
//! - [`ContentClient`] queries the headless content backend for projects
//! - [`TestimonialsClient`] reads testimonials from a REST endpoint
//!
//! Both sit on [`http::CachedClient`], which bounds every attempt with a
//! timeout, retries with exponential backoff and keeps successful responses
//! in a per-client TTL cache.

pub mod cache;
pub mod config;
pub mod content;
pub mod http;
pub mod logging;
pub mod testimonials;

pub use config::Config;
pub use content::{ContentClient, Project};
pub use http::FetchError;
pub use testimonials::{Testimonial, TestimonialsClient};
