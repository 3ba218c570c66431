//! Testimonials backend: REST envelope, normalization and client.

pub mod api_types;
pub mod client;
pub mod normalize;
pub mod types;

pub use client::TestimonialsClient;
pub use types::Testimonial;
