//! HTTP plumbing shared by the content and testimonials clients.

mod cached_client;
mod client;
mod error;
mod retry;

pub use cached_client::CachedClient;
pub use client::JsonClient;
pub use error::FetchError;
pub use retry::RetryPolicy;
