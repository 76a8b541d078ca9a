pub mod details;
pub mod http;
pub mod links;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use http::HttpFetcher;
pub use traits::PageFetcher;
