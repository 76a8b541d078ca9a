use serde::Serialize;
use std::fmt;
use url::Url;

/// Placeholder for a field whose markup could not be located
pub const NOT_FOUND: &str = "Not Found";

/// Availability is never scraped
pub const NOT_IMPLEMENTED: &str = "Not implemented";

/// Absolute URL of a single listing page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingLink(Url);

impl ListingLink {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ListingLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Detail record for one listing.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListingDetail {
    pub url: String,
    pub title: String,
    pub price: String,
    pub size: String,
    pub rooms: String,
    pub address: String,
    pub description: String,
    pub availability: String,
}

impl ListingDetail {
    /// Record for `url` with every field at its sentinel
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: NOT_FOUND.to_string(),
            price: NOT_FOUND.to_string(),
            size: NOT_FOUND.to_string(),
            rooms: NOT_FOUND.to_string(),
            address: NOT_FOUND.to_string(),
            description: NOT_FOUND.to_string(),
            availability: NOT_IMPLEMENTED.to_string(),
        }
    }

    /// `(name, value)` pairs in column order
    pub fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("url", self.url.as_str()),
            ("title", self.title.as_str()),
            ("price", self.price.as_str()),
            ("size", self.size.as_str()),
            ("rooms", self.rooms.as_str()),
            ("address", self.address.as_str()),
            ("description", self.description.as_str()),
            ("availability", self.availability.as_str()),
        ]
    }
}
