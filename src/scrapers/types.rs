use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use url::Url;

/// Path prefix shared by every listing detail page
pub const LISTING_PATH_PREFIX: &str = "/en/furnished-apartment/";

/// Search filters baked into every results-page URL
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Site root, e.g. `https://wunderflats.com`
    pub base_url: String,
    /// City slug in the search path
    pub city: String,
    /// First day of the stay
    pub from: NaiveDate,
    /// Last day of the stay
    pub to: NaiveDate,
    /// Tolerance on the stay dates, in days
    pub flexible_days: u32,
    pub score_variant: String,
    /// Minimum number of rooms
    pub min_rooms: u32,
    /// e.g. `ENTIRE_APARTMENT`
    pub home_type: String,
    /// Minimum size in square meters
    pub min_size: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            base_url: "https://wunderflats.com".to_string(),
            city: "berlin".to_string(),
            from: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or_default(),
            to: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap_or_default(),
            flexible_days: 14,
            score_variant: "B".to_string(),
            min_rooms: 3,
            home_type: "ENTIRE_APARTMENT".to_string(),
            min_size: 60,
        }
    }
}

impl SearchParams {
    /// URL of the given 1-based results page
    pub fn page_url(&self, page: u32) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.base_url))?;

        // Each segment is percent-encoded, so the city cannot displace the page number
        url.path_segments_mut()
            .map_err(|_| anyhow!("Base URL cannot hold a path: {}", self.base_url))?
            .pop_if_empty()
            .extend([
                "en",
                "furnished-apartments",
                self.city.as_str(),
                page.to_string().as_str(),
            ]);

        url.query_pairs_mut()
            .append_pair("from", &self.from.format("%Y-%m-%d").to_string())
            .append_pair("to", &self.to.format("%Y-%m-%d").to_string())
            .append_pair("flexibleDays", &self.flexible_days.to_string())
            .append_pair("scoreVariant", &self.score_variant)
            .append_pair("minRooms", &self.min_rooms.to_string())
            .append_pair("homeType", &self.home_type)
            .append_pair("minSize", &self.min_size.to_string());

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_url_matches_site_search() {
        let url = SearchParams::default().page_url(1).unwrap();
        assert_eq!(
            url.as_str(),
            "https://wunderflats.com/en/furnished-apartments/berlin/1\
             ?from=2025-07-01&to=2025-09-30&flexibleDays=14&scoreVariant=B\
             &minRooms=3&homeType=ENTIRE_APARTMENT&minSize=60"
        );
    }

    #[test]
    fn page_number_lands_in_path() {
        let params = SearchParams {
            base_url: "http://127.0.0.1:8080/".to_string(),
            city: "hamburg".to_string(),
            ..SearchParams::default()
        };
        let url = params.page_url(7).unwrap();

        assert_eq!(url.path(), "/en/furnished-apartments/hamburg/7");
        assert_eq!(url.host_str(), Some("127.0.0.1"));
    }

    #[test]
    fn reserved_characters_in_city_stay_in_one_segment() {
        let params = SearchParams {
            city: "frankfurt?am=main/west#1".to_string(),
            ..SearchParams::default()
        };
        let url = params.page_url(2).unwrap();

        assert!(url.path().ends_with("/2"), "path was {}", url.path());
        assert_eq!(url.path_segments().unwrap().count(), 4);
        assert!(url.fragment().is_none());
        assert!(url.query().unwrap().starts_with("from=2025-07-01&"));
    }

    #[test]
    fn base_url_with_path_prefix_is_kept() {
        let params = SearchParams {
            base_url: "http://localhost:3000/mirror/".to_string(),
            ..SearchParams::default()
        };
        let url = params.page_url(1).unwrap();
        assert_eq!(url.path(), "/mirror/en/furnished-apartments/berlin/1");
    }

    #[test]
    fn rejects_garbage_base_url() {
        let params = SearchParams {
            base_url: "not a url".to_string(),
            ..SearchParams::default()
        };
        assert!(params.page_url(1).is_err());

        let opaque = SearchParams {
            base_url: "mailto:flats@example.com".to_string(),
            ..SearchParams::default()
        };
        assert!(opaque.page_url(1).is_err());
    }
}
