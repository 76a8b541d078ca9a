use crate::models::ListingDetail;
use crate::scrapers::traits::PageFetcher;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error, info};

/// Description value when the page has no description block
pub const DESCRIPTION_MISSING: &str = "Description section not found (using generic selector)";

/// Appended to values taken from a secondary extraction path
pub const FALLBACK_MARKER: &str = " (fallback)";

/// Fields filled from listing markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Address,
    Size,
    Rooms,
    Price,
    Description,
}

impl Field {
    fn slot(self, detail: &mut ListingDetail) -> &mut String {
        match self {
            Field::Title => &mut detail.title,
            Field::Address => &mut detail.address,
            Field::Size => &mut detail.size,
            Field::Rooms => &mut detail.rooms,
            Field::Price => &mut detail.price,
            Field::Description => &mut detail.description,
        }
    }

    /// Value used when every rule misses; `None` keeps the sentinel
    fn absent_value(self) -> Option<&'static str> {
        match self {
            Field::Description => Some(DESCRIPTION_MISSING),
            _ => None,
        }
    }
}

/// One way of locating a field in a listing page
pub struct Rule {
    pub name: &'static str,
    pub extract: fn(&Html) -> Option<String>,
}

/// Rules per field. Within a field the first rule that yields a value wins.
pub const RULES: &[(Field, &[Rule])] = &[
    (
        Field::Title,
        &[Rule {
            name: "title-heading",
            extract: title_heading,
        }],
    ),
    (
        Field::Address,
        &[
            Rule {
                name: "address-testid",
                extract: address_testid,
            },
            Rule {
                name: "address-basic-block",
                extract: address_basic_block,
            },
        ],
    ),
    (
        Field::Size,
        &[Rule {
            name: "stats-floor",
            extract: stats_size,
        }],
    ),
    (
        Field::Rooms,
        &[Rule {
            name: "stats-rooms",
            extract: stats_rooms,
        }],
    ),
    (
        Field::Price,
        &[Rule {
            name: "price-wrapper",
            extract: price_block,
        }],
    ),
    (
        Field::Description,
        &[Rule {
            name: "description-block",
            extract: description_block,
        }],
    ),
];

fn first_in_document<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

fn first_in<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

/// First `span` strictly below `element`
fn nested_span(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "span")
}

fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

fn trimmed_text(element: ElementRef<'_>) -> String {
    raw_text(element).trim().to_string()
}

fn title_heading(document: &Html) -> Option<String> {
    first_in_document(document, "h2.ListingDetails-title").map(trimmed_text)
}

fn address_testid(document: &Html) -> Option<String> {
    first_in_document(document, r#"span[data-testid="ListingDetailsPage-address"]"#)
        .map(trimmed_text)
}

fn address_basic_block(document: &Html) -> Option<String> {
    let block = first_in_document(document, "div.ListingDetails-basic")?;
    let span = nested_span(block)?;
    Some(format!("{}{}", trimmed_text(span), FALLBACK_MARKER))
}

// Compound class selectors: the stat span matches in any class order and with
// extra classes, looser than an exact `class` attribute comparison.
fn stats_value(document: &Html, stat_css: &str) -> Option<String> {
    let stats = first_in_document(document, "div.ListingDetails-stats")?;
    let stat = first_in(stats, stat_css)?;
    nested_span(stat).map(trimmed_text)
}

fn stats_size(document: &Html) -> Option<String> {
    // "98 m², floor 2" -> "98 m²"
    let text = stats_value(document, "span.ListingDetails-statsElt.floor")?;
    text.split(',').next().map(|s| s.trim().to_string())
}

fn stats_rooms(document: &Html) -> Option<String> {
    stats_value(document, "span.ListingDetails-statsElt.rooms")
}

fn price_block(document: &Html) -> Option<String> {
    let wrapper = first_in_document(document, "div.ListingPriceText__wrapper")?;
    let value = first_in(wrapper, "strong.ListingPriceText__value")?;

    match nested_span(wrapper) {
        Some(unit) if raw_text(unit).contains("per month") => Some(format!(
            "{} {}",
            trimmed_text(value),
            trimmed_text(unit)
        )),
        _ => Some(trimmed_text(value)),
    }
}

fn description_block(document: &Html) -> Option<String> {
    first_in_document(document, "div.description").map(trimmed_text)
}

/// Run every field's rules against a parsed listing page
pub fn apply_rules(document: &Html, detail: &mut ListingDetail) {
    for (field, rules) in RULES {
        let hit = rules
            .iter()
            .find_map(|rule| (rule.extract)(document).map(|value| (rule.name, value)));

        match hit {
            Some((rule, value)) => {
                debug!(?field, rule, "Field located");
                *field.slot(detail) = value;
            }
            None => {
                debug!(?field, "No rule matched");
                if let Some(absent) = field.absent_value() {
                    *field.slot(detail) = absent.to_string();
                }
            }
        }
    }
}

/// `title` -> `Title`, for the extraction summary
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build a detail record from listing HTML
pub fn parse_details(html: &str, url: &str) -> ListingDetail {
    let document = Html::parse_document(html);
    let mut detail = ListingDetail::new(url);
    apply_rules(&document, &mut detail);
    detail
}

/// Fetch a listing page and extract its details.
///
/// Never fails: a fetch error is logged and the record keeps its sentinels.
pub async fn extract_details<F: PageFetcher + ?Sized>(fetcher: &F, url: &str) -> ListingDetail {
    info!("Fetching details for: {}", url);

    match fetcher.fetch(url).await {
        Ok(html) => {
            let detail = parse_details(&html, url);
            info!("Extracted details:");
            for (name, value) in detail.fields() {
                info!("- {}: {}", capitalize(name), value);
            }
            detail
        }
        Err(e) => {
            error!(url, error = %e, "Error fetching apartment details");
            ListingDetail::new(url)
        }
    }
}
