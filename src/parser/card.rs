use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::ParseAnomaly;
use crate::parser::honorific;
use crate::record::PersonRecord;

static HEADER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3.card__header").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static SUBHEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.card__sub-heading").unwrap());

/// Build a record from one `div.card`, or say why it can't be one.
///
/// The name lives in `h3.card__header`; when the header wraps a link, the
/// link carries both the name text and the profile URL. The role line, when
/// present, is a `div.card__sub-heading` sibling.
pub fn person_from_card(
    card: &ElementRef,
    category: Option<&str>,
) -> Result<PersonRecord, ParseAnomaly> {
    let header = card.select(&HEADER).next().ok_or(ParseAnomaly::MissingName)?;
    let link = header.select(&LINK).next();

    let full_name = super::squash(&link.unwrap_or(header).text().collect::<String>());
    if full_name.is_empty() {
        return Err(ParseAnomaly::BlankName);
    }
    let category = category.ok_or(ParseAnomaly::Uncategorized)?;

    let (honorific, name) = honorific::split(&full_name);

    let title = card
        .select(&SUBHEADING)
        .next()
        .map(|el| super::squash(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty());

    let profile_url = link
        .and_then(|a| a.value().attr("href"))
        .filter(|href| is_absolute_http(href))
        .map(str::to_string);

    Ok(PersonRecord {
        name: name.to_string(),
        honorific: honorific.map(str::to_string),
        title,
        category: category.to_string(),
        profile_url,
    })
}

/// Only fully qualified web links count as profile URLs; relative paths and
/// mailto links are treated as absent.
fn is_absolute_http(href: &str) -> bool {
    Url::parse(href)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
