pub mod card;
pub mod honorific;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{html::Select, Html, Selector};
use tracing::debug;

use crate::record::PersonRecord;

// Section headers and person cards, matched together so one document-order
// walk sees category changes exactly where they happen.
static NODES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2[id], div.card").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Page furniture rendered as `h2[id]` that must never become a category.
const EXCLUDED_HEADERS: &[&str] = &["Featured content", "Site footer"];

/// Lazy single-pass walk over a rendered people page.
///
/// Each `h2[id]` updates the category in force; each `div.card` yields a
/// [`PersonRecord`] under it. Cards that can't be resolved are logged at
/// debug level and skipped. One pass only: the iterator is not restartable.
pub struct People<'a> {
    nodes: Select<'a, 'static>,
    category: Option<String>,
}

impl<'a> Iterator for People<'a> {
    type Item = PersonRecord;

    fn next(&mut self) -> Option<PersonRecord> {
        for node in self.nodes.by_ref() {
            if node.value().name() == "h2" {
                let header = squash(&node.text().collect::<String>());
                if !header.is_empty() && !EXCLUDED_HEADERS.contains(&header.as_str()) {
                    self.category = Some(header);
                }
                continue;
            }
            match card::person_from_card(&node, self.category.as_deref()) {
                Ok(rec) => return Some(rec),
                Err(anomaly) => {
                    debug!(
                        "dropping card: {} [{}]",
                        anomaly,
                        squash(&node.text().collect::<String>())
                    );
                }
            }
        }
        None
    }
}

/// Walk `html` lazily. `label` seeds the category for cards that appear
/// before the page's first section header; with no label those cards drop.
pub fn people<'a>(html: &'a Html, label: Option<&str>) -> People<'a> {
    People {
        nodes: html.select(&NODES),
        category: label.map(str::to_string),
    }
}

/// Parse a whole rendered page in one pass, document order preserved.
pub fn extract_all(html: &str, label: Option<&str>) -> Vec<PersonRecord> {
    let doc = Html::parse_document(html);
    people(&doc, label).collect()
}

fn squash(text: &str) -> String {
    WS_RE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squash_collapses_runs() {
        assert_eq!(squash("  Dr \n\t Sarah   Chen  "), "Dr Sarah Chen");
        assert_eq!(squash("\n \t"), "");
    }

    #[test]
    fn headers_categorize_following_cards() {
        let html = r#"
            <h2 id="leadership">Leadership</h2>
            <div class="card"><h3 class="card__header">Prof Uwe Aickelin</h3></div>
            <h2 id="academic">Academic staff</h2>
            <div class="card"><h3 class="card__header">Dr Sarah Chen</h3></div>
            <div class="card"><h3 class="card__header">Dr Wei Wang</h3></div>
        "#;
        let recs = extract_all(html, None);
        let cats: Vec<_> = recs.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(cats, ["Leadership", "Academic staff", "Academic staff"]);
    }

    #[test]
    fn label_covers_cards_before_first_header() {
        let html = r#"
            <div class="card"><h3 class="card__header">Prof Uwe Aickelin</h3></div>
            <h2 id="fellows">Research fellows</h2>
            <div class="card"><h3 class="card__header">Dr Amy Nguyen</h3></div>
        "#;
        let recs = extract_all(html, Some("General"));
        assert_eq!(recs[0].category, "General");
        assert_eq!(recs[1].category, "Research fellows");
    }

    #[test]
    fn unlabeled_preheader_cards_drop() {
        let html = r#"
            <div class="card"><h3 class="card__header">Orphan Person</h3></div>
            <h2 id="staff">Staff</h2>
            <div class="card"><h3 class="card__header">Kept Person</h3></div>
        "#;
        let recs = extract_all(html, None);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "Kept Person");
    }

    #[test]
    fn boilerplate_headers_do_not_reset_category() {
        let html = r#"
            <h2 id="staff">Academic staff</h2>
            <div class="card"><h3 class="card__header">Dr Sarah Chen</h3></div>
            <h2 id="featured">Featured content</h2>
            <h2 id="footer">Site footer</h2>
            <div class="card"><h3 class="card__header">Dr Wei Wang</h3></div>
        "#;
        let recs = extract_all(html, None);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].category, "Academic staff");
    }

    #[test]
    fn blank_h2_is_ignored() {
        let html = r#"
            <h2 id="staff">Staff</h2>
            <h2 id="blank">   </h2>
            <div class="card"><h3 class="card__header">Dr Sarah Chen</h3></div>
        "#;
        let recs = extract_all(html, None);
        assert_eq!(recs[0].category, "Staff");
    }

    #[test]
    fn duplicate_cards_both_survive() {
        let html = r#"
            <h2 id="staff">Staff</h2>
            <div class="card"><h3 class="card__header">Dr Sarah Chen</h3></div>
            <div class="card"><h3 class="card__header">Dr Sarah Chen</h3></div>
        "#;
        let recs = extract_all(html, None);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0], recs[1]);
    }

    #[test]
    fn people_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/people.html").unwrap();
        let recs = extract_all(&html, Some("General"));

        // 6 cards on the page: one decorative, one with a whitespace name.
        assert_eq!(recs.len(), 4, "got: {:?}", recs);

        let uwe = &recs[0];
        assert_eq!(uwe.honorific.as_deref(), Some("Prof"));
        assert_eq!(uwe.name, "Uwe Aickelin");
        assert_eq!(uwe.title.as_deref(), Some("Head of School"));
        assert_eq!(uwe.category, "Leadership");
        assert_eq!(
            uwe.profile_url.as_deref(),
            Some("https://findanexpert.unimelb.edu.au/profile/815636")
        );

        let jane = recs.iter().find(|r| r.name == "Jane Smith").unwrap();
        assert_eq!(jane.honorific, None);
        assert_eq!(jane.title, None);
        assert_eq!(jane.profile_url, None);
        assert_eq!(jane.category, "Professional staff");

        assert!(recs.iter().all(|r| !r.name.is_empty()));
        assert!(!recs.iter().any(|r| r.category == "Featured content"));
    }

    #[test]
    fn academic_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/academic.html").unwrap();
        let recs = extract_all(&html, Some("Academic staff"));

        // The head-of-section card sits above the first header: label applies.
        assert_eq!(recs[0].category, "Academic staff");

        // Duplicated markup stays duplicated.
        let chens = recs.iter().filter(|r| r.name == "Sarah Chen").count();
        assert_eq!(chens, 2);

        // Relative and mailto hrefs never become profile URLs.
        let wei = recs.iter().find(|r| r.name == "Wei Wang").unwrap();
        assert_eq!(wei.profile_url, None);
        let priya = recs.iter().find(|r| r.name == "Priya Patel").unwrap();
        assert_eq!(priya.profile_url, None);
    }
}
