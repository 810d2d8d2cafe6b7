/// Root of the School of Computing and Information Systems site.
pub const BASE_URL: &str = "https://cis.unimelb.edu.au";

pub const JSON_FILE: &str = "people_data.json";
pub const CSV_FILE: &str = "people_data.csv";

/// One staff listing page under [`BASE_URL`].
///
/// `label` is the category applied to cards that appear before the page's
/// first section header (the landing page lists leadership without one).
pub struct Subpage {
    pub path: &'static str,
    pub label: &'static str,
}

/// The fixed set of people pages, in scrape and output order.
pub const SUBPAGES: &[Subpage] = &[
    Subpage { path: "people", label: "General" },
    Subpage { path: "people/academic-staff", label: "Academic staff" },
    Subpage { path: "people/professional-staff", label: "Professional staff" },
    Subpage { path: "people/research-fellows", label: "Research fellows" },
    Subpage { path: "people/graduate-researchers", label: "Graduate researchers" },
];

/// WebDriver endpoint, e.g. a local chromedriver. Overridable so the scraper
/// can point at a Selenium grid or a container.
pub fn webdriver_url() -> String {
    std::env::var("WEBDRIVER_URL").unwrap_or_else(|_| "http://localhost:9515".into())
}

pub fn page_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
