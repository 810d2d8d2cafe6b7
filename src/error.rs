use std::time::Duration;

/// A subpage could not be rendered to usable HTML. Recovered per page:
/// the page contributes zero records and the run continues.
#[derive(thiserror::Error, Debug)]
pub enum RenderFailure {
    #[error("page did not become ready within {timeout:?}: {url}")]
    Timeout { url: String, timeout: Duration },

    #[error("anti-bot challenge was not cleared: {url}")]
    Challenge { url: String },

    #[error("webdriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// One entry in the HTML could not be turned into a record. Recovered per
/// entry: logged at debug level and dropped.
#[derive(thiserror::Error, Debug)]
pub enum ParseAnomaly {
    #[error("card has no name element")]
    MissingName,

    #[error("card name is empty after whitespace cleanup")]
    BlankName,

    #[error("card appears before any category header")]
    Uncategorized,
}

/// The environment is unusable before any page work starts. Fatal: the
/// process exits non-zero and no output file is touched.
#[derive(thiserror::Error, Debug)]
#[error("webdriver endpoint unusable at {endpoint}")]
pub struct SetupFailure {
    pub endpoint: String,
    #[source]
    pub source: thirtyfour::error::WebDriverError,
}
