use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::config::{self, Subpage};
use crate::parser;
use crate::record::PersonRecord;
use crate::render::Render;

/// Pause between subpages. They sit behind one anti-bot layer; hammering it
/// can cost the rest of the run.
const PAGE_DELAY: Duration = Duration::from_secs(1);

/// What a full walk of the subpage list produced.
pub struct ScrapeOutcome {
    pub records: Vec<PersonRecord>,
    pub pages_ok: usize,
    pub pages_failed: usize,
}

impl ScrapeOutcome {
    /// Category to record count, first-seen order.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for rec in &self.records {
            match counts.iter_mut().find(|(c, _)| c == &rec.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((rec.category.clone(), 1)),
            }
        }
        counts
    }
}

/// Render and parse every subpage in order, concatenating results.
///
/// A page that fails to render contributes nothing and the walk goes on;
/// within-page document order and subpage order are both preserved in the
/// output. With `dump_dir` set, each rendered page is saved there too.
pub async fn scrape_people(
    renderer: &dyn Render,
    base_url: &str,
    subpages: &[Subpage],
    dump_dir: Option<&Path>,
) -> Result<ScrapeOutcome> {
    let pb = ProgressBar::new(subpages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut records = Vec::new();
    let mut pages_ok = 0usize;
    let mut pages_failed = 0usize;

    for (i, page) in subpages.iter().enumerate() {
        let url = config::page_url(base_url, page.path);
        pb.set_message(page.path);

        match renderer.render(&url).await {
            Ok(html) => {
                if let Some(dir) = dump_dir {
                    dump_html(dir, page.path, &html);
                }
                let found = parser::extract_all(&html, Some(page.label));
                info!("{}: {} records", page.path, found.len());
                records.extend(found);
                pages_ok += 1;
            }
            Err(e) => {
                warn!("skipping {}: {}", url, e);
                pages_failed += 1;
            }
        }
        pb.inc(1);

        if i + 1 < subpages.len() {
            tokio::time::sleep(PAGE_DELAY).await;
        }
    }

    pb.finish_and_clear();
    info!(
        "walked {} pages ({} ok, {} failed), {} records",
        subpages.len(),
        pages_ok,
        pages_failed,
        records.len()
    );

    Ok(ScrapeOutcome { records, pages_ok, pages_failed })
}

/// Keep a copy of what the renderer saw; selector drift gets diagnosed from
/// these. A dump that cannot be written never fails the run.
fn dump_html(dir: &Path, path: &str, html: &str) {
    let file = dir.join(format!("{}.html", path.replace('/', "_")));
    if let Err(e) = std::fs::write(&file, html) {
        warn!("could not dump {}: {}", file.display(), e);
    }
}
