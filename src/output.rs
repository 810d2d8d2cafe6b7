use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::record::PersonRecord;

/// Column set the downstream viewer keys on. Must stay in sync with the
/// field order of [`PersonRecord`].
const CSV_HEADER: [&str; 5] = ["name", "honorific", "title", "category", "profile_url"];

/// Pretty JSON array in record order, absent fields as explicit nulls.
pub fn json_bytes(records: &[PersonRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// CSV in record order: fixed header row, absent fields as empty cells.
/// The header is written unconditionally so even a single-row file is
/// self-describing.
pub fn csv_bytes(records: &[PersonRecord]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for rec in records {
        wtr.serialize(rec)?;
    }
    Ok(wtr.into_inner()?)
}

/// Full overwrite: the file is a snapshot of this run, not a log.
pub fn write_json(records: &[PersonRecord], path: &Path) -> Result<()> {
    fs::write(path, json_bytes(records)?)?;
    Ok(())
}

/// Full overwrite, same ordering as the JSON file.
pub fn write_csv(records: &[PersonRecord], path: &Path) -> Result<()> {
    fs::write(path, csv_bytes(records)?)?;
    Ok(())
}
