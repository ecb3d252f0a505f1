use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::io::{Read, Write};
use std::path::Path;

use crate::constants::OUTPUT_COLUMNS;
use crate::domain::{ContactRecord, RawContact};
use crate::error::Result;

/// Cell values treated as missing and replaced with an empty string on load
const NA_PLACEHOLDERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Read contact records from a CSV file
pub fn read_records(path: &Path) -> Result<Vec<ContactRecord>> {
    let file = std::fs::File::open(path)?;
    let records = read_records_from(file)?;
    tracing::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Read contact records from any CSV source.
///
/// Missing columns and missing-value placeholders become empty strings, so every
/// cleaner receives a string.
pub fn read_records_from<R: Read>(source: R) -> Result<Vec<ContactRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source);

    let mut records = Vec::new();
    for row in reader.deserialize::<RawContact>() {
        let mut raw = row?;
        for field in [
            &mut raw.name,
            &mut raw.email,
            &mut raw.url,
            &mut raw.address,
            &mut raw.number,
        ] {
            if is_placeholder(field) {
                field.clear();
            }
        }
        records.push(ContactRecord::from(raw));
    }

    Ok(records)
}

fn is_placeholder(value: &str) -> bool {
    NA_PLACEHOLDERS.contains(&value)
}

/// Write cleaned records to a CSV file with the fixed output column set
pub fn write_records(path: &Path, records: &[ContactRecord]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_records_to(file, records)?;
    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Write cleaned records to any sink. The header row is always written, even for
/// an empty batch.
pub fn write_records_to<W: Write>(sink: W, records: &[ContactRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(sink);

    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
