//! Delimited review-table I/O.
//!
//! Input files are tab-delimited with a header row and quoting disabled:
//! the review text passes through verbatim, embedded quotes included. The
//! submission output is comma-delimited, also unquoted.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

use crate::error::{Result, SentirError};
use crate::primitives::Vector;

/// One row of a review table.
#[derive(Debug, Clone)]
pub struct ReviewRecord {
    /// Review identifier, passed through to the submission untouched.
    pub id: String,
    /// Binary sentiment label; absent in unlabeled and test tables.
    pub sentiment: Option<u8>,
    /// Raw review text.
    pub review: String,
}

/// Reads a tab-delimited review table.
///
/// Columns are resolved from the header by name; extra columns are
/// ignored. With `labeled` set, a `sentiment` column holding 0 or 1 is
/// required. Row order is preserved.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, a required column is
/// missing, a row fails to parse, or a sentiment value is not 0 or 1.
pub fn read_reviews(path: &Path, labeled: bool) -> Result<Vec<ReviewRecord>> {
    let file = File::open(path)
        .map_err(|e| SentirError::Other(format!("cannot open {}: {e}", path.display())))?;
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| SentirError::MissingColumn {
                column: name.to_string(),
                path: path.display().to_string(),
            })
    };

    let id_column = column("id")?;
    let review_column = column("review")?;
    let sentiment_column = if labeled { Some(column("sentiment")?) } else { None };

    let mut records = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = |index: usize| record.get(index).unwrap_or("").to_string();

        let sentiment = match sentiment_column {
            Some(index) => {
                let raw = field(index);
                let value: u8 = raw.trim().parse().map_err(|_| {
                    SentirError::Other(format!(
                        "invalid sentiment {raw:?} at {} row {}",
                        path.display(),
                        row + 2
                    ))
                })?;
                if value > 1 {
                    return Err(SentirError::Other(format!(
                        "sentiment must be 0 or 1, got {value} at {} row {}",
                        path.display(),
                        row + 2
                    )));
                }
                Some(value)
            }
            None => None,
        };

        records.push(ReviewRecord {
            id: field(id_column),
            sentiment,
            review: field(review_column),
        });
    }

    Ok(records)
}

/// Writes the submission file: comma-delimited, `id,sentiment` header,
/// quoting disabled, one row per id in the given order.
///
/// # Errors
///
/// Returns an error if the id and score counts differ or the file cannot
/// be written.
pub fn write_submission(path: &Path, ids: &[String], scores: &Vector<f32>) -> Result<()> {
    if ids.len() != scores.len() {
        return Err(SentirError::dimension_mismatch(
            "scores for ids",
            ids.len(),
            scores.len(),
        ));
    }

    let file = File::create(path)
        .map_err(|e| SentirError::Other(format!("cannot create {}: {e}", path.display())))?;
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(BufWriter::new(file));

    writer.write_record(["id", "sentiment"])?;
    for (id, &score) in ids.iter().zip(scores.iter()) {
        writer.write_record([id.as_str(), score.to_string().as_str()])?;
    }
    writer.flush()?;

    Ok(())
}
