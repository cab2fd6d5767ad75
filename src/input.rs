//! Loads movements from CSV and JSON documents.

use std::{path::Path, str::FromStr};

use rust_decimal::Decimal;
use serde::Deserialize;
use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

use crate::{
    Error, ValidationError,
    movement::{Movement, MovementKind, validate_movements},
    timezone::LocalTimezone,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The document formats movements can be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MovementFormat {
    Csv,
    Json,
}

impl MovementFormat {
    /// Guesses the format from the file extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;

        if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if extension.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Parses movements from `text` in the given `format`.
///
/// # Errors
/// See [parse_movements_csv] and [parse_movements_json].
pub fn parse_movements(
    text: &str,
    format: MovementFormat,
    timezone: &LocalTimezone,
) -> Result<Vec<Movement>, Error> {
    match format {
        MovementFormat::Csv => parse_movements_csv(text, timezone),
        MovementFormat::Json => parse_movements_json(text),
    }
}

#[derive(Debug, Deserialize)]
struct MovementRecord {
    timestamp: String,
    amount: String,
    kind: String,
}

/// Parses movements from CSV with the header `timestamp,amount,kind`.
///
/// Timestamps are either RFC 3339 date-times, e.g. `2025-03-10T09:30:00+13:00`,
/// or plain dates, e.g. `2025-03-10`, which are taken as local midnight in
/// `timezone`. Kinds are `inflow` or `outflow`, ignoring case.
///
/// # Errors
/// Returns [Error::InvalidCsv] if the document is not valid CSV or is missing
/// a column, and [Error::Validation] naming the row and field of a value that
/// cannot be parsed or is negative.
pub fn parse_movements_csv(text: &str, timezone: &LocalTimezone) -> Result<Vec<Movement>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut movements = Vec::new();

    for (index, record) in reader.deserialize::<MovementRecord>().enumerate() {
        let record = record.map_err(|error| Error::InvalidCsv(error.to_string()))?;
        movements.push(parse_record(index, &record, timezone)?);
    }

    validate_movements(&movements)?;
    tracing::debug!("Parsed {} movements from CSV", movements.len());

    Ok(movements)
}

/// Parses movements from a JSON array of objects with the fields
/// `amount`, `kind` and `timestamp` (RFC 3339).
///
/// # Errors
/// Returns [Error::InvalidJson] if the document does not have that shape, and
/// [Error::Validation] if an amount is negative.
pub fn parse_movements_json(text: &str) -> Result<Vec<Movement>, Error> {
    let movements: Vec<Movement> =
        serde_json::from_str(text).map_err(|error| Error::InvalidJson(error.to_string()))?;

    validate_movements(&movements)?;
    tracing::debug!("Parsed {} movements from JSON", movements.len());

    Ok(movements)
}

fn parse_record(
    index: usize,
    record: &MovementRecord,
    timezone: &LocalTimezone,
) -> Result<Movement, ValidationError> {
    let amount = Decimal::from_str(&record.amount).map_err(|_| {
        ValidationError::movement(
            index,
            "amount",
            format!("\"{}\" is not a number", record.amount),
        )
    })?;

    let kind = parse_kind(&record.kind).ok_or_else(|| {
        ValidationError::movement(
            index,
            "kind",
            format!("expected \"inflow\" or \"outflow\", got \"{}\"", record.kind),
        )
    })?;

    let timestamp = parse_timestamp(&record.timestamp, timezone).ok_or_else(|| {
        ValidationError::movement(
            index,
            "timestamp",
            format!(
                "\"{}\" is neither an RFC 3339 date-time nor a YYYY-MM-DD date",
                record.timestamp
            ),
        )
    })?;

    Ok(Movement {
        amount,
        kind,
        timestamp,
    })
}

fn parse_kind(text: &str) -> Option<MovementKind> {
    if text.eq_ignore_ascii_case("inflow") {
        Some(MovementKind::Inflow)
    } else if text.eq_ignore_ascii_case("outflow") {
        Some(MovementKind::Outflow)
    } else {
        None
    }
}

fn parse_timestamp(text: &str, timezone: &LocalTimezone) -> Option<OffsetDateTime> {
    if let Ok(timestamp) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(timestamp);
    }

    Date::parse(text, DATE_FORMAT)
        .ok()
        .map(|date| timezone.midnight(date))
}
