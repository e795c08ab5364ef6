//! Eclipse CSV ingestion.
//!
//! Input files carry a header row followed by `date-time, kind, category`
//! rows, e.g. `-3974-07-25 16:41:19,개기,일식`. Columns are read by
//! position. Rows that cannot be turned into a well-formed event are
//! dropped here so the search never sees them.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use polars::prelude::*;

use crate::calendar::parse_eclipse_date;
use crate::error::HexError;
use crate::event::{EclipseCategory, EclipseEvent, EclipseKind, EventSequence};
use crate::schema::{event, input};

/// Read an eclipse CSV file into a sorted event sequence.
///
/// An empty file yields an empty sequence.
pub fn read_events_csv(path: &Path) -> Result<EventSequence, HexError> {
    let reader = csv_options().try_into_reader_with_file_path(Some(path.to_path_buf()))?;
    let Some(df) = finish_or_empty(reader.finish())? else {
        info!("{} is empty", path.display());
        return Ok(EventSequence::default());
    };
    info!("Read {} lines from {}", df.height(), path.display());
    events_from_frame(&skip_header(&df))
}

/// Parse eclipse CSV content held in memory.
pub fn parse_events_csv(text: &str) -> Result<EventSequence, HexError> {
    if text.trim().is_empty() {
        return Ok(EventSequence::default());
    }
    let reader = csv_options().into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()));
    match finish_or_empty(reader.finish())? {
        Some(df) => events_from_frame(&skip_header(&df)),
        None => Ok(EventSequence::default()),
    }
}

/// Three String columns read by position. The header line is read as
/// data and skipped afterwards, so its width never matters; surplus
/// fields are truncated and missing ones read as null.
fn csv_options() -> CsvReadOptions {
    let schema = Schema::from_iter([
        (PlSmallStr::from_static(input::DATE_TIME), DataType::String),
        (PlSmallStr::from_static(input::KIND), DataType::String),
        (PlSmallStr::from_static(input::CATEGORY), DataType::String),
    ]);
    CsvReadOptions::default()
        .with_has_header(false)
        .with_schema(Some(Arc::new(schema)))
        .map_parse_options(|opts| opts.with_truncate_ragged_lines(true))
}

fn finish_or_empty(result: PolarsResult<DataFrame>) -> Result<Option<DataFrame>, HexError> {
    match result {
        Ok(df) => Ok(Some(df)),
        Err(PolarsError::NoData(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn skip_header(df: &DataFrame) -> DataFrame {
    df.slice(1, df.height().saturating_sub(1))
}

/// Build events from a string frame of data rows whose first three
/// columns are date-time, kind and category.
///
/// Event ids are `e-{line}-{day_index}`, `line` counting from 1 for the
/// first data row (the header line is 0).
pub fn events_from_frame(df: &DataFrame) -> Result<EventSequence, HexError> {
    if df.width() < input::MIN_COLUMNS {
        return Err(HexError::MissingColumn(format!(
            "expected at least {} columns (date-time, kind, category), found {}",
            input::MIN_COLUMNS,
            df.width()
        )));
    }

    let columns = df.get_columns();
    let dates = columns[input::DATE_TIME_POS].str()?;
    let kinds = columns[input::KIND_POS].str()?;
    let categories = columns[input::CATEGORY_POS].str()?;

    let mut events = Vec::with_capacity(df.height());
    let mut dropped = 0usize;
    for (row, ((date, kind), category)) in dates
        .into_iter()
        .zip(kinds.into_iter())
        .zip(categories.into_iter())
        .enumerate()
    {
        match parse_row(row + 1, date, kind, category) {
            Some(ev) => events.push(ev),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!("Dropped {dropped} malformed eclipse rows");
    }
    EventSequence::new(events)
}

fn parse_row(
    line: usize,
    date: Option<&str>,
    kind: Option<&str>,
    category: Option<&str>,
) -> Option<EclipseEvent> {
    let original = date?.trim();
    let parsed = parse_eclipse_date(original)?;
    let kind = kind?.parse::<EclipseKind>().ok()?;
    let category = category?.parse::<EclipseCategory>().ok()?;
    let id = format!("e-{line}-{}", parsed.day_index());
    Some(EclipseEvent::new(id, original, parsed, kind, category))
}

/// Render a sequence with the `schema::event` columns.
pub fn events_to_frame(events: &EventSequence) -> Result<DataFrame, HexError> {
    let mut ids = Vec::with_capacity(events.len());
    let mut originals = Vec::with_capacity(events.len());
    let mut years = Vec::with_capacity(events.len());
    let mut months = Vec::with_capacity(events.len());
    let mut days = Vec::with_capacity(events.len());
    let mut times = Vec::with_capacity(events.len());
    let mut kinds = Vec::with_capacity(events.len());
    let mut categories = Vec::with_capacity(events.len());
    let mut day_indices = Vec::with_capacity(events.len());

    for e in events {
        ids.push(e.id.clone());
        originals.push(e.original_date.clone());
        years.push(e.year);
        months.push(e.month as i32);
        days.push(e.day as i32);
        times.push(e.time.clone());
        kinds.push(e.kind.as_str());
        categories.push(e.category.as_str());
        day_indices.push(e.day_index);
    }

    let df = DataFrame::new(vec![
        Column::new(event::EVENT_ID.into(), &ids),
        Column::new(event::ORIGINAL_DATE.into(), &originals),
        Column::new(event::YEAR.into(), &years),
        Column::new(event::MONTH.into(), &months),
        Column::new(event::DAY.into(), &days),
        Column::new(event::TIME.into(), &times),
        Column::new(event::KIND.into(), &kinds),
        Column::new(event::CATEGORY.into(), &categories),
        Column::new(event::DAY_INDEX.into(), &day_indices),
    ])?;
    Ok(df)
}
