//! Header-driven CSV decoding.
//!
//! Columns are located by name, so their order in the file does not matter
//! and unknown columns are ignored. Cells are trimmed before use.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use podium_core::{
  prediction::AthletePrediction,
  record::{Medal, MedalRecord},
};

use crate::{
  error::{Error, Result},
  noc::country_name,
};

// ─── Column lookup ───────────────────────────────────────────────────────────

struct Columns {
  headers: StringRecord,
}

impl Columns {
  fn find(&self, name: &str) -> Option<usize> {
    self.headers.iter().position(|h| h.trim() == name)
  }
}

fn cell(record: &StringRecord, column: Option<usize>) -> &str {
  column
    .and_then(|i| record.get(i))
    .map(str::trim)
    .unwrap_or_default()
}

fn optional(value: &str) -> Option<String> {
  (!value.is_empty()).then(|| value.to_string())
}

fn line_of(record: &StringRecord) -> u64 {
  record.position().map_or(0, |p| p.line())
}

/// Whole numbers, also accepting a zero fractional part (`"2022.0"`) as
/// written by spreadsheet exports.
fn whole_number(raw: &str) -> Option<i64> {
  raw.parse::<i64>().ok().or_else(|| {
    raw
      .parse::<f64>()
      .ok()
      .filter(|f| f.is_finite() && f.fract() == 0.0)
      .map(|f| f as i64)
  })
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
  ReaderBuilder::new()
    .flexible(true)
    .trim(csv::Trim::Headers)
    .from_reader(input)
}

// ─── Medal table ─────────────────────────────────────────────────────────────

pub(crate) fn parse_medals<R: Read>(input: R) -> Result<Vec<MedalRecord>> {
  let mut reader = reader(input);
  let columns = Columns {
    headers: reader.headers()?.clone(),
  };
  let year = columns.find("year").ok_or(Error::MissingColumn("year"))?;
  let discipline = columns.find("discipline");
  let noc = columns.find("noc");
  let medal = columns.find("medal");
  let event = columns.find("event");
  let athlete = columns.find("as");

  let mut rows = Vec::new();
  for result in reader.records() {
    let record = result?;
    let raw_year = cell(&record, Some(year));
    let parsed_year = whole_number(raw_year)
      .and_then(|y| i32::try_from(y).ok())
      .ok_or_else(|| Error::InvalidYear {
        line:  line_of(&record),
        value: raw_year.to_string(),
      })?;

    let code = cell(&record, noc);
    rows.push(MedalRecord::new(
      parsed_year,
      cell(&record, discipline),
      code,
      country_name(code),
      Medal::from_label(cell(&record, medal)),
      optional(cell(&record, event)),
      optional(cell(&record, athlete)),
    ));
  }
  Ok(rows)
}

// ─── Prediction table ────────────────────────────────────────────────────────

pub(crate) fn parse_predictions<R: Read>(
  input: R,
) -> Result<Vec<AthletePrediction>> {
  let mut reader = reader(input);
  let columns = Columns {
    headers: reader.headers()?.clone(),
  };
  let sport = columns.find("sport");
  let icon = columns.find("icon");
  let athlete = columns.find("athlete");
  let description = columns.find("desc");
  let image = columns.find("img");
  let medals = columns.find("medals");

  let mut rows = Vec::new();
  for result in reader.records() {
    let record = result?;
    let raw_medals = cell(&record, medals);
    let count = if raw_medals.is_empty() {
      0
    } else {
      whole_number(raw_medals)
        .and_then(|m| u32::try_from(m).ok())
        .ok_or_else(|| Error::InvalidMedalCount {
          line:  line_of(&record),
          value: raw_medals.to_string(),
        })?
    };

    rows.push(AthletePrediction {
      sport:       cell(&record, sport).to_string(),
      icon:        cell(&record, icon).to_string(),
      athlete:     cell(&record, athlete).to_string(),
      description: cell(&record, description).to_string(),
      image_ref:   optional(cell(&record, image)),
      medals:      count,
    });
  }
  Ok(rows)
}
