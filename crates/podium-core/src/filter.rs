//! Filter engine: narrowing the medal table by year and country, plus the
//! selector domains derived from the data itself.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::record::MedalRecord;

/// The UI label for "no country filter".
pub const ALL_COUNTRIES: &str = "All";

// ─── CountryFilter ───────────────────────────────────────────────────────────

/// The optional country predicate. Serialised as `"All"` or the country name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CountryFilter {
  #[default]
  All,
  /// Exact, case-sensitive match on [`MedalRecord::country`].
  Only(String),
}

impl CountryFilter {
  pub fn as_country(&self) -> Option<&str> {
    match self {
      Self::All => None,
      Self::Only(name) => Some(name),
    }
  }

  pub fn matches(&self, record: &MedalRecord) -> bool {
    match self {
      Self::All => true,
      Self::Only(name) => record.country == *name,
    }
  }
}

impl From<Option<String>> for CountryFilter {
  fn from(value: Option<String>) -> Self {
    match value {
      Some(name) if name != ALL_COUNTRIES && !name.is_empty() => {
        Self::Only(name)
      }
      _ => Self::All,
    }
  }
}

impl FromStr for CountryFilter {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::from(Some(s.to_string())))
  }
}

impl fmt::Display for CountryFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_country().unwrap_or(ALL_COUNTRIES))
  }
}

impl Serialize for CountryFilter {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for CountryFilter {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(Self::from(Option::<String>::deserialize(deserializer)?))
  }
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Rows of `table` from `year` that satisfy `country`, in source order.
///
/// A year or country absent from the data yields an empty subset.
pub fn filter<'a>(
  table: &'a [MedalRecord],
  year: i32,
  country: &CountryFilter,
) -> Vec<&'a MedalRecord> {
  table
    .iter()
    .filter(|r| r.year == year && country.matches(r))
    .collect()
}

// ─── Selector domains ────────────────────────────────────────────────────────

/// Distinct years present in the table, most recent first.
pub fn years(table: &[MedalRecord]) -> Vec<i32> {
  let mut years: Vec<i32> = table.iter().map(|r| r.year).collect();
  years.sort_unstable_by(|a, b| b.cmp(a));
  years.dedup();
  years
}

/// The most recent edition in the table.
pub fn latest_year(table: &[MedalRecord]) -> Option<i32> {
  table.iter().map(|r| r.year).max()
}

/// `"All"` followed by the `limit` countries with the most rows.
/// Ties keep first-seen order.
pub fn country_choices(table: &[MedalRecord], limit: usize) -> Vec<String> {
  let mut order: Vec<&str> = Vec::new();
  let mut counts: HashMap<&str, usize> = HashMap::new();
  for r in table {
    let count = counts.entry(r.country.as_str()).or_insert_with(|| {
      order.push(r.country.as_str());
      0
    });
    *count += 1;
  }
  order.sort_by(|a, b| counts[b].cmp(&counts[a]));

  std::iter::once(ALL_COUNTRIES.to_string())
    .chain(order.into_iter().take(limit).map(str::to_string))
    .collect()
}
