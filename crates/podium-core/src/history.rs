//! Program history: when each event first and last appeared, and whether it
//! is still contested.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{filter::years, record::MedalRecord};

/// Status of an event relative to the most recent edition in the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
  /// Contested at the latest edition.
  Active,
  /// Contested at the latest edition and introduced within the recency
  /// window.
  ActiveNew,
  /// Absent from the latest edition.
  Discontinued,
}

impl EventStatus {
  pub fn is_active(self) -> bool { !matches!(self, Self::Discontinued) }
}

/// First and last appearance of one `(discipline, event)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHistory {
  pub discipline_clean: String,
  pub event:            String,
  pub first_year:       i32,
  pub last_year:        i32,
  pub status:           EventStatus,
}

/// Classification boundaries derived from the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Editions {
  /// The most recent edition.
  pub latest:    i32,
  /// Events first seen at or after this edition count as new.
  pub new_since: i32,
}

impl Editions {
  /// Boundaries for `table` with a recency window of `recency` editions
  /// (the latest edition counts as one; values below one are treated as
  /// one). Returns `None` for an empty table.
  pub fn of(table: &[MedalRecord], recency: usize) -> Option<Self> {
    let years = years(table);
    let latest = *years.first()?;
    let window = recency.max(1).min(years.len());
    Some(Self {
      latest,
      new_since: years[window - 1],
    })
  }

  pub fn classify(&self, first_year: i32, last_year: i32) -> EventStatus {
    if last_year != self.latest {
      EventStatus::Discontinued
    } else if first_year >= self.new_since {
      EventStatus::ActiveNew
    } else {
      EventStatus::Active
    }
  }
}

/// One [`EventHistory`] per `(discipline_clean, event)`, sorted by
/// discipline then event. Always pass the full table.
pub fn event_histories(table: &[MedalRecord], recency: usize) -> Vec<EventHistory> {
  let Some(editions) = Editions::of(table, recency) else {
    return Vec::new();
  };

  let mut spans: BTreeMap<(&str, &str), (i32, i32)> = BTreeMap::new();
  for r in table {
    spans
      .entry((r.discipline_clean.as_str(), r.event.as_str()))
      .and_modify(|(first, last)| {
        *first = (*first).min(r.year);
        *last = (*last).max(r.year);
      })
      .or_insert((r.year, r.year));
  }

  spans
    .into_iter()
    .map(|((discipline, event), (first_year, last_year))| EventHistory {
      discipline_clean: discipline.to_string(),
      event: event.to_string(),
      first_year,
      last_year,
      status: editions.classify(first_year, last_year),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::{Medal, test_helpers::medal};

  fn row(year: i32, discipline: &str, event: &str) -> MedalRecord {
    medal(year, "Norway", Some(Medal::Gold), discipline, event, "X")
  }

  fn status_of(histories: &[EventHistory], event: &str) -> EventStatus {
    histories
      .iter()
      .find(|h| h.event == event)
      .map(|h| h.status)
      .unwrap_or_else(|| panic!("missing {event}"))
  }

  #[test]
  fn classifies_each_case_exactly() {
    let table = vec![
      // Only at the latest edition.
      row(2022, "Skiing (Freestyle)", "Big Air"),
      // Introduced one edition before the latest.
      row(2018, "Snowboard", "Team Cross"),
      row(2022, "Snowboard", "Team Cross"),
      // Long-running.
      row(2010, "Skiing (Alpine)", "Downhill"),
      row(2014, "Skiing (Alpine)", "Downhill"),
      row(2022, "Skiing (Alpine)", "Downhill"),
      // Introduced two editions back: outside the window.
      row(2014, "Biathlon", "Mixed Relay"),
      row(2022, "Biathlon", "Mixed Relay"),
      // Gone before the latest edition.
      row(2010, "Skiing (Alpine)", "Super Combined"),
      row(2018, "Skiing (Alpine)", "Super Combined"),
    ];
    let h = event_histories(&table, 2);
    assert_eq!(status_of(&h, "Big Air"), EventStatus::ActiveNew);
    assert_eq!(status_of(&h, "Team Cross"), EventStatus::ActiveNew);
    assert_eq!(status_of(&h, "Downhill"), EventStatus::Active);
    assert_eq!(status_of(&h, "Mixed Relay"), EventStatus::Active);
    assert_eq!(status_of(&h, "Super Combined"), EventStatus::Discontinued);
  }

  #[test]
  fn spans_are_min_and_max_per_pair() {
    let table = vec![
      row(2014, "Skiing (Alpine)", "Downhill"),
      row(2006, "Skiing (Alpine)", "Downhill"),
      row(2022, "Skiing (Alpine)", "Downhill"),
    ];
    let h = event_histories(&table, 2);
    assert_eq!(h.len(), 1);
    assert_eq!(h[0].discipline_clean, "Skiing");
    assert_eq!((h[0].first_year, h[0].last_year), (2006, 2022));
  }

  #[test]
  fn output_is_sorted_by_discipline_then_event() {
    let table = vec![
      row(2022, "Skiing", "Slalom"),
      row(2022, "Biathlon", "Sprint"),
      row(2022, "Skiing", "Downhill"),
    ];
    let keys: Vec<_> = event_histories(&table, 2)
      .into_iter()
      .map(|h| (h.discipline_clean, h.event))
      .collect();
    assert_eq!(keys, [
      ("Biathlon".to_string(), "Sprint".to_string()),
      ("Skiing".to_string(), "Downhill".to_string()),
      ("Skiing".to_string(), "Slalom".to_string()),
    ]);
  }

  #[test]
  fn window_follows_editions_not_calendar_years() {
    // 1992 and 1994 are consecutive editions despite the two-year gap.
    let table = vec![
      row(1988, "Luge", "Singles"),
      row(1992, "Luge", "Doubles"),
      row(1994, "Luge", "Doubles"),
      row(1994, "Luge", "Singles"),
    ];
    let editions = Editions::of(&table, 2).unwrap();
    assert_eq!(editions.latest, 1994);
    assert_eq!(editions.new_since, 1992);
    let h = event_histories(&table, 2);
    assert_eq!(status_of(&h, "Doubles"), EventStatus::ActiveNew);
    assert_eq!(status_of(&h, "Singles"), EventStatus::Active);
  }

  #[test]
  fn window_is_clamped() {
    let table = vec![row(2018, "Luge", "Singles"), row(2022, "Luge", "Singles")];
    assert_eq!(Editions::of(&table, 0).unwrap().new_since, 2022);
    assert_eq!(Editions::of(&table, 9).unwrap().new_since, 2018);
    assert!(Editions::of(&[], 2).is_none());
    assert!(event_histories(&[], 2).is_empty());
  }
}
