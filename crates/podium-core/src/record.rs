//! Medal records: one row per awarded medal.
//!
//! Records are produced once by the loader, already normalised, and are
//! never mutated afterwards. Every derived structure borrows from them.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Placeholder for a record whose event cell is empty.
pub const UNKNOWN_EVENT: &str = "Unknown Event";

/// Placeholder for a record whose athlete cell is empty.
pub const UNKNOWN_ATHLETE: &str = "Unknown Athlete";

/// Label used for the medal tier of a record with no recognised medal.
pub const NO_MEDAL: &str = "No Medal";

// ─── Medal ───────────────────────────────────────────────────────────────────

/// The medal tier. Ordering follows prestige: `Bronze < Silver < Gold`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
pub enum Medal {
  Bronze,
  Silver,
  Gold,
}

impl Medal {
  /// Ranking weight of the tier.
  pub fn score(self) -> u32 {
    match self {
      Self::Gold => 3,
      Self::Silver => 2,
      Self::Bronze => 1,
    }
  }

  /// Parse a raw medal cell. Anything other than the exact tier names is
  /// treated as "no medal" rather than an error.
  pub fn from_label(raw: &str) -> Option<Self> { raw.trim().parse().ok() }
}

/// Score of an optional tier; a missing or unrecognised medal scores zero.
pub fn medal_score(medal: Option<Medal>) -> u32 {
  medal.map(Medal::score).unwrap_or(0)
}

/// Strip the parenthetical suffix from a discipline label:
/// `"Skiing (Alpine)"` becomes `"Skiing"`.
pub fn clean_discipline(raw: &str) -> String {
  raw.split('(').next().unwrap_or_default().trim().to_string()
}

// ─── MedalRecord ─────────────────────────────────────────────────────────────

/// A single medal award, normalised at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalRecord {
  /// Games edition.
  pub year:             i32,
  /// Discipline label as it appears in the source.
  pub discipline:       String,
  /// `discipline` without its parenthetical suffix.
  pub discipline_clean: String,
  /// Three-letter national olympic committee code.
  pub noc:              String,
  /// Display name for `noc`; the code itself when no name is known.
  pub country:          String,
  pub medal:            Option<Medal>,
  /// Derived from `medal`; see [`medal_score`].
  pub score:            u32,
  pub event:            String,
  pub athlete:          String,
}

impl MedalRecord {
  /// Build a record from already-resolved cells, deriving the cleaned
  /// discipline, the score, and the placeholder event/athlete names.
  pub fn new(
    year: i32,
    discipline: impl Into<String>,
    noc: impl Into<String>,
    country: impl Into<String>,
    medal: Option<Medal>,
    event: Option<String>,
    athlete: Option<String>,
  ) -> Self {
    let discipline = discipline.into();
    Self {
      year,
      discipline_clean: clean_discipline(&discipline),
      discipline,
      noc: noc.into(),
      country: country.into(),
      medal,
      score: medal_score(medal),
      event: non_empty(event).unwrap_or_else(|| UNKNOWN_EVENT.to_string()),
      athlete: non_empty(athlete)
        .unwrap_or_else(|| UNKNOWN_ATHLETE.to_string()),
    }
  }

  /// The label of the medal tier level in the treemap.
  pub fn medal_label(&self) -> String {
    self
      .medal
      .map(|m| m.to_string())
      .unwrap_or_else(|| NO_MEDAL.to_string())
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) mod test_helpers {
  use super::{Medal, MedalRecord};

  /// A record with `noc` equal to `country` and the given event/athlete.
  pub fn medal(
    year: i32,
    country: &str,
    medal: Option<Medal>,
    discipline: &str,
    event: &str,
    athlete: &str,
  ) -> MedalRecord {
    MedalRecord::new(
      year,
      discipline,
      country,
      country,
      medal,
      Some(event.to_string()),
      Some(athlete.to_string()),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn score_is_monotonic_with_prestige() {
    let tiers = [None, Some(Medal::Bronze), Some(Medal::Silver), Some(Medal::Gold)];
    for pair in tiers.windows(2) {
      assert!(medal_score(pair[0]) < medal_score(pair[1]), "{pair:?}");
    }
    for other in [None, Some(Medal::Bronze), Some(Medal::Silver)] {
      assert!(medal_score(Some(Medal::Gold)) > medal_score(other));
    }
  }

  #[test]
  fn unrecognised_medal_labels_score_zero() {
    assert_eq!(Medal::from_label("Gold"), Some(Medal::Gold));
    assert_eq!(Medal::from_label(" Silver "), Some(Medal::Silver));
    assert_eq!(Medal::from_label("gold"), None);
    assert_eq!(Medal::from_label(""), None);
    assert_eq!(medal_score(Medal::from_label("Participation")), 0);
  }

  #[test]
  fn discipline_suffix_is_stripped_at_first_paren() {
    assert_eq!(clean_discipline("Skiing (Alpine)"), "Skiing");
    assert_eq!(clean_discipline("Skating (Figure) (Pairs)"), "Skating");
    assert_eq!(clean_discipline("Curling"), "Curling");
    assert_eq!(clean_discipline("  Biathlon  "), "Biathlon");
  }

  #[test]
  fn missing_event_and_athlete_get_placeholders() {
    let r = MedalRecord::new(
      2022,
      "Skiing (Alpine)",
      "NOR",
      "Norway",
      Some(Medal::Gold),
      None,
      Some("   ".into()),
    );
    assert_eq!(r.discipline_clean, "Skiing");
    assert_eq!(r.score, 3);
    assert_eq!(r.event, UNKNOWN_EVENT);
    assert_eq!(r.athlete, UNKNOWN_ATHLETE);
    assert_eq!(r.medal_label(), "Gold");
  }
}
