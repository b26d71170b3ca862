//! Rollups over medal rows: rankings, per-year trends, and the default
//! trend target.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::record::MedalRecord;

// ─── Keys ────────────────────────────────────────────────────────────────────

/// The column rows are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
  #[default]
  Country,
  Noc,
  Discipline,
  Event,
  Athlete,
  Year,
}

impl GroupKey {
  pub fn value_of(self, record: &MedalRecord) -> String {
    match self {
      Self::Country => record.country.clone(),
      Self::Noc => record.noc.clone(),
      Self::Discipline => record.discipline_clean.clone(),
      Self::Event => record.event.clone(),
      Self::Athlete => record.athlete.clone(),
      Self::Year => record.year.to_string(),
    }
  }
}

/// What is summed inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKey {
  /// Medal score (Gold=3, Silver=2, Bronze=1).
  #[default]
  Score,
  /// Number of rows.
  Count,
}

impl ValueKey {
  pub fn value_of(self, record: &MedalRecord) -> u64 {
    match self {
      Self::Score => u64::from(record.score),
      Self::Count => 1,
    }
  }
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// One group and its summed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityTotal {
  pub entity: String,
  pub total:  u64,
}

/// One point of a per-year score series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
  pub year:  i32,
  pub score: u64,
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Group `rows` by `group`, sum `value`, and return the `limit` largest
/// groups in descending order. Equal totals keep the order in which their
/// groups were first encountered.
pub fn top_entities<'a, I>(
  rows: I,
  group: GroupKey,
  value: ValueKey,
  limit: usize,
) -> Vec<EntityTotal>
where
  I: IntoIterator<Item = &'a MedalRecord>,
{
  let mut totals: Vec<EntityTotal> = Vec::new();
  let mut index: HashMap<String, usize> = HashMap::new();

  for record in rows {
    let key = group.value_of(record);
    let amount = value.value_of(record);
    match index.get(&key) {
      Some(&i) => totals[i].total += amount,
      None => {
        index.insert(key.clone(), totals.len());
        totals.push(EntityTotal {
          entity: key,
          total:  amount,
        });
      }
    }
  }

  // `sort_by` is stable, so ties stay in first-encountered order.
  totals.sort_by(|a, b| b.total.cmp(&a.total));
  totals.truncate(limit);
  totals
}

/// Summed score per year for rows whose `group` equals `entity`, ascending
/// by year. Pass the full table: the series spans every edition regardless
/// of the active year filter.
pub fn trend_series<'a, I>(
  full_table: I,
  group: GroupKey,
  entity: &str,
) -> Vec<TrendPoint>
where
  I: IntoIterator<Item = &'a MedalRecord>,
{
  let mut by_year: BTreeMap<i32, u64> = BTreeMap::new();
  for record in full_table {
    if group.value_of(record) == entity {
      *by_year.entry(record.year).or_default() += u64::from(record.score);
    }
  }
  by_year
    .into_iter()
    .map(|(year, score)| TrendPoint { year, score })
    .collect()
}

/// The country with the highest summed score inside `subset` (normally the
/// year-scoped rows), which may differ from the all-time leader.
pub fn default_trend_target<'a, I>(subset: I) -> Option<String>
where
  I: IntoIterator<Item = &'a MedalRecord>,
{
  top_entities(subset, GroupKey::Country, ValueKey::Score, 1)
    .into_iter()
    .next()
    .map(|t| t.entity)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::record::{Medal, test_helpers::medal};

  fn table() -> Vec<MedalRecord> {
    vec![
      medal(2018, "Norway", Some(Medal::Gold), "Biathlon", "Sprint", "A"),
      medal(2022, "Germany", Some(Medal::Gold), "Luge", "Singles", "B"),
      medal(2022, "Norway", Some(Medal::Silver), "Biathlon", "Sprint", "C"),
      medal(2022, "Norway", Some(Medal::Bronze), "Biathlon", "Relay", "D"),
      medal(2022, "Canada", Some(Medal::Silver), "Curling", "Men", "E"),
      medal(2022, "Austria", Some(Medal::Gold), "Skiing", "Downhill", "F"),
    ]
  }

  #[test]
  fn top_entities_sums_and_ranks_descending() {
    let t = table();
    let rows: Vec<_> = t.iter().filter(|r| r.year == 2022).collect();
    let top = top_entities(rows, GroupKey::Country, ValueKey::Score, 5);
    let ranked: Vec<_> =
      top.iter().map(|t| (t.entity.as_str(), t.total)).collect();
    assert_eq!(
      ranked,
      [("Germany", 3), ("Norway", 3), ("Austria", 3), ("Canada", 2)]
    );
  }

  #[test]
  fn top_entities_respects_limit_and_counts() {
    let t = table();
    let top = top_entities(&t, GroupKey::Country, ValueKey::Count, 1);
    assert_eq!(top, [EntityTotal {
      entity: "Norway".into(),
      total:  3,
    }]);
  }

  #[test]
  fn top_entities_is_deterministic_and_sums_are_order_independent() {
    let t = table();
    let first = top_entities(&t, GroupKey::Country, ValueKey::Score, 10);
    for _ in 0..5 {
      assert_eq!(top_entities(&t, GroupKey::Country, ValueKey::Score, 10), first);
    }

    let mut reversed = t.clone();
    reversed.reverse();
    let mut a = first.clone();
    let mut b = top_entities(&reversed, GroupKey::Country, ValueKey::Score, 10);
    a.sort_by(|x, y| x.entity.cmp(&y.entity));
    b.sort_by(|x, y| x.entity.cmp(&y.entity));
    assert_eq!(a, b);
  }

  #[test]
  fn trend_series_covers_all_years_ascending() {
    let t = table();
    let series = trend_series(&t, GroupKey::Country, "Norway");
    assert_eq!(series, [
      TrendPoint {
        year:  2018,
        score: 3,
      },
      TrendPoint {
        year:  2022,
        score: 3,
      },
    ]);
    assert!(trend_series(&t, GroupKey::Country, "Atlantis").is_empty());
  }

  #[test]
  fn default_target_uses_the_year_scoped_subset() {
    let t = vec![
      medal(2018, "Norway", Some(Medal::Gold), "Biathlon", "Sprint", "A"),
      medal(2018, "Norway", Some(Medal::Gold), "Biathlon", "Relay", "B"),
      medal(2022, "Norway", Some(Medal::Bronze), "Biathlon", "Sprint", "C"),
      medal(2022, "Germany", Some(Medal::Silver), "Luge", "Singles", "D"),
    ];
    let all_time = default_trend_target(&t);
    assert_eq!(all_time.as_deref(), Some("Norway"));

    let year: Vec<_> = t.iter().filter(|r| r.year == 2022).collect();
    assert_eq!(default_trend_target(year).as_deref(), Some("Germany"));
    assert_eq!(default_trend_target(Vec::<&MedalRecord>::new()), None);
  }
}
