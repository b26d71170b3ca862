//! Athlete predictions for the upcoming games and their per-sport rollup.

use serde::{Deserialize, Serialize};

/// One predicted athlete entry from the prediction source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthletePrediction {
  pub sport:       String,
  /// Glyph shown next to the sport name (usually an emoji).
  pub icon:        String,
  pub athlete:     String,
  pub description: String,
  /// URL or local path of the athlete's portrait.
  pub image_ref:   Option<String>,
  /// Predicted number of medals.
  pub medals:      u32,
}

/// Total predicted medals for one `(sport, icon)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportAggregate {
  pub sport:        String,
  pub icon:         String,
  pub total_medals: u32,
}

/// Roll predictions up by `(sport, icon)`, in order of first appearance.
pub fn sport_aggregates(rows: &[AthletePrediction]) -> Vec<SportAggregate> {
  let mut out: Vec<SportAggregate> = Vec::new();
  for row in rows {
    match out
      .iter_mut()
      .find(|agg| agg.sport == row.sport && agg.icon == row.icon)
    {
      Some(agg) => agg.total_medals += row.medals,
      None => out.push(SportAggregate {
        sport:        row.sport.clone(),
        icon:         row.icon.clone(),
        total_medals: row.medals,
      }),
    }
  }
  out
}


#[cfg(test)]
mod tests {
  use super::{test_helpers::prediction, *};

  #[test]
  fn aggregates_sum_per_sport_in_first_seen_order() {
    let rows = vec![
      prediction("Freestyle Skiing", "⛷️", "Gu Ailing", 3),
      prediction("Speed Skating", "⛸️", "Ning Zhongyan", 1),
      prediction("Freestyle Skiing", "⛷️", "Su Yiming", 2),
    ];
    let aggs = sport_aggregates(&rows);
    assert_eq!(aggs.len(), 2);
    assert_eq!(aggs[0].sport, "Freestyle Skiing");
    assert_eq!(aggs[0].total_medals, 5);
    assert_eq!(aggs[1].sport, "Speed Skating");
    assert_eq!(aggs[1].total_medals, 1);
  }

  #[test]
  fn same_sport_with_different_icons_stays_separate() {
    let rows = vec![
      prediction("Snowboard", "🏂", "A", 1),
      prediction("Snowboard", "❄️", "B", 1),
    ];
    assert_eq!(sport_aggregates(&rows).len(), 2);
  }
}
