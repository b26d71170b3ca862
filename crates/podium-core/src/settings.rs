//! Tunables for the dashboard computations, deserialised from the
//! `[dashboard]` table of the server configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
  /// How many of the most recent editions count as "new" for an event.
  pub recency_editions: usize,
  /// Length of the top-nations ranking.
  pub top_nations:      usize,
  /// Countries offered by the country selector, besides "All".
  pub country_choices:  usize,
  /// Treemap levels visible before drilling down.
  pub treemap_depth:    u8,
  /// Root label of the program-history tree.
  pub history_root:     String,
  /// Root label of the prediction sunburst.
  pub prediction_root:  String,
}

impl Default for DashboardSettings {
  fn default() -> Self {
    Self {
      recency_editions: 2,
      top_nations:      5,
      country_choices:  10,
      treemap_depth:    3,
      history_root:     "❄️ Winter Olympics".to_string(),
      prediction_root:  "Team China · Milan 2026".to_string(),
    }
  }
}
