//! Presentation contract handed to the renderer alongside each hierarchy.
//!
//! Nothing here affects which rows end up where; it only names the colors
//! and label decorations the charts are expected to use.

use serde::{Deserialize, Serialize};

use crate::history::EventStatus;

/// Pastel colors assigned to prediction sports in order of first appearance.
pub const SPORT_PALETTE: [&str; 8] = [
  "#FFB3B3", "#FFD6A5", "#FFF59D", "#C8E6C9", "#BBDEFB", "#D1C4E9", "#F8BBD0",
  "#B2EBF2",
];

/// Colors attached to a single hierarchy node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub color:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub label_color: Option<String>,
}

impl NodeStyle {
  pub fn filled(color: &str) -> Self {
    Self {
      color:       Some(color.to_string()),
      label_color: None,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.color.is_none() && self.label_color.is_none()
  }
}

/// A stop on a continuous color scale; `at` is in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
  pub at:    f32,
  pub color: String,
}

/// The treemap's value → color scale: ice blue where bronze dominates, white
/// around silver, gold at the top.
pub fn medal_color_scale() -> Vec<ColorStop> {
  [
    (0.0, "rgba(173, 216, 230, 0.5)"),
    (0.5, "rgba(255, 255, 255, 0.8)"),
    (1.0, "#FFD700"),
  ]
  .into_iter()
  .map(|(at, color)| ColorStop {
    at,
    color: color.to_string(),
  })
  .collect()
}

/// Palette entry for the `index`-th distinct sport.
pub fn sport_color(index: usize) -> &'static str {
  SPORT_PALETTE[index % SPORT_PALETTE.len()]
}

// ─── Program history ─────────────────────────────────────────────────────────

pub fn status_style(status: EventStatus) -> NodeStyle {
  let (color, label) = match status {
    EventStatus::ActiveNew => ("#00FF7F", "#fff"),
    EventStatus::Active => ("#87CEFA", "#fff"),
    EventStatus::Discontinued => ("#FF6347", "#aaa"),
  };
  NodeStyle {
    color:       Some(color.to_string()),
    label_color: Some(label.to_string()),
  }
}

/// Event label with its status glyph: `✨` for new events, `❌` for
/// discontinued ones.
pub fn status_label(event: &str, status: EventStatus) -> String {
  match status {
    EventStatus::ActiveNew => format!("✨ {event}"),
    EventStatus::Active => event.to_string(),
    EventStatus::Discontinued => format!("❌ {event}"),
  }
}

/// Tooltip text: `"1936 - Present"` or `"1924 - 1948"`.
pub fn period_text(first_year: i32, last_year: i32, status: EventStatus) -> String {
  if status.is_active() {
    format!("{first_year} - Present")
  } else {
    format!("{first_year} - {last_year}")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn palette_wraps_around() {
    assert_eq!(sport_color(0), "#FFB3B3");
    assert_eq!(sport_color(8), "#FFB3B3");
    assert_eq!(sport_color(9), "#FFD6A5");
  }

  #[test]
  fn medal_scale_runs_bronze_to_gold() {
    let scale = medal_color_scale();
    assert_eq!(scale.len(), 3);
    assert_eq!(scale[0].at, 0.0);
    assert_eq!(scale[2].color, "#FFD700");
  }

  #[test]
  fn labels_and_periods_follow_status() {
    assert_eq!(status_label("Big Air", EventStatus::ActiveNew), "✨ Big Air");
    assert_eq!(status_label("Downhill", EventStatus::Active), "Downhill");
    assert_eq!(
      status_label("Military Patrol", EventStatus::Discontinued),
      "❌ Military Patrol"
    );
    assert_eq!(period_text(1936, 2022, EventStatus::Active), "1936 - Present");
    assert_eq!(
      period_text(1924, 1948, EventStatus::Discontinued),
      "1924 - 1948"
    );
  }
}
