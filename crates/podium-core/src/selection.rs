//! Selection resolver: maps chart clicks onto prediction records.
//!
//! The sunburst builder stamps every sport and athlete node with a typed
//! [`ClickTarget`], so a renderer that echoes the target back is resolved
//! without guessing. Renderers that can only report the clicked label or id
//! string go through [`resolve_label`], whose precedence is fixed:
//!
//! 1. exact sport name,
//! 2. first sport (in source order) whose name occurs inside the label,
//!    which covers composite ids such as `"Snowboard 🏂"`,
//! 3. exact athlete name,
//! 4. otherwise nothing; the caller keeps its previous state.
//!
//! The selection itself is a two-state machine passed by value between
//! requests: [`SelectionState::Default`] until the first successful click,
//! [`SelectionState::Selected`] afterwards. There is no way back to
//! `Default`.

use serde::{Deserialize, Serialize};

use crate::prediction::AthletePrediction;

// ─── Click payloads ──────────────────────────────────────────────────────────

/// What a hierarchy node selects when clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClickTarget {
  Sport {
    sport: String,
    icon:  String,
  },
  Athlete {
    sport:   String,
    icon:    String,
    athlete: String,
  },
  /// A node with no typed meaning; resolved through its raw label.
  Unknown { raw: String },
}

/// A click event reported by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Click {
  /// The typed target stamped on the clicked node.
  Target(ClickTarget),
  /// Only the clicked label or id string is known.
  Label(String),
}

// ─── State ───────────────────────────────────────────────────────────────────

/// A resolved selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
  /// A whole sport roster.
  Sport { sport: String },
  /// A single athlete entry.
  Athlete { sport: String, athlete: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
  /// No click received yet; shows the first sport of the source.
  #[default]
  Default,
  Selected { selection: Selection },
}

impl SelectionState {
  /// Feed a click into the state machine. A click that resolves moves to
  /// `Selected`; one that matches nothing leaves the state untouched.
  pub fn apply(self, click: &Click, table: &[AthletePrediction]) -> Self {
    match resolve(click, table) {
      Some(selection) => Self::Selected { selection },
      None => self,
    }
  }

  /// The detail panel for this state. `None` only when `table` is empty.
  pub fn panel(&self, table: &[AthletePrediction]) -> Option<DetailPanel> {
    let resolved = match self {
      Self::Default => None,
      Self::Selected {
        selection: Selection::Sport { sport },
      } => sport_panel(sport, table),
      Self::Selected {
        selection: Selection::Athlete { sport, athlete },
      } => athlete_panel(sport, athlete, table),
    };
    resolved.or_else(|| default_panel(table))
  }
}

// ─── Resolution ──────────────────────────────────────────────────────────────

/// Resolve a click against `table`; `None` is a miss.
pub fn resolve(click: &Click, table: &[AthletePrediction]) -> Option<Selection> {
  match click {
    Click::Label(label) => resolve_label(label, table),
    Click::Target(ClickTarget::Unknown { raw }) => resolve_label(raw, table),
    Click::Target(ClickTarget::Sport { sport, icon }) => table
      .iter()
      .find(|r| r.sport == *sport && r.icon == *icon)
      .map(|r| Selection::Sport {
        sport: r.sport.clone(),
      }),
    Click::Target(ClickTarget::Athlete {
      sport,
      icon,
      athlete,
    }) => table
      .iter()
      .find(|r| r.sport == *sport && r.icon == *icon && r.athlete == *athlete)
      .map(|r| Selection::Athlete {
        sport:   r.sport.clone(),
        athlete: r.athlete.clone(),
      }),
  }
}

/// Resolve a bare label or id string; see the module docs for precedence.
pub fn resolve_label(label: &str, table: &[AthletePrediction]) -> Option<Selection> {
  if label.is_empty() {
    return None;
  }
  let sports = table.iter().filter(|r| !r.sport.is_empty());

  let by_sport = sports
    .clone()
    .find(|r| r.sport == label)
    .or_else(|| sports.clone().find(|r| label.contains(r.sport.as_str())));
  if let Some(row) = by_sport {
    return Some(Selection::Sport {
      sport: row.sport.clone(),
    });
  }

  table
    .iter()
    .find(|r| !r.athlete.is_empty() && r.athlete == label)
    .map(|r| Selection::Athlete {
      sport:   r.sport.clone(),
      athlete: r.athlete.clone(),
    })
}

// ─── Detail panel ────────────────────────────────────────────────────────────

/// What the detail card shows for the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailPanel {
  pub sport:        String,
  pub icon:         String,
  /// Sum over the roster for a sport; over the athlete's rows otherwise.
  pub total_medals: u32,
  pub athletes:     Vec<AthletePrediction>,
}

fn default_panel(table: &[AthletePrediction]) -> Option<DetailPanel> {
  sport_panel(&table.first()?.sport, table)
}

fn sport_panel(sport: &str, table: &[AthletePrediction]) -> Option<DetailPanel> {
  let athletes: Vec<AthletePrediction> =
    table.iter().filter(|r| r.sport == sport).cloned().collect();
  let first = athletes.first()?;
  Some(DetailPanel {
    sport:        first.sport.clone(),
    icon:         first.icon.clone(),
    total_medals: athletes.iter().map(|a| a.medals).sum(),
    athletes,
  })
}

fn athlete_panel(
  sport: &str,
  athlete: &str,
  table: &[AthletePrediction],
) -> Option<DetailPanel> {
  let athletes: Vec<AthletePrediction> = table
    .iter()
    .filter(|r| r.sport == sport && r.athlete == athlete)
    .cloned()
    .collect();
  let first = athletes.first()?;
  Some(DetailPanel {
    sport:        first.sport.clone(),
    icon:         first.icon.clone(),
    total_medals: athletes.iter().map(|a| a.medals).sum(),
    athletes,
  })
}
