//! Hierarchy builders: the medal treemap, the program-history tree, and the
//! prediction sunburst.
//!
//! Every builder returns a single-rooted [`Hierarchy`]; empty input yields
//! the root alone.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
  filter::CountryFilter,
  hierarchy::{Hierarchy, HierarchyBuilder, LabelTree, NodeRole},
  history::{EventHistory, event_histories},
  prediction::AthletePrediction,
  record::MedalRecord,
  selection::ClickTarget,
  style::{
    ColorStop, NodeStyle, medal_color_scale, period_text, sport_color,
    status_label, status_style,
  },
};

/// Root label of the medal treemap when no country is selected.
pub const ALL_EVENTS: &str = "All Events";

// ─── Medal treemap ───────────────────────────────────────────────────────────

/// The medal hierarchy plus what the renderer needs to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treemap {
  pub hierarchy:   Hierarchy,
  /// Levels visible before the user drills down.
  pub max_depth:   u8,
  /// Node values map onto this scale.
  pub color_scale: Vec<ColorStop>,
}

#[derive(Debug, Clone, Copy)]
enum Level {
  Discipline,
  Country,
  MedalTier,
  Event,
  Athlete,
}

impl Level {
  fn role(self) -> NodeRole {
    match self {
      Self::Discipline => NodeRole::Discipline,
      Self::Country => NodeRole::Country,
      Self::MedalTier => NodeRole::MedalTier,
      Self::Event => NodeRole::Event,
      Self::Athlete => NodeRole::Athlete,
    }
  }

  fn segment(self, record: &MedalRecord) -> String {
    match self {
      Self::Discipline => record.discipline_clean.clone(),
      Self::Country => record.country.clone(),
      Self::MedalTier => record.medal_label(),
      Self::Event => record.event.clone(),
      Self::Athlete => record.athlete.clone(),
    }
  }
}

const ALL_COUNTRIES_PATH: [Level; 5] = [
  Level::Discipline,
  Level::Country,
  Level::MedalTier,
  Level::Event,
  Level::Athlete,
];

/// With a single country selected the country level would be a lone child,
/// so it is dropped and the root carries the country's name instead.
const ONE_COUNTRY_PATH: [Level; 4] =
  [Level::Discipline, Level::MedalTier, Level::Event, Level::Athlete];

/// Build the treemap for an already-filtered subset.
///
/// Each record adds its score to every node on its path; records sharing a
/// full path collapse into one leaf.
pub fn medal_hierarchy<'a, I>(
  subset: I,
  country: &CountryFilter,
  max_depth: u8,
) -> Treemap
where
  I: IntoIterator<Item = &'a MedalRecord>,
{
  let (root, path): (&str, &[Level]) = match country.as_country() {
    None => (ALL_EVENTS, &ALL_COUNTRIES_PATH[..]),
    Some(name) => (name, &ONE_COUNTRY_PATH[..]),
  };

  let mut builder = HierarchyBuilder::new(root, root);
  for record in subset {
    let score = u64::from(record.score);
    let mut node = HierarchyBuilder::ROOT;
    builder.add_value(node, score);
    for level in path {
      let segment = level.segment(record);
      let id = builder.child_id(node, &segment);
      node = builder.child(node, id, segment, level.role());
      builder.add_value(node, score);
    }
  }

  Treemap {
    hierarchy: builder.finish(),
    max_depth,
    color_scale: medal_color_scale(),
  }
}

// ─── Program history ─────────────────────────────────────────────────────────

/// The discipline → event tree of the whole competition, with the flat
/// event list it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramHistory {
  pub tree:   LabelTree,
  pub events: Vec<EventHistory>,
}

/// Build the program history from the full, unfiltered table.
pub fn program_history(
  full_table: &[MedalRecord],
  recency_editions: usize,
  root: &str,
) -> ProgramHistory {
  let events = event_histories(full_table, recency_editions);
  let tree = program_hierarchy(&events, root).to_label_tree();
  ProgramHistory { tree, events }
}

/// Discipline → event hierarchy. Each event counts one; disciplines count
/// their events. Event nodes carry the status label, period, and color.
pub fn program_hierarchy(events: &[EventHistory], root: &str) -> Hierarchy {
  let mut builder = HierarchyBuilder::new(root, root);
  for history in events {
    let id = builder.child_id(HierarchyBuilder::ROOT, &history.discipline_clean);
    let discipline = builder.child(
      HierarchyBuilder::ROOT,
      id,
      history.discipline_clean.as_str(),
      NodeRole::Discipline,
    );

    let id = builder.child_id(discipline, &history.event);
    let event = builder.child(
      discipline,
      id,
      status_label(&history.event, history.status),
      NodeRole::Event,
    );
    let node = builder.node_mut(event);
    node.style = status_style(history.status);
    node.detail = Some(period_text(
      history.first_year,
      history.last_year,
      history.status,
    ));

    builder.add_value(event, 1);
    builder.add_value(discipline, 1);
    builder.add_value(HierarchyBuilder::ROOT, 1);
  }
  builder.finish()
}

// ─── Prediction sunburst ─────────────────────────────────────────────────────

/// Id of a sport node; athlete ids extend it, and athletes use it as their
/// `parent_id`.
pub fn sport_node_id(sport: &str, icon: &str) -> String {
  format!("{sport} {icon}")
}

pub fn athlete_node_id(sport: &str, icon: &str, athlete: &str) -> String {
  format!("{} - {athlete}", sport_node_id(sport, icon))
}

/// Root → Sport → Athlete. Sport values are the sum of their athletes'
/// predictions; sport colors follow first appearance, and athletes inherit
/// their sport's color.
pub fn sunburst(rows: &[AthletePrediction], root: &str) -> Hierarchy {
  let mut builder = HierarchyBuilder::new(root, root);
  let mut colors: HashMap<&str, &'static str> = HashMap::new();

  for row in rows {
    let next = colors.len();
    let color = *colors
      .entry(row.sport.as_str())
      .or_insert_with(|| sport_color(next));

    let sport = builder.child(
      HierarchyBuilder::ROOT,
      sport_node_id(&row.sport, &row.icon),
      row.sport.as_str(),
      NodeRole::Sport,
    );
    let node = builder.node_mut(sport);
    node.style = NodeStyle::filled(color);
    node.target = Some(ClickTarget::Sport {
      sport: row.sport.clone(),
      icon:  row.icon.clone(),
    });

    let athlete = builder.child(
      sport,
      athlete_node_id(&row.sport, &row.icon, &row.athlete),
      row.athlete.as_str(),
      NodeRole::Athlete,
    );
    let node = builder.node_mut(athlete);
    node.style = NodeStyle::filled(color);
    node.detail = Some(row.description.clone()).filter(|d| !d.is_empty());
    node.target = Some(ClickTarget::Athlete {
      sport:   row.sport.clone(),
      icon:    row.icon.clone(),
      athlete: row.athlete.clone(),
    });

    let medals = u64::from(row.medals);
    builder.add_value(athlete, medals);
    builder.add_value(sport, medals);
    builder.add_value(HierarchyBuilder::ROOT, medals);
  }
  builder.finish()
}
