//! Hierarchy types shared by the treemap, program-history tree, and
//! sunburst.
//!
//! A [`Hierarchy`] is the flat `id / parent_id / value` table most charting
//! libraries accept. [`Hierarchy::to_label_tree`] nests it for tree-style
//! charts. Structures are built through [`HierarchyBuilder`], which keeps ids
//! unique and every parent reference valid. A hierarchy is never empty: its
//! first node is the root, and deserialisation rejects any table that breaks
//! the tree invariants.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  selection::ClickTarget,
  style::NodeStyle,
};

/// Separator between ancestor identifiers in path-derived ids.
pub const ID_SEPARATOR: char = '/';

/// Percent-encode `%` and the separator so an escaped segment never contains
/// [`ID_SEPARATOR`]; distinct paths then always yield distinct ids.
pub fn escape_segment(segment: &str) -> String {
  let mut out = String::with_capacity(segment.len());
  for c in segment.chars() {
    match c {
      '%' => out.push_str("%25"),
      ID_SEPARATOR => out.push_str("%2F"),
      c => out.push(c),
    }
  }
  out
}

// ─── Nodes ───────────────────────────────────────────────────────────────────

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
  Root,
  Discipline,
  Country,
  MedalTier,
  Event,
  Athlete,
  Sport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
  /// Unique within the hierarchy.
  pub id:        String,
  pub label:     String,
  /// Empty for the root.
  pub parent_id: String,
  /// Score for medal charts, predicted medal count for the sunburst, event
  /// count for the program history.
  pub value:     u64,
  pub role:      NodeRole,
  #[serde(default, skip_serializing_if = "NodeStyle::is_empty")]
  pub style:     NodeStyle,
  /// Tooltip text.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub detail:    Option<String>,
  /// What a click on this node selects; echoed back by the renderer.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target:    Option<ClickTarget>,
}

impl HierarchyNode {
  pub fn is_root(&self) -> bool { self.parent_id.is_empty() }
}

// ─── Flat hierarchy ──────────────────────────────────────────────────────────

/// A single-rooted tree stored as a flat node list, root first, children
/// after their parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHierarchy")]
pub struct Hierarchy {
  nodes: Vec<HierarchyNode>,
}

/// Unchecked wire form of [`Hierarchy`].
#[derive(Deserialize)]
struct RawHierarchy {
  nodes: Vec<HierarchyNode>,
}

impl TryFrom<RawHierarchy> for Hierarchy {
  type Error = Error;

  fn try_from(raw: RawHierarchy) -> Result<Self> {
    let hierarchy = Self { nodes: raw.nodes };
    hierarchy.validate()?;
    match hierarchy.nodes.first() {
      Some(first) if first.is_root() => Ok(hierarchy),
      Some(first) => Err(Error::RootNotFirst(first.id.clone())),
      None => Err(Error::MissingRoot),
    }
  }
}

impl Hierarchy {
  /// The root node; always the first node.
  pub fn root(&self) -> &HierarchyNode { &self.nodes[0] }

  pub fn nodes(&self) -> &[HierarchyNode] { &self.nodes }

  pub fn len(&self) -> usize { self.nodes.len() }

  pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

  pub fn get(&self, id: &str) -> Option<&HierarchyNode> {
    self.nodes.iter().find(|n| n.id == id)
  }

  pub fn children<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Iterator<Item = &'a HierarchyNode> + 'a {
    self
      .nodes
      .iter()
      .filter(move |n| !n.is_root() && n.parent_id == id)
  }

  /// Check the tree invariants: exactly one root, unique ids, every parent
  /// reference resolvable, every node reachable from the root.
  pub fn validate(&self) -> Result<()> {
    let roots: Vec<&HierarchyNode> =
      self.nodes.iter().filter(|n| n.is_root()).collect();
    let root = match roots.as_slice() {
      [] => return Err(Error::MissingRoot),
      [root] => *root,
      many => {
        return Err(Error::MultipleRoots(
          many.iter().map(|n| n.id.clone()).collect(),
        ));
      }
    };

    let mut ids = HashSet::new();
    for node in &self.nodes {
      if !ids.insert(node.id.as_str()) {
        return Err(Error::DuplicateId(node.id.clone()));
      }
    }
    for node in self.nodes.iter().filter(|n| !n.is_root()) {
      if !ids.contains(node.parent_id.as_str()) {
        return Err(Error::DanglingParent {
          id:        node.id.clone(),
          parent_id: node.parent_id.clone(),
        });
      }
    }

    let by_parent = self.child_index();
    let mut seen = HashSet::from([root.id.as_str()]);
    let mut queue = VecDeque::from([root.id.as_str()]);
    while let Some(id) = queue.pop_front() {
      for &child in by_parent.get(id).into_iter().flatten() {
        let child_id = self.nodes[child].id.as_str();
        if seen.insert(child_id) {
          queue.push_back(child_id);
        }
      }
    }
    match self.nodes.iter().find(|n| !seen.contains(n.id.as_str())) {
      Some(orphan) => Err(Error::Unreachable(orphan.id.clone())),
      None => Ok(()),
    }
  }

  /// Nest the flat table into a [`LabelTree`] rooted at the root node.
  pub fn to_label_tree(&self) -> LabelTree {
    let by_parent = self.child_index();
    self.nest(0, &by_parent)
  }

  fn nest(&self, index: usize, by_parent: &HashMap<&str, Vec<usize>>) -> LabelTree {
    let node = &self.nodes[index];
    LabelTree {
      name:     node.label.clone(),
      value:    node.value,
      style:    node.style.clone(),
      detail:   node.detail.clone(),
      children: by_parent
        .get(node.id.as_str())
        .into_iter()
        .flatten()
        .map(|&child| self.nest(child, by_parent))
        .collect(),
    }
  }

  fn child_index(&self) -> HashMap<&str, Vec<usize>> {
    let mut by_parent: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, node) in self.nodes.iter().enumerate() {
      if !node.is_root() {
        by_parent.entry(node.parent_id.as_str()).or_default().push(i);
      }
    }
    by_parent
  }
}

// ─── Nested tree ─────────────────────────────────────────────────────────────

/// A nested name/value tree, the shape tree charts consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelTree {
  pub name:     String,
  pub value:    u64,
  #[serde(default, skip_serializing_if = "NodeStyle::is_empty")]
  pub style:    NodeStyle,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub detail:   Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<LabelTree>,
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Incremental construction of a [`Hierarchy`]. Nodes are addressed by their
/// position; requesting an existing child id under the same parent returns
/// the existing node.
pub struct HierarchyBuilder {
  nodes: Vec<HierarchyNode>,
  index: HashMap<String, usize>,
}

impl HierarchyBuilder {
  /// Start a tree whose root has the given id and label.
  pub fn new(root_id: impl Into<String>, root_label: impl Into<String>) -> Self {
    let root = HierarchyNode {
      id:        root_id.into(),
      label:     root_label.into(),
      parent_id: String::new(),
      value:     0,
      role:      NodeRole::Root,
      style:     NodeStyle::default(),
      detail:    None,
      target:    None,
    };
    let index = HashMap::from([(root.id.clone(), 0)]);
    Self {
      nodes: vec![root],
      index,
    }
  }

  pub const ROOT: usize = 0;

  /// The child of `parent` with id `id`, created with `label` and `role` if
  /// it does not exist yet.
  ///
  /// If `id` is already taken by a node under a different parent, the new
  /// node gets `id` with a `#n` suffix instead, so ids stay unique and no
  /// row is merged into another parent's subtree.
  pub fn child(
    &mut self,
    parent: usize,
    id: String,
    label: impl Into<String>,
    role: NodeRole,
  ) -> usize {
    let parent_id = self.nodes[parent].id.clone();
    let id = match self.index.get(&id) {
      Some(&existing) if self.nodes[existing].parent_id == parent_id => {
        return existing;
      }
      Some(_) => match self.free_id(&id, &parent_id) {
        Ok(free) => free,
        Err(existing) => return existing,
      },
      None => id,
    };
    let position = self.nodes.len();
    self.index.insert(id.clone(), position);
    self.nodes.push(HierarchyNode {
      id,
      label: label.into(),
      parent_id,
      value: 0,
      role,
      style: NodeStyle::default(),
      detail: None,
      target: None,
    });
    position
  }

  /// First `{id}#n` not taken by another parent's node. `Err` carries an
  /// earlier suffixed node that already belongs to `parent_id`.
  fn free_id(&self, id: &str, parent_id: &str) -> std::result::Result<String, usize> {
    let mut n = 2;
    loop {
      let candidate = format!("{id}#{n}");
      match self.index.get(&candidate) {
        None => return Ok(candidate),
        Some(&taken) if self.nodes[taken].parent_id == parent_id => {
          return Err(taken);
        }
        Some(_) => n += 1,
      }
    }
  }

  /// Path-style id for a child of `parent`: the parent's id, the separator,
  /// then `segment` with the separator escaped.
  pub fn child_id(&self, parent: usize, segment: &str) -> String {
    format!(
      "{}{ID_SEPARATOR}{}",
      self.nodes[parent].id,
      escape_segment(segment)
    )
  }

  pub fn node_mut(&mut self, index: usize) -> &mut HierarchyNode {
    &mut self.nodes[index]
  }

  pub fn add_value(&mut self, index: usize, amount: u64) {
    self.nodes[index].value += amount;
  }

  pub fn finish(self) -> Hierarchy { Hierarchy { nodes: self.nodes } }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Hierarchy {
    let mut b = HierarchyBuilder::new("root", "Root");
    let id = b.child_id(HierarchyBuilder::ROOT, "a");
    let a = b.child(HierarchyBuilder::ROOT, id, "A", NodeRole::Discipline);
    let id = b.child_id(a, "b");
    let leaf = b.child(a, id, "B", NodeRole::Event);
    b.add_value(leaf, 3);
    b.add_value(a, 3);
    b.add_value(HierarchyBuilder::ROOT, 3);
    b.finish()
  }

  #[test]
  fn builder_reuses_existing_ids() {
    let mut b = HierarchyBuilder::new("root", "Root");
    let first = b.child(HierarchyBuilder::ROOT, "x".into(), "X", NodeRole::Sport);
    let again = b.child(HierarchyBuilder::ROOT, "x".into(), "X", NodeRole::Sport);
    assert_eq!(first, again);
    assert_eq!(b.finish().len(), 2);
  }

  #[test]
  fn path_ids_concatenate_ancestors() {
    let h = sample();
    assert!(h.get("root/a/b").is_some());
    assert_eq!(h.get("root/a/b").unwrap().parent_id, "root/a");
    assert_eq!(h.children("root").count(), 1);
    h.validate().unwrap();
  }

  #[test]
  fn validate_reports_broken_invariants() {
    let mut h = sample();
    h.nodes[2].parent_id = "nowhere".into();
    assert!(matches!(h.validate(), Err(Error::DanglingParent { .. })));

    let mut h = sample();
    h.nodes[2].id = "root/a".into();
    assert_eq!(h.validate(), Err(Error::DuplicateId("root/a".into())));

    let mut h = sample();
    h.nodes[1].parent_id = String::new();
    assert!(matches!(h.validate(), Err(Error::MultipleRoots(_))));

    let mut h = sample();
    h.nodes[1].parent_id = "root/a/b".into();
    assert_eq!(h.validate(), Err(Error::Unreachable("root/a".into())));
  }

  #[test]
  fn segments_escape_the_separator() {
    assert_eq!(escape_segment("Team LH/4x5km"), "Team LH%2F4x5km");
    assert_eq!(escape_segment("100%"), "100%25");
    assert_eq!(escape_segment("%2F"), "%252F");

    let mut b = HierarchyBuilder::new("root", "Root");
    let a = b.child_id(HierarchyBuilder::ROOT, "a/b");
    let a = b.child(HierarchyBuilder::ROOT, a, "a/b", NodeRole::Event);
    let nested = b.child_id(HierarchyBuilder::ROOT, "a");
    let nested = b.child(HierarchyBuilder::ROOT, nested, "a", NodeRole::Event);
    let id = b.child_id(nested, "b");
    let b_node = b.child(nested, id, "b", NodeRole::Athlete);
    assert_ne!(a, b_node);
    let h = b.finish();
    assert_eq!(h.len(), 4);
    h.validate().unwrap();
  }

  #[test]
  fn taken_id_under_another_parent_gets_a_fresh_one() {
    let mut b = HierarchyBuilder::new("root", "Root");
    let x = b.child(HierarchyBuilder::ROOT, "x".into(), "X", NodeRole::Sport);
    let y = b.child(HierarchyBuilder::ROOT, "y".into(), "Y", NodeRole::Sport);
    let clash = b.child(y, "x".into(), "X", NodeRole::Athlete);
    assert_ne!(clash, x);
    let again = b.child(y, "x".into(), "X", NodeRole::Athlete);
    assert_eq!(again, clash);

    let h = b.finish();
    h.validate().unwrap();
    let node = &h.nodes()[clash];
    assert_eq!(node.id, "x#2");
    assert_eq!(node.parent_id, "y");
  }

  #[test]
  fn deserialising_checks_invariants() {
    let json = serde_json::to_value(sample()).unwrap();
    let back: Hierarchy = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(back, sample());

    assert!(serde_json::from_value::<Hierarchy>(serde_json::json!({ "nodes": [] })).is_err());

    let mut reordered = json;
    let nodes = reordered["nodes"].as_array_mut().unwrap();
    nodes.swap(0, 2);
    assert!(serde_json::from_value::<Hierarchy>(reordered).is_err());
  }

  #[test]
  fn label_tree_nests_children() {
    let tree = sample().to_label_tree();
    assert_eq!(tree.name, "Root");
    assert_eq!(tree.value, 3);
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].children[0].name, "B");
    assert!(tree.children[0].children[0].children.is_empty());
  }
}
