// src/rendering/primitives.rs

use crate::utils::geometry::Point3;
use serde::Serialize;

pub type Segment = (Point3, Point3);

/// Homogeneous batch of renderable geometry. All coordinates are cartesian (Å).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
  Spheres {
    color: String,
    radius: f64,
    positions: Vec<Point3>,
  },
  /// Consecutive pairs of points form independent segments.
  Lines { positions: Vec<Point3> },
  Cylinders {
    #[serde(rename = "positionPairs")]
    position_pairs: Vec<Segment>,
    color: String,
    radius: f64,
  },
  Arrows {
    #[serde(rename = "positionPairs")]
    position_pairs: Vec<Segment>,
    color: String,
    radius: f64,
    #[serde(rename = "headLength")]
    head_length: f64,
    #[serde(rename = "headWidth")]
    head_width: f64,
  },
}

impl Primitive {
  /// Number of points (spheres, lines) or point pairs (cylinders, arrows).
  pub fn len(&self) -> usize {
    match self {
      Primitive::Spheres { positions, .. } | Primitive::Lines { positions } => positions.len(),
      Primitive::Cylinders { position_pairs, .. } | Primitive::Arrows { position_pairs, .. } => {
        position_pairs.len()
      }
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeContents {
  Children(Vec<SceneNode>),
  Primitives(Vec<Primitive>),
}

/// Named container of either child nodes or primitives.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneNode {
  pub name: String,
  pub visible: bool,
  pub contents: NodeContents,
}

impl SceneNode {
  pub fn with_children(name: impl Into<String>, children: Vec<SceneNode>) -> Self {
    Self {
      name: name.into(),
      visible: true,
      contents: NodeContents::Children(children),
    }
  }

  pub fn with_primitives(name: impl Into<String>, primitives: Vec<Primitive>) -> Self {
    Self {
      name: name.into(),
      visible: true,
      contents: NodeContents::Primitives(primitives),
    }
  }

  pub fn children(&self) -> &[SceneNode] {
    match &self.contents {
      NodeContents::Children(c) => c,
      NodeContents::Primitives(_) => &[],
    }
  }

  pub fn primitives(&self) -> &[Primitive] {
    match &self.contents {
      NodeContents::Primitives(p) => p,
      NodeContents::Children(_) => &[],
    }
  }

  pub fn child(&self, name: &str) -> Option<&SceneNode> {
    self.children().iter().find(|c| c.name == name)
  }
}

/// Root of a converted structure. Serializes as the root node itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SceneDocument {
  pub root: SceneNode,
}

impl SceneDocument {
  pub const ROOT_NAME: &'static str = "structure";

  pub fn new(groups: Vec<SceneNode>) -> Self {
    Self {
      root: SceneNode::with_children(Self::ROOT_NAME, groups),
    }
  }

  pub fn group(&self, name: &str) -> Option<&SceneNode> {
    self.root.child(name)
  }

  pub fn group_names(&self) -> Vec<&str> {
    self.root.children().iter().map(|g| g.name.as_str()).collect()
  }

  pub fn to_json(&self) -> serde_json::Value {
    // Only strings, bools, finite-or-null numbers and sequences; cannot fail
    serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_primitive_json_keys() {
    let arrow = Primitive::Arrows {
      position_pairs: vec![([0.0; 3], [1.0, 0.0, 0.0])],
      color: "#ff0000".into(),
      radius: 0.07,
      head_length: 0.32,
      head_width: 0.18,
    };
    assert_eq!(
      serde_json::to_value(&arrow).unwrap(),
      json!({
        "type": "arrows",
        "positionPairs": [[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]],
        "color": "#ff0000",
        "radius": 0.07,
        "headLength": 0.32,
        "headWidth": 0.18
      })
    );

    let lines = Primitive::Lines {
      positions: vec![[0.0; 3], [1.0; 3]],
    };
    assert_eq!(
      serde_json::to_value(&lines).unwrap(),
      json!({"type": "lines", "positions": [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]})
    );
  }

  #[test]
  fn test_document_shape() {
    let doc = SceneDocument::new(vec![
      SceneNode::with_children("atoms", vec![]),
      SceneNode::with_primitives("unit_cell", vec![Primitive::Lines { positions: vec![] }]),
    ]);
    let v = doc.to_json();
    assert_eq!(v["name"], "structure");
    assert_eq!(v["visible"], true);
    assert_eq!(v["contents"][0]["name"], "atoms");
    assert_eq!(v["contents"][1]["contents"][0]["type"], "lines");
    assert_eq!(doc.group_names(), vec!["atoms", "unit_cell"]);
    assert!(doc.group("bonds").is_none());
  }
}
