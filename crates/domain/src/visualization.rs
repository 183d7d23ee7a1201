//! Pre-authored algorithm visualization steps.

use serde::{Deserialize, Serialize};

/// One step of a visualization script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualizationStep {
    /// Narration for the step
    pub description: String,
    /// Source excerpt executing at this step
    pub code: String,
    /// What to draw
    pub frame: Frame,
}

impl VisualizationStep {
    /// Create a step
    pub fn new(description: impl Into<String>, code: impl Into<String>, frame: Frame) -> Self {
        Self {
            description: description.into(),
            code: code.into(),
            frame,
        }
    }
}

/// What the step draws
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frame {
    /// A row of cells with optional pointers
    Array {
        /// Cell contents, left to right
        values: Vec<String>,
        /// Labelled markers under cells
        #[serde(default)]
        pointers: Vec<ArrayPointer>,
    },
    /// Nodes and edges laid out on a circle
    Graph {
        /// Nodes in layout order
        nodes: Vec<Node>,
        /// Connections between nodes
        edges: Vec<Edge>,
    },
    /// Nodes and edges laid out top-down
    Tree {
        /// Nodes in layout order
        nodes: Vec<Node>,
        /// Connections between nodes
        edges: Vec<Edge>,
    },
    /// Plain value
    Basic {
        /// Rendered as-is
        value: String,
    },
}

impl Frame {
    /// One-line text rendering of the frame
    pub fn summary(&self) -> String {
        match self {
            Frame::Array { values, pointers } => {
                let cells = values.join(", ");
                if pointers.is_empty() {
                    format!("[{cells}]  No pointers")
                } else {
                    let labels = pointers
                        .iter()
                        .map(|p| format!("{} at index {}", p.label, p.index))
                        .collect::<Vec<_>>()
                        .join(", ");
                    format!("[{cells}]  Pointers: {labels}")
                }
            }
            Frame::Graph { nodes, edges } | Frame::Tree { nodes, edges } => {
                let marked = |n: &Node| {
                    if n.highlight {
                        format!("*{}", n.id)
                    } else if n.visited {
                        format!("+{}", n.id)
                    } else {
                        n.id.clone()
                    }
                };
                let nodes = nodes.iter().map(marked).collect::<Vec<_>>().join(" ");
                let edges = edges
                    .iter()
                    .map(|e| format!("{}-{}", e.source, e.target))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("nodes: {nodes}  edges: {edges}")
            }
            Frame::Basic { value } => value.clone(),
        }
    }
}

/// Marker under an array cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayPointer {
    /// Cell the pointer sits under
    pub index: usize,
    /// Pointer name, such as `left`
    pub label: String,
    /// Drawn in the active color
    #[serde(default)]
    pub highlight: bool,
}

/// Graph or tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Node label
    pub id: String,
    /// Drawn in the active color
    #[serde(default)]
    pub highlight: bool,
    /// Already processed
    #[serde(default)]
    pub visited: bool,
}

impl Node {
    /// Plain node
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            highlight: false,
            visited: false,
        }
    }
}

/// Graph or tree edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Id of the start node
    pub source: String,
    /// Id of the end node
    pub target: String,
    /// Drawn in the active color
    #[serde(default)]
    pub highlight: bool,
    /// Already processed
    #[serde(default)]
    pub visited: bool,
}

impl Edge {
    /// Plain edge
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            highlight: false,
            visited: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_summary() {
        let frame = Frame::Array {
            values: vec!["2".into(), "7".into(), "11".into()],
            pointers: vec![ArrayPointer {
                index: 1,
                label: "i".into(),
                highlight: true,
            }],
        };
        assert_eq!(frame.summary(), "[2, 7, 11]  Pointers: i at index 1");
    }

    #[test]
    fn test_frame_tagged_serialization() {
        let frame = Frame::Basic {
            value: "result = 0".into(),
        };
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(json, r#"{"type":"basic","value":"result = 0"}"#);
    }
}
