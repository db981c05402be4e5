use crate::analyses::TransientSpec;
use crate::elements::Element;
use crate::prelude::*;

/// The ground node label.
pub const GROUND: &str = "0";

#[derive(Debug, Clone)]
/// A structured representation of a circuit: its components in insertion
/// order plus the transient window to simulate.
pub struct Circuit {
    /// A list of circuit elements.
    pub elements: Vec<Element>,

    /// Transient analysis parameters.
    pub analysis: TransientSpec,
}

impl Circuit {
    /// Create a new, empty circuit for the given analysis window.
    pub fn new(analysis: TransientSpec) -> Self {
        Circuit {
            elements: Vec::new(),
            analysis,
        }
    }

    /// Appends a component to the circuit.
    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// True if any element requires Newton-Raphson iteration.
    pub fn is_nonlinear(&self) -> bool {
        self.elements.iter().any(Element::is_nonlinear)
    }

    /// Discovers the node labels of the circuit.
    ///
    /// Ground is always first; the remaining labels appear in the order the
    /// elements (and their terminals) introduce them. Fails with
    /// [`Error::MissingGround`] if no element touches node `"0"`.
    pub fn node_labels(&self) -> Result<Vec<String>> {
        let mut labels = vec![GROUND.to_string()];
        let mut has_ground = false;
        for element in &self.elements {
            for node in element.nodes() {
                if node == GROUND {
                    has_ground = true;
                } else if !labels.iter().any(|l| l == node) {
                    labels.push(node.to_string());
                }
            }
        }
        if !has_ground {
            return Err(Error::MissingGround);
        }
        Ok(labels)
    }
}
