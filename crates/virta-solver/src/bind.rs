//! Index binding: assigns every node label and every auxiliary branch
//! variable its position in the solved system.
//!
//! The system vector is laid out as the node voltages in discovery order
//! (ground excluded, it has no row) followed by one block of auxiliary
//! variables per element, appended in element order.

use crate::prelude::*;
use log::info;
use std::collections::HashMap;
use virta_parser::circuit::Circuit;
use virta_parser::elements::{Element, Identifiable};

/// Matrix positions of one element's terminals and auxiliary variables.
#[derive(Debug, Clone)]
pub struct Binding {
    /// One entry per terminal, in the element's node order. `None` marks the
    /// ground terminal, which has no matrix row.
    pub terminals: Vec<Option<usize>>,
    /// Positions of the element's auxiliary branch variables.
    pub branches: Vec<usize>,
}

/// The bound variable space of a circuit.
#[derive(Debug, Clone)]
pub struct VariableTable {
    /// Variable names in matrix order: node labels first, then auxiliary
    /// branch keys like `I(V1)`.
    pub names: Vec<String>,
    /// Per-element bindings, parallel to the circuit's element list.
    pub bindings: Vec<Binding>,
}

impl VariableTable {
    pub fn size(&self) -> usize {
        self.names.len()
    }
}

fn aux_name(element: &Element, slot: usize) -> String {
    let id = element.identifier();
    // The CCVS carries a second branch for its controlling short.
    if slot == 0 {
        format!("I({id})")
    } else {
        format!("Ic({id})")
    }
}

/// Discovers nodes, allocates auxiliary variables and binds every element.
pub fn bind(circuit: &Circuit) -> Result<VariableTable> {
    let labels = circuit.node_labels()?;

    let mut index_map: HashMap<&str, usize> = HashMap::new();
    for (position, label) in labels.iter().enumerate().skip(1) {
        // Ground sits at position 0 of the label list and gets no index.
        index_map.insert(label.as_str(), position - 1);
    }

    let mut names: Vec<String> = labels[1..].to_vec();
    let mut bindings: Vec<Binding> = circuit
        .elements
        .iter()
        .map(|element| Binding {
            terminals: element
                .nodes()
                .iter()
                .map(|node| index_map.get(node).copied())
                .collect(),
            branches: Vec::new(),
        })
        .collect();

    for (element, binding) in circuit.elements.iter().zip(&mut bindings) {
        for slot in 0..element.aux_count() {
            binding.branches.push(names.len());
            names.push(aux_name(element, slot));
        }
    }

    info!(
        "bound {} node voltages and {} branch currents",
        labels.len() - 1,
        names.len() - (labels.len() - 1)
    );

    Ok(VariableTable { names, bindings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use virta_parser::netlist::parse_netlist;

    const NETLIST: &str = "\
3
V1 1 0 DC 5
R1 1 2 100
L1 2 3 0.01
C1 3 0 1e-6
H1 3 0 1 0 50
.TRAN 0.001 1e-6 BE 1";

    #[test]
    fn test_layout_nodes_then_aux() {
        let circuit = parse_netlist(NETLIST).unwrap();
        let table = bind(&circuit).unwrap();
        assert_eq!(
            table.names,
            vec!["1", "2", "3", "I(V1)", "I(L1)", "I(H1)", "Ic(H1)"]
        );
        assert_eq!(table.size(), 7);
    }

    #[test]
    fn test_ground_terminal_has_no_index() {
        let circuit = parse_netlist(NETLIST).unwrap();
        let table = bind(&circuit).unwrap();
        // V1 connects node 1 and ground.
        assert_eq!(table.bindings[0].terminals, vec![Some(0), None]);
        assert_eq!(table.bindings[0].branches, vec![3]);
    }

    #[test]
    fn test_aux_blocks_are_contiguous_suffix() {
        let circuit = parse_netlist(NETLIST).unwrap();
        let table = bind(&circuit).unwrap();
        let node_count = 3;
        let mut aux: Vec<usize> = table
            .bindings
            .iter()
            .flat_map(|b| b.branches.iter().copied())
            .collect();
        aux.sort_unstable();
        assert_eq!(aux, (node_count..table.size()).collect::<Vec<_>>());
    }

    #[test]
    fn test_missing_ground_propagates() {
        let circuit = parse_netlist("0\nR1 1 2 100\n.TRAN 1 0.1 BE 1").unwrap();
        assert!(bind(&circuit).is_err());
    }
}
