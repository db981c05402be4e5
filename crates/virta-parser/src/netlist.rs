//! Netlist import and export.
//!
//! The format is line-oriented: the first line is reserved, each following
//! line describes one component selected by its leading letter, and a line
//! starting with `.` closes the component block while carrying the transient
//! spec (`.TRAN t_total step method inner_steps`). Blank lines and lines
//! starting with `%` or `*` are ignored.

use crate::analyses::TransientSpec;
use crate::circuit::Circuit;
use crate::elements::{
    Capacitor, Cccs, Ccvs, CurrentSource, Diode, Element, Inductor, Mosfet, NonlinearResistor,
    OpAmp, Resistor, Vccs, Vcvs, VoltageSource,
};
use crate::prelude::*;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

fn parse_element(line: &str) -> Result<Element> {
    let tag = line
        .chars()
        .next()
        .ok_or_else(|| Error::InvalidFormat("empty component line".to_string()))?;

    let element = match tag.to_ascii_uppercase() {
        'R' => line.parse::<Resistor>()?.into(),
        'L' => line.parse::<Inductor>()?.into(),
        'C' => line.parse::<Capacitor>()?.into(),
        'N' => line.parse::<NonlinearResistor>()?.into(),
        'E' => line.parse::<Vcvs>()?.into(),
        'F' => line.parse::<Cccs>()?.into(),
        'G' => line.parse::<Vccs>()?.into(),
        'H' => line.parse::<Ccvs>()?.into(),
        'O' => line.parse::<OpAmp>()?.into(),
        'D' => line.parse::<Diode>()?.into(),
        'M' => line.parse::<Mosfet>()?.into(),
        'I' => line.parse::<CurrentSource>()?.into(),
        'V' => line.parse::<VoltageSource>()?.into(),
        other => {
            return Err(Error::InvalidFormat(format!(
                "unknown element tag '{other}'"
            )));
        }
    };
    Ok(element)
}

/// Parses a netlist text into a [`Circuit`].
pub fn parse_netlist(input: &str) -> Result<Circuit> {
    let mut elements = Vec::new();
    let mut analysis = None;

    // The first line is reserved (the exporter writes the node count there).
    for (line_num, line) in input.lines().enumerate().skip(1) {
        let current_line = line_num + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('%') || line.starts_with('*') {
            continue;
        }

        if line.starts_with('.') {
            let spec = line
                .parse::<TransientSpec>()
                .map_err(|e| Error::MalformedNetlist {
                    line: current_line,
                    message: e.to_string(),
                })?;
            analysis = Some(spec);
            break;
        }

        let element = parse_element(line).map_err(|e| Error::MalformedNetlist {
            line: current_line,
            message: e.to_string(),
        })?;
        debug!("parsed {element}");
        elements.push(element);
    }

    if elements.is_empty() {
        return Err(Error::EmptyNetlist);
    }

    let analysis = analysis.ok_or_else(|| Error::InvalidFormat(
        "netlist has no analysis line (`.TRAN ...`)".to_string(),
    ))?;

    let mut circuit = Circuit::new(analysis);
    circuit.elements = elements;
    Ok(circuit)
}

/// Reads and parses a netlist file.
pub fn parse_netlist_file(file_path: &Path) -> Result<Circuit> {
    let file = File::open(file_path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_netlist(&contents)
}

/// Renders a circuit in the export netlist format: node count (ground
/// excluded) on the first line, one line per component, the transient spec
/// last.
pub fn netlist_string(circuit: &Circuit) -> Result<String> {
    let labels = circuit.node_labels()?;
    let mut out = String::new();
    out.push_str(&format!("{}\n", labels.len() - 1));
    for element in &circuit.elements {
        out.push_str(&format!("{element}\n"));
    }
    out.push_str(&circuit.analysis.to_string());
    Ok(out)
}

/// Writes a circuit to a netlist file.
pub fn write_netlist(circuit: &Circuit, file_path: &Path) -> Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(netlist_string(circuit)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyses::IntegrationMethod;

    const DIVIDER: &str = "\
2
V4000 1 0 SIN 1 5 1000 0.002 80 90 5
R1000 1 2 1000
R1001 2 0 1000
.TRAN 0.005 0.00001 BE 1";

    #[test]
    fn test_parse_divider() {
        let circuit = parse_netlist(DIVIDER).unwrap();
        assert_eq!(circuit.elements.len(), 3);
        assert_eq!(circuit.analysis.method, IntegrationMethod::BackwardEuler);
        assert_eq!(circuit.node_labels().unwrap(), vec!["0", "1", "2"]);
    }

    #[test]
    fn test_round_trip() {
        let circuit = parse_netlist(DIVIDER).unwrap();
        assert_eq!(netlist_string(&circuit).unwrap(), DIVIDER);
    }

    #[test]
    fn test_first_line_is_ignored() {
        let input = "this line is reserved and not parsed\nR1 1 0 50\n.TRAN 1 0.1 BE 1";
        assert!(parse_netlist(input).is_ok());
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let input = "0\n\n% comment\n* another comment\nR1 1 0 50\n.TRAN 1 0.1 BE 1";
        let circuit = parse_netlist(input).unwrap();
        assert_eq!(circuit.elements.len(), 1);
    }

    #[test]
    fn test_unknown_tag_reports_line() {
        let input = "0\nX1 1 0 50\n.TRAN 1 0.1 BE 1";
        match parse_netlist(input) {
            Err(Error::MalformedNetlist { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MalformedNetlist, got {other:?}"),
        }
    }

    #[test]
    fn test_arity_mismatch_is_malformed() {
        let input = "0\nR1 1 0\n.TRAN 1 0.1 BE 1";
        assert!(matches!(
            parse_netlist(input),
            Err(Error::MalformedNetlist { .. })
        ));
    }

    #[test]
    fn test_missing_analysis_line() {
        let input = "0\nR1 1 0 50";
        assert!(parse_netlist(input).is_err());
    }

    #[test]
    fn test_empty_netlist() {
        assert!(matches!(
            parse_netlist("0\n.TRAN 1 0.1 BE 1"),
            Err(Error::EmptyNetlist)
        ));
    }
}
