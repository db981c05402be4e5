use virta_parser::analyses::IntegrationMethod;
use virta_parser::elements::Element;
use virta_parser::netlist::{netlist_string, parse_netlist};

const RLC: &str = "\
3
V1 1 0 PULSE 0 5 0.001 0.000000001 0.000000001 0.01 0.02 1
R1 1 2 200
L1 2 3 0.01
C1 3 0 0.000001
.TRAN 0.005 0.000001 BE 1";

const RECTIFIER: &str = "\
2
V7006 1 0 SIN 0 12 60 0 0 0 6
D1200 1 2
R1005 2 0 1000
C2005 2 0 0.00005
.TRAN 0.1 0.00001 BE 1";

const CHUA: &str = "\
2
R1004 1 2 1.9
L3000 1 0 1
C2000 2 0 0.31 IC=1
C2001 1 0 1 IC=1
N9900 2 0 -2 1.1 -1 0.7 1 -0.7 2 -1.1
.TRAN 1000 0.1 BE 1";

const AMPLIFIER: &str = "\
3
Vin in 0 SIN 0 1 100 0 0 0 5
R1 in neg 1000
R2 neg out 2000
OOp1 0 neg out
.TRAN 0.01 0.00001 BE 1";

const CONTROLLED: &str = "\
4
V1 1 0 DC 1
R1 1 2 100
E1 3 0 1 2 2
F1 3 0 1 2 0.5
G1 4 0 3 0 0.001
H1 4 0 1 0 50
R2 3 0 100
R3 4 0 100
.TRAN 0.001 0.0001 BE 1";

#[test]
fn test_reference_netlists_round_trip() {
    for reference in [RLC, RECTIFIER, CHUA, AMPLIFIER, CONTROLLED] {
        let circuit = parse_netlist(reference).expect("reference netlist parses");
        assert_eq!(netlist_string(&circuit).unwrap(), reference);
    }
}

#[test]
fn test_rlc_structure() {
    let circuit = parse_netlist(RLC).unwrap();
    assert_eq!(circuit.elements.len(), 4);
    assert!(!circuit.is_nonlinear());
    assert_eq!(circuit.node_labels().unwrap(), vec!["0", "1", "2", "3"]);
    assert!(matches!(circuit.elements[2], Element::Inductor(_)));
}

#[test]
fn test_rectifier_is_nonlinear() {
    let circuit = parse_netlist(RECTIFIER).unwrap();
    assert!(circuit.is_nonlinear());
}

#[test]
fn test_chua_initial_conditions_survive() {
    let circuit = parse_netlist(CHUA).unwrap();
    let ics: Vec<f64> = circuit
        .elements
        .iter()
        .filter_map(|e| match e {
            Element::Capacitor(c) => Some(c.ic),
            _ => None,
        })
        .collect();
    assert_eq!(ics, vec![1.0, 1.0]);
}

#[test]
fn test_aux_variable_total() {
    // One aux each for V1, E1 and F1, two for H1, none for the rest.
    let circuit = parse_netlist(CONTROLLED).unwrap();
    let total: usize = circuit.elements.iter().map(Element::aux_count).sum();
    assert_eq!(total, 5);
}

#[test]
fn test_method_variants_parse() {
    for (text, method) in [
        ("BE", IntegrationMethod::BackwardEuler),
        ("FE", IntegrationMethod::ForwardEuler),
        ("TRAP", IntegrationMethod::Trapezoidal),
    ] {
        let input = format!("0\nR1 1 0 50\n.TRAN 1 0.1 {text} 1");
        let circuit = parse_netlist(&input).unwrap();
        assert_eq!(circuit.analysis.method, method);
    }
}
