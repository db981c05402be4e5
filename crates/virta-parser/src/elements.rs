use crate::prelude::*;

pub mod capacitor;
pub mod controlled;
pub mod current_source;
pub mod diode;
pub mod inductor;
pub mod mosfet;
pub mod nonlinear_resistor;
pub mod opamp;
pub mod resistor;
pub mod voltage_source;

pub use capacitor::Capacitor;
pub use controlled::{Cccs, Ccvs, Vccs, Vcvs};
pub use current_source::CurrentSource;
pub use diode::Diode;
pub use inductor::Inductor;
pub use mosfet::Mosfet;
pub use nonlinear_resistor::NonlinearResistor;
pub use opamp::OpAmp;
pub use resistor::Resistor;
pub use voltage_source::VoltageSource;

/// Represents any component that can be included in a circuit simulation.
#[derive(Debug, Clone)]
pub enum Element {
    Resistor(Resistor),
    Capacitor(Capacitor),
    Inductor(Inductor),
    NonlinearResistor(NonlinearResistor),
    Diode(Diode),
    Mosfet(Mosfet),
    OpAmp(OpAmp),
    Vcvs(Vcvs),
    Cccs(Cccs),
    Vccs(Vccs),
    Ccvs(Ccvs),
    VoltageSource(VoltageSource),
    CurrentSource(CurrentSource),
}

/// A macro to forward a method call to the correct inner element struct.
/// This reduces boilerplate code for the `Element` enum wrappers.
macro_rules! dispatch {
    ($self:expr, $method:ident($($args:expr),*)) => {
        match $self {
            Element::Resistor(e) => e.$method($($args),*),
            Element::Capacitor(e) => e.$method($($args),*),
            Element::Inductor(e) => e.$method($($args),*),
            Element::NonlinearResistor(e) => e.$method($($args),*),
            Element::Diode(e) => e.$method($($args),*),
            Element::Mosfet(e) => e.$method($($args),*),
            Element::OpAmp(e) => e.$method($($args),*),
            Element::Vcvs(e) => e.$method($($args),*),
            Element::Cccs(e) => e.$method($($args),*),
            Element::Vccs(e) => e.$method($($args),*),
            Element::Ccvs(e) => e.$method($($args),*),
            Element::VoltageSource(e) => e.$method($($args),*),
            Element::CurrentSource(e) => e.$method($($args),*),
        }
    };
}

macro_rules! element_from {
    ($($variant:ident($inner:ty)),* $(,)?) => {
        $(
            impl From<$inner> for Element {
                fn from(item: $inner) -> Self {
                    Element::$variant(item)
                }
            }
        )*
    };
}

element_from!(
    Resistor(Resistor),
    Capacitor(Capacitor),
    Inductor(Inductor),
    NonlinearResistor(NonlinearResistor),
    Diode(Diode),
    Mosfet(Mosfet),
    OpAmp(OpAmp),
    Vcvs(Vcvs),
    Cccs(Cccs),
    Vccs(Vccs),
    Ccvs(Ccvs),
    VoltageSource(VoltageSource),
    CurrentSource(CurrentSource),
);

impl Element {
    /// Retrieves the node labels of the element, in terminal order.
    pub fn nodes(&self) -> Vec<&str> {
        match self {
            Element::Resistor(e) => vec![&e.plus, &e.minus],
            Element::Capacitor(e) => vec![&e.plus, &e.minus],
            Element::Inductor(e) => vec![&e.plus, &e.minus],
            Element::NonlinearResistor(e) => vec![&e.plus, &e.minus],
            Element::Diode(e) => vec![&e.plus, &e.minus],
            Element::Mosfet(e) => vec![&e.drain, &e.gate, &e.source],
            Element::OpAmp(e) => vec![&e.plus, &e.minus, &e.output],
            Element::Vcvs(e) => vec![&e.plus, &e.minus, &e.ctrl_plus, &e.ctrl_minus],
            Element::Cccs(e) => vec![&e.plus, &e.minus, &e.ctrl_plus, &e.ctrl_minus],
            Element::Vccs(e) => vec![&e.plus, &e.minus, &e.ctrl_plus, &e.ctrl_minus],
            Element::Ccvs(e) => vec![&e.plus, &e.minus, &e.ctrl_plus, &e.ctrl_minus],
            Element::VoltageSource(e) => vec![&e.plus, &e.minus],
            Element::CurrentSource(e) => vec![&e.plus, &e.minus],
        }
    }

    /// Number of auxiliary branch-current variables the element adds to the
    /// MNA system.
    pub fn aux_count(&self) -> usize {
        match self {
            Element::Inductor(_)
            | Element::OpAmp(_)
            | Element::Vcvs(_)
            | Element::Cccs(_)
            | Element::VoltageSource(_) => 1,
            Element::Ccvs(_) => 2,
            Element::Resistor(_)
            | Element::Capacitor(_)
            | Element::NonlinearResistor(_)
            | Element::Diode(_)
            | Element::Mosfet(_)
            | Element::Vccs(_)
            | Element::CurrentSource(_) => 0,
        }
    }

    /// Checks if the element requires Newton-Raphson iteration.
    pub fn is_nonlinear(&self) -> bool {
        matches!(
            self,
            Element::NonlinearResistor(_) | Element::Diode(_) | Element::Mosfet(_)
        )
    }
}

/// A trait for elements that have a unique string identifier.
pub trait Identifiable {
    fn identifier(&self) -> String;
}

impl Identifiable for Element {
    fn identifier(&self) -> String {
        dispatch!(self, identifier())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Resistor(e) => fmt::Display::fmt(e, f),
            Element::Capacitor(e) => fmt::Display::fmt(e, f),
            Element::Inductor(e) => fmt::Display::fmt(e, f),
            Element::NonlinearResistor(e) => fmt::Display::fmt(e, f),
            Element::Diode(e) => fmt::Display::fmt(e, f),
            Element::Mosfet(e) => fmt::Display::fmt(e, f),
            Element::OpAmp(e) => fmt::Display::fmt(e, f),
            Element::Vcvs(e) => fmt::Display::fmt(e, f),
            Element::Cccs(e) => fmt::Display::fmt(e, f),
            Element::Vccs(e) => fmt::Display::fmt(e, f),
            Element::Ccvs(e) => fmt::Display::fmt(e, f),
            Element::VoltageSource(e) => fmt::Display::fmt(e, f),
            Element::CurrentSource(e) => fmt::Display::fmt(e, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aux_counts() {
        let inductor: Element = "L1 1 0 1".parse::<Inductor>().unwrap().into();
        let ccvs: Element = "H1 1 0 2 0 50".parse::<Ccvs>().unwrap().into();
        let resistor: Element = "R1 1 0 1000".parse::<Resistor>().unwrap().into();
        assert_eq!(inductor.aux_count(), 1);
        assert_eq!(ccvs.aux_count(), 2);
        assert_eq!(resistor.aux_count(), 0);
    }

    #[test]
    fn test_nonlinearity_flags() {
        let diode: Element = "D1 1 0".parse::<Diode>().unwrap().into();
        let vccs: Element = "G1 1 0 2 0 0.5".parse::<Vccs>().unwrap().into();
        assert!(diode.is_nonlinear());
        assert!(!vccs.is_nonlinear());
    }

    #[test]
    fn test_identifier_and_display() {
        let element: Element = "R10 a b 50".parse::<Resistor>().unwrap().into();
        assert_eq!(element.identifier(), "R10");
        assert_eq!(element.to_string(), "R10 a b 50");
    }

    #[test]
    fn test_terminal_order() {
        let mosfet: Element = "M1 d g s N 2e-05 1e-06 0.01 1e-4 0.5"
            .parse::<Mosfet>()
            .unwrap()
            .into();
        assert_eq!(mosfet.nodes(), vec!["d", "g", "s"]);
    }
}
