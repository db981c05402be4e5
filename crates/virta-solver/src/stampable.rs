//! MNA stamps for every element, in the Backward Euler formulation.
//!
//! Stamps are pure: they read the Newton guess and the previously accepted
//! solution from the [`StampContext`] and return triplet contributions.
//! Triplets touching the ground row or column are never emitted; a `None`
//! terminal index marks ground.

use crate::bind::Binding;
use crate::prelude::Triplet;
use virta_parser::elements::{
    Capacitor, Cccs, Ccvs, CurrentSource, Diode, Element, Inductor, Mosfet, NonlinearResistor,
    OpAmp, Resistor, Vccs, Vcvs, VoltageSource,
};

/// Per-iteration inputs handed to every stamp.
#[derive(Debug, Clone, Copy)]
pub struct StampContext<'a> {
    /// Simulation time of the sample being solved.
    pub time: f64,
    /// Current integration step; shortened on the t=0 step.
    pub time_step: f64,
    /// True while the t=0 sample is solved, enabling initial conditions.
    pub first_step: bool,
    /// True only on the very first Newton iteration of the run.
    pub first_iteration: bool,
    /// Newton guess for this iteration, in matrix order (no ground entry).
    pub guess: &'a [f64],
    /// Accepted solution of the previous sub-step, in matrix order.
    pub previous: &'a [f64],
}

impl StampContext<'_> {
    /// Guessed voltage at a terminal; ground reads 0.
    fn voltage(&self, terminal: Option<usize>) -> f64 {
        terminal.map_or(0.0, |index| self.guess[index])
    }

    /// Previously accepted voltage at a terminal; ground reads 0.
    fn previous_voltage(&self, terminal: Option<usize>) -> f64 {
        terminal.map_or(0.0, |index| self.previous[index])
    }
}

/// A trait for elements that can contribute their stamp to the MNA system.
///
/// The conductance and excitation contributions are kept separate so the
/// assembler can sum them into the matrix and the right-hand side
/// independently; excitation triplets always use column 0.
pub trait Stampable {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>>;

    fn excitation_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>>;
}

/// Conductance `g` between two terminals, the four-entry resistor pattern.
fn conductance_between(
    a: Option<usize>,
    b: Option<usize>,
    g: f64,
) -> Vec<Triplet<usize, usize, f64>> {
    let mut triplets = Vec::with_capacity(4);
    if let Some(ia) = a {
        triplets.push(Triplet::new(ia, ia, g));
    }
    if let Some(ib) = b {
        triplets.push(Triplet::new(ib, ib, g));
    }
    if let (Some(ia), Some(ib)) = (a, b) {
        triplets.push(Triplet::new(ia, ib, -g));
        triplets.push(Triplet::new(ib, ia, -g));
    }
    triplets
}

/// A current of `value` amperes driven from `a` to `b` through a source:
/// `i[a] -= value`, `i[b] += value`.
fn current_between(
    a: Option<usize>,
    b: Option<usize>,
    value: f64,
) -> Vec<Triplet<usize, usize, f64>> {
    let mut triplets = Vec::with_capacity(2);
    if let Some(ia) = a {
        triplets.push(Triplet::new(ia, 0, -value));
    }
    if let Some(ib) = b {
        triplets.push(Triplet::new(ib, 0, value));
    }
    triplets
}

/// Transconductance `gm` driving the `out` pair from the `ctrl` pair.
fn transconductance_between(
    out_a: Option<usize>,
    out_b: Option<usize>,
    ctrl_c: Option<usize>,
    ctrl_d: Option<usize>,
    gm: f64,
) -> Vec<Triplet<usize, usize, f64>> {
    let mut triplets = Vec::with_capacity(4);
    for (row, sign_row) in [(out_a, 1.0), (out_b, -1.0)] {
        for (col, sign_col) in [(ctrl_c, 1.0), (ctrl_d, -1.0)] {
            if let (Some(row), Some(col)) = (row, col) {
                triplets.push(Triplet::new(row, col, sign_row * sign_col * gm));
            }
        }
    }
    triplets
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

impl Stampable for Element {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        dispatch!(self, conductance_stamps(binding, ctx))
    }

    fn excitation_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        dispatch!(self, excitation_stamps(binding, ctx))
    }
}

impl Stampable for Resistor {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        conductance_between(binding.terminals[0], binding.terminals[1], 1.0 / self.value)
    }

    fn excitation_stamps(
        &self,
        _binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        // A resistor is passive and does not add to the excitation vector.
        Vec::new()
    }
}

impl Stampable for Capacitor {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        conductance_between(
            binding.terminals[0],
            binding.terminals[1],
            self.value / ctx.time_step,
        )
    }

    fn excitation_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let a = binding.terminals[0];
        let b = binding.terminals[1];

        // Voltage across the device at the end of the previous accepted
        // step; the declared IC on the t=0 step.
        let v_prev = if ctx.first_step {
            self.ic
        } else {
            ctx.previous_voltage(a) - ctx.previous_voltage(b)
        };
        let history = (self.value / ctx.time_step) * v_prev;

        let mut triplets = Vec::with_capacity(2);
        if let Some(ia) = a {
            triplets.push(Triplet::new(ia, 0, history));
        }
        if let Some(ib) = b {
            triplets.push(Triplet::new(ib, 0, -history));
        }
        triplets
    }
}

impl Stampable for Inductor {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let a = binding.terminals[0];
        let b = binding.terminals[1];
        let jx = binding.branches[0];

        let mut triplets = Vec::with_capacity(5);
        if let Some(ia) = a {
            triplets.push(Triplet::new(ia, jx, 1.0));
            triplets.push(Triplet::new(jx, ia, -1.0));
        }
        if let Some(ib) = b {
            triplets.push(Triplet::new(ib, jx, -1.0));
            triplets.push(Triplet::new(jx, ib, 1.0));
        }
        triplets.push(Triplet::new(jx, jx, self.value / ctx.time_step));
        triplets
    }

    fn excitation_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let jx = binding.branches[0];
        let i_prev = if ctx.first_step {
            self.ic
        } else {
            ctx.previous[jx]
        };
        vec![Triplet::new(jx, 0, (self.value / ctx.time_step) * i_prev)]
    }
}

impl Stampable for NonlinearResistor {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let a = binding.terminals[0];
        let b = binding.terminals[1];
        let (g, _) = self.companion(ctx.voltage(a) - ctx.voltage(b));
        conductance_between(a, b, g)
    }

    fn excitation_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let a = binding.terminals[0];
        let b = binding.terminals[1];
        let (_, i0) = self.companion(ctx.voltage(a) - ctx.voltage(b));
        current_between(a, b, i0)
    }
}

impl Stampable for Diode {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let a = binding.terminals[0];
        let b = binding.terminals[1];
        let (g0, _) = self.companion(ctx.voltage(a) - ctx.voltage(b));
        // A fully underflowed junction contributes no conductance at all.
        if g0 == 0.0 {
            return Vec::new();
        }
        conductance_between(a, b, g0)
    }

    fn excitation_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let a = binding.terminals[0];
        let b = binding.terminals[1];
        let (_, i0) = self.companion(ctx.voltage(a) - ctx.voltage(b));
        current_between(a, b, i0)
    }
}

impl Stampable for Mosfet {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let (drain, gate, source) = (
            binding.terminals[0],
            binding.terminals[1],
            binding.terminals[2],
        );
        let companion = self.companion(
            ctx.voltage(drain),
            ctx.voltage(gate),
            ctx.voltage(source),
            ctx.first_iteration,
        );
        let (d, s) = if companion.swapped {
            (source, drain)
        } else {
            (drain, source)
        };

        let mut triplets = conductance_between(d, s, companion.gds);
        triplets.extend(transconductance_between(d, s, gate, s, companion.gm));
        triplets
    }

    fn excitation_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let (drain, gate, source) = (
            binding.terminals[0],
            binding.terminals[1],
            binding.terminals[2],
        );
        let companion = self.companion(
            ctx.voltage(drain),
            ctx.voltage(gate),
            ctx.voltage(source),
            ctx.first_iteration,
        );
        let (d, s) = if companion.swapped {
            (source, drain)
        } else {
            (drain, source)
        };
        current_between(d, s, companion.source_current)
    }
}

impl Stampable for OpAmp {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let jx = binding.branches[0];
        let mut triplets = Vec::with_capacity(3);
        // Unknown output current, plus the virtual-short constraint V+ = V-.
        if let Some(out) = binding.terminals[2] {
            triplets.push(Triplet::new(out, jx, 1.0));
        }
        if let Some(plus) = binding.terminals[0] {
            triplets.push(Triplet::new(jx, plus, -1.0));
        }
        if let Some(minus) = binding.terminals[1] {
            triplets.push(Triplet::new(jx, minus, 1.0));
        }
        triplets
    }

    fn excitation_stamps(
        &self,
        _binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        Vec::new()
    }
}

impl Stampable for Vcvs {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let jx = binding.branches[0];
        let mut triplets = Vec::with_capacity(6);
        if let Some(a) = binding.terminals[0] {
            triplets.push(Triplet::new(a, jx, -1.0));
            triplets.push(Triplet::new(jx, a, -1.0));
        }
        if let Some(b) = binding.terminals[1] {
            triplets.push(Triplet::new(b, jx, 1.0));
            triplets.push(Triplet::new(jx, b, 1.0));
        }
        if let Some(c) = binding.terminals[2] {
            triplets.push(Triplet::new(jx, c, self.gain));
        }
        if let Some(d) = binding.terminals[3] {
            triplets.push(Triplet::new(jx, d, -self.gain));
        }
        triplets
    }

    fn excitation_stamps(
        &self,
        _binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        Vec::new()
    }
}

impl Stampable for Cccs {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let jx = binding.branches[0];
        let mut triplets = Vec::with_capacity(6);
        // The controlling branch is a short from c to d carrying jx; the
        // output pair mirrors that current scaled by the gain.
        if let Some(a) = binding.terminals[0] {
            triplets.push(Triplet::new(a, jx, -self.gain));
        }
        if let Some(b) = binding.terminals[1] {
            triplets.push(Triplet::new(b, jx, self.gain));
        }
        if let Some(c) = binding.terminals[2] {
            triplets.push(Triplet::new(c, jx, 1.0));
            triplets.push(Triplet::new(jx, c, -1.0));
        }
        if let Some(d) = binding.terminals[3] {
            triplets.push(Triplet::new(d, jx, -1.0));
            triplets.push(Triplet::new(jx, d, 1.0));
        }
        triplets
    }

    fn excitation_stamps(
        &self,
        _binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        Vec::new()
    }
}

impl Stampable for Vccs {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        transconductance_between(
            binding.terminals[0],
            binding.terminals[1],
            binding.terminals[2],
            binding.terminals[3],
            self.gain,
        )
    }

    fn excitation_stamps(
        &self,
        _binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        Vec::new()
    }
}

impl Stampable for Ccvs {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        // jx carries the output branch current, jy the controlling short's.
        let jx = binding.branches[0];
        let jy = binding.branches[1];
        let mut triplets = Vec::with_capacity(9);
        if let Some(a) = binding.terminals[0] {
            triplets.push(Triplet::new(a, jx, 1.0));
            triplets.push(Triplet::new(jx, a, -1.0));
        }
        if let Some(b) = binding.terminals[1] {
            triplets.push(Triplet::new(b, jx, -1.0));
            triplets.push(Triplet::new(jx, b, 1.0));
        }
        // Output constraint: v(a) - v(b) = rm * jy.
        triplets.push(Triplet::new(jx, jy, self.gain));
        if let Some(c) = binding.terminals[2] {
            triplets.push(Triplet::new(c, jy, 1.0));
            triplets.push(Triplet::new(jy, c, -1.0));
        }
        if let Some(d) = binding.terminals[3] {
            triplets.push(Triplet::new(d, jy, -1.0));
            triplets.push(Triplet::new(jy, d, 1.0));
        }
        triplets
    }

    fn excitation_stamps(
        &self,
        _binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        Vec::new()
    }
}

impl Stampable for VoltageSource {
    fn conductance_stamps(
        &self,
        binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let jx = binding.branches[0];
        let mut triplets = Vec::with_capacity(4);
        if let Some(a) = binding.terminals[0] {
            triplets.push(Triplet::new(a, jx, 1.0));
            triplets.push(Triplet::new(jx, a, -1.0));
        }
        if let Some(b) = binding.terminals[1] {
            triplets.push(Triplet::new(b, jx, -1.0));
            triplets.push(Triplet::new(jx, b, 1.0));
        }
        triplets
    }

    fn excitation_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let jx = binding.branches[0];
        let value = self.waveform.value_at(ctx.time, ctx.time_step);
        vec![Triplet::new(jx, 0, -value)]
    }
}

impl Stampable for CurrentSource {
    fn conductance_stamps(
        &self,
        _binding: &Binding,
        _ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        Vec::new()
    }

    fn excitation_stamps(
        &self,
        binding: &Binding,
        ctx: &StampContext,
    ) -> Vec<Triplet<usize, usize, f64>> {
        let value = self.waveform.value_at(ctx.time, ctx.time_step);
        current_between(binding.terminals[0], binding.terminals[1], value)
    }
}
