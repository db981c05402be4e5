use clap::Parser;
use log::info;
use std::path::PathBuf;
use virta_parser::netlist::parse_netlist_file;
use virta_result::write_trajectory;
use virta_solver::{SolverConfig, Solver};

/// Virta is a SPICE-like transient circuit simulator written in Rust.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist describing the circuit and its transient window.
    netlist: PathBuf,

    /// Path the simulated trajectory is written to.
    results: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let circuit = match parse_netlist_file(&args.netlist) {
        Ok(circuit) => circuit,
        Err(e) => {
            eprintln!("Error parsing netlist '{}': {e}", args.netlist.display());
            std::process::exit(1);
        }
    };

    info!(
        "running {} on '{}'",
        circuit.analysis,
        args.netlist.display()
    );

    let solver = Solver::new(circuit, SolverConfig::default());
    let trajectory = match solver.solve() {
        Ok(trajectory) => trajectory,
        Err(e) => {
            eprintln!("Error during transient analysis: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = write_trajectory(&trajectory, &args.results) {
        eprintln!(
            "Error writing results to '{}': {e}",
            args.results.display()
        );
        std::process::exit(1);
    }
}
