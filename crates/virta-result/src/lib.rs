//! Trajectory container and the space-separated results text format.
//!
//! The file starts with a header line `t <var1> <var2> ...` followed by one
//! row per sample: the time, then every variable rounded to six decimals.

use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed results file at line {line}: {message}")]
    MalformedResults { line: usize, message: String },
}

pub type Result<T> = core::result::Result<T, Error>;

/// Time evolution of every solved variable: node voltages first, auxiliary
/// branch currents after them, ground excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    variables: Vec<String>,
    times: Vec<f64>,
    samples: Vec<Vec<f64>>,
}

impl Trajectory {
    pub fn new(variables: Vec<String>) -> Self {
        Trajectory {
            variables,
            times: Vec::new(),
            samples: Vec::new(),
        }
    }

    /// Appends one sample. The value vector must cover every variable.
    pub fn append(&mut self, time: f64, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.variables.len());
        self.times.push(time);
        self.samples.push(values);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn sample(&self, index: usize) -> (f64, &[f64]) {
        (self.times[index], &self.samples[index])
    }

    pub fn last(&self) -> Option<(f64, &[f64])> {
        let index = self.samples.len().checked_sub(1)?;
        Some(self.sample(index))
    }

    /// The time series of one variable, by name.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.variables.iter().position(|v| v == name)?;
        Some(self.samples.iter().map(|row| row[index]).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &[f64])> {
        self.times
            .iter()
            .copied()
            .zip(self.samples.iter().map(Vec::as_slice))
    }
}

/// Writes a trajectory to the results text format.
pub fn write_trajectory(trajectory: &Trajectory, file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);

    write!(writer, "t")?;
    for name in trajectory.variables() {
        write!(writer, " {name}")?;
    }
    writeln!(writer)?;

    for (time, values) in trajectory.iter() {
        write!(writer, "{time}")?;
        for value in values {
            write!(writer, " {value:.6}")?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;

    info!(
        "saved {} samples to {}",
        trajectory.len(),
        file_path.display()
    );
    Ok(())
}

/// Reads a results file written by [`write_trajectory`].
pub fn read_trajectory(file_path: &Path) -> Result<Trajectory> {
    let file = File::open(file_path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines().enumerate();

    let (_, header) = lines.next().ok_or(Error::MalformedResults {
        line: 1,
        message: "missing header".to_string(),
    })?;
    let header = header?;
    let mut tokens = header.split_whitespace();
    if tokens.next() != Some("t") {
        return Err(Error::MalformedResults {
            line: 1,
            message: "header must start with 't'".to_string(),
        });
    }
    let variables: Vec<String> = tokens.map(str::to_string).collect();

    let mut trajectory = Trajectory::new(variables);
    for (line_num, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let values = line
            .split_whitespace()
            .map(str::parse::<f64>)
            .collect::<core::result::Result<Vec<f64>, _>>()
            .map_err(|e| Error::MalformedResults {
                line: line_num + 1,
                message: e.to_string(),
            })?;
        if values.len() != trajectory.variables().len() + 1 {
            return Err(Error::MalformedResults {
                line: line_num + 1,
                message: format!(
                    "expected {} values, found {}",
                    trajectory.variables().len() + 1,
                    values.len()
                ),
            });
        }
        trajectory.append(values[0], values[1..].to_vec());
    }
    Ok(trajectory)
}
