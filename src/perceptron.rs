//! Runs a logic gate circuit over every input pair and reports the majority outcome.

use std::io::Write;

use tracing::info;

use crate::boolean_circuits::LogicGate;
use crate::circuit::Circuit;
use crate::errors::{CircuitError, CircuitResult};
use crate::simulator::{Backend, Counts};

/// Every input pair, in the order they are evaluated.
pub const INPUT_PAIRS: [(bool, bool); 4] = [
    (false, false),
    (false, true),
    (true, false),
    (true, true),
];

/// The result of running one input pair.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// The `(a, b)` inputs.
    pub inputs: (bool, bool),
    /// The circuit which was run.
    pub circuit: Circuit,
    /// Outcome frequencies.
    pub counts: Counts,
    /// The most frequent outcome.
    pub predicted: String,
}

impl Evaluation {
    /// The predicted output bit.
    pub fn output(&self) -> bool {
        self.predicted.ends_with('1')
    }
}

/// Build, run and tally `gate` for every pair in [`INPUT_PAIRS`]. The first error stops the run.
///
/// ```
/// use qperceptron::prelude::*;
///
/// # fn main() -> CircuitResult<()> {
/// let mut sim = StatevectorSimulator::<f64>::new(SimulatorConfig::default().with_seed(1))?;
/// let evals = evaluate_truth_table(LogicGate::And, &mut sim, DEFAULT_SHOTS)?;
/// let outputs = evals.iter().map(Evaluation::output).collect::<Vec<_>>();
/// assert_eq!(outputs, vec![false, false, false, true]);
/// # Ok(())
/// # }
/// ```
pub fn evaluate_truth_table<B: Backend + ?Sized>(
    gate: LogicGate,
    backend: &mut B,
    shots: usize,
) -> CircuitResult<Vec<Evaluation>> {
    INPUT_PAIRS
        .iter()
        .map(|&(a, b)| -> CircuitResult<Evaluation> {
            let circuit = gate.circuit(a, b)?;
            let counts = backend.run(&circuit, shots)?;
            let predicted = counts
                .most_frequent()
                .ok_or_else(|| CircuitError::new("backend returned no counts"))?
                .to_string();
            info!(%gate, a, b, %predicted, "evaluated input pair");
            Ok(Evaluation {
                inputs: (a, b),
                circuit,
                counts,
                predicted,
            })
        })
        .collect()
}

/// Write the console report for `evaluations`.
pub fn write_report<W: Write>(evaluations: &[Evaluation], mut w: W) -> std::io::Result<()> {
    for eval in evaluations {
        let (a, b) = (u8::from(eval.inputs.0), u8::from(eval.inputs.1));
        writeln!(w, "--- Circuit for inputs ({}, {}) ---", a, b)?;
        writeln!(w, "{}", eval.circuit)?;
        writeln!(w, "Input: ({}, {}) -> Predicted Output: {}", a, b, eval.predicted)?;
        writeln!(w, "Measurement Counts: {}", eval.counts)?;
        writeln!(w, "---------------------------------------")?;
    }
    Ok(())
}

/// Evaluate `gate` and write the report to `w`.
pub fn run_truth_table<B, W>(
    gate: LogicGate,
    backend: &mut B,
    shots: usize,
    w: W,
) -> CircuitResult<Vec<Evaluation>>
where
    B: Backend + ?Sized,
    W: Write,
{
    let evaluations = evaluate_truth_table(gate, backend, shots)?;
    write_report(&evaluations, w)?;
    Ok(evaluations)
}
