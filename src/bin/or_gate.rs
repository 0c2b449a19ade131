//! Prints the OR truth table as predicted by the quantum circuit.

use qperceptron::logging::init_tracing;
use qperceptron::prelude::*;

fn main() -> Result<(), CircuitError> {
    init_tracing();
    let mut backend = StatevectorSimulator::<f64>::default();
    let stdout = std::io::stdout();
    run_truth_table(LogicGate::Or, &mut backend, DEFAULT_SHOTS, stdout.lock())?;
    Ok(())
}
