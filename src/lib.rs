#![forbid(unsafe_code)]
#![deny(
    unreachable_pub,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    missing_docs
)]

//! Classical two-input logic gates encoded as 3-qubit quantum circuits, plus the small
//! statevector simulator needed to run them.
//!
//! Inputs are written onto qubits 0 and 1 with X gates, the gate's output lands on qubit 2, and
//! qubit 2 is measured into a single classical bit. Running the circuit for many shots and
//! taking the most frequent outcome recovers the truth table.
//!
//! # Example (AND)
//! ```
//! use qperceptron::prelude::*;
//!
//! # fn main() -> CircuitResult<()> {
//! let circuit = and_circuit(true, true)?;
//! println!("{}", circuit);
//!
//! let mut sim = StatevectorSimulator::<f64>::new(SimulatorConfig::default().with_seed(42))?;
//! let counts = sim.run(&circuit, DEFAULT_SHOTS)?;
//!
//! assert_eq!(counts.most_frequent(), Some("1"));
//! assert!(counts.is_point_mass());
//! # Ok(())
//! # }
//! ```
//!
//! # Building circuits by hand
//! Registers handed out by [`builder::LocalBuilder`] are consumed and returned by every gate, so
//! the borrow checker rejects reusing a qubit inside one gate.
//! ```
//! use qperceptron::prelude::*;
//!
//! # fn main() -> CircuitResult<()> {
//! let mut b = LocalBuilder::new();
//! let q0 = b.qubit();
//! let q1 = b.qubit();
//! let c0 = b.classical_bit();
//! let c1 = b.classical_bit();
//!
//! let q0 = b.h(q0);
//! let (q0, q1) = b.cnot(q0, q1)?;
//! b.measure(q0, c0)?;
//! b.measure(q1, c1)?;
//!
//! let circuit = b.build()?;
//! println!("{}", circuit.to_openqasm());
//! # Ok(())
//! # }
//! ```

/// The AND and OR circuit builders.
pub mod boolean_circuits;
/// A circuit builder which hands out owned qubit registers.
pub mod builder;
/// The immutable circuit representation.
pub mod circuit;
pub mod drawer;
/// Circuit error types.
pub mod errors;
pub mod logging;
pub mod perceptron;
pub mod qasm;
mod rayon_helper;
pub mod simulator;
/// Lower-level state operations.
pub mod state_ops;
/// Reusable types.
pub mod types;
/// Utility functions for bit and index manipulation
pub mod utils;

pub use num_complex::Complex;
pub use types::*;

/// Commonly used types and traits.
/// ```
/// use qperceptron::prelude::*;
/// ```
pub mod prelude {
    pub use super::*;
    pub use crate::boolean_circuits::{and_circuit, or_circuit, LogicGate};
    pub use crate::builder::{LocalBuilder, Qudit};
    pub use crate::circuit::{Circuit, Instruction};
    pub use crate::errors::*;
    pub use crate::perceptron::{
        evaluate_truth_table, run_truth_table, write_report, Evaluation, INPUT_PAIRS,
    };
    pub use crate::qasm::ToOpenQasm;
    pub use crate::simulator::{
        Backend, Counts, SimulatorConfig, StatevectorSimulator, DEFAULT_SHOTS,
    };
}
