//! Two-input logic gates written as 3-qubit circuits.
//!
//! Qubits 0 and 1 carry the inputs, qubit 2 is the output and is measured into classical bit 0.

use std::fmt;

use crate::builder::{LocalBuilder, Qudit};
use crate::circuit::Circuit;
use crate::errors::CircuitResult;

/// Allocates the three qubits and one classical bit, then flips each input qubit whose bit is set.
fn encode_inputs(b: &mut LocalBuilder, a: bool, bb: bool) -> (Qudit, Qudit, Qudit, usize) {
    let qa = b.qubit();
    let qb = b.qubit();
    let out = b.qubit();
    let c = b.classical_bit();
    let qa = if a { b.x(qa) } else { qa };
    let qb = if bb { b.x(qb) } else { qb };
    (qa, qb, out, c)
}

/// Circuit computing `a AND b` with a toffoli onto the output qubit.
///
/// ```
/// use qperceptron::boolean_circuits::and_circuit;
/// use qperceptron::circuit::Instruction;
///
/// let c = and_circuit(true, true).unwrap();
/// assert!(c.instructions().contains(&Instruction::Ccx { controls: [0, 1], target: 2 }));
/// ```
pub fn and_circuit(a: bool, b: bool) -> CircuitResult<Circuit> {
    let mut builder = LocalBuilder::new();
    let (qa, qb, out, c) = encode_inputs(&mut builder, a, b);

    builder.barrier_all();
    let (_, _, out) = builder.toffoli(qa, qb, out)?;
    builder.barrier_all();

    builder.measure(out, c)?;
    builder.build()
}

/// Circuit computing `a OR b`.
///
/// The disjunction is evaluated classically and only the result is written to the output qubit,
/// so unlike [`and_circuit`] no multi-qubit gate is involved.
pub fn or_circuit(a: bool, b: bool) -> CircuitResult<Circuit> {
    let mut builder = LocalBuilder::new();
    let (_qa, _qb, out, c) = encode_inputs(&mut builder, a, b);

    builder.barrier_all();
    let out = if a || b { builder.x(out) } else { out };
    builder.barrier_all();

    builder.measure(out, c)?;
    builder.build()
}

/// The logic gates which can be turned into circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicGate {
    /// Logical conjunction.
    And,
    /// Logical disjunction.
    Or,
}

impl LogicGate {
    /// Build the circuit for inputs `a`, `b`.
    pub fn circuit(self, a: bool, b: bool) -> CircuitResult<Circuit> {
        match self {
            LogicGate::And => and_circuit(a, b),
            LogicGate::Or => or_circuit(a, b),
        }
    }

    /// The expected classical output.
    pub fn classical(self, a: bool, b: bool) -> bool {
        match self {
            LogicGate::And => a && b,
            LogicGate::Or => a || b,
        }
    }
}

impl fmt::Display for LogicGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicGate::And => write!(f, "AND"),
            LogicGate::Or => write!(f, "OR"),
        }
    }
}

#[cfg(test)]
mod boolean_circuit_tests {
    use super::*;
    use crate::circuit::Instruction;

    fn count(c: &Circuit, name: &str) -> usize {
        c.instructions().iter().filter(|i| i.name() == name).count()
    }

    #[test]
    fn test_and_layout() -> CircuitResult<()> {
        let c = and_circuit(true, false)?;
        assert_eq!(c.n_qubits(), 3);
        assert_eq!(c.n_clbits(), 1);
        assert_eq!(c.instructions()[0], Instruction::X { qubit: 0 });
        assert_eq!(count(&c, "x"), 1);
        assert_eq!(count(&c, "barrier"), 2);
        assert_eq!(count(&c, "ccx"), 1);
        assert_eq!(
            c.instructions().last(),
            Some(&Instruction::Measure { qubit: 2, clbit: 0 })
        );
        Ok(())
    }

    #[test]
    fn test_or_flips_output_classically() -> CircuitResult<()> {
        let c = or_circuit(false, true)?;
        assert_eq!(count(&c, "ccx"), 0);
        assert!(c.instructions().contains(&Instruction::X { qubit: 1 }));
        assert!(c.instructions().contains(&Instruction::X { qubit: 2 }));

        let c = or_circuit(false, false)?;
        assert_eq!(count(&c, "x"), 0);
        Ok(())
    }

    #[test]
    fn test_builders_are_pure() -> CircuitResult<()> {
        for gate in [LogicGate::And, LogicGate::Or] {
            for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
                assert_eq!(gate.circuit(a, b)?, gate.circuit(a, b)?);
            }
        }
        Ok(())
    }

    #[test]
    fn test_classical_truth() {
        assert!(!LogicGate::And.classical(true, false));
        assert!(LogicGate::And.classical(true, true));
        assert!(LogicGate::Or.classical(false, true));
        assert!(!LogicGate::Or.classical(false, false));
        assert_eq!(LogicGate::Or.to_string(), "OR");
    }
}
