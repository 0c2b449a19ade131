use std::fmt;

use smallvec::SmallVec;

use crate::drawer::draw;
use crate::errors::{CircuitError, CircuitResult};
use crate::state_ops::matrix_ops::{make_control_op, make_h_op, make_x_op, MatrixOp};
use crate::types::Precision;

/// Qubit indices touched by a single instruction.
pub type QubitList = SmallVec<[usize; 4]>;

/// A single operation in a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// A pauli X (bit-flip) gate.
    X {
        /// Qubit to flip.
        qubit: usize,
    },
    /// A hadamard gate.
    H {
        /// Qubit acted on.
        qubit: usize,
    },
    /// A controlled pauli X.
    Cx {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
    },
    /// A controlled-controlled pauli X (toffoli).
    Ccx {
        /// Both control qubits.
        controls: [usize; 2],
        /// Target qubit.
        target: usize,
    },
    /// A visual separator, no effect on the state.
    Barrier {
        /// Qubits the barrier spans.
        qubits: QubitList,
    },
    /// Measure a qubit in the computational basis into a classical bit.
    Measure {
        /// Measured qubit.
        qubit: usize,
        /// Classical bit receiving the result.
        clbit: usize,
    },
}

impl Instruction {
    /// Lowercase gate name, as used in OpenQASM.
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::X { .. } => "x",
            Instruction::H { .. } => "h",
            Instruction::Cx { .. } => "cx",
            Instruction::Ccx { .. } => "ccx",
            Instruction::Barrier { .. } => "barrier",
            Instruction::Measure { .. } => "measure",
        }
    }

    /// Qubits touched, controls before targets.
    pub fn qubits(&self) -> QubitList {
        match self {
            Instruction::X { qubit } | Instruction::H { qubit } => smallvec::smallvec![*qubit],
            Instruction::Cx { control, target } => smallvec::smallvec![*control, *target],
            Instruction::Ccx { controls, target } => {
                smallvec::smallvec![controls[0], controls[1], *target]
            }
            Instruction::Barrier { qubits } => qubits.clone(),
            Instruction::Measure { qubit, .. } => smallvec::smallvec![*qubit],
        }
    }

    /// Whether the instruction changes the state as a unitary.
    pub fn is_unitary(&self) -> bool {
        !matches!(
            self,
            Instruction::Barrier { .. } | Instruction::Measure { .. }
        )
    }

    /// The matrix op for a unitary instruction, `None` for barriers and measurements.
    pub fn to_matrix_op<P: Precision>(&self) -> CircuitResult<Option<MatrixOp<P>>> {
        let op = match self {
            Instruction::X { qubit } => make_x_op(*qubit),
            Instruction::H { qubit } => make_h_op(*qubit),
            Instruction::Cx { control, target } => {
                make_control_op(vec![*control], make_x_op(*target))?
            }
            Instruction::Ccx { controls, target } => {
                make_control_op(controls.to_vec(), make_x_op(*target))?
            }
            Instruction::Barrier { .. } | Instruction::Measure { .. } => return Ok(None),
        };
        Ok(Some(op))
    }
}

/// An immutable, ordered list of instructions over `n_qubits` qubits and `n_clbits`
/// classical bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Circuit {
    n_qubits: usize,
    n_clbits: usize,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Build a circuit, checking that every index is in range and that no gate repeats a qubit.
    ///
    /// ```
    /// use qperceptron::circuit::{Circuit, Instruction};
    ///
    /// let c = Circuit::new(1, 1, vec![
    ///     Instruction::X { qubit: 0 },
    ///     Instruction::Measure { qubit: 0, clbit: 0 },
    /// ]).unwrap();
    /// assert_eq!(c.len(), 2);
    /// assert!(Circuit::new(1, 1, vec![Instruction::X { qubit: 3 }]).is_err());
    /// ```
    pub fn new(
        n_qubits: usize,
        n_clbits: usize,
        instructions: Vec<Instruction>,
    ) -> CircuitResult<Self> {
        for inst in &instructions {
            let qubits = inst.qubits();
            if let Some(q) = qubits.iter().find(|q| **q >= n_qubits) {
                return Err(CircuitError::new(format!(
                    "{} acts on qubit {} but circuit has {} qubits",
                    inst.name(),
                    q,
                    n_qubits
                )));
            }
            let mut sorted = qubits.clone();
            sorted.sort_unstable();
            sorted.dedup();
            if sorted.len() != qubits.len() {
                return Err(CircuitError::RepeatedQubit {
                    gate: inst.name(),
                    indices: qubits.to_vec(),
                });
            }
            if let Instruction::Measure { clbit, .. } = inst {
                if *clbit >= n_clbits {
                    return Err(CircuitError::ClassicalBitOutOfRange {
                        clbit: *clbit,
                        n_clbits,
                    });
                }
            }
        }
        Ok(Self {
            n_qubits,
            n_clbits,
            instructions,
        })
    }

    /// Number of qubits.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Number of classical bits.
    pub fn n_clbits(&self) -> usize {
        self.n_clbits
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions, barriers included.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// `(qubit, clbit)` pairs for every measurement, in order.
    pub fn measurements(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.instructions.iter().filter_map(|inst| match inst {
            Instruction::Measure { qubit, clbit } => Some((*qubit, *clbit)),
            _ => None,
        })
    }

    /// True if no unitary touches a qubit after that qubit has been measured. Such circuits can be
    /// sampled from a single final state.
    pub fn has_terminal_measurements(&self) -> bool {
        let mut measured = vec![false; self.n_qubits];
        for inst in &self.instructions {
            match inst {
                Instruction::Measure { qubit, .. } => measured[*qubit] = true,
                unitary if unitary.is_unitary() => {
                    if unitary.qubits().iter().any(|q| measured[*q]) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        true
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", draw(self))
    }
}
