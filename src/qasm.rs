//! OpenQASM 2.0 export utilities.

use std::fmt;
use std::fs::File;
use std::io::Write as IoWrite;
use std::path::Path;

use crate::circuit::{Circuit, Instruction};

/// Exports a circuit to OpenQASM 2.0 text.
pub trait ToOpenQasm {
    /// Returns the circuit as OpenQASM 2.0 text.
    fn to_openqasm(&self) -> String;
}

/// Displays a circuit as OpenQASM 2.0.
#[derive(Debug, Clone, Copy)]
pub struct OpenQasm<'a>(pub &'a Circuit);

impl fmt::Display for OpenQasm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let circuit = self.0;
        writeln!(f, "OPENQASM 2.0;")?;
        writeln!(f, "include \"qelib1.inc\";")?;
        writeln!(f, "qreg q[{}];", circuit.n_qubits())?;
        if circuit.n_clbits() > 0 {
            writeln!(f, "creg c[{}];", circuit.n_clbits())?;
        }
        circuit
            .instructions()
            .iter()
            .try_for_each(|inst| emit_instruction(f, inst))
    }
}

impl ToOpenQasm for Circuit {
    fn to_openqasm(&self) -> String {
        OpenQasm(self).to_string()
    }
}

impl Circuit {
    /// Writes the circuit as OpenQASM 2.0 into `path`.
    pub fn write_openqasm_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut f = File::create(path)?;
        write!(f, "{}", OpenQasm(self))
    }
}

fn emit_instruction(f: &mut fmt::Formatter<'_>, inst: &Instruction) -> fmt::Result {
    match inst {
        Instruction::Measure { qubit, clbit } => {
            writeln!(f, "measure q[{}] -> c[{}];", qubit, clbit)
        }
        other => {
            let args = other
                .qubits()
                .iter()
                .map(|q| format!("q[{}]", q))
                .collect::<Vec<_>>();
            writeln!(f, "{} {};", other.name(), args.join(","))
        }
    }
}

#[cfg(test)]
mod qasm_tests {
    use super::*;
    use crate::errors::CircuitResult;

    #[test]
    fn test_qasm_header_and_gates() -> CircuitResult<()> {
        let circuit = Circuit::new(
            3,
            1,
            vec![
                Instruction::X { qubit: 1 },
                Instruction::Barrier {
                    qubits: smallvec::smallvec![0, 1, 2],
                },
                Instruction::Ccx {
                    controls: [0, 1],
                    target: 2,
                },
                Instruction::Measure { qubit: 2, clbit: 0 },
            ],
        )?;
        let expected = "OPENQASM 2.0;\n\
                        include \"qelib1.inc\";\n\
                        qreg q[3];\n\
                        creg c[1];\n\
                        x q[1];\n\
                        barrier q[0],q[1],q[2];\n\
                        ccx q[0],q[1],q[2];\n\
                        measure q[2] -> c[0];\n";
        assert_eq!(circuit.to_openqasm(), expected);
        Ok(())
    }

    #[test]
    fn test_write_openqasm_file() -> CircuitResult<()> {
        let circuit = Circuit::new(
            1,
            1,
            vec![
                Instruction::X { qubit: 0 },
                Instruction::Measure { qubit: 0, clbit: 0 },
            ],
        )?;
        let path = std::env::temp_dir().join(format!("qperceptron-{}.qasm", std::process::id()));
        circuit.write_openqasm_file(&path)?;
        let written = std::fs::read_to_string(&path)?;
        std::fs::remove_file(&path)?;
        assert_eq!(written, circuit.to_openqasm());
        Ok(())
    }

    #[test]
    fn test_qasm_omits_empty_creg() -> CircuitResult<()> {
        let circuit = Circuit::new(
            2,
            0,
            vec![
                Instruction::H { qubit: 0 },
                Instruction::Cx {
                    control: 0,
                    target: 1,
                },
            ],
        )?;
        let qasm = circuit.to_openqasm();
        assert!(!qasm.contains("creg"));
        assert!(qasm.ends_with("h q[0];\ncx q[0],q[1];\n"));
        Ok(())
    }
}
