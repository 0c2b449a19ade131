use std::num::NonZeroUsize;

use smallvec::SmallVec;

use crate::circuit::{Circuit, Instruction};
use crate::errors::{CircuitError, CircuitResult};

/// A register of one or more qubits handed out by a [`LocalBuilder`].
///
/// Registers are not `Clone`: a gate consumes the registers it acts on and hands them back, so a
/// qubit cannot appear twice in one gate.
#[derive(Debug, PartialEq, Eq)]
pub struct Qudit {
    indices: Vec<usize>,
}

impl Qudit {
    fn new<It>(indices: It) -> Option<Self>
    where
        It: Into<Vec<usize>>,
    {
        let indices = indices.into();
        if !indices.is_empty() {
            Some(Self { indices })
        } else {
            None
        }
    }

    fn new_from_iter<It>(indices: It) -> Option<Self>
    where
        It: Iterator<Item = usize>,
    {
        Self::new(indices.collect::<Vec<_>>())
    }

    /// Size of the register in qubits.
    pub fn n(&self) -> usize {
        self.indices.len()
    }

    /// Absolute indices represented by the register.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    fn single(&self, gate: &'static str) -> CircuitResult<usize> {
        match self.indices.as_slice() {
            [q] => Ok(*q),
            _ => Err(CircuitError::RegisterWidth {
                gate,
                expected: 1,
                found: self.n(),
            }),
        }
    }
}

/// Builds a [`Circuit`] one gate at a time.
///
/// ```
/// use qperceptron::builder::LocalBuilder;
///
/// # fn main() -> qperceptron::errors::CircuitResult<()> {
/// let mut b = LocalBuilder::default();
/// let q = b.qubit();
/// let c = b.classical_bit();
/// let q = b.not(q);
/// let _q = b.measure(q, c)?;
/// let circuit = b.build()?;
/// assert_eq!(circuit.n_qubits(), 1);
/// assert_eq!(circuit.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Default, Debug)]
pub struct LocalBuilder {
    pipeline: Vec<Instruction>,
    n: usize,
    n_clbits: usize,
}

impl LocalBuilder {
    /// Make an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of qubits allocated so far.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of classical bits allocated so far.
    pub fn n_clbits(&self) -> usize {
        self.n_clbits
    }

    /// Number of instructions recorded so far.
    pub fn pipeline_depth(&self) -> usize {
        self.pipeline.len()
    }

    /// Construct a single qubit, starting in `|0>`.
    pub fn qubit(&mut self) -> Qudit {
        self.register(NonZeroUsize::MIN)
    }

    /// Construct a register with multiple qubits.
    pub fn register(&mut self, n: NonZeroUsize) -> Qudit {
        let n: usize = n.into();
        let r = Qudit {
            indices: (self.n..self.n + n).collect(),
        };
        self.n += n;
        r
    }

    /// Construct a register with multiple qubits. Fails if n=0.
    pub fn try_register(&mut self, n: usize) -> Option<Qudit> {
        NonZeroUsize::new(n).map(|n| self.register(n))
    }

    /// Allocate a classical bit and return its index.
    pub fn classical_bit(&mut self) -> usize {
        let c = self.n_clbits;
        self.n_clbits += 1;
        c
    }

    /// Merge two registers into a single register with first the r1 indices, then the r2 indices.
    pub fn merge_two_registers(&mut self, r1: Qudit, r2: Qudit) -> Qudit {
        Qudit {
            indices: r1.indices.into_iter().chain(r2.indices).collect(),
        }
    }

    /// Merge multiple registers together into a single register, returns None if none given.
    pub fn merge_registers<It>(&mut self, rs: It) -> Option<Qudit>
    where
        It: IntoIterator<Item = Qudit>,
    {
        Qudit::new_from_iter(rs.into_iter().flat_map(|r| r.indices))
    }

    /// Split a register into single qubits.
    pub fn split_all_register(&mut self, r: Qudit) -> Vec<Qudit> {
        r.indices
            .into_iter()
            .map(|i| Qudit { indices: vec![i] })
            .collect()
    }

    /// Apply a pauli X to every qubit of `r`.
    pub fn x(&mut self, r: Qudit) -> Qudit {
        self.pipeline
            .extend(r.indices.iter().map(|q| Instruction::X { qubit: *q }));
        r
    }

    /// Same as [`LocalBuilder::x`].
    pub fn not(&mut self, r: Qudit) -> Qudit {
        self.x(r)
    }

    /// Apply a hadamard to every qubit of `r`.
    pub fn h(&mut self, r: Qudit) -> Qudit {
        self.pipeline
            .extend(r.indices.iter().map(|q| Instruction::H { qubit: *q }));
        r
    }

    /// Flip `t` if `c` is `|1>`.
    pub fn cnot(&mut self, c: Qudit, t: Qudit) -> CircuitResult<(Qudit, Qudit)> {
        let control = c.single("cx")?;
        let target = t.single("cx")?;
        self.pipeline.push(Instruction::Cx { control, target });
        Ok((c, t))
    }

    /// Flip `t` if both `c0` and `c1` are `|1>`.
    pub fn toffoli(
        &mut self,
        c0: Qudit,
        c1: Qudit,
        t: Qudit,
    ) -> CircuitResult<(Qudit, Qudit, Qudit)> {
        let controls = [c0.single("ccx")?, c1.single("ccx")?];
        let target = t.single("ccx")?;
        self.pipeline.push(Instruction::Ccx { controls, target });
        Ok((c0, c1, t))
    }

    /// Insert a barrier across the given registers.
    pub fn barrier(&mut self, rs: &[&Qudit]) {
        let qubits: SmallVec<[usize; 4]> = rs
            .iter()
            .flat_map(|r| r.indices.iter().copied())
            .collect();
        if !qubits.is_empty() {
            self.pipeline.push(Instruction::Barrier { qubits });
        }
    }

    /// Insert a barrier across every qubit allocated so far.
    pub fn barrier_all(&mut self) {
        if self.n > 0 {
            self.pipeline.push(Instruction::Barrier {
                qubits: (0..self.n).collect(),
            });
        }
    }

    /// Measure the single qubit `r` into classical bit `clbit`.
    pub fn measure(&mut self, r: Qudit, clbit: usize) -> CircuitResult<Qudit> {
        let qubit = r.single("measure")?;
        if clbit >= self.n_clbits {
            return Err(CircuitError::ClassicalBitOutOfRange {
                clbit,
                n_clbits: self.n_clbits,
            });
        }
        self.pipeline.push(Instruction::Measure { qubit, clbit });
        Ok(r)
    }

    /// Freeze the recorded instructions into a [`Circuit`].
    pub fn build(self) -> CircuitResult<Circuit> {
        Circuit::new(self.n, self.n_clbits, self.pipeline)
    }
}

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn test_register_indices_are_sequential() {
        let mut b = LocalBuilder::new();
        let q = b.qubit();
        let r = b.try_register(2).unwrap();
        assert_eq!(q.indices(), &[0]);
        assert_eq!(r.indices(), &[1, 2]);
        assert!(b.try_register(0).is_none());
        assert_eq!(b.n(), 3);
    }

    #[test]
    fn test_x_broadcasts_over_register() -> CircuitResult<()> {
        let mut b = LocalBuilder::new();
        let r = b.try_register(3).unwrap();
        let _r = b.x(r);
        let c = b.build()?;
        assert_eq!(
            c.instructions(),
            &[
                Instruction::X { qubit: 0 },
                Instruction::X { qubit: 1 },
                Instruction::X { qubit: 2 },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_toffoli_requires_single_qubits() {
        let mut b = LocalBuilder::new();
        let ra = b.try_register(2).unwrap();
        let q1 = b.qubit();
        let q2 = b.qubit();
        let res = b.toffoli(ra, q1, q2);
        assert!(matches!(
            res,
            Err(CircuitError::RegisterWidth {
                gate: "ccx",
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_measure_needs_allocated_clbit() {
        let mut b = LocalBuilder::new();
        let q = b.qubit();
        assert!(matches!(
            b.measure(q, 0),
            Err(CircuitError::ClassicalBitOutOfRange { .. })
        ));
    }

    #[test]
    fn test_merge_and_split() {
        let mut b = LocalBuilder::new();
        let q0 = b.qubit();
        let q1 = b.qubit();
        let r = b.merge_two_registers(q1, q0);
        assert_eq!(r.indices(), &[1, 0]);
        let qs = b.split_all_register(r);
        assert_eq!(qs.len(), 2);
        let r = b.merge_registers(qs).unwrap();
        assert_eq!(r.n(), 2);
    }

    #[test]
    fn test_barrier_all_spans_every_qubit() -> CircuitResult<()> {
        let mut b = LocalBuilder::new();
        let _r = b.try_register(3).unwrap();
        assert_eq!(b.pipeline_depth(), 0);
        b.barrier_all();
        assert_eq!(b.pipeline_depth(), 1);
        let c = b.build()?;
        assert_eq!(
            c.instructions(),
            &[Instruction::Barrier {
                qubits: smallvec::smallvec![0, 1, 2]
            }]
        );
        Ok(())
    }
}
