//! Shot-based simulation of a [`Circuit`] on a dense statevector.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use num_traits::{One, ToPrimitive, Zero};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::circuit::{Circuit, Instruction};
use crate::errors::{CircuitError, CircuitResult};
use crate::state_ops::matrix_ops::{apply_op, MatrixOp};
use crate::state_ops::measurement_ops::measure;
use crate::utils::{bitstring, get_bit, set_bit};
use crate::{Complex, Precision};

/// Number of shots used when none is given.
pub const DEFAULT_SHOTS: usize = 1024;

/// Largest circuit the dense simulator will allocate a state for.
pub const MAX_QUBITS: usize = 24;

/// Most classical bits a single shot can report; outcomes are packed into one word.
pub const MAX_CLBITS: usize = usize::BITS as usize;

/// Something which runs circuits and reports how often each classical outcome was seen.
pub trait Backend {
    /// Run `circuit` `shots` times.
    fn run(&mut self, circuit: &Circuit, shots: usize) -> CircuitResult<Counts>;
}

/// Outcome frequencies keyed by classical bit-string, classical bit 0 rightmost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    counts: BTreeMap<String, usize>,
}

impl Counts {
    /// Add `count` observations of `outcome`. Zero counts are ignored.
    pub fn record<S: Into<String>>(&mut self, outcome: S, count: usize) {
        if count == 0 {
            return;
        }
        *self.counts.entry(outcome.into()).or_insert(0) += count;
    }

    /// Total number of observations.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Count for `outcome`, zero if never seen.
    pub fn get(&self, outcome: &str) -> usize {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The outcome seen most often. Ties go to the lexicographically smallest bit-string.
    ///
    /// ```
    /// use qperceptron::simulator::Counts;
    ///
    /// let mut counts = Counts::default();
    /// counts.record("1", 700);
    /// counts.record("0", 324);
    /// assert_eq!(counts.most_frequent(), Some("1"));
    /// ```
    pub fn most_frequent(&self) -> Option<&str> {
        self.counts
            .iter()
            .fold(None, |best: Option<(&String, usize)>, (k, v)| match best {
                Some((_, bv)) if bv >= *v => best,
                _ => Some((k, *v)),
            })
            .map(|(k, _)| k.as_str())
    }

    /// True if exactly one outcome was observed.
    pub fn is_point_mass(&self) -> bool {
        self.counts.values().filter(|v| **v > 0).count() == 1
    }

    /// Outcomes and counts in bit-string order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {}", k, v)?;
        }
        write!(f, "}}")
    }
}

/// Options for [`StatevectorSimulator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatorConfig {
    /// Seed for the sampling rng, `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Probability that each measured bit is reported flipped.
    pub readout_error: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            readout_error: 0.0,
        }
    }
}

impl SimulatorConfig {
    /// Use a fixed seed so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Flip each measured bit with probability `p`.
    pub fn with_readout_error(mut self, p: f64) -> Self {
        self.readout_error = p;
        self
    }

    fn validate(&self) -> CircuitResult<()> {
        if (0.0..1.0).contains(&self.readout_error) {
            Ok(())
        } else {
            Err(CircuitError::InvalidRequest(format!(
                "readout error {} outside [0, 1)",
                self.readout_error
            )))
        }
    }
}

/// A dense statevector simulator.
///
/// ```
/// use qperceptron::prelude::*;
///
/// # fn main() -> CircuitResult<()> {
/// let mut b = LocalBuilder::new();
/// let q = b.qubit();
/// let c = b.classical_bit();
/// let q = b.x(q);
/// b.measure(q, c)?;
/// let circuit = b.build()?;
///
/// let mut sim = StatevectorSimulator::<f64>::new(SimulatorConfig::default().with_seed(3))?;
/// let counts = sim.run(&circuit, 100)?;
/// assert_eq!(counts.get("1"), 100);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StatevectorSimulator<P: Precision = f64> {
    config: SimulatorConfig,
    rng: StdRng,
    phantom: PhantomData<P>,
}

impl<P: Precision> Default for StatevectorSimulator<P> {
    fn default() -> Self {
        Self {
            config: SimulatorConfig::default(),
            rng: StdRng::from_entropy(),
            phantom: PhantomData,
        }
    }
}

impl<P: Precision> StatevectorSimulator<P> {
    /// Make a simulator, rejecting invalid configurations.
    pub fn new(config: SimulatorConfig) -> CircuitResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            rng,
            phantom: PhantomData,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// The final state of `circuit` with measurements skipped, amplitudes indexed big-endian.
    pub fn statevector(&self, circuit: &Circuit) -> CircuitResult<Vec<Complex<P>>> {
        check_size(circuit)?;
        let ops = compile_ops::<P>(circuit)?;
        let n = circuit.n_qubits();
        let (mut state, mut arena) = initial_state::<P>(n);
        for op in ops.iter().flatten() {
            apply_op(n, op, &state, &mut arena);
            std::mem::swap(&mut state, &mut arena);
        }
        Ok(state)
    }

    /// Sample every shot from one final state. Valid only for terminal measurements.
    fn run_sampled(
        &mut self,
        circuit: &Circuit,
        shots: usize,
        counts: &mut Counts,
    ) -> CircuitResult<()> {
        let n = circuit.n_qubits();
        let state = self.statevector(circuit)?;
        let weights = state
            .iter()
            .map(|c| c.norm_sqr().to_f64().unwrap_or(0.0))
            .collect::<Vec<_>>();
        let dist = WeightedIndex::new(&weights)
            .map_err(|e| CircuitError::new(format!("cannot sample state: {}", e)))?;
        let measurements = circuit.measurements().collect::<Vec<_>>();
        let clbits = measured_clbits(&measurements);

        let mut tally = BTreeMap::<usize, usize>::new();
        for _ in 0..shots {
            let index = dist.sample(&mut self.rng);
            let bits = measurements.iter().fold(0, |acc, (qubit, clbit)| {
                set_bit(acc, *clbit, get_bit(index, n - 1 - qubit))
            });
            let bits = self.apply_readout_error(bits, &clbits);
            *tally.entry(bits).or_insert(0) += 1;
        }
        tally
            .into_iter()
            .for_each(|(bits, c)| counts.record(bitstring(bits, circuit.n_clbits()), c));
        Ok(())
    }

    /// Run every shot through the whole circuit, collapsing at each measurement.
    fn run_per_shot(
        &mut self,
        circuit: &Circuit,
        shots: usize,
        counts: &mut Counts,
    ) -> CircuitResult<()> {
        let n = circuit.n_qubits();
        let ops = compile_ops::<P>(circuit)?;
        let clbits = measured_clbits(&circuit.measurements().collect::<Vec<_>>());
        for _ in 0..shots {
            let (mut state, mut arena) = initial_state::<P>(n);
            let mut bits = 0usize;
            for (inst, op) in circuit.instructions().iter().zip(ops.iter()) {
                match (inst, op) {
                    (_, Some(op)) => apply_op(n, op, &state, &mut arena),
                    (Instruction::Measure { qubit, clbit }, None) => {
                        let (m, _) = measure(n, &[*qubit], &state, &mut arena, &mut self.rng);
                        bits = set_bit(bits, *clbit, m == 1);
                    }
                    (_, None) => continue,
                }
                std::mem::swap(&mut state, &mut arena);
            }
            let bits = self.apply_readout_error(bits, &clbits);
            counts.record(bitstring(bits, circuit.n_clbits()), 1);
        }
        Ok(())
    }

    /// Flip each bit in `clbits` with the configured probability, at most once per shot.
    fn apply_readout_error(&mut self, bits: usize, clbits: &[usize]) -> usize {
        let p = self.config.readout_error;
        if p <= 0.0 {
            return bits;
        }
        let rng = &mut self.rng;
        clbits.iter().fold(bits, |acc, clbit| {
            if rng.gen_bool(p) {
                acc ^ (1 << *clbit)
            } else {
                acc
            }
        })
    }
}

impl<P: Precision> Backend for StatevectorSimulator<P> {
    fn run(&mut self, circuit: &Circuit, shots: usize) -> CircuitResult<Counts> {
        if shots == 0 {
            return Err(CircuitError::InvalidRequest("shots must be positive".into()));
        }
        check_size(circuit)?;
        match circuit.n_clbits() {
            0 => {
                return Err(CircuitError::InvalidRequest(
                    "circuit has no classical bits to report".into(),
                ))
            }
            n if n > MAX_CLBITS => {
                return Err(CircuitError::InvalidRequest(format!(
                    "circuit has {} classical bits, at most {} can be reported",
                    n, MAX_CLBITS
                )))
            }
            _ => {}
        }

        let sampled = circuit.has_terminal_measurements();
        debug!(
            n_qubits = circuit.n_qubits(),
            instructions = circuit.len(),
            gates = circuit.instructions().iter().filter(|i| i.is_unitary()).count(),
            shots,
            sampled,
            "running circuit"
        );
        let mut counts = Counts::default();
        if sampled {
            self.run_sampled(circuit, shots, &mut counts)?;
        } else {
            self.run_per_shot(circuit, shots, &mut counts)?;
        }
        debug!(%counts, "finished circuit");
        Ok(counts)
    }
}

fn check_size(circuit: &Circuit) -> CircuitResult<()> {
    match circuit.n_qubits() {
        0 => Err(CircuitError::InvalidRequest("circuit has no qubits".into())),
        n if n > MAX_QUBITS => Err(CircuitError::TooManyQubits { n, max: MAX_QUBITS }),
        _ => Ok(()),
    }
}

/// Distinct classical bits written by `measurements`, ascending.
fn measured_clbits(measurements: &[(usize, usize)]) -> Vec<usize> {
    let mut clbits = measurements.iter().map(|(_, c)| *c).collect::<Vec<_>>();
    clbits.sort_unstable();
    clbits.dedup();
    clbits
}

fn compile_ops<P: Precision>(circuit: &Circuit) -> CircuitResult<Vec<Option<MatrixOp<P>>>> {
    circuit
        .instructions()
        .iter()
        .map(|inst| inst.to_matrix_op())
        .collect()
}

/// `|0...0>` plus a scratch buffer of the same size.
fn initial_state<P: Precision>(n: usize) -> (Vec<Complex<P>>, Vec<Complex<P>>) {
    let mut state = vec![Complex::zero(); 1 << n];
    let arena = state.clone();
    state[0] = Complex::one();
    (state, arena)
}
