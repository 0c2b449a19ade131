use thiserror::Error;

/// An error from building or simulating a circuit.
#[derive(Debug, Error)]
pub enum CircuitError {
    /// A gate was handed a register of the wrong width.
    #[error("gate {gate} expects a register of {expected} qubit(s), but got {found}")]
    RegisterWidth {
        /// Name of the gate.
        gate: &'static str,
        /// Expected register width.
        expected: usize,
        /// Actual register width.
        found: usize,
    },

    /// A multi-qubit gate referenced the same qubit more than once.
    #[error("gate {gate} acts on repeated qubits {indices:?}")]
    RepeatedQubit {
        /// Name of the gate.
        gate: &'static str,
        /// Offending qubit indices.
        indices: Vec<usize>,
    },

    /// A classical bit index fell outside the classical register.
    #[error("classical bit {clbit} out of range, circuit has {n_clbits}")]
    ClassicalBitOutOfRange {
        /// Requested bit.
        clbit: usize,
        /// Number of classical bits in the circuit.
        n_clbits: usize,
    },

    /// Matrix data did not fit the number of indices it acts on.
    #[error("matrix data has {found} entries versus expected {expected}")]
    MatrixSize {
        /// Expected number of entries.
        expected: usize,
        /// Actual number of entries.
        found: usize,
    },

    /// The circuit is larger than the dense simulator allows.
    #[error("circuit has {n} qubits, simulator supports at most {max}")]
    TooManyQubits {
        /// Qubits in the circuit.
        n: usize,
        /// Simulator limit.
        max: usize,
    },

    /// Simulator configuration or request is invalid.
    #[error("invalid simulator request: {0}")]
    InvalidRequest(String),

    /// Writing a report or export failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error.
    #[error("{0}")]
    Generic(String),
}

impl CircuitError {
    /// Construct a new generic error.
    pub fn new<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Generic(msg.into())
    }
}

/// A result which may contain a circuit error.
pub type CircuitResult<T> = Result<T, CircuitError>;
