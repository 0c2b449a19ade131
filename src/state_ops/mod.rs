/// Row iterators over nonzero matrix entries.
pub mod iterators;
/// Matrix ops and their application to a dense statevector.
pub mod matrix_ops;
/// Measurement probabilities, sampling and collapse.
pub mod measurement_ops;
