use std::fmt;

use num_traits::{One, Zero};

use crate::errors::{CircuitError, CircuitResult};
use crate::rayon_helper::*;
use crate::state_ops::iterators::{ControlledOpIterator, MatrixOpIterator};
use crate::utils::{get_bit, set_bit};
use crate::{Complex, Precision};

/// Ops which can be applied to a dense statevector.
///
/// Build these with [`make_matrix_op`] and [`make_control_op`]. A `Control` must wrap a
/// `Matrix` and have no more control indices than indices in total. Hand-built ops breaking
/// that are rejected by [`MatrixOp::validate`] and panic in [`apply_op`].
#[derive(Clone, PartialEq)]
pub enum MatrixOp<P> {
    /// Indices, row-major matrix data.
    Matrix(Vec<usize>, Vec<Complex<P>>),
    /// Number of control indices, control indices followed by op indices, op.
    Control(usize, Vec<usize>, Box<MatrixOp<P>>),
}

impl<P> MatrixOp<P> {
    /// Indices acted on by this op, controls first.
    pub fn indices(&self) -> &[usize] {
        match self {
            MatrixOp::Matrix(i, _) => i,
            MatrixOp::Control(_, i, _) => i,
        }
    }

    /// Check the shape invariants `make_control_op` guarantees.
    pub fn validate(&self) -> CircuitResult<()> {
        match self {
            MatrixOp::Matrix(..) => Ok(()),
            MatrixOp::Control(nc, indices, op) => match op.as_ref() {
                MatrixOp::Control(..) => Err(CircuitError::new("nested control op")),
                MatrixOp::Matrix(op_indices, _) if nc + op_indices.len() != indices.len() => {
                    Err(CircuitError::new(format!(
                        "control op has {} controls and {} op indices but lists {}",
                        nc,
                        op_indices.len(),
                        indices.len()
                    )))
                }
                MatrixOp::Matrix(..) => Ok(()),
            },
        }
    }
}

impl<P: Precision> MatrixOp<P> {
    /// Sum `f` over every nonzero `(column, value)` of the op matrix on `row`.
    pub fn sum_for_op_cols<F>(&self, row: usize, f: F) -> Complex<P>
    where
        F: Fn((usize, Complex<P>)) -> Complex<P>,
    {
        match self {
            MatrixOp::Matrix(indices, data) => {
                MatrixOpIterator::new(row, indices.len(), data).map(f).sum()
            }
            MatrixOp::Control(n_control_indices, indices, op) => {
                let n_op_indices = indices.len() - n_control_indices;
                match op.as_ref() {
                    MatrixOp::Matrix(_, data) => ControlledOpIterator::new(
                        row,
                        *n_control_indices,
                        n_op_indices,
                        |r| MatrixOpIterator::new(r, n_op_indices, data),
                    )
                    .map(f)
                    .sum(),
                    // make_control_op flattens nested controls.
                    MatrixOp::Control(..) => unreachable!("nested control op"),
                }
            }
        }
    }
}

impl<P> fmt::Debug for MatrixOp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixOp::Matrix(indices, _) => write!(f, "Matrix{:?}", indices),
            MatrixOp::Control(num_c_indices, indices, op) => {
                write!(f, "C({:?}){:?}", op, &indices[..*num_c_indices])
            }
        }
    }
}

/// Make a Matrix MatrixOp
pub fn make_matrix_op<P>(
    indices: Vec<usize>,
    dat: Vec<Complex<P>>,
) -> CircuitResult<MatrixOp<P>> {
    let n = indices.len();
    let expected = 1 << (2 * n);
    if indices.is_empty() {
        Err(CircuitError::new("Must supply at least one op index"))
    } else if dat.len() != expected {
        Err(CircuitError::MatrixSize {
            expected,
            found: dat.len(),
        })
    } else {
        Ok(MatrixOp::Matrix(indices, dat))
    }
}

/// Make a Control MatrixOp, merging with `op`'s controls if it is already controlled.
pub fn make_control_op<P>(
    mut c_indices: Vec<usize>,
    op: MatrixOp<P>,
) -> CircuitResult<MatrixOp<P>> {
    if c_indices.is_empty() {
        return Err(CircuitError::new("Must supply at least one control index"));
    }
    let num_c_indices = c_indices.len();
    let op = match op {
        MatrixOp::Control(num_oc_indices, oo_indices, op) => {
            c_indices.extend(oo_indices);
            MatrixOp::Control(num_c_indices + num_oc_indices, c_indices, op)
        }
        op => {
            c_indices.extend(op.indices());
            MatrixOp::Control(num_c_indices, c_indices, Box::new(op))
        }
    };
    let mut seen = op.indices().to_vec();
    seen.sort_unstable();
    seen.dedup();
    if seen.len() != op.indices().len() {
        return Err(CircuitError::RepeatedQubit {
            gate: "control",
            indices: op.indices().to_vec(),
        });
    }
    Ok(op)
}

/// The pauli X matrix on `index`.
pub fn make_x_op<P: Precision>(index: usize) -> MatrixOp<P> {
    let (o, l) = (Complex::zero(), Complex::one());
    MatrixOp::Matrix(vec![index], vec![o, l, l, o])
}

/// The hadamard matrix on `index`.
pub fn make_h_op<P: Precision>(index: usize) -> MatrixOp<P> {
    let nl = Complex::one() * P::from(std::f64::consts::FRAC_1_SQRT_2).unwrap_or_else(P::zero);
    MatrixOp::Matrix(vec![index], vec![nl, nl, nl, -nl])
}

/// Get the index for a submatrix indexed by `indices` given the `full_index` for the larger
/// 2^n by 2^n matrix.
pub fn full_to_sub(n: usize, mat_indices: &[usize], full_index: usize) -> usize {
    let nindices = mat_indices.len();
    mat_indices
        .iter()
        .enumerate()
        .fold(0, |acc, (j, indx)| -> usize {
            let bit = get_bit(full_index, n - 1 - *indx);
            set_bit(acc, nindices - 1 - j, bit)
        })
}

/// Given the `sub_index` for the submatrix, and a base to overwrite values, get the full index
/// for the 2^n by 2^n matrix.
pub fn sub_to_full(n: usize, mat_indices: &[usize], sub_index: usize, base: usize) -> usize {
    let nindices = mat_indices.len();
    mat_indices.iter().enumerate().fold(base, |acc, (j, indx)| {
        let bit = get_bit(sub_index, nindices - 1 - j);
        set_bit(acc, n - 1 - *indx, bit)
    })
}

/// Apply `op` to the `n` qubit `input`, storing the results in `output`.
///
/// Qubits are big-endian: `|abc>` means `q0=a`, `q1=b`, `q2=c`.
///
/// # Example
/// ```
/// use qperceptron::state_ops::matrix_ops::{apply_op, from_reals, make_x_op};
///
/// // |00> -> |10>
/// let input = from_reals(&[1.0, 0.0, 0.0, 0.0]);
/// let mut output = input.clone();
/// apply_op(2, &make_x_op(0), &input, &mut output);
/// assert_eq!(output, from_reals(&[0.0, 0.0, 1.0, 0.0]));
/// ```
pub fn apply_op<P: Precision>(
    n: usize,
    op: &MatrixOp<P>,
    input: &[Complex<P>],
    output: &mut [Complex<P>],
) {
    let mat_indices = op.indices();

    let row_fn = |(row, outputloc): (usize, &mut Complex<P>)| {
        let matrow = full_to_sub(n, mat_indices, row);
        // Maps from an op matrix column to its contribution on this row.
        let f = |(i, val): (usize, Complex<P>)| -> Complex<P> {
            let colbits = sub_to_full(n, mat_indices, i, row);
            val * input[colbits]
        };
        *outputloc = op.sum_for_op_cols(matrow, f);
    };

    amp_iter_mut!(output).enumerate().for_each(row_fn);
}

/// Make a complex vector from real amplitudes.
pub fn from_reals<P: Precision>(data: &[P]) -> Vec<Complex<P>> {
    data.iter().map(|x| Complex { re: *x, im: P::zero() }).collect()
}
