use num_traits::Zero;
use rand::Rng;

use crate::rayon_helper::*;
use crate::utils::extract_bits;
use crate::{Complex, Precision};

/// Get total magnitude of state.
pub fn prob_magnitude<P: Precision>(input: &[Complex<P>]) -> P {
    amp_iter!(input).map(Complex::<P>::norm_sqr).sum()
}

/// Calculate the probability of a given measurement. `measured` gives the bits (as a usize) which
/// have been measured from the qubits at `indices` in the order supplied by `indices`. `input`
/// gives the state from which to measure, representing a total of `n` qubits.
///
/// Keep in mind that qubits are big-endian to match kron product standards.
/// `|abc>` means `q0=a`, `q1=b`, `q2=c`
///
/// # Examples
/// ```
/// use qperceptron::state_ops::matrix_ops::from_reals;
/// use qperceptron::state_ops::measurement_ops::measure_prob;
///
/// // Make the state |10>, index 0 is always |1> and index 1 is always |0>
/// let input = from_reals(&[0.0, 0.0, 1.0, 0.0]);
///
/// assert_eq!(measure_prob(2, 0, &[0], &input), 0.0);
/// assert_eq!(measure_prob(2, 1, &[0], &input), 1.0);
/// assert_eq!(measure_prob(2, 1, &[0, 1], &input), 1.0);
/// assert_eq!(measure_prob(2, 2, &[1, 0], &input), 1.0);
/// ```
pub fn measure_prob<P: Precision>(
    n: usize,
    measured: usize,
    indices: &[usize],
    input: &[Complex<P>],
) -> P {
    let template: usize = indices
        .iter()
        .enumerate()
        .fold(0, |acc, (i, index)| -> usize {
            let sel_bit = (measured >> i) & 1;
            acc | (sel_bit << (n - 1 - index))
        });
    let remaining_indices: Vec<usize> = (0..n).filter(|i| !indices.contains(i)).collect();

    let f = |remaining_index_bits: usize| -> Option<P> {
        let index = remaining_indices
            .iter()
            .enumerate()
            .fold(template, |acc, (i, index)| -> usize {
                let sel_bit = (remaining_index_bits >> i) & 1;
                acc | (sel_bit << (n - 1 - index))
            });
        let amp = input[index];
        if amp.is_zero() {
            None
        } else {
            Some(amp.norm_sqr())
        }
    };

    let r = 0usize..1 << remaining_indices.len();
    index_iter!(r).filter_map(f).sum()
}

/// Get probability for each possible measurement of `indices` on `input`.
pub fn measure_probs<P: Precision>(n: usize, indices: &[usize], input: &[Complex<P>]) -> Vec<P> {
    (0usize..1 << indices.len())
        .map(|measured| measure_prob(n, measured, indices, input))
        .collect()
}

/// Sample a measurement from a state `input` using `rng`.
/// Sample from qubits at `indices` and return bits in order given by `indices`. See
/// `measure_prob` for details.
///
/// # Examples
/// ```
/// use qperceptron::state_ops::matrix_ops::from_reals;
/// use qperceptron::state_ops::measurement_ops::soft_measure;
///
/// let mut rng = rand::thread_rng();
/// // Make the state |10>, index 0 is always |1> and index 1 is always |0>
/// let input = from_reals(&[0.0, 0.0, 1.0, 0.0]);
///
/// assert_eq!(soft_measure(2, &[0], &input, &mut rng), 1);
/// assert_eq!(soft_measure(2, &[1], &input, &mut rng), 0);
/// assert_eq!(soft_measure(2, &[0, 1], &input, &mut rng), 0b01);
/// assert_eq!(soft_measure(2, &[1, 0], &input, &mut rng), 0b10);
/// ```
pub fn soft_measure<P: Precision, R: Rng + ?Sized>(
    n: usize,
    indices: &[usize],
    input: &[Complex<P>],
    rng: &mut R,
) -> usize {
    let mut r = P::from(rng.gen::<f64>()).unwrap_or_else(P::zero) * prob_magnitude(input);
    // Fall back to the last nonzero amplitude in case rounding leaves r slightly positive.
    let mut measured_indx = input
        .iter()
        .rposition(|c| !c.is_zero())
        .unwrap_or_default();
    for (i, c) in input.iter().enumerate() {
        let p = c.norm_sqr();
        if p.is_zero() {
            continue;
        }
        r -= p;
        if r <= P::zero() {
            measured_indx = i;
            break;
        }
    }
    let indices: Vec<_> = indices.iter().map(|indx| n - 1 - indx).collect();
    extract_bits(measured_indx, &indices)
}

/// Selects a measured state from `input`, then calls `measure_state` to collapse it into
/// `output`. Returns the measured value and its probability.
pub fn measure<P: Precision, R: Rng + ?Sized>(
    n: usize,
    indices: &[usize],
    input: &[Complex<P>],
    output: &mut [Complex<P>],
    rng: &mut R,
) -> (usize, P) {
    let m = soft_measure(n, indices, input, rng);
    let p = measure_prob(n, m, indices, input);
    measure_state(n, indices, (m, p), input, output);
    (m, p)
}

/// Normalize the output state such that it matches only states which produce the `measured`
/// result and has the same magnitude.
/// This is done by zeroing out the states which cannot give `measured`, and dividing the remaining
/// by `sqrt(p)` for p=`measured_prob`. See `measure_prob` for details.
pub fn measure_state<P: Precision>(
    n: usize,
    indices: &[usize],
    measured: (usize, P),
    input: &[Complex<P>],
    output: &mut [Complex<P>],
) {
    let (measured, measured_prob) = measured;
    if measured_prob.is_zero() {
        return;
    }
    let p_mult = P::one() / measured_prob.sqrt();

    let row_mask: usize = indices.iter().map(|index| 1 << (n - 1 - index)).sum();
    let measured_mask: usize = indices
        .iter()
        .enumerate()
        .map(|(i, index)| {
            let sel_bit = (measured >> i) & 1;
            sel_bit << (n - 1 - index)
        })
        .sum();

    let f = |(row, (input, output)): (usize, (&Complex<P>, &mut Complex<P>))| {
        if ((row & row_mask) ^ measured_mask) != 0 {
            *output = Complex::default();
        } else {
            *output = (*input) * p_mult;
        }
    };

    amp_iter!(input)
        .zip(amp_iter_mut!(output))
        .enumerate()
        .for_each(f);
}
