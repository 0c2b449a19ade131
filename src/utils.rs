/// Extracts bits from a number in a particular order.
///
/// # Example
///
/// ```
/// use qperceptron::utils::extract_bits;
///
/// assert_eq!(extract_bits(0b1010, &[3, 0]), 0b01);
/// ```
#[inline]
pub fn extract_bits(num: usize, indices: &[usize]) -> usize {
    indices.iter().enumerate().fold(0, |acc, (i, index)| {
        let bit = (num >> index) & 1;
        acc | (bit << i)
    })
}

/// Get the index into an op matrix
#[inline]
pub fn get_flat_index(nindices: usize, i: usize, j: usize) -> usize {
    let mat_side = 1 << nindices;
    (i * mat_side) + j
}

/// Set the `bit_index` bit in `num` to `value`.
///
/// # Example
/// ```
/// use qperceptron::utils::set_bit;
/// assert_eq!(set_bit(0, 1, true), 2);
/// assert_eq!(set_bit(1, 1, true), 3);
/// assert_eq!(set_bit(1, 0, false), 0);
/// ```
#[inline]
pub fn set_bit(num: usize, bit_index: usize, value: bool) -> usize {
    let v = 1 << bit_index;
    if value {
        num | v
    } else {
        num & !v
    }
}

/// Get the `bit_index` bit value from `num`.
///
/// # Example
/// ```
/// use qperceptron::utils::get_bit;
/// assert!(get_bit(2, 1));
/// assert!(!get_bit(2, 0));
/// ```
#[inline]
pub fn get_bit(num: usize, bit_index: usize) -> bool {
    ((num >> bit_index) & 1) != 0
}

/// Format the low `width` bits of `num` with bit 0 rightmost.
///
/// ```
/// use qperceptron::utils::bitstring;
/// assert_eq!(bitstring(0b01, 3), "001");
/// assert_eq!(bitstring(1, 1), "1");
/// ```
pub fn bitstring(num: usize, width: usize) -> String {
    (0..width)
        .rev()
        .map(|i| if get_bit(num, i) { '1' } else { '0' })
        .collect()
}
