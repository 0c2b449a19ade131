use num_traits::{One, Zero};

use crate::utils::get_flat_index;

/// Iterator which provides the indices of nonzero columns for a given row of a dense matrix.
#[derive(Debug)]
pub struct MatrixOpIterator<'a, P>
where
    P: Clone + Zero,
{
    n: usize,
    data: &'a [P],
    last_col: Option<usize>,
}

impl<'a, P> MatrixOpIterator<'a, P>
where
    P: Clone + Zero,
{
    /// Build a new iterator using the row index, the number of qubits in the matrix, and the
    /// values of the matrix.
    pub fn new(row: usize, n: usize, data: &'a [P]) -> MatrixOpIterator<'a, P> {
        let lower = get_flat_index(n, row, 0);
        let upper = get_flat_index(n, row, 1 << n);
        MatrixOpIterator {
            n,
            data: &data[lower..upper],
            last_col: None,
        }
    }
}

impl<'a, P> Iterator for MatrixOpIterator<'a, P>
where
    P: Clone + Zero,
{
    type Item = (usize, P);

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.last_col.map(|c| c + 1).unwrap_or(0);
        self.last_col = None;
        for col in pos..(1 << self.n) {
            let val = &self.data[col];
            if !val.is_zero() {
                self.last_col = Some(col);
                return Some((col, val.clone()));
            }
        }
        None
    }
}

/// Iterator over the nonzero columns of a controlled op. Rows where every control bit is set
/// delegate to the wrapped op's iterator, all other rows are the identity.
#[derive(Debug)]
pub struct ControlledOpIterator<P, It>
where
    P: Clone + Zero,
    It: Iterator<Item = (usize, P)>,
{
    row: usize,
    index_threshold: usize,
    op_iter: Option<It>,
    done: bool,
}

impl<P, It> ControlledOpIterator<P, It>
where
    P: Clone + Zero,
    It: Iterator<Item = (usize, P)>,
{
    /// Build a new iterator using the row index, the number of controlling indices, the number of
    /// op indices, and a builder for the op's own row iterator.
    pub fn new<F: FnOnce(usize) -> It>(
        row: usize,
        n_control_indices: usize,
        n_op_indices: usize,
        iter_builder: F,
    ) -> ControlledOpIterator<P, It> {
        let n_indices = n_control_indices + n_op_indices;
        // Controls are the high bits, so "all controls set" is the top 2^n_op rows.
        let index_threshold = (1 << n_indices) - (1 << n_op_indices);
        let op_iter = if row >= index_threshold {
            Some(iter_builder(row - index_threshold))
        } else {
            None
        };
        ControlledOpIterator {
            row,
            index_threshold,
            op_iter,
            done: false,
        }
    }
}

impl<P, It> Iterator for ControlledOpIterator<P, It>
where
    P: Clone + Zero + One,
    It: Iterator<Item = (usize, P)>,
{
    type Item = (usize, P);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(it) = &mut self.op_iter {
            it.next().map(|(i, val)| (i + self.index_threshold, val))
        } else if self.done {
            None
        } else {
            self.done = true;
            Some((self.row, P::one()))
        }
    }
}
