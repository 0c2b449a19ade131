//! Switches the amplitude loops between rayon and plain iterators depending on the
//! `parallel` feature. Callers need `use crate::rayon_helper::*;` in scope so the rayon
//! traits resolve.

#[cfg(feature = "parallel")]
pub(crate) use rayon::prelude::*;

#[cfg(feature = "parallel")]
macro_rules! amp_iter {
    ($e:expr) => {
        $e.par_iter()
    };
}

#[cfg(not(feature = "parallel"))]
macro_rules! amp_iter {
    ($e:expr) => {
        $e.iter()
    };
}

#[cfg(feature = "parallel")]
macro_rules! amp_iter_mut {
    ($e:expr) => {
        $e.par_iter_mut()
    };
}

#[cfg(not(feature = "parallel"))]
macro_rules! amp_iter_mut {
    ($e:expr) => {
        $e.iter_mut()
    };
}

#[cfg(feature = "parallel")]
macro_rules! index_iter {
    ($e:expr) => {
        $e.into_par_iter()
    };
}

#[cfg(not(feature = "parallel"))]
macro_rules! index_iter {
    ($e:expr) => {
        $e.into_iter()
    };
}

pub(crate) use {amp_iter, amp_iter_mut, index_iter};
