//! One-line progress indicator for long loops.

use std::io::{self, Write};

use ndarray::{ArrayBase, Data, Dimension};

/// The extent of a loop: a number is taken as the iteration count, a
/// collection by its length.
pub trait Total {
    fn total(&self) -> f64;
}

macro_rules! numeric_total {
    ($($t:ty),*) => {
        $(
            impl Total for $t {
                fn total(&self) -> f64 {
                    *self as f64
                }
            }
        )*
    };
}

numeric_total!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

impl<T> Total for [T] {
    fn total(&self) -> f64 {
        self.len() as f64
    }
}

impl<T> Total for Vec<T> {
    fn total(&self) -> f64 {
        self.len() as f64
    }
}

impl<T, const N: usize> Total for [T; N] {
    fn total(&self) -> f64 {
        N as f64
    }
}

/// Arrays count their first axis.
impl<S: Data, D: Dimension> Total for ArrayBase<S, D> {
    fn total(&self) -> f64 {
        self.shape().first().copied().unwrap_or(1) as f64
    }
}

/// Percentage complete at counter `i`, reaching 100 on the last iteration.
///
/// A total of 1 divides by zero and yields `inf` (or `NaN` at `i = 0`).
pub fn percent<T: Total + ?Sized>(i: usize, total: &T) -> f64 {
    i as f64 / (total.total() - 1.0) * 100.0
}

/// Overwrite the current terminal line with the percentage complete.
pub fn statusbar<T: Total + ?Sized>(i: usize, total: &T) -> io::Result<()> {
    statusbar_to(&mut io::stdout().lock(), i, total)
}

/// Like [`statusbar`], writing to `out`.
pub fn statusbar_to<W, T>(out: &mut W, i: usize, total: &T) -> io::Result<()>
where
    W: Write,
    T: Total + ?Sized,
{
    write!(out, "  {:.1} %\r", percent(i, total))?;
    out.flush()
}
