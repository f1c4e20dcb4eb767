//! Dense row-major matrices over exact scalars.

use std::fmt;
use std::ops::{Add, Index, Mul};

use nalgebra::DMatrix;
use num_traits::{One, Zero};

use crate::exact::{to_f64, Rational};

/// Rectangular row-major matrix.
///
/// Invariants:
/// - `data.len() == rows * cols`.
/// - Shape mismatches in products are programming errors and panic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Build from a list of equally long rows. Panics on ragged input.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.into_iter().enumerate() {
            assert_eq!(row.len(), ncols, "row {i} has {} entries, expected {ncols}", row.len());
            data.extend(row);
        }
        Self {
            rows: nrows,
            cols: ncols,
            data,
        }
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[i * self.cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.data[i * self.cols + j] = value;
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self.get(j, i).clone())
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    pub fn diagonal(&self) -> Vec<T> {
        (0..self.rows.min(self.cols))
            .map(|i| self.get(i, i).clone())
            .collect()
    }
}

impl<T: Clone + Zero> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_fn(rows, cols, |_, _| T::zero())
    }
}

impl<T: Clone + Zero + One> Matrix<T> {
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() })
    }
}

impl<T> Matrix<T>
where
    T: Clone + Zero,
    for<'a> &'a T: Mul<&'a T, Output = T>,
{
    /// `Aᵀ A`, symmetric with `cols × cols` entries.
    pub fn gram(&self) -> Self {
        Self::from_fn(self.cols, self.cols, |i, j| {
            let mut acc = T::zero();
            for r in 0..self.rows {
                acc = acc + self.get(r, i) * self.get(r, j);
            }
            acc
        })
    }

    pub fn mul_vec(&self, v: &[T]) -> Vec<T> {
        assert_eq!(v.len(), self.cols, "vector length mismatch");
        (0..self.rows)
            .map(|i| {
                self.row(i)
                    .iter()
                    .zip(v)
                    .fold(T::zero(), |acc, (a, b)| acc + a * b)
            })
            .collect()
    }
}

impl<'a, T> Mul for &'a Matrix<T>
where
    T: Clone + Zero,
    for<'b> &'b T: Mul<&'b T, Output = T>,
{
    type Output = Matrix<T>;

    fn mul(self, rhs: &'a Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.cols, rhs.rows,
            "shape mismatch: {}x{} * {}x{}",
            self.rows, self.cols, rhs.rows, rhs.cols
        );
        Matrix::from_fn(self.rows, rhs.cols, |i, j| {
            let mut acc = T::zero();
            for k in 0..self.cols {
                acc = acc + self.get(i, k) * rhs.get(k, j);
            }
            acc
        })
    }
}

impl<'a, T> Add for &'a Matrix<T>
where
    T: Clone,
    for<'b> &'b T: Add<&'b T, Output = T>,
{
    type Output = Matrix<T>;

    fn add(self, rhs: &'a Matrix<T>) -> Matrix<T> {
        assert!(
            self.rows == rhs.rows && self.cols == rhs.cols,
            "shape mismatch in addition"
        );
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(&rhs.data).map(|(a, b)| a + b).collect(),
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i * self.cols + j]
    }
}

impl Matrix<Rational> {
    /// Nearest floating-point copy, for numerical proposals only.
    pub fn to_f64(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.rows, self.cols, |i, j| to_f64(self.get(i, j)))
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.data[i * self.cols + j])?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
