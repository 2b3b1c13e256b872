// Copyright (c) 2026 The rs-transport developers
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! A dense row-major grid.
//!
//! Both the cost matrix of a transportation problem and a
//! transportation plan are stored as a [`Grid`]. Row `i` belongs to
//! origin `i`, column `j` to destination `j`.

use crate::num::traits::{Num, Zero};

use std::fmt;
use std::ops::{Index, IndexMut};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A dense matrix stored in row-major order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Grid<T> {
    nrows: usize,
    ncols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a grid of the given shape from a row-major vector.
    ///
    /// Returns `None` if `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Option<Self> {
        if data.len() == nrows * ncols {
            Some(Grid { nrows, ncols, data })
        } else {
            None
        }
    }

    /// Create a grid whose cell `(i, j)` is `f(i, j)`.
    pub fn from_fn<F>(nrows: usize, ncols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                data.push(f(i, j));
            }
        }
        Grid { nrows, ncols, data }
    }

    pub fn num_rows(&self) -> usize {
        self.nrows
    }

    pub fn num_cols(&self) -> usize {
        self.ncols
    }

    /// Return the shape `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Return row `i` as a slice.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    /// Iterate over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.nrows).map(move |i| self.row(i))
    }

    /// Iterate over all cells in row-major order.
    ///
    /// Each item is `(row, column, value)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let ncols = self.ncols;
        self.data.iter().enumerate().map(move |(k, x)| (k / ncols, k % ncols, x))
    }

    /// The cells in row-major order as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the grid and return its row-major data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Map every cell through `f`.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            nrows: self.nrows,
            ncols: self.ncols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid with all cells set to `value`.
    pub fn filled(nrows: usize, ncols: usize, value: T) -> Self {
        Grid {
            nrows,
            ncols,
            data: vec![value; nrows * ncols],
        }
    }

    /// Append a row with all cells set to `value`.
    pub fn push_row(&mut self, value: T) {
        self.data.extend(std::iter::repeat(value).take(self.ncols));
        self.nrows += 1;
    }

    /// Append a column with all cells set to `value`.
    pub fn push_col(&mut self, value: T) {
        let mut data = Vec::with_capacity(self.nrows * (self.ncols + 1));
        for i in 0..self.nrows {
            data.extend_from_slice(self.row(i));
            data.push(value.clone());
        }
        self.data = data;
        self.ncols += 1;
    }
}

impl<T: Zero + Clone> Grid<T> {
    /// Create a grid with all cells zero.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Grid::filled(nrows, ncols, T::zero())
    }
}

impl<T: Num + Copy> Grid<T> {
    /// Sum of row `i`.
    pub fn row_sum(&self, i: usize) -> T {
        self.row(i).iter().fold(T::zero(), |s, &x| s + x)
    }

    /// Sum of column `j`.
    pub fn col_sum(&self, j: usize) -> T {
        (0..self.nrows).fold(T::zero(), |s, i| s + self[(i, j)])
    }

    /// All row sums.
    pub fn row_sums(&self) -> Vec<T> {
        (0..self.nrows).map(|i| self.row_sum(i)).collect()
    }

    /// All column sums.
    pub fn col_sums(&self) -> Vec<T> {
        (0..self.ncols).map(|j| self.col_sum(j)).collect()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < self.nrows && j < self.ncols);
        &self.data[i * self.ncols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        debug_assert!(i < self.nrows && j < self.ncols);
        &mut self.data[i * self.ncols + j]
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..self.nrows {
            for (j, x) in self.row(i).iter().enumerate() {
                if j > 0 {
                    write!(fmt, " ")?;
                }
                write!(fmt, "{:>4}", x)?;
            }
            writeln!(fmt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;

    #[test]
    fn test_push_row_and_col() {
        let mut g = Grid::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        g.push_col(0);
        assert_eq!(g.shape(), (2, 3));
        assert_eq!(g.row(0), &[1, 2, 0]);
        assert_eq!(g.row(1), &[3, 4, 0]);

        g.push_row(9);
        assert_eq!(g.shape(), (3, 3));
        assert_eq!(g.row(2), &[9, 9, 9]);
        assert_eq!(g[(1, 1)], 4);
    }

    #[test]
    fn test_sums() {
        let g = Grid::from_fn(3, 2, |i, j| (i * 10 + j) as i32);
        assert_eq!(g.row_sums(), vec![1, 21, 41]);
        assert_eq!(g.col_sums(), vec![30, 33]);
    }

    #[test]
    fn test_cells_row_major() {
        let g = Grid::from_vec(2, 3, vec!['a', 'b', 'c', 'd', 'e', 'f']).unwrap();
        let cells: Vec<_> = g.cells().map(|(i, j, &c)| (i, j, c)).collect();
        assert_eq!(cells[0], (0, 0, 'a'));
        assert_eq!(cells[2], (0, 2, 'c'));
        assert_eq!(cells[4], (1, 1, 'e'));
    }

    #[test]
    fn test_from_vec_shape_mismatch() {
        assert!(Grid::from_vec(2, 3, vec![0; 5]).is_none());
    }
}
