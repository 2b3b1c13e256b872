/*
 * Copyright (c) 2026 The rs-transport developers
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Transportation problem instances.

use crate::grid::Grid;
use crate::num::traits::{Num, Zero};

use std::error;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Error for invalid instance data.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// The supply of an origin is negative.
    NegativeSupply { index: usize },
    /// The demand of a destination is negative.
    NegativeDemand { index: usize },
    /// The unit cost of a cell is negative.
    NegativeCost { row: usize, col: usize },
    /// The cost matrix does not match the number of origins and destinations.
    Shape { rows: usize, cols: usize, msg: String },
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            NegativeSupply { index } => write!(fmt, "Negative supply at origin {}", index),
            NegativeDemand { index } => write!(fmt, "Negative demand at destination {}", index),
            NegativeCost { row, col } => write!(fmt, "Negative cost in cell ({},{})", row, col),
            Shape { rows, cols, msg } => write!(fmt, "Invalid cost matrix for {}x{} problem: {}", rows, cols, msg),
        }
    }
}

impl error::Error for Error {}

/// A transportation problem.
///
/// The instance consists of the supplies of the origins, the demands
/// of the destinations and the unit cost of each origin-destination
/// pair. All values are non-negative, which is checked on
/// construction. The total supply and the total demand may differ,
/// see [`balance`](crate::balance::balance).
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Instance<T> {
    supplies: Vec<T>,
    demands: Vec<T>,
    costs: Grid<T>,
}

impl<T> Instance<T>
where
    T: Num + PartialOrd + Copy,
{
    /// Create a new instance from the rows of the cost matrix.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_transport::Instance;
    ///
    /// let instance = Instance::new(vec![5, 5], vec![3, 3], vec![vec![1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(instance.num_origins(), 2);
    /// assert_eq!(instance.total_supply(), 10);
    /// assert_eq!(instance.total_demand(), 6);
    ///
    /// assert!(Instance::new(vec![5, -5], vec![3, 3], vec![vec![1, 2], vec![3, 4]]).is_err());
    /// ```
    pub fn new<R>(supplies: Vec<T>, demands: Vec<T>, costs: Vec<R>) -> Result<Self, Error>
    where
        R: AsRef<[T]>,
    {
        let nrows = supplies.len();
        let ncols = demands.len();
        if costs.len() != nrows {
            return Err(Error::Shape {
                rows: nrows,
                cols: ncols,
                msg: format!("expected {} rows, got {}", nrows, costs.len()),
            });
        }

        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in costs.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(Error::Shape {
                    rows: nrows,
                    cols: ncols,
                    msg: format!("row {} has {} columns, expected {}", i, row.len(), ncols),
                });
            }
            data.extend_from_slice(row);
        }

        // the length has been checked above
        let costs = Grid::from_vec(nrows, ncols, data).ok_or_else(|| Error::Shape {
            rows: nrows,
            cols: ncols,
            msg: "inconsistent number of cells".to_string(),
        })?;

        Instance::with_grid(supplies, demands, costs)
    }

    /// Create a new instance from a cost grid.
    pub fn with_grid(supplies: Vec<T>, demands: Vec<T>, costs: Grid<T>) -> Result<Self, Error> {
        if costs.shape() != (supplies.len(), demands.len()) {
            return Err(Error::Shape {
                rows: supplies.len(),
                cols: demands.len(),
                msg: format!("cost grid has shape {}x{}", costs.num_rows(), costs.num_cols()),
            });
        }

        if let Some(index) = supplies.iter().position(|&s| s < T::zero()) {
            return Err(Error::NegativeSupply { index });
        }

        if let Some(index) = demands.iter().position(|&d| d < T::zero()) {
            return Err(Error::NegativeDemand { index });
        }

        if let Some((row, col, _)) = costs.cells().find(|&(_, _, &c)| c < T::zero()) {
            return Err(Error::NegativeCost { row, col });
        }

        Ok(Instance {
            supplies,
            demands,
            costs,
        })
    }

    pub fn total_supply(&self) -> T {
        self.supplies.iter().fold(T::zero(), |s, &x| s + x)
    }

    pub fn total_demand(&self) -> T {
        self.demands.iter().fold(T::zero(), |s, &x| s + x)
    }

    /// Return `true` if the total supply equals the total demand.
    pub fn is_balanced(&self) -> bool {
        self.total_supply() == self.total_demand()
    }
}

impl<T> Instance<T> {
    pub fn num_origins(&self) -> usize {
        self.supplies.len()
    }

    pub fn num_destinations(&self) -> usize {
        self.demands.len()
    }

    pub fn supplies(&self) -> &[T] {
        &self.supplies
    }

    pub fn demands(&self) -> &[T] {
        &self.demands
    }

    pub fn costs(&self) -> &Grid<T> {
        &self.costs
    }

    pub fn supply(&self, i: usize) -> &T {
        &self.supplies[i]
    }

    pub fn demand(&self, j: usize) -> &T {
        &self.demands[j]
    }

    /// The unit cost of shipping from origin `i` to destination `j`.
    pub fn cost(&self, i: usize, j: usize) -> &T {
        &self.costs[(i, j)]
    }

    /// Return the components `(supplies, demands, costs)`.
    pub fn into_parts(self) -> (Vec<T>, Vec<T>, Grid<T>) {
        (self.supplies, self.demands, self.costs)
    }
}

impl<T: Zero + Clone> Instance<T> {
    // Append an origin with zero costs. Only used for balancing, so the
    // invariants need not be rechecked.
    pub(crate) fn push_origin(&mut self, supply: T) {
        self.supplies.push(supply);
        self.costs.push_row(T::zero());
    }

    // Append a destination with zero costs.
    pub(crate) fn push_destination(&mut self, demand: T) {
        self.demands.push(demand);
        self.costs.push_col(T::zero());
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Instance};

    #[test]
    fn test_invalid_values() {
        let costs = vec![vec![1, 2], vec![3, 4]];
        assert_eq!(
            Instance::new(vec![1, 2], vec![-1, 4], costs.clone()),
            Err(Error::NegativeDemand { index: 0 })
        );
        assert_eq!(
            Instance::new(vec![1, -2], vec![1, 4], costs),
            Err(Error::NegativeSupply { index: 1 })
        );
        assert_eq!(
            Instance::new(vec![1, 2], vec![1, 2], vec![vec![1, 2], vec![3, -4]]),
            Err(Error::NegativeCost { row: 1, col: 1 })
        );
    }

    #[test]
    fn test_invalid_shape() {
        match Instance::new(vec![1, 2], vec![1, 2], vec![vec![1, 2]]) {
            Err(Error::Shape { rows: 2, cols: 2, .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
        match Instance::new(vec![1, 2], vec![1, 2], vec![vec![1, 2], vec![3]]) {
            Err(Error::Shape { .. }) => (),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn test_zero_values_are_valid() {
        let instance = Instance::new(vec![0, 3], vec![3, 0], vec![vec![0, 0], vec![0, 0]]).unwrap();
        assert!(instance.is_balanced());
        assert_eq!(*instance.cost(1, 0), 0);
    }
}
