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

//! Unit improvement steps.
//!
//! An improvement step moves one unit of flow inside a single row: the
//! candidate cell is increased by one and the first other occupied
//! cell of the same row is decreased by one. The row sums are
//! preserved, the column sums of the two affected columns are *not*.
//! This is a simplification of the stepping-stone method, which would
//! move flow around a closed cycle of basic cells.

use crate::grid::Grid;
use crate::num::traits::Num;
use crate::plan::cost;

use std::error;
use std::fmt;

/// The row of a candidate has no other occupied cell to take a unit from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DegenerateRow {
    pub row: usize,
}

impl fmt::Display for DegenerateRow {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        write!(fmt, "No compensating cell in row {}", self.row)
    }
}

impl error::Error for DegenerateRow {}

/// Return the column of the cell that compensates an increase of `(row, col)`.
///
/// This is the first column `j != col` (from left to right) with an
/// amount of at least one unit in `row`, so the shift never makes a
/// cell negative.
pub fn compensating_col<T>(plan: &Grid<T>, row: usize, col: usize) -> Option<usize>
where
    T: Num + PartialOrd + Copy,
{
    plan.row(row)
        .iter()
        .enumerate()
        .position(|(j, &x)| j != col && x >= T::one())
}

/// Shift one unit into cell `(row, col)` of `plan`.
///
/// On success the new cost of the plan is returned. If the row has no
/// compensating cell the plan is left unchanged and
/// [`DegenerateRow`] is returned.
///
/// # Example
///
/// ```
/// use rs_transport::grid::Grid;
/// use rs_transport::improve::{improve, DegenerateRow};
///
/// let costs = Grid::from_vec(2, 2, vec![3, 1, 1, 3]).unwrap();
/// let mut plan = Grid::from_vec(2, 2, vec![2, 0, 0, 0]).unwrap();
///
/// assert_eq!(improve(&mut plan, &costs, 0, 1), Ok(4));
/// assert_eq!(plan.row(0), &[1, 1]);
///
/// assert_eq!(improve(&mut plan, &costs, 1, 0), Err(DegenerateRow { row: 1 }));
/// assert_eq!(plan.row(1), &[0, 0]);
/// ```
pub fn improve<T>(plan: &mut Grid<T>, costs: &Grid<T>, row: usize, col: usize) -> Result<T, DegenerateRow>
where
    T: Num + PartialOrd + Copy,
{
    let j = compensating_col(plan, row, col).ok_or(DegenerateRow { row })?;
    plan[(row, col)] = plan[(row, col)] + T::one();
    plan[(row, j)] = plan[(row, j)] - T::one();
    Ok(cost(plan, costs))
}
