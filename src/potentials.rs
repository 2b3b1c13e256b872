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

//! Dual potentials and reduced costs of a transportation plan.
//!
//! The potentials `u` (one per origin) and `v` (one per destination)
//! are derived from the occupied cells of a plan such that
//! `u[i] + v[j] == cost[(i,j)]` for the occupied cells reached. The
//! *reduced cost* of a cell is `cost[(i,j)] - (u[i] + v[j])`. A plan
//! is considered optimal if no empty cell has negative reduced cost.
//!
//! The potentials are computed by a single pass over the grid in
//! row-major order, starting with `u[0] = 0`. This is not a traversal
//! of the basis tree: potentials that cannot be determined in that
//! pass keep the value zero, and a potential whose value is zero is
//! not used to determine others. On degenerate or badly ordered plans the
//! resulting optimality verdict is therefore only a heuristic one.
//!
//! # Example
//!
//! ```
//! use rs_transport::grid::Grid;
//! use rs_transport::potentials::{find_candidate, Potentials};
//!
//! let costs = Grid::from_vec(2, 2, vec![1, 4, 2, 1]).unwrap();
//! let plan = Grid::from_vec(2, 2, vec![5, 5, 0, 5]).unwrap();
//!
//! let pots = Potentials::compute(&plan, &costs);
//! assert_eq!(pots.u, vec![0, -3]);
//! assert_eq!(pots.v, vec![1, 4]);
//!
//! // cell (1,0): 2 - (-3 + 1) = 4 >= 0, the plan is optimal
//! assert_eq!(find_candidate(&plan, &costs, &pots), None);
//! ```

use crate::grid::Grid;
use crate::num::traits::{Num, Signed};

/// Row and column potentials.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Potentials<T> {
    /// The potentials of the origins.
    pub u: Vec<T>,
    /// The potentials of the destinations.
    pub v: Vec<T>,
}

impl<T> Potentials<T>
where
    T: Num + Signed + PartialOrd + Copy,
{
    /// Compute the potentials of a plan.
    ///
    /// `u[0]` is fixed to zero. For every occupied cell `(i,j)` in
    /// row-major order, `v[j]` is set from `u[i]` if `i == 0` or
    /// `u[i]` is non-zero, otherwise `u[i]` is set from `v[j]` if
    /// `v[j]` is non-zero. A potential that happens to be zero is
    /// treated like one that has not been set.
    pub fn compute(plan: &Grid<T>, costs: &Grid<T>) -> Self {
        let (m, n) = plan.shape();
        let mut u = vec![T::zero(); m];
        let mut v = vec![T::zero(); n];

        for (i, j, &x) in plan.cells() {
            if x <= T::zero() {
                continue;
            }
            let c = costs[(i, j)];
            if i == 0 || !u[i].is_zero() {
                v[j] = c - u[i];
            } else if !v[j].is_zero() {
                u[i] = c - v[j];
            }
        }

        Potentials { u, v }
    }

    /// The reduced cost of cell `(i,j)`.
    pub fn reduced_cost(&self, costs: &Grid<T>, i: usize, j: usize) -> T {
        costs[(i, j)] - (self.u[i] + self.v[j])
    }
}

/// A cell that may improve the plan.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Candidate<T> {
    pub row: usize,
    pub col: usize,
    /// The (negative) reduced cost of the cell.
    pub delta: T,
}

/// Return all empty cells with negative reduced cost.
///
/// The candidates are ordered by increasing reduced cost. Cells with
/// equal reduced cost keep their row-major order, so the first
/// candidate is the one returned by [`find_candidate`].
pub fn candidates<T>(plan: &Grid<T>, costs: &Grid<T>, pots: &Potentials<T>) -> Vec<Candidate<T>>
where
    T: Num + Signed + PartialOrd + Copy,
{
    let mut cands: Vec<_> = plan
        .cells()
        .filter(|&(_, _, x)| x.is_zero())
        .filter_map(|(i, j, _)| {
            let delta = pots.reduced_cost(costs, i, j);
            if delta < T::zero() {
                Some(Candidate { row: i, col: j, delta })
            } else {
                None
            }
        })
        .collect();
    // stable, ties keep the scan order
    cands.sort_by(|a, b| a.delta.partial_cmp(&b.delta).unwrap_or(std::cmp::Ordering::Equal));
    cands
}

/// Return the empty cell with the most negative reduced cost.
///
/// Returns `None` if no empty cell has negative reduced cost, i.e. if
/// the plan is optimal with respect to the given potentials.
pub fn find_candidate<T>(plan: &Grid<T>, costs: &Grid<T>, pots: &Potentials<T>) -> Option<Candidate<T>>
where
    T: Num + Signed + PartialOrd + Copy,
{
    let mut min_delta = T::zero();
    let mut best = None;
    for (i, j, x) in plan.cells() {
        if !x.is_zero() {
            continue;
        }
        let delta = pots.reduced_cost(costs, i, j);
        if delta < min_delta {
            min_delta = delta;
            best = Some(Candidate { row: i, col: j, delta });
        }
    }
    best
}
