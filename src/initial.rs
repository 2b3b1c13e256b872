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

//! Initial transportation plans.
//!
//! Two construction heuristics are provided:
//!
//! - the *northwest corner* method fills the grid from the top-left
//!   cell, moving right whenever a destination is saturated and down
//!   whenever an origin is exhausted,
//! - the *minimum cost* method repeatedly ships as much as possible on
//!   the cheapest free cell.
//!
//! Both methods are available as iterators over the single allocation
//! steps `(row, col, amount)` and as functions returning the complete
//! plan. On a balanced instance the resulting plan is feasible, i.e.
//! all row sums equal the supplies and all column sums equal the
//! demands.
//!
//! # Example
//!
//! ```
//! use rs_transport::initial::{self, NorthwestCorner};
//! use rs_transport::Instance;
//!
//! let instance = Instance::new(
//!     vec![10, 10],
//!     vec![5, 5, 10],
//!     vec![vec![4, 1, 2], vec![2, 5, 3]],
//! ).unwrap();
//!
//! let steps: Vec<_> = NorthwestCorner::new(&instance).collect();
//! assert_eq!(steps, vec![(0, 0, 5), (0, 1, 5), (1, 2, 10)]);
//!
//! let plan = initial::minimum_cost(&instance);
//! assert_eq!(plan.row(0), &[0, 5, 5]);
//! assert_eq!(plan.row(1), &[5, 0, 5]);
//! ```

use crate::grid::Grid;
use crate::instance::Instance;
use crate::num::traits::Num;
use log::trace;
use std::fmt::Display;

/// A single allocation step of a construction heuristic.
///
/// The tuple is `(row, col, amount)`.
pub type Step<T> = (usize, usize, T);

/// Iterator over the steps of the northwest corner method.
pub struct NorthwestCorner<T> {
    supplies: Vec<T>,
    demands: Vec<T>,
    row: usize,
    col: usize,
}

impl<T> NorthwestCorner<T>
where
    T: Num + PartialOrd + Copy,
{
    pub fn new(instance: &Instance<T>) -> Self {
        NorthwestCorner {
            supplies: instance.supplies().to_vec(),
            demands: instance.demands().to_vec(),
            row: 0,
            col: 0,
        }
    }
}

impl<T> Iterator for NorthwestCorner<T>
where
    T: Num + PartialOrd + Copy,
{
    type Item = Step<T>;

    fn next(&mut self) -> Option<Step<T>> {
        while self.row < self.supplies.len() && self.col < self.demands.len() {
            let (i, j) = (self.row, self.col);
            let amount = min(self.supplies[i], self.demands[j]);
            self.supplies[i] = self.supplies[i] - amount;
            self.demands[j] = self.demands[j] - amount;

            // both may be exhausted at the same time
            if self.supplies[i].is_zero() {
                self.row += 1;
            }
            if self.demands[j].is_zero() {
                self.col += 1;
            }

            if !amount.is_zero() {
                return Some((i, j, amount));
            }
        }
        None
    }
}

/// Iterator over the steps of the minimum cost method.
pub struct MinimumCost<'a, T> {
    costs: &'a Grid<T>,
    supplies: Vec<T>,
    demands: Vec<T>,
    used: Grid<bool>,
}

impl<'a, T> MinimumCost<'a, T>
where
    T: Num + PartialOrd + Copy,
{
    pub fn new(instance: &'a Instance<T>) -> Self {
        let costs = instance.costs();
        MinimumCost {
            costs,
            supplies: instance.supplies().to_vec(),
            demands: instance.demands().to_vec(),
            used: Grid::filled(costs.num_rows(), costs.num_cols(), false),
        }
    }

    // The cheapest cell with remaining supply and demand that has not
    // been allocated yet. The first cell in row-major order wins ties.
    fn cheapest_cell(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for (i, j, &c) in self.costs.cells() {
            if self.used[(i, j)] || self.supplies[i].is_zero() || self.demands[j].is_zero() {
                continue;
            }
            match best {
                Some(b) if self.costs[b] <= c => (),
                _ => best = Some((i, j)),
            }
        }
        best
    }
}

impl<'a, T> Iterator for MinimumCost<'a, T>
where
    T: Num + PartialOrd + Copy,
{
    type Item = Step<T>;

    fn next(&mut self) -> Option<Step<T>> {
        let (i, j) = self.cheapest_cell()?;
        let amount = min(self.supplies[i], self.demands[j]);
        self.supplies[i] = self.supplies[i] - amount;
        self.demands[j] = self.demands[j] - amount;
        self.used[(i, j)] = true;
        Some((i, j, amount))
    }
}

/// A construction heuristic for initial plans.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Method {
    NorthwestCorner,
    MinimumCost,
}

impl Method {
    /// Build a plan with this method.
    pub fn build<T>(self, instance: &Instance<T>) -> Grid<T>
    where
        T: Num + PartialOrd + Copy + Display,
    {
        match self {
            Method::NorthwestCorner => northwest_corner(instance),
            Method::MinimumCost => minimum_cost(instance),
        }
    }
}

/// Build a plan with the northwest corner method.
pub fn northwest_corner<T>(instance: &Instance<T>) -> Grid<T>
where
    T: Num + PartialOrd + Copy + Display,
{
    collect_plan(instance, NorthwestCorner::new(instance))
}

/// Build a plan with the minimum cost method.
pub fn minimum_cost<T>(instance: &Instance<T>) -> Grid<T>
where
    T: Num + PartialOrd + Copy + Display,
{
    collect_plan(instance, MinimumCost::new(instance))
}

fn collect_plan<T, I>(instance: &Instance<T>, steps: I) -> Grid<T>
where
    T: Num + Copy + Display,
    I: Iterator<Item = Step<T>>,
{
    let mut plan = Grid::zeros(instance.num_origins(), instance.num_destinations());
    for (i, j, amount) in steps {
        trace!("Allocate {} on cell ({},{})", amount, i, j);
        plan[(i, j)] = plan[(i, j)] + amount;
    }
    plan
}

fn min<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::{minimum_cost, northwest_corner, MinimumCost, NorthwestCorner};
    use crate::balance::balance;
    use crate::Instance;

    fn lab() -> Instance<i32> {
        Instance::new(
            vec![62, 76, 21, 87, 35],
            vec![16, 26, 63, 84, 24, 84],
            vec![
                vec![5, 6, 6, 7, 5, 6],
                vec![6, 3, 6, 4, 8, 6],
                vec![8, 5, 6, 2, 7, 8],
                vec![4, 4, 7, 8, 8, 4],
                vec![1, 8, 3, 8, 6, 2],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_northwest_corner_three_cells() {
        let instance = Instance::new(vec![10, 10], vec![5, 5, 10], vec![vec![9, 9, 9], vec![9, 9, 9]]).unwrap();
        let plan = northwest_corner(&instance);
        assert_eq!(plan.cells().filter(|&(_, _, &x)| x > 0).count(), 3);
        assert_eq!(plan[(0, 0)], 5);
        assert_eq!(plan[(0, 1)], 5);
        assert_eq!(plan[(1, 2)], 10);
    }

    #[test]
    fn test_northwest_corner_skips_empty_origin() {
        let instance = Instance::new(vec![0, 4, 2], vec![3, 3], vec![vec![1, 1], vec![1, 1], vec![1, 1]]).unwrap();
        let steps: Vec<_> = NorthwestCorner::new(&instance).collect();
        assert_eq!(steps, vec![(1, 0, 3), (1, 1, 1), (2, 1, 2)]);
    }

    #[test]
    fn test_minimum_cost_first_cell() {
        let instance = lab();
        let first = MinimumCost::new(&instance).next();
        assert_eq!(first, Some((4, 0, 16)));
    }

    #[test]
    fn test_minimum_cost_balanced_lab() {
        let balanced = balance(&lab()).instance;
        let steps: Vec<_> = MinimumCost::new(&balanced).collect();
        // the dummy origin has zero costs and is served first
        assert_eq!(steps[0], (5, 0, 16));
        assert_eq!(steps[1], (2, 3, 21));
        assert_eq!(steps.len(), 10);
    }

    #[test]
    fn test_minimum_cost_ties() {
        let instance = Instance::new(vec![2, 2], vec![2, 2], vec![vec![3, 1], vec![1, 3]]).unwrap();
        let steps: Vec<_> = MinimumCost::new(&instance).collect();
        assert_eq!(steps, vec![(0, 1, 2), (1, 0, 2)]);
    }

    #[test]
    fn test_plans_are_feasible() {
        let instances = vec![
            balance(&lab()).instance,
            Instance::new(vec![20, 30], vec![10, 25, 15], vec![vec![8, 6, 10], vec![9, 12, 13]]).unwrap(),
            Instance::new(vec![10, 10], vec![5, 5, 10], vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap(),
            balance(&Instance::new(vec![5, 5], vec![3, 3], vec![vec![1, 2], vec![3, 1]]).unwrap()).instance,
            Instance::new(vec![7, 0, 3], vec![0, 10], vec![vec![2, 2], vec![0, 1], vec![2, 2]]).unwrap(),
        ];

        for instance in &instances {
            for plan in &[northwest_corner(instance), minimum_cost(instance)] {
                assert_eq!(plan.row_sums(), instance.supplies());
                assert_eq!(plan.col_sums(), instance.demands());
            }
        }
    }
}
