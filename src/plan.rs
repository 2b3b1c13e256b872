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

//! Evaluation of transportation plans.

use crate::grid::Grid;
use crate::instance::Instance;
use crate::num::traits::Num;

/// A transportation plan.
///
/// Cell `(i, j)` holds the amount shipped from origin `i` to
/// destination `j`.
pub type Plan<T> = Grid<T>;

/// Return the total cost of a plan.
///
/// This is the sum of `plan[(i,j)] * costs[(i,j)]` over all cells.
pub fn cost<T>(plan: &Plan<T>, costs: &Grid<T>) -> T
where
    T: Num + Copy,
{
    debug_assert_eq!(plan.shape(), costs.shape());
    plan.as_slice()
        .iter()
        .zip(costs.as_slice())
        .fold(T::zero(), |sum, (&x, &c)| sum + x * c)
}

/// Return `true` if all row sums equal the supplies and all column
/// sums equal the demands.
pub fn is_feasible<T>(plan: &Plan<T>, instance: &Instance<T>) -> bool
where
    T: Num + PartialOrd + Copy,
{
    plan.shape() == instance.costs().shape()
        && plan.as_slice().iter().all(|&x| x >= T::zero())
        && plan.row_sums() == instance.supplies()
        && plan.col_sums() == instance.demands()
}

/// Iterate over the occupied cells, i.e. the cells with positive amount.
pub fn occupied_cells<T>(plan: &Plan<T>) -> impl Iterator<Item = (usize, usize)> + '_
where
    T: Num + PartialOrd + Copy,
{
    plan.cells().filter(|&(_, _, &x)| x > T::zero()).map(|(i, j, _)| (i, j))
}

/// Return `true` if the plan is degenerate.
///
/// A plan is degenerate if it has fewer than `m + n - 1` occupied
/// cells, where `m` is the number of origins and `n` the number of
/// destinations. Potentials of a degenerate plan are not determined
/// uniquely by the occupied cells.
pub fn is_degenerate<T>(plan: &Plan<T>) -> bool
where
    T: Num + PartialOrd + Copy,
{
    let (m, n) = plan.shape();
    m + n > 0 && occupied_cells(plan).count() + 1 < m + n
}

#[cfg(test)]
mod tests {
    use super::{cost, is_degenerate, is_feasible};
    use crate::grid::Grid;
    use crate::Instance;

    #[test]
    fn test_cost() {
        let costs = Grid::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let plan = Grid::from_vec(2, 3, vec![5, 5, 0, 0, 0, 10]).unwrap();
        assert_eq!(cost(&plan, &costs), 5 + 10 + 60);
        assert_eq!(cost(&Grid::zeros(2, 3), &costs), 0);
    }

    #[test]
    fn test_cost_is_linear() {
        let costs = Grid::from_fn(4, 5, |i, j| ((i * 7 + j * 3) % 11) as i64);
        let plan = Grid::from_fn(4, 5, |i, j| ((i + 2 * j) % 5) as i64);
        let value = cost(&plan, &costs);
        for k in 0..6 {
            let scaled = plan.map(|&x| x * k);
            assert_eq!(cost(&scaled, &costs), k * value);
        }
    }

    #[test]
    fn test_feasible_and_degenerate() {
        let instance = Instance::new(vec![10, 10], vec![5, 5, 10], vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let plan = Grid::from_vec(2, 3, vec![5, 5, 0, 0, 0, 10]).unwrap();
        assert!(is_feasible(&plan, &instance));
        // 3 occupied cells < 2 + 3 - 1
        assert!(is_degenerate(&plan));

        let plan = Grid::from_vec(2, 3, vec![5, 4, 1, 0, 1, 9]).unwrap();
        assert!(is_feasible(&plan, &instance));
        assert!(!is_degenerate(&plan));

        let plan = Grid::from_vec(2, 3, vec![6, 4, 0, 0, 0, 10]).unwrap();
        assert!(!is_feasible(&plan, &instance));
    }
}
