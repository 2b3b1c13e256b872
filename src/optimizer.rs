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

//! Iterative improvement of transportation plans.
//!
//! The optimizer balances the instance, builds an initial plan with
//! both construction heuristics and keeps the cheaper one (the minimum
//! cost plan on ties). Then it repeats
//!
//! 1. compute the potentials of the current plan,
//! 2. find the empty cell with the most negative reduced cost,
//! 3. shift one unit into that cell,
//!
//! until no cell has negative reduced cost or the iteration limit is
//! reached. The potentials are computed in a single pass and the shift
//! only preserves row sums (see [`potentials`](crate::potentials) and
//! [`improve`](crate::improve)), so the optimizer is a heuristic.
//!
//! # Example
//!
//! ```
//! use rs_transport::{Instance, SolutionState, TransportOptimizer};
//!
//! let instance = Instance::new(
//!     vec![20, 30],
//!     vec![10, 25, 15],
//!     vec![vec![8, 6, 10], vec![9, 12, 13]],
//! ).unwrap();
//!
//! let mut opt = TransportOptimizer::new(&instance);
//! assert_eq!(opt.solve(), SolutionState::Optimal);
//! assert_eq!(opt.value(), 465);
//! assert_eq!(opt.num_iterations(), 0);
//! assert_eq!(opt.plan().row(0), &[0, 20, 0]);
//! assert_eq!(opt.plan().row(1), &[10, 5, 15]);
//! ```

use crate::balance::{balance, Dummy};
use crate::grid::Grid;
use crate::improve::improve;
use crate::initial::Method;
use crate::instance::{self, Instance};
use crate::num::traits::{Num, Signed};
use crate::plan::cost;
use crate::potentials::{candidates, Candidate, Potentials};

use log::{debug, info, warn};
use std::fmt::Display;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The default iteration limit.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SolutionState {
    /// Unknown state, the problem has not been solved, yet
    Unknown,
    /// No empty cell has negative reduced cost
    Optimal,
    /// The optimizer stopped without reaching optimality
    IterationLimit,
}

/// The result of an optimization run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Solution<T> {
    /// The final plan on the balanced instance.
    pub plan: Grid<T>,
    /// The cost of the plan.
    pub value: T,
    /// The number of improvement steps.
    pub iterations: usize,
    /// The terminal state.
    pub state: SolutionState,
    /// The dummy origin or destination of the balanced instance.
    pub dummy: Option<Dummy>,
}

/// Heuristic optimizer for transportation problems.
pub struct TransportOptimizer<T> {
    instance: Instance<T>,
    dummy: Option<Dummy>,

    plan: Grid<T>,
    value: T,
    best: Grid<T>,
    best_value: T,
    initial_method: Option<Method>,
    initial_value: T,

    /// The maximal number of improvement steps.
    ///
    /// The default is [`DEFAULT_MAX_ITERATIONS`].
    pub max_iterations: usize,
    /// The construction method of the initial plan.
    ///
    /// If `None` (the default) both methods are run and the cheaper
    /// plan is used.
    pub start: Option<Method>,

    niter: usize,
    solution_state: SolutionState,
}

impl<T> TransportOptimizer<T>
where
    T: Num + Signed + PartialOrd + Copy + Display,
{
    /// Create an optimizer for an instance.
    ///
    /// The instance is balanced first, so the plans of the optimizer
    /// may contain an additional dummy row or column.
    pub fn new(instance: &Instance<T>) -> Self {
        let balanced = balance(instance);
        let (m, n) = balanced.instance.costs().shape();
        TransportOptimizer {
            instance: balanced.instance,
            dummy: balanced.dummy,

            plan: Grid::zeros(m, n),
            value: T::zero(),
            best: Grid::zeros(m, n),
            best_value: T::zero(),
            initial_method: None,
            initial_value: T::zero(),

            max_iterations: DEFAULT_MAX_ITERATIONS,
            start: None,

            niter: 0,
            solution_state: SolutionState::Unknown,
        }
    }

    /// The balanced instance.
    pub fn instance(&self) -> &Instance<T> {
        &self.instance
    }

    /// The dummy origin or destination added for balancing.
    pub fn dummy(&self) -> Option<Dummy> {
        self.dummy
    }

    /// Solve the transportation problem.
    pub fn solve(&mut self) -> SolutionState {
        self.niter = 0;
        self.solution_state = SolutionState::Unknown;

        self.build_initial_plan();
        self.best = self.plan.clone();
        self.best_value = self.value;

        loop {
            let pots = Potentials::compute(&self.plan, self.instance.costs());
            let cands = candidates(&self.plan, self.instance.costs(), &pots);

            if cands.is_empty() {
                info!("Plan is optimal after {} iterations, value {}", self.niter, self.value);
                self.solution_state = SolutionState::Optimal;
                return self.solution_state;
            }

            if self.niter >= self.max_iterations {
                info!("Reached iteration limit {}", self.max_iterations);
                return self.stop_at_limit();
            }

            match self.apply_first(&cands) {
                Some((cand, value)) => {
                    self.niter += 1;
                    self.value = value;
                    debug!(
                        "Iteration {}: cell ({},{}) delta {} value {}",
                        self.niter, cand.row, cand.col, cand.delta, value
                    );
                    if value < self.best_value {
                        self.best.clone_from(&self.plan);
                        self.best_value = value;
                    }
                }
                None => {
                    warn!("No candidate cell can be improved ({} candidates)", cands.len());
                    return self.stop_at_limit();
                }
            }
        }
    }

    /// Return the solution state of the latest computation.
    pub fn solution_state(&self) -> SolutionState {
        self.solution_state
    }

    /// The number of improvement steps of the latest computation.
    pub fn num_iterations(&self) -> usize {
        self.niter
    }

    /// The current plan.
    pub fn plan(&self) -> &Grid<T> {
        &self.plan
    }

    /// The cost of the current plan.
    pub fn value(&self) -> T {
        self.value
    }

    /// The amount shipped from origin `i` to destination `j`.
    pub fn flow(&self, i: usize, j: usize) -> T {
        self.plan[(i, j)]
    }

    /// The method that built the initial plan.
    pub fn initial_method(&self) -> Option<Method> {
        self.initial_method
    }

    /// The cost of the initial plan.
    pub fn initial_value(&self) -> T {
        self.initial_value
    }

    /// Consume the optimizer and return the solution.
    pub fn into_solution(self) -> Solution<T> {
        Solution {
            plan: self.plan,
            value: self.value,
            iterations: self.niter,
            state: self.solution_state,
            dummy: self.dummy,
        }
    }

    fn build_initial_plan(&mut self) {
        let (method, plan) = match self.start {
            Some(method) => (method, method.build(&self.instance)),
            None => {
                let nw = Method::NorthwestCorner.build(&self.instance);
                let mc = Method::MinimumCost.build(&self.instance);
                let nw_value = cost(&nw, self.instance.costs());
                let mc_value = cost(&mc, self.instance.costs());
                debug!("Initial values: northwest corner {}, minimum cost {}", nw_value, mc_value);
                if mc_value <= nw_value {
                    (Method::MinimumCost, mc)
                } else {
                    (Method::NorthwestCorner, nw)
                }
            }
        };

        self.value = cost(&plan, self.instance.costs());
        self.plan = plan;
        self.initial_method = Some(method);
        self.initial_value = self.value;
        info!("Initial plan by {:?}, value {}", method, self.value);
    }

    // Apply the first candidate whose row allows a unit shift.
    fn apply_first(&mut self, cands: &[Candidate<T>]) -> Option<(Candidate<T>, T)> {
        for &cand in cands {
            match improve(&mut self.plan, self.instance.costs(), cand.row, cand.col) {
                Ok(value) => return Some((cand, value)),
                Err(err) => warn!("Skip cell ({},{}): {}", cand.row, cand.col, err),
            }
        }
        None
    }

    fn stop_at_limit(&mut self) -> SolutionState {
        if self.best_value < self.value {
            self.plan.clone_from(&self.best);
            self.value = self.best_value;
        }
        self.solution_state = SolutionState::IterationLimit;
        self.solution_state
    }
}

/// Solve a transportation problem with the default settings.
///
/// The function validates the data, balances the instance and runs
/// the [`TransportOptimizer`].
///
/// # Example
///
/// ```
/// use rs_transport::{transport, balance::Dummy, SolutionState};
///
/// let sol = transport(vec![5, 5], vec![3, 3], vec![vec![1, 2], vec![3, 1]]).unwrap();
/// assert_eq!(sol.dummy, Some(Dummy::Destination(2)));
/// assert_eq!(sol.state, SolutionState::Optimal);
/// assert_eq!(sol.iterations, 1);
/// assert_eq!(sol.value, 7);
/// assert_eq!(sol.plan.row_sums(), vec![5, 5]);
/// ```
pub fn transport<T, R>(supplies: Vec<T>, demands: Vec<T>, costs: Vec<R>) -> Result<Solution<T>, instance::Error>
where
    T: Num + Signed + PartialOrd + Copy + Display,
    R: AsRef<[T]>,
{
    let instance = Instance::new(supplies, demands, costs)?;
    let mut opt = TransportOptimizer::new(&instance);
    opt.solve();
    Ok(opt.into_solution())
}

#[cfg(test)]
mod tests {
    use super::{SolutionState, TransportOptimizer};
    use crate::initial::Method;
    use crate::Instance;

    #[test]
    fn test_not_solved() {
        let instance = Instance::new(vec![1], vec![1], vec![vec![1]]).unwrap();
        let opt = TransportOptimizer::new(&instance);
        assert_eq!(opt.solution_state(), SolutionState::Unknown);
        assert_eq!(opt.num_iterations(), 0);
    }

    #[test]
    fn test_empty_instance() {
        let instance = Instance::<i32>::new(vec![], vec![], Vec::<Vec<i32>>::new()).unwrap();
        let mut opt = TransportOptimizer::new(&instance);
        assert_eq!(opt.solve(), SolutionState::Optimal);
        assert_eq!(opt.value(), 0);
    }

    #[test]
    fn test_forced_start() {
        let instance = Instance::new(vec![5, 5], vec![3, 3, 4], vec![vec![1, 2, 0], vec![3, 1, 0]]).unwrap();
        let mut opt = TransportOptimizer::new(&instance);
        opt.start = Some(Method::MinimumCost);
        opt.max_iterations = 0;
        opt.solve();
        assert_eq!(opt.initial_method(), Some(Method::MinimumCost));
        assert_eq!(opt.initial_value(), 10);
    }

    #[test]
    fn test_skip_degenerate_candidate() {
        let costs = vec![vec![4, 2, 6], vec![1, 0, 6], vec![0, 5, 2]];
        let instance = Instance::new(vec![5, 4, 0], vec![4, 1, 0], costs).unwrap();
        let mut opt = TransportOptimizer::new(&instance);
        opt.max_iterations = 1;
        // cell (2,0) has reduced cost -4 but row 2 is empty, (0,1) with -1 is applied
        assert_eq!(opt.solve(), SolutionState::Optimal);
        assert_eq!(opt.initial_value(), 7);
        assert_eq!(opt.num_iterations(), 1);
        assert_eq!(opt.value(), 5);
        assert_eq!(opt.plan().row(0), &[0, 1, 0, 4]);
        assert_eq!(opt.plan().row(1), &[3, 1, 0, 0]);
        assert_eq!(opt.plan().row(2), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_all_candidates_degenerate() {
        // the only negative reduced costs are in the empty second row
        let instance = Instance::new(vec![5, 0], vec![2, 3], vec![vec![1, 5], vec![0, 0]]).unwrap();
        let mut opt = TransportOptimizer::new(&instance);
        assert_eq!(opt.solve(), SolutionState::IterationLimit);
        assert_eq!(opt.num_iterations(), 0);
        assert_eq!(opt.plan().row(0), &[2, 3]);
        assert_eq!(opt.plan().row(1), &[0, 0]);
        assert_eq!(opt.value(), 17);
    }
}
