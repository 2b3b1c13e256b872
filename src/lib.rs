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

#![forbid(unsafe_code)]

//! A library for the classical transportation problem.
//!
//! Given the supplies of some origins, the demands of some
//! destinations and the unit shipping cost of each origin-destination
//! pair, find a plan that ships all supplies to the destinations at
//! low total cost.
//!
//! The solver balances the problem, builds initial plans with the
//! northwest corner and the minimum cost method, and improves the
//! cheaper one guided by dual potentials. It is a heuristic, see
//! [`optimizer`] for details.
//!
//! # Example
//!
//! ```
//! use rs_transport::{Instance, SolutionState, TransportOptimizer};
//!
//! let instance = Instance::new(
//!     vec![10, 10],
//!     vec![5, 5, 10],
//!     vec![vec![1, 2, 3], vec![4, 5, 6]],
//! ).unwrap();
//!
//! let mut opt = TransportOptimizer::new(&instance);
//! assert_eq!(opt.solve(), SolutionState::Optimal);
//! assert_eq!(opt.value(), 75);
//! assert_eq!(opt.plan().row(0), &[5, 5, 0]);
//! assert_eq!(opt.plan().row(1), &[0, 0, 10]);
//! ```

mod num {
    pub use num_traits as traits;
}

// # Data structures

pub mod grid;
pub use self::grid::Grid;

pub mod instance;
pub use self::instance::Instance;

pub mod plan;
pub use self::plan::Plan;

// # Algorithms

pub mod balance;
pub mod improve;
pub mod initial;
pub mod potentials;

pub mod optimizer;
pub use self::optimizer::{transport, Solution, SolutionState, TransportOptimizer};

// # File formats

pub mod trn;
