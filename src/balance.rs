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

//! Balancing of supply and demand.
//!
//! A transportation problem is *balanced* if the total supply equals
//! the total demand. An unbalanced problem is turned into a balanced
//! one by adding a dummy origin (if the demand exceeds the supply) or
//! a dummy destination (if the supply exceeds the demand) that takes
//! the difference. All cells of the dummy have cost zero.
//!
//! # Example
//!
//! ```
//! use rs_transport::balance::{balance, Dummy};
//! use rs_transport::Instance;
//!
//! let instance = Instance::new(vec![5, 5], vec![3, 3], vec![vec![1, 2], vec![3, 4]]).unwrap();
//! let balanced = balance(&instance);
//!
//! assert_eq!(balanced.dummy, Some(Dummy::Destination(2)));
//! assert_eq!(balanced.instance.demands(), &[3, 3, 4]);
//! assert_eq!(balanced.instance.costs().col_sum(2), 0);
//! assert!(balanced.instance.is_balanced());
//! ```

use crate::instance::Instance;
use crate::num::traits::Num;
use log::debug;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A synthetic origin or destination added by [`balance`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Dummy {
    /// The origin with the given index is a dummy.
    Origin(usize),
    /// The destination with the given index is a dummy.
    Destination(usize),
}

/// A balanced instance.
#[derive(Clone, Debug)]
pub struct Balanced<T> {
    /// The balanced instance.
    pub instance: Instance<T>,
    /// The dummy origin or destination, if one has been added.
    pub dummy: Option<Dummy>,
}

/// Balance total supply and total demand.
///
/// If the instance is already balanced it is returned unchanged.
pub fn balance<T>(instance: &Instance<T>) -> Balanced<T>
where
    T: Num + PartialOrd + Copy,
{
    let mut instance = instance.clone();
    let supply = instance.total_supply();
    let demand = instance.total_demand();

    let dummy = if supply < demand {
        instance.push_origin(demand - supply);
        Some(Dummy::Origin(instance.num_origins() - 1))
    } else if supply > demand {
        instance.push_destination(supply - demand);
        Some(Dummy::Destination(instance.num_destinations() - 1))
    } else {
        None
    };

    if let Some(d) = dummy {
        debug!("Balanced instance with {:?}", d);
    }

    Balanced { instance, dummy }
}
