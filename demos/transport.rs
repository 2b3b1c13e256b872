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

use num_traits::Signed;
use rs_transport::initial::Method;
use rs_transport::{trn, Instance, TransportOptimizer};
use std::error::Error;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;
use std::result::Result;
use std::str::FromStr;

use rustop::opts;
use time::OffsetDateTime;

fn lab() -> Result<Instance<i64>, Box<dyn Error>> {
    Ok(Instance::new(
        vec![62, 76, 21, 87, 35],
        vec![16, 26, 63, 84, 24, 84],
        vec![
            vec![5, 6, 6, 7, 5, 6],
            vec![6, 3, 6, 4, 8, 6],
            vec![8, 5, 6, 2, 7, 8],
            vec![4, 4, 7, 8, 8, 4],
            vec![1, 8, 3, 8, 6, 2],
        ],
    )?)
}

fn run<T>(
    instance: Instance<T>,
    filename: Option<&str>,
    max_iterations: usize,
    start: Option<Method>,
) -> Result<(), Box<dyn Error>>
where
    T: Signed + PartialOrd + Copy + Display,
{
    println!("Instance            : {}", filename.unwrap_or("laboratory problem"));
    println!("Value type          : {}", std::any::type_name::<T>());
    println!("Number of origins   : {}", instance.num_origins());
    println!("Number of dest.     : {}", instance.num_destinations());
    println!("Total supply        : {}", instance.total_supply());
    println!("Total demand        : {}", instance.total_demand());

    let mut opt = TransportOptimizer::new(&instance);
    opt.max_iterations = max_iterations;
    opt.start = start;

    let tstart = OffsetDateTime::now_utc();
    let state = opt.solve();
    let tend = OffsetDateTime::now_utc();
    let soltime = (tend - tstart).as_seconds_f64();

    println!();
    println!("Dummy               : {:?}", opt.dummy());
    println!("Initial method      : {:?}", opt.initial_method());
    println!("Initial value       : {}", opt.initial_value());
    println!("Solution state      : {:?}", state);
    println!("Value               : {}", opt.value());
    println!("Time (seconds)      : {:.6}", soltime);
    println!("Iterations          : {}", opt.num_iterations());
    println!();
    for row in opt.plan().rows() {
        let row = row.iter().map(|x| format!("{:>6}", x)).collect::<Vec<_>>();
        println!("{}", row.join(" "));
    }

    if let Some(filename) = filename {
        println!();
        println!("Write solution to   : {}.sol", filename);

        let solfile = PathBuf::from(format!("{}.sol", filename));
        let f = &mut std::fs::File::create(&solfile)?;
        writeln!(f, "c Solved with the transportation heuristic")?;
        writeln!(f, "c solution state      : {:?}", state)?;
        writeln!(f, "c number of iterations: {}", opt.num_iterations())?;
        trn::write_solution(f, opt.plan(), opt.value())?;
    }

    Ok(())
}

fn read_and_run<T>(filename: &str, max_iterations: usize, start: Option<Method>) -> Result<(), Box<dyn Error>>
where
    T: Signed + PartialOrd + Copy + Display + FromStr,
    T::Err: Display,
{
    let tstart = OffsetDateTime::now_utc();
    let instance = trn::read_from_file::<T>(filename)?;
    let tend = OffsetDateTime::now_utc();
    println!("Read Time (seconds) : {}", (tend - tstart).as_seconds_f64());
    run(instance, Some(filename), max_iterations, start)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve a transportation problem with potentials based improvement.";
        param file:Option<String>, desc:"Instance file name (default: built-in laboratory problem)";
        opt max_iterations:usize=20, desc:"Maximal number of iterations";
        opt northwest:bool, desc:"Start with the northwest corner plan";
        opt minimum_cost:bool, desc:"Start with the minimum cost plan";
        opt floating_point:bool, desc:"Use floating point values";
    }
    .parse_or_exit();

    let start = if args.northwest {
        Some(Method::NorthwestCorner)
    } else if args.minimum_cost {
        Some(Method::MinimumCost)
    } else {
        None
    };

    match args.file {
        Some(ref file) if args.floating_point => read_and_run::<f64>(file, args.max_iterations, start),
        Some(ref file) => read_and_run::<i64>(file, args.max_iterations, start),
        None => run(lab()?, None, args.max_iterations, start),
    }
}
