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

use std::collections::HashMap;
use std::error::Error;
use std::fs::read_dir;
use std::io::Cursor;
use std::path::Path;

use rs_transport::trn;
use rs_transport::{SolutionState, TransportOptimizer};

#[test]
fn test_trn_instances() -> Result<(), Box<dyn Error>> {
    let mut solutions = HashMap::new();

    for entry in read_dir(Path::new("tests/trn"))? {
        let entry = entry?;
        if entry.path().extension().map(|ext| ext == "sol").unwrap_or(false) {
            let sol = trn::read_solution_from_file::<i64>(&entry.path().to_string_lossy())?;
            if let Some(file_stem) = entry.path().file_stem().map(|s| s.to_string_lossy().to_string()) {
                solutions.insert(file_stem, sol);
            }
        }
    }

    let mut count = 0;
    for entry in read_dir(Path::new("tests/trn"))? {
        let entry = entry?;
        if entry.path().extension().map(|ext| ext == "trn").unwrap_or(false) {
            let instance = trn::read_from_file::<i64>(&entry.path().to_string_lossy())?;

            let mut opt = TransportOptimizer::new(&instance);
            assert_eq!(opt.solve(), SolutionState::Optimal);

            if let Some((value, flows)) = entry
                .path()
                .file_name()
                .and_then(|s| solutions.get(s.to_string_lossy().as_ref()))
            {
                assert_eq!(*value, opt.value());
                for &(i, j, x) in flows {
                    assert_eq!(opt.flow(i, j), x, "flow on ({},{})", i, j);
                }
                let occupied = opt.plan().cells().filter(|&(_, _, &x)| x != 0).count();
                assert_eq!(occupied, flows.len());
            } else {
                panic!("Can't find solution file for {:?}", entry.path());
            }
            count += 1;
        }
    }
    assert_eq!(count, 2);

    Ok(())
}

#[test]
fn test_write_solve_read() -> Result<(), Box<dyn Error>> {
    let instance = trn::read_from_file::<i64>("tests/trn/lab.trn")?;
    assert_eq!(instance.total_supply(), 281);
    assert_eq!(instance.total_demand(), 297);

    let mut buf = vec![];
    trn::write(&mut buf, &instance)?;
    assert_eq!(trn::read::<_, i64>(Cursor::new(&buf))?, instance);

    let mut opt = TransportOptimizer::new(&instance);
    opt.solve();

    let mut buf = vec![];
    trn::write_solution(&mut buf, opt.plan(), opt.value())?;
    let (value, flows) = trn::read_solution::<_, i64>(Cursor::new(buf))?;
    assert_eq!(value, opt.value());
    let total = flows
        .iter()
        .map(|&(i, j, x)| x * opt.instance().cost(i, j))
        .sum::<i64>();
    assert_eq!(total, value);

    Ok(())
}
