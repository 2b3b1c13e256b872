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

//! Reading and writing transportation problems in a DIMACS-like text
//! format. A file must look as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the first non-comment line must have the form `p trn <m> <n>`,
//!    where `<m>` is the number of origins and `<n>` the number of
//!    destinations.
//! 4. after the problem line there follow, in any order,
//!    - supply lines `s <i> <supply>` with the origin number `<i>` in
//!      `1..m`,
//!    - demand lines `d <j> <demand>` with the destination number `<j>`
//!      in `1..n`,
//!    - cost lines `a <i> <j> <cost>`.
//!
//! Origins and destinations without supply or demand line have value
//! zero. There must be exactly one cost line for each of the `m * n`
//! cells, so a problem with origins needs at least one destination and
//! vice versa.
//!
//! A solution file consists of a line `s <value>` with the total cost
//! followed by lines `f <i> <j> <amount>` for each cell with positive
//! amount.
//!
//! # Example
//!
//! ```
//! use rs_transport::trn;
//! use std::io::Cursor;
//!
//! let file = "c two origins, three destinations
//! p trn 2 3
//! s 1 10
//! s 2 10
//! d 1 5
//! d 2 5
//! d 3 10
//! a 1 1 1
//! a 1 2 2
//! a 1 3 3
//! a 2 1 4
//! a 2 2 5
//! a 2 3 6
//! ";
//!
//! let instance = trn::read::<_, i64>(Cursor::new(file)).unwrap();
//! assert_eq!(instance.supplies(), &[10, 10]);
//! assert_eq!(instance.demands(), &[5, 5, 10]);
//! assert_eq!(*instance.cost(1, 2), 6);
//! ```

use crate::grid::Grid;
use crate::instance::{self, Instance};
use crate::num::traits::{Num, Zero};

use std::error;
use std::fmt::{self, Display};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::str::{FromStr, SplitWhitespace};

/// Error when reading a file in TRN format.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Format { line: usize, msg: String },
    Data { line: usize, msg: String },
    Instance(instance::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<instance::Error> for Error {
    fn from(err: instance::Error) -> Self {
        Error::Instance(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            Io(err) => err.fmt(fmt),
            Format { line, msg } => write!(fmt, "Format error on line {}: {}", line, msg),
            Data { line, msg } => write!(fmt, "Data error on line {}: {}", line, msg),
            Instance(err) => write!(fmt, "Invalid instance: {}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Instance(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

struct TrnReader<R: Read> {
    io: BufReader<R>,

    line: String,
    line_number: usize,
}

impl<R: Read> TrnReader<R> {
    fn new(reader: R) -> Self {
        TrnReader {
            io: BufReader::new(reader),
            line: String::new(),
            line_number: 0,
        }
    }

    // Read the next non-empty, non-comment line.
    fn read_line(&mut self) -> Result<Option<Tokens>> {
        let line = &mut self.line;
        loop {
            line.clear();
            if self.io.read_line(line)? == 0 {
                return Ok(None);
            }

            self.line_number += 1;
            let mut it = line.char_indices();
            while let Some((i, c)) = it.next() {
                if char::is_whitespace(c) {
                    continue;
                }
                if c == 'c' {
                    break;
                }
                return Ok(Some(Tokens {
                    it: line[i..].split_whitespace(),
                    line: self.line_number,
                }));
            }
        }
    }

    // Expect a line with the given descriptor and return the remaining tokens.
    fn expect_line(&mut self, descriptor: &str) -> Result<Tokens> {
        let line_number = self.line_number;
        let mut toks = self.read_line()?.ok_or_else(|| Error::Format {
            line: line_number,
            msg: format!("unexpected end of file, expected '{}' line", descriptor),
        })?;
        let line = toks.line;
        match toks.next() {
            Some(d) if d == descriptor => Ok(toks),
            Some(d) => Err(Error::Format {
                line,
                msg: format!("unexpected line, expected '{}', got '{}'", descriptor, d),
            }),
            None => Err(Error::Format {
                line,
                msg: "unexpected empty line".to_string(),
            }),
        }
    }

    // Read the next line, which must have one of the given descriptors.
    //
    // Returns `Ok(None)` at the end of the file.
    fn read_one_line_of(&mut self, descriptors: &[&str]) -> Result<Option<(&str, Tokens)>> {
        if let Some(mut toks) = self.read_line()? {
            let line = toks.line;
            match toks.next() {
                Some(d) if descriptors.iter().any(|&desc| desc == d) => Ok(Some((d, toks))),
                Some(d) => Err(Error::Format {
                    line,
                    msg: format!(
                        "unexpected line, expected one of '{}', got '{}'",
                        descriptors.join("', '"),
                        d
                    ),
                }),
                None => Err(Error::Format {
                    line,
                    msg: "unexpected empty line".to_string(),
                }),
            }
        } else {
            Ok(None)
        }
    }
}

/// Iterates over the tokens in a line.
struct Tokens<'a> {
    it: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.it.next()
    }
}

impl<'a> Tokens<'a> {
    /// Return an error if the next token is not the given token.
    fn expect(&mut self, tok: &str) -> Result<()> {
        let line = self.line;
        match self.it.next() {
            Some(nxt) if nxt == tok => Ok(()),
            Some(nxt) => Err(Error::Format {
                line,
                msg: format!("expected '{}', got '{}'", tok, nxt),
            }),
            None => Err(Error::Format {
                line,
                msg: format!("expected '{}'", tok),
            }),
        }
    }

    /// Returns the next token converted to a number.
    fn number<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let line = self.line;
        self.it
            .next()
            .ok_or_else(|| Error::Format {
                line,
                msg: "expected number".to_string(),
            })?
            .parse()
            .map_err(|e| Error::Format {
                line,
                msg: format!("{}", e),
            })
    }

    /// Returns the next token as 1-based index in `1..=n`, converted to 0-based.
    fn index(&mut self, n: usize, what: &str) -> Result<usize> {
        let k: usize = self.number()?;
        if k < 1 || k > n {
            return Err(Error::Data {
                line: self.line,
                msg: format!("invalid {} {} (must be in 1..{})", what, k, n),
            });
        }
        Ok(k - 1)
    }

    /// Ensures that there is no next token.
    fn end(&mut self) -> Result<()> {
        if let Some(s) = self.it.next() {
            Err(Error::Format {
                line: self.line,
                msg: format!("unexpected token at end of line: {}", s),
            })
        } else {
            Ok(())
        }
    }
}

/// Read a transportation problem.
pub fn read<R, T>(r: R) -> Result<Instance<T>>
where
    R: Read,
    T: FromStr + Num + PartialOrd + Copy,
    T::Err: Display,
{
    let mut reader = TrnReader::new(r);

    // Read the problem line.
    let mut pline = reader.expect_line("p")?;
    let pline_number = pline.line;
    pline.expect("trn")?;
    let norigins: usize = pline.number()?;
    let ndests: usize = pline.number()?;
    pline.end()?;

    let ncells = norigins.checked_mul(ndests).ok_or_else(|| Error::Data {
        line: pline_number,
        msg: format!("too many cells: {} x {}", norigins, ndests),
    })?;
    if ncells == 0 && norigins.max(ndests) > 0 {
        return Err(Error::Data {
            line: pline_number,
            msg: "a problem with origins must have destinations and vice versa".to_string(),
        });
    }

    // Nothing is allocated from the problem line until all cost lines
    // have been seen.
    let mut supply_lines: Vec<(usize, T)> = vec![];
    let mut demand_lines: Vec<(usize, T)> = vec![];
    let mut cost_lines: Vec<(usize, T, usize)> = vec![];
    let mut last_line = pline_number;

    while let Some((d, mut toks)) = reader.read_one_line_of(&["s", "d", "a"])? {
        last_line = toks.line;
        match d {
            "s" => {
                let i = toks.index(norigins, "origin")?;
                supply_lines.push((i, toks.number()?));
            }
            "d" => {
                let j = toks.index(ndests, "destination")?;
                demand_lines.push((j, toks.number()?));
            }
            _ => {
                let i = toks.index(norigins, "origin")?;
                let j = toks.index(ndests, "destination")?;
                cost_lines.push((i * ndests + j, toks.number()?, toks.line));
            }
        }
        toks.end()?;
    }

    // stable, so the later of two duplicate lines is reported
    cost_lines.sort_by_key(|&(k, _, _)| k);
    for w in cost_lines.windows(2) {
        if w[0].0 == w[1].0 {
            return Err(Error::Data {
                line: w[1].2,
                msg: format!("duplicate cost for cell ({},{})", w[1].0 / ndests + 1, w[1].0 % ndests + 1),
            });
        }
    }
    if cost_lines.len() < ncells {
        let k = cost_lines
            .iter()
            .enumerate()
            .find(|&(k, &(cell, _, _))| k != cell)
            .map(|(k, _)| k)
            .unwrap_or_else(|| cost_lines.len());
        return Err(Error::Data {
            line: last_line,
            msg: format!("missing cost for cell ({},{})", k / ndests + 1, k % ndests + 1),
        });
    }

    let mut supplies = vec![T::zero(); norigins];
    for (i, s) in supply_lines {
        supplies[i] = s;
    }
    let mut demands = vec![T::zero(); ndests];
    for (j, d) in demand_lines {
        demands[j] = d;
    }

    let data = cost_lines.into_iter().map(|(_, c, _)| c).collect();
    let costs = Grid::from_vec(norigins, ndests, data).ok_or_else(|| Error::Data {
        line: last_line,
        msg: "inconsistent number of cells".to_string(),
    })?;

    Ok(Instance::with_grid(supplies, demands, costs)?)
}

/// Read a transportation problem from a named file.
pub fn read_from_file<T>(filename: &str) -> Result<Instance<T>>
where
    T: FromStr + Num + PartialOrd + Copy,
    T::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a transportation problem.
pub fn write<W, T>(mut w: W, instance: &Instance<T>) -> io::Result<()>
where
    W: Write,
    T: Zero + Display,
{
    writeln!(w, "p trn {} {}", instance.num_origins(), instance.num_destinations())?;
    for (i, s) in instance.supplies().iter().enumerate() {
        if !s.is_zero() {
            writeln!(w, "s {} {}", i + 1, s)?;
        }
    }
    for (j, d) in instance.demands().iter().enumerate() {
        if !d.is_zero() {
            writeln!(w, "d {} {}", j + 1, d)?;
        }
    }
    for (i, j, c) in instance.costs().cells() {
        writeln!(w, "a {} {} {}", i + 1, j + 1, c)?;
    }

    Ok(())
}

/// Write a transportation problem to a named file.
pub fn write_to_file<T>(filename: &str, instance: &Instance<T>) -> io::Result<()>
where
    T: Zero + Display,
{
    write(&mut std::fs::File::create(filename)?, instance)
}

/// Write a solution of a transportation problem.
pub fn write_solution<W, T>(mut w: W, plan: &Grid<T>, value: T) -> io::Result<()>
where
    W: Write,
    T: Zero + Display,
{
    writeln!(w, "s {}", value)?;
    for (i, j, x) in plan.cells() {
        if !x.is_zero() {
            writeln!(w, "f {} {} {}", i + 1, j + 1, x)?;
        }
    }

    Ok(())
}

/// Write a solution of a transportation problem to a named file.
pub fn write_solution_to_file<T>(filename: &str, plan: &Grid<T>, value: T) -> io::Result<()>
where
    T: Zero + Display,
{
    write_solution(&mut std::fs::File::create(filename)?, plan, value)
}

/// Read a solution of a transportation problem.
///
/// Returns the solution value and the list of `(origin, destination,
/// amount)` with 0-based indices.
pub fn read_solution<R, T>(r: R) -> Result<(T, Vec<(usize, usize, T)>)>
where
    R: Read,
    T: FromStr,
    T::Err: Display,
{
    let mut reader = TrnReader::new(r);
    let mut flows = vec![];
    let mut sol = None;

    while let Some((d, mut toks)) = reader.read_one_line_of(&["f", "s"])? {
        if d == "f" {
            let i = toks.index(usize::MAX, "origin")?;
            let j = toks.index(usize::MAX, "destination")?;
            flows.push((i, j, toks.number()?));
        } else {
            if sol.is_some() {
                return Err(Error::Format {
                    line: toks.line,
                    msg: "the solution value must be specified exactly once".to_string(),
                });
            }
            sol = Some(toks.number()?);
        }
        toks.end()?;
    }

    Ok((
        sol.ok_or_else(|| Error::Format {
            line: 0,
            msg: "missing solution value".to_string(),
        })?,
        flows,
    ))
}

/// Read a solution of a transportation problem from a named file.
pub fn read_solution_from_file<T>(filename: &str) -> Result<(T, Vec<(usize, usize, T)>)>
where
    T: FromStr,
    T::Err: Display,
{
    read_solution(std::fs::File::open(filename)?)
}

#[cfg(test)]
mod tests {
    use super::{read, read_solution, write, write_solution, Error};
    use crate::grid::Grid;
    use crate::instance;
    use crate::Instance;
    use std::io::Cursor;

    #[test]
    fn test_parse_defaults_and_comments() {
        let file = "
c only the first origin has supply

p trn 2 2
s 1 7
  c indented comment
d 2 7
a 1 1 3
a 1 2 4
a 2 1 5
a 2 2 6
";
        let instance = read::<_, i32>(Cursor::new(file)).unwrap();
        assert_eq!(instance.supplies(), &[7, 0]);
        assert_eq!(instance.demands(), &[0, 7]);
        assert_eq!(instance.costs().row(1), &[5, 6]);
    }

    #[test]
    fn test_missing_cell() {
        let file = "p trn 1 2\ns 1 1\nd 1 1\na 1 1 3\n";
        match read::<_, i32>(Cursor::new(file)) {
            Err(Error::Data { line: 4, msg }) => assert!(msg.contains("(1,2)"), "{}", msg),
            r => panic!("unexpected result: {:?}", r.map(|_| ())),
        }
    }

    #[test]
    fn test_duplicate_cell() {
        let file = "p trn 1 1\na 1 1 3\na 1 1 4\n";
        match read::<_, i32>(Cursor::new(file)) {
            Err(Error::Data { line: 3, .. }) => (),
            r => panic!("unexpected result: {:?}", r.map(|_| ())),
        }
    }

    #[test]
    fn test_format_errors() {
        for (file, line) in &[
            ("p min 1 1\n", 1),
            ("c\np trn 1 1\nx 1 1\n", 3),
            ("p trn 1 1\na 1 1 3 4\n", 2),
            ("p trn 1 1\na 1 1 x\n", 2),
        ] {
            match read::<_, i32>(Cursor::new(*file)) {
                Err(Error::Format { line: l, .. }) => assert_eq!(l, *line, "{}", file),
                r => panic!("unexpected result for {:?}: {:?}", file, r.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_invalid_index_and_value() {
        match read::<_, i32>(Cursor::new("p trn 1 1\ns 2 1\na 1 1 1\n")) {
            Err(Error::Data { line: 2, .. }) => (),
            r => panic!("unexpected result: {:?}", r.map(|_| ())),
        }
        match read::<_, i32>(Cursor::new("p trn 1 1\ns 1 -1\na 1 1 1\n")) {
            Err(Error::Instance(instance::Error::NegativeSupply { index: 0 })) => (),
            r => panic!("unexpected result: {:?}", r.map(|_| ())),
        }
    }

    #[test]
    fn test_huge_problem_line() {
        // no cost lines follow, the reader must not allocate the grid
        match read::<_, i32>(Cursor::new("p trn 100000 100000\n")) {
            Err(Error::Data { line: 1, msg }) => assert!(msg.contains("(1,1)"), "{}", msg),
            r => panic!("unexpected result: {:?}", r.map(|_| ())),
        }
        let huge = format!("p trn {} {}\n", usize::MAX, 2);
        match read::<_, i32>(Cursor::new(huge)) {
            Err(Error::Data { line: 1, .. }) => (),
            r => panic!("unexpected result: {:?}", r.map(|_| ())),
        }
        match read::<_, i32>(Cursor::new("p trn 3 0\n")) {
            Err(Error::Data { line: 1, .. }) => (),
            r => panic!("unexpected result: {:?}", r.map(|_| ())),
        }
        assert_eq!(read::<_, i32>(Cursor::new("p trn 0 0\n")).unwrap().num_origins(), 0);
    }

    #[test]
    fn test_write_read() {
        let instance = Instance::new(vec![3, 0], vec![1, 2], vec![vec![1, 2], vec![3, 4]]).unwrap();
        let mut buf = vec![];
        write(&mut buf, &instance).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("p trn 2 2\ns 1 3\nd 1 1\nd 2 2\n"));
        assert_eq!(read::<_, i32>(Cursor::new(text)).unwrap(), instance);
    }

    #[test]
    fn test_solution() {
        let plan = Grid::from_vec(2, 2, vec![3, 0, 0, 4]).unwrap();
        let mut buf = vec![];
        write_solution(&mut buf, &plan, 17).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "s 17\nf 1 1 3\nf 2 2 4\n");

        let (value, flows) = read_solution::<_, i32>(Cursor::new(buf)).unwrap();
        assert_eq!(value, 17);
        assert_eq!(flows, vec![(0, 0, 3), (1, 1, 4)]);

        assert!(read_solution::<_, i32>(Cursor::new("f 1 1 3\n")).is_err());
    }
}
