// alnblocks: Conversion of tabular BLAST alignments into aligned coordinate blocks.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! Parser for reading tabular BLAST alignments as [AlignmentRecord].
//!
//! Reads one record at a time using next(). Blank lines and `#` comment
//! lines (as written by `-outfmt 7`) are skipped.
//!
//! ## Usage
//!
//! ```rust
//! use alnblocks::parser::Parser;
//! use std::io::Cursor;
//!
//! let mut data: Vec<u8> = b"# BLASTN 2.16.0+\n".to_vec();
//! data.append(&mut b"q1\tr1\t100.000\t1\t4\t1\t4\tACGT\tACGT\n".to_vec());
//! data.append(&mut b"q2\tr1\t100.000\t1\t2\t7\t8\tAC\tAC\n".to_vec());
//!
//! let mut input = Cursor::new(data);
//! let records = Parser::new(&mut input).collect::<Result<Vec<_>, _>>().unwrap();
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].reference_start.value, 7);
//! ```
//!

pub mod tabular;

use crate::AlignmentRecord;
use crate::Result;

use tabular::read_tabular_line;

use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use bstr::ByteSlice;
use log::debug;

pub struct Parser<'a, R: Read> {
    reader: BufReader<&'a mut R>,
    buf: Vec<u8>,
    line_nr: usize,
}

impl<'a, R: Read> Parser<'a, R> {
    pub fn new(
        conn: &'a mut R,
    ) -> Self {
        Parser {
            reader: BufReader::new(conn),
            buf: Vec::new(),
            line_nr: 0,
        }
    }
}

impl<R: Read> Parser<'_, R> {
    /// Number of lines consumed so far, including skipped lines.
    pub fn lines_read(
        &self,
    ) -> usize {
        self.line_nr
    }
}

impl<R: Read> Iterator for Parser<'_, R> {
    type Item = Result<AlignmentRecord>;

    fn next(
        &mut self,
    ) -> Option<Result<AlignmentRecord>> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line_nr += 1,
                Err(e) => return Some(Err(e.into())),
            }

            let line = self.buf.trim();
            if line.is_empty() || line.starts_with(b"#") {
                debug!("Skipping line {}", self.line_nr);
                continue;
            }

            return Some(read_tabular_line(line, self.line_nr))
        }
    }
}
