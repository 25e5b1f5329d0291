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

//! Printer for outputting [AlignmentRecord] records with their aligned blocks.
//!
//! Each output line contains the first seven input columns followed by the
//! blocks, for example
//!
//! `q1	r1	75.000	1	7	1	8	[[0,2,0,2,0],[3,3,3,3,1],[4,4,4,4,0],[5,6,6,7,0]]`
//!
//! In [Mode::Translated] the blocks are converted from codon positions to
//! nucleotide positions: a Match block `[qs,qe,rs,re,0]` becomes
//! `[3qs,3qe+2,3rs,3re+2,0]` and a Mismatch block at codon `c` becomes
//! the three single-nucleotide blocks at `3c`, `3c+1` and `3c+2`.
//!
//! Returns 1 line at a time using next().
//!
//! ## Usage
//!
//! ```rust
//! use alnblocks::Mode;
//! use alnblocks::parser::Parser;
//! use alnblocks::printer::Printer;
//! use std::io::Cursor;
//!
//! let mut input = Cursor::new(b"q1\tr1\t66.67\t1\t9\t1\t9\tMLK\tMAK\n".to_vec());
//! let mut parser = Parser::new(&mut input);
//! let mut printer = Printer::new(&mut parser, Mode::Translated);
//!
//! let line = printer.next().unwrap().unwrap();
//!
//! assert_eq!(line, b"q1\tr1\t66.67\t1\t9\t1\t9\t[[0,2,0,2,0],[3,3,3,3,1],[4,4,4,4,1],[5,5,5,5,1],[6,8,6,8,0]]\n".to_vec());
//! assert!(printer.next().is_none());
//! ```
//!

use crate::AlignmentRecord;
use crate::Mode;
use crate::Result;
use crate::encode_record;
use crate::encoder::AlnBlock;
use crate::encoder::BlockType;

use std::io::Write;

fn format_tuple<W: Write>(
    coords: [usize; 4],
    kind: BlockType,
    conn: &mut W,
) -> Result<()> {
    write!(conn, "[{},{},{},{},{}]", coords[0], coords[1], coords[2], coords[3], kind.to_u8())?;
    Ok(())
}

/// Format a single block
///
/// Writes one tuple, or three comma separated tuples for a Mismatch block in
/// [Mode::Translated].
///
pub fn format_block<W: Write>(
    block: &AlnBlock,
    mode: Mode,
    conn: &mut W,
) -> Result<()> {
    match (mode, block.kind) {
        (Mode::Direct, kind) => {
            format_tuple([block.qstart, block.qend, block.rstart, block.rend], kind, conn)?;
        },
        (Mode::Translated, BlockType::Match) => {
            format_tuple([3 * block.qstart, 3 * block.qend + 2, 3 * block.rstart, 3 * block.rend + 2], block.kind, conn)?;
        },
        (Mode::Translated, BlockType::Mismatch) => {
            for offset in 0..3 {
                if offset > 0 {
                    conn.write_all(b",")?;
                }
                format_tuple([offset + 3 * block.qstart, offset + 3 * block.qend, offset + 3 * block.rstart, offset + 3 * block.rend], block.kind, conn)?;
            }
        },
    }
    Ok(())
}

/// Format a bracketed, comma separated list of blocks
pub fn format_blocks<W: Write>(
    blocks: &[AlnBlock],
    mode: Mode,
    conn: &mut W,
) -> Result<()> {
    conn.write_all(b"[")?;
    for (idx, block) in blocks.iter().enumerate() {
        if idx > 0 {
            conn.write_all(b",")?;
        }
        format_block(block, mode, conn)?;
    }
    conn.write_all(b"]")?;
    Ok(())
}

/// Format the output line of a record
///
/// `record` should already be normalized with
/// [normalize](crate::orient::normalize), its coordinates are written as is.
///
pub fn format_record_line<W: Write>(
    record: &AlignmentRecord,
    blocks: &[AlnBlock],
    mode: Mode,
    conn: &mut W,
) -> Result<()> {
    conn.write_all(&record.query_name)?;
    conn.write_all(b"\t")?;
    conn.write_all(&record.reference_name)?;
    conn.write_all(b"\t")?;
    conn.write_all(&record.percent_identity)?;
    for coordinate in [&record.query_start, &record.query_end, &record.reference_start, &record.reference_end] {
        conn.write_all(b"\t")?;
        conn.write_all(&coordinate.text)?;
    }
    conn.write_all(b"\t")?;
    format_blocks(blocks, mode, conn)?;
    conn.write_all(b"\n")?;
    Ok(())
}

pub struct Printer<'a, I: Iterator> where I: Iterator<Item=Result<AlignmentRecord>> {
    // Inputs
    records: &'a mut I,

    index: usize,
    pub mode: Mode,
}

impl<'a, I: Iterator> Printer<'a, I> where I: Iterator<Item=Result<AlignmentRecord>> {
    pub fn new(
        records: &'a mut I,
        mode: Mode,
    ) -> Self {
        Printer{
            records,
            index: 0,
            mode,
        }
    }

    /// Number of lines returned so far.
    pub fn lines_printed(
        &self,
    ) -> usize {
        self.index
    }
}

impl<I: Iterator> Iterator for Printer<'_, I> where I: Iterator<Item=Result<AlignmentRecord>> {
    type Item = Result<Vec<u8>>;

    fn next(
        &mut self,
    ) -> Option<Result<Vec<u8>>> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e)),
        };

        let line = encode_record(record, self.mode);
        if line.is_ok() {
            self.index += 1;
        }
        Some(line)
    }
}

// Tests
#[cfg(test)]
mod tests {
    use crate::encoder::AlnBlock;
    use crate::encoder::BlockType;

    fn block(qstart: usize, qend: usize, rstart: usize, rend: usize, kind: BlockType) -> AlnBlock {
        AlnBlock { qstart, qend, rstart, rend, kind }
    }

    #[test]
    fn format_direct_blocks() {
        use super::format_blocks;
        use crate::Mode;

        let data = vec![
            block(0, 2, 0, 2, BlockType::Match),
            block(3, 3, 3, 3, BlockType::Mismatch),
            block(4, 4, 4, 4, BlockType::Match),
            block(5, 6, 6, 7, BlockType::Match),
        ];
        let expected: Vec<u8> = b"[[0,2,0,2,0],[3,3,3,3,1],[4,4,4,4,0],[5,6,6,7,0]]".to_vec();

        let mut got: Vec<u8> = Vec::new();
        format_blocks(&data, Mode::Direct, &mut got).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn format_translated_match() {
        use super::format_block;
        use crate::Mode;

        let mut got: Vec<u8> = Vec::new();
        format_block(&block(2, 5, 10, 13, BlockType::Match), Mode::Translated, &mut got).unwrap();

        assert_eq!(got, b"[6,17,30,41,0]".to_vec());
    }

    #[test]
    fn format_translated_mismatch_as_three_nucleotides() {
        use super::format_block;
        use crate::Mode;

        let mut got: Vec<u8> = Vec::new();
        format_block(&block(7, 7, 4, 4, BlockType::Mismatch), Mode::Translated, &mut got).unwrap();

        assert_eq!(got, b"[21,21,12,12,1],[22,22,13,13,1],[23,23,14,14,1]".to_vec());
    }

    #[test]
    fn format_translated_adjacent_mismatches() {
        use super::format_blocks;
        use crate::Mode;

        let data = vec![
            block(0, 0, 0, 0, BlockType::Match),
            block(1, 1, 1, 1, BlockType::Mismatch),
            block(2, 2, 2, 2, BlockType::Mismatch),
        ];
        let expected: Vec<u8> = b"[[0,2,0,2,0],[3,3,3,3,1],[4,4,4,4,1],[5,5,5,5,1],[6,6,6,6,1],[7,7,7,7,1],[8,8,8,8,1]]".to_vec();

        let mut got: Vec<u8> = Vec::new();
        format_blocks(&data, Mode::Translated, &mut got).unwrap();

        assert_eq!(got, expected);
    }

    #[test]
    fn format_line_passes_fields_through() {
        use super::format_record_line;
        use crate::Mode;
        use crate::parser::tabular::read_tabular_line;

        let record = read_tabular_line(b"NZ_CP009072.1\tNC_000913.3\t99.123\t1001\t1004\t4004\t4001\tACGT\tACGT", 1).unwrap();
        let data = vec![block(0, 3, 0, 3, BlockType::Match)];

        let mut got: Vec<u8> = Vec::new();
        format_record_line(&record, &data, Mode::Direct, &mut got).unwrap();

        assert_eq!(got, b"NZ_CP009072.1\tNC_000913.3\t99.123\t1001\t1004\t4004\t4001\t[[0,3,0,3,0]]\n".to_vec());
    }

    #[test]
    fn format_line_echoes_coordinate_text() {
        use super::format_record_line;
        use crate::Mode;
        use crate::parser::tabular::read_tabular_line;

        let record = read_tabular_line(b"q1\tr1\t100.000\t+01\t004\t1\t4\tACGT\tACGT", 1).unwrap();
        let data = vec![block(0, 3, 0, 3, BlockType::Match)];

        let mut got: Vec<u8> = Vec::new();
        format_record_line(&record, &data, Mode::Direct, &mut got).unwrap();

        assert_eq!(got, b"q1\tr1\t100.000\t+01\t004\t1\t4\t[[0,3,0,3,0]]\n".to_vec());
    }

    #[test]
    fn print_tblastx_output() {
        use super::Printer;
        use crate::Mode;
        use crate::parser::Parser;
        use std::io::Cursor;
        use std::io::Write;

        let mut data: Vec<u8> = b"g1\tg2\t66.67\t9\t1\t30\t22\tKLM\tKAM\n".to_vec();
        data.append(&mut b"g1\tg2\t100.00\t4\t12\t104\t112\tWWW\tWWW\n".to_vec());

        let expected: Vec<u8> = vec![
            b"g1\tg2\t66.67\t1\t9\t22\t30\t[[0,2,0,2,0],[3,3,3,3,1],[4,4,4,4,1],[5,5,5,5,1],[6,8,6,8,0]]\n".to_vec(),
            b"g1\tg2\t100.00\t4\t12\t104\t112\t[[0,8,0,8,0]]\n".to_vec(),
        ].concat();

        let mut input = Cursor::new(data);
        let mut parser = Parser::new(&mut input);
        let mut printer = Printer::new(&mut parser, Mode::Translated);

        let mut got: Cursor<Vec<u8>> = Cursor::new(Vec::new());
        for bytes in printer.by_ref() {
            got.write_all(&bytes.unwrap()).unwrap();
        }

        assert_eq!(got.get_ref(), &expected);
        assert_eq!(printer.lines_printed(), 2);
    }

    #[test]
    fn print_stops_on_parse_error() {
        use super::Printer;
        use crate::BlocksError;
        use crate::Mode;
        use crate::parser::Parser;
        use std::io::Cursor;

        let mut input = Cursor::new(b"g1\tg2\t100.00\t1\t3\tKLM\tKLM\n".to_vec());
        let mut parser = Parser::new(&mut input);
        let mut printer = Printer::new(&mut parser, Mode::Translated);

        assert!(matches!(printer.next(), Some(Err(BlocksError::MalformedRecord { line: 1, .. }))));
        assert_eq!(printer.lines_printed(), 0);
    }
}
