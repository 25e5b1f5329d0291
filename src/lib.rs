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

//! alnblocks is a library and a command-line client for converting pairwise
//! local alignments from [BLAST](https://blast.ncbi.nlm.nih.gov/) tabular
//! output into lists of aligned coordinate blocks.
//!
//! The input is BLAST `-outfmt 6` with exactly these columns:
//!
//!   `qseqid sseqid pident qstart qend sstart send qseq sseq`
//!
//! Each input line produces one output line containing the first seven
//! columns followed by a bracketed list of `[qstart,qend,rstart,rend,type]`
//! blocks, where type is 0 for a run of matches and 1 for a single
//! mismatch. Gaps produce no block and show up as jumps in the coordinates
//! between consecutive blocks.
//!
//! Two run modes are supported, see [Mode]:
//!   - [Direct](Mode::Direct) for nucleotide alignments (blastn). Block
//!     coordinates are written as is.
//!   - [Translated](Mode::Translated) for translated alignments (tblastx).
//!     Reverse strand hits are flipped, and block coordinates are expanded
//!     from codons to nucleotides.
//!
//! ## Usage
//!
//! ### Command line
//!
//! `alnblocks encode --mode direct blast.tsv -o blocks.tsv`
//!
//! Input may be gzip compressed, and output is gzip compressed if the
//! output path ends in `.gz`.
//!
//! ### Rust API
//!
//! For processing an entire stream use [encode_from_read_to_write].
//!
//! For use cases requiring access to a single record at a time, the following
//! are provided:
//!
//!   - [Parser](parser::Parser): takes a [Read] containing tabular alignments and converts them into [AlignmentRecord].
//!   - [normalize](orient::normalize): flips reverse strand translated records.
//!   - [build_blocks](encoder::build_blocks): builds the [AlnBlock](encoder::AlnBlock) list of one record.
//!   - [Printer](printer::Printer): takes an iterator over [AlignmentRecord] and formats them into output lines.
//!

use std::io::Read;
use std::io::Write;

use bstr::BString;
use log::info;

pub mod compression;
pub mod encoder;
pub mod error;
pub mod orient;
pub mod parser;
pub mod printer;

pub use error::BlocksError;
pub use error::Result;

/// Coordinate space of the alignments.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Nucleotide vs nucleotide, query coordinates always ascending.
    #[default]
    #[value(alias = "blastn")]
    Direct,
    /// Codon vs codon, query coordinates descend on reverse strand hits.
    #[value(alias = "tblastx")]
    Translated,
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "direct" | "blastn" => Ok(Mode::Direct),
            "translated" | "tblastx" => Ok(Mode::Translated),
            _ => Err(format!("'{}' is not a valid Mode", s)),
        }
    }
}

/// A coordinate column with the text it was parsed from.
///
/// `text` is what gets written back, so coordinates are echoed exactly as
/// they appear in the input.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Coordinate {
    pub value: u64,
    pub text: BString,
}

impl From<u64> for Coordinate {
    fn from(value: u64) -> Self {
        Coordinate { value, text: BString::from(value.to_string()) }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A single line of tabular alignment output.
///
/// Coordinates are 1-based as reported by BLAST. Names, the percent
/// identity and the coordinate columns are kept as raw bytes and written
/// back unchanged.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AlignmentRecord {
    pub query_name: BString,
    pub reference_name: BString,
    pub percent_identity: BString,
    pub query_start: Coordinate,
    pub query_end: Coordinate,
    pub reference_start: Coordinate,
    pub reference_end: Coordinate,
    /// Aligned query sequence, `-` marks a gap.
    pub aligned_query: BString,
    /// Aligned reference sequence, same length as `aligned_query`.
    pub aligned_reference: BString,
}

impl std::fmt::Display for AlignmentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
               self.query_name, self.reference_name, self.percent_identity,
               self.query_start, self.query_end,
               self.reference_start, self.reference_end,
               self.aligned_query, self.aligned_reference)
    }
}

/// Convert a single record into its output line.
///
/// Normalizes the orientation, builds the blocks and formats them. The
/// returned bytes include the trailing newline.
///
/// ## Usage
///
/// ```rust
/// use alnblocks::{encode_record, Mode};
/// use alnblocks::parser::tabular::read_tabular_line;
///
/// let record = read_tabular_line(b"q1\tr1\t66.67\t9\t1\t30\t22\tKLM\tKAM", 1).unwrap();
/// let got = encode_record(record, Mode::Translated).unwrap();
///
/// let expected = b"q1\tr1\t66.67\t1\t9\t22\t30\t[[0,2,0,2,0],[3,3,3,3,1],[4,4,4,4,1],[5,5,5,5,1],[6,8,6,8,0]]\n";
/// assert_eq!(got, expected.to_vec());
/// ```
///
pub fn encode_record(
    record: AlignmentRecord,
    mode: Mode,
) -> Result<Vec<u8>> {
    let record = orient::normalize(record, mode)?;
    let blocks = encoder::build_blocks(&record.aligned_query, &record.aligned_reference)?;

    let mut out: Vec<u8> = Vec::new();
    printer::format_record_line(&record, &blocks.blocks, mode, &mut out)?;
    Ok(out)
}

/// Encode records from memory to something that implements [Write].
///
/// Stops at the first record that fails, nothing from the failing record
/// is written.
///
pub fn encode_to_write<W: Write>(
    records: &[AlignmentRecord],
    mode: Mode,
    conn_out: &mut W,
) -> Result<()> {
    for record in records {
        let line = encode_record(record.clone(), mode)?;
        conn_out.write_all(&line)?;
    }
    conn_out.flush()?;
    Ok(())
}

/// Parse all tabular alignments from [Read] and write the blocks to [Write].
///
/// Returns the number of records written. Processing stops at the first
/// error.
///
/// ## Usage
///
/// ```rust
/// use alnblocks::{encode_from_read_to_write, Mode};
/// use std::io::Cursor;
///
/// let mut input = Cursor::new(b"q1\tr1\t75.000\t1\t7\t1\t8\tAACGT-AT\tAACCTTAT\n".to_vec());
/// let mut output: Vec<u8> = Vec::new();
///
/// let n_records = encode_from_read_to_write(Mode::Direct, &mut input, &mut output).unwrap();
///
/// let expected = b"q1\tr1\t75.000\t1\t7\t1\t8\t[[0,2,0,2,0],[3,3,3,3,1],[4,4,4,4,0],[5,6,6,7,0]]\n";
/// assert_eq!(n_records, 1);
/// assert_eq!(output, expected.to_vec());
/// ```
///
pub fn encode_from_read_to_write<R: Read, W: Write>(
    mode: Mode,
    conn_in: &mut R,
    conn_out: &mut W,
) -> Result<usize> {
    let mut reader = parser::Parser::new(conn_in);
    let mut printer = printer::Printer::new(&mut reader, mode);

    let mut n_records: usize = 0;
    for line in printer.by_ref() {
        conn_out.write_all(&line?)?;
        n_records += 1;
    }
    conn_out.flush()?;

    info!("Wrote blocks for {} alignments", n_records);
    Ok(n_records)
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn parse_mode() {
        use super::Mode;

        assert_eq!("direct".parse::<Mode>().unwrap(), Mode::Direct);
        assert_eq!("blastn".parse::<Mode>().unwrap(), Mode::Direct);
        assert_eq!("translated".parse::<Mode>().unwrap(), Mode::Translated);
        assert_eq!("tblastx".parse::<Mode>().unwrap(), Mode::Translated);
        assert!("blastp".parse::<Mode>().is_err());
    }

    #[test]
    fn parse_mode_as_cli_value() {
        use super::Mode;
        use clap::ValueEnum;

        assert_eq!(Mode::from_str("tblastx", false).unwrap(), Mode::Translated);
        assert_eq!(Mode::from_str("blastn", false).unwrap(), Mode::Direct);
        assert!(Mode::from_str("blastp", false).is_err());

        let names: Vec<String> = Mode::value_variants().iter().filter_map(|x| x.to_possible_value()).map(|x| x.get_name().to_string()).collect();
        assert_eq!(names, vec!["direct".to_string(), "translated".to_string()]);
    }

    #[test]
    fn display_record() {
        use crate::parser::tabular::read_tabular_line;

        let line = b"q1\tr1\t75.000\t1\t7\t1\t8\tAACGT-AT\tAACCTTAT".to_vec();
        let record = read_tabular_line(&line, 1).unwrap();

        assert_eq!(record.to_string().into_bytes(), line);
    }

    #[test]
    fn encode_multiple_from_read() {
        use super::encode_from_read_to_write;
        use super::Mode;
        use std::io::Cursor;

        let mut data: Vec<u8> = b"q1\tr1\t75.000\t1\t7\t1\t8\tAACGT-AT\tAACCTTAT\n".to_vec();
        data.append(&mut b"q1\tr2\t100.000\t11\t14\t24\t21\tACGT\tACGT\n".to_vec());
        data.append(&mut b"q2\tr1\t80.000\t1\t5\t1\t5\tAAAAA\tACCCA\n".to_vec());

        let mut expected: Vec<u8> = b"q1\tr1\t75.000\t1\t7\t1\t8\t[[0,2,0,2,0],[3,3,3,3,1],[4,4,4,4,0],[5,6,6,7,0]]\n".to_vec();
        expected.append(&mut b"q1\tr2\t100.000\t11\t14\t24\t21\t[[0,3,0,3,0]]\n".to_vec());
        expected.append(&mut b"q2\tr1\t80.000\t1\t5\t1\t5\t[[0,0,0,0,0],[1,1,1,1,1],[2,2,2,2,1],[3,3,3,3,1],[4,4,4,4,0]]\n".to_vec());

        let mut input = Cursor::new(data);
        let mut got: Vec<u8> = Vec::new();
        let n_records = encode_from_read_to_write(Mode::Direct, &mut input, &mut got).unwrap();

        assert_eq!(n_records, 3);
        assert_eq!(got, expected);
    }

    #[test]
    fn encode_keeps_non_canonical_coordinates() {
        use super::encode_from_read_to_write;
        use super::Mode;
        use std::io::Cursor;

        let mut input = Cursor::new(b"q1\tr1\t100.000\t+01\t004\t1\t4\tACGT\tACGT\n".to_vec());
        let mut got: Vec<u8> = Vec::new();
        encode_from_read_to_write(Mode::Direct, &mut input, &mut got).unwrap();

        assert_eq!(got, b"q1\tr1\t100.000\t+01\t004\t1\t4\t[[0,3,0,3,0]]\n".to_vec());
    }

    #[test]
    fn encode_stops_at_first_error() {
        use super::encode_from_read_to_write;
        use super::BlocksError;
        use super::Mode;
        use std::io::Cursor;

        let mut data: Vec<u8> = b"q1\tr2\t100.000\t11\t14\t21\t24\tACGT\tACGT\n".to_vec();
        data.append(&mut b"q1\tr1\t100.000\t5\t1\t1\t5\tACGTA\tACGTA\n".to_vec());
        data.append(&mut b"q2\tr1\t100.000\t1\t4\t1\t4\tACGT\tACGT\n".to_vec());

        let mut input = Cursor::new(data);
        let mut got: Vec<u8> = Vec::new();
        let res = encode_from_read_to_write(Mode::Direct, &mut input, &mut got);

        assert!(matches!(res, Err(BlocksError::InvalidOrientation { query_start: 5, query_end: 1, .. })));
        assert_eq!(got, b"q1\tr2\t100.000\t11\t14\t21\t24\t[[0,3,0,3,0]]\n".to_vec());
    }

    #[test]
    fn encode_to_write_leaves_no_partial_line() {
        use super::encode_to_write;
        use super::BlocksError;
        use super::Mode;
        use crate::parser::tabular::read_tabular_line;

        let records = vec![
            read_tabular_line(b"q1\tr1\t100.000\t1\t2\t1\t2\tAC\tAC", 1).unwrap(),
            read_tabular_line(b"q1\tr1\t100.000\t1\t2\t1\t2\tA-T\tA-T", 2).unwrap(),
        ];

        let mut got: Vec<u8> = Vec::new();
        let res = encode_to_write(&records, Mode::Direct, &mut got);

        assert!(matches!(res, Err(BlocksError::BothGapped { column: 1, .. })));
        assert_eq!(got, b"q1\tr1\t100.000\t1\t2\t1\t2\t[[0,1,0,1,0]]\n".to_vec());
    }
}
