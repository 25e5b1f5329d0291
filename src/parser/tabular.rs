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
use bstr::BString;
use bstr::ByteSlice;

use crate::AlignmentRecord;
use crate::BlocksError;
use crate::Coordinate;
use crate::Result;

/// Number of columns requested from BLAST with
/// `-outfmt "6 qseqid sseqid pident qstart qend sstart send qseq sseq"`.
pub const N_FIELDS: usize = 9;

fn malformed(
    line_nr: usize,
    reason: String,
    line: &[u8],
) -> BlocksError {
    BlocksError::MalformedRecord { line: line_nr, reason, record: line.to_str_lossy().into_owned() }
}

fn parse_coordinate(
    field: &[u8],
    name: &str,
    line_nr: usize,
    line: &[u8],
) -> Result<Coordinate> {
    let value = field.to_str().ok()
         .and_then(|x| x.parse::<u64>().ok())
         .ok_or_else(|| malformed(line_nr, format!("{} '{}' is not a non-negative integer", name, field.to_str_lossy()), line))?;
    Ok(Coordinate { value, text: BString::from(field) })
}

/// Parse a line of tabular BLAST output
///
/// `line` must not contain the line terminator. `line_nr` is only used in
/// the error message.
///
/// Terminates with [BlocksError::MalformedRecord] if the line does not have
/// exactly [N_FIELDS] tab separated fields, if a coordinate is not numeric,
/// or if the aligned sequences differ in length.
///
pub fn read_tabular_line(
    line: &[u8],
    line_nr: usize,
) -> Result<AlignmentRecord> {
    let fields: Vec<&[u8]> = line.split_str("\t").collect();
    if fields.len() != N_FIELDS {
        return Err(malformed(line_nr, format!("expected {} tab separated fields, got {}", N_FIELDS, fields.len()), line))
    }

    let query_start = parse_coordinate(fields[3], "query start", line_nr, line)?;
    let query_end = parse_coordinate(fields[4], "query end", line_nr, line)?;
    let reference_start = parse_coordinate(fields[5], "reference start", line_nr, line)?;
    let reference_end = parse_coordinate(fields[6], "reference end", line_nr, line)?;

    if fields[7].len() != fields[8].len() {
        return Err(malformed(line_nr, format!("aligned sequences have different lengths ({} and {})", fields[7].len(), fields[8].len()), line))
    }

    Ok(AlignmentRecord {
        query_name: BString::from(fields[0]),
        reference_name: BString::from(fields[1]),
        percent_identity: BString::from(fields[2]),
        query_start, query_end,
        reference_start, reference_end,
        aligned_query: BString::from(fields[7]),
        aligned_reference: BString::from(fields[8]),
    })
}
