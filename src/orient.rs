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

//! Orientation normalization for records with descending query coordinates.

use crate::AlignmentRecord;
use crate::BlocksError;
use crate::Mode;
use crate::Result;

use log::debug;

/// Make sure `query_start <= query_end`.
///
/// Records that already have ascending query coordinates are returned
/// unchanged.
///
/// In [Mode::Translated] a descending record is flipped: both coordinate
/// pairs are swapped and both aligned sequences are reversed. The
/// sequences are not complemented.
///
/// Terminates with [BlocksError::InvalidOrientation] if the record is
/// descending in [Mode::Direct].
///
pub fn normalize(
    mut record: AlignmentRecord,
    mode: Mode,
) -> Result<AlignmentRecord> {
    if record.query_start.value <= record.query_end.value {
        return Ok(record)
    }

    match mode {
        Mode::Direct => Err(BlocksError::InvalidOrientation {
            query_start: record.query_start.value,
            query_end: record.query_end.value,
            record: record.to_string(),
        }),
        Mode::Translated => {
            debug!("Reversing {} vs {} ({}-{})", record.query_name, record.reference_name, record.query_start, record.query_end);
            std::mem::swap(&mut record.query_start, &mut record.query_end);
            std::mem::swap(&mut record.reference_start, &mut record.reference_end);
            record.aligned_query.reverse();
            record.aligned_reference.reverse();
            Ok(record)
        },
    }
}
