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

//! Errors raised while converting alignment records into blocks.
//!
//! Every error is fatal to the run; nothing here is retried or skipped.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BlocksError>;

#[derive(Debug, Error)]
pub enum BlocksError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong field count, non-numeric coordinate, or unequal aligned strings.
    #[error("malformed record on line {line}: {reason}\n{record}")]
    MalformedRecord {
        line: usize,
        reason: String,
        record: String,
    },

    /// Query start > end for a direct nucleotide alignment.
    #[error("query start {query_start} > query end {query_end} in direct mode, cannot continue\n{record}")]
    InvalidOrientation {
        query_start: u64,
        query_end: u64,
        record: String,
    },

    #[error("both sequences have a gap at column {column}, cannot continue\n{aligned_query}\n{aligned_reference}")]
    BothGapped {
        column: usize,
        aligned_query: String,
        aligned_reference: String,
    },
}
