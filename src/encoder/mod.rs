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

//! Builds the match/mismatch blocks of a pairwise alignment.
//!
//! The two aligned sequences are scanned one column at a time while keeping
//! zero-based positions in the query and reference. Consecutive identical
//! columns are merged into a single [Match](BlockType::Match) block, each
//! differing column becomes its own [Mismatch](BlockType::Mismatch) block,
//! and gap columns only advance the position of the ungapped sequence.
//!
//! ## Usage
//!
//! ```rust
//! use alnblocks::encoder::{build_blocks, AlnBlock, BlockType};
//!
//! let got = build_blocks(b"AACGT-AT", b"AACCTTAT").unwrap();
//!
//! let expected = vec![
//!     AlnBlock { qstart: 0, qend: 2, rstart: 0, rend: 2, kind: BlockType::Match },
//!     AlnBlock { qstart: 3, qend: 3, rstart: 3, rend: 3, kind: BlockType::Mismatch },
//!     AlnBlock { qstart: 4, qend: 4, rstart: 4, rend: 4, kind: BlockType::Match },
//!     AlnBlock { qstart: 5, qend: 6, rstart: 6, rend: 7, kind: BlockType::Match },
//! ];
//!
//! assert_eq!(got.blocks, expected);
//! assert_eq!((got.query_pos, got.ref_pos), (6, 7));
//! ```
//!

use crate::BlocksError;
use crate::Result;

pub const GAP: u8 = b'-';

/// Block type, written as the last element of each output tuple.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockType {
    #[default]
    Match,
    Mismatch,
}

impl BlockType {
    pub fn to_u8(&self) -> u8 {
        match &self {
            BlockType::Match => 0,
            BlockType::Mismatch => 1,
        }
    }
}

/// Aligned block, coordinates are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlnBlock {
    pub qstart: usize,
    pub qend: usize,
    pub rstart: usize,
    pub rend: usize,
    pub kind: BlockType,
}

impl AlnBlock {
    fn single(
        qpos: usize,
        rpos: usize,
        kind: BlockType,
    ) -> Self {
        AlnBlock { qstart: qpos, qend: qpos, rstart: rpos, rend: rpos, kind }
    }
}

/// Blocks of one alignment and the positions reached after the last column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocks {
    pub blocks: Vec<AlnBlock>,
    pub query_pos: usize,
    pub ref_pos: usize,
}

fn both_gapped(
    column: usize,
    aligned_query: &[u8],
    aligned_reference: &[u8],
) -> BlocksError {
    BlocksError::BothGapped {
        column,
        aligned_query: String::from_utf8_lossy(aligned_query).into_owned(),
        aligned_reference: String::from_utf8_lossy(aligned_reference).into_owned(),
    }
}

/// Build the blocks for two aligned sequences of equal length.
///
/// The list always starts with a Match block at position 0 of both
/// sequences. The first column is taken to be part of that block and is not
/// classified, so existing block files stay reproducible.
///
/// Terminates with [BlocksError::BothGapped] if a column has a gap in both
/// sequences, and with [BlocksError::MalformedRecord] if the sequences
/// differ in length. The error has `line` 0 since the sequences did not
/// come from a [Parser](crate::parser::Parser).
///
pub fn build_blocks(
    aligned_query: &[u8],
    aligned_reference: &[u8],
) -> Result<Blocks> {
    if aligned_query.len() != aligned_reference.len() {
        return Err(BlocksError::MalformedRecord {
            line: 0,
            reason: format!("aligned sequences have different lengths ({} and {})", aligned_query.len(), aligned_reference.len()),
            record: format!("{}\n{}", String::from_utf8_lossy(aligned_query), String::from_utf8_lossy(aligned_reference)),
        })
    }

    if aligned_query.first() == Some(&GAP) && aligned_reference.first() == Some(&GAP) {
        return Err(both_gapped(0, aligned_query, aligned_reference))
    }

    let mut qpos: usize = 0;
    let mut rpos: usize = 0;
    let mut blocks: Vec<AlnBlock> = vec![AlnBlock::default()];

    let columns = aligned_query.iter().zip(aligned_reference.iter()).enumerate().skip(1);
    for (column, (q, r)) in columns {
        if *q == GAP {
            if *r == GAP {
                return Err(both_gapped(column, aligned_query, aligned_reference))
            }
            rpos += 1;
        } else if *r == GAP {
            qpos += 1;
        } else if q == r {
            match blocks.last_mut() {
                Some(last) if last.kind == BlockType::Match && last.qend == qpos && last.rend == rpos => {
                    last.qend += 1;
                    last.rend += 1;
                },
                _ => blocks.push(AlnBlock::single(qpos + 1, rpos + 1, BlockType::Match)),
            }
            qpos += 1;
            rpos += 1;
        } else {
            qpos += 1;
            rpos += 1;
            blocks.push(AlnBlock::single(qpos, rpos, BlockType::Mismatch));
        }
    }

    Ok(Blocks { blocks, query_pos: qpos, ref_pos: rpos })
}
