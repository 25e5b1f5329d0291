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
use std::path::PathBuf;

use alnblocks::Mode;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // Convert tabular BLAST output to aligned blocks
    Encode {
        // BLAST -outfmt "6 qseqid sseqid pident qstart qend sstart send qseq sseq" output
        #[arg(group = "input", required = false, help = "Input file, reads from stdin if not given or -")]
        input_file: Option<PathBuf>,

        // Output file path
        #[arg(short = 'o', long = "output", required = false, help = "Output file, gzip compressed if ending in .gz")]
        out_file: Option<PathBuf>,

        // Alignment type, defaults to direct
        #[arg(short = 'm', long = "mode", value_enum, default_value = "direct", help = "direct (alias blastn) or translated (alias tblastx)")]
        mode: Mode,

        // Verbosity
        #[arg(long = "verbose", default_value_t = false)]
        verbose: bool,
    },
}
