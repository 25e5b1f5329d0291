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
use std::path::Path;

use alnblocks::Mode;
use clap::CommandFactory;
use clap::Parser;

mod cli;

type E = Box<dyn std::error::Error>;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    let _ = stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init();
}

fn encode(
    input_file: Option<&Path>,
    out_file: Option<&Path>,
    mode: Mode,
) -> Result<(), E> {
    let mut conn_in = alnblocks::compression::open_input(input_file)?;
    let mut conn_out = alnblocks::compression::create_output(out_file)?;

    alnblocks::encode_from_read_to_write(mode, &mut conn_in, &mut conn_out)?;
    conn_out.finish()?;

    Ok(())
}

fn main() {
    let cli = cli::Cli::parse();

    // Subcommands:
    match &cli.command {
        // Encode
        Some(cli::Commands::Encode {
            input_file,
            out_file,
            mode,
            verbose,
        }) => {
            init_log(if *verbose { 2 } else { 1 });

            if let Err(e) = encode(input_file.as_deref(), out_file.as_deref(), *mode) {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => {
            let _ = cli::Cli::command().print_help();
        },
    }
}
