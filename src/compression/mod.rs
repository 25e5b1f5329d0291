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

//! Transparent gzip support for the input and output streams.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use log::info;

use crate::Result;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

fn is_stdio(
    path: Option<&Path>,
) -> bool {
    path.map_or(true, |x| x == Path::new("-"))
}

/// Wrap `conn` in a gzip decoder if the stream starts with the gzip magic bytes.
pub fn decompress_if_gzipped<R: Read + 'static>(
    conn: R,
) -> Result<Box<dyn Read>> {
    let mut reader = BufReader::new(conn);
    let is_gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    if is_gzip {
        Ok(Box::new(MultiGzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Open `path` for reading, or stdin if `path` is None or `-`.
pub fn open_input(
    path: Option<&Path>,
) -> Result<Box<dyn Read>> {
    let path = match path {
        Some(path) if !is_stdio(Some(path)) => path,
        _ => return decompress_if_gzipped(std::io::stdin()),
    };
    info!("Reading alignments from {}", path.display());
    decompress_if_gzipped(File::open(path)?)
}

/// Output stream returned by [create_output].
///
/// Close with [finish](Output::finish), dropping it discards errors from the
/// final writes and may leave a gzip file without its trailer.
pub enum Output {
    Stdout(BufWriter<std::io::Stdout>),
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Output {
    /// Flush buffered data, write the gzip trailer and sync files to disk.
    pub fn finish(
        self,
    ) -> Result<()> {
        match self {
            Output::Stdout(mut conn) => conn.flush()?,
            Output::Plain(conn) => {
                let file = conn.into_inner().map_err(|e| e.into_error())?;
                file.sync_all()?;
            },
            Output::Gzip(encoder) => {
                let conn = encoder.finish()?;
                let file = conn.into_inner().map_err(|e| e.into_error())?;
                file.sync_all()?;
            },
        }
        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Output::Stdout(conn) => conn.write(buf),
            Output::Plain(conn) => conn.write(buf),
            Output::Gzip(conn) => conn.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Output::Stdout(conn) => conn.flush(),
            Output::Plain(conn) => conn.flush(),
            Output::Gzip(conn) => conn.flush(),
        }
    }
}

/// Create `path` for writing, or stdout if `path` is None or `-`.
///
/// Output is gzip compressed if the path ends in `.gz`.
pub fn create_output(
    path: Option<&Path>,
) -> Result<Output> {
    let path = match path {
        Some(path) if !is_stdio(Some(path)) => path,
        _ => return Ok(Output::Stdout(BufWriter::new(std::io::stdout()))),
    };
    let conn = BufWriter::new(File::create(path)?);
    if path.extension().is_some_and(|x| x == "gz") {
        info!("Writing gzip compressed blocks to {}", path.display());
        Ok(Output::Gzip(GzEncoder::new(conn, Compression::default())))
    } else {
        info!("Writing blocks to {}", path.display());
        Ok(Output::Plain(conn))
    }
}
