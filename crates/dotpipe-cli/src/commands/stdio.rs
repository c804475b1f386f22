//! Input and output plumbing for commands that read a graph from a file or
//! stdin and write the result to a file or stdout.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;

/// Reads the whole input, from `path` or stdin.
pub(crate) fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut data = Vec::new();
            io::stdin()
                .read_to_end(&mut data)
                .context("failed to read stdin")?;
            Ok(data)
        }
    }
}

/// Lazily splits the input into lines.
///
/// Each line keeps its `\n`; a final line without one is yielded as is. A
/// read error is yielded as the last item.
pub(crate) fn input_lines(
    path: Option<&Path>,
) -> Result<impl Iterator<Item = io::Result<Vec<u8>>> + Send + 'static> {
    let reader: Box<dyn Read + Send> = match path {
        Some(path) => Box::new(
            fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };
    let mut reader = BufReader::new(reader);
    let mut done = false;
    Ok(std::iter::from_fn(move || {
        if done {
            return None;
        }
        let mut line = Vec::new();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                done = true;
                None
            }
            Ok(_) => Some(Ok(line)),
            Err(e) => {
                done = true;
                Some(Err(e))
            }
        }
    }))
}

/// Opens the output sink, a file at `path` or stdout.
pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Writes `data` to the output sink and flushes it.
pub(crate) fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    let mut out = open_output(path)?;
    out.write_all(data).context("failed to write output")?;
    out.flush().context("failed to flush output")?;
    Ok(())
}
