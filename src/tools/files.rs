use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use log::{debug, info};

use super::cli::{HuffOpts, Output};
use crate::error::{HuffError, Result};

/// Read the whole input named in opts, or all of stdin when no file was given.
pub fn read_input(opts: &HuffOpts) -> Result<Vec<u8>> {
    let data = match &opts.file {
        Some(fname) => fs::read(fname)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };
    debug!("Read {} input bytes.", data.len());
    Ok(data)
}

/// True when both names resolve to the same existing file.
fn same_file(a: &str, b: &str) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write data to the file chosen by opts, or to stdout. An existing file is only
/// replaced when overwriting was forced, and never when it is the input itself.
pub fn write_output(opts: &HuffOpts, data: &[u8]) -> Result<()> {
    match (opts.output, opts.output_name()) {
        (Output::File, Some(fname)) => {
            if let Some(input) = &opts.file {
                if same_file(input, &fname) {
                    return Err(HuffError::Io(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("{} is both the input and the output file", fname),
                    )));
                }
            }
            if Path::new(&fname).exists() && !opts.force_overwrite {
                return Err(HuffError::Io(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists (use --force to overwrite)", fname),
                )));
            }
            fs::write(&fname, data)?;
            info!("Wrote {} bytes to {}.", data.len(), fname);
        }
        _ => {
            let mut out = io::stdout().lock();
            out.write_all(data)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Remove the input file once it has been processed, unless asked to keep it.
pub fn finish_input(opts: &HuffOpts) -> Result<()> {
    if let (Some(fname), false, Output::File) =
        (&opts.file, opts.keep_input_files, opts.output)
    {
        fs::remove_file(fname)?;
        info!("Removed input file {}.", fname);
    }
    Ok(())
}

/// Report the size change between input and output.
pub fn report_ratio(input: usize, output: usize) {
    if input == 0 {
        info!("{} bytes in, {} bytes out.", input, output);
    } else {
        info!(
            "{} bytes in, {} bytes out ({:.2}%).",
            input,
            output,
            output as f64 * 100.0 / input as f64
        );
    }
}
