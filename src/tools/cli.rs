use clap::Parser;
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

/// Extension added to compressed files.
pub const EXTENSION: &str = ".huf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Zip, Unzip, Test
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Define the two output channels
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman prefix-code file compressor",
    long_about = None)]
pub struct Args {
    /// File to process. Reads standard input when omitted.
    #[clap()]
    filename: Option<String>,

    /// Compress the input (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity without writing anything
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Write the result to this file instead of the default name
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Keep input file
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Sets verbosity. -v shows progress, -vvv is chatty
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u64,

    /// Displays license information
    #[clap(short = 'L', long)]
    license: bool,
}

#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Optional name of file to read for input
    pub file: Option<String>,
    /// Optional explicit name of the file to write
    pub out_file: Option<String>,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Print the license text and stop
    pub show_license: bool,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            file: None,
            out_file: None,
            op_mode: Mode::Zip,
            output: Output::File,
            force_overwrite: false,
            keep_input_files: false,
            show_license: false,
        }
    }

    /// Name of the file the current mode writes to, if it writes to a file.
    pub fn output_name(&self) -> Option<String> {
        if self.output == Output::Stdout || self.op_mode == Mode::Test {
            return None;
        }
        if let Some(name) = &self.out_file {
            return Some(name.clone());
        }
        let input = self.file.as_ref()?;
        match self.op_mode {
            Mode::Zip => Some(format!("{}{}", input, EXTENSION)),
            Mode::Unzip => Some(match input.strip_suffix(EXTENSION) {
                Some(stem) if !stem.is_empty() => stem.to_string(),
                _ => format!("{}.out", input),
            }),
            Mode::Test => None,
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Official license statement
pub fn license() -> String {
    "
huffpack, a Huffman prefix-code file compressor.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
"
    .to_string()
}

/// Parse the command line and copy it into our internal options structure.
pub fn huffopts_init() -> HuffOpts {
    opts_from_args(Args::parse())
}

/// Copy parsed arguments into HuffOpts and set the log level.
pub fn opts_from_args(args: Args) -> HuffOpts {
    let mut opts = HuffOpts::new();

    opts.file = args.filename;
    opts.out_file = args.output;
    if args.compress {
        opts.op_mode = Mode::Zip
    };
    if args.decompress {
        opts.op_mode = Mode::Unzip
    };
    if args.test {
        opts.op_mode = Mode::Test
    };
    // Without a file name the data comes from stdin, so it has to go to stdout.
    if args.stdout || (opts.file.is_none() && opts.out_file.is_none()) {
        opts.output = Output::Stdout
    };
    opts.force_overwrite = args.force;
    opts.keep_input_files = args.keep;

    // Set the log level
    match args.verbose {
        0 => log::set_max_level(log::LevelFilter::Warn),
        1 => log::set_max_level(log::LevelFilter::Info),
        2 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };
    opts.show_license = args.license;

    info!("---- Initialization Start ----",);
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match &opts.file {
        Some(s) => info!("Getting input from the file {}", s),
        None => warn!("Getting input from stdin"),
    }
    info!("Output set to {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- Initialization End ----\n");
    opts
}
