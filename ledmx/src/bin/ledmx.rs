use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use ledmx::preview::render;
use ledmx::{
    decode_blocks, encode, encode_columns, export_store, write_file, Design, ExportConfig,
    ExportStrategy, GridStore, HexDump, Shell, SubMatrix,
};
use ledmx_core::validation::{parse_hex_sequence, parse_pixel_row};
use ledmx_core::DEFAULT_REPETITIONS;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "LEDMX - Draw 8x8 LED sub-matrix patterns and export them as raw column bytes")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive editor on stdin/stdout
    Shell {
        /// Start from a design file instead of an empty grid
        #[arg(long)]
        design: Option<PathBuf>,
    },
    /// Apply a design file and export its history
    Build {
        /// Design file (JSON)
        design: PathBuf,

        /// Target directory
        #[arg(long)]
        out: PathBuf,

        /// Write files on the rayon pool
        #[arg(long, conflicts_with = "async_export")]
        parallel: bool,

        /// Write files as tokio tasks
        #[arg(long = "async")]
        async_export: bool,

        /// Replace existing files
        #[arg(long)]
        overwrite: bool,

        /// Create the target directory if it is missing
        #[arg(long)]
        create_dir: bool,
    },
    /// Encode an 8-line pattern file
    Encode {
        /// Pattern file, one row of `#` and `.` per line
        pattern: PathBuf,

        /// Repetitions written to the output file
        #[arg(long, default_value_t = DEFAULT_REPETITIONS)]
        reps: usize,

        /// Output file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write a literal hex byte sequence
    Hex {
        /// Bytes such as "FF FF AA 00"
        bytes: String,

        /// Output file
        #[arg(long)]
        out: PathBuf,
    },
    /// Decode an exported file and draw every block
    Inspect {
        /// File to decode
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _logger = ledmx::logging::init(cli.verbose)?;

    match cli.command {
        Commands::Shell { design } => run_shell(design.as_deref())?,
        Commands::Build {
            design,
            out,
            parallel,
            async_export,
            overwrite,
            create_dir,
        } => {
            let strategy = select_strategy(parallel, async_export)?;
            let config = ExportConfig::default()
                .with_strategy(strategy)
                .with_overwrite(overwrite)
                .with_create_dir(create_dir);
            handle_build(&design, &out, &config)?;
        }
        Commands::Encode { pattern, reps, out } => handle_encode(&pattern, reps, out.as_deref())?,
        Commands::Hex { bytes, out } => {
            let bytes = parse_hex_sequence(&bytes)?;
            write_file(&out, &bytes)?;
            println!("Wrote {} bytes to {}", bytes.len(), out.display());
        }
        Commands::Inspect { file } => handle_inspect(&file)?,
    }

    Ok(())
}

fn select_strategy(
    parallel: bool,
    async_export: bool,
) -> Result<ExportStrategy, Box<dyn std::error::Error>> {
    if parallel {
        return Ok(ExportStrategy::Parallel);
    }
    if async_export {
        return async_strategy();
    }
    Ok(ExportStrategy::Sequential)
}

#[cfg(feature = "async")]
fn async_strategy() -> Result<ExportStrategy, Box<dyn std::error::Error>> {
    Ok(ExportStrategy::Async)
}

#[cfg(not(feature = "async"))]
fn async_strategy() -> Result<ExportStrategy, Box<dyn std::error::Error>> {
    Err("--async requires the 'async' feature".into())
}

fn run_shell(design: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let store = match design {
        Some(path) => Design::load(path)?.apply()?,
        None => GridStore::new(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    println!("Type 'help' for commands");
    Shell::new(store, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}

fn handle_build(
    design: &Path,
    out: &Path,
    config: &ExportConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Design::load(design)?.apply()?;
    let report = export_store(&store, out, config)?;

    for path in &report.written {
        println!("{}", path.display());
    }
    for failure in &report.failures {
        eprintln!("failed: {}: {}", failure.file_name, failure.source);
    }
    report.into_result()?;
    Ok(())
}

fn handle_encode(
    pattern: &Path,
    reps: usize,
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(pattern)?;
    let rows = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_pixel_row)
        .collect::<Result<Vec<_>, _>>()?;
    let matrix = SubMatrix::from_rows(&rows)?;

    println!("{}", encode_columns(&matrix));

    if let Some(out) = out {
        let bytes = encode(&matrix, reps)?;
        write_file(out, &bytes)?;
        println!("Wrote {} bytes to {}", bytes.len(), out.display());
    }
    Ok(())
}

fn handle_inspect(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(file)?;
    let blocks = decode_blocks(&bytes)?;

    println!("{}: {} bytes, {} blocks", file.display(), bytes.len(), blocks.len());
    for (index, (block, chunk)) in blocks.iter().zip(bytes.chunks(8)).enumerate() {
        println!("block {} [{}]", index + 1, HexDump(chunk));
        print!("{}", render(block));
    }
    Ok(())
}
