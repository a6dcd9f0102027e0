//! combine_traineddata - build, split, patch and inspect traineddata archives

use anyhow::{bail, Context, Result};
use clap::{ArgAction, ArgGroup, Parser};
use std::path::{Path, PathBuf};
use traineddata_rs::{
    ComponentKind, DirectoryEntry, ExtractOutcome, Manifest, TrainedData, ARCHIVE_SUFFIX,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "combine_traineddata")]
#[command(author, version, about = "Combine, extract, overwrite and list traineddata components")]
#[command(long_about = "With a single PREFIX argument, builds PREFIXtraineddata from every \
PREFIX<suffix> component file that exists (e.g. tessdata/eng. picks up tessdata/eng.unicharset, \
tessdata/eng.lstm, ...).\n\nThe other modes take an archive path followed by their arguments.")]
#[command(group(
    ArgGroup::new("mode")
        .args(["extract", "unpack", "overwrite", "dump", "compact"])
        .multiple(false)
))]
struct Cli {
    /// Extract the named component files from ARCHIVE (kind taken from each suffix)
    #[arg(short = 'e', long)]
    extract: bool,

    /// Extract every component of ARCHIVE to OUTPUT_PREFIX<suffix>
    #[arg(short = 'u', long)]
    unpack: bool,

    /// Replace the named components of ARCHIVE with the given files
    #[arg(short = 'o', long)]
    overwrite: bool,

    /// Print the directory of ARCHIVE
    #[arg(short = 'd', long)]
    dump: bool,

    /// Quantize the LSTM network of ARCHIVE to int8 in place
    #[arg(short = 'c', long)]
    compact: bool,

    /// With -d, also write a manifest (.json or .toml)
    #[arg(long, value_name = "FILE", requires = "dump")]
    manifest: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// PREFIX, or ARCHIVE followed by component files / output prefix
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Combine,
    Extract,
    Unpack,
    Overwrite,
    Dump,
    Compact,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.extract {
            Mode::Extract
        } else if self.unpack {
            Mode::Unpack
        } else if self.overwrite {
            Mode::Overwrite
        } else if self.dump {
            Mode::Dump
        } else if self.compact {
            Mode::Compact
        } else {
            Mode::Combine
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mode = cli.mode();
    let (first, rest) = match cli.paths.split_first() {
        Some(split) => split,
        None => bail!("Missing archive path"),
    };

    match mode {
        Mode::Combine => {
            expect_no_extra(mode, rest)?;
            combine(first)
        }
        Mode::Extract => {
            expect_some(mode, rest)?;
            extract(first, rest)
        }
        Mode::Unpack => match rest {
            [prefix] => unpack(first, prefix),
            _ => bail!("-u takes an archive and exactly one output prefix"),
        },
        Mode::Overwrite => {
            expect_some(mode, rest)?;
            overwrite(first, rest)
        }
        Mode::Dump => {
            expect_no_extra(mode, rest)?;
            dump(first, cli.manifest.as_deref())
        }
        Mode::Compact => {
            expect_no_extra(mode, rest)?;
            compact(first)
        }
    }
}

fn expect_no_extra(mode: Mode, rest: &[PathBuf]) -> Result<()> {
    if !rest.is_empty() {
        bail!("Unexpected arguments for {:?} mode: {:?}", mode, rest);
    }
    Ok(())
}

fn expect_some(mode: Mode, rest: &[PathBuf]) -> Result<()> {
    if rest.is_empty() {
        bail!("{:?} mode needs at least one component file after the archive", mode);
    }
    Ok(())
}

fn combine(prefix: &Path) -> Result<()> {
    let output = archive_path_for_prefix(prefix);
    let mut data = TrainedData::new();
    let found = data
        .combine_data_files(prefix, &output)
        .with_context(|| format!("Failed to combine components with prefix {}", prefix.display()))?;
    println!("Combined {} components into {}", found, output.display());
    print_directory(&data);
    Ok(())
}

fn archive_path_for_prefix(prefix: &Path) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(ARCHIVE_SUFFIX);
    PathBuf::from(name)
}

fn extract(archive: &Path, targets: &[PathBuf]) -> Result<()> {
    let data = TrainedData::open(archive)
        .with_context(|| format!("Failed to load archive {}", archive.display()))?;
    for target in targets {
        let outcome = data
            .extract_to_file(target)
            .with_context(|| format!("Failed to extract {}", target.display()))?;
        match outcome {
            ExtractOutcome::Written => println!("Wrote {}", target.display()),
            ExtractOutcome::NotPresent => {
                println!("Not present in archive: {}", target.display())
            }
        }
    }
    Ok(())
}

fn unpack(archive: &Path, prefix: &Path) -> Result<()> {
    let data = TrainedData::open(archive)
        .with_context(|| format!("Failed to load archive {}", archive.display()))?;
    let written = data
        .unpack_all(prefix)
        .with_context(|| format!("Failed to unpack to prefix {}", prefix.display()))?;
    for path in &written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn overwrite(archive: &Path, inputs: &[PathBuf]) -> Result<()> {
    let mut data = TrainedData::new();
    data.overwrite_components(archive, inputs)
        .with_context(|| format!("Failed to overwrite components of {}", archive.display()))?;
    println!("Updated {} components in {}", inputs.len(), archive.display());
    print_directory(&data);
    Ok(())
}

fn dump(archive: &Path, manifest_path: Option<&Path>) -> Result<()> {
    let entries = TrainedData::read_directory(archive)
        .with_context(|| format!("Failed to read directory of {}", archive.display()))?;
    print_entries(&entries);

    if let Some(manifest_path) = manifest_path {
        let data = TrainedData::open(archive)
            .with_context(|| format!("Failed to load archive {}", archive.display()))?;
        Manifest::from_trained_data(&data)
            .write_to_path(manifest_path)
            .with_context(|| format!("Failed to write manifest {}", manifest_path.display()))?;
        println!("Wrote manifest {}", manifest_path.display());
    }
    Ok(())
}

fn compact(archive: &Path) -> Result<()> {
    let mut data = TrainedData::open(archive)
        .with_context(|| format!("Failed to load archive {}", archive.display()))?;
    if !data.is_lstm_available() {
        bail!(
            "{} has no {} component to compact",
            archive.display(),
            ComponentKind::Lstm
        );
    }
    data.compact_lstm().context("Failed to compact network weights")?;
    data.save_file(archive)
        .with_context(|| format!("Failed to save {}", archive.display()))?;
    println!("Compacted {}", archive.display());
    Ok(())
}

fn print_directory(data: &TrainedData) {
    if let Some(version) = data.version_string() {
        println!("Version: {}", version);
    }
    print_entries(&data.directory());
}

fn print_entries(entries: &[DirectoryEntry]) {
    for entry in entries {
        println!(
            "{}:{}:size={}, offset={}",
            entry.kind.index(),
            entry.kind.suffix(),
            entry.size,
            entry.offset
        );
    }
}
