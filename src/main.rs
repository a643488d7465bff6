//! VM Manager - Main Entry Point
//!
//! Usage: vm-manager [OPTIONS] <ADDRESSES>
//!
//! Translates each logical address in ADDRESSES (one decimal value per
//! line) and prints the physical address and stored byte, followed by
//! page fault and TLB hit statistics.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{crate_version, Arg, ArgAction, ArgMatches, Command};
use log::{info, warn, Level};

use vm_manager::io::{read_virtual_addresses, write_results};
use vm_manager::{
    Config, FileBackingStore, Policy, Translator, DEFAULT_BACKING_STORE, NUM_FRAMES, TLB_ENTRIES,
};

/// Command-line configuration
struct Options {
    addresses: PathBuf,
    backing_store: PathBuf,
    output: Option<PathBuf>,
    skip_invalid: bool,
    config: Config,
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = log_level(matches.get_count("verbose"), matches.get_flag("skip-invalid"));
    simple_logger::SimpleLogger::new()
        .with_level(level.to_level_filter())
        .init()
        .context("failed to initialize logging")?;

    let options = parse_options(&matches)?;
    run(&options)
}

/// Map `-v` occurrences to a log level.
/// Skipped input lines are reported as warnings, so skipping raises the floor to `Warn`.
fn log_level(verbose: u8, skip_invalid: bool) -> Level {
    let level = match verbose {
        0 => Level::Error,
        1 => Level::Warn,
        2 => Level::Info,
        3 => Level::Debug,
        _ => Level::Trace,
    };
    if skip_invalid {
        level.max(Level::Warn)
    } else {
        level
    }
}

fn cli() -> Command {
    Command::new("vm-manager")
        .version(crate_version!())
        .about("Translates logical addresses through a simulated TLB and page table")
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .arg(
            Arg::new("policy")
                .long("policy")
                .short('p')
                .value_name("POLICY")
                .default_value("fifo")
                .help("Frame replacement policy: fifo or lru"),
        )
        .arg(
            Arg::new("backing-store")
                .long("backing-store")
                .short('b')
                .value_name("FILE")
                .default_value(DEFAULT_BACKING_STORE)
                .help("Flat binary file holding every page"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Write results here instead of stdout"),
        )
        .arg(
            Arg::new("frames")
                .long("frames")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Number of physical frames, 1-256 [default: 128]"),
        )
        .arg(
            Arg::new("tlb-entries")
                .long("tlb-entries")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Number of TLB slots [default: 16]"),
        )
        .arg(
            Arg::new("strict-tlb")
                .long("strict-tlb")
                .action(ArgAction::SetTrue)
                .help("Invalidate TLB entries of evicted pages"),
        )
        .arg(
            Arg::new("skip-invalid")
                .long("skip-invalid")
                .action(ArgAction::SetTrue)
                .help("Warn about and skip malformed address lines instead of aborting"),
        )
        .arg(
            Arg::new("addresses")
                .value_name("ADDRESSES")
                .required(true)
                .help("Text file with one logical address per line"),
        )
}

fn parse_options(matches: &ArgMatches) -> Result<Options> {
    let path = |name: &str| matches.get_one::<String>(name).map(PathBuf::from);

    let policy: Policy = matches
        .get_one::<String>("policy")
        .map(String::as_str)
        .unwrap_or("fifo")
        .parse()?;

    let config = Config {
        policy,
        frames: matches.get_one::<usize>("frames").copied().unwrap_or(NUM_FRAMES),
        tlb_entries: matches
            .get_one::<usize>("tlb-entries")
            .copied()
            .unwrap_or(TLB_ENTRIES),
        invalidate_tlb: matches.get_flag("strict-tlb"),
    };
    config.validate()?;

    Ok(Options {
        addresses: path("addresses").context("missing address file")?,
        backing_store: path("backing-store").unwrap_or_else(|| PathBuf::from(DEFAULT_BACKING_STORE)),
        output: path("output"),
        skip_invalid: matches.get_flag("skip-invalid"),
        config,
    })
}

/// Main logic separated from main() for cleaner error handling
fn run(options: &Options) -> Result<()> {
    let list = read_virtual_addresses(&options.addresses, options.skip_invalid)?;
    if !list.skipped.is_empty() {
        warn!(
            "{} malformed lines skipped in {}",
            list.skipped.len(),
            options.addresses.display()
        );
    }
    let addresses = list.addresses;
    info!(
        "{} addresses read from {}",
        addresses.len(),
        options.addresses.display()
    );

    let store = FileBackingStore::open(&options.backing_store)?;
    let mut translator = Translator::new(options.config, store)?;

    let results = translator.translate_all(addresses)?;
    let summary = translator.summary()?;
    info!(
        "translated {}, {} page faults, {} tlb hits",
        summary.stats.translated, summary.stats.page_faults, summary.stats.tlb_hits
    );

    // output is only created once the whole run has succeeded
    match &options.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            let mut out = BufWriter::new(file);
            write_results(&mut out, &results, &summary)
                .and_then(|_| out.flush())
                .with_context(|| format!("failed to write output file {}", path.display()))?;
            info!("results written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_results(&mut out, &results, &summary).context("failed to write results")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let matches = cli().try_get_matches_from(["vm-manager", "addresses.txt"]).unwrap();
        let options = parse_options(&matches).unwrap();
        assert_eq!(options.addresses, PathBuf::from("addresses.txt"));
        assert_eq!(options.backing_store, PathBuf::from(DEFAULT_BACKING_STORE));
        assert_eq!(options.output, None);
        assert!(!options.skip_invalid);
        assert_eq!(options.config, Config::default());
    }

    #[test]
    fn test_cli_options() {
        let matches = cli()
            .try_get_matches_from([
                "vm-manager",
                "-vv",
                "--policy",
                "lru",
                "-b",
                "store.bin",
                "-o",
                "out.txt",
                "--frames",
                "256",
                "--tlb-entries",
                "8",
                "--strict-tlb",
                "--skip-invalid",
                "addresses.txt",
            ])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 2);

        let options = parse_options(&matches).unwrap();
        assert_eq!(options.config.policy, Policy::Lru);
        assert_eq!(options.config.frames, 256);
        assert_eq!(options.config.tlb_entries, 8);
        assert!(options.config.invalidate_tlb);
        assert!(options.skip_invalid);
        assert_eq!(options.output, Some(PathBuf::from("out.txt")));
        assert_eq!(options.backing_store, PathBuf::from("store.bin"));
    }

    #[test]
    fn test_cli_unknown_policy() {
        let matches = cli()
            .try_get_matches_from(["vm-manager", "-p", "random", "addresses.txt"])
            .unwrap();
        let err = parse_options(&matches).err().unwrap();
        assert!(err.to_string().contains("unknown replacement policy"));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0, false), Level::Error);
        assert_eq!(log_level(1, false), Level::Warn);
        assert_eq!(log_level(3, false), Level::Debug);
        assert_eq!(log_level(9, false), Level::Trace);

        // skipped lines must stay visible at default verbosity
        assert_eq!(log_level(0, true), Level::Warn);
        assert_eq!(log_level(2, true), Level::Info);
    }

    #[test]
    fn test_cli_requires_addresses() {
        assert!(cli().try_get_matches_from(["vm-manager"]).is_err());
    }
}
