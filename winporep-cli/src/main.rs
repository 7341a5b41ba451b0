use std::path::PathBuf;
use std::process::exit;

use anyhow::{ensure, Context, Result};
use clap::{App, Arg, ArgMatches};
use log::info;

use winporep_core::settings::Params;

const DEFAULT_SEED: &str = "WinPoRepFTW!";

pub fn main() {
    let matches = App::new("winporep")
        .version("0.1.0")
        .about("Windowed DRG-based proof-of-replication encoder")
        .arg(
            Arg::with_name("input")
                .value_name("INPUT")
                .required(true)
                .index(1)
                .help("Path to the data file to encode"),
        )
        .arg(
            Arg::with_name("output")
                .value_name("OUTPUT")
                .required(true)
                .index(2)
                .help("Path to write the replica to"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .default_value(DEFAULT_SEED)
                .help("Public seed, hashed with SHA-256 before use"),
        )
        .arg(
            Arg::with_name("winsize")
                .long("winsize")
                .takes_value(true)
                .help("Nodes per window (default 16384)"),
        )
        .arg(
            Arg::with_name("parents")
                .long("parents")
                .takes_value(true)
                .help("DRG parent fan-in (default 2)"),
        )
        .arg(
            Arg::with_name("stagger")
                .long("stagger")
                .takes_value(true)
                .help("Number of adjacent DRGs contributing to each window (default 2)"),
        )
        .arg(
            Arg::with_name("decode")
                .long("decode")
                .help("Invert the encoding: treat INPUT as a replica and recover the original data into OUTPUT"),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Increase logging verbosity"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("v"));

    match run(&matches) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("fatal error: {}", err);
            exit(1);
        }
    }
}

/// Maps `-v` occurrences to a log level and initializes `fil_logger`
/// accordingly. An explicit `RUST_LOG` in the environment always wins, so
/// `-v` only sets a default for callers who haven't already configured
/// one.
fn init_logging(verbosity: u64) {
    if std::env::var_os("RUST_LOG").is_none() {
        let level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }
    fil_logger::init();
}

fn run(matches: &ArgMatches) -> Result<()> {
    let input = PathBuf::from(matches.value_of("input").expect("input is required"));
    let output = PathBuf::from(matches.value_of("output").expect("output is required"));
    let seed = matches.value_of("seed").unwrap_or(DEFAULT_SEED);

    let mut params = Params::default();
    if let Some(v) = matches.value_of("winsize") {
        params.window_size = v.parse().context("invalid --winsize")?;
    }
    if let Some(v) = matches.value_of("parents") {
        params.drg_parents = v.parse().context("invalid --parents")?;
    }
    if let Some(v) = matches.value_of("stagger") {
        params.drg_stagger = v.parse().context("invalid --stagger")?;
    }
    params.validate().context("invalid parameters")?;

    ensure!(
        input.exists(),
        "input file does not exist: {}",
        input.display()
    );

    if matches.is_present("decode") {
        info!("decoding {} -> {}", input.display(), output.display());
        winporep_porep::facade::decode_files_with_params(seed.as_bytes(), &input, &output, params)
            .context("decode failed")?;
    } else {
        info!("encoding {} -> {}", input.display(), output.display());
        winporep_porep::facade::encode_files_with_params(seed.as_bytes(), &input, &output, params)
            .context("encode failed")?;
    }

    Ok(())
}
