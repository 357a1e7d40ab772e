use crate::config::{config_path, get_default_config_toml};
use clap::{error::ErrorKind, Args, Parser};
use liblive_probe::PoolConfig;
use std::error::Error;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Flags shared by `live-ips` and `live-subs`.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Maximum number of probes in flight (never more than there are targets)
    #[arg(long, short = 'w')]
    pub workers: Option<usize>,

    /// Per-probe timeout in seconds
    #[arg(long, short = 't')]
    pub timeout: Option<u64>,

    /// File the live targets are saved to
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print result lines without colour
    #[arg(long)]
    pub no_color: bool,

    /// Log every probe outcome to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Print the default config to stdout and exit
    #[arg(long)]
    pub print_default_config: bool,

    /// Write the default config to the config path and exit
    #[arg(long)]
    pub write_default_config: bool,
}

impl CommonArgs {
    /// An explicit `--workers` replaces both configured ceilings.
    pub fn pool_config(&self, configured: PoolConfig) -> PoolConfig {
        match self.workers {
            Some(max_workers) => PoolConfig {
                max_workers,
                workers_per_cpu: None,
            },
            None => configured,
        }
    }

    pub fn timeout_or(&self, configured: Duration) -> Duration {
        self.timeout.map(Duration::from_secs).unwrap_or(configured)
    }

    pub fn output_or(&self, configured: &Path) -> PathBuf {
        self.output.clone().unwrap_or_else(|| configured.to_path_buf())
    }

    pub fn use_color(&self, configured: bool) -> bool {
        configured && !self.no_color && console::colors_enabled()
    }
}

/// Handles `--print-default-config` / `--write-default-config`. Returns true
/// when one of them ran and the program should exit.
pub fn handle_config_flags(args: &CommonArgs) -> Result<bool, Box<dyn Error>> {
    if args.print_default_config {
        println!("{}", get_default_config_toml());
        return Ok(true);
    }

    if args.write_default_config {
        if let Some(path) = config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, get_default_config_toml())?;
            println!("Default config written to: {}", path.display());
        } else {
            fail("Could not determine config path");
        }
        return Ok(true);
    }

    Ok(false)
}

/// Like `Parser::parse`, but argument errors exit with status 1.
pub fn parse_or_usage<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    }
}

pub fn fail(err: impl Display) -> ! {
    eprintln!("[!] Error: {err}");
    std::process::exit(1);
}

pub fn prompt(message: &str) -> io::Result<String> {
    prompt_from(message, io::stdin().lock(), io::stdout())
}

/// Reads a single trimmed line. End of input yields an empty string.
pub fn prompt_from<R: BufRead, W: Write>(message: &str, mut input: R, mut output: W) -> io::Result<String> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
