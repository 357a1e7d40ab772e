use clap::Parser;
use liblive_probe::{load_targets, sweep, Aggregator, PingProber, ProbePool, RangeMode};
use lpcli::{
    cli::{self, CommonArgs},
    config, logging,
};
use std::io;

#[derive(Parser, Debug)]
#[command(name = "live-ips")]
#[command(about = "Ping a host, an IP range or a list of hosts and save the live ones", long_about = None)]
struct Args {
    /// IP, range (10.0.0.5-20 or 10.0.0.5-10.0.1.20) or file with one host per line.
    /// Prompted for when omitted.
    spec: Option<String>,

    /// Enumerate every address of A.B.C.D-E.F.G.H instead of the first CIDR block only
    #[arg(long)]
    full_range: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init_logging(args.common.verbose);

    if cli::handle_config_flags(&args.common)? {
        return Ok(());
    }

    let config = config::load_config();

    let spec = match args.spec {
        Some(spec) => spec,
        None => cli::prompt("Enter IP, IP range, or filename: ")?,
    };
    let mode = if args.full_range {
        RangeMode::Full
    } else {
        config.range.mode()
    };

    let targets = load_targets(&spec, mode).unwrap_or_else(|e| cli::fail(e));

    let mut ping = config.ping.probe_config();
    ping.timeout = args.common.timeout_or(ping.timeout);
    let workers = args
        .common
        .pool_config(config.ping.pool_config())
        .worker_count(targets.len());
    let style = config
        .output
        .ip_style()
        .with_color(args.common.use_color(config.output.color));
    let output = args.common.output_or(&config.output.ips_file);

    println!(
        "\n[+] Scanning {} IP(s) with {} worker(s)...\n",
        targets.len(),
        workers
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let pool = ProbePool::new(PingProber::new(ping), workers);
        let aggregator = Aggregator::new(style, io::stdout());
        sweep(&pool, targets, aggregator, &output).await
    })?;

    Ok(())
}
