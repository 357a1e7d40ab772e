use console::Emoji;
use liblive_probe::{read_target_file, sweep, Aggregator, ProbePool, WebProber};
use lpcli::{
    cli::{self, CommonArgs},
    config, logging,
};
use std::io;
use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
#[command(name = "live-subs")]
#[command(about = "Check which subdomains answer over HTTP or HTTPS and save the live ones", long_about = None)]
struct Args {
    /// File with one subdomain per line
    #[arg(required_unless_present_any = ["print_default_config", "write_default_config"])]
    file: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = cli::parse_or_usage();
    logging::init_logging(args.common.verbose);

    if cli::handle_config_flags(&args.common)? {
        return Ok(());
    }

    let config = config::load_config();

    let Some(file) = args.file else {
        cli::fail("a subdomain file is required");
    };
    let subdomains = read_target_file(&file).unwrap_or_else(|e| cli::fail(e));

    let mut http = config.http.probe_config();
    http.timeout = args.common.timeout_or(http.timeout);
    let prober = WebProber::new(&http)?;
    let workers = args
        .common
        .pool_config(config.http.pool_config())
        .worker_count(subdomains.len());
    let style = config
        .output
        .subdomain_style()
        .with_color(args.common.use_color(config.output.color));
    let output = args.common.output_or(&config.output.subdomains_file);

    println!(
        "\n{}Checking {} subdomains...\n",
        Emoji("🔍 ", ""),
        subdomains.len()
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let pool = ProbePool::new(prober, workers);
        let aggregator = Aggregator::new(style, io::stdout());
        sweep(&pool, subdomains, aggregator, &output).await
    })?;

    Ok(())
}
