use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so they never mix with the result lines on stdout.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("liblive_probe=debug,lpcli=debug,live_ips=debug,live_subs=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
