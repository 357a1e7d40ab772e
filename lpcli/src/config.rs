use liblive_probe::{HttpConfig, PingConfig, PoolConfig, RangeMode, ReportStyle};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub ping: PingSection,
    #[serde(default)]
    pub http: HttpSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub range: RangeSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PingSection {
    pub timeout_secs: u64,
    pub max_workers: usize,
    pub workers_per_cpu: usize,
    pub program: String,
}

impl Default for PingSection {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            max_workers: 100,
            workers_per_cpu: 5,
            program: "ping".to_string(),
        }
    }
}

impl PingSection {
    pub fn probe_config(&self) -> PingConfig {
        PingConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            program: self.program.clone(),
        }
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_workers: self.max_workers,
            workers_per_cpu: Some(self.workers_per_cpu),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpSection {
    pub timeout_secs: u64,
    pub max_workers: usize,
    pub max_redirects: usize,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            timeout_secs: 3,
            max_workers: 20,
            max_redirects: 10,
        }
    }
}

impl HttpSection {
    pub fn probe_config(&self) -> HttpConfig {
        HttpConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            max_redirects: self.max_redirects,
        }
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_workers: self.max_workers,
            workers_per_cpu: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSection {
    pub color: bool,
    pub ips_file: PathBuf,
    pub subdomains_file: PathBuf,
    pub ip_live_marker: String,
    pub ip_dead_marker: String,
    pub subdomain_live_marker: String,
    pub subdomain_dead_marker: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        let ip = ReportStyle::ip();
        let sub = ReportStyle::subdomain();
        Self {
            color: true,
            ips_file: PathBuf::from("live_ips.txt"),
            subdomains_file: PathBuf::from("live_subdomains.txt"),
            ip_live_marker: ip.live_marker,
            ip_dead_marker: ip.dead_marker,
            subdomain_live_marker: sub.live_marker,
            subdomain_dead_marker: sub.dead_marker,
        }
    }
}

impl OutputSection {
    pub fn ip_style(&self) -> ReportStyle {
        ReportStyle {
            live_marker: self.ip_live_marker.clone(),
            dead_marker: self.ip_dead_marker.clone(),
            ..ReportStyle::ip()
        }
        .with_color(self.color)
    }

    pub fn subdomain_style(&self) -> ReportStyle {
        ReportStyle {
            live_marker: self.subdomain_live_marker.clone(),
            dead_marker: self.subdomain_dead_marker.clone(),
            ..ReportStyle::subdomain()
        }
        .with_color(self.color)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RangeSection {
    pub full_expansion: bool,
}

impl RangeSection {
    pub fn mode(&self) -> RangeMode {
        if self.full_expansion {
            RangeMode::Full
        } else {
            RangeMode::FirstBlock
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("liveprobe").join("config.toml"))
}

/// Missing file means defaults; a file that does not parse is reported and ignored.
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let Ok(content) = std::fs::read_to_string(&path) else {
        return Config::default();
    };

    match parse_config(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring config: {}", e);
            Config::default()
        }
    }
}

pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

pub fn get_default_config_toml() -> String {
    r#"# liveprobe configuration (live-ips / live-subs)

[ping]
# Seconds before a ping process is killed and the host counted as down
timeout_secs = 5
# Worker ceiling; the pool is also capped at workers_per_cpu * CPUs
max_workers = 100
workers_per_cpu = 5
program = "ping"

[http]
# Per-request timeout in seconds
timeout_secs = 3
max_workers = 20
max_redirects = 10

[output]
color = true
ips_file = "live_ips.txt"
subdomains_file = "live_subdomains.txt"
ip_live_marker = "[✔]"
ip_dead_marker = "[✖]"
subdomain_live_marker = "[LIVE]"
subdomain_dead_marker = "[DEAD]"

[range]
# Enumerate every address of A.B.C.D-E.F.G.H instead of the first CIDR block only
full_expansion = false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_toml_matches_defaults() {
        let parsed = parse_config(&get_default_config_toml()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let parsed = parse_config("[http]\ntimeout_secs = 10\n\n[range]\nfull_expansion = true\n").unwrap();

        assert_eq!(parsed.http.timeout_secs, 10);
        assert_eq!(parsed.http.max_workers, 20);
        assert_eq!(parsed.ping, PingSection::default());
        assert_eq!(parsed.range.mode(), RangeMode::Full);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(parse_config("[ping]\ntimeout_secs = \"soon\"\n").is_err());
    }

    #[test]
    fn test_styles_carry_markers() {
        let output = OutputSection {
            ip_live_marker: "+".to_string(),
            color: false,
            ..OutputSection::default()
        };
        let style = output.ip_style();
        assert_eq!(style.live_marker, "+");
        assert_eq!(style.dead_marker, "[✖]");
        assert!(!style.use_color);
        assert_eq!(output.subdomain_style().live_marker, "[LIVE]");
    }

    #[test]
    fn test_sections_convert_to_probe_configs() {
        let config = Config::default();
        assert_eq!(config.ping.pool_config(), PoolConfig::for_ping());
        assert_eq!(config.http.pool_config(), PoolConfig::for_http());
        assert_eq!(config.http.probe_config().timeout, Duration::from_secs(3));
        assert_eq!(config.ping.probe_config().program, "ping");
    }
}
