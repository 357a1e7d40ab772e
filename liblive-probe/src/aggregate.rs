use crate::types::ProbeResult;
use console::{style, Emoji};
use futures::{pin_mut, Stream, StreamExt};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write to console: {0}")]
    Console(#[from] io::Error),
    #[error("Failed to save live targets to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Ip,
    Subdomain,
}

/// How result lines are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStyle {
    pub kind: ReportKind,
    pub live_marker: String,
    pub dead_marker: String,
    pub use_color: bool,
}

impl ReportStyle {
    pub fn ip() -> Self {
        Self {
            kind: ReportKind::Ip,
            live_marker: "[✔]".to_string(),
            dead_marker: "[✖]".to_string(),
            use_color: true,
        }
    }

    pub fn subdomain() -> Self {
        Self {
            kind: ReportKind::Subdomain,
            live_marker: "[LIVE]".to_string(),
            dead_marker: "[DEAD]".to_string(),
            use_color: true,
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    pub fn result_line(&self, result: &ProbeResult) -> String {
        let line = match (self.kind, result.alive) {
            (ReportKind::Ip, true) => format!("{} {} is live", self.live_marker, result.target),
            (ReportKind::Ip, false) => {
                format!("{} {} is not responding", self.dead_marker, result.target)
            }
            (ReportKind::Subdomain, true) => match &result.detail {
                Some(url) => format!("{}  {} → {}", self.live_marker, result.target, url),
                None => format!("{}  {}", self.live_marker, result.target),
            },
            (ReportKind::Subdomain, false) => format!("{}  {}", self.dead_marker, result.target),
        };

        if !self.use_color {
            return line;
        }
        if result.alive {
            style(line).green().force_styling(true).to_string()
        } else {
            style(line).red().force_styling(true).to_string()
        }
    }

    fn noun(&self) -> &'static str {
        match self.kind {
            ReportKind::Ip => "IP(s)",
            ReportKind::Subdomain => "subdomain(s)",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub live: Vec<String>,
    pub dead: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.live.len() + self.dead
    }
}

/// Owns the live set and the console while results arrive.
pub struct Aggregator<W> {
    style: ReportStyle,
    out: W,
    live: Vec<String>,
    dead: usize,
    started: Instant,
}

impl<W: Write> Aggregator<W> {
    pub fn new(style: ReportStyle, out: W) -> Self {
        Self {
            style,
            out,
            live: Vec::new(),
            dead: 0,
            started: Instant::now(),
        }
    }

    /// Counts the result, then prints its line.
    pub fn record(&mut self, result: ProbeResult) -> Result<(), OutputError> {
        let line = self.style.result_line(&result);
        if result.alive {
            self.live.push(result.target);
        } else {
            self.dead += 1;
        }
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    /// Writes the live targets collected so far, without the summary.
    pub fn save(&self, output: &Path) -> Result<bool, OutputError> {
        write_live_set(output, &self.live)
    }

    pub async fn consume<S>(&mut self, results: S) -> Result<(), OutputError>
    where
        S: Stream<Item = ProbeResult>,
    {
        pin_mut!(results);
        while let Some(result) = results.next().await {
            self.record(result)?;
        }
        Ok(())
    }

    /// Saves the live set to `output` (only when non-empty) and prints the summary.
    pub fn finish(mut self, output: &Path) -> Result<RunSummary, OutputError> {
        let summary = RunSummary {
            live: std::mem::take(&mut self.live),
            dead: self.dead,
            elapsed: self.started.elapsed(),
        };
        let noun = self.style.noun();

        writeln!(self.out)?;
        if summary.live.is_empty() {
            writeln!(
                self.out,
                "{}No live {} found ({} checked in {:.2}s).",
                Emoji("⚠️  ", "[!] "),
                noun,
                summary.total(),
                summary.elapsed.as_secs_f64()
            )?;
            self.out.flush()?;
            return Ok(summary);
        }

        write_live_set(output, &summary.live)?;
        writeln!(
            self.out,
            "{}Saved {} live {} of {} to {} in {:.2}s",
            Emoji("✅ ", "[✔] "),
            summary.live.len(),
            noun,
            summary.total(),
            output.display(),
            summary.elapsed.as_secs_f64()
        )?;
        self.out.flush()?;

        Ok(summary)
    }
}

/// Overwrites `path` with one target per line. Nothing is written for an
/// empty set; returns whether the file was written.
pub fn write_live_set(path: &Path, live: &[String]) -> Result<bool, OutputError> {
    if live.is_empty() {
        return Ok(false);
    }

    let mut content = live.join("\n");
    content.push('\n');
    std::fs::write(path, content).map_err(|source| OutputError::Save {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}
