//! # Target Loader
//!
//! Resolves a user supplied specification into the list of targets to probe.
//!
//! Resolution order, first match wins:
//! * An existing file: one target per non-empty, trimmed line.
//! * A last-octet range (e.g. `10.0.0.5-20`).
//! * A full range (e.g. `10.0.0.5-10.0.1.20`).
//! * Anything else is a single literal target.

use ipnet::{Ipv4AddrRange, Ipv4Subnets};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use thiserror::Error;

lazy_static! {
    static ref SHORT_RANGE: Regex =
        Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)\.([0-9]+)-([0-9]+)$").expect("valid short range pattern");
    static ref FULL_RANGE: Regex =
        Regex::new(r"^([0-9]+(?:\.[0-9]+){3})-([0-9]+(?:\.[0-9]+){3})$").expect("valid full range pattern");
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read targets from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid specification: {0}")]
    InvalidSpecification(String),
}

/// How a full `A.B.C.D-E.F.G.H` range is turned into targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeMode {
    /// Usable hosts of the first CIDR block covering the range.
    #[default]
    FirstBlock,
    /// Every address from start to end inclusive.
    Full,
}

pub fn load_targets(spec: &str, mode: RangeMode) -> Result<Vec<String>, LoadError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(LoadError::InvalidSpecification(
            "empty specification".to_string(),
        ));
    }

    let path = Path::new(spec);
    if path.is_file() {
        return read_target_file(path);
    }

    if let Some(targets) = parse_ip_range(spec, mode)? {
        return Ok(targets);
    }

    Ok(vec![spec.to_string()])
}

/// Reads one target per line. Lines are trimmed and blank lines dropped;
/// nothing is deduplicated or validated.
pub fn read_target_file(path: &Path) -> Result<Vec<String>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Expands `A.B.C.start-end` or `A.B.C.D-E.F.G.H`.
///
/// Returns `Ok(None)` when the input has neither shape, and an error when it
/// has one of the shapes but describes an impossible range.
pub fn parse_ip_range(s: &str, mode: RangeMode) -> Result<Option<Vec<String>>, LoadError> {
    if let Some(caps) = SHORT_RANGE.captures(s) {
        let prefix = [
            parse_octet(&caps[1], s)?,
            parse_octet(&caps[2], s)?,
            parse_octet(&caps[3], s)?,
        ];
        let start = parse_octet(&caps[4], s)?;
        let end = parse_octet(&caps[5], s)?;

        if end < start {
            return Err(invalid(format!("range end {end} is below start {start} in '{s}'")));
        }

        let [a, b, c] = prefix;
        let targets = (start..=end)
            .map(|last| Ipv4Addr::new(a, b, c, last).to_string())
            .collect();
        return Ok(Some(targets));
    }

    if let Some(caps) = FULL_RANGE.captures(s) {
        let start_addr = parse_addr(&caps[1], s)?;
        let end_addr = parse_addr(&caps[2], s)?;

        if end_addr < start_addr {
            return Err(invalid(format!("range end {end_addr} is below start {start_addr}")));
        }

        let targets = match mode {
            // Ipv4Subnets walks the minimal CIDR cover in address order
            RangeMode::FirstBlock => match Ipv4Subnets::new(start_addr, end_addr, 0).next() {
                Some(block) => {
                    tracing::debug!(%block, "expanding first block of range {}", s);
                    block.hosts().map(|ip| ip.to_string()).collect()
                }
                None => Vec::new(),
            },
            RangeMode::Full => Ipv4AddrRange::new(start_addr, end_addr)
                .map(|ip| ip.to_string())
                .collect(),
        };
        return Ok(Some(targets));
    }

    Ok(None)
}

fn parse_octet(octet: &str, original: &str) -> Result<u8, LoadError> {
    octet
        .parse::<u8>()
        .map_err(|_| invalid(format!("octet '{octet}' out of range in '{original}'")))
}

fn parse_addr(addr: &str, original: &str) -> Result<Ipv4Addr, LoadError> {
    addr.parse::<Ipv4Addr>()
        .map_err(|e| invalid(format!("invalid address '{addr}' in '{original}': {e}")))
}

fn invalid(msg: String) -> LoadError {
    LoadError::InvalidSpecification(msg)
}
