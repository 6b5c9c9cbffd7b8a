// src/exec/version.rs

//! Minimum-version gate.
//!
//! Versions are compared chunk by chunk: runs of digits compare numerically,
//! runs of letters compare as text, and any other character only separates
//! chunks. So `"10.2"` sorts after `"9.9"` and `"1.0"` equals `"1.0.0"`.
//! The shorter side is padded with zero chunks, and a text chunk sorts after
//! any number chunk, which keeps the ordering total over mixed inputs.
//!
//! Pre-release qualifiers get no special meaning: `"2.0.0-rc1"` sorts after
//! `"2.0.0"` because `rc` outranks the padded zero.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::errors::{CardanoError, Result};

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"v?(\d+(?:\.\d+)+(?:-[0-9A-Za-z.]+)?)").expect("version pattern compiles")
});

const PAD: Chunk<'static> = Chunk::Number("0");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Number(&'a str),
    Text(&'a str),
}

fn chunks(version: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start: Option<(usize, bool)> = None;

    for (idx, ch) in version.char_indices() {
        let kind = if ch.is_ascii_digit() {
            Some(true)
        } else if ch.is_alphabetic() {
            Some(false)
        } else {
            None
        };

        match (start, kind) {
            (Some((_, numeric)), Some(k)) if numeric == k => {}
            (current, next) => {
                if let Some((from, numeric)) = current {
                    out.push(make_chunk(&version[from..idx], numeric));
                }
                start = next.map(|numeric| (idx, numeric));
            }
        }
    }
    if let Some((from, numeric)) = start {
        out.push(make_chunk(&version[from..], numeric));
    }
    out
}

fn make_chunk(text: &str, numeric: bool) -> Chunk<'_> {
    if numeric {
        let trimmed = text.trim_start_matches('0');
        Chunk::Number(if trimmed.is_empty() { "0" } else { trimmed })
    } else {
        Chunk::Text(text)
    }
}

fn compare_chunks(a: Chunk<'_>, b: Chunk<'_>) -> Ordering {
    match (a, b) {
        // Leading zeros are already stripped, so longer means larger.
        (Chunk::Number(x), Chunk::Number(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
        (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
    }
}

/// Numeric-aware ordering of two version strings.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);
    let len = left.len().max(right.len());

    (0..len)
        .map(|idx| {
            let x = left.get(idx).copied().unwrap_or(PAD);
            let y = right.get(idx).copied().unwrap_or(PAD);
            compare_chunks(x, y)
        })
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

/// Fail with `UnsupportedVersion` when `current` is older than `minimum`.
///
/// The gate always fails closed; callers decide whether to carry on.
pub fn check(binary: &str, current: &str, minimum: &str) -> Result<()> {
    if compare_versions(current, minimum) == Ordering::Less {
        warn!(
            binary,
            current,
            minimum,
            "binary version is older than the minimum supported version"
        );
        return Err(CardanoError::UnsupportedVersion {
            binary: binary.to_string(),
            current: current.to_string(),
            minimum: minimum.to_string(),
        });
    }
    Ok(())
}

/// Pull the first dotted version number out of `--version` style output.
///
/// `"cardano-cli 8.20.3 - linux-x86_64 - ghc-8.10"` yields `"8.20.3"`.
pub fn extract_version(output: &str) -> Option<String> {
    VERSION_PATTERN
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract a version from raw output and gate it; returns the version.
///
/// Output with no recognisable version fails closed.
pub fn check_reported(binary: &str, raw_output: &str, minimum: &str) -> Result<String> {
    let current = match extract_version(raw_output) {
        Some(version) => version,
        None => {
            let first_line = raw_output.lines().next().unwrap_or_default().trim();
            warn!(binary, output = first_line, "could not parse a version from output");
            return Err(CardanoError::UnsupportedVersion {
                binary: binary.to_string(),
                current: first_line.to_string(),
                minimum: minimum.to_string(),
            });
        }
    };
    check(binary, &current, minimum)?;
    Ok(current)
}
