//! Log sanitization for patient identifiers.
//!
//! The engine itself never logs identifying data, but requests arrive from
//! clinical systems and error messages can echo them back. Everything written
//! by the log subscriber goes through [`SanitizingMakeWriter`], which redacts:
//! - UUIDs (record and encounter ids)
//! - NHS numbers and medical record numbers (MRNs)
//! - Dates of birth
//! - Email addresses and UK phone numbers
//! - UK postcodes
//!
//! This is a fallback: keep identifiers out of log calls in the first place.
//!
//! Input per call is capped (`PRIME_SANITIZE_MAX_BYTES`, default 16 KiB) so a
//! single huge line cannot stall the logger.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

pub const SANITIZE_MAX_BYTES_ENV: &str = "PRIME_SANITIZE_MAX_BYTES";

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

static PHI_PATTERNS: OnceLock<PhiPatterns> = OnceLock::new();

struct PhiPattern {
    regex: Regex,
    replacement: &'static str,
}

struct PhiPatterns {
    set: RegexSet,
    patterns: Vec<PhiPattern>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var(SANITIZE_MAX_BYTES_ENV)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn get_patterns() -> &'static PhiPatterns {
    PHI_PATTERNS.get_or_init(|| {
        // Order matters: identifiers with explicit labels go before the bare
        // digit patterns that would otherwise swallow them.
        let rules: Vec<(&'static str, &'static str)> = vec![
            (
                r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
                "[REDACTED-UUID]",
            ),
            (r"(?i)\bMRN[:#\s]*[A-Z]?\d{6,10}\b", "[REDACTED-MRN]"),
            (
                r"(?i)\b(?:dob|date of birth|born)\b[:\s]*\d{1,4}[/.-]\d{1,2}[/.-]\d{1,4}\b",
                "[REDACTED-DOB]",
            ),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (r"(?:\+44\s?7\d{3}|\b07\d{3})\s?\d{3}\s?\d{3}\b", "[REDACTED-PHONE]"),
            (r"\b\d{3}[ -]?\d{3}[ -]?\d{4}\b", "[REDACTED-NHS]"),
            (
                r"\b[A-Z]{1,2}\d[A-Z\d]?\s\d[A-Z]{2}\b",
                "[REDACTED-POSTCODE]",
            ),
        ];

        let set = RegexSet::new(rules.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let patterns = rules
            .into_iter()
            .map(|(pattern, replacement)| PhiPattern {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        PhiPatterns { set, patterns }
    })
}

/// Replace patient identifiers in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let patterns = get_patterns();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let pattern = &patterns.patterns[idx];
        result = pattern
            .regex
            .replace_all(&result, pattern.replacement)
            .to_string();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// A `tracing_subscriber` writer wrapper that sanitizes each formatted log
/// line before it reaches the underlying sink.
#[derive(Debug)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M> Clone for SanitizingMakeWriter<M>
where
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line = self.buffer.drain(..=pos).collect::<Vec<u8>>();
            let sanitized = sanitize(&String::from_utf8_lossy(&line));
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A line with no newline must not buffer without bound.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.inner.write_all(b"\n")?;
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;

        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }

        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}
