//! Log sanitization for patient identifiers.
//!
//! Formatted log lines pass through [`SanitizingMakeWriter`] before reaching
//! the sink. The patterns redact:
//! - Calendar dates (birth dates in ISO or day/month/year form)
//! - UUIDs and Argentine DNI numbers
//! - E-mail addresses and phone numbers
//!
//! The application layer never logs birth dates or identifiers on purpose.
//! This is a second line for anything that slips into a formatted message,
//! such as a serde error quoting part of the input.
//!
//! Input beyond `CRCSCREEN_SANITIZE_MAX_BYTES` (default 16 KiB) is truncated.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PII_PATTERNS: OnceLock<Option<PiiPatterns>> = OnceLock::new();

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

const PII_RULES: [(&str, &str); 6] = [
    (
        r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
        "[REDACTED-UUID]",
    ),
    // 1960-04-02, 1960/04/02
    (r"\b(?:19|20)\d{2}[-/](?:0?[1-9]|1[0-2])[-/](?:0?[1-9]|[12]\d|3[01])\b", "[REDACTED-DATE]"),
    // 02/04/1960, 2-4-1960
    (r"\b(?:0?[1-9]|[12]\d|3[01])[-/](?:0?[1-9]|1[0-2])[-/](?:19|20)\d{2}\b", "[REDACTED-DATE]"),
    // DNI: 12.345.678 or 12345678
    (r"\b\d{1,2}\.?\d{3}\.?\d{3}\b", "[REDACTED-DNI]"),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    (r"\+?\b(?:54[-.\s]?)?(?:9[-.\s]?)?\d{2,4}[-.\s]\d{3,4}[-.\s]\d{4}\b", "[REDACTED-PHONE]"),
];

struct PiiPattern {
    regex: Regex,
    replacement: &'static str,
}

struct PiiPatterns {
    set: RegexSet,
    patterns: Vec<PiiPattern>,
}

fn patterns() -> Option<&'static PiiPatterns> {
    PII_PATTERNS
        .get_or_init(|| {
            let set = RegexSet::new(PII_RULES.iter().map(|(p, _)| *p)).ok()?;
            let patterns = PII_RULES
                .iter()
                .map(|(pattern, replacement)| {
                    Regex::new(pattern).map(|regex| PiiPattern {
                        regex,
                        replacement: *replacement,
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .ok()?;
            Some(PiiPatterns { set, patterns })
        })
        .as_ref()
}

fn max_sanitize_bytes() -> usize {
    std::env::var("CRCSCREEN_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Replace identifying patterns in `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = match patterns() {
        Some(p) => {
            let mut out = prefix.to_string();
            for idx in p.set.matches(prefix).into_iter() {
                let pattern = &p.patterns[idx];
                out = pattern
                    .regex
                    .replace_all(&out, pattern.replacement)
                    .into_owned();
            }
            out
        }
        // Patterns are static; failing to compile them drops the line rather
        // than leaking it.
        None => "[REDACTED]".to_string(),
    };

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// A `tracing_subscriber` writer wrapper that sanitizes each formatted log
/// line before it reaches the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
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

        // A single line without a newline must not buffer without bound.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
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
