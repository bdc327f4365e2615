use std::{fmt, str::FromStr};

use crate::ClientError;

/// Parsed `Content-Range` response header.
///
/// The server reports the slice it returned as `items <start>-<end>/<total>`
/// (both bounds inclusive) and an empty slice as `items */<total>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentRange {
    Items { start: u64, end: u64, total: u64 },
    Exhausted { total: u64 },
}

impl ContentRange {
    /// Cursor for the page after this one, or `None` when the stream is done.
    #[must_use]
    pub fn next_skip(self) -> Option<u64> {
        match self {
            ContentRange::Items { end, total, .. } => {
                let next = end.saturating_add(1);
                (next < total).then_some(next)
            }
            ContentRange::Exhausted { .. } => None,
        }
    }

    #[must_use]
    pub fn total(self) -> u64 {
        match self {
            ContentRange::Items { total, .. } | ContentRange::Exhausted { total } => total,
        }
    }
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentRange::Items { start, end, total } => write!(f, "items {start}-{end}/{total}"),
            ContentRange::Exhausted { total } => write!(f, "items */{total}"),
        }
    }
}

impl FromStr for ContentRange {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ClientError::MalformedContentRange(s.to_string());

        let rest = s.trim().strip_prefix("items ").ok_or_else(malformed)?;
        let (range, total) = rest.split_once('/').ok_or_else(malformed)?;
        let total: u64 = total.parse().map_err(|_| malformed())?;

        if range == "*" {
            return Ok(ContentRange::Exhausted { total });
        }

        let (start, end) = range.split_once('-').ok_or_else(malformed)?;
        let start: u64 = start.parse().map_err(|_| malformed())?;
        let end: u64 = end.parse().map_err(|_| malformed())?;
        if start > end {
            return Err(malformed());
        }

        Ok(ContentRange::Items { start, end, total })
    }
}
