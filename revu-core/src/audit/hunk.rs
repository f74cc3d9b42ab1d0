//! Unified diff hunk header parsing

/// Old-side range of a unified diff hunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hunk {
    /// First line of the range in the old file
    pub start: u64,
    /// Number of lines in the range
    pub count: u64,
}

impl Hunk {
    /// Whether `line` falls inside this hunk.
    ///
    /// The upper bound is `start + count`, one past the last line the hunk
    /// actually replaces. A comment on the line directly after a change is
    /// therefore reported as overlapping.
    pub fn overlaps(&self, line: u64) -> bool {
        self.start <= line && line <= self.start.saturating_add(self.count)
    }
}

/// Parse every `@@ -start[,count] +... @@` header in a unified diff.
///
/// A missing count means a single-line hunk. Lines that do not look like hunk
/// headers are ignored, so malformed input yields fewer hunks rather than an
/// error.
pub fn parse_hunks(diff: &str) -> Vec<Hunk> {
    diff.lines().filter_map(parse_header).collect()
}

fn parse_header(line: &str) -> Option<Hunk> {
    let rest = line.strip_prefix("@@ -")?;
    let (range, tail) = rest.split_once(' ')?;
    if !tail.starts_with('+') {
        return None;
    }

    let (start, count) = match range.split_once(',') {
        Some((start, count)) => (start, Some(count)),
        None => (range, None),
    };

    let start = parse_digits(start)?;
    let count = match count {
        Some(count) => parse_digits(count)?,
        None => 1,
    };

    Some(Hunk { start, count })
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
