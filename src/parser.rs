use crate::diff_file::{DiffLine, FileSection, ParsedDiff};

/// Hard cap on retained rows for a single file diff.
pub const MAX_DIFF_LINES: usize = 10_000;

const METADATA_PREFIXES: [&str; 10] = [
    "diff --git",
    "index ",
    "new file",
    "deleted file",
    "similarity",
    "rename",
    "old mode",
    "new mode",
    "--- ",
    "+++ ",
];

/// Running old/new line numbers, threaded through [`classify_line`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounters {
    pub old: u32,
    pub new: u32,
}

impl LineCounters {
    pub fn new(old: u32, new: u32) -> Self {
        Self { old, new }
    }
}

/// Parses the raw unified diff of a single file.
pub fn parse_diff(raw: &str) -> ParsedDiff {
    if raw.contains("Binary files") && raw.contains("differ") {
        return ParsedDiff::Binary;
    }

    let mut lines = Vec::new();
    let mut counters = LineCounters::default();

    for line in raw.split('\n') {
        if lines.len() >= MAX_DIFF_LINES {
            log::debug!("diff truncated at {} lines", MAX_DIFF_LINES);
            lines.push(truncation_marker());
            break;
        }

        let (diff_line, next) = classify_line(line, counters);
        counters = next;
        if let Some(diff_line) = diff_line {
            lines.push(diff_line);
        }
    }

    ParsedDiff::Lines(lines)
}

pub(crate) fn truncation_marker() -> DiffLine {
    DiffLine::hunk_header(format!("… truncated ({}+ lines)", MAX_DIFF_LINES))
}

/// Classifies one raw line, returning the row (if kept) and the updated counters.
pub fn classify_line(line: &str, counters: LineCounters) -> (Option<DiffLine>, LineCounters) {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let LineCounters { old, new } = counters;

    if METADATA_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
        (None, counters)
    } else if line.starts_with("@@") {
        let counters = parse_hunk_header(line, counters);
        (Some(DiffLine::hunk_header(extract_hunk_context(line))), counters)
    } else if let Some(content) = line.strip_prefix('+') {
        (
            Some(DiffLine::added(content, new)),
            LineCounters::new(old, new.saturating_add(1)),
        )
    } else if let Some(content) = line.strip_prefix('-') {
        (
            Some(DiffLine::removed(content, old)),
            LineCounters::new(old.saturating_add(1), new),
        )
    } else if line.starts_with('\\') || line.is_empty() {
        (None, counters)
    } else {
        let content = line.strip_prefix(' ').unwrap_or(line);
        (
            Some(DiffLine::context(content, old, new)),
            LineCounters::new(old.saturating_add(1), new.saturating_add(1)),
        )
    }
}

/// Pulls the human readable part out of a hunk header.
///
/// `@@ -13,6 +13,7 @@ func main() {` gives `func main() {`; without a suffix the
/// trimmed range text is returned instead.
pub fn extract_hunk_context(line: &str) -> String {
    let mut parts = line.splitn(3, "@@");
    let _before = parts.next();
    let ranges = parts.next();

    if let Some(context) = parts.next().map(str::trim)
        && !context.is_empty()
    {
        return context.to_string();
    }

    match ranges {
        Some(ranges) => ranges.trim().to_string(),
        None => line.to_string(),
    }
}

/// Reseeds counters from `@@ -old[,count] +new[,count] @@`.
///
/// Each side is only updated when its start number parses.
pub fn parse_hunk_header(line: &str, counters: LineCounters) -> LineCounters {
    let Some(ranges) = line.splitn(3, "@@").nth(1) else {
        return counters;
    };

    let mut counters = counters;
    for range in ranges.split_whitespace() {
        if let Some(old) = range.strip_prefix('-') {
            if let Some(start) = parse_range_start(old) {
                counters.old = start;
            }
        } else if let Some(new) = range.strip_prefix('+')
            && let Some(start) = parse_range_start(new)
        {
            counters.new = start;
        }
    }
    counters
}

fn parse_range_start(range: &str) -> Option<u32> {
    range.split(',').next().and_then(|s| s.parse().ok())
}

/// Splits a multi-file diff at every `diff --git` header.
pub fn split_files(raw: &str) -> Vec<FileSection> {
    let mut sections = Vec::new();
    let mut current: Option<FileSection> = None;
    let mut preamble = String::new();

    for line in raw.lines() {
        if line.starts_with("diff --git") {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(FileSection {
                path: extract_filename(line),
                raw: format!("{}\n", line),
            });
        } else if let Some(ref mut section) = current {
            section.raw.push_str(line);
            section.raw.push('\n');
        } else {
            preamble.push_str(line);
            preamble.push('\n');
        }
    }

    if let Some(section) = current {
        sections.push(section);
    }

    if !preamble.trim().is_empty() {
        sections.insert(
            0,
            FileSection {
                path: String::new(),
                raw: preamble,
            },
        );
    }

    sections
}

/// Takes the `b/` path out of `diff --git a/foo b/foo`.
pub fn extract_filename(header: &str) -> String {
    header
        .split_once(" b/")
        .map(|(_, path)| path.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff_file::DiffLineKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_hunk_context() {
        let cases = [
            ("@@ -13,6 +13,7 @@ func main() {", "func main() {"),
            ("@@ -13,6 +13,7 @@", "-13,6 +13,7"),
            ("@@ -1,3 +1,4 @@  ", "-1,3 +1,4"),
            ("@@ -100,20 +105,25 @@ type Foo struct {", "type Foo struct {"),
            ("@@@@", ""),
            ("@@ broken", "broken"),
        ];
        for (input, expected) in cases {
            assert_eq!(extract_hunk_context(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_parse_hunk_header() {
        let start = LineCounters::default();
        assert_eq!(
            parse_hunk_header("@@ -10,5 +20,8 @@", start),
            LineCounters::new(10, 20)
        );
        assert_eq!(
            parse_hunk_header("@@ -1 +1 @@", start),
            LineCounters::new(1, 1)
        );
        assert_eq!(
            parse_hunk_header("@@ -100,50 +200,60 @@ func foo()", start),
            LineCounters::new(100, 200)
        );
        assert_eq!(parse_hunk_header("no hunk", start), start);
    }

    #[test]
    fn test_unparseable_range_keeps_counters() {
        let counters = LineCounters::new(7, 9);
        assert_eq!(
            parse_hunk_header("@@ -x,1 +12,3 @@", counters),
            LineCounters::new(7, 12)
        );
    }

    #[test]
    fn test_classify_metadata_is_discarded() {
        let counters = LineCounters::new(1, 1);
        for line in [
            "diff --git a/f.rs b/f.rs",
            "index abc..def 100644",
            "new file mode 100644",
            "deleted file mode 100644",
            "similarity index 90%",
            "rename from a.rs",
            "old mode 100644",
            "new mode 100755",
            "--- a/f.rs",
            "+++ b/f.rs",
            "\\ No newline at end of file",
            "",
        ] {
            let (line_out, next) = classify_line(line, counters);
            assert!(line_out.is_none(), "expected {line:?} to be discarded");
            assert_eq!(next, counters);
        }
    }

    #[test]
    fn test_classify_counts_lines() {
        let counters = LineCounters::new(5, 8);

        let (added, counters) = classify_line("+new", counters);
        assert_eq!(added, Some(DiffLine::added("new", 8)));
        assert_eq!(counters, LineCounters::new(5, 9));

        let (removed, counters) = classify_line("-old", counters);
        assert_eq!(removed, Some(DiffLine::removed("old", 5)));
        assert_eq!(counters, LineCounters::new(6, 9));

        let (context, counters) = classify_line(" same", counters);
        assert_eq!(context, Some(DiffLine::context("same", 6, 9)));
        assert_eq!(counters, LineCounters::new(7, 10));

        let (bare, _) = classify_line("no prefix", counters);
        assert_eq!(bare, Some(DiffLine::context("no prefix", 7, 10)));
    }

    #[test]
    fn test_classify_strips_carriage_return() {
        let (line, _) = classify_line("+crlf\r", LineCounters::new(1, 1));
        assert_eq!(line.map(|l| l.content), Some("crlf".to_string()));
    }

    #[test]
    fn test_parse_simple_hunk() {
        let raw = "diff --git a/f.go b/f.go
index abc..def 100644
--- a/f.go
+++ b/f.go
@@ -1,3 +1,4 @@
 context
-removed
+added1
+added2";
        let parsed = parse_diff(raw);
        assert!(!parsed.is_binary());

        let kinds: Vec<_> = parsed.lines().iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiffLineKind::HunkHeader,
                DiffLineKind::Context,
                DiffLineKind::Removed,
                DiffLineKind::Added,
                DiffLineKind::Added,
            ]
        );
        assert_eq!(parsed.lines()[0].content, "-1,3 +1,4");
        assert_eq!(parsed.lines()[4].new_line_number, Some(3));
    }

    #[test]
    fn test_parse_binary() {
        let parsed = parse_diff("Binary files a/img.png and b/img.png differ");
        assert_eq!(parsed, ParsedDiff::Binary);
    }

    #[test]
    fn test_parse_empty() {
        let parsed = parse_diff("");
        assert!(!parsed.is_binary());
        assert_eq!(parsed.line_count(), 0);
    }

    #[test]
    fn test_parse_multiple_hunks_reseed_numbers() {
        let raw = "@@ -1,3 +1,3 @@
 ctx1
-old1
+new1
@@ -10,3 +12,3 @@
 ctx2";
        let parsed = parse_diff(raw);
        let headers = parsed
            .lines()
            .iter()
            .filter(|l| l.kind == DiffLineKind::HunkHeader)
            .count();
        assert_eq!(headers, 2);

        let last = parsed.lines().last().unwrap();
        assert_eq!(last.old_line_number, Some(10));
        assert_eq!(last.new_line_number, Some(12));
    }

    #[test]
    fn test_truncation() {
        let mut raw = String::from("@@ -1,20000 +1,20000 @@\n");
        for _ in 0..MAX_DIFF_LINES + 10 {
            raw.push_str("+line\n");
        }

        let parsed = parse_diff(&raw);
        assert_eq!(parsed.line_count(), MAX_DIFF_LINES + 1);

        let last = parsed.lines().last().unwrap();
        assert_eq!(last.kind, DiffLineKind::HunkHeader);
        assert!(last.content.contains("truncated"));
        assert!(last.content.contains("10000"));
    }

    #[test]
    fn test_split_files() {
        let raw = "diff --git a/src/a.rs b/src/a.rs
--- a/src/a.rs
+++ b/src/a.rs
@@ -1 +1 @@
-a
+b
diff --git a/src/b.rs b/src/b.rs
@@ -1 +1 @@
-c
+d
";
        let sections = split_files(raw);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].path, "src/a.rs");
        assert_eq!(sections[1].path, "src/b.rs");
        assert!(sections[0].raw.contains("+b"));
        assert!(!sections[0].raw.contains("+d"));
    }

    #[test]
    fn test_split_files_keeps_preamble() {
        let sections = split_files("commit abc\n\ndiff --git a/x b/x\n+y\n");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].path, "");
        assert_eq!(sections[1].path, "x");
    }

    #[test]
    fn test_counters_saturate_at_max_start() {
        let parsed = parse_diff("@@ -4294967295 +4294967295 @@\n+a\n+b\n-c\n-d\n e\n");
        let numbers: Vec<_> = parsed
            .lines()
            .iter()
            .map(|l| (l.old_line_number, l.new_line_number))
            .collect();
        assert_eq!(
            numbers,
            vec![
                (None, None),
                (None, Some(u32::MAX)),
                (None, Some(u32::MAX)),
                (Some(u32::MAX), None),
                (Some(u32::MAX), None),
                (Some(u32::MAX), Some(u32::MAX)),
            ]
        );
    }

    #[test]
    fn test_extract_filename() {
        assert_eq!(extract_filename("diff --git a/foo/bar.rs b/foo/bar.rs"), "foo/bar.rs");
        assert_eq!(extract_filename("diff --git foo foo"), "");
    }
}
