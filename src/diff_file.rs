/// Classification of a retained diff row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffLineKind {
    Context,
    Added,
    Removed,
    HunkHeader,
}

impl DiffLineKind {
    /// The single-cell marker shown in front of the content.
    pub fn indicator(&self) -> char {
        match self {
            DiffLineKind::Context => ' ',
            DiffLineKind::Added => '+',
            DiffLineKind::Removed => '-',
            DiffLineKind::HunkHeader => '@',
        }
    }
}

/// One logical row of a diff.
///
/// The constructors are the only way the numbering invariant is established:
/// removed rows carry only an old number, added rows only a new number, and
/// hunk headers neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    pub content: String,
    pub old_line_number: Option<u32>,
    pub new_line_number: Option<u32>,
}

impl DiffLine {
    pub fn hunk_header(content: impl Into<String>) -> Self {
        Self {
            kind: DiffLineKind::HunkHeader,
            content: content.into(),
            old_line_number: None,
            new_line_number: None,
        }
    }

    pub fn added(content: impl Into<String>, new_line_number: u32) -> Self {
        Self {
            kind: DiffLineKind::Added,
            content: content.into(),
            old_line_number: None,
            new_line_number: Some(new_line_number),
        }
    }

    pub fn removed(content: impl Into<String>, old_line_number: u32) -> Self {
        Self {
            kind: DiffLineKind::Removed,
            content: content.into(),
            old_line_number: Some(old_line_number),
            new_line_number: None,
        }
    }

    pub fn context(content: impl Into<String>, old_line_number: u32, new_line_number: u32) -> Self {
        Self {
            kind: DiffLineKind::Context,
            content: content.into(),
            old_line_number: Some(old_line_number),
            new_line_number: Some(new_line_number),
        }
    }

    pub fn is_hunk_header(&self) -> bool {
        self.kind == DiffLineKind::HunkHeader
    }
}

/// Result of parsing one file's unified diff.
///
/// A binary notice carries no lines at all, so the two cases cannot be mixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDiff {
    Lines(Vec<DiffLine>),
    Binary,
}

impl Default for ParsedDiff {
    fn default() -> Self {
        ParsedDiff::Lines(Vec::new())
    }
}

impl ParsedDiff {
    pub fn is_binary(&self) -> bool {
        matches!(self, ParsedDiff::Binary)
    }

    pub fn lines(&self) -> &[DiffLine] {
        match self {
            ParsedDiff::Lines(lines) => lines,
            ParsedDiff::Binary => &[],
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    /// Treat untracked file content as a diff where every line was added.
    pub fn from_new_file(content: &str) -> Self {
        let mut lines = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if lines.len() >= crate::parser::MAX_DIFF_LINES {
                lines.push(crate::parser::truncation_marker());
                break;
            }
            lines.push(DiffLine::added(line, idx as u32 + 1));
        }
        ParsedDiff::Lines(lines)
    }
}

/// A row of the side-by-side view. At least one side is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine {
    pub left: Option<DiffLine>,
    pub right: Option<DiffLine>,
}

impl SplitLine {
    pub fn both(left: DiffLine, right: DiffLine) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn left_only(left: DiffLine) -> Self {
        Self {
            left: Some(left),
            right: None,
        }
    }

    pub fn right_only(right: DiffLine) -> Self {
        Self {
            left: None,
            right: Some(right),
        }
    }

    /// Builds a row from two optional sides; `None` when both are missing.
    pub fn pair(left: Option<DiffLine>, right: Option<DiffLine>) -> Option<Self> {
        if left.is_none() && right.is_none() {
            None
        } else {
            Some(Self { left, right })
        }
    }

    pub fn is_hunk_header(&self) -> bool {
        self.left.as_ref().is_some_and(DiffLine::is_hunk_header)
    }
}

/// One file's slice of a multi-file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSection {
    pub path: String,
    pub raw: String,
}
