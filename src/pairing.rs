use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffOp, capture_diff_slices};

use crate::diff_file::{DiffLine, DiffLineKind, SplitLine};

/// How a run of deletions is lined up against the insertions that follow it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PairingStrategy {
    /// The n-th deletion faces the n-th insertion, no content matching.
    #[default]
    Positional,
    /// Lines equal up to surrounding whitespace face each other; the rest
    /// falls back to positional pairing between those anchors.
    Similarity,
}

/// Positional side-by-side pairing.
pub fn pair_lines(lines: &[DiffLine]) -> Vec<SplitLine> {
    pair_lines_with(lines, PairingStrategy::Positional)
}

pub fn pair_lines_with(lines: &[DiffLine], strategy: PairingStrategy) -> Vec<SplitLine> {
    let mut pairs = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        match line.kind {
            DiffLineKind::HunkHeader => {
                pairs.push(SplitLine::left_only(line.clone()));
                i += 1;
            }
            DiffLineKind::Context => {
                pairs.push(SplitLine::both(line.clone(), line.clone()));
                i += 1;
            }
            DiffLineKind::Added => {
                pairs.push(SplitLine::right_only(line.clone()));
                i += 1;
            }
            DiffLineKind::Removed => {
                let removed_end = run_end(lines, i, DiffLineKind::Removed);
                let added_end = run_end(lines, removed_end, DiffLineKind::Added);
                let removed = &lines[i..removed_end];
                let added = &lines[removed_end..added_end];

                match strategy {
                    PairingStrategy::Positional => pair_positional(removed, added, &mut pairs),
                    PairingStrategy::Similarity => pair_by_similarity(removed, added, &mut pairs),
                }
                i = added_end;
            }
        }
    }

    pairs
}

fn run_end(lines: &[DiffLine], start: usize, kind: DiffLineKind) -> usize {
    lines[start..]
        .iter()
        .position(|l| l.kind != kind)
        .map_or(lines.len(), |offset| start + offset)
}

fn pair_positional(removed: &[DiffLine], added: &[DiffLine], pairs: &mut Vec<SplitLine>) {
    let rows = removed.len().max(added.len());
    pairs.extend(
        (0..rows).filter_map(|j| SplitLine::pair(removed.get(j).cloned(), added.get(j).cloned())),
    );
}

fn pair_by_similarity(removed: &[DiffLine], added: &[DiffLine], pairs: &mut Vec<SplitLine>) {
    let old_keys: Vec<&str> = removed.iter().map(|l| l.content.trim()).collect();
    let new_keys: Vec<&str> = added.iter().map(|l| l.content.trim()).collect();

    let mut pending_removed: Vec<DiffLine> = Vec::new();
    let mut pending_added: Vec<DiffLine> = Vec::new();

    for op in capture_diff_slices(Algorithm::Patience, &old_keys, &new_keys) {
        match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => {
                pair_positional(&pending_removed, &pending_added, pairs);
                pending_removed.clear();
                pending_added.clear();
                for k in 0..len {
                    pairs.push(SplitLine::both(
                        removed[old_index + k].clone(),
                        added[new_index + k].clone(),
                    ));
                }
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => pending_removed.extend_from_slice(&removed[old_index..old_index + old_len]),
            DiffOp::Insert {
                new_index, new_len, ..
            } => pending_added.extend_from_slice(&added[new_index..new_index + new_len]),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                pending_removed.extend_from_slice(&removed[old_index..old_index + old_len]);
                pending_added.extend_from_slice(&added[new_index..new_index + new_len]);
            }
        }
    }

    pair_positional(&pending_removed, &pending_added, pairs);
}
