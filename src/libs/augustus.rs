//! Protein extraction from AUGUSTUS GFF3 output.
//!
//! AUGUSTUS interleaves GFF3 feature records with loosely structured comment
//! blocks. The protein translation of each transcript is embedded in a
//! bracketed comment that may span several lines:
//!
//! ```text
//! ctg1  AUGUSTUS  transcript  1169  2621  0.94  +  .  ID=ctg1.g1.t1;Parent=ctg1.g1
//! # protein sequence = [MSEKQRST
//! # UVWY]
//! ```

use anyhow::bail;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_TRANSCRIPT: Regex = Regex::new(r"\ttranscript\t.+ID=([^;]+)").unwrap();
}

const SEQ_INTRODUCER: &str = "# protein sequence = [";
const COMMENT_MARKER: &str = "# ";

/// Non-informational comment lines emitted by AUGUSTUS/BRAKER1. They carry
/// neither an identifier nor sequence data and must not touch parser state.
const NOISE_PATTERNS: [&str; 10] = [
    "# Evidence for and against this transcript:",
    "# % of transcript supported by hints",
    "# CDS exons",
    "# CDS introns",
    "# 5'UTR exons and introns:",
    "# 3'UTR exons and introns:",
    "# hint groups fully obeyed:",
    "# incompatible hint groups:",
    "#      E:",
    "#     RM:",
];

fn is_noise(line: &str) -> bool {
    NOISE_PATTERNS.iter().any(|pat| line.contains(pat))
}

/// Inside or outside a bracketed protein-sequence block. The state may only
/// be `InSequence` after a `[` introducer and before its matching `]`; a `]`
/// seen while `Idle` is itself the end of a single-line sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeqState {
    Idle,
    InSequence,
}

// Strip the introducer and the comment marker, leaving bare residues.
fn seq_chunk(line: &str) -> &str {
    let chunk = line.strip_prefix(SEQ_INTRODUCER).unwrap_or(line);
    chunk.strip_prefix(COMMENT_MARKER).unwrap_or(chunk)
}

/// Reconstructs one protein sequence per transcript identifier.
///
/// Per line, checks run in a fixed order: noise filter, transcript-id
/// capture, sequence start, sequence end, continuation. Start and end are
/// evaluated independently since a single-line sequence satisfies both; at
/// most one append happens per line.
///
/// Sequence data encountered before any `transcript` feature line is
/// malformed input and yields an error.
pub fn extract_proteins(lines: &[String]) -> anyhow::Result<IndexMap<String, String>> {
    let mut seq_of: IndexMap<String, String> = IndexMap::new();
    let mut cur_id: Option<String> = None;
    let mut state = SeqState::Idle;

    for (i, line) in lines.iter().enumerate() {
        if is_noise(line) {
            continue;
        }

        if let Some(caps) = RE_TRANSCRIPT.captures(line) {
            cur_id = Some(caps[1].to_string());
        }

        let is_start = line.starts_with(SEQ_INTRODUCER);
        let is_end = line.ends_with(']');

        let chunk = if is_start || is_end {
            let chunk = seq_chunk(line);
            if is_end {
                state = SeqState::Idle;
                Some(chunk.strip_suffix(']').unwrap_or(chunk))
            } else {
                state = SeqState::InSequence;
                Some(chunk)
            }
        } else if state == SeqState::InSequence {
            Some(seq_chunk(line))
        } else {
            None
        };

        if let Some(chunk) = chunk {
            let Some(id) = &cur_id else {
                bail!(
                    "protein sequence data at line {} precedes any transcript record",
                    i + 1
                );
            };
            seq_of.entry(id.to_string()).or_default().push_str(chunk);
        }
    }

    Ok(seq_of)
}
