// src/extractors/release.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

// --- Constants ---
const EOL: &str = "\n";

// --- Regex Patterns (Lazy Static) ---
// A version heading is a run of markers followed by a bracketed token,
// e.g. "## [1.2.3]" or "## [Unreleased]". Parsed once per line; version
// selectors are then compared against the captured token by equality, so a
// selector containing regex metacharacters can never be misread as a pattern.
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(#+) \[([^\]]+)\]").expect("Failed to compile HEADING_RE")
});

// --- Data Structures ---
/// A parsed version heading line: marker depth plus the bracketed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub depth: usize,
    pub token: String,
}

impl Heading {
    /// Parses a line into a heading, or None for ordinary content lines.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = HEADING_RE.captures(line)?;
        Some(Self {
            depth: caps[1].len(),
            token: caps[2].to_string(),
        })
    }

    /// True for numbered release headings like "[1.2.3]".
    pub fn is_numbered(&self) -> bool {
        self.token.starts_with(|c: char| c.is_ascii_digit())
    }

    /// True for the "[Unreleased]" heading.
    pub fn is_unreleased(&self) -> bool {
        self.token == "Unreleased"
    }

    /// Exact token comparison against a version selector.
    pub fn matches(&self, version: &str) -> bool {
        self.token == version
    }
}

/// Bound for range extraction. Exactly one applies per call; the caller
/// resolves precedence between the two selectors.
#[derive(Debug, Clone)]
pub enum RangeBound {
    /// Exclusive upper bound: stop the moment this version's heading is seen.
    Last(String),
    /// Inclusive lower bound: collect through this version's whole section.
    Earliest(String),
}

// --- Scan States ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SingleScan {
    Searching,
    InsideRelease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeScan {
    BeforeReleases,
    Collecting,
    EarliestFound,
}

// --- Extraction Functions ---

/// Extracts the body of the first release section in the document: the lines
/// after its heading, up to (excluding) the next release heading. The heading
/// that opens the section is not part of the result. With `prerelease` set,
/// an "[Unreleased]" heading also counts as a section start.
pub async fn extract_release_notes<R>(reader: R, prerelease: bool) -> Result<String, ExtractError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut collected: Vec<String> = Vec::new();
    let mut state = SingleScan::Searching;

    while let Some(line) = lines.next_line().await? {
        let heading = Heading::parse(&line);
        let start_of_release = heading
            .as_ref()
            .is_some_and(|h| h.is_numbered() || (prerelease && h.is_unreleased()));

        match state {
            SingleScan::Searching => {
                if start_of_release {
                    tracing::debug!("version found: '{}'", line);
                    state = SingleScan::InsideRelease;
                } else {
                    tracing::trace!("skip line: '{}'", line);
                }
            }
            SingleScan::InsideRelease => {
                if start_of_release {
                    tracing::debug!("next version found: '{}'", line);
                    break;
                }
                tracing::trace!("add line: '{}'", line);
                collected.push(line);
            }
        }
    }

    Ok(join_and_trim(collected))
}

/// Extracts a run of consecutive release sections, headings included.
/// Everything before the first numbered heading is discarded; from there the
/// scan collects until the bound terminates it (see [`RangeBound`]).
pub async fn extract_release_notes_range<R>(
    reader: R,
    bound: &RangeBound,
) -> Result<String, ExtractError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut collected: Vec<String> = Vec::new();
    let mut state = RangeScan::BeforeReleases;

    while let Some(line) = lines.next_line().await? {
        let heading = Heading::parse(&line);
        let numbered = heading.as_ref().is_some_and(Heading::is_numbered);

        if state == RangeScan::BeforeReleases {
            if !numbered {
                tracing::trace!("skip line: '{}'", line);
                continue;
            }
            state = RangeScan::Collecting;
        }

        match bound {
            RangeBound::Last(version) => {
                if heading.as_ref().is_some_and(|h| h.matches(version)) {
                    tracing::debug!("last release found, exiting: '{}'", line);
                    break;
                }
                tracing::trace!("add line: '{}'", line);
                collected.push(line);
            }
            RangeBound::Earliest(version) => {
                if heading.as_ref().is_some_and(|h| h.matches(version)) {
                    tracing::debug!("earliest release found, exiting after this block: '{}'", line);
                    state = RangeScan::EarliestFound;
                    collected.push(line);
                } else if numbered && state == RangeScan::EarliestFound {
                    tracing::debug!("next release found: '{}'", line);
                    break;
                } else {
                    tracing::trace!("add line: '{}'", line);
                    collected.push(line);
                }
            }
        }
    }

    Ok(join_and_trim(collected))
}

// --- Helpers ---

/// Strips an optional leading 'v' so "v1.2.3" selects the "[1.2.3]" heading.
pub fn normalize_version_token(token: &str) -> &str {
    token.strip_prefix('v').unwrap_or(token)
}

/// Joins collected lines and trims boundary blank lines. Zero collected
/// lines join to the empty string.
fn join_and_trim(collected: Vec<String>) -> String {
    let joined = collected.join(EOL);
    trim_empty_lines_bottom(trim_empty_lines_top(&joined)).to_string()
}

/// Removes the maximal run of line terminators from the start of the text.
pub fn trim_empty_lines_top(text: &str) -> &str {
    text.trim_start_matches('\n')
}

/// Removes the maximal run of line terminators from the end of the text.
pub fn trim_empty_lines_bottom(text: &str) -> &str {
    text.trim_end_matches('\n')
}
