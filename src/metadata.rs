//! metadata
//!
//! Extraction of packaging metadata embedded in a val's readme.
//!
//! # Format
//!
//! A readme may carry a fenced JSON block whose top-level object has a
//! `package` key:
//!
//! ````markdown
//! ```json
//! { "package": { "name": "my-scraper", "version": "0.2.0" } }
//! ```
//! ````
//!
//! The first such block in document order wins. Blocks that are not tagged
//! `json`, that fail to parse, or that lack the marker key are skipped. No
//! qualifying block yields an empty [`PackageMetadata`], which is not an error.
//!
//! # Scanning
//!
//! [`FenceScanner`] is a line-oriented state machine with two states, outside
//! a block and inside one. A block closes only on a fence of the same
//! character that is at least as long as the opener. A four-backtick block
//! can therefore contain three-backtick lines, and fences inside non-JSON
//! blocks are never mistaken for JSON openers. An unterminated block at end of input is dropped.
//!
//! # Example
//!
//! ```
//! use valexport::metadata::extract_package_metadata;
//!
//! let readme = "# Scraper\n\n```json\n{\"package\": {\"name\": \"foo\"}}\n```\n";
//! let meta = extract_package_metadata(readme);
//! assert_eq!(meta.get("package").unwrap()["name"], "foo");
//!
//! assert!(extract_package_metadata("no blocks here").is_empty());
//! ```

use serde_json::{Map, Value};

/// Top-level key that identifies a JSON block as packaging metadata.
pub const MARKER_KEY: &str = "package";

/// Language tag a fence must carry to be considered.
const JSON_TAG: &str = "json";

/// Minimum run of fence characters that opens a block.
const MIN_FENCE_LEN: usize = 3;

/// Packaging metadata parsed from a readme.
///
/// Either empty, or a JSON object containing [`MARKER_KEY`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageMetadata(Map<String, Value>);

impl PackageMetadata {
    /// True if no block qualified.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the underlying object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// A fenced code block found by [`FenceScanner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedBlock<'a> {
    /// First word of the info string, if any.
    pub lang: Option<&'a str>,
    /// Lines between the fences, joined with `\n`.
    pub body: String,
}

impl FencedBlock<'_> {
    /// True if the block is tagged `json` (case-insensitive).
    pub fn is_json(&self) -> bool {
        self.lang
            .is_some_and(|lang| lang.eq_ignore_ascii_case(JSON_TAG))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    ch: char,
    len: usize,
}

impl Fence {
    /// Parse an opening fence, returning it and the info string.
    fn open(line: &str) -> Option<(Self, &str)> {
        let trimmed = line.trim_start();
        let ch = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = trimmed.chars().take_while(|c| *c == ch).count();
        if len < MIN_FENCE_LEN {
            return None;
        }
        // fence chars are ASCII, so len is also a byte offset
        let info = trimmed[len..].trim();
        if ch == '`' && info.contains('`') {
            return None;
        }
        Some((Self { ch, len }, info))
    }

    /// True if `line` closes a block opened by this fence.
    fn closes(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.len() >= self.len && trimmed.chars().all(|c| c == self.ch)
    }
}

enum State<'a> {
    Outside,
    Inside {
        fence: Fence,
        lang: Option<&'a str>,
        body: Vec<&'a str>,
    },
}

/// Iterator over the fenced code blocks of a text, in document order.
pub struct FenceScanner<'a> {
    lines: std::str::Lines<'a>,
    state: State<'a>,
}

impl<'a> FenceScanner<'a> {
    /// Start scanning `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            state: State::Outside,
        }
    }
}

impl<'a> Iterator for FenceScanner<'a> {
    type Item = FencedBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let closed = match &mut self.state {
                State::Outside => {
                    if let Some((fence, info)) = Fence::open(line) {
                        self.state = State::Inside {
                            fence,
                            lang: info.split_whitespace().next(),
                            body: Vec::new(),
                        };
                    }
                    false
                }
                State::Inside { fence, body, .. } => {
                    if fence.closes(line) {
                        true
                    } else {
                        body.push(line);
                        false
                    }
                }
            };

            if closed {
                if let State::Inside { lang, body, .. } =
                    std::mem::replace(&mut self.state, State::Outside)
                {
                    return Some(FencedBlock {
                        lang,
                        body: body.join("\n"),
                    });
                }
            }
        }
        None
    }
}

/// Extract the first JSON block carrying [`MARKER_KEY`] from `readme`.
///
/// Pure function of its input. Never fails: malformed candidates are skipped
/// and no match gives an empty value.
pub fn extract_package_metadata(readme: &str) -> PackageMetadata {
    FenceScanner::new(readme)
        .filter(|block| block.is_json())
        .find_map(|block| match serde_json::from_str::<Value>(&block.body) {
            Ok(Value::Object(map)) if map.contains_key(MARKER_KEY) => Some(map),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unparsable json block");
                None
            }
        })
        .map(PackageMetadata)
        .unwrap_or_default()
}
