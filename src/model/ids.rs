//! Identifier minting for graph entities.
//!
//! Every element gets an IRI built from a user-supplied prefix, a fixed
//! category segment and a suffix. Suffixes for per-line entities come from a
//! [`UniqueIdSource`]; the default source yields time-ordered UUIDs so ids are
//! unique without any coordination between runs. Name-based suffixes are
//! percent-encoded, so `Jane Doe` becomes `Jane%20Doe`.

use super::ModelError;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

/// IRI identifying an SPDX element or integrity method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpdxId(String);

impl SpdxId {
    /// Borrow the IRI string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpdxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SpdxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fixed path segment that namespaces each kind of entity under the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdCategory {
    Agent,
    Bom,
    Dataset,
    Contains,
    File,
    Hash,
}

impl IdCategory {
    #[must_use]
    pub const fn segment(&self) -> &'static str {
        match self {
            Self::Agent => "agent/",
            Self::Bom => "bom/",
            Self::Dataset => "dataset/",
            Self::Contains => "contains/",
            Self::File => "file/",
            Self::Hash => "hash/",
        }
    }
}

/// Source of fresh id suffixes. Implementations only have to guarantee
/// uniqueness within a run.
pub trait UniqueIdSource {
    fn next_id(&mut self) -> String;
}

/// Time-ordered UUID v7 suffixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOrderedIds;

impl UniqueIdSource for TimeOrderedIds {
    fn next_id(&mut self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Deterministic counter suffixes (`1`, `2`, ...), for reproducible output.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }
}

impl UniqueIdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        self.next.to_string()
    }
}

fn iri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:\S*$").expect("static IRI pattern is valid")
    })
}

/// ASCII escaped in an id suffix on top of controls. Bytes outside ASCII
/// are always escaped.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Joins the prefix, a category segment and a suffix into an [`SpdxId`].
#[derive(Debug, Clone)]
pub struct IdMinter {
    prefix: String,
}

impl IdMinter {
    /// The prefix must be an absolute IRI (`scheme:...`) without whitespace.
    pub fn new(prefix: impl Into<String>) -> Result<Self, ModelError> {
        let prefix = prefix.into();
        if !iri_pattern().is_match(&prefix) {
            return Err(ModelError::InvalidId {
                id: prefix,
                reason: "prefix must be an absolute IRI such as http://example.org/".to_string(),
            });
        }
        Ok(Self { prefix })
    }

    pub fn mint(&self, category: IdCategory, suffix: &str) -> Result<SpdxId, ModelError> {
        if suffix.is_empty() {
            return Err(ModelError::InvalidId {
                id: format!("{}{}", self.prefix, category.segment()),
                reason: "empty identifier suffix".to_string(),
            });
        }
        let mut id = format!("{}{}", self.prefix, category.segment());
        id.extend(utf8_percent_encode(suffix, SEGMENT));
        Ok(SpdxId(id))
    }
}
