//! SPDX 3.0.1 entities emitted by the generator.
//!
//! Entities are immutable once built. Construction goes through
//! [`ModelFactory`](super::ModelFactory), which checks the values first.

use super::SpdxId;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SPDX specification version written into every `CreationInfo`.
pub const SPDX_SPEC_VERSION: &str = "3.0.1";

/// Blank node id shared by every element's `creationInfo`.
pub const CREATION_INFO_ID: &str = "_:creationinfo";

// ============================================================================
// Vocabularies
// ============================================================================

/// Digest algorithms from the SPDX `HashAlgorithm` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum HashAlgorithm {
    Adler32,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
    Md2,
    Md4,
    Md5,
    Md6,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    #[serde(rename = "sha3_224")]
    Sha3_224,
    #[serde(rename = "sha3_256")]
    Sha3_256,
    #[serde(rename = "sha3_384")]
    Sha3_384,
    #[serde(rename = "sha3_512")]
    Sha3_512,
    Sha512,
    Other,
}

impl HashAlgorithm {
    /// Vocabulary term as it appears in JSON-LD.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adler32 => "adler32",
            Self::Blake2b256 => "blake2b256",
            Self::Blake2b384 => "blake2b384",
            Self::Blake2b512 => "blake2b512",
            Self::Blake3 => "blake3",
            Self::Md2 => "md2",
            Self::Md4 => "md4",
            Self::Md5 => "md5",
            Self::Md6 => "md6",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha3_224 => "sha3_224",
            Self::Sha3_256 => "sha3_256",
            Self::Sha3_384 => "sha3_384",
            Self::Sha3_512 => "sha3_512",
            Self::Sha512 => "sha512",
            Self::Other => "other",
        }
    }

    /// Parse a vocabulary term, accepting the full IRI form as well.
    #[must_use]
    pub fn from_term(term: &str) -> Option<Self> {
        let term = term.rsplit('/').next().unwrap_or(term);
        let algorithm = match term {
            "adler32" => Self::Adler32,
            "blake2b256" => Self::Blake2b256,
            "blake2b384" => Self::Blake2b384,
            "blake2b512" => Self::Blake2b512,
            "blake3" => Self::Blake3,
            "md2" => Self::Md2,
            "md4" => Self::Md4,
            "md5" => Self::Md5,
            "md6" => Self::Md6,
            "sha1" => Self::Sha1,
            "sha224" => Self::Sha224,
            "sha256" => Self::Sha256,
            "sha384" => Self::Sha384,
            "sha3_224" => Self::Sha3_224,
            "sha3_256" => Self::Sha3_256,
            "sha3_384" => Self::Sha3_384,
            "sha3_512" => Self::Sha3_512,
            "sha512" => Self::Sha512,
            "other" => Self::Other,
            _ => return None,
        };
        Some(algorithm)
    }

    /// Number of hex digits in a digest, for fixed-size algorithms.
    #[must_use]
    pub const fn hex_len(&self) -> Option<usize> {
        match self {
            Self::Adler32 => Some(8),
            Self::Md2 | Self::Md4 | Self::Md5 => Some(32),
            Self::Sha1 => Some(40),
            Self::Sha224 | Self::Sha3_224 => Some(56),
            Self::Sha256 | Self::Sha3_256 | Self::Blake2b256 | Self::Blake3 => Some(64),
            Self::Sha384 | Self::Sha3_384 | Self::Blake2b384 => Some(96),
            Self::Sha512 | Self::Sha3_512 | Self::Blake2b512 => Some(128),
            Self::Md6 | Self::Other => None,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `software_FileKindType`: a file record names either a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileKind {
    File,
    Directory,
}

impl FileKind {
    /// Directory iff the name ends with a path separator.
    #[must_use]
    pub fn infer(name: &str) -> Self {
        if name.ends_with('/') {
            Self::Directory
        } else {
            Self::File
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

/// `dataset_DatasetType` vocabulary.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
#[value(rename_all = "camelCase")]
pub enum DatasetType {
    Audio,
    Categorical,
    Graph,
    Image,
    NoAssertion,
    Numeric,
    #[default]
    Other,
    Sensor,
    Structured,
    Syntactic,
    Text,
    Timeseries,
    Timestamp,
    Video,
}

impl DatasetType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Categorical => "categorical",
            Self::Graph => "graph",
            Self::Image => "image",
            Self::NoAssertion => "noAssertion",
            Self::Numeric => "numeric",
            Self::Other => "other",
            Self::Sensor => "sensor",
            Self::Structured => "structured",
            Self::Syntactic => "syntactic",
            Self::Text => "text",
            Self::Timeseries => "timeseries",
            Self::Timestamp => "timestamp",
            Self::Video => "video",
        }
    }
}

/// `dataset_ConfidentialityLevelType` (traffic light protocol).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum ConfidentialityLevel {
    Red,
    Amber,
    #[default]
    Green,
    Clear,
}

impl ConfidentialityLevel {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Amber => "amber",
            Self::Green => "green",
            Self::Clear => "clear",
        }
    }
}

/// Relationship types this tool emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum RelationshipType {
    Contains,
}

impl RelationshipType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
        }
    }
}

/// SPDX profiles a document declares conformance to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileIdentifier {
    Core,
    Software,
    Dataset,
}

impl ProfileIdentifier {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Software => "software",
            Self::Dataset => "dataset",
        }
    }
}

// ============================================================================
// Entities
// ============================================================================

/// Who created the document and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationInfo {
    pub(super) created: DateTime<Utc>,
    pub(super) created_by: Vec<SpdxId>,
}

impl CreationInfo {
    #[must_use]
    pub const fn created(&self) -> &DateTime<Utc> {
        &self.created
    }

    /// Timestamp in the `YYYY-MM-DDThh:mm:ssZ` form SPDX requires.
    #[must_use]
    pub fn created_string(&self) -> String {
        self.created.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    #[must_use]
    pub fn created_by(&self) -> &[SpdxId] {
        &self.created_by
    }
}

/// The person credited with creating the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub(super) spdx_id: SpdxId,
    pub(super) name: String,
}

impl Agent {
    #[must_use]
    pub const fn spdx_id(&self) -> &SpdxId {
        &self.spdx_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Content digest attached to a file record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hash {
    pub(super) id: SpdxId,
    pub(super) algorithm: HashAlgorithm,
    pub(super) value: String,
}

impl Hash {
    #[must_use]
    pub const fn id(&self) -> &SpdxId {
        &self.id
    }

    #[must_use]
    pub const fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// One file or directory of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxFile {
    pub(super) spdx_id: SpdxId,
    pub(super) name: String,
    pub(super) kind: FileKind,
    pub(super) verified_using: Hash,
}

impl SpdxFile {
    #[must_use]
    pub const fn spdx_id(&self) -> &SpdxId {
        &self.spdx_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> FileKind {
        self.kind
    }

    #[must_use]
    pub const fn hash(&self) -> &Hash {
        &self.verified_using
    }
}

/// The dataset described by the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPackage {
    pub(super) spdx_id: SpdxId,
    pub(super) name: String,
    pub(super) dataset_types: Vec<DatasetType>,
    pub(super) confidentiality_level: ConfidentialityLevel,
}

impl DatasetPackage {
    #[must_use]
    pub const fn spdx_id(&self) -> &SpdxId {
        &self.spdx_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn dataset_types(&self) -> &[DatasetType] {
        &self.dataset_types
    }

    #[must_use]
    pub const fn confidentiality_level(&self) -> ConfidentialityLevel {
        self.confidentiality_level
    }
}

/// Directed relationship from one element to many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub(super) spdx_id: SpdxId,
    pub(super) relationship_type: RelationshipType,
    pub(super) from: SpdxId,
    pub(super) to: Vec<SpdxId>,
}

impl Relationship {
    #[must_use]
    pub const fn spdx_id(&self) -> &SpdxId {
        &self.spdx_id
    }

    #[must_use]
    pub const fn relationship_type(&self) -> RelationshipType {
        self.relationship_type
    }

    #[must_use]
    pub const fn from(&self) -> &SpdxId {
        &self.from
    }

    #[must_use]
    pub fn to(&self) -> &[SpdxId] {
        &self.to
    }
}

/// The bill of materials: the root collection of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bom {
    pub(super) spdx_id: SpdxId,
    pub(super) name: String,
    pub(super) root_elements: Vec<SpdxId>,
    pub(super) elements: Vec<SpdxId>,
    pub(super) profile_conformance: Vec<ProfileIdentifier>,
}

impl Bom {
    #[must_use]
    pub const fn spdx_id(&self) -> &SpdxId {
        &self.spdx_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn root_elements(&self) -> &[SpdxId] {
        &self.root_elements
    }

    #[must_use]
    pub fn elements(&self) -> &[SpdxId] {
        &self.elements
    }

    #[must_use]
    pub fn profile_conformance(&self) -> &[ProfileIdentifier] {
        &self.profile_conformance
    }
}
