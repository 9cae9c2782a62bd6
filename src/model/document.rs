//! The assembled, immutable document graph.

use super::element::{Agent, Bom, CreationInfo, DatasetPackage, Relationship, SpdxFile};

/// Everything one `generate` run produces, held in memory until it is
/// serialized in one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPackageDocument {
    creation_info: CreationInfo,
    agent: Agent,
    bom: Bom,
    dataset: DatasetPackage,
    files: Vec<SpdxFile>,
    contains: Relationship,
}

impl DataPackageDocument {
    pub(crate) fn new(
        creation_info: CreationInfo,
        agent: Agent,
        bom: Bom,
        dataset: DatasetPackage,
        files: Vec<SpdxFile>,
        contains: Relationship,
    ) -> Self {
        Self {
            creation_info,
            agent,
            bom,
            dataset,
            files,
            contains,
        }
    }

    #[must_use]
    pub const fn creation_info(&self) -> &CreationInfo {
        &self.creation_info
    }

    #[must_use]
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    #[must_use]
    pub const fn bom(&self) -> &Bom {
        &self.bom
    }

    #[must_use]
    pub const fn dataset(&self) -> &DatasetPackage {
        &self.dataset
    }

    /// File records in the order their lines were read.
    #[must_use]
    pub fn files(&self) -> &[SpdxFile] {
        &self.files
    }

    #[must_use]
    pub const fn contains(&self) -> &Relationship {
        &self.contains
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
