//! Checked construction of graph entities.
//!
//! [`ModelFactory`] is the single place entities are built. Each method takes
//! the fields of one kind of entity and returns either the entity or a
//! [`ModelError`] describing the rejected value.

use super::element::{
    Agent, Bom, ConfidentialityLevel, CreationInfo, DatasetPackage, DatasetType, FileKind, Hash,
    HashAlgorithm, ProfileIdentifier, Relationship, RelationshipType, SpdxFile,
};
use super::ids::{IdCategory, IdMinter, TimeOrderedIds, UniqueIdSource};
use super::ModelError;
use chrono::{DateTime, SubsecRound, Utc};

/// Algorithm used for every hash the generator emits.
pub const GENERATED_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

/// Builds entities that share one prefix, one creating agent and one
/// `CreationInfo`.
pub struct ModelFactory {
    minter: IdMinter,
    ids: Box<dyn UniqueIdSource>,
    agent: Agent,
    creation_info: CreationInfo,
}

impl std::fmt::Debug for ModelFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelFactory")
            .field("minter", &self.minter)
            .field("agent", &self.agent)
            .field("creation_info", &self.creation_info)
            .finish_non_exhaustive()
    }
}

impl ModelFactory {
    /// Create a factory with time-ordered id suffixes, stamped with the
    /// current time.
    pub fn new(prefix: &str, agent_name: &str) -> Result<Self, ModelError> {
        Self::with_id_source(prefix, agent_name, Box::new(TimeOrderedIds))
    }

    /// Create a factory drawing id suffixes from `ids`.
    pub fn with_id_source(
        prefix: &str,
        agent_name: &str,
        ids: Box<dyn UniqueIdSource>,
    ) -> Result<Self, ModelError> {
        let minter = IdMinter::new(prefix)?;
        require_non_empty("Person", "name", agent_name)?;
        let agent = Agent {
            spdx_id: minter.mint(IdCategory::Agent, agent_name)?,
            name: agent_name.to_string(),
        };
        let creation_info = CreationInfo {
            created: Utc::now().trunc_subsecs(0),
            created_by: vec![agent.spdx_id.clone()],
        };
        Ok(Self {
            minter,
            ids,
            agent,
            creation_info,
        })
    }

    /// Override the creation timestamp.
    #[must_use]
    pub fn created_at(mut self, created: DateTime<Utc>) -> Self {
        self.creation_info.created = created.trunc_subsecs(0);
        self
    }

    #[must_use]
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    #[must_use]
    pub const fn creation_info(&self) -> &CreationInfo {
        &self.creation_info
    }

    /// Build the dataset package. Its id is keyed on the bom name.
    pub fn create_dataset(
        &self,
        bom_name: &str,
        name: &str,
        dataset_type: DatasetType,
        confidentiality_level: ConfidentialityLevel,
    ) -> Result<DatasetPackage, ModelError> {
        require_non_empty("DatasetPackage", "name", name)?;
        Ok(DatasetPackage {
            spdx_id: self.minter.mint(IdCategory::Dataset, bom_name)?,
            name: name.to_string(),
            dataset_types: vec![dataset_type],
            confidentiality_level,
        })
    }

    /// Build one file record and its hash. Both ids share a fresh suffix.
    pub fn create_file(&mut self, name: &str, hash_value: &str) -> Result<SpdxFile, ModelError> {
        require_non_empty("software_File", "name", name)?;
        require_non_empty("Hash", "hashValue", hash_value)?;
        if !hash_value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ModelError::InvalidHashValue {
                value: hash_value.to_string(),
            });
        }

        let suffix = self.ids.next_id();
        let hash = Hash {
            id: self.minter.mint(IdCategory::Hash, &suffix)?,
            algorithm: GENERATED_HASH_ALGORITHM,
            value: hash_value.to_string(),
        };
        Ok(SpdxFile {
            spdx_id: self.minter.mint(IdCategory::File, &suffix)?,
            name: name.to_string(),
            kind: FileKind::infer(name),
            verified_using: hash,
        })
    }

    /// Build the `contains` relationship from the dataset to every file, in
    /// the order given. An empty run yields a relationship with no targets.
    pub fn create_contains(
        &self,
        bom_name: &str,
        dataset: &DatasetPackage,
        files: &[SpdxFile],
    ) -> Result<Relationship, ModelError> {
        Ok(Relationship {
            spdx_id: self.minter.mint(IdCategory::Contains, bom_name)?,
            relationship_type: RelationshipType::Contains,
            from: dataset.spdx_id.clone(),
            to: files.iter().map(|f| f.spdx_id.clone()).collect(),
        })
    }

    /// Build the bill of materials rooted at the dataset.
    pub fn create_bom(
        &self,
        name: &str,
        dataset: &DatasetPackage,
        relationship: &Relationship,
    ) -> Result<Bom, ModelError> {
        require_non_empty("Bom", "name", name)?;
        Ok(Bom {
            spdx_id: self.minter.mint(IdCategory::Bom, name)?,
            name: name.to_string(),
            root_elements: vec![dataset.spdx_id.clone()],
            elements: vec![relationship.spdx_id.clone()],
            profile_conformance: vec![
                ProfileIdentifier::Core,
                ProfileIdentifier::Software,
                ProfileIdentifier::Dataset,
            ],
        })
    }
}

fn require_non_empty(
    kind: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        Err(ModelError::EmptyField { kind, field })
    } else {
        Ok(())
    }
}
