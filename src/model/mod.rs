//! SPDX 3.0.1 data package model.
//!
//! A strongly typed subset of the SPDX 3.0.1 model covering what a dataset
//! bill of materials needs: the creating agent and `CreationInfo`, a `Bom`,
//! a `dataset_DatasetPackage`, `software_File` records with their `Hash`,
//! and the `contains` `Relationship` tying them together.
//!
//! Entities are built through [`ModelFactory`] and are read-only afterwards.

mod document;
mod element;
mod error;
mod factory;
mod ids;

pub use document::DataPackageDocument;
pub use element::{
    Agent, Bom, ConfidentialityLevel, CreationInfo, DatasetPackage, DatasetType, FileKind, Hash,
    HashAlgorithm, ProfileIdentifier, Relationship, RelationshipType, SpdxFile, CREATION_INFO_ID,
    SPDX_SPEC_VERSION,
};
pub use error::ModelError;
pub use factory::{ModelFactory, GENERATED_HASH_ALGORITHM};
pub use ids::{IdCategory, IdMinter, SequentialIds, SpdxId, TimeOrderedIds, UniqueIdSource};
