//! Document assembly.
//!
//! The assembler holds the dataset and the files collected so far. Nothing
//! is serialized until [`DocumentAssembler::finish`] has produced the
//! complete document.

use super::records::RecordBuilder;
use crate::error::{DptError, Result};
use crate::model::{
    ConfidentialityLevel, DataPackageDocument, DatasetPackage, DatasetType, ModelError,
    ModelFactory, SpdxFile,
};

/// Names and classification of the document being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSettings {
    pub bom_name: String,
    pub dataset_name: String,
    pub dataset_type: DatasetType,
    pub confidentiality_level: ConfidentialityLevel,
}

impl DocumentSettings {
    /// Settings with the default dataset type and confidentiality level
    pub fn new(bom_name: impl Into<String>, dataset_name: impl Into<String>) -> Self {
        Self {
            bom_name: bom_name.into(),
            dataset_name: dataset_name.into(),
            dataset_type: DatasetType::default(),
            confidentiality_level: ConfidentialityLevel::default(),
        }
    }
}

/// Collects file records under one dataset and assembles the document.
#[derive(Debug)]
pub struct DocumentAssembler {
    factory: ModelFactory,
    bom_name: String,
    dataset: DatasetPackage,
    files: Vec<SpdxFile>,
}

impl DocumentAssembler {
    /// Create the dataset up front so bad names fail before any input is read.
    pub fn new(factory: ModelFactory, settings: &DocumentSettings) -> Result<Self> {
        if settings.bom_name.trim().is_empty() {
            return Err(DptError::model(
                "bom",
                ModelError::EmptyField {
                    kind: "Bom",
                    field: "name",
                },
            ));
        }
        let dataset = factory
            .create_dataset(
                &settings.bom_name,
                &settings.dataset_name,
                settings.dataset_type,
                settings.confidentiality_level,
            )
            .map_err(|e| DptError::model("dataset", e))?;

        Ok(Self {
            factory,
            bom_name: settings.bom_name.clone(),
            dataset,
            files: Vec::new(),
        })
    }

    #[must_use]
    pub const fn dataset(&self) -> &DatasetPackage {
        &self.dataset
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Add a file record. Files keep the order they were pushed in.
    pub fn push_file(&mut self, file: SpdxFile) {
        self.files.push(file);
    }

    /// Build a file record from an input line and add it.
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        let file = RecordBuilder::new(&mut self.factory).build_file(line)?;
        self.push_file(file);
        Ok(())
    }

    /// Build the `contains` relationship and the bom, and hand back the
    /// finished document.
    pub fn finish(self) -> Result<DataPackageDocument> {
        let contains = self
            .factory
            .create_contains(&self.bom_name, &self.dataset, &self.files)
            .map_err(|e| DptError::model("contains relationship", e))?;
        let bom = self
            .factory
            .create_bom(&self.bom_name, &self.dataset, &contains)
            .map_err(|e| DptError::model("bom", e))?;

        tracing::debug!(
            "Assembled bom {} with {} files",
            bom.spdx_id(),
            self.files.len()
        );

        Ok(DataPackageDocument::new(
            self.factory.creation_info().clone(),
            self.factory.agent().clone(),
            bom,
            self.dataset,
            self.files,
            contains,
        ))
    }
}
