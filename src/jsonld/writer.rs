//! JSON-LD writer for data package documents.

use super::{types, SPDX_CONTEXT_URL};
use crate::error::{ErrorContext, Result};
use crate::model::{
    DataPackageDocument, SpdxFile, SpdxId, CREATION_INFO_ID, SPDX_SPEC_VERSION,
};
use serde::Serialize;

#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@graph")]
    graph: Vec<Node<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Node<'a> {
    CreationInfo(CreationInfoNode<'a>),
    Person(PersonNode<'a>),
    Bom(BomNode<'a>),
    Dataset(DatasetNode<'a>),
    File(FileNode<'a>),
    Relationship(RelationshipNode<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreationInfoNode<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "@id")]
    id: &'static str,
    spec_version: &'static str,
    created: String,
    created_by: Vec<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PersonNode<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    spdx_id: &'a str,
    name: &'a str,
    creation_info: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BomNode<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    spdx_id: &'a str,
    name: &'a str,
    creation_info: &'static str,
    profile_conformance: Vec<&'static str>,
    root_element: Vec<&'a str>,
    element: Vec<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DatasetNode<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    spdx_id: &'a str,
    name: &'a str,
    creation_info: &'static str,
    #[serde(rename = "dataset_datasetType")]
    dataset_type: Vec<&'static str>,
    #[serde(rename = "dataset_confidentialityLevel")]
    confidentiality_level: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileNode<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    spdx_id: &'a str,
    name: &'a str,
    creation_info: &'static str,
    #[serde(rename = "software_fileKind")]
    file_kind: &'static str,
    verified_using: Vec<HashNode<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HashNode<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "@id")]
    id: &'a str,
    algorithm: &'static str,
    hash_value: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RelationshipNode<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    spdx_id: &'a str,
    creation_info: &'static str,
    from: &'a str,
    relationship_type: &'static str,
    to: Vec<&'a str>,
}

fn id_strs(ids: &[SpdxId]) -> Vec<&str> {
    ids.iter().map(SpdxId::as_str).collect()
}

fn file_node(file: &SpdxFile) -> Node<'_> {
    let hash = file.hash();
    Node::File(FileNode {
        kind: types::FILE,
        spdx_id: file.spdx_id().as_str(),
        name: file.name(),
        creation_info: CREATION_INFO_ID,
        file_kind: file.kind().as_str(),
        verified_using: vec![HashNode {
            kind: types::HASH,
            id: hash.id().as_str(),
            algorithm: hash.algorithm().as_str(),
            hash_value: hash.value(),
        }],
    })
}

/// Serializes a [`DataPackageDocument`] as SPDX 3.0.1 JSON-LD.
#[derive(Debug, Clone, Copy)]
pub struct JsonLdWriter {
    pretty: bool,
}

impl Default for JsonLdWriter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonLdWriter {
    /// Create a writer producing pretty-printed output
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit single-line JSON instead of pretty-printed output
    #[must_use]
    pub const fn compact(mut self, compact: bool) -> Self {
        self.pretty = !compact;
        self
    }

    fn envelope<'a>(&self, doc: &'a DataPackageDocument) -> Envelope<'a> {
        let bom = doc.bom();
        let dataset = doc.dataset();
        let contains = doc.contains();

        let mut graph = Vec::with_capacity(doc.file_count() + 5);
        graph.push(Node::CreationInfo(CreationInfoNode {
            kind: types::CREATION_INFO,
            id: CREATION_INFO_ID,
            spec_version: SPDX_SPEC_VERSION,
            created: doc.creation_info().created_string(),
            created_by: id_strs(doc.creation_info().created_by()),
        }));
        graph.push(Node::Person(PersonNode {
            kind: types::PERSON,
            spdx_id: doc.agent().spdx_id().as_str(),
            name: doc.agent().name(),
            creation_info: CREATION_INFO_ID,
        }));
        graph.push(Node::Bom(BomNode {
            kind: types::BOM,
            spdx_id: bom.spdx_id().as_str(),
            name: bom.name(),
            creation_info: CREATION_INFO_ID,
            profile_conformance: bom.profile_conformance().iter().map(|p| p.as_str()).collect(),
            root_element: id_strs(bom.root_elements()),
            element: id_strs(bom.elements()),
        }));
        graph.push(Node::Dataset(DatasetNode {
            kind: types::DATASET_PACKAGE,
            spdx_id: dataset.spdx_id().as_str(),
            name: dataset.name(),
            creation_info: CREATION_INFO_ID,
            dataset_type: dataset.dataset_types().iter().map(|t| t.as_str()).collect(),
            confidentiality_level: dataset.confidentiality_level().as_str(),
        }));
        graph.extend(doc.files().iter().map(file_node));
        graph.push(Node::Relationship(RelationshipNode {
            kind: types::RELATIONSHIP,
            spdx_id: contains.spdx_id().as_str(),
            creation_info: CREATION_INFO_ID,
            from: contains.from().as_str(),
            relationship_type: contains.relationship_type().as_str(),
            to: id_strs(contains.to()),
        }));

        Envelope {
            context: SPDX_CONTEXT_URL,
            graph,
        }
    }

    /// Render the document as a JSON value
    pub fn to_value(&self, doc: &DataPackageDocument) -> Result<serde_json::Value> {
        serde_json::to_value(self.envelope(doc)).context("serializing JSON-LD graph")
    }

    /// Render the document as a string (no trailing newline)
    pub fn to_string(&self, doc: &DataPackageDocument) -> Result<String> {
        let envelope = self.envelope(doc);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&envelope)
        } else {
            serde_json::to_string(&envelope)
        };
        rendered.context("serializing JSON-LD graph")
    }
}
