//! SPDX 3.0.1 JSON-LD serialization.
//!
//! The writer turns a [`DataPackageDocument`](crate::model::DataPackageDocument)
//! into a compacted JSON-LD document (`@context` plus a flat `@graph`). The
//! reader loads any such document back into a loosely typed graph so the
//! validator can inspect documents this tool did not write.

mod reader;
mod writer;

pub use reader::{parse_document, GraphDocument, GraphNode};
pub use writer::JsonLdWriter;

/// The SPDX 3.0.1 JSON-LD context every document references.
pub const SPDX_CONTEXT_URL: &str = "https://spdx.org/rdf/3.0.1/spdx-context.jsonld";

/// Graph node type names used by the writer and recognised by the reader.
pub mod types {
    pub const CREATION_INFO: &str = "CreationInfo";
    pub const PERSON: &str = "Person";
    pub const BOM: &str = "Bom";
    pub const SPDX_DOCUMENT: &str = "SpdxDocument";
    pub const DATASET_PACKAGE: &str = "dataset_DatasetPackage";
    pub const FILE: &str = "software_File";
    pub const HASH: &str = "Hash";
    pub const RELATIONSHIP: &str = "Relationship";

    /// Types whose nodes must carry an `spdxId`.
    pub const ELEMENT_TYPES: &[&str] = &[
        "Agent",
        "Annotation",
        "Bom",
        "Bundle",
        "LifecycleScopedRelationship",
        "Organization",
        "Person",
        "Relationship",
        "SoftwareAgent",
        "SpdxDocument",
        "Tool",
        "ai_AIPackage",
        "dataset_DatasetPackage",
        "software_File",
        "software_Package",
        "software_Sbom",
        "software_Snippet",
    ];

    /// Whether `node_type` names an SPDX Element class.
    #[must_use]
    pub fn is_element(node_type: &str) -> bool {
        ELEMENT_TYPES.contains(&node_type)
    }
}
