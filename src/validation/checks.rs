//! Graph checks for SPDX 3.0.1 JSON-LD documents.

use super::{ValidationResult, Violation, ViolationCategory, ViolationSeverity};
use crate::jsonld::{parse_document, types, GraphDocument, GraphNode, SPDX_CONTEXT_URL};
use crate::model::{ConfidentialityLevel, DatasetType, FileKind, HashAlgorithm, SPDX_SPEC_VERSION};
use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Well-known individuals (`NoneElement`, `NoAssertionElement`, ...) live here
const SPDX_TERMS_PREFIX: &str = "https://spdx.org/rdf/3.0.1/terms/";

/// Node types that act as the document root
const BOM_TYPES: &[&str] = &[types::BOM, types::SPDX_DOCUMENT, "software_Sbom", "Bundle"];

/// Node types that relate elements
const RELATIONSHIP_TYPES: &[&str] = &[types::RELATIONSHIP, "LifecycleScopedRelationship"];

/// Validates SPDX 3.0.1 data package documents.
///
/// In strict mode, digest length mismatches and file kinds that disagree
/// with the file name are errors instead of warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentValidator {
    strict: bool,
}

impl DocumentValidator {
    #[must_use]
    pub const fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Parse and validate a document. A document that cannot be read at
    /// all yields a single structural error.
    #[must_use]
    pub fn validate_str(&self, source: &str, content: &str) -> ValidationResult {
        match parse_document(content) {
            Ok(doc) => self.validate(source, &doc),
            Err(e) => {
                tracing::debug!("Could not read document from {source}: {e}");
                let violation = Violation::new(
                    ViolationSeverity::Error,
                    ViolationCategory::Structure,
                    format!("Document could not be read: {}", describe_error(&e)),
                    None,
                    "JSON-LD document",
                );
                ValidationResult::new(source, self.strict, vec![violation])
            }
        }
    }

    /// Validate an already parsed document.
    #[must_use]
    pub fn validate(&self, source: &str, doc: &GraphDocument) -> ValidationResult {
        let mut checker = Checker::new(doc, self.strict);
        checker.check_context();
        checker.check_nodes();
        checker.check_creation_info();
        checker.check_files();
        checker.check_hash_nodes();
        checker.check_datasets();
        checker.check_relationships();
        checker.check_boms();
        checker.check_unreferenced_files();

        let result = ValidationResult::new(source, self.strict, checker.violations);
        tracing::info!(
            "Validated {source}: {} errors, {} warnings, {} info",
            result.error_count,
            result.warning_count,
            result.info_count
        );
        result
    }
}

/// Render an error with its sources, outermost first.
fn describe_error(err: &(dyn std::error::Error + 'static)) -> String {
    std::iter::successors(Some(err), |e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

/// Parse a vocabulary term (short or full IRI form) into a model enum.
fn parse_term<T: DeserializeOwned>(term: &str) -> Option<T> {
    let short = term.rsplit('/').next().unwrap_or(term);
    serde_json::from_value(Value::String(short.to_string())).ok()
}

fn is_hex(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_hexdigit())
}

struct Checker<'a> {
    doc: &'a GraphDocument,
    strict: bool,
    element_ids: HashSet<&'a str>,
    creation_info_ids: HashSet<&'a str>,
    violations: Vec<Violation>,
}

impl<'a> Checker<'a> {
    fn new(doc: &'a GraphDocument, strict: bool) -> Self {
        let element_ids = doc.nodes().iter().filter_map(GraphNode::spdx_id).collect();
        let creation_info_ids = doc
            .nodes_of_type(types::CREATION_INFO)
            .filter_map(GraphNode::node_id)
            .collect();
        Self {
            doc,
            strict,
            element_ids,
            creation_info_ids,
            violations: Vec::new(),
        }
    }

    fn push(
        &mut self,
        severity: ViolationSeverity,
        category: ViolationCategory,
        message: impl Into<String>,
        element: Option<&str>,
        requirement: &str,
    ) {
        self.violations.push(Violation::new(
            severity,
            category,
            message,
            element.map(str::to_string),
            requirement,
        ));
    }

    fn error(
        &mut self,
        category: ViolationCategory,
        message: impl Into<String>,
        element: Option<&str>,
        requirement: &str,
    ) {
        self.push(ViolationSeverity::Error, category, message, element, requirement);
    }

    /// Warning normally, error in strict mode
    const fn lenient(&self) -> ViolationSeverity {
        if self.strict {
            ViolationSeverity::Error
        } else {
            ViolationSeverity::Warning
        }
    }

    fn resolves(&self, id: &str) -> bool {
        self.element_ids.contains(id) || id.starts_with(SPDX_TERMS_PREFIX)
    }

    fn elements(&self) -> impl Iterator<Item = &'a GraphNode> {
        let doc: &'a GraphDocument = self.doc;
        doc.nodes().iter().filter(|n| n.spdx_id().is_some())
    }

    fn nodes_in(&self, kinds: &'static [&'static str]) -> impl Iterator<Item = &'a GraphNode> {
        let doc: &'a GraphDocument = self.doc;
        doc.nodes()
            .iter()
            .filter(move |n| n.node_type().map_or(false, |t| kinds.contains(&t)))
    }

    // ========================================================================
    // Envelope and identity
    // ========================================================================

    fn check_context(&mut self) {
        let urls = self.doc.context_urls();
        if urls.is_empty() {
            self.error(
                ViolationCategory::Structure,
                "Document has no @context",
                None,
                "JSON-LD @context",
            );
        } else if !urls.contains(&SPDX_CONTEXT_URL) {
            let found = urls.join(", ");
            self.error(
                ViolationCategory::Structure,
                format!("@context does not reference {SPDX_CONTEXT_URL} (found {found})"),
                None,
                "JSON-LD @context",
            );
        }
    }

    fn check_nodes(&mut self) {
        let doc = self.doc;
        let mut seen = HashSet::new();
        for node in doc.nodes() {
            let Some(node_type) = node.node_type() else {
                self.error(
                    ViolationCategory::Structure,
                    "Graph node has no type",
                    Some(node.label().as_str()),
                    "JSON-LD node type",
                );
                continue;
            };

            match node.spdx_id() {
                None if types::is_element(node_type) => self.error(
                    ViolationCategory::Identity,
                    format!("{node_type} has no spdxId"),
                    Some(node.label().as_str()),
                    "Core/Element.spdxId",
                ),
                None => {}
                Some(id) if id.trim().is_empty() || id.chars().any(char::is_whitespace) => self
                    .error(
                        ViolationCategory::Identity,
                        format!("spdxId {id:?} is empty or contains whitespace"),
                        Some(node.label().as_str()),
                        "Core/Element.spdxId",
                    ),
                Some(id) => {
                    if !seen.insert(id) {
                        self.error(
                            ViolationCategory::Identity,
                            format!("Duplicate spdxId {id}"),
                            Some(id),
                            "Core/Element.spdxId",
                        );
                    }
                }
            }
        }
    }

    // ========================================================================
    // Creation info
    // ========================================================================

    fn check_creation_info(&mut self) {
        for node in self.doc.nodes_of_type(types::CREATION_INFO) {
            self.check_creation_info_node(node.properties(), &node.label());
        }

        for node in self.elements() {
            let label = node.label();
            match node.get("creationInfo") {
                None => self.error(
                    ViolationCategory::CreationInfo,
                    "Element has no creationInfo",
                    Some(label.as_str()),
                    "Core/Element.creationInfo",
                ),
                Some(Value::String(id)) => {
                    if !self.creation_info_ids.contains(id.as_str()) {
                        self.error(
                            ViolationCategory::CreationInfo,
                            format!("creationInfo {id} does not resolve to a CreationInfo node"),
                            Some(label.as_str()),
                            "Core/Element.creationInfo",
                        );
                    }
                }
                Some(Value::Object(inline)) => {
                    self.check_creation_info_node(inline, &label);
                }
                Some(_) => self.error(
                    ViolationCategory::CreationInfo,
                    "creationInfo must be a reference or an object",
                    Some(label.as_str()),
                    "Core/Element.creationInfo",
                ),
            }
        }
    }

    fn check_creation_info_node(&mut self, info: &Map<String, Value>, label: &str) {
        match info.get("specVersion").and_then(Value::as_str) {
            None => self.error(
                ViolationCategory::CreationInfo,
                "CreationInfo has no specVersion",
                Some(label),
                "Core/CreationInfo.specVersion",
            ),
            Some(SPDX_SPEC_VERSION) => {}
            Some(other) => self.push(
                ViolationSeverity::Warning,
                ViolationCategory::CreationInfo,
                format!("specVersion is {other}, expected {SPDX_SPEC_VERSION}"),
                Some(label),
                "Core/CreationInfo.specVersion",
            ),
        }

        match info.get("created").and_then(Value::as_str) {
            None => self.error(
                ViolationCategory::CreationInfo,
                "CreationInfo has no created timestamp",
                Some(label),
                "Core/CreationInfo.created",
            ),
            Some(created) => {
                if DateTime::parse_from_rfc3339(created).is_err() {
                    self.error(
                        ViolationCategory::CreationInfo,
                        format!("created {created:?} is not an RFC 3339 timestamp"),
                        Some(label),
                        "Core/CreationInfo.created",
                    );
                }
            }
        }

        let created_by: Vec<&str> = match info.get("createdBy") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(s)) => vec![s.as_str()],
            _ => Vec::new(),
        };
        if created_by.is_empty() {
            self.error(
                ViolationCategory::CreationInfo,
                "CreationInfo has no createdBy agent",
                Some(label),
                "Core/CreationInfo.createdBy",
            );
        }
        for agent in created_by {
            if !self.resolves(agent) {
                self.error(
                    ViolationCategory::CreationInfo,
                    format!("createdBy {agent} does not resolve to an element"),
                    Some(label),
                    "Core/CreationInfo.createdBy",
                );
            }
        }
    }

    // ========================================================================
    // Files and hashes
    // ========================================================================

    fn check_files(&mut self) {
        for node in self.doc.nodes_of_type(types::FILE) {
            let label = node.label();
            let name = node.str_prop("name").filter(|n| !n.trim().is_empty());
            if name.is_none() {
                self.error(
                    ViolationCategory::FileInfo,
                    "File has no name",
                    Some(label.as_str()),
                    "Core/Element.name",
                );
            }

            match node.str_prop("software_fileKind") {
                None => self.error(
                    ViolationCategory::FileInfo,
                    "File has no software_fileKind",
                    Some(label.as_str()),
                    "Software/File.fileKind",
                ),
                Some(term) => match parse_term::<FileKind>(term) {
                    None => self.error(
                        ViolationCategory::FileInfo,
                        format!("Unknown software_fileKind {term}"),
                        Some(label.as_str()),
                        "Software/File.fileKind",
                    ),
                    Some(kind) => {
                        if let Some(name) = name {
                            let inferred = FileKind::infer(name);
                            if inferred != kind {
                                self.push(
                                    self.lenient(),
                                    ViolationCategory::FileInfo,
                                    format!(
                                        "software_fileKind is {} but name {name:?} suggests {}",
                                        kind.as_str(),
                                        inferred.as_str()
                                    ),
                                    Some(label.as_str()),
                                    "Software/File.fileKind",
                                );
                            }
                        }
                    }
                },
            }

            self.check_verified_using(node, &label);
        }
    }

    fn check_verified_using(&mut self, node: &GraphNode, label: &str) {
        let mut hash_count = 0;

        for hash in node.objects("verifiedUsing") {
            let hash_type = hash
                .get("type")
                .or_else(|| hash.get("@type"))
                .and_then(Value::as_str);
            if hash_type == Some(types::HASH) {
                hash_count += 1;
                self.check_hash(hash, label);
            }
        }

        if let Some(Value::Array(items)) = node.get("verifiedUsing") {
            for id in items.iter().filter_map(Value::as_str) {
                match self.doc.find(id) {
                    Some(target) if target.node_type() == Some(types::HASH) => hash_count += 1,
                    _ => self.error(
                        ViolationCategory::Integrity,
                        format!("verifiedUsing {id} does not resolve to a Hash"),
                        Some(label),
                        "Core/Element.verifiedUsing",
                    ),
                }
            }
        }

        if hash_count == 0 {
            self.error(
                ViolationCategory::Integrity,
                "File has no verifiedUsing Hash",
                Some(label),
                "Core/Element.verifiedUsing",
            );
        }
    }

    fn check_hash_nodes(&mut self) {
        for node in self.doc.nodes_of_type(types::HASH) {
            self.check_hash(node.properties(), &node.label());
        }
    }

    fn check_hash(&mut self, hash: &Map<String, Value>, label: &str) {
        let algorithm = match hash.get("algorithm").and_then(Value::as_str) {
            None => {
                self.error(
                    ViolationCategory::Integrity,
                    "Hash has no algorithm",
                    Some(label),
                    "Core/Hash.algorithm",
                );
                None
            }
            Some(term) => {
                let parsed = HashAlgorithm::from_term(term);
                if parsed.is_none() {
                    self.push(
                        ViolationSeverity::Warning,
                        ViolationCategory::Integrity,
                        format!("Unknown hash algorithm {term}"),
                        Some(label),
                        "Core/Hash.algorithm",
                    );
                }
                parsed
            }
        };

        let Some(value) = hash.get("hashValue").and_then(Value::as_str) else {
            self.error(
                ViolationCategory::Integrity,
                "Hash has no hashValue",
                Some(label),
                "Core/Hash.hashValue",
            );
            return;
        };

        if !is_hex(value) {
            self.error(
                ViolationCategory::Integrity,
                format!("hashValue {value:?} is not hexadecimal"),
                Some(label),
                "Core/Hash.hashValue",
            );
            return;
        }

        if let Some(algorithm) = algorithm {
            if let Some(expected) = algorithm.hex_len() {
                if value.len() != expected {
                    self.push(
                        self.lenient(),
                        ViolationCategory::Integrity,
                        format!(
                            "{algorithm} digest should have {expected} hex digits, found {}",
                            value.len()
                        ),
                        Some(label),
                        "Core/Hash.hashValue",
                    );
                }
            }
        }
    }

    // ========================================================================
    // Dataset packages
    // ========================================================================

    fn check_datasets(&mut self) {
        for node in self.doc.nodes_of_type(types::DATASET_PACKAGE) {
            let label = node.label();
            if node.str_prop("name").map_or(true, |n| n.trim().is_empty()) {
                self.error(
                    ViolationCategory::Dataset,
                    "DatasetPackage has no name",
                    Some(label.as_str()),
                    "Core/Element.name",
                );
            }

            let dataset_types = node.references("dataset_datasetType");
            if dataset_types.is_empty() {
                self.error(
                    ViolationCategory::Dataset,
                    "DatasetPackage has no dataset_datasetType",
                    Some(label.as_str()),
                    "Dataset/DatasetPackage.datasetType",
                );
            }
            for term in dataset_types {
                if parse_term::<DatasetType>(term).is_none() {
                    self.error(
                        ViolationCategory::Dataset,
                        format!("Unknown dataset_datasetType {term}"),
                        Some(label.as_str()),
                        "Dataset/DatasetPackage.datasetType",
                    );
                }
            }

            if let Some(level) = node.str_prop("dataset_confidentialityLevel") {
                if parse_term::<ConfidentialityLevel>(level).is_none() {
                    self.error(
                        ViolationCategory::Dataset,
                        format!("Unknown dataset_confidentialityLevel {level}"),
                        Some(label.as_str()),
                        "Dataset/DatasetPackage.confidentialityLevel",
                    );
                }
            }
        }
    }

    // ========================================================================
    // Relationships and document roots
    // ========================================================================

    fn check_relationships(&mut self) {
        for node in self.nodes_in(RELATIONSHIP_TYPES) {
            let label = node.label();
            let relationship_type = node.str_prop("relationshipType");
            if relationship_type.is_none() {
                self.error(
                    ViolationCategory::Relationships,
                    "Relationship has no relationshipType",
                    Some(label.as_str()),
                    "Core/Relationship.relationshipType",
                );
            }

            let from = node.references("from");
            if from.is_empty() {
                self.error(
                    ViolationCategory::Relationships,
                    "Relationship has no from",
                    Some(label.as_str()),
                    "Core/Relationship.from",
                );
            }
            for id in from {
                if !self.resolves(id) {
                    self.error(
                        ViolationCategory::Relationships,
                        format!("from {id} does not resolve to an element"),
                        Some(label.as_str()),
                        "Core/Relationship.from",
                    );
                }
            }

            let to = node.references("to");
            for &id in &to {
                if !self.resolves(id) {
                    self.error(
                        ViolationCategory::Relationships,
                        format!("to {id} does not resolve to an element"),
                        Some(label.as_str()),
                        "Core/Relationship.to",
                    );
                }
            }
            if to.is_empty()
                && relationship_type.map(|t| t.rsplit('/').next().unwrap_or(t)) == Some("contains")
            {
                self.push(
                    ViolationSeverity::Warning,
                    ViolationCategory::Relationships,
                    "contains relationship has no targets",
                    Some(label.as_str()),
                    "Core/Relationship.to",
                );
            }
        }
    }

    fn check_boms(&mut self) {
        let boms: Vec<&GraphNode> = self.nodes_in(BOM_TYPES).collect();
        if boms.is_empty() {
            self.push(
                ViolationSeverity::Warning,
                ViolationCategory::Document,
                "Document has no Bom element",
                None,
                "Core/Bom",
            );
        }

        for bom in boms {
            let label = bom.label();
            let roots = bom.references("rootElement");
            if roots.is_empty() {
                self.push(
                    ViolationSeverity::Warning,
                    ViolationCategory::Document,
                    "Bom has no rootElement",
                    Some(label.as_str()),
                    "Core/ElementCollection.rootElement",
                );
            }
            for (property, ids) in [("rootElement", roots), ("element", bom.references("element"))] {
                for id in ids {
                    if !self.resolves(id) {
                        self.error(
                            ViolationCategory::Document,
                            format!("{property} {id} does not resolve to an element"),
                            Some(label.as_str()),
                            &format!("Core/ElementCollection.{property}"),
                        );
                    }
                }
            }
        }
    }

    fn check_unreferenced_files(&mut self) {
        let targets: HashSet<&str> = self
            .nodes_in(RELATIONSHIP_TYPES)
            .flat_map(|r| r.references("to"))
            .collect();
        let orphans: Vec<&str> = self
            .doc
            .nodes_of_type(types::FILE)
            .filter_map(GraphNode::spdx_id)
            .filter(|id| !targets.contains(id))
            .collect();
        for id in orphans {
            self.push(
                ViolationSeverity::Info,
                ViolationCategory::Relationships,
                "File is not the target of any relationship",
                Some(id),
                "Core/Relationship.to",
            );
        }
    }
}
