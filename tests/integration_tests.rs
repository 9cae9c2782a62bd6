//! Integration tests for datapackage-tools
//!
//! These tests drive the library end to end: reading hash lists, assembling
//! documents, writing JSON-LD and validating it again.

use datapackage_tools::{
    build_document,
    error::ParseErrorKind,
    jsonld::{parse_document, types},
    model::{ConfidentialityLevel, DatasetType, FileKind, ModelFactory, SequentialIds},
    validation::{render_report, ReportFormat, ViolationCategory, ViolationSeverity},
    DocumentSettings, DocumentValidator, DptError, InputSource, JsonLdWriter,
};
use std::io::Write;
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn factory() -> ModelFactory {
    ModelFactory::with_id_source("http://example.org/", "me", Box::new(SequentialIds::new()))
        .expect("valid prefix and agent")
}

fn settings() -> DocumentSettings {
    DocumentSettings::new("b", "d")
}

// ============================================================================
// Generation Tests
// ============================================================================

mod generate_tests {
    use super::*;

    #[test]
    fn test_generate_from_fixture() {
        let sources = [InputSource::Path(fixture_path("hashes.txt"))];
        let doc = build_document(factory(), &settings(), &sources).expect("fixture builds");

        assert_eq!(doc.file_count(), 3);
        let names: Vec<&str> = doc.files().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["data/empty.csv", "data/abc.txt", "data/subdir/"]);
        assert_eq!(doc.files()[2].kind(), FileKind::Directory);
        assert_eq!(doc.dataset().spdx_id().as_str(), "http://example.org/dataset/b");
        assert_eq!(doc.bom().root_elements(), &[doc.dataset().spdx_id().clone()]);
    }

    #[test]
    fn test_generate_example_graph_shape() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hashes.txt");
        std::fs::write(&input, "abc123 data/file1.csv\ndef456 data/subdir/\n").unwrap();

        let doc = build_document(factory(), &settings(), &[InputSource::Path(input)]).unwrap();
        let value = JsonLdWriter::new().to_value(&doc).unwrap();

        assert_eq!(
            value["@context"],
            "https://spdx.org/rdf/3.0.1/spdx-context.jsonld"
        );
        let graph = value["@graph"].as_array().unwrap();
        let kinds: Vec<&str> = graph.iter().map(|n| n["type"].as_str().unwrap()).collect();
        assert_eq!(
            kinds,
            [
                types::CREATION_INFO,
                types::PERSON,
                types::BOM,
                types::DATASET_PACKAGE,
                types::FILE,
                types::FILE,
                types::RELATIONSHIP,
            ]
        );

        assert_eq!(graph[4]["name"], "data/file1.csv");
        assert_eq!(graph[4]["software_fileKind"], "file");
        assert_eq!(graph[4]["verifiedUsing"][0]["hashValue"], "abc123");
        assert_eq!(graph[4]["verifiedUsing"][0]["algorithm"], "sha256");
        assert_eq!(graph[5]["software_fileKind"], "directory");
        assert_eq!(graph[6]["relationshipType"], "contains");
        assert_eq!(graph[6]["from"], "http://example.org/dataset/b");
        assert_eq!(graph[6]["to"][0], graph[4]["spdxId"]);
        assert_eq!(graph[6]["to"][1], graph[5]["spdxId"]);
    }

    #[test]
    fn test_generate_gzip_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hashes.txt.gz");
        let file = std::fs::File::create(&input).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(b"abc123 a.txt\nbeef b.txt\n").unwrap();
        encoder.finish().unwrap();

        let doc = build_document(factory(), &settings(), &[InputSource::Path(input)]).unwrap();
        assert_eq!(doc.file_count(), 2);
        assert_eq!(doc.files()[1].hash().value(), "beef");
    }

    #[test]
    fn test_generate_concatenates_sources_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, "aa one.txt\n").unwrap();
        std::fs::write(&second, "bb two.txt\ncc three.txt\n").unwrap();

        let sources = InputSource::from_args(&[first, second]);
        let doc = build_document(factory(), &settings(), &sources).unwrap();
        let names: Vec<&str> = doc.files().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["one.txt", "two.txt", "three.txt"]);
    }

    #[test]
    fn test_generate_settings_recorded_on_dataset() {
        let settings = DocumentSettings {
            dataset_type: DatasetType::Image,
            confidentiality_level: ConfidentialityLevel::Red,
            ..settings()
        };
        let doc = build_document(factory(), &settings, &[]).unwrap();
        assert_eq!(doc.dataset().dataset_types(), &[DatasetType::Image]);
        assert_eq!(doc.dataset().confidentiality_level(), ConfidentialityLevel::Red);
        assert!(doc.contains().to().is_empty());
    }

    #[test]
    fn test_generate_rejects_single_token_line() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hashes.txt");
        std::fs::write(&input, "abc123 ok.txt\nonlyonetoken\n").unwrap();

        let err = build_document(factory(), &settings(), &[InputSource::Path(input)])
            .expect_err("single token line must fail");
        match err {
            DptError::Parse {
                context,
                source: ParseErrorKind::TooFewTokens { found, .. },
            } => {
                assert_eq!(found, 1);
                assert!(context.ends_with("line 2"), "context was {context}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_generate_missing_file_is_io_error() {
        let sources = [InputSource::Path(fixture_path("does-not-exist.txt"))];
        let err = build_document(factory(), &settings(), &sources).unwrap_err();
        assert!(matches!(err, DptError::Io { .. }));
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    fn validate_fixture(name: &str, strict: bool) -> datapackage_tools::ValidationResult {
        let content = std::fs::read_to_string(fixture_path(name)).unwrap();
        DocumentValidator::new(strict).validate_str(name, &content)
    }

    #[test]
    fn test_valid_fixture_has_no_violations() {
        let result = validate_fixture("valid.jsonld", true);
        assert!(result.is_valid, "{:?}", result.violations);
        assert!(result.violations.is_empty(), "{:?}", result.violations);
    }

    #[test]
    fn test_dangling_relationship_target() {
        let result = validate_fixture("dangling.jsonld", false);
        assert!(!result.is_valid);
        let relationship = result.violations_by_category(ViolationCategory::Relationships);
        assert_eq!(relationship.len(), 1);
        assert_eq!(relationship[0].severity, ViolationSeverity::Error);
        assert!(relationship[0]
            .message
            .contains("http://example.org/file/missing"));
    }

    #[test]
    fn test_generated_document_round_trips_through_validator() {
        let sources = [InputSource::Path(fixture_path("hashes.txt"))];
        let doc = build_document(factory(), &settings(), &sources).unwrap();
        let json = JsonLdWriter::new().compact(true).to_string(&doc).unwrap();

        let graph = parse_document(&json).unwrap();
        assert_eq!(graph.nodes_of_type(types::FILE).count(), 3);

        let result = DocumentValidator::new(true).validate("<memory>", &graph);
        assert!(result.violations.is_empty(), "{:?}", result.violations);
    }

    #[test]
    fn test_short_digest_lenient_and_strict() {
        let doc = build_document(factory(), &settings(), &[]).unwrap();
        let mut value = JsonLdWriter::new().to_value(&doc).unwrap();
        // Splice in a file with a truncated sha256 digest
        let graph = value["@graph"].as_array_mut().unwrap();
        graph.push(serde_json::json!({
            "type": "software_File",
            "spdxId": "http://example.org/file/x",
            "name": "x.txt",
            "creationInfo": "_:creationinfo",
            "software_fileKind": "file",
            "verifiedUsing": [{
                "type": "Hash",
                "@id": "http://example.org/hash/x",
                "algorithm": "sha256",
                "hashValue": "abc123"
            }]
        }));
        let content = value.to_string();

        let lenient = DocumentValidator::new(false).validate_str("x", &content);
        assert!(lenient.is_valid);
        assert!(lenient.warning_count >= 1);

        let strict = DocumentValidator::new(true).validate_str("x", &content);
        assert!(!strict.is_valid);
    }

    #[test]
    fn test_json_report_lists_every_input() {
        let results = vec![
            validate_fixture("valid.jsonld", false),
            validate_fixture("dangling.jsonld", false),
        ];
        let report = render_report(&results, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["is_valid"], true);
        assert_eq!(value[1]["is_valid"], false);
        assert!(value[1]["violations"]
            .as_array()
            .unwrap()
            .iter()
            .any(|v| v["category"] == "relationships"));
    }

    #[test]
    fn test_not_json_is_structure_error() {
        let result = DocumentValidator::new(false).validate_str("<stdin>", "abc123 a.txt");
        assert_eq!(result.error_count, 1);
        assert_eq!(result.violations[0].category, ViolationCategory::Structure);
    }
}
