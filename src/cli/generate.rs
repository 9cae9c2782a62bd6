//! Generate command handler.
//!
//! Implements the `generate` subcommand: read `<hash> <name>` lines and
//! write one SPDX 3.0.1 data package document.

use super::{check_config, emit};
use crate::config::GenerateConfig;
use crate::input::InputSource;
use crate::jsonld::JsonLdWriter;
use crate::model::ModelFactory;
use crate::pipeline::{build_document, exit_codes, DocumentSettings, OutputTarget};
use anyhow::{Context, Result};

/// Run the generate command, returning the desired exit code.
///
/// Nothing is written unless every input line was turned into a record.
#[allow(clippy::needless_pass_by_value)]
pub fn run_generate(config: GenerateConfig) -> Result<i32> {
    check_config(&config)?;

    let factory = ModelFactory::new(&config.prefix, &config.agent)
        .context("Failed to set up the document factory")?;
    let settings = DocumentSettings {
        bom_name: config.bom_name.clone(),
        dataset_name: config.dataset_name.clone(),
        dataset_type: config.dataset_type,
        confidentiality_level: config.confidentiality_level,
    };
    let sources = InputSource::from_args(&config.inputs);

    let document = build_document(factory, &settings, &sources)?;

    let mut rendered = JsonLdWriter::new()
        .compact(config.compact)
        .to_string(&document)?;
    rendered.push('\n');

    let target = OutputTarget::from_option(config.output_file);
    emit(rendered.as_bytes(), &target)?;
    Ok(exit_codes::SUCCESS)
}
