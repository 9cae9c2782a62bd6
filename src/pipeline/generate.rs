//! The generate stage: read every source, then assemble the document.

use super::assemble::{DocumentAssembler, DocumentSettings};
use crate::error::Result;
use crate::input::InputSource;
use crate::model::{DataPackageDocument, ModelFactory};

/// Read all sources in order and assemble a single document.
///
/// The first failure aborts the run; no partial document is returned.
pub fn build_document(
    factory: ModelFactory,
    settings: &DocumentSettings,
    sources: &[InputSource],
) -> Result<DataPackageDocument> {
    let mut assembler = DocumentAssembler::new(factory, settings)?;
    for source in sources {
        let lines = source.for_each_line(|_, line| assembler.push_line(line))?;
        tracing::debug!("Read {lines} lines from {source}");
    }
    let document = assembler.finish()?;
    tracing::info!(
        "Assembled dataset {} with {} files",
        document.dataset().name(),
        document.file_count()
    );
    Ok(document)
}
