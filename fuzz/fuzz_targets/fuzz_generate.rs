#![no_main]
use datapackage_tools::model::{ModelFactory, SequentialIds};
use datapackage_tools::{DocumentAssembler, DocumentSettings, JsonLdWriter};
use libfuzzer_sys::fuzz_target;

/// Fuzz document assembly and serialization with arbitrary line batches.
///
/// Every line that is accepted must end up in a document the writer can
/// serialize.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(factory) =
        ModelFactory::with_id_source("http://example.org/", "fuzz", Box::new(SequentialIds::new()))
    else {
        return;
    };
    let Ok(mut assembler) = DocumentAssembler::new(factory, &DocumentSettings::new("b", "d"))
    else {
        return;
    };
    for line in s.lines() {
        let _ = assembler.push_line(line);
    }
    if let Ok(document) = assembler.finish() {
        assert!(JsonLdWriter::new().to_string(&document).is_ok());
    }
});
