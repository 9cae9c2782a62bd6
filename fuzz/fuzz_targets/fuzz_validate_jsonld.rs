#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the JSON-LD reader and every validation check behind it.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = datapackage_tools::DocumentValidator::new(true).validate_str("<fuzz>", s);
    }
});
