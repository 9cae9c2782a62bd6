#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the `<hash> <filename>` line parser.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = datapackage_tools::pipeline::records::parse_line(s);
    }
});
