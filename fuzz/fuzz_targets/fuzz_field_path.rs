#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Field path parsing should never panic, and parsed paths re-parse
        if let Ok(path) = content.parse::<mailconf::FieldPath>() {
            let again: mailconf::FieldPath = path.to_string().parse().unwrap();
            assert_eq!(path, again);
        }
    }
});
