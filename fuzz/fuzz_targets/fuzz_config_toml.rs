#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Config parsing and catalog construction should never panic
        if let Ok(config) = toml::from_str::<mailconf::ControllerConfig>(content) {
            let _ = config.preset_catalog();
        }
    }
});
