#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 must surface as an error, never a panic
    let _ = tcod_config::from_slice::<serde_json::Value>(data);
    let _ = tcod_config::from_slice::<Vec<serde_json::Value>>(data);
});
