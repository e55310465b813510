//! Fuzz target for CCPD filename decoding.
//!
//! Feeds arbitrary UTF-8 names to the plate box decoder, checking for
//! panics, crashes, or hangs.

#![no_main]

use ccpd_yolo::ccpd::fuzz_parse_plate_box;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(name) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_parse_plate_box(name);
});
