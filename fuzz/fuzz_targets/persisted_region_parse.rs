//! Fuzz target for persisted region values.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfregions::region::Region;
use pdfregions::serialize::{deserialize_region, from_persisted_slice};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(persisted) = from_persisted_slice(data) {
        if let Ok(entry) = deserialize_region(&persisted) {
            let _ = Region::derive(&entry);
        }
    }
});
