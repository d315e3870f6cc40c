#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate arfs_core;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = arfs_core::RawHeader::from_bytes(data) {
        let _header = raw.decode();
    }
});
