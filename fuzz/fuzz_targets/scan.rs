#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate arfs_core;

use arfs_core::ArchiveSrc;

fuzz_target!(|data: &[u8]| {
    let _entries = data.entries();
});
