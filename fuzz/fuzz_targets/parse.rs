#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    confdiff_fuzz::fuzz_parse(data);
});
