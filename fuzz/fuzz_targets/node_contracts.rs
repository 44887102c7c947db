#![no_main]

use libfuzzer_sys::fuzz_target;
use nfgrapher_contract::fuzz_type_score;

fuzz_target!(|data: &[u8]| {
    fuzz_type_score(data);
});
