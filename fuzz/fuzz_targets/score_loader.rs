#![no_main]

use libfuzzer_sys::fuzz_target;
use nfgrapher_score::fuzz_parse_score;

fuzz_target!(|data: &[u8]| {
    fuzz_parse_score(data);
});
