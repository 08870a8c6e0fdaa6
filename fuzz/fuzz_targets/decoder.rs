#![no_main]

use charcoder::charsets::Registry;
use charcoder::CodingErrorAction;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let registry = Registry::with_builtins();
    for name in registry.names() {
        let mut decoder = registry.lookup(name).unwrap().new_decoder().unwrap();
        let _ = decoder.decode_all(data);
        decoder.set_malformed_action(CodingErrorAction::Replace).unwrap();
        decoder.decode_all(data).unwrap();
    }
});
