#![no_main]

use charcoder::charsets::for_name;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for name in ["UTF-8", "UTF-16BE", "UTF-16LE"] {
        let charset = for_name(name).unwrap();
        let bytes = charset.new_encoder().unwrap().encode_str(text).unwrap();
        let mut decoder = charset.new_decoder().unwrap();
        assert_eq!(decoder.decode_to_string(&bytes).unwrap(), text);
    }
});
