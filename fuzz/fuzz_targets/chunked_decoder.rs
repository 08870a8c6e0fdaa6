#![no_main]

use charcoder::charsets::for_name;
use charcoder::{CodingErrorAction, InputCursor, OutputCursor};
use libfuzzer_sys::fuzz_target;

// The first byte picks the chunk size. The rest is decoded in chunks and in
// one shot, and the two must agree.
fuzz_target!(|data: &[u8]| {
    let Some((&first, input)) = data.split_first() else {
        return;
    };
    let chunk = (first as usize % 16) + 1;

    let mut decoder = for_name("UTF-8").unwrap().new_decoder().unwrap();
    decoder.set_malformed_action(CodingErrorAction::Replace).unwrap();
    let expected = decoder.decode_all(input).unwrap();

    decoder.reset().unwrap();
    let mut decoded = Vec::new();
    let mut buffer = [0u16; 2];
    let chunks: Vec<&[u8]> = input.chunks(chunk).collect();
    for (i, &part) in chunks.iter().enumerate() {
        let mut src = InputCursor::new(part);
        loop {
            let mut dst = OutputCursor::new(&mut buffer);
            let res = decoder.decode(&mut src, &mut dst, i == chunks.len() - 1);
            decoded.extend_from_slice(dst.written());
            if res.unwrap().is_underflow() {
                break;
            }
        }
    }
    if chunks.is_empty() {
        let mut dst = OutputCursor::new(&mut buffer);
        decoder.decode(&mut InputCursor::new(&[]), &mut dst, true).unwrap();
    }
    let mut dst = OutputCursor::new(&mut buffer);
    assert!(decoder.flush(&mut dst).unwrap().is_underflow());
    assert_eq!(decoded, expected);
});
