//! Benchmark for the stepwise decoder and the one-shot operations.

fn get_mixed_text(items: usize) -> Vec<u8> {
    let words = ["plain ", "caf\u{e9} ", "\u{20ac}12 ", "\u{1f600} ", "na\u{ef}ve\n"];
    let mut input = Vec::new();
    for i in 0..items {
        input.extend_from_slice(words[(i * 7) % words.len()].as_bytes());
    }
    input
}

fn decode_in_chunks(decoder: &mut Decoder, input: &[u8], chunk: usize) -> usize {
    let mut buffer = vec![0u16; chunk];
    let mut written = 0;
    let chunks: Vec<&[u8]> = input.chunks(chunk).collect();
    decoder.reset().unwrap();
    for (i, &part) in chunks.iter().enumerate() {
        let mut src = InputCursor::new(part);
        loop {
            let mut dst = OutputCursor::new(&mut buffer);
            let res = decoder.decode(&mut src, &mut dst, i == chunks.len() - 1);
            written += dst.position();
            if res.unwrap().is_underflow() {
                break;
            }
        }
    }
    written
}

fn decode_one_shot() {
    let input = get_mixed_text(100_000);
    let mut decoder = for_name("UTF-8").unwrap().new_decoder().unwrap();
    black_box(decoder.decode_all(&input).unwrap());
}

fn decode_small_chunks() {
    let input = get_mixed_text(100_000);
    let mut decoder = for_name("UTF-8").unwrap().new_decoder().unwrap();
    black_box(decode_in_chunks(&mut decoder, &input, 7));
}

fn decode_large_chunks() {
    let input = get_mixed_text(100_000);
    let mut decoder = for_name("UTF-8").unwrap().new_decoder().unwrap();
    black_box(decode_in_chunks(&mut decoder, &input, 1 << 16));
}

fn encode_utf16() {
    let input = get_mixed_text(100_000);
    let text = String::from_utf8(input).unwrap();
    let mut encoder = for_name("UTF-16LE").unwrap().new_encoder().unwrap();
    black_box(encoder.encode_str(&text).unwrap());
}

use charcoder::charsets::for_name;
use charcoder::{Decoder, InputCursor, OutputCursor};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("decode_one_shot", |b| b.iter(decode_one_shot));
    c.bench_function("decode_small_chunks", |b| b.iter(decode_small_chunks));
    c.bench_function("decode_large_chunks", |b| b.iter(decode_large_chunks));
    c.bench_function("encode_utf16", |b| b.iter(encode_utf16));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
