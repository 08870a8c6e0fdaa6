//! This is the command line tool that loads an input file, transcodes it from
//! one charset to another and saves the result.

extern crate clap;
extern crate env_logger;
extern crate log;

use charcoder::charsets::{for_name, Registry};
use charcoder::{
    CodingErrorAction, CodingResult, Decoder, Encoder, InputCursor,
    OutputCursor,
};
use clap::{Arg, ArgAction, Command};

use std::{fs, time::Instant};
use std::{fs::File, io::Write, process};

fn save_file(data: &[u8], path: &str) {
    let mut f = File::create(path).expect("Can't create file");
    f.write_all(data).expect("Unable to write data");
    log::info!("Wrote {}.", &path);
}

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: std::time::Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::info!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

fn parse_action(name: &str) -> CodingErrorAction {
    match name {
        "ignore" => CodingErrorAction::Ignore,
        "replace" => CodingErrorAction::Replace,
        _ => CodingErrorAction::Report,
    }
}

/// Build the coders for the charsets 'from' and 'to', with the same error
/// actions on both sides.
fn open_coders(
    from: &str,
    to: &str,
    on_malformed: CodingErrorAction,
    on_unmappable: CodingErrorAction,
) -> CodingResult<(Decoder, Encoder)> {
    let mut decoder = for_name(from)?.new_decoder()?;
    decoder
        .set_malformed_action(on_malformed)?
        .set_unmappable_action(on_unmappable)?;
    let mut encoder = for_name(to)?.new_encoder()?;
    encoder
        .set_malformed_action(on_malformed)?
        .set_unmappable_action(on_unmappable)?;
    Ok((decoder, encoder))
}

/// Transcode the whole input with the one-shot operations.
fn transcode_all(
    decoder: &mut Decoder,
    encoder: &mut Encoder,
    input: &[u8],
) -> CodingResult<Vec<u8>> {
    let units = decoder.decode_all(input)?;
    log::info!("Decoded {} bytes into {} units.", input.len(), units.len());
    encoder.encode_all(&units)
}

/// Push 'units' through the encoder, collecting the bytes in 'dest'.
fn drain_units(
    encoder: &mut Encoder,
    units: &[u16],
    bytes: &mut [u8],
    dest: &mut Vec<u8>,
    end_of_input: bool,
) -> CodingResult<()> {
    let mut src = InputCursor::new(units);
    loop {
        let mut dst = OutputCursor::new(&mut *bytes);
        let res = encoder.encode(&mut src, &mut dst, end_of_input)?;
        dest.extend_from_slice(dst.written());
        res.into_result()?;
        if res.is_underflow() {
            return Ok(());
        }
    }
}

/// Transcode the input in chunks of 'chunk' bytes with the stepwise
/// operations, the way a stream would be processed.
fn transcode_chunked(
    decoder: &mut Decoder,
    encoder: &mut Encoder,
    input: &[u8],
    chunk: usize,
) -> CodingResult<Vec<u8>> {
    let mut units = vec![0u16; chunk.max(4)];
    let mut bytes = vec![0u8; 4 * chunk.max(4)];
    let mut dest = Vec::new();
    let mut chunks: Vec<&[u8]> = input.chunks(chunk).collect();
    if chunks.is_empty() {
        chunks.push(&[]);
    }
    let last = chunks.len() - 1;

    for (i, part) in chunks.into_iter().enumerate() {
        let end_of_input = i == last;
        let mut src = InputCursor::new(part);
        loop {
            let mut dst = OutputCursor::new(&mut units);
            let res = decoder.decode(&mut src, &mut dst, end_of_input)?;
            let decoded = dst.written().to_vec();
            drain_units(encoder, &decoded, &mut bytes, &mut dest, false)?;
            res.into_result()?;
            if res.is_underflow() {
                break;
            }
        }
    }

    loop {
        let mut dst = OutputCursor::new(&mut units);
        let res = decoder.flush(&mut dst)?;
        let decoded = dst.written().to_vec();
        drain_units(encoder, &decoded, &mut bytes, &mut dest, false)?;
        res.into_result()?;
        if res.is_underflow() {
            break;
        }
    }

    drain_units(encoder, &[], &mut bytes, &mut dest, true)?;
    loop {
        let mut dst = OutputCursor::new(&mut bytes);
        let res = encoder.flush(&mut dst)?;
        dest.extend_from_slice(dst.written());
        res.into_result()?;
        if res.is_underflow() {
            break;
        }
    }
    Ok(dest)
}

fn main() {
    let matches = Command::new("CLI")
        .version("1.x")
        .arg(
            Arg::new("list")
                .long("list")
                .help("List the supported charsets")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("from")
                .short('f')
                .long("from")
                .value_name("CHARSET")
                .help("The charset of the input")
                .num_args(1),
        )
        .arg(
            Arg::new("to")
                .short('t')
                .long("to")
                .value_name("CHARSET")
                .help("The charset of the output")
                .num_args(1),
        )
        .arg(
            Arg::new("on-malformed")
                .long("on-malformed")
                .value_name("action")
                .help("What to do with malformed input")
                .value_parser(["report", "ignore", "replace"])
                .num_args(1),
        )
        .arg(
            Arg::new("on-unmappable")
                .long("on-unmappable")
                .value_name("action")
                .help("What to do with unmappable characters")
                .value_parser(["report", "ignore", "replace"])
                .num_args(1),
        )
        .arg(
            Arg::new("chunk")
                .long("chunk")
                .value_name("BYTES")
                .help("Transcode the input in chunks of this size")
                .value_parser(clap::value_parser!(u64).range(1..))
                .num_args(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file")
                .num_args(1),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required_unless_present("list")
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    if matches.get_flag("list") {
        for name in Registry::with_builtins().names() {
            println!("{}", name);
        }
        return;
    }

    let from = matches
        .get_one::<String>("from")
        .cloned()
        .unwrap_or_else(|| String::from("UTF-8"));
    let to = matches
        .get_one::<String>("to")
        .cloned()
        .unwrap_or_else(|| String::from("UTF-8"));
    let on_malformed = matches
        .get_one::<String>("on-malformed")
        .map_or(CodingErrorAction::Report, |a| parse_action(a));
    let on_unmappable = matches
        .get_one::<String>("on-unmappable")
        .map_or(CodingErrorAction::Report, |a| parse_action(a));
    let chunk = matches.get_one::<u64>("chunk").map(|c| *c as usize);

    let input_path = matches.get_one::<String>("INPUT").unwrap();
    let input = fs::read(input_path).expect("Can't open the input file");

    // Come up with a file name.
    let out = matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| format!("{}.{}", input_path, to.to_lowercase()));

    let coders = open_coders(&from, &to, on_malformed, on_unmappable);
    let (mut decoder, mut encoder) = match coders {
        Ok(pair) => pair,
        Err(err) => {
            log::error!("{}", err);
            process::exit(1);
        }
    };

    log::info!(
        "Transcoding from {} to {}",
        decoder.charset_name().unwrap_or(&from),
        encoder.charset_name().unwrap_or(&to)
    );
    let x = Timer::new();
    let res = match chunk {
        Some(size) => {
            log::info!("Using chunks of {} bytes", size);
            transcode_chunked(&mut decoder, &mut encoder, &input, size)
        }
        None => transcode_all(&mut decoder, &mut encoder, &input),
    };

    match res {
        Ok(dest) => {
            log::info!("Transcoded from {} to {} bytes.", input.len(), dest.len());
            save_file(&dest, &out);
        }
        Err(err) => {
            log::error!("Transcoding failed: {}", err);
            drop(x);
            process::exit(1);
        }
    }

    drop(x);
}
