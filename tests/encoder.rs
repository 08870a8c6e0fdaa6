use charcoder::charsets::for_name;
use charcoder::{
    CoderResult, CodingError, CodingErrorAction, Encoder, InputCursor,
    OutputCursor, SessionState,
};

fn encoder(name: &str) -> Encoder {
    for_name(name).unwrap().new_encoder().unwrap()
}

#[test]
fn test_encode_str() {
    let mut encoder = encoder("UTF-8");
    let text = "plain, caf\u{e9}, \u{20ac}5, \u{1f600}";
    assert_eq!(encoder.encode_str(text).unwrap(), text.as_bytes());

    let mut encoder = self::encoder("UTF-16BE");
    assert_eq!(
        encoder.encode_str("a\u{1f600}").unwrap(),
        vec![0x00, 0x61, 0xd8, 0x3d, 0xde, 0x00]
    );
    let mut encoder = self::encoder("UTF-16LE");
    assert_eq!(encoder.encode_str("a\u{e9}").unwrap(), vec![0x61, 0x00, 0xe9, 0x00]);
}

#[test]
fn test_surrogate_pair_split_across_calls() {
    let mut encoder = encoder("UTF-8");
    let mut storage = [0u8; 8];

    let mut src = InputCursor::new(&[0xd83d]);
    let mut dst = OutputCursor::new(&mut storage);
    let res = encoder.encode(&mut src, &mut dst, false).unwrap();
    assert_eq!(res, CoderResult::Underflow);
    assert!(!src.has_remaining());
    assert_eq!(dst.position(), 0);

    let mut src = InputCursor::new(&[0xde00]);
    let res = encoder.encode(&mut src, &mut dst, true).unwrap();
    assert_eq!(res, CoderResult::Underflow);
    assert_eq!(dst.written(), "\u{1f600}".as_bytes());
    assert_eq!(encoder.flush(&mut dst).unwrap(), CoderResult::Underflow);
}

#[test]
fn test_lone_surrogates() {
    let mut encoder = encoder("UTF-8");
    assert_eq!(encoder.encode_all(&[0x61, 0xd83d]), Err(CodingError::Malformed(1)));
    assert_eq!(encoder.encode_all(&[0xde00, 0x61]), Err(CodingError::Malformed(1)));

    encoder.set_malformed_action(CodingErrorAction::Replace).unwrap();
    assert_eq!(encoder.encode_all(&[0x61, 0xd83d]).unwrap(), b"a?");
    assert_eq!(encoder.encode_all(&[0xd83d, 0x61]).unwrap(), b"?a");

    let mut encoder = self::encoder("UTF-16BE");
    encoder.set_malformed_action(CodingErrorAction::Replace).unwrap();
    assert_eq!(encoder.encode_all(&[0xdc00]).unwrap(), vec![0xff, 0xfd]);
}

#[test]
fn test_unmappable() {
    let mut encoder = encoder("US-ASCII");
    assert_eq!(encoder.encode_str("caf\u{e9}"), Err(CodingError::Unmappable(1)));

    encoder.set_unmappable_action(CodingErrorAction::Replace).unwrap();
    assert_eq!(encoder.encode_str("caf\u{e9}").unwrap(), b"caf?");
    encoder.set_unmappable_action(CodingErrorAction::Ignore).unwrap();
    assert_eq!(encoder.encode_str("caf\u{e9}!").unwrap(), b"caf!");

    // A supplementary character is one unmappable unit of two code units.
    let mut encoder = self::encoder("ISO-8859-1");
    assert_eq!(encoder.encode_str("\u{e9}").unwrap(), vec![0xe9]);
    assert_eq!(encoder.encode_str("x\u{1f600}"), Err(CodingError::Unmappable(2)));
}

#[test]
fn test_unmappable_leaves_input() {
    let mut encoder = encoder("US-ASCII");
    let units: Vec<u16> = "ab\u{e9}c".encode_utf16().collect();
    let mut storage = [0u8; 8];

    let mut src = InputCursor::new(&units);
    let mut dst = OutputCursor::new(&mut storage);
    let res = encoder.encode(&mut src, &mut dst, true).unwrap();
    assert_eq!(res, CoderResult::Unmappable(1));
    assert_eq!(src.position(), 2);
    assert_eq!(dst.written(), b"ab");

    // Reporting again gives the same answer.
    let res = encoder.encode(&mut src, &mut dst, true).unwrap();
    assert_eq!(res, CoderResult::Unmappable(1));
    assert_eq!(src.position(), 2);

    encoder.set_unmappable_action(CodingErrorAction::Replace).unwrap();
    let res = encoder.encode(&mut src, &mut dst, true).unwrap();
    assert_eq!(res, CoderResult::Underflow);
    assert_eq!(dst.written(), b"ab?c");
}

#[test]
fn test_can_encode() {
    let mut encoder = encoder("US-ASCII");
    encoder.set_unmappable_action(CodingErrorAction::Replace).unwrap();

    assert!(encoder.can_encode_str("plain text").unwrap());
    assert!(!encoder.can_encode_str("caf\u{e9}").unwrap());
    assert!(encoder.can_encode_char(0x41).unwrap());
    assert!(!encoder.can_encode_char(0xd83d).unwrap());
    assert!(encoder.can_encode(&[]).unwrap());

    // The configuration is left alone.
    assert_eq!(encoder.unmappable_action(), CodingErrorAction::Replace);
    assert_eq!(encoder.malformed_action(), CodingErrorAction::Report);
    assert_eq!(encoder.state(), SessionState::Reset);
}

#[test]
fn test_can_encode_during_session() {
    let mut encoder = encoder("UTF-8");
    let mut storage = [0u8; 8];
    let mut src = InputCursor::new(&[0x61]);
    let mut dst = OutputCursor::new(&mut storage);
    encoder.encode(&mut src, &mut dst, false).unwrap();

    assert_eq!(
        encoder.can_encode_char(0x62),
        Err(CodingError::IllegalState {
            current: SessionState::Coding,
            requested: SessionState::Coding,
        })
    );

    let mut src = InputCursor::new(&[]);
    encoder.encode(&mut src, &mut dst, true).unwrap();
    assert!(encoder.can_encode_char(0x62).is_err());

    encoder.flush(&mut dst).unwrap();
    assert!(encoder.can_encode_char(0x62).unwrap());
    assert_eq!(encoder.state(), SessionState::Reset);
}

#[test]
fn test_default_replacements() {
    assert_eq!(encoder("US-ASCII").replacement(), b"?");
    assert_eq!(encoder("UTF-8").replacement(), b"?");
    assert_eq!(encoder("UTF-16BE").replacement(), &[0xff, 0xfd]);
    assert_eq!(encoder("UTF-16LE").replacement(), &[0xfd, 0xff]);
}

#[test]
fn test_replacement_checks() {
    let mut encoder = encoder("US-ASCII");
    assert_eq!(
        encoder.set_replacement(&[0x80]),
        Err(CodingError::IllegalReplacement("not legal for this charset"))
    );
    assert_eq!(
        encoder.set_replacement(&[]),
        Err(CodingError::IllegalReplacement("empty replacement"))
    );
    encoder.set_replacement(b"*").unwrap();
    encoder.set_unmappable_action(CodingErrorAction::Replace).unwrap();
    assert_eq!(encoder.encode_str("\u{e9}t\u{e9}").unwrap(), b"*t*");

    let mut encoder = self::encoder("UTF-8");
    assert!(encoder.is_legal_replacement(&[0xc3, 0xa9]));
    assert!(!encoder.is_legal_replacement(&[0xc3]));
    assert_eq!(
        encoder.set_replacement("\u{1f600}".as_bytes()),
        Err(CodingError::IllegalReplacement("replacement too long"))
    );
    encoder.set_replacement(&[0xc3, 0xa9]).unwrap();
    assert_eq!(encoder.replacement(), &[0xc3, 0xa9]);

    // Half of a UTF-16 code unit is never legal.
    let mut encoder = self::encoder("UTF-16BE");
    assert!(encoder.set_replacement(b"?").is_err());
    encoder.set_replacement(&[0x00, 0x3f]).unwrap();
}

#[test]
fn test_capacity_hints() {
    let encoder = encoder("UTF-8");
    assert_eq!(encoder.average_bytes_per_char(), 1.1);
    assert_eq!(encoder.max_bytes_per_char(), 3.0);
}
