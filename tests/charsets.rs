use charcoder::charsets::{ascii, for_name, latin1, Charset, Registry};
use charcoder::{CodingError, CodingErrorAction, Decoder};

#[test]
fn test_builtin_names() {
    let registry = Registry::with_builtins();
    assert_eq!(
        registry.names(),
        vec!["ISO-8859-1", "US-ASCII", "UTF-16BE", "UTF-16LE", "UTF-8"]
    );
    for name in registry.names() {
        assert_eq!(registry.lookup(name).unwrap().name(), name);
    }
}

#[test]
fn test_lookup() {
    assert_eq!(for_name("utf-8").unwrap().name(), "UTF-8");
    assert_eq!(for_name("UTF8").unwrap().name(), "UTF-8");
    assert_eq!(for_name("Latin1").unwrap().name(), "ISO-8859-1");
    assert_eq!(for_name("ascii").unwrap().name(), "US-ASCII");
    assert_eq!(for_name("x-utf-16le").unwrap().name(), "UTF-16LE");
    assert!(for_name("US-ASCII").unwrap().aliases().contains(&"cp367".to_string()));

    assert_eq!(
        for_name("EBCDIC").unwrap_err(),
        CodingError::UnsupportedCharset("EBCDIC".to_string())
    );
    assert!(!Registry::new().is_supported("UTF-8"));
}

#[test]
fn test_register() {
    let mut registry = Registry::with_builtins();
    let custom = Charset::new(
        "X-LATIN",
        &["latin1"],
        latin1::decoder,
        latin1::DECODE_HINTS,
        ascii::encoder,
        ascii::ENCODE_HINTS,
    );
    registry.register(custom);

    assert!(registry.is_supported("x-latin"));
    // The alias now points at the new charset.
    assert_eq!(registry.lookup("latin1").unwrap().name(), "X-LATIN");
    assert_eq!(registry.lookup("ISO-8859-1").unwrap().name(), "ISO-8859-1");
    assert_eq!(registry.names().len(), 6);

    let charset = registry.lookup("x-latin").unwrap();
    let mut decoder = charset.new_decoder().unwrap();
    assert_eq!(decoder.decode_to_string(b"caf\xe9").unwrap(), "caf\u{e9}");
    let mut encoder = charset.new_encoder().unwrap();
    assert!(!encoder.can_encode_str("caf\u{e9}").unwrap());
}

#[test]
fn test_round_trips() {
    let text = "Grüße, ¿qué tal? \u{20ac}10 \u{1f600}\u{10ffff}";
    for name in ["UTF-8", "UTF-16BE", "UTF-16LE"] {
        let charset = for_name(name).unwrap();
        let bytes = charset.new_encoder().unwrap().encode_str(text).unwrap();
        let decoded = charset.new_decoder().unwrap().decode_to_string(&bytes).unwrap();
        assert_eq!(decoded, text, "round trip through {}", name);
    }

    let latin: Vec<u8> = (0..=255).collect();
    let charset = for_name("ISO-8859-1").unwrap();
    let decoded = charset.new_decoder().unwrap().decode_all(&latin).unwrap();
    let encoded = charset.new_encoder().unwrap().encode_all(&decoded).unwrap();
    assert_eq!(encoded, latin);
}

#[test]
fn test_ascii_boundaries() {
    let charset = for_name("US-ASCII").unwrap();
    let mut decoder = charset.new_decoder().unwrap();
    let decoded = decoder.decode_all(&[0x00, 0x7f]).unwrap();
    assert_eq!(decoded, vec![0x00, 0x7f]);
    assert_eq!(decoder.decode_all(&[0x80]), Err(CodingError::Malformed(1)));

    decoder.set_malformed_action(CodingErrorAction::Replace).unwrap();
    assert_eq!(decoder.decode_to_string(b"a\x80\xffb").unwrap(), "a\u{fffd}\u{fffd}b");
}

#[test]
fn test_utf8_maximal_subparts() {
    let mut decoder = for_name("UTF-8").unwrap().new_decoder().unwrap();
    decoder.set_malformed_action(CodingErrorAction::Replace).unwrap();

    // Each maximal invalid subpart becomes one replacement.
    let cases: [(&[u8], &str); 6] = [
        (b"\xc0\xaf", "\u{fffd}\u{fffd}"),
        (b"\xe0\x80\xaf", "\u{fffd}\u{fffd}\u{fffd}"),
        (b"\xed\xa0\x80", "\u{fffd}\u{fffd}\u{fffd}"),
        (b"\xf4\x90\x80\x80", "\u{fffd}\u{fffd}\u{fffd}\u{fffd}"),
        (b"\xf0\x9f\x98", "\u{fffd}"),
        (b"\xe2\x82\x41", "\u{fffd}A"),
    ];
    for (input, expected) in cases {
        assert_eq!(decoder.decode_to_string(input).unwrap(), expected);
    }
}

#[test]
fn test_utf16_decoding() {
    let mut decoder = for_name("UTF-16LE").unwrap().new_decoder().unwrap();
    assert_eq!(decoder.decode_to_string(&[0x3d, 0xd8, 0x00, 0xde]).unwrap(), "\u{1f600}");
    assert_eq!(decoder.decode_all(&[0x00, 0xdc]), Err(CodingError::Malformed(2)));
    assert_eq!(decoder.decode_all(&[0x3d, 0xd8, 0x41, 0x00]), Err(CodingError::Malformed(2)));
    assert_eq!(decoder.decode_all(&[0x41]), Err(CodingError::Malformed(1)));

    decoder.set_malformed_action(CodingErrorAction::Ignore).unwrap();
    assert_eq!(decoder.decode_to_string(&[0x3d, 0xd8, 0x41, 0x00]).unwrap(), "A");
}

#[test]
fn test_coders_know_their_charset() {
    let charset = for_name("latin1").unwrap();
    let decoder = charset.new_decoder().unwrap();
    assert_eq!(decoder.charset_name(), Some("ISO-8859-1"));
    assert_eq!(decoder.charset().unwrap().name(), "ISO-8859-1");
    let encoder = charset.new_encoder().unwrap();
    assert_eq!(encoder.charset_name(), Some("ISO-8859-1"));
    assert!(encoder.charset().unwrap().aliases().contains(&"latin1".to_string()));

    // A coder built straight from a transform has no charset.
    let decoder = Decoder::new(latin1::decoder(), latin1::DECODE_HINTS).unwrap();
    assert!(decoder.charset().is_none());
    assert_eq!(decoder.charset_name(), None);
}
