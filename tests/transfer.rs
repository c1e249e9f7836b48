use stem_restyle_core::{from_base64, to_base64, RestyleError};

#[test]
fn encodes_with_standard_alphabet_and_padding() {
    assert_eq!(to_base64(b"hello"), "aGVsbG8=");
    assert_eq!(to_base64(&[0xfb, 0xff]), "+/8=");
    assert_eq!(to_base64(&[]), "");
}

#[test]
fn decodes_what_it_encodes() {
    let bytes: Vec<u8> = (0..=255u8).collect();
    assert_eq!(from_base64(&to_base64(&bytes)).unwrap(), bytes);
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(from_base64("  aGVsbG8=\n").unwrap(), b"hello");
}

#[test]
fn malformed_input_is_an_error() {
    match from_base64("not*base64") {
        Err(RestyleError::Base64(_)) => {}
        other => panic!("expected Base64 error, got {other:?}"),
    }
}
