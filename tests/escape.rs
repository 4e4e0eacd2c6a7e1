use tcd_rs::escape::{decode, encode, split};

#[test]
fn encode_reserves_all_delimiters() {
    assert_eq!(encode("a;b"), "a\\;b");
    assert_eq!(encode("a,b"), "a\\,b");
    assert_eq!(encode("a\\b"), "a\\\\b");
    assert_eq!(encode("a\nb"), "a\\nb");
}

#[test]
fn roundtrip_all_reserved_combinations() {
    let samples = [
        "plain text",
        "semi;colon",
        "comma,separated",
        "back\\slash",
        "line\nfeed",
        ";,\\\n",
        "\\n is not a newline",
        "mix;of,all\\three\nkinds;,\\",
        "",
    ];
    for sample in samples {
        assert_eq!(decode(&encode(sample)), sample, "sample {sample:?}");
    }
}

#[test]
fn carriage_returns_vanish() {
    assert_eq!(decode(&encode("a\rb")), "ab");
    assert_eq!(encode("\r\r"), "");
    assert_eq!(decode("a\rb"), "ab");
}

#[test]
fn trailing_escape_is_dropped() {
    assert_eq!(decode("abc\\"), "abc");
    assert_eq!(decode("\\"), "");
}

#[test]
fn escape_before_ordinary_character_yields_it() {
    assert_eq!(decode("a\\bc"), "abc");
    assert_eq!(decode("\\;\\,"), ";,");
}

#[test]
fn split_ignores_escaped_delimiters() {
    assert_eq!(split("a;b;c", ';'), vec!["a", "b", "c"]);
    assert_eq!(split("a\\;b;c", ';'), vec!["a\\;b", "c"]);
    assert_eq!(split("a\\,b,c", ','), vec!["a\\,b", "c"]);
}

#[test]
fn split_keeps_empty_fields() {
    assert_eq!(split("a;;b", ';'), vec!["a", "", "b"]);
    assert_eq!(split(";a;", ';'), vec!["", "a", ""]);
}

#[test]
fn split_edge_cases() {
    assert_eq!(split("", ';'), Vec::<String>::new());
    assert_eq!(split("no delimiter", ';'), vec!["no delimiter"]);
}

#[test]
fn split_then_decode_recovers_fields() {
    let fields = ["first;half", "second,half", "third\\half"];
    let joined: Vec<String> = fields.iter().map(|f| encode(f)).collect();
    let line = joined.join(";");

    let decoded: Vec<String> = split(&line, ';').iter().map(|f| decode(f)).collect();
    assert_eq!(decoded, fields);
}
