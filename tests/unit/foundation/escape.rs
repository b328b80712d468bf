use super::*;

#[test]
fn colon_and_quote_get_one_backslash_each() {
    assert_eq!(escape_graph_value("hi'there").as_str(), "hi\\'there");
    assert_eq!(escape_graph_value("a:b:c").as_str(), "a\\:b\\:c");
    assert_eq!(
        escape_graph_value("it's 10:30").as_str(),
        "it\\'s 10\\:30"
    );
}

#[test]
fn other_characters_pass_through() {
    let raw = "Arey yaar, subah walk [ok]; 100% \\ नमस्ते";
    assert_eq!(escape_graph_value(raw).as_str(), raw);
}

#[test]
fn empty_text_is_legal() {
    assert_eq!(escape_graph_value("").as_str(), "");
}

#[test]
fn each_special_char_is_preceded_by_exactly_one_backslash() {
    let escaped = escape_graph_value("x:'y'::z");
    let s = escaped.as_str();
    assert_eq!(s, "x\\:\\'y\\'\\:\\:z");
    let bytes = s.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b':' || *b == b'\'' {
            assert_eq!(bytes[i - 1], b'\\');
            assert!(i < 2 || bytes[i - 2] != b'\\');
        }
    }
}

#[test]
fn paths_are_normalized_then_escaped() {
    let p = Path::new("C:\\subs\\it's.srt");
    assert_eq!(escape_graph_path(p).as_str(), "C\\:/subs/it\\'s.srt");
    let p = Path::new("/tmp/job/in.srt");
    assert_eq!(escape_graph_path(p).as_str(), "/tmp/job/in.srt");
}

#[test]
fn concat_paths_use_single_quote_splicing() {
    assert_eq!(quote_concat_path("/tmp/a.jpg"), "'/tmp/a.jpg'");
    assert_eq!(quote_concat_path("/tmp/it's.jpg"), "'/tmp/it'\\''s.jpg'");
}

#[test]
fn escaped_text_serializes_as_plain_string() {
    let v = serde_json::to_value(escape_graph_value("a:b")).unwrap();
    assert_eq!(v, serde_json::json!("a\\:b"));
}

#[test]
fn graph_tokens_splice_embedded_quotes() {
    assert_eq!(quote_graph_token("gte(t,0)*lt(t,2)"), "'gte(t,0)*lt(t,2)'");
    let escaped = escape_graph_value("hi'there");
    assert_eq!(quote_graph_token(escaped.as_str()), "'hi\\'\\''there'");
    assert_eq!(quote_graph_token(""), "''");
}
