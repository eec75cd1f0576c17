use clipper_core::{host_of, parse_url_list};
use pretty_assertions::assert_eq;

#[test]
fn parses_in_order_and_collapses_duplicates() {
    let input = "https://a.example/post\nhttps://b.example/post\nhttps://a.example/post\n";
    let urls = parse_url_list(input);
    assert_eq!(
        urls,
        vec![
            "https://a.example/post".to_string(),
            "https://b.example/post".to_string(),
        ]
    );
}

#[test]
fn skips_blank_lines_and_comments() {
    let input = "\n# corpus sources\nhttps://a.example/one\n\n   \n# trailing note\nhttps://a.example/two\n";
    let urls = parse_url_list(input);
    assert_eq!(
        urls,
        vec![
            "https://a.example/one".to_string(),
            "https://a.example/two".to_string(),
        ]
    );
}

#[test]
fn trims_surrounding_whitespace() {
    let urls = parse_url_list("  https://a.example/padded  \n");
    assert_eq!(urls, vec!["https://a.example/padded".to_string()]);
}

#[test]
fn empty_input_yields_empty_list() {
    assert!(parse_url_list("").is_empty());
    assert!(parse_url_list("# only comments\n\n").is_empty());
}

#[test]
fn host_of_lowercases_and_tolerates_garbage() {
    assert_eq!(host_of("https://Example.COM/a/b?q=1"), "example.com");
    assert_eq!(host_of("not a url"), "");
}
