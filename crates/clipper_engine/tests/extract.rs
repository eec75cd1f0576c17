use clipper_engine::{
    decode_body, normalize_text, Extractor, ExtractorSettings, HeuristicExtractor,
};
use pretty_assertions::assert_eq;

fn extract(html: &str) -> clipper_engine::Extraction {
    HeuristicExtractor::default().extract(html)
}

#[test]
fn prefers_article_and_reads_the_title() {
    let html = r#"
    <html><head><title> Sample Post </title></head>
    <body>
        <p>Stray paragraph outside the article body</p>
        <article>
            <h1>Heading words here</h1>
            <p>First paragraph with enough words.</p>
        </article>
    </body></html>
    "#;
    let extraction = extract(html);
    assert_eq!(extraction.title, "Sample Post");
    assert_eq!(
        extraction.content,
        "Heading words here\nFirst paragraph with enough words."
    );
}

#[test]
fn falls_back_to_main_then_body() {
    let html = r#"
    <html><body>
        <p>Outside text paragraph</p>
        <main><p>Inside main paragraph</p></main>
    </body></html>
    "#;
    let extraction = extract(html);
    assert_eq!(extraction.content, "Inside main paragraph");

    let html = r#"<html><body><p>Body only paragraph</p></body></html>"#;
    let extraction = extract(html);
    assert_eq!(extraction.title, "");
    assert_eq!(extraction.content, "Body only paragraph");
}

#[test]
fn strips_scripting_and_chrome_tags() {
    let html = r#"
    <html><body>
        <nav>Site navigation links</nav>
        <article>
            <script>var tracker = "beacon";</script>
            <style>p { color: red }</style>
            <p>Actual article sentence that should survive.</p>
        </article>
        <footer>Copyright notice text</footer>
    </body></html>
    "#;
    let extraction = extract(html);
    assert_eq!(extraction.content, "Actual article sentence that should survive.");
}

#[test]
fn strips_elements_by_id_and_class_hints() {
    let html = r#"
    <html><body><article>
        <div class="sidebar-widget">Trending stories this afternoon</div>
        <div id="Promo-Box">Limited time offering today</div>
        <p>The one paragraph that matters.</p>
    </article></body></html>
    "#;
    let extraction = extract(html);
    assert_eq!(extraction.content, "The one paragraph that matters.");
}

#[test]
fn drops_noise_lines_and_short_lines() {
    let html = r#"
    <html><body><article>
        <p>Please subscribe to our newsletter</p>
        <p>Home</p>
        <p>ok</p>
        <p>A meaningful sentence about the topic at hand.</p>
        <p>We use cookie technology on this site</p>
    </article></body></html>
    "#;
    let extraction = extract(html);
    assert_eq!(
        extraction.content,
        "A meaningful sentence about the topic at hand."
    );
}

#[test]
fn normalizes_nbsp_and_whitespace_runs() {
    let html = "<html><body><article><p>alpha\u{00A0}\u{00A0}beta\t\tgamma</p></article></body></html>";
    let extraction = extract(html);
    assert_eq!(extraction.content, "alpha beta gamma");
}

#[test]
fn falls_back_to_whole_document_when_container_is_all_noise() {
    let html = r#"
    <html><head><title>Completely Valid Title Line</title></head>
    <body><article><p>Subscribe</p></article></body></html>
    "#;
    let extraction = extract(html);
    assert_eq!(extraction.title, "Completely Valid Title Line");
    assert_eq!(extraction.content, "Completely Valid Title Line");
}

#[test]
fn empty_document_extracts_to_empty_strings() {
    let extraction = extract("<html></html>");
    assert_eq!(extraction.title, "");
    assert_eq!(extraction.content, "");
}

#[test]
fn noise_line_filter_is_case_insensitive() {
    let settings = ExtractorSettings::default();
    let filtered = settings.drop_noise_lines(
        "PLEASE SUBSCRIBE TO OUR NEWSLETTER\nReal content line here\nEnter OTP to continue",
    );
    assert_eq!(filtered, "Real content line here");
}

#[test]
fn decode_honors_content_type_charset() {
    let bytes = b"caf\xe9"; // latin-1
    let decoded = decode_body(bytes, Some("text/html; charset=ISO-8859-1"));
    assert_eq!(decoded.text, "café");
    assert!(
        decoded.encoding.eq_ignore_ascii_case("ISO-8859-1")
            || decoded.encoding.eq_ignore_ascii_case("windows-1252")
    );
}

#[test]
fn decode_honors_byte_order_mark() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_body(bytes, Some("text/html"));
    assert_eq!(decoded.text, "hello");
    assert_eq!(decoded.encoding, "UTF-8");
}

#[test]
fn decode_guesses_when_headers_are_silent() {
    let decoded = decode_body("plain utf-8 text".as_bytes(), None);
    assert_eq!(decoded.text, "plain utf-8 text");
}

#[test]
fn normalize_collapses_newline_runs() {
    assert_eq!(normalize_text("a\n\n\n\n\nb"), "a\n\nb");
    assert_eq!(normalize_text("  padded   out  "), "padded out");
    assert_eq!(normalize_text("keep\n\ntwo"), "keep\n\ntwo");
}
