use std::time::Duration;

use clipper_core::HarvestConfig;
use clipper_engine::{is_pdf_response, FetchErrorKind, Fetcher, IdentityPool, PoliteFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Zero politeness delay and short backoff so the suite stays fast.
fn test_config() -> HarvestConfig {
    let mut config = HarvestConfig::default();
    config.delay_range = 0.0..=0.0;
    config.second_chance.delay_range = 0.0..=0.0;
    config.retry.backoff_base = Duration::from_millis(5);
    config
}

/// The fetcher is blocking, so the mock server gets its own runtime with
/// worker threads that keep serving while the test thread blocks.
fn start_server() -> (tokio::runtime::Runtime, MockServer) {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("test runtime");
    let server = runtime.block_on(MockServer::start());
    (runtime, server)
}

#[test]
fn fetch_returns_body_and_rotating_identity_headers() {
    clipper_logging::initialize_for_tests();
    let (runtime, server) = start_server();
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/article"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
            )
            .mount(&server),
    );

    let fetcher = PoliteFetcher::new(test_config()).expect("fetcher");
    let url = format!("{}/article", server.uri());
    let success = fetcher.fetch(&url).expect("fetch ok");

    assert_eq!(success.bytes, b"<html>ok</html>");
    assert!(success.content_type.unwrap().starts_with("text/html"));
    assert_eq!(success.final_url, url);

    let requests = runtime
        .block_on(server.received_requests())
        .expect("request recording");
    assert_eq!(requests.len(), 1);
    let user_agent = requests[0]
        .headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .expect("user agent sent");
    assert!(
        IdentityPool::user_agents().contains(&user_agent),
        "unexpected signature: {user_agent}"
    );
    let referer = requests[0]
        .headers
        .get("referer")
        .and_then(|value| value.to_str().ok())
        .expect("referer sent");
    assert_eq!(referer, "http://127.0.0.1");
    assert!(requests[0].headers.get("accept-language").is_some());
}

#[test]
fn transient_status_is_retried_until_success() {
    clipper_logging::initialize_for_tests();
    let (runtime, server) = start_server();
    runtime.block_on(async {
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("recovered", "text/html"))
            .mount(&server)
            .await;
    });

    let fetcher = PoliteFetcher::new(test_config()).expect("fetcher");
    let url = format!("{}/flaky", server.uri());
    let success = fetcher.fetch(&url).expect("recovers after retries");
    assert_eq!(success.bytes, b"recovered");
}

#[test]
fn retryable_status_exhausts_and_surfaces_the_code() {
    clipper_logging::initialize_for_tests();
    let (runtime, server) = start_server();
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server),
    );

    let mut config = test_config();
    config.retry.max_retries = 1;
    let fetcher = PoliteFetcher::new(config).expect("fetcher");
    let url = format!("{}/missing", server.uri());

    let error = fetcher.fetch(&url).unwrap_err();
    assert_eq!(error.kind, FetchErrorKind::HttpStatus(404));

    // Initial attempt plus exactly one retry.
    let requests = runtime
        .block_on(server.received_requests())
        .expect("request recording");
    assert_eq!(requests.len(), 2);
}

#[test]
fn non_retryable_status_fails_on_the_first_attempt() {
    clipper_logging::initialize_for_tests();
    let (runtime, server) = start_server();
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server),
    );

    let fetcher = PoliteFetcher::new(test_config()).expect("fetcher");
    let url = format!("{}/gone", server.uri());

    let error = fetcher.fetch(&url).unwrap_err();
    assert_eq!(error.kind, FetchErrorKind::HttpStatus(410));

    let requests = runtime
        .block_on(server.received_requests())
        .expect("request recording");
    assert_eq!(requests.len(), 1);
}

#[test]
fn slow_response_times_out() {
    clipper_logging::initialize_for_tests();
    let (runtime, server) = start_server();
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(250))
                    .set_body_string("slow"),
            )
            .mount(&server),
    );

    let mut config = test_config();
    config.request_timeout = Duration::from_millis(50);
    config.retry.max_retries = 0;
    let fetcher = PoliteFetcher::new(config).expect("fetcher");
    let url = format!("{}/slow", server.uri());

    let error = fetcher.fetch(&url).unwrap_err();
    assert_eq!(error.kind, FetchErrorKind::Timeout);
}

#[test]
fn oversize_response_is_rejected() {
    clipper_logging::initialize_for_tests();
    let (runtime, server) = start_server();
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/large"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/html")
                    .set_body_string("0123456789!"),
            )
            .mount(&server),
    );

    let mut config = test_config();
    config.max_bytes = 10;
    let fetcher = PoliteFetcher::new(config).expect("fetcher");
    let url = format!("{}/large", server.uri());

    let error = fetcher.fetch(&url).unwrap_err();
    assert_eq!(error.kind, FetchErrorKind::TooLarge { max_bytes: 10 });
}

#[test]
fn unparsable_url_is_an_invalid_url_error() {
    clipper_logging::initialize_for_tests();
    let fetcher = PoliteFetcher::new(test_config()).expect("fetcher");
    let error = fetcher.fetch("not a url").unwrap_err();
    assert_eq!(error.kind, FetchErrorKind::InvalidUrl);
}

#[test]
fn pdf_classification_checks_content_type_and_path() {
    assert!(is_pdf_response(
        Some("application/pdf"),
        "https://x.example/paper"
    ));
    assert!(is_pdf_response(
        Some("Application/PDF; charset=binary"),
        "https://x.example/paper"
    ));
    assert!(is_pdf_response(
        Some("text/html"),
        "https://x.example/files/Report.PDF?download=1"
    ));
    assert!(!is_pdf_response(Some("text/html"), "https://x.example/post"));
    assert!(!is_pdf_response(None, "https://x.example/pdf-guide"));
}
