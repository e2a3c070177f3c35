use cors_filter::cli::{evaluate, Probe};
use cors_filter::middleware::CorsConfig;

fn probe(method: &str) -> Probe {
    Probe {
        method: method.to_string(),
        path: "/".to_string(),
        ..Probe::default()
    }
}

#[test]
fn test_evaluate_get_with_defaults() {
    let evaluation = evaluate(None, &probe("GET")).unwrap();

    assert_eq!(evaluation.status, 200);
    assert!(evaluation.handler_invoked);
    assert_eq!(
        evaluation.headers.get("access-control-allow-origin").map(String::as_str),
        Some("*")
    );
    assert_eq!(evaluation.body_len, br#"{"ok":true}"#.len());
}

#[test]
fn test_evaluate_preflight_scenario() {
    let config = CorsConfig {
        allow_origins: vec!["localhost".into()],
        max_age: 3600,
        allow_credentials: true,
        ..CorsConfig::default()
    };
    let evaluation = evaluate(
        Some(config),
        &Probe {
            origin: Some("localhost".into()),
            request_headers: Some("X-OriginalRequest".into()),
            request_method: Some("POST".into()),
            ..probe("OPTIONS")
        },
    )
    .unwrap();

    assert_eq!(evaluation.status, 204);
    assert_eq!(evaluation.body_len, 0);
    assert!(!evaluation.handler_invoked);
    let header = |name: &str| evaluation.headers.get(name).map(String::as_str);
    assert_eq!(header("access-control-allow-origin"), Some("localhost"));
    assert_eq!(
        header("access-control-allow-methods"),
        Some("GET,HEAD,PUT,PATCH,POST,DELETE")
    );
    assert_eq!(header("access-control-allow-credentials"), Some("true"));
    assert_eq!(header("access-control-max-age"), Some("3600"));
    assert_eq!(header("access-control-allow-headers"), Some("X-OriginalRequest"));
    assert_eq!(
        header("vary"),
        Some("Origin, Access-Control-Request-Method, Access-Control-Request-Headers")
    );
}

#[test]
fn test_evaluate_skip_path() {
    let evaluation = evaluate(
        None,
        &Probe {
            path: "/health".into(),
            origin: Some("http://someorigin.com".into()),
            skip_paths: vec!["/health".into()],
            ..probe("GET")
        },
    )
    .unwrap();

    assert!(evaluation.handler_invoked);
    assert!(!evaluation
        .headers
        .keys()
        .any(|k| k.starts_with("access-control-")));
}

#[test]
fn test_evaluate_rejects_invalid_method() {
    assert!(evaluate(None, &probe("GE T")).is_err());
}

#[test]
fn test_evaluation_serializes_to_json() {
    let evaluation = evaluate(None, &probe("GET")).unwrap();
    let json = serde_json::to_value(&evaluation).unwrap();
    assert_eq!(json["status"], 200);
    assert_eq!(json["handler_invoked"], true);
    assert_eq!(json["headers"]["access-control-allow-origin"], "*");
}
