use jmx2locust::parser::{self, EnabledPolicy, PostProcessorRule};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn test_extract_api_plan() {
    let path = PathBuf::from("fixtures/api-plan.jmx");
    let plan = parser::extract_file(&path, EnabledPolicy::Present).unwrap();

    // 4 个 Sampler 中有 1 个没有 enabled 属性
    assert_eq!(plan.test_cases.len(), 3);

    let urls: Vec<_> = plan
        .test_cases
        .iter()
        .map(|c| c.url.as_deref().unwrap())
        .collect();
    assert_eq!(urls, vec!["/api/login", "/api/users", "/api/users/${user_id}"]);
    assert!(!urls.contains(&"/api/legacy/report"));
}

#[test]
fn test_login_params_and_own_headers() {
    let plan = parser::extract_file("fixtures/api-plan.jmx", EnabledPolicy::Present).unwrap();
    let login = &plan.test_cases[0];

    assert_eq!(login.method.as_deref(), Some("POST"));
    assert_eq!(
        login.params,
        Some(json!({"username": "alice", "password": "${password}", "remember": true}))
    );

    let headers = login.headers.as_ref().unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("Content-Type"), Some("application/json"));
    // 自身的 HeaderManager 完全替代默认值
    assert_eq!(headers.get("User-Agent"), None);
}

#[test]
fn test_sampler_without_header_manager_inherits_default() {
    let plan = parser::extract_file("fixtures/api-plan.jmx", EnabledPolicy::Present).unwrap();
    let list_users = &plan.test_cases[1];

    assert_eq!(list_users.params, None);
    let headers = list_users.headers.as_ref().unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("User-Agent"), Some("jmeter-load-test"));
}

#[test]
fn test_non_json_argument_is_dropped() {
    let plan = parser::extract_file("fixtures/api-plan.jmx", EnabledPolicy::Present).unwrap();
    let get_user = &plan.test_cases[2];

    assert_eq!(get_user.params, None);
    let headers = get_user.headers.as_ref().unwrap();
    let names: Vec<_> = headers.iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["Authorization", "Accept"]);
}

#[test]
fn test_post_processor_order() {
    let plan = parser::extract_file("fixtures/api-plan.jmx", EnabledPolicy::Present).unwrap();

    assert_eq!(
        plan.post_processors,
        vec![
            PostProcessorRule::new("token", vec!["data".to_string(), "token".to_string()]),
            PostProcessorRule::new(
                "user_id",
                vec!["users".to_string(), "first".to_string(), "id".to_string()]
            ),
        ]
    );
}

#[test]
fn test_minimal_plan() {
    let plan = parser::extract_file("fixtures/minimal.jmx", EnabledPolicy::Strict).unwrap();

    assert_eq!(plan.test_cases.len(), 1);
    assert_eq!(plan.test_cases[0].method.as_deref(), Some("GET"));
    assert_eq!(plan.test_cases[0].url.as_deref(), Some("/health"));
    assert_eq!(plan.test_cases[0].params, None);
    assert_eq!(plan.test_cases[0].headers, None);
    assert!(plan.post_processors.is_empty());
}
