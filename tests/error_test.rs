use jmx2locust::{ConverterError, Result};
use std::path::PathBuf;

#[test]
fn test_invalid_path() {
    let err = ConverterError::InvalidPath(PathBuf::from("plan.jmx"));
    assert_eq!(err.to_string(), "文件不存在: plan.jmx");
}

#[test]
fn test_malformed_input() {
    let err = ConverterError::MalformedInput {
        path: PathBuf::from("plan.jmx"),
        message: "unexpected end of stream".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "XML 格式错误 (plan.jmx): unexpected end of stream"
    );
}

#[test]
fn test_missing_placeholder() {
    let err = ConverterError::MissingPlaceholder("urls".to_string());
    assert_eq!(err.to_string(), "模板缺少占位符: $urls");
}

#[test]
fn test_invalid_placeholder() {
    let err = ConverterError::InvalidPlaceholder { line: 3, column: 7 };
    assert_eq!(err.to_string(), "模板占位符无效: 第 3 行第 7 列");
}

#[test]
fn test_result_type() {
    fn returns_error() -> Result<()> {
        Err(ConverterError::Config("bad key".to_string()))
    }

    match returns_error() {
        Err(ConverterError::Config(msg)) => assert_eq!(msg, "bad key"),
        _ => panic!("Expected Config error"),
    }
}
