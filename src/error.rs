use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("文件不存在: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("XML 格式错误 ({}): {message}", path.display())]
    MalformedInput { path: PathBuf, message: String },

    #[error("模板缺少占位符: ${0}")]
    MissingPlaceholder(String),

    #[error("模板占位符无效: 第 {line} 行第 {column} 列")]
    InvalidPlaceholder { line: usize, column: usize },

    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for jmx2locust crate
pub type Result<T> = std::result::Result<T, ConverterError>;
