pub mod jmx;
pub mod json_path;
pub mod loader;
pub mod normalizer;
pub mod types;

// Re-export commonly used types
pub use jmx::JmxExtractor;
pub use loader::JmxLoader;
pub use normalizer::Normalizer;
pub use types::{ConversionPlan, EnabledPolicy, HeaderSet, PostProcessorRule, TestCase};

/// 从文件路径加载并提取转换计划
pub fn extract_file<P: AsRef<std::path::Path>>(
    path: P,
    policy: EnabledPolicy,
) -> crate::Result<ConversionPlan> {
    let content = JmxLoader::read(path.as_ref())?;
    extract_content(&content, path, policy)
}

/// 从字符串内容提取转换计划，`path` 仅用于错误报告
pub fn extract_content<P: AsRef<std::path::Path>>(
    content: &str,
    path: P,
    policy: EnabledPolicy,
) -> crate::Result<ConversionPlan> {
    let doc = JmxLoader::parse(content, path)?;
    Ok(JmxExtractor::new(policy).extract(&doc))
}
