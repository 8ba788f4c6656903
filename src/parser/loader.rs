use crate::{ConverterError, Result};
use roxmltree::{Document, ParsingOptions};
use std::path::Path;

/// JMeter 测试计划加载器
pub struct JmxLoader;

impl JmxLoader {
    /// 读取文件内容，文件不存在时返回 InvalidPath
    pub fn read<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConverterError::InvalidPath(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "Read test plan");
        Ok(content)
    }

    /// 解析 XML 文本，`path` 仅用于错误报告
    pub fn parse<'input, P: AsRef<Path>>(
        content: &'input str,
        path: P,
    ) -> Result<Document<'input>> {
        // JMeter 导出的文件偶尔带 DOCTYPE
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;

        Document::parse_with_options(content, options).map_err(|e| {
            ConverterError::MalformedInput {
                path: path.as_ref().to_path_buf(),
                message: e.to_string(),
            }
        })
    }
}
