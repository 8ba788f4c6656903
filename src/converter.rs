use crate::Result;
use crate::config::ConverterConfig;
use crate::generator::{LocustRenderer, Template};
use crate::parser::{EnabledPolicy, JmxExtractor, JmxLoader, Normalizer};
use crate::utils::formatter;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 默认输出文件名
pub const DEFAULT_OUTPUT: &str = "locustfile.py";

/// 一次转换的全部选项
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// 输出路径，已存在时覆盖
    pub output: PathBuf,

    /// 自定义模板，None 使用内置模板
    pub template: Option<PathBuf>,

    /// 提取后删除的哨兵字符
    pub strip_sentinel: Option<char>,

    pub enabled_policy: EnabledPolicy,

    /// 是否格式化输出
    pub format: bool,

    /// 脚本变量表的初始值
    pub variables: BTreeMap<String, String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            template: None,
            strip_sentinel: None,
            enabled_policy: EnabledPolicy::default(),
            format: true,
            variables: BTreeMap::new(),
        }
    }
}

impl ConvertOptions {
    /// 以配置文件的值覆盖默认值
    pub fn from_config(config: &ConverterConfig) -> Self {
        let defaults = Self::default();
        Self {
            output: config.output.clone().unwrap_or(defaults.output),
            template: config.template.clone(),
            strip_sentinel: config.strip_sentinel,
            enabled_policy: config.enabled_policy.unwrap_or(defaults.enabled_policy),
            format: config.format.unwrap_or(defaults.format),
            variables: config.variables.clone(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    fn renderer(&self) -> Result<LocustRenderer> {
        let template = match &self.template {
            Some(path) => Template::from_file(path)?,
            None => Template::bundled(),
        };

        Ok(LocustRenderer::new(template)
            .with_formatter(formatter::formatter_for(self.format))
            .with_initial_variables(self.variables.clone()))
    }
}

/// 转换结果摘要
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub test_cases: usize,
    pub post_processors: usize,
    pub output: PathBuf,
}

/// 执行完整转换：加载 → 提取 → 清洗 → 渲染 → 写入
///
/// 任一步骤失败都会立即返回，此时不会写出任何文件。
pub fn convert_file<P: AsRef<Path>>(input: P, options: &ConvertOptions) -> Result<ConversionReport> {
    let input = input.as_ref();
    tracing::info!(input = %input.display(), "Converting JMeter test plan");

    let content = JmxLoader::read(input)?;
    let doc = JmxLoader::parse(&content, input)?;

    let plan = JmxExtractor::new(options.enabled_policy).extract(&doc);
    let plan = Normalizer::new(options.strip_sentinel).apply(plan);
    if plan.test_cases.is_empty() {
        tracing::warn!("No enabled HTTP samplers found");
    }

    // 先准备好渲染器，模板问题在写文件之前暴露
    let renderer = options.renderer()?;
    renderer.write_to(&plan, &options.output)?;

    Ok(ConversionReport {
        test_cases: plan.test_cases.len(),
        post_processors: plan.post_processors.len(),
        output: options.output.clone(),
    })
}
