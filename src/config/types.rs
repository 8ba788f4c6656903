use crate::parser::EnabledPolicy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// 配置文件内容（jmx2locust.toml）
///
/// 所有字段可选，命令行参数优先级更高
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConverterConfig {
    /// 输出文件路径
    pub output: Option<PathBuf>,

    /// 自定义模板路径
    pub template: Option<PathBuf>,

    /// 提取后需要删除的哨兵字符，例如 "$"
    pub strip_sentinel: Option<char>,

    /// Sampler 启用判定策略: "present" 或 "strict"
    pub enabled_policy: Option<EnabledPolicy>,

    /// 是否格式化输出
    pub format: Option<bool>,

    /// 脚本变量表的初始值
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}
