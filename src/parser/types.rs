/// 有序的 Header 集合
///
/// 插入已存在的名称时原位覆盖其值，保持首次出现的顺序。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    /// 创建空 Header 集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入 Header，名称重复时覆盖旧值
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// 获取 Header 值
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<(String, String)> {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

impl IntoIterator for HeaderSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// 单个测试用例，对应一个启用的 HTTP Sampler
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TestCase {
    /// HTTP 方法，缺失时为 None
    pub method: Option<String>,

    /// 请求路径，缺失时为 None
    pub url: Option<String>,

    /// 参数（解码后的 JSON，渲染时转换为 Python 字面量）
    pub params: Option<serde_json::Value>,

    /// 生效的 Headers：自身的 HeaderManager 优先，否则为全局默认
    pub headers: Option<HeaderSet>,
}

/// JSON 后置处理器规则：从响应中提取值写入变量
#[derive(Debug, Clone, PartialEq)]
pub struct PostProcessorRule {
    /// 目标变量名，处理器未配置变量名时为 None
    pub variable_name: Option<String>,

    /// JSON 路径分段，已去掉根引用
    pub json_path: Vec<String>,
}

impl PostProcessorRule {
    pub fn new(variable_name: impl Into<String>, json_path: Vec<String>) -> Self {
        Self {
            variable_name: Some(variable_name.into()),
            json_path,
        }
    }

    /// 没有变量名的规则，仍占据文档中的位置
    pub fn unnamed(json_path: Vec<String>) -> Self {
        Self {
            variable_name: None,
            json_path,
        }
    }
}

/// 一次转换的提取结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversionPlan {
    /// 按文档顺序排列的测试用例
    pub test_cases: Vec<TestCase>,

    /// 按文档顺序排列的后置处理器规则
    pub post_processors: Vec<PostProcessorRule>,
}

impl ConversionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty() && self.post_processors.is_empty()
    }
}

/// Sampler 启用判定策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnabledPolicy {
    /// `enabled` 属性存在且非空即视为启用
    #[default]
    Present,

    /// `enabled` 属性必须为 `true`
    Strict,
}

impl EnabledPolicy {
    /// 根据属性值判断是否启用
    pub fn is_enabled(&self, attribute: Option<&str>) -> bool {
        match (self, attribute) {
            (_, None) => false,
            (EnabledPolicy::Present, Some(value)) => !value.is_empty(),
            (EnabledPolicy::Strict, Some(value)) => value.trim().eq_ignore_ascii_case("true"),
        }
    }
}
