use crate::parser::json_path;
use crate::parser::types::{
    ConversionPlan, EnabledPolicy, HeaderSet, PostProcessorRule, TestCase,
};
use roxmltree::{Document, Node};

const SAMPLER_TAG: &str = "HTTPSamplerProxy";
const HEADER_MANAGER_TAG: &str = "HeaderManager";
const POST_PROCESSOR_TAG: &str = "JSONPostProcessor";
const HASH_TREE_TAG: &str = "hashTree";

const METHOD_PROP: &str = "HTTPSampler.method";
const PATH_PROP: &str = "HTTPSampler.path";
const ARGUMENT_VALUE_PROP: &str = "Argument.value";
const HEADER_NAME_PROP: &str = "Header.name";
const HEADER_VALUE_PROP: &str = "Header.value";
const REFERENCE_NAMES_PROP: &str = "JSONPostProcessor.referenceNames";
const JSON_PATH_PROP: &str = "JSONPostProcessor.jsonPathExprs";

/// JMeter 测试计划提取器
///
/// 单次遍历文档树，产出测试用例和后置处理器规则。所有缺失或无法解析的
/// 字段都退化为 None，提取本身不会失败。
#[derive(Debug, Clone, Default)]
pub struct JmxExtractor {
    enabled_policy: EnabledPolicy,
}

impl JmxExtractor {
    pub fn new(enabled_policy: EnabledPolicy) -> Self {
        Self { enabled_policy }
    }

    /// 提取完整的转换计划
    pub fn extract(&self, doc: &Document) -> ConversionPlan {
        let plan = ConversionPlan {
            test_cases: self.extract_test_cases(doc),
            post_processors: self.extract_post_processors(doc),
        };

        tracing::debug!(
            test_cases = plan.test_cases.len(),
            post_processors = plan.post_processors.len(),
            "Extraction finished"
        );
        plan
    }

    /// 提取所有启用的 HTTP Sampler
    pub fn extract_test_cases(&self, doc: &Document) -> Vec<TestCase> {
        let default_headers = Self::default_headers(doc);
        if let Some(headers) = &default_headers {
            tracing::debug!(count = headers.len(), "Found document default headers");
        }

        doc.descendants()
            .filter(|n| n.is_element() && n.has_tag_name(SAMPLER_TAG))
            .filter(|n| {
                let enabled = self.enabled_policy.is_enabled(n.attribute("enabled"));
                if !enabled {
                    tracing::trace!(
                        name = n.attribute("testname").unwrap_or_default(),
                        "Skipping disabled sampler"
                    );
                }
                enabled
            })
            .map(|sampler| {
                let headers = Self::sampler_headers(sampler).or_else(|| default_headers.clone());
                TestCase {
                    method: string_prop(sampler, METHOD_PROP).map(str::to_string),
                    url: string_prop(sampler, PATH_PROP).map(str::to_string),
                    params: Self::params(sampler),
                    headers,
                }
            })
            .collect()
    }

    /// 提取所有 JSON 后置处理器，保持文档顺序
    pub fn extract_post_processors(&self, doc: &Document) -> Vec<PostProcessorRule> {
        doc.descendants()
            .filter(|n| n.is_element() && n.has_tag_name(POST_PROCESSOR_TAG))
            .map(|node| {
                let segments = string_prop(node, JSON_PATH_PROP)
                    .map(json_path::split_segments)
                    .unwrap_or_default();
                match string_prop(node, REFERENCE_NAMES_PROP) {
                    Some(name) => PostProcessorRule::new(name, segments),
                    None => {
                        tracing::warn!(
                            name = node.attribute("testname").unwrap_or_default(),
                            "JSON post-processor without variable name"
                        );
                        PostProcessorRule::unnamed(segments)
                    }
                }
            })
            .collect()
    }

    /// 参数：elementProp → collectionProp → 第一个 elementProp → Argument.value
    ///
    /// 文本为空或不是合法 JSON 时返回 None
    fn params(sampler: Node) -> Option<serde_json::Value> {
        let raw = child_elements(sampler, "elementProp")
            .flat_map(|n| child_elements(n, "collectionProp"))
            .flat_map(|n| child_elements(n, "elementProp"))
            .find_map(|arg| {
                child_elements(arg, "stringProp")
                    .find(|p| p.attribute("name") == Some(ARGUMENT_VALUE_PROP))
            })?
            .text()
            .filter(|t| !t.is_empty())?;

        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(error = %e, "Sampler argument is not JSON, params omitted");
                None
            }
        }
    }

    /// Sampler 自身的 Headers
    ///
    /// 查看父节点中紧随 Sampler 的下一个元素：若是 HeaderManager 直接使用；
    /// 若是 hashTree 则使用其中的 HeaderManager。其他情况返回 None。
    fn sampler_headers(sampler: Node) -> Option<HeaderSet> {
        let next = next_element_sibling(sampler)?;

        let headers = if next.has_tag_name(HEADER_MANAGER_TAG) {
            header_entries(next)
        } else if next.has_tag_name(HASH_TREE_TAG) {
            child_elements(next, HEADER_MANAGER_TAG)
                .flat_map(header_entries)
                .collect()
        } else {
            return None;
        };

        (!headers.is_empty()).then_some(headers)
    }

    /// 文档级默认 Headers：`<root>/hashTree/hashTree/HeaderManager` 的最后一个
    fn default_headers(doc: &Document) -> Option<HeaderSet> {
        let manager = child_elements(doc.root_element(), HASH_TREE_TAG)
            .flat_map(|n| child_elements(n, HASH_TREE_TAG))
            .flat_map(|n| child_elements(n, HEADER_MANAGER_TAG))
            .last()?;

        let headers = header_entries(manager);
        (!headers.is_empty()).then_some(headers)
    }
}

/// HeaderManager 中的所有 name/value 对
fn header_entries(manager: Node) -> HeaderSet {
    child_elements(manager, "collectionProp")
        .flat_map(|n| child_elements(n, "elementProp"))
        .filter_map(|entry| {
            let name = string_prop(entry, HEADER_NAME_PROP)?;
            let value = string_prop(entry, HEADER_VALUE_PROP).unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

/// 指定标签名的子元素
fn child_elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.has_tag_name(tag))
}

/// `stringProp[@name=...]` 的文本，缺失或为空时返回 None
fn string_prop<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child_elements(node, "stringProp")
        .find(|p| p.attribute("name") == Some(name))?
        .text()
        .filter(|t| !t.is_empty())
}

/// 按子元素下标定位下一个兄弟元素（跳过文本和注释节点）
fn next_element_sibling<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    let parent = node.parent()?;
    let siblings: Vec<Node> = parent.children().filter(|n| n.is_element()).collect();
    let index = siblings.iter().position(|n| n.id() == node.id())?;
    siblings.get(index + 1).copied()
}
