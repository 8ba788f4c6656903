use crate::Result;
use crate::generator::template::Template;
use crate::parser::{ConversionPlan, PostProcessorRule, TestCase};
use crate::utils::formatter::{CodeFormatter, TidyFormatter};
use crate::utils::python;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const CASE_INDENT: &str = "    ";
const STATEMENT_INDENT: &str = "        ";

/// 将转换计划渲染为 Locust 脚本
pub struct LocustRenderer {
    template: Template,
    formatter: Box<dyn CodeFormatter>,
    initial_variables: BTreeMap<String, String>,
}

impl LocustRenderer {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            formatter: Box::new(TidyFormatter::default()),
            initial_variables: BTreeMap::new(),
        }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn CodeFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// 设置脚本启动时变量表的初始值
    pub fn with_initial_variables(mut self, variables: BTreeMap<String, String>) -> Self {
        self.initial_variables = variables;
        self
    }

    /// 渲染完整的脚本文本
    pub fn render(&self, plan: &ConversionPlan) -> Result<String> {
        let mut values = HashMap::new();
        values.insert("urls", Self::render_test_cases(&plan.test_cases));
        values.insert(
            "post_processors",
            Self::render_post_processors(&plan.post_processors),
        );
        values.insert("additional_variables", self.render_additional_variables());

        let rendered = self.template.substitute(&values)?;
        Ok(self.formatter.format(&rendered))
    }

    /// 渲染并写入 `path`，已存在的文件会被覆盖
    pub fn write_to<P: AsRef<Path>>(&self, plan: &ConversionPlan, path: P) -> Result<()> {
        let script = self.render(plan)?;
        std::fs::write(path.as_ref(), script)?;
        tracing::info!(path = %path.as_ref().display(), "Script written");
        Ok(())
    }

    fn render_test_cases(cases: &[TestCase]) -> String {
        cases
            .iter()
            .map(|case| format!("{}{},", CASE_INDENT, Self::format_case(case)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `{'method': ..., 'url': ..., 'params': ..., 'headers': ...}`
    pub fn format_case(case: &TestCase) -> String {
        format!(
            "{{'method': {}, 'url': {}, 'params': {}, 'headers': {}}}",
            python::optional_string(case.method.as_deref()),
            python::optional_string(case.url.as_deref()),
            case.params
                .as_ref()
                .map_or_else(|| "None".to_string(), python::json_literal),
            python::headers_literal(case.headers.as_ref()),
        )
    }

    fn render_post_processors(rules: &[PostProcessorRule]) -> String {
        rules
            .iter()
            .map(|rule| format!("{}{}", STATEMENT_INDENT, Self::format_rule(rule)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `self.variables['name'] = <lookup> or self.variables.get('name')`
    ///
    /// 没有变量名的规则渲染为注释，保留其位置和查找路径
    pub fn format_rule(rule: &PostProcessorRule) -> String {
        let mut lookup = String::from("response_json");

        if let Some((last, init)) = rule.json_path.split_last() {
            for segment in init {
                lookup.push_str(&format!(".get({}, {{}})", python::string_literal(segment)));
            }
            lookup.push_str(&format!(".get({})", python::string_literal(last)));
        }

        match &rule.variable_name {
            Some(name) => {
                let name = python::string_literal(name);
                format!("self.variables[{name}] = {lookup} or self.variables.get({name})")
            }
            None => format!("# JSON post-processor without variable name: {lookup}"),
        }
    }

    fn render_additional_variables(&self) -> String {
        let entries: Vec<String> = self
            .initial_variables
            .iter()
            .map(|(k, v)| format!("{}: {}", python::string_literal(k), python::string_literal(v)))
            .collect();
        format!("INITIAL_VARIABLES = {{{}}}", entries.join(", "))
    }
}

impl Default for LocustRenderer {
    fn default() -> Self {
        Self::new(Template::bundled())
    }
}
