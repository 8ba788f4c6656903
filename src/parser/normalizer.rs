use crate::parser::types::ConversionPlan;
use serde_json::Value;

/// 提取后的统一清洗步骤
///
/// 配置了哨兵字符时，从计划中的所有字符串字段里删除该字符：
/// method、url、params 中的键和字符串值、header 名和值、变量名及 JSON 路径分段。
/// params 在解码后的值上清洗，渲染出的 Python 字面量不受影响。
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    sentinel: Option<char>,
}

impl Normalizer {
    pub fn new(sentinel: Option<char>) -> Self {
        Self { sentinel }
    }

    pub fn apply(&self, mut plan: ConversionPlan) -> ConversionPlan {
        let Some(sentinel) = self.sentinel else {
            return plan;
        };
        tracing::debug!(%sentinel, "Stripping sentinel character from extracted fields");

        let strip = |s: &mut String| strip_char(s, sentinel);

        for case in &mut plan.test_cases {
            for field in [&mut case.method, &mut case.url] {
                if let Some(value) = field.as_mut() {
                    strip(value);
                }
            }
            if let Some(params) = case.params.as_mut() {
                strip_value(params, sentinel);
            }
            if let Some(headers) = case.headers.as_mut() {
                for (name, value) in headers.entries_mut() {
                    strip(name);
                    strip(value);
                }
            }
        }

        for rule in &mut plan.post_processors {
            if let Some(name) = rule.variable_name.as_mut() {
                strip(name);
            }
            rule.json_path.iter_mut().for_each(&strip);
        }

        plan
    }
}

fn strip_char(s: &mut String, sentinel: char) {
    if s.contains(sentinel) {
        s.retain(|c| c != sentinel);
    }
}

/// 递归清洗 JSON 值，对象的键按原顺序重建
fn strip_value(value: &mut Value, sentinel: char) {
    match value {
        Value::String(s) => strip_char(s, sentinel),
        Value::Array(items) => items.iter_mut().for_each(|v| strip_value(v, sentinel)),
        Value::Object(map) => {
            let entries = std::mem::take(map);
            *map = entries
                .into_iter()
                .map(|(mut key, mut v)| {
                    strip_char(&mut key, sentinel);
                    strip_value(&mut v, sentinel);
                    (key, v)
                })
                .collect();
        }
        _ => {}
    }
}
