use crate::{ConverterError, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

const BUNDLED_TEMPLATE: &str = include_str!("../../templates/locustfile.template");

/// 占位符语法: `$name`、`${name}`，`$$` 转义为字面量 `$`
///
/// 最后的空分组匹配其余所有 `$`，例如单独的 `$` 或 `${1}`
fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\$(?:(\$)|([_a-zA-Z][_a-zA-Z0-9]*)|\{([_a-zA-Z][_a-zA-Z0-9]*)\}|())").unwrap()
    })
}

/// 无效 `$` 的位置（行、列均从 1 开始）
fn invalid_placeholder(source: &str, offset: usize) -> ConverterError {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |last| last.chars().count())
        + 1;
    ConverterError::InvalidPlaceholder { line, column }
}

fn placeholder_name<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str())
}

/// 输出脚本模板
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// 随工具一起编译的 Locust 模板
    pub fn bundled() -> Self {
        Self::new(BUNDLED_TEMPLATE)
    }

    /// 从文件加载自定义模板
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConverterError::InvalidPath(path.to_path_buf()));
        }
        Ok(Self::new(std::fs::read_to_string(path)?))
    }

    /// 模板引用的所有占位符名称（按出现顺序，可能重复）
    pub fn placeholders(&self) -> Vec<&str> {
        placeholder_regex()
            .captures_iter(&self.source)
            .filter_map(|caps| placeholder_name(&caps))
            .collect()
    }

    /// 替换所有占位符
    ///
    /// 按出现顺序检查：无法识别的 `$` 返回 InvalidPlaceholder，
    /// 引用了未提供的占位符返回 MissingPlaceholder。
    /// 多余的值被忽略，替换结果不会被再次扫描。
    pub fn substitute(&self, values: &HashMap<&str, String>) -> Result<String> {
        for caps in placeholder_regex().captures_iter(&self.source) {
            if let Some(invalid) = caps.get(4) {
                return Err(invalid_placeholder(&self.source, invalid.start() - 1));
            }
            match placeholder_name(&caps) {
                Some(name) if !values.contains_key(name) => {
                    return Err(ConverterError::MissingPlaceholder(name.to_string()));
                }
                _ => {}
            }
        }

        let rendered = placeholder_regex().replace_all(&self.source, |caps: &Captures| {
            match placeholder_name(caps) {
                Some(name) => values[name].clone(),
                None => "$".to_string(),
            }
        });
        Ok(rendered.into_owned())
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::bundled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_substitute_both_forms() {
        let template = Template::new("a=$a, b=${b}bc");
        let out = template
            .substitute(&values(&[("a", "1"), ("b", "2")]))
            .unwrap();
        assert_eq!(out, "a=1, b=2bc");
    }

    #[test]
    fn test_dollar_escape() {
        let template = Template::new("cost: $$5 and $$$name");
        let out = template.substitute(&values(&[("name", "x")])).unwrap();
        assert_eq!(out, "cost: $5 and $x");
    }

    #[test]
    fn test_missing_placeholder() {
        let template = Template::new("$present $absent");
        let err = template
            .substitute(&values(&[("present", "ok")]))
            .unwrap_err();
        match err {
            ConverterError::MissingPlaceholder(name) => assert_eq!(name, "absent"),
            other => panic!("Expected MissingPlaceholder, got {:?}", other),
        }
    }

    #[test]
    fn test_lone_dollar_is_invalid() {
        let template = Template::new("ok $a\ncost $ 5");
        let err = template.substitute(&values(&[("a", "1")])).unwrap_err();
        assert!(matches!(
            err,
            ConverterError::InvalidPlaceholder { line: 2, column: 6 }
        ));
    }

    #[test]
    fn test_numeric_braced_name_is_invalid() {
        let err = Template::new("${1}").substitute(&HashMap::new()).unwrap_err();
        assert!(matches!(
            err,
            ConverterError::InvalidPlaceholder { line: 1, column: 1 }
        ));
    }

    #[test]
    fn test_trailing_dollar_is_invalid() {
        let result = Template::new("end $").substitute(&HashMap::new());
        assert!(matches!(
            result,
            Err(ConverterError::InvalidPlaceholder { line: 1, column: 5 })
        ));
    }

    #[test]
    fn test_invalid_reported_before_later_missing() {
        let result = Template::new("$ $absent").substitute(&HashMap::new());
        assert!(matches!(result, Err(ConverterError::InvalidPlaceholder { .. })));
    }

    #[test]
    fn test_bundled_template_is_valid() {
        let names = ["urls", "additional_variables", "post_processors"];
        let values: HashMap<&str, String> = names.iter().map(|n| (*n, String::new())).collect();
        assert!(Template::bundled().substitute(&values).is_ok());
    }

    #[test]
    fn test_extra_values_ignored() {
        let template = Template::new("only $one");
        let out = template
            .substitute(&values(&[("one", "1"), ("two", "2")]))
            .unwrap();
        assert_eq!(out, "only 1");
    }

    #[test]
    fn test_substituted_values_not_rescanned() {
        let template = Template::new("$a");
        let out = template.substitute(&values(&[("a", "$b")])).unwrap();
        assert_eq!(out, "$b");
    }

    #[test]
    fn test_bundled_placeholders() {
        let template = Template::bundled();
        let mut names = template.placeholders();
        names.sort();
        names.dedup();
        assert_eq!(names, vec!["additional_variables", "post_processors", "urls"]);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Template::from_file("/no/such/template");
        assert!(matches!(result, Err(ConverterError::InvalidPath(_))));
    }
}
