//! Python 字面量渲染
//!
//! 生成的脚本直接把这些字面量嵌入源码，所以输出必须是合法的 Python 表达式，
//! 与 `repr()` 的结果保持一致。

use crate::parser::HeaderSet;
use serde_json::Value;

/// 渲染 Python 字符串字面量（与 `repr(str)` 规则一致）
pub fn string_literal(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// 可选字符串，None 渲染为 `None`
pub fn optional_string(value: Option<&str>) -> String {
    value.map(string_literal).unwrap_or_else(|| "None".to_string())
}

/// 将 JSON 值渲染为等价的 Python 字面量
pub fn json_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_literal(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(json_literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", string_literal(k), json_literal(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// 将 Header 集合渲染为 Python dict，None 渲染为 `None`
pub fn headers_literal(headers: Option<&HeaderSet>) -> String {
    match headers {
        None => "None".to_string(),
        Some(headers) => {
            let entries: Vec<String> = headers
                .iter()
                .map(|(k, v)| format!("{}: {}", string_literal(k), string_literal(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}
