/// 将 JMeter 的 JSON 路径表达式拆成字段访问分段
///
/// `$.data.token` → `["data", "token"]`。去掉开头的 `$`，按 `.` 切分，
/// 再丢弃第一段（根引用）。
pub fn split_segments(expression: &str) -> Vec<String> {
    let trimmed = expression.trim();
    let body = trimmed.strip_prefix('$').unwrap_or(trimmed);

    body.split('.').skip(1).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_nested_path() {
        assert_eq!(split_segments("$.data.user.id"), vec!["data", "user", "id"]);
    }

    #[test]
    fn test_split_single_field() {
        assert_eq!(split_segments("$.token"), vec!["token"]);
    }

    #[test]
    fn test_split_root_only() {
        assert!(split_segments("$").is_empty());
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn test_split_without_anchor() {
        // 没有 `$` 时第一段照样视为根引用
        assert_eq!(split_segments("root.token"), vec!["token"]);
    }

    #[test]
    fn test_split_trims_whitespace() {
        assert_eq!(split_segments("  $.token "), vec!["token"]);
    }
}
