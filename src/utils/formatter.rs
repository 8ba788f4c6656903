/// 生成代码的格式化器
///
/// 纯文本到文本的转换，没有副作用。
pub trait CodeFormatter {
    fn format(&self, source: &str) -> String;
}

/// 整理空白：去掉行尾空白，连续空行最多保留 `max_blank_lines` 行，
/// 文件以且仅以一个换行结束
pub struct TidyFormatter {
    max_blank_lines: usize,
}

impl TidyFormatter {
    pub fn new(max_blank_lines: usize) -> Self {
        Self { max_blank_lines }
    }
}

impl Default for TidyFormatter {
    fn default() -> Self {
        // PEP 8: 顶层定义之间两个空行
        Self::new(2)
    }
}

impl CodeFormatter for TidyFormatter {
    fn format(&self, source: &str) -> String {
        let mut output = Vec::new();
        let mut blank_run = 0;

        for line in source.lines().map(str::trim_end) {
            if line.is_empty() {
                blank_run += 1;
                // 开头的空行直接丢弃
                if blank_run > self.max_blank_lines || output.is_empty() {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            output.push(line);
        }

        while output.last().is_some_and(|l| l.is_empty()) {
            output.pop();
        }

        let mut formatted = output.join("\n");
        formatted.push('\n');
        formatted
    }
}

/// 原样输出
pub struct PassthroughFormatter;

impl CodeFormatter for PassthroughFormatter {
    fn format(&self, source: &str) -> String {
        source.to_string()
    }
}

/// 根据开关选择格式化器
pub fn formatter_for(enabled: bool) -> Box<dyn CodeFormatter> {
    if enabled {
        Box::new(TidyFormatter::default())
    } else {
        Box::new(PassthroughFormatter)
    }
}
