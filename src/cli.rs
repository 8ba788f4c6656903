use std::path::PathBuf;

use clap::{ArgAction, Parser};
use colored::*;
use jmx2locust::config::{ConfigLoader, ConverterConfig};
use jmx2locust::parser::EnabledPolicy;
use jmx2locust::{ConvertOptions, convert_file};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert jmeter tests to locust.", long_about = None)]
pub struct Cli {
    /// File name with correct jmeter tests in xml file.
    #[arg(short = 'f', long = "filename", value_name = "FILE", value_parser = existing_file)]
    pub filename: PathBuf,

    /// 输出文件路径（默认 locustfile.py）
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// 自定义模板文件
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// 从所有提取字段中删除该字符，例如 '$'
    #[arg(long, value_name = "CHAR")]
    pub strip_sentinel: Option<char>,

    /// 仅转换 enabled="true" 的 Sampler
    #[arg(long)]
    pub strict_enabled: bool,

    /// 不格式化生成的脚本
    #[arg(long)]
    pub no_format: bool,

    /// 配置文件路径（默认查找 jmx2locust.toml）
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// 输出更详细的日志（-v debug，-vv trace），RUST_LOG 优先
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// 参数解析阶段校验输入文件存在，失败时由 clap 报告用法错误
fn existing_file(s: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("The file {} does not exist!", s))
    }
}

impl Cli {
    /// 合并配置文件与命令行参数，命令行优先
    pub fn into_options(self, config: &ConverterConfig) -> (PathBuf, ConvertOptions) {
        let mut options = ConvertOptions::from_config(config);

        if let Some(output) = self.output {
            options.output = output;
        }
        if let Some(template) = self.template {
            options.template = Some(template);
        }
        if let Some(sentinel) = self.strip_sentinel {
            options.strip_sentinel = Some(sentinel);
        }
        if self.strict_enabled {
            options.enabled_policy = EnabledPolicy::Strict;
        }
        if self.no_format {
            options.format = false;
        }

        (self.filename, options)
    }

    fn load_config(&self) -> Result<ConverterConfig> {
        match &self.config {
            Some(path) => Ok(ConfigLoader::load_from_path(path)?),
            None => Ok(ConfigLoader::find_and_load()
                .map(|(path, config)| {
                    tracing::debug!(path = %path.display(), "Loaded config file");
                    config
                })
                .unwrap_or_default()),
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;
    let (input, options) = cli.into_options(&config);

    let report = convert_file(&input, &options)?;

    println!(
        "{} {} test cases, {} post-processors → {}",
        "✓".green().bold(),
        report.test_cases,
        report.post_processors,
        report.output.display().to_string().cyan()
    );
    Ok(())
}
