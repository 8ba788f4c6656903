use tracing_subscriber::{EnvFilter, fmt};

/// 按 `-v` 出现次数选择默认级别
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// 初始化日志系统，输出到 stderr，不干扰生成的脚本路径摘要
///
/// RUST_LOG 优先于 `-v`:
/// - jmx2locust -v -f plan.jmx
/// - RUST_LOG=jmx2locust::parser=trace jmx2locust -f plan.jmx
pub fn init_logger(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    fmt()
        .with_env_filter(filter)
        .with_target(verbosity > 0)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(verbosity, "Logger initialized");
}
