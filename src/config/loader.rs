use crate::config::types::ConverterConfig;
use crate::{ConverterError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    pub const CONFIG_FILE: &'static str = "jmx2locust.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ConverterConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConverterError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content).map_err(|e| {
            ConverterError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及父目录
    /// 2. 用户配置目录 ~/.config/jmx2locust/
    ///
    /// 找到但无法解析的文件会被记录并跳过
    pub fn find_and_load() -> Option<(PathBuf, ConverterConfig)> {
        let path = Self::find_in_ancestors(std::env::current_dir().ok()?)
            .or_else(Self::find_in_user_dir)?;

        match Self::load_from_path(&path) {
            Ok(config) => Some((path, config)),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring invalid config file");
                None
            }
        }
    }

    /// 从 `start` 开始逐级向上查找
    pub fn find_in_ancestors(start: PathBuf) -> Option<PathBuf> {
        let mut current = start;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.is_file() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    fn find_in_user_dir() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        let config_path = home
            .join(".config")
            .join("jmx2locust")
            .join(Self::CONFIG_FILE);

        config_path.is_file().then_some(config_path)
    }
}
