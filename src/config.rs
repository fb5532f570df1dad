use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// 单项得分上限
pub const MAX_SCORE: u8 = 6;

/// 最低相关度，得分不高于此值的结果被丢弃
pub const MIN_RELEVANCE: u8 = 2;

/// 搜索结果最大数量
pub const MAX_RESULTS: usize = 50;

/// 默认最大遍历深度
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// 命中屏蔽词时扣除的分数
pub const SCORE_PENALTY: u8 = 1;

/// 文件名包含这些子串时降权
pub const PENALTY_TERMS: &[&str] = &[
    "config", "test", "example", "temp", "tmp", "cache", "bak", "backup",
];

/// 无意义的泛化词，作为内容词时直接丢弃
pub const IGNORED_TERMS: &[&str] = &[
    "file", "files", "named", "called", "find", "search", "looking", "for",
];

pub const ENV_SEARCH_PATHS: &str = "SEARCH_PATHS";
pub const ENV_MAX_RESULTS: &str = "LLFS_MAX_RESULTS";
pub const ENV_MAX_DEPTH: &str = "LLFS_MAX_DEPTH";
pub const ENV_TIME_BUDGET_MS: &str = "LLFS_TIME_BUDGET_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub search_paths: Vec<PathBuf>,
    pub max_results: usize,
    pub max_depth: usize,
    /// 单个根目录的遍历时间上限，None 表示不限
    pub time_budget: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            search_paths: default_search_paths(),
            max_results: MAX_RESULTS,
            max_depth: DEFAULT_MAX_DEPTH,
            time_budget: None,
        }
    }
}

impl RuntimeConfig {
    /// 从环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SEARCH_PATHS) {
            config.search_paths = parse_path_list(&raw);
            if config.search_paths.is_empty() {
                return Err(ConfigError::EmptyPathList { name: ENV_SEARCH_PATHS });
            }
        }
        if let Some(raw) = lookup(ENV_MAX_RESULTS) {
            config.max_results = parse_number(ENV_MAX_RESULTS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            config.max_depth = parse_number(ENV_MAX_DEPTH, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIME_BUDGET_MS) {
            let ms: u64 = parse_number(ENV_TIME_BUDGET_MS, &raw)?;
            config.time_budget = Some(Duration::from_millis(ms));
        }

        Ok(config)
    }
}

/// 默认搜索路径：当前目录 + 文档/下载/桌面
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(4);
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }
    paths.extend(
        [dirs::document_dir(), dirs::download_dir(), dirs::desktop_dir()]
            .into_iter()
            .flatten(),
    );
    paths
}

/// 逗号分隔的路径列表
pub fn parse_path_list(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}
