use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{RuntimeConfig, MAX_RESULTS};
use crate::filter::filter_results;
use crate::terms::parse_terms;
use crate::types::ScoredEntry;
use crate::walker::{walk_roots, WalkOptions};

/// 搜索入口：默认预算、最多 50 条结果
pub fn search(roots: &[PathBuf], raw_terms: &str) -> Vec<ScoredEntry> {
    search_with(roots, raw_terms, MAX_RESULTS, &WalkOptions::default())
}

/// 使用运行时配置中的路径与预算
pub fn search_config(config: &RuntimeConfig, raw_terms: &str) -> Vec<ScoredEntry> {
    search_with(
        &config.search_paths,
        raw_terms,
        config.max_results,
        &WalkOptions::from(config),
    )
}

pub fn search_with(
    roots: &[PathBuf],
    raw_terms: &str,
    max_results: usize,
    options: &WalkOptions,
) -> Vec<ScoredEntry> {
    let terms = parse_terms(raw_terms);
    if terms.is_empty() {
        debug!("检索串 {:?} 没有可用的检索词，不访问文件系统", raw_terms);
        return Vec::new();
    }

    let started = Instant::now();
    info!("搜索路径: {:?}", roots);
    info!("检索词: {:?}", terms);

    let candidates = walk_roots(roots, &terms, options);
    let total = candidates.len();
    let results = filter_results(candidates, &terms, max_results);

    info!(
        "原始匹配 {} 个，过滤后 {} 个，用时 {}ms",
        total,
        results.len(),
        started.elapsed().as_millis()
    );
    results
}
