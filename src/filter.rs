//! 结果过滤与排序：相关度下限、类型、时间、多内容词 AND、去重、排序、截断。

use chrono::{DateTime, Datelike, Duration, Local};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

use crate::config::MIN_RELEVANCE;
use crate::scoring::score_file_base;
use crate::terms::TermSetExt;
use crate::types::{Metadata, ScoredEntry, SearchTerm, TermKind, TimeFilter};

/// 以当前本地时间过滤并排序
pub fn filter_results(
    candidates: Vec<ScoredEntry>,
    terms: &[SearchTerm],
    max_results: usize,
) -> Vec<ScoredEntry> {
    filter_results_at(candidates, terms, max_results, Local::now())
}

/// 同 [`filter_results`]，时间条件以 `now` 为基准
pub fn filter_results_at(
    candidates: Vec<ScoredEntry>,
    terms: &[SearchTerm],
    max_results: usize,
    now: DateTime<Local>,
) -> Vec<ScoredEntry> {
    if terms.is_empty() {
        return Vec::new();
    }

    let total = candidates.len();
    let file_types: Vec<&str> = terms
        .of_kind(TermKind::FileType)
        .into_iter()
        .map(|t| t.value.as_str())
        .collect();
    let time_filters: Vec<&TimeFilter> = terms.iter().filter_map(|t| t.time.as_ref()).collect();
    let content_terms = terms.of_kind(TermKind::Content);

    let kept = candidates.into_iter().filter(|r| {
        if r.score <= MIN_RELEVANCE {
            return false;
        }
        if !file_types.is_empty() && !r.is_dir() && !file_types.contains(&r.entry.extension().as_str()) {
            return false;
        }
        if !time_filters
            .iter()
            .all(|f| matches_time(f, &r.entry.metadata, now))
        {
            return false;
        }
        if content_terms.len() > 1 {
            let stem = r.entry.stem();
            return content_terms
                .iter()
                .all(|t| score_file_base(&stem, &t.value) > 0);
        }
        true
    });

    // 同一路径只保留最高分（多个根目录可能重叠）
    let mut best: HashMap<PathBuf, ScoredEntry> = HashMap::new();
    for entry in kept {
        match best.get(&entry.entry.path) {
            Some(existing) if existing.score >= entry.score => {}
            _ => {
                best.insert(entry.entry.path.clone(), entry);
            }
        }
    }

    let mut results: Vec<ScoredEntry> = best.into_values().collect();
    sort_results(&mut results);
    results.truncate(max_results);

    debug!("过滤前 {} 个候选，过滤后 {} 个", total, results.len());
    results
}

/// 按得分降序，同分按路径字典序升序
pub fn sort_results(results: &mut [ScoredEntry]) {
    results.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.entry.path.cmp(&b.entry.path))
    });
}

/// 创建时间或修改时间任一满足即通过
pub fn matches_time(filter: &TimeFilter, metadata: &Metadata, now: DateTime<Local>) -> bool {
    [metadata.created, metadata.modified]
        .into_iter()
        .flatten()
        .any(|t| time_predicate(filter, t, now))
}

fn time_predicate(filter: &TimeFilter, t: DateTime<Local>, now: DateTime<Local>) -> bool {
    let day = t.date_naive();
    let today = now.date_naive();
    match filter {
        TimeFilter::Today => day == today,
        TimeFilter::Yesterday => today.pred_opt() == Some(day),
        TimeFilter::ThisWeek => t <= now && now - t <= Duration::days(7),
        TimeFilter::ThisMonth => day.year() == today.year() && day.month() == today.month(),
        TimeFilter::ThisYear => day.year() == today.year(),
        TimeFilter::Year(y) => day.year() == *y,
        TimeFilter::Before(date) => day < *date,
        TimeFilter::After(date) => day > *date,
        TimeFilter::Invalid(_) => false,
    }
}
