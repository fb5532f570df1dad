//! 检索词分类：把上游给出的逗号/竖线分隔串解析为带类型的检索词。

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::IGNORED_TERMS;
use crate::types::{SearchTerm, TermKind, TimeFilter};

const DIRECTORY_PREFIXES: &[&str] = &["dir:", "folder:"];
const FILETYPE_PREFIXES: &[&str] = &["filetype:", "ext:"];
const TIME_PREFIXES: &[&str] = &["time:", "date:"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// 解析原始检索串，保持原有顺序
pub fn parse_terms(raw: &str) -> Vec<SearchTerm> {
    let mut terms = Vec::new();

    for token in raw.split([',', '|']) {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            continue;
        }

        if let Some(value) = strip_any(&token, DIRECTORY_PREFIXES) {
            if !value.is_empty() {
                terms.push(SearchTerm::directory(value));
            }
        } else if let Some(value) = strip_any(&token, FILETYPE_PREFIXES) {
            // ext:mp4;mkv 拆成多个类型词
            terms.extend(
                value
                    .split(';')
                    .map(|ext| ext.trim().trim_start_matches('.'))
                    .filter(|ext| !ext.is_empty())
                    .map(SearchTerm::file_type),
            );
        } else if let Some(value) = strip_any(&token, TIME_PREFIXES) {
            if value.is_empty() {
                continue;
            }
            let filter = parse_time_filter(value);
            if let TimeFilter::Invalid(bad) = &filter {
                warn!("无法解析的时间条件 {:?}，该条件不会匹配任何文件", bad);
            }
            terms.push(SearchTerm::time(value, filter));
        } else if IGNORED_TERMS.contains(&token.as_str()) {
            debug!("忽略泛化词: {}", token);
        } else {
            terms.push(SearchTerm::content(token));
        }
    }

    terms
}

/// 命中任一前缀时返回去掉前缀后的取值（可能为空）
fn strip_any<'a>(token: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes
        .iter()
        .find_map(|p| token.strip_prefix(p))
        .map(str::trim)
}

pub fn parse_time_filter(value: &str) -> TimeFilter {
    let value = value.trim();
    match value {
        "today" => return TimeFilter::Today,
        "yesterday" => return TimeFilter::Yesterday,
        "thisweek" => return TimeFilter::ThisWeek,
        "thismonth" => return TimeFilter::ThisMonth,
        "thisyear" => return TimeFilter::ThisYear,
        _ => {}
    }

    if let Some(date) = value.strip_prefix("before:") {
        return parse_date(date).map_or_else(|| invalid(value), TimeFilter::Before);
    }
    if let Some(date) = value.strip_prefix("after:") {
        return parse_date(date).map_or_else(|| invalid(value), TimeFilter::After);
    }

    let year = value.strip_prefix("year:").unwrap_or(value);
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(y) = year.parse::<i32>() {
            return TimeFilter::Year(y);
        }
    }

    invalid(value)
}

fn invalid(value: &str) -> TimeFilter {
    TimeFilter::Invalid(value.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// 检索词集合上的常用视图
pub trait TermSetExt {
    fn of_kind(&self, kind: TermKind) -> Vec<&SearchTerm>;
    fn has_kind(&self, kind: TermKind) -> bool;
}

impl TermSetExt for [SearchTerm] {
    fn of_kind(&self, kind: TermKind) -> Vec<&SearchTerm> {
        self.iter().filter(|t| t.kind == kind).collect()
    }

    fn has_kind(&self, kind: TermKind) -> bool {
        self.iter().any(|t| t.kind == kind)
    }
}
