//! 打分函数：对单个 (名称/路径, 检索词) 计算 0..=6 的相关度。
//!
//! 所有函数都是纯函数，不依赖任何外部状态，可以在 rayon 线程间随意调用。

use crate::category;
use crate::config::{MAX_SCORE, PENALTY_TERMS, SCORE_PENALTY};
use crate::types::{SearchTerm, TermKind};

/// 命中同义变体时的基础分（低于任意顺序全部命中的档位时才使用）
const VARIATION_SCORE: u8 = MAX_SCORE - 3;

/// 分类词且扩展名属于该分类
const CATEGORY_FORMAT_BOOST: f32 = 1.5;
/// 分类词但扩展名不属于该分类
const CATEGORY_TERM_BOOST: f32 = 1.1;

/// 目录打分
///
/// - 与某一段路径完全相同: 6
/// - 是某一段路径的子串: 5
/// - 含 `_` 的复合词，各部分都出现在目录名的 `_` 分段中: 4
/// - 是整条路径的子串（可跨分隔符）: 4
pub fn score_directory(path: &str, term: &str) -> u8 {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return 0;
    }

    let normalized = path.replace('\\', "/").to_lowercase();
    let segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

    if segments.iter().any(|s| *s == term) {
        return MAX_SCORE;
    }
    if segments.iter().any(|s| s.contains(term.as_str())) {
        return MAX_SCORE - 1;
    }

    if term.contains('_') {
        if let Some(name) = segments.last() {
            let name_parts: Vec<&str> = name.split('_').collect();
            if term
                .split('_')
                .filter(|p| !p.is_empty())
                .all(|p| name_parts.contains(&p))
            {
                return MAX_SCORE - 2;
            }
        }
    }

    if segments.join("/").contains(term.as_str()) {
        return MAX_SCORE - 2;
    }

    0
}

/// 把检索词规范化为 `_` 连接的单词序列
fn normalize_term(term: &str) -> (String, Vec<String>) {
    let words: Vec<String> = term
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    (words.join("_"), words)
}

/// 所有单词按顺序出现（中间可夹杂其他字符）
fn words_in_order(candidate: &str, words: &[String]) -> bool {
    let mut rest = candidate;
    for word in words {
        match rest.find(word.as_str()) {
            Some(idx) => rest = &rest[idx + word.len()..],
            None => return false,
        }
    }
    true
}

/// 文件名（不含扩展名）打分，逐级判断，命中即返回
pub fn score_file_base(name_without_ext: &str, term: &str) -> u8 {
    let candidate = name_without_ext.to_lowercase();
    let (normalized, words) = normalize_term(term);
    if words.is_empty() {
        return 0;
    }

    if candidate == normalized {
        return MAX_SCORE;
    }
    if candidate.starts_with(&normalized) {
        return MAX_SCORE - 1;
    }
    if words_in_order(&candidate, &words) {
        return MAX_SCORE - 2;
    }

    let matched = words.iter().filter(|w| candidate.contains(w.as_str())).count();
    if matched == words.len() {
        return MAX_SCORE - 3;
    }
    // 至少 70%（向上取整）的单词命中
    let needed = (words.len() * 7).div_ceil(10);
    if matched >= needed {
        return MAX_SCORE - 4;
    }
    if words
        .iter()
        .any(|w| w.chars().count() > 2 && candidate.contains(w.as_str()))
    {
        return MAX_SCORE - 5;
    }

    0
}

/// 文件名是否命中屏蔽词
pub fn is_penalized(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    PENALTY_TERMS.iter().any(|p| lower.contains(p))
}

/// 扣分并截断到 [0, MAX_SCORE]
pub fn apply_penalty(score: u8, file_name: &str) -> u8 {
    if score > 0 && is_penalized(file_name) {
        clamp(i32::from(score) - i32::from(SCORE_PENALTY))
    } else {
        score.min(MAX_SCORE)
    }
}

pub fn clamp(score: i32) -> u8 {
    score.clamp(0, i32::from(MAX_SCORE)) as u8
}

/// 分类加成倍数：内容词属于某个分类时按扩展名是否匹配放大
pub fn category_factor(term: &str, extension: &str) -> f32 {
    match category::category_for_term(term) {
        Some(cat) if cat.has_format(extension) => CATEGORY_FORMAT_BOOST,
        Some(_) => CATEGORY_TERM_BOOST,
        None => 1.0,
    }
}

/// 单个文件对单个检索词的最终得分
///
/// 类型词是硬门槛：扩展名相同得满分，否则为 0。内容词走基础分、同义变体、
/// 分类加成、屏蔽词扣分。目录词和时间词不参与文件打分。
pub fn score_file(file_name: &str, extension: &str, term: &SearchTerm) -> u8 {
    match term.kind {
        TermKind::FileType => {
            if extension == term.value {
                MAX_SCORE
            } else {
                0
            }
        }
        TermKind::Content => {
            let stem = crate::types::stem_of(file_name);
            let mut score = score_file_base(&stem, &term.value);
            if score < VARIATION_SCORE
                && category::variations_for(&term.value).any(|v| stem.contains(v))
            {
                score = VARIATION_SCORE;
            }
            if score == 0 {
                return 0;
            }
            // 先加成、再扣分、最后截断
            let mut adjusted = f32::from(score) * category_factor(&term.value, extension);
            if is_penalized(file_name) {
                adjusted -= f32::from(SCORE_PENALTY);
            }
            clamp(adjusted.round() as i32)
        }
        TermKind::Directory | TermKind::Time => 0,
    }
}

/// 文件对整组检索词的得分
///
/// 有内容词时取内容词最高分，类型词只做门槛；没有内容词时类型匹配即满分。
pub fn score_file_terms(file_name: &str, extension: &str, terms: &[&SearchTerm]) -> u8 {
    let type_gate = terms.iter().filter(|t| t.kind == TermKind::FileType);
    if type_gate.clone().next().is_some() && !type_gate.clone().any(|t| t.value == extension) {
        return 0;
    }

    let mut content = terms.iter().filter(|t| t.kind == TermKind::Content).peekable();
    if content.peek().is_none() {
        return type_gate
            .map(|t| score_file(file_name, extension, t))
            .max()
            .unwrap_or(0);
    }
    content
        .map(|t| score_file(file_name, extension, t))
        .max()
        .unwrap_or(0)
}

/// 目录作为检索目标时的得分：按目录名打分，再扣屏蔽词分
pub fn score_directory_target(dir_name: &str, term: &SearchTerm) -> u8 {
    if term.kind != TermKind::Directory {
        return 0;
    }
    apply_penalty(score_directory(dir_name, &term.value), dir_name)
}
