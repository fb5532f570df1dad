use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 检索词类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Content,
    Directory,
    FileType,
    Time,
}

/// 时间过滤条件（解析一次，后续阶段直接匹配）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum TimeFilter {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    ThisYear,
    Year(i32),
    Before(NaiveDate),
    After(NaiveDate),
    /// 无法解析的取值，不匹配任何条目
    Invalid(String),
}

/// 分类后的单个检索词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerm {
    pub kind: TermKind,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeFilter>,
}

impl SearchTerm {
    pub fn content(value: impl Into<String>) -> Self {
        Self { kind: TermKind::Content, value: value.into(), time: None }
    }

    pub fn directory(value: impl Into<String>) -> Self {
        Self { kind: TermKind::Directory, value: value.into(), time: None }
    }

    pub fn file_type(value: impl Into<String>) -> Self {
        Self { kind: TermKind::FileType, value: value.into(), time: None }
    }

    pub fn time(value: impl Into<String>, filter: TimeFilter) -> Self {
        Self { kind: TermKind::Time, value: value.into(), time: Some(filter) }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == TermKind::Directory
    }
}

/// 文件元数据，遍历时读取一次
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub accessed: Option<DateTime<Local>>,
    pub size: u64,
}

impl From<&std::fs::Metadata> for Metadata {
    fn from(meta: &std::fs::Metadata) -> Self {
        Self {
            created: meta.created().ok().map(DateTime::<Local>::from),
            modified: meta.modified().ok().map(DateTime::<Local>::from),
            accessed: meta.accessed().ok().map(DateTime::<Local>::from),
            size: meta.len(),
        }
    }
}

/// 遍历过程中访问到的文件或目录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub metadata: Metadata,
}

impl Entry {
    pub fn new(path: impl Into<PathBuf>, is_dir: bool, metadata: Metadata) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { path, name, is_dir, metadata }
    }

    /// 小写扩展名，目录和无扩展名文件为空串
    pub fn extension(&self) -> String {
        if self.is_dir {
            return String::new();
        }
        extension_of(&self.path)
    }

    /// 去掉扩展名后的小写文件名
    pub fn stem(&self) -> String {
        if self.is_dir {
            return self.name.to_lowercase();
        }
        stem_of(&self.name)
    }
}

pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub(crate) fn stem_of(name: &str) -> String {
    let lower = name.to_lowercase();
    match lower.rfind('.') {
        Some(idx) if idx > 0 => lower[..idx].to_string(),
        _ => lower,
    }
}

/// 带得分的候选结果，score 取值 1..=6
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    #[serde(flatten)]
    pub entry: Entry,
    pub score: u8,
}

impl ScoredEntry {
    pub fn new(entry: Entry, score: u8) -> Self {
        Self { entry, score }
    }

    pub fn path(&self) -> &Path {
        &self.entry.path
    }

    pub fn is_dir(&self) -> bool {
        self.entry.is_dir
    }
}

/// CLI 输出结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub code: i32,
    pub msg: String,
    pub terms: Vec<SearchTerm>,
    pub roots: Vec<PathBuf>,
    pub results: Vec<ScoredEntry>,
    pub total: usize,
    pub elapsed_ms: u64,
}
