//! LLFS：根据上游提取的检索串在本地文件系统中模糊查找文件。
//!
//! 数据单向流动：检索串 -> 分类后的检索词 -> 遍历打分 -> 过滤排序 -> 结果列表。
//! 每次调用都重新遍历搜索路径，不建立也不缓存索引。
//!
//! 遍历不跟随符号链接，并受最大深度和可选时间预算限制；超出预算时保留已有结果。

pub mod category;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod scoring;
pub mod search;
pub mod terms;
pub mod types;
pub mod walker;

pub use config::RuntimeConfig;
pub use search::{search, search_config, search_with};
pub use types::{Entry, Metadata, ScoredEntry, SearchTerm, TermKind, TimeFilter};
pub use walker::WalkOptions;
