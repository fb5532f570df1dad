//! 上游检索词提取的边界。
//!
//! 自然语言到检索串的转换由外部语言模型完成，这里只定义调用约定和会话上下文，
//! 上下文通过参数显式传递，不存在全局会话对象。

use anyhow::Result;

/// 最近几轮检索串，供提取器判断是追加还是替换
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    history: Vec<String>,
    limit: usize,
}

const DEFAULT_HISTORY: usize = 5;

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            history: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// 记录一次检索串，超出上限时丢弃最早的
    pub fn push(&mut self, terms: impl Into<String>) {
        self.history.push(terms.into());
        if self.history.len() > self.limit {
            let overflow = self.history.len() - self.limit;
            self.history.drain(..overflow);
        }
    }

    pub fn previous(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn recent(&self) -> &[String] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// 在上一轮检索串后追加新词
    pub fn combine(&self, terms: &str) -> String {
        match self.previous() {
            Some(prev) if !prev.trim().is_empty() && !terms.trim().is_empty() => {
                format!("{},{}", prev.trim(), terms.trim())
            }
            Some(prev) if terms.trim().is_empty() => prev.trim().to_string(),
            _ => terms.trim().to_string(),
        }
    }

    /// 丢弃上一轮，直接使用新检索串
    pub fn replace(&self, terms: &str) -> String {
        terms.trim().to_string()
    }
}

/// 把用户原话转换为逗号分隔的检索串
pub trait TermExtractor {
    fn extract(&self, query: &str, context: &SessionContext) -> Result<String>;
}

/// 把用户输入原样当作检索串
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughExtractor;

impl TermExtractor for PassthroughExtractor {
    fn extract(&self, query: &str, _context: &SessionContext) -> Result<String> {
        Ok(query.trim().to_string())
    }
}
