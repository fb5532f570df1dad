use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::RuntimeConfig;
use crate::extract::{PassthroughExtractor, SessionContext, TermExtractor};
use crate::search::search_config;
use crate::terms::parse_terms;
use crate::types::{ScoredEntry, SearchResponse};

#[derive(Parser, Debug)]
#[command(author, version, about = "LLFS 模糊文件搜索（检索串由上游语言模型生成）", long_about = None)]
pub struct CliArgs {
    /// 检索串，例如 resume,filetype:pdf,time:today
    #[arg(short = 't', long = "terms", required = true)]
    pub terms: String,

    /// 搜索路径，可重复；默认读取 SEARCH_PATHS 或 当前目录+文档/下载/桌面
    #[arg(short = 'p', long = "path")]
    pub paths: Vec<PathBuf>,

    /// 追加到上一轮检索串之后
    #[arg(long = "previous")]
    pub previous: Option<String>,

    /// 最大结果数
    #[arg(short = 'm', long = "max-results")]
    pub max_results: Option<usize>,

    /// 最大遍历深度
    #[arg(short = 'd', long = "max-depth")]
    pub max_depth: Option<usize>,

    /// 单个根目录遍历时间上限（毫秒）
    #[arg(long = "time-budget-ms")]
    pub time_budget_ms: Option<u64>,

    /// 输出 JSON（AI易解析）
    #[arg(long = "json")]
    pub json: bool,
}

impl CliArgs {
    /// 命令行参数覆盖环境变量配置
    pub fn apply(&self, mut config: RuntimeConfig) -> RuntimeConfig {
        if !self.paths.is_empty() {
            config.search_paths = self.paths.clone();
        }
        if let Some(n) = self.max_results {
            config.max_results = n;
        }
        if let Some(d) = self.max_depth {
            config.max_depth = d;
        }
        if let Some(ms) = self.time_budget_ms {
            config.time_budget = Some(Duration::from_millis(ms));
        }
        config
    }

    /// 经过提取器得到最终检索串，--previous 存在时追加
    pub fn resolve_terms(&self) -> anyhow::Result<String> {
        let mut context = SessionContext::new();
        if let Some(prev) = &self.previous {
            context.push(prev.clone());
        }
        let extracted = PassthroughExtractor.extract(&self.terms, &context)?;
        Ok(context.combine(&extracted))
    }
}

// CLI入口
pub async fn run_cli(args: CliArgs) -> anyhow::Result<()> {
    let config = args.apply(RuntimeConfig::from_env()?);
    let raw_terms = args.resolve_terms()?;

    let started = Instant::now();
    let search_config_clone = config.clone();
    let terms_clone = raw_terms.clone();
    // 遍历是阻塞 IO，放到阻塞线程池
    let results =
        tokio::task::spawn_blocking(move || search_config(&search_config_clone, &terms_clone))
            .await?;

    if args.json {
        let output = SearchResponse {
            code: 0,
            msg: "success".to_string(),
            terms: parse_terms(&raw_terms),
            roots: config.search_paths.clone(),
            total: results.len(),
            results,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_results(&results);
    }
    Ok(())
}

fn print_results(results: &[ScoredEntry]) {
    if results.is_empty() {
        println!("没有找到匹配的文件。");
        return;
    }
    for r in results {
        let kind = if r.is_dir() { "目录" } else { "文件" };
        println!("[{}] {} {}", r.score, kind, r.path().display());
    }
}
