use clap::Parser;
use tracing_subscriber::EnvFilter;

use llfs::cli::{run_cli, CliArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志，输出到 stderr，stdout 留给结果
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    run_cli(args).await
}
