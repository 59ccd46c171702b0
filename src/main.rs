use clap::Parser;
use env_logger::{Builder, Env};
use std::process;

use parity_hide::{cli::Cli, handler::run};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并将执行分派到相应的处理函数。
/// 任何错误都以退出码 1 结束
fn main() -> anyhow::Result<()> {
    // 参数错误统一以退出码 1 结束，--help 与 --version 仍以 0 结束
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        process::exit(if e.use_stderr() { 1 } else { 0 });
    });

    Builder::from_env(Env::new().default_filter_or(cli.log_level().as_str())).init();

    let command = cli.into_command()?;
    run(command)
}
