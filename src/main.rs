use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

use red_lsb::{
    cli::{Cli, Commands},
    handler::{handle_hide, handle_recover, handle_serve},
};

/// 初始化日志系统，格式为 `[HH:MM:SS] [LEVEL] message`。
///
/// 默认级别为 INFO，可通过 `RUST_LOG` 环境变量调整。
fn init_logger() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令（`hide`、`recover` 或 `serve`）
/// 将执行分派到相应的处理函数
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Hide(args) => handle_hide(args),
        Commands::Recover(args) => handle_recover(args),
        Commands::Serve(args) => handle_serve(args).await,
    }
}
