//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 R 通道 LSB (最低有效位) 隐写术的工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文本，
/// 也可以作为 HTTP 服务运行。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 R 通道 LSB (最低有效位) 隐写术的工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文本，也可以作为 HTTP 服务运行。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 serve (HTTP 服务)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中隐藏文本。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 启动提供隐藏与恢复接口的 HTTP 服务。
    Serve(ServeArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long, required_unless_present = "message", conflicts_with = "message")]
    pub text: Option<PathBuf>,

    /// 直接在命令行中给出要隐藏的文本。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 隐写完成后，保存结果图像的输出路径。
    /// 默认为输入图像同目录下的 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 写入后重新读取输出图像并确认能恢复出相同的文本。
    #[arg(long)]
    pub verify: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本后，保存文本内容的输出路径。
    /// 默认为图像同目录下的 `recovered_<文件名>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 同时将恢复出的文本打印到标准输出。
    #[arg(short, long)]
    pub print: bool,
}

/// 'serve' 命令所需的参数。命令行中给出的值会覆盖配置文件中的值。
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// TOML 格式的服务配置文件路径。
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 服务绑定的地址 (默认 0.0.0.0)。
    #[arg(short, long)]
    pub addr: Option<String>,

    /// 服务监听的端口 (默认 8080)。
    #[arg(short, long)]
    pub port: Option<u16>,

    /// 存放 index.html 的静态资源目录 (默认 assets)。
    #[arg(long)]
    pub assets: Option<PathBuf>,
}
