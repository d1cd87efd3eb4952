//! # red_lsb 库
//!
//! 本库包含 R 通道 LSB 隐写工具的核心逻辑、图像编解码、命令行处理以及 HTTP 服务。

// 声明库包含的所有模块。

pub mod carrier;
pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
pub mod raster;
pub mod server;
pub mod steganography;

pub use carrier::RgbaSource;
pub use error::CapacityError;
pub use steganography::{embed, extract};
