//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `serve` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{HideArgs, RecoverArgs, ServeArgs};
use crate::codec;
use crate::config::ServerConfig;
use crate::constants::{HIDDEN_IMAGE_PREFIX, RECOVERED_TEXT_PREFIX};
use crate::server;
use crate::steganography::{capacity, embed, extract};
use anyhow::{Context, Result};
use colored::Colorize;
use image::GenericImageView;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本、检查隐写空间是否足够、调用隐写核心函数隐藏文本，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 目标文件已存在且没有指定 `--force`。
/// * 图像没有足够的空间来隐藏文本。
/// * 无法写入到目标图像文件，或 `--verify` 校验失败。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_hidden_path(&args.image));
    ensure_writable(&dest, args.force)?;

    let picture = codec::open(&args.image)?;

    let text = match (&args.text, &args.message) {
        (Some(path), _) => fs::read(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, Some(message)) => message.clone().into_bytes(),
        (None, None) => anyhow::bail!("Either a text file or a message must be provided."),
    };

    let (width, height) = picture.dimensions();

    let hidden = embed(&picture, &text).with_context(|| {
        format!(
            "Not enough space to hide {} bytes in a {}x{} image, which holds at most {} bytes.",
            text.len().to_string().red().bold(),
            width,
            height,
            capacity(width, height).to_string().green().bold()
        )
    })?;
    codec::save(&hidden, &dest)?;

    info!(
        "hid {} bytes in {} ({}x{})",
        text.len(),
        dest.display(),
        width,
        height
    );
    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    if args.verify {
        let recovered = extract(&codec::open(&dest)?);
        anyhow::ensure!(
            recovered == text,
            "Verification failed: the text recovered from {} does not match. \nThe text may contain a zero byte, which ends the hidden message early.",
            dest.to_string_lossy().red().bold()
        );
        println!(
            "Verified hidden text: {}",
            String::from_utf8_lossy(&recovered).green()
        );
    }

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用恢复核心函数提取隐藏的文本，
/// 最后将恢复的文本内容写入目标文本文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像文件。
/// * 目标文件已存在且没有指定 `--force`。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args
        .text
        .clone()
        .unwrap_or_else(|| default_recovered_path(&args.image));
    ensure_writable(&dest, args.force)?;

    let picture = codec::open(&args.image)?;
    let text = extract(&picture);

    if text.is_empty() {
        println!(
            "{}",
            "No hidden text was found in the image.".yellow().bold()
        );
    }

    fs::write(&dest, &text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    info!("recovered {} bytes from {}", text.len(), args.image.display());
    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    if args.print {
        println!("Hidden text: {}", String::from_utf8_lossy(&text));
    }

    Ok(())
}

/// 处理 'Serve' 命令的执行逻辑：构建配置并运行 HTTP 服务直到出错。
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig::from_args(&args)?;
    server::run(config).await
}

/// 默认的隐写图像输出路径：输入图像同目录下的 `doctored_<文件名>.png`。
pub fn default_hidden_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    image.with_file_name(format!("{HIDDEN_IMAGE_PREFIX}{stem}.png"))
}

/// 默认的恢复文本输出路径：图像同目录下的 `recovered_<文件名>.txt`。
pub fn default_recovered_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    image.with_file_name(format!("{RECOVERED_TEXT_PREFIX}{stem}.txt"))
}

/// 目标文件已存在且未指定 `--force` 时拒绝覆盖。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_derive_default_output_paths_next_to_the_input() {
        let image = Path::new("some/dir/original.png");
        assert_eq!(
            default_hidden_path(image),
            PathBuf::from("some/dir/doctored_original.png")
        );
        assert_eq!(
            default_recovered_path(Path::new("some/dir/doctored_original.png")),
            PathBuf::from("some/dir/recovered_doctored_original.txt")
        );
    }

    #[test]
    fn should_save_bmp_inputs_as_png_by_default() {
        assert_eq!(
            default_hidden_path(Path::new("photo.bmp")),
            PathBuf::from("doctored_photo.png")
        );
    }
}
