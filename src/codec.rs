//! # 图像编解码模块
//!
//! 在容器格式 (PNG、BMP、TIFF、WebP、QOI) 与内存中的 RGBA 像素栅格之间转换。
//! 所有启用的格式都是无损的，通道值可以原样往返。

use crate::steganography::{embed, extract};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// 从内存中的字节解码图像，格式由内容推断。
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).context("Unable to decode image data")
}

/// 从文件中读取并解码图像。
pub fn open(path: &Path) -> Result<DynamicImage> {
    image::ImageReader::open(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .with_guessed_format()
        .with_context(|| {
            format!(
                "Unable to detect image format: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .decode()
        .with_context(|| {
            format!(
                "Unable to decode image file: {}",
                path.to_string_lossy().red().bold()
            )
        })
}

/// 将图像保存到文件，格式由扩展名决定。
pub fn save(image: &RgbaImage, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).with_context(|| {
        format!(
            "Unsupported output image format: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    image.save_with_format(path, format).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 将图像编码为 PNG 字节。
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .context("Unable to encode image as PNG")?;
    Ok(buffer.into_inner())
}

/// 解码 `image_bytes`，隐藏 `message`，并返回 PNG 编码的结果。
pub fn embed_bytes(image_bytes: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let carrier = decode(image_bytes)?;
    let hidden = embed(&carrier, message)?;
    encode_png(&hidden)
}

/// 解码 `image_bytes` 并提取其中隐藏的消息。
pub fn extract_bytes(image_bytes: &[u8]) -> Result<Vec<u8>> {
    let carrier = decode(image_bytes)?;
    Ok(extract(&carrier))
}
