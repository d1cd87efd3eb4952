//! # 载体像素访问
//!
//! 隐写核心只依赖“能按坐标读取 8 位 RGBA 的像素源”这一能力，
//! 而不关心图像来自哪种容器格式或解码器。

use image::{DynamicImage, GenericImageView, RgbaImage};

/// R 通道在 RGBA 数组中的下标。
pub const RED: usize = 0;

/// 任何能够提供逐像素 8 位 RGBA 读取的栅格。
pub trait RgbaSource {
    /// 返回 `(宽, 高)`。
    fn dimensions(&self) -> (u32, u32);

    /// 读取 `(x, y)` 处像素的 `[R, G, B, A]`。调用方保证坐标在范围内。
    fn rgba(&self, x: u32, y: u32) -> [u8; 4];
}

impl RgbaSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }
}

/// 非 RGBA8 的图像 (灰度、16 位等) 在读取时按 `image` 的规则转换为 RGBA8。
impl RgbaSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        GenericImageView::get_pixel(self, x, y).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgba};

    #[test]
    fn should_read_rgba_image_pixels() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(1, 0, Rgba([1, 2, 3, 4]));

        assert_eq!(RgbaSource::dimensions(&img), (2, 1));
        assert_eq!(img.rgba(1, 0), [1, 2, 3, 4]);
    }

    #[test]
    fn should_expand_grayscale_to_rgba() {
        let gray: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_pixel(1, 1, Luma([7]));
        let img = DynamicImage::ImageLuma8(gray);

        assert_eq!(img.rgba(0, 0), [7, 7, 7, 255]);
    }
}
