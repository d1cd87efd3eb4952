use thiserror::Error;

/// 隐写核心唯一会产生的错误：载荷 (含终止字节) 所需的 bit 数超过了载体的像素数。
///
/// 该错误总是在写入任何像素之前被检测到，调用方可以缩短消息或换用更大的图像后重试。
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "Not enough space in the image to hide the text. \nRequired: {required} pixels, Available: {available} pixels"
)]
pub struct CapacityError {
    /// 载荷需要的 bit 数，即 `(消息长度 + 1) * 8`。
    pub required: u64,
    /// 载体提供的像素数，即 `宽 * 高`。
    pub available: u64,
}
