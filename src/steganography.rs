//! # 隐写核心
//!
//! 将消息逐 bit 写入每个像素 R 通道的最低有效位，并以一个零字节作为结束标记。
//! 每个载荷字节从最低位开始写入，像素按行优先顺序访问。
//!
//! 消息内部如果含有零字节，提取时会在该处截断。这是终止符方案本身的限制，不做转义。

use crate::carrier::{RED, RgbaSource};
use crate::constants::{CLEAR_LSB_MASK, PIXELS_PER_BYTE, TERMINATOR};
use crate::error::CapacityError;
use crate::raster::row_major;
use image::{Rgba, RgbaImage};
use log::debug;

/// 隐藏 `message_len` 字节的消息所需的像素数 (含终止字节)。
pub fn required_pixels(message_len: usize) -> u64 {
    (message_len as u64 + 1) * PIXELS_PER_BYTE as u64
}

/// `width x height` 的载体最多能隐藏的消息字节数 (不含终止字节)。
pub fn capacity(width: u32, height: u32) -> usize {
    let pixels = u64::from(width) * u64::from(height);
    (pixels / PIXELS_PER_BYTE as u64).saturating_sub(1) as usize
}

/// 检查 `message_len` 字节的消息能否放入 `width x height` 的载体。
pub fn check_capacity(width: u32, height: u32, message_len: usize) -> Result<(), CapacityError> {
    let required = required_pixels(message_len);
    let available = u64::from(width) * u64::from(height);
    if required > available {
        return Err(CapacityError {
            required,
            available,
        });
    }
    Ok(())
}

/// 将 `message` 隐藏到 `carrier` 中，返回一张新的图像。
///
/// 输入图像不会被修改。载荷范围内的像素只有 R 通道的最低位可能变化，
/// 其余像素以及所有像素的 G、B、A 通道都与输入完全相同。
///
/// # Errors
///
/// 当 `(message.len() + 1) * 8` 大于载体的像素数时返回 [`CapacityError`]，
/// 此时不会分配或产生任何输出。
pub fn embed<S>(carrier: &S, message: &[u8]) -> Result<RgbaImage, CapacityError>
where
    S: RgbaSource + ?Sized,
{
    let (width, height) = carrier.dimensions();
    check_capacity(width, height, message.len())?;

    debug!(
        "embedding {} bytes into {}x{} carrier ({} of {} pixels)",
        message.len(),
        width,
        height,
        required_pixels(message.len()),
        u64::from(width) * u64::from(height)
    );

    let mut bits = message
        .iter()
        .chain(std::iter::once(&TERMINATOR))
        .flat_map(|&byte| (0..8).map(move |shift| (byte >> shift) & 1));

    let mut output = RgbaImage::new(width, height);
    for (x, y) in row_major(width, height) {
        let mut pixel = carrier.rgba(x, y);
        if let Some(bit) = bits.next() {
            pixel[RED] = (pixel[RED] & CLEAR_LSB_MASK) | bit;
        }
        output.put_pixel(x, y, Rgba(pixel));
    }

    Ok(output)
}

/// 从 `carrier` 中提取隐藏的消息。
///
/// 读到第一个完整的零字节时停止，零字节本身不包含在结果中。
/// 如果整幅图像都没有出现终止字节 (例如从未隐写过的图像)，
/// 则返回已收集到的完整字节，末尾不足 8 bit 的部分被丢弃。该函数不会失败。
pub fn extract<S>(carrier: &S) -> Vec<u8>
where
    S: RgbaSource + ?Sized,
{
    let (width, height) = carrier.dimensions();

    let mut message = Vec::new();
    let mut current: u8 = 0;
    let mut bit_count = 0;

    for (x, y) in row_major(width, height) {
        let bit = carrier.rgba(x, y)[RED] & 1;
        current |= bit << bit_count;
        bit_count += 1;

        if bit_count == PIXELS_PER_BYTE {
            if current == TERMINATOR {
                debug!("terminator found after {} bytes", message.len());
                return message;
            }
            message.push(current);
            current = 0;
            bit_count = 0;
        }
    }

    debug!(
        "no terminator in {}x{} carrier, returning {} bytes",
        width,
        height,
        message.len()
    );
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 创建一个所有像素都相同的载体。
    fn uniform_carrier(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(pixel))
    }

    /// 创建一个各通道取值随坐标变化的载体，便于发现通道或顺序错误。
    fn patterned_carrier(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let seed = (x * 31 + y * 17) as u8;
            Rgba([seed, seed.wrapping_mul(3), seed.wrapping_add(101), 255 - seed])
        })
    }

    fn red_low_bits(img: &RgbaImage) -> Vec<u8> {
        img.pixels().map(|p| p[RED] & 1).collect()
    }

    #[test]
    fn should_round_trip_a_text_message() {
        let carrier = patterned_carrier(32, 32);
        let message = b"Hello World!";

        let hidden = embed(&carrier, message).expect("message should fit");
        assert_eq!(extract(&hidden), message);
    }

    #[test]
    fn should_round_trip_every_non_zero_byte_value() {
        let carrier = patterned_carrier(64, 33);
        let message: Vec<u8> = (1..=255).collect();

        let hidden = embed(&carrier, &message).expect("message should fit");
        assert_eq!(extract(&hidden), message);
    }

    #[test]
    fn should_accept_a_payload_that_exactly_fills_the_carrier() {
        // (3 + 1) * 8 == 32 == 8 * 4
        let carrier = patterned_carrier(8, 4);
        let message = b"abc";

        let hidden = embed(&carrier, message).expect("exact fit should succeed");
        assert_eq!(extract(&hidden), message);
    }

    #[test]
    fn should_reject_a_payload_one_bit_too_large() {
        // (3 + 1) * 8 == 32 == 31 + 1
        let carrier = patterned_carrier(31, 1);

        let err = embed(&carrier, b"abc").unwrap_err();
        assert_eq!(
            err,
            CapacityError {
                required: 32,
                available: 31,
            }
        );
        assert!(err.to_string().contains("Not enough space"));
    }

    #[test]
    fn should_leave_the_carrier_untouched_on_failure() {
        let carrier = patterned_carrier(4, 2);
        let snapshot = carrier.clone();

        assert!(embed(&carrier, b"too long").is_err());
        assert_eq!(carrier, snapshot);
    }

    #[test]
    fn should_only_touch_the_low_bit_of_red() {
        let carrier = patterned_carrier(16, 16);
        let message = b"channel isolation";

        let hidden = embed(&carrier, message).expect("message should fit");
        let touched = required_pixels(message.len()) as usize;

        for (i, (src, dst)) in carrier.pixels().zip(hidden.pixels()).enumerate() {
            assert_eq!(src.0[1..], dst.0[1..], "G, B or A changed at pixel {i}");
            if i < touched {
                assert_eq!(src[RED] & CLEAR_LSB_MASK, dst[RED] & CLEAR_LSB_MASK);
            } else {
                assert_eq!(src, dst, "pixel {i} outside the payload changed");
            }
        }
    }

    #[test]
    fn should_round_trip_an_empty_message() {
        let carrier = patterned_carrier(2, 4);

        let hidden = embed(&carrier, b"").expect("terminator alone should fit");
        assert!(extract(&hidden).is_empty());
        assert_eq!(red_low_bits(&hidden), vec![0; 8]);
    }

    #[test]
    fn should_extract_from_a_carrier_that_was_never_embedded() {
        // 所有 R 通道为奇数：每个字节都是 0xFF，没有终止字节
        let odd = uniform_carrier(5, 5, [0x11, 0, 0, 255]);
        assert_eq!(extract(&odd), vec![0xFF; 3]);

        // 所有 R 通道为偶数：第一个字节就是终止字节
        let even = uniform_carrier(5, 5, [0x10, 0, 0, 255]);
        assert!(extract(&even).is_empty());

        let tiny = uniform_carrier(1, 1, [0x11, 0, 0, 255]);
        assert!(extract(&tiny).is_empty());
    }

    #[test]
    fn should_stop_at_an_interior_zero_byte() {
        let carrier = patterned_carrier(16, 16);

        let hidden = embed(&carrier, b"ab\0cd").expect("message should fit");
        assert_eq!(extract(&hidden), b"ab");
    }

    #[test]
    fn should_match_the_documented_4x2_and_4x4_scenario() {
        let small = uniform_carrier(4, 2, [0x10, 0x20, 0x30, 0xFF]);
        let err = embed(&small, &[0x41]).unwrap_err();
        assert_eq!(err.required, 16);
        assert_eq!(err.available, 8);

        let carrier = uniform_carrier(4, 4, [0x10, 0x20, 0x30, 0xFF]);
        let hidden = embed(&carrier, &[0x41]).expect("16 pixels hold 2 bytes");

        // 0x41 = 0b0100_0001，最低位在前，随后是终止字节
        let expected = vec![1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(red_low_bits(&hidden), expected);
        assert_eq!(extract(&hidden), vec![0x41]);
    }

    #[test]
    fn should_write_bits_in_row_major_order() {
        // 宽高不同，若按列优先读取将得到不同的字节
        let carrier = uniform_carrier(8, 3, [0, 0, 0, 255]);
        let hidden = embed(&carrier, &[0x0F, 0xF0]).expect("24 pixels hold 3 bytes");

        let first_row: Vec<u8> = (0..8).map(|x| hidden.get_pixel(x, 0)[RED] & 1).collect();
        assert_eq!(first_row, vec![1, 1, 1, 1, 0, 0, 0, 0]);
        let second_row: Vec<u8> = (0..8).map(|x| hidden.get_pixel(x, 1)[RED] & 1).collect();
        assert_eq!(second_row, vec![0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn should_report_capacity_in_message_bytes() {
        assert_eq!(capacity(4, 4), 1);
        assert_eq!(capacity(8, 4), 3);
        assert_eq!(capacity(2, 3), 0);
        assert_eq!(capacity(0, 0), 0);
        assert!(check_capacity(4, 4, 1).is_ok());
        assert!(check_capacity(4, 4, 2).is_err());
    }

    #[test]
    fn should_accept_dynamic_images() {
        let carrier = image::DynamicImage::ImageRgba8(patterned_carrier(16, 16));

        let hidden = embed(&carrier, b"dynamic").expect("message should fit");
        assert_eq!(extract(&hidden), b"dynamic");
    }
}
