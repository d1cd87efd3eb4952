//! # 像素遍历模块
//!
//! 隐藏与提取必须以完全相同的顺序访问像素，否则提取出的每一个 bit 都会错位。
//! 两者都只通过本模块的 [`row_major`] 获取坐标。

use std::iter::FusedIterator;

/// 将线性计数器映射为行优先的 `(x, y)` 坐标：`x` 在行内变化最快。
///
/// `width` 必须大于 0。
#[inline]
pub fn position(counter: u64, width: u32) -> (u32, u32) {
    let width = u64::from(width);
    ((counter % width) as u32, (counter / width) as u32)
}

/// 按行优先顺序遍历 `width x height` 栅格的全部坐标。
#[derive(Debug, Clone)]
pub struct RowMajor {
    width: u32,
    counter: u64,
    total: u64,
}

/// 构造一个行优先的坐标迭代器。任一维度为 0 时迭代器为空。
pub fn row_major(width: u32, height: u32) -> RowMajor {
    RowMajor {
        width,
        counter: 0,
        total: u64::from(width) * u64::from(height),
    }
}

impl Iterator for RowMajor {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.counter >= self.total {
            return None;
        }
        let coords = position(self.counter, self.width);
        self.counter += 1;
        Some(coords)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.counter) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowMajor {}

impl FusedIterator for RowMajor {}
