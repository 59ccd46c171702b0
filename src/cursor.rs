//! # 像素遍历模块
//!
//! 编码与解码共享同一种遍历顺序：行优先，同一行从左到右，逐行向下。
//! 游标不感知三元组分组，分组由调用者负责。

/// 按行优先顺序产生 `(x, y)` 像素坐标的游标。
#[derive(Debug, Clone)]
pub struct PixelCursor {
    width: u32,
    height: u32,
    x: u32,
    y: u32,
}

impl PixelCursor {
    pub fn new(width: u32, height: u32) -> Self {
        // 宽度为 0 时直接视为已耗尽
        let height = if width == 0 { 0 } else { height };
        Self {
            width,
            height,
            x: 0,
            y: 0,
        }
    }

    /// 尚未产生的坐标数量。
    pub fn remaining(&self) -> usize {
        if self.y >= self.height {
            return 0;
        }
        let rows_left = (self.height - self.y) as usize;
        rows_left * self.width as usize - self.x as usize
    }
}

impl Iterator for PixelCursor {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.height {
            return None;
        }
        let position = (self.x, self.y);
        self.x += 1;
        if self.x == self.width {
            self.x = 0;
            self.y += 1;
        }
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for PixelCursor {}

impl std::iter::FusedIterator for PixelCursor {}
