//! # 隐写核心模块
//!
//! 每个载荷字节占用连续 3 个像素 (一个三元组)，共 9 个通道位：
//!
//! | 像素 | R     | G     | B        |
//! |------|-------|-------|----------|
//! | 0    | bit 0 | bit 1 | bit 2    |
//! | 1    | bit 3 | bit 4 | bit 5    |
//! | 2    | bit 6 | bit 7 | 延续标志 |
//!
//! 延续标志为奇数表示后面还有字节，为偶数表示这是最后一个字节。
//! 图像中不写入任何长度字段，Alpha 通道从不修改。

use crate::bits::{bits_to_bytes, byte_to_bits};
use crate::constants::{BITS_PER_BYTE, DATA_CHANNELS, FLAG_PIXEL_INDEX, PIXELS_PER_BYTE};
use crate::cursor::PixelCursor;
use crate::error::{Result, StegoError};
use crate::parity::{parity, with_parity};
use image::RgbaImage;
use log::{debug, trace};

/// 解码时三元组计数器的对齐方式。
///
/// 编码器始终使用跨行连续的计数器。旧版工具在解码时会在每一行开头把计数器归零，
/// 当图像宽度不是 3 的倍数时，二者对分组边界的理解不同。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// 计数器跨行连续推进，与编码器严格互逆。
    #[default]
    Continuous,
    /// 每行开头归零计数器，与旧版工具的读取结果逐位一致。
    RowReset,
}

/// 一张 `width × height` 的图像最多能隐藏的载荷字节数。
pub fn capacity(width: u32, height: u32) -> usize {
    let bytes = u64::from(width) * u64::from(height) / PIXELS_PER_BYTE as u64;
    usize::try_from(bytes).unwrap_or(usize::MAX)
}

/// 将 `payload` 隐藏到 `grid` 的副本中并返回该副本，输入图像保持不变。
///
/// # Errors
///
/// * [`StegoError::EmptyPayload`] - 载荷为空。
/// * [`StegoError::Capacity`] - `payload.len() * 3` 超过像素总数。
pub fn encode(grid: &RgbaImage, payload: &[u8]) -> Result<RgbaImage> {
    let mut output = grid.clone();
    encode_in_place(&mut output, payload)?;
    Ok(output)
}

/// 与 [`encode`] 相同，但直接修改调用者的图像。
///
/// 校验失败时图像不会被修改。
pub fn encode_in_place(grid: &mut RgbaImage, payload: &[u8]) -> Result<()> {
    if payload.is_empty() {
        return Err(StegoError::EmptyPayload);
    }

    let available = u64::from(grid.width()) * u64::from(grid.height());
    let required = payload.len() as u64 * PIXELS_PER_BYTE as u64;
    if required > available {
        return Err(StegoError::Capacity {
            required,
            available,
        });
    }

    debug!(
        "encoding {} bytes into a {}x{} grid ({} of {} pixels)",
        payload.len(),
        grid.width(),
        grid.height(),
        required,
        available
    );

    let mut cursor = PixelCursor::new(grid.width(), grid.height());
    let last = payload.len() - 1;

    for (i, &byte) in payload.iter().enumerate() {
        let mut slots = [0u8; PIXELS_PER_BYTE * DATA_CHANNELS];
        slots[..BITS_PER_BYTE].copy_from_slice(&byte_to_bits(byte));
        slots[BITS_PER_BYTE] = u8::from(i != last);

        for ((x, y), bits) in cursor
            .by_ref()
            .take(PIXELS_PER_BYTE)
            .zip(slots.chunks_exact(DATA_CHANNELS))
        {
            let pixel = grid.get_pixel_mut(x, y);
            // 只遍历前三个通道，Alpha 原样保留
            for (channel, &bit) in pixel.0.iter_mut().zip(bits) {
                *channel = with_parity(*channel, bit);
            }
        }

        trace!("byte {i} = {byte:#04x}, {} pixels left", cursor.len());
    }

    Ok(())
}

/// 以跨行连续的三元组对齐方式恢复隐藏的字节。
pub fn decode(grid: &RgbaImage) -> Vec<u8> {
    decode_with(grid, Alignment::Continuous)
}

/// 按指定的对齐方式恢复隐藏的字节。
///
/// 读到偶数延续标志时立即停止。若遍历完所有像素仍未遇到终止标志，
/// 不报错，而是返回已完整累积的字节 (可能是截断或无意义的数据)。
pub fn decode_with(grid: &RgbaImage, alignment: Alignment) -> Vec<u8> {
    let mut bits = Vec::new();
    let mut position = 0;
    let mut terminated = false;

    for (x, y) in PixelCursor::new(grid.width(), grid.height()) {
        if alignment == Alignment::RowReset && x == 0 {
            position = 0;
        }

        let [r, g, b, _] = grid.get_pixel(x, y).0;
        bits.push(parity(r));
        bits.push(parity(g));

        if position == FLAG_PIXEL_INDEX {
            position = 0;
            if parity(b) == 0 {
                terminated = true;
                break;
            }
        } else {
            bits.push(parity(b));
            position += 1;
        }
    }

    let bytes = bits_to_bytes(&bits);
    if terminated {
        debug!("terminator found after {} bytes", bytes.len());
    } else {
        debug!(
            "no terminator in {}x{} grid, returning {} bytes best-effort",
            grid.width(),
            grid.height(),
            bytes.len()
        );
    }
    bytes
}
