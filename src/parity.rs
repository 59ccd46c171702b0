//! # 奇偶编码模块
//!
//! 每个数据通道只携带一个比特：其数值的奇偶性。
//! 调整幅度至多为 1，肉眼无法察觉。

/// 返回通道值的奇偶性：奇数为 1，偶数为 0。
#[inline]
pub fn parity(value: u8) -> u8 {
    value & 1
}

/// 将通道值调整为奇数。
///
/// 偶数向下减 1；`0` 无法再减，因此变为 `1`。
#[inline]
pub fn force_odd(value: u8) -> u8 {
    match value {
        0 => 1,
        v if v & 1 == 1 => v,
        v => v - 1,
    }
}

/// 将通道值调整为偶数。奇数向下减 1，不会下溢。
#[inline]
pub fn force_even(value: u8) -> u8 {
    value & !1
}

/// 按 `bit` 的取值 (0 或 1) 调整通道值的奇偶性。
#[inline]
pub fn with_parity(value: u8, bit: u8) -> u8 {
    if bit & 1 == 1 {
        force_odd(value)
    } else {
        force_even(value)
    }
}
