//! # 比特打包模块
//!
//! 在 `u8` 与按最高有效位优先排列的比特序列之间相互转换。
//! 序列中的每个元素取值为 0 或 1。

use crate::constants::BITS_PER_BYTE;

/// 将一个字节展开为 8 个比特，索引 0 为最高有效位。
pub fn byte_to_bits(value: u8) -> [u8; BITS_PER_BYTE] {
    std::array::from_fn(|i| (value >> (BITS_PER_BYTE - 1 - i)) & 1)
}

/// `byte_to_bits` 的逆运算。只取每个元素的最低位。
pub fn bits_to_byte(bits: &[u8; BITS_PER_BYTE]) -> u8 {
    bits.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1))
}

/// 按到达顺序将比特序列每 8 个一组还原为字节。
///
/// 末尾不足 8 个的比特会被丢弃，不会产生残缺字节。
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(BITS_PER_BYTE)
        .map(|chunk| {
            let mut group = [0u8; BITS_PER_BYTE];
            group.copy_from_slice(chunk);
            bits_to_byte(&group)
        })
        .collect()
}
