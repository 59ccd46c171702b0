//! # parity_hide 库
//!
//! 本库包含奇偶隐写工具的核心逻辑：比特打包、奇偶编码、像素遍历与编解码，
//! 以及围绕它们的图像读写和命令处理。

// 声明库包含的所有模块。

pub mod bits;
pub mod cli;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod handler;
pub mod image_io;
pub mod parity;
pub mod steganography;

pub use error::StegoError;
pub use steganography::{Alignment, capacity, decode, decode_with, encode, encode_in_place};
