//! # 错误类型模块
//!
//! 核心编解码与图像读写各自的失败情形，调用者可以按变体分别处理。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StegoError {
    /// 载荷所需像素超过图像像素总数。
    #[error("payload needs {required} pixels but the image only has {available}")]
    Capacity { required: u64, available: u64 },

    /// 空载荷无法表示：终止标志位于某个字节的三元组之内。
    #[error("payload is empty, there is nothing to hide")]
    EmptyPayload,

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a decodable image: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 无法确定输出格式，或格式不属于支持的无损格式。
    #[error("{} does not name a supported lossless image format", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, StegoError>;
