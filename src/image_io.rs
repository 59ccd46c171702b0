//! # 图像读写模块
//!
//! 负责在图像文件与内存中的 RGBA 像素网格之间转换。隐写核心从不接触文件字节。

use crate::constants::LOSSLESS_FORMATS;
use crate::error::{Result, StegoError};
use image::{ImageFormat, ImageReader, RgbaImage};
use log::debug;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// 读取图像并转换为 RGBA8 网格，同时返回探测到的源格式。
///
/// # Errors
///
/// * [`StegoError::Io`] - 文件无法打开或读取。
/// * [`StegoError::UnsupportedFormat`] - 无法识别格式，或该格式是有损格式。
/// * [`StegoError::Format`] - 文件内容不是有效的图像。
pub fn load_grid(path: &Path) -> Result<(RgbaImage, ImageFormat)> {
    let io_error = |source| StegoError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .map_err(io_error)?
        .with_guessed_format()
        .map_err(io_error)?;

    let format = reader
        .format()
        .filter(|format| LOSSLESS_FORMATS.contains(format))
        .ok_or_else(|| StegoError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

    let image = reader.decode().map_err(|source| StegoError::Format {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "loaded {} as {:?}, {}x{}",
        path.display(),
        format,
        image.width(),
        image.height()
    );

    Ok((image.to_rgba8(), format))
}

/// 确定输出格式：优先使用目标路径的扩展名，没有可识别的扩展名时沿用 `fallback`。
pub fn output_format(path: &Path, fallback: ImageFormat) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path).unwrap_or(fallback);
    if LOSSLESS_FORMATS.contains(&format) {
        Ok(format)
    } else {
        Err(StegoError::UnsupportedFormat {
            path: path.to_path_buf(),
        })
    }
}

/// 将网格编码为 `format` 并完整覆盖 `path`。
///
/// 先在内存中完成编码，再截断并写入文件，编码失败时原文件保持不变，
/// 新文件比旧文件短时也不会残留旧数据。
pub fn save_grid(path: &Path, grid: &RgbaImage, format: ImageFormat) -> Result<()> {
    let mut encoded = Cursor::new(Vec::new());
    grid.write_to(&mut encoded, format)
        .map_err(|source| StegoError::Format {
            path: path.to_path_buf(),
            source,
        })?;

    let bytes = encoded.into_inner();
    fs::write(path, &bytes).map_err(|source| StegoError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("wrote {} bytes of {:?} to {}", bytes.len(), format, path.display());
    Ok(())
}
