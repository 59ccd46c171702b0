//! # 命令处理逻辑模块
//!
//! 包含处理 `encode`、`decode` 和 `capacity` 命令的高级业务逻辑。
//! 本模块负责协调图像读写、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, Command, DecodeArgs, EncodeArgs};
use crate::constants::PIXELS_PER_BYTE;
use crate::image_io::{load_grid, output_format, save_grid};
use crate::steganography::{Alignment, capacity, decode_with, encode_in_place};
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::Path;

/// 将解析好的命令分派到对应的处理函数。
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Encode(args) => handle_encode(args),
        Command::Decode(args) => handle_decode(args),
        Command::Capacity(args) => handle_capacity(args),
    }
}

/// 处理 `--encode` 命令的执行逻辑。
///
/// 读取载体图像、检查容量、将文本的 UTF-8 字节隐藏到像素中，
/// 最后把结果完整覆盖写入目标路径 (默认即源图像)。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码载体图像。
/// * 图像容量不足以隐藏文本。
/// * 无法编码或写入结果图像。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let (mut grid, source_format) = load_grid(&args.image).with_context(|| {
        format!(
            "Unable to load image: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let payload = args.text.as_bytes();
    let available = capacity(grid.width(), grid.height());

    encode_in_place(&mut grid, payload).with_context(|| {
        format!(
            "Unable to hide the text in: {} \nRequired: {} bytes of capacity, Available: {}",
            args.image.to_string_lossy().red().bold(),
            payload.len().to_string().red().bold(),
            available.to_string().green().bold()
        )
    })?;

    let dest = args.output.as_deref().unwrap_or(&args.image);
    let format = output_format(dest, source_format).with_context(|| {
        format!(
            "Unable to choose an output format for: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    save_grid(dest, &grid, format).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    info!(
        "{} bytes hidden in {} pixels of {}",
        payload.len(),
        payload.len() * PIXELS_PER_BYTE,
        dest.display()
    );
    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 读取图像并恢复隐藏的原始字节。
///
/// # Errors
///
/// 图像无法读取或解码时返回错误。未找到终止标志不视为错误。
pub fn recover_bytes(image: &Path, alignment: Alignment) -> Result<Vec<u8>> {
    let (grid, _) = load_grid(image).with_context(|| {
        format!(
            "Unable to load image: {}",
            image.to_string_lossy().red().bold()
        )
    })?;

    Ok(decode_with(&grid, alignment))
}

/// 处理 `--decode` 命令的执行逻辑。
///
/// 恢复出的字节按 UTF-8 (有损) 解释后打印；若指定了输出路径，另将原始字节写入该文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码图像。
/// * 无法写入输出文件。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let bytes = recover_bytes(&args.image, args.alignment)?;
    info!("recovered {} bytes from {}", bytes.len(), args.image.display());

    if let Some(output) = &args.output {
        fs::write(output, &bytes).with_context(|| {
            format!(
                "Unable to write to target text file: {}",
                output.to_string_lossy().red().bold()
            )
        })?;
    }

    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}

/// 处理 `--capacity` 命令：打印图像最多能隐藏的字节数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let (grid, _) = load_grid(&args.image).with_context(|| {
        format!(
            "Unable to load image: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} ({}x{}) can hide up to {} bytes",
        args.image.to_string_lossy().green().bold(),
        grid.width(),
        grid.height(),
        capacity(grid.width(), grid.height()).to_string().green().bold()
    );
    Ok(())
}
