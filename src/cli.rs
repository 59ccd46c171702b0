//! # 命令行接口模块
//!
//! 使用 `clap` 定义程序的命令行结构。`--encode`、`--decode`、`--capacity`
//! 三种模式互斥且必须指定其一，解析结果经 [`Cli::into_command`] 转换为具体命令。

use crate::steganography::Alignment;
use anyhow::{Result, bail};
use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

/// 一款基于奇偶隐写的命令行工具，将文本隐藏在无损图像 (如 PNG, BMP) 像素的 RGB 通道奇偶性中。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于奇偶隐写的命令行工具，将文本隐藏在无损图像 (如 PNG, BMP) 像素的 RGB 通道奇偶性中。\n每 3 个像素承载 1 个字节，不写入任何长度字段。",
    group(ArgGroup::new("mode").required(true).args(["encode", "decode", "capacity"]))
)]
pub struct Cli {
    /// 将 TEXT 隐藏到该图像中，默认直接覆盖原文件。
    #[arg(long, value_name = "PATH")]
    pub encode: Option<PathBuf>,

    /// 从该图像中恢复隐藏的文本并打印。
    #[arg(long, value_name = "PATH")]
    pub decode: Option<PathBuf>,

    /// 打印该图像最多能隐藏的字节数。
    #[arg(long, value_name = "PATH")]
    pub capacity: Option<PathBuf>,

    /// 要隐藏的文本 (仅用于 --encode)。
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// 输出路径：编码时为结果图像，解码时为恢复出的原始字节。
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// 解码时在每行开头重置三元组计数，用于读取旧版工具生成的图像。
    #[arg(long)]
    pub row_reset: bool,

    /// 提高日志详细程度 (-v, -vv, -vvv)。
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// `--encode` 所需的参数。
#[derive(Debug)]
pub struct EncodeArgs {
    /// 载体图像路径。
    pub image: PathBuf,

    /// 要隐藏的文本，按其 UTF-8 字节写入。
    pub text: String,

    /// 结果图像路径，为 `None` 时覆盖 `image`。
    pub output: Option<PathBuf>,
}

/// `--decode` 所需的参数。
#[derive(Debug)]
pub struct DecodeArgs {
    /// 已隐藏数据的图像路径。
    pub image: PathBuf,

    /// 额外保存原始字节的路径。
    pub output: Option<PathBuf>,

    pub alignment: Alignment,
}

/// `--capacity` 所需的参数。
#[derive(Debug)]
pub struct CapacityArgs {
    pub image: PathBuf,
}

#[derive(Debug)]
pub enum Command {
    Encode(EncodeArgs),
    Decode(DecodeArgs),
    Capacity(CapacityArgs),
}

impl Cli {
    /// 校验参数组合并生成对应的命令。
    ///
    /// # Errors
    ///
    /// `--encode` 未提供 TEXT，或 TEXT 出现在其他模式中时返回错误。
    pub fn into_command(self) -> Result<Command> {
        let alignment = if self.row_reset {
            Alignment::RowReset
        } else {
            Alignment::Continuous
        };

        if let Some(image) = self.encode {
            let Some(text) = self.text.filter(|text| !text.is_empty()) else {
                bail!("text not provided: usage is --encode <PATH> <TEXT>");
            };
            return Ok(Command::Encode(EncodeArgs {
                image,
                text,
                output: self.output,
            }));
        }

        if self.text.is_some() {
            bail!("TEXT is only accepted together with --encode");
        }

        match (self.decode, self.capacity) {
            (Some(image), _) => Ok(Command::Decode(DecodeArgs {
                image,
                output: self.output,
                alignment,
            })),
            (None, Some(image)) => Ok(Command::Capacity(CapacityArgs { image })),
            (None, None) => bail!("arguments not provided: use --encode, --decode or --capacity"),
        }
    }

    /// 由 `-v` 的次数得出默认日志级别。
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
