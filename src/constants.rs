/// 隐写单个载荷字节所占用的像素数 (一个三元组)。
/// 每个像素提供 R、G、B 三个通道，共 9 个通道位：8 个数据位加 1 个延续标志位。
pub const PIXELS_PER_BYTE: usize = 3;

/// 单个载荷字节展开后的比特数。
pub const BITS_PER_BYTE: usize = 8;

/// 每个像素中用于承载比特的颜色通道数 (R、G、B)。Alpha 通道从不修改。
pub const DATA_CHANNELS: usize = 3;

/// 三元组中最后一个像素的位置索引，其 B 通道承载延续标志。
pub const FLAG_PIXEL_INDEX: usize = PIXELS_PER_BYTE - 1;

/// 支持读写的无损图像格式。有损格式会破坏奇偶信息，因此不在其列。
pub const LOSSLESS_FORMATS: [image::ImageFormat; 5] = [
    image::ImageFormat::Png,
    image::ImageFormat::Bmp,
    image::ImageFormat::Tiff,
    image::ImageFormat::WebP,
    image::ImageFormat::Qoi,
];
