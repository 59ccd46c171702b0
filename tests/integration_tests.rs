use image::{ImageBuffer, Rgba, RgbaImage};
use parity_hide::{
    Alignment, StegoError,
    cli::{CapacityArgs, DecodeArgs, EncodeArgs},
    handler::{handle_capacity, handle_decode, handle_encode, recover_bytes},
};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

/// 验证原地覆盖写入后能完整恢复文本
#[test]
fn test_encode_in_place_and_decode() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("cover.png");
    create_test_image(&image_path, 100, 100);
    let original_text = "This is a test message for the handler! 这是一个给处理器的测试信息！";

    // 2. 隐藏，不提供输出路径，覆盖原图
    handle_encode(EncodeArgs {
        image: image_path.clone(),
        text: original_text.to_string(),
        output: None,
    })?;

    // 3. 恢复并验证结果
    let recovered = recover_bytes(&image_path, Alignment::Continuous)?;
    assert_eq!(
        recovered,
        original_text.as_bytes(),
        "Recovered bytes must match the original UTF-8 bytes."
    );

    Ok(())
}

/// 验证指定输出路径时原图不变，且输出格式跟随扩展名
#[test]
fn test_encode_to_separate_output() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("original.png");
    let hidden_path = dir.path().join("hidden.bmp");
    let recovered_path = dir.path().join("recovered.txt");
    create_test_image(&image_path, 40, 30);
    let before = fs::read(&image_path)?;

    handle_encode(EncodeArgs {
        image: image_path.clone(),
        text: "bitmap output".to_string(),
        output: Some(hidden_path.clone()),
    })?;

    assert_eq!(fs::read(&image_path)?, before, "Source image must be untouched.");
    assert_eq!(
        image::ImageFormat::from_path(&hidden_path)?,
        image::ImageFormat::Bmp
    );
    assert_eq!(&fs::read(&hidden_path)?[..2], b"BM");

    // 解码时额外保存原始字节
    handle_decode(DecodeArgs {
        image: hidden_path,
        output: Some(recovered_path.clone()),
        alignment: Alignment::Continuous,
    })?;
    assert_eq!(fs::read(&recovered_path)?, b"bitmap output");

    Ok(())
}

/// 验证空间不足时返回容量错误且原图不被改动
#[test]
fn test_encode_not_enough_space() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");

    // 10x10 的图片最多隐藏 33 个字节
    create_test_image(&image_path, 10, 10);
    let before = fs::read(&image_path)?;

    let result = handle_encode(EncodeArgs {
        image: image_path.clone(),
        text: "a".repeat(34),
        output: None,
    });

    let err = result.expect_err("Encoding 34 bytes into 100 pixels must fail.");
    assert!(err.to_string().contains("Unable to hide the text"));
    assert!(matches!(
        err.downcast_ref::<StegoError>(),
        Some(StegoError::Capacity {
            required: 102,
            available: 100
        })
    ));
    assert_eq!(fs::read(&image_path)?, before);

    // 恰好 33 个字节可以容纳
    handle_encode(EncodeArgs {
        image: image_path.clone(),
        text: "a".repeat(33),
        output: None,
    })?;
    assert_eq!(
        recover_bytes(&image_path, Alignment::Continuous)?,
        "a".repeat(33).as_bytes()
    );

    Ok(())
}

/// 验证宽度为 3 的倍数时，按行重置的旧版读取方式也能得到相同结果
#[test]
fn test_row_reset_decoding_on_aligned_width() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("aligned.png");
    create_test_image(&image_path, 30, 20);

    handle_encode(EncodeArgs {
        image: image_path.clone(),
        text: "legacy readers agree when rows hold whole triplets".to_string(),
        output: None,
    })?;

    assert_eq!(
        recover_bytes(&image_path, Alignment::RowReset)?,
        recover_bytes(&image_path, Alignment::Continuous)?
    );

    Ok(())
}

/// 验证重新编码为更小的文件时不会残留旧数据
#[test]
fn test_overwrite_truncates_existing_file() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("noisy.png");
    let flat_path = dir.path().join("flat.png");

    // 随机噪声图像压缩后远大于纯色图像
    create_test_image(&image_path, 64, 64);
    RgbaImage::from_pixel(64, 64, Rgba([10, 20, 30, 255])).save(&flat_path)?;

    handle_encode(EncodeArgs {
        image: flat_path.clone(),
        text: "tiny".to_string(),
        output: Some(image_path.clone()),
    })?;

    let written = fs::read(&image_path)?;
    let reloaded = image::load_from_memory(&written)?.to_rgba8();
    assert_eq!(reloaded.dimensions(), (64, 64));
    assert_eq!(recover_bytes(&image_path, Alignment::Continuous)?, b"tiny");
    assert!(written.len() < fs::read(&flat_path)?.len() * 4);

    Ok(())
}

/// 验证无法解码的文件会报告图像错误
#[test]
fn test_invalid_image_is_reported() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let bogus = dir.path().join("bogus.png");
    fs::write(&bogus, "this is not a png")?;

    let err = recover_bytes(&bogus, Alignment::Continuous).expect_err("Must not decode.");
    assert!(matches!(
        err.downcast_ref::<StegoError>(),
        Some(StegoError::Format { .. } | StegoError::UnsupportedFormat { .. })
    ));

    let missing = dir.path().join("missing.png");
    let err = handle_capacity(CapacityArgs { image: missing }).expect_err("Must not open.");
    assert!(matches!(
        err.downcast_ref::<StegoError>(),
        Some(StegoError::Io { .. })
    ));

    Ok(())
}
