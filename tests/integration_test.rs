use std::fs;
use std::path::Path;
use tempfile::TempDir;

use barcodegen::{FileFormat, QrOptions};

fn decode_qr_file(path: &Path) -> String {
    let gray = image::open(path)
        .expect("Failed to open generated QR image")
        .to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare(gray);
    let grids = prepared.detect_grids();
    assert!(!grids.is_empty(), "No QR code found in {}", path.display());
    let (_, content) = grids[0].decode().expect("Failed to decode QR code");
    content
}

#[test]
fn test_generic_barcode_defaults_to_png() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("barcode");

    let result = barcodegen::generate_barcode("ABC123", "code128", &output, None)
        .expect("Barcode generation failed");

    assert_eq!(result.output_path, temp_dir.path().join("barcode.png"));
    let img = image::open(&result.output_path).expect("Failed to open generated image");

    // 10px border on each side around bars of the default height
    assert_eq!(img.height(), barcodegen::options::DEFAULT_BAR_HEIGHT + 20);
    assert!(img.width() > 20);
}

#[test]
fn test_generic_barcode_every_type() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    for (kind, data) in [
        ("azteccode", "Transit ticket 42"),
        ("code128", "ABC123"),
        ("code39", "CODE39"),
        ("code93", "CODE93"),
        ("datamatrix", "https://example.com"),
        ("ean13", "590123412345"),
        ("interleaved2of5", "12345678"),
        ("pdf417", "Document ID: 12345"),
        ("qrcode", "Hello World"),
        ("upca", "03600029145"),
    ] {
        let output = temp_dir.path().join(kind);
        let result = barcodegen::generate_barcode(data, kind, &output, None)
            .unwrap_or_else(|e| panic!("{kind} failed: {e}"));
        assert!(result.output_path.exists(), "{kind} did not write a file");
        image::open(&result.output_path)
            .unwrap_or_else(|e| panic!("{kind} wrote an unreadable image: {e}"));
    }
}

#[test]
fn test_generic_barcode_svg_and_options() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("website_dm.svg");

    let result = barcodegen::generate_barcode(
        "https://example.com",
        "datamatrix",
        &output,
        Some("scale=4,barcolor=#0000ff,format=square"),
    )
    .expect("Barcode generation failed");

    assert_eq!(result.output_path, output);
    let svg = fs::read_to_string(&output).expect("Failed to read SVG");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("fill=\"#0000ff\""));
}

#[test]
fn test_generic_qrcode_is_scannable() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("generic_qr.png");

    barcodegen::generate_barcode("https://example.com", "qrcode", &output, None)
        .expect("Barcode generation failed");

    assert_eq!(decode_qr_file(&output), "https://example.com");
}

#[test]
fn test_generic_barcode_rejects_oversized_scale() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("huge");

    let err = barcodegen::generate_barcode("ABC123", "code128", &output, Some("scale=100000000"))
        .unwrap_err();
    assert!(err.to_string().starts_with("Invalid value '100000000' for option 'scale'"));

    // every option within its limit, but too many modules for the canvas
    let data = "X".repeat(200);
    let err = barcodegen::generate_barcode(&data, "code128", &output, Some("scale=100"))
        .unwrap_err();
    assert!(matches!(err, barcodegen::Error::InvalidArgument(_)));

    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_generic_qrcode_too_long() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("long.png");

    let data = "A".repeat(5000);
    let err = barcodegen::generate_barcode(&data, "qrcode", &output, None).unwrap_err();
    assert!(err.to_string().starts_with("Failed to generate barcode: "));
    assert!(!output.exists());
}

#[test]
fn test_generic_barcode_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("barcode");

    let err = barcodegen::generate_barcode("ABC", "maxicode", &output, None).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Unsupported barcode type 'maxicode'. Available types: azteccode"));

    let err =
        barcodegen::generate_barcode("ABC", "code128", &output, Some("columns=3")).unwrap_err();
    assert!(err.to_string().starts_with("Unsupported option 'columns' for code128."));

    assert!(!temp_dir.path().join("barcode.png").exists());
}

#[test]
fn test_ean13_svg_default() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("my_barcode");

    let path = barcodegen::generate_ean13("123456789012", &output, FileFormat::Svg)
        .expect("EAN-13 generation failed");

    assert_eq!(path, temp_dir.path().join("my_barcode.svg"));
    let svg = fs::read_to_string(&path).expect("Failed to read SVG");
    assert!(svg.contains(">1234567890128</text>"));
}

#[test]
fn test_ean13_png_replaces_extension() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("barcode.svg");

    let path = barcodegen::generate_ean13("590123412345", &output, FileFormat::Png)
        .expect("EAN-13 generation failed");

    assert_eq!(path, temp_dir.path().join("barcode.png"));
    let img = image::open(&path).expect("Failed to open generated image");

    // bars plus a caption line of 8-module-tall digits
    let style = barcodegen::ean13::ean13_style();
    assert_eq!(img.width(), 95 * style.module_size + 2 * style.margin);
    assert_eq!(
        img.height(),
        style.bar_height + 2 * style.margin + 8 * style.module_size
    );

    // the caption row has ink; the quiet zone above it does not
    let rgb = img.to_rgb8();
    let caption_top = style.bar_height + style.margin + style.margin / 2;
    let inked = |y: u32| (0..rgb.width()).any(|x| rgb.get_pixel(x, y).0 == [0, 0, 0]);
    assert!((caption_top..img.height()).any(|y| inked(y)));
    assert!(!inked(style.bar_height + style.margin + 1));
}

#[test]
fn test_ean13_rejects_invalid_codes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("barcode");

    let err = barcodegen::generate_ean13("12345", &output, FileFormat::Svg).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid EAN-13 code: EAN-13 code must be exactly 12 digits"
    );

    let err = barcodegen::generate_ean13("ABCDEFGHIJKL", &output, FileFormat::Png).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid EAN-13 code: EAN-13 code must contain only digits"
    );

    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_qr_png_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("qr_code");
    let data = "Hello, world! This is a test for the QR generator.";

    let path = barcodegen::generate_qr(data, &output, &QrOptions::default())
        .expect("QR generation failed");

    assert_eq!(path, temp_dir.path().join("qr_code.png"));
    assert_eq!(decode_qr_file(&path), data);
}

#[test]
fn test_qr_image_size_follows_box_and_border() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("sized");
    let options = QrOptions {
        box_size: 3,
        border: 2,
        ..QrOptions::default()
    };

    let path = barcodegen::generate_qr("Hello", &output, &options).expect("QR generation failed");

    let (symbol, _) = barcodegen::encode_qr(b"Hello", options.error_correction).unwrap();
    let expected = (symbol.width() as u32 + 2 * 2) * 3;

    let img = image::open(&path).expect("Failed to open generated QR image");
    assert_eq!((img.width(), img.height()), (expected, expected));
}

#[test]
fn test_qr_colors_and_svg() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("colored");
    let options = QrOptions {
        format: FileFormat::Svg,
        fill_color: "red".to_string(),
        back_color: "#ff0".to_string(),
        ..QrOptions::default()
    };

    let path = barcodegen::generate_qr("Data", &output, &options).expect("QR generation failed");

    assert_eq!(path, temp_dir.path().join("colored.svg"));
    let svg = fs::read_to_string(&path).expect("Failed to read SVG");
    assert!(svg.contains("fill=\"#ff0000\""));
    assert!(svg.contains("fill=\"#ffff00\""));
}

#[test]
fn test_qr_rejects_oversized_border() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("qr_code");
    let options = QrOptions {
        box_size: 70_000,
        border: 70_000,
        ..QrOptions::default()
    };

    let err = barcodegen::generate_qr("Data", &output, &options).unwrap_err();
    assert!(err.to_string().starts_with("Invalid argument: "));
    assert!(!temp_dir.path().join("qr_code.png").exists());
}

#[test]
fn test_qr_rejects_bad_colors() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = temp_dir.path().join("qr_code");
    let options = QrOptions {
        fill_color: "notacolor".to_string(),
        ..QrOptions::default()
    };

    let err = barcodegen::generate_qr("Data", &output, &options).unwrap_err();
    assert_eq!(err.to_string(), "Invalid fill color: notacolor");
    assert!(!temp_dir.path().join("qr_code.png").exists());
}
