//! Adaptive-palette conversion from PNG file to row records.

mod common;

use common::{fixtures, parse_longs, TestImage};
use planeconv::error::ConvertError;
use planeconv::models::{ConverterConfig, IndexedImage};
use planeconv::rendering::AsmSource;
use planeconv::services::{Converter, RowConverter};
use pretty_assertions::assert_eq;

/// Background 0, a band cycling through indices 1..=6 and a fixed band of
/// index 7. Every row after the first swaps the cycling color.
fn banded_image() -> TestImage {
    TestImage::from_fn(320, 256, fixtures::ramp_palette(), |x, y| match x {
        100..=139 => 1 + (y % 6) as u8,
        200..=219 => 7,
        _ => 0,
    })
}

#[test]
fn test_rows_from_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = banded_image().write(dir.path(), "cpubltro.png");

    let image = IndexedImage::open(&path).unwrap();
    let converter = RowConverter::new(ConverterConfig::default().rows).unwrap();
    let program = converter.convert(&image).unwrap();

    assert_eq!(program.rows.len(), 256);
    assert_eq!(program.reprograms, 255);

    let code = program.to_asm();
    let lines: Vec<&str> = code.lines().collect();
    assert_eq!(lines.len(), 1 + 256);
    assert_eq!(lines[0], "\t\tdc.w\t$00F,$21D,$E71,$000");

    // first row loads nothing, the header covers its colors
    let row0 = parse_longs(lines[1]);
    assert_eq!(row0.len(), 22);
    assert_eq!(&row0[6..8], &[0, 0xDFF116]);

    // column 6 (x 96..112): slot 1 from x 100 on, stored at position 16
    assert_eq!(row0[16], 0x0FFF_0000);
    // column 12 (x 192..208): slot 2 from x 200 on, stored at position 1
    assert_eq!(row0[1], 0x0000_00FF);
    // column 13 (x 208..224): slot 2 up to x 219, stored at position 2
    assert_eq!(row0[2], 0x0000_FFF0);
    // column 0 is background only, stored at position 13
    assert_eq!(row0[13], 0);

    // row 1 swaps index 1 for index 2 in slot 1
    let row1 = parse_longs(lines[2]);
    assert_eq!(&row1[6..8], &[0x042B_042B, 0xDFF184]);
    assert_eq!(row1[16], row0[16]);
}

#[test]
fn test_reprogram_mode_from_yaml() {
    let config = ConverterConfig::from_yaml(
        r#"
rows:
  fill: reprogram
  background: 0
"#,
    )
    .unwrap();
    let converter = RowConverter::new(config.rows).unwrap();

    // one new color per row: the band alone, no fixed band
    let image = TestImage::from_fn(320, 256, fixtures::ramp_palette(), |x, y| match x {
        100..=139 => 1 + (y % 6) as u8,
        _ => 0,
    })
    .decode();
    let program = converter.convert(&image).unwrap();

    assert_eq!(program.reprograms, 256);
    let code = program.to_asm();
    let lines: Vec<&str> = code.lines().collect();
    assert_eq!(lines[0], "\t\tdc.w\t$00F,$000,$000,$000");
    assert_eq!(&parse_longs(lines[1])[6..8], &[0x021D_021D, 0xDFF184]);
    // row 1: slot 1 holds index 1, which the row no longer uses
    assert_eq!(&parse_longs(lines[2])[6..8], &[0x042B_042B, 0xDFF184]);
}

#[test]
fn test_two_new_colors_abort_conversion() {
    let config = ConverterConfig::from_yaml("rows: {fill: reprogram, background: 0}").unwrap();
    let converter = RowConverter::new(config.rows).unwrap();

    let result = converter.convert(&banded_image().decode());
    let error = result.unwrap_err();
    assert!(matches!(error, ConvertError::Alloc(_)));
    assert!(
        error.to_string().starts_with("too many colors at [200,0]"),
        "unexpected message: {error}"
    );
}

#[test]
fn test_ceiling_limits_preloaded_slots() {
    let config = ConverterConfig::from_yaml("rows: {ceiling: 2}").unwrap();
    let converter = RowConverter::new(config.rows).unwrap();

    let error = converter.convert(&banded_image().decode()).unwrap_err();
    assert!(error.to_string().contains("[200,0]"), "{error}");
}

#[test]
fn test_truecolor_png_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rgb.png");
    {
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), 1, 1);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[1, 2, 3]).unwrap();
    }

    assert!(matches!(
        IndexedImage::open(&path),
        Err(ConvertError::NotIndexed)
    ));
}
