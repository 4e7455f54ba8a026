mod common;

use common::synthetic_mat::{checkerboard, mat_strategy, shape_strategy};
use mat_core::io::{
    imencode, imwrite_with, load_record, load_write_options, save_record, OutputFormat,
    WriteOptions,
};
use mat_core::{decode_record, encode_record, imread, imwrite, Mat, MatError, Tolerance};
use proptest::prelude::*;

const QUANTIZATION: Tolerance = Tolerance {
    abs: 1.0 / 255.0,
    rel: 0.0,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn png_round_trip_through_filesystem() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("board.png");
    let board = checkerboard(24, 32, 3, 8);

    imwrite(&path, &board).unwrap();
    let back = imread(&path).unwrap();

    assert_eq!(back.shape(), board.shape());
    assert!(back.approx_eq(&board, QUANTIZATION));
}

#[test]
fn rgba_markers_survive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("markers.png");
    let mut m = mat_core::zeros(5, 5, 4).unwrap();
    m[(0, 0, 0)] = 1.0;
    m[(0, 0, 3)] = 1.0;
    m[(1, 1, 1)] = 1.0;
    m[(1, 1, 3)] = 1.0;
    m[(2, 2, 2)] = 1.0;
    m[(2, 2, 3)] = 1.0;

    imwrite(&path, &m).unwrap();
    let back = imread(&path).unwrap();
    assert_eq!(back, m);
    assert_eq!(back.pixel(1, 1).unwrap(), &[0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn out_of_range_samples_are_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clamped.png");
    let m = Mat::from_vec(1, 3, 1, vec![-2.0, 0.5, 7.0]).unwrap();
    imwrite(&path, &m).unwrap();
    let back = imread(&path).unwrap();
    let expected = Mat::from_vec(1, 3, 1, vec![0.0, 0.5, 1.0]).unwrap();
    assert!(back.approx_eq(&expected, QUANTIZATION));
}

#[test]
fn bmp_output_format_is_honoured() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.bmp");
    let board = checkerboard(8, 8, 3, 2);
    let opts = WriteOptions::default().with_format(OutputFormat::Bmp);
    imwrite_with(&path, &board, &opts).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], b"BM");
    assert!(imread(&path).unwrap().approx_eq(&board, QUANTIZATION));
}

#[test]
fn format_channel_limits_are_checked_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    for (format, channels, name) in [
        (OutputFormat::Bmp, 1, "gray.bmp"),
        (OutputFormat::Bmp, 2, "gray_alpha.bmp"),
        (OutputFormat::Tiff, 2, "gray_alpha.tiff"),
    ] {
        let path = dir.path().join(name);
        let opts = WriteOptions::default().with_format(format);
        let err = imwrite_with(&path, &checkerboard(4, 4, channels, 2), &opts).unwrap_err();
        assert_eq!(err, MatError::InvalidChannelsForOperation { channels });
        assert!(!path.exists());
    }
}

#[test]
fn gray_tiff_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.tiff");
    let board = checkerboard(6, 10, 1, 3);
    let opts = WriteOptions::default().with_format(OutputFormat::Tiff);
    imwrite_with(&path, &board, &opts).unwrap();
    let back = imread(&path).unwrap();
    assert_eq!(back.shape(), board.shape());
    assert!(back.approx_eq(&board, QUANTIZATION));
}

#[test]
fn missing_parent_dir_fails_without_create() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.png");
    let opts = WriteOptions::default().with_create_parent_dirs(false);
    let err = imwrite_with(&path, &checkerboard(4, 4, 1, 2), &opts).unwrap_err();
    assert!(matches!(err, MatError::WriteImageFailed { .. }));
}

#[test]
fn missing_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let err = imread(dir.path().join("nope.png")).unwrap_err();
    assert!(matches!(err, MatError::ImageLoadFailed { .. }));
}

#[test]
fn unsupported_channel_count_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("five.png");
    let m = Mat::zeros(2, 2, 5).unwrap();
    assert_eq!(
        imwrite(&path, &m).unwrap_err(),
        MatError::InvalidChannelsForOperation { channels: 5 }
    );
    assert!(!path.exists());
}

#[test]
fn record_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mat.bin");
    let mut m = Mat::zeros(2, 3, 2).unwrap();
    *m.at_mut((0, 1, 1)).unwrap() = 0.125;
    *m.at_mut((1, 2, 0)).unwrap() = -42.0;
    *m.at_mut((1, 0, 1)).unwrap() = 3.0e-7;
    *m.at_mut((0, 0, 0)).unwrap() = 1.0e9;

    let written = save_record(&m, &path).unwrap();
    assert_eq!(written as u64, std::fs::metadata(&path).unwrap().len());
    let back = load_record(&path).unwrap();
    assert!(back.approx_eq(&m, Tolerance::EXACT));
}

#[test]
fn missing_record_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_record(&dir.path().join("absent.bin")),
        Err(MatError::Io { .. })
    ));
}

#[test]
fn write_options_load_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("write.json");
    std::fs::write(&path, r#"{"format": "tiff", "create_parent_dirs": false}"#).unwrap();
    let opts = load_write_options(&path).unwrap();
    assert_eq!(opts.format, OutputFormat::Tiff);
    assert!(!opts.create_parent_dirs);

    std::fs::write(&path, "{not json").unwrap();
    assert!(matches!(
        load_write_options(&path),
        Err(MatError::InvalidConfig { .. })
    ));
}

#[test]
fn encoded_png_has_signature() {
    let png = imencode(&checkerboard(4, 4, 2, 1), OutputFormat::Png).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn record_round_trip(m in shape_strategy().prop_flat_map(|(r, c, ch)| mat_strategy(r, c, ch))) {
        let bytes = encode_record(&m).unwrap();
        let back = decode_record(&bytes).unwrap();
        prop_assert!(back.approx_eq(&m, Tolerance::EXACT));
        prop_assert_eq!(encode_record(&back).unwrap(), bytes);
    }
}
