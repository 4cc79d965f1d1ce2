//! Integration test: run the lienzo binary end-to-end -- read a source
//! image, replay a stroke script, and write the mask and export PNGs.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::Command;

use lienzo_editor::{Point, Stroke};

/// Workspace-relative scratch directory for test fixtures and outputs.
fn scratch_dir(name: &str) -> PathBuf {
    let workspace_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf();
    let dir = workspace_root.join("target").join("lienzo-cli-tests").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Write a white PNG fixture and return its path.
fn white_png_fixture(dir: &Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join("input.png");
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
    img.save(&path).unwrap();
    path
}

#[test]
fn replay_session_writes_mask_and_export() {
    let dir = scratch_dir("replay");
    let input = white_png_fixture(&dir, 100, 100);

    // Record one vertical stroke: (10,10) -> (10,50) at width 10.
    let strokes = vec![Stroke {
        width: 10,
        points: vec![Point::new(10.0, 10.0), Point::new(10.0, 50.0)],
    }];
    let script = dir.join("session.json");
    std::fs::write(&script, serde_json::to_vec(&strokes).unwrap()).unwrap();

    let mask_path = dir.join("mask.png");
    let export_path = dir.join("export.png");

    let status = Command::new(env!("CARGO_BIN_EXE_lienzo"))
        .arg(&input)
        .arg("--strokes")
        .arg(&script)
        .arg("--output")
        .arg(&mask_path)
        .arg("--export")
        .arg(&export_path)
        .arg("--ratio")
        .arg("9:16")
        .status()
        .expect("binary should launch");
    assert!(status.success(), "lienzo exited with {status}");

    // The mask is binary, sized to the source, and marks the stroke.
    let mask = image::open(&mask_path).unwrap().to_rgba8();
    assert_eq!((mask.width(), mask.height()), (100, 100));
    assert_eq!(mask.get_pixel(10, 30).0, [0, 0, 0, 255]);
    assert_eq!(mask.get_pixel(80, 80).0, [0, 0, 0, 0]);
    for p in mask.pixels() {
        assert!(
            p.0 == [0, 0, 0, 255] || p.0 == [0, 0, 0, 0],
            "non-binary mask pixel {p:?}"
        );
    }

    // The export is framed at 9:16 from the 1080px reference width.
    let export = image::open(&export_path).unwrap().to_rgba8();
    assert_eq!((export.width(), export.height()), (1080, 1920));
}

#[test]
fn omitted_stroke_script_yields_transparent_mask() {
    let dir = scratch_dir("no-strokes");
    let input = white_png_fixture(&dir, 40, 30);
    let mask_path = dir.join("mask.png");

    let status = Command::new(env!("CARGO_BIN_EXE_lienzo"))
        .arg(&input)
        .arg("--output")
        .arg(&mask_path)
        .status()
        .expect("binary should launch");
    assert!(status.success(), "lienzo exited with {status}");

    let mask = image::open(&mask_path).unwrap().to_rgba8();
    assert_eq!((mask.width(), mask.height()), (40, 30));
    assert!(mask.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn unknown_ratio_fails_with_readable_error() {
    let dir = scratch_dir("bad-ratio");
    let input = white_png_fixture(&dir, 40, 30);

    let output = Command::new(env!("CARGO_BIN_EXE_lienzo"))
        .arg(&input)
        .arg("--output")
        .arg(dir.join("mask.png"))
        .arg("--export")
        .arg(dir.join("export.png"))
        .arg("--ratio")
        .arg("4:3")
        .output()
        .expect("binary should launch");
    assert!(!output.status.success(), "expected a non-zero exit");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unknown ratio"),
        "stderr should name the bad ratio, got: {stderr}"
    );
}
