//! Integration tests for persisted settings and the command-line front end.

use assert_fs::prelude::*;
use exif_remover::core::settings::{
    forget_output_dir, last_output_dir, remember_output_dir, SqliteSettings, APP_ID,
};
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use std::process::{Command, Output};

fn exif_remover(settings: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_exif-remover"))
        .arg("--settings")
        .arg(settings)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn output_folder_survives_reopening() {
    let temp = assert_fs::TempDir::new().unwrap();
    let db = temp.child("settings.db");
    let exports = temp.child("exports");
    exports.create_dir_all().unwrap();

    {
        let store = SqliteSettings::open(db.path(), APP_ID).unwrap();
        remember_output_dir(&store, exports.path()).unwrap();
    }

    let store = SqliteSettings::open(db.path(), APP_ID).unwrap();
    assert_eq!(
        last_output_dir(&store).unwrap(),
        Some(exports.path().to_path_buf())
    );

    forget_output_dir(&store).unwrap();
    assert_eq!(last_output_dir(&store).unwrap(), None);
    db.assert(predicate::path::is_file());
}

#[test]
fn cli_remembers_output_folder_between_runs() {
    let temp = assert_fs::TempDir::new().unwrap();
    let db = temp.child("settings.db");
    let photos = temp.child("photos");
    let exports = temp.child("exports");
    photos.create_dir_all().unwrap();
    exports.create_dir_all().unwrap();
    RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]))
        .save(photos.child("a.png").path())
        .unwrap();

    let out = exif_remover(db.path(), &["config", "set-output", exports.path().to_str().unwrap()]);
    assert!(out.status.success());

    let out = exif_remover(
        db.path(),
        &["strip", photos.path().to_str().unwrap(), "--format", "json"],
    );
    assert!(out.status.success());
    let result: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(result["success_count"], 1);
    assert_eq!(result["cancelled"], false);
    exports.child("a.png").assert(predicate::path::is_file());

    let out = exif_remover(db.path(), &["config", "show"]);
    let shown = String::from_utf8(out.stdout).unwrap();
    assert!(predicate::str::contains(exports.path().to_str().unwrap()).eval(&shown));
}

#[test]
fn cli_rejects_run_without_output_folder() {
    let temp = assert_fs::TempDir::new().unwrap();
    let db = temp.child("settings.db");
    let photo = temp.child("a.png");
    RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]))
        .save(photo.path())
        .unwrap();

    let out = exif_remover(db.path(), &["strip", photo.path().to_str().unwrap()]);

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(predicate::str::contains("output folder").eval(&stderr));
}

#[test]
fn cli_rejects_out_of_range_jpeg_quality() {
    let temp = assert_fs::TempDir::new().unwrap();
    let db = temp.child("settings.db");
    let exports = temp.child("exports");
    exports.create_dir_all().unwrap();
    let photo = temp.child("a.jpg");
    RgbImage::from_pixel(2, 2, Rgb([0, 0, 0]))
        .save(photo.path())
        .unwrap();

    let out = exif_remover(
        db.path(),
        &[
            "strip",
            photo.path().to_str().unwrap(),
            "-o",
            exports.path().to_str().unwrap(),
            "--jpeg-quality",
            "0",
        ],
    );

    assert!(!out.status.success());
    exports.child("a.jpg").assert(predicate::path::missing());
}
