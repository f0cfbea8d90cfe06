#![allow(dead_code)]

use assert_cmd::Command;
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

pub fn diary_cmd() -> Command {
    let mut cmd = Command::cargo_bin("diary").unwrap();
    cmd.env_remove("DIARY_ROOT");
    cmd.env_remove("GROQ_API_KEY");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a solid-colour PNG and return its path
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, pixel: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(pixel)))
        .save(&path)
        .unwrap();
    path
}

/// Parsed backing document under a default-configured root
pub fn read_document(root: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(root.join("data").join("diary.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}
