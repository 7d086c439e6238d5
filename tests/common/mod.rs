#![allow(dead_code)]

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

pub fn podiary_cmd() -> Command {
    let mut cmd = Command::cargo_bin("podiary").unwrap();
    cmd.env_remove("PODIARY_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a small solid-colour PNG frame and return its path
pub fn write_frame(dir: &Path, name: &str, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(16, 12, Rgb(color)).save(&path).unwrap();
    path
}
