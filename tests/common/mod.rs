#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Bytes of a header-only baseline JPEG reporting `width` x `height`.
pub fn jpeg_bytes(width: u16, height: u16) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08];
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&width.to_be_bytes());
    // Three components: id, sampling factors, quantization table.
    bytes.extend_from_slice(&[0x03, 0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01]);
    bytes.extend_from_slice(&[0xFF, 0xD9]);
    bytes.resize(64, 0);
    bytes
}

pub fn write_jpeg(path: &Path, width: u16, height: u16) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, jpeg_bytes(width, height)).expect("write jpeg file");
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write file");
}

/// A small CCPD image name whose plate box is (x1, y1)-(x2, y2).
pub fn ccpd_name(tag: &str, x1: u32, y1: u32, x2: u32, y2: u32) -> String {
    format!("{tag}-90_90-{x1}&{y1}_{x2}&{y2}-0_0_0_0_0_0_0-100-10.jpg")
}
