//! Shared helpers for album-server integration tests
//!
//! - Minimal JPEG files carrying EXIF date tags
//! - Modification time control
//! - A temp album (photo dir + dates file + static root) wired into a router

#![allow(dead_code)]

use album_common::{FileTimePreference, ServerConfig};
use album_server::{build_router, AppState};
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

const TAG_DATE_TIME: u16 = 0x0132;
const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;

/// Build a JPEG whose APP1 segment carries the given EXIF date tags
/// (`YYYY:MM:DD HH:MM:SS`). `DateTime` sits in IFD0, `DateTimeOriginal`
/// in the Exif sub-IFD, as cameras write them.
pub fn jpeg_with_exif(date_time_original: Option<&str>, date_time: Option<&str>) -> Vec<u8> {
    let ifd0_entries = date_time.is_some() as usize + date_time_original.is_some() as usize;
    let ifd0_offset = 8usize;
    let exif_ifd_offset = ifd0_offset + 2 + 12 * ifd0_entries + 4;
    let mut data_offset = exif_ifd_offset;
    if date_time_original.is_some() {
        data_offset += 2 + 12 + 4;
    }

    let ascii = |s: &str| {
        let mut bytes = s.as_bytes().to_vec();
        bytes.push(0);
        bytes
    };
    let date_time_bytes = date_time.map(ascii);
    let original_bytes = date_time_original.map(ascii);

    let date_time_at = data_offset;
    let original_at = data_offset + date_time_bytes.as_ref().map_or(0, |b| b.len());

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&(ifd0_offset as u32).to_le_bytes());

    // IFD0
    tiff.extend_from_slice(&(ifd0_entries as u16).to_le_bytes());
    if let Some(bytes) = &date_time_bytes {
        push_entry(&mut tiff, TAG_DATE_TIME, TYPE_ASCII, bytes.len() as u32, date_time_at as u32);
    }
    if date_time_original.is_some() {
        push_entry(&mut tiff, TAG_EXIF_IFD_POINTER, TYPE_LONG, 1, exif_ifd_offset as u32);
    }
    tiff.extend_from_slice(&0u32.to_le_bytes());

    // Exif IFD
    if let Some(bytes) = &original_bytes {
        tiff.extend_from_slice(&1u16.to_le_bytes());
        push_entry(
            &mut tiff,
            TAG_DATE_TIME_ORIGINAL,
            TYPE_ASCII,
            bytes.len() as u32,
            original_at as u32,
        );
        tiff.extend_from_slice(&0u32.to_le_bytes());
    }

    assert_eq!(tiff.len(), data_offset);
    if let Some(bytes) = &date_time_bytes {
        tiff.extend_from_slice(bytes);
    }
    if let Some(bytes) = &original_bytes {
        tiff.extend_from_slice(bytes);
    }

    let segment_len = 2 + 6 + tiff.len();
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&(segment_len as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// A JPEG with no APP1 segment at all
pub fn jpeg_without_exif() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xD9]
}

fn push_entry(buf: &mut Vec<u8>, tag: u16, typ: u16, count: u32, value: u32) {
    buf.extend_from_slice(&tag.to_le_bytes());
    buf.extend_from_slice(&typ.to_le_bytes());
    buf.extend_from_slice(&count.to_le_bytes());
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Set a file's modification time
pub fn set_mtime(path: &Path, mtime: SystemTime) {
    fs::File::options()
        .write(true)
        .open(path)
        .expect("open for set_modified")
        .set_modified(mtime)
        .expect("set_modified");
}

/// Local wall-clock time as a `SystemTime`
pub fn local_time(date: &str) -> SystemTime {
    let naive = chrono::NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S")
        .expect("valid test date");
    album_common::time::localize(naive).into()
}

/// Temporary album layout:
///
/// ```text
/// <root>/
///   photos/
///   photo_dates.json   (created on first update)
/// ```
pub struct TestAlbum {
    pub root: TempDir,
    pub config: ServerConfig,
}

impl TestAlbum {
    /// Filesystem dates come from modification time so tests can back-date files
    pub fn new() -> Self {
        let root = TempDir::new().expect("temp dir");
        let photo_dir = root.path().join("photos");
        fs::create_dir(&photo_dir).expect("create photo dir");

        let config = ServerConfig {
            photo_dir,
            dates_file: root.path().join("photo_dates.json"),
            static_root: root.path().to_path_buf(),
            file_time: FileTimePreference::Modified,
            ..ServerConfig::default()
        };

        Self { root, config }
    }

    pub fn photo_dir(&self) -> &Path {
        &self.config.photo_dir
    }

    pub fn dates_file(&self) -> &Path {
        &self.config.dates_file
    }

    /// Write a photo and back-date its modification time
    pub fn add_photo(&self, name: &str, contents: &[u8], mtime: &str) -> PathBuf {
        let path = self.photo_dir().join(name);
        fs::write(&path, contents).expect("write photo");
        set_mtime(&path, local_time(mtime));
        path
    }

    pub fn router(&self) -> Router {
        build_router(AppState::new(self.config.clone()))
    }
}

/// Build a request with an optional JSON body
pub fn request(method: &str, uri: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Extract a JSON body from a response
pub async fn extract_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Extract a raw body from a response
pub async fn extract_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body")
        .to_vec()
}
