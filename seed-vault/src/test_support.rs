use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use base64::prelude::*;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use vault_core::adapters::outbound::crypto::AesGcmCipher;

use crate::config::{read_config, Settings};

/// Settings rooted in `dir` with a fresh key and an in-memory database.
pub fn settings(dir: &Path) -> Settings {
    let root = dir.display();
    let config = format!(
        r#"[paths]
seeder = '{root}/database/seeders/user_seeder.rs'
orchestrator = '{root}/database/seeders/mod.rs'
ledger = '{root}/database/seeders/user_seeder.jsonl'
storage = '{root}/storage'

[database]
url = "sqlite::memory:"

[crypto]
key = "{key}"
"#,
        key = AesGcmCipher::generate_key()
    );

    let path = dir.join("seed-vault.toml");
    std::fs::write(&path, config).unwrap();
    read_config(Some(&path)).unwrap()
}

pub fn png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(image)
        .write_to(&mut bytes, ImageFormat::Png)
        .unwrap();

    let path = dir.join(name);
    std::fs::write(&path, bytes.into_inner()).unwrap();
    path
}

pub fn decode_image(base64: &str) -> DynamicImage {
    image::load_from_memory(&BASE64_STANDARD.decode(base64).unwrap()).unwrap()
}
