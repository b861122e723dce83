use anyhow::{bail, Context, Result};
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Largest frame an ICO directory entry can describe
pub const MAX_ICO_SIZE: u32 = 256;

/// Bundle `source` into a Windows ICO at `path`, one entry per size.
///
/// Entries matching the source dimensions embed it unchanged, the rest are
/// Lanczos downscales of it. Entries are written in the order given.
pub fn write_ico(source: &RgbaImage, sizes: &[u32], path: &Path) -> Result<()> {
    let mut icon_dir = IconDir::new(ResourceType::Icon);

    for &size in sizes {
        if size == 0 || size > MAX_ICO_SIZE {
            bail!("ICO frames must be 1..={}px, got {}px", MAX_ICO_SIZE, size);
        }
        let frame = scale_to(source, size);
        let frame = IconImage::from_rgba_data(size, size, frame.into_raw());
        let entry = IconDirEntry::encode(&frame)
            .with_context(|| format!("Failed to encode {}x{} ICO entry", size, size))?;
        icon_dir.add_entry(entry);
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create ICO file: {}", path.display()))?;
    icon_dir
        .write(BufWriter::new(file))
        .with_context(|| format!("Failed to write ICO file: {}", path.display()))?;

    Ok(())
}

fn scale_to(source: &RgbaImage, size: u32) -> RgbaImage {
    if source.dimensions() == (size, size) {
        source.clone()
    } else {
        imageops::resize(source, size, size, FilterType::Lanczos3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_icon;

    fn read_ico(path: &Path) -> IconDir {
        IconDir::read(File::open(path).unwrap()).unwrap()
    }

    #[test]
    fn test_entries_match_requested_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.ico");
        let source = render_icon(256).unwrap();
        write_ico(&source, &[16, 32, 48, 256], &path).unwrap();

        let sizes: Vec<(u32, u32)> = read_ico(&path)
            .entries()
            .iter()
            .map(|e| (e.width(), e.height()))
            .collect();
        assert_eq!(sizes, vec![(16, 16), (32, 32), (48, 48), (256, 256)]);
    }

    #[test]
    fn test_small_frames_are_downscaled_from_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.ico");
        let source = render_icon(256).unwrap();
        write_ico(&source, &[16], &path).unwrap();

        let decoded = read_ico(&path).entries()[0].decode().unwrap();
        let expected = imageops::resize(&source, 16, 16, FilterType::Lanczos3);
        let alpha = |raw: &[u8]| raw.chunks(4).map(|px| px[3]).collect::<Vec<u8>>();
        assert_eq!(alpha(decoded.rgba_data()), alpha(expected.as_raw()));

        // Downscaling softens the edges, a native 16px render would not
        assert!(decoded.rgba_data().chunks(4).any(|px| px[3] > 0 && px[3] < 255));
        assert_ne!(alpha(decoded.rgba_data()), alpha(render_icon(16).unwrap().as_raw()));
    }

    #[test]
    fn test_full_size_frame_embeds_source_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.ico");
        let source = render_icon(256).unwrap();
        write_ico(&source, &[256], &path).unwrap();

        let decoded = read_ico(&path).entries()[0].decode().unwrap();
        assert_eq!(decoded.rgba_data(), source.as_raw().as_slice());
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.ico");
        let source = render_icon(512).unwrap();
        assert!(write_ico(&source, &[512], &path).is_err());
    }
}
