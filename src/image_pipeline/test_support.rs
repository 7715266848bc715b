//! In-memory TIFF fixtures shared by unit tests.

use std::io::Cursor;

use tiff::encoder::{TiffEncoder, colortype};

/// Encodes each page as a 16-bit grayscale image of the given size.
pub(crate) fn gray16_pages(width: u32, height: u32, pages: &[Vec<u16>]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
    for page in pages {
        encoder
            .write_image::<colortype::Gray16>(width, height, page)
            .unwrap();
    }
    buffer
}

/// Encodes a single interleaved RGBA8 page, i.e. a four channel raster.
pub(crate) fn rgba8(width: u32, height: u32, samples: &[u8]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
    encoder
        .write_image::<colortype::RGBA8>(width, height, samples)
        .unwrap();
    buffer
}

/// Encodes a single 32-bit unsigned grayscale page.
pub(crate) fn gray32(width: u32, height: u32, samples: &[u32]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
    encoder
        .write_image::<colortype::Gray32>(width, height, samples)
        .unwrap();
    buffer
}

/// Encodes a single 32-bit float grayscale page.
pub(crate) fn gray32f(width: u32, height: u32, samples: &[f32]) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer)).unwrap();
    encoder
        .write_image::<colortype::Gray32Float>(width, height, samples)
        .unwrap();
    buffer
}

/// Builds an uncompressed 8-bit band-planar TIFF by hand: one strip per
/// plane, `PlanarConfiguration = 2`. The encoder only writes interleaved data.
pub(crate) fn planar8(width: u16, height: u16, planes: &[Vec<u8>]) -> Vec<u8> {
    const SHORT: u16 = 3;
    const LONG: u16 = 4;

    let plane_len = usize::from(width) * usize::from(height);
    assert!(planes.iter().all(|p| p.len() == plane_len));
    let count = planes.len() as u32;

    let mut out = b"II*\0".to_vec();
    let data_start = 8u32;
    let ifd_start = data_start + (plane_len * planes.len()) as u32;
    let ifd_start = ifd_start + ifd_start % 2;
    out.extend_from_slice(&ifd_start.to_le_bytes());
    for plane in planes {
        out.extend_from_slice(plane);
    }
    out.resize(ifd_start as usize, 0);

    let offsets: Vec<u8> = (0..count)
        .flat_map(|i| (data_start + i * plane_len as u32).to_le_bytes())
        .collect();
    let byte_counts: Vec<u8> = (0..count)
        .flat_map(|_| (plane_len as u32).to_le_bytes())
        .collect();
    let bits: Vec<u8> = (0..count).flat_map(|_| 8u16.to_le_bytes()).collect();
    let short = |v: u16| v.to_le_bytes().to_vec();

    // (tag, type, count, payload), sorted by tag.
    let entries: Vec<(u16, u16, u32, Vec<u8>)> = vec![
        (256, SHORT, 1, short(width)),
        (257, SHORT, 1, short(height)),
        (258, SHORT, count, bits),
        (259, SHORT, 1, short(1)),
        (262, SHORT, 1, short(1)),
        (273, LONG, count, offsets),
        (277, SHORT, 1, short(planes.len() as u16)),
        (278, SHORT, 1, short(height)),
        (279, LONG, count, byte_counts),
        (284, SHORT, 1, short(2)),
    ];

    let mut overflow_at = ifd_start + 2 + 12 * entries.len() as u32 + 4;
    let mut overflow = Vec::new();
    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for (tag, kind, n, payload) in entries {
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(&n.to_le_bytes());
        if payload.len() <= 4 {
            let mut inline = payload;
            inline.resize(4, 0);
            out.extend_from_slice(&inline);
        } else {
            out.extend_from_slice(&overflow_at.to_le_bytes());
            overflow_at += payload.len() as u32;
            overflow.extend_from_slice(&payload);
        }
    }
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&overflow);
    out
}
