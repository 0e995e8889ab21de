//! Reads print resolution straight from container headers.
//!
//! The `image` crate decodes pixels but does not surface density metadata,
//! so the relevant header fields are parsed here:
//!
//! - JPEG: JFIF APP0 density, falling back to the EXIF (APP1) resolution tags
//! - PNG: the `pHYs` chunk
//! - TIFF: `XResolution` / `YResolution` with `ResolutionUnit`
//!
//! Every parser returns `None` on truncated or unexpected data instead of
//! failing; a missing density is not an error for the caller.

const CM_PER_INCH: f64 = 2.54;
const METRES_PER_INCH: f64 = 0.0254;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

const TIFF_TAG_X_RESOLUTION: u16 = 282;
const TIFF_TAG_Y_RESOLUTION: u16 = 283;
const TIFF_TAG_RESOLUTION_UNIT: u16 = 296;
const TIFF_TYPE_SHORT: u16 = 3;
const TIFF_TYPE_RATIONAL: u16 = 5;

/// Dots per inch `(x, y)` recorded in an encoded image, if any.
pub fn probe_dpi(data: &[u8]) -> Option<(f64, f64)> {
    let dpi = if data.starts_with(&[0xFF, 0xD8]) {
        jpeg_dpi(data)
    } else if data.starts_with(PNG_SIGNATURE) {
        png_dpi(data)
    } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
        tiff_dpi(data)
    } else {
        None
    };
    dpi.filter(|(x, y)| x.is_finite() && y.is_finite() && *x > 0.0 && *y > 0.0)
}

// ---------------------------------------------------------------------------
// JPEG
// ---------------------------------------------------------------------------

fn jpeg_dpi(data: &[u8]) -> Option<(f64, f64)> {
    let mut exif = None;
    let mut offset = 2;

    while offset + 4 <= data.len() {
        if data[offset] != 0xFF {
            return None;
        }
        let marker = data[offset + 1];
        // Fill bytes before a marker
        if marker == 0xFF {
            offset += 1;
            continue;
        }
        // Start of scan / end of image: no more metadata segments
        if marker == 0xDA || marker == 0xD9 {
            break;
        }
        // Standalone markers carry no length
        if (0xD0..=0xD7).contains(&marker) || marker == 0x01 {
            offset += 2;
            continue;
        }

        let length = read_u16(data, offset + 2, Endian::Big)? as usize;
        let payload = data.get(offset + 4..offset + 2 + length)?;

        match marker {
            0xE0 if payload.starts_with(b"JFIF\0") => {
                if let Some(dpi) = jfif_density(payload) {
                    return Some(dpi);
                }
            }
            0xE1 if payload.starts_with(b"Exif\0\0") && exif.is_none() => {
                exif = Some(&payload[6..]);
            }
            _ => {}
        }
        offset += 2 + length;
    }

    exif.and_then(tiff_dpi)
}

/// JFIF APP0 payload: identifier(5) version(2) units(1) x_density(2) y_density(2).
fn jfif_density(payload: &[u8]) -> Option<(f64, f64)> {
    let units = *payload.get(7)?;
    let x = read_u16(payload, 8, Endian::Big)? as f64;
    let y = read_u16(payload, 10, Endian::Big)? as f64;
    match units {
        1 => Some((x, y)),
        2 => Some((x * CM_PER_INCH, y * CM_PER_INCH)),
        // 0 = pixel aspect ratio only
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// PNG
// ---------------------------------------------------------------------------

fn png_dpi(data: &[u8]) -> Option<(f64, f64)> {
    let mut offset = PNG_SIGNATURE.len();

    while offset + 8 <= data.len() {
        let length = read_u32(data, offset, Endian::Big)? as usize;
        let chunk_type = &data[offset + 4..offset + 8];
        let body = data.get(offset + 8..(offset + 8).checked_add(length)?)?;

        match chunk_type {
            b"pHYs" => {
                let x = read_u32(body, 0, Endian::Big)? as f64;
                let y = read_u32(body, 4, Endian::Big)? as f64;
                return match *body.get(8)? {
                    1 => Some((x * METRES_PER_INCH, y * METRES_PER_INCH)),
                    _ => None,
                };
            }
            // pHYs must precede the image data
            b"IDAT" | b"IEND" => return None,
            _ => {}
        }
        // chunk = length(4) + type(4) + body + crc(4)
        offset += 12 + length;
    }
    None
}

// ---------------------------------------------------------------------------
// TIFF (also the EXIF payload layout)
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
enum Endian {
    Big,
    Little,
}

fn tiff_dpi(data: &[u8]) -> Option<(f64, f64)> {
    let endian = match data.get(0..2)? {
        b"II" => Endian::Little,
        b"MM" => Endian::Big,
        _ => return None,
    };
    let ifd = read_u32(data, 4, endian)? as usize;
    let count = read_u16(data, ifd, endian)? as usize;

    let mut x_res = None;
    let mut y_res = None;
    let mut unit = 2; // inches unless stated otherwise

    for i in 0..count {
        let entry = ifd + 2 + i * 12;
        let tag = read_u16(data, entry, endian)?;
        let field_type = read_u16(data, entry + 2, endian)?;
        match (tag, field_type) {
            (TIFF_TAG_X_RESOLUTION, TIFF_TYPE_RATIONAL) => {
                x_res = read_rational(data, entry, endian);
            }
            (TIFF_TAG_Y_RESOLUTION, TIFF_TYPE_RATIONAL) => {
                y_res = read_rational(data, entry, endian);
            }
            (TIFF_TAG_RESOLUTION_UNIT, TIFF_TYPE_SHORT) => {
                unit = read_u16(data, entry + 8, endian)?;
            }
            _ => {}
        }
    }

    let (x, y) = (x_res?, y_res?);
    match unit {
        2 => Some((x, y)),
        3 => Some((x * CM_PER_INCH, y * CM_PER_INCH)),
        // 1 = no absolute unit
        _ => None,
    }
}

/// RATIONAL values live at the offset stored in the entry's value field.
fn read_rational(data: &[u8], entry: usize, endian: Endian) -> Option<f64> {
    let offset = read_u32(data, entry + 8, endian)? as usize;
    let numerator = read_u32(data, offset, endian)?;
    let denominator = read_u32(data, offset + 4, endian)?;
    if denominator == 0 {
        return None;
    }
    Some(numerator as f64 / denominator as f64)
}

fn read_u16(data: &[u8], offset: usize, endian: Endian) -> Option<u16> {
    let bytes: [u8; 2] = data.get(offset..offset + 2)?.try_into().ok()?;
    Some(match endian {
        Endian::Big => u16::from_be_bytes(bytes),
        Endian::Little => u16::from_le_bytes(bytes),
    })
}

fn read_u32(data: &[u8], offset: usize, endian: Endian) -> Option<u32> {
    let bytes: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;
    Some(match endian {
        Endian::Big => u32::from_be_bytes(bytes),
        Endian::Little => u32::from_le_bytes(bytes),
    })
}
