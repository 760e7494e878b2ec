//! QR code rendering for printable documents.
//!
//! Map links are useless on paper, so the offer and invoice render each
//! billboard's location link as a small QR code instead.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::Luma;
use qrcode::QrCode;

/// PNG data URI for `url`, sized for a table cell. `None` when encoding
/// fails; the template falls back to a plain link.
pub fn data_uri(url: &str) -> Option<String> {
    let code = QrCode::new(url.as_bytes()).ok()?;
    let img = code
        .render::<Luma<u8>>()
        .max_dimensions(96, 96)
        .quiet_zone(false)
        .build();

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .ok()?;

    Some(format!("data:image/png;base64,{}", BASE64.encode(png)))
}
