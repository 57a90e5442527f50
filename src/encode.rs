/// QR encoding to an embeddable image data URI
///
/// This module handles:
/// - Building the QR module matrix from the user's payload
/// - Rasterizing the matrix to an exact pixel edge with a quiet zone
/// - PNG serialization and base64 data URI wrapping/unwrapping

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, Rgb, RgbImage};
use qrcode::types::QrError;
use qrcode::{Color as Module, QrCode};
use thiserror::Error;

/// Light modules surrounding the symbol on every side, in module units
pub const QUIET_ZONE_MODULES: u32 = 2;

/// Prefix shared by every image value this module produces
const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Foreground/background pair for the rendered symbol, as `#RRGGBB` strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrColors {
    /// Color of the dark modules
    pub dark: &'static str,
    /// Color of the light modules and the quiet zone
    pub light: &'static str,
}

/// Everything one generation attempt needs, captured at trigger time
#[derive(Debug, Clone)]
pub struct QrRequest {
    /// Raw payload bytes to encode (untrimmed user text)
    pub payload: String,
    /// Requested pixel edge length of the output raster
    pub size: u32,
    /// Resolved theme palette
    pub colors: QrColors,
}

/// Errors from encoding or from reading back an encoded value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// The payload could not be turned into a symbol (e.g. over capacity)
    #[error("QR encoding failed: {0}")]
    Symbol(#[from] QrError),
    /// A palette entry was not a `#RRGGBB` string
    #[error("invalid color value {0:?}")]
    Color(String),
    /// PNG serialization failed
    #[error("PNG serialization failed: {0}")]
    Png(String),
    /// The background task did not complete
    #[error("encode task failed: {0}")]
    Task(String),
    /// The value was not a PNG data URI produced by this module
    #[error("malformed image data URI")]
    MalformedDataUri,
}

/// Encode a request on the blocking pool
/// Runs in a background thread to avoid stalling the UI
pub async fn generate(request: QrRequest) -> Result<String, EncodeError> {
    tokio::task::spawn_blocking(move || encode_to_data_uri(&request))
        .await
        .map_err(|e| EncodeError::Task(format!("Task join error: {}", e)))?
}

/// Encode a request synchronously into a `data:image/png;base64,` URI
pub fn encode_to_data_uri(request: &QrRequest) -> Result<String, EncodeError> {
    let code = QrCode::new(request.payload.as_bytes())?;
    let dark = parse_hex_color(request.colors.dark)?;
    let light = parse_hex_color(request.colors.light)?;

    let raster = rasterize(&code, request.size, dark, light);

    let mut png = Vec::new();
    raster
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| EncodeError::Png(e.to_string()))?;

    Ok(format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(&png)))
}

/// Recover the PNG bytes from a data URI produced by this module
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, EncodeError> {
    let encoded = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or(EncodeError::MalformedDataUri)?;

    STANDARD
        .decode(encoded)
        .map_err(|_| EncodeError::MalformedDataUri)
}

/// Paint the module matrix into an RGB raster of exactly `size` pixels
/// per edge, quiet zone included
///
/// Each output pixel looks up the module under it, so no resampling pass
/// is needed and the requested edge length is hit exactly. A request
/// smaller than the symbol itself is ignored and the symbol edge wins,
/// matching the width contract of typical QR renderers.
fn rasterize(code: &QrCode, size: u32, dark: Rgb<u8>, light: Rgb<u8>) -> RgbImage {
    let modules = code.width() as u32;
    let symbol = modules + 2 * QUIET_ZONE_MODULES;
    let size = size.max(symbol);

    RgbImage::from_fn(size, size, |x, y| {
        let col = x * symbol / size;
        let row = y * symbol / size;

        let in_symbol = col >= QUIET_ZONE_MODULES
            && col < QUIET_ZONE_MODULES + modules
            && row >= QUIET_ZONE_MODULES
            && row < QUIET_ZONE_MODULES + modules;

        if in_symbol {
            let mx = (col - QUIET_ZONE_MODULES) as usize;
            let my = (row - QUIET_ZONE_MODULES) as usize;
            if code[(mx, my)] == Module::Dark {
                return dark;
            }
        }

        light
    })
}

/// Parse a `#RRGGBB` string into its RGB components
fn parse_hex_color(hex: &str) -> Result<Rgb<u8>, EncodeError> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| EncodeError::Color(hex.to_string()))?;

    let value = u32::from_str_radix(digits, 16).map_err(|_| EncodeError::Color(hex.to_string()))?;

    Ok(Rgb([(value >> 16) as u8, (value >> 8) as u8, value as u8]))
}
