//! Image decoration sources: data URIs, asset paths, and decoding

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tiny_skia::{IntSize, Pixmap};

use crate::assets::AssetSource;
use crate::error::SurfaceError;

const DATA_URI_PREFIX: &str = "data:";

/// A decoded image ready to be drawn
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Premultiplied RGBA pixels
    pub pixmap: Pixmap,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

/// Wrap encoded image bytes in a base64 data URI, detecting the MIME type
pub fn encode_data_uri(bytes: &[u8]) -> Result<String, SurfaceError> {
    let format = image::guess_format(bytes)?;
    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        STANDARD.encode(bytes)
    ))
}

/// Extract the payload of a base64 data URI
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, SurfaceError> {
    let rest = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| SurfaceError::DataUri("missing data: prefix".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| SurfaceError::DataUri("missing payload separator".into()))?;
    if !meta.ends_with(";base64") {
        return Err(SurfaceError::DataUri(format!("unsupported encoding in {meta}")));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| SurfaceError::DataUri(e.to_string()))
}

/// Bytes behind an image `src`: inline data URI or asset path
pub fn read_source(src: &str, assets: &dyn AssetSource) -> Result<Vec<u8>, SurfaceError> {
    if src.starts_with(DATA_URI_PREFIX) {
        decode_data_uri(src)
    } else {
        assets.read(src)
    }
}

/// Decode encoded image bytes into a premultiplied pixmap
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, SurfaceError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a < 255 {
            for c in &mut px[..3] {
                *c = ((*c as u32 * a + 127) / 255) as u8;
            }
        }
    }

    let size = IntSize::from_wh(width, height)
        .ok_or(SurfaceError::Allocation { width, height })?;
    let pixmap = Pixmap::from_vec(data, size).ok_or(SurfaceError::Allocation { width, height })?;
    Ok(DecodedImage { pixmap })
}
