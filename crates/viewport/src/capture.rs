//! Preview capture from the default camera pose

use std::io::Cursor;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use tailor_surface::CpuSurface;
use tracing::{debug, warn};

use crate::error::ViewportError;
use crate::viewport::Viewport;

impl Viewport {
    /// Render a PNG preview from the default pose.
    ///
    /// The current pose is restored afterwards, also when rendering fails.
    pub async fn capture_screenshot(&mut self, texture: &CpuSurface) -> Result<String, ViewportError> {
        let pose = self.camera().pose();
        self.reset_camera();

        let settle = Duration::from_millis(self.capture_config().settle_ms);
        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }

        let (width, height) = (self.capture_config().width, self.capture_config().height);
        let result = self
            .render_sized(texture, width, height)
            .and_then(|image| encode_png_data_uri(&image));

        self.camera_mut().set_pose(pose);
        match &result {
            Ok(uri) => debug!("Captured {}x{} preview ({} bytes)", width, height, uri.len()),
            Err(e) => warn!("Capture failed: {}", e),
        }
        result
    }
}

/// Encode an image as a `data:image/png;base64,` URI
pub fn encode_png_data_uri(image: &image::RgbaImage) -> Result<String, ViewportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&bytes)))
}
