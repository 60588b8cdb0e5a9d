//! Deterministic rasterization of the editing surface

use tiny_skia::{FilterQuality, Paint, Pixmap, PixmapPaint, Stroke};

use crate::background::BackgroundGroup;
use crate::color::{paint_color, parse_hex_color};
use crate::error::SurfaceError;
use crate::object::{ObjectContent, SceneObject};
use crate::surface::CpuSurface;

/// Render the background and decorations, bottom to top
pub(crate) fn render_scene(
    width: u32,
    height: u32,
    clear: &str,
    background: Option<&BackgroundGroup>,
    objects: &[SceneObject],
) -> Result<CpuSurface, SurfaceError> {
    let mut pixmap = Pixmap::new(width, height).ok_or(SurfaceError::Allocation { width, height })?;

    let [r, g, b, a] = parse_hex_color(clear).unwrap_or([255, 255, 255, 255]);
    pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

    if let Some(background) = background {
        background.draw(&mut pixmap);
    }

    for object in objects {
        draw_object(&mut pixmap, object);
    }

    Ok(CpuSurface::from_pixmap(&pixmap))
}

fn draw_object(pixmap: &mut Pixmap, object: &SceneObject) {
    let transform = object.skia_transform();
    let opacity = object.placement().opacity;

    match object.content() {
        ObjectContent::Text(text) => {
            let Some(path) = &text.layout.path else {
                return;
            };
            let mut paint = Paint {
                anti_alias: true,
                ..Default::default()
            };
            if let Some(color) = paint_color(&text.fill, opacity) {
                paint.set_color(color);
                pixmap.fill_path(path, &paint, tiny_skia::FillRule::Winding, transform, None);
            }
            if text.stroke_width > 0.0 {
                if let Some(color) = paint_color(&text.stroke, opacity) {
                    paint.set_color(color);
                    let stroke = Stroke {
                        width: text.stroke_width,
                        ..Default::default()
                    };
                    pixmap.stroke_path(path, &paint, &stroke, transform, None);
                }
            }
        }
        ObjectContent::Image(image) => {
            let paint = PixmapPaint {
                opacity: opacity.clamp(0.0, 1.0),
                quality: FilterQuality::Bilinear,
                ..Default::default()
            };
            pixmap.draw_pixmap(0, 0, image.image.pixmap.as_ref(), &paint, transform, None);
        }
    }
}
