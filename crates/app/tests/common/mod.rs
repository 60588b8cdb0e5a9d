#![allow(dead_code)]

use std::rc::Rc;

use glam::Vec2;
use image::{ImageFormat, Rgba, RgbaImage};
use tailor::Customizer;
use tailor::config::{CaptureConfig, CustomizerConfig, ViewportConfig};
use tailor::ipc::{BaseDesign, Catalog, Model, ProductType, StoreAction};
use tailor::surface::{FontBook, MemoryAssets};
use tailor::viewport::{MeshData, ModelPlacement};
use tokio::sync::mpsc::UnboundedReceiver;

pub const BANDS: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100">
    <rect x="0" y="0" width="100" height="30" fill="#ff0000"/>
    <rect x="0" y="35" width="100" height="30" fill="#00ff00"/>
    <path d="M0 70 L100 70 L100 100 L0 100 Z" fill="#0000ff"/>
</svg>"##;

pub const HALVES: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100">
    <rect x="0" y="0" width="100" height="50" fill="#222222"/>
    <rect x="0" y="50" width="100" height="50" fill="#dddddd"/>
</svg>"##;

/// Square view in pixels
pub const VIEW: f32 = 600.0;

pub fn catalog() -> Catalog {
    Catalog::new(
        vec![
            Model {
                id: "jersey".into(),
                name: "Jersey".into(),
                path: "/models/jersey.glb".into(),
                product_type: ProductType::Jersey,
                default_design_id: Some("bands".into()),
                is_default: true,
            },
            Model {
                id: "sock".into(),
                name: "Sock".into(),
                path: "/models/sock.glb".into(),
                product_type: ProductType::Sock,
                default_design_id: Some("sock-halves".into()),
                is_default: true,
            },
        ],
        vec![
            BaseDesign {
                id: "bands".into(),
                name: "Bands".into(),
                path: "/designs/bands.svg".into(),
                product_type: ProductType::Jersey,
                model_id: "jersey".into(),
                price: 59.0,
                is_default: true,
            },
            BaseDesign {
                id: "halves".into(),
                name: "Halves".into(),
                path: "/designs/halves.svg".into(),
                product_type: ProductType::Jersey,
                model_id: "jersey".into(),
                price: 49.0,
                is_default: false,
            },
            BaseDesign {
                id: "sock-halves".into(),
                name: "Sock Halves".into(),
                path: "/designs/halves.svg".into(),
                product_type: ProductType::Sock,
                model_id: "sock".into(),
                price: 15.0,
                is_default: true,
            },
        ],
    )
}

pub fn config() -> CustomizerConfig {
    CustomizerConfig {
        viewport: ViewportConfig {
            width: VIEW as u32,
            height: VIEW as u32,
            ..Default::default()
        },
        capture: CaptureConfig {
            width: 64,
            height: 64,
            settle_ms: 0,
        },
        ..Default::default()
    }
}

pub fn customizer() -> Customizer {
    let assets = MemoryAssets::new()
        .with("/designs/bands.svg", BANDS.as_bytes().to_vec())
        .with("/designs/halves.svg", HALVES.as_bytes().to_vec());
    Customizer::new(config(), catalog(), Rc::new(assets))
}

/// Customizer showing a 4x4 quad facing the default camera
pub fn customizer_with_quad() -> Customizer {
    let mut customizer = customizer();
    customizer
        .viewport_mut()
        .set_mesh_with_placement(MeshData::plane(4.0, 4.0), ModelPlacement::IDENTITY);
    customizer
}

/// Client position of a surface pixel on the quad
pub fn client_for(surface_pixel: Vec2, surface_size: Vec2) -> Vec2 {
    let config = ViewportConfig::default();
    let half_height = config.default_distance * (config.fov_degrees.to_radians() * 0.5).tan();
    let pixels_per_unit = (VIEW * 0.5) / half_height;
    let uv = surface_pixel / surface_size;
    Vec2::splat(VIEW * 0.5) + (uv - 0.5) * 4.0 * pixels_per_unit
}

/// Surface pixels travelled per client pixel on the quad
pub fn surface_per_client(surface_size: Vec2) -> f32 {
    let a = client_for(Vec2::ZERO, surface_size);
    let b = client_for(surface_size, surface_size);
    surface_size.x / (b.x - a.x)
}

pub fn action_names(rx: &mut UnboundedReceiver<StoreAction>) -> Vec<&'static str> {
    let mut names = Vec::new();
    while let Ok(action) = rx.try_recv() {
        names.push(action.name());
    }
    names
}

/// PNG file bytes of a solid image
pub fn png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut bytes = std::io::Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

/// Whether any installed font can draw glyphs on this machine
pub fn has_installed_fonts() -> bool {
    FontBook::new()
        .with_system_fonts()
        .layout("E", "sans-serif", 24.0)
        .path
        .is_some()
}

/// Number of texture pixels that differ between two snapshots
pub fn changed_pixels(before: &[[u8; 4]], after: &[[u8; 4]]) -> usize {
    before.iter().zip(after).filter(|(a, b)| a != b).count()
}
