//! Base design parsing and drawing
//!
//! A base design is an SVG document flattened into drawable elements. A
//! `<path>` or `<rect>` with a solid color fill is colorable; its index among
//! the colorable elements (document order) is the region index. Other shapes
//! (`<circle>`, `<polygon>`, ...) are drawn but never recolored.

use std::collections::HashSet;

use tailor_ipc::ColorRegion;
use tiny_skia::{FillRule, Paint, Pixmap, Rect, Stroke, Transform};
use tracing::{debug, warn};
use usvg::roxmltree;

use crate::color::{format_hex_color, paint_color, parse_hex_color};
use crate::error::SurfaceError;

/// Solid fill of a design element
#[derive(Debug, Clone)]
pub struct ElementFill {
    /// Current fill as a hex color
    pub color: String,
    pub opacity: f32,
    pub rule: FillRule,
}

/// Solid stroke of a design element
#[derive(Debug, Clone)]
pub struct ElementStroke {
    pub color: String,
    pub opacity: f32,
    pub width: f32,
}

/// One drawable element of a base design, in document coordinates
#[derive(Debug, Clone)]
pub struct DesignElement {
    pub path: tiny_skia::Path,
    pub fill: Option<ElementFill>,
    pub stroke: Option<ElementStroke>,
    /// Source element was a `<path>` or `<rect>`
    recolorable_shape: bool,
}

impl DesignElement {
    fn from_usvg(node: &usvg::Path, recolorable: &HashSet<String>) -> Option<Self> {
        if !node.is_visible() {
            return None;
        }

        let fill = node.fill().and_then(|fill| match fill.paint() {
            usvg::Paint::Color(c) => Some(ElementFill {
                color: format_hex_color(c.red, c.green, c.blue),
                opacity: fill.opacity().get(),
                rule: match fill.rule() {
                    usvg::FillRule::NonZero => FillRule::Winding,
                    usvg::FillRule::EvenOdd => FillRule::EvenOdd,
                },
            }),
            _ => {
                debug!("Skipping non-solid fill on design element");
                None
            }
        });

        let stroke = node.stroke().and_then(|stroke| match stroke.paint() {
            usvg::Paint::Color(c) => Some(ElementStroke {
                color: format_hex_color(c.red, c.green, c.blue),
                opacity: stroke.opacity().get(),
                width: stroke.width().get(),
            }),
            _ => None,
        });

        if fill.is_none() && stroke.is_none() {
            return None;
        }

        let data: &tiny_skia::Path = node.data();
        let path = data.clone().transform(node.abs_transform())?;
        Some(Self {
            path,
            fill,
            stroke,
            recolorable_shape: recolorable.contains(node.id()),
        })
    }

    /// Colorable elements are paths or rects carrying a solid fill
    pub fn is_colorable(&self) -> bool {
        self.recolorable_shape && self.fill.is_some()
    }

    fn draw(&self, pixmap: &mut Pixmap, transform: Transform) {
        let mut paint = Paint {
            anti_alias: true,
            ..Default::default()
        };

        if let Some(fill) = &self.fill {
            if let Some(color) = paint_color(&fill.color, fill.opacity) {
                paint.set_color(color);
                pixmap.fill_path(&self.path, &paint, fill.rule, transform, None);
            }
        }

        if let Some(stroke) = &self.stroke {
            if let Some(color) = paint_color(&stroke.color, stroke.opacity) {
                paint.set_color(color);
                let style = Stroke {
                    width: stroke.width,
                    ..Default::default()
                };
                pixmap.stroke_path(&self.path, &paint, &style, transform, None);
            }
        }
    }
}

/// Non-interactive background built from a base design
#[derive(Debug, Clone)]
pub struct BackgroundGroup {
    /// Asset path the design was loaded from
    pub source: Option<String>,
    elements: Vec<DesignElement>,
    /// Indices into `elements` of the colorable elements
    colorable: Vec<usize>,
    /// Document to surface transform
    transform: Transform,
}

impl BackgroundGroup {
    /// Parse an SVG document and fit it into a surface of the given size
    pub fn parse(
        bytes: &[u8],
        surface_width: f32,
        surface_height: f32,
    ) -> Result<Self, SurfaceError> {
        let labeled = label_shapes(bytes)?;
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_str(&labeled.source, &options)?;

        let mut elements = Vec::new();
        collect_elements(tree.root(), &labeled.recolorable, &mut elements);
        if elements.is_empty() {
            return Err(SurfaceError::EmptyDesign);
        }

        let colorable = elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_colorable())
            .map(|(i, _)| i)
            .collect();

        let transform = fit_transform(&elements, surface_width, surface_height);

        Ok(Self {
            source: None,
            elements,
            colorable,
            transform,
        })
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn elements(&self) -> &[DesignElement] {
        &self.elements
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn colorable_count(&self) -> usize {
        self.colorable.len()
    }

    /// Current fills of the colorable elements in document order
    pub fn fills(&self) -> Vec<String> {
        self.colorable
            .iter()
            .filter_map(|&i| self.elements[i].fill.as_ref())
            .map(|fill| fill.color.clone())
            .collect()
    }

    /// Regions describing the colorable elements as loaded
    pub fn derive_regions(&self) -> Vec<ColorRegion> {
        self.fills()
            .into_iter()
            .enumerate()
            .map(|(index, fill)| ColorRegion::for_index(index, fill))
            .collect()
    }

    /// Set the fill of each colorable element whose region id appears in
    /// `regions`. Unparseable fills keep the previous color.
    pub fn apply_regions(&mut self, regions: &[ColorRegion]) -> usize {
        let mut applied = 0;
        for (index, &element_index) in self.colorable.iter().enumerate() {
            let id = format!("path-{index}");
            let Some(region) = regions.iter().find(|r| r.id == id) else {
                continue;
            };
            if parse_hex_color(&region.fill).is_none() {
                warn!("Ignoring invalid fill {} for {}", region.fill, id);
                continue;
            }
            if let Some(fill) = self.elements[element_index].fill.as_mut() {
                fill.color = region.fill.clone();
                applied += 1;
            }
        }
        applied
    }

    /// Fill of the colorable element at `index`
    pub fn fill(&self, index: usize) -> Option<&str> {
        let element = self.elements.get(*self.colorable.get(index)?)?;
        element.fill.as_ref().map(|f| f.color.as_str())
    }

    pub fn draw(&self, pixmap: &mut Pixmap) {
        for element in &self.elements {
            element.draw(pixmap, self.transform);
        }
    }
}

// ============================================================================
// Source tag labeling
// ============================================================================

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Elements usvg converts into paths
const SHAPE_TAGS: [&str; 7] = ["path", "rect", "circle", "ellipse", "line", "polyline", "polygon"];

const RECOLORABLE_TAGS: [&str; 2] = ["path", "rect"];

const SHAPE_ID_PREFIX: &str = "tailor-shape-";

/// Design source with every shape element carrying an id
struct LabeledDesign {
    source: String,
    /// Ids of `<path>` and `<rect>` elements
    recolorable: HashSet<String>,
}

/// Give unnamed shape elements an id so converted paths can be traced back
/// to their source tag
fn label_shapes(bytes: &[u8]) -> Result<LabeledDesign, SurfaceError> {
    let decompressed;
    let bytes = if bytes.starts_with(&[0x1f, 0x8b]) {
        decompressed = usvg::decompress_svgz(bytes)?;
        decompressed.as_slice()
    } else {
        bytes
    };
    let text = std::str::from_utf8(bytes).map_err(|_| usvg::Error::NotAnUtf8Str)?;

    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let document = roxmltree::Document::parse_with_options(text, options).map_err(usvg::Error::from)?;

    let mut recolorable = HashSet::new();
    let mut insertions = Vec::new();
    for node in document.descendants().filter(|n| n.is_element()) {
        let tag = node.tag_name();
        if tag.namespace() != Some(SVG_NAMESPACE) || !SHAPE_TAGS.contains(&tag.name()) {
            continue;
        }

        let id = match node.attribute("id") {
            Some(id) => id.to_string(),
            None => {
                let id = format!("{SHAPE_ID_PREFIX}{}", insertions.len());
                let start = node.range().start + 1;
                let name_len = text[start..]
                    .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
                    .unwrap_or(0);
                insertions.push((start + name_len, format!(" id=\"{id}\"")));
                id
            }
        };
        if !id.is_empty() && RECOLORABLE_TAGS.contains(&tag.name()) {
            recolorable.insert(id);
        }
    }

    let mut source = String::with_capacity(text.len() + insertions.len() * 24);
    let mut copied = 0;
    for (at, attribute) in &insertions {
        source.push_str(&text[copied..*at]);
        source.push_str(attribute);
        copied = *at;
    }
    source.push_str(&text[copied..]);

    Ok(LabeledDesign {
        source,
        recolorable,
    })
}

fn collect_elements(
    group: &usvg::Group,
    recolorable: &HashSet<String>,
    out: &mut Vec<DesignElement>,
) {
    for node in group.children() {
        match node {
            usvg::Node::Group(child) => collect_elements(child, recolorable, out),
            usvg::Node::Path(path) => {
                if let Some(element) = DesignElement::from_usvg(path, recolorable) {
                    out.push(element);
                }
            }
            usvg::Node::Text(text) => collect_elements(text.flattened(), recolorable, out),
            usvg::Node::Image(_) => debug!("Skipping embedded raster in design document"),
        }
    }
}

/// Uniformly scale the union of element bounds to fit the surface, centered
fn fit_transform(elements: &[DesignElement], width: f32, height: f32) -> Transform {
    let mut left = f32::MAX;
    let mut top = f32::MAX;
    let mut right = f32::MIN;
    let mut bottom = f32::MIN;
    for element in elements {
        let b = element.path.bounds();
        left = left.min(b.left());
        top = top.min(b.top());
        right = right.max(b.right());
        bottom = bottom.max(b.bottom());
    }

    let Some(bounds) = Rect::from_ltrb(left, top, right, bottom) else {
        return Transform::identity();
    };

    let scale = (width / bounds.width()).min(height / bounds.height());
    let tx = (width - bounds.width() * scale) / 2.0 - bounds.left() * scale;
    let ty = (height - bounds.height() * scale) / 2.0 - bounds.top() * scale;
    Transform::from_row(scale, 0.0, 0.0, scale, tx, ty)
}
