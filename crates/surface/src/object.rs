//! Decoration objects on the editing surface and their geometry

use glam::{Affine2, Vec2};
use tailor_ipc::{Decoration, ImageProperties, Placement, TextProperties};

use crate::constants::{CONTROL_SIZE, DEFAULT_FONT_SIZE, HIT_PADDING, ROTATION_HANDLE_OFFSET};
use crate::image_source::DecodedImage;
use crate::text::{FontBook, TextLayout};

/// Engine-local key of a scene object, stable for the object's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub(crate) u64);

/// Whether an object has been given its decoration id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectIdentity {
    /// Inserted by the engine, awaiting an id
    Pending,
    /// Mirrors the store entry with this id
    Committed(String),
}

impl ObjectIdentity {
    pub fn id(&self) -> Option<&str> {
        match self {
            ObjectIdentity::Pending => None,
            ObjectIdentity::Committed(id) => Some(id),
        }
    }
}

/// Text decoration content
#[derive(Debug, Clone)]
pub struct TextContent {
    pub text: String,
    pub font_family: String,
    pub fill: String,
    pub stroke_width: f32,
    pub stroke: String,
    pub layout: TextLayout,
}

impl TextContent {
    pub fn new(properties: &TextProperties, fonts: &FontBook) -> Self {
        Self {
            text: properties.text.clone(),
            font_family: properties.font_family.clone(),
            fill: properties.fill.clone(),
            stroke_width: properties.stroke_width.max(0.0),
            stroke: properties.stroke.clone(),
            layout: fonts.layout(&properties.text, &properties.font_family, DEFAULT_FONT_SIZE),
        }
    }

    pub fn relayout(&mut self, fonts: &FontBook) {
        self.layout = fonts.layout(&self.text, &self.font_family, DEFAULT_FONT_SIZE);
    }
}

/// Image decoration content
#[derive(Debug, Clone)]
pub struct ImageContent {
    pub src: String,
    pub image: DecodedImage,
}

#[derive(Debug, Clone)]
pub enum ObjectContent {
    Text(TextContent),
    Image(ImageContent),
}

/// Handle position on a selected object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Rotate,
}

impl Control {
    pub fn is_corner(self) -> bool {
        !matches!(self, Control::Rotate)
    }
}

/// A decoration in the scene
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub(crate) handle: ObjectHandle,
    pub(crate) identity: ObjectIdentity,
    pub(crate) placement: Placement,
    pub(crate) content: ObjectContent,
    /// Modified since the store last saw it
    pub(crate) unsynced: bool,
}

impl SceneObject {
    pub(crate) fn new(
        handle: ObjectHandle,
        identity: ObjectIdentity,
        placement: Placement,
        content: ObjectContent,
    ) -> Self {
        Self {
            handle,
            identity,
            placement,
            content,
            unsynced: false,
        }
    }

    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    pub fn identity(&self) -> &ObjectIdentity {
        &self.identity
    }

    pub fn id(&self) -> Option<&str> {
        self.identity.id()
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn content(&self) -> &ObjectContent {
        &self.content
    }

    /// Unscaled size in surface pixels
    pub fn intrinsic_size(&self) -> Vec2 {
        match &self.content {
            ObjectContent::Text(text) => Vec2::new(text.layout.width.max(1.0), text.layout.height),
            ObjectContent::Image(image) => {
                Vec2::new(image.image.width() as f32, image.image.height() as f32)
            }
        }
    }

    fn scaled_size(&self) -> Vec2 {
        self.intrinsic_size() * Vec2::new(self.placement.scale_x, self.placement.scale_y)
    }

    fn origin(&self) -> Vec2 {
        Vec2::new(self.placement.left, self.placement.top)
    }

    fn rotation(&self) -> Vec2 {
        Vec2::from_angle(self.placement.angle.to_radians())
    }

    /// Object-local to surface transform
    pub fn affine(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(
            Vec2::new(self.placement.scale_x, self.placement.scale_y),
            self.placement.angle.to_radians(),
            self.origin(),
        )
    }

    pub fn skia_transform(&self) -> tiny_skia::Transform {
        let m = self.affine();
        tiny_skia::Transform::from_row(
            m.matrix2.x_axis.x,
            m.matrix2.x_axis.y,
            m.matrix2.y_axis.x,
            m.matrix2.y_axis.y,
            m.translation.x,
            m.translation.y,
        )
    }

    /// Center of the transformed box in surface pixels
    pub fn center(&self) -> Vec2 {
        self.origin() + self.rotation().rotate(self.scaled_size() * 0.5)
    }

    /// Placement that puts the box center at `center` with the given scale and angle
    pub(crate) fn placement_around(&self, center: Vec2, scale: f32, angle: f32) -> Placement {
        let half = self.intrinsic_size() * scale * 0.5;
        let origin = center - Vec2::from_angle(angle.to_radians()).rotate(half);
        Placement {
            left: origin.x,
            top: origin.y,
            scale_x: scale,
            scale_y: scale,
            angle,
            opacity: self.placement.opacity,
        }
    }

    /// Surface point expressed in the rotated, scaled box frame
    fn to_box_space(&self, p: Vec2) -> Vec2 {
        let inverse = Vec2::from_angle(-self.placement.angle.to_radians());
        inverse.rotate(p - self.origin())
    }

    /// Extent of the scaled box, normalized for negative scales
    fn box_extent(&self) -> (Vec2, Vec2) {
        let size = self.scaled_size();
        (size.min(Vec2::ZERO), size.max(Vec2::ZERO))
    }

    /// Whether `p` lies inside the box enlarged by the hit padding
    pub fn contains(&self, p: Vec2) -> bool {
        let q = self.to_box_space(p);
        let (min, max) = self.box_extent();
        q.x >= min.x - HIT_PADDING
            && q.x <= max.x + HIT_PADDING
            && q.y >= min.y - HIT_PADDING
            && q.y <= max.y + HIT_PADDING
    }

    /// Control handle under `p`, if any
    pub fn control_at(&self, p: Vec2) -> Option<Control> {
        let q = self.to_box_space(p);
        let (min, max) = self.box_extent();
        let (l, t) = (min.x - HIT_PADDING, min.y - HIT_PADDING);
        let (r, b) = (max.x + HIT_PADDING, max.y + HIT_PADDING);

        let candidates = [
            (Control::Rotate, Vec2::new((l + r) * 0.5, t - ROTATION_HANDLE_OFFSET)),
            (Control::TopLeft, Vec2::new(l, t)),
            (Control::TopRight, Vec2::new(r, t)),
            (Control::BottomLeft, Vec2::new(l, b)),
            (Control::BottomRight, Vec2::new(r, b)),
        ];

        candidates
            .into_iter()
            .find(|(_, at)| (q - *at).abs().max_element() <= CONTROL_SIZE)
            .map(|(control, _)| control)
    }

    /// Full decoration for a committed object
    pub fn to_decoration(&self) -> Option<Decoration> {
        let id = self.identity.id()?.to_string();
        Some(self.describe(id))
    }

    /// Current properties under the given id
    pub(crate) fn describe(&self, id: String) -> Decoration {
        let placement = self.placement;
        match &self.content {
            ObjectContent::Text(text) => Decoration::Text {
                id,
                properties: TextProperties {
                    text: text.text.clone(),
                    font_family: text.font_family.clone(),
                    fill: text.fill.clone(),
                    stroke_width: text.stroke_width,
                    stroke: text.stroke.clone(),
                    placement,
                },
            },
            ObjectContent::Image(image) => Decoration::Image {
                id,
                properties: ImageProperties {
                    src: image.src.clone(),
                    placement,
                },
            },
        }
    }
}
