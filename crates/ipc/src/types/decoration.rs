use serde::{Deserialize, Serialize};

fn default_scale() -> f32 {
    1.0
}

fn default_opacity() -> f32 {
    1.0
}

/// One fill-colorable region of a base design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRegion {
    /// Stable id of the form `path-N`
    pub id: String,
    /// Human label of the form `Path N+1`
    pub name: String,
    /// Current fill as a hex color
    pub fill: String,
}

impl ColorRegion {
    /// Region for the colorable element at `index` in document order
    pub fn for_index(index: usize, fill: impl Into<String>) -> Self {
        Self {
            id: format!("path-{index}"),
            name: format!("Path {}", index + 1),
            fill: fill.into(),
        }
    }
}

/// Placement of a decoration on the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Surface x of the object origin in pixels
    pub left: f32,
    /// Surface y of the object origin in pixels
    pub top: f32,
    #[serde(default = "default_scale")]
    pub scale_x: f32,
    #[serde(default = "default_scale")]
    pub scale_y: f32,
    /// Rotation in degrees
    #[serde(default)]
    pub angle: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            opacity: 1.0,
        }
    }
}

impl Placement {
    pub fn at(left: f32, top: f32) -> Self {
        Self {
            left,
            top,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale_x = scale;
        self.scale_y = scale;
        self
    }

    pub fn is_finite(&self) -> bool {
        [self.left, self.top, self.scale_x, self.scale_y, self.angle, self.opacity]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Property bag of a text decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProperties {
    pub text: String,
    pub font_family: String,
    pub fill: String,
    #[serde(default)]
    pub stroke_width: f32,
    pub stroke: String,
    #[serde(flatten)]
    pub placement: Placement,
}

/// Property bag of an image decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProperties {
    /// Data URI, file path, or URL
    pub src: String,
    #[serde(flatten)]
    pub placement: Placement,
}

/// Kind of a decoration without its properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecorationKind {
    Text,
    Image,
}

/// A user-added decoration as stored and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Decoration {
    Text { id: String, properties: TextProperties },
    Image { id: String, properties: ImageProperties },
}

impl Decoration {
    pub fn id(&self) -> &str {
        match self {
            Decoration::Text { id, .. } | Decoration::Image { id, .. } => id,
        }
    }

    pub fn kind(&self) -> DecorationKind {
        match self {
            Decoration::Text { .. } => DecorationKind::Text,
            Decoration::Image { .. } => DecorationKind::Image,
        }
    }

    pub fn placement(&self) -> &Placement {
        match self {
            Decoration::Text { properties, .. } => &properties.placement,
            Decoration::Image { properties, .. } => &properties.placement,
        }
    }

    pub fn placement_mut(&mut self) -> &mut Placement {
        match self {
            Decoration::Text { properties, .. } => &mut properties.placement,
            Decoration::Image { properties, .. } => &mut properties.placement,
        }
    }

    /// Short label for decoration lists
    pub fn label(&self) -> String {
        match self {
            Decoration::Text { properties, .. } => properties.text.clone(),
            Decoration::Image { .. } => "Image".to_string(),
        }
    }

    /// Apply a partial update; fields that do not belong to this kind are ignored
    pub fn apply_patch(&mut self, patch: &DecorationPatch) {
        patch.apply_placement(self.placement_mut());
        match self {
            Decoration::Text { properties, .. } => {
                if let Some(text) = &patch.text {
                    properties.text = text.clone();
                }
                if let Some(font_family) = &patch.font_family {
                    properties.font_family = font_family.clone();
                }
                if let Some(fill) = &patch.fill {
                    properties.fill = fill.clone();
                }
                if let Some(stroke_width) = patch.stroke_width {
                    properties.stroke_width = stroke_width;
                }
                if let Some(stroke) = &patch.stroke {
                    properties.stroke = stroke.clone();
                }
            }
            Decoration::Image { properties, .. } => {
                if let Some(src) = &patch.src {
                    properties.src = src.clone();
                }
            }
        }
    }
}

/// Partial decoration update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl DecorationPatch {
    /// Patch carrying every property of `decoration`
    pub fn snapshot(decoration: &Decoration) -> Self {
        let placement = decoration.placement();
        let mut patch = Self {
            left: Some(placement.left),
            top: Some(placement.top),
            scale_x: Some(placement.scale_x),
            scale_y: Some(placement.scale_y),
            angle: Some(placement.angle),
            opacity: Some(placement.opacity),
            ..Default::default()
        };
        match decoration {
            Decoration::Text { properties, .. } => {
                patch.text = Some(properties.text.clone());
                patch.font_family = Some(properties.font_family.clone());
                patch.fill = Some(properties.fill.clone());
                patch.stroke_width = Some(properties.stroke_width);
                patch.stroke = Some(properties.stroke.clone());
            }
            Decoration::Image { properties, .. } => {
                patch.src = Some(properties.src.clone());
            }
        }
        patch
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether any geometric field is set
    pub fn touches_placement(&self) -> bool {
        self.left.is_some()
            || self.top.is_some()
            || self.scale_x.is_some()
            || self.scale_y.is_some()
            || self.angle.is_some()
            || self.opacity.is_some()
    }

    pub fn apply_placement(&self, placement: &mut Placement) {
        if let Some(left) = self.left {
            placement.left = left;
        }
        if let Some(top) = self.top {
            placement.top = top;
        }
        if let Some(scale_x) = self.scale_x {
            placement.scale_x = scale_x;
        }
        if let Some(scale_y) = self.scale_y {
            placement.scale_y = scale_y;
        }
        if let Some(angle) = self.angle {
            placement.angle = angle;
        }
        if let Some(opacity) = self.opacity {
            placement.opacity = opacity;
        }
    }
}
