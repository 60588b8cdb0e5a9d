use serde::{Deserialize, Serialize};

use super::decoration::{Decoration, ImageProperties, TextProperties};
use crate::error::IpcError;

/// Current scene document format version
pub const SCENE_DOCUMENT_VERSION: u32 = 1;

/// Marker data attached to every record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordData {
    #[serde(rename = "isBackground")]
    pub is_background: bool,
}

/// One object of a serialized editing surface, in z-order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneRecord {
    /// The non-interactive base design
    Group {
        data: RecordData,
        /// Asset path of the design document
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        /// Fills of the colorable elements in document order
        fills: Vec<String>,
    },
    Text {
        id: String,
        data: RecordData,
        properties: TextProperties,
    },
    Image {
        id: String,
        data: RecordData,
        properties: ImageProperties,
    },
}

impl SceneRecord {
    pub fn background(source: Option<String>, fills: Vec<String>) -> Self {
        SceneRecord::Group {
            data: RecordData { is_background: true },
            source,
            fills,
        }
    }

    pub fn from_decoration(decoration: &Decoration) -> Self {
        let data = RecordData::default();
        match decoration {
            Decoration::Text { id, properties } => SceneRecord::Text {
                id: id.clone(),
                data,
                properties: properties.clone(),
            },
            Decoration::Image { id, properties } => SceneRecord::Image {
                id: id.clone(),
                data,
                properties: properties.clone(),
            },
        }
    }

    /// Decoration carried by this record, `None` for the background
    pub fn to_decoration(&self) -> Option<Decoration> {
        match self {
            SceneRecord::Group { .. } => None,
            SceneRecord::Text { id, properties, .. } => Some(Decoration::Text {
                id: id.clone(),
                properties: properties.clone(),
            }),
            SceneRecord::Image { id, properties, .. } => Some(Decoration::Image {
                id: id.clone(),
                properties: properties.clone(),
            }),
        }
    }

    pub fn is_background(&self) -> bool {
        match self {
            SceneRecord::Group { data, .. }
            | SceneRecord::Text { data, .. }
            | SceneRecord::Image { data, .. } => data.is_background,
        }
    }
}

/// Serialized editing surface, sufficient to replay every decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub version: u32,
    pub width: u32,
    pub height: u32,
    pub objects: Vec<SceneRecord>,
}

impl SceneDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            version: SCENE_DOCUMENT_VERSION,
            width,
            height,
            objects: Vec::new(),
        }
    }

    /// Decorations in z-order
    pub fn decorations(&self) -> impl Iterator<Item = Decoration> + '_ {
        self.objects.iter().filter_map(SceneRecord::to_decoration)
    }

    pub fn to_json(&self) -> Result<String, IpcError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, IpcError> {
        let document: Self = serde_json::from_str(json)?;
        if document.version != SCENE_DOCUMENT_VERSION {
            return Err(IpcError::UnsupportedVersion {
                found: document.version,
                expected: SCENE_DOCUMENT_VERSION,
            });
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Placement;

    #[test]
    fn test_document_json_round_trip() {
        let mut document = SceneDocument::new(500, 500);
        document
            .objects
            .push(SceneRecord::background(Some("/designs/a.svg".into()), vec!["#ff0000".into()]));
        document.objects.push(SceneRecord::from_decoration(&Decoration::Image {
            id: "img-1".into(),
            properties: ImageProperties {
                src: "data:image/png;base64,AA==".into(),
                placement: Placement::at(10.0, 20.0).with_scale(0.25),
            },
        }));

        let json = document.to_json().unwrap();
        let parsed = SceneDocument::from_json(&json).unwrap();
        assert_eq!(parsed, document);
        assert_eq!(parsed.decorations().count(), 1);
        assert!(parsed.objects[0].is_background());
    }

    #[test]
    fn test_background_marker_on_wire() {
        let record = SceneRecord::background(None, Vec::new());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "group");
        assert_eq!(json["data"]["isBackground"], true);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let json = r#"{"version":99,"width":1,"height":1,"objects":[]}"#;
        assert!(matches!(
            SceneDocument::from_json(json),
            Err(IpcError::UnsupportedVersion { found: 99, .. })
        ));
    }
}
