//! Validation of decoration property bags before they enter the scene

use tailor_ipc::Decoration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Decoration id is empty")]
    EmptyId,
    #[error("Non-finite placement value")]
    NonFinite,
    #[error("Image source is empty")]
    EmptySource,
}

/// Reject unusable property bags and clamp recoverable values
///
/// Opacity is clamped to [0, 1] and stroke width to >= 0.
pub fn sanitize_decoration(decoration: &Decoration) -> Result<Decoration, ValidationError> {
    if decoration.id().is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if !decoration.placement().is_finite() {
        return Err(ValidationError::NonFinite);
    }

    let mut clean = decoration.clone();
    match &mut clean {
        Decoration::Text { properties, .. } => {
            if !properties.stroke_width.is_finite() {
                return Err(ValidationError::NonFinite);
            }
            properties.stroke_width = properties.stroke_width.max(0.0);
        }
        Decoration::Image { properties, .. } => {
            if properties.src.trim().is_empty() {
                return Err(ValidationError::EmptySource);
            }
        }
    }
    let placement = clean.placement_mut();
    placement.opacity = placement.opacity.clamp(0.0, 1.0);
    Ok(clean)
}
