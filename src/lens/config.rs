use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{LensError, LensResult};

/// Outline of the lens.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum LensShape {
    /// Circle of the lens radius.
    Circle,
    /// Rounded rectangle `2*radius*stretch_x` by `2*radius*stretch_y`.
    ///
    /// Corner radius is `min(corner_cap, min(w, h) * corner_ratio)`.
    Rounded {
        /// Horizontal stretch relative to the radius.
        stretch_x: f64,
        /// Vertical stretch relative to the radius.
        stretch_y: f64,
        /// Corner radius as a fraction of the short side, in `[0, 0.5]`.
        corner_ratio: f64,
        /// Upper bound on the corner radius in pixels.
        corner_cap: f64,
    },
}

/// How the lens content is produced.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum LensVariant {
    /// Plain magnification of the cover-placed image.
    Magnify,
    /// Displacement-mapped glass warp (`feDisplacementMap` semantics).
    Displacement {
        /// Displacement scale in pixels; a channel at 1.0 shifts by `scale / 2`.
        scale: f64,
        /// Where the refraction starts, as a fraction of the radius in `[0, 1)`.
        rim: f64,
        /// Constant channel bias toward a direction, in channel units.
        #[serde(default)]
        bias_x: f64,
        /// Constant channel bias toward a direction, in channel units.
        #[serde(default)]
        bias_y: f64,
        /// How strongly the pointer's viewport position tilts the warp. 0 disables it.
        #[serde(default)]
        tilt: f64,
    },
}

/// Named presentation presets from the historical lens use sites.
///
/// None of these is canonical; they only differ in constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LensPreset {
    /// Full-screen magnifying glass.
    Glass,
    /// Smaller capture circle.
    Capture,
    /// Rounded displacement-mapped glass card.
    Project,
    /// Small rounded liquid-glass pill.
    Analyze,
}

impl LensPreset {
    /// All presets, in declaration order.
    pub const ALL: [LensPreset; 4] = [
        LensPreset::Glass,
        LensPreset::Capture,
        LensPreset::Project,
        LensPreset::Analyze,
    ];

    /// Lowercase preset name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Glass => "glass",
            Self::Capture => "capture",
            Self::Project => "project",
            Self::Analyze => "analyze",
        }
    }

    /// Look a preset up by name.
    pub fn from_name(name: &str) -> LensResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| LensError::validation(format!("unknown lens preset '{name}'")))
    }
}

/// Full lens configuration. Every field has a default; JSON input may omit any of them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LensConfig {
    /// Lens radius in pixels.
    pub radius: f64,
    /// Zoom factor, `>= 1`.
    pub magnification: f64,
    /// Lens outline.
    pub shape: LensShape,
    /// Width of the inner edge feather in pixels.
    pub feather_width: f64,
    /// Straight RGBA highlight reached at the lens edge.
    pub highlight: [u8; 4],
    /// Stroke line width in pixels.
    pub stroke_width: f64,
    /// Distance past the edge where the stroke gradient reaches transparent.
    pub stroke_feather: f64,
    /// Straight RGBA stroke color at full strength.
    pub stroke_color: [u8; 4],
    /// Content variant.
    pub variant: LensVariant,
    /// Pointer follower factor per tick, in `(0, 1]`; 1 tracks the pointer exactly.
    pub follow: f64,
    /// Distance under which the follower snaps onto the pointer.
    pub snap_distance: f64,
    /// Frames spent growing the lens on show and shrinking it on hide. 0 is instant.
    pub show_frames: u32,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            radius: 185.0,
            magnification: 2.0,
            shape: LensShape::Circle,
            feather_width: 28.0,
            highlight: [255, 255, 255, 72],
            stroke_width: 2.0,
            stroke_feather: 10.0,
            stroke_color: [255, 255, 255, 255],
            variant: LensVariant::Magnify,
            follow: 0.35,
            snap_distance: 0.5,
            show_frames: 12,
        }
    }
}

impl LensConfig {
    /// Constants for a named use site.
    pub fn preset(preset: LensPreset) -> Self {
        match preset {
            LensPreset::Glass => Self::default(),
            LensPreset::Capture => Self {
                radius: 120.0,
                magnification: 1.6,
                feather_width: 20.0,
                highlight: [255, 255, 255, 56],
                stroke_feather: 8.0,
                follow: 0.5,
                ..Self::default()
            },
            LensPreset::Project => Self {
                radius: 150.0,
                magnification: 1.0,
                shape: LensShape::Rounded {
                    stretch_x: 1.4,
                    stretch_y: 1.0,
                    corner_ratio: 0.5,
                    corner_cap: 80.0,
                },
                feather_width: 24.0,
                highlight: [230, 240, 255, 64],
                stroke_width: 1.5,
                stroke_feather: 6.0,
                stroke_color: [255, 255, 255, 200],
                variant: LensVariant::Displacement {
                    scale: 40.0,
                    rim: 0.55,
                    bias_x: 0.0,
                    bias_y: 0.0,
                    tilt: 0.0,
                },
                follow: 0.25,
                ..Self::default()
            },
            LensPreset::Analyze => Self {
                radius: 100.0,
                magnification: 1.2,
                shape: LensShape::Rounded {
                    stretch_x: 1.5,
                    stretch_y: 1.0,
                    corner_ratio: 0.35,
                    corner_cap: 40.0,
                },
                feather_width: 16.0,
                highlight: [255, 255, 255, 48],
                stroke_width: 1.0,
                stroke_feather: 4.0,
                stroke_color: [255, 255, 255, 160],
                variant: LensVariant::Displacement {
                    scale: 24.0,
                    rim: 0.4,
                    bias_x: 0.08,
                    bias_y: 0.0,
                    tilt: 0.15,
                },
                show_frames: 8,
                ..Self::default()
            },
        }
    }

    /// Parse a configuration from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> LensResult<Self> {
        let cfg: LensConfig = serde_json::from_reader(r)
            .map_err(|e| LensError::validation(format!("parse lens config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> LensResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LensError::validation(format!("open lens config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check ranges of every numeric field.
    pub fn validate(&self) -> LensResult<()> {
        fn positive(name: &str, v: f64) -> LensResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(LensError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
            Ok(())
        }
        fn non_negative(name: &str, v: f64) -> LensResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(LensError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
            Ok(())
        }

        positive("radius", self.radius)?;
        if !self.magnification.is_finite() || self.magnification < 1.0 {
            return Err(LensError::validation(format!(
                "magnification must be finite and >= 1, got {}",
                self.magnification
            )));
        }
        non_negative("feather_width", self.feather_width)?;
        non_negative("stroke_width", self.stroke_width)?;
        non_negative("stroke_feather", self.stroke_feather)?;
        non_negative("snap_distance", self.snap_distance)?;
        if !self.follow.is_finite() || self.follow <= 0.0 || self.follow > 1.0 {
            return Err(LensError::validation(format!(
                "follow must be in (0, 1], got {}",
                self.follow
            )));
        }

        if let LensShape::Rounded {
            stretch_x,
            stretch_y,
            corner_ratio,
            corner_cap,
        } = self.shape
        {
            positive("stretch_x", stretch_x)?;
            positive("stretch_y", stretch_y)?;
            non_negative("corner_cap", corner_cap)?;
            if !(0.0..=0.5).contains(&corner_ratio) {
                return Err(LensError::validation(format!(
                    "corner_ratio must be in [0, 0.5], got {corner_ratio}"
                )));
            }
        }

        if let LensVariant::Displacement {
            scale,
            rim,
            bias_x,
            bias_y,
            tilt,
        } = self.variant
        {
            non_negative("displacement scale", scale)?;
            if !rim.is_finite() || !(0.0..1.0).contains(&rim) {
                return Err(LensError::validation(format!(
                    "rim must be in [0, 1), got {rim}"
                )));
            }
            for (name, v) in [("bias_x", bias_x), ("bias_y", bias_y), ("tilt", tilt)] {
                if !v.is_finite() || v.abs() > 0.5 {
                    return Err(LensError::validation(format!(
                        "{name} must be in [-0.5, 0.5], got {v}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lens/config.rs"]
mod tests;
