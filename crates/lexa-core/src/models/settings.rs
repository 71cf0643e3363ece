use serde::{Deserialize, Serialize};

const DEFAULT_TEXT_SIZE: f32 = 1.0;

/// Display settings, persisted locally only.
///
/// Field names serialize camelCase to stay compatible with the persisted
/// storage document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub dyslexia_font: bool,
    pub high_contrast: bool,
    pub reduce_motion: bool,
    /// Text scale factor, 1.0 = page default.
    pub text_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dyslexia_font: false,
            high_contrast: false,
            reduce_motion: false,
            text_size: DEFAULT_TEXT_SIZE,
        }
    }
}

impl Settings {
    /// Merge an update into the current settings.
    ///
    /// Fields absent from the update keep their current value; updates never
    /// replace the whole document.
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(dyslexia_font) = update.dyslexia_font {
            self.dyslexia_font = dyslexia_font;
        }
        if let Some(high_contrast) = update.high_contrast {
            self.high_contrast = high_contrast;
        }
        if let Some(reduce_motion) = update.reduce_motion {
            self.reduce_motion = reduce_motion;
        }
        if let Some(text_size) = update.text_size {
            self.text_size = text_size;
        }
    }
}

/// Partial settings change coming from a UI surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub dyslexia_font: Option<bool>,
    pub high_contrast: Option<bool>,
    pub reduce_motion: Option<bool>,
    pub text_size: Option<f32>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.dyslexia_font.is_none()
            && self.high_contrast.is_none()
            && self.reduce_motion.is_none()
            && self.text_size.is_none()
    }
}
