use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    #[strum(serialize = "rotation", serialize = "r")]
    Rotation,
    #[strum(serialize = "scaling", serialize = "s")]
    Scaling,
    #[strum(serialize = "idle", serialize = "i")]
    Idle,
}

impl Feature {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rotation => "Rotation",
            Self::Scaling => "Cursor Scaling",
            Self::Idle => "Idle Timer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggle {
    pub rotation: bool,
    pub scaling: bool,
    pub idle: bool,
}

impl Default for FeatureToggle {
    fn default() -> Self {
        Self {
            rotation: true,
            scaling: true,
            idle: true,
        }
    }
}

impl FeatureToggle {
    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::Rotation => self.rotation,
            Feature::Scaling => self.scaling,
            Feature::Idle => self.idle,
        }
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        match feature {
            Feature::Rotation => self.rotation = enabled,
            Feature::Scaling => self.scaling = enabled,
            Feature::Idle => self.idle = enabled,
        }
    }

    /// Flips one flag and returns its new value.
    pub fn toggle(&mut self, feature: Feature) -> bool {
        let enabled = !self.get(feature);
        self.set(feature, enabled);
        enabled
    }
}
