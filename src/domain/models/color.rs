use serde::{Deserialize, Serialize};
use std::fmt;

/// Color tokens the light can be set to.
///
/// Tokens are written in upper case in configuration files (`"RED"`,
/// `"GREEN"`, ...). Anything outside this set is rejected when the
/// configuration is deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LightColor {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// White
    White,
    /// Yellow
    Yellow,
    /// Orange
    Orange,
    /// Purple
    Purple,
    /// Pink
    Pink,
    /// Cyan
    Cyan,
}

impl LightColor {
    /// Every supported color, in listing order.
    pub const ALL: [Self; 9] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::White,
        Self::Yellow,
        Self::Orange,
        Self::Purple,
        Self::Pink,
        Self::Cyan,
    ];

    /// Upper-case token used in configuration and listings
    pub const fn token(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Green => "GREEN",
            Self::Blue => "BLUE",
            Self::White => "WHITE",
            Self::Yellow => "YELLOW",
            Self::Orange => "ORANGE",
            Self::Purple => "PURPLE",
            Self::Pink => "PINK",
            Self::Cyan => "CYAN",
        }
    }

    /// CIE 1931 chromaticity coordinates sent to the bridge
    pub const fn xy(self) -> [f32; 2] {
        match self {
            Self::Red => [0.675, 0.322],
            Self::Green => [0.409, 0.518],
            Self::Blue => [0.167, 0.040],
            Self::White => [0.3227, 0.329],
            Self::Yellow => [0.4432, 0.5154],
            Self::Orange => [0.5614, 0.4156],
            Self::Purple => [0.2725, 0.1096],
            Self::Pink => [0.3944, 0.3093],
            Self::Cyan => [0.17, 0.3403],
        }
    }
}

impl fmt::Display for LightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The five statuses that carry a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorKey {
    /// Builder is building
    Building,
    /// Last build passed
    Success,
    /// Last build failed in a compile step
    CompileFailed,
    /// Last build failed in a test step
    TestFailed,
    /// Last build failed for an unrecognized reason
    UnknownFailed,
}

/// Color assignment for each [`ColorKey`].
///
/// Field names follow the configuration file layout; `build_failed` is the
/// compile-failure color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ColorTable {
    /// Color while a build is running
    #[serde(default = "default_building")]
    pub building: LightColor,

    /// Color after a successful build
    #[serde(default = "default_success")]
    pub success: LightColor,

    /// Color after a compile failure
    #[serde(default = "default_build_failed", alias = "compile_failed")]
    pub build_failed: LightColor,

    /// Color after a test failure
    #[serde(default = "default_test_failed")]
    pub test_failed: LightColor,

    /// Color after a failure with no recognized cause
    #[serde(default = "default_unknown_failed")]
    pub unknown_failed: LightColor,
}

const fn default_building() -> LightColor {
    LightColor::Red
}

const fn default_success() -> LightColor {
    LightColor::Green
}

const fn default_build_failed() -> LightColor {
    LightColor::Blue
}

const fn default_test_failed() -> LightColor {
    LightColor::White
}

const fn default_unknown_failed() -> LightColor {
    LightColor::Yellow
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            building: default_building(),
            success: default_success(),
            build_failed: default_build_failed(),
            test_failed: default_test_failed(),
            unknown_failed: default_unknown_failed(),
        }
    }
}

impl ColorTable {
    /// Color configured for `key`
    pub const fn get(&self, key: ColorKey) -> LightColor {
        match key {
            ColorKey::Building => self.building,
            ColorKey::Success => self.success,
            ColorKey::CompileFailed => self.build_failed,
            ColorKey::TestFailed => self.test_failed,
            ColorKey::UnknownFailed => self.unknown_failed,
        }
    }
}
