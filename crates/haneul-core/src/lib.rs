//! Core types shared across the haneul crates.

/// Which animated scene is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// Night sky: stars, nebulas, planets, meteors, dust.
    Cosmos,
    /// Daytime sky: clouds, grassland hills, the occasional aeroplane.
    Meadow,
}

impl SceneKind {
    /// Short label for the help line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cosmos => "cosmos",
            Self::Meadow => "meadow",
        }
    }
}

/// Theme preference deciding which scene mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Follow the local clock: meadow by day, cosmos at night.
    #[default]
    Auto,
    /// Always the night scene.
    Dark,
    /// Always the day scene.
    Light,
}

impl Theme {
    /// Cycle through auto -> dark -> light.
    pub fn next(self) -> Self {
        match self {
            Self::Auto => Self::Dark,
            Self::Dark => Self::Light,
            Self::Light => Self::Auto,
        }
    }

    /// Resolve the scene for a local hour (0-23). Daytime is 07:00-18:59.
    pub fn scene_for_hour(self, hour: u32) -> SceneKind {
        match self {
            Self::Dark => SceneKind::Cosmos,
            Self::Light => SceneKind::Meadow,
            Self::Auto => {
                if (7..19).contains(&hour) {
                    SceneKind::Meadow
                } else {
                    SceneKind::Cosmos
                }
            }
        }
    }

    /// Short label for the help line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Animation speed preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle through slow -> medium -> fast.
    pub fn next(self) -> Self {
        match self {
            Self::Slow => Self::Medium,
            Self::Medium => Self::Fast,
            Self::Fast => Self::Slow,
        }
    }

    /// Tick interval in milliseconds, used as the event-poll timeout.
    pub fn tick_ms(self) -> u64 {
        match self {
            Self::Slow => 66,
            Self::Medium => 33,
            Self::Fast => 16,
        }
    }

    /// Short label for the help line.
    pub fn label(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }
}
