use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An ordered competitive tier. Lower position is a harder tier, 0 being the
/// hardest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingLevel {
    pub id: String,
    pub label: String,
    pub position: i32,
}

/// Tiers stored as literal strings on historical results, before scaling
/// levels became their own rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegacyTier {
    RxPlus,
    Rx,
    Scaled,
}

impl LegacyTier {
    pub fn parse(identifier: &str) -> Option<Self> {
        match identifier.trim().to_lowercase().as_str() {
            "rx+" => Some(Self::RxPlus),
            "rx" => Some(Self::Rx),
            "scaled" => Some(Self::Scaled),
            _ => None,
        }
    }

    pub fn position(&self) -> i32 {
        match self {
            Self::RxPlus => 0,
            Self::Rx => 1,
            Self::Scaled => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::RxPlus => "Rx+",
            Self::Rx => "Rx",
            Self::Scaled => "Scaled",
        }
    }
}

/// What a result's scaling identifier points at once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalingRef {
    ByLevel(ScalingLevel),
    Legacy(LegacyTier),
}

impl ScalingRef {
    pub fn position(&self) -> i32 {
        match self {
            Self::ByLevel(level) => level.position,
            Self::Legacy(tier) => tier.position(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::ByLevel(level) => &level.label,
            Self::Legacy(tier) => tier.label(),
        }
    }
}

/// Lookup table over the scaling levels joined for one leaderboard.
pub struct ScalingIndex<'a> {
    levels: HashMap<&'a str, &'a ScalingLevel>,
}

impl<'a> ScalingIndex<'a> {
    pub fn new(levels: &'a [ScalingLevel]) -> Self {
        Self {
            levels: levels.iter().map(|l| (l.id.as_str(), l)).collect(),
        }
    }

    /// A real scaling level always wins over the legacy spelling, so a level
    /// whose id happens to be `"rx"` keeps its own position.
    pub fn resolve(&self, scaling_level_id: &str) -> Option<ScalingRef> {
        if let Some(level) = self.levels.get(scaling_level_id) {
            return Some(ScalingRef::ByLevel((*level).clone()));
        }

        LegacyTier::parse(scaling_level_id).map(ScalingRef::Legacy)
    }
}
