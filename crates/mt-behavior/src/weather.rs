//! Weather-effect application over named behavior values.
//!
//! Behavior maps are free-form `name → value` tables, and a key's name
//! decides which weather multiplier applies to it.  The name rules live in
//! one declared classifier, [`WeatherCategory::for_name`], so every call
//! site categorizes identically.  Callers that already know a value's
//! category can bypass name inspection entirely via
//! [`WeatherEffects::scale`].

use std::collections::BTreeMap;

use mt_core::Weather;

// ── WeatherCategory ───────────────────────────────────────────────────────────

/// The effect category a behavior key belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeatherCategory {
    Speed,
    FollowingDistance,
    LaneDiscipline,
    Overtaking,
    /// Not affected by weather; passes through unchanged.
    Unaffected,
}

impl WeatherCategory {
    /// Classify a behavior key by name.
    ///
    /// Precedence matters: a key containing both "speed" and "lane" is a
    /// speed key.  Matching is case-insensitive
    /// substring containment; unmatched names are `Unaffected`.
    pub fn for_name(name: &str) -> WeatherCategory {
        let lower = name.to_ascii_lowercase();
        if lower.contains("speed") {
            WeatherCategory::Speed
        } else if lower.contains("following") || lower.contains("distance") {
            WeatherCategory::FollowingDistance
        } else if lower.contains("lane") || lower.contains("discipline") {
            WeatherCategory::LaneDiscipline
        } else if lower.contains("overtak") {
            WeatherCategory::Overtaking
        } else {
            WeatherCategory::Unaffected
        }
    }
}

// ── WeatherEffects ────────────────────────────────────────────────────────────

/// The four multipliers one weather condition applies.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherEffects {
    pub speed: f64,
    pub following_distance: f64,
    pub lane_discipline: f64,
    pub overtaking: f64,
}

impl WeatherEffects {
    /// Fixed multiplier set for a weather condition.
    pub fn of(weather: Weather) -> WeatherEffects {
        match weather {
            Weather::Clear => WeatherEffects {
                speed: 1.0, following_distance: 1.0, lane_discipline: 1.0, overtaking: 1.0,
            },
            Weather::LightRain => WeatherEffects {
                speed: 0.9, following_distance: 1.2, lane_discipline: 0.9, overtaking: 0.8,
            },
            Weather::HeavyRain => WeatherEffects {
                speed: 0.7, following_distance: 1.5, lane_discipline: 0.7, overtaking: 0.5,
            },
            Weather::Fog => WeatherEffects {
                speed: 0.6, following_distance: 1.8, lane_discipline: 0.8, overtaking: 0.3,
            },
            Weather::DustStorm => WeatherEffects {
                speed: 0.5, following_distance: 2.0, lane_discipline: 0.6, overtaking: 0.2,
            },
        }
    }

    /// Scale one value by the multiplier for its category.
    #[inline]
    pub fn scale(&self, value: f64, category: WeatherCategory) -> f64 {
        match category {
            WeatherCategory::Speed             => value * self.speed,
            WeatherCategory::FollowingDistance => value * self.following_distance,
            WeatherCategory::LaneDiscipline    => value * self.lane_discipline,
            WeatherCategory::Overtaking        => value * self.overtaking,
            WeatherCategory::Unaffected        => value,
        }
    }
}

/// Apply a weather condition to a named behavior map.
///
/// Every entry is scaled by the multiplier of the category its key name
/// classifies to; unmatched keys pass through unchanged.
pub fn apply_weather_effects(
    behavior: &BTreeMap<String, f64>,
    weather: Weather,
) -> BTreeMap<String, f64> {
    let effects = WeatherEffects::of(weather);
    behavior
        .iter()
        .map(|(name, &value)| {
            let category = WeatherCategory::for_name(name);
            (name.clone(), effects.scale(value, category))
        })
        .collect()
}
