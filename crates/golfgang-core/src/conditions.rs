//! Golf playability scoring.
//!
//! Turns a daily weather observation into a 0-10 playability score. Every
//! view scores through this module so the Home card and the event page
//! always show the same number.
//!
//! ## Penalties
//!
//! Starting from a perfect 10:
//!
//! | Input | Range | Penalty |
//! |-------|-------|---------|
//! | max temperature | > 35 °C | 2 |
//! | | > 30 °C | 1 |
//! | | < 5 °C | 2 |
//! | | < 10 °C | 1 |
//! | precipitation | > 10 mm | 3 |
//! | | > 5 mm | 2 |
//! | | > 1 mm | 1 |
//! | max wind speed | > 40 km/h | 2 |
//! | | > 25 km/h | 1 |
//!
//! Heat and cold penalties are separate checks, the rest are exclusive
//! tiers. The result is clamped to 0..=10. These thresholds are a
//! contract shared with every stored score label users have seen; do not
//! retune them casually.

use serde::{Deserialize, Serialize};

/// One day of forecast data for a course location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Daily maximum, °C
    pub temperature_max: f64,
    /// Daily minimum, °C
    pub temperature_min: f64,
    /// Precipitation sum, mm
    pub precipitation_total: f64,
    /// Daily maximum wind speed, km/h
    pub wind_speed_max: f64,
    /// WMO weather code
    pub weather_code: u8,
}

impl WeatherObservation {
    /// Display temperature: the rounded midpoint of min and max.
    pub fn temperature_mean(&self) -> i32 {
        ((self.temperature_max + self.temperature_min) / 2.0).round() as i32
    }

    pub fn condition(&self) -> SkyCondition {
        SkyCondition::from_code(self.weather_code)
    }
}

/// Coarse sky condition derived from a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkyCondition {
    Clear,
    #[serde(rename = "partly_cloudy")]
    PartlyCloudy,
    Foggy,
    Rainy,
    Snow,
    #[serde(rename = "rain_showers")]
    RainShowers,
    #[serde(rename = "snow_showers")]
    SnowShowers,
    Thunderstorm,
    Unknown,
}

impl SkyCondition {
    /// Bucket a WMO code. The ranges are coarse on purpose; the score
    /// works from the measured values, this is display only.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            4..=48 => Self::Foggy,
            49..=67 => Self::Rainy,
            68..=77 => Self::Snow,
            78..=82 => Self::RainShowers,
            83..=86 => Self::SnowShowers,
            87..=99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Foggy => "Foggy",
            Self::Rainy => "Rainy",
            Self::Snow => "Snow",
            Self::RainShowers => "Rain Showers",
            Self::SnowShowers => "Snow Showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy => "⛅",
            Self::Foggy => "🌫️",
            Self::Rainy => "🌧️",
            Self::Snow => "🌨️",
            Self::RainShowers => "🌦️",
            Self::SnowShowers => "🌨️",
            Self::Thunderstorm => "⛈️",
            Self::Unknown => "🌤️",
        }
    }
}

/// Per-input penalty breakdown, for explaining a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionPenalties {
    pub temperature: u8,
    pub precipitation: u8,
    pub wind: u8,
}

impl ConditionPenalties {
    pub fn total(&self) -> u8 {
        self.temperature + self.precipitation + self.wind
    }
}

/// Playability band shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayabilityLabel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl PlayabilityLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            8..=u8::MAX => Self::Excellent,
            6..=7 => Self::Good,
            4..=5 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

/// Score plus its display band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayabilityScore {
    /// 0..=10
    pub value: u8,
    pub label: PlayabilityLabel,
}

impl PlayabilityScore {
    /// Badge color: green from 8, orange from 6, red below.
    pub fn color_hex(&self) -> &'static str {
        if self.value >= 8 {
            "#10b981"
        } else if self.value >= 6 {
            "#f59e0b"
        } else {
            "#ef4444"
        }
    }
}

/// Scores observations into playability.
pub struct ConditionsScorer;

impl ConditionsScorer {
    /// Score with no penalties applied.
    pub const PERFECT_SCORE: u8 = 10;

    /// Penalty breakdown for an observation.
    pub fn penalties(observation: &WeatherObservation) -> ConditionPenalties {
        let mut temperature = 0;
        if observation.temperature_max > 35.0 {
            temperature += 2;
        } else if observation.temperature_max > 30.0 {
            temperature += 1;
        }
        if observation.temperature_max < 5.0 {
            temperature += 2;
        } else if observation.temperature_max < 10.0 {
            temperature += 1;
        }

        let precipitation = if observation.precipitation_total > 10.0 {
            3
        } else if observation.precipitation_total > 5.0 {
            2
        } else if observation.precipitation_total > 1.0 {
            1
        } else {
            0
        };

        let wind = if observation.wind_speed_max > 40.0 {
            2
        } else if observation.wind_speed_max > 25.0 {
            1
        } else {
            0
        };

        ConditionPenalties {
            temperature,
            precipitation,
            wind,
        }
    }

    /// Score an observation: 10 minus penalties, clamped to 0..=10.
    pub fn score(observation: &WeatherObservation) -> PlayabilityScore {
        let penalties = Self::penalties(observation);
        let value = (Self::PERFECT_SCORE as i32 - penalties.total() as i32).clamp(0, 10) as u8;
        PlayabilityScore {
            value,
            label: PlayabilityLabel::from_score(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_observation(
        temperature_max: f64,
        precipitation_total: f64,
        wind_speed_max: f64,
    ) -> WeatherObservation {
        WeatherObservation {
            temperature_max,
            temperature_min: temperature_max - 8.0,
            precipitation_total,
            wind_speed_max,
            weather_code: 1,
        }
    }

    #[test]
    fn calm_mild_day_is_perfect() {
        let obs = make_test_observation(22.0, 0.0, 10.0);
        let score = ConditionsScorer::score(&obs);
        assert_eq!(score.value, 10);
        assert_eq!(score.label, PlayabilityLabel::Excellent);
    }

    #[test]
    fn hot_day_loses_two_points() {
        let obs = make_test_observation(38.0, 0.0, 10.0);
        let score = ConditionsScorer::score(&obs);
        assert_eq!(score.value, 8);
        assert_eq!(score.label, PlayabilityLabel::Excellent);
    }

    #[test]
    fn wet_and_windy_day_is_fair() {
        let obs = make_test_observation(22.0, 12.0, 45.0);
        let score = ConditionsScorer::score(&obs);
        assert_eq!(score.value, 5, "heavy rain (3) plus strong wind (2)");
        assert_eq!(score.label, PlayabilityLabel::Fair);
    }

    #[test]
    fn cold_wet_windy_day_is_poor() {
        let obs = WeatherObservation {
            temperature_max: 3.0,
            temperature_min: -1.0,
            precipitation_total: 15.0,
            wind_speed_max: 50.0,
            weather_code: 65,
        };
        let score = ConditionsScorer::score(&obs);
        assert_eq!(score.value, 3);
        assert_eq!(score.label, PlayabilityLabel::Poor);
    }

    #[test]
    fn penalty_boundaries_are_exclusive() {
        // Boundary values sit in the milder tier.
        assert_eq!(ConditionsScorer::penalties(&make_test_observation(35.0, 0.0, 0.0)).temperature, 1);
        assert_eq!(ConditionsScorer::penalties(&make_test_observation(30.0, 0.0, 0.0)).temperature, 0);
        assert_eq!(ConditionsScorer::penalties(&make_test_observation(5.0, 0.0, 0.0)).temperature, 1);
        assert_eq!(ConditionsScorer::penalties(&make_test_observation(10.0, 0.0, 0.0)).temperature, 0);
        assert_eq!(ConditionsScorer::penalties(&make_test_observation(22.0, 1.0, 0.0)).precipitation, 0);
        assert_eq!(ConditionsScorer::penalties(&make_test_observation(22.0, 5.0, 0.0)).precipitation, 1);
        assert_eq!(ConditionsScorer::penalties(&make_test_observation(22.0, 10.0, 0.0)).precipitation, 2);
        assert_eq!(ConditionsScorer::penalties(&make_test_observation(22.0, 0.0, 25.0)).wind, 0);
        assert_eq!(ConditionsScorer::penalties(&make_test_observation(22.0, 0.0, 40.0)).wind, 1);
    }

    #[test]
    fn heat_and_cold_never_stack() {
        // A single max temperature cannot be both hot and cold.
        let hot = ConditionsScorer::penalties(&make_test_observation(40.0, 0.0, 0.0));
        assert_eq!(hot.temperature, 2);
        let cold = ConditionsScorer::penalties(&make_test_observation(2.0, 0.0, 0.0));
        assert_eq!(cold.temperature, 2);
    }

    #[test]
    fn worst_case_stays_above_zero() {
        let obs = make_test_observation(50.0, 100.0, 100.0);
        let score = ConditionsScorer::score(&obs);
        assert_eq!(score.value, 3, "maximum combined penalty is 7");
        assert_eq!(score.label, PlayabilityLabel::Poor);
    }

    #[test]
    fn label_thresholds() {
        assert_eq!(PlayabilityLabel::from_score(10), PlayabilityLabel::Excellent);
        assert_eq!(PlayabilityLabel::from_score(8), PlayabilityLabel::Excellent);
        assert_eq!(PlayabilityLabel::from_score(7), PlayabilityLabel::Good);
        assert_eq!(PlayabilityLabel::from_score(6), PlayabilityLabel::Good);
        assert_eq!(PlayabilityLabel::from_score(5), PlayabilityLabel::Fair);
        assert_eq!(PlayabilityLabel::from_score(4), PlayabilityLabel::Fair);
        assert_eq!(PlayabilityLabel::from_score(3), PlayabilityLabel::Poor);
        assert_eq!(PlayabilityLabel::from_score(0), PlayabilityLabel::Poor);
    }

    #[test]
    fn badge_colors_follow_score() {
        let score = |value| PlayabilityScore {
            value,
            label: PlayabilityLabel::from_score(value),
        };
        assert_eq!(score(9).color_hex(), "#10b981");
        assert_eq!(score(6).color_hex(), "#f59e0b");
        assert_eq!(score(5).color_hex(), "#ef4444", "fair still shows red");
    }

    #[test]
    fn temperature_mean_rounds_midpoint() {
        let obs = WeatherObservation {
            temperature_max: 21.0,
            temperature_min: 14.0,
            precipitation_total: 0.0,
            wind_speed_max: 0.0,
            weather_code: 0,
        };
        assert_eq!(obs.temperature_mean(), 18, "17.5 rounds half away from zero");
    }

    #[test]
    fn sky_condition_buckets() {
        assert_eq!(SkyCondition::from_code(0), SkyCondition::Clear);
        assert_eq!(SkyCondition::from_code(2), SkyCondition::PartlyCloudy);
        assert_eq!(SkyCondition::from_code(45), SkyCondition::Foggy);
        assert_eq!(SkyCondition::from_code(61), SkyCondition::Rainy);
        assert_eq!(SkyCondition::from_code(71), SkyCondition::Snow);
        assert_eq!(SkyCondition::from_code(80), SkyCondition::RainShowers);
        assert_eq!(SkyCondition::from_code(85), SkyCondition::SnowShowers);
        assert_eq!(SkyCondition::from_code(95), SkyCondition::Thunderstorm);
        assert_eq!(SkyCondition::from_code(100), SkyCondition::Unknown);
        assert_eq!(SkyCondition::from_code(95).label(), "Thunderstorm");
    }
}
