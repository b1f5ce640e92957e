//! Property tests for playability scoring.

use golfgang_core::{ConditionsScorer, PlayabilityLabel, WeatherObservation};
use proptest::prelude::*;

prop_compose! {
    fn arb_observation()(
        temperature_max in -40.0..55.0f64,
        spread in 0.0..25.0f64,
        precipitation_total in 0.0..120.0f64,
        wind_speed_max in 0.0..160.0f64,
        weather_code in 0u8..=110,
    ) -> WeatherObservation {
        WeatherObservation {
            temperature_max,
            temperature_min: temperature_max - spread,
            precipitation_total,
            wind_speed_max,
            weather_code,
        }
    }
}

proptest! {
    #[test]
    fn score_stays_within_band(obs in arb_observation()) {
        let score = ConditionsScorer::score(&obs);
        prop_assert!(score.value <= 10);
        prop_assert!(score.value >= 3, "combined penalties never exceed 7");
    }

    #[test]
    fn score_is_ten_minus_penalties(obs in arb_observation()) {
        let penalties = ConditionsScorer::penalties(&obs);
        let score = ConditionsScorer::score(&obs);
        prop_assert_eq!(score.value, 10 - penalties.total());
    }

    #[test]
    fn label_follows_value(obs in arb_observation()) {
        let score = ConditionsScorer::score(&obs);
        prop_assert_eq!(score.label, PlayabilityLabel::from_score(score.value));
    }

    #[test]
    fn more_rain_never_helps(obs in arb_observation(), extra in 0.0..100.0f64) {
        let mut wetter = obs;
        wetter.precipitation_total += extra;
        prop_assert!(
            ConditionsScorer::score(&wetter).value <= ConditionsScorer::score(&obs).value
        );
    }

    #[test]
    fn more_wind_never_helps(obs in arb_observation(), extra in 0.0..100.0f64) {
        let mut windier = obs;
        windier.wind_speed_max += extra;
        prop_assert!(
            ConditionsScorer::score(&windier).value <= ConditionsScorer::score(&obs).value
        );
    }

    #[test]
    fn mild_temperatures_cost_nothing(tmax in 10.0..=30.0f64) {
        let obs = WeatherObservation {
            temperature_max: tmax,
            temperature_min: tmax - 8.0,
            precipitation_total: 0.0,
            wind_speed_max: 0.0,
            weather_code: 1,
        };
        prop_assert_eq!(ConditionsScorer::penalties(&obs).temperature, 0);
    }
}
