//! Integration tests for the Open-Meteo client.
//!
//! These tests run against a mocked HTTP server, so no real API access
//! is needed.

use chrono::NaiveDate;
use golfgang_core::integrations::WeatherClient;
use golfgang_core::{ConditionsScorer, Event, SkyCondition, WeatherError};
use mockito::Matcher;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const CLEAR_BODY: &str = r#"{
    "daily": {
        "temperature_2m_max": [21.4],
        "temperature_2m_min": [12.9],
        "precipitation_sum": [0.2],
        "weathercode": [2],
        "windspeed_10m_max": [18.5]
    }
}"#;

const RAINY_BODY: &str = r#"{
    "daily": {
        "temperature_2m_max": [16.0],
        "temperature_2m_min": [9.0],
        "precipitation_sum": [12.0],
        "weathercode": [63],
        "windspeed_10m_max": [30.0]
    }
}"#;

#[tokio::test]
async fn test_daily_forecast_parses_series() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/forecast")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("latitude".into(), "-33.87".into()),
            Matcher::UrlEncoded("longitude".into(), "151.21".into()),
            Matcher::UrlEncoded("timezone".into(), "auto".into()),
            Matcher::UrlEncoded("start_date".into(), "2025-03-14".into()),
            Matcher::UrlEncoded("end_date".into(), "2025-03-14".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CLEAR_BODY)
        .create_async()
        .await;

    let client = WeatherClient::with_base_url(server.url());
    let observation = client
        .daily_forecast(day(2025, 3, 14), None, None, day(2025, 3, 10))
        .await
        .unwrap()
        .expect("forecast inside the horizon");

    mock.assert_async().await;
    assert_eq!(observation.temperature_max, 21.4);
    assert_eq!(observation.temperature_mean(), 17);
    assert_eq!(observation.condition(), SkyCondition::PartlyCloudy);
    assert_eq!(ConditionsScorer::score(&observation).value, 10);
}

#[tokio::test]
async fn test_explicit_coordinates_override_defaults() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/forecast")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("latitude".into(), "-37.81".into()),
            Matcher::UrlEncoded("longitude".into(), "144.96".into()),
        ]))
        .with_status(200)
        .with_body(CLEAR_BODY)
        .create_async()
        .await;

    let client = WeatherClient::with_base_url(server.url());
    let result = client
        .daily_forecast(
            day(2025, 3, 14),
            Some(-37.81),
            Some(144.96),
            day(2025, 3, 14),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(result.is_some());
}

#[tokio::test]
async fn test_server_error_maps_to_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/forecast")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = WeatherClient::with_base_url(server.url());
    let err = client
        .daily_forecast(day(2025, 3, 14), None, None, day(2025, 3, 14))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Api { status: 500 }));
}

#[tokio::test]
async fn test_missing_daily_block_reads_as_no_data() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/forecast")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = WeatherClient::with_base_url(server.url());
    let result = client
        .daily_forecast(day(2025, 3, 14), None, None, day(2025, 3, 14))
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/forecast")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = WeatherClient::with_base_url(server.url());
    let err = client
        .daily_forecast(day(2025, 3, 14), None, None, day(2025, 3, 14))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Malformed(_)));
}

#[tokio::test]
async fn test_out_of_horizon_never_calls_the_provider() {
    // No mocks registered; any request would come back as an error.
    let server = mockito::Server::new_async().await;
    let client = WeatherClient::with_base_url(server.url());
    let today = day(2025, 3, 14);

    let beyond = client
        .daily_forecast(day(2025, 3, 31), None, None, today)
        .await
        .unwrap();
    assert!(beyond.is_none(), "17 days out is past the horizon");

    let past = client
        .daily_forecast(day(2025, 3, 13), None, None, today)
        .await
        .unwrap();
    assert!(past.is_none(), "yesterday has no forecast");
}

#[tokio::test]
async fn test_batch_fetch_covers_each_future_date_once() {
    let mut server = mockito::Server::new_async().await;
    let today = day(2025, 3, 14);

    let saturday = server
        .mock("GET", "/v1/forecast")
        .match_query(Matcher::UrlEncoded("start_date".into(), "2025-03-15".into()))
        .with_status(200)
        .with_body(CLEAR_BODY)
        .expect(1)
        .create_async()
        .await;
    let sunday = server
        .mock("GET", "/v1/forecast")
        .match_query(Matcher::UrlEncoded("start_date".into(), "2025-03-16".into()))
        .with_status(200)
        .with_body(RAINY_BODY)
        .expect(1)
        .create_async()
        .await;
    let monday = server
        .mock("GET", "/v1/forecast")
        .match_query(Matcher::UrlEncoded("start_date".into(), "2025-03-17".into()))
        .with_status(500)
        .create_async()
        .await;

    let events = vec![
        Event::new(day(2025, 3, 15)),
        Event::new(day(2025, 3, 15)),
        Event::new(day(2025, 3, 16)),
        Event::new(day(2025, 3, 17)),
        Event::new(day(2025, 3, 1)),
    ];

    let client = WeatherClient::with_base_url(server.url());
    let forecasts = client.forecast_for_events(&events, today).await;

    saturday.assert_async().await;
    sunday.assert_async().await;
    monday.assert_async().await;

    assert_eq!(forecasts.len(), 2, "failed and past dates stay absent");
    assert!(forecasts.contains_key(&day(2025, 3, 15)));
    let rainy = &forecasts[&day(2025, 3, 16)];
    assert_eq!(ConditionsScorer::score(rainy).value, 6, "heavy rain and wind");
}
