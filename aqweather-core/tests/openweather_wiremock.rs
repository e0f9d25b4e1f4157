//! Integration tests for the OpenWeather client and the search controller,
//! run against a mock HTTP server.

use std::time::Duration;

use aqweather_core::{
    AirQuality, Config, Coordinates, OpenWeatherProvider, OperationState, SearchError,
    SearchOutcome, WeatherProvider, WeatherQueryController,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn london_weather() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
        "main": { "temp": 18.2, "feels_like": 17.9, "pressure": 1012, "humidity": 72 },
        "wind": { "speed": 4.12, "deg": 240 },
        "sys": { "country": "GB" },
        "name": "London",
        "cod": 200
    })
}

fn london_pollution(aqi: i64) -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -0.1257, "lat": 51.5085 },
        "list": [{
            "main": { "aqi": aqi },
            "components": { "co": 201.94, "no2": 0.77, "o3": 68.66, "pm2_5": 8.34, "pm10": 10.2 },
            "dt": 1_700_000_000
        }]
    })
}

fn create_test_provider(mock_server: &MockServer) -> OpenWeatherProvider {
    let config = Config {
        api_key: Some("TEST_KEY".to_string()),
        base_url: mock_server.uri(),
        timeout_secs: 2,
    };
    #[allow(clippy::expect_used)]
    OpenWeatherProvider::from_config(&config).expect("Failed to create provider")
}

async fn mount_weather(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

async fn mount_pollution(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/air_pollution"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Provider
// ============================================================================

#[tokio::test]
async fn current_weather_sends_metric_query_with_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_weather()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let weather = provider.current_weather("London").await.expect("weather");

    assert_eq!(weather.place_name, "London");
    assert_eq!(weather.country_code, "GB");
    assert_eq!(weather.coordinates, Coordinates { lat: 51.5085, lon: -0.1257 });
    assert_eq!(weather.humidity_pct, 72);
}

#[tokio::test]
async fn current_weather_404_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_weather(
        &mock_server,
        ResponseTemplate::new(404)
            .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.current_weather("Atlantis").await.unwrap_err();

    assert_eq!(err, SearchError::NotFound);
}

#[tokio::test]
async fn current_weather_401_is_generic_failure() {
    let mock_server = MockServer::start().await;
    mount_weather(&mock_server, ResponseTemplate::new(401)).await;

    let provider = create_test_provider(&mock_server);
    let err = provider.current_weather("London").await.unwrap_err();

    assert_eq!(err, SearchError::Request { status: 401 });
    assert_eq!(err.to_string(), "Something went wrong. Try again.");
}

#[tokio::test]
async fn malformed_body_is_transport_error() {
    let mock_server = MockServer::start().await;
    mount_weather(&mock_server, ResponseTemplate::new(200).set_body_string("not json")).await;

    let provider = create_test_provider(&mock_server);
    let err = provider.current_weather("London").await.unwrap_err();

    assert!(matches!(err, SearchError::Transport(_)));
}

#[tokio::test]
async fn timeout_is_transport_error() {
    let mock_server = MockServer::start().await;
    mount_weather(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(london_weather())
            .set_delay(Duration::from_secs(5)),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let err = provider.current_weather("London").await.unwrap_err();

    let SearchError::Transport(message) = err else {
        panic!("expected a transport error, got {err:?}");
    };
    assert!(message.starts_with("Request timed out"), "{message}");
    assert!(!message.contains("TEST_KEY"), "{message}");
    assert!(!message.contains("appid"), "{message}");
}

#[tokio::test]
async fn connect_failure_message_hides_api_key() {
    let mock_server = MockServer::start().await;
    let provider = create_test_provider(&mock_server);
    drop(mock_server);

    let controller = WeatherQueryController::new(provider);
    let outcome = controller.execute_search("London").await;

    let SearchOutcome::Failed(message) = outcome else {
        panic!("expected a failed search, got {outcome:?}");
    };
    assert!(!message.contains("TEST_KEY"), "{message}");
    assert!(!message.contains("appid"), "{message}");
    assert_eq!(controller.operation(), OperationState::Failed(message));
}

#[tokio::test]
async fn air_quality_reads_first_entry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/air_pollution"))
        .and(query_param("lat", "51.5085"))
        .and(query_param("lon", "-0.1257"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_pollution(2)))
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let reading = provider
        .air_quality(Coordinates { lat: 51.5085, lon: -0.1257 })
        .await
        .expect("air quality");

    assert_eq!(reading, AirQuality { index: 2, pm2_5: 8.34 });
}

#[tokio::test]
async fn air_quality_empty_list_is_an_error() {
    let mock_server = MockServer::start().await;
    mount_pollution(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "list": [] })),
    )
    .await;

    let provider = create_test_provider(&mock_server);
    let result = provider.air_quality(Coordinates { lat: 0.0, lon: 0.0 }).await;

    assert!(matches!(result, Err(SearchError::Transport(_))));
}

// ============================================================================
// Controller over HTTP
// ============================================================================

#[tokio::test]
async fn london_search_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_weather(&mock_server, ResponseTemplate::new(200).set_body_json(london_weather())).await;
    mount_pollution(&mock_server, ResponseTemplate::new(200).set_body_json(london_pollution(2)))
        .await;

    let controller = WeatherQueryController::new(create_test_provider(&mock_server));
    controller.set_query("  London ");

    let outcome = controller.submit().await;
    let SearchOutcome::Completed { weather, air_quality } = outcome else {
        panic!("expected a completed search, got {outcome:?}");
    };

    assert_eq!(aqweather_core::display::format_temperature(weather.temperature_c), "18°");
    assert_eq!(
        aqweather_core::display::background_theme(Some(weather.temperature_c)),
        aqweather_core::Theme::Temperate
    );
    let reading = air_quality.expect("air quality present");
    assert_eq!(aqweather_core::display::classify_air_quality(reading.index).text, "Fair");
    assert_eq!(controller.query(), "");
}

#[tokio::test]
async fn failing_air_quality_still_shows_weather() {
    let mock_server = MockServer::start().await;
    mount_weather(&mock_server, ResponseTemplate::new(200).set_body_json(london_weather())).await;
    mount_pollution(&mock_server, ResponseTemplate::new(500)).await;

    let controller = WeatherQueryController::new(create_test_provider(&mock_server));
    let outcome = controller.execute_search("London").await;

    assert!(matches!(outcome, SearchOutcome::Completed { air_quality: None, .. }));
    assert!(controller.weather().is_some());
    assert_eq!(controller.operation(), OperationState::Success);
}

#[tokio::test]
async fn not_found_after_success_clears_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_weather()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Lodnon"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_pollution(&mock_server, ResponseTemplate::new(200).set_body_json(london_pollution(1)))
        .await;

    let controller = WeatherQueryController::new(create_test_provider(&mock_server));
    controller.execute_search("London").await;
    assert!(controller.weather().is_some());

    let outcome = controller.execute_search("Lodnon").await;

    assert_eq!(outcome, SearchOutcome::Failed("City not found. Please check spelling.".into()));
    assert!(controller.weather().is_none());
    assert!(controller.air_quality().is_none());
}

#[tokio::test]
async fn blank_query_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let controller = WeatherQueryController::new(create_test_provider(&mock_server));
    assert_eq!(controller.execute_search("   ").await, SearchOutcome::Skipped);
}

#[tokio::test]
async fn overlapping_trigger_is_ignored() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(london_weather())
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_pollution(&mock_server, ResponseTemplate::new(200).set_body_json(london_pollution(3)))
        .await;

    let controller = WeatherQueryController::new(create_test_provider(&mock_server));

    let (first, second) = tokio::join!(controller.execute_search("London"), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.execute_search("Paris").await
    });

    assert!(matches!(first, SearchOutcome::Completed { .. }));
    assert_eq!(second, SearchOutcome::Ignored);
}

#[tokio::test]
async fn cancelled_search_leaves_controller_usable() {
    let mock_server = MockServer::start().await;
    mount_weather(
        &mock_server,
        ResponseTemplate::new(200)
            .set_body_json(london_weather())
            .set_delay(Duration::from_millis(500)),
    )
    .await;
    mount_pollution(&mock_server, ResponseTemplate::new(200).set_body_json(london_pollution(2)))
        .await;

    let controller = WeatherQueryController::new(create_test_provider(&mock_server));

    let cancelled =
        tokio::time::timeout(Duration::from_millis(50), controller.execute_search("London")).await;
    assert!(cancelled.is_err());
    assert_eq!(controller.operation(), OperationState::Idle);

    let outcome = controller.execute_search("London").await;
    assert!(matches!(outcome, SearchOutcome::Completed { .. }));
    assert_eq!(controller.operation(), OperationState::Success);
}
