use gt_prices::*;
use std::fs;

#[test]
fn response_to_csv_file() {
    let body = r#"{"response": {"total": 4, "data": [
        {"period": "2023-01", "stateid": "CA", "price": "22.1"},
        {"period": "2023-01", "stateid": "TX", "price": "12.9"},
        {"period": "2023-02", "stateid": "CA", "price": 21.0},
        {"period": "2023-02", "stateid": "TX", "price": null}
    ]}}"#;
    let series = PriceSeries::Electricity;
    let obs = parse_observations(body, series.request().value_field()).unwrap();
    let prices = monthly_mean(&obs).unwrap();

    let dir = std::env::temp_dir().join("gt_prices_pipeline");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(series.file_name());
    write_price_csv(fs::File::create(&path).unwrap(), series.value_header(), &prices).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "period,price ¢/kWh");
    let (period, jan) = lines[1].split_once(',').unwrap();
    assert_eq!(period, "2023-01-01");
    assert!((jan.parse::<f64>().unwrap() - 17.5).abs() < 1e-9);
    assert_eq!(lines[2], "2023-02-01,21");
}

#[test]
fn missing_key_is_reported() {
    // only meaningful when the variable is absent from the test environment
    if std::env::var(API_KEY_VAR).is_err() {
        assert!(matches!(
            EiaClient::from_env(),
            Err(PricesError::MissingApiKey { .. })
        ));
    }
}
