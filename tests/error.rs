//! Tests for error module

use chargemap::oracle::OracleError;
use chargemap::ChargeMapError;

#[test]
fn test_error_display() {
    let err = ChargeMapError::invalid_coordinate(f64::NAN, 77.58);
    assert!(err.to_string().contains("invalid coordinate"));

    let err = ChargeMapError::invalid_parameter("epsilon_km", -1.0);
    assert!(err.to_string().contains("epsilon_km"));
    assert!(err.to_string().contains("-1"));

    let err = ChargeMapError::EmptyDataset;
    assert_eq!(err.to_string(), "dataset has no eligible records");
}

#[test]
fn test_oracle_error_display() {
    let err = OracleError::Api {
        status: 500,
        message: "Internal Server Error".into(),
    };
    assert_eq!(err.to_string(), "API error 500: Internal Server Error");

    let err = OracleError::NoRoute;
    assert!(err.to_string().contains("no route"));

    let err = OracleError::RateLimited;
    assert!(err.to_string().contains("rate limited"));
}

#[test]
fn test_oracle_error_wraps_into_crate_error() {
    let err: ChargeMapError = OracleError::NoRoute.into();
    assert!(matches!(err, ChargeMapError::Oracle(_)));

    let err = ChargeMapError::OracleUnavailable(OracleError::RateLimited);
    assert!(err.to_string().contains("unavailable"));
}

#[test]
fn test_per_request_classification() {
    assert!(OracleError::NoRoute.is_per_request());
    assert!(!OracleError::RateLimited.is_per_request());
    assert!(!OracleError::Unauthorized.is_per_request());
}
