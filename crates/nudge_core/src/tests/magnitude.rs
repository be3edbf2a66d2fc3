use crate::{BiasError, BiasMagnitude, BiasRequest};

#[test]
fn test_bounds_are_inclusive() {
    assert_eq!(BiasMagnitude::new(-100.0).unwrap().value(), -100.0);
    assert_eq!(BiasMagnitude::new(100.0).unwrap().value(), 100.0);
    assert_eq!(BiasMagnitude::new(0.0).unwrap().value(), 0.0);
}

#[test]
fn test_out_of_range_rejected() {
    assert!(matches!(
        BiasMagnitude::new(100.5),
        Err(BiasError::MagnitudeOutOfRange(v)) if v == 100.5
    ));
    assert!(BiasMagnitude::new(-101.0).is_err());
    assert!(BiasMagnitude::new(f64::NAN).is_err());
    assert!(BiasMagnitude::new(f64::INFINITY).is_err());
}

#[test]
fn test_default_is_strongest_suppression() {
    assert_eq!(BiasMagnitude::default().value(), -100.0);
}

#[test]
fn test_deserialize_validates_range() {
    let ok: BiasMagnitude = serde_json::from_str("-12.5").unwrap();
    assert_eq!(ok.value(), -12.5);

    assert!(serde_json::from_str::<BiasMagnitude>("250").is_err());
}

#[test]
fn test_whole_magnitude_serializes_as_integer() {
    assert_eq!(serde_json::to_string(&BiasMagnitude::default()).unwrap(), "-100");
    assert_eq!(serde_json::to_string(&BiasMagnitude::new(0.0).unwrap()).unwrap(), "0");
    assert_eq!(serde_json::to_string(&BiasMagnitude::new(7.25).unwrap()).unwrap(), "7.25");
}

#[test]
fn test_bias_request_round_trips_optional_fields() {
    let request: BiasRequest = serde_json::from_str(r#"{"target_text":"time"}"#).unwrap();
    assert_eq!(request.target_text.as_deref(), Some("time"));
    assert!(request.magnitude.is_none());

    let json = serde_json::to_string(&BiasRequest::default()).unwrap();
    assert_eq!(json, "{}");
}
