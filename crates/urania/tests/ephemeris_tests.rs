mod common;

use common::{utc, FailingEphemeris, LinearEphemeris};
use urania::ephemeris::{
    EphemerisError, EphemerisService, GeoLocation, HouseSystem, Planet, SwissEphemerisAdapter,
};
use urania::{BirthData, EngineSettings, TransitEngine};

#[tokio::test]
#[ignore] // Requires Swiss Ephemeris files
async fn test_swiss_positions_complete() {
    let adapter = SwissEphemerisAdapter::new(None, HouseSystem::Placidus).unwrap();
    let location = GeoLocation::new(40.7128, -74.0060);

    let positions = adapter
        .positions(utc(2000, 1, 1, 12, 0), &location)
        .unwrap();
    assert_eq!(positions.len(), 10);
    // J2000.0: Sun near 280.37 Capricorn
    let sun = positions.get(Planet::Sun).unwrap();
    assert!((sun.longitude - 280.37).abs() < 0.1);

    let houses = adapter.houses(utc(2000, 1, 1, 12, 0), &location).unwrap();
    assert_eq!(houses.cusps.len(), 12);
    assert!(houses.ascendant.is_finite());
}

#[test]
#[ignore] // Requires Swiss Ephemeris files
fn test_swiss_solar_return_near_birthday() {
    let adapter = SwissEphemerisAdapter::new(None, HouseSystem::Placidus).unwrap();
    let engine = TransitEngine::new(adapter, EngineSettings::default());
    let birth = BirthData::parse("1985-08-23", Some("14:30")).unwrap();

    let result = engine.calculate_solar_return(&birth, Some(2024)).unwrap();
    assert!(result.residual < 0.01);
    let distance = (result.return_date - utc(2024, 8, 23, 14, 30)).num_hours().abs();
    assert!(distance <= 36, "{} hours from the birthday", distance);
}

#[test]
fn test_swiss_adapter_missing_path() {
    let result = SwissEphemerisAdapter::new(
        Some("/nonexistent/ephemeris".into()),
        HouseSystem::Placidus,
    );
    assert!(matches!(result, Err(EphemerisError::FileNotFound { .. })));
}

#[test]
fn test_swiss_adapter_uses_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let adapter =
        SwissEphemerisAdapter::new(Some(dir.path().to_path_buf()), HouseSystem::Koch).unwrap();
    assert_eq!(adapter.ephemeris_path(), dir.path());
    assert_eq!(adapter.house_system(), HouseSystem::Koch);
}

#[test]
fn test_moon_phase_from_service() {
    // Sun 280, Moon 100 at the epoch
    let ephemeris = LinearEphemeris::new(utc(1990, 1, 1, 12, 0));
    let phase = ephemeris.moon_phase(utc(1990, 1, 1, 12, 0)).unwrap();
    assert_eq!(phase.phase_name, "Full Moon");
    assert!((phase.illumination_percent - 100.0).abs() < 1e-6);

    let engine = TransitEngine::new(ephemeris, EngineSettings::default());
    let phase = engine.moon_phase(Some(utc(1990, 1, 1, 12, 0))).unwrap();
    assert!((phase.elongation - 180.0).abs() < 1e-9);
}

#[test]
fn test_moon_phase_failure_yields_error_record() {
    let engine = TransitEngine::new(FailingEphemeris, EngineSettings::default());
    let err = engine.moon_phase(Some(utc(2024, 3, 1, 0, 0))).unwrap_err();
    assert_eq!(err.error, "Failed to calculate the moon phase");
    assert!(err.details.contains("connection refused"));
}

#[test]
fn test_default_longitude_reads_positions() {
    let ephemeris = LinearEphemeris::new(utc(1990, 1, 1, 12, 0)).with_body(Planet::Mars, 10.0, 2.0);
    let lon = ephemeris
        .longitude(Planet::Mars, utc(1990, 1, 3, 12, 0), &GeoLocation::new(0.0, 0.0))
        .unwrap();
    assert!((lon - 14.0).abs() < 1e-9);
}
