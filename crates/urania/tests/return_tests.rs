mod common;

use chrono::{DateTime, Duration, Utc};
use common::{utc, FailingEphemeris, LinearEphemeris};
use urania::calculators::lunar_return::interpret_lunar_return;
use urania::calculators::solar_return::interpret_solar_return;
use urania::ephemeris::{
    EphemerisError, EphemerisService, GeoLocation, HouseSet, HouseSystem, Planet, PlanetPosition,
    PositionSet, Sign,
};
use urania::interpretation::{ascendant_tone, house_theme, moon_sign_theme};
use urania::{BirthData, EngineSettings, ReturnKind, ReturnSearch, TransitEngine};

fn engine(search: ReturnSearch) -> TransitEngine<LinearEphemeris> {
    let settings = EngineSettings {
        return_search: search,
        ..EngineSettings::default()
    };
    TransitEngine::new(LinearEphemeris::new(utc(1990, 1, 1, 12, 0)), settings)
}

fn equal_houses_from_aries() -> HouseSet {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = 30.0 * i as f64;
    }
    HouseSet::from_cusps(HouseSystem::Equal, cusps, 0.0, 270.0)
}

#[test]
fn test_solar_return_converges_on_natal_sun() {
    let engine = engine(ReturnSearch::Bisection);
    let birth = BirthData::parse("1990-01-01", None).unwrap();

    let result = engine.calculate_solar_return(&birth, Some(2000)).unwrap();
    let anniversary = utc(2000, 1, 1, 12, 0);

    assert_eq!(result.kind, ReturnKind::Solar);
    assert_eq!(result.search, ReturnSearch::Bisection);
    assert!((result.natal_longitude - 280.0).abs() < 1e-9);
    // The mock Sun runs slightly slow, so the return falls after the birthday
    assert!(result.return_date > anniversary);
    assert!(result.return_date < anniversary + Duration::days(1));
    assert!(result.residual < 0.01, "residual {}", result.residual);

    let sun = result.positions.get(Planet::Sun).unwrap();
    assert!((sun.longitude - 280.0).abs() < 0.01);
    assert_eq!(result.positions.len(), 10);
    assert_eq!(result.houses.cusps.len(), 12);

    assert_eq!(result.interpretation.house, Some(10));
    assert_eq!(result.interpretation.ascendant_sign, Sign::Aries);
    assert_eq!(result.interpretation.focus, house_theme(10).unwrap());
    assert_eq!(result.interpretation.tone, ascendant_tone(Sign::Aries));
}

#[test]
fn test_solar_return_without_bracket_uses_closest_sample() {
    // At 0.5 deg/day the Sun never reaches its natal place near the birthday
    let ephemeris =
        LinearEphemeris::new(utc(1990, 1, 1, 12, 0)).with_body(Planet::Sun, 280.0, 0.5);
    let engine = TransitEngine::new(ephemeris, EngineSettings::default());
    let birth = BirthData::parse("1990-01-01", None).unwrap();

    let result = engine.calculate_solar_return(&birth, Some(2000)).unwrap();
    // Residuals across the window run 25..27 deg; the earliest sample is closest
    assert_eq!(result.return_date, utc(1999, 12, 30, 12, 0));
    assert!((result.residual - 25.0).abs() < 1e-6, "residual {}", result.residual);
    assert_eq!(result.search, ReturnSearch::Bisection);
}

#[test]
fn test_solar_return_anniversary_mode() {
    let engine = engine(ReturnSearch::Anniversary);
    let birth = BirthData::parse("1990-01-01", None).unwrap();

    let result = engine.calculate_solar_return(&birth, Some(2000)).unwrap();
    assert_eq!(result.return_date, utc(2000, 1, 1, 12, 0));
    assert_eq!(result.search, ReturnSearch::Anniversary);
    // 3652 days at 0.9856 deg/day leaves the Sun about 0.59 deg short
    assert!(result.residual > 0.5 && result.residual < 0.7, "residual {}", result.residual);
}

#[test]
fn test_solar_return_for_leap_day_birth() {
    let engine = engine(ReturnSearch::Anniversary);
    let birth = BirthData::parse("1992-02-29", Some("08:15")).unwrap();

    let result = engine.calculate_solar_return(&birth, Some(2023)).unwrap();
    assert_eq!(result.return_date, utc(2023, 2, 28, 8, 15));

    let result = engine.calculate_solar_return(&birth, Some(2024)).unwrap();
    assert_eq!(result.return_date, utc(2024, 2, 29, 8, 15));
}

#[test]
fn test_solar_return_respects_birth_offset() {
    let engine = engine(ReturnSearch::Anniversary);
    let birth = BirthData::parse("1990-01-01", Some("15:00"))
        .unwrap()
        .with_utc_offset(180);

    let result = engine.calculate_solar_return(&birth, Some(2000)).unwrap();
    assert_eq!(result.return_date, utc(2000, 1, 1, 12, 0));
}

#[test]
fn test_solar_return_in_fifth_house() {
    let sun = PlanetPosition::new(Planet::Sun, 130.0, 0.98);
    let interp = interpret_solar_return(&sun, &equal_houses_from_aries());

    assert_eq!(interp.house, Some(5));
    assert_eq!(interp.sign, Sign::Leo);
    assert_eq!(interp.focus, "creativity and self-expression");
    assert_eq!(
        interp.summary,
        format!(
            "The year ahead focuses on creativity and self-expression, {}",
            ascendant_tone(Sign::Aries)
        )
    );
}

#[test]
fn test_lunar_return_at_or_after_target() {
    let engine = engine(ReturnSearch::Bisection);
    let birth = BirthData::parse("1990-01-01", None).unwrap();
    let target = utc(1990, 2, 1, 0, 0);

    let result = engine.calculate_lunar_return(&birth, Some(target)).unwrap();
    assert_eq!(result.kind, ReturnKind::Lunar);
    assert!(result.return_date >= target);
    assert!(result.return_date < target + Duration::days(28));
    assert!(result.residual < 0.05, "residual {}", result.residual);

    let moon = result.positions.get(Planet::Moon).unwrap();
    assert!((moon.longitude - 100.0).abs() < 0.05);
    assert_eq!(result.interpretation.sign, Sign::Cancer);
    assert_eq!(result.interpretation.house, Some(4));
    assert_eq!(result.interpretation.focus, moon_sign_theme(Sign::Cancer));
}

#[test]
fn test_lunar_return_cycle_mode() {
    let engine = engine(ReturnSearch::Anniversary);
    let birth = BirthData::parse("1990-01-01", None).unwrap();

    let result = engine
        .calculate_lunar_return(&birth, Some(utc(1990, 2, 1, 0, 0)))
        .unwrap();
    // One 29-day cycle lands before the target, so two are taken
    assert_eq!(result.return_date, utc(1990, 2, 28, 12, 0));
    assert_eq!(result.search, ReturnSearch::Anniversary);
}

#[test]
fn test_lunar_return_interpretation() {
    let moon = PlanetPosition::new(Planet::Moon, 100.0, 13.2);
    let interp = interpret_lunar_return(&moon, &equal_houses_from_aries());
    assert_eq!(interp.house, Some(4));
    assert_eq!(interp.tone, house_theme(4).unwrap());
    assert!(interp.summary.starts_with("Moon in Cancer:"));
}

/// Moon parked a quarter circle away from its natal place after birth.
struct StalledMoon {
    inner: LinearEphemeris,
    birth: DateTime<Utc>,
}

impl EphemerisService for StalledMoon {
    fn positions(
        &self,
        at: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<PositionSet, EphemerisError> {
        let mut positions = self.inner.positions(at, location)?;
        if at > self.birth {
            positions.insert(PlanetPosition::new(Planet::Moon, 190.0, 0.0));
        }
        Ok(positions)
    }

    fn houses(
        &self,
        at: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<HouseSet, EphemerisError> {
        self.inner.houses(at, location)
    }
}

#[test]
fn test_lunar_return_not_found_in_window() {
    let birth_moment = utc(1990, 1, 1, 12, 0);
    let ephemeris = StalledMoon {
        inner: LinearEphemeris::new(birth_moment).with_body(Planet::Moon, 100.0, 0.0),
        birth: birth_moment,
    };
    let engine = TransitEngine::new(ephemeris, EngineSettings::default());
    let birth = BirthData::parse("1990-01-01", None).unwrap();

    let err = engine
        .calculate_lunar_return(&birth, Some(utc(1990, 2, 1, 0, 0)))
        .unwrap_err();
    assert_eq!(err.error, "Failed to calculate the lunar return");
    assert!(err.details.contains("Moon return not found"), "{}", err.details);
}

#[test]
fn test_return_failure_yields_error_record() {
    let engine = TransitEngine::new(FailingEphemeris, EngineSettings::default());
    let birth = BirthData::parse("1990-01-01", None).unwrap();

    let err = engine.calculate_solar_return(&birth, Some(2000)).unwrap_err();
    assert_eq!(err.error, "Failed to calculate the solar return");
    assert!(err.details.contains("unavailable"));
}
