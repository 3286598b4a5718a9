mod common;

use common::{chart, utc, ScriptedEphemeris};
use urania::aspects::{circular_separation, find_aspect, AspectMatcher, AspectKind, TimingPhase};
use urania::ephemeris::{Planet, PlanetPosition};
use urania::{BirthData, EngineSettings, TransitEngine};

#[test]
fn test_match_pair_conjunction() {
    let matcher = AspectMatcher::new();
    let transit = PlanetPosition::new(Planet::Mars, 100.0, 0.6);
    let natal = PlanetPosition::new(Planet::Venus, 102.0, 0.0);

    let m = matcher.match_pair(&transit, &natal).unwrap();
    assert_eq!(m.aspect, AspectKind::Conjunction);
    assert!((m.orb - 2.0).abs() < 1e-9);
    // Mars moves toward Venus
    assert!(m.is_applying);
    assert!(!m.is_retrograde);
}

#[test]
fn test_match_pair_opposition_across_zero() {
    let matcher = AspectMatcher::new();
    let transit = PlanetPosition::new(Planet::Saturn, 359.0, 0.03);
    let natal = PlanetPosition::new(Planet::Moon, 178.0, 0.0);

    let m = matcher.match_pair(&transit, &natal).unwrap();
    assert_eq!(m.aspect, AspectKind::Opposition);
    assert!((m.exact_angle - 179.0).abs() < 1e-9);
}

#[test]
fn test_no_aspect_between_bands() {
    let matcher = AspectMatcher::new();
    let transit = PlanetPosition::new(Planet::Sun, 0.0, 1.0);
    for lon in [30.0, 75.0, 105.0, 150.0] {
        let natal = PlanetPosition::new(Planet::Moon, lon, 0.0);
        assert!(matcher.match_pair(&transit, &natal).is_none(), "{} matched", lon);
    }
}

#[test]
fn test_separation_matches_at_most_one_aspect() {
    let mut sep = 0.0;
    while sep <= 180.0 {
        let bands = AspectKind::ALL
            .iter()
            .filter(|k| (sep - k.angle()).abs() <= k.orb())
            .count();
        assert!(bands <= 1, "{} falls in {} bands", sep, bands);
        if let Some((def, orb)) = find_aspect(sep) {
            assert!(orb <= def.orb);
        }
        sep += 0.25;
    }
}

#[test]
fn test_orb_boundary_is_inclusive() {
    assert_eq!(find_aspect(63.0), None);
    let (def, orb) = find_aspect(62.0).unwrap();
    assert_eq!(def.kind, AspectKind::Sextile);
    assert!((orb - 2.0).abs() < 1e-9);
    assert_eq!(find_aspect(177.0).unwrap().0.kind, AspectKind::Opposition);
}

#[test]
fn test_catalogue_indexed_by_kind() {
    for kind in AspectKind::ALL {
        assert_eq!(kind.definition().kind, kind);
    }
    let orbs: Vec<f64> = AspectKind::ALL.iter().map(|k| k.orb()).collect();
    let weights: Vec<f64> = AspectKind::ALL.iter().map(|k| k.weight()).collect();
    assert_eq!(orbs, vec![3.0, 2.0, 3.0, 3.0, 3.0]);
    assert_eq!(weights, vec![10.0, 4.0, 8.0, 6.0, 9.0]);
    assert_eq!(AspectKind::Trine.angle(), 120.0);
}

#[test]
fn test_separation_is_symmetric() {
    for (a, b) in [(10.0, 350.0), (0.0, 180.0), (123.4, 301.2), (720.5, 0.5)] {
        let ab = circular_separation(a, b);
        assert_eq!(ab, circular_separation(b, a));
        assert!((0.0..=180.0).contains(&ab));
    }
}

#[test]
fn test_transit_jupiter_conjunct_natal_sun() {
    let birth_moment = utc(1990, 7, 15, 12, 0);
    let now = utc(2024, 3, 1, 0, 0);
    // Every other pair lands between aspect bands
    let natal = chart(10.0, 0.5, &[(Planet::Sun, 120.5)]);
    let current = chart(50.0, 0.5, &[(Planet::Jupiter, 120.0)]);
    let ephemeris = ScriptedEphemeris::new()
        .at(birth_moment, natal)
        .at(now, current);
    let engine = TransitEngine::new(ephemeris, EngineSettings::default());

    let birth = BirthData::parse("1990-07-15", Some("12:00")).unwrap();
    let result = engine.calculate_current_transits(&birth, Some(now)).unwrap();

    assert_eq!(result.all_aspects.len(), 1);
    let aspect = &result.significant_aspects[0];
    assert_eq!(aspect.transit_planet, Planet::Jupiter);
    assert_eq!(aspect.natal_planet, Planet::Sun);
    assert_eq!(aspect.aspect_name, AspectKind::Conjunction);
    assert!((aspect.orb - 0.5).abs() < 1e-9);
    assert_eq!(aspect.timing_phase, TimingPhase::Close);
    assert!((aspect.strength - 15.0).abs() < 1e-9);
    assert!(aspect.interpretation.summary.starts_with("Jupiter conjunction"));
    assert_eq!(
        result.summary.strongest.as_deref(),
        Some("Jupiter conjunction Sun")
    );
}
