use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::EphemerisError;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// The ten bodies the engine works with, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    pub const ALL: [Planet; 10] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
        Planet::Pluto,
    ];

    /// Inner/personal bodies tracked by secondary progressions.
    pub const PERSONAL: [Planet; 5] = [
        Planet::Sun,
        Planet::Moon,
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Planet::Sun => "sun",
            Planet::Moon => "moon",
            Planet::Mercury => "mercury",
            Planet::Venus => "venus",
            Planet::Mars => "mars",
            Planet::Jupiter => "jupiter",
            Planet::Saturn => "saturn",
            Planet::Uranus => "uranus",
            Planet::Neptune => "neptune",
            Planet::Pluto => "pluto",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
            Planet::Pluto => "Pluto",
        }
    }

    /// Significance weight used by the strength formula.
    /// Luminaries and the slow movers dominate.
    pub fn weight(self) -> f64 {
        match self {
            Planet::Sun => 10.0,
            Planet::Moon => 9.0,
            Planet::Saturn => 9.0,
            Planet::Jupiter => 8.0,
            Planet::Venus => 7.0,
            Planet::Mars => 7.0,
            Planet::Pluto => 7.0,
            Planet::Mercury => 6.0,
            Planet::Uranus => 6.0,
            Planet::Neptune => 5.0,
        }
    }

    pub fn from_id(id: &str) -> Option<Planet> {
        let id = id.to_lowercase();
        Planet::ALL.into_iter().find(|p| p.id() == id)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Zodiac signs, Aries = index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Sign containing an ecliptic longitude (any real value, wrapped to 0-360).
    pub fn from_longitude(longitude: f64) -> Sign {
        let lon = normalize_longitude(longitude);
        Sign::ALL[((lon / 30.0) as usize) % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wrap any longitude into [0, 360).
pub fn normalize_longitude(longitude: f64) -> f64 {
    let lon = longitude.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if lon >= 360.0 {
        0.0
    } else {
        lon
    }
}

/// Planetary position data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub planet: Planet,
    /// Ecliptic longitude in degrees [0, 360)
    pub longitude: f64,
    pub sign: Sign,
    /// Degrees within the sign [0, 30)
    pub degree_in_sign: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
    pub retrograde: bool,
}

impl PlanetPosition {
    /// Build a position from a raw longitude, deriving sign and degree.
    pub fn new(planet: Planet, longitude: f64, speed: f64) -> Self {
        let longitude = normalize_longitude(longitude);
        let sign = Sign::from_longitude(longitude);
        Self {
            planet,
            longitude,
            sign,
            degree_in_sign: longitude - sign.index() as f64 * 30.0,
            speed,
            retrograde: speed < 0.0,
        }
    }
}

/// Positions of every body at one chart moment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionSet {
    planets: BTreeMap<Planet, PlanetPosition>,
}

impl PositionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, position: PlanetPosition) {
        self.planets.insert(position.planet, position);
    }

    pub fn get(&self, planet: Planet) -> Option<&PlanetPosition> {
        self.planets.get(&planet)
    }

    pub fn longitude(&self, planet: Planet) -> Option<f64> {
        self.get(planet).map(|p| p.longitude)
    }

    pub fn require(&self, planet: Planet) -> Result<&PlanetPosition, EphemerisError> {
        self.get(planet)
            .ok_or(EphemerisError::IncompletePositions { missing: vec![planet] })
    }

    /// Iterate in canonical body order.
    pub fn iter(&self) -> impl Iterator<Item = &PlanetPosition> {
        self.planets.values()
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    pub fn missing(&self) -> Vec<Planet> {
        Planet::ALL
            .into_iter()
            .filter(|p| !self.planets.contains_key(p))
            .collect()
    }

    /// Partial position sets are not a supported contract.
    pub fn ensure_complete(self) -> Result<Self, EphemerisError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(self)
        } else {
            Err(EphemerisError::IncompletePositions { missing })
        }
    }
}

impl FromIterator<PlanetPosition> for PositionSet {
    fn from_iter<I: IntoIterator<Item = PlanetPosition>>(iter: I) -> Self {
        let mut set = PositionSet::new();
        for position in iter {
            set.insert(position);
        }
        set
    }
}

/// House system used for cusp calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

impl HouseSystem {
    /// Swiss Ephemeris house system code
    pub fn code(self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::Koch => b'K',
            HouseSystem::Equal => b'E',
            HouseSystem::WholeSign => b'W',
            HouseSystem::Regiomontanus => b'R',
            HouseSystem::Campanus => b'C',
            HouseSystem::Alcabitius => b'A',
            HouseSystem::Morinus => b'M',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// House number 1-12
    pub house: u8,
    pub longitude: f64,
    pub sign: Sign,
}

/// House cusps and angles for one chart moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseSet {
    pub system: HouseSystem,
    /// Twelve cusps ordered by house number
    pub cusps: Vec<HouseCusp>,
    pub ascendant: f64,
    pub midheaven: f64,
}

impl HouseSet {
    /// Build from twelve raw cusp longitudes (house 1 first).
    pub fn from_cusps(
        system: HouseSystem,
        cusps: [f64; 12],
        ascendant: f64,
        midheaven: f64,
    ) -> Self {
        let cusps = cusps
            .iter()
            .enumerate()
            .map(|(i, &lon)| {
                let longitude = normalize_longitude(lon);
                HouseCusp {
                    house: (i + 1) as u8,
                    longitude,
                    sign: Sign::from_longitude(longitude),
                }
            })
            .collect();
        Self {
            system,
            cusps,
            ascendant: normalize_longitude(ascendant),
            midheaven: normalize_longitude(midheaven),
        }
    }

    pub fn ascendant_sign(&self) -> Sign {
        Sign::from_longitude(self.ascendant)
    }

    pub fn cusp(&self, house: u8) -> Option<&HouseCusp> {
        self.cusps.iter().find(|c| c.house == house)
    }

    /// House containing `longitude`. Each house runs from its cusp up to
    /// (not including) the next cusp, across the 360/0 seam.
    pub fn house_of(&self, longitude: f64) -> Option<u8> {
        if self.cusps.len() != 12 {
            return None;
        }
        let lon = normalize_longitude(longitude);
        for (i, cusp) in self.cusps.iter().enumerate() {
            let next = &self.cusps[(i + 1) % 12];
            let span = (next.longitude - cusp.longitude).rem_euclid(360.0);
            let offset = (lon - cusp.longitude).rem_euclid(360.0);
            if offset < span {
                return Some(cusp.house);
            }
        }
        None
    }
}

/// Lunar phase derived from the Sun-Moon elongation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonPhase {
    pub phase_name: String,
    pub illumination_percent: f64,
    /// Moon longitude minus Sun longitude, [0, 360)
    pub elongation: f64,
}

const PHASE_NAMES: &[&str] = &[
    "New Moon",
    "Waxing Crescent",
    "First Quarter",
    "Waxing Gibbous",
    "Full Moon",
    "Waning Gibbous",
    "Last Quarter",
    "Waning Crescent",
];

impl MoonPhase {
    pub fn from_longitudes(sun: f64, moon: f64) -> Self {
        let elongation = normalize_longitude(moon - sun);
        let bucket = (((elongation + 22.5) / 45.0).floor() as usize) % 8;
        let illumination = (1.0 - elongation.to_radians().cos()) / 2.0 * 100.0;
        Self {
            phase_name: PHASE_NAMES[bucket].to_string(),
            illumination_percent: illumination,
            elongation,
        }
    }
}
