//! Static interpretation text, keyed by enumerated bodies, aspects, signs
//! and houses.

use crate::aspects::AspectKind;
use crate::calculators::ProgressionIntensity;
use crate::ephemeris::{Planet, Sign};

pub const GENERIC_ADVICE: &str = "Be mindful of life's changes and stay flexible";

pub fn planet_influence(planet: Planet) -> &'static str {
    match planet {
        Planet::Sun => "identity, vitality and life purpose",
        Planet::Moon => "emotions, instincts and home life",
        Planet::Mercury => "communication, thinking and short journeys",
        Planet::Venus => "love, beauty, pleasure and money",
        Planet::Mars => "energy, drive, courage and conflict",
        Planet::Jupiter => "growth, expansion, luck and opportunity",
        Planet::Saturn => "structure, discipline, limits and responsibility",
        Planet::Uranus => "sudden change, freedom and innovation",
        Planet::Neptune => "intuition, dreams, spirituality and illusion",
        Planet::Pluto => "deep transformation, power and rebirth",
    }
}

pub fn aspect_nature(aspect: AspectKind) -> &'static str {
    match aspect {
        AspectKind::Conjunction => "intense, concentrated energy",
        AspectKind::Sextile => "harmonious opportunity",
        AspectKind::Square => "tension and challenge",
        AspectKind::Trine => "favorable flow",
        AspectKind::Opposition => "polarization, balance is needed",
    }
}

/// Advice for specific (transiting body, aspect) pairs. Pairs not listed
/// fall back to [`GENERIC_ADVICE`].
const ADVICE: &[(Planet, AspectKind, &str)] = &[
    (
        Planet::Sun,
        AspectKind::Conjunction,
        "Put yourself forward; personal initiatives are well lit",
    ),
    (Planet::Sun, AspectKind::Square, "Avoid ego clashes and pace your energy"),
    (Planet::Sun, AspectKind::Trine, "Show your talents, recognition comes easily"),
    (Planet::Sun, AspectKind::Opposition, "Seek balance between your needs and those of others"),
    (Planet::Moon, AspectKind::Conjunction, "Listen to your feelings and take care of your home"),
    (Planet::Moon, AspectKind::Square, "Do not make decisions on emotional impulse"),
    (Planet::Moon, AspectKind::Trine, "Trust your intuition and spend time with family"),
    (Planet::Mercury, AspectKind::Conjunction, "A good time for negotiations and paperwork"),
    (Planet::Mercury, AspectKind::Square, "Double-check documents and choose words carefully"),
    (Planet::Mercury, AspectKind::Sextile, "Reach out, learn something new, make contacts"),
    (Planet::Venus, AspectKind::Conjunction, "Open your heart to love and beauty"),
    (Planet::Venus, AspectKind::Trine, "Enjoy pleasures, relationships flow naturally"),
    (Planet::Venus, AspectKind::Square, "Watch spending and avoid jealousy"),
    (Planet::Mars, AspectKind::Conjunction, "Channel the surge of energy into decisive action"),
    (Planet::Mars, AspectKind::Square, "Avoid conflicts and haste; exercise helps release tension"),
    (Planet::Mars, AspectKind::Opposition, "Do not provoke confrontations, compromise wins"),
    (Planet::Mars, AspectKind::Trine, "Act boldly, your efforts are rewarded"),
    (Planet::Jupiter, AspectKind::Conjunction, "Expand your horizons and accept opportunities"),
    (Planet::Jupiter, AspectKind::Trine, "A lucky time for growth, study and travel"),
    (Planet::Jupiter, AspectKind::Sextile, "Say yes to offers that broaden your world"),
    (Planet::Jupiter, AspectKind::Square, "Do not overpromise or overspend"),
    (Planet::Saturn, AspectKind::Conjunction, "Take responsibility and build solid foundations"),
    (Planet::Saturn, AspectKind::Square, "Be patient; obstacles reveal what needs restructuring"),
    (Planet::Saturn, AspectKind::Opposition, "Review commitments and set healthy boundaries"),
    (Planet::Saturn, AspectKind::Trine, "Long-term plans gain stable support"),
    (Planet::Uranus, AspectKind::Conjunction, "Welcome the unexpected and try new approaches"),
    (Planet::Uranus, AspectKind::Square, "Stay flexible, sudden changes are likely"),
    (Planet::Neptune, AspectKind::Conjunction, "Trust intuition but keep your feet on the ground"),
    (Planet::Neptune, AspectKind::Square, "Avoid illusions and check facts twice"),
    (Planet::Pluto, AspectKind::Conjunction, "Let go of what has outlived itself"),
    (Planet::Pluto, AspectKind::Square, "Do not resist transformation, avoid power struggles"),
];

/// `None` when the pair has no dedicated advice.
pub fn specific_advice(planet: Planet, aspect: AspectKind) -> Option<&'static str> {
    ADVICE
        .iter()
        .find(|(p, a, _)| *p == planet && *a == aspect)
        .map(|(_, _, advice)| *advice)
}

/// Thematic focus of a house in a return chart, houses 1-12.
const HOUSE_THEMES: [&str; 12] = [
    "personality, self-image and new beginnings",
    "finances, possessions and personal values",
    "communication, learning and close surroundings",
    "home, family and emotional foundations",
    "creativity and self-expression",
    "work, daily routine and health",
    "partnerships and close relationships",
    "transformation, shared resources and intimacy",
    "travel, higher education and worldview",
    "career, status and public achievement",
    "friends, groups and hopes for the future",
    "inner life, solitude and spiritual growth",
];

pub fn house_theme(house: u8) -> Option<&'static str> {
    match house {
        1..=12 => Some(HOUSE_THEMES[(house - 1) as usize]),
        _ => None,
    }
}

/// Emotional tone of the month, keyed by the lunar-return Moon sign.
pub fn moon_sign_theme(sign: Sign) -> &'static str {
    match sign {
        Sign::Aries => "an impulsive, energetic month for new emotional starts",
        Sign::Taurus => "a calm month seeking comfort, stability and sensual pleasure",
        Sign::Gemini => "a lively month of conversations, curiosity and changing moods",
        Sign::Cancer => "a sensitive month centred on home, family and care",
        Sign::Leo => "a warm month wanting recognition, romance and creative play",
        Sign::Virgo => "a practical month for order, health and useful work",
        Sign::Libra => "a month focused on relationships, harmony and beauty",
        Sign::Scorpio => "an intense month of deep feelings and inner change",
        Sign::Sagittarius => "an optimistic month of adventure, learning and freedom",
        Sign::Capricorn => "a serious month of ambition, duty and emotional restraint",
        Sign::Aquarius => "an independent month of friendship, ideas and detachment",
        Sign::Pisces => "a dreamy month of intuition, compassion and retreat",
    }
}

/// How the year presents itself, keyed by the return-chart Ascendant sign.
pub fn ascendant_tone(sign: Sign) -> &'static str {
    match sign {
        Sign::Aries => "approached with initiative and courage",
        Sign::Taurus => "approached steadily and practically",
        Sign::Gemini => "approached with curiosity and versatility",
        Sign::Cancer => "approached with care and sensitivity",
        Sign::Leo => "approached with confidence and generosity",
        Sign::Virgo => "approached with precision and modesty",
        Sign::Libra => "approached diplomatically, through partnership",
        Sign::Scorpio => "approached with intensity and determination",
        Sign::Sagittarius => "approached with optimism and a wide view",
        Sign::Capricorn => "approached with discipline and patience",
        Sign::Aquarius => "approached with originality and independence",
        Sign::Pisces => "approached with intuition and openness",
    }
}

/// Meaning of a progressed body's movement, by intensity.
pub fn progression_text(planet: Planet, intensity: ProgressionIntensity) -> &'static str {
    const SUN: [&str; 3] = [
        "Your core identity is steady",
        "Your sense of self is gradually maturing",
        "Your life direction is actively evolving",
    ];
    const MOON: [&str; 3] = [
        "Emotional needs remain familiar",
        "Emotional needs are shifting",
        "A new emotional chapter is unfolding",
    ];
    const MERCURY: [&str; 3] = [
        "Your way of thinking is consistent",
        "Your thinking is developing new patterns",
        "Your mind and communication style are transforming",
    ];
    const VENUS: [&str; 3] = [
        "Values and affections are settled",
        "Tastes and relationship needs are changing",
        "Love life and values are undergoing renewal",
    ];
    const MARS: [&str; 3] = [
        "Your drive keeps its familiar rhythm",
        "Your ambitions are taking a new shape",
        "Your energy and goals are strongly redirected",
    ];
    const OTHER: [&str; 3] = [
        "Little change in this area",
        "Gradual change in this area",
        "Significant change in this area",
    ];

    let table = match planet {
        Planet::Sun => &SUN,
        Planet::Moon => &MOON,
        Planet::Mercury => &MERCURY,
        Planet::Venus => &VENUS,
        Planet::Mars => &MARS,
        _ => &OTHER,
    };
    match intensity {
        ProgressionIntensity::Stable => table[0],
        ProgressionIntensity::Moderate => table[1],
        ProgressionIntensity::Active => table[2],
    }
}
