use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use urania::EngineSettings;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "URANIA_CONFIG";

const CONFIG_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

/// Real-world UTC offsets run from -12:00 to +14:00.
const MIN_UTC_OFFSET_MINUTES: i32 = -12 * 60;
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    engine: Option<EngineSettings>,
}

/// `$URANIA_CONFIG` first, then the common relative paths used when running
/// from the workspace root or from inside a crate.
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(CONFIG_PATHS.len() + 1);
    if let Ok(path) = env::var(CONFIG_ENV) {
        candidates.push(PathBuf::from(path));
    }
    candidates.extend(CONFIG_PATHS.iter().map(PathBuf::from));
    candidates
}

pub fn find_config_path() -> Option<PathBuf> {
    config_candidates().into_iter().find(|p| p.is_file())
}

pub fn read_config_toml_text() -> anyhow::Result<String> {
    let candidates = config_candidates();
    for p in &candidates {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load urania.toml from {:?}", candidates);
}

/// Parse the `[engine]` table. A file without one yields the defaults.
pub fn parse_engine_settings(text: &str) -> anyhow::Result<EngineSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse urania.toml engine settings: {e}"))?;
    let settings = root.engine.unwrap_or_default();
    validate_engine_settings(&settings)?;
    Ok(settings)
}

pub fn validate_engine_settings(settings: &EngineSettings) -> anyhow::Result<()> {
    let location = settings.default_location;
    if !location.is_valid() {
        anyhow::bail!(
            "engine.default_location out of range: \
             lat {} (expected -90..90), lon {} (expected -180..180)",
            location.lat,
            location.lon
        );
    }
    let offset = settings.default_utc_offset_minutes;
    if !(MIN_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&offset) {
        anyhow::bail!(
            "engine.default_utc_offset_minutes out of range: {} (expected {}..={})",
            offset,
            MIN_UTC_OFFSET_MINUTES,
            MAX_UTC_OFFSET_MINUTES
        );
    }
    if let Some(path) = &settings.ephemeris_path {
        if !path.exists() {
            anyhow::bail!("engine.ephemeris_path does not exist: {}", path.display());
        }
    }
    Ok(())
}

pub fn load_engine_settings_from(path: &Path) -> anyhow::Result<EngineSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    parse_engine_settings(&text)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
}

pub fn load_engine_settings() -> anyhow::Result<EngineSettings> {
    let text = read_config_toml_text()?;
    parse_engine_settings(&text)
}

/// Like [`load_engine_settings`], but a missing file means defaults.
/// A file that exists and fails to parse or validate is still an error.
pub fn load_engine_settings_or_default() -> anyhow::Result<EngineSettings> {
    match find_config_path() {
        Some(path) => load_engine_settings_from(&path),
        None => Ok(EngineSettings::default()),
    }
}
