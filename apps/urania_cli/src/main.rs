use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use urania::ephemeris::{HouseSystem, MoonPhase};
use urania::{
    BirthData, CalculationOutcome, EngineSettings, GeoLocation, ReturnSearch,
    SwissEphemerisAdapter, TransitEngine,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HouseSystemArg {
    Placidus,
    Koch,
    Equal,
    WholeSign,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

impl From<HouseSystemArg> for HouseSystem {
    fn from(arg: HouseSystemArg) -> Self {
        match arg {
            HouseSystemArg::Placidus => HouseSystem::Placidus,
            HouseSystemArg::Koch => HouseSystem::Koch,
            HouseSystemArg::Equal => HouseSystem::Equal,
            HouseSystemArg::WholeSign => HouseSystem::WholeSign,
            HouseSystemArg::Regiomontanus => HouseSystem::Regiomontanus,
            HouseSystemArg::Campanus => HouseSystem::Campanus,
            HouseSystemArg::Alcabitius => HouseSystem::Alcabitius,
            HouseSystemArg::Morinus => HouseSystem::Morinus,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SearchArg {
    /// Birthday anniversary (solar) or 29-day cycles (lunar).
    Anniversary,
    /// Bracketed bisection, refined to a minute.
    Bisection,
}

impl From<SearchArg> for ReturnSearch {
    fn from(arg: SearchArg) -> Self {
        match arg {
            SearchArg::Anniversary => ReturnSearch::Anniversary,
            SearchArg::Bisection => ReturnSearch::Bisection,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Config file (otherwise $URANIA_CONFIG, then configs/urania.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Swiss Ephemeris data directory override.
    #[arg(long, global = true)]
    ephemeris_path: Option<PathBuf>,

    #[arg(long, value_enum, global = true)]
    house_system: Option<HouseSystemArg>,

    /// Return search strategy override.
    #[arg(long, value_enum, global = true)]
    search: Option<SearchArg>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct BirthArgs {
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// Local birth time, HH:MM[:SS] (default from config, noon).
    #[arg(long)]
    time: Option<String>,

    /// Birth latitude in degrees, north positive.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Birth longitude in degrees, east positive.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Offset of the local birth time from UTC, in minutes.
    #[arg(long, allow_negative_numbers = true)]
    utc_offset: Option<i32>,
}

impl BirthArgs {
    fn to_birth_data(&self) -> anyhow::Result<BirthData> {
        let mut birth = BirthData::parse(&self.date, self.time.as_deref())?;
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            birth = birth.with_place(GeoLocation::new(lat, lon));
        }
        if let Some(minutes) = self.utc_offset {
            birth = birth.with_utc_offset(minutes);
        }
        Ok(birth)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Current transits against the natal chart.
    Transits {
        #[command(flatten)]
        birth: BirthArgs,
        /// Transit moment, RFC 3339 (default: now).
        #[arg(long)]
        at: Option<String>,
    },
    /// Secondary progressions to a target date.
    Progressions {
        #[command(flatten)]
        birth: BirthArgs,
        /// Target date, YYYY-MM-DD (default: today).
        #[arg(long)]
        target: Option<String>,
    },
    /// Solar return chart for a year.
    SolarReturn {
        #[command(flatten)]
        birth: BirthArgs,
        /// Target year (default: current year).
        #[arg(long)]
        year: Option<i32>,
    },
    /// Next lunar return at or after a moment.
    LunarReturn {
        #[command(flatten)]
        birth: BirthArgs,
        /// Search start, RFC 3339 (default: now).
        #[arg(long)]
        after: Option<String>,
    },
    /// Lunar phase at a moment.
    MoonPhase {
        /// RFC 3339 (default: now).
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Serialize)]
struct MoonPhaseReport {
    at: DateTime<Utc>,
    #[serde(flatten)]
    phase: MoonPhase,
}

fn parse_moment(text: Option<&str>) -> anyhow::Result<Option<DateTime<Utc>>> {
    text.map(|t| {
        DateTime::parse_from_rfc3339(t)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid RFC 3339 timestamp '{}'", t))
    })
    .transpose()
}

fn parse_target_date(text: Option<&str>) -> anyhow::Result<Option<NaiveDate>> {
    text.map(|t| urania::birth::parse_date(t).map_err(anyhow::Error::from))
        .transpose()
}

fn load_settings(cli: &Cli) -> anyhow::Result<EngineSettings> {
    let mut settings = match &cli.config {
        Some(path) => urania_config::load_engine_settings_from(path)?,
        None => urania_config::load_engine_settings_or_default()?,
    };
    if let Some(path) = &cli.ephemeris_path {
        settings.ephemeris_path = Some(path.clone());
    }
    if let Some(system) = cli.house_system {
        settings.house_system = system.into();
    }
    if let Some(search) = cli.search {
        settings.return_search = search.into();
    }
    Ok(settings)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", text);
    Ok(())
}

fn print_outcome<T: Serialize>(
    outcome: CalculationOutcome<T>,
    compact: bool,
) -> anyhow::Result<()> {
    print_json(&outcome, compact)?;
    if let CalculationOutcome::Failure(err) = outcome {
        anyhow::bail!(err);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    log::debug!("Engine settings: {:?}", settings);

    let adapter = SwissEphemerisAdapter::new(settings.ephemeris_path.clone(), settings.house_system)
        .context("Failed to initialise the Swiss Ephemeris")?;
    let engine = TransitEngine::new(adapter, settings);

    match &cli.command {
        Command::Transits { birth, at } => {
            let birth = birth.to_birth_data()?;
            let at = parse_moment(at.as_deref())?;
            print_outcome(engine.calculate_current_transits(&birth, at).into(), cli.compact)
        }
        Command::Progressions { birth, target } => {
            let birth = birth.to_birth_data()?;
            let target = parse_target_date(target.as_deref())?;
            print_outcome(engine.calculate_progressions(&birth, target).into(), cli.compact)
        }
        Command::SolarReturn { birth, year } => {
            let birth = birth.to_birth_data()?;
            print_outcome(engine.calculate_solar_return(&birth, *year).into(), cli.compact)
        }
        Command::LunarReturn { birth, after } => {
            let birth = birth.to_birth_data()?;
            let after = parse_moment(after.as_deref())?;
            print_outcome(engine.calculate_lunar_return(&birth, after).into(), cli.compact)
        }
        Command::MoonPhase { at } => {
            let at = parse_moment(at.as_deref())?.unwrap_or_else(Utc::now);
            let outcome = engine
                .moon_phase(Some(at))
                .map(|phase| MoonPhaseReport { at, phase });
            print_outcome(outcome.into(), cli.compact)
        }
    }
}
