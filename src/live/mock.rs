//! Placeholder race data.
//!
//! There is no live-timing ingestion behind pitwall. Everything the live
//! dashboard and the detail analytics panels show comes from this
//! generator, which draws from a caller-supplied RNG. Tests seed it with
//! `StdRng::seed_from_u64`; the binary uses entropy.

use chrono::{DateTime, Timelike, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::api::Driver;
use crate::teams::Team;

/// One slot of the fixed starting order: `(position, code, driver_id, team)`.
type GridSlot = (u32, &'static str, &'static str, &'static str);

/// The simulated field, in running order.
pub const GRID: [GridSlot; 20] = [
    (1, "VER", "verstappen", "Red Bull Racing"),
    (2, "HAM", "hamilton", "Ferrari"),
    (3, "NOR", "norris", "McLaren"),
    (4, "PIA", "piastri", "McLaren"),
    (5, "LEC", "leclerc", "Ferrari"),
    (6, "RUS", "russell", "Mercedes"),
    (7, "ANT", "antonelli", "Mercedes"),
    (8, "TSU", "tsunoda", "Red Bull Racing"),
    (9, "ALO", "alonso", "Aston Martin"),
    (10, "STR", "stroll", "Aston Martin"),
    (11, "GAS", "gasly", "Alpine F1 Team"),
    (12, "DOO", "doohan", "Alpine F1 Team"),
    (13, "HAD", "hadjar", "RB F1 Team"),
    (14, "LAW", "lawson", "RB F1 Team"),
    (15, "BEA", "bearman", "Haas F1 Team"),
    (16, "COL", "colapinto", "Haas F1 Team"),
    (17, "ALB", "albon", "Williams"),
    (18, "SAI", "sainz", "Williams"),
    (19, "HUL", "hulkenberg", "Kick Sauber"),
    (20, "BOR", "bortoleto", "Kick Sauber"),
];

pub const RADIO_MESSAGES: [(&str, &str); 15] = [
    ("VER", "Box this lap, box box!"),
    ("HAM", "Ferrari feels amazing, great balance."),
    ("NOR", "DRS not working properly."),
    ("PIA", "Traffic ahead, losing time."),
    ("LEC", "Push now, we can catch them."),
    ("RUS", "These mediums are dropping off."),
    ("ANT", "Learning the car, feeling good."),
    ("TSU", "Red Bull car feels great today."),
    ("ALO", "Strategy looking good from here."),
    ("GAS", "Alpine pace is strong today."),
    ("SAI", "Williams setup working well."),
    ("BEA", "First season going well so far."),
    ("HUL", "Kick Sauber feeling competitive."),
    ("BOR", "Great to be racing in F1."),
    ("COL", "Haas car balance is good."),
];

pub const RACE_UPDATES: [&str; 8] = [
    "Race started under green flag conditions",
    "Virtual Safety Car deployed",
    "DRS enabled for all drivers",
    "Weather update: Clear conditions expected",
    "Track conditions improving",
    "Rain expected in 10 minutes",
    "Safety Car deployed",
    "Race resumed",
];

pub const RACE_NAME: &str = "BELGIAN GRAND PRIX";
pub const CIRCUIT_NAME: &str = "SPA-FRANCORCHAMPS";

// ---------------------------------------------------------------------------
// Frame types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    S1,
    S2,
    S3,
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::S1 => write!(f, "S1"),
            Self::S2 => write!(f, "S2"),
            Self::S3 => write!(f, "S3"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LivePosition {
    pub pos: u32,
    pub code: &'static str,
    pub driver_id: &'static str,
    pub team: &'static str,
    /// Interval to the leader, `+0.000` for P1.
    pub gap: String,
    pub last_lap: String,
    pub sector: Sector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Telemetry {
    pub speed_kph: u32,
    pub gear: u8,
    pub rpm: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weather {
    pub air_temp_c: u32,
    pub track_temp_c: u32,
    pub humidity_pct: u32,
    pub wind_kph: u32,
}

/// Everything refreshed on the positions tick.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveFrame {
    pub session_time: String,
    pub positions: Vec<LivePosition>,
    /// Telemetry in running order, keyed by driver code.
    pub telemetry: Vec<(&'static str, Telemetry)>,
    pub weather: Weather,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadioMessage {
    pub code: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaceUpdate {
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Analytics panels
// ---------------------------------------------------------------------------

/// Placeholder numbers for the driver detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverAnalytics {
    pub avg_laptime: String,
    pub avg_position: u32,
    pub fastest_lap: String,
    pub best_finish: u32,
    pub best_qualifying: u32,
    pub circuit_podiums: u32,
    pub race_wins: u32,
    pub podiums: u32,
    pub fastest_laps: u32,
    pub points_per_race: f64,
    /// Five-race form, each 20..=100.
    pub form: [u32; 5],
    pub insight: String,
}

/// Placeholder numbers for the team detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamAnalytics {
    pub avg_laptime: String,
    pub avg_position: u32,
    pub fastest_lap: String,
    pub best_finish: u32,
    pub best_qualifying: u32,
    pub circuit_wins: u32,
    pub wins: u32,
    pub podiums: u32,
    pub fastest_laps: u32,
    pub points_per_race: f64,
    /// `(driver name, share of team points in percent)`.
    pub points_share: Vec<(String, f64)>,
    pub insight: String,
}

/// Races per season used for per-race averages.
const SEASON_RACES: f64 = 20.0;

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Generator of placeholder race data.
#[derive(Debug)]
pub struct MockFeed<R: Rng = StdRng> {
    rng: R,
}

impl MockFeed<StdRng> {
    /// Deterministic feed for tests and reproducible demos.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> MockFeed<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Positions, telemetry and weather for one refresh.
    pub fn frame(&mut self, now: DateTime<Utc>) -> LiveFrame {
        let positions = GRID
            .iter()
            .map(|&(pos, code, driver_id, team)| LivePosition {
                pos,
                code,
                driver_id,
                team,
                gap: self.gap(pos),
                last_lap: format!("1:2{}.{:03}", self.rng.gen_range(3..=9), self.millis()),
                sector: self.sector(),
            })
            .collect();

        let telemetry = GRID
            .iter()
            .map(|&(_, code, _, _)| (code, self.telemetry(code)))
            .collect();

        let weather = Weather {
            air_temp_c: self.rng.gen_range(20..30),
            track_temp_c: self.rng.gen_range(35..50),
            humidity_pct: self.rng.gen_range(40..70),
            wind_kph: self.rng.gen_range(5..25),
        };

        LiveFrame {
            session_time: session_clock(now),
            positions,
            telemetry,
            weather,
        }
    }

    pub fn radio(&mut self, now: DateTime<Utc>) -> RadioMessage {
        let (code, message) = *RADIO_MESSAGES
            .choose(&mut self.rng)
            .unwrap_or(&RADIO_MESSAGES[0]);
        RadioMessage {
            code,
            message,
            timestamp: now,
        }
    }

    pub fn race_update(&mut self, now: DateTime<Utc>) -> RaceUpdate {
        let message = *RACE_UPDATES
            .choose(&mut self.rng)
            .unwrap_or(&RACE_UPDATES[0]);
        RaceUpdate {
            message,
            timestamp: now,
        }
    }

    pub fn driver_analytics(&mut self, driver: &Driver) -> DriverAnalytics {
        let pos = driver.position;
        let front_runner = pos <= 5;
        DriverAnalytics {
            avg_laptime: format!("1:44.{:03}", self.millis()),
            avg_position: (pos / 2 + self.rng.gen_range(0..3)).max(1),
            fastest_lap: format!("1:41.{:03}", self.millis()),
            best_finish: pos.saturating_sub(self.rng.gen_range(0..5)).max(1),
            best_qualifying: pos.saturating_sub(self.rng.gen_range(0..7)).max(1),
            circuit_podiums: if front_runner {
                self.rng.gen_range(1..=3)
            } else {
                self.rng.gen_range(0..=1)
            },
            race_wins: if front_runner {
                self.rng.gen_range(1..=3)
            } else {
                0
            },
            podiums: if pos <= 10 {
                self.rng.gen_range(2..=9)
            } else {
                1
            },
            fastest_laps: self.rng.gen_range(0..=4),
            points_per_race: driver.points / SEASON_RACES,
            form: std::array::from_fn(|_| self.rng.gen_range(20..=100)),
            insight: format!(
                "{} has shown {} this season. The long straights and high-speed corners \
                 at {} suit {}.",
                driver.name,
                if front_runner {
                    "exceptional pace and consistency"
                } else {
                    "steady improvement"
                },
                title_case(CIRCUIT_NAME),
                if pos <= 10 {
                    "a strong result"
                } else {
                    "a points-scoring opportunity"
                },
            ),
        }
    }

    pub fn team_analytics(&mut self, team: &Team) -> TeamAnalytics {
        let best = team.best_position().unwrap_or(u32::MAX);
        let total = team.points();
        let member_count = team.drivers.len().max(1) as u64;
        let position_sum: u64 = team.drivers.iter().map(|d| u64::from(d.position)).sum();
        let avg_position = (position_sum / member_count) as u32;

        TeamAnalytics {
            avg_laptime: format!("1:44.{:03}", self.millis()),
            avg_position,
            fastest_lap: format!("1:41.{:03}", self.millis()),
            best_finish: best.saturating_sub(1).max(1),
            best_qualifying: best.saturating_sub(2).max(1),
            circuit_wins: if best <= 3 { self.rng.gen_range(1..=3) } else { 0 },
            wins: if best <= 3 { self.rng.gen_range(1..=5) } else { 0 },
            podiums: if best <= 6 {
                self.rng.gen_range(3..=14)
            } else {
                self.rng.gen_range(0..=2)
            },
            fastest_laps: self.rng.gen_range(0..8),
            points_per_race: total / SEASON_RACES,
            points_share: team
                .drivers
                .iter()
                .map(|d| {
                    let share = if total > 0.0 { d.points / total * 100.0 } else { 0.0 };
                    (d.name.clone(), share)
                })
                .collect(),
            insight: format!(
                "{} has shown {} this season. At {}, the aero package and power unit \
                 should provide {}.",
                team.name,
                if best <= 5 {
                    "strong competitive pace"
                } else {
                    "steady development progress"
                },
                title_case(CIRCUIT_NAME),
                if best <= 8 {
                    "excellent straight-line speed"
                } else {
                    "good opportunities for points"
                },
            ),
        }
    }

    fn gap(&mut self, pos: u32) -> String {
        if pos == 1 {
            "+0.000".to_string()
        } else {
            let gap = self.rng.gen_range(0.0..10.0) + f64::from(pos) * 0.8;
            format!("+{gap:.3}")
        }
    }

    fn sector(&mut self) -> Sector {
        match self.rng.gen_range(0..3) {
            0 => Sector::S1,
            1 => Sector::S2,
            _ => Sector::S3,
        }
    }

    fn telemetry(&mut self, code: &str) -> Telemetry {
        let tow = if code == "VER" { 30 } else { 0 };
        Telemetry {
            speed_kph: self.rng.gen_range(250..300) + tow,
            gear: self.rng.gen_range(2..8),
            rpm: self.rng.gen_range(9000..12000),
        }
    }

    fn millis(&mut self) -> u32 {
        self.rng.gen_range(0..999)
    }
}

/// `MM:SS` within the current hour.
pub fn session_clock(now: DateTime<Utc>) -> String {
    format!("{:02}:{:02}", now.minute(), now.second())
}

fn title_case(upper: &str) -> String {
    upper
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
