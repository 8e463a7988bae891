//! Constructors derived from the driver standings.
//!
//! The backend has no team entity. Teams are formed at render time by
//! grouping drivers on an exact match of their `team` string. Groups appear
//! in the order their first driver appears in the standings, and drivers
//! keep their standings order inside a group.

use std::collections::HashMap;

use crate::api::Driver;
use crate::config::schema::DisplayConfig;

/// Drivers sharing one team name.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub name: String,
    pub drivers: Vec<Driver>,
}

impl Team {
    pub fn points(&self) -> f64 {
        self.drivers.iter().map(|d| d.points).sum()
    }

    /// Championship position of the team's best-placed driver.
    pub fn best_position(&self) -> Option<u32> {
        self.drivers.iter().map(|d| d.position).min()
    }
}

/// Partition the standings into teams.
///
/// Every driver lands in exactly one group.
pub fn group_by_team(drivers: &[Driver]) -> Vec<Team> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut teams: Vec<Team> = Vec::new();

    for driver in drivers {
        let slot = *index.entry(driver.team.as_str()).or_insert_with(|| {
            teams.push(Team {
                name: driver.team.clone(),
                drivers: Vec::new(),
            });
            teams.len() - 1
        });
        teams[slot].drivers.push(driver.clone());
    }

    teams
}

/// Drivers of one team, in standings order.
pub fn find_team(drivers: &[Driver], name: &str) -> Option<Team> {
    let members: Vec<Driver> = drivers.iter().filter(|d| d.team == name).cloned().collect();
    (!members.is_empty()).then(|| Team {
        name: name.to_string(),
        drivers: members,
    })
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// RGB color of a team's livery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Teal used for teams the palette does not know.
pub const DEFAULT_TEAM_COLOR: Rgb = Rgb(0x00, 0xD2, 0xBE);

/// Team name → livery color lookup, owned by whoever renders.
#[derive(Debug, Clone)]
pub struct TeamPalette {
    colors: HashMap<String, Rgb>,
}

impl Default for TeamPalette {
    fn default() -> Self {
        let colors = [
            ("Red Bull Racing", Rgb(0x1E, 0x3A, 0x8A)),
            ("Mercedes", Rgb(0x00, 0xD2, 0xBE)),
            ("Ferrari", Rgb(0xDC, 0x14, 0x3C)),
            ("McLaren", Rgb(0xFF, 0x87, 0x00)),
            ("Aston Martin", Rgb(0x00, 0x6F, 0x62)),
            ("Alpine F1 Team", Rgb(0x00, 0x90, 0xFF)),
            ("Williams", Rgb(0x00, 0x5A, 0xFF)),
            ("RB F1 Team", Rgb(0x66, 0x92, 0xFF)),
            ("Kick Sauber", Rgb(0x00, 0xE7, 0x01)),
            ("Haas F1 Team", Rgb(0xFF, 0xFF, 0xFF)),
        ]
        .into_iter()
        .map(|(name, rgb)| (name.to_string(), rgb))
        .collect();
        Self { colors }
    }
}

impl TeamPalette {
    /// Built-in liveries plus the `[display.team_colors]` overrides.
    /// Entries that are not `#RRGGBB` are skipped.
    pub fn from_config(display: &DisplayConfig) -> Self {
        let mut palette = Self::default();
        for (team, hex) in &display.team_colors {
            if let Some(rgb) = Rgb::from_hex(hex) {
                palette.colors.insert(team.clone(), rgb);
            }
        }
        palette
    }

    pub fn color_for(&self, team: &str) -> Rgb {
        self.colors.get(team).copied().unwrap_or(DEFAULT_TEAM_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn driver(id: &str, team: &str, position: u32, points: f64) -> Driver {
        Driver {
            driver_id: id.into(),
            name: id.to_uppercase(),
            team: team.into(),
            position,
            points,
            nationality: None,
            number: None,
        }
    }

    fn grid() -> Vec<Driver> {
        vec![
            driver("piastri", "McLaren", 1, 284.0),
            driver("norris", "McLaren", 2, 275.0),
            driver("verstappen", "Red Bull Racing", 3, 187.0),
            driver("russell", "Mercedes", 4, 172.0),
            driver("leclerc", "Ferrari", 5, 151.0),
            driver("hamilton", "Ferrari", 6, 109.0),
            driver("antonelli", "Mercedes", 7, 64.0),
            driver("tsunoda", "Red Bull Racing", 17, 10.0),
        ]
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let teams = group_by_team(&grid());
        let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["McLaren", "Red Bull Racing", "Mercedes", "Ferrari"]);

        let ferrari: Vec<&str> = teams[3].drivers.iter().map(|d| d.driver_id.as_str()).collect();
        assert_eq!(ferrari, ["leclerc", "hamilton"]);
    }

    #[test]
    fn grouping_is_a_partition() {
        let drivers = grid();
        let teams = group_by_team(&drivers);

        let grouped: Vec<&str> = teams
            .iter()
            .flat_map(|t| t.drivers.iter().map(|d| d.driver_id.as_str()))
            .collect();
        let unique: HashSet<&str> = grouped.iter().copied().collect();
        assert_eq!(grouped.len(), drivers.len());
        assert_eq!(unique.len(), drivers.len());
        for team in &teams {
            assert!(team.drivers.iter().all(|d| d.team == team.name));
        }
    }

    #[test]
    fn team_names_match_exactly() {
        let drivers = vec![
            driver("a", "Haas F1 Team", 1, 1.0),
            driver("b", "Haas F1 team", 2, 1.0),
            driver("c", "Haas F1 Team ", 3, 1.0),
        ];
        assert_eq!(group_by_team(&drivers).len(), 3);
    }

    #[test]
    fn empty_standings_give_no_teams() {
        assert!(group_by_team(&[]).is_empty());
    }

    #[test]
    fn team_points_and_best_position() {
        let teams = group_by_team(&grid());
        let red_bull = &teams[1];
        assert_eq!(red_bull.points(), 197.0);
        assert_eq!(red_bull.best_position(), Some(3));
    }

    #[test]
    fn find_team_filters_by_name() {
        let mercedes = find_team(&grid(), "Mercedes").unwrap();
        assert_eq!(mercedes.drivers.len(), 2);
        assert!(find_team(&grid(), "Brawn GP").is_none());
    }

    #[test]
    fn palette_lookup_and_default() {
        let palette = TeamPalette::default();
        assert_eq!(palette.color_for("Ferrari"), Rgb(0xDC, 0x14, 0x3C));
        assert_eq!(palette.color_for("Brawn GP"), DEFAULT_TEAM_COLOR);
    }

    #[test]
    fn palette_applies_config_overrides() {
        let mut display = DisplayConfig::default();
        display
            .team_colors
            .insert("Cadillac".into(), "#C0C0C0".into());
        display.team_colors.insert("Ferrari".into(), "#FF0000".into());
        display.team_colors.insert("Williams".into(), "blue".into());

        let palette = TeamPalette::from_config(&display);
        assert_eq!(palette.color_for("Cadillac"), Rgb(0xC0, 0xC0, 0xC0));
        assert_eq!(palette.color_for("Ferrari"), Rgb(0xFF, 0x00, 0x00));
        assert_eq!(palette.color_for("Williams"), Rgb(0x00, 0x5A, 0xFF));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex("#FF8700"), Some(Rgb(0xFF, 0x87, 0x00)));
        assert_eq!(Rgb::from_hex("FF8700"), None);
        assert_eq!(Rgb::from_hex("#FF87"), None);
        assert_eq!(Rgb::from_hex("#GG8700"), None);
    }
}
