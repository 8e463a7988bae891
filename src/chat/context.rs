//! What a chat surface tells the backend about itself.

use crate::api::Driver;
use crate::session::SessionScope;

/// The surface a chat panel is mounted on.
///
/// Determines the session id prefix and the free-form context string sent
/// with every message. The backend treats the context as prose; there is no
/// schema behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatContext {
    General,
    Driver {
        driver_id: String,
        name: String,
        team: String,
    },
    Team {
        name: String,
    },
}

impl ChatContext {
    pub fn for_driver(driver: &Driver) -> Self {
        Self::Driver {
            driver_id: driver.driver_id.clone(),
            name: driver.name.clone(),
            team: driver.team.clone(),
        }
    }

    pub fn for_team(name: impl Into<String>) -> Self {
        Self::Team { name: name.into() }
    }

    pub fn scope(&self) -> SessionScope {
        match self {
            Self::General => SessionScope::PitWall,
            Self::Driver { driver_id, .. } => SessionScope::Driver(driver_id.clone()),
            Self::Team { name } => SessionScope::Team(name.clone()),
        }
    }

    /// Context string attached to each request.
    pub fn describe(&self) -> String {
        match self {
            Self::General => "General F1 analysis and strategy discussion".to_string(),
            Self::Driver { name, team, .. } => format!("Driver analysis for {name} ({team})"),
            Self::Team { name } => format!("Team analysis for {name}"),
        }
    }

    /// Greeting shown while the transcript is still empty.
    pub fn welcome(&self) -> String {
        match self {
            Self::General => "Welcome to the Pit Wall AI! Ask about race strategy, driver and \
                              team performance, championship predictions or technical regulations."
                .to_string(),
            Self::Driver { name, .. } => format!(
                "Ask me anything about {name}'s performance, race strategy, or F1 analytics!"
            ),
            Self::Team { name } => format!(
                "Ask me anything about {name}'s strategy, car development, or driver lineup!"
            ),
        }
    }
}

/// Canned questions offered on the general pit wall: `(label, question)`.
pub const SAMPLE_QUESTIONS: [(&str, &str); 5] = [
    (
        "Championship leader analysis",
        "Who is leading the championship and by how many points?",
    ),
    (
        "Spa tire strategy",
        "What's the best tire strategy for Spa-Francorchamps?",
    ),
    (
        "Team comparison",
        "Compare McLaren vs Ferrari performance this season",
    ),
    (
        "Technical regulations",
        "Analyze the impact of the 2025 regulation changes",
    ),
    (
        "Season predictions",
        "Predict the top 5 championship finishers",
    ),
];

/// Look up a sample question by its 1-based number.
pub fn sample_question(number: usize) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|i| SAMPLE_QUESTIONS.get(i))
        .map(|(_, question)| *question)
}
