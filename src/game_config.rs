use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{game::Player, robot::Robot};

/// Default odds of the evil robot stealing a chip instead of playing.
pub const DEFAULT_STEAL_ONE_IN: u32 = 10;

/// Who plays the second seat.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    /// Two humans sharing the same computer.
    #[default]
    Local,
    Robot,
    /// The robot sometimes steals a chip instead of playing.
    EvilRobot,
}

/// Settings used for starting a new game.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub starting_player: Player,
    pub steal_one_in: u32,
}

/// Same as `GameConfig`, all fields are optional.
#[derive(Clone, Default, Debug)]
pub struct PartialGameConfig {
    pub mode: Option<GameMode>,
    pub starting_player: Option<Player>,
    pub steal_one_in: Option<u32>,
}

impl GameConfig {
    /// Create a new `GameConfig` with values copied from `PartialGameConfig`,
    /// where possible. If a value is missing, default value will be used instead.
    #[must_use]
    pub fn from_partial(partial: &PartialGameConfig) -> Self {
        let mut cfg = Self::default();
        cfg.apply_partial(partial);
        cfg
    }

    /// Overwrites any settings contained within a `PartialGameConfig`.
    pub fn apply_partial(&mut self, partial: &PartialGameConfig) {
        if let Some(mode) = partial.mode {
            self.mode = mode;
        }
        if let Some(starting_player) = partial.starting_player {
            self.starting_player = starting_player;
        }
        if let Some(steal_one_in) = partial.steal_one_in {
            self.steal_one_in = steal_one_in;
        }
    }

    /// The automated opponent for this mode. It always takes the second seat.
    #[must_use]
    pub fn robot(&self) -> Option<Robot> {
        match self.mode {
            GameMode::Local => None,
            GameMode::Robot => Some(Robot::new(Player::P2)),
            GameMode::EvilRobot => Some(Robot::evil(Player::P2, self.steal_one_in)),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            starting_player: Player::P1,
            steal_one_in: DEFAULT_STEAL_ONE_IN,
        }
    }
}

impl From<PartialGameConfig> for GameConfig {
    fn from(partial: PartialGameConfig) -> Self {
        Self::from_partial(&partial)
    }
}

impl From<GameConfig> for PartialGameConfig {
    fn from(config: GameConfig) -> Self {
        Self {
            mode: Some(config.mode),
            starting_player: Some(config.starting_player),
            steal_one_in: Some(config.steal_one_in),
        }
    }
}

impl GameMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Robot => "robot",
            Self::EvilRobot => "evilRobot",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct ParseGameModeError(String);

impl fmt::Display for ParseGameModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown game mode '{}', expected local, robot or evilRobot",
            self.0
        )
    }
}

impl Error for ParseGameModeError {}

impl FromStr for GameMode {
    type Err = ParseGameModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "local" => Ok(Self::Local),
            "robot" => Ok(Self::Robot),
            "evilrobot" | "evil" => Ok(Self::EvilRobot),
            _ => Err(ParseGameModeError(s.to_owned())),
        }
    }
}
