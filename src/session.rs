use log::{debug, error, info};
use rand::rngs::ThreadRng;
use serde::Serialize;

use crate::{
    game::{self, Board, Game, GameMatch, MoveError, Outcome, Player, TurnState},
    game_config::{GameConfig, GameMode},
    messages,
    robot::{RandomSource, RobotMove},
};

/// What happened during `Session::submit_move()`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveReport {
    /// The robot's opening move, when this call started the session.
    pub opening: Option<RobotMove>,
    /// Row the human chip landed on.
    pub result: Result<usize, MoveError>,
    /// The robot's reply, if it played.
    pub robot: Option<RobotMove>,
}

impl MoveReport {
    /// Whether the robot moved at all during this call.
    #[must_use]
    pub fn robot_played(&self) -> bool {
        self.opening.is_some() || self.robot.is_some()
    }
}

/// Read-only copy of the session, used for rendering.
#[derive(Clone, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub board: Board,
    pub state: TurnState,
    pub outcome: Outcome,
    pub message: String,
    pub started: bool,
    pub mode: GameMode,
    pub turn: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_move: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_line: Option<GameMatch>,
}

/// A game together with everything shown around the board.
pub struct Session<R = ThreadRng> {
    game: Game,
    rules: GameConfig,
    message: String,
    started: bool,
    rng: R,
}

impl<R: RandomSource> Session<R> {
    pub fn new(rules: GameConfig, rng: R) -> Self {
        Self {
            game: Game::new(rules.starting_player),
            message: messages::welcome(rules.starting_player),
            rules,
            started: false,
            rng,
        }
    }

    pub fn reset(&mut self, rules: GameConfig) {
        info!("New game, mode: {}", rules.mode);
        self.game = Game::new(rules.starting_player);
        self.message = messages::welcome(rules.starting_player);
        self.rules = rules;
        self.started = false;
    }

    /// Leaves the welcome screen. The robot opens if it is the starting player.
    pub fn start(&mut self) -> Option<RobotMove> {
        if self.started {
            return None;
        }

        self.started = true;
        debug!("Session started");

        let robot = self.play_robot_turn()?;
        self.message = self.after_robot_message(robot);
        Some(robot)
    }

    /// Plays `col` for the player whose turn it is, followed by the robot's
    /// reply. Starts the session first if needed, so the robot may also open.
    /// Rejected moves only update the message.
    pub fn submit_move(&mut self, col: usize) -> MoveReport {
        let opening = self.start();

        let result = self.game.attempt_drop(col);
        if let Err(e) = result {
            debug!("Move in column {} rejected: {}", col, e);
            self.message = messages::rejected(e, self.game.outcome());
            return MoveReport {
                opening,
                result,
                robot: None,
            };
        }

        if let Some(msg) = messages::outcome(self.game.outcome()) {
            info!("Game over: {:?}", self.game.outcome());
            self.message = msg.to_owned();
            return MoveReport {
                opening,
                result,
                robot: None,
            };
        }

        let robot = self.play_robot_turn();
        self.message = match robot {
            Some(mv) => self.after_robot_message(mv),
            None => self.turn_message(),
        };

        MoveReport {
            opening,
            result,
            robot,
        }
    }

    fn play_robot_turn(&mut self) -> Option<RobotMove> {
        let robot = self.rules.robot()?;
        if self.game.current_player() != Some(robot.player()) {
            return None;
        }

        let Some(mv) = robot.choose_move(self.game.board(), &mut self.rng) else {
            debug_assert!(self.game.board().is_full(), "robot stuck on an open board");
            error!("Robot has no legal move while the game is still running");
            return None;
        };

        let applied = match mv {
            RobotMove::Drop { col } => self.game.attempt_drop(col).map(|_| ()),
            RobotMove::Steal { row, col } => self.game.steal(row, col),
        };

        if let Err(e) = applied {
            error!("Robot move {:?} rejected: {}", mv, e);
            return None;
        }

        debug!("Robot played {:?}", mv);
        Some(mv)
    }

    fn after_robot_message(&mut self, mv: RobotMove) -> String {
        let next = match messages::outcome(self.game.outcome()) {
            Some(msg) => {
                info!("Game over: {:?}", self.game.outcome());
                msg.to_owned()
            }
            None => self.turn_message(),
        };

        format!("{} {next}", messages::robot_move(mv))
    }

    fn turn_message(&mut self) -> String {
        match self.game.current_player() {
            Some(player) => messages::next_turn(player, &mut self.rng),
            None => messages::outcome(self.game.outcome())
                .unwrap_or_default()
                .to_owned(),
        }
    }
}

impl<R> Session<R> {
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    #[must_use]
    pub fn current_player(&self) -> Option<Player> {
        self.game.current_player()
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.game.outcome()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn rules(&self) -> &GameConfig {
        &self.rules
    }

    #[must_use]
    pub fn winning_line(&self) -> Option<GameMatch> {
        game::winning_line(self.game.board()).map(|(_, line)| line)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: *self.game.board(),
            state: self.game.state(),
            outcome: self.game.outcome(),
            message: self.message.clone(),
            started: self.started,
            mode: self.rules.mode,
            turn: self.game.turn(),
            last_move: self.game.last_move(),
            winning_line: self.winning_line(),
        }
    }
}
