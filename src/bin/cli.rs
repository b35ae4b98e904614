#![warn(clippy::all, clippy::pedantic)]

use std::{io::BufRead, process};

use puissance_quatre_server::{
    game::{Player, COLS, ROWS},
    game_config::{GameConfig, GameMode},
    messages::PLAYER_NAMES,
    robot::RobotMove,
    session::Session,
    PlayerTuple,
};

const HELP: &str = "\
USAGE:
  puissance-quatre-cli [OPTIONS]

OPTIONS:
  -m --mode <MODE>      local, robot or evilRobot
  -h --help             Show this message and exit

COMMANDS:
  1-7                   Drop a chip, several moves can be separated with \", \"
  restart               Start a new game with the same mode
  moves                 Print the moves played so far, S marks a steal
  json                  Print the session as JSON
  exit                  Quit
";

struct App {
    session: Session,
    moves: Vec<String>,
}

impl App {
    fn new(rules: GameConfig) -> Self {
        let mut session = Session::new(rules, rand::thread_rng());
        let mut moves = Vec::new();
        if let Some(mv) = session.start() {
            moves.push(move_label(mv));
        }

        Self { session, moves }
    }

    fn run(&mut self) {
        print!("{}", self.render());

        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                continue;
            };

            line.split(", ").for_each(|cmd| self.process_command(cmd.trim()));
            print!("{}", self.render());
        }
    }

    fn restart(&mut self) {
        *self = Self::new(self.session.rules().clone());
    }

    fn process_command(&mut self, cmd: &str) {
        if let Ok(n @ 1..=COLS) = cmd.parse::<usize>() {
            let report = self.session.submit_move(n - 1);
            if let Some(mv) = report.opening {
                self.moves.push(move_label(mv));
            }
            if report.result.is_ok() {
                self.moves.push(n.to_string());
            }
            if let Some(mv) = report.robot {
                self.moves.push(move_label(mv));
            }
            return;
        }

        match cmd {
            "restart" => self.restart(),
            "moves" => println!("{:?}", self.moves),
            "json" => match serde_json::to_string_pretty(&self.session.snapshot()) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("{e}"),
            },
            "exit" => process::exit(0),
            _ => (),
        }
    }

    fn render(&self) -> String {
        let mut res = String::with_capacity(1024);
        let mut chips = PlayerTuple::new([0_usize; 2]);

        res.push_str(&"-".repeat(2 * COLS));
        res.push('\n');
        res.push_str(self.session.message());
        res.push('\n');

        for row in 0..ROWS {
            for col in 0..COLS {
                let cell = self.session.board().cell(row, col);
                if let Some(player) = cell {
                    chips[player] += 1;
                }

                match cell {
                    Some(Player::P1) => res.push_str("()"),
                    Some(Player::P2) => res.push_str("[]"),
                    None => res.push_str("  "),
                }
            }

            res.push('\n');
        }

        res.push_str("1 2 3 4 5 6 7\n");
        res.push_str(&format!(
            "(){}: {}  []{}: {}\n",
            PLAYER_NAMES[Player::P1],
            chips[Player::P1],
            PLAYER_NAMES[Player::P2],
            chips[Player::P2],
        ));
        res
    }
}

fn move_label(mv: RobotMove) -> String {
    match mv {
        RobotMove::Drop { col } => (col + 1).to_string(),
        RobotMove::Steal { col, .. } => format!("S{}", col + 1),
    }
}

fn parse_mode() -> Result<Option<GameMode>, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        process::exit(0);
    }

    let mode = pargs.opt_value_from_str(["-m", "--mode"])?;

    let extra_args = pargs.finish();
    if !extra_args.is_empty() {
        eprintln!("Unknown argument: {}", extra_args[0].to_string_lossy());
        process::exit(1);
    }

    Ok(mode)
}

fn main() {
    let mode = match parse_mode() {
        Ok(mode) => mode.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    env_logger::init();

    App::new(GameConfig {
        mode,
        ..GameConfig::default()
    })
    .run();
}
