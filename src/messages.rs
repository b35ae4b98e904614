//! Themed texts shown above the board.

use crate::{
    game::{MoveError, Outcome, Player, COLS},
    robot::{RandomSource, RobotMove},
    PlayerTuple,
};

pub const PLAYER_NAMES: PlayerTuple<&str> = PlayerTuple::new(["Violet", "Orange"]);

const VICTORY: PlayerTuple<&str> = PlayerTuple::new([
    "VICTOIRE ! Le fantôme Violet a ensorcelé le plateau ! 💜",
    "VICTOIRE ! La citrouille Orange a terrifié son adversaire ! 🧡",
]);

const DRAW: &str =
    "MATCH NUL. Les esprits ne se départagent pas. Réinitialisez pour un nouveau combat.";

const COLUMN_FULL: &str = "Alerte fantôme ! Cette colonne est déjà pleine. Choisissez une autre.";

const NOTHING_TO_STEAL: &str = "Le caca maléfique n'a rien trouvé à voler.";

#[must_use]
pub fn welcome(player: Player) -> String {
    format!(
        "🎃 Bienvenue sur le plateau maudit ! C’est au tour du joueur {} 👻",
        PLAYER_NAMES[player]
    )
}

/// One of the "your turn" lines, picked at random.
pub fn next_turn<R: RandomSource + ?Sized>(player: Player, rng: &mut R) -> String {
    let name = PLAYER_NAMES[player];
    match rng.pick(4) {
        0 => format!("Au tour du joueur {name}. Le cimetière vous attend..."),
        1 => format!("Joueur {name}, le chaudron fume... faites votre coup !"),
        2 => format!("Le robot vous observe, joueur {name}. Ne tremblez pas."),
        _ => format!(
            "Un coup de poignard, joueur {name} ! (ou juste une pièce, c'est comme vous voulez)."
        ),
    }
}

/// `None` while the game is still running.
#[must_use]
pub fn outcome(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::InProgress => None,
        Outcome::Win(player) => Some(VICTORY[player]),
        Outcome::Draw => Some(DRAW),
    }
}

#[must_use]
pub fn rejected(err: MoveError, game_outcome: Outcome) -> String {
    match err {
        MoveError::GameAlreadyFinished => outcome(game_outcome)
            .unwrap_or("La partie est terminée. Réinitialisez pour rejouer.")
            .to_owned(),
        MoveError::ColumnFull => COLUMN_FULL.to_owned(),
        MoveError::InvalidColumn => {
            format!("Cette colonne n'existe pas, même chez les morts. Choisissez entre 1 et {COLS}.")
        }
        MoveError::NothingToSteal => NOTHING_TO_STEAL.to_owned(),
    }
}

#[must_use]
pub fn robot_move(mv: RobotMove) -> String {
    match mv {
        RobotMove::Drop { col } => format!("🤖 Le robot a joué dans la colonne {}.", col + 1),
        RobotMove::Steal { col, .. } => format!(
            "💩 Le caca maléfique a volé votre pion dans la colonne {} !",
            col + 1
        ),
    }
}
