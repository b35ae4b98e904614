//! Server side rendering of the board page.

use crate::{
    game::{TurnState, COLS, ROWS},
    game_config::GameMode,
    session::Snapshot,
    PlayerTuple,
};

const CHIP_CLASSES: PlayerTuple<&str> = PlayerTuple::new(["violet", "orange"]);

const MODES: [(GameMode, &str); 3] = [
    (GameMode::Local, "Deux joueurs"),
    (GameMode::Robot, "Contre le robot"),
    (GameMode::EvilRobot, "Contre le caca maléfique"),
];

const HEAD: &str = "\
<!DOCTYPE html>
<html lang=\"fr\">
<head>
<meta charset=\"utf-8\">
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">
<title>Puissance 4 d'Halloween</title>
<link rel=\"stylesheet\" href=\"/static/style.css\">
</head>
<body>
<h1>🎃 Puissance 4 d'Halloween 👻</h1>
";

const FOOT: &str = "</body>\n</html>\n";

#[must_use]
pub fn page(snapshot: &Snapshot) -> String {
    let mut res = String::with_capacity(8 * 1024);

    res.push_str(HEAD);
    res.push_str("<p class=\"message\">");
    res.push_str(&escape(&snapshot.message));
    res.push_str("</p>\n");

    if snapshot.started {
        push_board(&mut res, snapshot);
    } else {
        res.push_str(
            "<form class=\"start\" method=\"post\" action=\"/start\">\
             <button type=\"submit\">Entrer dans le cimetière 🪦</button></form>\n",
        );
    }

    push_reset(&mut res, snapshot.mode);
    res.push_str(FOOT);
    res
}

fn push_board(res: &mut String, snapshot: &Snapshot) {
    let board_class = match snapshot.state {
        TurnState::Turn(player) => CHIP_CLASSES[player],
        TurnState::Finished(_) => "finished",
    };
    res.push_str(&format!(
        "<div class=\"board turn-{board_class}\">\n<div class=\"columns\">\n"
    ));

    let finished = matches!(snapshot.state, TurnState::Finished(_));
    for col in 0..COLS {
        let disabled = if finished || snapshot.board.is_column_full(col) {
            " disabled"
        } else {
            ""
        };
        res.push_str(&format!(
            "<form method=\"post\" action=\"/play\">\
             <input type=\"hidden\" name=\"column\" value=\"{col}\">\
             <button type=\"submit\"{disabled}>{}</button></form>\n",
            col + 1
        ));
    }
    res.push_str("</div>\n<table class=\"grid\">\n");

    let winning: &[(usize, usize)] = match &snapshot.winning_line {
        Some(line) => line,
        None => &[],
    };
    for row in 0..ROWS {
        res.push_str("<tr>");
        for col in 0..COLS {
            let owner = snapshot
                .board
                .cell(row, col)
                .map_or("empty", |player| CHIP_CLASSES[player]);
            let win = if winning.contains(&(row, col)) {
                " cell-win"
            } else {
                ""
            };
            res.push_str(&format!("<td class=\"cell {owner}{win}\"></td>"));
        }
        res.push_str("</tr>\n");
    }

    res.push_str("</table>\n</div>\n");
}

fn push_reset(res: &mut String, current: GameMode) {
    res.push_str("<form class=\"reset\" method=\"post\" action=\"/reset\">\n");
    res.push_str("<select name=\"mode\">\n");
    for (mode, label) in MODES {
        let selected = if mode == current { " selected" } else { "" };
        res.push_str(&format!(
            "<option value=\"{}\"{selected}>{label}</option>\n",
            mode.as_str()
        ));
    }
    res.push_str("</select>\n<button type=\"submit\">Réinitialiser</button>\n</form>\n");
}

fn escape(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#39;"),
            _ => res.push(c),
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{game_config::GameConfig, session::Session};

    fn session() -> Session<StdRng> {
        Session::new(GameConfig::default(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn welcome_screen_before_start() {
        let html = page(&session().snapshot());
        assert!(html.contains("action=\"/start\""));
        assert!(!html.contains("class=\"grid\""));
        assert!(html.contains("Bienvenue"));
    }

    #[test]
    fn board_has_every_cell() {
        let mut session = session();
        session.submit_move(2);
        let html = page(&session.snapshot());

        assert_eq!(html.matches("<td class=\"cell ").count(), ROWS * COLS);
        assert_eq!(html.matches("cell violet").count(), 1);
        assert_eq!(html.matches("name=\"column\"").count(), COLS);
        assert!(html.contains("turn-orange"));
        assert!(!html.contains(" disabled>"));
    }

    #[test]
    fn full_column_button_is_disabled() {
        let mut session = session();
        for _ in 0..ROWS {
            session.submit_move(4);
        }
        let html = page(&session.snapshot());
        assert_eq!(html.matches(" disabled>").count(), 1);
        assert!(html.contains("value=\"4\"><button type=\"submit\" disabled>5</button>"));
    }

    #[test]
    fn winning_line_is_highlighted() {
        let mut session = session();
        for col in [0, 0, 1, 1, 2, 2, 3] {
            session.submit_move(col);
        }
        let html = page(&session.snapshot());

        assert_eq!(html.matches("cell-win").count(), 4);
        assert_eq!(html.matches(" disabled>").count(), COLS);
        assert!(html.contains("turn-finished"));
        assert!(html.contains("VICTOIRE"));
    }

    #[test]
    fn current_mode_is_selected() {
        let mut session = session();
        session.reset(GameConfig {
            mode: GameMode::EvilRobot,
            ..GameConfig::default()
        });
        let html = page(&session.snapshot());
        assert!(html.contains("<option value=\"evilRobot\" selected>"));
        assert_eq!(html.matches(" selected>").count(), 1);
    }

    #[test]
    fn escape_markup() {
        assert_eq!(
            escape("<b>\"Boo\" & 'hou'</b>"),
            "&lt;b&gt;&quot;Boo&quot; &amp; &#39;hou&#39;&lt;/b&gt;"
        );
    }
}
