use rand::Rng;

use crate::game::{Board, Player};

/// Source of randomness for the robot and the themed messages.
///
/// Implemented for every [`rand::Rng`], tests plug in scripted sources.
pub trait RandomSource {
    /// Uniform index in `0..n`, `n` is never zero.
    fn pick(&mut self, n: usize) -> usize;

    /// `true` with a probability of `1 / n`. Never `true` when `n` is zero.
    fn one_in(&mut self, n: u32) -> bool;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }

    fn one_in(&mut self, n: u32) -> bool {
        n > 0 && self.gen_ratio(1, n)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RobotMove {
    Drop { col: usize },
    /// Takes over the opponent's chip at `(row, col)` instead of dropping one.
    Steal { row: usize, col: usize },
}

/// The automated opponent.
#[derive(Clone, Copy, Debug)]
pub struct Robot {
    player: Player,
    steal_one_in: Option<u32>,
}

impl Robot {
    /// Plays uniformly random columns.
    #[must_use]
    pub const fn new(player: Player) -> Self {
        Self {
            player,
            steal_one_in: None,
        }
    }

    /// Like `new`, but steals an opponent chip once in `one_in` turns.
    #[must_use]
    pub const fn evil(player: Player, one_in: u32) -> Self {
        Self {
            player,
            steal_one_in: Some(one_in),
        }
    }

    #[must_use]
    pub const fn player(&self) -> Player {
        self.player
    }

    /// Returns `None` only if every column is full.
    pub fn choose_move<R: RandomSource + ?Sized>(
        &self,
        board: &Board,
        rng: &mut R,
    ) -> Option<RobotMove> {
        if let Some(one_in) = self.steal_one_in {
            if rng.one_in(one_in) {
                if let Some((row, col)) = board.first_cell_of(self.player.other()) {
                    return Some(RobotMove::Steal { row, col });
                }
            }
        }

        let open = board.open_columns();
        if open.is_empty() {
            return None;
        }

        Some(RobotMove::Drop {
            col: open[rng.pick(open.len())],
        })
    }
}
