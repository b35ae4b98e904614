use actix::prelude::*;
use log::{debug, info};
use rand::thread_rng;

use crate::game_config::{GameConfig, PartialGameConfig};
use crate::session::Session as InternalSession;
use crate::session::{MoveReport, Snapshot};

#[derive(Message)]
#[rtype(result = "MoveReport")]
pub struct SubmitMove {
    pub col: usize,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Start;

/// Starts a new game, overriding the current rules with any given setting.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Reset(pub PartialGameConfig);

#[derive(Message)]
#[rtype(result = "Snapshot")]
pub struct GetSnapshot;

/// Sole owner of the game session. Requests are applied one at a time in
/// mailbox order.
pub struct Session {
    session: InternalSession,
}

impl Session {
    #[must_use]
    pub fn new(rules: GameConfig) -> Self {
        Self {
            session: InternalSession::new(rules, thread_rng()),
        }
    }
}

impl Actor for Session {
    type Context = actix::Context<Self>;

    fn started(&mut self, _: &mut Self::Context) {
        info!("Session ready, mode: {}", self.session.rules().mode);
    }
}

impl Handler<SubmitMove> for Session {
    type Result = MessageResult<SubmitMove>;

    fn handle(&mut self, msg: SubmitMove, _: &mut Self::Context) -> Self::Result {
        let report = self.session.submit_move(msg.col);
        debug!("Move in column {}: {:?}", msg.col, report);
        MessageResult(report)
    }
}

impl Handler<Start> for Session {
    type Result = ();

    fn handle(&mut self, _: Start, _: &mut Self::Context) {
        self.session.start();
    }
}

impl Handler<Reset> for Session {
    type Result = ();

    fn handle(&mut self, msg: Reset, _: &mut Self::Context) {
        let mut rules = self.session.rules().clone();
        rules.apply_partial(&msg.0);
        self.session.reset(rules);
    }
}

impl Handler<GetSnapshot> for Session {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _: GetSnapshot, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.session.snapshot())
    }
}
