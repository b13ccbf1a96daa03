//! Per-match state and the turn state machine.

use crate::board::{Board, BoardSource};
use crate::common::{ChannelRef, GameError, PlayerId, ShotOutcome};
use crate::resolver;
use crate::shots::ShotSet;

/// Lifecycle state of a started match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    Active,
    Finished,
}

/// Result of one accepted shot, as returned to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnResult {
    pub outcome: ShotOutcome,
    pub sunk: bool,
    pub win: bool,
    /// Player to move next, `None` once the match is finished.
    pub next_turn: Option<PlayerId>,
}

impl TurnResult {
    pub fn finished(&self) -> bool {
        self.next_turn.is_none()
    }
}

/// A match with one participant bound, waiting for an opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitingGame {
    owner: PlayerId,
    channel: ChannelRef,
}

impl WaitingGame {
    pub fn new(owner: PlayerId, channel: ChannelRef) -> Self {
        Self { owner, channel }
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn channel(&self) -> ChannelRef {
        self.channel
    }

    /// Bind the second participant and generate both boards.
    ///
    /// Either board failing to generate fails the whole join; no session is
    /// produced.
    pub fn join(
        &self,
        player: PlayerId,
        channel: ChannelRef,
        boards: &dyn BoardSource,
    ) -> Result<GameSession, GameError> {
        if player == self.owner {
            return Err(GameError::SelfJoin);
        }
        let first = boards.generate()?;
        let second = boards.generate()?;
        Ok(GameSession::new(
            (self.owner, self.channel, first),
            (player, channel, second),
        ))
    }
}

/// One running or finished match between two players.
///
/// Seat 0 is the creator and moves first. `boards[i]` belongs to seat `i` and
/// is attacked by the other seat, whose fired coordinates are `shots[1 - i]`.
#[derive(Debug, Clone)]
pub struct GameSession {
    players: [PlayerId; 2],
    channels: [ChannelRef; 2],
    boards: [Board; 2],
    shots: [ShotSet; 2],
    current_turn: Option<PlayerId>,
    winner: Option<PlayerId>,
}

impl GameSession {
    /// Start an active match from two seated players and their boards.
    pub fn new(
        first: (PlayerId, ChannelRef, Board),
        second: (PlayerId, ChannelRef, Board),
    ) -> Self {
        Self {
            players: [first.0, second.0],
            channels: [first.1, second.1],
            boards: [first.2, second.2],
            shots: [ShotSet::new(), ShotSet::new()],
            current_turn: Some(first.0),
            winner: None,
        }
    }

    fn seat(&self, player: PlayerId) -> Option<usize> {
        self.players.iter().position(|&p| p == player)
    }

    pub fn player1(&self) -> PlayerId {
        self.players[0]
    }

    pub fn player2(&self) -> PlayerId {
        self.players[1]
    }

    pub fn players(&self) -> [PlayerId; 2] {
        self.players
    }

    pub fn is_participant(&self, player: PlayerId) -> bool {
        self.seat(player).is_some()
    }

    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        self.seat(player).map(|s| self.players[1 - s])
    }

    pub fn channel_of(&self, player: PlayerId) -> Option<ChannelRef> {
        self.seat(player).map(|s| self.channels[s])
    }

    pub fn channels(&self) -> [ChannelRef; 2] {
        self.channels
    }

    /// The player's own board.
    pub fn board_of(&self, player: PlayerId) -> Option<&Board> {
        self.seat(player).map(|s| &self.boards[s])
    }

    /// Coordinates the player has fired at the opponent.
    pub fn shots_of(&self, player: PlayerId) -> Option<&ShotSet> {
        self.seat(player).map(|s| &self.shots[s])
    }

    pub fn current_turn(&self) -> Option<PlayerId> {
        self.current_turn
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn status(&self) -> SessionStatus {
        if self.winner.is_some() {
            SessionStatus::Finished
        } else {
            SessionStatus::Active
        }
    }

    /// Fire at the opponent's board on behalf of `player`.
    ///
    /// A hit keeps the turn, a miss passes it, and the hit that clears the
    /// last ship segment finishes the match. Every rejection happens before
    /// the boards, shot sets or turn change.
    pub fn shoot(&mut self, player: PlayerId, x: usize, y: usize) -> Result<TurnResult, GameError> {
        if self.status() == SessionStatus::Finished {
            return Err(GameError::Finished);
        }
        let seat = self.seat(player).ok_or(GameError::NotInGame)?;
        if self.current_turn != Some(player) {
            return Err(GameError::WrongTurn);
        }
        let defender = 1 - seat;
        let report = resolver::fire(&mut self.boards[defender], &mut self.shots[seat], x, y)?;
        log::debug!(
            "player {} fired at ({}, {}): {:?} sunk={} win={}",
            player,
            x,
            y,
            report.outcome,
            report.sunk,
            report.win
        );

        if report.win {
            self.winner = Some(player);
            self.current_turn = None;
        } else if report.outcome == ShotOutcome::Miss {
            self.current_turn = Some(self.players[defender]);
        }

        Ok(TurnResult {
            outcome: report.outcome,
            sunk: report.sunk,
            win: report.win,
            next_turn: self.current_turn,
        })
    }
}
