//! Matchmaking and the set of live sessions.
//!
//! The registry owns three maps behind one short-held lock: waiting entries,
//! active sessions, and a seat index giving each player's single entry. Each
//! active session has its own lock, so shots in different sessions never
//! wait on each other. Lock order is session before maps; the maps lock is
//! never held while taking a session lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::board::{Board, BoardSource, RandomBoards};
use crate::common::{ChannelRef, PlayerId, RegistryError};
use crate::config::RuleSet;
use crate::game::{GameSession, SessionStatus, TurnResult, WaitingGame};

/// Handle to a waiting entry. Carries the creator's id, which is what a
/// second player is told to join with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct WaitToken(pub PlayerId);

impl fmt::Display for WaitToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of an active session, derived from its two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SessionKey {
    pub player1: PlayerId,
    pub player2: PlayerId,
}

impl SessionKey {
    pub fn new(player1: PlayerId, player2: PlayerId) -> Self {
        Self { player1, player2 }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.player1, self.player2)
    }
}

/// Owned snapshot of a session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SessionView {
    pub key: SessionKey,
    pub players: [PlayerId; 2],
    pub boards: [Board; 2],
    pub shots_fired: [usize; 2],
    pub current_turn: Option<PlayerId>,
    pub status: SessionStatus,
}

impl SessionView {
    fn capture(key: SessionKey, session: &GameSession) -> Self {
        let players = session.players();
        let board = |p| session.board_of(p).copied().unwrap_or_default();
        let fired = |p| session.shots_of(p).map(|s| s.len()).unwrap_or(0);
        Self {
            key,
            players,
            boards: [board(players[0]), board(players[1])],
            shots_fired: [fired(players[0]), fired(players[1])],
            current_turn: session.current_turn(),
            status: session.status(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seat {
    Waiting,
    Playing(SessionKey),
}

type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Default)]
struct Maps {
    waiting: HashMap<PlayerId, WaitingGame>,
    active: HashMap<SessionKey, SharedSession>,
    seats: HashMap<PlayerId, Seat>,
}

/// Waiting pool and active sessions for one process.
pub struct SessionRegistry {
    maps: Mutex<Maps>,
    boards: Box<dyn BoardSource>,
}

impl SessionRegistry {
    /// Registry generating random boards under `rules`.
    pub fn new(rules: RuleSet) -> Self {
        Self::with_source(RandomBoards::new(rules))
    }

    /// Registry taking boards for new sessions from `boards`.
    pub fn with_source<S: BoardSource + 'static>(boards: S) -> Self {
        Self {
            maps: Mutex::new(Maps::default()),
            boards: Box::new(boards),
        }
    }

    /// Register `player` as waiting for an opponent.
    pub fn create_waiting(
        &self,
        player: PlayerId,
        channel: ChannelRef,
    ) -> Result<WaitToken, RegistryError> {
        let mut maps = self.maps.lock();
        if maps.seats.contains_key(&player) {
            return Err(RegistryError::AlreadyInGame);
        }
        maps.waiting.insert(player, WaitingGame::new(player, channel));
        maps.seats.insert(player, Seat::Waiting);
        log::info!("player {} is waiting for an opponent", player);
        Ok(WaitToken(player))
    }

    /// Withdraw `player`'s waiting entry before anyone joins it.
    pub fn cancel_waiting(&self, player: PlayerId) -> Result<(), RegistryError> {
        let mut maps = self.maps.lock();
        if maps.waiting.remove(&player).is_none() {
            return Err(RegistryError::NotFound);
        }
        maps.seats.remove(&player);
        log::info!("player {} stopped waiting", player);
        Ok(())
    }

    /// Join the waiting entry behind `token` and start the session.
    ///
    /// Boards are generated outside the maps lock; the entry is re-checked
    /// before it is consumed, so two racing joins produce one session.
    pub fn join_waiting(
        &self,
        token: WaitToken,
        player: PlayerId,
        channel: ChannelRef,
    ) -> Result<SessionKey, RegistryError> {
        let entry = {
            let maps = self.maps.lock();
            Self::check_join(&maps, token, player)?
        };

        let session = entry.join(player, channel, self.boards.as_ref())?;
        let key = SessionKey::new(entry.owner(), player);

        let mut maps = self.maps.lock();
        if Self::check_join(&maps, token, player)? != entry {
            return Err(RegistryError::NotFound);
        }
        maps.waiting.remove(&token.0);
        maps.active.insert(key, Arc::new(Mutex::new(session)));
        maps.seats.insert(entry.owner(), Seat::Playing(key));
        maps.seats.insert(player, Seat::Playing(key));
        log::info!("session {} started", key);
        Ok(key)
    }

    fn check_join(
        maps: &Maps,
        token: WaitToken,
        player: PlayerId,
    ) -> Result<WaitingGame, RegistryError> {
        let entry = *maps.waiting.get(&token.0).ok_or(RegistryError::NotFound)?;
        if entry.owner() == player {
            return Err(RegistryError::SelfJoin);
        }
        if maps.seats.contains_key(&player) {
            return Err(RegistryError::AlreadyInGame);
        }
        Ok(entry)
    }

    fn session(&self, key: SessionKey) -> Result<SharedSession, RegistryError> {
        self.maps
            .lock()
            .active
            .get(&key)
            .cloned()
            .ok_or(RegistryError::NotFound)
    }

    /// Fire at (`x`, `y`) in session `key` on behalf of `player`.
    ///
    /// The finishing shot removes the session from the registry before the
    /// session lock is released.
    pub fn apply_shot(
        &self,
        key: SessionKey,
        player: PlayerId,
        x: usize,
        y: usize,
    ) -> Result<TurnResult, RegistryError> {
        let shared = self.session(key)?;
        let mut session = shared.lock();
        let result = session.shoot(player, x, y)?;
        if result.win {
            let mut maps = self.maps.lock();
            maps.active.remove(&key);
            for p in session.players() {
                maps.seats.remove(&p);
            }
            log::info!("session {} finished, winner {}", key, player);
        }
        Ok(result)
    }

    /// Fire on behalf of `player` in whichever session they are playing.
    pub fn shoot_as(
        &self,
        player: PlayerId,
        x: usize,
        y: usize,
    ) -> Result<(SessionKey, TurnResult), RegistryError> {
        let key = self.session_of(player).ok_or(RegistryError::NotInGame)?;
        self.apply_shot(key, player, x, y).map(|r| (key, r))
    }

    /// Active session `player` is seated in.
    pub fn session_of(&self, player: PlayerId) -> Option<SessionKey> {
        match self.maps.lock().seats.get(&player) {
            Some(Seat::Playing(key)) => Some(*key),
            _ => None,
        }
    }

    /// Returns `true` if `player` holds a waiting entry.
    pub fn is_waiting(&self, player: PlayerId) -> bool {
        self.maps.lock().waiting.contains_key(&player)
    }

    /// Run `f` against the session's current state.
    pub fn with_session<R>(
        &self,
        key: SessionKey,
        f: impl FnOnce(&GameSession) -> R,
    ) -> Result<R, RegistryError> {
        let shared = self.session(key)?;
        let session = shared.lock();
        Ok(f(&session))
    }

    pub fn view(&self, key: SessionKey) -> Result<SessionView, RegistryError> {
        self.with_session(key, |s| SessionView::capture(key, s))
    }

    pub fn current_turn(&self, key: SessionKey) -> Result<Option<PlayerId>, RegistryError> {
        self.with_session(key, GameSession::current_turn)
    }

    /// Both participants' channels, creator first.
    pub fn channels(&self, key: SessionKey) -> Result<[ChannelRef; 2], RegistryError> {
        self.with_session(key, GameSession::channels)
    }

    pub fn waiting_count(&self) -> usize {
        self.maps.lock().waiting.len()
    }

    pub fn active_count(&self) -> usize {
        self.maps.lock().active.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}
