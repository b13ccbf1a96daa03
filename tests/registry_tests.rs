use seabattle::{
    Board, BoardSource, ChannelRef, Cell, Orientation, PlacementError, PlayerId, RegistryError,
    RuleSet, SessionKey, SessionRegistry, SessionStatus, ShipPlacement, ShotOutcome, WaitToken,
};

const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);
const P3: PlayerId = PlayerId(3);

/// One two-cell ship at (3,4)-(4,4).
fn small_board() -> Board {
    let mut board = Board::new();
    board
        .place(&ShipPlacement::new(2, 3, 4, Orientation::Horizontal), true)
        .unwrap();
    board
}

fn started() -> (SessionRegistry, SessionKey) {
    let registry = SessionRegistry::with_source(small_board());
    let token = registry.create_waiting(P1, ChannelRef(100)).unwrap();
    let key = registry.join_waiting(token, P2, ChannelRef(200)).unwrap();
    (registry, key)
}

#[test]
fn test_matchmaking_scenario() {
    let registry = SessionRegistry::with_source(small_board());
    let token = registry.create_waiting(P1, ChannelRef(100)).unwrap();
    assert_eq!(token, WaitToken(P1));
    assert!(registry.is_waiting(P1));

    assert_eq!(
        registry.join_waiting(token, P1, ChannelRef(100)).unwrap_err(),
        RegistryError::SelfJoin
    );
    let key = registry.join_waiting(token, P2, ChannelRef(200)).unwrap();
    assert_eq!(key, SessionKey::new(P1, P2));
    assert_eq!(key.to_string(), "1_2");
    assert_eq!(
        registry.join_waiting(token, P3, ChannelRef(300)).unwrap_err(),
        RegistryError::NotFound
    );

    assert_eq!(registry.waiting_count(), 0);
    assert_eq!(registry.active_count(), 1);
    assert_eq!(registry.session_of(P1), Some(key));
    assert_eq!(registry.session_of(P2), Some(key));
    assert_eq!(registry.session_of(P3), None);
    assert_eq!(registry.channels(key).unwrap(), [ChannelRef(100), ChannelRef(200)]);
}

#[test]
fn test_one_entry_per_player() {
    let (registry, _key) = started();
    assert_eq!(
        registry.create_waiting(P1, ChannelRef(1)).unwrap_err(),
        RegistryError::AlreadyInGame
    );
    assert_eq!(
        registry.create_waiting(P2, ChannelRef(2)).unwrap_err(),
        RegistryError::AlreadyInGame
    );

    registry.create_waiting(P3, ChannelRef(3)).unwrap();
    assert_eq!(
        registry.create_waiting(P3, ChannelRef(3)).unwrap_err(),
        RegistryError::AlreadyInGame
    );
    // A seated player cannot take a second seat by joining.
    assert_eq!(
        registry
            .join_waiting(WaitToken(P3), P2, ChannelRef(2))
            .unwrap_err(),
        RegistryError::AlreadyInGame
    );
    assert!(registry.is_waiting(P3));
}

#[test]
fn test_unknown_token_not_found() {
    let registry = SessionRegistry::new(RuleSet::classic());
    assert_eq!(
        registry
            .join_waiting(WaitToken(PlayerId(42)), P2, ChannelRef(2))
            .unwrap_err(),
        RegistryError::NotFound
    );
    assert_eq!(registry.active_count(), 0);
}

#[test]
fn test_cancel_waiting_frees_player() {
    let registry = SessionRegistry::new(RuleSet::loose());
    let token = registry.create_waiting(P1, ChannelRef(1)).unwrap();
    registry.cancel_waiting(P1).unwrap();
    assert_eq!(registry.cancel_waiting(P1).unwrap_err(), RegistryError::NotFound);
    assert_eq!(
        registry.join_waiting(token, P2, ChannelRef(2)).unwrap_err(),
        RegistryError::NotFound
    );
    registry.create_waiting(P1, ChannelRef(1)).unwrap();
}

#[test]
fn test_random_boards_carry_full_fleet() {
    let rules = RuleSet::classic();
    let registry = SessionRegistry::new(rules.clone());
    let token = registry.create_waiting(P1, ChannelRef(1)).unwrap();
    let key = registry.join_waiting(token, P2, ChannelRef(2)).unwrap();
    let view = registry.view(key).unwrap();
    for board in &view.boards {
        assert_eq!(board.count(Cell::Ship), rules.ship_cells());
    }
    assert_eq!(view.current_turn, Some(P1));
    assert_eq!(view.status, SessionStatus::Active);
    assert_eq!(view.shots_fired, [0, 0]);
}

struct Failing;

impl BoardSource for Failing {
    fn generate(&self) -> Result<Board, PlacementError> {
        Err(PlacementError::Exhausted {
            length: 4,
            attempts: 100,
        })
    }
}

#[test]
fn test_failed_generation_keeps_waiting_entry() {
    let registry = SessionRegistry::with_source(Failing);
    let token = registry.create_waiting(P1, ChannelRef(1)).unwrap();
    assert!(matches!(
        registry.join_waiting(token, P2, ChannelRef(2)),
        Err(RegistryError::Placement(PlacementError::Exhausted { .. }))
    ));
    assert!(registry.is_waiting(P1));
    assert_eq!(registry.active_count(), 0);
    assert_eq!(registry.session_of(P2), None);
    registry.create_waiting(P2, ChannelRef(2)).unwrap();
}

#[test]
fn test_apply_shot_scenario_removes_finished_session() {
    let (registry, key) = started();

    let first = registry.apply_shot(key, P1, 3, 4).unwrap();
    assert_eq!(first.outcome, ShotOutcome::Hit);
    assert!(!first.sunk && !first.win);
    assert_eq!(first.next_turn, Some(P1));

    let second = registry.apply_shot(key, P1, 4, 4).unwrap();
    assert!(second.sunk && second.win);
    assert_eq!(second.next_turn, None);

    assert_eq!(registry.active_count(), 0);
    assert_eq!(registry.apply_shot(key, P1, 0, 0).unwrap_err(), RegistryError::NotFound);
    assert_eq!(registry.view(key).unwrap_err(), RegistryError::NotFound);
    assert_eq!(registry.session_of(P1), None);
    // Both players are free again.
    registry.create_waiting(P1, ChannelRef(1)).unwrap();
    registry.create_waiting(P2, ChannelRef(2)).unwrap();
}

#[test]
fn test_repeat_shot_leaves_state_unchanged() {
    let (registry, key) = started();
    let real = registry.apply_shot(key, P1, 3, 4).unwrap();
    assert_eq!(real.outcome, ShotOutcome::Hit);
    let before = registry.view(key).unwrap();

    assert_eq!(
        registry.apply_shot(key, P1, 3, 4).unwrap_err(),
        RegistryError::AlreadyShot { x: 3, y: 4 }
    );
    assert_eq!(
        registry.apply_shot(key, P1, 3, 4).unwrap_err(),
        RegistryError::AlreadyShot { x: 3, y: 4 }
    );
    assert_eq!(registry.view(key).unwrap(), before);
}

#[test]
fn test_turn_and_participation_errors() {
    let (registry, key) = started();
    assert_eq!(registry.apply_shot(key, P2, 0, 0).unwrap_err(), RegistryError::WrongTurn);
    assert_eq!(registry.apply_shot(key, P3, 0, 0).unwrap_err(), RegistryError::NotInGame);
    assert_eq!(
        registry.apply_shot(key, P1, 0, 10).unwrap_err(),
        RegistryError::OutOfRange { x: 0, y: 10 }
    );
    assert_eq!(
        registry
            .apply_shot(SessionKey::new(P2, P1), P1, 0, 0)
            .unwrap_err(),
        RegistryError::NotFound
    );

    let miss = registry.apply_shot(key, P1, 0, 0).unwrap();
    assert_eq!(miss.next_turn, Some(P2));
    assert_eq!(registry.current_turn(key).unwrap(), Some(P2));
    assert_eq!(registry.apply_shot(key, P1, 1, 1).unwrap_err(), RegistryError::WrongTurn);
}

#[test]
fn test_shoot_as_finds_session() {
    let (registry, key) = started();
    assert_eq!(registry.shoot_as(P3, 0, 0).unwrap_err(), RegistryError::NotInGame);
    let (found, result) = registry.shoot_as(P1, 9, 9).unwrap();
    assert_eq!(found, key);
    assert_eq!(result.outcome, ShotOutcome::Miss);
    let (_, result) = registry.shoot_as(P2, 3, 4).unwrap();
    assert_eq!(result.outcome, ShotOutcome::Hit);
    let board = registry
        .with_session(key, |s| *s.board_of(P1).unwrap())
        .unwrap();
    assert_eq!(board.cell(3, 4), Some(Cell::Hit));
}
