#![cfg(feature = "std")]
//! Automated matches driven through a shared [`SessionRegistry`].

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::common::{ChannelRef, PlayerId, RegistryError, ShotOutcome};
use crate::player::{HuntShooter, RandomShooter, Shooter};
use crate::registry::{SessionKey, SessionRegistry};

/// How one automated match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MatchSummary {
    pub key: SessionKey,
    pub winner: PlayerId,
    /// Shots fired by the creator and by the joiner.
    pub shots: [usize; 2],
    pub hits: [usize; 2],
}

/// Play session `key` to the end, one shooter per seat (creator first).
///
/// Yields to the runtime after every accepted shot so many matches can
/// interleave on one registry.
pub async fn play_match(
    registry: &SessionRegistry,
    key: SessionKey,
    shooters: &mut [Box<dyn Shooter>; 2],
    rng: &mut SmallRng,
) -> Result<MatchSummary, RegistryError> {
    let mut shots = [0usize; 2];
    let mut hits = [0usize; 2];
    loop {
        let (player, seat, fired, target) = registry.with_session(key, |s| {
            let player = s.current_turn();
            let seat = usize::from(player != Some(s.player1()));
            let fired = player.and_then(|p| s.shots_of(p)).copied().unwrap_or_default();
            let target = player
                .and_then(|p| s.opponent_of(p))
                .and_then(|o| s.board_of(o))
                .map(|b| b.fogged())
                .unwrap_or_default();
            (player, seat, fired, target)
        })?;
        let player = player.ok_or(RegistryError::NotFound)?;

        let (x, y) = shooters[seat].select_target(rng, &fired, &target);
        let result = registry.apply_shot(key, player, x, y)?;
        shots[seat] += 1;
        if result.outcome == ShotOutcome::Hit {
            hits[seat] += 1;
        }
        if result.win {
            return Ok(MatchSummary {
                key,
                winner: player,
                shots,
                hits,
            });
        }
        tokio::task::yield_now().await;
    }
}

/// Run `games` matches concurrently on one registry.
///
/// Match `i` seats players `2i + 1` (random shooter) and `2i + 2` (hunting
/// shooter). Results come back in match order.
pub async fn run_matches(
    registry: Arc<SessionRegistry>,
    games: usize,
    seed: Option<u64>,
) -> anyhow::Result<Vec<MatchSummary>> {
    let mut handles = Vec::with_capacity(games);
    for i in 0..games {
        let registry = Arc::clone(&registry);
        let mut rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s.wrapping_add(i as u64)),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        handles.push(tokio::spawn(async move {
            let first = PlayerId(2 * i as u64 + 1);
            let second = PlayerId(2 * i as u64 + 2);
            let token = registry.create_waiting(first, ChannelRef(first.0 as i64))?;
            let key = registry.join_waiting(token, second, ChannelRef(second.0 as i64))?;
            let mut shooters: [Box<dyn Shooter>; 2] =
                [Box::new(RandomShooter::new()), Box::new(HuntShooter::new())];
            let summary = play_match(&registry, key, &mut shooters, &mut rng).await?;
            Ok::<MatchSummary, RegistryError>(summary)
        }));
    }

    let mut summaries = Vec::with_capacity(games);
    for handle in handles {
        summaries.push(handle.await??);
    }
    Ok(summaries)
}
