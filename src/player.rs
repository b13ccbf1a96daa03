//! Target selection strategies for automated players.

use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::Board;
use crate::common::{Cell, Coord};
use crate::config::BOARD_SIZE;
use crate::resolver::neighbours4;
use crate::shots::ShotSet;

/// Chooses where an automated player fires next.
pub trait Shooter: Send {
    /// Pick an unfired coordinate `(x, y)`.
    ///
    /// `shots` is what this player already fired; `target` is the opponent's
    /// board as this player may see it (see [`Board::fogged`]).
    fn select_target(&mut self, rng: &mut SmallRng, shots: &ShotSet, target: &Board) -> Coord;
}

fn pick<R: Rng>(rng: &mut R, candidates: &[Coord]) -> Option<Coord> {
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}

fn unfired(shots: &ShotSet) -> Vec<Coord> {
    (0..BOARD_SIZE)
        .flat_map(|y| (0..BOARD_SIZE).map(move |x| (x, y)))
        .filter(|&(x, y)| !shots.contains(x, y))
        .collect()
}

/// Fires uniformly at random among unfired cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomShooter;

impl RandomShooter {
    pub fn new() -> Self {
        Self
    }
}

impl Shooter for RandomShooter {
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        shots: &ShotSet,
        _target: &Board,
    ) -> Coord {
        pick(rng, &unfired(shots)).unwrap_or((0, 0))
    }
}

/// Fires next to earlier hits when it can, at random otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct HuntShooter;

impl HuntShooter {
    pub fn new() -> Self {
        Self
    }
}

impl Shooter for HuntShooter {
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        shots: &ShotSet,
        target: &Board,
    ) -> Coord {
        let mut follow_up: Vec<Coord> = shots
            .iter()
            .filter(|&(x, y)| target.cell(x, y) == Some(Cell::Hit))
            .flat_map(|(x, y)| neighbours4(x, y))
            .filter(|&(x, y)| !shots.contains(x, y))
            .collect();
        follow_up.sort_unstable();
        follow_up.dedup();
        pick(rng, &follow_up)
            .or_else(|| pick(rng, &unfired(shots)))
            .unwrap_or((0, 0))
    }
}
