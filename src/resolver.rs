//! Shot resolution with connectivity-based sunk and win detection.

use alloc::vec::Vec;

use crate::board::Board;
use crate::common::{Cell, Coord, ShotError, ShotOutcome, ShotReport};
use crate::config::BOARD_SIZE;
use crate::shots::ShotSet;

/// Apply one shot at (`x`, `y`) to `board`, recording it in `shots`.
///
/// Range and repeat checks run before anything is written, so either error
/// leaves both `board` and `shots` untouched.
pub fn resolve(
    board: &mut Board,
    shots: &mut ShotSet,
    x: usize,
    y: usize,
) -> Result<ShotOutcome, ShotError> {
    shots.insert(x, y)?;
    match board.cell(x, y) {
        Some(Cell::Ship) => {
            board.set(x, y, Cell::Hit);
            Ok(ShotOutcome::Hit)
        }
        Some(Cell::Water) => {
            board.set(x, y, Cell::Miss);
            Ok(ShotOutcome::Miss)
        }
        // Marked by a shot from outside this set; only water turns into a miss.
        _ => Ok(ShotOutcome::Miss),
    }
}

/// Returns `true` if the ship through (`x`, `y`) has every segment hit.
///
/// Flood fills over 4-neighbours in `Ship` or `Hit` state; a start cell that
/// is not part of a ship is never sunk.
pub fn is_sunk(board: &Board, x: usize, y: usize) -> bool {
    if !matches!(board.cell(x, y), Some(Cell::Ship) | Some(Cell::Hit)) {
        return false;
    }
    let mut visited = [[false; BOARD_SIZE]; BOARD_SIZE];
    let mut stack = Vec::with_capacity(BOARD_SIZE);
    visited[y][x] = true;
    stack.push((x, y));
    while let Some((cx, cy)) = stack.pop() {
        if board.cell(cx, cy) == Some(Cell::Ship) {
            return false;
        }
        for (nx, ny) in neighbours4(cx, cy) {
            if !visited[ny][nx] && matches!(board.cell(nx, ny), Some(Cell::Ship) | Some(Cell::Hit))
            {
                visited[ny][nx] = true;
                stack.push((nx, ny));
            }
        }
    }
    true
}

/// Returns `true` if no intact ship segment remains.
pub fn is_won(board: &Board) -> bool {
    board.count(Cell::Ship) == 0
}

/// [`resolve`] followed by the sunk and win checks.
pub fn fire(
    board: &mut Board,
    shots: &mut ShotSet,
    x: usize,
    y: usize,
) -> Result<ShotReport, ShotError> {
    let outcome = resolve(board, shots, x, y)?;
    let (sunk, win) = match outcome {
        ShotOutcome::Hit => (is_sunk(board, x, y), is_won(board)),
        ShotOutcome::Miss => (false, false),
    };
    Ok(ShotReport { outcome, sunk, win })
}

pub(crate) fn neighbours4(x: usize, y: usize) -> impl Iterator<Item = Coord> {
    let left = x.checked_sub(1).map(|nx| (nx, y));
    let right = (x + 1 < BOARD_SIZE).then_some((x + 1, y));
    let up = y.checked_sub(1).map(|ny| (x, ny));
    let down = (y + 1 < BOARD_SIZE).then_some((x, y + 1));
    [left, right, up, down].into_iter().flatten()
}
