use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{BoardGenerator, Board, Cell, RuleSet, BOARD_SIZE};

fn ship_cells(board: &Board) -> Vec<(usize, usize)> {
    (0..BOARD_SIZE)
        .flat_map(|y| (0..BOARD_SIZE).map(move |x| (x, y)))
        .filter(|&(x, y)| board.cell(x, y) == Some(Cell::Ship))
        .collect()
}

/// Group ship cells into 8-connected components.
fn components8(board: &Board) -> Vec<Vec<(usize, usize)>> {
    let mut seen = [[false; BOARD_SIZE]; BOARD_SIZE];
    let mut out = Vec::new();
    for (x, y) in ship_cells(board) {
        if seen[y][x] {
            continue;
        }
        let mut group = Vec::new();
        let mut stack = vec![(x, y)];
        seen[y][x] = true;
        while let Some((cx, cy)) = stack.pop() {
            group.push((cx, cy));
            for nx in cx.saturating_sub(1)..=(cx + 1).min(BOARD_SIZE - 1) {
                for ny in cy.saturating_sub(1)..=(cy + 1).min(BOARD_SIZE - 1) {
                    if !seen[ny][nx] && board.cell(nx, ny) == Some(Cell::Ship) {
                        seen[ny][nx] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }
        out.push(group);
    }
    out
}

fn straight(group: &[(usize, usize)]) -> bool {
    let same_row = group.iter().all(|&(_, y)| y == group[0].1);
    let same_col = group.iter().all(|&(x, _)| x == group[0].0);
    let (lo, hi) = if same_row {
        let xs = group.iter().map(|&(x, _)| x);
        (xs.clone().min().unwrap(), xs.max().unwrap())
    } else if same_col {
        let ys = group.iter().map(|&(_, y)| y);
        (ys.clone().min().unwrap(), ys.max().unwrap())
    } else {
        return false;
    };
    hi - lo + 1 == group.len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn spaced_ships_never_touch(seed in any::<u64>()) {
        let rules = RuleSet::classic();
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = BoardGenerator::from_rules(&rules)
            .generate_with_retries(rules.generation_retries, &mut rng)
            .unwrap();

        // With spacing, every 8-connected component is exactly one straight ship.
        let groups = components8(&board);
        let mut lengths: Vec<usize> = groups.iter().map(Vec::len).collect();
        lengths.sort_unstable();
        prop_assert_eq!(lengths, vec![1, 1, 1, 1, 2, 2, 2, 3, 3, 4]);
        for group in &groups {
            prop_assert!(straight(group));
        }
    }

    #[test]
    fn loose_fleet_keeps_cell_count(seed in any::<u64>()) {
        let rules = RuleSet::loose();
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = BoardGenerator::from_rules(&rules)
            .generate_with_retries(rules.generation_retries, &mut rng)
            .unwrap();
        prop_assert_eq!(board.count(Cell::Ship), rules.ship_cells());
        prop_assert_eq!(board.count(Cell::Hit) + board.count(Cell::Miss), 0);
    }
}
