/// Movement and collision rules, truth-table driven.
///
/// Pure functions over the board and the snake body. They decide what is
/// legal; the step function performs it.
///
/// ### Turning
/// ┌──────────────────────────────┬─────────┐
/// │ Condition                     │ Accept? │
/// ├──────────────────────────────┼─────────┤
/// │ length == 1                   │ YES     │
/// │ requested == reverse(current) │ NO      │
/// │ Otherwise                     │ YES     │
/// └──────────────────────────────┴─────────┘
///
/// ### Moving (candidate = head + delta, unclamped)
/// ┌──────────────────────────────────────────┬──────────────┐
/// │ Condition (priority order)                │ Outcome      │
/// ├──────────────────────────────────────────┼──────────────┤
/// │ candidate outside the grid                │ Wall         │
/// │ length > 1, candidate on body minus tail  │ SelfHit      │
/// │ candidate == food                         │ Grow         │
/// │ Otherwise                                 │ Slide        │
/// └──────────────────────────────────────────┴──────────────┘
///
/// The tail is excluded from the self check because it vacates the cell
/// on the same tick. This holds even when the snake is about to grow.

use std::collections::VecDeque;

use super::grid::{Cell, Direction, Grid};

/// Result of resolving one move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    Wall,
    SelfHit,
    Grow,
    Slide,
}

/// May the snake turn from `current` to `requested`?
pub fn accept_turn(current: Direction, requested: Direction, len: usize) -> bool {
    len <= 1 || requested != current.opposite()
}

/// Does `cell` hit the body, ignoring the tail that vacates this tick?
pub fn hits_body(body: &VecDeque<Cell>, cell: Cell) -> bool {
    if body.len() <= 1 {
        return false;
    }
    body.iter().take(body.len() - 1).any(|&c| c == cell)
}

/// Classify the move of `body` onto `candidate`.
pub fn resolve_move(grid: Grid, body: &VecDeque<Cell>, candidate: Cell, food: Cell) -> MoveOutcome {
    if !grid.contains(candidate) {
        MoveOutcome::Wall
    } else if hits_body(body, candidate) {
        MoveOutcome::SelfHit
    } else if candidate == food {
        MoveOutcome::Grow
    } else {
        MoveOutcome::Slide
    }
}

/// Is `cell` occupied by any segment, tail included?
pub fn occupied(body: &VecDeque<Cell>, cell: Cell) -> bool {
    body.iter().any(|&c| c == cell)
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn body(cells: &[(i32, i32)]) -> VecDeque<Cell> {
        cells.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    // ── Turning ──

    #[test]
    fn reversal_denied_when_long() {
        assert!(!accept_turn(Direction::Right, Direction::Left, 2));
        assert!(!accept_turn(Direction::Up, Direction::Down, 5));
    }

    #[test]
    fn reversal_allowed_for_single_segment() {
        assert!(accept_turn(Direction::Right, Direction::Left, 1));
        assert!(accept_turn(Direction::Down, Direction::Up, 1));
    }

    #[test]
    fn perpendicular_and_same_always_allowed() {
        assert!(accept_turn(Direction::Right, Direction::Up, 4));
        assert!(accept_turn(Direction::Right, Direction::Down, 4));
        assert!(accept_turn(Direction::Right, Direction::Right, 4));
    }

    // ── Moving ──

    #[test]
    fn wall_on_every_edge() {
        let g = Grid::default();
        let b = body(&[(0, 0)]);
        let food = Cell::new(9, 4);
        assert_eq!(resolve_move(g, &b, Cell::new(-1, 0), food), MoveOutcome::Wall);
        assert_eq!(resolve_move(g, &b, Cell::new(0, -1), food), MoveOutcome::Wall);
        assert_eq!(resolve_move(g, &b, Cell::new(16, 0), food), MoveOutcome::Wall);
        assert_eq!(resolve_move(g, &b, Cell::new(0, 8), food), MoveOutcome::Wall);
    }

    #[test]
    fn tail_cell_is_free() {
        // head (1,0), tail (0,1)
        let b = body(&[(1, 0), (0, 0), (0, 1)]);
        assert!(!hits_body(&b, Cell::new(0, 1)));
        assert!(hits_body(&b, Cell::new(0, 0)));
    }

    #[test]
    fn self_hit_before_food() {
        let g = Grid::default();
        let b = body(&[(2, 2), (2, 3), (3, 3), (3, 2), (3, 1)]);
        // (3,2) is body, and also where food happens to be
        let food = Cell::new(3, 2);
        assert_eq!(resolve_move(g, &b, Cell::new(3, 2), food), MoveOutcome::SelfHit);
    }

    #[test]
    fn grow_and_slide() {
        let g = Grid::default();
        let b = body(&[(5, 2)]);
        assert_eq!(resolve_move(g, &b, Cell::new(6, 2), Cell::new(6, 2)), MoveOutcome::Grow);
        assert_eq!(resolve_move(g, &b, Cell::new(6, 2), Cell::new(10, 4)), MoveOutcome::Slide);
    }

    #[test]
    fn occupied_includes_tail() {
        let b = body(&[(1, 0), (0, 0)]);
        assert!(occupied(&b, Cell::new(0, 0)));
        assert!(!occupied(&b, Cell::new(2, 0)));
    }
}
