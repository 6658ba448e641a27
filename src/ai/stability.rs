//! Disc protection analysis used by the stability term.
//!
//! Every occupied square gets one [`Protection`] per axis (the four lines
//! through it). A walk along an axis steps outwards in both directions at
//! once; an edge anchors the line, an empty square ends that side, and
//! opponent discs are crossed while being remembered. Discs crossed on the
//! way are classified from the same walk: own-colour ones inherit the result
//! for that axis, and all of them are recursed into for their other axes.

use crate::board::{Board, in_bounds, pos_to_xy, xy_to_pos};
use crate::types::{BOARD_SIZE, NUM_SQUARES, Player};

pub const AXIS_COUNT: usize = 4;

/// Main diagonal, vertical, anti-diagonal, horizontal.
const AXES: [[(i32, i32); 2]; AXIS_COUNT] = [
    [(-1, -1), (1, 1)],
    [(0, -1), (0, 1)],
    [(1, -1), (-1, 1)],
    [(-1, 0), (1, 0)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    /// Anchored by an edge or flanked by the opponent on both sides.
    Protected,
    /// Both sides run into empty squares without opponent contact.
    Unprotected,
    /// Opponent contact on exactly one side and no edge.
    Takeable,
}

/// Per-disc summary of its four axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscStability {
    Stable,
    Danger,
    Unprotected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideTally {
    pub stable: u32,
    pub danger: u32,
    pub unprotected: u32,
}

/// Disc counts split by side, relative to the player the tally was made for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StabilityTally {
    pub mine: SideTally,
    pub theirs: SideTally,
}

#[derive(Debug, Clone, Copy, Default)]
struct Walker {
    dx: i32,
    dy: i32,
    active: bool,
    reached_edge: bool,
    reached_opponent: bool,
}

impl Walker {
    fn new((dx, dy): (i32, i32)) -> Self {
        Self {
            dx,
            dy,
            active: true,
            ..Self::default()
        }
    }
}

/// Axis classifications for one position. Built fresh for every evaluation.
#[derive(Debug, Clone)]
pub struct ProtectionMap {
    slots: [[Option<Protection>; AXIS_COUNT]; NUM_SQUARES],
}

impl ProtectionMap {
    pub fn analyze(board: &Board) -> Self {
        let mut map = Self {
            slots: [[None; AXIS_COUNT]; NUM_SQUARES],
        };

        // Reachable positions are connected, so the first seed covers the
        // whole board; later seeds only fire on disconnected setups.
        for x in 0..BOARD_SIZE as i32 {
            for y in 0..BOARD_SIZE as i32 {
                let pos = xy_to_pos(x, y);
                if board.cell(pos).owner().is_some() && map.slots[pos].contains(&None) {
                    map.classify(board, pos);
                }
            }
        }

        map
    }

    /// Classifications of `pos`, `None` slots only for empty squares.
    pub fn axes(&self, pos: usize) -> [Option<Protection>; AXIS_COUNT] {
        self.slots[pos]
    }

    pub fn disc(&self, pos: usize) -> DiscStability {
        let axes = &self.slots[pos];
        if axes.iter().all(|axis| *axis == Some(Protection::Protected)) {
            DiscStability::Stable
        } else if axes.contains(&Some(Protection::Takeable)) {
            DiscStability::Danger
        } else {
            DiscStability::Unprotected
        }
    }

    pub fn tally(&self, board: &Board, player: Player) -> StabilityTally {
        let mut tally = StabilityTally::default();
        for pos in 0..NUM_SQUARES {
            let Some(owner) = board.cell(pos).owner() else {
                continue;
            };
            let side = if owner == player {
                &mut tally.mine
            } else {
                &mut tally.theirs
            };
            match self.disc(pos) {
                DiscStability::Stable => side.stable += 1,
                DiscStability::Danger => side.danger += 1,
                DiscStability::Unprotected => side.unprotected += 1,
            }
        }
        tally
    }

    fn classify(&mut self, board: &Board, pos: usize) {
        let Some(player) = board.cell(pos).owner() else {
            return;
        };
        let (x, y) = pos_to_xy(pos);

        for (axis, [left, right]) in AXES.into_iter().enumerate() {
            if self.slots[pos][axis].is_some() {
                continue;
            }

            let mut walkers = [Walker::new(left), Walker::new(right)];
            let mut passed = Vec::new();
            let mut step = 1;
            while walkers.iter().any(|walker| walker.active) {
                for walker in walkers.iter_mut().filter(|walker| walker.active) {
                    let cx = x + walker.dx * step;
                    let cy = y + walker.dy * step;
                    if !in_bounds(cx, cy) {
                        walker.reached_edge = true;
                        walker.active = false;
                        continue;
                    }
                    let square = xy_to_pos(cx, cy);
                    match board.cell(square).owner() {
                        None => walker.active = false,
                        Some(owner) => {
                            if owner != player {
                                walker.reached_opponent = true;
                            }
                            passed.push(square);
                        }
                    }
                }
                step += 1;
            }

            let verdict = if walkers.iter().any(|walker| walker.reached_edge)
                || walkers.iter().all(|walker| walker.reached_opponent)
            {
                Protection::Protected
            } else if walkers.iter().any(|walker| walker.reached_opponent) {
                Protection::Takeable
            } else {
                Protection::Unprotected
            };
            self.slots[pos][axis] = Some(verdict);

            // Own discs on the line take this verdict even if an earlier
            // recursion already walked the axis for them.
            for square in passed {
                if board.cell(square).owner() == Some(player) {
                    self.slots[square][axis] = Some(verdict);
                }
                self.classify(board, square);
            }
        }
    }
}
