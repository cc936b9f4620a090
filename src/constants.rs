//! Constants for board geometry, move encoding, and search parameters.
//!
//! The board is a 9x9 grid of cells. A cell is packed into a single byte
//! with the row in the high nibble and the column in the low nibble, so
//! moving one row up adds 16 and moving one column right adds 1. Wall
//! slots are numbered 0..128: bit 6 selects the orientation, bits 5-3 the
//! anchor row and bits 2-0 the anchor column of the 8x8 intersection grid.

// =============================================================================
// Board Geometry
// =============================================================================

/// Cells per side of the grid.
pub const N: usize = 9;

/// Highest row/column index.
pub const MAX_COORD: u8 = 8;

/// Upper bound (exclusive) on packed cell values: cell 0x88 is the last
/// legal cell, so arrays indexed by cell need 137 entries.
pub const CELL_SPACE: usize = 137;

/// Number of addressable wall slots (8x8 intersections, 2 orientations).
pub const WALL_SLOTS: usize = 128;

/// Walls each side starts with.
pub const WALLS_PER_PLAYER: u8 = 10;

/// White's starting cell: row 0, column 4.
pub const WHITE_START: u8 = 0x04;

/// Black's starting cell: row 8, column 4.
pub const BLACK_START: u8 = 0x84;

// =============================================================================
// Edge-Block Table
// =============================================================================
//
// Blocked grid edges are stored directionally: entry `cell + DIR` records
// that the edge leaving `cell` in direction DIR is severed by a wall. Each
// wall severs two undirected edges, i.e. four table entries.

/// Table offset for the edge toward the next column.
pub const RIGHT: usize = 0;

/// Table offset for the edge toward the previous row.
pub const DOWN: usize = 256;

/// Table offset for the edge toward the previous column.
pub const LEFT: usize = 512;

/// Table offset for the edge toward the next row.
pub const UP: usize = 768;

/// Size of the directional edge-block table (UP + last cell + 1).
pub const EDGE_TABLE: usize = UP + CELL_SPACE - 1;

// =============================================================================
// Move Encoding
// =============================================================================

/// Bit 7: set for wall placements, clear for pawn moves.
pub const WALL_FLAG: u8 = 0x80;

/// Bit 6 of a wall slot: set for horizontal walls.
pub const WALL_HORIZONTAL: u8 = 0x40;

/// Pawn-move bits 5-4: vertical magnitude, pre-scaled by 16 rows-per-unit
/// so it can be added to a packed cell directly.
pub const PAWN_ROW_MAG: u8 = 0x30;

/// Pawn-move bit 3: vertical component moves toward higher rows.
pub const PAWN_ROW_POS: u8 = 0x08;

/// Pawn-move bit 2: horizontal component moves toward higher columns.
pub const PAWN_COL_POS: u8 = 0x04;

/// Pawn-move bits 1-0: horizontal magnitude in columns.
pub const PAWN_COL_MAG: u8 = 0x03;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default MCTS rollout budget per decision.
pub const N_ROLLOUTS: u32 = 10_000;

/// Independent playouts per expansion, tallied before one backpropagation.
pub const SIMULATIONS_PER_ROLLOUT: u32 = 3;

/// UCT exploration constant.
pub const EXPLORATION: f32 = std::f32::consts::SQRT_2;

/// Rollout policy parameter: 1-in-N chance of sampling the probable set
/// instead of following the shortest path.
pub const PAWN_BIAS: u32 = 4;

/// Ply cap for a single playout; capped games are scored by pawn distance.
pub const ROLLOUT_PLIES: usize = 40;

/// Retries when a sampled rollout wall turns out illegal.
pub const WALL_RETRIES: u32 = 3;

/// Prior awarded to the shortest-path pawn move when no model is loaded.
pub const PRIOR_SHORTEST_PATH: f32 = 100.0;

/// Scale applied to model scores (a normalized distribution) so they sit in
/// the same range as the shortest-path prior.
pub const PRIOR_MODEL_SCALE: f32 = 100.0;

/// Model stages per side: one predictor per placed-wall count, 0..=20.
pub const MODEL_STAGES: usize = 21;

// =============================================================================
// Heuristic Evaluation (minimax collaborator)
// =============================================================================

/// Score of a decided game, positive for white.
pub const WIN_SCORE: f32 = 1000.0;

/// Weight of a remaining wall.
pub const WEIGHT_WALLS: f32 = 0.5;

/// Weight of a wall placed between a pawn and its goal row.
pub const WEIGHT_WALLS_AHEAD: f32 = -0.2;

/// Weight of an open neighbouring cell.
pub const WEIGHT_MOBILITY: f32 = 0.1;
