//! Chess set scene: a static frame around an 8x8 grid and one body per piece.
//!
//! The grid spans `[0, 8 * cell_size]` on both axes with rank 1 along the
//! bottom edge. Square centers sit at `(file + 0.5, rank + 0.5) * cell_size`.

use log::info;

use crate::common::{BoardConfig, Result};
use crate::math::Vec2;
use crate::objects::BodyId;
use crate::shapes::Shape;
use crate::world::World;

pub mod layout;

pub use layout::{Layout, Piece, PieceKind, Side, Square, BOARD_SIZE};

/// A piece body together with what it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceHandle {
    pub id: BodyId,
    pub piece: Piece,
    pub square: Square,
}

/// Ids of everything [`populate`] created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardHandles {
    /// Bottom, top, left, right.
    pub frame: [BodyId; 4],
    pub pieces: Vec<PieceHandle>,
}

impl BoardHandles {
    pub fn piece(&self, id: BodyId) -> Option<&PieceHandle> {
        self.pieces.iter().find(|h| h.id == id)
    }

    pub fn at(&self, square: Square) -> Option<&PieceHandle> {
        self.pieces.iter().find(|h| h.square == square)
    }
}

/// World-space center of a square.
pub fn square_center(square: Square, cell_size: f64) -> Vec2 {
    Vec2::new(
        (square.file as f64 + 0.5) * cell_size,
        (square.rank as f64 + 0.5) * cell_size,
    )
}

/// Adds the static frame and every piece of `layout` to `world`.
///
/// The frame is created first, then the pieces in layout text order, so the
/// resulting ids are the same every session.
pub fn populate(world: &mut World, layout: &Layout, config: &BoardConfig) -> Result<BoardHandles> {
    let cell = config.cell_size;
    let extent = cell * BOARD_SIZE as f64;
    let half = extent / 2.0;
    let t = config.wall_thickness;

    // Horizontal walls cover the corners
    let walls = [
        (Shape::rect(half + t, t / 2.0), Vec2::new(half, -t / 2.0)),
        (Shape::rect(half + t, t / 2.0), Vec2::new(half, extent + t / 2.0)),
        (Shape::rect(t / 2.0, half), Vec2::new(-t / 2.0, half)),
        (Shape::rect(t / 2.0, half), Vec2::new(extent + t / 2.0, half)),
    ];
    let mut frame = [BodyId(0); 4];
    for (slot, (shape, position)) in frame.iter_mut().zip(walls) {
        *slot = world.create_body(shape, position, 0.0, config.frame_restitution, config.frame_friction)?;
    }

    let mut pieces = Vec::with_capacity(layout.piece_count());
    for (square, piece) in layout.pieces() {
        let id = world.create_body(
            piece.kind.shape(cell),
            square_center(square, cell),
            piece.kind.mass(),
            config.piece_restitution,
            config.piece_friction,
        )?;
        pieces.push(PieceHandle { id, piece, square });
    }

    info!("board populated: {} frame walls, {} pieces", frame.len(), pieces.len());
    Ok(BoardHandles { frame, pieces })
}
