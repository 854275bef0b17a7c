//! Dual-surface render pipeline
//!
//! [`RenderPipeline`] owns two surfaces:
//!
//! - **snapshot**: the fully composed board (squares, labels, last move
//!   highlight, resting pieces, piece box in setup mode)
//! - **live**: what the user sees, normally an exact copy of the snapshot
//!
//! # Full Path
//!
//! [`take_snapshot`](RenderPipeline::take_snapshot) recomposes the snapshot
//! from the model and copies it onto the live surface. It runs on every
//! commit, resize, flip, mode change and asset load.
//!
//! # Partial Path
//!
//! While a piece is dragged only the live surface is touched:
//! [`restore_block`](RenderPipeline::restore_block) copies a 3×3 block back
//! from the snapshot, then the hover highlight, any resident piece and the
//! dragged piece are drawn on top. The snapshot is never mutated on this
//! path. Ending a drag always goes back through the full path.

use crate::assets::AssetStore;
use crate::core::config::BoardConfig;
use crate::core::state::BoardMode;
use crate::game::model::PositionModel;
use crate::rendering::board::{draw_labels, draw_squares};
use crate::rendering::effects::{draw_hover, draw_last_move_highlight};
use crate::rendering::layout::{Cell, DisplayCell, Layout};
use crate::rendering::palette::Palette;
use crate::rendering::pieces::{draw_board_pieces, draw_piece, draw_piece_at, draw_piece_box};
use crate::rendering::surface::{Rect, Surface};
use board_rules::{Piece, RulesEngine};
use tracing::trace;

/// Render switches taken from the config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub highlight_last_move: bool,
    pub highlight_hover: bool,
    pub show_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&BoardConfig::default())
    }
}

impl From<&BoardConfig> for RenderOptions {
    fn from(config: &BoardConfig) -> Self {
        Self {
            highlight_last_move: config.highlight_last_move,
            highlight_hover: config.highlight_hover,
            show_labels: config.show_row_col_labels,
        }
    }
}

pub struct RenderPipeline<S: Surface> {
    snapshot: S,
    live: S,
    layout: Layout,
    palette: Palette,
    options: RenderOptions,
    assets: AssetStore<S::Image>,
}

impl<S: Surface> RenderPipeline<S> {
    /// Wrap two host surfaces; both are sized to the layout
    pub fn new(
        snapshot: S,
        live: S,
        layout: Layout,
        palette: Palette,
        options: RenderOptions,
    ) -> Self {
        let mut pipeline = Self {
            snapshot,
            live,
            layout,
            palette,
            options,
            assets: AssetStore::new(),
        };
        pipeline.sync_size();
        pipeline
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    pub fn live(&self) -> &S {
        &self.live
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    pub fn assets(&self) -> &AssetStore<S::Image> {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetStore<S::Image> {
        &mut self.assets
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Apply a new square size and row count, resizing both surfaces
    pub fn set_geometry(&mut self, square_size: u32, mode: BoardMode) {
        self.layout.set_square_size(square_size);
        self.layout.set_mode(mode);
        self.sync_size();
    }

    pub fn flip(&mut self) {
        self.layout.flip();
    }

    fn sync_size(&mut self) {
        let (width, height) = self.layout.surface_size();
        for surface in [&mut self.snapshot, &mut self.live] {
            if surface.width() != width || surface.height() != height {
                surface.resize(width, height);
            }
        }
    }

    // ========================================================================
    // Full path
    // ========================================================================

    /// Recompose the snapshot and show it
    pub fn take_snapshot<R: RulesEngine>(&mut self, model: &PositionModel<R>) {
        self.compose(model, None);
        self.present();
    }

    /// Recompose the snapshot only, leaving `lifted` out.
    ///
    /// The live surface is untouched, so a freshly lifted piece stays
    /// visible until the first drag frame restores over it.
    pub fn compose<R: RulesEngine>(&mut self, model: &PositionModel<R>, lifted: Option<Cell>) {
        let Self {
            snapshot,
            layout,
            palette,
            options,
            assets,
            ..
        } = self;

        let bounds = snapshot.bounds();
        snapshot.clear_rect(bounds);
        draw_squares(snapshot, layout, palette, assets);

        if options.show_labels {
            draw_labels(snapshot, layout, palette);
        }

        if options.highlight_last_move {
            if let Some(last_move) = model.last_move() {
                draw_last_move_highlight(snapshot, layout, palette, last_move);
            }
        }

        let skip = match lifted {
            Some(Cell::Board(square)) => Some(square),
            _ => None,
        };
        draw_board_pieces(snapshot, layout, palette, assets, model.position(), skip);

        if let Some(piece_box) = model.piece_box() {
            draw_piece_box(snapshot, layout, palette, assets, piece_box);
        }
        trace!("[RENDER] Snapshot composed (lifted: {:?})", lifted);
    }

    /// Copy the whole snapshot onto the live surface
    pub fn present(&mut self) {
        let bounds = self.live.bounds();
        self.live.clear_rect(bounds);
        self.live.copy_region_from(&self.snapshot, bounds);
    }

    // ========================================================================
    // Partial path
    // ========================================================================

    /// Restore the 3×3 block around a board cell from the snapshot,
    /// clipped to the board band
    pub fn restore_block(&mut self, center: DisplayCell) {
        if !center.is_board() {
            return;
        }
        let s = self.layout.square_size() as i32;
        let block = Rect::new(
            (i32::from(center.col) - 1) * s,
            (i32::from(center.row) - 1) * s,
            (3 * s) as u32,
            (3 * s) as u32,
        );
        if let Some(region) = block.intersect(&self.layout.board_rect()) {
            self.live.copy_region_from(&self.snapshot, region);
        }
    }

    pub fn draw_hover(&mut self, display: DisplayCell) {
        draw_hover(&mut self.live, &self.layout, &self.palette, display);
    }

    /// Redraw a piece resting on a cell of the live surface
    pub fn draw_resident(&mut self, piece: Piece, display: DisplayCell) {
        draw_piece_at(
            &mut self.live,
            &self.layout,
            &self.palette,
            &self.assets,
            piece,
            display,
        );
    }

    /// Draw the dragged piece centered on (`x`, `y`). With `confine` the
    /// drawing is clipped to the board band. Returns the destination rect.
    pub fn draw_drag_piece(&mut self, piece: Piece, x: i32, y: i32, confine: bool) -> Rect {
        let s = self.layout.square_size();
        let half = (s / 2) as i32;
        let dst = Rect::new(x - half, y - half, s, s);
        let clip = confine.then(|| self.layout.board_rect());
        draw_piece(&mut self.live, &self.assets, &self.palette, piece, dst, clip);
        dst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::palette::Rgba;
    use crate::rendering::raster::Raster;
    use board_rules::{ShakmatyRules, Square};

    fn pipeline(mode: BoardMode) -> RenderPipeline<Raster> {
        RenderPipeline::new(
            Raster::new(0, 0),
            Raster::new(0, 0),
            Layout::new(40, mode),
            Palette::default(),
            RenderOptions::default(),
        )
    }

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_surfaces_sized_by_mode() {
        let p = pipeline(BoardMode::Play);
        assert_eq!((p.live().width(), p.live().height()), (320, 320));
        let p = pipeline(BoardMode::Setup);
        assert_eq!((p.snapshot().width(), p.snapshot().height()), (320, 400));
    }

    #[test]
    fn test_take_snapshot_is_idempotent() {
        let model = PositionModel::new(ShakmatyRules::new(), BoardMode::Play);
        let mut p = pipeline(BoardMode::Play);
        p.take_snapshot(&model);
        let first = p.live().clone();
        p.take_snapshot(&model);
        assert_eq!(p.live(), &first);
        assert_eq!(p.live(), p.snapshot(), "live mirrors the snapshot");
    }

    #[test]
    fn test_compose_leaves_live_untouched() {
        let model = PositionModel::new(ShakmatyRules::new(), BoardMode::Play);
        let mut p = pipeline(BoardMode::Play);
        p.take_snapshot(&model);
        let before = p.live().clone();

        p.compose(&model, Some(Cell::Board(sq("e2"))));
        assert_eq!(p.live(), &before);
        assert_eq!(p.snapshot().pixel(180, 260), Some(p.palette().light), "e2 lifted out of the snapshot");
    }

    #[test]
    fn test_restore_block_is_clipped_to_board() {
        let model = PositionModel::new(ShakmatyRules::new(), BoardMode::Setup);
        let mut p = pipeline(BoardMode::Setup);
        p.take_snapshot(&model);

        // Scribble over the whole live surface, then restore around a1
        let scribble = Rgba::rgb(1, 2, 3);
        let bounds = p.live().bounds();
        p.live.fill_rect(bounds, scribble);
        p.restore_block(DisplayCell { row: 7, col: 0 });

        assert_eq!(p.live().pixel(5, 245), p.snapshot().pixel(5, 245));
        assert_eq!(p.live().pixel(75, 315), p.snapshot().pixel(75, 315));
        assert_eq!(p.live().pixel(125, 315), Some(scribble), "outside the block");
        assert_eq!(p.live().pixel(5, 325), Some(scribble), "piece box band is never restored");
    }

    #[test]
    fn test_confined_drag_piece_stays_on_board() {
        let model = PositionModel::new(ShakmatyRules::new(), BoardMode::Setup);
        let mut p = pipeline(BoardMode::Setup);
        p.take_snapshot(&model);
        let before = p.live().clone();

        let piece = model.piece_at(sq("e2")).unwrap();
        let dst = p.draw_drag_piece(piece, 100, 315, true);
        assert_eq!(dst, Rect::new(80, 295, 40, 40));
        for y in 320..400 {
            for x in 0..320 {
                assert_eq!(p.live().pixel(x, y), before.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_last_move_highlight_follows_option() {
        let mut model = PositionModel::new(ShakmatyRules::new(), BoardMode::Play);
        model.move_piece(sq("e2"), sq("e4"), None);

        let mut p = pipeline(BoardMode::Play);
        p.take_snapshot(&model);
        // e2 is light, now empty
        assert_eq!(p.live().pixel(165, 245), Some(p.palette().light));

        p.set_options(RenderOptions {
            highlight_last_move: true,
            ..RenderOptions::default()
        });
        p.take_snapshot(&model);
        assert_ne!(p.live().pixel(165, 245), Some(p.palette().light));
    }
}
