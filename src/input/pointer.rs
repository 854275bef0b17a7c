//! Pointer-driven drag state machine
//!
//! [`InputController`] turns pointer and touch events into drag sessions and
//! model mutations. It holds no board state of its own besides the active
//! [`DragSession`]; every handler receives an [`InputContext`] with the
//! model and the render pipeline.
//!
//! # States
//!
//! ```text
//!            down (active, own piece)           up / cancel
//!   Idle ─────────────────────────────► Dragging ───────────► Idle
//!                                        │   ▲
//!                                        └───┘ move
//! ```
//!
//! # Drop Semantics
//!
//! | Mode  | Source → Destination       | Effect                       |
//! |-------|----------------------------|------------------------------|
//! | setup | board → board              | relocate                     |
//! | setup | piece box → board          | place a copy                 |
//! | setup | board → piece box          | clear the source             |
//! | setup | piece box → piece box      | nothing                      |
//! | play  | board → board              | move transaction             |
//! | play  | board → piece box          | rejected                     |
//! | any   | anything → off surface     | nothing                      |
//!
//! Releasing always ends the drag and re-renders the full snapshot, even
//! when nothing changed.

use crate::game::model::{MoveResult, PositionModel};
use crate::input::drag::DragSession;
use crate::rendering::layout::Cell;
use crate::rendering::pipeline::RenderPipeline;
use crate::rendering::surface::Surface;
use board_rules::{Piece, RulesEngine, Square};
use tracing::{debug, trace};

/// Kind of device that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Pointer position relative to the top-left corner of the live surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub x: i32,
    pub y: i32,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn mouse(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            kind: PointerKind::Mouse,
        }
    }

    pub fn touch(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            kind: PointerKind::Touch,
        }
    }
}

/// What a pointer-up did to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Play mode move attempt
    Move(MoveResult),
    /// Setup mode: a piece box copy was placed
    Placed { square: Square, piece: Piece },
    /// Setup mode: a piece moved between board squares
    Relocated { from: Square, to: Square },
    /// Setup mode: a piece was dropped back into the piece box
    Cleared(Square),
    Unchanged,
}

/// Everything a handler may touch, borrowed for one call
pub struct InputContext<'a, R, S: Surface> {
    pub model: &'a mut PositionModel<R>,
    pub pipeline: &'a mut RenderPipeline<S>,
}

#[derive(Debug, Default)]
pub struct InputController {
    drag: Option<DragSession>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a drag if the pointer is on a piece the user may move.
    ///
    /// Returns whether a drag started.
    pub fn on_pointer_down<R: RulesEngine, S: Surface>(
        &mut self,
        ctx: InputContext<'_, R, S>,
        event: PointerEvent,
    ) -> bool {
        let InputContext { model, pipeline } = ctx;
        if !model.is_active() {
            return false;
        }

        let layout = *pipeline.layout();
        let Some(display) = layout.display_cell_at(event.x, event.y) else {
            return false;
        };
        let Some(cell) = layout.cell_for(display) else {
            return false;
        };

        let piece = match cell {
            Cell::Board(square) => model.piece_at(square),
            Cell::PieceBox { row, col } => model.piece_box().and_then(|pb| pb.get(row, col)),
        };
        let Some(piece) = piece else {
            return false;
        };
        if !model.mode().is_setup() && piece.color != model.turn() {
            trace!("[INPUT] {} is not to move", piece.color);
            return false;
        }

        self.drag = Some(DragSession::new(
            cell,
            piece,
            (event.x, event.y),
            Some(display),
        ));
        pipeline.compose(model, Some(cell));
        debug!("[INPUT] Drag started: {} from {:?}", piece.code(), cell);
        true
    }

    /// Redraw the drag frame. Returns whether a drag is in progress.
    pub fn on_pointer_move<R: RulesEngine, S: Surface>(
        &mut self,
        ctx: InputContext<'_, R, S>,
        event: PointerEvent,
    ) -> bool {
        let InputContext { model, pipeline } = ctx;
        let Some(session) = self.drag.as_mut() else {
            return false;
        };

        if let Some(previous) = session.painted.take() {
            pipeline.restore_block(previous);
        }
        session.pointer = (event.x, event.y);
        session.lifted = true;
        Self::paint_frame(session, model, pipeline);
        trace!("[INPUT] Drag at ({}, {})", event.x, event.y);
        true
    }

    /// Redraw the whole board, keeping an active drag on screen.
    ///
    /// The lifted piece is left out of the snapshot and drawn again at the
    /// pointer, or on its source cell if it has not moved yet.
    pub fn redisplay<R: RulesEngine, S: Surface>(&mut self, ctx: InputContext<'_, R, S>) {
        let InputContext { model, pipeline } = ctx;
        let Some(session) = self.drag.as_mut() else {
            pipeline.take_snapshot(model);
            return;
        };

        pipeline.compose(model, Some(session.source));
        pipeline.present();
        if session.lifted {
            session.painted = None;
            Self::paint_frame(session, model, pipeline);
        } else if matches!(session.source, Cell::Board(_)) {
            let display = pipeline.layout().display_for(session.source);
            pipeline.draw_resident(session.piece, display);
        }
        trace!("[INPUT] Redisplayed mid-drag from {:?}", session.source);
    }

    /// Hover highlight, resident piece and dragged piece at the session's
    /// pointer. Nothing is drawn off the board band.
    fn paint_frame<R: RulesEngine, S: Surface>(
        session: &mut DragSession,
        model: &PositionModel<R>,
        pipeline: &mut RenderPipeline<S>,
    ) {
        let (x, y) = session.pointer;
        let layout = *pipeline.layout();
        let Some(display) = layout.display_cell_at(x, y).filter(|d| d.is_board()) else {
            return;
        };

        if pipeline.options().highlight_hover {
            pipeline.draw_hover(display);
        }

        if let Some(Cell::Board(square)) = layout.cell_for(display) {
            if session.source != Cell::Board(square) {
                if let Some(resident) = model.piece_at(square) {
                    pipeline.draw_resident(resident, display);
                }
            }
        }

        pipeline.draw_drag_piece(session.piece, x, y, model.mode().is_setup());
        session.painted = Some(display);
    }

    /// Finish the drag. Returns `None` when no drag was active.
    pub fn on_pointer_up<R: RulesEngine, S: Surface>(
        &mut self,
        ctx: InputContext<'_, R, S>,
        event: PointerEvent,
    ) -> Option<DropOutcome> {
        let InputContext { model, pipeline } = ctx;
        let session = self.drag.take()?;
        let destination = pipeline.layout().cell_at(event.x, event.y);

        let outcome = if !model.is_active() {
            DropOutcome::Unchanged
        } else if model.mode().is_setup() {
            Self::drop_setup(model, &session, destination)
        } else {
            match (session.source, destination) {
                (Cell::Board(from), Some(Cell::Board(to))) => {
                    DropOutcome::Move(model.move_piece(from, to, None))
                }
                (_, Some(Cell::PieceBox { .. })) => DropOutcome::Move(MoveResult::Rejected),
                _ => DropOutcome::Unchanged,
            }
        };

        pipeline.take_snapshot(model);
        debug!("[INPUT] Drag ended: {:?}", outcome);
        Some(outcome)
    }

    fn drop_setup<R: RulesEngine>(
        model: &mut PositionModel<R>,
        session: &DragSession,
        destination: Option<Cell>,
    ) -> DropOutcome {
        match (session.source, destination) {
            (Cell::Board(from), Some(Cell::Board(to))) if from != to => {
                model.relocate(from, to);
                DropOutcome::Relocated { from, to }
            }
            (Cell::PieceBox { .. }, Some(Cell::Board(square))) => {
                model.place(square, session.piece);
                DropOutcome::Placed {
                    square,
                    piece: session.piece,
                }
            }
            (Cell::Board(from), Some(Cell::PieceBox { .. })) => {
                model.clear(from);
                DropOutcome::Cleared(from)
            }
            _ => DropOutcome::Unchanged,
        }
    }

    /// Drop the drag without touching the model and re-render
    pub fn on_pointer_cancel<R: RulesEngine, S: Surface>(&mut self, ctx: InputContext<'_, R, S>) {
        if self.drag.take().is_some() {
            debug!("[INPUT] Drag cancelled");
        }
        ctx.pipeline.take_snapshot(ctx.model);
    }

    /// Discard the drag without rendering. Returns whether one was active.
    pub fn abort(&mut self) -> bool {
        self.drag.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::BoardMode;
    use crate::rendering::layout::Layout;
    use crate::rendering::palette::Palette;
    use crate::rendering::pipeline::RenderOptions;
    use crate::rendering::raster::Raster;
    use board_rules::{Color, Role, ShakmatyRules};

    struct Rig {
        model: PositionModel<ShakmatyRules>,
        pipeline: RenderPipeline<Raster>,
        input: InputController,
    }

    impl Rig {
        fn new(mode: BoardMode) -> Self {
            let model = PositionModel::new(ShakmatyRules::new(), mode);
            let mut pipeline = RenderPipeline::new(
                Raster::new(0, 0),
                Raster::new(0, 0),
                Layout::new(40, mode),
                Palette::default(),
                RenderOptions::default(),
            );
            pipeline.take_snapshot(&model);
            Self {
                model,
                pipeline,
                input: InputController::new(),
            }
        }

        /// Controller plus a context over the rest of the rig
        fn parts(&mut self) -> (&mut InputController, InputContext<'_, ShakmatyRules, Raster>) {
            (
                &mut self.input,
                InputContext {
                    model: &mut self.model,
                    pipeline: &mut self.pipeline,
                },
            )
        }

        fn down(&mut self, x: i32, y: i32) -> bool {
            let (input, ctx) = self.parts();
            input.on_pointer_down(ctx, PointerEvent::mouse(x, y))
        }

        fn moved(&mut self, x: i32, y: i32) -> bool {
            let (input, ctx) = self.parts();
            input.on_pointer_move(ctx, PointerEvent::mouse(x, y))
        }

        fn up(&mut self, x: i32, y: i32) -> Option<DropOutcome> {
            let (input, ctx) = self.parts();
            input.on_pointer_up(ctx, PointerEvent::mouse(x, y))
        }

        fn drag(&mut self, from: (i32, i32), to: (i32, i32)) -> Option<DropOutcome> {
            self.down(from.0, from.1);
            self.moved(to.0, to.1);
            self.up(to.0, to.1)
        }
    }

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    // ========================================================================
    // Pointer down
    // ========================================================================

    #[test]
    fn test_down_on_own_piece_starts_drag() {
        let mut rig = Rig::new(BoardMode::Play);
        assert!(rig.down(180, 260));
        let session = rig.input.drag().unwrap();
        assert_eq!(session.source, Cell::Board(sq("e2")));
        assert!(!session.lifted);
    }

    #[test]
    fn test_down_rejects_empty_opponent_and_inactive() {
        let mut rig = Rig::new(BoardMode::Play);
        assert!(!rig.down(180, 180), "empty square");
        assert!(!rig.down(180, 60), "black pawn with white to move");
        rig.model.set_active(false);
        assert!(!rig.down(180, 260), "inactive board");
        assert!(!rig.down(-5, 10), "off surface");
        assert!(!rig.input.is_dragging());
    }

    #[test]
    fn test_down_keeps_live_surface() {
        let mut rig = Rig::new(BoardMode::Play);
        let before = rig.pipeline.live().clone();
        rig.down(180, 260);
        assert_eq!(rig.pipeline.live(), &before);
    }

    // ========================================================================
    // Drop
    // ========================================================================

    #[test]
    fn test_drag_e2_e4_commits() {
        let mut rig = Rig::new(BoardMode::Play);
        let outcome = rig.drag((180, 260), (180, 180)).unwrap();

        assert!(matches!(outcome, DropOutcome::Move(MoveResult::Committed(_))));
        assert_eq!(rig.model.turn(), Color::Black);
        assert!(!rig.input.is_dragging());
        assert_eq!(rig.pipeline.live(), rig.pipeline.snapshot());
    }

    #[test]
    fn test_illegal_drop_restores_board() {
        let mut rig = Rig::new(BoardMode::Play);
        let before_grid = rig.model.position().grid;
        let before_live = rig.pipeline.live().clone();

        let outcome = rig.drag((180, 260), (180, 140)).unwrap();
        assert_eq!(outcome, DropOutcome::Move(MoveResult::Rejected));
        assert_eq!(rig.model.position().grid, before_grid);
        assert_eq!(rig.pipeline.live(), &before_live);
    }

    #[test]
    fn test_flipped_drag_uses_black_squares() {
        let mut rig = Rig::new(BoardMode::Play);
        rig.model.move_piece(sq("e2"), sq("e4"), None);
        rig.pipeline.flip();
        rig.pipeline.take_snapshot(&rig.model);

        // Flipped: e7 is display (6, 3), e5 is display (4, 3)
        let outcome = rig.drag((140, 260), (140, 180)).unwrap();
        assert!(matches!(outcome, DropOutcome::Move(MoveResult::Committed(_))));
        assert_eq!(
            rig.model.piece_at(sq("e5")),
            Some(Piece::new(Color::Black, Role::Pawn))
        );
    }

    #[test]
    fn test_up_without_drag_is_ignored() {
        let mut rig = Rig::new(BoardMode::Play);
        assert_eq!(rig.up(10, 10), None);
    }

    #[test]
    fn test_board_deactivated_mid_drag() {
        let mut rig = Rig::new(BoardMode::Play);
        rig.down(180, 260);
        rig.model.set_active(false);
        let outcome = rig.up(180, 180);

        assert_eq!(outcome, Some(DropOutcome::Unchanged));
        assert_eq!(rig.model.move_count(), 0);
        assert!(!rig.input.is_dragging());
    }

    #[test]
    fn test_cancel_discards_drag() {
        let mut rig = Rig::new(BoardMode::Play);
        rig.down(180, 260);
        let (input, ctx) = rig.parts();
        input.on_pointer_cancel(ctx);

        assert!(!rig.input.is_dragging());
        assert_eq!(rig.model.piece_at(sq("e2")).map(|p| p.role), Some(Role::Pawn));
        assert_eq!(rig.pipeline.live(), rig.pipeline.snapshot());
    }

    // ========================================================================
    // Setup mode
    // ========================================================================

    #[test]
    fn test_setup_piece_box_round_trip() {
        let mut rig = Rig::new(BoardMode::Setup);
        rig.model.position_clear();

        // White queen sits in piece box cell (0, 1)
        let placed = rig.drag((60, 340), (180, 180)).unwrap();
        assert_eq!(
            placed,
            DropOutcome::Placed {
                square: sq("e4"),
                piece: Piece::new(Color::White, Role::Queen)
            }
        );

        let cleared = rig.drag((180, 180), (60, 380)).unwrap();
        assert_eq!(cleared, DropOutcome::Cleared(sq("e4")));
        assert_eq!(rig.model.piece_at(sq("e4")), None);
        assert_eq!(rig.model.position().piece_count(), 0);
    }

    #[test]
    fn test_setup_ignores_turn_and_legality() {
        let mut rig = Rig::new(BoardMode::Setup);
        // Black rook a8 to the middle of the board, white to move
        let outcome = rig.drag((20, 20), (180, 180)).unwrap();
        assert_eq!(
            outcome,
            DropOutcome::Relocated {
                from: sq("a8"),
                to: sq("e4")
            }
        );
        assert_eq!(rig.model.turn(), Color::White);
        assert_eq!(rig.model.move_count(), 0);
    }

    #[test]
    fn test_setup_box_to_box_is_noop() {
        let mut rig = Rig::new(BoardMode::Setup);
        let before = rig.model.position().clone();
        let outcome = rig.drag((20, 340), (300, 380)).unwrap();
        assert_eq!(outcome, DropOutcome::Unchanged);
        assert_eq!(rig.model.position(), &before);
    }

    // ========================================================================
    // Drag frames
    // ========================================================================

    #[test]
    fn test_move_off_board_erases_drag_image() {
        let mut rig = Rig::new(BoardMode::Setup);
        rig.down(180, 260);
        assert!(rig.moved(180, 220));
        assert!(rig.moved(180, 350));

        let session = rig.input.drag().unwrap();
        assert!(session.lifted);
        assert_eq!(session.painted, None);
        // The board band matches the lifted snapshot again
        for y in (0..320).step_by(7) {
            for x in (0..320).step_by(7) {
                assert_eq!(rig.pipeline.live().pixel(x, y), rig.pipeline.snapshot().pixel(x, y));
            }
        }
    }
}
