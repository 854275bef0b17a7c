//! The board facade
//!
//! [`Board`] is one fully owned widget instance: the position model, the
//! render pipeline over two host surfaces and the input controller. Every
//! public operation an embedding application uses lives here.
//!
//! ```rust,ignore
//! let config = BoardConfig::with_size(320, 320);
//! let mut board = Board::new(config, Raster::new(0, 0), Raster::new(0, 0))?;
//! board.subscribe(Some(MOVE_BEFORE), |outcome| {
//!     println!("{}", serde_json::to_string(outcome)?);
//!     Ok(())
//! });
//! board.move_san("e4");
//! ```
//!
//! # Rendering
//!
//! Operations that change what the board shows re-render the full snapshot
//! before returning. `set_active` and `set_last_move` only change state; call
//! [`display`](Board::display) afterwards to show the change.

use crate::assets::AssetKey;
use crate::core::config::BoardConfig;
use crate::core::error::BoardResult;
use crate::core::state::BoardMode;
use crate::game::events::{MoveOutcome, SubscriberId};
use crate::game::model::{MoveResult, PositionModel};
use crate::input::pointer::{DropOutcome, InputContext, InputController, PointerEvent};
use crate::rendering::layout::Layout;
use crate::rendering::palette::Palette;
use crate::rendering::pipeline::{RenderOptions, RenderPipeline};
use crate::rendering::surface::Surface;
use board_rules::{Color, RulesEngine, ShakmatyRules, Square};
use tracing::{debug, info, warn};

pub struct Board<S: Surface, R = ShakmatyRules> {
    config: BoardConfig,
    model: PositionModel<R>,
    pipeline: RenderPipeline<S>,
    input: InputController,
}

impl<S: Surface> Board<S, ShakmatyRules> {
    /// Board backed by the default rules engine
    pub fn new(config: BoardConfig, snapshot: S, live: S) -> BoardResult<Self> {
        Self::initialize(config, snapshot, live, ShakmatyRules::new())
    }
}

impl<S: Surface, R: RulesEngine> Board<S, R> {
    /// Build a board from a config and two host surfaces.
    ///
    /// Fails only when `config.fen` is malformed.
    pub fn initialize(config: BoardConfig, snapshot: S, live: S, rules: R) -> BoardResult<Self> {
        let mut model = PositionModel::new(rules, config.mode);
        if let Some(fen) = &config.fen {
            model.set_position(fen)?;
        }

        let pipeline = RenderPipeline::new(
            snapshot,
            live,
            Layout::new(0, config.mode),
            Palette::from_config(&config),
            RenderOptions::from(&config),
        );

        let mut board = Self {
            config,
            model,
            pipeline,
            input: InputController::new(),
        };
        let (height, width) = (board.config.height, board.config.width);
        board.apply_size(height, width);
        board.display();
        info!(
            "[BOARD] Initialized ({:?} mode, {}px squares)",
            board.model.mode(),
            board.pipeline.layout().square_size()
        );
        Ok(board)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn model(&self) -> &PositionModel<R> {
        &self.model
    }

    pub fn pipeline(&self) -> &RenderPipeline<S> {
        &self.pipeline
    }

    pub fn live(&self) -> &S {
        self.pipeline.live()
    }

    pub fn snapshot(&self) -> &S {
        self.pipeline.snapshot()
    }

    pub fn square_size(&self) -> u32 {
        self.pipeline.layout().square_size()
    }

    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    // ========================================================================
    // Display
    // ========================================================================

    /// Draw the board in its current state. An active drag stays on
    /// screen with its piece lifted out of the snapshot.
    pub fn display(&mut self) {
        let (input, ctx) = self.context();
        input.redisplay(ctx);
    }

    /// Swap which side is at the bottom. Cancels any drag.
    pub fn flip(&mut self) {
        self.cancel_drag();
        self.pipeline.flip();
        self.display();
        debug!(
            "[BOARD] Flipped, white down: {}",
            self.pipeline.layout().white_down()
        );
    }

    /// Resize from a requested height and width. Cancels any drag.
    ///
    /// A zero dimension falls back to the configured size, then to the
    /// current surface size.
    pub fn resize(&mut self, height: u32, width: u32) {
        self.cancel_drag();
        self.apply_size(height, width);
        self.display();
    }

    fn apply_size(&mut self, height: u32, width: u32) {
        let (height, width) = if height != 0 && width != 0 {
            (height, width)
        } else if self.config.height != 0 && self.config.width != 0 {
            (self.config.height, self.config.width)
        } else {
            (self.live().height(), self.live().width())
        };

        let rows = self.model.mode().rows();
        let smaller = height.min(width);
        let square_size = if height < width {
            smaller / rows
        } else {
            smaller / 8
        };
        self.pipeline.set_geometry(square_size, self.model.mode());
    }

    // ========================================================================
    // Position queries
    // ========================================================================

    pub fn active_color(&self) -> Color {
        self.model.turn()
    }

    pub fn fen(&self) -> String {
        self.model.fen()
    }

    pub fn is_mate(&self) -> bool {
        self.model.is_mate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.model.is_stalemate()
    }

    // ========================================================================
    // Position changes
    // ========================================================================

    /// Play a move in SAN (`e4`, `Nxf7+`, `O-O`, `e8=N`)
    pub fn move_san(&mut self, san: &str) -> MoveResult {
        self.cancel_drag();
        let result = self.model.move_san(san);
        self.display();
        result
    }

    /// Play a move by squares, e.g. `("e2", "e4")`
    pub fn move_squares(&mut self, from: &str, to: &str) -> MoveResult {
        self.cancel_drag();
        let squares = (self.lookup(from), self.lookup(to));
        let result = match squares {
            (Some(from), Some(to)) => self.model.move_piece(from, to, None),
            _ => MoveResult::Rejected,
        };
        self.display();
        result
    }

    pub fn position_clear(&mut self) {
        self.cancel_drag();
        self.model.position_clear();
        self.display();
    }

    pub fn position_start(&mut self) {
        self.cancel_drag();
        self.model.position_start();
        self.display();
    }

    /// Replace the position from FEN. Malformed FEN leaves the board as is.
    pub fn set_position(&mut self, fen: &str) -> BoardResult<()> {
        self.cancel_drag();
        self.model.set_position(fen)?;
        self.display();
        Ok(())
    }

    pub fn set_active(&mut self, active: bool) {
        self.model.set_active(active);
    }

    /// Record the last move for highlighting. Returns `false` if either
    /// square name is not a board square.
    pub fn set_last_move(&mut self, from: &str, to: &str) -> bool {
        match (self.lookup(from), self.lookup(to)) {
            (Some(from), Some(to)) => {
                self.model.set_last_move(from, to);
                true
            }
            _ => false,
        }
    }

    /// Switch between play and setup. Setup mode also activates the board.
    pub fn set_mode(&mut self, mode: BoardMode) {
        self.cancel_drag();
        self.model.set_mode(mode);
        if mode.is_setup() {
            self.model.set_active(true);
        }
        let (height, width) = (self.live().height(), self.live().width());
        self.apply_size(height, width);
        self.display();
    }

    fn lookup(&self, name: &str) -> Option<Square> {
        match self.model.rules().square_to_indices(name) {
            Ok(square_name) => square_name.square(),
            Err(e) => {
                warn!("[BOARD] {}", e);
                None
            }
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn subscribe<F>(&mut self, channel: Option<&str>, callback: F) -> SubscriberId
    where
        F: FnMut(&MoveOutcome) -> anyhow::Result<()> + Send + 'static,
    {
        self.model.events_mut().subscribe(channel, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId, channel: Option<&str>) -> bool {
        self.model.events_mut().unsubscribe(id, channel)
    }

    // ========================================================================
    // Pointer entry points
    // ========================================================================

    fn context(&mut self) -> (&mut InputController, InputContext<'_, R, S>) {
        (
            &mut self.input,
            InputContext {
                model: &mut self.model,
                pipeline: &mut self.pipeline,
            },
        )
    }

    pub fn pointer_down(&mut self, event: PointerEvent) -> bool {
        let (input, ctx) = self.context();
        input.on_pointer_down(ctx, event)
    }

    pub fn pointer_move(&mut self, event: PointerEvent) -> bool {
        let (input, ctx) = self.context();
        input.on_pointer_move(ctx, event)
    }

    pub fn pointer_up(&mut self, event: PointerEvent) -> Option<DropOutcome> {
        let (input, ctx) = self.context();
        input.on_pointer_up(ctx, event)
    }

    /// Touch cancel or pointer leaving the surface
    pub fn pointer_cancel(&mut self) {
        let (input, ctx) = self.context();
        input.on_pointer_cancel(ctx);
    }

    fn cancel_drag(&mut self) {
        if self.input.abort() {
            debug!("[BOARD] Drag cancelled");
        }
    }

    // ========================================================================
    // Assets
    // ========================================================================

    /// A host finished loading an image
    pub fn asset_loaded(&mut self, key: AssetKey, image: S::Image) {
        self.pipeline.assets_mut().insert(key, image);
        self.display();
    }

    /// A host failed to load an image; the flat fallback stays in use
    pub fn asset_failed(&mut self, key: AssetKey, reason: &str) {
        self.pipeline.assets_mut().mark_failed(key, reason);
    }
}
