//! Canonical board state and the move transaction
//!
//! [`PositionModel`] exclusively owns the [`Position`] the board shows. Every
//! move goes through a two-step transaction:
//!
//! 1. [`prepare`](PositionModel::prepare) clones the position, lets the rules
//!    engine play the move on the scratch copy and classifies the result.
//!    Canonical state is never touched; an illegal move yields `None`.
//! 2. The [`MoveOutcome`] is published on [`MOVE_BEFORE`].
//! 3. [`commit`](PositionModel::commit) consumes the [`PreparedMove`] and
//!    replaces canonical state in one assignment.
//!
//! [`move_piece`](PositionModel::move_piece) runs all three steps. The model
//! never draws; callers re-render after any mutating call.

use crate::core::error::{BoardError, BoardResult};
use crate::core::state::BoardMode;
use crate::game::events::{EventBus, MoveOutcome, MOVE_BEFORE};
use crate::game::piece_box::PieceBox;
use board_rules::{Color, Piece, Position, Role, RulesEngine, Square};
use tracing::{debug, info, warn};

/// Source and destination of the most recent committed move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastMove {
    pub from: Square,
    pub to: Square,
}

/// What happened to a move request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Committed(MoveOutcome),
    Rejected,
}

impl MoveResult {
    pub fn is_committed(&self) -> bool {
        matches!(self, MoveResult::Committed(_))
    }

    pub fn outcome(&self) -> Option<&MoveOutcome> {
        match self {
            MoveResult::Committed(outcome) => Some(outcome),
            MoveResult::Rejected => None,
        }
    }
}

/// A validated move waiting to be committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedMove {
    next: Position,
    outcome: MoveOutcome,
}

impl PreparedMove {
    pub fn outcome(&self) -> &MoveOutcome {
        &self.outcome
    }

    /// Position the commit will install
    pub fn next_position(&self) -> &Position {
        &self.next
    }
}

pub struct PositionModel<R> {
    rules: R,
    position: Position,
    move_count: u32,
    last_move: Option<LastMove>,
    active: bool,
    mode: BoardMode,
    piece_box: Option<PieceBox>,
    events: EventBus<MoveOutcome>,
}

impl<R: RulesEngine> PositionModel<R> {
    /// Model at the standard start position, active
    pub fn new(rules: R, mode: BoardMode) -> Self {
        Self {
            rules,
            position: Position::start(),
            move_count: 0,
            last_move: None,
            active: true,
            mode,
            piece_box: mode.is_setup().then(PieceBox::new),
            events: EventBus::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.piece_at(square)
    }

    pub fn turn(&self) -> Color {
        self.position.turn
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn mode(&self) -> BoardMode {
        self.mode
    }

    /// Switch mode; the piece box exists only in setup mode
    pub fn set_mode(&mut self, mode: BoardMode) {
        self.mode = mode;
        self.piece_box = mode.is_setup().then(PieceBox::new);
        info!("[MODEL] Mode set to {:?}", mode);
    }

    pub fn piece_box(&self) -> Option<&PieceBox> {
        self.piece_box.as_ref()
    }

    pub fn events(&self) -> &EventBus<MoveOutcome> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus<MoveOutcome> {
        &mut self.events
    }

    pub fn fen(&self) -> String {
        self.rules.to_fen(&self.position)
    }

    pub fn is_mate(&self) -> bool {
        self.rules.is_mate(&self.position)
    }

    pub fn is_stalemate(&self) -> bool {
        self.rules.is_stalemate(&self.position)
    }

    // ========================================================================
    // Move transaction
    // ========================================================================

    /// Validate a move against a scratch copy of the position.
    ///
    /// Returns `None` when the rules engine rejects it.
    pub fn prepare(&self, from: Square, to: Square, promotion: Option<Role>) -> Option<PreparedMove> {
        let mover = self.position.turn;
        let moved = self.position.piece_at(from);

        let mut next = self.position.clone();
        next.grid = self.rules.clone_grid(&self.position.grid);
        if !self.rules.apply_move(&mut next, from, to, promotion) {
            debug!("[MODEL] Rejected {}-{}", from, to);
            return None;
        }

        let mate = self.rules.is_mate(&next);
        let stalemate = !mate && self.rules.is_stalemate(&next);
        let promote =
            moved.is_some_and(|p| p.role == Role::Pawn) && to.row() == mover.promotion_row();

        Some(PreparedMove {
            next,
            outcome: MoveOutcome {
                fen: self.fen(),
                mover,
                from,
                to,
                promote,
                mate,
                stalemate,
            },
        })
    }

    /// Install a prepared move as the canonical position
    pub fn commit(&mut self, prepared: PreparedMove) -> MoveOutcome {
        let PreparedMove { next, outcome } = prepared;
        self.position = next;
        self.move_count += 1;
        self.last_move = Some(LastMove {
            from: outcome.from,
            to: outcome.to,
        });
        if outcome.mate || outcome.stalemate {
            self.active = false;
        }

        info!(
            "[MODEL] {} played {}-{} (move {}){}",
            outcome.mover,
            outcome.from,
            outcome.to,
            self.move_count,
            if outcome.mate {
                ", mate"
            } else if outcome.stalemate {
                ", stalemate"
            } else {
                ""
            }
        );
        outcome
    }

    /// Prepare, publish on `move_before`, then commit
    pub fn move_piece(&mut self, from: Square, to: Square, promotion: Option<Role>) -> MoveResult {
        let Some(prepared) = self.prepare(from, to, promotion) else {
            return MoveResult::Rejected;
        };

        self.events.publish(MOVE_BEFORE, prepared.outcome());
        MoveResult::Committed(self.commit(prepared))
    }

    /// Play a move given in SAN. Unparseable or illegal SAN is rejected.
    pub fn move_san(&mut self, san: &str) -> MoveResult {
        match self.rules.san_to_long_move(&self.position, san) {
            Ok(long) => self.move_piece(long.from, long.to, long.promotion),
            Err(e) => {
                warn!("[MODEL] Ignoring move '{}': {}", san, e);
                MoveResult::Rejected
            }
        }
    }

    // ========================================================================
    // Whole-position replacement
    // ========================================================================

    /// Replace the position from FEN. Malformed FEN leaves state untouched.
    pub fn set_position(&mut self, fen: &str) -> BoardResult<()> {
        let mut next = self.position.clone();
        self.rules
            .parse_fen(&mut next, fen)
            .map_err(BoardError::InvalidPosition)?;

        self.reset_to(next);
        self.active = true;
        info!("[MODEL] Position set to {}", fen);
        Ok(())
    }

    pub fn position_clear(&mut self) {
        self.reset_to(Position::empty());
        info!("[MODEL] Position cleared");
    }

    pub fn position_start(&mut self) {
        self.reset_to(Position::start());
        self.active = true;
        info!("[MODEL] Position reset to start");
    }

    fn reset_to(&mut self, position: Position) {
        self.position = position;
        self.move_count = 0;
        self.last_move = None;
    }

    /// Record a last move without playing it (used for highlighting)
    pub fn set_last_move(&mut self, from: Square, to: Square) {
        self.last_move = Some(LastMove { from, to });
    }

    // ========================================================================
    // Setup-mode mutations (no legality checks)
    // ========================================================================

    pub fn place(&mut self, square: Square, piece: Piece) {
        self.position.set_piece(square, Some(piece));
        debug!("[MODEL] Placed {} on {}", piece.code(), square);
    }

    pub fn clear(&mut self, square: Square) {
        self.position.set_piece(square, None);
        debug!("[MODEL] Cleared {}", square);
    }

    /// Move whatever stands on `from` to `to`, replacing its contents
    pub fn relocate(&mut self, from: Square, to: Square) {
        if from == to {
            return;
        }
        let piece = self.position.piece_at(from);
        self.position.set_piece(from, None);
        self.position.set_piece(to, piece);
        debug!("[MODEL] Relocated {} to {}", from, to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_rules::{ShakmatyRules, START_FEN};
    use std::sync::{Arc, Mutex};

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn model() -> PositionModel<ShakmatyRules> {
        PositionModel::new(ShakmatyRules::new(), BoardMode::Play)
    }

    // ========================================================================
    // Transaction
    // ========================================================================

    #[test]
    fn test_e2e4_commits() {
        let mut m = model();
        let result = m.move_piece(sq("e2"), sq("e4"), None);

        assert!(result.is_committed());
        assert_eq!(m.turn(), Color::Black);
        assert_eq!(m.move_count(), 1);
        assert_eq!(
            m.last_move(),
            Some(LastMove {
                from: sq("e2"),
                to: sq("e4")
            })
        );
        assert_eq!(result.outcome().map(|o| o.fen.as_str()), Some(START_FEN));
    }

    #[test]
    fn test_e2e5_rejected_without_publication() {
        let mut m = model();
        let published = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&published);
        m.events_mut().subscribe(Some(MOVE_BEFORE), move |_| {
            *counter.lock().unwrap() += 1;
            Ok(())
        });

        let before = m.position().clone();
        assert_eq!(m.move_piece(sq("e2"), sq("e5"), None), MoveResult::Rejected);
        assert_eq!(m.position(), &before, "canonical state must be untouched");
        assert_eq!(m.move_count(), 0);
        assert_eq!(*published.lock().unwrap(), 0);
    }

    #[test]
    fn test_prepare_does_not_touch_canonical_state() {
        let m = model();
        let prepared = m.prepare(sq("g1"), sq("f3"), None).unwrap();
        assert_eq!(m.position(), &Position::start());
        assert_eq!(prepared.next_position().turn, Color::Black);
    }

    #[test]
    fn test_publish_sees_pre_move_state() {
        let mut m = model();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        m.events_mut().subscribe(Some(MOVE_BEFORE), move |outcome: &MoveOutcome| {
            sink.lock().unwrap().push(outcome.clone());
            Ok(())
        });

        m.move_piece(sq("e2"), sq("e4"), None);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].fen, START_FEN);
        assert_eq!(seen[0].mover, Color::White);
        assert!(!seen[0].promote && !seen[0].mate && !seen[0].stalemate);
    }

    #[test]
    fn test_mate_deactivates_board() {
        let mut m = model();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
            assert!(m.move_piece(sq(from), sq(to), None).is_committed());
        }
        let result = m.move_piece(sq("d8"), sq("h4"), None);

        let outcome = result.outcome().unwrap();
        assert!(outcome.mate);
        assert!(!outcome.stalemate);
        assert!(m.is_mate());
        assert!(!m.is_active());
    }

    #[test]
    fn test_promotion_flag() {
        let mut m = model();
        m.set_position("8/4P3/8/8/8/8/8/k6K w - - 0 1").unwrap();
        let result = m.move_piece(sq("e7"), sq("e8"), Some(Role::Knight));

        assert!(result.outcome().unwrap().promote);
        assert_eq!(
            m.piece_at(sq("e8")),
            Some(Piece::new(Color::White, Role::Knight))
        );
    }

    #[test]
    fn test_move_san() {
        let mut m = model();
        assert!(m.move_san("e4").is_committed());
        assert!(m.move_san("e5").is_committed());
        assert_eq!(m.move_san("Ke3"), MoveResult::Rejected);
        assert_eq!(m.move_san("not a move"), MoveResult::Rejected);
        assert_eq!(m.move_count(), 2);
    }

    // ========================================================================
    // Position replacement
    // ========================================================================

    #[test]
    fn test_set_position_rejects_malformed_fen() {
        let mut m = model();
        m.move_piece(sq("e2"), sq("e4"), None);
        let before = m.position().clone();

        assert!(matches!(
            m.set_position("not a fen"),
            Err(BoardError::InvalidPosition(_))
        ));
        assert_eq!(m.position(), &before);
        assert_eq!(m.move_count(), 1);
    }

    #[test]
    fn test_clear_and_start_reset_counters() {
        let mut m = model();
        m.move_piece(sq("e2"), sq("e4"), None);
        m.set_active(false);

        m.position_clear();
        assert_eq!(m.position().piece_count(), 0);
        assert_eq!(m.move_count(), 0);
        assert_eq!(m.last_move(), None);
        assert!(!m.is_active(), "clear keeps the active flag");

        m.position_start();
        assert_eq!(m.fen(), START_FEN);
        assert!(m.is_active());
    }

    // ========================================================================
    // Setup mode
    // ========================================================================

    #[test]
    fn test_piece_box_follows_mode() {
        let mut m = model();
        assert!(m.piece_box().is_none());
        m.set_mode(BoardMode::Setup);
        assert!(m.piece_box().is_some());
        m.set_mode(BoardMode::Play);
        assert!(m.piece_box().is_none());
    }

    #[test]
    fn test_setup_mutations() {
        let mut m = PositionModel::new(ShakmatyRules::new(), BoardMode::Setup);
        m.position_clear();
        let queen = Piece::new(Color::Black, Role::Queen);

        m.place(sq("d4"), queen);
        m.relocate(sq("d4"), sq("h8"));
        assert_eq!(m.piece_at(sq("d4")), None);
        assert_eq!(m.piece_at(sq("h8")), Some(queen));

        m.clear(sq("h8"));
        assert_eq!(m.position().piece_count(), 0);
        assert_eq!(m.turn(), Color::White, "setup edits never flip the turn");
    }
}
