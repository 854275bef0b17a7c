//! Thread-safe board handle
//!
//! A board is single-writer. Embeddings that deliver input from more than
//! one thread wrap it in a [`SharedBoard`], so every operation (a whole
//! pointer-up transaction included) runs under one lock.

use crate::board::Board;
use crate::rendering::surface::Surface;
use board_rules::ShakmatyRules;
use parking_lot::Mutex;
use std::sync::Arc;

pub struct SharedBoard<S: Surface, R = ShakmatyRules> {
    inner: Arc<Mutex<Board<S, R>>>,
}

impl<S: Surface, R> Clone for SharedBoard<S, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Surface, R> SharedBoard<S, R> {
    pub fn new(board: Board<S, R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(board)),
        }
    }

    /// Run `f` with exclusive access to the board
    pub fn with<T>(&self, f: impl FnOnce(&mut Board<S, R>) -> T) -> T {
        let mut board = self.inner.lock();
        f(&mut board)
    }
}
