//! Input module - pointer and touch handling
//!
//! # Architecture
//!
//! - `drag` - [`DragSession`], the state of one drag gesture
//! - `pointer` - [`InputController`], the drag state machine
//!
//! Hosts translate their native events into [`PointerEvent`]s with
//! coordinates relative to the live surface. Pixel to cell mapping lives in
//! [`Layout`](crate::rendering::Layout) so input and rendering share one
//! orientation.

pub mod drag;
pub mod pointer;

pub use drag::DragSession;
pub use pointer::{DropOutcome, InputContext, InputController, PointerEvent, PointerKind};
