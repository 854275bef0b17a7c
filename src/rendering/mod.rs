//! Rendering module - composing the board onto 2D surfaces
//!
//! # Architecture
//!
//! - `surface` - the [`Surface`] trait a host implements, plus [`Rect`]
//! - `raster` - [`Raster`], the in-memory surface used headless and in tests
//! - `palette` - [`Rgba`] and the resolved board colors
//! - `layout` - square size, orientation and pixel/cell mapping
//! - `board` - squares and rank/file labels
//! - `pieces` - resting pieces, piece box, dragged piece
//! - `effects` - last move and hover highlights
//! - `pipeline` - [`RenderPipeline`], the snapshot/live surface pair
//!
//! Drawing layers are plain functions over `&mut impl Surface`; only the
//! pipeline decides which surface they target.

pub mod board;
pub mod effects;
pub mod layout;
pub mod palette;
pub mod pieces;
pub mod pipeline;
pub mod raster;
pub mod surface;

pub use layout::{Cell, DisplayCell, Layout};
pub use palette::{Palette, Rgba};
pub use pipeline::{RenderOptions, RenderPipeline};
pub use raster::{Raster, RasterImage, TextRun};
pub use surface::{Rect, Surface};
