//! XFBoard for the browser
//!
//! Binds the board core to HTML canvases: [`CanvasSurface`] implements the
//! drawing surface, [`XfBoard`] is the widget exported to JavaScript.
//!
//! ```js
//! import init, { XfBoard } from "./xfboard_web.js";
//! await init();
//! const board = new XfBoard(JSON.stringify({ container: "board", height: 400, width: 400 }));
//! board.subscribe("move_before", (m) => console.log(m.from, m.to, m.fen));
//! ```

pub mod canvas;
pub mod widget;

pub use canvas::CanvasSurface;
pub use widget::XfBoard;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (e.g. in tests) is harmless
    let _ = console_log::init_with_level(log::Level::Debug);
}
