//! Browser tests for the canvas host
//!
//! These tests run in a browser environment using wasm-pack test.
//! Run with: cd web && wasm-pack test --headless --chrome

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use xfboard::board_rules::START_FEN;
use xfboard::rendering::Rect;
use xfboard::{Rgba, Surface};
use xfboard_web::{CanvasSurface, XfBoard};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("Document should exist")
}

fn pixel(surface: &CanvasSurface, x: f64, y: f64) -> [u8; 4] {
    let ctx: web_sys::CanvasRenderingContext2d = surface
        .canvas()
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    let data = ctx.get_image_data(x, y, 1.0, 1.0).unwrap().data();
    [data[0], data[1], data[2], data[3]]
}

/// Test that the surface resizes and fills
#[wasm_bindgen_test]
fn test_canvas_surface_fill() {
    let mut surface = CanvasSurface::detached(&document()).unwrap();
    surface.resize(16, 8);
    assert_eq!((surface.width(), surface.height()), (16, 8));

    surface.fill_rect(Rect::new(0, 0, 8, 8), Rgba::rgb(255, 0, 0));
    assert_eq!(pixel(&surface, 2.0, 2.0), [255, 0, 0, 255]);
    assert_eq!(pixel(&surface, 12.0, 2.0), [0, 0, 0, 0]);
}

/// Test region copies replace rather than blend
#[wasm_bindgen_test]
fn test_copy_region_replaces_pixels() {
    let mut source = CanvasSurface::detached(&document()).unwrap();
    source.resize(8, 8);
    let mut target = CanvasSurface::detached(&document()).unwrap();
    target.resize(8, 8);
    target.fill_rect(target.bounds(), Rgba::rgb(0, 0, 255));

    target.copy_region_from(&source, Rect::new(0, 0, 4, 4));
    assert_eq!(pixel(&target, 1.0, 1.0), [0, 0, 0, 0], "transparent source wins");
    assert_eq!(pixel(&target, 6.0, 6.0), [0, 0, 255, 255]);
}

/// Test the widget mounts a canvas of the configured size
#[wasm_bindgen_test]
fn test_widget_mounts_canvas() {
    let container = document().create_element("div").unwrap();
    container.set_id("board-mount");
    document().body().unwrap().append_child(&container).unwrap();

    let board = XfBoard::new(r#"{"container": "board-mount", "height": 320, "width": 320}"#)
        .expect("board should initialize");
    let canvas: web_sys::HtmlCanvasElement = container
        .first_element_child()
        .expect("canvas appended")
        .dyn_into()
        .unwrap();
    assert_eq!((canvas.width(), canvas.height()), (320, 320));
    assert_eq!(board.active_color(), "w");
}

/// Test subscribers receive the move after the call returns
#[wasm_bindgen_test]
fn test_subscriber_receives_move() {
    let board = XfBoard::new(r#"{"height": 160, "width": 160}"#).unwrap();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
        let from = js_sys::Reflect::get(&payload, &"from".into()).unwrap();
        assert_eq!(from.as_string().as_deref(), Some("e2"));
        counter.set(counter.get() + 1);
    });

    let handle = board.subscribe(
        Some("move_before".to_string()),
        callback.as_ref().unchecked_ref::<js_sys::Function>().clone(),
    );
    assert!(board.move_san("e4"));
    assert_eq!(calls.get(), 1);

    assert!(board.unsubscribe(handle, Some("move_before".to_string())));
    assert!(board.move_san("e5"));
    assert_eq!(calls.get(), 1);
}

/// Test callbacks run after the commit: the payload carries the old FEN,
/// `getFEN()` inside the callback already returns the new one
#[wasm_bindgen_test]
fn test_subscriber_runs_after_commit() {
    let board = Rc::new(XfBoard::new(r#"{"height": 160, "width": 160}"#).unwrap());
    let seen = Rc::new(std::cell::RefCell::new(None));
    let sink = Rc::clone(&seen);
    let inner = Rc::clone(&board);
    let callback = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
        let fen = js_sys::Reflect::get(&payload, &"fen".into()).unwrap();
        *sink.borrow_mut() = Some((fen.as_string(), inner.fen()));
    });

    board.subscribe(
        Some("move_before".to_string()),
        callback.as_ref().unchecked_ref::<js_sys::Function>().clone(),
    );
    assert!(board.move_san("e4"));

    let (payload_fen, live_fen) = seen.borrow_mut().take().expect("callback ran");
    assert_eq!(payload_fen.as_deref(), Some(START_FEN));
    assert_eq!(live_fen, board.fen());
    assert_ne!(live_fen, START_FEN);
}

/// Test malformed config and FEN are reported
#[wasm_bindgen_test]
fn test_errors_surface_as_exceptions() {
    assert!(XfBoard::new("{ not json").is_err());
    let board = XfBoard::new("").unwrap();
    assert!(board.set_position("garbage").is_err());
    assert!(board.set_mode("sideways").is_err());
}
