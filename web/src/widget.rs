//! `XfBoard`, the JavaScript-facing widget
//!
//! Owns a [`SharedBoard`] over two canvases, wires mouse and touch listeners
//! on the visible canvas and loads piece images.
//!
//! # Subscribers
//!
//! JavaScript callbacks cannot run while the board is locked (they would
//! re-enter it), so `move_before` payloads are queued during the board call
//! and delivered right after it returns. The payload still carries the FEN
//! of the position before the move.

use crate::canvas::CanvasSurface;
use js_sys::Function;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, HtmlCanvasElement, HtmlImageElement, MouseEvent, Touch, TouchEvent,
};
use xfboard::assets::{AssetKey, AssetStore};
use xfboard::{
    Board, BoardConfig, BoardMode, MoveOutcome, PointerEvent, SharedBoard, SubscriberId,
};

type Listener = Closure<dyn FnMut(Event)>;

struct JsSubscriber {
    id: SubscriberId,
    callback: Function,
}

/// Queued deliveries plus the JavaScript functions they go to
struct Outbox {
    tx: Sender<(u32, MoveOutcome)>,
    rx: Receiver<(u32, MoveOutcome)>,
    next_handle: u32,
    subscribers: HashMap<u32, JsSubscriber>,
}

impl Outbox {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            next_handle: 0,
            subscribers: HashMap::new(),
        }
    }

    /// Deliver everything queued so far. Callbacks run with the outbox
    /// released, so they may subscribe or unsubscribe.
    fn flush(outbox: &RefCell<Outbox>) {
        let deliveries: Vec<(u32, Function, MoveOutcome)> = {
            let outbox = outbox.borrow();
            outbox
                .rx
                .try_iter()
                .filter_map(|(handle, outcome)| {
                    let subscriber = outbox.subscribers.get(&handle)?;
                    Some((handle, subscriber.callback.clone(), outcome))
                })
                .collect()
        };

        for (handle, callback, outcome) in deliveries {
            let payload = match serde_json::to_string(&outcome)
                .map_err(|e| JsValue::from_str(&e.to_string()))
                .and_then(|json| js_sys::JSON::parse(&json))
            {
                Ok(payload) => payload,
                Err(e) => {
                    log::warn!("[EVENTS] Could not encode move: {:?}", e);
                    continue;
                }
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &payload) {
                log::warn!("[EVENTS] Subscriber {} failed: {:?} - continuing", handle, e);
            }
        }
    }
}

#[wasm_bindgen]
pub struct XfBoard {
    board: SharedBoard<CanvasSurface>,
    canvas: HtmlCanvasElement,
    outbox: Rc<RefCell<Outbox>>,
    listeners: Vec<(&'static str, Listener)>,
}

#[wasm_bindgen]
impl XfBoard {
    /// Create a board from a JSON config. The visible canvas is appended to
    /// the element named by `container`, or to `<body>`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<XfBoard, JsValue> {
        let config: BoardConfig = if config_json.trim().is_empty() {
            BoardConfig::default()
        } else {
            serde_json::from_str(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let document = document()?;

        let live = CanvasSurface::detached(&document)?;
        let canvas = live.canvas().clone();
        let parent = match &config.container {
            Some(id) => document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", id)))?,
            None => document
                .body()
                .ok_or_else(|| JsValue::from_str("no document body"))?
                .into(),
        };
        parent.append_child(&canvas)?;

        let snapshot = CanvasSurface::detached(&document)?;
        let requests = AssetStore::<HtmlImageElement>::requests(&config);
        let board = Board::new(config, snapshot, live)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let mut widget = XfBoard {
            board: SharedBoard::new(board),
            canvas,
            outbox: Rc::new(RefCell::new(Outbox::new())),
            listeners: Vec::new(),
        };
        widget.attach_listeners()?;
        for (key, path) in requests {
            widget.load_image(key, &path)?;
        }
        log::info!("[BOARD] Web board ready");
        Ok(widget)
    }

    pub fn display(&self) {
        self.board.with(|b| b.display());
    }

    pub fn flip(&self) {
        self.board.with(|b| b.flip());
    }

    #[wasm_bindgen(js_name = getActiveColor)]
    pub fn active_color(&self) -> String {
        self.board.with(|b| b.active_color().to_string())
    }

    #[wasm_bindgen(js_name = getFEN)]
    pub fn fen(&self) -> String {
        self.board.with(|b| b.fen())
    }

    #[wasm_bindgen(js_name = isMate)]
    pub fn is_mate(&self) -> bool {
        self.board.with(|b| b.is_mate())
    }

    #[wasm_bindgen(js_name = isStalemate)]
    pub fn is_stalemate(&self) -> bool {
        self.board.with(|b| b.is_stalemate())
    }

    /// Play a SAN move; returns whether it was committed
    #[wasm_bindgen(js_name = "move")]
    pub fn move_san(&self, san: &str) -> bool {
        let committed = self.board.with(|b| b.move_san(san).is_committed());
        Outbox::flush(&self.outbox);
        committed
    }

    #[wasm_bindgen(js_name = positionClear)]
    pub fn position_clear(&self) {
        self.board.with(|b| b.position_clear());
    }

    #[wasm_bindgen(js_name = positionStart)]
    pub fn position_start(&self) {
        self.board.with(|b| b.position_start());
    }

    pub fn resize(&self, height: u32, width: u32) {
        self.board.with(|b| b.resize(height, width));
    }

    #[wasm_bindgen(js_name = setActive)]
    pub fn set_active(&self, active: bool) {
        self.board.with(|b| b.set_active(active));
    }

    #[wasm_bindgen(js_name = setLastMove)]
    pub fn set_last_move(&self, from: &str, to: &str) -> bool {
        self.board.with(|b| b.set_last_move(from, to))
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&self, fen: &str) -> Result<(), JsValue> {
        self.board
            .with(|b| b.set_position(fen))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `"play"` or `"setup"`
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&self, mode: &str) -> Result<(), JsValue> {
        let mode = match mode {
            "play" => BoardMode::Play,
            "setup" => BoardMode::Setup,
            other => return Err(JsValue::from_str(&format!("unknown mode '{}'", other))),
        };
        self.board.with(|b| b.set_mode(mode));
        Ok(())
    }

    /// Register `callback` on `channel` (default `"any"`). Returns a handle
    /// for [`unsubscribe`](Self::unsubscribe).
    ///
    /// Callbacks are queued while the board handles the call and run once it
    /// returns, after the move is committed. The payload's `fen` is the
    /// position before the move, while `getFEN()` called from inside the
    /// callback already returns the position after it.
    pub fn subscribe(&self, channel: Option<String>, callback: Function) -> u32 {
        let mut outbox = self.outbox.borrow_mut();
        let handle = outbox.next_handle;
        outbox.next_handle += 1;

        let tx = outbox.tx.clone();
        let id = self.board.with(|b| {
            b.subscribe(channel.as_deref(), move |outcome| {
                tx.send((handle, outcome.clone()))?;
                Ok(())
            })
        });
        outbox.subscribers.insert(handle, JsSubscriber { id, callback });
        handle
    }

    pub fn unsubscribe(&self, handle: u32, channel: Option<String>) -> bool {
        let Some(subscriber) = self.outbox.borrow_mut().subscribers.remove(&handle) else {
            return false;
        };
        self.board
            .with(|b| b.unsubscribe(subscriber.id, channel.as_deref()))
    }
}

impl XfBoard {
    fn attach_listeners(&mut self) -> Result<(), JsValue> {
        self.listen("mousedown", |board, canvas, event| {
            if let Some(p) = mouse_point(&event, canvas) {
                board.with(|b| b.pointer_down(p));
            }
        })?;
        self.listen("mousemove", |board, canvas, event| {
            if let Some(p) = mouse_point(&event, canvas) {
                board.with(|b| b.pointer_move(p));
            }
        })?;
        self.listen("mouseup", |board, canvas, event| {
            if let Some(p) = mouse_point(&event, canvas) {
                board.with(|b| b.pointer_up(p));
            }
        })?;
        self.listen("mouseleave", |board, _, _| {
            board.with(|b| {
                if b.is_dragging() {
                    b.pointer_cancel();
                }
            });
        })?;
        self.listen("touchstart", |board, canvas, event| {
            if let Some(p) = touch_point(&event, canvas, false) {
                if board.with(|b| b.pointer_down(p)) {
                    event.prevent_default();
                }
            }
        })?;
        self.listen("touchmove", |board, canvas, event| {
            if let Some(p) = touch_point(&event, canvas, false) {
                if board.with(|b| b.pointer_move(p)) {
                    event.prevent_default();
                }
            }
        })?;
        self.listen("touchend", |board, canvas, event| {
            if let Some(p) = touch_point(&event, canvas, true) {
                board.with(|b| b.pointer_up(p));
            }
        })?;
        self.listen("touchcancel", |board, _, _| {
            board.with(|b| b.pointer_cancel());
        })?;
        Ok(())
    }

    /// Attach a handler that runs with the board and flushes subscriber
    /// deliveries afterwards
    fn listen<F>(&mut self, name: &'static str, mut handler: F) -> Result<(), JsValue>
    where
        F: FnMut(&SharedBoard<CanvasSurface>, &HtmlCanvasElement, Event) + 'static,
    {
        let board = self.board.clone();
        let canvas = self.canvas.clone();
        let outbox = Rc::clone(&self.outbox);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            handler(&board, &canvas, event);
            Outbox::flush(&outbox);
        });
        self.canvas
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        self.listeners.push((name, closure));
        Ok(())
    }

    fn load_image(&self, key: AssetKey, path: &str) -> Result<(), JsValue> {
        let image = HtmlImageElement::new()?;

        let board = self.board.clone();
        let loaded = image.clone();
        let onload = Closure::once_into_js(move || {
            board.with(|b| b.asset_loaded(key, loaded));
        });
        let board = self.board.clone();
        let failed_path = path.to_string();
        let onerror = Closure::once_into_js(move || {
            board.with(|b| b.asset_failed(key, &format!("could not load {}", failed_path)));
        });

        image.set_onload(Some(onload.unchecked_ref()));
        image.set_onerror(Some(onerror.unchecked_ref()));
        image.set_src(path);
        Ok(())
    }
}

impl Drop for XfBoard {
    fn drop(&mut self) {
        for (name, closure) in &self.listeners {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        }
    }
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Client coordinates to canvas pixels
fn to_canvas(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> (i32, i32) {
    let rect = canvas.get_bounding_client_rect();
    (
        client_x - rect.left().round() as i32,
        client_y - rect.top().round() as i32,
    )
}

fn mouse_point(event: &Event, canvas: &HtmlCanvasElement) -> Option<PointerEvent> {
    let event = event.dyn_ref::<MouseEvent>()?;
    let (x, y) = to_canvas(canvas, event.client_x(), event.client_y());
    Some(PointerEvent::mouse(x, y))
}

/// First touch of the event. `touchend` has no active touches left, so it
/// reads the changed ones.
fn touch_point(event: &Event, canvas: &HtmlCanvasElement, changed: bool) -> Option<PointerEvent> {
    let event = event.dyn_ref::<TouchEvent>()?;
    let list = if changed {
        event.changed_touches()
    } else {
        event.touches()
    };
    let touch: Touch = list.item(0)?;
    let (x, y) = to_canvas(canvas, touch.client_x(), touch.client_y());
    Some(PointerEvent::touch(x, y))
}
