//! [`Surface`] over an HTML canvas
//!
//! The live surface is the canvas the user sees; the snapshot is a detached
//! canvas of the same size that never enters the document.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};
use xfboard::rendering::Rect;
use xfboard::{Rgba, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    /// A canvas that is never attached to the document
    pub fn detached(document: &Document) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        Self::new(canvas)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn report(op: &str, result: Result<(), JsValue>) {
        if let Err(e) = result {
            log::warn!("[RENDER] {} failed: {:?}", op, e);
        }
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Setting either dimension clears the backing store
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
    }

    fn draw_image(&mut self, image: &HtmlImageElement, dst: Rect, clip: Option<Rect>) {
        if let Some(clip) = clip {
            self.ctx.save();
            self.ctx.begin_path();
            self.ctx.rect(
                f64::from(clip.x),
                f64::from(clip.y),
                f64::from(clip.width),
                f64::from(clip.height),
            );
            self.ctx.clip();
        }
        Self::report(
            "draw_image",
            self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                f64::from(dst.x),
                f64::from(dst.y),
                f64::from(dst.width),
                f64::from(dst.height),
            ),
        );
        if clip.is_some() {
            self.ctx.restore();
        }
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, font_px: u32, color: Rgba) {
        self.ctx.set_font(&format!("{}px sans-serif", font_px));
        self.ctx.set_fill_style_str(&color.to_css());
        Self::report(
            "fill_text",
            self.ctx.fill_text(text, f64::from(x), f64::from(y)),
        );
    }

    fn copy_region_from(&mut self, source: &CanvasSurface, region: Rect) {
        let Some(region) = region.intersect(&self.bounds()) else {
            return;
        };
        let (x, y) = (f64::from(region.x), f64::from(region.y));
        let (w, h) = (f64::from(region.width), f64::from(region.height));
        // drawImage blends; clear first so transparent snapshot pixels stay transparent
        self.ctx.clear_rect(x, y, w, h);
        Self::report(
            "copy_region",
            self.ctx
                .draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                    &source.canvas,
                    x,
                    y,
                    w,
                    h,
                    x,
                    y,
                    w,
                    h,
                ),
        );
    }
}
