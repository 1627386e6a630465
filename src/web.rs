//! Browser backend
//!
//! `WebCanvas` drives a real `<canvas>` through its 2D context, and [`run`]
//! wires the page events (keys, resize, animation frames) into a [`HostLoop`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, Window};

use crate::config::HostConfig;
use crate::engine::Engine;
use crate::error::HostError;
use crate::host::HostLoop;
use crate::surface::{Canvas, TextBaseline};

/// Id of the on-page canvas element
pub const DEFAULT_CANVAS_ID: &str = "canvas";

/// A `<canvas>` element and its 2D context
#[derive(Debug, Clone)]
pub struct WebCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    /// Acquire the 2D context of an existing canvas element
    pub fn from_element(element: HtmlCanvasElement) -> Result<Self, HostError> {
        let ctx = element
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(HostError::ContextUnavailable)?;
        Ok(Self { element, ctx })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.element
    }
}

/// Log and drop a failed context call
fn check(op: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("Canvas {} failed: {:?}", op, e);
    }
}

impl Canvas for WebCanvas {
    fn offscreen(&self, width: u32, height: u32) -> Result<Self, HostError> {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.create_element("canvas").ok())
            .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or(HostError::SurfaceAllocation { width, height })?;
        element.set_width(width);
        element.set_height(height);
        WebCanvas::from_element(element)
            .map_err(|_| HostError::SurfaceAllocation { width, height })
    }

    fn width(&self) -> u32 {
        self.element.width()
    }

    fn height(&self) -> u32 {
        self.element.height()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.element.set_width(width);
        self.element.set_height(height);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        check("arc", self.ctx.arc(x, y, radius, start, end));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn translate(&mut self, x: f64, y: f64) {
        check("translate", self.ctx.translate(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        check("rotate", self.ctx.rotate(angle));
    }

    fn reset_transform(&mut self) {
        check(
            "set_transform",
            self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
        );
    }

    fn draw_image(&mut self, image: &Self, x: f64, y: f64) {
        check(
            "draw_image",
            self.ctx
                .draw_image_with_html_canvas_element(&image.element, x, y),
        );
    }

    fn draw_image_scaled(&mut self, image: &Self, x: f64, y: f64, w: f64, h: f64) {
        check(
            "draw_image",
            self.ctx
                .draw_image_with_html_canvas_element_and_dw_and_dh(&image.element, x, y, w, h),
        );
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_str());
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        check("fill_text", self.ctx.fill_text(text, x, y));
    }
}

type SharedHost<E> = Rc<RefCell<HostLoop<E, WebCanvas>>>;

/// Start the host on the page: find the canvas, build the engine, hook up
/// events and begin the animation-frame chain.
pub fn run<E: Engine + 'static>(canvas_id: &str) -> Result<(), HostError> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        // Already initialized (e.g. a second run on the same page)
        log::debug!("Logger init skipped: {}", e);
    }

    log::info!("Rocket host starting...");

    let window = web_sys::window().ok_or(HostError::MissingWindow)?;
    let document = window.document().ok_or(HostError::MissingWindow)?;

    let element: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| HostError::MissingCanvas(canvas_id.to_string()))?;
    let config = HostConfig::load(&element);
    let canvas = WebCanvas::from_element(element)?;

    let host: SharedHost<E> = Rc::new(RefCell::new(HostLoop::new(canvas, config)?));

    setup_key_handlers(&document, host.clone());
    setup_resize_handler(&window, host.clone());

    // Size the canvas before the first frame
    let (w, h) = inner_size(&window);
    host.borrow_mut().on_resize(w, h);

    request_animation_frame(host);

    log::info!("Rocket host running!");
    Ok(())
}

fn inner_size(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn setup_key_handlers<E: Engine + 'static>(document: &Document, host: SharedHost<E>) {
    for (event_name, down) in [("keydown", true), ("keyup", false)] {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            host.borrow_mut().on_key_event(&event.key(), down);
        });
        if let Err(e) =
            document.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
        {
            log::error!("Failed to listen for {}: {:?}", event_name, e);
        }
        closure.forget();
    }
}

fn setup_resize_handler<E: Engine + 'static>(window: &Window, host: SharedHost<E>) {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (w, h) = inner_size(&window);
        host.borrow_mut().on_resize(w, h);
    });
    if let Err(e) = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
    {
        log::error!("Failed to listen for resize: {:?}", e);
    }
    closure.forget();
}

fn request_animation_frame<E: Engine + 'static>(host: SharedHost<E>) {
    let Some(window) = web_sys::window() else {
        log::error!("No window; frame loop stopped");
        return;
    };
    let closure: Closure<dyn FnMut(f64)> = Closure::once(move |time: f64| {
        game_loop(host, time);
    });
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {:?}", e);
    }
    closure.forget();
}

fn game_loop<E: Engine + 'static>(host: SharedHost<E>, time: f64) {
    let result = host.borrow_mut().frame(time);
    match result {
        Ok(_) => request_animation_frame(host),
        // Not rescheduling leaves the last frame on screen
        Err(e) => log::error!("Frame loop stopped: {}", e),
    }
}
