/// wiretorus Web - canvas 2D front end compiled to WASM
///
/// Draws the rotating torus onto an HTML canvas. Each tick re-arms a single
/// `setTimeout`, so `stop()` simply prevents the next one from running.
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use nalgebra::Point2;
use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wiretorus_core::{
    FrameDriver, Mesh, RenderConfig, RenderError, RenderResult, Rgb, StopHandle, Surface,
};

/// Surface backed by a canvas 2D rendering context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up a `<canvas>` by id and take its 2D context
    pub fn from_element_id(canvas_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("element '{canvas_id}' is not a canvas")))?;

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("unexpected 2d context type"))?;

        Ok(Self { canvas, context })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self, color: Rgb) -> RenderResult<()> {
        let (width, height) = self.size();
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_rect(0.0, 0.0, width as f64, height as f64);
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: Point2<f32>,
        to: Point2<f32>,
        color: Rgb,
        width: f32,
    ) -> RenderResult<()> {
        self.context.begin_path();
        self.context.set_stroke_style_str(&color.to_css());
        self.context.set_line_width(width as f64);
        self.context.move_to(from.x as f64, from.y as f64);
        self.context.line_to(to.x as f64, to.y as f64);
        self.context.stroke();
        Ok(())
    }
}

type SharedDriver = Rc<RefCell<FrameDriver<CanvasSurface>>>;

fn to_js(err: RenderError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Run one tick, returning the delay before the next one while the loop lives
///
/// A stopped driver refuses the tick and moves itself to `Stopped`.
fn advance<S: Surface>(driver: &RefCell<FrameDriver<S>>) -> Option<Duration> {
    let result = driver.borrow_mut().tick();
    match result {
        Ok(()) => Some(driver.borrow().frame_delay()),
        Err(RenderError::NotRunning(state)) => {
            info!(?state, "Frame loop ended");
            None
        }
        Err(err) => {
            error!(error = %err, "Frame loop faulted");
            None
        }
    }
}

/// Arm one `setTimeout` that runs a tick and re-arms itself
fn schedule_tick(driver: SharedDriver, delay_ms: i32) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;

    let callback = Closure::once_into_js(move || {
        if let Some(delay) = advance(&driver) {
            if let Err(err) = schedule_tick(driver, delay.as_millis() as i32) {
                error!(?err, "Failed to schedule next frame");
            }
        }
    });

    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref::<js_sys::Function>(),
        delay_ms,
    )?;
    Ok(())
}

#[wasm_bindgen]
pub struct WebRenderer {
    driver: SharedDriver,
    stop: StopHandle,
    started: bool,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Bind the built-in torus to the canvas with the given id
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let surface = CanvasSurface::from_element_id(canvas_id)?;
        let driver = FrameDriver::new(Mesh::torus(), RenderConfig::default(), surface).map_err(to_js)?;
        let stop = driver.stop_handle();

        Ok(WebRenderer {
            driver: Rc::new(RefCell::new(driver)),
            stop,
            started: false,
        })
    }

    /// Start ticking; calling it again is a no-op
    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        schedule_tick(self.driver.clone(), 0)
    }

    /// Prevent any further tick from running
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Draw one frame at the current angle without advancing it
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.driver.borrow_mut().render_frame().map_err(to_js)
    }

    pub fn angle(&self) -> f32 {
        self.driver.borrow().angle()
    }

    pub fn frames(&self) -> f64 {
        self.driver.borrow().frame_count() as f64
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    Ok(())
}
