// Browser glue: a Surface over CanvasRenderingContext2d, a requestAnimationFrame
// scheduler, and the ParticleBackground handle exported to JavaScript.

use crate::color;
use crate::field::ParticleField;
use crate::scheduler::{Animator, FrameScheduler};
use crate::surface::{ColorStop, Fill, Surface, SurfaceError};
use rand::rngs::ThreadRng;
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

type WebAnimator = Animator<CanvasSurface, RafScheduler, ThreadRng>;

fn js_error(msg: &str) -> JsValue {
    js_sys::Error::new(msg).into()
}

fn surface_error(e: JsValue) -> SurfaceError {
    SurfaceError(format!("{:?}", e))
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| js_error("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(CanvasSurface { canvas, context })
    }

    fn add_stops(gradient: &CanvasGradient, stops: &[ColorStop]) -> Result<(), SurfaceError> {
        for stop in stops {
            gradient
                .add_color_stop(stop.offset as f32, &stop.color)
                .map_err(surface_error)?;
        }
        Ok(())
    }

    fn set_fill(&self, fill: &Fill) -> Result<(), SurfaceError> {
        match fill {
            Fill::Solid(css) => self.context.set_fill_style(&JsValue::from_str(css)),
            Fill::Linear(g) => {
                let gradient =
                    self.context
                        .create_linear_gradient(g.from[0], g.from[1], g.to[0], g.to[1]);
                Self::add_stops(&gradient, &g.stops)?;
                self.context.set_fill_style(&gradient);
            }
            Fill::Radial(g) => {
                let [x0, y0, r0] = g.inner;
                let [x1, y1, r1] = g.outer;
                let gradient = self
                    .context
                    .create_radial_gradient(x0, y0, r0, x1, y1, r1)
                    .map_err(surface_error)?;
                Self::add_stops(&gradient, &g.stops)?;
                self.context.set_fill_style(&gradient);
            }
        }
        Ok(())
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), SurfaceError> {
        self.context.clear_rect(x, y, width, height);
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: &Fill,
    ) -> Result<(), SurfaceError> {
        self.set_fill(fill)?;
        self.context.fill_rect(x, y, width, height);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        fill: &Fill,
    ) -> Result<(), SurfaceError> {
        self.set_fill(fill)?;
        self.context.begin_path();
        self.context
            .arc(x, y, radius, 0.0, PI * 2.0)
            .map_err(surface_error)?;
        self.context.fill();
        Ok(())
    }
}

/// Schedules frames with `requestAnimationFrame`. The callback cell is
/// filled once the animator it drives exists.
pub struct RafScheduler {
    window: Window,
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        if let Some(callback) = self.callback.borrow().as_ref() {
            if let Err(e) = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                log::error!("requestAnimationFrame failed: {:?}", e);
            }
        }
    }
}

fn viewport_size(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| js_error("innerWidth is not a number"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| js_error("innerHeight is not a number"))?;
    Ok((width, height))
}

/// Handle to a running background. Freeing it from JS detaches the input
/// listeners but leaves the loop running; call `stop` to end it.
#[wasm_bindgen]
pub struct ParticleBackground {
    window: Window,
    animator: Rc<RefCell<WebAnimator>>,
    on_mouse_move: Closure<dyn FnMut(MouseEvent)>,
    on_resize: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Takes over the canvas with the given id, sizes it to the window and
    /// starts animating.
    pub fn attach(canvas_id: &str) -> Result<ParticleBackground, JsValue> {
        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| js_error(&format!("missing #{}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;

        let (width, height) = viewport_size(&window)?;
        let surface = CanvasSurface::new(canvas)?;
        let field = ParticleField::new(width, height, rand::thread_rng());

        let callback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            window: window.clone(),
            callback: callback.clone(),
        };
        let animator = Rc::new(RefCell::new(Animator::new(field, surface, scheduler)));

        let frame_animator = animator.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_animator.borrow_mut().frame();
        }) as Box<dyn FnMut()>));

        let pointer_animator = animator.clone();
        let on_mouse_move = Closure::wrap(Box::new(move |e: MouseEvent| {
            pointer_animator
                .borrow_mut()
                .pointer_move(e.client_x() as f64, e.client_y() as f64);
        }) as Box<dyn FnMut(MouseEvent)>);

        let resize_animator = animator.clone();
        let resize_window = window.clone();
        let on_resize = Closure::wrap(Box::new(move || match viewport_size(&resize_window) {
            Ok((w, h)) => resize_animator.borrow_mut().resize(w, h),
            Err(e) => log::warn!("ignoring resize: {:?}", e),
        }) as Box<dyn FnMut()>);

        // Built before registering so Drop detaches whatever was added if a
        // registration fails.
        let background = ParticleBackground {
            window,
            animator,
            on_mouse_move,
            on_resize,
        };
        background.attach_listeners()?;
        background.animator.borrow_mut().start();
        Ok(background)
    }

    /// Stops requesting frames and detaches the input listeners.
    pub fn stop(&mut self) -> Result<(), JsValue> {
        self.animator.borrow_mut().stop();
        self.detach_listeners()
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.animator.borrow().is_running()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.animator.borrow().field.len()
    }

    #[wasm_bindgen(js_name = droppedFrames)]
    pub fn dropped_frames(&self) -> f64 {
        self.animator.borrow().dropped_frames() as f64
    }
}

impl ParticleBackground {
    fn attach_listeners(&self) -> Result<(), JsValue> {
        self.window.add_event_listener_with_callback(
            "mousemove",
            self.on_mouse_move.as_ref().unchecked_ref(),
        )?;
        self.window
            .add_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
    }

    /// Removes both listeners even if the first removal fails; reports the first error.
    fn detach_listeners(&self) -> Result<(), JsValue> {
        let mouse = self.window.remove_event_listener_with_callback(
            "mousemove",
            self.on_mouse_move.as_ref().unchecked_ref(),
        );
        let resize = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        mouse.and(resize)
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        // The closures die with this handle; the window must not keep calling them.
        if let Err(e) = self.detach_listeners() {
            log::error!("failed to detach listeners: {:?}", e);
        }
    }
}

#[wasm_bindgen(js_name = hexToRgba)]
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    color::hex_to_rgba(hex, alpha)
}
