//! Browser host: mounts the overlay canvas and wires DOM events to the core.
//!
//! [`mount`] is the wasm entry point. It creates a transparent canvas above
//! the page, listens for pointer events on the document and for `resize` on
//! the window, and drives [`OverlayCore::on_frame`] from
//! `requestAnimationFrame`. All state lives in one `Rc<RefCell<Host>>`; every
//! callback borrows it only for the duration of the call and releases it
//! before carrying out the returned [`Action`]s.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement, PointerEvent, Window};

use crate::config::LayerConfig;
use crate::consts::OVERLAY_Z_INDEX;
use crate::engine::{Action, OverlayCore, Renderer};
use crate::error::LayerError;
use crate::geom::{Point, Tilt, Viewport};
use crate::pointer::{PointerKind, PointerSample};
use crate::render::CanvasRenderer;

type SharedHost = Rc<RefCell<Host>>;
type FrameHolder = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
type PointerHandler = fn(&mut OverlayCore, PointerSample) -> Vec<Action>;

struct Host {
    core: OverlayCore,
    renderer: CanvasRenderer,
    frame: Option<PendingFrame>,
}

impl Host {
    /// Cancel any armed frame and take the canvas off the page.
    fn detach(&mut self) {
        if let Some(frame) = self.frame.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(frame.handle) {
                    log::warn!("failed to cancel frame {}: {e:?}", frame.handle);
                }
            }
            frame.holder.borrow_mut().take();
        }
        self.renderer.canvas().remove();
    }
}

/// Run `f` on the cell's value unless something already borrows it.
/// Returns whether `f` ran.
fn with_idle<T>(cell: &RefCell<T>, f: impl FnOnce(&mut T)) -> bool {
    let Ok(mut guard) = cell.try_borrow_mut() else {
        return false;
    };
    f(&mut guard);
    true
}

/// An armed animation-frame callback and the slot keeping its closure alive.
struct PendingFrame {
    handle: i32,
    holder: FrameHolder,
}

/// A DOM listener that stays registered until [`Listener::remove`].
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn install(
        target: &EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, LayerError> {
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), kind, callback })
    }

    fn remove(&self) {
        let function: &js_sys::Function = self.callback.as_ref().unchecked_ref();
        if let Err(e) = self.target.remove_event_listener_with_callback(self.kind, function) {
            log::warn!("failed to remove {} listener: {e:?}", self.kind);
        }
    }
}

/// A mounted overlay. Dropping it (or calling [`StylusLayer::unmount`])
/// detaches every listener and removes the canvas.
#[wasm_bindgen]
pub struct StylusLayer {
    host: SharedHost,
    listeners: Vec<Listener>,
    mounted: bool,
}

#[wasm_bindgen]
impl StylusLayer {
    /// Detach from the page. Safe to call more than once; if the overlay is
    /// busy inside one of its own callbacks the canvas stays and a later
    /// call finishes the job.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
        if with_idle(&self.host, Host::detach) {
            self.mounted = false;
            log::info!("stylus overlay unmounted");
        } else {
            log::warn!("overlay busy during unmount; canvas left in place");
        }
    }
}

impl Drop for StylusLayer {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Mount the overlay on the current page.
///
/// `config_json` optionally overrides any field of [`LayerConfig`].
///
/// # Errors
///
/// Returns `Err` when the config is malformed or out of range, or when the
/// page has no window, document, body, or 2D canvas context.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<StylusLayer, JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::debug!("console logger already installed");
    }
    Ok(build(config_json.as_deref())?)
}

fn build(config_json: Option<&str>) -> Result<StylusLayer, LayerError> {
    let config = LayerConfig::from_optional_json(config_json)?;
    let window = web_sys::window().ok_or(LayerError::NoWindow)?;
    let document = window.document().ok_or(LayerError::NoDocument)?;
    let body = document.body().ok_or(LayerError::NoBody)?;
    let viewport = viewport_of(&window)?;

    let (canvas, ctx) = create_canvas(&document)?;
    let renderer = CanvasRenderer::new(canvas, ctx);
    renderer.resize(viewport)?;
    body.append_child(renderer.canvas())?;

    let host = Rc::new(RefCell::new(Host { core: OverlayCore::new(viewport, config), renderer, frame: None }));

    // From here on a failure drops the layer, which tears down whatever was
    // installed so far.
    let mut layer = StylusLayer { host: Rc::clone(&host), listeners: Vec::new(), mounted: true };

    let document_target: EventTarget = document.into();
    let pointer_events: [(&'static str, PointerHandler); 4] = [
        ("pointerdown", OverlayCore::on_pointer_down),
        ("pointermove", OverlayCore::on_pointer_move),
        ("pointerup", OverlayCore::on_pointer_up),
        ("pointercancel", OverlayCore::on_pointer_cancel),
    ];
    for (kind, handler) in pointer_events {
        layer.listeners.push(Listener::install(&document_target, kind, pointer_listener(&host, handler))?);
    }
    let window_target: EventTarget = window.into();
    layer.listeners.push(Listener::install(&window_target, "resize", resize_listener(&host))?);

    {
        let mut guard = host.borrow_mut();
        let host = &mut *guard;
        if let Err(e) = host.renderer.render(&host.core.scene) {
            log::warn!("initial render failed: {e}");
        }
    }

    log::info!("stylus overlay mounted ({}x{} @{})", viewport.width, viewport.height, viewport.dpr);
    Ok(layer)
}

fn create_canvas(document: &Document) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), LayerError> {
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| LayerError::Js("created element is not a canvas".into()))?;

    let style = canvas.style();
    for (property, value) in [
        ("position", "absolute"),
        ("top", "0"),
        ("left", "0"),
        ("z-index", OVERLAY_Z_INDEX),
        ("pointer-events", "none"),
    ] {
        style.set_property(property, value)?;
    }

    let ctx = canvas
        .get_context("2d")?
        .ok_or(LayerError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| LayerError::NoContext)?;
    Ok((canvas, ctx))
}

fn viewport_of(window: &Window) -> Result<Viewport, LayerError> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width, height, window.device_pixel_ratio()))
}

// =============================================================
// Event wiring
// =============================================================

fn sample_from(event: &PointerEvent) -> PointerSample {
    let kind = PointerKind::from_pointer_type(&event.pointer_type());
    let screen = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
    let tilt = Tilt::new(f64::from(event.tilt_x()), f64::from(event.tilt_y()));
    PointerSample::new(event.pointer_id(), kind, screen).with_tilt(tilt)
}

fn pointer_listener(host: &SharedHost, handler: PointerHandler) -> Closure<dyn FnMut(Event)> {
    let host = Rc::clone(host);
    Closure::wrap(Box::new(move |event: Event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let actions = handler(&mut host.borrow_mut().core, sample_from(event));
        dispatch(&host, actions);
    }) as Box<dyn FnMut(Event)>)
}

fn resize_listener(host: &SharedHost) -> Closure<dyn FnMut(Event)> {
    let host = Rc::clone(host);
    Closure::wrap(Box::new(move |_event: Event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let viewport = match viewport_of(&window) {
            Ok(viewport) => viewport,
            Err(e) => {
                log::warn!("resize ignored: {e}");
                return;
            }
        };
        let actions = {
            let mut guard = host.borrow_mut();
            if let Err(e) = guard.renderer.resize(viewport) {
                log::warn!("canvas resize failed: {e}");
            }
            guard.core.set_viewport(viewport)
        };
        dispatch(&host, actions);
    }) as Box<dyn FnMut(Event)>)
}

fn dispatch(host: &SharedHost, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::RequestFrame => request_frame(host),
        }
    }
}

// =============================================================
// Frame loop
// =============================================================

fn request_frame(host: &SharedHost) {
    let Some(window) = web_sys::window() else {
        host.borrow_mut().core.redraw.abandon();
        log::warn!("no window, frame request dropped");
        return;
    };

    let host_for_cb = Rc::clone(host);
    let holder: FrameHolder = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |ts: f64| {
        let actions = {
            let mut guard = host_for_cb.borrow_mut();
            let host = &mut *guard;
            host.frame = None;
            host.core.on_frame(ts, &mut host.renderer)
        };
        dispatch(&host_for_cb, actions);
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(handle) => {
            *holder.borrow_mut() = Some(cb);
            host.borrow_mut().frame = Some(PendingFrame { handle, holder });
        }
        Err(e) => {
            host.borrow_mut().core.redraw.abandon();
            log::warn!("requestAnimationFrame failed: {e:?}");
        }
    }
}
