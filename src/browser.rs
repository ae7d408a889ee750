//! Thin wrappers over the DOM surface the game touches: canvas lookup,
//! animation-frame scheduling, event listeners, fetch, and the console
//! logging sink every other module reports errors through.

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen::closure::{Closure, WasmClosure, WasmClosureFnOnce};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[rustfmt::skip]
use web_sys::{
    CanvasRenderingContext2d,
    Document,
    HtmlCanvasElement,
    HtmlImageElement,
    KeyboardEvent,
    MouseEvent,
    Response,
    TouchEvent,
    Window,
};

macro_rules! log {
    ($($t:tt)*) => {
        $crate::browser::console_log(&format!($($t)*))
    };
}

macro_rules! error {
    ($($t:tt)*) => {
        $crate::browser::console_error(&format!($($t)*))
    };
}

pub fn console_log(message: &str) {
    web_sys::console::log_1(&message.into());
}

pub fn console_error(message: &str) {
    web_sys::console::error_1(&message.into());
}

/// The centralized error sink: everything that fails without propagating
/// a Result funnels through here.
pub fn report_error(context: &str, message: impl std::fmt::Display) {
    console_error(&format!("[{context}] {message}"));
}

// canvas element ids and the context kind the renderer requires
mod html {
    pub const BACKGROUND_CANVAS_ID: &str = "background";
    pub const FOREGROUND_CANVAS_ID: &str = "foreground";
    pub const CONTEXT_2D: &str = "2d";
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("window not found"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow!("no document found"))
}

pub fn canvas(id: &str) -> Result<HtmlCanvasElement> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("no canvas element found with id '{id}'"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|element| anyhow!("error converting {:#?} to HtmlCanvasElement", element))
}

pub fn background_canvas() -> Result<HtmlCanvasElement> {
    canvas(html::BACKGROUND_CANVAS_ID)
}

pub fn foreground_canvas() -> Result<HtmlCanvasElement> {
    canvas(html::FOREGROUND_CANVAS_ID)
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context(html::CONTEXT_2D)
        .map_err(|js_value| anyhow!("error getting 2d context: {:#?}", js_value))?
        .ok_or_else(|| anyhow!("no 2d context found"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|element| {
            anyhow!(
                "error converting {:#?} to CanvasRenderingContext2d",
                element
            )
        })
}

/// The degraded path when the 2d feature check fails: replace the page
/// body with a static message instead of attempting to run the loop.
pub fn show_fallback_message(message: &str) {
    if let Ok(doc) = document() {
        if let Some(body) = doc.body() {
            body.set_inner_text(message);
        }
    }
}

pub fn now() -> Result<f64> {
    Ok(window()?
        .performance()
        .ok_or_else(|| anyhow!("performance object not found"))?
        .now())
}

/// Window inner size in CSS pixels, for sizing the stacked canvases.
pub fn viewport_size() -> Result<(f64, f64)> {
    let window = window()?;
    let width = window
        .inner_width()
        .map_err(|err| anyhow!("error reading innerWidth: {:#?}", err))?
        .as_f64()
        .ok_or_else(|| anyhow!("innerWidth is not a number"))?;
    let height = window
        .inner_height()
        .map_err(|err| anyhow!("error reading innerHeight: {:#?}", err))?
        .as_f64()
        .ok_or_else(|| anyhow!("innerHeight is not a number"))?;
    Ok((width, height))
}

pub fn new_image() -> Result<HtmlImageElement> {
    HtmlImageElement::new().map_err(|err| anyhow!("could not create image element: {:#?}", err))
}

pub type LoopClosure = Closure<dyn FnMut(f64)>;

pub fn create_raf_closure(f: impl FnMut(f64) + 'static) -> LoopClosure {
    Closure::new(f)
}

pub fn request_animation_frame(callback: &LoopClosure) -> Result<i32> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("cannot request animation frame: {:#?}", err))
}

pub fn closure_once<T, F, A, R>(f: F) -> Closure<T>
where
    T: ?Sized + WasmClosure,
    F: 'static + WasmClosureFnOnce<T, A, R>,
{
    Closure::once(f)
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Key presses anywhere in the window. The listener lives for the rest of
/// the program; the closure is forgotten on purpose.
pub fn on_key_down(mut handler: impl FnMut(String) + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        handler(event.code());
    });
    window()?
        .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("cannot attach keydown listener: {:#?}", err))?;
    closure.forget();
    Ok(())
}

pub fn on_resize(mut handler: impl FnMut() + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        handler();
    });
    window()?
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("cannot attach resize listener: {:#?}", err))?;
    closure.forget();
    Ok(())
}

/// Clicks and first touches on `canvas`, delivered in game-local
/// coordinates (viewport position minus the canvas origin).
pub fn on_pointer_down(
    canvas: &HtmlCanvasElement,
    handler: impl FnMut(f64, f64) + 'static,
) -> Result<()> {
    let handler = Rc::new(RefCell::new(handler));

    let click_target = canvas.clone();
    let click_handler = handler.clone();
    let click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let rect = click_target.get_bounding_client_rect();
        let x = f64::from(event.client_x()) - rect.left();
        let y = f64::from(event.client_y()) - rect.top();
        (click_handler.borrow_mut())(x, y);
    });
    canvas
        .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("cannot attach click listener: {:#?}", err))?;
    click.forget();

    let touch_target = canvas.clone();
    let touch = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
        if let Some(touch) = event.touches().get(0) {
            let rect = touch_target.get_bounding_client_rect();
            let x = f64::from(touch.client_x()) - rect.left();
            let y = f64::from(touch.client_y()) - rect.top();
            (handler.borrow_mut())(x, y);
        }
    });
    canvas
        .add_event_listener_with_callback("touchstart", touch.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("cannot attach touchstart listener: {:#?}", err))?;
    touch.forget();

    Ok(())
}

pub async fn fetch_json<T>(json_path: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let resp_value = fetch_with_str(json_path).await?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|element| anyhow!("error converting [{:#?}] to Response", element))?;
    let json = resp
        .json()
        .map_err(|err| anyhow!("could not get JSON from response [{:#?}]", err))?;

    let json_value = JsFuture::from(json)
        .await
        .map_err(|err| anyhow!("error fetching [{:#?}]", err))?;

    serde_wasm_bindgen::from_value(json_value)
        .map_err(|err| anyhow!("error converting response: {:#?}", err))
}

async fn fetch_with_str(resource: &str) -> Result<JsValue> {
    let resp = window()?.fetch_with_str(resource);

    JsFuture::from(resp)
        .await
        .map_err(|err| anyhow!("error fetching: {:#?}", err))
}
