use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// CSS width of the layout viewport.
pub fn viewport_width() -> f64 {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// `(scroll_top, scroll_height, client_height)` of the scrolling element.
pub fn scroll_metrics(document: &web::Document) -> (f64, f64, f64) {
    match document.scrolling_element() {
        Some(el) => (
            el.scroll_top() as f64,
            el.scroll_height() as f64,
            el.client_height() as f64,
        ),
        None => (0.0, 0.0, 0.0),
    }
}

pub fn set_style(document: &web::Document, id: &str, property: &str, value: &str) {
    if let Some(el) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        let _ = el.style().set_property(property, value);
    }
}

pub fn set_class(document: &web::Document, id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = if on {
            el.class_list().add_1(class)
        } else {
            el.class_list().remove_1(class)
        };
    }
}

/// Stop the page from scrolling while the intro plays.
pub fn set_scroll_locked(document: &web::Document, locked: bool) {
    if let Some(body) = document.body() {
        let style = body.style();
        let _ = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
    }
    if locked {
        if let Some(el) = document.scrolling_element() {
            el.set_scroll_top(0);
        }
    }
}

pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Like [`add_window_listener`] but hands the handler the event, cast to `E`.
pub fn add_window_event_listener<E: JsCast + 'static>(
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |e: web::Event| {
        if let Ok(e) = e.dyn_into::<E>() {
            handler(e);
        }
    }) as Box<dyn FnMut(web::Event)>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
