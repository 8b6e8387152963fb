#![cfg(target_arch = "wasm32")]
use scrollscape_core::{Stage, StageConfig, ViewportClass};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod frame;
mod lifecycle;
mod overlay;
mod render;
mod scroll;
mod style;

use constants::*;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    dom::add_window_listener("resize", move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    });
}

/// Queue a viewport switch for the next frame whenever a resize crosses the breakpoint.
fn wire_viewport_watch(pending: Rc<RefCell<Option<ViewportClass>>>, initial: ViewportClass) {
    let mut current = initial;
    dom::add_window_listener("resize", move || {
        let class = ViewportClass::from_width_px(dom::viewport_width());
        if class != current {
            current = class;
            log::info!("[viewport] now {:?}", class);
            *pending.borrow_mut() = Some(class);
        }
    });
}

fn wire_page_lifecycle(
    frame_ctx: &Rc<RefCell<frame::FrameContext<'static>>>,
    frame_loop: frame::FrameLoop,
) {
    let ctx = frame_ctx.clone();
    let state = frame_ctx.borrow().state.clone();
    dom::add_window_event_listener("pagehide", move |e: web::PageTransitionEvent| {
        let persisted = e.persisted();
        match ctx.try_borrow_mut() {
            Ok(mut c) => c.page_hidden(persisted),
            // mid-frame: the state alone stops the loop
            Err(_) => state.set(state.get().on_hide(persisted)),
        }
    });
    let ctx = frame_ctx.clone();
    dom::add_window_listener("pageshow", move || {
        let restart = ctx.try_borrow_mut().is_ok_and(|mut c| c.page_shown());
        if restart {
            frame_loop.schedule();
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scrollscape-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        log::warn!("[init] already started; ignoring");
        return Ok(());
    }

    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, CANVAS_ID)?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let viewport = ViewportClass::from_width_px(dom::viewport_width());
    let config = StageConfig::for_viewport(viewport);
    let point_capacity = config.field_size.0 as u64 * config.field_size.1 as u64;
    let billboard_capacity = config.morph.count as u64;
    let stage = Stage::new(config);
    if stage.intro_active() {
        overlay::conceal_content(&document);
    } else {
        overlay::reveal_content(&document);
    }

    let gpu = frame::init_gpu(&canvas, point_capacity, billboard_capacity).await;
    let ctx = frame::FrameContext::new(stage, gpu, canvas, document);
    ctx.sync_spacer();
    wire_viewport_watch(ctx.pending_viewport.clone(), viewport);

    let frame_ctx = Rc::new(RefCell::new(ctx));
    let frame_loop = frame::start_loop(frame_ctx.clone());
    wire_page_lifecycle(&frame_ctx, frame_loop);
    Ok(())
}
