use crate::constants::*;
use crate::dom;
use crate::lifecycle::LoopState;
use crate::overlay;
use crate::render;
use crate::scroll::{normalize_scroll, ScrollSmoother};
use instant::Instant;
use scrollscape_core::{FrameInput, Stage, ViewportClass};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub stage: Stage,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub scroll: ScrollSmoother,

    pub mounted_at: Instant,
    pub last_instant: Instant,
    /// Last phase pushed to the overlay; the DOM is touched once per change.
    pub shown_phase: Option<u8>,
    /// Set when a resize crosses the viewport breakpoint.
    pub pending_viewport: Rc<RefCell<Option<ViewportClass>>>,
    pub state: Rc<Cell<LoopState>>,
    suspended_at: Option<Instant>,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        stage: Stage,
        gpu: Option<render::GpuState<'a>>,
        canvas: web::HtmlCanvasElement,
        document: web::Document,
    ) -> Self {
        let now = Instant::now();
        Self {
            stage,
            gpu,
            canvas,
            document,
            scroll: ScrollSmoother::new(SCROLL_SMOOTH_TIME_SEC),
            mounted_at: now,
            last_instant: now,
            shown_phase: None,
            pending_viewport: Rc::new(RefCell::new(None)),
            state: Rc::new(Cell::new(LoopState::Running)),
            suspended_at: None,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).min(Duration::from_secs_f32(MAX_FRAME_DT_SEC));
        self.last_instant = now;
        let elapsed = now - self.mounted_at;

        let pending = self.pending_viewport.borrow_mut().take();
        if let Some(class) = pending {
            self.stage.set_viewport(class);
            self.sync_spacer();
        }

        let intro = self.stage.intro_active();
        let offset = if intro {
            self.scroll.reset(0.0);
            0.0
        } else {
            let (top, height, client) = dom::scroll_metrics(&self.document);
            let raw = normalize_scroll(top, height, client);
            self.scroll.step(raw, dt.as_secs_f32(), SCROLL_SETTLE_EPSILON)
        };

        let out = self.stage.frame(FrameInput {
            offset,
            elapsed,
            dt,
        });

        if let Some(o) = &out.intro {
            if self.shown_phase != Some(o.phase) {
                self.shown_phase = Some(o.phase);
                overlay::show_phase(&self.document, o, o.phase >= 3);
            }
            overlay::set_text_opacity(&self.document, o.opacity);
        }
        if out.intro_completed {
            log::info!("[frame] intro complete after {:?}", elapsed);
            overlay::reveal_content(&self.document);
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(out) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    pub fn sync_spacer(&self) {
        let css = crate::scroll::spacer_height_css(self.stage.props().total_pages);
        dom::set_style(&self.document, SCROLL_SPACER_ID, "height", &css);
    }

    /// `pagehide`: park the loop for the back/forward cache, or tear down on unload.
    pub fn page_hidden(&mut self, persisted: bool) {
        let prev = self.state.get();
        let next = prev.on_hide(persisted);
        if next == prev {
            return;
        }
        self.state.set(next);
        match next {
            LoopState::Suspended => {
                self.suspended_at = Some(Instant::now());
                log::info!("[frame] suspended");
            }
            LoopState::Stopped => {
                self.stage.teardown();
                log::info!("[frame] teardown");
            }
            LoopState::Running => {}
        }
    }

    /// `pageshow`: resume a parked loop. Returns true when frames must be rescheduled.
    pub fn page_shown(&mut self) -> bool {
        let (next, restart) = self.state.get().on_show();
        self.state.set(next);
        if restart {
            // time spent in the cache does not count toward the intro or the morph clock
            let now = Instant::now();
            if let Some(at) = self.suspended_at.take() {
                self.mounted_at += now - at;
            }
            self.last_instant = now;
            log::info!("[frame] resumed");
        }
        restart
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    point_capacity: u64,
    billboard_capacity: u64,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, point_capacity, billboard_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Handle to the rAF closure so a resumed page can restart the loop.
#[derive(Clone)]
pub struct FrameLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn schedule(&self) {
        if self.pending.get() {
            return;
        }
        if let (Some(w), Some(cb)) = (web::window(), self.tick.borrow().as_ref()) {
            if w.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
                self.pending.set(true);
            }
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> FrameLoop {
    let state = frame_ctx.borrow().state.clone();
    let frame_loop = FrameLoop {
        tick: Rc::new(RefCell::new(None)),
        pending: Rc::new(Cell::new(false)),
    };
    let loop_tick = frame_loop.clone();
    *frame_loop.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        loop_tick.pending.set(false);
        if !state.get().is_running() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        loop_tick.schedule();
    }) as Box<dyn FnMut()>));
    frame_loop.schedule();
    frame_loop
}
