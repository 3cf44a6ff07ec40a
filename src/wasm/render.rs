use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::config::SkyConfig;
use crate::error::PortfolioError;
use crate::palette::Palette;
use crate::sky::{SkyState, SUN_RAYS};
use crate::theme::Mode;

const TAU: f64 = PI * 2.0;

struct Sky {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    state: SkyState,
    palette: Palette,
    /// Pending `requestAnimationFrame` id; at most one is ever live.
    frame: Option<i32>,
}

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Hooks the theme code uses to drive the sky.
#[derive(Clone)]
pub struct SkyHandle {
    sky: Rc<RefCell<Sky>>,
    tick: FrameClosure,
}

fn viewport() -> (f64, f64) {
    let Some(w) = window() else {
        return (0.0, 0.0);
    };
    let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

fn read_palette() -> Palette {
    let style = window().and_then(|w| {
        let body = w.document()?.body()?;
        w.get_computed_style(&body).ok().flatten()
    });
    match style {
        Some(style) => Palette::from_lookup(|var| style.get_property_value(var).ok()),
        None => Palette::default(),
    }
}

/// Start the sky on canvas `#id`, sized to the viewport.
pub fn start(
    document: &Document,
    id: &str,
    config: SkyConfig,
    mode: Mode,
) -> Result<SkyHandle, PortfolioError> {
    let canvas = document
        .get_element_by_id(id)
        .ok_or_else(|| PortfolioError::MissingElement(id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| PortfolioError::Js(format!("#{id} is not a canvas")))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| PortfolioError::Js("2d context not supported".into()))?
        .dyn_into()
        .map_err(|_| PortfolioError::Js("unexpected 2d context type".into()))?;

    let (width, height) = viewport();
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    let state = SkyState::new(config, mode, width, height, &mut rand::rng());

    let sky = Rc::new(RefCell::new(Sky {
        canvas,
        ctx,
        state,
        palette: read_palette(),
        frame: None,
    }));

    // Animation loop
    // `tick` holds the animation-frame closure so that it can keep calling
    // `request_animation_frame` on itself. Storing it inside an `Option`
    // allows us to create the `Closure` first and then reach it from within.
    let tick: FrameClosure = Rc::new(RefCell::new(None));
    let handle = SkyHandle {
        sky: sky.clone(),
        tick: tick.clone(),
    };
    let next = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut sky = sky.borrow_mut();
        sky.frame = None;
        let Sky {
            ctx,
            state,
            palette,
            ..
        } = &mut *sky;
        state.tick(&mut rand::rng());
        if let Err(err) = draw(ctx, state, palette) {
            log::error!("sky draw failed: {err:?}");
            return;
        }
        sky.frame = request_frame(&next);
    }) as Box<dyn FnMut()>));

    let resize = {
        let handle = handle.clone();
        Closure::wrap(Box::new(move || handle.restart()) as Box<dyn FnMut()>)
    };
    window()
        .ok_or_else(|| PortfolioError::Js("no window".into()))?
        .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
    resize.forget();

    handle.schedule();
    log::debug!("sky started in {} mode at {width}x{height}", mode.as_str());
    Ok(handle)
}

fn request_frame(tick: &FrameClosure) -> Option<i32> {
    let tick = tick.borrow();
    let closure = tick.as_ref()?;
    window()?
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

impl SkyHandle {
    fn cancel(&self) {
        if let Some(id) = self.sky.borrow_mut().frame.take() {
            if let Some(w) = window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }

    fn schedule(&self) {
        let frame = request_frame(&self.tick);
        self.sky.borrow_mut().frame = frame;
    }

    /// Stop the loop, fit the canvas to the viewport, reseed and resume.
    pub fn restart(&self) {
        self.cancel();
        {
            let mut sky = self.sky.borrow_mut();
            let (width, height) = viewport();
            sky.canvas.set_width(width as u32);
            sky.canvas.set_height(height as u32);
            sky.state.resize(width, height, &mut rand::rng());
            log::debug!("sky resized to {width}x{height}");
        }
        self.schedule();
    }

    /// Switch between stars and clouds. Same-mode calls are ignored.
    pub fn update_mode(&self, mode: Mode) {
        let changed = self
            .sky
            .borrow_mut()
            .state
            .set_mode(mode, &mut rand::rng());
        if changed {
            log::debug!("sky mode -> {}", mode.as_str());
            self.cancel();
            self.schedule();
        }
    }

    /// Re-read theme colors; used from the next frame on.
    pub fn refresh_palette(&self) {
        self.sky.borrow_mut().palette = read_palette();
    }
}

/// Draw one frame. Pure with respect to `state`.
fn draw(ctx: &CanvasRenderingContext2d, state: &SkyState, palette: &Palette) -> Result<(), JsValue> {
    let (width, height) = state.size();
    ctx.clear_rect(0.0, 0.0, width, height);
    match state.mode() {
        Mode::Dark => draw_stars(ctx, state)?,
        Mode::Light => {
            draw_clouds(ctx, state, palette)?;
            draw_dots(ctx, state, palette)?;
            draw_sun(ctx, state, palette)?;
        }
    }
    draw_shooting_stars(ctx, state, palette)
}

fn draw_stars(ctx: &CanvasRenderingContext2d, state: &SkyState) -> Result<(), JsValue> {
    ctx.set_fill_style_str("rgba(255,255,255,.75)");
    for s in state.stars() {
        ctx.begin_path();
        ctx.arc(s.x, s.y, s.r, 0.0, TAU)?;
        ctx.fill();
    }
    Ok(())
}

fn draw_clouds(
    ctx: &CanvasRenderingContext2d,
    state: &SkyState,
    palette: &Palette,
) -> Result<(), JsValue> {
    for c in state.clouds() {
        let rx = c.radius * 1.2;
        let ry = c.radius * c.stretch;
        let gradient = ctx.create_radial_gradient(c.x, c.y, rx * 0.12, c.x, c.y, rx)?;
        gradient.add_color_stop(0.0, &palette.cloud_top)?;
        gradient.add_color_stop(0.5, &palette.cloud_mid)?;
        gradient.add_color_stop(1.0, &palette.cloud_bottom)?;
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.begin_path();
        ctx.ellipse(c.x, c.y, rx, ry, 0.0, 0.0, TAU)?;
        ctx.fill();
    }
    Ok(())
}

fn draw_dots(
    ctx: &CanvasRenderingContext2d,
    state: &SkyState,
    palette: &Palette,
) -> Result<(), JsValue> {
    ctx.set_fill_style_str(&palette.dot_fill());
    for d in state.dots() {
        ctx.begin_path();
        ctx.arc(d.x, d.y, d.size, 0.0, TAU)?;
        ctx.fill();
    }
    Ok(())
}

fn draw_sun(
    ctx: &CanvasRenderingContext2d,
    state: &SkyState,
    palette: &Palette,
) -> Result<(), JsValue> {
    let (x, y) = state.sun_center();
    let glow = ctx.create_radial_gradient(x, y, 10.0, x, y, 90.0)?;
    glow.add_color_stop(0.0, "rgba(255,255,255,0.95)")?;
    glow.add_color_stop(0.4, &palette.glow2)?;
    glow.add_color_stop(1.0, "rgba(255,255,255,0)")?;
    ctx.set_fill_style_canvas_gradient(&glow);
    ctx.begin_path();
    ctx.arc(x, y, 38.0, 0.0, TAU)?;
    ctx.fill();

    ctx.set_stroke_style_str("rgba(255,255,255,0.25)");
    ctx.set_line_width(1.0);
    for i in 0..SUN_RAYS {
        let angle = TAU / SUN_RAYS as f64 * i as f64 + state.sun_angle();
        let (sin, cos) = angle.sin_cos();
        ctx.begin_path();
        ctx.move_to(x + cos * 32.0, y + sin * 32.0);
        ctx.line_to(x + cos * 64.0, y + sin * 64.0);
        ctx.stroke();
    }
    Ok(())
}

fn draw_shooting_stars(
    ctx: &CanvasRenderingContext2d,
    state: &SkyState,
    palette: &Palette,
) -> Result<(), JsValue> {
    for s in state.shooting_stars() {
        let opacity = s.opacity();
        let (tail_x, tail_y) = s.tail();

        let trail = ctx.create_linear_gradient(s.x, s.y, tail_x, tail_y);
        trail.add_color_stop(0.0, &palette.cloud_top)?;
        trail.add_color_stop(1.0, &palette.glow2)?;
        ctx.set_stroke_style_canvas_gradient(&trail);
        ctx.set_line_width(2.5 * opacity * s.swell);
        ctx.set_line_cap("round");
        ctx.set_shadow_blur(8.0);
        ctx.set_shadow_color(&palette.glow3);
        ctx.begin_path();
        ctx.move_to(s.x, s.y);
        ctx.line_to(tail_x, tail_y);
        ctx.stroke();

        ctx.set_fill_style_str(&format!("rgba(255,255,255,{})", 0.8 * opacity));
        ctx.set_shadow_blur(12.0);
        ctx.begin_path();
        ctx.arc(s.x, s.y, 2.2 * s.swell, 0.0, TAU)?;
        ctx.fill();
        ctx.set_shadow_blur(0.0);
    }
    Ok(())
}
