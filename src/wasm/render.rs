use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, WebGl2RenderingContext as GL, Window};

use super::dom::Ui;
use super::gl::{self, GpuMesh, Program};
use crate::app::SiteState;
use crate::config::SiteConfig;
use crate::geometry::{self, ParticleField};
use crate::mapper::Shape;
use crate::palette;
use crate::progress::{ScrollGeometry, ScrollTracker};
use crate::scene::{self, SceneState};

const WIRE_OPACITY: f32 = 0.05;
const PARTICLE_OPACITY: f32 = 0.3;

struct CrystalMeshes {
    solid: GpuMesh,
    wire: GpuMesh,
}

/// GPU resources plus the smoothed scene they draw.
struct Renderer {
    gl: GL,
    holo: Program,
    flat: Program,
    crystals: HashMap<Shape, CrystalMeshes>,
    particles: GpuMesh,
    scene: SceneState,
    fov_deg: f32,
}

impl Renderer {
    fn new(gl: GL, config: &SiteConfig) -> Result<Self, gl::GlError> {
        let holo = Program::holo(&gl)?;
        let flat = Program::flat(&gl)?;

        let mut crystals = HashMap::new();
        for shape in Shape::ALL {
            let solid = GpuMesh::triangles(&gl, &geometry::solid_mesh(shape))?;
            let wire = GpuMesh::lines(&gl, &geometry::wire_mesh(shape))?;
            crystals.insert(shape, CrystalMeshes { solid, wire });
        }
        log::debug!("uploaded {} crystal shapes", crystals.len());

        let field = ParticleField::scatter(config.particle_count, || js_sys::Math::random() as f32);
        let particles = GpuMesh::points(&gl, &field)?;

        Ok(Self {
            gl,
            holo,
            flat,
            crystals,
            particles,
            scene: SceneState::new(config),
            fov_deg: config.camera_fov_deg,
        })
    }

    fn draw(&self, width: i32, height: i32) {
        let gl = &self.gl;
        gl.viewport(0, 0, width, height);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        // Additive, double-sided and depth-write free: internal faces glow
        // through instead of z-fighting.
        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE);
        gl.disable(GL::CULL_FACE);
        gl.depth_mask(false);

        let view = self.scene.view();
        let projection = scene::projection(self.fov_deg, width as f32 / height.max(1) as f32);
        let Some(meshes) = self.crystals.get(&self.scene.shape()) else {
            return;
        };

        let uniforms = self.scene.uniforms();
        gl.use_program(Some(&self.holo.program));
        self.holo
            .set_matrices(gl, &self.scene.crystal_model(), &view, &projection);
        gl.uniform1f(self.holo.uniform("u_time"), uniforms.time);
        gl.uniform1f(self.holo.uniform("u_distortion"), uniforms.distortion);
        let [r, g, b] = uniforms.color_a.to_array();
        gl.uniform3f(self.holo.uniform("u_color_a"), r, g, b);
        let [r, g, b] = uniforms.color_b.to_array();
        gl.uniform3f(self.holo.uniform("u_color_b"), r, g, b);
        meshes.solid.draw(gl);

        gl.use_program(Some(&self.flat.program));
        self.flat
            .set_matrices(gl, &self.scene.wire_model(), &view, &projection);
        gl.uniform3f(self.flat.uniform("u_color"), 1.0, 1.0, 1.0);
        gl.uniform1f(self.flat.uniform("u_opacity"), WIRE_OPACITY);
        gl.uniform1i(self.flat.uniform("u_round"), 0);
        meshes.wire.draw(gl);

        self.flat
            .set_matrices(gl, &self.scene.particle_model(), &view, &projection);
        let [r, g, b] = palette::CRYSTAL.to_array();
        gl.uniform3f(self.flat.uniform("u_color"), r, g, b);
        gl.uniform1f(self.flat.uniform("u_opacity"), PARTICLE_OPACITY);
        gl.uniform1i(self.flat.uniform("u_round"), 1);
        let half_fov = (self.fov_deg.to_radians() / 2.0).tan();
        gl.uniform1f(self.flat.uniform("u_point_scale"), height as f32 / half_fov);
        self.particles.draw(gl);
    }
}

fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

/// Measures the page and feeds the current offset to the tracker. `snap`
/// skips the scrub, for the first reading after load.
fn observe_scroll(window: &Window, tracker: &RefCell<ScrollTracker>, snap: bool) {
    let Some(root) = window.document().and_then(|d| d.document_element()) else {
        return;
    };
    let geometry = ScrollGeometry::new(f64::from(root.scroll_height()), viewport_height(window));
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let mut tracker = tracker.borrow_mut();
    if snap {
        tracker.sync(scroll_y, &geometry);
    } else {
        tracker.observe(scroll_y, &geometry);
    }
}

fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) {
    let ratio = window.device_pixel_ratio().max(1.0);
    let w = window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0);
    let h = viewport_height(window);
    canvas.set_width((w * ratio) as u32);
    canvas.set_height((h * ratio) as u32);
}

/// Wire scroll and resize listeners, then run the render loop on
/// `requestAnimationFrame` until the page goes away.
pub fn start(canvas: HtmlCanvasElement, ui: Ui, config: SiteConfig) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    let gl = gl::context(&canvas)?;
    let renderer = Renderer::new(gl, &config)?;
    let performance = window.performance().ok_or("performance API unavailable")?;

    let site = Rc::new(RefCell::new(SiteState::new()));
    let tracker = Rc::new(RefCell::new(ScrollTracker::new(config.scrub_seconds)));
    ui.attach(&window, site.clone())?;

    fit_canvas(&window, &canvas);
    // The browser may restore a scroll offset before we get here.
    observe_scroll(&window, &tracker, true);

    // Resize canvas to fit window; the scroll range moves with it.
    let resize_closure = {
        let canvas = canvas.clone();
        let window = window.clone();
        let tracker = tracker.clone();
        Closure::wrap(Box::new(move || {
            fit_canvas(&window, &canvas);
            observe_scroll(&window, &tracker, false);
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let scroll_closure = {
        let window = window.clone();
        let tracker = tracker.clone();
        Closure::wrap(Box::new(move || observe_scroll(&window, &tracker, false)) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("scroll", scroll_closure.as_ref().unchecked_ref())?;
    scroll_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let origin = performance.now();
    let mut last = 0.0_f32;
    let mut renderer = renderer;
    let frame_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let time = ((performance.now() - origin) / 1000.0) as f32;
        let dt = time - last;
        last = time;

        let progress = tracker.borrow_mut().tick(dt);
        let (target, progress, view) = {
            let mut site = site.borrow_mut();
            site.set_progress(progress);
            (site.visual_target(time), site.progress(), site.view())
        };

        if renderer.scene.advance(&target, progress, time) {
            log::debug!("crystal now {:?} ({:?})", target.shape, target.stage);
        }
        renderer.draw(canvas.width() as i32, canvas.height() as i32);
        ui.update(&view);

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(err) = frame_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::error!("failed to schedule frame: {err:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = g.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }

    log::info!("render loop started");
    Ok(())
}
