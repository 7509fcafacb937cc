//! Thin WebGL2 helpers: shader programs and uploaded meshes.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::geometry::{Mesh, Particle};

const NOISE: &str = include_str!("shaders/noise.glsl");
const HOLO_VERT: &str = include_str!("shaders/holo.vert");
const HOLO_FRAG: &str = include_str!("shaders/holo.frag");
const FLAT_VERT: &str = include_str!("shaders/flat.vert");
const FLAT_FRAG: &str = include_str!("shaders/flat.frag");

const POSITION: u32 = 0;
const NORMAL: u32 = 1;
const UV: u32 = 2;
const SIZE: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum GlError {
    #[error("WebGL2 not supported")]
    Unsupported,
    #[error("failed to acquire WebGL2 context: {0}")]
    Context(String),
    #[error("failed to create {0}")]
    Allocation(&'static str),
    #[error("shader compile failed: {0}")]
    Compile(String),
    #[error("program link failed: {0}")]
    Link(String),
}

impl From<GlError> for JsValue {
    fn from(err: GlError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub fn context(canvas: &HtmlCanvasElement) -> Result<GL, GlError> {
    let ctx = canvas
        .get_context("webgl2")
        .map_err(|e| GlError::Context(format!("{e:?}")))?
        .ok_or(GlError::Unsupported)?;
    ctx.dyn_into::<GL>()
        .map_err(|_| GlError::Context("context is not WebGl2RenderingContext".into()))
}

fn compile(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, GlError> {
    let shader = gl
        .create_shader(kind)
        .ok_or(GlError::Allocation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(GlError::Compile(info))
    }
}

fn link(gl: &GL, vert: &str, frag: &str) -> Result<WebGlProgram, GlError> {
    let vs = compile(gl, GL::VERTEX_SHADER, vert)?;
    let fs = compile(gl, GL::FRAGMENT_SHADER, frag)?;
    let program = gl
        .create_program()
        .ok_or(GlError::Allocation("program"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));
    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        Err(GlError::Link(info))
    }
}

/// Linked program with its uniform locations resolved once.
pub struct Program {
    pub program: WebGlProgram,
    pub model: Option<WebGlUniformLocation>,
    pub view: Option<WebGlUniformLocation>,
    pub projection: Option<WebGlUniformLocation>,
    extra: Vec<(&'static str, Option<WebGlUniformLocation>)>,
}

impl Program {
    fn new(gl: &GL, vert: &str, frag: &str, names: &[&'static str]) -> Result<Self, GlError> {
        let program = link(gl, vert, frag)?;
        let lookup = |name: &str| {
            let location = gl.get_uniform_location(&program, name);
            if location.is_none() {
                log::debug!("uniform {name} is inactive");
            }
            location
        };
        Ok(Self {
            model: lookup("u_model"),
            view: lookup("u_view"),
            projection: lookup("u_projection"),
            extra: names.iter().map(|&n| (n, lookup(n))).collect(),
            program,
        })
    }

    /// The holographic crystal material.
    pub fn holo(gl: &GL) -> Result<Self, GlError> {
        let vert = HOLO_VERT.replace("//#include noise", NOISE);
        Self::new(
            gl,
            &vert,
            HOLO_FRAG,
            &["u_time", "u_distortion", "u_color_a", "u_color_b"],
        )
    }

    /// Unlit single-color program for wireframes and points.
    pub fn flat(gl: &GL) -> Result<Self, GlError> {
        Self::new(
            gl,
            FLAT_VERT,
            FLAT_FRAG,
            &["u_color", "u_opacity", "u_round", "u_point_scale"],
        )
    }

    pub fn uniform(&self, name: &str) -> Option<&WebGlUniformLocation> {
        self.extra
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, loc)| loc.as_ref())
    }

    pub fn set_matrices(&self, gl: &GL, model: &glam::Mat4, view: &glam::Mat4, proj: &glam::Mat4) {
        gl.uniform_matrix4fv_with_f32_array(self.model.as_ref(), false, &model.to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(self.view.as_ref(), false, &view.to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(self.projection.as_ref(), false, &proj.to_cols_array());
    }
}

/// A mesh living in GPU buffers behind one vertex array object.
pub struct GpuMesh {
    vao: WebGlVertexArrayObject,
    count: i32,
    mode: u32,
}

impl GpuMesh {
    /// Solid triangles with position, normal and uv attributes.
    pub fn triangles(gl: &GL, mesh: &Mesh) -> Result<Self, GlError> {
        Self::upload(gl, mesh, &mesh.indices, GL::TRIANGLES)
    }

    /// The mesh's edges as a line list.
    pub fn lines(gl: &GL, mesh: &Mesh) -> Result<Self, GlError> {
        Self::upload(gl, mesh, &mesh.edge_indices(), GL::LINES)
    }

    fn upload(gl: &GL, mesh: &Mesh, indices: &[u32], mode: u32) -> Result<Self, GlError> {
        let vao = gl
            .create_vertex_array()
            .ok_or(GlError::Allocation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));
        attribute(gl, POSITION, 3, mesh.positions.as_flattened())?;
        attribute(gl, NORMAL, 3, mesh.normals.as_flattened())?;
        attribute(gl, UV, 2, mesh.uvs.as_flattened())?;
        element_buffer(gl, indices)?;
        gl.bind_vertex_array(None);
        Ok(Self {
            vao,
            count: indices.len() as i32,
            mode,
        })
    }

    /// Particles drawn as points with a per-vertex size.
    pub fn points(gl: &GL, particles: &[Particle]) -> Result<Self, GlError> {
        let positions: Vec<f32> = particles
            .iter()
            .flat_map(|p| p.position.to_array())
            .collect();
        let sizes: Vec<f32> = particles.iter().map(|p| p.size).collect();
        let vao = gl
            .create_vertex_array()
            .ok_or(GlError::Allocation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));
        attribute(gl, POSITION, 3, &positions)?;
        attribute(gl, SIZE, 1, &sizes)?;
        gl.bind_vertex_array(None);
        Ok(Self {
            vao,
            count: particles.len() as i32,
            mode: GL::POINTS,
        })
    }

    pub fn draw(&self, gl: &GL) {
        gl.bind_vertex_array(Some(&self.vao));
        if self.mode == GL::POINTS {
            gl.draw_arrays(self.mode, 0, self.count);
        } else {
            gl.draw_elements_with_i32(self.mode, self.count, GL::UNSIGNED_INT, 0);
        }
        gl.bind_vertex_array(None);
    }
}

// Buffers stay alive for the page's lifetime, bound through their VAO.
fn attribute(gl: &GL, location: u32, size: i32, data: &[f32]) -> Result<(), GlError> {
    let buffer = gl.create_buffer().ok_or(GlError::Allocation("buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    // SAFETY: the view is consumed by buffer_data before any allocation can
    // move wasm memory.
    unsafe {
        let view = js_sys::Float32Array::view(data);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, 0, 0);
    Ok(())
}

fn element_buffer(gl: &GL, indices: &[u32]) -> Result<(), GlError> {
    let buffer = gl.create_buffer().ok_or(GlError::Allocation("buffer"))?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&buffer));
    // SAFETY: as in `attribute`.
    unsafe {
        let view = js_sys::Uint32Array::view(indices);
        gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &view, GL::STATIC_DRAW);
    }
    Ok(())
}
