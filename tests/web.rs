#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use grimoire_wasm::geometry::{solid_mesh, wire_mesh};
use grimoire_wasm::mapper::Shape;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn document_has_a_body_to_mount_into() {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    let body = document.body().expect("body element");

    let stage = document.create_element("div").unwrap();
    stage.set_id("stage");
    let canvas = document.create_element("canvas").unwrap();
    canvas.set_id("c");
    stage.append_child(&canvas).unwrap();
    body.append_child(&stage).unwrap();

    let canvas = document
        .get_element_by_id("c")
        .expect("canvas element not found")
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    assert!(canvas.get_context("webgl2").is_ok());
}

#[wasm_bindgen_test]
fn meshes_fit_in_wasm_memory() {
    for shape in Shape::ALL {
        let solid = solid_mesh(shape);
        let wire = wire_mesh(shape);
        assert!(solid.vertex_count() < u32::MAX as usize);
        assert!(!wire.edge_indices().is_empty());
    }
}
