#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

//! Scroll-driven holographic crystal site.
//!
//! The page is a tall scroll region; scroll progress picks the crystal's
//! shape and palette, moves the title and shows one feature section at a
//! time. Clicking a section opens a detail overlay that freezes the scene in
//! a calm focus mode.

pub mod app;
pub mod backdrop;
pub mod config;
pub mod geometry;
pub mod header;
pub mod mapper;
pub mod palette;
pub mod progress;
pub mod scene;
pub mod sections;
pub mod smoothing;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::SiteConfig;

    mod dom;
    mod gl;
    mod render;

    const CONFIG_ELEMENT: &str = "site-config";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let (config, config_error) = match document
            .get_element_by_id(CONFIG_ELEMENT)
            .and_then(|el| el.text_content())
        {
            Some(text) => match SiteConfig::from_json(&text) {
                Ok(config) => (config, None),
                Err(err) => (SiteConfig::default(), Some(err)),
            },
            None => (SiteConfig::default(), None),
        };
        console_log::init_with_level(config.log_level.into()).ok();
        if let Some(err) = config_error {
            log::warn!("{err}; using default configuration");
        }
        log::info!("crystal grimoire starting");

        let canvas = document
            .get_element_by_id("c")
            .ok_or("canvas not found")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        let ui = dom::Ui::build(&document, &config)?;
        render::start(canvas, ui, config)?;
        Ok(())
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
