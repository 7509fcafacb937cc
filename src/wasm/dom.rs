//! Page chrome built in the DOM: title, section panels, side indicators, the
//! call to action and the detail overlay. The views only read [`SiteView`];
//! clicks go back through [`SiteState`].

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, HtmlElement, KeyboardEvent, Window};

use crate::app::{SiteState, SiteView};
use crate::config::SiteConfig;
use crate::sections::{self, Alignment, Section, SectionId, SECTIONS};

const BACKDROP_SVG: [&str; 3] = [
    r#"<svg viewBox="0 0 100 100"><polygon points="50 0, 93 25, 93 75, 50 100, 7 75, 7 25" fill="none" stroke="currentColor" stroke-width="0.5"/><polygon points="50 10, 85 30, 85 70, 50 90, 15 70, 15 30" fill="none" stroke="currentColor" stroke-width="0.2"/></svg>"#,
    r#"<svg viewBox="0 0 100 100"><circle cx="50" cy="50" r="45" fill="none" stroke="currentColor" stroke-width="0.5" stroke-dasharray="4 4"/><polygon points="50 5, 89 27, 89 72, 50 95, 11 72, 11 27" fill="none" stroke="currentColor" stroke-width="0.5"/></svg>"#,
    r#"<svg width="100%" height="100%"><defs><pattern id="grid" width="40" height="40" patternUnits="userSpaceOnUse"><path d="M 40 0 L 0 0 0 40" fill="none" stroke="rgba(165, 243, 252, 0.05)" stroke-width="1"/></pattern></defs><rect width="100%" height="100%" fill="url(#grid)"/></svg>"#,
];

fn element(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el = document.create_element(tag)?.dyn_into::<HtmlElement>()?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

fn text(document: &Document, tag: &str, class: &str, content: &str) -> Result<HtmlElement, JsValue> {
    let el = element(document, tag, class)?;
    el.set_text_content(Some(content));
    Ok(el)
}

fn image(document: &Document, class: &str, src: &str, alt: &str) -> Result<HtmlElement, JsValue> {
    let el = element(document, "img", class)?;
    el.set_attribute("src", src)?;
    el.set_attribute("alt", alt)?;
    Ok(el)
}

struct Title {
    root: HtmlElement,
    heading: HtmlElement,
    crystal: HtmlElement,
    grimoire: HtmlElement,
    subtitle: HtmlElement,
}

struct Panel {
    id: SectionId,
    root: HtmlElement,
    triggers: [HtmlElement; 2],
}

pub struct Ui {
    document: Document,
    body: HtmlElement,
    stage: HtmlElement,
    backdrop: [HtmlElement; 3],
    title: Title,
    panels: Vec<Panel>,
    indicators: Vec<HtmlElement>,
    cta: HtmlElement,
    overlay: HtmlElement,
    last: RefCell<Option<SiteView>>,
}

impl Ui {
    pub fn build(document: &Document, config: &SiteConfig) -> Result<Self, JsValue> {
        let body = document.body().ok_or("document has no body")?;
        let site = document
            .get_element_by_id("site")
            .ok_or("#site container not found")?
            .dyn_into::<HtmlElement>()?;

        let scroll = element(document, "div", "scroll-container")?;
        scroll
            .style()
            .set_property("height", &format!("{}vh", config.scroll_height_vh * 100.0))?;
        site.append_child(&scroll)?;

        let backdrop_root = element(document, "div", "backdrop")?;
        let mut layers = Vec::with_capacity(3);
        for (i, svg) in BACKDROP_SVG.iter().enumerate() {
            let layer = element(document, "div", &format!("backdrop-layer layer-{i}"))?;
            layer.set_inner_html(svg);
            backdrop_root.append_child(&layer)?;
            layers.push(layer);
        }
        let backdrop: [HtmlElement; 3] = layers
            .try_into()
            .map_err(|_| JsValue::from_str("backdrop layers"))?;
        site.append_child(&backdrop_root)?;

        // The canvas sits in `#stage` so focus mode can blur it as a whole.
        let stage = document
            .get_element_by_id("stage")
            .ok_or("#stage not found")?
            .dyn_into::<HtmlElement>()?;

        let ui_layer = element(document, "div", "ui-layer")?;
        site.append_child(&ui_layer)?;

        let title = Self::build_title(document)?;
        ui_layer.append_child(&title.root)?;

        let mut panels = Vec::with_capacity(SECTIONS.len());
        for section in SECTIONS.iter() {
            let panel = Self::build_panel(document, section)?;
            ui_layer.append_child(&panel.root)?;
            panels.push(panel);
        }

        let cta = element(document, "div", "cta")?;
        cta.append_child(&text(document, "h2", "cta-title", "Beta Access Open")?)?;
        let link = text(document, "a", "cta-link", "ENTER THE VOID →")?;
        link.set_attribute("href", sections::CONTACT_MAILTO)?;
        cta.append_child(&link)?;
        cta.append_child(&text(
            document,
            "p",
            "cta-credit",
            "Paul Phillips // Clear Seas Solutions",
        )?)?;
        ui_layer.append_child(&cta)?;

        let nav = element(document, "nav", "indicators")?;
        let mut indicators = Vec::with_capacity(SECTIONS.len());
        for section in SECTIONS.iter() {
            let item = element(document, "button", "indicator")?;
            item.append_child(&element(document, "span", "indicator-dot")?)?;
            item.append_child(&text(document, "span", "indicator-label", section.id.key())?)?;
            nav.append_child(&item)?;
            indicators.push(item);
        }
        ui_layer.append_child(&nav)?;

        let overlay = element(document, "div", "overlay")?;
        overlay.set_hidden(true);
        site.append_child(&overlay)?;

        log::debug!("built {} section panels", panels.len());
        Ok(Self {
            document: document.clone(),
            body,
            stage,
            backdrop,
            title,
            panels,
            indicators,
            cta,
            overlay,
            last: RefCell::new(None),
        })
    }

    fn build_title(document: &Document) -> Result<Title, JsValue> {
        let root = element(document, "div", "title")?;
        let row = element(document, "div", "title-row")?;
        row.append_child(&text(document, "div", "title-spark", "✨")?)?;
        let heading = element(document, "h1", "title-heading")?;
        let crystal = text(document, "span", "title-word crystal", "CRYSTAL")?;
        let grimoire = text(document, "span", "title-word grimoire", "GRIMOIRE")?;
        heading.append_child(&crystal)?;
        heading.append_child(&grimoire)?;
        row.append_child(&heading)?;
        root.append_child(&row)?;
        let subtitle = text(document, "div", "title-subtitle", "Clear Seas Solutions")?;
        root.append_child(&subtitle)?;
        Ok(Title {
            root,
            heading,
            crystal,
            grimoire,
            subtitle,
        })
    }

    fn build_panel(document: &Document, section: &Section) -> Result<Panel, JsValue> {
        let side = match section.alignment {
            Alignment::Left => "left",
            Alignment::Right => "right",
        };
        let accent = section.accent.to_css();

        let root = element(document, "section", &format!("panel panel-{side}"))?;
        root.set_attribute("data-section", section.id.key())?;
        root.style().set_property("--accent", &accent)?;

        let copy = element(document, "div", "panel-copy")?;
        copy.append_child(&text(document, "h3", "panel-title", section.title)?)?;
        let glass = element(document, "div", "glass")?;
        glass.append_child(&text(document, "p", "panel-short", section.short_desc)?)?;
        let button = text(document, "button", "panel-button", "Explore System")?;
        glass.append_child(&button)?;
        copy.append_child(&glass)?;
        root.append_child(&copy)?;

        let card = element(document, "div", "phone-card")?;
        card.append_child(&element(document, "div", "phone-notch")?)?;
        card.append_child(&image(document, "phone-screen", section.image, section.title)?)?;
        card.append_child(&element(document, "div", "scanlines")?)?;
        card.append_child(&text(document, "div", "phone-badge", "Click to Expand")?)?;
        root.append_child(&card)?;

        Ok(Panel {
            id: section.id,
            root,
            triggers: [button, card],
        })
    }

    /// Hooks clicks and the Escape key up to the site controller.
    pub fn attach(&self, window: &Window, site: Rc<RefCell<SiteState>>) -> Result<(), JsValue> {
        for panel in &self.panels {
            for trigger in &panel.triggers {
                let site = site.clone();
                let key = panel.id.key();
                let on_click = Closure::wrap(Box::new(move || {
                    site.borrow_mut().expand_key(key);
                }) as Box<dyn FnMut()>);
                trigger.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
                on_click.forget();
            }
        }

        let on_close = {
            let site = site.clone();
            Closure::wrap(Box::new(move |event: web_sys::Event| {
                let closes = event
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                    .map(|el| el.closest(".overlay-close").ok().flatten().is_some())
                    .unwrap_or(false);
                if closes {
                    site.borrow_mut().close();
                }
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        self.overlay
            .add_event_listener_with_callback("click", on_close.as_ref().unchecked_ref())?;
        on_close.forget();

        let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                site.borrow_mut().close();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        window.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
        on_key.forget();
        Ok(())
    }

    /// Brings the DOM in line with `view`. Cheap when nothing changed.
    pub fn update(&self, view: &SiteView) {
        let previous = self.last.borrow().clone();
        if previous.as_ref() == Some(view) {
            return;
        }
        if let Err(err) = self.apply(view, previous.as_ref()) {
            log::error!("failed to update page: {err:?}");
        }
        *self.last.borrow_mut() = Some(view.clone());
    }

    fn apply(&self, view: &SiteView, previous: Option<&SiteView>) -> Result<(), JsValue> {
        let header = &view.header;
        let position = header.position_css();
        let title = self.title.root.style();
        title.set_property("top", &position)?;
        title.set_property("left", &position)?;
        title.set_property("transform", &header.transform_css())?;
        self.title
            .heading
            .style()
            .set_property("letter-spacing", &header.letter_spacing_css())?;
        let blur = header.blur_css();
        for (word, glow) in [
            (&self.title.crystal, header.crystal_glow_css()),
            (&self.title.grimoire, header.grimoire_glow_css()),
        ] {
            word.style().set_property("filter", &blur)?;
            word.style().set_property("text-shadow", &glow)?;
        }
        self.title
            .subtitle
            .style()
            .set_property("opacity", &header.subtitle_opacity.to_string())?;

        for (layer, transform) in self.backdrop.iter().zip([
            view.backdrop.base,
            view.backdrop.lattice,
            view.backdrop.field,
        ]) {
            layer
                .style()
                .set_property("transform", &transform.transform_css())?;
            layer
                .style()
                .set_property("opacity", &transform.opacity.to_string())?;
        }

        for panel in &self.panels {
            let visible = view.visible_section == Some(panel.id);
            panel.root.class_list().toggle_with_force("visible", visible)?;
        }
        for (indicator, lit) in self.indicators.iter().zip(view.indicators) {
            indicator.class_list().toggle_with_force("active", lit)?;
        }
        self.cta.class_list().toggle_with_force("visible", view.cta_visible)?;

        self.stage
            .class_list()
            .toggle_with_force("focus", view.expanded.is_some())?;
        self.body.style().set_property(
            "overflow",
            if view.scroll_locked { "hidden" } else { "auto" },
        )?;

        let previous_overlay = previous.and_then(|p| p.expanded);
        if previous.is_none() || previous_overlay != view.expanded {
            self.render_overlay(view.expanded)?;
        }
        Ok(())
    }

    fn render_overlay(&self, expanded: Option<SectionId>) -> Result<(), JsValue> {
        self.overlay.set_inner_html("");
        let Some(id) = expanded else {
            self.overlay.set_hidden(true);
            return Ok(());
        };
        let section = id.section();
        let document = &self.document;
        self.overlay
            .style()
            .set_property("--accent", &section.accent.to_css())?;

        self.overlay
            .append_child(&text(document, "button", "overlay-close", "✕")?)?;

        let columns = element(document, "div", "overlay-columns")?;
        let main = element(document, "div", "overlay-main")?;
        main.append_child(&text(document, "h2", "overlay-title", section.title)?)?;
        main.append_child(&text(document, "p", "overlay-desc", section.full_desc)?)?;
        let hero = element(document, "div", "overlay-hero")?;
        hero.append_child(&image(document, "", section.image, section.title)?)?;
        hero.append_child(&text(document, "div", "overlay-state", "SYSTEM_STATE: ACTIVE")?)?;
        main.append_child(&hero)?;
        columns.append_child(&main)?;

        let grid = element(document, "div", "overlay-grid")?;
        for (i, src) in section.details.iter().enumerate() {
            let class = if i == 0 { "detail detail-wide" } else { "detail" };
            let figure = element(document, "figure", class)?;
            figure.append_child(&image(document, "", src, section.title)?)?;
            figure.append_child(&text(
                document,
                "figcaption",
                "detail-caption",
                &format!("Fig 0.{}", i + 1),
            )?)?;
            grid.append_child(&figure)?;
        }
        grid.append_child(&text(
            document,
            "div",
            "detail-placeholder",
            "Waiting for user input...",
        )?)?;
        columns.append_child(&grid)?;
        self.overlay.append_child(&columns)?;

        self.overlay.set_hidden(false);
        Ok(())
    }
}
