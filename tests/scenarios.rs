//! End-to-end walks through the site controller: scroll, open, close.

use grimoire_wasm::app::SiteState;
use grimoire_wasm::header::HeaderTransform;
use grimoire_wasm::mapper::{CameraTarget, Shape, Stage, FOCUS_DISTORTION};
use grimoire_wasm::palette;
use grimoire_wasm::progress::{Progress, ScrollGeometry, ScrollTracker};
use grimoire_wasm::sections::SectionId;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn journal_section_at_thirty_percent() {
    let mut site = SiteState::new();
    site.set_progress(Progress::new(0.30));

    let target = site.visual_target(1.5);
    assert_eq!(target.stage, Stage::Section(SectionId::Journal));
    assert_eq!(target.shape, Shape::Slab);
    assert_eq!(target.color_a, palette::DEEP_INDIGO);
    assert_eq!(target.color_b, palette::INDIGO);
    assert!(close(target.distortion, 0.1));
    assert!(close(target.rotation_speed, 0.35));
    assert_eq!(target.camera, CameraTarget::DEFAULT);

    let view = site.view();
    assert_eq!(view.visible_section, Some(SectionId::Journal));
    assert_eq!(view.indicators, [false, true, false, false, false, false]);
}

#[test]
fn opening_journal_overlay_enters_focus_mode() {
    let mut site = SiteState::new();
    site.set_progress(Progress::new(0.30));
    assert_eq!(site.expand_key("JOURNAL"), Some(SectionId::Journal));

    let target = site.visual_target(1.5);
    assert_eq!(target.shape, Shape::Slab);
    assert_eq!(target.distortion, FOCUS_DISTORTION);
    assert_eq!(target.camera, CameraTarget::FOCUS);
    assert!(target.focus);
    assert!(site.view().scroll_locked);
}

#[test]
fn scrolling_under_an_overlay_changes_nothing() {
    let geometry = ScrollGeometry::new(10_800.0, 900.0);
    let mut tracker = ScrollTracker::new(0.0);
    let mut site = SiteState::new();

    tracker.observe(geometry.scrollable() * 0.2, &geometry);
    site.set_progress(tracker.tick(1.0 / 60.0));
    site.set_expanded_section(Some(SectionId::Id));
    let frozen = site.view();

    tracker.observe(geometry.scrollable() * 0.95, &geometry);
    assert!(!site.set_progress(tracker.tick(1.0 / 60.0)));
    assert_eq!(site.view(), frozen);
    assert_eq!(site.visual_target(0.0).shape, Shape::Octahedron);

    site.close();
    site.set_progress(tracker.tick(1.0 / 60.0));
    assert_eq!(site.visual_target(0.0).stage, Stage::Outro);
    assert!(site.view().cta_visible);
}

#[test]
fn full_scroll_visits_every_stage_in_order() {
    let mut site = SiteState::new();
    let mut stages = Vec::new();
    for step in 0..=200 {
        site.set_progress(Progress::new(step as f32 / 200.0));
        let stage = site.visual_target(0.0).stage;
        if stages.last() != Some(&stage) {
            stages.push(stage);
        }
    }
    let mut expected = vec![Stage::Intro];
    expected.extend(SectionId::ALL.into_iter().map(Stage::Section));
    expected.push(Stage::Outro);
    assert_eq!(stages, expected);
}

#[test]
fn title_settles_during_the_intro() {
    assert_eq!(HeaderTransform::at(Progress::START).scale, 4.0);
    let mut site = SiteState::new();
    site.set_progress(Progress::new(0.12));
    assert!(close(site.view().header.scale, 1.0));
    assert!(close(site.view().header.letter_spacing_em, 0.2));
}

#[test]
fn page_restored_mid_scroll_shows_the_moon_before_any_scroll_event() {
    let geometry = ScrollGeometry::new(12_000.0, 1_000.0);
    let mut tracker = ScrollTracker::new(0.5);
    let mut site = SiteState::new();

    tracker.sync(6_000.0, &geometry);
    site.set_progress(tracker.tick(1.0 / 60.0));
    assert_eq!(site.visual_target(0.0).stage, Stage::Section(SectionId::Moon));
    assert_eq!(site.view().visible_section, Some(SectionId::Moon));
}
