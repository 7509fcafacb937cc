//! Scroll position → normalized progress.
//!
//! The page is a tall scroll region (by default twelve viewports high) with a
//! fixed viewport on top of it. Progress runs from 0 when the region's top
//! meets the viewport top to 1 when its bottom meets the viewport bottom.

/// Normalized scroll progress, always in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Progress(f32);

impl Progress {
    pub const START: Progress = Progress(0.0);
    pub const END: Progress = Progress(1.0);

    /// Clamps `value` into `[0, 1]`. `NaN` maps to 0.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::START;
        }
        Progress(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl From<f32> for Progress {
    fn from(value: f32) -> Self {
        Progress::new(value)
    }
}

/// Pixel dimensions of the scroll region and the viewport looking into it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollGeometry {
    pub document_height: f64,
    pub viewport_height: f64,
}

impl ScrollGeometry {
    /// Geometry from the measured document and viewport heights, in pixels.
    pub fn new(document_height: f64, viewport_height: f64) -> Self {
        Self {
            document_height,
            viewport_height,
        }
    }

    /// Distance the page can actually scroll.
    pub fn scrollable(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    pub fn progress_at(&self, scroll_y: f64) -> Progress {
        let range = self.scrollable();
        if range <= f64::EPSILON {
            return Progress::START;
        }
        Progress::new((scroll_y / range) as f32)
    }
}

/// Follows scroll events and produces the progress fed to the site controller.
///
/// The published value trails the raw scroll position by roughly
/// `scrub_seconds`, which keeps the scene from jittering with wheel steps.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    raw: Progress,
    scrubbed: Progress,
    scrub_seconds: f32,
}

impl ScrollTracker {
    pub fn new(scrub_seconds: f32) -> Self {
        Self {
            raw: Progress::START,
            scrubbed: Progress::START,
            scrub_seconds: scrub_seconds.max(0.0),
        }
    }

    pub fn observe(&mut self, scroll_y: f64, geometry: &ScrollGeometry) {
        self.raw = geometry.progress_at(scroll_y);
    }

    /// Like [`observe`](Self::observe) but skips the scrub, for a page that
    /// opens already scrolled.
    pub fn sync(&mut self, scroll_y: f64, geometry: &ScrollGeometry) {
        self.observe(scroll_y, geometry);
        self.scrubbed = self.raw;
    }

    /// Advances the scrub by `dt` seconds and returns the published progress.
    pub fn tick(&mut self, dt: f32) -> Progress {
        if self.scrub_seconds <= 0.0 {
            self.scrubbed = self.raw;
            return self.scrubbed;
        }
        // Within ~3 time constants the gap is under 5%.
        let tau = self.scrub_seconds / 3.0;
        let factor = 1.0 - (-dt.max(0.0) / tau).exp();
        let next = self.scrubbed.get() + (self.raw.get() - self.scrubbed.get()) * factor;
        self.scrubbed = Progress::new(next);
        self.scrubbed
    }

    pub fn raw(&self) -> Progress {
        self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamps_and_rejects_nan() {
        assert_eq!(Progress::new(-0.5).get(), 0.0);
        assert_eq!(Progress::new(1.5).get(), 1.0);
        assert_eq!(Progress::new(f32::NAN).get(), 0.0);
        assert_eq!(Progress::new(0.42).get(), 0.42);
    }

    #[test]
    fn geometry_maps_scroll_range_onto_unit_interval() {
        let geometry = ScrollGeometry::new(12_000.0, 1000.0);
        assert_eq!(geometry.scrollable(), 11_000.0);
        assert_eq!(geometry.progress_at(0.0).get(), 0.0);
        assert_eq!(geometry.progress_at(5_500.0).get(), 0.5);
        assert_eq!(geometry.progress_at(11_000.0).get(), 1.0);
        assert_eq!(geometry.progress_at(20_000.0).get(), 1.0);
        assert_eq!(geometry.progress_at(-40.0).get(), 0.0);
    }

    #[test]
    fn degenerate_geometry_stays_at_start() {
        let geometry = ScrollGeometry {
            document_height: 800.0,
            viewport_height: 900.0,
        };
        assert_eq!(geometry.progress_at(100.0), Progress::START);
    }

    #[test]
    fn tracker_without_scrub_publishes_immediately() {
        let geometry = ScrollGeometry::new(1_100.0, 100.0);
        let mut tracker = ScrollTracker::new(0.0);
        tracker.observe(300.0, &geometry);
        assert_eq!(tracker.tick(0.016).get(), 0.3);
    }

    #[test]
    fn scrubbed_progress_trails_then_catches_up() {
        let geometry = ScrollGeometry::new(1_100.0, 100.0);
        let mut tracker = ScrollTracker::new(0.5);
        tracker.observe(1_000.0, &geometry);
        assert_eq!(tracker.raw().get(), 1.0);

        let first = tracker.tick(1.0 / 60.0).get();
        assert!(first > 0.0 && first < 0.2, "first={first}");

        let mut last = first;
        for _ in 0..120 {
            let next = tracker.tick(1.0 / 60.0).get();
            assert!(next >= last);
            last = next;
        }
        assert!((1.0 - last).abs() < 1e-3, "last={last}");
    }

    #[test]
    fn page_opened_mid_scroll_starts_at_its_offset() {
        let geometry = ScrollGeometry::new(12_000.0, 1000.0);
        let mut tracker = ScrollTracker::new(0.5);
        tracker.sync(5_500.0, &geometry);
        assert_eq!(tracker.tick(1.0 / 60.0).get(), 0.5);
    }

    #[test]
    fn resize_rescales_the_same_offset() {
        let mut tracker = ScrollTracker::new(0.0);
        tracker.observe(5_500.0, &ScrollGeometry::new(12_000.0, 1000.0));
        assert_eq!(tracker.raw().get(), 0.5);

        // Document height is measured, so a taller viewport means less room to scroll.
        tracker.observe(5_500.0, &ScrollGeometry::new(12_000.0, 1_000.0 + 1_000.0));
        assert_eq!(tracker.raw().get(), 0.55);
    }
}
