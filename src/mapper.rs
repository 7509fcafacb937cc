//! Progress → crystal appearance.
//!
//! The narrative is split into eight buckets: an intro, one per section and an
//! outro. Each bucket fixes the crystal's shape, its two-tone palette and how
//! strongly the vertex shader displaces the surface. An open overlay switches
//! the scene into focus mode: almost no distortion, slow spin and a camera
//! pulled to the side so the overlay text has room.

use glam::Vec3;

use crate::palette::{self, Rgb};
use crate::progress::Progress;
use crate::sections::SectionId;

/// Surface distortion while an overlay is open.
pub const FOCUS_DISTORTION: f32 = 0.02;
/// Spin rate (rad/s) while an overlay is open.
pub const FOCUS_ROTATION_SPEED: f32 = 0.05;

pub const BASE_ROTATION_SPEED: f32 = 0.2;
pub const ROTATION_SPEED_PER_PROGRESS: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Intro,
    Section(SectionId),
    Outro,
}

/// Which mesh the crystal shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Icosahedron with moderate subdivision; intro and outro.
    Icosahedron,
    Octahedron,
    /// Flat slab, the journal "book".
    Slab,
    Sphere,
    /// Icosahedron subdivided until it reads as a smooth moon.
    Moon,
    TorusKnot,
    HexPillar,
}

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::Icosahedron,
        Shape::Octahedron,
        Shape::Slab,
        Shape::Sphere,
        Shape::Moon,
        Shape::TorusKnot,
        Shape::HexPillar,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Distortion {
    Fixed(f32),
    /// `2 * (1 - 8p)`: the intro calms down as the page starts to scroll.
    IntroDecay,
    /// `1 + 0.1 sin(8t)`: a fast shimmer for the healing section.
    Vibrate,
}

impl Distortion {
    fn eval(self, progress: f32, elapsed: f32) -> f32 {
        match self {
            Distortion::Fixed(value) => value,
            Distortion::IntroDecay => 2.0 * (1.0 - progress * 8.0),
            Distortion::Vibrate => 1.0 + (elapsed * 8.0).sin() * 0.1,
        }
    }
}

/// One row of the progress → appearance table.
#[derive(Clone, Copy, Debug)]
pub struct Bucket {
    pub stage: Stage,
    /// Inclusive lower bound.
    pub start: f32,
    /// Exclusive upper bound, except for the last bucket which includes 1.0.
    pub end: f32,
    pub shape: Shape,
    pub color_a: Rgb,
    pub color_b: Rgb,
    distortion: Distortion,
}

impl Bucket {
    pub fn contains(&self, progress: Progress) -> bool {
        let p = progress.get();
        let last = self.end >= 1.0;
        p >= self.start && (p < self.end || (last && p <= self.end))
    }
}

pub static BUCKETS: [Bucket; 8] = [
    Bucket {
        stage: Stage::Intro,
        start: 0.0,
        end: 0.12,
        shape: Shape::Icosahedron,
        color_a: palette::MYSTIC,
        color_b: palette::CRYSTAL,
        distortion: Distortion::IntroDecay,
    },
    Bucket {
        stage: Stage::Section(SectionId::Id),
        start: 0.12,
        end: 0.24,
        shape: Shape::Octahedron,
        color_a: palette::VOID,
        color_b: palette::CRYSTAL,
        distortion: Distortion::Fixed(0.8),
    },
    Bucket {
        stage: Stage::Section(SectionId::Journal),
        start: 0.24,
        end: 0.37,
        shape: Shape::Slab,
        color_a: palette::DEEP_INDIGO,
        color_b: palette::INDIGO,
        distortion: Distortion::Fixed(0.1),
    },
    Bucket {
        stage: Stage::Section(SectionId::Guru),
        start: 0.37,
        end: 0.50,
        shape: Shape::Sphere,
        color_a: palette::DEEP_VIOLET,
        color_b: palette::LIGHT_VIOLET,
        distortion: Distortion::Fixed(0.3),
    },
    Bucket {
        stage: Stage::Section(SectionId::Moon),
        start: 0.50,
        end: 0.63,
        shape: Shape::Moon,
        color_a: palette::SLATE,
        color_b: palette::OFF_WHITE,
        distortion: Distortion::Fixed(0.05),
    },
    Bucket {
        stage: Stage::Section(SectionId::Healing),
        start: 0.63,
        end: 0.76,
        shape: Shape::TorusKnot,
        color_a: palette::DARK_AMBER,
        color_b: palette::GOLD,
        distortion: Distortion::Vibrate,
    },
    Bucket {
        stage: Stage::Section(SectionId::Market),
        start: 0.76,
        end: 0.89,
        shape: Shape::HexPillar,
        color_a: palette::DEEP_EMERALD,
        color_b: palette::EMERALD,
        distortion: Distortion::Fixed(0.4),
    },
    Bucket {
        stage: Stage::Outro,
        start: 0.89,
        end: 1.0,
        shape: Shape::Icosahedron,
        color_a: palette::BLACK,
        color_b: palette::WHITE,
        distortion: Distortion::Fixed(2.0),
    },
];

/// First bucket whose range holds `progress`.
pub fn bucket_for(progress: Progress) -> &'static Bucket {
    let p = progress.get();
    BUCKETS
        .iter()
        .find(|bucket| p < bucket.end)
        .unwrap_or(&BUCKETS[BUCKETS.len() - 1])
}

/// Where the camera sits and what it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTarget {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraTarget {
    pub const DEFAULT: CameraTarget = CameraTarget {
        position: Vec3::new(0.0, 0.0, 6.0),
        look_at: Vec3::ZERO,
    };
    /// Pans right and back so the crystal clears the overlay's text column.
    pub const FOCUS: CameraTarget = CameraTarget {
        position: Vec3::new(4.0, 0.0, 9.0),
        look_at: Vec3::new(2.0, 0.0, 0.0),
    };
}

/// Everything the renderer relaxes toward this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualTarget {
    pub stage: Stage,
    pub shape: Shape,
    pub color_a: Rgb,
    pub color_b: Rgb,
    /// Raw distortion; may dip below zero, consumers clamp.
    pub distortion: f32,
    pub rotation_speed: f32,
    pub camera: CameraTarget,
    pub focus: bool,
}

pub fn map_progress_to_visual(
    progress: Progress,
    expanded: Option<SectionId>,
    elapsed: f32,
) -> VisualTarget {
    let bucket = bucket_for(progress);
    let focus = expanded.is_some();
    let p = progress.get();

    let (distortion, rotation_speed, camera) = if focus {
        (FOCUS_DISTORTION, FOCUS_ROTATION_SPEED, CameraTarget::FOCUS)
    } else {
        (
            bucket.distortion.eval(p, elapsed),
            BASE_ROTATION_SPEED + p * ROTATION_SPEED_PER_PROGRESS,
            CameraTarget::DEFAULT,
        )
    };

    VisualTarget {
        stage: bucket.stage,
        shape: bucket.shape,
        color_a: bucket.color_a,
        color_b: bucket.color_b,
        distortion,
        rotation_speed,
        camera,
        focus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn buckets_are_contiguous_from_zero_to_one() {
        assert_eq!(BUCKETS[0].start, 0.0);
        assert_eq!(BUCKETS[BUCKETS.len() - 1].end, 1.0);
        for pair in BUCKETS.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
            assert!(pair[0].start < pair[0].end);
        }
    }

    #[test]
    fn every_progress_selects_exactly_one_bucket() {
        for step in 0..=10_000 {
            let p = Progress::new(step as f32 / 10_000.0);
            let matching: Vec<_> = BUCKETS.iter().filter(|b| b.contains(p)).collect();
            assert_eq!(matching.len(), 1, "p={}", p.get());
            assert_eq!(matching[0].stage, bucket_for(p).stage, "p={}", p.get());
        }
    }

    #[test]
    fn boundaries_belong_to_the_upper_bucket() {
        assert_eq!(bucket_for(Progress::new(0.12)).stage, Stage::Section(SectionId::Id));
        assert_eq!(bucket_for(Progress::new(0.24)).stage, Stage::Section(SectionId::Journal));
        assert_eq!(bucket_for(Progress::new(0.89)).stage, Stage::Outro);
        assert_eq!(bucket_for(Progress::END).stage, Stage::Outro);
        assert_eq!(bucket_for(Progress::START).stage, Stage::Intro);
    }

    #[test]
    fn intro_distortion_decays_with_scroll() {
        let at_start = map_progress_to_visual(Progress::START, None, 0.0);
        assert!(close(at_start.distortion, 2.0));
        let later = map_progress_to_visual(Progress::new(0.1), None, 0.0);
        assert!(close(later.distortion, 0.4));
    }

    #[test]
    fn healing_distortion_oscillates_with_time() {
        let p = Progress::new(0.7);
        let calm = map_progress_to_visual(p, None, 0.0);
        assert!(close(calm.distortion, 1.0));
        let t = std::f32::consts::FRAC_PI_2 / 8.0;
        let peak = map_progress_to_visual(p, None, t);
        assert!(close(peak.distortion, 1.1));
        assert_eq!(peak.shape, Shape::TorusKnot);
    }

    #[test]
    fn journal_bucket_without_overlay() {
        let target = map_progress_to_visual(Progress::new(0.30), None, 3.0);
        assert_eq!(target.shape, Shape::Slab);
        assert_eq!(target.color_a, palette::DEEP_INDIGO);
        assert_eq!(target.color_b, palette::INDIGO);
        assert!(close(target.distortion, 0.1));
        assert!(close(target.rotation_speed, 0.35));
        assert_eq!(target.camera, CameraTarget::DEFAULT);
        assert!(!target.focus);
    }

    #[test]
    fn overlay_forces_focus_everywhere() {
        for bucket in BUCKETS.iter() {
            let p = Progress::new((bucket.start + bucket.end) / 2.0);
            for t in [0.0, 0.3, 12.5] {
                let target = map_progress_to_visual(p, Some(SectionId::Guru), t);
                assert_eq!(target.distortion, FOCUS_DISTORTION);
                assert_eq!(target.rotation_speed, FOCUS_ROTATION_SPEED);
                assert_eq!(target.camera, CameraTarget::FOCUS);
                assert_eq!(target.shape, bucket.shape);
                assert_eq!(target.color_a, bucket.color_a);
            }
        }
    }

    #[test]
    fn mapping_is_pure() {
        for step in 0..=100 {
            let p = Progress::new(step as f32 / 100.0);
            for expanded in [None, Some(SectionId::Moon)] {
                let a = map_progress_to_visual(p, expanded, 4.2);
                let b = map_progress_to_visual(p, expanded, 4.2);
                assert_eq!(a, b);
            }
        }
    }
}
