//! The six feature sections, their copy and the scroll windows that show them.

use crate::palette::{self, Rgb};
use crate::progress::Progress;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    Id,
    Journal,
    Guru,
    Moon,
    Healing,
    Market,
}

impl SectionId {
    /// Scroll order.
    pub const ALL: [SectionId; 6] = [
        SectionId::Id,
        SectionId::Journal,
        SectionId::Guru,
        SectionId::Moon,
        SectionId::Healing,
        SectionId::Market,
    ];

    /// Stable key used in DOM data attributes and the indicator labels.
    pub fn key(self) -> &'static str {
        match self {
            SectionId::Id => "ID",
            SectionId::Journal => "JOURNAL",
            SectionId::Guru => "GURU",
            SectionId::Moon => "MOON",
            SectionId::Healing => "HEALING",
            SectionId::Market => "MARKET",
        }
    }

    /// Unknown keys resolve to `None` so callers render nothing.
    pub fn from_key(key: &str) -> Option<Self> {
        SectionId::ALL.into_iter().find(|id| id.key() == key)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn section(self) -> &'static Section {
        &SECTIONS[self.index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Open interval `(start, end)` of progress during which a section is shown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub start: f32,
    pub end: f32,
}

impl Window {
    pub fn contains(&self, progress: Progress) -> bool {
        let p = progress.get();
        p > self.start && p < self.end
    }
}

/// Static description of one section.
#[derive(Debug)]
pub struct Section {
    pub id: SectionId,
    pub title: &'static str,
    pub short_desc: &'static str,
    pub full_desc: &'static str,
    /// Accent used for text, borders and the overlay glow.
    pub accent: Rgb,
    pub image: &'static str,
    pub details: [&'static str; 3],
    pub alignment: Alignment,
    pub window: Window,
    /// Progress at which the side indicator for this section is centred.
    pub indicator_target: f32,
}

impl Section {
    pub fn is_visible(&self, progress: Progress) -> bool {
        self.window.contains(progress)
    }

    pub fn indicator_lit(&self, progress: Progress) -> bool {
        (progress.get() - self.indicator_target).abs() < INDICATOR_RADIUS
    }
}

/// Half-width of the band around an indicator target that lights its dot.
pub const INDICATOR_RADIUS: f32 = 0.06;

/// Progress above which the closing call to action is shown.
pub const CTA_THRESHOLD: f32 = 0.90;

pub const CONTACT_MAILTO: &str =
    "mailto:phillips.paul.email@gmail.com?subject=I seek the Crystal Grimoire Beta";

pub static SECTIONS: [Section; 6] = [
    Section {
        id: SectionId::Id,
        title: "Identify the Unknown",
        short_desc: "Geometric crystal recognition neural engine.",
        full_desc: "Point your lens at any stone. Our neural engine recognizes the geometric \
                    signature of earth's treasures instantly. From Labradorite to Quartz, get \
                    instant identification, metaphysical properties, and care guides.",
        accent: palette::CRYSTAL,
        image: "https://placehold.co/400x800/0a0a0a/a5f3fc.png?text=Crystal+ID+Scanner",
        details: [
            "https://placehold.co/600x400/111/a5f3fc.png?text=Spectral+Analysis",
            "https://placehold.co/600x400/111/a5f3fc.png?text=Library+Match",
            "https://placehold.co/600x400/111/a5f3fc.png?text=Confidence+99%25",
        ],
        alignment: Alignment::Left,
        window: Window { start: 0.12, end: 0.23 },
        indicator_target: 0.18,
    },
    Section {
        id: SectionId::Journal,
        title: "Grimoire Journal",
        short_desc: "Catalog your collection and spiritual journey.",
        full_desc: "Your personal digital grimoire. Track your crystal collection, log daily \
                    intentions, and record the stones that call to you. Filter by chakra, \
                    color, or energetic property.",
        accent: palette::INDIGO,
        image: "https://placehold.co/400x800/0a0a0a/818cf8.png?text=Journal+Entry",
        details: [
            "https://placehold.co/600x400/111/818cf8.png?text=Collection+Grid",
            "https://placehold.co/600x400/111/818cf8.png?text=Daily+Log",
            "https://placehold.co/600x400/111/818cf8.png?text=Insights",
        ],
        alignment: Alignment::Right,
        window: Window { start: 0.25, end: 0.36 },
        indicator_target: 0.30,
    },
    Section {
        id: SectionId::Guru,
        title: "Cosmic Guru",
        short_desc: "AI-powered ancient wisdom synthesis.",
        full_desc: "Ask the Universe anything. The AI Guru connects ancient wisdom with modern \
                    intent, providing guidance on release, growth, and the mystic arts. A \
                    companion for your spiritual path.",
        accent: palette::LIGHT_VIOLET,
        image: "https://placehold.co/400x800/1a0b2e/d8b4fe.png?text=AI+Guru+Chat",
        details: [
            "https://placehold.co/600x400/111/d8b4fe.png?text=Tarot+Interpretation",
            "https://placehold.co/600x400/111/d8b4fe.png?text=Meditation+Gen",
            "https://placehold.co/600x400/111/d8b4fe.png?text=Chat+History",
        ],
        alignment: Alignment::Left,
        window: Window { start: 0.38, end: 0.49 },
        indicator_target: 0.43,
    },
    Section {
        id: SectionId::Moon,
        title: "Moon Rituals",
        short_desc: "Align with the lunar cycle.",
        full_desc: "Sync your practice with the cosmos. Get notifications for Full Moons, New \
                    Moons, and Eclipses. Access curated rituals for releasing, manifesting, \
                    and charging your crystals.",
        accent: Rgb::hex(0xe5e7eb),
        image: "https://placehold.co/400x800/000/fff.png?text=Moon+Phase",
        details: [
            "https://placehold.co/600x400/111/fff.png?text=Phase+Calendar",
            "https://placehold.co/600x400/111/fff.png?text=Ritual+Guide",
            "https://placehold.co/600x400/111/fff.png?text=Notifications",
        ],
        alignment: Alignment::Right,
        window: Window { start: 0.51, end: 0.62 },
        indicator_target: 0.56,
    },
    Section {
        id: SectionId::Healing,
        title: "Vibrational Healing",
        short_desc: "Sound baths and chakra alignment.",
        full_desc: "Immerse yourself in digital Sound Baths. Select frequencies tailored to \
                    specific chakras or emotional states. Let the vibrations restore your \
                    energetic balance.",
        accent: Rgb::hex(0xffd700),
        image: "https://placehold.co/400x800/1e1e1e/ffd700.png?text=Sound+Bath",
        details: [
            "https://placehold.co/600x400/111/ffd700.png?text=Frequency+Player",
            "https://placehold.co/600x400/111/ffd700.png?text=Chakra+Chart",
            "https://placehold.co/600x400/111/ffd700.png?text=Timer",
        ],
        alignment: Alignment::Left,
        window: Window { start: 0.64, end: 0.75 },
        indicator_target: 0.69,
    },
    Section {
        id: SectionId::Market,
        title: "Ethical Marketplace",
        short_desc: "Sourced with intention.",
        full_desc: "Browse a curated selection of ethically sourced crystals. Verify the origin \
                    and energetic path of every stone before you bring it into your sacred \
                    space.",
        accent: palette::EMERALD,
        image: "https://placehold.co/400x800/001/34d399.png?text=Market+Listing",
        details: [
            "https://placehold.co/600x400/111/34d399.png?text=Origin+Map",
            "https://placehold.co/600x400/111/34d399.png?text=Miner+Info",
            "https://placehold.co/600x400/111/34d399.png?text=Certificates",
        ],
        alignment: Alignment::Right,
        window: Window { start: 0.77, end: 0.88 },
        indicator_target: 0.82,
    },
];

/// First section whose window contains `progress`, if any.
pub fn visible_section(progress: Progress) -> Option<SectionId> {
    SECTIONS
        .iter()
        .find(|section| section.is_visible(progress))
        .map(|section| section.id)
}

/// Lit state of the six side indicator dots, in scroll order.
pub fn indicators(progress: Progress) -> [bool; 6] {
    let mut lit = [false; 6];
    for (slot, section) in lit.iter_mut().zip(SECTIONS.iter()) {
        *slot = section.indicator_lit(progress);
    }
    lit
}

pub fn cta_visible(progress: Progress) -> bool {
    progress.get() > CTA_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_id() {
        for id in SectionId::ALL {
            assert_eq!(id.section().id, id);
        }
    }

    #[test]
    fn keys_round_trip_and_unknown_is_none() {
        for id in SectionId::ALL {
            assert_eq!(SectionId::from_key(id.key()), Some(id));
        }
        assert_eq!(SectionId::from_key("ORACLE"), None);
        assert_eq!(SectionId::from_key("journal"), None);
        assert_eq!(SectionId::from_key(""), None);
    }

    #[test]
    fn id_section_owns_point_two() {
        let p = Progress::new(0.20);
        assert!(SectionId::Id.section().is_visible(p));
        assert!(!SectionId::Journal.section().is_visible(p));
        assert_eq!(visible_section(p), Some(SectionId::Id));
    }

    #[test]
    fn windows_are_open_intervals() {
        assert_eq!(visible_section(Progress::new(0.12)), None);
        assert_eq!(visible_section(Progress::new(0.23)), None);
        // Transition gap between ID and JOURNAL.
        assert_eq!(visible_section(Progress::new(0.24)), None);
        assert_eq!(visible_section(Progress::new(0.0)), None);
        assert_eq!(visible_section(Progress::new(0.95)), None);
    }

    #[test]
    fn at_most_one_section_visible() {
        for step in 0..=1000 {
            let p = Progress::new(step as f32 / 1000.0);
            let count = SECTIONS.iter().filter(|s| s.is_visible(p)).count();
            assert!(count <= 1, "p={} count={count}", p.get());
        }
    }

    #[test]
    fn alignment_alternates() {
        for (i, section) in SECTIONS.iter().enumerate() {
            let expected = if i % 2 == 0 { Alignment::Left } else { Alignment::Right };
            assert_eq!(section.alignment, expected);
        }
    }

    #[test]
    fn indicator_dots_follow_targets() {
        assert_eq!(indicators(Progress::new(0.18)), [true, false, false, false, false, false]);
        assert_eq!(indicators(Progress::new(0.82)), [false, false, false, false, false, true]);
        assert_eq!(indicators(Progress::new(0.35)), [false, true, false, false, false, false]);
        // Between two targets and more than 0.06 from both.
        assert_eq!(indicators(Progress::new(0.365)), [false; 6]);
        assert_eq!(indicators(Progress::new(0.0)), [false; 6]);
    }

    #[test]
    fn cta_appears_past_ninety_percent() {
        assert!(!cta_visible(Progress::new(0.90)));
        assert!(cta_visible(Progress::new(0.91)));
    }
}
