use serde::Deserialize;
use std::collections::HashMap;

use crate::error::Result;
use crate::log::{LogLevel, DEFAULT_LOG_LEVEL};
use crate::projects::default_project_routes;
use crate::typing::TypingTiming;

const DEFAULT_NAVBAR_THRESHOLD_PX: f64 = 100.0;
const DEFAULT_SECTION_OFFSET_PX: f64 = 100.0;
const DEFAULT_SMOOTH_SCROLL_OFFSET_PX: f64 = 80.0;
const DEFAULT_TYPING_TARGET: &str = "#typingText";
const DEFAULT_TYPE_SPEED_MS: u32 = 100;
const DEFAULT_DELETE_SPEED_MS: u32 = 50;
const DEFAULT_DELAY_BETWEEN_MS: u32 = 2_000;
const DEFAULT_CANVAS_ID: &str = "particleCanvas";
const DEFAULT_PARTICLE_COUNT: usize = 50;

const OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const TICK_MS_BOUNDS: (u32, u32) = (10, 10_000);
const DELAY_BETWEEN_MS_BOUNDS: (u32, u32) = (0, 60_000);
const PARTICLE_COUNT_BOUNDS: (usize, usize) = (0, 500);

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub log_level: LogLevel,
    pub navbar_threshold_px: f64,
    pub section_offset_px: f64,
    pub smooth_scroll_offset_px: f64,
    pub typing: TypingConfig,
    pub particles: ParticleConfig,
    pub projects: Vec<String>,
    pub education_media: HashMap<String, EducationMedia>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub target: String,
    pub texts: Vec<String>,
    pub type_speed_ms: u32,
    pub delete_speed_ms: u32,
    pub delay_between_ms: u32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub canvas_id: String,
    pub count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EducationMedia {
    pub logo: Option<MediaAsset>,
    pub photos: Vec<MediaAsset>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MediaAsset {
    pub src: String,
    pub alt: String,
}

impl MediaAsset {
    fn new(src: &str, alt: &str) -> Self {
        Self {
            src: src.to_string(),
            alt: alt.to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            navbar_threshold_px: DEFAULT_NAVBAR_THRESHOLD_PX,
            section_offset_px: DEFAULT_SECTION_OFFSET_PX,
            smooth_scroll_offset_px: DEFAULT_SMOOTH_SCROLL_OFFSET_PX,
            typing: TypingConfig::default(),
            particles: ParticleConfig::default(),
            projects: default_project_routes(),
            education_media: default_education_media(),
        }
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TYPING_TARGET.to_string(),
            texts: Vec::new(),
            type_speed_ms: DEFAULT_TYPE_SPEED_MS,
            delete_speed_ms: DEFAULT_DELETE_SPEED_MS,
            delay_between_ms: DEFAULT_DELAY_BETWEEN_MS,
        }
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            count: DEFAULT_PARTICLE_COUNT,
        }
    }
}

fn default_education_media() -> HashMap<String, EducationMedia> {
    let mut media = HashMap::new();
    media.insert(
        "uf".to_string(),
        EducationMedia {
            logo: Some(MediaAsset::new("photos/uf-university-of-florida.webp", "UF Logo")),
            photos: Vec::new(),
        },
    );
    media.insert(
        "nsysu".to_string(),
        EducationMedia {
            logo: Some(MediaAsset::new("photos/NSYSU-Logo.png", "NSYSU Logo")),
            photos: vec![MediaAsset::new("photos/畢業典禮.jpg", "Graduation Photo")],
        },
    );
    media
}

impl SiteConfig {
    /// Parses the page's JSON config block. Missing fields take their
    /// defaults; out-of-bounds numbers are reset to the default.
    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: Self = serde_json::from_str(raw)?;
        Ok(parsed.bounded())
    }

    fn bounded(mut self) -> Self {
        self.navbar_threshold_px =
            f64_within(self.navbar_threshold_px, DEFAULT_NAVBAR_THRESHOLD_PX, OFFSET_PX_BOUNDS);
        self.section_offset_px =
            f64_within(self.section_offset_px, DEFAULT_SECTION_OFFSET_PX, OFFSET_PX_BOUNDS);
        self.smooth_scroll_offset_px = f64_within(
            self.smooth_scroll_offset_px,
            DEFAULT_SMOOTH_SCROLL_OFFSET_PX,
            OFFSET_PX_BOUNDS,
        );
        self.typing.type_speed_ms =
            within(self.typing.type_speed_ms, DEFAULT_TYPE_SPEED_MS, TICK_MS_BOUNDS);
        self.typing.delete_speed_ms =
            within(self.typing.delete_speed_ms, DEFAULT_DELETE_SPEED_MS, TICK_MS_BOUNDS);
        self.typing.delay_between_ms = within(
            self.typing.delay_between_ms,
            DEFAULT_DELAY_BETWEEN_MS,
            DELAY_BETWEEN_MS_BOUNDS,
        );
        self.particles.count =
            within(self.particles.count, DEFAULT_PARTICLE_COUNT, PARTICLE_COUNT_BOUNDS);
        self
    }

    pub fn typing_timing(&self) -> TypingTiming {
        TypingTiming {
            type_speed_ms: self.typing.type_speed_ms,
            delete_speed_ms: self.typing.delete_speed_ms,
            delay_between_ms: self.typing.delay_between_ms,
        }
    }

    pub fn media_for(&self, entry_key: Option<&str>) -> Option<&EducationMedia> {
        self.education_media.get(entry_key?)
    }
}

fn within<T: PartialOrd + Copy>(value: T, default: T, bounds: (T, T)) -> T {
    if value >= bounds.0 && value <= bounds.1 {
        value
    } else {
        default
    }
}

fn f64_within(value: f64, default: f64, bounds: (f64, f64)) -> f64 {
    if value.is_finite() {
        within(value, default, bounds)
    } else {
        default
    }
}

// Configured list first, otherwise `data-typing-texts` split on `|`.
pub fn typing_texts(configured: &[String], attribute: Option<&str>) -> Vec<String> {
    if !configured.is_empty() {
        return configured.to_vec();
    }

    attribute
        .map(|raw| {
            raw.split('|')
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}
