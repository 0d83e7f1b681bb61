//! Process-wide chart styling.
//!
//! The theme is built once, before the first chart is drawn, and is
//! read-only afterwards. Building it registers a system sans-serif font
//! with plotters; without one, charts are still drawn but carry no text.

use std::path::Path;
use std::sync::OnceLock;

use log::{debug, warn};
use plotters::style::{register_font, FontStyle, RGBColor};

/// Font family name used for every label.
pub const FONT_FAMILY: &str = "sans-serif";

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static THEME: OnceLock<Theme> = OnceLock::new();

/// White background with a light grid.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: RGBColor,
    pub grid: RGBColor,
    pub axis: RGBColor,
    pub caption_size: u32,
    pub label_size: u32,
    pub desc_size: u32,
    pub line_width: u32,
    pub marker_size: i32,
    /// Whether a font was registered; when false no text is drawn.
    pub text: bool,
}

impl Theme {
    fn setup() -> Self {
        Theme {
            background: RGBColor(255, 255, 255),
            grid: RGBColor(221, 221, 221),
            axis: RGBColor(64, 64, 64),
            caption_size: 22,
            label_size: 14,
            desc_size: 16,
            line_width: 2,
            marker_size: 4,
            text: register_system_font(),
        }
    }
}

/// The shared theme. The first call builds it; later calls return the
/// same instance.
pub fn init() -> &'static Theme {
    THEME.get_or_init(Theme::setup)
}

fn register_system_font() -> bool {
    for candidate in FONT_CANDIDATES {
        let path = Path::new(candidate);
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        // plotters keeps registered fonts for the life of the process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                debug!("Chart font: {}", path.display());
                return true;
            }
            Err(_) => debug!("Unusable font {}", path.display()),
        }
    }
    warn!("No usable system font found; charts will be drawn without text.");
    false
}
