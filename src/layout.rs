//! Overlay geometry for the posture window, independent of any drawing backend.

use crate::{angle::AngleSample, posture::PostureVerdict};

pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1080;

/// Fraction of the screen the detection window occupies.
pub const WINDOW_SCALE: f64 = 0.8;

pub const PANEL_WIDTH: i32 = 300;
pub const PANEL_ALPHA: f64 = 0.85;
pub const PANEL_TITLE: &str = "Joint Angles";

const PANEL_MARGIN: i32 = 20;
const TITLE_Y: i32 = 40;
const SEPARATOR_Y: i32 = 60;
const FIRST_ROW_Y: i32 = 100;
const ROW_SPACING: i32 = 80;
const VALUE_OFFSET: i32 = 30;
const ROW_SEPARATOR_OFFSET: i32 = 50;

pub const VERDICT_Y: i32 = 50;

/// BGR colors.
pub type Color = (f64, f64, f64);

pub const PANEL_BACKGROUND: Color = (33.0, 33.0, 33.0);
pub const WHITE: Color = (255.0, 255.0, 255.0);
pub const LIGHT_GRAY: Color = (200.0, 200.0, 200.0);
pub const DARK_GRAY: Color = (100.0, 100.0, 100.0);
pub const GREEN: Color = (0.0, 255.0, 0.0);
pub const RED: Color = (0.0, 0.0, 255.0);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// A window scaled down from the screen size and centered on it.
pub fn window_geometry(screen_width: u32, screen_height: u32) -> Rect {
    let width = (f64::from(screen_width) * WINDOW_SCALE) as i32;
    let height = (f64::from(screen_height) * WINDOW_SCALE) as i32;
    let (screen_width, screen_height) = (screen_width as i32, screen_height as i32);
    Rect {
        x: (screen_width - width) / 2,
        y: (screen_height - height) / 2,
        width,
        height,
    }
}

/// Scale a frame to fit inside a window, preserving its aspect ratio, and
/// center it. The returned rect is relative to the window.
pub fn fit_frame(frame_width: u32, frame_height: u32, window_width: i32, window_height: i32) -> Rect {
    let aspect_ratio = f64::from(frame_width) / f64::from(frame_height);
    let (width, height) =
        if f64::from(window_width) / f64::from(window_height) > aspect_ratio {
            ((f64::from(window_height) * aspect_ratio) as i32, window_height)
        } else {
            (window_width, (f64::from(window_width) / aspect_ratio) as i32)
        };
    Rect {
        x: (window_width - width) / 2,
        y: (window_height - height) / 2,
        width,
        height,
    }
}

pub fn verdict_color(verdict: PostureVerdict) -> Color {
    if verdict.is_good() {
        GREEN
    } else {
        RED
    }
}

/// Text x position that centers `text_width` horizontally in an image.
pub fn centered_x(image_width: i32, text_width: i32) -> i32 {
    (image_width - text_width) / 2
}

pub fn format_degrees(degrees: f64) -> String {
    format!("{:.1}°", degrees)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Line {
    pub from: (i32, i32),
    pub to: (i32, i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub name: &'static str,
    pub name_origin: (i32, i32),
    pub value: String,
    pub value_origin: (i32, i32),
    pub separator: Line,
}

/// The semi-transparent joint angle panel along the right edge of the image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AnglePanel {
    pub area: Rect,
}

impl AnglePanel {
    pub fn new(image_width: i32, image_height: i32) -> Self {
        Self {
            area: Rect {
                x: image_width - PANEL_WIDTH,
                y: 0,
                width: PANEL_WIDTH,
                height: image_height,
            },
        }
    }

    fn text_x(&self) -> i32 {
        self.area.x + PANEL_MARGIN
    }

    fn rule(&self, y: i32) -> Line {
        Line {
            from: (self.text_x(), y),
            to: (self.area.x + self.area.width - PANEL_MARGIN, y),
        }
    }

    pub fn title_origin(&self) -> (i32, i32) {
        (self.text_x(), TITLE_Y)
    }

    pub fn title_separator(&self) -> Line {
        self.rule(SEPARATOR_Y)
    }

    pub fn rows(&self, samples: &[AngleSample]) -> Vec<PanelRow> {
        samples
            .iter()
            .zip((FIRST_ROW_Y..).step_by(ROW_SPACING as usize))
            .map(|(sample, y)| PanelRow {
                name: sample.joint.name(),
                name_origin: (self.text_x(), y),
                value: format_degrees(sample.degrees),
                value_origin: (self.text_x(), y + VALUE_OFFSET),
                separator: self.rule(y + ROW_SEPARATOR_OFFSET),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        angle::{AngleSample, JointAngle},
        posture::PostureVerdict,
    };

    #[test]
    fn default_window_is_centered() {
        assert_eq!(
            window_geometry(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT),
            Rect {
                x: 192,
                y: 108,
                width: 1536,
                height: 864
            }
        );
    }

    #[test]
    fn wide_window_pillarboxes() {
        // 4:3 frame in a 16:9 window
        assert_eq!(
            fit_frame(640, 480, 1536, 864),
            Rect {
                x: 192,
                y: 0,
                width: 1152,
                height: 864
            }
        );
    }

    #[test]
    fn tall_window_letterboxes() {
        assert_eq!(
            fit_frame(1280, 720, 800, 800),
            Rect {
                x: 0,
                y: 175,
                width: 800,
                height: 450
            }
        );
    }

    #[test]
    fn panel_rows() {
        let panel = AnglePanel::new(1536, 864);
        assert_eq!(panel.area.x, 1236);
        assert_eq!(panel.title_origin(), (1256, 40));
        assert_eq!(
            panel.title_separator(),
            Line {
                from: (1256, 60),
                to: (1516, 60)
            }
        );

        let samples = [
            AngleSample {
                joint: JointAngle::NeckTilt,
                degrees: 87.26,
            },
            AngleSample {
                joint: JointAngle::HipAngle,
                degrees: 180.0,
            },
        ];
        let rows = panel.rows(&samples);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Neck Tilt");
        assert_eq!(rows[0].value, "87.3°");
        assert_eq!(rows[0].name_origin, (1256, 100));
        assert_eq!(rows[0].value_origin, (1256, 130));
        assert_eq!(rows[0].separator.from, (1256, 150));
        assert_eq!(rows[1].name_origin, (1256, 180));
        assert_eq!(rows[1].value, "180.0°");
    }

    #[test]
    fn verdict_colors() {
        assert_eq!(verdict_color(PostureVerdict::GoodPosture), GREEN);
        assert_eq!(verdict_color(PostureVerdict::BadPosture), RED);
        assert_eq!(centered_x(1536, 336), 600);
    }
}
