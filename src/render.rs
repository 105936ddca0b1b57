use crate::{
    error::Error,
    layout::format_degrees,
    monitor::Renderer,
    posture::Analysis,
    source::Frame,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

fn summarize(analysis: &Analysis) -> String {
    analysis
        .angles
        .iter()
        .map(|sample| format!("{}: {}", sample.joint.name(), format_degrees(sample.degrees)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reports every analyzed frame through `tracing`, optionally with a spinner.
pub struct LogRenderer {
    progress: Option<ProgressBar>,
    frames: usize,
    analyzed: usize,
}

impl LogRenderer {
    pub fn new(show_progress: bool) -> Self {
        let progress = if show_progress {
            Some(
                ProgressBar::new_spinner().with_style(
                    ProgressStyle::default_spinner()
                        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                        .template("{prefix:.bold.dim} {spinner} {wide_msg}"),
                ),
            )
        } else {
            None
        };
        Self {
            progress,
            frames: 0,
            analyzed: 0,
        }
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &Frame, analysis: Option<&Analysis>) -> Result<bool, Error> {
        self.frames += 1;

        let status = match analysis {
            Some(analysis) => {
                self.analyzed += 1;
                let angles = summarize(analysis);
                info!(
                    frame = self.frames,
                    width = frame.width,
                    height = frame.height,
                    verdict = analysis.verdict.label(),
                    angles = %angles
                );
                analysis.verdict.label()
            }
            None => "no pose",
        };

        if let Some(progress) = self.progress.as_ref() {
            progress.set_message(format!(
                "{} | analyzed {}/{} frames",
                status, self.analyzed, self.frames
            ));
            progress.inc(1);
        }

        Ok(true)
    }
}

impl Drop for LogRenderer {
    fn drop(&mut self) {
        if let Some(progress) = self.progress.take() {
            progress.finish_and_clear();
        }
    }
}

#[cfg(feature = "gui")]
pub use window::WindowRenderer;

#[cfg(feature = "gui")]
mod window {
    use crate::{
        error::Error,
        layout::{
            self, centered_x, fit_frame, verdict_color, window_geometry, AnglePanel, Color, Line,
            Rect,
        },
        monitor::Renderer,
        pose::{constants::CONNECTIONS, LandmarkSet, NUM_LANDMARKS},
        posture::Analysis,
        source::Frame,
    };
    use num_traits::ToPrimitive;
    use opencv::{
        core::{Mat, Point2i, Scalar, CV_8UC3},
        imgproc::{FILLED, FONT_HERSHEY_SIMPLEX, LINE_8, LINE_AA},
        prelude::{MatExprTrait, MatTrait},
    };

    const WINDOW_NAME: &str = "Posture Detector";
    const LANDMARK_RADIUS: i32 = 4;

    fn point((x, y): (i32, i32)) -> Point2i {
        Point2i::new(x, y)
    }

    fn draw_line(image: &mut Mat, line: Line, color: Color, thickness: i32) -> Result<(), Error> {
        opencv::imgproc::line(
            image,
            point(line.from),
            point(line.to),
            Scalar::from(color),
            thickness,
            LINE_8, // line_type
            0,      // shift
        )
        .map_err(Error::DrawLine)
    }

    fn put_text(
        image: &mut Mat,
        text: &str,
        origin: (i32, i32),
        scale: f64,
        color: Color,
        thickness: i32,
    ) -> Result<(), Error> {
        opencv::imgproc::put_text(
            image,
            text,
            point(origin),
            FONT_HERSHEY_SIMPLEX,
            scale,
            Scalar::from(color),
            thickness,
            LINE_AA, // line_type
            false,   // bottom_left_origin
        )
        .map_err(Error::PutText)
    }

    /// Draws the skeleton, angle panel and verdict into an OpenCV window.
    pub struct WindowRenderer {
        window: Rect,
        wait_key_ms: i32,
    }

    impl WindowRenderer {
        pub fn new(screen_width: u32, screen_height: u32, wait_key_ms: i32) -> Result<Self, Error> {
            use opencv::highgui::{move_window, named_window, resize_window, WINDOW_NORMAL};

            let window = window_geometry(screen_width, screen_height);
            named_window(WINDOW_NAME, WINDOW_NORMAL).map_err(Error::SetupWindow)?;
            resize_window(WINDOW_NAME, window.width, window.height).map_err(Error::SetupWindow)?;
            move_window(WINDOW_NAME, window.x, window.y).map_err(Error::SetupWindow)?;

            Ok(Self {
                window,
                wait_key_ms,
            })
        }

        fn draw_skeleton(&self, image: &mut Mat, frame: &Frame, landmarks: &LandmarkSet) -> Result<(), Error> {
            let placement = fit_frame(frame.width, frame.height, self.window.width, self.window.height);
            let width = placement.width.to_f32().ok_or(Error::ConvertToF32)?;
            let height = placement.height.to_f32().ok_or(Error::ConvertToF32)?;

            let mut xys = [None; NUM_LANDMARKS];
            for (kind, landmark) in landmarks.iter() {
                let x = (landmark.x() * width).to_i32().ok_or(Error::ConvertToI32)?;
                let y = (landmark.y() * height).to_i32().ok_or(Error::ConvertToI32)?;
                let xy = (placement.x + x, placement.y + y);
                xys[kind.idx()?] = Some(xy);
                opencv::imgproc::circle(
                    image,
                    point(xy),
                    LANDMARK_RADIUS,
                    Scalar::from(layout::WHITE),
                    FILLED,
                    LINE_8, // line_type
                    0,      // shift
                )
                .map_err(Error::DrawCircle)?;
            }

            for (a, b) in CONNECTIONS.iter().copied() {
                if let (Some(from), Some(to)) = (xys[a.idx()?], xys[b.idx()?]) {
                    draw_line(image, Line { from, to }, layout::GREEN, 2)?;
                }
            }
            Ok(())
        }

        fn draw_panel(&self, image: &Mat, analysis: &Analysis) -> Result<Mat, Error> {
            let panel = AnglePanel::new(self.window.width, self.window.height);

            let mut overlay = Mat::default();
            image.copy_to(&mut overlay).map_err(Error::BlendPanel)?;
            opencv::imgproc::rectangle(
                &mut overlay,
                opencv::core::Rect::new(
                    panel.area.x,
                    panel.area.y,
                    panel.area.width,
                    panel.area.height,
                ),
                Scalar::from(layout::PANEL_BACKGROUND),
                FILLED,
                LINE_8, // line_type
                0,      // shift
            )
            .map_err(Error::DrawRectangle)?;

            let mut blended = Mat::default();
            opencv::core::add_weighted(
                &overlay,
                layout::PANEL_ALPHA,
                image,
                1.0 - layout::PANEL_ALPHA,
                0.0,
                &mut blended,
                -1,
            )
            .map_err(Error::BlendPanel)?;

            put_text(
                &mut blended,
                layout::PANEL_TITLE,
                panel.title_origin(),
                0.8,
                layout::WHITE,
                2,
            )?;
            draw_line(&mut blended, panel.title_separator(), layout::LIGHT_GRAY, 1)?;

            for row in panel.rows(&analysis.angles) {
                put_text(&mut blended, row.name, row.name_origin, 0.6, layout::LIGHT_GRAY, 1)?;
                put_text(&mut blended, &row.value, row.value_origin, 0.8, layout::WHITE, 2)?;
                draw_line(&mut blended, row.separator, layout::DARK_GRAY, 1)?;
            }
            Ok(blended)
        }

        fn draw_verdict(&self, image: &mut Mat, analysis: &Analysis) -> Result<(), Error> {
            const SCALE: f64 = 1.5;
            const THICKNESS: i32 = 3;

            let label = analysis.verdict.label();
            let mut baseline = 0;
            let size = opencv::imgproc::get_text_size(
                label,
                FONT_HERSHEY_SIMPLEX,
                SCALE,
                THICKNESS,
                &mut baseline,
            )
            .map_err(Error::GetTextSize)?;
            put_text(
                image,
                label,
                (centered_x(self.window.width, size.width), layout::VERDICT_Y),
                SCALE,
                verdict_color(analysis.verdict),
                THICKNESS,
            )
        }
    }

    impl Renderer for WindowRenderer {
        fn render(&mut self, frame: &Frame, analysis: Option<&Analysis>) -> Result<bool, Error> {
            let mut image = Mat::zeros(self.window.height, self.window.width, CV_8UC3)
                .map_err(Error::AllocateCanvas)?
                .to_mat()
                .map_err(Error::AllocateCanvas)?;

            if let Some(landmarks) = frame.landmarks.as_ref() {
                self.draw_skeleton(&mut image, frame, landmarks)?;
            }

            if let Some(analysis) = analysis {
                image = self.draw_panel(&image, analysis)?;
                self.draw_verdict(&mut image, analysis)?;
            }

            opencv::highgui::imshow(WINDOW_NAME, &image).map_err(Error::ImShow)?;

            const Q_KEY: u8 = b'q';
            let key = opencv::highgui::wait_key(self.wait_key_ms).map_err(Error::WaitKey)?;
            Ok(key & 0xFF != i32::from(Q_KEY) && key & 0xFF != i32::from(Q_KEY.to_ascii_uppercase()))
        }
    }

    impl Drop for WindowRenderer {
        fn drop(&mut self) {
            let _ = opencv::highgui::destroy_all_windows();
        }
    }
}
