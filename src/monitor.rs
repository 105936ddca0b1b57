use crate::{
    error::Error,
    posture::{analyze, Analysis},
    source::{Frame, FrameSource},
};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};
use tracing::{debug, info, trace};

pub trait Renderer {
    /// Present one frame and its analysis, if any.
    ///
    /// Returns `false` to ask the monitor to stop.
    fn render(&mut self, frame: &Frame, analysis: Option<&Analysis>) -> Result<bool, Error>;
}

impl<T> Renderer for Box<T>
where
    T: Renderer + ?Sized,
{
    fn render(&mut self, frame: &Frame, analysis: Option<&Analysis>) -> Result<bool, Error> {
        (**self).render(frame, analysis)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Stats {
    pub frames: usize,
    pub analyzed: usize,
    pub skipped: usize,
    pub good: usize,
    pub bad: usize,
    pub analysis: Duration,
}

impl Stats {
    fn record(&mut self, analysis: Option<&Analysis>) {
        self.frames += 1;
        match analysis {
            Some(analysis) => {
                self.analyzed += 1;
                if analysis.verdict.is_good() {
                    self.good += 1;
                } else {
                    self.bad += 1;
                }
            }
            None => self.skipped += 1,
        }
    }
}

/// Drives the per-frame loop: pull landmarks, analyze them, hand the result to
/// a renderer. Every frame is analyzed on its own.
pub struct Monitor<S, R> {
    source: S,
    renderer: R,
    stats: Stats,
}

impl<S, R> Monitor<S, R>
where
    S: FrameSource,
    R: Renderer,
{
    pub fn new(source: S, renderer: R) -> Self {
        Self {
            source,
            renderer,
            stats: Default::default(),
        }
    }

    fn analyze_frame(&mut self, frame: &Frame) -> Result<Option<Analysis>, Error> {
        let landmarks = match frame.landmarks.as_ref() {
            Some(landmarks) => landmarks,
            None => {
                trace!(frame = self.stats.frames, "no body detected");
                return Ok(None);
            }
        };

        let start = Instant::now();
        let result = analyze(landmarks, frame.height_px());
        self.stats.analysis += start.elapsed();

        match result {
            Ok(analysis) => Ok(Some(analysis)),
            Err(Error::MissingLandmark(kind)) => {
                debug!(frame = self.stats.frames, ?kind, "skipping incomplete frame");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Process one frame. Returns `false` when the source is exhausted or the
    /// renderer asked to stop.
    pub fn step(&mut self) -> Result<bool, Error> {
        let frame = match self.source.next_frame()? {
            Some(frame) => frame,
            None => return Ok(false),
        };

        let analysis = self.analyze_frame(&frame)?;
        self.stats.record(analysis.as_ref());

        if let Some(analysis) = analysis.as_ref() {
            debug!(
                frame = self.stats.frames,
                verdict = analysis.verdict.label(),
                shoulder_diff = analysis.alignment.shoulder_diff,
                hip_diff = analysis.alignment.hip_diff,
                "analyzed frame"
            );
        }

        self.renderer.render(&frame, analysis.as_ref())
    }

    /// Run until the source is exhausted, the renderer asks to stop or
    /// `running` is cleared.
    pub fn run(&mut self, running: &AtomicBool) -> Result<Stats, Error> {
        while running.load(Ordering::SeqCst) {
            if !self.step()? {
                break;
            }
        }

        info!(
            message = "monitor stopped",
            frames = self.stats.frames,
            analyzed = self.stats.analyzed,
            skipped = self.stats.skipped,
            good = self.stats.good,
            bad = self.stats.bad
        );
        Ok(self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::{Monitor, Renderer, Stats};
    use crate::{
        error::Error,
        point::Point,
        pose::{LandmarkKind, LandmarkSet, NUM_LANDMARKS},
        posture::{Analysis, PostureVerdict},
        source::{Frame, FrameSource},
    };
    use std::{collections::VecDeque, sync::atomic::AtomicBool, time::Duration};

    struct Frames(VecDeque<Frame>);

    impl FrameSource for Frames {
        fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
            Ok(self.0.pop_front())
        }
    }

    #[derive(Default)]
    struct Recorder {
        verdicts: Vec<Option<PostureVerdict>>,
        stop_after: Option<usize>,
    }

    impl Renderer for Recorder {
        fn render(&mut self, _frame: &Frame, analysis: Option<&Analysis>) -> Result<bool, Error> {
            self.verdicts.push(analysis.map(|a| a.verdict));
            Ok(self.stop_after != Some(self.verdicts.len()))
        }
    }

    fn frame(right_shoulder_y: f32) -> Frame {
        let mut set =
            LandmarkSet::from_points((0..NUM_LANDMARKS).map(|_| Point::new(0.5, 0.5).unwrap()))
                .unwrap();
        set.insert(
            LandmarkKind::RightShoulder,
            Point::new(0.5, right_shoulder_y).unwrap(),
        )
        .unwrap();
        Frame {
            width: 640,
            height: 480,
            landmarks: Some(set),
        }
    }

    fn empty() -> Frame {
        Frame {
            width: 640,
            height: 480,
            landmarks: None,
        }
    }

    fn incomplete() -> Frame {
        let mut frame = frame(0.5);
        if let Some(set) = frame.landmarks.as_mut() {
            set.remove(LandmarkKind::Nose).unwrap();
        }
        frame
    }

    #[test]
    fn classifies_every_frame_independently() {
        let source = Frames(vec![frame(0.5), frame(0.6), empty(), incomplete(), frame(0.51)].into());
        let mut monitor = Monitor::new(source, Recorder::default());
        let stats = monitor.run(&AtomicBool::new(true)).unwrap();

        assert_eq!(
            monitor.renderer.verdicts,
            [
                Some(PostureVerdict::GoodPosture),
                Some(PostureVerdict::BadPosture),
                None,
                None,
                Some(PostureVerdict::GoodPosture),
            ]
        );
        assert_eq!(
            (stats.frames, stats.analyzed, stats.skipped, stats.good, stats.bad),
            (5, 3, 2, 2, 1)
        );
        assert!(stats.analysis > Duration::default());
    }

    #[test]
    fn renderer_can_stop() {
        let source = Frames(vec![frame(0.5); 4].into());
        let recorder = Recorder {
            stop_after: Some(2),
            ..Default::default()
        };
        let mut monitor = Monitor::new(source, recorder);
        assert_eq!(monitor.run(&AtomicBool::new(true)).unwrap().frames, 2);
    }

    #[test]
    fn stop_flag_is_checked_first() {
        let source = Frames(vec![frame(0.5)].into());
        let mut monitor = Monitor::new(source, Recorder::default());
        let stats = monitor.run(&AtomicBool::new(false)).unwrap();
        assert_eq!(stats, Stats::default());
    }
}
