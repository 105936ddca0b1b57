use crate::{
    error::Error,
    point::Point,
    pose::{LandmarkSet, NUM_LANDMARKS},
};
use std::io::BufRead;

/// One frame delivered by a frame source.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// `None` when the pose model found no body in the frame.
    pub landmarks: Option<LandmarkSet>,
}

impl Frame {
    pub fn height_px(&self) -> f64 {
        f64::from(self.height)
    }
}

pub trait FrameSource {
    /// Return the next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>, Error>;
}

const NO_DETECTION: &str = "none";

/// Reads frames from a line-oriented text stream.
///
/// Each line is `<width> <height>` followed by either `none` or the `x y`
/// pairs of every landmark in model order. Blank lines and lines starting
/// with `#` are ignored.
pub struct LandmarkReader<R> {
    reader: R,
    line: String,
    line_num: usize,
}

impl<R> LandmarkReader<R>
where
    R: BufRead,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_num: 0,
        }
    }

    fn parse_error(&self, reason: impl Into<String>) -> Error {
        Error::ParseFrame {
            line: self.line_num,
            reason: reason.into(),
        }
    }

    fn parse_frame(&self, text: &str) -> Result<Frame, Error> {
        let mut fields = text.split_whitespace();

        let mut dimension = |name: &str| {
            fields
                .next()
                .ok_or_else(|| format!("missing frame {}", name))
                .and_then(|field| {
                    field
                        .parse::<u32>()
                        .map_err(|e| format!("invalid frame {} {:?}: {}", name, field, e))
                })
        };
        let width = dimension("width").map_err(|reason| self.parse_error(reason))?;
        let height = dimension("height").map_err(|reason| self.parse_error(reason))?;

        let rest = fields.collect::<Vec<_>>();
        if rest == [NO_DETECTION] {
            return Ok(Frame {
                width,
                height,
                landmarks: None,
            });
        }

        if rest.len() != 2 * NUM_LANDMARKS {
            return Err(self.parse_error(format!(
                "expected {} coordinates or {:?}, got {} fields",
                2 * NUM_LANDMARKS,
                NO_DETECTION,
                rest.len()
            )));
        }

        let coords = rest
            .iter()
            .map(|field| {
                field
                    .parse::<f32>()
                    .map_err(|e| self.parse_error(format!("invalid coordinate {:?}: {}", field, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let points = coords
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0], xy[1]))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Frame {
            width,
            height,
            landmarks: Some(LandmarkSet::from_points(points)?),
        })
    }
}

impl<R> FrameSource for LandmarkReader<R>
where
    R: BufRead,
{
    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line).map_err(Error::ReadLine)? == 0 {
                return Ok(None);
            }
            self.line_num += 1;

            let text = self.line.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            return self.parse_frame(text).map(Some);
        }
    }
}

impl<S> FrameSource for Box<S>
where
    S: FrameSource + ?Sized,
{
    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        (**self).next_frame()
    }
}
