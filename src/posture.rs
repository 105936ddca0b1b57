use crate::{
    angle::{joint_angles, AngleSamples},
    error::Error,
    pose::{LandmarkKind, LandmarkSet},
};
use std::fmt;

/// Maximum vertical offset, in pixels, between left and right shoulders (and
/// between left and right hips) that still counts as good posture.
///
/// This is an absolute pixel count: the same pose can classify differently
/// at different frame resolutions or camera distances.
pub const ALIGNMENT_THRESHOLD_PX: f64 = 20.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PostureVerdict {
    GoodPosture,
    BadPosture,
}

impl PostureVerdict {
    pub fn label(self) -> &'static str {
        match self {
            Self::GoodPosture => "Good Posture",
            Self::BadPosture => "Bad Posture",
        }
    }

    pub fn is_good(self) -> bool {
        self == Self::GoodPosture
    }
}

impl fmt::Display for PostureVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vertical offsets between the left and right side of the body, in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Alignment {
    pub shoulder_diff: f64,
    pub hip_diff: f64,
}

impl Alignment {
    pub fn measure(landmarks: &LandmarkSet, image_height: f64) -> Result<Self, Error> {
        let pixel_y = |kind| Ok::<_, Error>(f64::from(landmarks.get(kind)?.y()) * image_height);

        let left_shoulder = pixel_y(LandmarkKind::LeftShoulder)?;
        let right_shoulder = pixel_y(LandmarkKind::RightShoulder)?;
        let left_hip = pixel_y(LandmarkKind::LeftHip)?;
        let right_hip = pixel_y(LandmarkKind::RightHip)?;

        Ok(Self {
            shoulder_diff: (left_shoulder - right_shoulder).abs(),
            hip_diff: (left_hip - right_hip).abs(),
        })
    }

    pub fn verdict(self) -> PostureVerdict {
        if self.shoulder_diff > ALIGNMENT_THRESHOLD_PX || self.hip_diff > ALIGNMENT_THRESHOLD_PX {
            PostureVerdict::BadPosture
        } else {
            PostureVerdict::GoodPosture
        }
    }
}

/// Classify a single frame from the vertical alignment of shoulders and hips.
pub fn classify(landmarks: &LandmarkSet, image_height: f64) -> Result<PostureVerdict, Error> {
    Ok(Alignment::measure(landmarks, image_height)?.verdict())
}

/// Everything derived from one frame's landmarks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Analysis {
    pub angles: AngleSamples,
    pub alignment: Alignment,
    pub verdict: PostureVerdict,
}

/// Measure joint angles and classify posture, or fail without a partial result
/// when a required landmark is missing.
pub fn analyze(landmarks: &LandmarkSet, image_height: f64) -> Result<Analysis, Error> {
    let angles = joint_angles(landmarks)?;
    let alignment = Alignment::measure(landmarks, image_height)?;
    Ok(Analysis {
        angles,
        alignment,
        verdict: alignment.verdict(),
    })
}
