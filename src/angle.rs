use crate::{
    error::Error,
    pose::{
        Landmark,
        LandmarkKind::{self, *},
        LandmarkSet,
    },
};

/// Angle at vertex `b` between the rays towards `a` and `c`, in degrees.
///
/// Reflex angles are folded back, so the result always lies in `[0, 180]`.
/// Coincident points are not special-cased: `atan2(0, 0)` is `0`.
pub fn angle(a: Landmark, b: Landmark, c: Landmark) -> f64 {
    let radians = (c - b).heading() - (a - b).heading();
    let degrees = radians.to_degrees().abs();
    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// The joint angles shown in the overlay panel, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JointAngle {
    NeckTilt,
    RightShoulder,
    LeftShoulder,
    BackAngle,
    HipAngle,
}

pub const NUM_JOINT_ANGLES: usize = 5;

impl JointAngle {
    pub const ALL: [JointAngle; NUM_JOINT_ANGLES] = [
        JointAngle::NeckTilt,
        JointAngle::RightShoulder,
        JointAngle::LeftShoulder,
        JointAngle::BackAngle,
        JointAngle::HipAngle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::NeckTilt => "Neck Tilt",
            Self::RightShoulder => "Right Shoulder",
            Self::LeftShoulder => "Left Shoulder",
            Self::BackAngle => "Back Angle",
            Self::HipAngle => "Hip Angle",
        }
    }

    /// The `(a, vertex, c)` landmarks the angle is measured between.
    pub fn landmarks(self) -> (LandmarkKind, LandmarkKind, LandmarkKind) {
        match self {
            Self::NeckTilt => (RightShoulder, Nose, LeftShoulder),
            Self::RightShoulder => (RightElbow, RightShoulder, RightHip),
            Self::LeftShoulder => (LeftElbow, LeftShoulder, LeftHip),
            Self::BackAngle => (Nose, RightHip, RightKnee),
            Self::HipAngle => (RightKnee, RightHip, LeftHip),
        }
    }

    pub fn measure(self, landmarks: &LandmarkSet) -> Result<AngleSample, Error> {
        let (a, b, c) = self.landmarks();
        Ok(AngleSample {
            joint: self,
            degrees: angle(landmarks.get(a)?, landmarks.get(b)?, landmarks.get(c)?),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AngleSample {
    pub joint: JointAngle,
    pub degrees: f64,
}

pub type AngleSamples = [AngleSample; NUM_JOINT_ANGLES];

/// Measure every joint angle, failing if any required landmark is missing.
pub fn joint_angles(landmarks: &LandmarkSet) -> Result<AngleSamples, Error> {
    let [a, b, c, d, e] = JointAngle::ALL;
    Ok([
        a.measure(landmarks)?,
        b.measure(landmarks)?,
        c.measure(landmarks)?,
        d.measure(landmarks)?,
        e.measure(landmarks)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::{angle, joint_angles, JointAngle};
    use crate::{
        error::Error,
        point::Point,
        pose::{LandmarkKind, LandmarkSet, NUM_LANDMARKS},
    };
    use assert_approx_eq::assert_approx_eq;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y).unwrap()
    }

    #[test]
    fn right_angle() {
        assert_approx_eq!(angle(p(1.0, 0.0), p(0.0, 0.0), p(0.0, 1.0)), 90.0, 1e-3);
    }

    #[test]
    fn straight_angle() {
        assert_approx_eq!(angle(p(1.0, 0.0), p(0.0, 0.0), p(-1.0, 0.0)), 180.0, 1e-3);
    }

    #[test]
    fn same_point_on_both_sides() {
        assert_approx_eq!(angle(p(0.3, 0.7), p(0.5, 0.5), p(0.3, 0.7)), 0.0, 1e-3);
    }

    #[test]
    fn coincident_points() {
        let q = p(0.25, 0.25);
        assert_eq!(angle(q, q, q), 0.0);
    }

    #[test]
    fn reflex_angle_is_folded() {
        // raw difference is 270 degrees
        assert_approx_eq!(angle(p(0.0, -1.0), p(0.0, 0.0), p(-1.0, 0.0)), 90.0, 1e-3);
    }

    #[test]
    fn negative_difference() {
        assert_approx_eq!(angle(p(1.0, 0.1), p(0.0, 0.0), p(1.0, -0.1)), 11.42118, 1e-3);
    }

    #[test]
    fn symmetric() {
        let triples = [
            (p(0.1, 0.9), p(0.4, 0.4), p(0.8, 0.2)),
            (p(0.7, 0.1), p(0.2, 0.3), p(0.9, 0.95)),
            (p(0.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)),
        ];
        for (a, b, c) in triples.iter().copied() {
            assert_approx_eq!(angle(a, b, c), angle(c, b, a), 1e-4);
        }
    }

    #[test]
    fn always_in_range() {
        let coords = [-3.0, -1.0, -0.5, 0.0, 0.25, 0.5, 1.0, 7.5];
        for &ax in &coords {
            for &cy in &coords {
                for &bx in &coords {
                    let degrees = angle(p(ax, 0.5), p(bx, -0.25), p(0.75, cy));
                    assert!((0.0..=180.0).contains(&degrees), "{}", degrees);
                }
            }
        }
    }

    #[test]
    fn idempotent() {
        let (a, b, c) = (p(0.2, 0.6), p(0.5, 0.5), p(0.9, 0.1));
        assert_eq!(angle(a, b, c), angle(a, b, c));
    }

    #[test]
    fn names_in_display_order() {
        let names = JointAngle::ALL
            .iter()
            .map(|joint| joint.name())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "Neck Tilt",
                "Right Shoulder",
                "Left Shoulder",
                "Back Angle",
                "Hip Angle"
            ]
        );
    }

    #[test]
    fn measures_each_joint_at_its_vertex() {
        let mut set = LandmarkSet::from_points(
            (0..NUM_LANDMARKS).map(|_| Point::default()),
        )
        .unwrap();
        set.insert(LandmarkKind::Nose, p(0.5, 0.2)).unwrap();
        set.insert(LandmarkKind::LeftShoulder, p(0.6, 0.3)).unwrap();
        set.insert(LandmarkKind::RightShoulder, p(0.4, 0.3)).unwrap();
        set.insert(LandmarkKind::LeftElbow, p(0.7, 0.3)).unwrap();
        set.insert(LandmarkKind::RightElbow, p(0.4, 0.45)).unwrap();
        set.insert(LandmarkKind::LeftHip, p(0.6, 0.6)).unwrap();
        set.insert(LandmarkKind::RightHip, p(0.4, 0.6)).unwrap();
        set.insert(LandmarkKind::RightKnee, p(0.4, 0.8)).unwrap();

        let samples = joint_angles(&set).unwrap();
        let joints = samples.iter().map(|s| s.joint).collect::<Vec<_>>();
        assert_eq!(joints, JointAngle::ALL);

        // shoulders 0.1 to either side and 0.1 below the nose
        assert_approx_eq!(samples[0].degrees, 90.0, 1e-3);
        // right elbow hangs straight down onto the hip line
        assert_approx_eq!(samples[1].degrees, 0.0, 1e-3);
        // left elbow sticks straight out
        assert_approx_eq!(samples[2].degrees, 90.0, 1e-3);
        // nose leans forward of the right hip
        assert_approx_eq!(samples[3].degrees, 165.96376, 1e-3);
        assert_approx_eq!(samples[4].degrees, 90.0, 1e-3);
    }

    #[test]
    fn missing_vertex() {
        let mut set = LandmarkSet::from_points(
            (0..NUM_LANDMARKS).map(|_| Point::default()),
        )
        .unwrap();
        set.remove(LandmarkKind::RightHip).unwrap();
        assert!(matches!(
            joint_angles(&set),
            Err(Error::MissingLandmark(LandmarkKind::RightHip))
        ));
        assert!(JointAngle::NeckTilt.measure(&set).is_ok());
    }
}
