use crate::{error::Error, point::Point};
use num_traits::{FromPrimitive, ToPrimitive};

/// Body joints in the order the BlazePose landmark model emits them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, num_derive::FromPrimitive, num_derive::ToPrimitive)]
pub enum LandmarkKind {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl LandmarkKind {
    pub fn idx(self) -> Result<usize, Error> {
        self.to_usize().ok_or(Error::LandmarkVariantToUSize(self))
    }

    pub fn from_idx(idx: usize) -> Result<Self, Error> {
        Self::from_usize(idx).ok_or(Error::ConvertUSizeToLandmarkKind(idx))
    }
}

pub const NUM_LANDMARKS: usize = 33;

/// A single joint position, normalized to the frame's width and height.
pub type Landmark = Point;

/// Every landmark the pose model produced for one body in one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LandmarkSet {
    landmarks: [Option<Landmark>; NUM_LANDMARKS],
}

impl Default for LandmarkSet {
    fn default() -> Self {
        Self {
            landmarks: [None; NUM_LANDMARKS],
        }
    }
}

impl LandmarkSet {
    /// Build a complete set from landmarks given in model order.
    pub fn from_points<I>(points: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Landmark>,
    {
        let mut set = Self::default();
        for (i, point) in points.into_iter().enumerate() {
            set.insert(LandmarkKind::from_idx(i)?, point)?;
        }
        Ok(set)
    }

    pub fn insert(&mut self, kind: LandmarkKind, landmark: Landmark) -> Result<(), Error> {
        self.landmarks[kind.idx()?] = Some(landmark);
        Ok(())
    }

    pub fn remove(&mut self, kind: LandmarkKind) -> Result<Option<Landmark>, Error> {
        Ok(self.landmarks[kind.idx()?].take())
    }

    pub fn get(&self, kind: LandmarkKind) -> Result<Landmark, Error> {
        self.landmarks[kind.idx()?].ok_or(Error::MissingLandmark(kind))
    }

    pub fn is_complete(&self) -> bool {
        self.landmarks.iter().all(Option::is_some)
    }

    /// Iterate over the landmarks that are present, in model order.
    pub fn iter(&self) -> impl Iterator<Item = (LandmarkKind, Landmark)> + '_ {
        self.landmarks
            .iter()
            .enumerate()
            .filter_map(|(i, landmark)| Some((LandmarkKind::from_usize(i)?, (*landmark)?)))
    }
}

pub mod constants {
    #[cfg(feature = "gui")]
    use crate::pose::LandmarkKind::{self, *};

    /// Skeleton edges drawn between landmarks.
    #[cfg(feature = "gui")]
    pub const CONNECTIONS: [(LandmarkKind, LandmarkKind); 35] = [
        (Nose, LeftEyeInner),
        (LeftEyeInner, LeftEye),
        (LeftEye, LeftEyeOuter),
        (LeftEyeOuter, LeftEar),
        (Nose, RightEyeInner),
        (RightEyeInner, RightEye),
        (RightEye, RightEyeOuter),
        (RightEyeOuter, RightEar),
        (MouthLeft, MouthRight),
        (LeftShoulder, RightShoulder),
        (LeftShoulder, LeftElbow),
        (LeftElbow, LeftWrist),
        (LeftWrist, LeftPinky),
        (LeftWrist, LeftIndex),
        (LeftWrist, LeftThumb),
        (LeftPinky, LeftIndex),
        (RightShoulder, RightElbow),
        (RightElbow, RightWrist),
        (RightWrist, RightPinky),
        (RightWrist, RightIndex),
        (RightWrist, RightThumb),
        (RightPinky, RightIndex),
        (LeftShoulder, LeftHip),
        (RightShoulder, RightHip),
        (LeftHip, RightHip),
        (LeftHip, LeftKnee),
        (RightHip, RightKnee),
        (LeftKnee, LeftAnkle),
        (RightKnee, RightAnkle),
        (LeftAnkle, LeftHeel),
        (RightAnkle, RightHeel),
        (LeftHeel, LeftFootIndex),
        (RightHeel, RightFootIndex),
        (LeftAnkle, LeftFootIndex),
        (RightAnkle, RightFootIndex),
    ];
}
