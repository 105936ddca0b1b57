//! Posture feedback from pose landmarks.
//!
//! An external pose model supplies one [`pose::LandmarkSet`] per frame. From it
//! this crate derives five joint angles and a good/bad posture verdict, and
//! drives a single-threaded loop that hands the results to a renderer.

pub mod angle;
pub mod error;
pub mod layout;
pub mod monitor;
pub mod point;
pub mod pose;
pub mod posture;
pub mod render;
pub mod source;

pub use angle::{angle, joint_angles, AngleSample, JointAngle};
pub use error::Error;
pub use pose::{Landmark, LandmarkKind, LandmarkSet};
pub use posture::{analyze, classify, Analysis, PostureVerdict};
