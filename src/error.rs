use crate::pose::LandmarkKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("frame has no landmark for {0:?}")]
    MissingLandmark(LandmarkKind),

    #[error("failed to convert usize value to landmark kind: {0}")]
    ConvertUSizeToLandmarkKind(usize),

    #[error("failed to convert landmark variant to usize: {0:?}")]
    LandmarkVariantToUSize(LandmarkKind),

    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("landmark coordinate is not finite: ({0}, {1})")]
    NonFiniteCoordinate(f32, f32),

    #[error("failed to convert value to f32")]
    ConvertToF32,

    #[error("failed to read landmark stream")]
    ReadLine(#[source] std::io::Error),

    #[error("failed to parse frame on line {line}: {reason}")]
    ParseFrame { line: usize, reason: String },

    #[cfg(feature = "gui")]
    #[error("failed to allocate canvas")]
    AllocateCanvas(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to blend angle panel")]
    BlendPanel(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to draw line")]
    DrawLine(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to draw circle")]
    DrawCircle(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to draw rectangle")]
    DrawRectangle(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to draw text")]
    PutText(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to measure text")]
    GetTextSize(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to set up window")]
    SetupWindow(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to show image")]
    ImShow(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to wait for key press")]
    WaitKey(#[source] opencv::Error),

    #[cfg(feature = "gui")]
    #[error("failed to convert value to i32")]
    ConvertToI32,
}
