pub mod color;
pub mod frame;
pub mod scan;

pub use color::TargetColor;
pub use frame::ImageFrame;
pub use scan::CurveExtractor;
