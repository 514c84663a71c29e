pub mod outlier;

pub use outlier::OutlierFilter;
