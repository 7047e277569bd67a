//! Report output: number formatting and the XML document writer

pub mod report;
pub mod xml;

pub use report::AdjustmentReport;
pub use xml::{escape, Fixed, Sci};
