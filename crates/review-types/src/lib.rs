pub mod report;
pub mod types;

pub use report::Report;
pub use types::{Category, Correction, IssueDetail, IssueRecord};
