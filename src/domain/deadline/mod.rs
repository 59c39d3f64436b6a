//! Deadline module - classification of due dates into OK / URGENT / OVERDUE.
//!
//! Both evaluation cycles and development plans report urgency through the
//! same [`DeadlineClassifier`], so a date is classified identically wherever
//! it is shown.

mod classification;
mod classifier;

pub use classification::{
    ClassifiedDeadline, DeadlineClassification, DeadlineSeverity, DeadlineSource,
    URGENT_WINDOW_DAYS,
};
pub use classifier::{classify, DayCounting, DeadlineClassifier};
