//! Output normalization and pattern analysis

pub mod classifier;
pub mod encoding;
pub mod entropy;

pub use classifier::{Classifier, Finding, FindingCategory};
pub use encoding::{DecodeAttempt, EncodingKind};
pub use entropy::{EntropyAssessment, EntropyReading};
