//! Shannon entropy heuristic for spotting compressed or encrypted payloads

use serde::{Deserialize, Serialize};

/// Banded interpretation of a byte-entropy value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntropyAssessment {
    /// > 7.5 bits; likely encrypted or compressed
    VeryHigh,
    /// > 7.0 bits; possible encryption or compression
    High,
    /// > 6.0 bits; normal for images
    Moderate,
    /// Text or simple data
    Low,
}

impl EntropyAssessment {
    pub fn from_bits(bits: f64) -> Self {
        if bits > 7.5 {
            Self::VeryHigh
        } else if bits > 7.0 {
            Self::High
        } else if bits > 6.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for EntropyAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryHigh => write!(f, "very high - likely encrypted or compressed"),
            Self::High => write!(f, "high - possible encryption or compression"),
            Self::Moderate => write!(f, "moderate - normal for images"),
            Self::Low => write!(f, "low - text or simple data"),
        }
    }
}

/// Entropy measurement over a byte buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntropyReading {
    pub bits: f64,
    pub assessment: EntropyAssessment,
}

impl EntropyReading {
    /// Measure a buffer; `None` for empty input
    pub fn measure(data: &[u8]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        let bits = shannon_entropy(data);
        Some(Self {
            bits,
            assessment: EntropyAssessment::from_bits(bits),
        })
    }
}

impl std::fmt::Display for EntropyReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entropy: {:.4}/8.0 ({})", self.bits, self.assessment)
    }
}

/// Shannon entropy in bits per byte, 0.0..=8.0
pub fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut counts = [0u64; 256];
    for &byte in data {
        counts[usize::from(byte)] += 1;
    }

    let len = data.len() as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}
