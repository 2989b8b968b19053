use serde::{Deserialize, Serialize};

use crate::domain::record::AbChoice;

// ---------------------------------------------------------------------------
// Ratio helpers — zero denominators yield None, serialized as null
// ---------------------------------------------------------------------------

fn ratio(numerator: u32, denominator: u32) -> Option<f64> {
    (denominator != 0).then(|| f64::from(numerator) / f64::from(denominator))
}

fn f1(precision: Option<f64>, recall: Option<f64>) -> Option<f64> {
    match (precision, recall) {
        (Some(p), Some(r)) if p + r > 0.0 => Some(2.0 * p * r / (p + r)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Binary (classify) confusion and metrics
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryConfusion {
    #[serde(rename = "tp")]
    pub true_pos: u32,
    #[serde(rename = "fp")]
    pub false_pos: u32,
    #[serde(rename = "fn")]
    pub false_neg: u32,
    #[serde(rename = "tn")]
    pub true_neg: u32,
}

impl BinaryConfusion {
    pub fn total(&self) -> u32 {
        self.true_pos + self.false_pos + self.false_neg + self.true_neg
    }
}

pub fn confusion_binary(pairs: &[(bool, bool)]) -> BinaryConfusion {
    let mut confusion = BinaryConfusion::default();
    for &(gold, human) in pairs {
        match (gold, human) {
            (true, true) => confusion.true_pos += 1,
            (false, true) => confusion.false_pos += 1,
            (true, false) => confusion.false_neg += 1,
            (false, false) => confusion.true_neg += 1,
        }
    }
    confusion
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryMetrics {
    pub accuracy: Option<f64>,
    pub precision_pos: Option<f64>,
    pub recall_pos: Option<f64>,
    pub f1_pos: Option<f64>,
    pub precision_neg: Option<f64>,
    pub recall_neg: Option<f64>,
    pub f1_neg: Option<f64>,
    pub confusion: BinaryConfusion,
}

/// Metrics over `(gold, human)` pairs. Skipped records never make it into
/// `pairs`, so denominators only count scored items.
pub fn metrics_binary(pairs: &[(bool, bool)]) -> BinaryMetrics {
    let c = confusion_binary(pairs);
    let precision_pos = ratio(c.true_pos, c.true_pos + c.false_pos);
    let recall_pos = ratio(c.true_pos, c.true_pos + c.false_neg);
    let precision_neg = ratio(c.true_neg, c.true_neg + c.false_neg);
    let recall_neg = ratio(c.true_neg, c.true_neg + c.false_pos);
    BinaryMetrics {
        accuracy: ratio(c.true_pos + c.true_neg, c.total()),
        precision_pos,
        recall_pos,
        f1_pos: f1(precision_pos, recall_pos),
        precision_neg,
        recall_neg,
        f1_neg: f1(precision_neg, recall_neg),
        confusion: c,
    }
}

// ---------------------------------------------------------------------------
// A/B (rank) confusion and metrics — a 2-class problem over {a, b}
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbConfusion {
    pub a_to_a: u32,
    pub a_to_b: u32,
    pub b_to_a: u32,
    pub b_to_b: u32,
}

impl AbConfusion {
    pub fn total(&self) -> u32 {
        self.a_to_a + self.a_to_b + self.b_to_a + self.b_to_b
    }
}

pub fn confusion_ab(pairs: &[(AbChoice, AbChoice)]) -> AbConfusion {
    let mut confusion = AbConfusion::default();
    for &(gold, human) in pairs {
        match (gold, human) {
            (AbChoice::A, AbChoice::A) => confusion.a_to_a += 1,
            (AbChoice::A, AbChoice::B) => confusion.a_to_b += 1,
            (AbChoice::B, AbChoice::A) => confusion.b_to_a += 1,
            (AbChoice::B, AbChoice::B) => confusion.b_to_b += 1,
        }
    }
    confusion
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbMetrics {
    pub accuracy: Option<f64>,
    pub precision_a: Option<f64>,
    pub recall_a: Option<f64>,
    pub f1_a: Option<f64>,
    pub precision_b: Option<f64>,
    pub recall_b: Option<f64>,
    pub f1_b: Option<f64>,
    pub confusion: AbConfusion,
}

pub fn metrics_ab(pairs: &[(AbChoice, AbChoice)]) -> AbMetrics {
    let c = confusion_ab(pairs);
    // For class "a": a_to_a are hits, b_to_a are false alarms, a_to_b misses.
    let precision_a = ratio(c.a_to_a, c.a_to_a + c.b_to_a);
    let recall_a = ratio(c.a_to_a, c.a_to_a + c.a_to_b);
    let precision_b = ratio(c.b_to_b, c.b_to_b + c.a_to_b);
    let recall_b = ratio(c.b_to_b, c.b_to_b + c.b_to_a);
    AbMetrics {
        accuracy: ratio(c.a_to_a + c.b_to_b, c.total()),
        precision_a,
        recall_a,
        f1_a: f1(precision_a, recall_a),
        precision_b,
        recall_b,
        f1_b: f1(precision_b, recall_b),
        confusion: c,
    }
}

// ---------------------------------------------------------------------------
// MetricsReport — finalized metrics block, one variant per task
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricsReport {
    Binary(BinaryMetrics),
    Ab(AbMetrics),
}

impl MetricsReport {
    pub fn accuracy(&self) -> Option<f64> {
        match self {
            MetricsReport::Binary(m) => m.accuracy,
            MetricsReport::Ab(m) => m.accuracy,
        }
    }

    pub fn scored_items(&self) -> u32 {
        match self {
            MetricsReport::Binary(m) => m.confusion.total(),
            MetricsReport::Ab(m) => m.confusion.total(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
