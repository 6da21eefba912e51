//! Local quality score for campaign list views. Deterministic and cheap, so it
//! can run for every row without a backend call.

use adpilot_core::{CampaignStatus, CampaignSummary};

use crate::benchmarks::Benchmark;

const BASE_SCORE: f64 = 50.0;
const CTR_WEIGHT: f64 = 25.0;
const CTR_PENALTY_FLOOR: f64 = -30.0;
const CTR_BONUS_CAP: f64 = 35.0;
const ACTIVE_BONUS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveKind {
    Sales,
    Awareness,
    Traffic,
    Other,
}

impl ObjectiveKind {
    /// Objectives are free text in the dashboard, in English or Vietnamese.
    pub fn classify(objective: &str) -> Self {
        let objective = objective.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| objective.contains(n));

        if has(&["sales", "conversion", "purchase", "doanh số", "chuyển đổi", "bán hàng"]) {
            ObjectiveKind::Sales
        } else if has(&["awareness", "reach", "brand", "nhận diện", "tiếp cận"]) {
            ObjectiveKind::Awareness
        } else if has(&["traffic", "click", "lưu lượng", "truy cập"]) {
            ObjectiveKind::Traffic
        } else {
            ObjectiveKind::Other
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub fn quality_score(campaign: &CampaignSummary) -> u8 {
    let benchmark = Benchmark::for_platform(campaign.platform);
    let ctr = finite_or_zero(campaign.ctr).max(0.0);
    let budget = finite_or_zero(campaign.budget).max(0.0);
    let spent = finite_or_zero(campaign.spent).max(0.0);

    let ctr_ratio = ctr / benchmark.ctr;
    let above_benchmark = ctr_ratio >= 1.0;
    let utilization = if budget > 0.0 { spent / budget } else { 0.0 };

    let mut score = BASE_SCORE;
    score += ((ctr_ratio - 1.0) * CTR_WEIGHT).clamp(CTR_PENALTY_FLOOR, CTR_BONUS_CAP);

    match ObjectiveKind::classify(&campaign.objective) {
        ObjectiveKind::Sales => {
            if above_benchmark && utilization > 0.5 {
                score += 15.0;
            } else if budget > 0.0 && utilization < 0.2 {
                score -= 5.0;
            }
        }
        ObjectiveKind::Awareness => {
            if campaign.impressions >= 100_000 {
                score += 15.0;
            } else if campaign.impressions >= 10_000 {
                score += 5.0;
            }
        }
        ObjectiveKind::Traffic => {
            if above_benchmark {
                score += 10.0;
            }
        }
        ObjectiveKind::Other => {}
    }

    if campaign.status == CampaignStatus::Active {
        score += ACTIVE_BONUS;
    }

    score.clamp(0.0, 100.0).round() as u8
}
