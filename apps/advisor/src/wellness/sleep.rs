use serde::Serialize;

/// One night's self-reported sleep. Quality, fatigue and alertness are 1–10.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepLog {
    pub duration_hours: f64,
    pub quality: u8,
    pub fatigue: u8,
    pub alertness: u8,
}

const OPTIMAL_HOURS: f64 = 8.0;

impl SleepLog {
    /// 0–100. Mean of duration (peaks at 8h), quality, inverted fatigue and alertness.
    pub fn wellness_score(&self) -> i64 {
        let duration = (100.0 - (self.duration_hours - OPTIMAL_HOURS).abs() * 12.5).clamp(0.0, 100.0);
        let quality = f64::from(self.quality) * 10.0;
        let fatigue = (11.0 - f64::from(self.fatigue)) * 10.0;
        let alertness = f64::from(self.alertness) * 10.0;

        ((duration + quality + fatigue + alertness) / 4.0).trunc() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(duration_hours: f64, quality: u8, fatigue: u8, alertness: u8) -> SleepLog {
        SleepLog {
            duration_hours,
            quality,
            fatigue,
            alertness,
        }
    }

    #[test]
    fn test_ideal_night() {
        assert_eq!(log(8.0, 10, 1, 10).wellness_score(), 100);
    }

    #[test]
    fn test_duration_penalty_clamps_at_zero() {
        // duration 0, quality 50, fatigue 60, alertness 50 → 160 / 4
        assert_eq!(log(0.0, 5, 5, 5).wellness_score(), 40);
        assert_eq!(log(20.0, 5, 5, 5).wellness_score(), 40);
    }

    #[test]
    fn test_score_truncates() {
        // duration 93.75, quality 70, fatigue 70, alertness 60 → 293.75 / 4 = 73.4375
        assert_eq!(log(7.5, 7, 4, 6).wellness_score(), 73);
    }
}
