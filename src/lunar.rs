//! Lunar age and phase classification

use chrono::NaiveDateTime;
use std::fmt;

/// Mean synodic month in days
pub const SYNODIC_MONTH: f64 = 29.530588853;

/// Julian day of the reference new moon (2000-01-06 14:24 UTC)
pub const NEW_MOON_EPOCH_JD: f64 = 2451550.1;

const UNIX_EPOCH_JD: f64 = 2440587.5;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// The eight named phases of the moon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LunarPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl LunarPhase {
    pub const ALL: [LunarPhase; 8] = [
        LunarPhase::NewMoon,
        LunarPhase::WaxingCrescent,
        LunarPhase::FirstQuarter,
        LunarPhase::WaxingGibbous,
        LunarPhase::FullMoon,
        LunarPhase::WaningGibbous,
        LunarPhase::LastQuarter,
        LunarPhase::WaningCrescent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LunarPhase::NewMoon => "New Moon",
            LunarPhase::WaxingCrescent => "Waxing Crescent",
            LunarPhase::FirstQuarter => "First Quarter",
            LunarPhase::WaxingGibbous => "Waxing Gibbous",
            LunarPhase::FullMoon => "Full Moon",
            LunarPhase::WaningGibbous => "Waning Gibbous",
            LunarPhase::LastQuarter => "Last Quarter",
            LunarPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Share of the disc that is revealed for this phase
    pub fn mask_fraction(self) -> f64 {
        match self {
            LunarPhase::NewMoon => 0.0,
            LunarPhase::WaxingCrescent | LunarPhase::WaningCrescent => 0.28,
            LunarPhase::FirstQuarter | LunarPhase::LastQuarter => 0.5,
            LunarPhase::WaxingGibbous | LunarPhase::WaningGibbous => 0.78,
            LunarPhase::FullMoon => 1.0,
        }
    }

    pub fn is_waning(self) -> bool {
        matches!(
            self,
            LunarPhase::WaningGibbous | LunarPhase::LastQuarter | LunarPhase::WaningCrescent
        )
    }
}

impl fmt::Display for LunarPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a lunar age fraction in `[0, 1]`.
///
/// Exactly 0 and exactly 1 are a new moon; everything else falls into the
/// first bucket whose inclusive upper bound it does not exceed.
pub fn classify_phase(fraction: f64) -> (LunarPhase, f64) {
    let phase = if fraction == 0.0 || fraction == 1.0 {
        LunarPhase::NewMoon
    } else if fraction <= 0.125 {
        LunarPhase::WaxingCrescent
    } else if fraction <= 0.25 {
        LunarPhase::FirstQuarter
    } else if fraction <= 0.375 {
        LunarPhase::WaxingGibbous
    } else if fraction <= 0.625 {
        LunarPhase::FullMoon
    } else if fraction <= 0.75 {
        LunarPhase::WaningGibbous
    } else if fraction <= 0.875 {
        LunarPhase::LastQuarter
    } else {
        LunarPhase::WaningCrescent
    };
    (phase, phase.mask_fraction())
}

/// Julian day of a wall-clock reading, taking the reading as UTC
pub fn julian_day(local: NaiveDateTime) -> f64 {
    local.and_utc().timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Position within the current synodic month, in `[0, 1)`
pub fn lunar_age_fraction(local: NaiveDateTime) -> f64 {
    let cycles = (julian_day(local) - NEW_MOON_EPOCH_JD) / SYNODIC_MONTH;
    let fraction = cycles - cycles.floor();
    if fraction < 0.0 {
        fraction + 1.0
    } else {
        fraction
    }
}

/// Lunar age in days since the last new moon
pub fn lunar_age_days(local: NaiveDateTime) -> f64 {
    lunar_age_fraction(local) * SYNODIC_MONTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn exact_ends_are_new_moon() {
        assert_eq!(classify_phase(0.0), (LunarPhase::NewMoon, 0.0));
        assert_eq!(classify_phase(1.0), (LunarPhase::NewMoon, 0.0));
    }

    #[test]
    fn midpoint_is_full_moon() {
        assert_eq!(classify_phase(0.5), (LunarPhase::FullMoon, 1.0));
    }

    #[test]
    fn upper_bounds_are_inclusive() {
        assert_eq!(classify_phase(0.125).0, LunarPhase::WaxingCrescent);
        assert_eq!(classify_phase(0.1251).0, LunarPhase::FirstQuarter);
        assert_eq!(classify_phase(0.25).0, LunarPhase::FirstQuarter);
        assert_eq!(classify_phase(0.375).0, LunarPhase::WaxingGibbous);
        assert_eq!(classify_phase(0.625).0, LunarPhase::FullMoon);
        assert_eq!(classify_phase(0.75).0, LunarPhase::WaningGibbous);
        assert_eq!(classify_phase(0.875).0, LunarPhase::LastQuarter);
        assert_eq!(classify_phase(0.8751).0, LunarPhase::WaningCrescent);
        assert_eq!(classify_phase(0.0001).0, LunarPhase::WaxingCrescent);
        assert_eq!(classify_phase(0.9999).0, LunarPhase::WaningCrescent);
    }

    #[test]
    fn late_cycle_is_waning_crescent() {
        let (phase, mask) = classify_phase(0.9);
        assert_eq!(phase.name(), "Waning Crescent");
        assert_eq!(mask, 0.28);
    }

    #[test]
    fn classification_is_repeatable() {
        for i in 0..=100 {
            let f = i as f64 / 100.0;
            assert_eq!(classify_phase(f), classify_phase(f));
        }
    }

    #[test]
    fn waning_phases() {
        let waning: Vec<_> = LunarPhase::ALL.iter().filter(|p| p.is_waning()).collect();
        assert_eq!(waning.len(), 3);
        assert!(!LunarPhase::FullMoon.is_waning());
    }

    #[test]
    fn epoch_is_new_moon() {
        let f = lunar_age_fraction(at(2000, 1, 6, 14, 24));
        assert!(f.min(1.0 - f) < 1e-6, "fraction {f}");
    }

    #[test]
    fn half_cycle_after_epoch_is_full() {
        let half = Duration::seconds((SYNODIC_MONTH / 2.0 * 86_400.0) as i64);
        let f = lunar_age_fraction(at(2000, 1, 6, 14, 24) + half);
        assert!((f - 0.5).abs() < 1e-4, "fraction {f}");
        assert_eq!(classify_phase(f).0, LunarPhase::FullMoon);
    }

    #[test]
    fn dates_before_epoch_stay_in_range() {
        let f = lunar_age_fraction(at(1969, 7, 20, 20, 17));
        assert!((0.0..1.0).contains(&f));
        let days = lunar_age_days(at(1969, 7, 20, 20, 17));
        assert!((0.0..SYNODIC_MONTH).contains(&days));
    }
}
