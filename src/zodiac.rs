//! Zodiac/planetary clock geometry
//!
//! Angles are in degrees, clockwise, with 0° at twelve o'clock.

use crate::clock::TimeFields;
use std::time::Duration;

pub const ZODIAC: [&str; 12] = [
    "♈", "♉", "♊", "♋", "♌", "♍", "♎", "♏", "♐", "♑", "♒", "♓",
];

pub const PLANETS: [&str; 7] = ["Sun", "Venus", "Mercury", "Moon", "Saturn", "Jupiter", "Mars"];

/// A body circling the clock face on a fixed period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbiter {
    /// Index into [`PLANETS`]
    pub planet: usize,
    pub period: Duration,
    /// Inward offset from the outermost orbit, in clock-face units
    pub inset: f64,
}

impl Orbiter {
    pub fn name(&self) -> &'static str {
        PLANETS[self.planet]
    }

    /// Orbit angle after `elapsed`
    pub fn angle(&self, elapsed: Duration) -> f64 {
        let period = self.period.as_secs_f64();
        if period <= 0.0 {
            return 0.0;
        }
        (elapsed.as_secs_f64() % period) / period * 360.0
    }
}

pub const ORBITERS: [Orbiter; 3] = [
    Orbiter {
        planet: 3,
        period: Duration::from_secs(27),
        inset: 0.0,
    },
    Orbiter {
        planet: 1,
        period: Duration::from_secs(60),
        inset: 14.0,
    },
    Orbiter {
        planet: 6,
        period: Duration::from_secs(90),
        inset: 28.0,
    },
];

/// Hand angles and highlighted planet/sign for one clock reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZodiacReading {
    pub hour_angle: f64,
    pub minute_angle: f64,
    pub second_angle: f64,
    pub active_planet: usize,
    pub active_sign: usize,
}

impl ZodiacReading {
    pub fn from_fields(t: &TimeFields) -> Self {
        Self {
            second_angle: t.second as f64 * 6.0,
            minute_angle: t.minute as f64 * 6.0 + t.second as f64 * 0.1,
            hour_angle: (t.hour % 12) as f64 * 30.0 + t.minute as f64 * 0.5,
            active_planet: (t.hour % 7) as usize,
            active_sign: (t.hour % 12) as usize,
        }
    }

    pub fn planet_name(&self) -> &'static str {
        PLANETS[self.active_planet]
    }

    pub fn sign_glyph(&self) -> &'static str {
        ZODIAC[self.active_sign]
    }
}

/// Point at `deg` on a circle of radius `r` around `(cx, cy)`, y growing downward
pub fn polar(cx: f64, cy: f64, deg: f64, r: f64) -> (f64, f64) {
    let a = (deg - 90.0).to_radians();
    (cx + a.cos() * r, cy + a.sin() * r)
}

/// Centre angle of the `i`th zodiac sector
pub fn sign_angle(i: usize) -> f64 {
    i as f64 * 30.0 + 15.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn hands_at_quarter_past_three() {
        let r = ZodiacReading::from_fields(&TimeFields::new(15, 15, 30));
        assert!(close(r.second_angle, 180.0));
        assert!(close(r.minute_angle, 93.0));
        assert!(close(r.hour_angle, 97.5));
    }

    #[test]
    fn active_planet_and_sign_follow_hour() {
        let r = ZodiacReading::from_fields(&TimeFields::new(10, 0, 0));
        assert_eq!(r.planet_name(), "Moon");
        assert_eq!(r.sign_glyph(), "♒");

        let midnight = ZodiacReading::from_fields(&TimeFields::new(0, 0, 0));
        assert_eq!(midnight.planet_name(), "Sun");
        assert_eq!(midnight.sign_glyph(), "♈");

        let late = ZodiacReading::from_fields(&TimeFields::new(23, 0, 0));
        assert_eq!(late.planet_name(), "Mercury");
        assert_eq!(late.sign_glyph(), "♓");
    }

    #[test]
    fn orbiters_wrap_their_period() {
        let moon = ORBITERS[0];
        assert_eq!(moon.name(), "Moon");
        assert!(close(moon.angle(Duration::from_millis(13_500)), 180.0));
        assert!(close(moon.angle(Duration::from_secs(27)), 0.0));
        assert!(close(ORBITERS[2].angle(Duration::from_secs(45)), 180.0));
    }

    #[test]
    fn polar_zero_points_up() {
        let (x, y) = polar(10.0, 10.0, 0.0, 5.0);
        assert!(close(x, 10.0));
        assert!(close(y, 5.0));
        let (x, y) = polar(10.0, 10.0, 90.0, 5.0);
        assert!(close(x, 15.0));
        assert!(close(y, 10.0));
    }

    #[test]
    fn sign_sectors_are_centred() {
        assert!(close(sign_angle(0), 15.0));
        assert!(close(sign_angle(11), 345.0));
    }
}
