//! Canned drill cycles and peck-depth stepping.
//!
//! The stepper decomposes one deep hole into a sequence of intermediate
//! depths: the first peck takes the largest bite (`q_max`) and subsequent
//! pecks shrink toward `q_min`, so chip load decreases as the drill gets
//! deeper into the bore.

use std::fmt;

use millpost_core::ToolpathError;

/// The canned drilling cycles a dialect may map to controller macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillCycle {
    /// Spot drilling / center drilling (G81 lineage).
    SpotDrill,
    /// Drilling with a dwell at final depth (G82 lineage).
    DrillWithDwell,
    /// Deep-hole peck drilling with chip-break retracts (G83 lineage).
    PeckDrill,
    /// Rigid tapping (G84 lineage).
    Tap,
    /// Boring with feed-out retract (G85 lineage).
    Bore,
    /// Fine boring with oriented spindle stop (G76 lineage).
    FineBore,
}

impl DrillCycle {
    /// All cycle kinds, in persisted-schema order.
    pub fn all() -> &'static [DrillCycle] {
        &[
            DrillCycle::SpotDrill,
            DrillCycle::DrillWithDwell,
            DrillCycle::PeckDrill,
            DrillCycle::Tap,
            DrillCycle::Bore,
            DrillCycle::FineBore,
        ]
    }

    /// Stable name used as the persisted discriminant.
    pub fn as_str(&self) -> &'static str {
        match self {
            DrillCycle::SpotDrill => "spot_drill",
            DrillCycle::DrillWithDwell => "drill_with_dwell",
            DrillCycle::PeckDrill => "peck_drill",
            DrillCycle::Tap => "tap",
            DrillCycle::Bore => "bore",
            DrillCycle::FineBore => "fine_bore",
        }
    }

    /// Resolve a persisted discriminant back to the cycle kind.
    pub fn parse(name: &str) -> Result<Self, ToolpathError> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| ToolpathError::UnknownCycleKind {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for DrillCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compute the ordered Z stops of a peck-drilling motion sequence.
///
/// `start_z` is the plane the drill starts from (upper Z plus the first
/// safety distance), `final_z` the absolute hole bottom. `q_min`/`q_max`
/// bound the per-peck step size: the first peck advances by `q_max` and
/// each following peck shrinks toward `q_min`.
///
/// A hole shallower than `q_min` is not worth pecking and yields the final
/// depth as its only stop. The returned sequence is strictly decreasing and
/// always ends exactly at `final_z`.
pub fn peck_stops(start_z: f64, final_z: f64, q_min: f64, q_max: f64) -> Vec<f64> {
    debug_assert!(q_min > 0.0, "q_min must be positive, got {q_min}");
    debug_assert!(q_max > 0.0, "q_max must be positive, got {q_max}");

    let depth = start_z - final_z;
    if depth < q_min {
        return vec![final_z];
    }

    let q_delta = q_max - q_min;
    let steps = depth / q_min;
    // Degenerate peck range (q_max <= q_min): keep a constant step rather
    // than letting the decrement grow the step each round.
    let q_step = (q_delta / steps).max(0.0);

    let mut stops = Vec::new();
    let mut cur_step = q_max;
    let mut cur_z = start_z;

    while cur_z - cur_step > final_z {
        cur_z -= cur_step;
        stops.push(cur_z);
        cur_step -= q_step;
    }
    stops.push(final_z);

    stops
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_names_round_trip() {
        for c in DrillCycle::all() {
            assert_eq!(DrillCycle::parse(c.as_str()).unwrap(), *c);
        }
        assert!(DrillCycle::parse("thread_mill").is_err());
    }

    #[test]
    fn test_stops_decrease_toward_final_depth() {
        let stops = peck_stops(0.0, -10.0, 1.0, 3.0);

        // First peck takes the full q_max bite.
        assert!((stops[0] - (-3.0)).abs() < 1e-9);
        for pair in stops.windows(2) {
            assert!(pair[1] < pair[0], "stops must strictly decrease: {stops:?}");
        }
        assert_eq!(*stops.last().unwrap(), -10.0);
    }

    #[test]
    fn test_shallow_hole_single_stop() {
        assert_eq!(peck_stops(0.0, -0.5, 1.0, 3.0), vec![-0.5]);
    }

    #[test]
    fn test_degenerate_peck_range_terminates() {
        // q_max == q_min: constant pecks of 2, ending exactly at -9.
        let stops = peck_stops(0.0, -9.0, 2.0, 2.0);
        assert_eq!(stops, vec![-2.0, -4.0, -6.0, -8.0, -9.0]);

        // q_max < q_min would grow the step without the clamp.
        let stops = peck_stops(0.0, -10.0, 3.0, 1.0);
        assert_eq!(*stops.last().unwrap(), -10.0);
        for pair in stops.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }
}
