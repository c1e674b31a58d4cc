//! Navigation configuration and fixed tolerances.
//!
//! Policy
//! - The corridor margins are lot-design rules, so they live in `NavCfg` and
//!   can be overridden per call. Numeric tolerances that only guard float
//!   noise stay crate constants.

/// Paths shorter than this are treated as zero-length.
pub(crate) const ZERO_LEN_EPS: f64 = f64::EPSILON;

/// Routing and validation configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavCfg {
    /// Half-width of the travel lane no space may intrude into.
    pub path_clearance: f64,
    /// Half-width of the band a space must touch to be reachable from a path.
    pub path_accessibility: f64,
    /// Coordinate tolerance for location equality (path joints, waypoints, entrance).
    pub loc_eps: f64,
    /// Cap on backward-trace depth. `None` derives it from the lot size.
    pub max_hops: Option<usize>,
}

impl Default for NavCfg {
    fn default() -> Self {
        Self {
            path_clearance: 1.5,
            path_accessibility: 6.0,
            loc_eps: 1e-9,
            max_hops: None,
        }
    }
}
