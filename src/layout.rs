//! Pause/resume discipline for the external layout driver
//!
//! A force layout ticks on its own schedule and iterates the very
//! collections the community mutates. Every membership or edge
//! mutation therefore runs between a pause and a resume signal, so the
//! driver never observes a half-updated community.

use serde::{Deserialize, Serialize};

/// External force-layout driver, as seen by the controller.
///
/// Implementations are expected to stop scheduling ticks on `pause`
/// and restart on `resume`. Calls are balanced by [`PausedLayout`].
pub trait LayoutDriver {
    fn pause(&mut self);
    fn resume(&mut self);
}

/// RAII guard around a layout mutation.
///
/// Pauses the driver on construction and resumes it on drop, including
/// on early return, so a failed community operation cannot leave the
/// driver stopped.
pub struct PausedLayout<'a, D: LayoutDriver + ?Sized> {
    driver: &'a mut D,
}

impl<'a, D: LayoutDriver + ?Sized> PausedLayout<'a, D> {
    pub fn new(driver: &'a mut D) -> Self {
        driver.pause();
        PausedLayout { driver }
    }
}

impl<D: LayoutDriver + ?Sized> Drop for PausedLayout<'_, D> {
    fn drop(&mut self) {
        self.driver.resume();
    }
}

/// Scaling multipliers for the layout of an expanded community.
///
/// Distance and charge both scale with `sqrt(member_count)` so an
/// expanded cluster keeps a stable footprint independent of its size.
/// The multipliers are inherited tuning values with no derivation from
/// measurement, which is why they live in configuration instead of
/// being hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutScale {
    /// Link-distance multiplier for members of an expanded community
    pub distance: f64,

    /// Node-charge multiplier for members of an expanded community.
    /// Negative: members repel each other.
    pub charge: f64,
}

impl Default for LayoutScale {
    fn default() -> Self {
        LayoutScale {
            distance: 80.0,
            charge: -240.0,
        }
    }
}
