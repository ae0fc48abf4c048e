//! Logical-to-physical coordinate mapping for two panels folded into one tall display.
//!
//! Physically, two `PANEL_W`×`PANEL_H` panels are chained into one `2·PANEL_W`×`PANEL_H`
//! strip matrix. They are mounted one above the other with the second panel upside down,
//! so logical rows `PANEL_H..2·PANEL_H` land on the right half of the strip matrix,
//! mirrored in both axes.
//!
//! ```text
//! Logical 32×16                  Physical 64×8
//! +----------------+             +----------------+----------------+
//! | upper (y < 8)  |   ------->  | upper, as is   | lower, rotated |
//! +----------------+             +----------------+----------------+
//! | lower (y >= 8) |               x 0..32          x 32..64
//! +----------------+
//! ```

use super::LedLayout;

/// Coordinate mapper for two stacked panels, the lower one rotated 180°.
///
/// All functions are `const` and total over their domain; there is no state.
pub struct StackedRemap<const PANEL_W: usize, const PANEL_H: usize>;

/// The message panel: two 32×8 panels, 32×16 logical, 64×8 physical.
pub type PanelRemap = StackedRemap<{ crate::config::PANEL_WIDTH }, { crate::config::PANEL_HEIGHT }>;

impl<const PANEL_W: usize, const PANEL_H: usize> StackedRemap<PANEL_W, PANEL_H> {
    /// Logical grid width.
    pub const LOGICAL_WIDTH: usize = PANEL_W;
    /// Logical grid height.
    pub const LOGICAL_HEIGHT: usize = PANEL_H * 2;
    /// Physical strip-matrix width.
    pub const PHYSICAL_WIDTH: usize = PANEL_W * 2;
    /// Physical strip-matrix height.
    pub const PHYSICAL_HEIGHT: usize = PANEL_H;

    /// Map a logical `(x, y)` to its physical `(x, y)`.
    ///
    /// The upper half is the identity. In the lower half:
    /// `physical_x = (PANEL_W - 1) - x + PANEL_W` and
    /// `physical_y = (PANEL_H - 1) - (y - PANEL_H)`.
    ///
    /// ```rust
    /// use message_panel::led2d::remap::PanelRemap;
    ///
    /// assert_eq!(PanelRemap::map(5, 3), (5, 3));
    /// assert_eq!(PanelRemap::map(0, 8), (63, 7));
    /// assert_eq!(PanelRemap::map(31, 15), (32, 0));
    /// ```
    #[must_use]
    pub const fn map(x: u16, y: u16) -> (u16, u16) {
        debug_assert!((x as usize) < Self::LOGICAL_WIDTH, "x out of logical range");
        debug_assert!((y as usize) < Self::LOGICAL_HEIGHT, "y out of logical range");
        let panel_w = PANEL_W as u16;
        let panel_h = PANEL_H as u16;
        if y < panel_h {
            (x, y)
        } else {
            ((panel_w - 1) - x + panel_w, (panel_h - 1) - (y - panel_h))
        }
    }

    /// Map a physical `(x, y)` back to its logical `(x, y)`. Inverse of [`Self::map`].
    ///
    /// ```rust
    /// use message_panel::led2d::remap::PanelRemap;
    ///
    /// assert_eq!(PanelRemap::unmap(63, 7), (0, 8));
    /// assert_eq!(PanelRemap::unmap(PanelRemap::map(17, 12).0, PanelRemap::map(17, 12).1), (17, 12));
    /// ```
    #[must_use]
    pub const fn unmap(physical_x: u16, physical_y: u16) -> (u16, u16) {
        debug_assert!(
            (physical_x as usize) < Self::PHYSICAL_WIDTH,
            "x out of physical range"
        );
        debug_assert!(
            (physical_y as usize) < Self::PHYSICAL_HEIGHT,
            "y out of physical range"
        );
        let panel_w = PANEL_W as u16;
        let panel_h = PANEL_H as u16;
        if physical_x < panel_w {
            (physical_x, physical_y)
        } else {
            (
                (panel_w - 1) - (physical_x - panel_w),
                (panel_h - 1) - physical_y + panel_h,
            )
        }
    }

    /// Re-index a physical strip layout into logical space.
    ///
    /// LED `i` of the result sits at the logical cell that [`Self::map`]s onto LED `i`'s
    /// physical cell. Evaluated in a `const`, a wiring mistake fails the build.
    #[must_use]
    pub const fn layout<
        const N: usize,
        const PHYSICAL_W: usize,
        const PHYSICAL_H: usize,
        const LOGICAL_W: usize,
        const LOGICAL_H: usize,
    >(
        physical: &LedLayout<N, PHYSICAL_W, PHYSICAL_H>,
    ) -> LedLayout<N, LOGICAL_W, LOGICAL_H> {
        assert!(
            PHYSICAL_W == Self::PHYSICAL_WIDTH && PHYSICAL_H == Self::PHYSICAL_HEIGHT,
            "physical layout must be two panels side by side"
        );
        assert!(
            LOGICAL_W == Self::LOGICAL_WIDTH && LOGICAL_H == Self::LOGICAL_HEIGHT,
            "logical layout must be two panels stacked"
        );

        let index_to_xy = physical.index_to_xy();
        let mut out = [(0u16, 0u16); N];
        let mut led_index = 0;
        while led_index < N {
            let (physical_x, physical_y) = index_to_xy[led_index];
            out[led_index] = Self::unmap(physical_x, physical_y);
            led_index += 1;
        }
        LedLayout::new(out)
    }
}
