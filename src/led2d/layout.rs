//! Compile-time description of panel geometry and wiring.
//!
//! See [`LedLayout`] for the constructors used to describe the message panel.

/// Maps the linear order of LEDs on a strip to `(x, y)` cells of a `W`×`H` grid.
///
/// Coordinates use a screen-style convention: `(0, 0)` is the top-left corner,
/// `x` increases to the right, and `y` increases downward.
///
/// Layouts are validated at **compile time** when built in a `const`:
/// - coordinates must be in-bounds
/// - every `(x, y)` cell must appear exactly once
///
/// # Example
///
/// Two 32×8 zigzag panels chained end to end form the 64×8 strip matrix. Because each
/// panel has an even number of columns, the chain is itself one serpentine, so the second
/// panel starts at the top of column 32:
///
/// ```rust
/// use message_panel::led2d::LedLayout;
///
/// const STRIP: LedLayout<512, 64, 8> = LedLayout::serpentine_column_major();
/// const _: () = assert!(STRIP.index_to_xy()[256].0 == 32); // Compile-time assert
/// assert_eq!(STRIP.index_to_xy()[255], (31, 0));
/// assert_eq!(STRIP.index_to_xy()[256], (32, 0));
/// ```
///
/// ```text
/// Column-major zigzag (3×2 example):
///   LED0  LED3  LED4
///   LED1  LED2  LED5
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedLayout<const N: usize, const W: usize, const H: usize> {
    map: [(u16, u16); N],
}

impl<const N: usize, const W: usize, const H: usize> LedLayout<N, W, H> {
    /// Return the array mapping LED wiring order to `(x, y)` coordinates.
    #[must_use]
    pub const fn index_to_xy(&self) -> &[(u16, u16); N] {
        &self.map
    }

    /// Number of columns in the layout.
    #[must_use]
    pub const fn width(&self) -> usize {
        W
    }

    /// Number of rows in the layout.
    #[must_use]
    pub const fn height(&self) -> usize {
        H
    }

    /// Total number of LEDs in the layout.
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    /// Whether the layout has no LEDs. A layout built with [`Self::new`] never does.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Invert the layout: entry `y * W + x` is the strip index of cell `(x, y)`.
    ///
    /// ```rust
    /// use message_panel::led2d::LedLayout;
    ///
    /// const MAP: LedLayout<6, 3, 2> = LedLayout::serpentine_column_major();
    /// // Row 0: LED0 LED3 LED4, row 1: LED1 LED2 LED5
    /// assert_eq!(MAP.xy_to_index(), [0, 3, 4, 1, 2, 5]);
    /// ```
    #[must_use]
    pub const fn xy_to_index(&self) -> [u16; N] {
        assert!(
            N <= u16::MAX as usize,
            "total LEDs must fit in u16 for xy_to_index"
        );

        let mut mapping = [None; N];

        let mut led_index = 0;
        while led_index < N {
            let (col, row) = self.map[led_index];
            let col = col as usize;
            let row = row as usize;
            assert!(col < W, "column out of bounds in xy_to_index");
            assert!(row < H, "row out of bounds in xy_to_index");
            let target_index = row * W + col;

            let slot = &mut mapping[target_index];
            assert!(
                slot.is_none(),
                "duplicate (col,row) in xy_to_index inversion"
            );
            *slot = Some(led_index as u16);

            led_index += 1;
        }

        let mut finalized = [0u16; N];
        let mut i = 0;
        while i < N {
            finalized[i] = match mapping[i] {
                Some(led_index) => led_index,
                None => panic!("xy_to_index requires every (col,row) to be covered"),
            };
            i += 1;
        }

        finalized
    }

    /// Const equality helper for compile-time asserts.
    #[must_use]
    pub const fn equals(&self, other: &Self) -> bool {
        let mut i = 0;
        while i < N {
            if self.map[i].0 != other.map[i].0 || self.map[i].1 != other.map[i].1 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Constructor: verifies the mapping covers every cell of the W×H grid exactly once.
    ///
    /// List `(x, y)` for each LED in the order the strip is wired.
    ///
    /// ```rust
    /// use message_panel::led2d::LedLayout;
    ///
    /// const MAP: LedLayout<6, 3, 2> =
    ///     LedLayout::new([(0, 0), (0, 1), (1, 1), (1, 0), (2, 0), (2, 1)]);
    /// const _: () = assert!(MAP.equals(&LedLayout::serpentine_column_major()));
    /// ```
    #[must_use]
    pub const fn new(map: [(u16, u16); N]) -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut seen = [false; N];

        let mut i = 0;
        while i < N {
            let (c, r) = map[i];
            let c = c as usize;
            let r = r as usize;

            assert!(c < W, "column out of bounds");
            assert!(r < H, "row out of bounds");

            let cell = r * W + c;
            assert!(!seen[cell], "duplicate (col,row) in mapping");
            seen[cell] = true;

            i += 1;
        }

        let mut k = 0;
        while k < N {
            assert!(seen[k], "mapping does not cover every cell");
            k += 1;
        }

        Self { map }
    }

    /// Column-major zigzag: column 0 runs top to bottom, column 1 bottom to top, and so on.
    ///
    /// This is the wiring of common flexible 8-row WS2812 panels.
    #[must_use]
    pub const fn serpentine_column_major() -> Self {
        assert!(W > 0 && H > 0, "W and H must be positive");
        assert!(W * H == N, "W*H must equal N");

        let mut mapping = [(0_u16, 0_u16); N];
        let mut y_index = 0;
        while y_index < H {
            let mut x_index = 0;
            while x_index < W {
                let led_index = if x_index % 2 == 0 {
                    x_index * H + y_index
                } else {
                    x_index * H + (H - 1 - y_index)
                };
                mapping[led_index] = (x_index as u16, y_index as u16);
                x_index += 1;
            }
            y_index += 1;
        }
        Self::new(mapping)
    }
}
