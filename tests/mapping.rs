#![allow(missing_docs)]
//! Host-level tests for strip layouts.

use message_panel::config::{LED_COUNT, LOGICAL_LAYOUT, PHYSICAL_LAYOUT};
use message_panel::led2d::{LedLayout, remap::PanelRemap};

#[test]
fn explicit_layout_keeps_order() {
    const LINEAR: LedLayout<4, 4, 1> = LedLayout::new([(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(LINEAR.index_to_xy(), &[(0, 0), (1, 0), (2, 0), (3, 0)]);
    assert_eq!(LINEAR.width(), 4);
    assert_eq!(LINEAR.height(), 1);
    assert_eq!(LINEAR.len(), 4);
    assert!(!LINEAR.is_empty());
}

#[test]
fn serpentine_column_major_alternates_direction() {
    const SERPENTINE: LedLayout<6, 3, 2> = LedLayout::serpentine_column_major();
    assert_eq!(
        SERPENTINE.index_to_xy(),
        &[(0, 0), (0, 1), (1, 1), (1, 0), (2, 0), (2, 1)]
    );
}

#[test]
fn serpentine_panel_columns() {
    const PANEL: LedLayout<256, 32, 8> = LedLayout::serpentine_column_major();
    let map = PANEL.index_to_xy();
    assert_eq!(map[0], (0, 0));
    assert_eq!(map[7], (0, 7));
    assert_eq!(map[8], (1, 7));
    assert_eq!(map[15], (1, 0));
    assert_eq!(map[16], (2, 0));
    assert_eq!(map[255], (31, 0));
}

#[test]
fn xy_to_index_inverts_index_to_xy() {
    let xy_to_index = PHYSICAL_LAYOUT.xy_to_index();
    for (led_index, &(x, y)) in PHYSICAL_LAYOUT.index_to_xy().iter().enumerate() {
        let cell = usize::from(y) * PHYSICAL_LAYOUT.width() + usize::from(x);
        assert_eq!(usize::from(xy_to_index[cell]), led_index);
    }
}

#[test]
fn logical_layout_matches_strip_wiring() {
    let logical = LOGICAL_LAYOUT.index_to_xy();
    // Upper panel: strip order unchanged.
    assert_eq!(logical[0], (0, 0));
    assert_eq!(logical[7], (0, 7));
    assert_eq!(logical[255], (31, 0));
    // Lower panel, upside down: its first LED is the bottom-right logical cell.
    assert_eq!(logical[256], (31, 15));
    assert_eq!(logical[263], (31, 8));
    assert_eq!(logical[264], (30, 8));
    assert_eq!(logical[LED_COUNT - 1], (0, 15));
}

#[test]
fn logical_layout_agrees_with_remap_for_every_led() {
    let physical = PHYSICAL_LAYOUT.index_to_xy();
    for (led_index, &(x, y)) in LOGICAL_LAYOUT.index_to_xy().iter().enumerate() {
        assert_eq!(PanelRemap::map(x, y), physical[led_index], "LED {led_index}");
    }
}

#[test]
#[should_panic(expected = "duplicate")]
fn duplicate_cells_are_rejected() {
    let _ = LedLayout::<2, 2, 1>::new([(0, 0), (0, 0)]);
}
