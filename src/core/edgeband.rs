//! Edge-band geometry resolver
//!
//! Maps a part's logical edge-band spec onto the physical sides of the panel
//! as placed. The long axis is whichever placed dimension is larger, so
//! banding tracks the panel as cut, not as declared; a rotated Long2 panel
//! gets its bands on the sides that are physically long after rotation.

use std::collections::BTreeSet;

use crate::entities::layout::{SheetLayout, Side};
use crate::entities::part::EdgeSpec;

/// Resolve the physical sides to band for a placed panel
///
/// Pure and deterministic. Square panels count as landscape - the documented
/// tie-break.
pub fn resolve(width: f64, height: f64, edge: EdgeSpec) -> BTreeSet<Side> {
    let landscape = width >= height;

    let sides: &[Side] = match edge {
        EdgeSpec::None => &[],
        EdgeSpec::Full => &[Side::Top, Side::Bottom, Side::Left, Side::Right],
        EdgeSpec::Long1 => {
            if landscape {
                &[Side::Top]
            } else {
                &[Side::Left]
            }
        }
        EdgeSpec::Long2 => {
            if landscape {
                &[Side::Top, Side::Bottom]
            } else {
                &[Side::Left, Side::Right]
            }
        }
        EdgeSpec::Short1 => {
            if landscape {
                &[Side::Left]
            } else {
                &[Side::Top]
            }
        }
        EdgeSpec::Short2 => {
            if landscape {
                &[Side::Left, Side::Right]
            } else {
                &[Side::Top, Side::Bottom]
            }
        }
    };

    sides.iter().copied().collect()
}

/// Fill `banded` on every placement in the given layouts
pub fn apply_banding(layouts: &mut [SheetLayout]) {
    for layout in layouts {
        for rect in &mut layout.placed {
            rect.banded = resolve(rect.width, rect.height, rect.edge);
        }
    }
}
