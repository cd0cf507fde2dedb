//! Library-level packing properties
//!
//! Exercises the engine contracts end to end: conservation, containment,
//! determinism, rotation discipline, and banding through real pack runs.

use cutplan::core::edgeband::apply_banding;
use cutplan::core::packing::{pack, PackSettings, RejectReason};
use cutplan::entities::layout::{Sheet, Side};
use cutplan::entities::part::{EdgeSpec, Part};

fn shop_sheet() -> Sheet {
    Sheet::new(2440.0, 1220.0)
}

fn mixed_parts() -> Vec<Part> {
    vec![
        Part::new("Side", 550.0, 800.0, 4).with_edge(EdgeSpec::Long2),
        Part::new("Bottom", 550.0, 764.0, 2).with_edge(EdgeSpec::Long1),
        Part::new("Shelf", 530.0, 760.0, 6).with_edge(EdgeSpec::Long1),
        Part::new("Drawer front", 150.0, 400.0, 3).with_edge(EdgeSpec::Full),
        Part::new("Back", 800.0, 1100.0, 1),
        Part::new("Strip", 60.0, 1000.0, 8),
    ]
}

#[test]
fn area_is_conserved_for_placed_parts() {
    let parts = mixed_parts();
    let settings = PackSettings::new(shop_sheet()).with_kerf(3.0);
    let result = pack(&parts, &settings);

    assert!(result.rejections.is_empty());
    let input: f64 = parts.iter().map(Part::total_area).sum();
    assert!((result.placed_area() - input).abs() < 1e-6);

    let instance_count: u32 = parts.iter().map(|p| p.quantity).sum();
    assert_eq!(result.placed_count(), instance_count as usize);
}

#[test]
fn footprints_are_disjoint_and_contained() {
    let kerf = 3.0;
    let settings = PackSettings::new(shop_sheet()).with_kerf(kerf);
    let result = pack(&mixed_parts(), &settings);

    for layout in &result.layouts {
        for r in &layout.placed {
            assert!(r.x >= -1e-9 && r.y >= -1e-9);
            assert!(r.x + r.width + kerf <= layout.sheet.width + 1e-9);
            assert!(r.y + r.height + kerf <= layout.sheet.height + 1e-9);
        }
        for (i, a) in layout.placed.iter().enumerate() {
            for b in layout.placed.iter().skip(i + 1) {
                let disjoint = a.x + a.width + kerf <= b.x + 1e-9
                    || b.x + b.width + kerf <= a.x + 1e-9
                    || a.y + a.height + kerf <= b.y + 1e-9
                    || b.y + b.height + kerf <= a.y + 1e-9;
                assert!(disjoint, "overlap between {} and {}", a.name, b.name);
            }
        }
    }
}

#[test]
fn identical_inputs_give_identical_layouts() {
    let settings = PackSettings::new(shop_sheet()).with_kerf(3.0);
    let a = pack(&mixed_parts(), &settings);
    let b = pack(&mixed_parts(), &settings);
    assert_eq!(a.layouts, b.layouts);
}

#[test]
fn rotation_discipline_when_disallowed() {
    let settings = PackSettings::new(shop_sheet())
        .with_kerf(3.0)
        .with_rotation(false);
    let result = pack(&mixed_parts(), &settings);
    assert!(result
        .layouts
        .iter()
        .flat_map(|l| &l.placed)
        .all(|r| !r.rotated));
}

#[test]
fn oversized_part_fails_even_with_rotation() {
    let parts = vec![Part::new("Slab", 3000.0, 1300.0, 1)];
    let result = pack(&parts, &PackSettings::new(shop_sheet()).with_rotation(true));
    assert_eq!(result.rejections[0].reason, RejectReason::PartTooLargeForSheet);
}

#[test]
fn banding_tracks_placement_orientation() {
    let parts = mixed_parts();
    let settings = PackSettings::new(shop_sheet()).with_kerf(3.0);
    let mut result = pack(&parts, &settings);
    apply_banding(&mut result.layouts);

    for rect in result.layouts.iter().flat_map(|l| &l.placed) {
        match rect.edge {
            EdgeSpec::None => assert!(rect.banded.is_empty()),
            EdgeSpec::Full => assert_eq!(rect.banded.len(), 4),
            EdgeSpec::Long2 => {
                // Both banded sides must be the physically long ones.
                if rect.width >= rect.height {
                    assert_eq!(
                        rect.banded.iter().copied().collect::<Vec<_>>(),
                        vec![Side::Top, Side::Bottom]
                    );
                } else {
                    assert_eq!(
                        rect.banded.iter().copied().collect::<Vec<_>>(),
                        vec![Side::Left, Side::Right]
                    );
                }
            }
            EdgeSpec::Long1 | EdgeSpec::Short1 => assert_eq!(rect.banded.len(), 1),
            EdgeSpec::Short2 => assert_eq!(rect.banded.len(), 2),
        }
    }
}
