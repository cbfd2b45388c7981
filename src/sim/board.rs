//! Board layout: frame, pin field, slot dividers and floor
//!
//! The board spans x in [-width/2, width/2) with the floor top at y = 0 and
//! the ceiling at y = height. All geometry is registered with the world once.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyTag, StaticId};
use super::world::World;
use crate::settings::BoardSettings;

/// A scoring zone along the bottom of the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub index: usize,
    /// Inclusive left bound
    pub min_x: f32,
    /// Exclusive right bound
    pub max_x: f32,
    pub points: u32,
    /// Clear width between the dividers on either side
    pub pocket_width: f32,
}

impl Slot {
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        x >= self.min_x && x < self.max_x
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }
}

/// Static geometry registered with a world, plus the slot table
#[derive(Debug, Clone)]
pub struct Board {
    pub settings: BoardSettings,
    pub slots: Vec<Slot>,
    pub walls: Vec<StaticId>,
    pub pins: Vec<StaticId>,
    pub dividers: Vec<StaticId>,
    pub floor: StaticId,
}

impl Board {
    /// Generate the board and register every static body with `world`
    pub fn build(settings: &BoardSettings, world: &mut World) -> Self {
        let walls = build_frame(settings, world);
        let pins = build_pins(settings, world);
        let (slots, dividers) = build_slots(settings, world);

        let left = settings.left() - settings.wall_thickness;
        let right = settings.right() + settings.wall_thickness;
        let (back, front) = z_extent(settings);
        let floor = world.add_static_body(Body::static_box(
            Vec3::new(left, -settings.floor_thickness, back - settings.wall_thickness),
            Vec3::new(right, 0.0, front + settings.wall_thickness),
            BodyTag::Floor,
        ));

        log::info!(
            "Board {}x{}: {} pins, {} slots, {} dividers",
            settings.width,
            settings.height,
            pins.len(),
            slots.len(),
            dividers.len()
        );

        Self {
            settings: settings.clone(),
            slots,
            walls,
            pins,
            dividers,
            floor,
        }
    }

    /// The slot whose zone contains `x`
    pub fn slot_at(&self, x: f32) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.contains(x))
    }

    /// Best possible single-ball score
    pub fn jackpot(&self) -> u32 {
        self.slots.iter().map(|slot| slot.points).max().unwrap_or(0)
    }
}

fn z_extent(settings: &BoardSettings) -> (f32, f32) {
    (-settings.depth / 2.0, settings.depth / 2.0)
}

/// Left wall, right wall, ceiling, back panel and optional front glass
fn build_frame(settings: &BoardSettings, world: &mut World) -> Vec<StaticId> {
    let t = settings.wall_thickness;
    let (left, right) = (settings.left(), settings.right());
    let (back, front) = z_extent(settings);
    let bottom = -settings.floor_thickness;
    let top = settings.height;

    let mut boxes = vec![
        (
            Vec3::new(left - t, bottom, back - t),
            Vec3::new(left, top + t, front + t),
            BodyTag::Wall,
        ),
        (
            Vec3::new(right, bottom, back - t),
            Vec3::new(right + t, top + t, front + t),
            BodyTag::Wall,
        ),
        (
            Vec3::new(left - t, top, back - t),
            Vec3::new(right + t, top + t, front + t),
            BodyTag::Wall,
        ),
        (
            Vec3::new(left, bottom, back - t),
            Vec3::new(right, top, back),
            BodyTag::Wall,
        ),
    ];
    if settings.front_glass {
        boxes.push((
            Vec3::new(left, bottom, front),
            Vec3::new(right, top, front + t),
            BodyTag::Glass,
        ));
    }

    boxes
        .into_iter()
        .map(|(min, max, tag)| world.add_static_body(Body::static_box(min, max, tag)))
        .collect()
}

/// Pin centers for the grid, top row first
pub fn pin_positions(settings: &BoardSettings) -> Vec<Vec3> {
    let usable_left = settings.left() + settings.pin_margin;
    let usable_right = settings.right() - settings.pin_margin;
    if usable_right < usable_left {
        return Vec::new();
    }

    let spacing = settings.pin_col_spacing;
    let full_row = ((usable_right - usable_left) / spacing).floor() as usize + 1;
    let center = (usable_left + usable_right) / 2.0;
    let rows = ((settings.pin_max_y - settings.pin_min_y) / settings.pin_row_spacing + 1e-4).floor() as usize + 1;

    let mut positions = Vec::new();
    for row in 0..rows {
        let y = settings.pin_max_y - row as f32 * settings.pin_row_spacing;
        // Brick pattern: odd rows sit in the gaps of the even ones
        let count = if settings.staggered && row % 2 == 1 {
            full_row.saturating_sub(1)
        } else {
            full_row
        };
        let start = center - (count as f32 - 1.0) * spacing / 2.0;
        for col in 0..count {
            positions.push(Vec3::new(start + col as f32 * spacing, y, 0.0));
        }
    }
    positions
}

fn build_pins(settings: &BoardSettings, world: &mut World) -> Vec<StaticId> {
    pin_positions(settings)
        .into_iter()
        .map(|center| {
            world.add_static_body(Body::static_cylinder(
                center,
                settings.pin_radius,
                settings.pin_height,
                BodyTag::Pin,
            ))
        })
        .collect()
}

/// Points for slot `index`: outer slots take the first table entry, the
/// center slot(s) the last
pub fn slot_points(settings: &BoardSettings, index: usize) -> u32 {
    let count = settings.slot_count;
    let ring = index.min(count.saturating_sub(1).saturating_sub(index));
    let table = &settings.slot_points;
    table
        .get(ring.min(table.len().saturating_sub(1)))
        .copied()
        .unwrap_or(0)
}

/// Slot zones and the dividers between them
///
/// Zone bounds sit on divider centerlines, so the zones tile the full width.
fn build_slots(settings: &BoardSettings, world: &mut World) -> (Vec<Slot>, Vec<StaticId>) {
    let count = settings.slot_count;
    if count == 0 {
        return (Vec::new(), Vec::new());
    }
    let (left, right) = (settings.left(), settings.right());
    let (back, front) = z_extent(settings);
    let half_divider = settings.divider_width / 2.0;

    let bounds: Vec<f32> = (0..=count)
        .map(|i| {
            if i == count {
                right
            } else {
                left + settings.width * i as f32 / count as f32
            }
        })
        .collect();

    let slots = (0..count)
        .map(|i| {
            let (min_x, max_x) = (bounds[i], bounds[i + 1]);
            let inner_sides = [i > 0, i + 1 < count].iter().filter(|&&side| side).count();
            Slot {
                index: i,
                min_x,
                max_x,
                points: slot_points(settings, i),
                pocket_width: (max_x - min_x) - inner_sides as f32 * half_divider,
            }
        })
        .collect();

    let dividers = bounds[1..count]
        .iter()
        .map(|&x| {
            world.add_static_body(Body::static_box(
                Vec3::new(x - half_divider, 0.0, back),
                Vec3::new(x + half_divider, settings.divider_height, front),
                BodyTag::Divider,
            ))
        })
        .collect();

    (slots, dividers)
}
