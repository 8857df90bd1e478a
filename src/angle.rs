//! Angular helpers for mapping the osu! playfield onto a circle
//!
//! Angles are in degrees. 0° points straight up from the playfield centre and
//! angles grow clockwise on screen (y grows downward).

use rosu_map::util::Pos;

/// osu! standard playfield dimensions
pub const PLAYFIELD_WIDTH: f32 = 512.0;
pub const PLAYFIELD_HEIGHT: f32 = 384.0;

/// Centre of the playfield, the pivot for every converted angle
pub const PLAYFIELD_CENTRE: Pos = Pos {
    x: PLAYFIELD_WIDTH / 2.0,
    y: PLAYFIELD_HEIGHT / 2.0,
};

/// Wrap an angle into [0, 360)
pub fn normalize_angle(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Angle of a playfield position around the playfield centre, in [0, 360)
pub fn hit_object_angle(pos: Pos) -> f32 {
    let dx = PLAYFIELD_CENTRE.x - pos.x;
    let dy = PLAYFIELD_CENTRE.y - pos.y;
    normalize_angle(dy.atan2(dx).to_degrees() - 90.0)
}

/// Signed shortest arc going from `from` to `to`, in (-180, 180]
///
/// Positive values are clockwise.
pub fn delta_angle(to: f32, from: f32) -> f32 {
    let diff = (to - from).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Linearly remap `value` from [from_lo, from_hi] to [to_lo, to_hi]
pub fn remap(value: f32, from_lo: f32, from_hi: f32, to_lo: f32, to_hi: f32) -> f32 {
    to_lo + (value - from_lo) * (to_hi - to_lo) / (from_hi - from_lo)
}
