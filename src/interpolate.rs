use num_traits::Float;

use crate::{math::normalize_hue, Color, Component, Space};

fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Interpolate between two hues along the shorter arc.
fn lerp_hue(a: Component, b: Component, t: Component) -> Component {
    let mut delta = b - a;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    normalize_hue(a + delta * t)
}

/// Pick the values to interpolate between. A missing component takes the
/// value of the other side, so it stays constant.
fn pair(left: Option<Component>, right: Option<Component>) -> Option<(Component, Component)> {
    match (left, right) {
        (Some(l), Some(r)) => Some((l, r)),
        (Some(l), None) => Some((l, l)),
        (None, Some(r)) => Some((r, r)),
        (None, None) => None,
    }
}

impl Color {
    /// Linearly interpolate from this color to another in the color space
    /// specified using `t` as the progress between them. Hues of polar spaces
    /// take the shorter arc.
    pub fn interpolate(&self, other: &Self, t: Component, space: Space) -> Color {
        let left = self.to_space(space);
        let right = other.to_space(space);

        let hue_index = match space {
            Space::Hsl => Some(0),
            Space::Oklch => Some(2),
            _ => None,
        };

        let channel = |index: usize, l: Option<Component>, r: Option<Component>| {
            pair(l, r).map(|(l, r)| {
                if hue_index == Some(index) {
                    lerp_hue(l, r, t)
                } else {
                    lerp(l, r, t)
                }
            })
        };

        Color::new(
            space,
            channel(0, left.c0(), right.c0()),
            channel(1, left.c1(), right.c1()),
            channel(2, left.c2(), right.c2()),
            pair(left.alpha(), right.alpha()).map(|(l, r)| lerp(l, r, t)),
        )
    }
}
