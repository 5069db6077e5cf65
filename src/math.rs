//! Math utility functions.

use euclid::default::{Transform3D, Vector3D};

use crate::color::{Component, Components};

pub type Transform = Transform3D<Component>;

type Vector = Vector3D<Component>;

/// Build a [`Transform`] from a 3x3 matrix. Values are given column by
/// column, i.e. `m12` is multiplied with the first input component and
/// contributes to the second output component.
#[allow(clippy::too_many_arguments)]
pub const fn transform_3x3(
    m11: Component,
    m12: Component,
    m13: Component,
    m21: Component,
    m22: Component,
    m23: Component,
    m31: Component,
    m32: Component,
    m33: Component,
) -> Transform {
    Transform::new(
        m11, m12, m13, 0.0, //
        m21, m22, m23, 0.0, //
        m31, m32, m33, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Multiply the given matrix in `transform` with the 3 components.
pub fn transform(transform: &Transform, components: Components) -> Components {
    let Vector { x, y, z, .. } =
        transform.transform_vector3d(Vector::new(components.0, components.1, components.2));
    Components(x, y, z)
}

/// Returns true if the value is close enough to zero to be treated as zero.
pub fn almost_zero(value: Component) -> bool {
    value.abs() < 1.0e-5
}

/// Replace NaN values with zero.
pub fn normalize(value: Component) -> Component {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Wrap a hue in degrees into the range [0..360).
pub fn normalize_hue(hue: Component) -> Component {
    let hue = hue.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if hue >= 360.0 {
        0.0
    } else {
        hue
    }
}
