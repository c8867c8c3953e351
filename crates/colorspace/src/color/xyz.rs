//! CIE 1931 XYZ color type

use super::linear_rgb::LinearRgb;

/// D65 reference white, the white point of sRGB.
pub const D65_WHITE: CieXyz = CieXyz {
    x: 0.95047,
    y: 1.0,
    z: 1.08883,
};

/// A color in CIE XYZ relative to the D65 white point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CieXyz {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CieXyz {
    /// Scale each component by the matching white-point component, so the
    /// reference white becomes (1, 1, 1).
    #[inline]
    pub fn normalized(self) -> [f32; 3] {
        [
            self.x / D65_WHITE.x,
            self.y / D65_WHITE.y,
            self.z / D65_WHITE.z,
        ]
    }
}

impl From<LinearRgb> for CieXyz {
    /// sRGB primaries to XYZ (IEC 61966-2-1, D65).
    fn from(c: LinearRgb) -> Self {
        Self {
            x: 0.4124 * c.r + 0.3576 * c.g + 0.1805 * c.b,
            y: 0.2126 * c.r + 0.7152 * c.g + 0.0722 * c.b,
            z: 0.0193 * c.r + 0.1192 * c.g + 0.9505 * c.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_maps_to_reference_white() {
        let white = CieXyz::from(LinearRgb::new(1.0, 1.0, 1.0));
        for (got, want) in white.normalized().iter().zip([1.0f32, 1.0, 1.0]) {
            assert!((got - want).abs() < 1e-3, "got {got}");
        }
    }

    #[test]
    fn test_y_is_luminance() {
        let c = LinearRgb::new(0.2, 0.5, 0.9);
        assert!((CieXyz::from(c).y - c.luminance()).abs() < 1e-6);
    }
}
