//! Contour moments and Hu-moment shape matching
//!
//! Moments are computed for the polygon whose vertices are the border
//! points (Green's theorem), so they describe the enclosed area rather
//! than the pixels on the border. From the normalized central moments
//! the seven Hu invariants are derived; they do not change under
//! translation, scaling or rotation, which makes them a cheap
//! "same glyph?" test.

use crate::ccbord::BorderPoint;

/// Hu moments below this magnitude are treated as absent.
const HU_EPSILON: f64 = 1e-5;

/// Spatial, central and normalized central moments up to order 3
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m20: f64,
    pub m11: f64,
    pub m02: f64,
    pub m30: f64,
    pub m21: f64,
    pub m12: f64,
    pub m03: f64,

    pub mu20: f64,
    pub mu11: f64,
    pub mu02: f64,
    pub mu30: f64,
    pub mu21: f64,
    pub mu12: f64,
    pub mu03: f64,

    pub nu20: f64,
    pub nu11: f64,
    pub nu02: f64,
    pub nu30: f64,
    pub nu21: f64,
    pub nu12: f64,
    pub nu03: f64,
}

impl Moments {
    /// Compute the moments of the polygon through `points`.
    ///
    /// The polygon is closed implicitly. Degenerate polygons (fewer than
    /// three distinct points, or zero area) yield all-zero moments.
    pub fn from_contour(points: &[BorderPoint]) -> Self {
        let Some(last) = points.last() else {
            return Self::default();
        };

        let (mut a00, mut a10, mut a01) = (0.0f64, 0.0f64, 0.0f64);
        let (mut a20, mut a11, mut a02) = (0.0f64, 0.0f64, 0.0f64);
        let (mut a30, mut a21, mut a12, mut a03) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);

        let (mut xp, mut yp) = (last.x as f64, last.y as f64);
        let (mut xp2, mut yp2) = (xp * xp, yp * yp);

        for p in points {
            let (x, y) = (p.x as f64, p.y as f64);
            let (x2, y2) = (x * x, y * y);
            let cross = xp * y - x * yp;
            let xs = xp + x;
            let ys = yp + y;

            a00 += cross;
            a10 += cross * xs;
            a01 += cross * ys;
            a20 += cross * (xp * xs + x2);
            a11 += cross * (xp * (ys + yp) + x * (ys + y));
            a02 += cross * (yp * ys + y2);
            a30 += cross * xs * (xp2 + x2);
            a03 += cross * ys * (yp2 + y2);
            a21 += cross * (xp2 * (3.0 * yp + y) + 2.0 * x * xp * ys + x2 * (yp + 3.0 * y));
            a12 += cross * (yp2 * (3.0 * xp + x) + 2.0 * y * yp * xs + y2 * (xp + 3.0 * x));

            xp = x;
            yp = y;
            xp2 = x2;
            yp2 = y2;
        }

        if a00.abs() <= f32::EPSILON as f64 {
            return Self::default();
        }

        // Orientation of the traversal only flips the sign.
        let sign = if a00 > 0.0 { 1.0 } else { -1.0 };
        let mut m = Moments {
            m00: a00 * sign / 2.0,
            m10: a10 * sign / 6.0,
            m01: a01 * sign / 6.0,
            m20: a20 * sign / 12.0,
            m11: a11 * sign / 24.0,
            m02: a02 * sign / 12.0,
            m30: a30 * sign / 20.0,
            m21: a21 * sign / 60.0,
            m12: a12 * sign / 60.0,
            m03: a03 * sign / 20.0,
            ..Self::default()
        };
        m.complete();
        m
    }

    /// Derive central and normalized moments from the spatial ones.
    fn complete(&mut self) {
        let inv_m00 = if self.m00.abs() > f64::EPSILON {
            1.0 / self.m00
        } else {
            0.0
        };
        let cx = self.m10 * inv_m00;
        let cy = self.m01 * inv_m00;

        self.mu20 = self.m20 - self.m10 * cx;
        self.mu11 = self.m11 - self.m10 * cy;
        self.mu02 = self.m02 - self.m01 * cy;

        self.mu30 = self.m30 - cx * (3.0 * self.mu20 + cx * self.m10);
        self.mu21 = self.m21 - cx * (2.0 * self.mu11 + cx * self.m01) - cy * self.mu20;
        self.mu12 = self.m12 - cy * (2.0 * self.mu11 + cy * self.m10) - cx * self.mu02;
        self.mu03 = self.m03 - cy * (3.0 * self.mu02 + cy * self.m01);

        let s2 = inv_m00 * inv_m00;
        let s3 = s2 * inv_m00.abs().sqrt();

        self.nu20 = self.mu20 * s2;
        self.nu11 = self.mu11 * s2;
        self.nu02 = self.mu02 * s2;
        self.nu30 = self.mu30 * s3;
        self.nu21 = self.mu21 * s3;
        self.nu12 = self.mu12 * s3;
        self.nu03 = self.mu03 * s3;
    }

    /// The seven Hu invariants.
    pub fn hu(&self) -> [f64; 7] {
        let (nu20, nu11, nu02) = (self.nu20, self.nu11, self.nu02);
        let (nu30, nu21, nu12, nu03) = (self.nu30, self.nu21, self.nu12, self.nu03);

        let mut t0 = nu30 + nu12;
        let mut t1 = nu21 + nu03;
        let q0 = t0 * t0;
        let q1 = t1 * t1;
        let n4 = 4.0 * nu11;
        let s = nu20 + nu02;
        let d = nu20 - nu02;

        let mut hu = [0.0f64; 7];
        hu[0] = s;
        hu[1] = d * d + n4 * nu11;
        hu[3] = q0 + q1;
        hu[5] = d * (q0 - q1) + n4 * t0 * t1;

        t0 *= q0 - 3.0 * q1;
        t1 *= 3.0 * q0 - q1;

        let p0 = nu30 - 3.0 * nu12;
        let p1 = 3.0 * nu21 - nu03;
        hu[2] = p0 * p0 + p1 * p1;
        hu[4] = p0 * t0 + p1 * t1;
        hu[6] = p1 * t0 - p0 * t1;
        hu
    }
}

/// Comparison formula over log-scaled Hu moments.
///
/// With `mA_i = sign(hA_i) * log10|hA_i|` (same for B), summed over the
/// invariants both shapes have:
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeMatchMethod {
    /// `sum |1/mA_i - 1/mB_i|`
    #[default]
    I1,
    /// `sum |mA_i - mB_i|`
    I2,
    /// `max |mA_i - mB_i| / |mA_i|`
    I3,
}

/// Distance between two sets of Hu moments (0 = identical).
///
/// Invariants whose magnitude is at most 1e-5 in either set are skipped.
/// If exactly one of the sets has no invariant above that magnitude the
/// shapes are considered unrelated and `f64::MAX` is returned.
pub fn match_hu(a: &[f64; 7], b: &[f64; 7], method: ShapeMatchMethod) -> f64 {
    let mut result = 0.0f64;
    let mut any_a = false;
    let mut any_b = false;

    for (&ha, &hb) in a.iter().zip(b) {
        let (ama, amb) = (ha.abs(), hb.abs());
        any_a |= ama > HU_EPSILON;
        any_b |= amb > HU_EPSILON;
        if ama <= HU_EPSILON || amb <= HU_EPSILON {
            continue;
        }
        let la = ha.signum() * ama.log10();
        let lb = hb.signum() * amb.log10();
        match method {
            ShapeMatchMethod::I1 => result += (1.0 / lb - 1.0 / la).abs(),
            ShapeMatchMethod::I2 => result += (lb - la).abs(),
            ShapeMatchMethod::I3 => {
                let rel = ((la - lb) / la).abs();
                if rel > result {
                    result = rel;
                }
            }
        }
    }

    if any_a != any_b {
        return f64::MAX;
    }
    result
}

/// Shape distance between two contours (0 = same shape).
pub fn match_shapes(a: &[BorderPoint], b: &[BorderPoint], method: ShapeMatchMethod) -> f64 {
    let ha = Moments::from_contour(a).hu();
    let hb = Moments::from_contour(b).hu();
    match_hu(&ha, &hb, method)
}
