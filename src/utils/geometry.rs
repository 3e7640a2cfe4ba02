// src/utils/geometry.rs

pub type Point3 = [f64; 3];

/// Calculates distance between two points (Angstroms)
pub fn distance(p1: Point3, p2: Point3) -> f64 {
    norm(sub(p1, p2))
}

/// Angle between two vectors in degrees
pub fn angle_between(a: Point3, b: Point3) -> f64 {
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        return 0.0;
    }
    (dot(a, b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

pub fn add(a: Point3, b: Point3) -> Point3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: Point3, b: Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(a: Point3, s: f64) -> Point3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

pub fn dot(a: Point3, b: Point3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: Point3, b: Point3) -> Point3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn norm(a: Point3) -> f64 {
    dot(a, a).sqrt()
}

/// Unit vector along `a`, dividing by `max(|a|, eps)` so a zero vector stays zero.
pub fn normalize_or_zero(a: Point3, eps: f64) -> Point3 {
    scale(a, 1.0 / norm(a).max(eps))
}

pub fn is_finite(a: Point3) -> bool {
    a.iter().all(|v| v.is_finite())
}
