// src/math/types/point.rs
use nalgebra::{Point2 as NPoint2, Point3 as NPoint3};
use serde::{Deserialize, Serialize};
use spade::Point2 as SpadePoint2;
use std::fmt;
use std::ops::{Add, Div, Sub};

/// 2D-Punkt in der (x, z)-Ebene.
///
/// Gleichheit ist exakte Float-Gleichheit, ohne Toleranz. Alle Deduplizierungen
/// im Crate (Kanten, Randpunkte, Dreiecke) beruhen darauf.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, z: 0.0 };

    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Euklidischer Abstand (Betrag, nicht Quadrat).
    pub fn distance_to(&self, other: Point) -> f64 {
        (*self - other).magnitude()
    }

    pub fn distance_squared(&self, other: Point) -> f64 {
        let d = *self - other;
        d.x * d.x + d.z * d.z
    }

    /// Länge des Punktes als Ortsvektor.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    /// Bettet den Punkt auf fester Höhe in den 3D-Raum ein: (x, height, z).
    pub fn embed(&self, height: f64) -> NPoint3<f64> {
        NPoint3::new(self.x, height, self.z)
    }

    /// Arithmetisches Mittel; `None` für eine leere Menge.
    pub fn mean<'a, I>(points: I) -> Option<Point>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut count = 0usize;
        let sum = points.into_iter().fold(Point::ORIGIN, |acc, p| {
            count += 1;
            acc + *p
        });
        (count > 0).then(|| sum / count as f64)
    }

    /// Hash-Schlüssel mit derselben Semantik wie `==` (−0.0 wird auf +0.0 gefaltet).
    pub(crate) fn key(&self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.z + 0.0).to_bits())
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.z / rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

// Conversion traits
impl From<(f64, f64)> for Point {
    fn from((x, z): (f64, f64)) -> Self {
        Self { x, z }
    }
}

impl From<SpadePoint2<f64>> for Point {
    fn from(p: SpadePoint2<f64>) -> Self {
        Self { x: p.x, z: p.y }
    }
}

impl From<Point> for SpadePoint2<f64> {
    fn from(p: Point) -> Self {
        SpadePoint2::new(p.x, p.z)
    }
}

impl From<NPoint2<f64>> for Point {
    fn from(p: NPoint2<f64>) -> Self {
        Self { x: p.x, z: p.y }
    }
}

impl From<Point> for NPoint2<f64> {
    fn from(p: Point) -> Self {
        NPoint2::new(p.x, p.z)
    }
}

impl From<geo::Coord<f64>> for Point {
    fn from(c: geo::Coord<f64>) -> Self {
        Self { x: c.x, z: c.y }
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        geo::Coord { x: p.x, y: p.z }
    }
}
