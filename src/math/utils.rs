// src/math/utils.rs

/// Winkel-Hilfsfunktionen
pub mod angles {
    use crate::math::types::Point;

    /// Kompasspeilung eines Offsets in der (x, z)-Ebene: 0 entlang +z,
    /// wachsend in Richtung +x. Aufsteigend sortiert ergibt das den Uhrzeigersinn.
    pub fn bearing(offset: Point) -> f64 {
        offset.x.atan2(offset.z)
    }
}

/// Einfache Polygon-Hilfsfunktionen auf Punktlisten
pub mod simple_geometry {
    use crate::math::types::Point;

    /// Doppelte vorzeichenbehaftete Fläche von (a, b, c); positiv für CCW.
    pub fn signed_area_doubled(a: Point, b: Point, c: Point) -> f64 {
        (b.x - a.x) * (c.z - a.z) - (c.x - a.x) * (b.z - a.z)
    }

    /// Umfang eines geschlossenen Polygons
    pub fn polygon_perimeter(vertices: &[Point]) -> f64 {
        if vertices.len() < 2 {
            return 0.0;
        }
        let n = vertices.len();
        (0..n)
            .map(|i| vertices[i].distance_to(vertices[(i + 1) % n]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::types::Point;
    use approx::assert_relative_eq;

    #[test]
    fn test_bearing_is_clockwise() {
        let north = angles::bearing(Point::new(0.0, 1.0));
        let east = angles::bearing(Point::new(1.0, 0.0));
        let south = angles::bearing(Point::new(0.0, -1.0));
        let west = angles::bearing(Point::new(-1.0, 0.0));
        assert_relative_eq!(north, 0.0);
        assert!(west < north && north < east && east < south);
        assert_relative_eq!(south, std::f64::consts::PI);
    }

    #[test]
    fn test_signed_area_orientation() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(0.0, 1.0);
        assert!(simple_geometry::signed_area_doubled(a, b, c) > 0.0);
        assert!(simple_geometry::signed_area_doubled(a, c, b) < 0.0);
        assert_eq!(
            simple_geometry::signed_area_doubled(a, b, Point::new(2.0, 0.0)),
            0.0
        );
    }

    #[test]
    fn test_perimeter() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert_relative_eq!(simple_geometry::polygon_perimeter(&square), 4.0);
    }
}
