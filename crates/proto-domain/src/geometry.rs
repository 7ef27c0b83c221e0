//! Geometría plana mínima para posiciones de átomos y centros de polímeros.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Vec2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn add(&self, other: &Vec2) -> Vec2 {
        Vec2 { x: self.x + other.x,
               y: self.y + other.y }
    }

    pub fn sub(&self, other: &Vec2) -> Vec2 {
        Vec2 { x: self.x - other.x,
               y: self.y - other.y }
    }
}

/// Centroide de un conjunto de posiciones. Retorna el origen si está vacío.
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::default();
    }
    let n = points.len() as f64;
    let sum = points.iter().fold(Vec2::default(), |acc, p| acc.add(p));
    Vec2 { x: sum.x / n, y: sum.y / n }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a.distance(&b), 5.0);
        assert_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn centroid_of_empty_is_origin() {
        assert_eq!(centroid(&[]), Vec2::default());
    }
}
