use blueblood_shapes::ShapeKind;

/// The fixed cube, sphere, pyramid, torus rotation with a wrapping active index.
#[derive(Debug, Clone, Default)]
pub struct ShapeCycle {
    index: usize,
}

impl ShapeCycle {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> ShapeKind {
        ShapeKind::ALL[self.index]
    }

    /// Move to the next shape, wrapping at the end. Returns the new shape.
    pub fn advance(&mut self) -> ShapeKind {
        self.index = (self.index + 1) % ShapeKind::ALL.len();
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_cube() {
        let c = ShapeCycle::default();
        assert_eq!(c.index(), 0);
        assert_eq!(c.current(), ShapeKind::Cube);
    }

    #[test]
    fn index_is_k_mod_4() {
        let mut c = ShapeCycle::default();
        for k in 1..=17 {
            c.advance();
            assert_eq!(c.index(), k % 4);
        }
    }

    #[test]
    fn wraps_to_cube_after_torus() {
        let mut c = ShapeCycle::default();
        let seen: Vec<_> = (0..4).map(|_| c.advance()).collect();
        assert_eq!(
            seen,
            [
                ShapeKind::Sphere,
                ShapeKind::Pyramid,
                ShapeKind::Torus,
                ShapeKind::Cube
            ]
        );
    }
}
