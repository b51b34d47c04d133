//! Static render buffers: triangle indices and checkerboard vertex colors.

/// RGB color in `[0, 1]`.
pub type Rgb = [f32; 3];

/// Checkerboard square edge, in nodes.
pub const CHECKER_BLOCK: usize = 4;
/// Color of the even checkerboard squares.
pub const CHECKER_COLOR_A: Rgb = [0.46, 0.84, 0.92];
/// Color of the odd checkerboard squares.
pub const CHECKER_COLOR_B: Rgb = [1.0, 1.0, 1.0];

/// Index and color buffers of an `n x n` cloth.
///
/// Built once; the renderer only reads them.
#[derive(Clone, Debug)]
pub struct ClothMesh {
    indices: Vec<u32>,
    colors: Vec<Rgb>,
}

impl ClothMesh {
    /// Two triangles per grid cell, plus the checkerboard colors.
    ///
    /// `n * n` must fit in `u32`; `ClothConfig::validate` enforces this.
    pub fn new(n: usize) -> Self {
        ClothMesh { indices: triangle_indices(n), colors: checkerboard_colors(n) }
    }

    pub fn indices(&self) -> &[u32] { &self.indices }
    pub fn colors(&self) -> &[Rgb] { &self.colors }
    pub fn triangle_count(&self) -> usize { self.indices.len() / 3 }
}

/// Row-major triangle list, `(n - 1)^2 * 6` indices.
pub fn triangle_indices(n: usize) -> Vec<u32> {
    let cells = n.saturating_sub(1);
    let mut indices = Vec::with_capacity(cells * cells * 6);
    let at = |i: usize, j: usize| (i * n + j) as u32;

    for i in 0..cells {
        for j in 0..cells {
            indices.extend_from_slice(&[
                at(i, j),
                at(i + 1, j),
                at(i, j + 1),
                at(i + 1, j + 1),
                at(i, j + 1),
                at(i + 1, j),
            ]);
        }
    }
    indices
}

/// Per-node checkerboard colors in blocks of [`CHECKER_BLOCK`].
pub fn checkerboard_colors(n: usize) -> Vec<Rgb> {
    let mut colors = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            if (i / CHECKER_BLOCK + j / CHECKER_BLOCK) % 2 == 0 {
                colors.push(CHECKER_COLOR_A);
            } else {
                colors.push(CHECKER_COLOR_B);
            }
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_count() {
        let mesh = ClothMesh::new(5);
        assert_eq!(mesh.indices().len(), 4 * 4 * 6);
        assert_eq!(mesh.triangle_count(), 32);
    }

    #[test]
    fn single_cell_winding() {
        assert_eq!(triangle_indices(2), vec![0, 2, 1, 3, 1, 2]);
    }

    #[test]
    fn second_cell_offsets() {
        let indices = triangle_indices(3);
        // Cell (0, 1)
        assert_eq!(&indices[6..12], &[1, 4, 2, 5, 2, 4]);
    }

    #[test]
    fn checkerboard_blocks() {
        let colors = checkerboard_colors(8);
        assert_eq!(colors[0], CHECKER_COLOR_A);
        assert_eq!(colors[3 * 8 + 3], CHECKER_COLOR_A);
        assert_eq!(colors[4], CHECKER_COLOR_B);
        assert_eq!(colors[4 * 8], CHECKER_COLOR_B);
        assert_eq!(colors[4 * 8 + 4], CHECKER_COLOR_A);
    }
}
