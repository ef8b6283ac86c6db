//! Fullscreen quad geometry.

use bytemuck::{Pod, Zeroable};

/// One clip-space corner of the fullscreen quad.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

const fn corner(x: f32, y: f32) -> QuadVertex {
    QuadVertex { position: [x, y] }
}

/// Two triangles covering the whole [-1, 1] x [-1, 1] clip square.
pub const SCREEN_QUAD: [QuadVertex; 6] = [
    // top triangle
    corner(1.0, 1.0),
    corner(-1.0, 1.0),
    corner(-1.0, -1.0),
    // bottom triangle
    corner(1.0, 1.0),
    corner(-1.0, -1.0),
    corner(1.0, -1.0),
];

impl QuadVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_area(a: QuadVertex, b: QuadVertex, c: QuadVertex) -> f32 {
        let [ax, ay] = a.position;
        let [bx, by] = b.position;
        let [cx, cy] = c.position;
        ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay)) * 0.5
    }

    #[test]
    fn test_quad_covers_clip_square() {
        let total: f32 = SCREEN_QUAD
            .chunks_exact(3)
            .map(|t| signed_area(t[0], t[1], t[2]).abs())
            .sum();
        assert_eq!(total, 4.0);

        for v in SCREEN_QUAD {
            assert!(v.position.iter().all(|c| c.abs() == 1.0));
        }
    }

    #[test]
    fn test_triangles_share_winding() {
        let first = signed_area(SCREEN_QUAD[0], SCREEN_QUAD[1], SCREEN_QUAD[2]);
        let second = signed_area(SCREEN_QUAD[3], SCREEN_QUAD[4], SCREEN_QUAD[5]);
        assert!(first > 0.0 && second > 0.0);
    }

    #[test]
    fn test_vertex_layout() {
        let layout = QuadVertex::layout();
        assert_eq!(layout.array_stride, 8);
        assert_eq!(bytemuck::cast_slice::<_, u8>(&SCREEN_QUAD).len(), 48);
    }
}
