/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3};
use std::io::Write;
use twig_core::{Camera, Mesh, Segment, Triangle};

/// Character luminosity ramp for surface shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// What last wrote a cell; decides its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Empty,
    Ground,
    Stage,
    Tree,
}

impl Layer {
    fn color(self) -> Color {
        match self {
            Layer::Empty => Color::Reset,
            Layer::Ground => Color::DarkGrey,
            Layer::Stage => Color::Grey,
            Layer::Tree => Color::Green,
        }
    }
}

/// ASCII renderer that converts scene geometry to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    layer_buffer: Vec<Layer>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            layer_buffer: vec![Layer::Empty; size],
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.layer_buffer.fill(Layer::Empty);
    }

    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    pub fn layer_at(&self, x: usize, y: usize) -> Layer {
        self.layer_buffer[y * self.width + x]
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, model_matrix: &Matrix4<f32>, camera: &Camera) {
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model_matrix, camera);
        }
    }

    pub fn render_segments(
        &mut self,
        segments: &[Segment],
        layer: Layer,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) {
        for segment in segments {
            self.render_segment(segment, layer, model_matrix, camera);
        }
    }

    fn project(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) -> Option<(f32, f32, f32)> {
        camera.project_to_screen(point, model_matrix, self.width as u32, self.height as u32)
    }

    fn render_triangle(&mut self, triangle: &Triangle, model_matrix: &Matrix4<f32>, camera: &Camera) {
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match self.project(&vertex.position, model_matrix, camera) {
                Some(coord) => *slot = coord,
                None => return, // Triangle is clipped
            }
        }

        // Shade by how squarely the face meets the camera
        let normal = model_matrix.transform_vector(&triangle.calculate_normal());
        let light_dir = (camera.position - camera.target).normalize();
        let brightness = normal.dot(&light_dir).abs();

        // Keep the ground dim so lines stay readable over it
        let top = (LUMINOSITY_RAMP.len() - 1) / 2;
        let char_index = ((brightness * top as f32) as usize).clamp(1, top);
        let character = LUMINOSITY_RAMP[char_index];

        self.rasterize_triangle(&screen_coords, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box, clipped to screen bounds
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x, y, depth, character, Layer::Ground);
                    }
                }
            }
        }
    }

    fn render_segment(
        &mut self,
        segment: &Segment,
        layer: Layer,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) {
        let (Some(a), Some(b)) = (
            self.project(&segment.start, model_matrix, camera),
            self.project(&segment.end, model_matrix, camera),
        ) else {
            return;
        };

        let character = line_char(b.0 - a.0, b.1 - a.1);
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;

        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = (a.0 + (b.0 - a.0) * t).floor() as i32;
            let y = (a.1 + (b.1 - a.1) * t).floor() as i32;
            // Lines sit slightly in front of surfaces at the same depth
            let depth = a.2 + (b.2 - a.2) * t - 1e-4;
            self.plot(x, y, depth, character, layer);
        }
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, character: char, layer: Layer) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
            self.layer_buffer[idx] = layer;
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.layer_buffer[idx].color()))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Glyph approximating a screen-space direction (y grows downward)
fn line_char(dx: f32, dy: f32) -> char {
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_chars() {
        assert_eq!(line_char(10.0, 0.0), '-');
        assert_eq!(line_char(0.0, -10.0), '|');
        assert_eq!(line_char(5.0, -5.0), '/');
        assert_eq!(line_char(5.0, 5.0), '\\');
    }

    #[test]
    fn test_vertical_trunk_draws_through_center() {
        let camera = Camera::new(80, 24);
        let mut renderer = AsciiRenderer::new(80, 24);
        let trunk = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 10.0, 0.0));

        renderer.render_segments(&[trunk], Layer::Tree, &Matrix4::identity(), &camera);

        let hit = (39..=41).find(|&x| renderer.char_at(x, 12) == '|');
        assert!(hit.is_some());
        assert_eq!(renderer.layer_at(hit.unwrap(), 12), Layer::Tree);
        assert_eq!(renderer.char_at(5, 12), ' ');
    }

    #[test]
    fn test_clear_resets_cells() {
        let camera = Camera::new(40, 20);
        let mut renderer = AsciiRenderer::new(40, 20);
        let s = Segment::new(Point3::new(-3.0, 5.0, 0.0), Point3::new(3.0, 5.0, 0.0));
        renderer.render_segments(&[s], Layer::Stage, &Matrix4::identity(), &camera);
        renderer.clear();
        assert!((0..20).all(|y| (0..40).all(|x| renderer.layer_at(x, y) == Layer::Empty)));
    }

    #[test]
    fn test_barycentric_degenerate() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
        let (w0, w1, w2) =
            barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
    }
}
