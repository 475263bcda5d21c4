use crate::coords::{Rect, Viewport};
use crate::paint::{Color, Paint};
use crate::scene::{DrawCmd, RectCmd};

use super::rasterizer::Rasterizer;
use super::BlendOp;

/// Premultiplied RGBA raster buffer.
///
/// Writes follow canvas semantics: a fill renders a source layer that is
/// transparent outside the shape and composites it over the whole
/// destination, so unbounded operators also clear pixels the shape does not
/// touch. Dimensions are capped at `u16::MAX`, the largest `vello_cpu` target.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    raster: Rasterizer,
}

impl Surface {
    /// Creates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width.min(u32::from(u16::MAX)), height.min(u32::from(u16::MAX)));
        Self {
            width,
            height,
            pixels: vec![Color::transparent(); width as usize * height as usize],
            raster: Rasterizer::default(),
        }
    }

    /// Creates a transparent surface covering `viewport`.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let (w, h) = viewport.pixel_size();
        Self::new(w, h)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Alpha at `(x, y)`; zero outside the surface.
    #[inline]
    pub fn alpha_at(&self, x: u32, y: u32) -> f32 {
        self.pixel(x, y).map_or(0.0, |c| c.a)
    }

    /// Sum of alpha over every pixel. A cheap measure of revealed area.
    pub fn total_alpha(&self) -> f32 {
        self.pixels.iter().map(|c| c.a).sum()
    }

    pub fn is_transparent(&self) -> bool {
        self.pixels.iter().all(|c| c.a <= 0.0)
    }

    /// Resizes to `viewport`, discarding the content.
    pub fn resize(&mut self, viewport: Viewport) {
        let (w, h) = viewport.pixel_size();
        if (w, h) != (self.width, self.height) {
            *self = Self::new(w, h);
        }
    }

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(Color::transparent());
    }

    /// Fills `cmd` using `op`.
    pub fn draw(&mut self, cmd: &DrawCmd, op: BlendOp) {
        if self.pixels.is_empty() {
            return;
        }
        // Both sides were capped by `new`.
        let pixels = self.raster.render(cmd, self.width as u16, self.height as u16);
        let layer = Surface { width: self.width, height: self.height, pixels, raster: Rasterizer::default() };
        self.composite(&layer, op);
    }

    /// Composites `src` onto this surface with [`compose`], keeping the
    /// surface's render state.
    pub fn composite(&mut self, src: &Surface, op: BlendOp) {
        self.pixels = compose(self, src, op).pixels;
    }

    /// Fills the whole surface with `paint`.
    pub fn fill_all(&mut self, paint: &Paint, op: BlendOp) {
        let cmd = DrawCmd::Rect(RectCmd::new(self.bounds(), paint.clone()));
        self.draw(&cmd, op);
    }

    /// Straight-alpha RGBA bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl PartialEq for Surface {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.pixels == other.pixels
    }
}

/// Pure Porter-Duff step: returns `dst` with every pixel replaced by
/// `op.apply(src, dst)`. Neither input changes.
///
/// Both surfaces are anchored at the origin. Where `src` is smaller, the
/// missing pixels count as transparent, which matters for unbounded operators.
pub fn compose(dst: &Surface, src: &Surface, op: BlendOp) -> Surface {
    let mut out = Surface {
        width: dst.width,
        height: dst.height,
        pixels: dst.pixels.clone(),
        raster: Rasterizer::default(),
    };
    let (w, h) = if op.is_bounded() {
        (dst.width.min(src.width), dst.height.min(src.height))
    } else {
        (dst.width, dst.height)
    };
    for y in 0..h {
        for x in 0..w {
            let s = src.pixel(x, y).unwrap_or_default();
            let i = out.index(x, y);
            out.pixels[i] = op.apply(s, out.pixels[i]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::RadialGradient;
    use crate::scene::{CircleCmd, PolygonCmd};

    const STEP: f32 = 1.0 / 255.0;

    fn black_rect(x: f32, y: f32, w: f32, h: f32) -> DrawCmd {
        DrawCmd::Rect(RectCmd::new(Rect::new(x, y, w, h), Paint::Solid(Color::black())))
    }

    fn black_poly(points: &[(f32, f32)]) -> DrawCmd {
        PolygonCmd::new(points.iter().map(|&(x, y)| Vec2::new(x, y)).collect(), Paint::Solid(Color::black())).into()
    }

    fn solid_surface(w: u32, h: u32) -> Surface {
        let mut s = Surface::new(w, h);
        s.fill_all(&Paint::Solid(Color::black()), BlendOp::SourceOver);
        s
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn grid_aligned_rect_has_exact_coverage() {
        let mut s = Surface::new(8, 8);
        s.draw(&black_rect(2.0, 2.0, 3.0, 3.0), BlendOp::SourceOver);
        assert_eq!(s.alpha_at(2, 2), 1.0);
        assert_eq!(s.alpha_at(4, 4), 1.0);
        assert_eq!(s.alpha_at(5, 5), 0.0);
        assert_eq!(s.alpha_at(1, 2), 0.0);
    }

    #[test]
    fn circle_edge_is_anti_aliased() {
        let mut s = Surface::new(20, 20);
        let cmd = CircleCmd::new(Vec2::new(10.0, 10.0), 5.0, Paint::Solid(Color::black()));
        s.draw(&cmd.into(), BlendOp::SourceOver);
        assert_eq!(s.alpha_at(10, 10), 1.0);
        assert_eq!(s.alpha_at(12, 9), 1.0);
        assert_eq!(s.alpha_at(14, 14), 0.0);
        let rim = s.alpha_at(14, 10);
        assert!(rim > 0.0 && rim < 1.0, "rim alpha {rim}");
    }

    #[test]
    fn polygon_fill_respects_concave_notch() {
        let mut s = Surface::new(10, 10);
        // U shape opening upwards.
        let u = black_poly(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 7.0),
            (7.0, 7.0),
            (7.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
        ]);
        s.draw(&u, BlendOp::SourceOver);
        assert_eq!(s.alpha_at(5, 3), 0.0);
        assert_eq!(s.alpha_at(5, 8), 1.0);
        assert_eq!(s.alpha_at(1, 3), 1.0);
    }

    #[test]
    fn clockwise_polygon_still_fills() {
        let mut s = Surface::new(10, 10);
        s.draw(&black_poly(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]), BlendOp::SourceOver);
        assert_eq!(s.alpha_at(5, 5), 1.0);
    }

    #[test]
    fn source_in_fill_clears_outside_shape() {
        let mut s = solid_surface(10, 10);
        s.draw(&black_rect(0.0, 0.0, 5.0, 10.0), BlendOp::SourceIn);
        assert_eq!(s.alpha_at(2, 5), 1.0);
        assert_eq!(s.alpha_at(7, 5), 0.0);
    }

    #[test]
    fn source_in_gradient_intersects_polygon() {
        let mut s = Surface::new(20, 20);
        s.draw(&black_poly(&[(0.0, 0.0), (20.0, 0.0), (0.0, 20.0)]), BlendOp::SourceOver);
        let g = RadialGradient::falloff(Vec2::new(10.0, 10.0), 4.0, 8.0, Color::black(), Color::transparent());
        s.draw(
            &CircleCmd::new(Vec2::new(10.0, 10.0), 8.0, Paint::RadialGradient(g)).into(),
            BlendOp::SourceIn,
        );
        // Inside both.
        assert_eq!(s.alpha_at(8, 8), 1.0);
        // Inside the circle, outside the triangle.
        assert_eq!(s.alpha_at(12, 12), 0.0);
        // Inside the triangle, outside the circle.
        assert_eq!(s.alpha_at(1, 1), 0.0);
    }

    #[test]
    fn falloff_fades_across_the_band() {
        let mut s = Surface::new(40, 40);
        let g = RadialGradient::falloff(Vec2::new(20.0, 20.0), 4.0, 12.0, Color::black(), Color::transparent());
        s.draw(
            &CircleCmd::new(Vec2::new(20.0, 20.0), 12.0, Paint::RadialGradient(g)).into(),
            BlendOp::SourceOver,
        );
        assert_eq!(s.alpha_at(21, 20), 1.0);
        let mid = s.alpha_at(27, 20);
        assert!(mid > 0.2 && mid < 0.8, "mid-band alpha {mid}");
        let mut prev = 1.0;
        for x in 20..34 {
            let a = s.alpha_at(x, 20);
            assert!(a <= prev + STEP, "alpha rises at x = {x}");
            prev = a;
        }
        assert_eq!(s.alpha_at(34, 20), 0.0);
    }

    #[test]
    fn hard_edged_falloff_is_a_solid_disc() {
        let mut s = Surface::new(20, 20);
        let g = RadialGradient::falloff(Vec2::new(10.0, 10.0), 6.0, 6.0, Color::black(), Color::transparent());
        s.draw(
            &CircleCmd::new(Vec2::new(10.0, 10.0), 6.0, Paint::RadialGradient(g)).into(),
            BlendOp::SourceOver,
        );
        assert_eq!(s.alpha_at(14, 10), 1.0);
        assert_eq!(s.alpha_at(17, 10), 0.0);
    }

    #[test]
    fn offscreen_bounded_fill_is_noop() {
        let mut s = Surface::new(4, 4);
        s.draw(&black_rect(10.0, 10.0, 2.0, 2.0), BlendOp::SourceOver);
        assert!(s.is_transparent());
    }

    // ── compose ───────────────────────────────────────────────────────────

    #[test]
    fn destination_out_cuts_stencil() {
        let mut dst = solid_surface(6, 6);
        let mut stencil = Surface::new(6, 6);
        stencil.draw(&black_rect(0.0, 0.0, 3.0, 6.0), BlendOp::SourceOver);
        let out = compose(&dst, &stencil, BlendOp::DestinationOut);
        assert_eq!(out.alpha_at(1, 1), 0.0);
        assert_eq!(out.alpha_at(4, 1), 1.0);
        // Inputs untouched.
        assert_eq!(dst.alpha_at(1, 1), 1.0);
        assert_eq!(stencil.alpha_at(1, 1), 1.0);
    }

    #[test]
    fn unbounded_composite_clears_beyond_smaller_source() {
        let mut dst = solid_surface(6, 6);
        let src = solid_surface(3, 3);
        dst.composite(&src, BlendOp::SourceIn);
        assert_eq!(dst.alpha_at(1, 1), 1.0);
        assert_eq!(dst.alpha_at(5, 5), 0.0);
    }

    #[test]
    fn rgba8_export_is_straight_alpha() {
        let mut s = Surface::new(1, 1);
        s.fill_all(&Paint::Solid(Color::from_srgb_u8(255, 0, 0, 128)), BlendOp::Copy);
        assert_eq!(s.to_rgba8(), vec![255, 0, 0, 128]);
    }

    #[test]
    fn clones_compare_by_pixels() {
        let mut a = Surface::new(4, 4);
        a.draw(&black_rect(0.0, 0.0, 2.0, 2.0), BlendOp::SourceOver);
        let b = a.clone();
        assert_eq!(a, b);
        a.clear();
        assert_ne!(a, b);
    }
}
