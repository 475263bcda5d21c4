use vello_cpu::kurbo::{Affine, BezPath, Point, Rect};
use vello_cpu::{Pixmap, RenderContext};

use crate::paint::Color;
use crate::scene::DrawCmd;

/// `vello_cpu` front end: renders one fill command at a time onto a
/// transparent pixmap.
///
/// The context and the target pixmap are kept between calls and rebuilt only
/// when the surface size changes.
#[derive(Default)]
pub(crate) struct Rasterizer {
    ctx: Option<RenderContext>,
    target: Option<Pixmap>,
}

impl Rasterizer {
    /// Renders `cmd` alone on a `width x height` canvas and returns its
    /// premultiplied pixels, row-major. Coverage is anti-aliased.
    pub(crate) fn render(&mut self, cmd: &DrawCmd, width: u16, height: u16) -> Vec<Color> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_transform(Affine::IDENTITY);
        ctx.set_paint_transform(Affine::IDENTITY);
        cmd.paint().apply_to(&mut ctx);
        match cmd {
            DrawCmd::Rect(c) => {
                let r = c.rect.to_kurbo();
                ctx.fill_rect(&Rect::new(r.x0, r.y0, r.x1, r.y1));
            }
            _ => ctx.fill_path(&path_to_cpu(&cmd.to_path())),
        }
        ctx.flush();

        let mut target = match self.target.take() {
            Some(p) if p.width() == width && p.height() == height => p,
            _ => Pixmap::new(width, height),
        };
        target.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut target);

        let pixels = target
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| Color::from_premul_rgba8([px[0], px[1], px[2], px[3]]))
            .collect();
        self.ctx = Some(ctx);
        self.target = Some(target);
        pixels
    }
}

impl Clone for Rasterizer {
    /// Render state is scratch space; a clone starts empty.
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rasterizer").field("warm", &self.ctx.is_some()).finish()
    }
}

/// Copies a scene outline into the path type `vello_cpu` was built against.
fn path_to_cpu(path: &kurbo::BezPath) -> BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| Point::new(p.x, p.y);
    let mut out = BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
