//! Turns world-space measurement geometry into projected draw commands.

use super::config::OverlayConfig;
use super::palette;
use super::projection::{Projector, TextMetrics};
use super::{DrawCommand, Point2, Rgba};
use crate::measure::{
    AngleWedge, Marker, MarkerSet, MeasurementSnapshot, Point3, Selectable, TetrahedronSkeleton,
    build_wedges, decompose, layout_dimensions, resolve,
};

const LINE_WIDTH: f32 = 1.0;

/// Draw commands for one redraw of a resolved marker set.
///
/// Primitives with a point that cannot be projected are dropped; the rest of
/// the overlay is still produced.
pub fn compute_overlay<P, M>(
    markers: &MarkerSet,
    config: &OverlayConfig,
    projector: &P,
    metrics: &M,
) -> Vec<DrawCommand>
where
    P: Projector + ?Sized,
    M: TextMetrics + ?Sized,
{
    let mut builder = OverlayBuilder::new(projector);
    match markers {
        MarkerSet::Pair([from, to]) => {
            let snapshot = MeasurementSnapshot::capture(markers, config.layout.display_precision);
            builder.readout(&snapshot, config);
            draw_pair(&mut builder, from, to, config);
        }
        MarkerSet::Triangle(corners) => {
            let points = [corners[0].position, corners[1].position, corners[2].position];
            let wedges = build_wedges(points, &config.layout.wedge);
            draw_wedges(&mut builder, &wedges, config, metrics);
        }
    }
    builder.finish()
}

/// Resolves the host selection first; anything other than two or three
/// markers yields no commands.
pub fn compute_selection_overlay<'a, S, I, P, M>(
    selection: I,
    config: &OverlayConfig,
    projector: &P,
    metrics: &M,
) -> Vec<DrawCommand>
where
    S: Selectable + ?Sized + 'a,
    I: IntoIterator<Item = &'a S>,
    P: Projector + ?Sized,
    M: TextMetrics + ?Sized,
{
    match resolve(selection) {
        Some(markers) => compute_overlay(&markers, config, projector, metrics),
        None => Vec::new(),
    }
}

fn draw_pair<P: Projector + ?Sized>(
    builder: &mut OverlayBuilder<'_, P>,
    from: &Marker,
    to: &Marker,
    config: &OverlayConfig,
) {
    builder.line(&[from.position, to.position], palette::DIRECT_LINE, false);

    let skeleton = decompose(from.position, to.position);
    if config.show_axis_skeleton {
        draw_skeleton(builder, &skeleton);
    }

    if config.show_dimension_lines {
        for dimension in layout_dimensions(&skeleton, config.layout.dimension_offset) {
            for stroke in dimension.extension_strokes() {
                builder.line(&stroke, palette::DIMENSION, false);
            }
            builder.line(&dimension.reference_line(), palette::DIMENSION, false);
        }
    }
}

fn draw_skeleton<P: Projector + ?Sized>(
    builder: &mut OverlayBuilder<'_, P>,
    skeleton: &TetrahedronSkeleton,
) {
    let TetrahedronSkeleton {
        apex,
        base1,
        base2,
        base3,
    } = *skeleton;

    builder.line(&[apex, base3], palette::SKELETON_LINEAR, false);
    builder.line(&[base3, base2], palette::SKELETON_X, false);
    builder.line(&[base2, base1], palette::SKELETON_Y, false);
    builder.line(&[apex, base1], palette::SKELETON_Z, false);
    builder.line(&[apex, base2], palette::SKELETON_HELPER, true);
    builder.line(&[base1, base3], palette::SKELETON_HELPER, true);
}

fn draw_wedges<P, M>(
    builder: &mut OverlayBuilder<'_, P>,
    wedges: &[AngleWedge],
    config: &OverlayConfig,
    metrics: &M,
) where
    P: Projector + ?Sized,
    M: TextMetrics + ?Sized,
{
    for wedge in wedges {
        builder.polygon(wedge.polygon(), palette::WEDGE_FILL);
    }

    let size = config.layout.label_font_size;
    for wedge in wedges {
        let content = wedge.angle.label(config.layout.display_precision);
        let half_width = metrics.text_width(&content, size) / 2.0;
        builder.centred_label(wedge.label_anchor(), half_width, content, size);
    }
}

struct OverlayBuilder<'p, P: Projector + ?Sized> {
    projector: &'p P,
    commands: Vec<DrawCommand>,
    dropped: usize,
}

impl<'p, P: Projector + ?Sized> OverlayBuilder<'p, P> {
    fn new(projector: &'p P) -> Self {
        Self {
            projector,
            commands: Vec::new(),
            dropped: 0,
        }
    }

    fn project_all(&mut self, points: &[Point3]) -> Option<Vec<Point2>> {
        let projected: Option<Vec<Point2>> = points
            .iter()
            .map(|point| self.projector.project(*point))
            .collect();
        if projected.is_none() {
            self.dropped += 1;
        }
        projected
    }

    fn line(&mut self, points: &[Point3], color: Rgba, stippled: bool) {
        if let Some(points) = self.project_all(points) {
            self.commands.push(DrawCommand::LineStrip {
                points,
                color,
                width: LINE_WIDTH,
                stippled,
            });
        }
    }

    fn polygon(&mut self, points: &[Point3], color: Rgba) {
        if let Some(points) = self.project_all(points) {
            self.commands
                .push(DrawCommand::FilledPolygon { points, color });
        }
    }

    fn centred_label(&mut self, anchor: Point3, half_width: f64, content: String, size: f32) {
        match self.projector.project(anchor) {
            Some(position) => self.commands.push(DrawCommand::Text {
                position: Point2::new(position.x - half_width, position.y),
                content,
                size,
                right_aligned: false,
                color: palette::ANGLE_LABEL,
            }),
            None => self.dropped += 1,
        }
    }

    fn readout(&mut self, snapshot: &MeasurementSnapshot, config: &OverlayConfig) {
        let layout = &config.layout;
        let right_edge = self.projector.viewport_size().x - layout.readout_margin;
        for (line, baseline) in snapshot
            .readout_lines()
            .into_iter()
            .zip(layout.readout_baselines)
        {
            self.commands.push(DrawCommand::Text {
                position: Point2::new(right_edge, baseline),
                content: line,
                size: layout.readout_font_size,
                right_aligned: true,
                color: palette::READOUT,
            });
        }
    }

    fn finish(self) -> Vec<DrawCommand> {
        if self.dropped > 0 {
            log::warn!(
                "[overlay] dropped {} primitive(s) that could not be projected",
                self.dropped
            );
        }
        self.commands
    }
}
