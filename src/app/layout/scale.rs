use eframe::egui::{Vec2, pos2, vec2};

use super::super::geometry::distort;
use super::PositionTable;

/// Linear map from a score domain onto a pixel range. Values outside the
/// domain are clamped so markers never leave the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct LinearScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl LinearScale {
    pub(in crate::app) fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub(in crate::app) fn map(&self, value: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() <= f32::EPSILON {
            return (r0 + r1) * 0.5;
        }

        let t = ((value - d0) / span).clamp(0.0, 1.0);
        r0 + t * (r1 - r0)
    }

    pub(in crate::app) fn pixel_bounds(&self) -> (f32, f32) {
        let (r0, r1) = self.range;
        (r0.min(r1), r0.max(r1))
    }

    pub(in crate::app) fn ticks(&self, step: f32) -> Vec<f32> {
        let (d0, d1) = self.domain;
        if step <= 0.0 || d1 < d0 {
            return Vec::new();
        }

        let mut ticks = Vec::new();
        let mut index = (d0 / step).ceil();
        loop {
            let value = index * step;
            if value > d1 + step * 1e-3 {
                break;
            }
            ticks.push(value);
            index += 1.0;
        }
        ticks
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct DistortionContext {
    pub(in crate::app) focus: f32,
    pub(in crate::app) factor: f32,
    pub(in crate::app) min: f32,
    pub(in crate::app) max: f32,
}

impl DistortionContext {
    pub(in crate::app) fn identity(min: f32, max: f32) -> Self {
        Self {
            focus: min,
            factor: 0.0,
            min,
            max,
        }
    }

    pub(in crate::app) fn focused(focus: f32, factor: f32, min: f32, max: f32) -> Self {
        Self {
            focus: focus.clamp(min, max.max(min)),
            factor,
            min,
            max,
        }
    }

    pub(in crate::app) fn is_identity(&self) -> bool {
        self.factor <= 0.0
    }

    pub(in crate::app) fn apply(&self, pixel: f32) -> f32 {
        distort(pixel, self.focus, self.factor, self.min, self.max)
    }
}

/// A scale plus the distortion currently applied on top of it. Ticks,
/// gridlines, and markers of a region all go through the same projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct AxisProjection {
    pub(in crate::app) scale: LinearScale,
    pub(in crate::app) distortion: DistortionContext,
}

impl AxisProjection {
    pub(in crate::app) fn new(scale: LinearScale) -> Self {
        let (min, max) = scale.pixel_bounds();
        Self {
            scale,
            distortion: DistortionContext::identity(min, max),
        }
    }

    /// Pixel-to-pixel projection over `[min, max]`, for regions without a
    /// score scale.
    pub(in crate::app) fn flat(min: f32, max: f32) -> Self {
        Self::new(LinearScale::new((min, max), (min, max)))
    }

    /// Projection focused on `focus` (a pixel on this axis). `None` restores
    /// the undistorted scale.
    pub(in crate::app) fn with_focus(self, focus: Option<f32>, factor: f32) -> Self {
        let (min, max) = self.scale.pixel_bounds();
        let distortion = match focus {
            Some(focus) if factor > 0.0 => DistortionContext::focused(focus, factor, min, max),
            _ => DistortionContext::identity(min, max),
        };
        Self { distortion, ..self }
    }

    pub(in crate::app) fn project(&self, value: f32) -> f32 {
        self.distortion.apply(self.scale.map(value))
    }

    pub(in crate::app) fn warp(&self, pixel: f32) -> f32 {
        self.distortion.apply(pixel)
    }

    pub(in crate::app) fn ticks(&self, step: f32) -> Vec<(f32, f32)> {
        self.scale
            .ticks(step)
            .into_iter()
            .map(|value| (value, self.project(value)))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum ScaleMode {
    SingleAxis,
    TwoAxis,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ScaleSpec {
    pub(in crate::app) padding: Vec2,
    pub(in crate::app) marker: Vec2,
    pub(in crate::app) domain: (f32, f32),
}

impl ScaleSpec {
    pub(in crate::app) fn x_scale(&self, width: f32) -> Option<LinearScale> {
        let low = self.padding.x + self.marker.x * 0.5;
        let high = width - self.padding.x - self.marker.x * 0.5;
        (high > low).then(|| LinearScale::new(self.domain, (low, high)))
    }

    pub(in crate::app) fn y_scale(&self, height: f32) -> Option<LinearScale> {
        let low = self.padding.y + self.marker.y * 0.5;
        let high = height - self.padding.y - self.marker.y * 0.5;
        (high > low).then(|| LinearScale::new(self.domain, (high, low)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct ScalePoint<'a> {
    pub(in crate::app) id: &'a str,
    pub(in crate::app) x: f32,
    pub(in crate::app) y: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct ScaleLayout {
    pub(in crate::app) positions: PositionTable,
    pub(in crate::app) x: LinearScale,
    pub(in crate::app) y: Option<LinearScale>,
    pub(in crate::app) marker: Vec2,
}

/// Places points on a shared `x` scale and, in [`ScaleMode::TwoAxis`], a
/// local y scale. Returns `None` when the region is too small to hold a
/// marker.
pub(in crate::app) fn scale_layout<'a>(
    points: impl IntoIterator<Item = ScalePoint<'a>>,
    size: Vec2,
    spec: &ScaleSpec,
    x: LinearScale,
    mode: ScaleMode,
) -> Option<ScaleLayout> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }

    let y = match mode {
        ScaleMode::SingleAxis => {
            if size.y < spec.marker.y {
                return None;
            }
            None
        }
        ScaleMode::TwoAxis => Some(spec.y_scale(size.y)?),
    };

    let points = points.into_iter().collect::<Vec<_>>();
    let mut positions = PositionTable::with_capacity(points.len());
    for point in points {
        let py = y.map_or(size.y * 0.5, |scale| scale.map(point.y));
        positions.insert(point.id, pos2(x.map(point.x), py));
    }

    Some(ScaleLayout {
        positions,
        x,
        y,
        marker: spec.marker,
    })
}

pub(in crate::app) fn scale_marker(size: Vec2, mode: ScaleMode) -> Vec2 {
    let height = match mode {
        ScaleMode::SingleAxis => (size.y * 0.45).clamp(24.0, 96.0),
        ScaleMode::TwoAxis => (size.x.min(size.y) * 0.1).clamp(24.0, 72.0),
    };
    vec2(height * 2.0 / 3.0, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ScaleSpec {
        ScaleSpec {
            padding: vec2(10.0, 10.0),
            marker: vec2(20.0, 30.0),
            domain: (1.0, 5.0),
        }
    }

    #[test]
    fn scale_padding_keeps_markers_inside() {
        let x = spec().x_scale(220.0).unwrap();
        assert_eq!(x.map(1.0), 20.0);
        assert_eq!(x.map(5.0), 200.0);
        assert_eq!(x.map(9.0), 200.0);
        assert_eq!(x.map(3.0), 110.0);
    }

    #[test]
    fn y_scale_grows_upward() {
        let y = spec().y_scale(200.0).unwrap();
        assert_eq!(y.map(1.0), 175.0);
        assert_eq!(y.map(5.0), 25.0);
        assert_eq!(y.pixel_bounds(), (25.0, 175.0));
    }

    #[test]
    fn single_axis_centers_vertically() {
        let x = spec().x_scale(220.0).unwrap();
        let layout = scale_layout(
            [
                ScalePoint { id: "a", x: 1.0, y: 5.0 },
                ScalePoint { id: "b", x: 5.0, y: 1.0 },
            ],
            vec2(220.0, 80.0),
            &spec(),
            x,
            ScaleMode::SingleAxis,
        )
        .unwrap();

        assert_eq!(layout.positions.get("a"), Some(pos2(20.0, 40.0)));
        assert_eq!(layout.positions.get("b"), Some(pos2(200.0, 40.0)));
        assert!(layout.y.is_none());
    }

    #[test]
    fn two_axis_uses_both_scores() {
        let x = spec().x_scale(220.0).unwrap();
        let layout = scale_layout(
            [ScalePoint { id: "a", x: 5.0, y: 5.0 }],
            vec2(220.0, 200.0),
            &spec(),
            x,
            ScaleMode::TwoAxis,
        )
        .unwrap();
        assert_eq!(layout.positions.get("a"), Some(pos2(200.0, 25.0)));
    }

    #[test]
    fn tiny_regions_are_rejected() {
        assert!(spec().x_scale(30.0).is_none());
        let x = spec().x_scale(220.0).unwrap();
        assert!(
            scale_layout([], vec2(220.0, 0.0), &spec(), x, ScaleMode::SingleAxis).is_none()
        );
        assert!(scale_layout([], vec2(220.0, 40.0), &spec(), x, ScaleMode::TwoAxis).is_none());
    }

    #[test]
    fn ticks_cover_the_domain() {
        let x = spec().x_scale(220.0).unwrap();
        assert_eq!(x.ticks(1.0), [1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(x.ticks(0.0), Vec::<f32>::new());
    }

    #[test]
    fn focus_and_reset_move_ticks_and_markers_together() {
        let x = spec().x_scale(220.0).unwrap();
        let flat = AxisProjection::new(x);
        let focused = flat.with_focus(Some(110.0), 3.0);

        let marker_px = x.map(3.5);
        assert_ne!(focused.warp(marker_px), marker_px);
        let tick_3_5 = focused.project(3.5);
        assert_eq!(focused.warp(marker_px), tick_3_5);

        assert_eq!(focused.project(1.0), 20.0);
        assert_eq!(focused.project(5.0), 200.0);

        let reset = focused.with_focus(None, 3.0);
        assert!(reset.distortion.is_identity());
        for (value, pixel) in reset.ticks(1.0) {
            assert_eq!(pixel, x.map(value));
        }
        assert_eq!(reset.warp(marker_px), marker_px);
    }
}
