//! The drawing surface the turtle drives, a scoped save/restore guard, and
//! an in-memory surface that records everything drawn on it.

use crate::turtle::Color;
use bevy_math::Rect;
use bevy_math::primitives::Triangle2d;
use glam::{Affine2, Vec2};
use std::ops::{Deref, DerefMut};
use tracing::trace;

/// A 2D drawing context with a transform and style stack.
///
/// All coordinates are in the context's current local frame. `save_state` /
/// `restore_state` must capture transform and style together. A restore with
/// nothing saved should be a no-op.
pub trait DrawContext {
    fn draw_line(&mut self, from: Vec2, to: Vec2);
    fn set_stroke_color(&mut self, color: &Color);
    fn set_stroke_weight(&mut self, weight: f32);
    /// Disables outlines until the next `set_stroke_color`.
    fn no_stroke(&mut self);
    fn fill(&mut self, color: &Color);
    fn draw_triangle(&mut self, triangle: Triangle2d);
    fn translate(&mut self, offset: Vec2);
    /// Rotates the local frame by `angle` radians.
    fn rotate(&mut self, angle: f32);
    fn save_state(&mut self);
    fn restore_state(&mut self);
}

impl<T: DrawContext + ?Sized> DrawContext for &mut T {
    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        (**self).draw_line(from, to)
    }
    fn set_stroke_color(&mut self, color: &Color) {
        (**self).set_stroke_color(color)
    }
    fn set_stroke_weight(&mut self, weight: f32) {
        (**self).set_stroke_weight(weight)
    }
    fn no_stroke(&mut self) {
        (**self).no_stroke()
    }
    fn fill(&mut self, color: &Color) {
        (**self).fill(color)
    }
    fn draw_triangle(&mut self, triangle: Triangle2d) {
        (**self).draw_triangle(triangle)
    }
    fn translate(&mut self, offset: Vec2) {
        (**self).translate(offset)
    }
    fn rotate(&mut self, angle: f32) {
        (**self).rotate(angle)
    }
    fn save_state(&mut self) {
        (**self).save_state()
    }
    fn restore_state(&mut self) {
        (**self).restore_state()
    }
}

impl<T: DrawContext + ?Sized> DrawContext for Box<T> {
    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        (**self).draw_line(from, to)
    }
    fn set_stroke_color(&mut self, color: &Color) {
        (**self).set_stroke_color(color)
    }
    fn set_stroke_weight(&mut self, weight: f32) {
        (**self).set_stroke_weight(weight)
    }
    fn no_stroke(&mut self) {
        (**self).no_stroke()
    }
    fn fill(&mut self, color: &Color) {
        (**self).fill(color)
    }
    fn draw_triangle(&mut self, triangle: Triangle2d) {
        (**self).draw_triangle(triangle)
    }
    fn translate(&mut self, offset: Vec2) {
        (**self).translate(offset)
    }
    fn rotate(&mut self, angle: f32) {
        (**self).rotate(angle)
    }
    fn save_state(&mut self) {
        (**self).save_state()
    }
    fn restore_state(&mut self) {
        (**self).restore_state()
    }
}

/// A saved context state that is restored when the scope is dropped.
///
/// Nested saves opened through [`save`](Self::save) are tracked; any still
/// open on drop are restored before the outer one. Restores are always
/// forwarded to the context, so a stray restore can release the outer save
/// early.
pub struct ContextScope<'a, C: DrawContext + ?Sized> {
    ctx: &'a mut C,
    depth: usize,
}

impl<'a, C: DrawContext + ?Sized> ContextScope<'a, C> {
    /// Saves the context state and returns the guard that restores it.
    pub fn enter(ctx: &'a mut C) -> Self {
        ctx.save_state();
        Self { ctx, depth: 0 }
    }

    /// Opens a nested save inside this scope.
    pub fn save(&mut self) {
        self.ctx.save_state();
        self.depth += 1;
    }

    /// Passes a restore through to the context.
    ///
    /// Returns true when it closed a nested save opened by [`save`](Self::save).
    /// With no nested save open the restore still reaches the context, which
    /// then pops the scope's own save (or nothing, if that is already gone);
    /// the restore issued on drop is then a no-op for the context.
    pub fn restore(&mut self) -> bool {
        self.ctx.restore_state();
        if self.depth == 0 {
            return false;
        }
        self.depth -= 1;
        true
    }

    /// Number of nested saves currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl<C: DrawContext + ?Sized> Deref for ContextScope<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.ctx
    }
}

impl<C: DrawContext + ?Sized> DerefMut for ContextScope<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.ctx
    }
}

impl<C: DrawContext + ?Sized> Drop for ContextScope<'_, C> {
    fn drop(&mut self) {
        for _ in 0..self.depth {
            self.ctx.restore_state();
        }
        self.ctx.restore_state();
    }
}

/// Stroke and fill settings captured by a save.
#[derive(Clone, Debug, PartialEq)]
pub struct PenStyle {
    /// `None` after `no_stroke`.
    pub stroke: Option<Color>,
    pub stroke_weight: f32,
    pub fill: Option<Color>,
}

impl Default for PenStyle {
    fn default() -> Self {
        Self {
            stroke: Some(Color::gray(0.0)),
            stroke_weight: 1.0,
            fill: None,
        }
    }
}

/// One call made against a [`RecordingCanvas`], in local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Line { from: Vec2, to: Vec2 },
    StrokeColor(Color),
    StrokeWeight(f32),
    NoStroke,
    Fill(Color),
    Triangle([Vec2; 3]),
    Translate(Vec2),
    Rotate(f32),
    Save,
    Restore,
}

/// A line drawn on a [`RecordingCanvas`], in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Option<Color>,
    pub weight: f32,
}

/// A filled triangle drawn on a [`RecordingCanvas`], in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct FilledTriangle {
    pub vertices: [Vec2; 3],
    pub fill: Option<Color>,
}

/// An in-memory [`DrawContext`] that records calls and resolves geometry
/// into world space with a glam [`Affine2`] transform stack.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    transform: Affine2,
    style: PenStyle,
    stack: Vec<(Affine2, PenStyle)>,
    ops: Vec<DrawOp>,
    segments: Vec<Segment>,
    triangles: Vec<FilledTriangle>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            style: PenStyle::default(),
            stack: Vec::new(),
            ops: Vec::new(),
            segments: Vec::new(),
            triangles: Vec::new(),
        }
    }
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far, in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn triangles(&self) -> &[FilledTriangle] {
        &self.triangles
    }

    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    pub fn style(&self) -> &PenStyle {
        &self.style
    }

    /// Number of saved states not yet restored.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Counts recorded ops matching `pred`.
    pub fn count_ops(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// The world-space bounding box of every segment drawn, if any.
    pub fn bounds(&self) -> Option<Rect> {
        self.segments.iter().fold(None, |acc, seg| {
            let rect = acc.unwrap_or_else(|| Rect::from_corners(seg.from, seg.from));
            Some(rect.union_point(seg.from).union_point(seg.to))
        })
    }

    /// Discards recorded output and resets the transform and style.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl DrawContext for RecordingCanvas {
    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        self.ops.push(DrawOp::Line { from, to });
        self.segments.push(Segment {
            from: self.transform.transform_point2(from),
            to: self.transform.transform_point2(to),
            color: self.style.stroke.clone(),
            weight: self.style.stroke_weight,
        });
    }

    fn set_stroke_color(&mut self, color: &Color) {
        self.ops.push(DrawOp::StrokeColor(color.clone()));
        self.style.stroke = Some(color.clone());
    }

    fn set_stroke_weight(&mut self, weight: f32) {
        self.ops.push(DrawOp::StrokeWeight(weight));
        self.style.stroke_weight = weight;
    }

    fn no_stroke(&mut self) {
        self.ops.push(DrawOp::NoStroke);
        self.style.stroke = None;
    }

    fn fill(&mut self, color: &Color) {
        self.ops.push(DrawOp::Fill(color.clone()));
        self.style.fill = Some(color.clone());
    }

    fn draw_triangle(&mut self, triangle: Triangle2d) {
        self.ops.push(DrawOp::Triangle(triangle.vertices));
        self.triangles.push(FilledTriangle {
            vertices: triangle
                .vertices
                .map(|v| self.transform.transform_point2(v)),
            fill: self.style.fill.clone(),
        });
    }

    fn translate(&mut self, offset: Vec2) {
        self.ops.push(DrawOp::Translate(offset));
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.ops.push(DrawOp::Rotate(angle));
        self.transform = self.transform * Affine2::from_angle(angle);
    }

    fn save_state(&mut self) {
        self.ops.push(DrawOp::Save);
        self.stack.push((self.transform, self.style.clone()));
    }

    fn restore_state(&mut self) {
        self.ops.push(DrawOp::Restore);
        match self.stack.pop() {
            Some((transform, style)) => {
                self.transform = transform;
                self.style = style;
            }
            None => trace!("restore on empty canvas stack ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_restores_on_drop() {
        let mut canvas = RecordingCanvas::new();
        {
            let mut scope = ContextScope::enter(&mut canvas);
            scope.translate(Vec2::new(5.0, 0.0));
            assert_eq!(scope.stack_depth(), 1);
        }
        assert_eq!(canvas.stack_depth(), 0);
        assert_eq!(canvas.transform(), Affine2::IDENTITY);
    }

    #[test]
    fn scope_unwinds_open_nested_saves() {
        let mut canvas = RecordingCanvas::new();
        {
            let mut scope = ContextScope::enter(&mut canvas);
            scope.save();
            scope.save();
            assert!(scope.restore());
            assert_eq!(scope.depth(), 1);
        }
        assert_eq!(canvas.stack_depth(), 0);
        assert_eq!(canvas.count_ops(|op| *op == DrawOp::Save), 3);
        assert_eq!(canvas.count_ops(|op| *op == DrawOp::Restore), 3);
    }

    #[test]
    fn scope_restore_without_nested_save_reaches_context() {
        let mut canvas = RecordingCanvas::new();
        {
            let mut scope = ContextScope::enter(&mut canvas);
            scope.translate(Vec2::new(3.0, 0.0));
            assert!(!scope.restore());
            assert_eq!(scope.stack_depth(), 0);
            assert_eq!(scope.transform(), Affine2::IDENTITY);
        }
        assert_eq!(canvas.stack_depth(), 0);
        assert_eq!(canvas.count_ops(|op| *op == DrawOp::Restore), 2);
    }

    #[test]
    fn restore_on_empty_stack_is_ignored() {
        let mut canvas = RecordingCanvas::new();
        canvas.translate(Vec2::new(1.0, 2.0));
        canvas.restore_state();
        assert_eq!(canvas.transform().translation, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn save_captures_style_with_transform() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_stroke_weight(2.0);
        canvas.save_state();
        canvas.set_stroke_weight(7.0);
        canvas.rotate(1.0);
        canvas.restore_state();
        assert_eq!(canvas.style().stroke_weight, 2.0);
        assert_eq!(canvas.transform(), Affine2::IDENTITY);
    }

    #[test]
    fn bounds_cover_all_segments() {
        let mut canvas = RecordingCanvas::new();
        assert!(canvas.bounds().is_none());
        canvas.draw_line(Vec2::new(-1.0, 0.0), Vec2::new(2.0, 3.0));
        canvas.draw_line(Vec2::ZERO, Vec2::new(0.0, -4.0));
        let bounds = canvas.bounds().unwrap();
        assert_eq!(bounds.min, Vec2::new(-1.0, -4.0));
        assert_eq!(bounds.max, Vec2::new(2.0, 3.0));
    }
}
