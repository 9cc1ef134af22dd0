//! Interpreter that walks an instruction string and drives a [`DrawContext`].
//!
//! The entry point is [`TurtleInterpreter`]. Build it from a [`TurtleConfig`],
//! attach a context with [`TurtleInterpreter::with_context`], then call
//! [`TurtleInterpreter::render`] once per frame.
//!
//! The interpreter never tracks absolute turtle coordinates. Each `F` or `G`
//! translates the context origin to the segment's far end, so every later
//! instruction is expressed in the turtle's local frame and all geometry is
//! composed by the context's own transform stack.

use crate::canvas::{ContextScope, DrawContext, RecordingCanvas};
use crate::error::{LsysError, Result};
use crate::turtle::{Color, TurtleAction, TurtleConfig};
use bevy_math::primitives::Triangle2d;
use glam::Vec2;
use tracing::trace;

/// Renders an instruction string with turtle graphics.
///
/// `C` is the owned drawing context used by [`render`](Self::render); any
/// other context can be drawn on with [`render_to`](Self::render_to).
pub struct TurtleInterpreter<C = RecordingCanvas> {
    config: TurtleConfig,
    color: Color,
    context: Option<C>,
}

impl<C: DrawContext> TurtleInterpreter<C> {
    /// Creates an interpreter with no drawing context.
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            color: config.color.clone(),
            config,
            context: None,
        }
    }

    pub fn with_context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.config.instructions = instructions.into();
        self
    }

    pub fn with_length(mut self, length: f32) -> Self {
        self.config.length = length;
        self
    }

    /// Multiplies the segment length by `factor`.
    pub fn scale_length(mut self, factor: f32) -> Self {
        self.config.length *= factor;
        self
    }

    /// Sets both turn angles to `angle`.
    pub fn with_turn_angle(mut self, angle: f32) -> Self {
        self.config.left_turn_angle = angle;
        self.config.right_turn_angle = angle;
        self
    }

    pub fn with_left_turn_angle(mut self, angle: f32) -> Self {
        self.config.left_turn_angle = angle;
        self
    }

    pub fn with_right_turn_angle(mut self, angle: f32) -> Self {
        self.config.right_turn_angle = angle;
        self
    }

    pub fn set_context(&mut self, context: C) {
        self.context = Some(context);
    }

    pub fn take_context(&mut self) -> Option<C> {
        self.context.take()
    }

    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut C> {
        self.context.as_mut()
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// The working pen color as left by the most recent render.
    pub fn color(&self) -> &Color {
        &self.color
    }

    /// Renders onto the owned context.
    ///
    /// Fails with [`LsysError::NoRenderTarget`] when no context is set.
    pub fn render(&mut self) -> Result<()> {
        let mut context = self.context.take().ok_or(LsysError::NoRenderTarget)?;
        let result = self.render_to(&mut context);
        self.context = Some(context);
        result
    }

    /// Renders onto `ctx`.
    ///
    /// The whole pass runs inside one save of `ctx`, released on every exit
    /// path. An invalid symbol stops the pass after the instructions before
    /// it have been drawn.
    pub fn render_to<D: DrawContext + ?Sized>(&mut self, ctx: &mut D) -> Result<()> {
        trace!(
            instructions = self.config.instructions.len(),
            "turtle render started"
        );
        let mut scope = ContextScope::enter(ctx);
        self.color = self.config.color.clone();

        for symbol in self.config.instructions.chars() {
            let action = TurtleAction::from_symbol(symbol)?;
            apply(&self.config, &mut self.color, action, &mut scope);
        }

        if self.config.show_head {
            draw_head(&mut *scope);
        }
        Ok(())
    }
}

/// Performs one action in the turtle's local frame.
fn apply<D: DrawContext + ?Sized>(
    config: &TurtleConfig,
    color: &mut Color,
    action: TurtleAction,
    scope: &mut ContextScope<'_, D>,
) {
    let length = config.length;
    match action {
        TurtleAction::DrawForward => {
            if config.rotate_color {
                color.rotate_first_channel(config.color_change_rate);
            }
            scope.set_stroke_color(color);
            scope.set_stroke_weight(config.stroke_weight);
            scope.draw_line(Vec2::ZERO, Vec2::new(length, 0.0));
            // Subsequent actions are relative to the head of the line.
            scope.translate(Vec2::new(length, 0.0));
        }
        TurtleAction::MoveForward => scope.translate(Vec2::new(length, 0.0)),
        TurtleAction::TurnRight => scope.rotate(config.right_turn_angle),
        TurtleAction::TurnLeft => scope.rotate(-config.left_turn_angle),
        TurtleAction::Push => scope.save(),
        TurtleAction::Pop => {
            if !scope.restore() {
                trace!("unmatched ']' passed to context");
            }
        }
    }
}

/// Marks the turtle's position and heading with a small red triangle.
fn draw_head<D: DrawContext + ?Sized>(ctx: &mut D) {
    let mut head = ContextScope::enter(ctx);
    head.no_stroke();
    head.fill(&Color::red());
    head.draw_triangle(Triangle2d::new(
        Vec2::ZERO,
        Vec2::new(-10.0, 5.0),
        Vec2::new(-10.0, -5.0),
    ));
}
