//! A complete fractal figure: an L-System expanded once, rendered every frame.

use crate::canvas::{ContextScope, DrawContext, RecordingCanvas};
use crate::error::{LsysError, Result};
use crate::interpreter::TurtleInterpreter;
use crate::system::LSystem;
use crate::turtle::{Color, TurtleConfig};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f32::consts::PI;
use tracing::debug;

/// Options for a [`Shape`]. Defaults draw a Koch snowflake.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub axiom: String,
    /// One replacement per symbol.
    pub rules: BTreeMap<char, String>,
    pub generations: u32,
    /// Segment length before scaling.
    pub length: f32,
    /// Segment length is multiplied by this once per generation.
    pub scale_factor: f32,
    pub left_angle: f32,
    pub right_angle: f32,
    pub color: Color,
    pub color_change_rate: f32,
    pub stroke_weight: f32,
    /// Where the turtle starts, in the parent frame.
    pub root: Vec2,
    /// Initial rotation of the whole figure (radians).
    pub rotation: f32,
    /// Rotation added by each [`Shape::update`].
    pub spin: f32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            axiom: "F--F--F".to_string(),
            rules: BTreeMap::from([('F', "F+F--F+F".to_string())]),
            generations: 3,
            length: 200.0,
            scale_factor: 0.5,
            left_angle: PI / 3.0,
            right_angle: PI / 3.0,
            color: Color::gray(0.0),
            color_change_rate: 1.0 / 20.0,
            stroke_weight: 1.0,
            root: Vec2::ZERO,
            rotation: 0.0,
            spin: 0.01,
        }
    }
}

impl ShapeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Segment length after `generations` rounds of scaling.
    pub fn scaled_length(&self) -> f32 {
        self.length * self.scale_factor.powf(self.generations as f32)
    }
}

/// An expanded L-System bound to a turtle, placed at `root` and spun over time.
pub struct Shape<C = RecordingCanvas> {
    config: ShapeConfig,
    system: LSystem,
    turtle: TurtleInterpreter<C>,
    rotation: f32,
    time: u64,
}

impl<C: DrawContext> Shape<C> {
    /// Expands the grammar and configures the turtle. No drawing happens here.
    pub fn new(config: ShapeConfig) -> Self {
        let mut system = LSystem::new(
            config.axiom.clone(),
            config.rules.iter().map(|(k, v)| (*k, v.clone())),
        );
        system.generate(config.generations as usize);
        debug!(
            generations = config.generations,
            len = system.current().len(),
            "shape sentence expanded"
        );

        let turtle = TurtleInterpreter::new(TurtleConfig {
            instructions: system.current().to_string(),
            length: config.scaled_length(),
            left_turn_angle: config.left_angle,
            right_turn_angle: config.right_angle,
            color: config.color.clone(),
            color_change_rate: config.color_change_rate,
            stroke_weight: config.stroke_weight,
            ..TurtleConfig::default()
        });

        Self {
            rotation: config.rotation,
            config,
            system,
            turtle,
            time: 0,
        }
    }

    pub fn with_context(mut self, context: C) -> Self {
        self.turtle.set_context(context);
        self
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    pub fn system(&self) -> &LSystem {
        &self.system
    }

    pub fn turtle(&self) -> &TurtleInterpreter<C> {
        &self.turtle
    }

    pub fn turtle_mut(&mut self) -> &mut TurtleInterpreter<C> {
        &mut self.turtle
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Number of completed renders.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Advances the animation by one frame.
    pub fn update(&mut self) -> &mut Self {
        self.rotation += self.config.spin;
        self
    }

    /// Renders onto the turtle's context.
    pub fn render(&mut self) -> Result<()> {
        let mut context = self
            .turtle
            .take_context()
            .ok_or(LsysError::NoRenderTarget)?;
        let result = self.render_to(&mut context);
        self.turtle.set_context(context);
        result
    }

    /// Renders onto `ctx`, with the origin at `root` and the current rotation applied.
    pub fn render_to<D: DrawContext + ?Sized>(&mut self, ctx: &mut D) -> Result<()> {
        let mut scope = ContextScope::enter(ctx);
        scope.set_stroke_color(&Color::gray(200.0));
        scope.translate(self.config.root);
        scope.rotate(self.rotation);
        self.turtle.render_to(&mut *scope)?;
        self.time += 1;
        Ok(())
    }
}
