//! Turtle vocabulary, pen color and interpreter configuration.

use crate::error::{LsysError, Result};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Channels wrap back to zero at this value when the pen color rotates.
pub const COLOR_CHANNEL_MODULUS: f32 = 255.0;

/// A pen color given as raw channels.
///
/// The channel count is not fixed: a single channel is a gray level (or
/// a hue when the host context works in HSB), three channels are a full color.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub Vec<f32>);

impl Color {
    pub fn gray(level: f32) -> Self {
        Self(vec![level])
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(vec![r, g, b])
    }

    pub fn red() -> Self {
        Self::rgb(255.0, 0.0, 0.0)
    }

    pub fn channels(&self) -> &[f32] {
        &self.0
    }

    /// Advances the first channel by `rate`, wrapping at [`COLOR_CHANNEL_MODULUS`].
    ///
    /// A color without channels is left untouched.
    pub fn rotate_first_channel(&mut self, rate: f32) {
        if let Some(first) = self.0.first_mut() {
            *first = (*first + rate) % COLOR_CHANNEL_MODULUS;
        }
    }
}

/// The closed set of actions a turtle symbol can stand for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurtleAction {
    /// Draw a segment and move to its end (`F`).
    DrawForward,
    /// Move forward without drawing (`G`).
    MoveForward,
    /// Rotate by the right turn angle (`+`).
    TurnRight,
    /// Rotate by the negated left turn angle (`-`).
    TurnLeft,
    /// Save transform and style (`[`).
    Push,
    /// Restore the most recent save (`]`).
    Pop,
}

impl TurtleAction {
    /// Parses one instruction symbol.
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol {
            'F' => Ok(Self::DrawForward),
            'G' => Ok(Self::MoveForward),
            '+' => Ok(Self::TurnRight),
            '-' => Ok(Self::TurnLeft),
            '[' => Ok(Self::Push),
            ']' => Ok(Self::Pop),
            other => Err(LsysError::InvalidTurtleAction(other)),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::DrawForward => 'F',
            Self::MoveForward => 'G',
            Self::TurnRight => '+',
            Self::TurnLeft => '-',
            Self::Push => '[',
            Self::Pop => ']',
        }
    }
}

/// Construction options for a [`TurtleInterpreter`](crate::TurtleInterpreter).
///
/// Missing fields take their defaults when deserialized; unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurtleConfig {
    /// Symbols to interpret, usually an [`LSystem`](crate::LSystem) sentence.
    pub instructions: String,
    /// Segment length for `F` and `G`.
    pub length: f32,
    /// Angle (radians) negated and applied on `-`.
    pub left_turn_angle: f32,
    /// Angle (radians) applied on `+`.
    pub right_turn_angle: f32,
    /// Base pen color; every render starts from a copy of it.
    pub color: Color,
    /// Added to the first color channel on every `F` when `rotate_color` is set.
    pub color_change_rate: f32,
    pub stroke_weight: f32,
    pub rotate_color: bool,
    /// Draw a marker at the final position and heading.
    pub show_head: bool,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            instructions: String::new(),
            length: 100.0,
            left_turn_angle: PI / 2.0,
            right_turn_angle: PI / 2.0,
            color: Color::rgb(0.0, 0.0, 0.0),
            color_change_rate: 0.0,
            stroke_weight: 3.0,
            rotate_color: true,
            show_head: false,
        }
    }
}

impl TurtleConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_closed_vocabulary() {
        for symbol in ['F', 'G', '+', '-', '[', ']'] {
            let action = TurtleAction::from_symbol(symbol).unwrap();
            assert_eq!(action.symbol(), symbol);
        }
    }

    #[test]
    fn rejects_other_symbols() {
        assert!(matches!(
            TurtleAction::from_symbol('A'),
            Err(LsysError::InvalidTurtleAction('A'))
        ));
    }

    #[test]
    fn first_channel_wraps() {
        let mut color = Color::rgb(0.0, 10.0, 20.0);
        color.rotate_first_channel(250.0);
        assert_eq!(color.channels(), &[250.0, 10.0, 20.0]);
        color.rotate_first_channel(250.0);
        assert_eq!(color.channels(), &[245.0, 10.0, 20.0]);
    }

    #[test]
    fn empty_color_does_not_rotate() {
        let mut color = Color::default();
        color.rotate_first_channel(5.0);
        assert!(color.channels().is_empty());
    }
}
