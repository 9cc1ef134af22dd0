//! # lsystem-turtle
//!
//! Fractal curves from symbolic rewriting. An [`LSystem`] expands an axiom
//! generation by generation with parallel substitution, and a
//! [`TurtleInterpreter`] walks the resulting sentence, driving any
//! [`DrawContext`] with relative move, turn and save/restore commands.
//!
//! ```
//! use lsystem_turtle::{LSystem, RecordingCanvas, TurtleConfig, TurtleInterpreter};
//!
//! let mut koch = LSystem::new("F", [('F', "F+F-F-F+F")]);
//! koch.generate(2);
//!
//! let mut turtle = TurtleInterpreter::new(TurtleConfig {
//!     instructions: koch.current().to_string(),
//!     length: 4.0,
//!     ..Default::default()
//! })
//! .with_context(RecordingCanvas::new());
//!
//! turtle.render().unwrap();
//! assert_eq!(turtle.context().unwrap().segments().len(), 25);
//! ```

pub mod bridge;
pub mod canvas;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod rule;
pub mod shape;
pub mod system;
pub mod turtle;

pub use canvas::*;
pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use rule::*;
pub use shape::*;
pub use system::*;
pub use turtle::*;
