// The 2D drawing surface the renderer paints through, and an in-memory
// implementation that records every call.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("surface error: {0}")]
pub struct SurfaceError(pub String);

#[derive(Clone, Debug, PartialEq)]
pub struct ColorStop {
    /// In `[0, 1]`.
    pub offset: f64,
    pub color: String,
}

impl ColorStop {
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        ColorStop {
            offset,
            color: color.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub stops: Vec<ColorStop>,
}

/// Gradient between an inner circle and an outer circle.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub inner: [f64; 3],
    pub outer: [f64; 3],
    pub stops: Vec<ColorStop>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    Solid(String),
    Linear(LinearGradient),
    Radial(RadialGradient),
}

pub trait Surface {
    fn resize(&mut self, width: f64, height: f64);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), SurfaceError>;
    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: &Fill,
    ) -> Result<(), SurfaceError>;
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: &Fill)
        -> Result<(), SurfaceError>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Fill,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        fill: Fill,
    },
}

/// Headless surface; keeps the commands of the current frame since the last `take`.
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        RecordingSurface {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: &Fill,
    ) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            fill: fill.clone(),
        });
        Ok(())
    }

    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        fill: &Fill,
    ) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            fill: fill.clone(),
        });
        Ok(())
    }
}
