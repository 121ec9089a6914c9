// src/script/mod.rs

//! Scripted drawing with an embedded `rhai` interpreter.
//!
//! Each run gets a brand-new engine, scope and canvas. The script sees:
//!
//! - `width`, `height`: read-only integers
//! - `set_pixel(x, y)`, `set_pixel(x, y, on)`, `clear_pixel(x, y)`, `get_pixel(x, y)`
//! - `fill_rect(x0, y0, x1, y1)`, `fill_rect(x0, y0, x1, y1, on)`, `clear(on)`
//! - `draw_text(text, x, y, size)` when a font provider is attached
//! - the rhai standard library (arithmetic, `sin`, `PI()`, loops, ...)
//!
//! Module imports and `eval` are unavailable. A run is bounded by an operation
//! count and a wall-clock budget; hitting either fails the run. A failed run
//! discards its canvas.

pub mod bindings;

use crate::canvas::Canvas;
use crate::color::BinaryColor;
use crate::config::ScriptConfig;
use crate::error::{RasterError, Result};
use crate::framebuffer::Framebuffer;
use crate::rasterizer::FontProvider;
use bindings::DrawingFacade;
use log::{debug, info, warn};
use rhai::module_resolvers::DummyModuleResolver;
use rhai::{Dynamic, Engine, EvalAltResult, Scope, INT};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Clock checks happen once per this many interpreter operations.
const PROGRESS_CHECK_INTERVAL: u64 = 256;

/// Draws one period of a sine wave across the raster.
pub const SINE_WAVE: &str = r#"
let mid_y = height / 2;
let amplitude = height / 3;
let frequency = 2.0 * PI() / width.to_float();
for x in 0..width {
    let y = mid_y + (amplitude.to_float() * sin(frequency * x.to_float())).to_int();
    set_pixel(x, y);
}
"#;

pub struct ScriptRunner {
    width: i32,
    height: i32,
    limits: ScriptConfig,
    fonts: Option<Arc<dyn FontProvider>>,
}

impl ScriptRunner {
    pub fn new(width: i32, height: i32, limits: ScriptConfig) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(RasterError::InvalidDimension {
                width: width as i64,
                height: height as i64,
            });
        }
        Ok(Self {
            width,
            height,
            limits,
            fonts: None,
        })
    }

    /// Makes `draw_text` available to scripts.
    pub fn with_fonts(mut self, fonts: Arc<dyn FontProvider>) -> Self {
        self.fonts = Some(fonts);
        self
    }

    /// Runs `source` to completion against a fresh canvas.
    pub fn run(&self, source: &str) -> Result<Framebuffer> {
        let mut canvas = Canvas::new(self.width, self.height)?;
        canvas.clear(BinaryColor::BACKGROUND);
        let facade = DrawingFacade::new(canvas);

        {
            let engine = self.build_engine(&facade);
            let mut scope = Scope::new();
            scope.push_constant("width", self.width as INT);
            scope.push_constant("height", self.height as INT);

            let ast = engine.compile_with_scope(&scope, source).map_err(|e| {
                warn!("Script rejected by parser: {}", e);
                RasterError::ScriptExecution(format!("parse error: {}", e))
            })?;

            let started = Instant::now();
            engine
                .run_ast_with_scope(&mut scope, &ast)
                .map_err(|e| self.execution_error(*e))?;
            debug!("Script finished in {:?}", started.elapsed());
        }

        // The engine and scope are gone, so the facade holds the last reference.
        let canvas = facade.into_canvas().ok_or_else(|| {
            RasterError::ScriptExecution("script context outlived its run".to_string())
        })?;
        Ok(canvas.into_framebuffer())
    }

    fn build_engine(&self, facade: &DrawingFacade) -> Engine {
        let mut engine = Engine::new();
        engine.set_module_resolver(DummyModuleResolver::new());
        engine.disable_symbol("eval");
        engine.set_strict_variables(true);

        engine.set_max_operations(self.limits.max_operations);
        engine.set_max_call_levels(self.limits.max_call_levels);
        engine.set_max_string_size(self.limits.max_string_size);
        engine.set_max_array_size(self.limits.max_array_size);

        engine.on_print(|text| info!("script: {}", text));
        engine.on_debug(|text, source, pos| debug!("script {:?} {}: {}", source, pos, text));

        if self.limits.timeout_ms > 0 {
            let budget = Duration::from_millis(self.limits.timeout_ms);
            let started = Instant::now();
            engine.on_progress(move |ops| {
                if ops % PROGRESS_CHECK_INTERVAL == 0 && started.elapsed() > budget {
                    Some(Dynamic::from(budget.as_millis() as INT))
                } else {
                    None
                }
            });
        }

        bindings::register_drawing(&mut engine, facade);
        if let Some(fonts) = &self.fonts {
            bindings::register_text(&mut engine, facade, Arc::clone(fonts));
        }
        engine
    }

    fn execution_error(&self, err: EvalAltResult) -> RasterError {
        let message = match err {
            EvalAltResult::ErrorTerminated(_, pos) => format!(
                "script exceeded its time budget of {} ms ({})",
                self.limits.timeout_ms, pos
            ),
            EvalAltResult::ErrorTooManyOperations(pos) => format!(
                "script exceeded {} operations ({})",
                self.limits.max_operations, pos
            ),
            other => other.to_string(),
        };
        warn!("Script failed: {}", message);
        RasterError::ScriptExecution(message)
    }
}
