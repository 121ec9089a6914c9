// src/script/bindings.rs

//! The drawing capabilities a script can call.
//!
//! Scripts never see the canvas or framebuffer objects. They get a fixed set
//! of plain functions that forward to a [`DrawingFacade`]; anything not
//! registered here does not exist for them.

use crate::canvas::Canvas;
use crate::color::BinaryColor;
use crate::rasterizer::FontProvider;
use log::trace;
use rhai::{Engine, EvalAltResult, ImmutableString, INT};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Canvas access shared between the registered functions of one engine.
#[derive(Clone)]
pub struct DrawingFacade {
    canvas: Rc<RefCell<Canvas>>,
}

impl DrawingFacade {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas: Rc::new(RefCell::new(canvas)),
        }
    }

    pub fn set_pixel(&self, x: INT, y: INT, color: BinaryColor) {
        self.canvas
            .borrow_mut()
            .set_pixel(coord(x), coord(y), color);
    }

    pub fn get_pixel(&self, x: INT, y: INT) -> bool {
        self.canvas.borrow().get_pixel(coord(x), coord(y)).is_on()
    }

    pub fn fill_rect(&self, x0: INT, y0: INT, x1: INT, y1: INT, color: BinaryColor) {
        self.canvas
            .borrow_mut()
            .fill_rect(coord(x0), coord(y0), coord(x1), coord(y1), color);
    }

    pub fn clear(&self, color: BinaryColor) {
        self.canvas.borrow_mut().clear(color);
    }

    pub fn draw_text(
        &self,
        fonts: &dyn FontProvider,
        text: &str,
        x: INT,
        y: INT,
        size: INT,
    ) -> Result<(), Box<EvalAltResult>> {
        let size = i32::try_from(size).map_err(|_| format!("font size {} is out of range", size))?;
        let font = fonts.sized(size).map_err(|e| e.to_string())?;
        trace!("script draw_text {:?} at ({}, {}) size {}", text, x, y, size);
        self.canvas.borrow_mut().draw_text(
            text,
            coord(x),
            coord(y),
            font.as_ref(),
            BinaryColor::FOREGROUND,
        );
        Ok(())
    }

    /// Takes the canvas back once every engine-held clone is gone.
    pub fn into_canvas(self) -> Option<Canvas> {
        Rc::try_unwrap(self.canvas).ok().map(RefCell::into_inner)
    }
}

/// Script integers are 64-bit; anything beyond i32 is off-canvas anyway.
fn coord(v: INT) -> i32 {
    v.clamp(i32::MIN as INT, i32::MAX as INT) as i32
}

/// Registers the pixel and rectangle primitives.
pub fn register_drawing(engine: &mut Engine, facade: &DrawingFacade) {
    let f = facade.clone();
    engine.register_fn("set_pixel", move |x: INT, y: INT| {
        f.set_pixel(x, y, BinaryColor::FOREGROUND)
    });
    let f = facade.clone();
    engine.register_fn("set_pixel", move |x: INT, y: INT, on: bool| {
        f.set_pixel(x, y, BinaryColor::from(on))
    });
    let f = facade.clone();
    engine.register_fn("clear_pixel", move |x: INT, y: INT| {
        f.set_pixel(x, y, BinaryColor::BACKGROUND)
    });
    let f = facade.clone();
    engine.register_fn("get_pixel", move |x: INT, y: INT| f.get_pixel(x, y));
    let f = facade.clone();
    engine.register_fn("fill_rect", move |x0: INT, y0: INT, x1: INT, y1: INT| {
        f.fill_rect(x0, y0, x1, y1, BinaryColor::FOREGROUND)
    });
    let f = facade.clone();
    engine.register_fn(
        "fill_rect",
        move |x0: INT, y0: INT, x1: INT, y1: INT, on: bool| {
            f.fill_rect(x0, y0, x1, y1, BinaryColor::from(on))
        },
    );
    let f = facade.clone();
    engine.register_fn("clear", move |on: bool| f.clear(BinaryColor::from(on)));
}

/// Registers `draw_text(text, x, y, size)` backed by `fonts`.
pub fn register_text(engine: &mut Engine, facade: &DrawingFacade, fonts: Arc<dyn FontProvider>) {
    let f = facade.clone();
    engine.register_fn(
        "draw_text",
        move |text: ImmutableString, x: INT, y: INT, size: INT| -> Result<(), Box<EvalAltResult>> {
            f.draw_text(fonts.as_ref(), text.as_str(), x, y, size)
        },
    );
}
