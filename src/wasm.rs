//! Browser bindings.
//!
//! [`Puzzle`] owns one board and its generator; a page feeds it discrete moves decoded from pointer input
//! and reads the cells back for drawing.

use std::num::NonZero;

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::{Board, EngineError, Generator, Location};

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn dimension(side: usize) -> Result<NonZero<usize>, JsValue> {
    NonZero::new(side).ok_or_else(|| JsValue::from_str("board sides must be positive"))
}

fn set(target: &Object, key: &str, value: JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), &value).map(|_| ())
}

/// A puzzle controller for a web page.
#[wasm_bindgen]
pub struct Puzzle {
    board: Board,
    generator: Generator,
}

#[wasm_bindgen]
impl Puzzle {
    /// A new puzzle of `width` by `height` cells with a seed drawn from `Math.random`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize) -> Result<Puzzle, JsValue> {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        Self::with_seed(width, height, seed)
    }

    /// A new, reproducible puzzle.
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Puzzle, JsValue> {
        let mut puzzle = Puzzle {
            board: Board::with_dims((dimension(width)?, dimension(height)?)),
            generator: Generator::seeded(seed),
        };
        puzzle.regenerate();

        Ok(puzzle)
    }

    /// Discard the current puzzle and generate another of the same size.
    pub fn regenerate(&mut self) {
        self.generator.generate(&mut self.board);
    }

    /// See [`Board::connect`]. Returns `"connected"`, `"disconnected"`, `"unchanged"` or `"rejected"`.
    pub fn connect(&mut self, ax: usize, ay: usize, bx: usize, by: usize) -> Result<String, JsValue> {
        let outcome = self.board.connect(Location(ax, ay), Location(bx, by)).map_err(to_js)?;
        Ok(<&'static str>::from(outcome).to_owned())
    }

    /// See [`Board::disconnect`].
    pub fn disconnect(&mut self, ax: usize, ay: usize, bx: usize, by: usize) -> Result<bool, JsValue> {
        self.board.disconnect(Location(ax, ay), Location(bx, by)).map_err(to_js)
    }

    /// See [`Board::stroke`]. Returns `undefined` when the stroke did not start on a coloured cell.
    pub fn stroke(&mut self, from_x: usize, from_y: usize, to_x: usize, to_y: usize) -> Result<Option<String>, JsValue> {
        let outcome = self.board.stroke(Location(from_x, from_y), Location(to_x, to_y)).map_err(to_js)?;
        Ok(outcome.map(|outcome| <&'static str>::from(outcome).to_owned()))
    }

    /// See [`Board::delete_path`].
    pub fn delete_path(&mut self, x: usize, y: usize) -> Result<usize, JsValue> {
        self.board.delete_path(Location(x, y)).map_err(to_js)
    }

    /// Clear every move made so far.
    pub fn reset(&mut self) {
        self.board.reset();
    }

    /// See [`Board::swap_solution`].
    pub fn swap_solution(&mut self) {
        self.board.swap_solution();
    }

    /// See [`Board::has_win`].
    pub fn has_win(&self) -> bool {
        self.board.has_win()
    }

    /// Board width in cells.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.board.dims().0.get()
    }

    /// Board height in cells.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.board.dims().1.get()
    }

    /// Every cell in row-major order as `{ x, y, number, hue, connections }`.
    ///
    /// `number` is 0 and `hue` is -1 where unset; `hue` is otherwise a fraction of the colour wheel.
    /// `connections` lists `[x, y]` neighbour pairs, oldest first.
    pub fn cells(&self) -> Result<Array, JsValue> {
        let out = Array::new();

        for cell in self.board.cells() {
            let entry = Object::new();
            let Location(x, y) = cell.location();
            set(&entry, "x", JsValue::from(x))?;
            set(&entry, "y", JsValue::from(y))?;
            set(&entry, "number", JsValue::from(cell.number().map_or(0, NonZero::get)))?;
            set(&entry, "hue", JsValue::from(cell.hue().map_or(-1.0, |hue| hue.fraction())))?;

            let connections = cell.connections().iter()
                .map(|Location(cx, cy)| Array::of2(&JsValue::from(*cx), &JsValue::from(*cy)))
                .collect::<Array>();
            set(&entry, "connections", connections.into())?;

            out.push(&entry);
        }

        Ok(out)
    }

    /// The board as text, see [`Board`]'s `Display`.
    #[wasm_bindgen(js_name = toString)]
    pub fn to_text(&self) -> String {
        self.board.to_string()
    }
}
