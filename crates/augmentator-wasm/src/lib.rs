//! Augmentator WASM - WebAssembly bindings for Augmentator
//!
//! This crate provides WASM bindings to expose the augmentator-core
//! augmentations to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper type for RGB image data
//! - `augment` - One function per augmentation, taking a JS options object
//! - `logger` - Forwards configuration warnings to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { rotate, JsPixelBuffer } from '@augmentator/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = new JsPixelBuffer(width, height, rgbBytes);
//! const rotated = rotate(image, { angle: 45 });
//! console.log(`Rotated to ${rotated.width}x${rotated.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod augment;
mod logger;
mod types;

// Re-export public types
pub use augment::{
    crop, erase, flip, inject_noise, mix, option_warnings, rotate, transform_color, translate,
};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
