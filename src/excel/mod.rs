//! Excel input module
//!
//! Loads the pricing workbook with calamine and materializes each named
//! sheet as a rectangular grid of raw cell values. All extraction runs on
//! the in-memory grids; no further I/O happens mid-pass.

mod reader;

pub use reader::Workbook;
