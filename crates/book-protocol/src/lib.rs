//! book-protocol
//!
//! Text encoding/decoding for the order book.
//!
//! Turns command lines into `book_core::InputMessage`s and
//! `book_core::OutputMessage`s back into display lines.
//!
//! - [`text_codec`] : comma-separated line codec

pub mod text_codec;

pub use text_codec::{
    ProtocolError,
    format_output,
    format_output_lines,
    parse_input_line,
};
