//! Chess rules engine: board state, per-piece move generation and detection
//! of check, checkmate and stalemate, including the castling, en passant and
//! promotion move families.
//!
//! The engine performs no search and attaches to the outside world through
//! [`game::Game`]; the bundled [`console`] front end drives it from stdin.

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]
// Rustdoc lints.
#![warn(
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::pedantic
)]

pub mod chess;
pub mod console;
pub mod game;

/// Prints the program name and version on startup.
pub fn print_engine_info() {
    println!(
        "{} chess rules engine {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
}
