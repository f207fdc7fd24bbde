//! HTML rendering.
//!
//! Pure functions from config and table state to markup. No I/O here:
//! `build` writes the result to disk, `serve` writes it to the socket.
//!
//! | Module   | Output                                        |
//! |----------|-----------------------------------------------|
//! | `page`   | Document shell (head, heading, footer, script)|
//! | `navbar` | Brand, info link, outbound links              |
//! | `modal`  | Hidden "What is this?" dialog                 |
//! | `table`  | Filter form, sortable table, row count        |

mod modal;
mod navbar;
mod page;
mod table;

pub use page::render_page;
