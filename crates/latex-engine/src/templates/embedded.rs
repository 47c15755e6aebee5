//! Embedded page templates
//!
//! Templates are loaded from external files at compile time and embedded in
//! the binary, so the engine has no runtime template files to locate.

use super::Layout;

/// Single-column worksheet page - loaded from templates/worksheet_1col.tex
const ONE_COLUMN_TEMPLATE: &str = include_str!("../../templates/worksheet_1col.tex");

/// Two-column worksheet page - loaded from templates/worksheet_2col.tex
const TWO_COLUMN_TEMPLATE: &str = include_str!("../../templates/worksheet_2col.tex");

/// Get the template source for a layout variant.
pub fn template_source(layout: Layout) -> &'static str {
    match layout {
        Layout::OneColumn => ONE_COLUMN_TEMPLATE,
        Layout::TwoColumn => TWO_COLUMN_TEMPLATE,
    }
}
