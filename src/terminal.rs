use crate::prelude::*;
use crate::render::Graphics;
use console::Term;
use std::env;

/// Longest line pstree ever prints
pub const MAX_LINE: usize = 8192;

const DEFAULT_COLUMNS: usize = 80;

/// Locale variables checked, in order, for a UTF-8 capable terminal
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

fn columns_from_env() -> Option<usize> {
    env::var("COLUMNS").ok()?.trim().parse().ok()
}

fn resolve_width(terminal: Option<usize>) -> usize {
    terminal
        .or_else(columns_from_env)
        .unwrap_or(DEFAULT_COLUMNS)
}

/// Width of the output, in columns.
///
/// Tries the terminal attached to stdout, then `$COLUMNS`, then falls back to 80.
/// In wide mode lines are only bounded by [`MAX_LINE`].
pub fn terminal_width(wide: bool) -> usize {
    if wide {
        return MAX_LINE - 1;
    }
    let terminal = Term::stdout()
        .size_checked()
        .map(|(_rows, columns)| columns as usize);
    resolve_width(terminal)
}

/// Column budget handed to the renderer.
///
/// The alternate character set escapes are counted in the line length but take
/// no room on screen, so their size is added back.
pub fn effective_columns(width: usize, graphics: Graphics) -> usize {
    let width = if width == 0 { MAX_LINE - 1 } else { width };
    let chars = graphics.chars();
    let columns = width + chars.start_graphics.len() + chars.end_graphics.len();
    let columns = columns.min(MAX_LINE - 1);
    debug!("columns: {columns}");
    columns
}

/// UTF-8 box drawing when the locale says the terminal supports it, ASCII otherwise
pub fn default_graphics() -> Graphics {
    let utf8 = LOCALE_VARS.iter().any(|key| {
        env::var(key).is_ok_and(|value| value.to_uppercase().contains("UTF-8"))
    });
    if utf8 { Graphics::Utf8 } else { Graphics::Ascii }
}
