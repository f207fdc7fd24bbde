//! Terminal output: prefixed log lines, progress bars and the watch status line.
//!
//! ```ignore
//! log!("build"; "rendered {} rows", count);
//!
//! let progress = ProgressBars::new(&[("assets", files.len())]);
//! progress.inc(0);
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::{
        Mutex, OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Terminal width, detected once.
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Rows currently reserved by progress bars below the log output.
static BAR_ROWS: AtomicUsize = AtomicUsize::new(0);

const FALLBACK_WIDTH: u16 = 100;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

fn terminal_width() -> usize {
    *TERMINAL_WIDTH.get_or_init(|| size().map_or(FALLBACK_WIDTH, |(w, _)| w)) as usize
}

/// Display width of `[module] `.
#[inline]
const fn prefix_width(module_len: usize) -> usize {
    module_len + 3
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// ```ignore
/// log!("serve"; "listening on http://{}", addr);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Print `[module] message`, keeping active progress bars below it.
///
/// Single-line messages are cut to the terminal width.
#[allow(clippy::cast_possible_truncation)]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let rows = BAR_ROWS.load(Ordering::SeqCst);
    let mut out = stdout().lock();

    if rows > 0 {
        execute!(out, cursor::MoveUp(rows as u16), Clear(ClearType::FromCursorDown)).ok();
    }

    let message = if message.contains('\n') {
        message
    } else {
        truncate_str(message, terminal_width().saturating_sub(prefix_width(module.len())))
    };
    writeln!(out, "{prefix} {message}").ok();

    for _ in 0..rows {
        writeln!(out).ok();
    }
    out.flush().ok();
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold(),
        "watch" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        "data" => prefix.bright_cyan().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Cut `s` to at most `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Progress Bars
// ============================================================================

/// One progress bar per module, each on its own terminal row.
///
/// Bars are addressed by creation index. Updates from rayon workers are
/// serialized through an internal mutex.
pub struct ProgressBars {
    bars: Vec<Bar>,
    lock: Mutex<()>,
}

struct Bar {
    prefix: ColoredString,
    prefix_len: usize,
    total: usize,
    done: AtomicUsize,
}

impl ProgressBars {
    pub fn new(modules: &[(&'static str, usize)]) -> Self {
        let mut out = stdout().lock();
        for _ in modules {
            writeln!(out).ok();
        }
        out.flush().ok();
        BAR_ROWS.store(modules.len(), Ordering::SeqCst);

        let bars = modules
            .iter()
            .map(|&(module, total)| Bar {
                prefix: colorize_prefix(module),
                prefix_len: prefix_width(module.len()),
                total,
                done: AtomicUsize::new(0),
            })
            .collect();

        Self { bars, lock: Mutex::new(()) }
    }

    /// Like `new`, but skips empty modules and returns `None` when there is
    /// at most one item overall.
    pub fn new_filtered(modules: &[(&'static str, usize)]) -> Option<Self> {
        let modules: Vec<_> = modules.iter().copied().filter(|&(_, n)| n > 0).collect();
        let total: usize = modules.iter().map(|&(_, n)| n).sum();
        (total > 1).then(|| Self::new(&modules))
    }

    /// Advance bar `index` by one.
    pub fn inc(&self, index: usize) {
        if let Some(bar) = self.bars.get(index) {
            let done = bar.done.fetch_add(1, Ordering::Relaxed) + 1;
            self.draw(index, bar, done);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw(&self, row: usize, bar: &Bar, done: usize) {
        let _guard = self.lock.lock().ok();

        let count = format!("{done}/{}", bar.total);
        let overhead = bar.prefix_len + 4 + count.len();
        let width = terminal_width()
            .saturating_sub(overhead)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);
        let filled = (done * width).checked_div(bar.total).unwrap_or(0).min(width);
        let body = "█".repeat(filled) + &"░".repeat(width - filled);

        let up = (self.bars.len() - row) as u16;
        let mut out = stdout().lock();
        execute!(out, cursor::MoveUp(up), Clear(ClearType::CurrentLine)).ok();
        write!(out, "{} [{body}] {count}", bar.prefix).ok();
        execute!(out, cursor::MoveDown(up)).ok();
        write!(out, "\r").ok();
        out.flush().ok();
    }

    /// Erase the bars and hand their rows back to `log`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn finish(&self) {
        if BAR_ROWS.swap(0, Ordering::SeqCst) == 0 {
            return;
        }
        let _guard = self.lock.lock().ok();
        let rows = self.bars.len() as u16;
        let mut out = stdout().lock();
        execute!(out, cursor::MoveUp(rows), Clear(ClearType::FromCursorDown)).ok();
        out.flush().ok();
    }
}

impl Drop for ProgressBars {
    fn drop(&mut self) {
        self.finish();
    }
}

// ============================================================================
// Watch Status
// ============================================================================

/// Single status block for watch mode, overwritten by each new message.
///
/// ```ignore
/// let mut status = WatchStatus::new();
/// status.success("reloaded data/resources.json (42 resources)");
/// status.error("reload failed", &format!("{err:#}"));
/// ```
pub struct WatchStatus {
    last_lines: usize,
}

impl WatchStatus {
    pub const fn new() -> Self {
        Self { last_lines: 0 }
    }

    pub fn success(&mut self, message: &str) {
        self.display(Some("✓".green()), message);
    }

    pub fn unchanged(&mut self, path: &str) {
        self.display(None, &format!("unchanged: {path}").dimmed().to_string());
    }

    pub fn error(&mut self, summary: &str, detail: &str) {
        let message = if detail.is_empty() {
            summary.to_string()
        } else {
            format!("{summary}\n{detail}")
        };
        self.display(Some("✗".red()), &message);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn display(&mut self, symbol: Option<ColoredString>, message: &str) {
        let mut out = stdout().lock();
        if self.last_lines > 0 {
            execute!(
                out,
                cursor::MoveUp(self.last_lines as u16),
                Clear(ClearType::FromCursorDown)
            )
            .ok();
        }

        let stamp = format!("[{}]", chrono::Local::now().format("%H:%M:%S")).dimmed();
        match symbol {
            Some(symbol) => writeln!(out, "{stamp} {symbol} {message}").ok(),
            None => writeln!(out, "{stamp} {message}").ok(),
        };
        out.flush().ok();

        self.last_lines = message.lines().count().max(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
