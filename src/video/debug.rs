/*
 * Rolling Debug Log & Progress Overlay
 *
 * A fixed-capacity character grid rendered onto the top screen. Appending
 * a line shifts every existing row one slot toward the tail (the oldest
 * row falls off) and redraws the visible window, oldest line at the top
 * margin, one text row every 10 pixel rows. The grid itself is plain
 * state behind a spinlock; all hardware access happens in the redraw.
 *
 * The grid is lazily cleared on first use, guarded by a flag inside the
 * same lock - no separate one-time-init state.
 */

use core::fmt;
use core::fmt::Write;

use spin::Mutex;

use crate::io::Mmio;
use crate::utils::fmt::TruncateWriter;

use super::draw::{clear_screen, draw_string};
use super::{
    COLOR_BLACK, COLOR_WHITE, SCREEN_HEIGHT, SCREEN_WIDTH_TOP, Screen, Screens, frame_mut,
};

const DBG_COLOR_FONT: u32 = COLOR_WHITE;
const DBG_COLOR_BG: u32 = COLOR_BLACK;

/// Margins of the log window on the top screen
const DBG_START_X: usize = 10;
const DBG_END_X: usize = SCREEN_WIDTH_TOP - 10;
const DBG_START_Y: usize = 10;
const DBG_END_Y: usize = SCREEN_HEIGHT - 10;

/// Vertical pitch of one text row
const DBG_STEP_Y: usize = 10;

/// Grid dimensions derived from the window
pub const DBG_ROWS: usize = (DBG_END_Y - DBG_START_Y) / DBG_STEP_Y;
pub const DBG_COLS: usize = (DBG_END_X - DBG_START_X) / 8 + 1;

/// Progress indicator position (bottom-right corner of the top screen)
const PROGRESS_X: usize = SCREEN_WIDTH_TOP - 40;
const PROGRESS_Y: usize = SCREEN_HEIGHT - 20;

/// The rolling character grid. Row 0 is the most recently appended line;
/// every row is null-padded to `DBG_COLS` bytes.
pub struct DebugLog {
    grid: [u8; DBG_COLS * DBG_ROWS],
    primed: bool,
}

impl DebugLog {
    pub const fn new() -> Self {
        Self {
            grid: [0; DBG_COLS * DBG_ROWS],
            primed: false,
        }
    }

    /// Zeroes the grid.
    pub fn clear(&mut self) {
        self.grid = [0; DBG_COLS * DBG_ROWS];
        self.primed = true;
    }

    /// Clears the grid on the very first use only; true if it did.
    fn prime(&mut self) -> bool {
        if self.primed {
            return false;
        }
        self.clear();
        true
    }

    /// Shifts every row one slot toward the tail and inserts `line` at
    /// row 0, truncated to `DBG_COLS - 1` bytes and null-padded.
    pub fn push_line(&mut self, line: &str) {
        self.grid.copy_within(0..DBG_COLS * (DBG_ROWS - 1), DBG_COLS);

        let row = &mut self.grid[..DBG_COLS];
        row.fill(0);
        let len = line.len().min(DBG_COLS - 1);
        row[..len].copy_from_slice(&line.as_bytes()[..len]);
    }

    /// Rows from oldest to newest.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[u8]> {
        self.grid.chunks_exact(DBG_COLS).rev()
    }

    /// The rows that actually render, oldest first, each with its y
    /// position: empty rows are skipped and do not occupy a vertical slot.
    pub fn placed_rows(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.rows()
            .filter(|row| row[0] != 0)
            .enumerate()
            .map(|(i, row)| (DBG_START_Y + i * DBG_STEP_Y, row))
    }
}

static LOG: Mutex<DebugLog> = Mutex::new(DebugLog::new());

/// Zeroes the log and clears both top-screen buffers to the log background.
pub fn clear() {
    let mut state = LOG.lock();
    state.clear();
    clear_top_screens();
}

/// Appends one formatted line and redraws the visible window on both
/// top-screen buffers. The first call ever also clears the screen.
pub fn log(args: fmt::Arguments) {
    let mut state = LOG.lock();
    if state.prime() {
        clear_top_screens();
    }

    let mut line: TruncateWriter<DBG_COLS> = TruncateWriter::new();
    let _ = line.write_fmt(args);
    state.push_line(line.as_str());

    redraw(&state);
}

/// Renders a right-aligned percentage in the screen corner, on both
/// top-screen buffers. A zero total renders four spaces instead.
pub fn show_progress(current: u64, total: u64) {
    let text = format_progress(current, total);

    let screens = Screens::current(&Mmio);
    for addr in screens.pair(Screen::Top) {
        // SAFETY: published address; slice dropped before the next one
        let frame = unsafe { frame_mut(addr, SCREEN_WIDTH_TOP) };
        draw_string(
            frame,
            text.as_str().as_bytes(),
            PROGRESS_X,
            PROGRESS_Y,
            DBG_COLOR_FONT,
            DBG_COLOR_BG,
        );
    }
}

/// `"{:3}%"` of current*100/total, or four spaces when total is zero (so
/// a stale value gets erased rather than risking a division by zero).
fn format_progress(current: u64, total: u64) -> TruncateWriter<8> {
    let mut text: TruncateWriter<8> = TruncateWriter::new();
    if total > 0 {
        let _ = write!(text, "{:3}%", current * 100 / total);
    } else {
        let _ = text.write_str("    ");
    }
    text
}

fn clear_top_screens() {
    let screens = Screens::current(&Mmio);
    for addr in screens.pair(Screen::Top) {
        // SAFETY: published address; slice dropped before the next one
        let frame = unsafe { frame_mut(addr, SCREEN_WIDTH_TOP) };
        clear_screen(frame, SCREEN_WIDTH_TOP, DBG_COLOR_BG);
    }
}

fn redraw(state: &DebugLog) {
    let screens = Screens::current(&Mmio);
    for (y, row) in state.placed_rows() {
        let len = row.iter().position(|&b| b == 0).unwrap_or(DBG_COLS);
        for addr in screens.pair(Screen::Top) {
            // SAFETY: published address; slice dropped before the next one
            let frame = unsafe { frame_mut(addr, SCREEN_WIDTH_TOP) };
            draw_string(frame, &row[..len], DBG_START_X, y, DBG_COLOR_FONT, DBG_COLOR_BG);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_of(row: &[u8]) -> &[u8] {
        let len = row.iter().position(|&b| b == 0).unwrap_or(row.len());
        &row[..len]
    }

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(DBG_ROWS, 22);
        assert_eq!(DBG_COLS, 48);
    }

    #[test]
    fn test_clear_then_one_line_round_trip() {
        let mut log = DebugLog::new();
        log.clear();
        log.push_line("hello");

        let non_empty: Vec<&[u8]> = log.rows().filter(|r| r[0] != 0).collect();
        assert_eq!(non_empty.len(), 1);

        // "hello" null-padded to the full column width
        let mut expected = [0u8; DBG_COLS];
        expected[..5].copy_from_slice(b"hello");
        assert_eq!(non_empty[0], &expected);
    }

    #[test]
    fn test_append_keeps_fifo_order() {
        let mut log = DebugLog::new();
        log.clear();
        log.push_line("first");
        log.push_line("second");
        log.push_line("third");

        let lines: Vec<&[u8]> = log.placed_rows().map(|(_, r)| line_of(r)).collect();
        assert_eq!(lines, vec![&b"first"[..], b"second", b"third"]);
    }

    #[test]
    fn test_overflow_discards_oldest() {
        let mut log = DebugLog::new();
        log.clear();
        for i in 0..DBG_ROWS + 3 {
            let line = format!("line {i}");
            log.push_line(&line);
        }

        let lines: Vec<String> = log
            .placed_rows()
            .map(|(_, r)| String::from_utf8(line_of(r).to_vec()).unwrap())
            .collect();
        assert_eq!(lines.len(), DBG_ROWS);
        assert_eq!(lines.first().unwrap(), "line 3");
        assert_eq!(lines.last().unwrap(), &format!("line {}", DBG_ROWS + 2));
    }

    #[test]
    fn test_placed_rows_advance_by_step() {
        let mut log = DebugLog::new();
        log.clear();
        log.push_line("a");
        log.push_line("b");

        let placed: Vec<(usize, &[u8])> = log.placed_rows().collect();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].0, DBG_START_Y);
        assert_eq!(placed[1].0, DBG_START_Y + DBG_STEP_Y);
        // oldest line sits at the top margin
        assert_eq!(line_of(placed[0].1), b"a");
    }

    #[test]
    fn test_long_line_truncated_to_columns() {
        let mut log = DebugLog::new();
        log.clear();
        let long = "x".repeat(DBG_COLS * 2);
        log.push_line(&long);

        let (_, row) = log.placed_rows().next().unwrap();
        assert_eq!(line_of(row).len(), DBG_COLS - 1);
        assert_eq!(row[DBG_COLS - 1], 0);
    }

    #[test]
    fn test_prime_fires_once() {
        let mut log = DebugLog::new();
        assert!(log.prime());
        assert!(!log.prime());

        // an explicit clear also counts as priming
        let mut log = DebugLog::new();
        log.clear();
        assert!(!log.prime());
    }

    #[test]
    fn test_progress_formatting() {
        assert_eq!(format_progress(50, 200).as_str(), " 25%");
        assert_eq!(format_progress(200, 200).as_str(), "100%");
        assert_eq!(format_progress(0, 7).as_str(), "  0%");
        assert_eq!(format_progress(7, 0).as_str(), "    ");
        assert_eq!(format_progress(123, 0).as_str(), "    ");
        // integer division, no rounding
        assert_eq!(format_progress(199, 200).as_str(), " 99%");
    }
}
