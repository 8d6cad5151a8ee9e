/// Draw a formatted line on both buffers of the selected screen, in the
/// standard colors. Truncates past 256 bytes.
#[macro_export]
macro_rules! draw_text {
    ($x:expr, $y:expr, $screen:expr, $($arg:tt)*) => {
        $crate::video::draw::draw_both($x, $y, $screen, format_args!($($arg)*))
    };
}

/// Append a formatted line to the on-screen debug log.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::video::debug::log(format_args!($($arg)*))
    };
}
