/*
 * I/O Expander Seam
 *
 * The backlight is not reachable through the display controller's own
 * register space; it sits behind an I/O expander owned by the surrounding
 * system. This module models that single side-channel write as a trait the
 * system registers an implementation of before bring-up runs.
 */

use spin::Mutex;

/// Errors the expander write primitive can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpanderError {
    /// The device did not acknowledge the transfer
    Nack,
    /// The expander bus is held by another transaction
    BusBusy,
}

/// External register-write primitive supplied by the surrounding system.
///
/// `bus_id` selects the expander bus, `reg` the register on the device.
/// The display driver performs exactly one write through this seam, to turn
/// the backlight on.
pub trait IoExpander: Send + Sync {
    fn write_register(&self, bus_id: u8, reg: u8, value: u8) -> Result<(), ExpanderError>;
}

static EXPANDER: Mutex<Option<&'static dyn IoExpander>> = Mutex::new(None);

/// Registers the system's expander implementation. Call before `init`.
pub fn register(expander: &'static dyn IoExpander) {
    *EXPANDER.lock() = Some(expander);
}

/// The registered expander, if any.
pub fn registered() -> Option<&'static dyn IoExpander> {
    *EXPANDER.lock()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    pub struct RecordingExpander {
        pub writes: StdMutex<Vec<(u8, u8, u8)>>,
        pub fail: bool,
    }

    impl RecordingExpander {
        pub fn new(fail: bool) -> Self {
            Self {
                writes: StdMutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl IoExpander for RecordingExpander {
        fn write_register(&self, bus_id: u8, reg: u8, value: u8) -> Result<(), ExpanderError> {
            if self.fail {
                return Err(ExpanderError::Nack);
            }
            self.writes.lock().unwrap().push((bus_id, reg, value));
            Ok(())
        }
    }

    #[test]
    fn test_write_recorded() {
        let exp = RecordingExpander::new(false);
        exp.write_register(3, 0x22, 0b101010).unwrap();
        assert_eq!(exp.writes.lock().unwrap().as_slice(), &[(3, 0x22, 0b101010)]);
    }

    #[test]
    fn test_failing_expander_reports() {
        let exp = RecordingExpander::new(true);
        assert_eq!(
            exp.write_register(3, 0x22, 0),
            Err(ExpanderError::Nack)
        );
    }
}
