//! Status channel: the startup banner and one status line per cycle.
//!
//! Line format (label left-aligned in an 8-column field):
//!
//! ```text
//! Status: NORMAL  | Sensor: 000000
//! Status: WARNING | Sensor: 001000
//! Status: CRISIS  | Sensor: 111111
//! ```

use core::fmt::Write as _;
use std::io;

use fess_common::consts::STARTUP_BANNER;
use fess_common::safety::{SensorReading, SystemState};

/// Longest line: `"Status: WARNING | Sensor: 000000"`.
pub const STATUS_LINE_CAPACITY: usize = 40;

/// Fixed-capacity status line, formatted without heap allocation.
pub type StatusLine = heapless::String<STATUS_LINE_CAPACITY>;

/// Format the status line for one cycle.
pub fn format_status(state: SystemState, sensors: SensorReading) -> StatusLine {
    let mut line = StatusLine::new();
    // Capacity covers the longest label; the write cannot overflow.
    let _ = write!(
        line,
        "Status: {:<8}| Sensor: {}",
        state.label(),
        sensors.bit_string()
    );
    line
}

/// Writes the banner and status lines to a text sink.
pub struct StatusReporter<W: io::Write> {
    sink: W,
}

impl<W: io::Write> StatusReporter<W> {
    /// Wrap a sink (stdout in production, a buffer in tests).
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Emit the startup banner.
    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.sink, "{STARTUP_BANNER}")?;
        self.sink.flush()
    }

    /// Emit one status line.
    pub fn report(&mut self, state: SystemState, sensors: SensorReading) -> io::Result<()> {
        let line = format_status(state, sensors);
        self.sink.write_all(line.as_bytes())?;
        self.sink.write_all(b"\n")?;
        self.sink.flush()
    }

    /// Borrow the sink.
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Unwrap the sink.
    pub fn into_sink(self) -> W {
        self.sink
    }
}
