mod json;
mod report;
mod shared;

use std::io::{self, Write};
use crossterm::{cursor, execute, terminal};

use crate::controller::CycleReport;
use crate::error::Result;

pub use json::CycleJson;
pub use report::render;
pub use shared::{format_bytes, format_bytes_rate, format_number, truncate_str};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Redraw the report in place each cycle.
    Live,
    /// Print each report once, one after another.
    Plain,
    /// One JSON object per line.
    Json,
}

pub struct Presenter {
    mode: OutputMode,
    top: usize,
}

impl Presenter {
    pub fn new(mode: OutputMode, top: usize) -> Self {
        Self { mode, top }
    }

    pub fn present(&self, report: &CycleReport) -> Result<()> {
        let mut out = io::stdout().lock();
        self.write_report(&mut out, report)?;
        out.flush()?;
        Ok(())
    }

    pub fn write_report(&self, out: &mut impl Write, report: &CycleReport) -> Result<()> {
        match self.mode {
            OutputMode::Json => {
                serde_json::to_writer(&mut *out, &CycleJson::from(report))?;
                out.write_all(b"\n")?;
            }
            OutputMode::Live => {
                execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
                render(out, report, self.top)?;
            }
            OutputMode::Plain => {
                render(out, report, self.top)?;
                out.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}
