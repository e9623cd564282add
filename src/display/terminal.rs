// src/display/terminal.rs
//! Terminal-based display of the current fix

use super::Refresh;
use crate::{
    error::Result,
    gps::{distance, Coordinate, Fix, FixState},
    ingest::IngestHandle,
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType, DisableLineWrap, EnableLineWrap},
};
use std::io::{self, Write};

pub struct TerminalDisplay {
    target: Option<Coordinate>,
    min_satellites: u32,
}

impl TerminalDisplay {
    pub fn new(target: Option<Coordinate>, min_satellites: u32) -> Self {
        Self {
            target,
            min_satellites,
        }
    }

    /// Redraw once per second until Ctrl+C or the ingest task ends
    pub async fn run(&self, handle: &IngestHandle) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, Hide, DisableLineWrap)?;

        let mut refresh = Refresh::new();
        while handle.is_running() {
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

            self.render(&mut stdout, &handle.state())?;
            stdout.flush()?;

            if !refresh.tick().await {
                break;
            }
        }

        execute!(stdout, Show, EnableLineWrap)?;
        println!("\nShutting down...");
        Ok(())
    }

    /// Render one frame of the published fix
    pub fn render(&self, out: &mut impl Write, state: &FixState) -> Result<()> {
        let fix = &state.get();

        // Header
        execute!(
            out,
            SetForegroundColor(Color::Green),
            Print("=".repeat(50)),
            Print("\nGPS Fix Monitor\n"),
            Print("=".repeat(50)),
            Print("\n"),
            ResetColor
        )?;

        let age_str = match state.age_seconds() {
            Some(secs) if state.is_recent() => format!("{}s ago", secs),
            Some(secs) => format!("{}s ago, STALE", secs),
            None => "No fix received".to_string(),
        };
        execute!(out, Print(format!("UTC Time:    {} ({})\n\n", fix.format_time(), age_str)))?;

        self.render_status(out, fix)?;
        self.render_position(out, fix)?;

        if let Some(target) = self.target {
            self.render_target(out, fix, target)?;
        }

        execute!(
            out,
            SetForegroundColor(Color::Green),
            Print("=".repeat(50)),
            Print("\nPress Ctrl+C to exit\n"),
            ResetColor
        )?;
        Ok(())
    }

    fn render_status(&self, out: &mut impl Write, fix: &Fix) -> Result<()> {
        let (color, status) = if fix.has_fix {
            (Color::Green, format!("FIX ({})", fix.fix_description()))
        } else {
            (Color::Red, "NO FIX".to_string())
        };

        execute!(
            out,
            SetForegroundColor(Color::Magenta),
            Print("STATUS:\n"),
            ResetColor,
            Print(format!("  Satellites: {:>3} ", fix.satellites)),
            // One block per satellite, like the LED matrix the receiver used to drive
            Print("#".repeat(fix.satellites.min(64) as usize)),
            Print("\n  Fix:        "),
            SetForegroundColor(color),
            Print(status),
            ResetColor,
            Print("\n\n")
        )?;
        Ok(())
    }

    fn render_position(&self, out: &mut impl Write, fix: &Fix) -> Result<()> {
        execute!(
            out,
            SetForegroundColor(Color::Yellow),
            Print("POSITION:\n"),
            ResetColor,
            Print(format!("  Latitude:  {:>12.6}°\n", fix.latitude)),
            Print(format!("  Longitude: {:>12.6}°\n", fix.longitude)),
            Print(format!("  Altitude:  {:>12.1} m\n\n", fix.altitude))
        )?;
        Ok(())
    }

    fn render_target(&self, out: &mut impl Write, fix: &Fix, target: Coordinate) -> Result<()> {
        let distance = match distance::distance_to(fix, target, self.min_satellites) {
            Some(km) => format!("{:>12.3} km", km),
            None => format!("{:>12}", "Weak fix"),
        };

        execute!(
            out,
            SetForegroundColor(Color::Cyan),
            Print("TARGET:\n"),
            ResetColor,
            Print(format!("  Position:  {}\n", target)),
            Print(format!("  Distance:  {}\n\n", distance))
        )?;
        Ok(())
    }
}
