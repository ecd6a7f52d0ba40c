//! Interactive entry of the primary mission.
//!
//! Waypoints are typed one per line as `x y z T`, where `T` is seconds or
//! `YYYY-MM-DD HH:MM:SS` (UTC). Bad lines are reported and asked again.

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use deconflict_core::{MissionPlan, Waypoint};
use std::io::{BufRead, Write};
use thiserror::Error;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("expected 4 values (x y z seconds) or 5 values (x y z YYYY-MM-DD HH:MM:SS), got {0}")]
    FieldCount(usize),

    #[error("invalid number {0:?}")]
    Number(String),

    #[error("invalid timestamp {0:?}, expected seconds or YYYY-MM-DD HH:MM:SS")]
    Timestamp(String),
}

/// Parse one waypoint line.
pub fn parse_waypoint_line(line: &str) -> Result<Waypoint, InputError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 && fields.len() != 5 {
        return Err(InputError::FieldCount(fields.len()));
    }

    let number = |s: &str| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| InputError::Number(s.to_string()))
    };
    let x = number(fields[0])?;
    let y = number(fields[1])?;
    let z = number(fields[2])?;

    let timestamp = if fields.len() == 4 {
        fields[3]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| InputError::Timestamp(fields[3].to_string()))?
    } else {
        let text = format!("{} {}", fields[3], fields[4]);
        let parsed = NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT)
            .map_err(|_| InputError::Timestamp(text.clone()))?;
        parsed.and_utc().timestamp_millis() as f64 / 1000.0
    };

    Ok(Waypoint::new(x, y, z, timestamp))
}

/// Prompt for a complete mission, asking again until every answer is usable.
///
/// The returned plan always satisfies the mission invariants.
pub fn prompt_mission<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<MissionPlan> {
    let id = loop {
        write!(output, "Enter the Drone ID for the primary mission: ")?;
        output.flush()?;
        let line = read_line(input)?;
        if line.is_empty() {
            writeln!(output, "Drone ID must not be empty.")?;
            continue;
        }
        break line;
    };

    let count = loop {
        write!(output, "Enter the number of waypoints for the primary mission: ")?;
        output.flush()?;
        let line = read_line(input)?;
        match line.parse::<usize>() {
            Ok(n) if n >= 2 => break n,
            _ => writeln!(output, "Please enter a whole number of at least 2.")?,
        }
    };

    writeln!(
        output,
        "Enter waypoint details as: x y z SECONDS  or  x y z YYYY-MM-DD HH:MM:SS"
    )?;

    let mut waypoints: Vec<Waypoint> = Vec::with_capacity(count);
    while waypoints.len() < count {
        write!(output, "Waypoint {}: ", waypoints.len() + 1)?;
        output.flush()?;
        let line = read_line(input)?;

        let waypoint = match parse_waypoint_line(&line) {
            Ok(wp) => wp,
            Err(e) => {
                writeln!(output, "Invalid input: {}", e)?;
                continue;
            }
        };
        if let Some(previous) = waypoints.last() {
            if waypoint.timestamp <= previous.timestamp {
                writeln!(
                    output,
                    "Timestamp must be later than the previous waypoint ({}).",
                    previous.timestamp
                )?;
                continue;
            }
        }
        waypoints.push(waypoint);
    }

    Ok(MissionPlan::new(id, waypoints))
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input ended before the mission was complete");
    }
    Ok(line.trim().to_string())
}
