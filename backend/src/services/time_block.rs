//! Departure time block classification.
//!
//! Upstream rows carry the scheduled departure hour as a block code such as
//! `"0600-0659"`. The dashboard shows these as one of four parts of the day.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PipelineError, PipelineResult};
use crate::models::{FieldName, PredictionRecord};

/// Human-readable part of the day derived from a time block code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPart {
    #[serde(rename = "Early Morning & Late Night")]
    EarlyMorningLateNight,
    Morning,
    Afternoon,
    Evening,
    Unknown,
}

impl DayPart {
    /// Every day part, in display order.
    pub const ALL: [DayPart; 5] = [
        DayPart::EarlyMorningLateNight,
        DayPart::Morning,
        DayPart::Afternoon,
        DayPart::Evening,
        DayPart::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DayPart::EarlyMorningLateNight => "Early Morning & Late Night",
            DayPart::Morning => "Morning",
            DayPart::Afternoon => "Afternoon",
            DayPart::Evening => "Evening",
            DayPart::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DayPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a `HHMM-HHMM` time block into a part of the day.
///
/// Both halves are read as `hours * 100 + minutes` and matched against
/// non-overlapping ranges:
///
/// | start..end    | part                        |
/// |---------------|-----------------------------|
/// | 0000..0559    | Early Morning & Late Night  |
/// | 2000..2359    | Early Morning & Late Night  |
/// | 0600..1159    | Morning                     |
/// | 1200..1659    | Afternoon                   |
/// | 1700..1959    | Evening                     |
///
/// A well-formed block that straddles two ranges (e.g. `"0500-0659"`) is `Unknown`.
///
/// # Errors
/// Returns [`PipelineError::TimeBlockParse`] when the input is not exactly
/// `HHMM-HHMM` with hours 00-23 and minutes 00-59.
pub fn classify(time_block: &str) -> PipelineResult<DayPart> {
    let (start, end) = parse_time_block(time_block)?;

    let part = if end <= 559 || (start >= 2000 && end <= 2359) {
        DayPart::EarlyMorningLateNight
    } else if start >= 600 && end <= 1159 {
        DayPart::Morning
    } else if start >= 1200 && end <= 1659 {
        DayPart::Afternoon
    } else if start >= 1700 && end <= 1959 {
        DayPart::Evening
    } else {
        DayPart::Unknown
    };

    Ok(part)
}

/// Like [`classify`], but malformed input becomes [`DayPart::Unknown`].
pub fn classify_or_unknown(time_block: &str) -> DayPart {
    classify(time_block).unwrap_or_else(|e| {
        log::debug!("{}; showing as Unknown", e);
        DayPart::Unknown
    })
}

/// Classify the departure time block of a record.
///
/// # Errors
/// [`PipelineError::MissingField`] if the record has no `DEP_TIME_BLK`, or a
/// parse error from [`classify`].
pub fn classify_record(record: &PredictionRecord) -> PipelineResult<DayPart> {
    let block = record
        .departure_time_block
        .as_deref()
        .ok_or_else(|| PipelineError::missing_field(FieldName::DepTimeBlk))?;
    classify(block)
}

fn parse_time_block(input: &str) -> PipelineResult<(u32, u32)> {
    let bytes = input.as_bytes();
    if bytes.len() != 9 {
        return Err(PipelineError::time_block(
            input,
            format!("expected 9 characters, got {}", input.chars().count()),
        ));
    }
    if bytes[4] != b'-' {
        return Err(PipelineError::time_block(input, "expected '-' separator"));
    }

    let start = parse_hhmm(input, &bytes[..4])?;
    let end = parse_hhmm(input, &bytes[5..])?;
    Ok((start, end))
}

fn parse_hhmm(input: &str, digits: &[u8]) -> PipelineResult<u32> {
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(PipelineError::time_block(input, "non-numeric time"));
    }
    let value = digits
        .iter()
        .fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0'));
    let (hours, minutes) = (value / 100, value % 100);
    if hours > 23 {
        return Err(PipelineError::time_block(
            input,
            format!("hour {:02} out of range", hours),
        ));
    }
    if minutes > 59 {
        return Err(PipelineError::time_block(
            input,
            format!("minute {:02} out of range", minutes),
        ));
    }
    Ok(value)
}
