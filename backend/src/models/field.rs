//! Typed field names and raw field values for prediction records.
//!
//! The dashboard used to look attributes up by string key; here the set of
//! permitted keys is closed and each key maps to exactly one record field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

define_field_names! {
    Month => "MONTH", "Month";
    DayOfWeek => "DAY_OF_WEEK", "Day of Week";
    /// Ground truth: 1 when departure was delayed by 15 minutes or more.
    DepDel15 => "DEP_DEL15", "Actual Delay";
    DepTimeBlk => "DEP_TIME_BLK", "Departure Time Block";
    DistanceGroup => "DISTANCE_GROUP", "Distance Group";
    SegmentNumber => "SEGMENT_NUMBER", "Segment Number";
    ConcurrentFlights => "CONCURRENT_FLIGHTS", "Concurrent Flights";
    NumberOfSeats => "NUMBER_OF_SEATS", "Number of Seats";
    CarrierName => "CARRIER_NAME", "Carrier Name";
    AirportFlightsMonth => "AIRPORT_FLIGHTS_MONTH", "Airport Flights per Month";
    AirlineFlightsMonth => "AIRLINE_FLIGHTS_MONTH", "Airline Flights per Month";
    AirlineAirportFlightsMonth => "AIRLINE_AIRPORT_FLIGHTS_MONTH", "Airline Flights at Airport per Month";
    AvgMonthlyPassAirport => "AVG_MONTHLY_PASS_AIRPORT", "Avg Monthly Passengers (Airport)";
    AvgMonthlyPassAirline => "AVG_MONTHLY_PASS_AIRLINE", "Avg Monthly Passengers (Airline)";
    FltAttendantsPerPass => "FLT_ATTENDANTS_PER_PASS", "Flight Attendants per Passenger";
    GroundServPerPass => "GROUND_SERV_PER_PASS", "Ground Service per Passenger";
    PlaneAge => "PLANE_AGE", "Plane Age";
    DepartingAirport => "DEPARTING_AIRPORT", "Departing Airport";
    PreviousAirport => "PREVIOUS_AIRPORT", "Previous Airport";
    Prcp => "PRCP", "Precipitation";
    Snow => "SNOW", "Presence of Snow";
    Snwd => "SNWD", "Snow Depth";
    Tmax => "TMAX", "Temperature";
    Awnd => "AWND", "Wind Speed";
    /// Numeric day-part code (1-5) added by the model service.
    PartOfDay => "PART_OF_DAY", "Part of Day";
    /// Model output: 1 when a delay is predicted.
    PredictedDepDel15 => "PREDICTED_DEP_DEL15", "Predicted Delay";
}

impl FieldName {
    /// Fields offered as the grouping attribute of the line and radar charts.
    pub const GROUPING_FIELDS: &'static [FieldName] = &[
        FieldName::DistanceGroup,
        FieldName::ConcurrentFlights,
        FieldName::DepTimeBlk,
        FieldName::PlaneAge,
        FieldName::Tmax,
        FieldName::Awnd,
        FieldName::Snwd,
        FieldName::Prcp,
        FieldName::DayOfWeek,
        FieldName::Month,
        FieldName::SegmentNumber,
        FieldName::Snow,
        FieldName::PartOfDay,
    ];

    /// Fields offered on either axis of the scatter plot.
    pub const SCATTER_FIELDS: &'static [FieldName] = &[
        FieldName::ConcurrentFlights,
        FieldName::PlaneAge,
        FieldName::Tmax,
        FieldName::Awnd,
        FieldName::Snow,
        FieldName::Snwd,
        FieldName::Prcp,
    ];
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = PipelineError;

    /// Parse an upstream column name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FieldName::ALL
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PipelineError::unknown_field(s))
    }
}

/// Raw value of one field on one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl FieldValue {
    /// Numeric reading of the value, if it is a finite decimal number.
    ///
    /// Text counts as numeric when it parses after trimming (`" 12 "`, `"1e3"`);
    /// `"NaN"` and `"inf"` do not.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
            FieldValue::Missing => return None,
        };
        n.is_finite().then_some(n)
    }

    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Canonical string used to group equal values.
    ///
    /// Numbers use their shortest form so `1` and `1.0` share a key, text is
    /// kept verbatim and missing values all map to `"undefined"`.
    pub fn group_key(&self) -> String {
        match self {
            FieldValue::Number(n) if *n == 0.0 => "0".to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Missing => "undefined".to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.group_key())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Missing)
    }
}
