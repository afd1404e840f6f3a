//! Prediction records as returned by the model service.
//!
//! Each record is one flight row from the uploaded dataset, echoed back with
//! the model's `PREDICTED_DEP_DEL15` column attached. Every column is optional
//! on the wire. Numeric columns keep whatever the service sent: numbers and
//! numeric strings become [`FieldValue::Number`], other text stays
//! [`FieldValue::Text`] so one odd cell never rejects the whole dataset.

use serde::{Deserialize, Deserializer, Serialize};

use super::field::{FieldName, FieldValue};

/// One row of model output for a single flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "DEP_TIME_BLK", default, deserialize_with = "lenient_text")]
    pub departure_time_block: Option<String>,
    #[serde(rename = "DAY_OF_WEEK", default, deserialize_with = "lenient_value")]
    pub day_of_week: FieldValue,
    #[serde(rename = "MONTH", default, deserialize_with = "lenient_value")]
    pub month: FieldValue,
    #[serde(rename = "SEGMENT_NUMBER", default, deserialize_with = "lenient_value")]
    pub segment_number: FieldValue,
    #[serde(rename = "DISTANCE_GROUP", default, deserialize_with = "lenient_value")]
    pub distance_group: FieldValue,
    #[serde(rename = "CONCURRENT_FLIGHTS", default, deserialize_with = "lenient_value")]
    pub concurrent_flights: FieldValue,
    #[serde(rename = "NUMBER_OF_SEATS", default, deserialize_with = "lenient_value")]
    pub number_of_seats: FieldValue,
    #[serde(rename = "PLANE_AGE", default, deserialize_with = "lenient_value")]
    pub plane_age: FieldValue,
    #[serde(rename = "AIRPORT_FLIGHTS_MONTH", default, deserialize_with = "lenient_value")]
    pub airport_flights_month: FieldValue,
    #[serde(rename = "AIRLINE_FLIGHTS_MONTH", default, deserialize_with = "lenient_value")]
    pub airline_flights_month: FieldValue,
    #[serde(
        rename = "AIRLINE_AIRPORT_FLIGHTS_MONTH",
        default,
        deserialize_with = "lenient_value"
    )]
    pub airline_airport_flights_month: FieldValue,
    #[serde(rename = "AVG_MONTHLY_PASS_AIRPORT", default, deserialize_with = "lenient_value")]
    pub avg_monthly_pass_airport: FieldValue,
    #[serde(rename = "AVG_MONTHLY_PASS_AIRLINE", default, deserialize_with = "lenient_value")]
    pub avg_monthly_pass_airline: FieldValue,
    #[serde(rename = "FLT_ATTENDANTS_PER_PASS", default, deserialize_with = "lenient_value")]
    pub flight_attendants_per_pass: FieldValue,
    #[serde(rename = "GROUND_SERV_PER_PASS", default, deserialize_with = "lenient_value")]
    pub ground_service_per_pass: FieldValue,
    #[serde(rename = "CARRIER_NAME", default, deserialize_with = "lenient_text")]
    pub carrier_name: Option<String>,
    #[serde(rename = "PREVIOUS_AIRPORT", default, deserialize_with = "lenient_text")]
    pub previous_airport: Option<String>,
    #[serde(rename = "DEPARTING_AIRPORT", default, deserialize_with = "lenient_text")]
    pub departing_airport: Option<String>,
    /// Daily maximum temperature (TMAX).
    #[serde(rename = "TMAX", default, deserialize_with = "lenient_value")]
    pub max_temp: FieldValue,
    /// Average wind speed (AWND).
    #[serde(rename = "AWND", default, deserialize_with = "lenient_value")]
    pub wind_speed: FieldValue,
    /// Snowfall (SNOW).
    #[serde(rename = "SNOW", default, deserialize_with = "lenient_value")]
    pub snow_presence: FieldValue,
    /// Snow depth on the ground (SNWD).
    #[serde(rename = "SNWD", default, deserialize_with = "lenient_value")]
    pub snow_depth: FieldValue,
    #[serde(rename = "PRCP", default, deserialize_with = "lenient_value")]
    pub precipitation: FieldValue,
    #[serde(rename = "PART_OF_DAY", default, deserialize_with = "lenient_value")]
    pub part_of_day: FieldValue,
    #[serde(rename = "DEP_DEL15", default, deserialize_with = "lenient_value")]
    pub actual_delay: FieldValue,
    #[serde(rename = "PREDICTED_DEP_DEL15", default, deserialize_with = "lenient_value")]
    pub predicted_delay: FieldValue,
}

impl PredictionRecord {
    /// Raw value of `field` on this record.
    pub fn value(&self, field: FieldName) -> FieldValue {
        match field {
            FieldName::Month => self.month.clone(),
            FieldName::DayOfWeek => self.day_of_week.clone(),
            FieldName::DepDel15 => self.actual_delay.clone(),
            FieldName::DepTimeBlk => self.departure_time_block.as_deref().into(),
            FieldName::DistanceGroup => self.distance_group.clone(),
            FieldName::SegmentNumber => self.segment_number.clone(),
            FieldName::ConcurrentFlights => self.concurrent_flights.clone(),
            FieldName::NumberOfSeats => self.number_of_seats.clone(),
            FieldName::CarrierName => self.carrier_name.as_deref().into(),
            FieldName::AirportFlightsMonth => self.airport_flights_month.clone(),
            FieldName::AirlineFlightsMonth => self.airline_flights_month.clone(),
            FieldName::AirlineAirportFlightsMonth => self.airline_airport_flights_month.clone(),
            FieldName::AvgMonthlyPassAirport => self.avg_monthly_pass_airport.clone(),
            FieldName::AvgMonthlyPassAirline => self.avg_monthly_pass_airline.clone(),
            FieldName::FltAttendantsPerPass => self.flight_attendants_per_pass.clone(),
            FieldName::GroundServPerPass => self.ground_service_per_pass.clone(),
            FieldName::PlaneAge => self.plane_age.clone(),
            FieldName::DepartingAirport => self.departing_airport.as_deref().into(),
            FieldName::PreviousAirport => self.previous_airport.as_deref().into(),
            FieldName::Prcp => self.precipitation.clone(),
            FieldName::Snow => self.snow_presence.clone(),
            FieldName::Snwd => self.snow_depth.clone(),
            FieldName::Tmax => self.max_temp.clone(),
            FieldName::Awnd => self.wind_speed.clone(),
            FieldName::PartOfDay => self.part_of_day.clone(),
            FieldName::PredictedDepDel15 => self.predicted_delay.clone(),
        }
    }

    /// Whether the flight was actually delayed. Anything but exactly 1 is on time.
    pub fn is_delayed(&self) -> bool {
        self.actual_delay.as_number() == Some(1.0)
    }

    /// Whether the model predicted a delay. Anything but exactly 1 is on time.
    pub fn is_predicted_delayed(&self) -> bool {
        self.predicted_delay.as_number() == Some(1.0)
    }
}

/// Accepts a number, a string or `null`.
///
/// Numeric strings are read as numbers and blank strings as missing. Any
/// other text is kept verbatim.
fn lenient_value<'de, D>(deserializer: D) -> Result<FieldValue, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Flag(bool),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => FieldValue::Missing,
        Some(Raw::Number(n)) => FieldValue::Number(n),
        Some(Raw::Flag(b)) => FieldValue::Text(b.to_string()),
        Some(Raw::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                FieldValue::Missing
            } else {
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => FieldValue::Number(n),
                    _ => FieldValue::Text(s),
                }
            }
        }
    })
}

/// Accepts a JSON string, a number (stringified) or `null`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Number(f64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Text(s)) => Some(s),
        Some(Raw::Integer(n)) => Some(n.to_string()),
        Some(Raw::Number(n)) => Some(n.to_string()),
    })
}
