use std::io::Read;

use crate::error::Error;
use crate::model::BookingRecord;

/// Parse a JSON array of booking records. A `null` document is rejected.
pub fn parse_records(json: &str) -> Result<Vec<BookingRecord>, Error> {
    let records: Option<Vec<BookingRecord>> = serde_json::from_str(json)?;
    records.ok_or_else(|| Error::InvalidArgument("records must not be null".into()))
}

pub fn read_records(reader: impl Read) -> Result<Vec<BookingRecord>, Error> {
    let records: Option<Vec<BookingRecord>> = serde_json::from_reader(reader)?;
    records.ok_or_else(|| Error::InvalidArgument("records must not be null".into()))
}
