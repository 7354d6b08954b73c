use std::{collections::HashMap, hash::Hash};

use serde::Deserialize;

/// Loads a CSV into a HashMap based on the primary key of the type
/// # Error
/// Errors if a row cannot be deserialized
pub(crate) fn load<H: Hash + Eq, D: for<'de> Deserialize<'de>, PK: Fn(D) -> (H, D)>(
    data: &[u8],
    map: PK,
) -> Result<HashMap<H, D>, csv::Error> {
    deserialize(data).map(|r| r.map(&map)).collect()
}

/// Serializes `items` to CSV with a header row
/// # Error
/// Errors if an item cannot be serialized
pub fn serialize(items: impl Iterator<Item = impl serde::Serialize>) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for item in items {
        wtr.serialize(item)?;
    }
    wtr.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Deserializes the rows of a comma-delimited CSV with a header row.
/// Fields are trimmed.
pub fn deserialize<'a, D: serde::de::DeserializeOwned + 'a>(
    data: &'a [u8],
) -> impl Iterator<Item = Result<D, csv::Error>> + 'a {
    let rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(std::io::Cursor::new(data));
    rdr.into_deserialize()
}
