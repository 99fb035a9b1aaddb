use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::matrix::BinaryMatrix;
use crate::shape::Shape;

impl<S: Shape> Serialize for BinaryMatrix<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_str(&format!("{self:#}"))
    }
}

impl<'de, S: Shape> Deserialize<'de> for BinaryMatrix<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(de::Error::custom)
    }
}
