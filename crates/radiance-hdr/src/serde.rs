#![cfg(feature = "serde")]

use serde::ser::*;

use crate::header::{HdrHeader, ProgramType};

impl Serialize for ProgramType
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for HdrHeader
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("HdrHeader", 9)?;

        state.serialize_field("program_type", &self.program_type)?;
        state.serialize_field("comment", &self.comment)?;
        state.serialize_field("format", &self.format)?;
        state.serialize_field("gamma", &self.gamma)?;
        state.serialize_field("exposure", &self.exposure)?;
        state.serialize_field("color_corr", &self.color_corr)?;
        state.serialize_field("pixel_aspect", &self.pixel_aspect)?;
        state.serialize_field("primaries", &self.primaries)?;
        state.serialize_field("metadata", &self.metadata)?;

        state.end()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::{HdrHeader, ProgramType};

    #[test]
    fn header_serializes_as_struct() {
        let mut header = HdrHeader {
            program_type: ProgramType::Rgbe,
            comment: String::from("sky"),
            ..HdrHeader::default()
        };
        header
            .metadata
            .insert(String::from("EXPOSURE"), String::from("2"));

        let value = serde_json::to_value(&header).unwrap();

        assert_eq!(value["program_type"], "RGBE");
        assert_eq!(value["comment"], "sky");
        assert_eq!(value["format"], "32-bit_rle_rgbe");
        assert_eq!(value["gamma"], 1.0);
        assert_eq!(value["color_corr"], serde_json::json!([1.0, 1.0, 1.0]));
        assert_eq!(value["metadata"]["EXPOSURE"], "2");
    }
}
