use serde::Deserialize;

// clients send ids either as numbers or as the strings they got from form
// controls, so both `1` and `"1"` are accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawId")]
pub struct FlexId(pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl TryFrom<RawId> for FlexId {
    type Error = String;

    fn try_from(value: RawId) -> Result<Self, Self::Error> {
        match value {
            RawId::Number(v) => Ok(FlexId(v)),
            RawId::Text(text) => match text.trim().parse::<i64>() {
                Ok(v) => Ok(FlexId(v)),
                Err(_) => Err(format!("Wrong value {text}, can not parse to i64")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let ids: Vec<FlexId> = serde_json::from_str(r#"[1, "2", " 3 "]"#).unwrap();
        assert_eq!(ids, vec![FlexId(1), FlexId(2), FlexId(3)]);
    }

    #[test]
    fn rejects_other_values() {
        assert!(serde_json::from_str::<FlexId>(r#""one""#).is_err());
        assert!(serde_json::from_str::<FlexId>("1.5").is_err());
        assert!(serde_json::from_str::<FlexId>("null").is_err());
    }
}
