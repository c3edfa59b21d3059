use serde::Serialize;
use std::collections::HashMap;
use std::fmt::{self, Display};
use strum_macros::{EnumIter, EnumString};

/// `EdgeErrorCode` contains the error codes associated with specific errors.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, EnumString, EnumIter)]
pub enum EdgeErrorCode {
    E001,
    E002,
    E003,
    E004,
    E005,
    E006,
    E007,
    E008,
    E009,
    E010,
    E011,
    E012,
    E013,
    E014,
    E015,
    E016,
    E017,
    E018,
    E019,
    E020,
    E021,
    E022,
    E023,
    E024,
    E025,
    E026,
    E027,
    E028,
    E029,
    E030,
    E031,
}

impl Display for EdgeErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:?}", &self)
    }
}

impl EdgeErrorCode {
    pub fn explain(&self) -> String {
        let explanation = self.explanations().get(self).cloned();
        explanation.unwrap_or_else(|| format!("There is no explanation for {}", self))
    }

    // builds a Map of every possible code and its explanation, so we can
    // access from the `explain` function
    fn explanations(&self) -> HashMap<EdgeErrorCode, String> {
        let contents = vec![
            (EdgeErrorCode::E001, include_str!("./codes/E001.md").to_string()),
            (EdgeErrorCode::E002, include_str!("./codes/E002.md").to_string()),
            (EdgeErrorCode::E003, include_str!("./codes/E003.md").to_string()),
            (EdgeErrorCode::E004, include_str!("./codes/E004.md").to_string()),
            (EdgeErrorCode::E005, include_str!("./codes/E005.md").to_string()),
            (EdgeErrorCode::E006, include_str!("./codes/E006.md").to_string()),
            (EdgeErrorCode::E007, include_str!("./codes/E007.md").to_string()),
            (EdgeErrorCode::E008, include_str!("./codes/E008.md").to_string()),
            (EdgeErrorCode::E009, include_str!("./codes/E009.md").to_string()),
            (EdgeErrorCode::E010, include_str!("./codes/E010.md").to_string()),
            (EdgeErrorCode::E011, include_str!("./codes/E011.md").to_string()),
            (EdgeErrorCode::E012, include_str!("./codes/E012.md").to_string()),
            (EdgeErrorCode::E013, include_str!("./codes/E013.md").to_string()),
            (EdgeErrorCode::E014, include_str!("./codes/E014.md").to_string()),
            (EdgeErrorCode::E015, include_str!("./codes/E015.md").to_string()),
            (EdgeErrorCode::E016, include_str!("./codes/E016.md").to_string()),
            (EdgeErrorCode::E017, include_str!("./codes/E017.md").to_string()),
            (EdgeErrorCode::E018, include_str!("./codes/E018.md").to_string()),
            (EdgeErrorCode::E019, include_str!("./codes/E019.md").to_string()),
            (EdgeErrorCode::E020, include_str!("./codes/E020.md").to_string()),
            (EdgeErrorCode::E021, include_str!("./codes/E021.md").to_string()),
            (EdgeErrorCode::E022, include_str!("./codes/E022.md").to_string()),
            (EdgeErrorCode::E023, include_str!("./codes/E023.md").to_string()),
            (EdgeErrorCode::E024, include_str!("./codes/E024.md").to_string()),
            (EdgeErrorCode::E025, include_str!("./codes/E025.md").to_string()),
            (EdgeErrorCode::E026, include_str!("./codes/E026.md").to_string()),
            (EdgeErrorCode::E027, include_str!("./codes/E027.md").to_string()),
            (EdgeErrorCode::E028, include_str!("./codes/E028.md").to_string()),
            (EdgeErrorCode::E029, include_str!("./codes/E029.md").to_string()),
            (EdgeErrorCode::E030, include_str!("./codes/E030.md").to_string()),
            (EdgeErrorCode::E031, include_str!("./codes/E031.md").to_string()),
        ];
        contents.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::EdgeErrorCode;

    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn all_codes_have_explanations() {
        for code in EdgeErrorCode::iter() {
            let explanation = code.explain();
            assert!(!explanation.is_empty());
            assert!(!explanation.starts_with("There is no explanation"));
        }
    }

    #[test]
    fn codes_parse_from_strings() {
        assert_eq!(EdgeErrorCode::from_str("E016").unwrap(), EdgeErrorCode::E016);
        assert!(EdgeErrorCode::from_str("E999").is_err());
    }
}
