use serde::{Deserialize, Serialize};

/// One person as extracted from a staff listing page.
///
/// Field order is load-bearing: serde emits JSON keys and CSV columns in
/// declaration order, and the output files promise
/// `name,honorific,title,category,profile_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub honorific: Option<String>,
    pub title: Option<String>,
    pub category: String,
    pub profile_url: Option<String>,
}

impl PersonRecord {
    /// Honorific and name re-joined, for console previews.
    pub fn display_name(&self) -> String {
        match &self.honorific {
            Some(h) => format!("{} {}", h, self.name),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_rejoins_honorific() {
        let rec = PersonRecord {
            name: "Uwe Aickelin".into(),
            honorific: Some("Prof".into()),
            title: Some("Head of School".into()),
            category: "Leadership".into(),
            profile_url: None,
        };
        assert_eq!(rec.display_name(), "Prof Uwe Aickelin");
    }

    #[test]
    fn display_name_without_honorific() {
        let rec = PersonRecord {
            name: "Jane Smith".into(),
            honorific: None,
            title: None,
            category: "Professional staff".into(),
            profile_url: None,
        };
        assert_eq!(rec.display_name(), "Jane Smith");
    }

    #[test]
    fn json_keys_in_column_order_with_explicit_nulls() {
        let rec = PersonRecord {
            name: "Jane Smith".into(),
            honorific: None,
            title: None,
            category: "General".into(),
            profile_url: None,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Jane Smith","honorific":null,"title":null,"category":"General","profile_url":null}"#
        );
    }
}
