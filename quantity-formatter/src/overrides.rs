//! Per quantity type format overrides

use serde::{Deserialize, Serialize};
use quantity_format::FormatProps;

/// Replacement formats for one quantity type; `None` keeps the default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideFormatEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<FormatProps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imperial: Option<FormatProps>,
}

impl OverrideFormatEntry {
    pub fn metric(props: FormatProps) -> Self {
        OverrideFormatEntry { metric: Some(props), imperial: None }
    }

    pub fn imperial(props: FormatProps) -> Self {
        OverrideFormatEntry { metric: None, imperial: Some(props) }
    }

    pub fn both(metric: FormatProps, imperial: FormatProps) -> Self {
        OverrideFormatEntry { metric: Some(metric), imperial: Some(imperial) }
    }

    pub fn for_system(&self, use_imperial: bool) -> Option<&FormatProps> {
        if use_imperial {
            self.imperial.as_ref()
        } else {
            self.metric.as_ref()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.metric.is_none() && self.imperial.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantity_format::FormatType;
    use serde_json::json;

    #[test]
    fn test_for_system() {
        let entry = OverrideFormatEntry::imperial(FormatProps::new(FormatType::Decimal, 2));
        assert!(entry.for_system(true).is_some());
        assert!(entry.for_system(false).is_none());
        assert!(!entry.is_empty());
        assert!(OverrideFormatEntry::default().is_empty());
    }

    #[test]
    fn test_deserialize() {
        let entry: OverrideFormatEntry = serde_json::from_value(json!({
            "metric": {
                "type": "Decimal",
                "precision": 4,
                "formatTraits": ["keepSingleZero", "showUnitLabel"],
                "composite": { "units": [{ "name": "Units.CM", "label": "cm" }] }
            }
        }))
        .unwrap();
        assert!(entry.imperial.is_none());
        assert_eq!(entry.metric.unwrap().precision, Some(4));
    }
}
