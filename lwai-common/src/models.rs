//! Typed section records
//!
//! Rows store their section-specific fields as a JSON document. These types
//! are the shape each section's document must have.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result, Section};

/// A stored row surfaced with its identity and ordering key
///
/// Section fields are flattened next to `id` and `sort_order` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    pub id: String,
    pub sort_order: i64,
    #[serde(flatten)]
    pub fields: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    pub cta_primary_text: String,
    pub cta_primary_link: String,
    pub cta_secondary_text: String,
    pub cta_secondary_link: String,
    #[serde(default)]
    pub hero_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemContent {
    pub title: String,
    pub description: String,
    pub highlight_text: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetContent {
    pub title: String,
    pub subtitle: String,
    pub card_title: String,
    pub card_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContent {
    pub icon: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepContent {
    pub step_number: i64,
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SciencePoint {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaContent {
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CtaContent {
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub steps: Vec<String>,
    pub button_text: String,
    pub button_link: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterContent {
    pub tagline: String,
    pub subtitle: String,
    #[serde(default)]
    pub quick_links: Vec<QuickLink>,
    pub newsletter_title: String,
    pub copyright: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub site_title: String,
    pub site_description: String,
    pub site_url: String,
}

/// Keys handled by the store itself rather than kept in the field document
pub const ROW_KEYS: [&str; 5] = ["id", "sort_order", "is_active", "created_at", "updated_at"];

/// Decode a field document into the given record type
pub fn decode_fields<T: DeserializeOwned>(section: Section, fields: &Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(fields.clone())).map_err(|source| Error::InvalidRecord {
        section: section.slug(),
        source,
    })
}

/// Check that a field document matches the section's record type
///
/// Unknown extra keys are tolerated; missing or mistyped fields are not.
pub fn validate_fields(section: Section, fields: &Map<String, Value>) -> Result<()> {
    match section {
        Section::Hero => decode_fields::<HeroContent>(section, fields).map(drop),
        Section::Problem => decode_fields::<ProblemContent>(section, fields).map(drop),
        Section::Meet => decode_fields::<MeetContent>(section, fields).map(drop),
        Section::Features => decode_fields::<FeatureContent>(section, fields).map(drop),
        Section::HowItWorks => decode_fields::<StepContent>(section, fields).map(drop),
        Section::Science => decode_fields::<SciencePoint>(section, fields).map(drop),
        Section::Personas => decode_fields::<PersonaContent>(section, fields).map(drop),
        Section::Cta => decode_fields::<CtaContent>(section, fields).map(drop),
        Section::TechStack => decode_fields::<TechItem>(section, fields).map(drop),
        Section::Faq => decode_fields::<FaqItem>(section, fields).map(drop),
        Section::Footer => decode_fields::<FooterContent>(section, fields).map(drop),
        Section::Settings => decode_fields::<SiteSettings>(section, fields).map(drop),
    }
}

/// Turn a record's fields back into a document for storage
pub fn encode_fields<T: Serialize>(fields: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(fields) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::InvalidInput(format!(
            "record fields must serialize to an object, got {}",
            other
        ))),
        Err(e) => Err(Error::InvalidInput(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_faq_fields_validate() {
        let fields = as_map(json!({"question": "Is it free?", "answer": "Yes."}));
        assert!(validate_fields(Section::Faq, &fields).is_ok());
    }

    #[test]
    fn test_missing_field_rejected() {
        let fields = as_map(json!({"question": "Is it free?"}));
        let err = validate_fields(Section::Faq, &fields).unwrap_err();
        assert!(err.to_string().contains("faq"));
        assert!(err.to_string().contains("answer"));
    }

    #[test]
    fn test_optional_image_defaults_to_none() {
        let fields = as_map(json!({"text": "Students cramming for finals"}));
        let persona: PersonaContent = decode_fields(Section::Personas, &fields).unwrap();
        assert_eq!(persona.image, None);
    }

    #[test]
    fn test_record_flattens_fields() {
        let record = Record {
            id: "abc".to_string(),
            sort_order: 2,
            fields: FaqItem {
                question: "Q".to_string(),
                answer: "A".to_string(),
            },
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"id": "abc", "sort_order": 2, "question": "Q", "answer": "A"})
        );
    }

    #[test]
    fn test_footer_quick_links_typed() {
        let fields = as_map(json!({
            "tagline": "t",
            "subtitle": "s",
            "quick_links": [{"label": "FAQ", "href": "#faq"}],
            "newsletter_title": "n",
            "copyright": "c"
        }));
        let footer: FooterContent = decode_fields(Section::Footer, &fields).unwrap();
        assert_eq!(footer.quick_links[0].href, "#faq");

        let bad = as_map(json!({
            "tagline": "t",
            "subtitle": "s",
            "quick_links": ["#faq"],
            "newsletter_title": "n",
            "copyright": "c"
        }));
        assert!(validate_fields(Section::Footer, &bad).is_err());
    }

    #[test]
    fn test_encode_fields_round_trips_through_validation() {
        let step = StepContent {
            step_number: 1,
            title: "Snap".to_string(),
            description: "Take a photo".to_string(),
            icon: "📸".to_string(),
        };
        let map = encode_fields(&step).unwrap();
        assert!(validate_fields(Section::HowItWorks, &map).is_ok());
    }
}
