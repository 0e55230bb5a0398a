//! Records exchanged between the pipeline stages.

use crate::business_type::BusinessType;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    #[default]
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub sale_price: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub name: String,
    pub text: String,
    #[serde(
        default,
        deserialize_with = "lenient_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub tiktok: Option<String>,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Present links as `(platform, url)` pairs in a fixed platform order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("instagram", &self.instagram),
            ("facebook", &self.facebook),
            ("twitter", &self.twitter),
            ("linkedin", &self.linkedin),
            ("youtube", &self.youtube),
            ("tiktok", &self.tiktok),
        ]
        .into_iter()
        .filter_map(|(platform, url)| url.as_deref().map(|u| (platform, u)))
    }
}

/// Best-effort extraction of a business's public website
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapedRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub hero_image: Option<String>,
    pub gallery_images: Vec<String>,
    /// Every image discovered on the page, gallery candidates or not
    pub images: Vec<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub business_type: Option<BusinessType>,
    pub industry: Option<String>,
    pub category: Option<String>,
    pub services: Vec<String>,
    pub features: Vec<String>,
    pub products: Vec<Product>,
    pub contact: ContactInfo,
    pub social_links: SocialLinks,
    pub opening_hours: BTreeMap<String, String>,
    pub about_content: Option<String>,
    pub testimonials: Vec<Testimonial>,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmSocialLinks {
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferredColors {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

/// Facts an LLM asserted about a business from free text.
///
/// Every field is optional; absence means the model did not assert it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmExtractedRecord {
    pub business_name: Option<String>,
    pub description: Option<String>,
    pub business_type: Option<BusinessType>,
    pub industry: Option<String>,
    pub category: Option<String>,
    pub services: Vec<String>,
    pub features: Vec<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub social_links: LlmSocialLinks,
    pub preferred_colors: PreferredColors,
    pub target_audience: Option<String>,
    pub tone: Option<String>,
    pub unique_selling_points: Vec<String>,
    pub key_messages: Vec<String>,
    pub call_to_action: Option<String>,
}

impl LlmExtractedRecord {
    /// Drop blank strings so they read as "not asserted"
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.business_name,
            &mut self.description,
            &mut self.industry,
            &mut self.category,
            &mut self.phone,
            &mut self.email,
            &mut self.address,
            &mut self.social_links.instagram,
            &mut self.social_links.facebook,
            &mut self.social_links.twitter,
            &mut self.social_links.linkedin,
            &mut self.preferred_colors.primary,
            &mut self.preferred_colors.secondary,
            &mut self.target_audience,
            &mut self.tone,
            &mut self.call_to_action,
        ] {
            *field = field
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
        for list in [
            &mut self.services,
            &mut self.features,
            &mut self.unique_selling_points,
            &mut self.key_messages,
        ] {
            list.retain(|item| !item.trim().is_empty());
        }
        // Blank and unrecognised labels both parse to `Other`, which says nothing.
        self.business_type = self
            .business_type
            .filter(|bt| *bt != BusinessType::Other);
        self
    }
}

/// Single canonical view of a business after merging both sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedRecord {
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub hero_image: Option<String>,
    pub gallery_images: Vec<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub business_type: BusinessType,
    pub industry: String,
    pub category: String,
    pub services: Vec<String>,
    pub features: Vec<String>,
    pub products: Vec<Product>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub social_links: SocialLinks,
    pub opening_hours: BTreeMap<String, String>,
    pub about_content: Option<String>,
    pub testimonials: Vec<Testimonial>,
    pub target_audience: Option<String>,
    pub tone: Option<String>,
    pub unique_selling_points: Vec<String>,
    pub key_messages: Vec<String>,
    pub call_to_action: Option<String>,
    pub confidence: Confidence,
    pub raw_text: Option<String>,
    pub scraped_images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    pub label: String,
}

/// Generated hero and SEO copy carried alongside the enriched record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCopy {
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub tagline: Option<String>,
    pub cta_text: Option<String>,
    pub meta_description: Option<String>,
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    pub record: MergedRecord,
    pub copy: PageCopy,
}

impl From<MergedRecord> for EnrichedRecord {
    fn from(record: MergedRecord) -> Self {
        Self {
            record,
            copy: PageCopy::default(),
        }
    }
}

/// Accepts `"500+"` as well as a bare `500`
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

/// Star rating from an integer, a float or a numeric string, rounded and
/// clamped to 0..=5. Anything else reads as no rating.
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let rating = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(rating
        .filter(|r| r.is_finite())
        .map(|r| r.round().clamp(0.0, 5.0) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_drops_blank_values() {
        let record = LlmExtractedRecord {
            business_name: Some("  ".into()),
            description: Some(" Fresh bread daily ".into()),
            services: vec!["".into(), "Catering".into()],
            ..Default::default()
        }
        .normalized();

        assert_eq!(record.business_name, None);
        assert_eq!(record.description.as_deref(), Some("Fresh bread daily"));
        assert_eq!(record.services, vec!["Catering".to_string()]);
    }

    #[test]
    fn test_llm_record_accepts_partial_json() {
        let record: LlmExtractedRecord = serde_json::from_str(
            r#"{"businessName":"Luna Spa","businessType":"spa","services":["Massages"]}"#,
        )
        .unwrap();
        assert_eq!(record.business_name.as_deref(), Some("Luna Spa"));
        assert_eq!(record.business_type, Some(BusinessType::Spa));
        assert!(record.features.is_empty());
    }

    #[test]
    fn test_social_links_iter_skips_missing() {
        let links = SocialLinks {
            facebook: Some("https://facebook.com/acme".into()),
            tiktok: Some("https://tiktok.com/@acme".into()),
            ..Default::default()
        };
        let platforms: Vec<_> = links.iter().map(|(p, _)| p).collect();
        assert_eq!(platforms, vec!["facebook", "tiktok"]);
        assert!(SocialLinks::default().is_empty());
    }

    #[test]
    fn test_stat_value_accepts_numbers() {
        let stats: Vec<Stat> = serde_json::from_str(
            r#"[{"value": 500, "label": "Clients"}, {"value": "10+", "label": "Years"}, {"value": 4.9, "label": "Rating"}]"#,
        )
        .unwrap();
        assert_eq!(stats[0].value, "500");
        assert_eq!(stats[1].value, "10+");
        assert_eq!(stats[2].value, "4.9");
        assert!(serde_json::from_str::<Stat>(r#"{"value": null, "label": "x"}"#).is_err());
    }

    #[test]
    fn test_testimonial_rating_is_lenient() {
        let parse = |rating: &str| {
            serde_json::from_str::<Testimonial>(&format!(
                r#"{{"name": "Ana", "text": "Lovely", "rating": {rating}}}"#
            ))
            .unwrap()
            .rating
        };
        assert_eq!(parse("5"), Some(5));
        assert_eq!(parse("4.5"), Some(5));
        assert_eq!(parse("4.4"), Some(4));
        assert_eq!(parse("\"3\""), Some(3));
        assert_eq!(parse("9"), Some(5));
        assert_eq!(parse("null"), None);
        assert_eq!(parse("\"great\""), None);

        let missing: Testimonial =
            serde_json::from_str(r#"{"name": "Ana", "text": "Lovely"}"#).unwrap();
        assert_eq!(missing.rating, None);
    }
}
