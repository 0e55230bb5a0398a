//! Backfills missing page copy, via the LLM when available and from static
//! per-business-type templates otherwise. Never fails.

use crate::business_type::BusinessType;
use crate::fallback_templates::{fill_placeholders, template_for};
use crate::llm_providers::{CompletionRequest, LLMProvider, END_MARKER};
use crate::records::{MergedRecord, Stat, Testimonial};
use crate::utils::extract_json_from_text;
use crate::PipelineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const GENERATION_TEMPERATURE: f32 = 0.7;
pub const GENERATION_MAX_TOKENS: u32 = 1500;

/// Keys the generator knows how to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentField {
    Headline,
    Subheadline,
    Services,
    Features,
    AboutText,
    Testimonials,
    Stats,
    CtaText,
    Tagline,
    MetaDescription,
}

impl ContentField {
    pub const ALL: [ContentField; 10] = [
        ContentField::Headline,
        ContentField::Subheadline,
        ContentField::Services,
        ContentField::Features,
        ContentField::AboutText,
        ContentField::Testimonials,
        ContentField::Stats,
        ContentField::CtaText,
        ContentField::Tagline,
        ContentField::MetaDescription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentField::Headline => "headline",
            ContentField::Subheadline => "subheadline",
            ContentField::Services => "services",
            ContentField::Features => "features",
            ContentField::AboutText => "aboutText",
            ContentField::Testimonials => "testimonials",
            ContentField::Stats => "stats",
            ContentField::CtaText => "ctaText",
            ContentField::Tagline => "tagline",
            ContentField::MetaDescription => "metaDescription",
        }
    }

    fn json_shape(&self) -> &'static str {
        match self {
            ContentField::Headline => "string, max 10 words",
            ContentField::Subheadline => "string, one sentence",
            ContentField::Services => "array of 4-6 short service names",
            ContentField::Features => "array of 4 short feature names",
            ContentField::AboutText => "string, 2-3 sentences",
            ContentField::Testimonials => {
                "array of 3 objects {\"name\", \"role\", \"text\", \"rating\": integer 1-5}"
            }
            ContentField::Stats => {
                "array of 4 objects {\"value\": short string like \"500+\", \"label\"}"
            }
            ContentField::CtaText => "string, 2-4 words",
            ContentField::Tagline => "string, max 8 words",
            ContentField::MetaDescription => "string, max 155 characters",
        }
    }
}

impl FromStr for ContentField {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentField::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PipelineError::ParseError(format!("Unknown content field: {s}")))
    }
}

impl fmt::Display for ContentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business context handed to the generator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentContext {
    pub name: String,
    pub business_type: BusinessType,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub category: Option<String>,
    pub services: Vec<String>,
    pub target_audience: Option<String>,
    pub tone: Option<String>,
}

impl From<&MergedRecord> for ContentContext {
    fn from(record: &MergedRecord) -> Self {
        let known = |v: &str| (v != crate::merge::DEFAULT_CLASSIFICATION).then(|| v.to_string());
        Self {
            name: record.name.clone(),
            business_type: record.business_type,
            description: Some(record.description.clone()),
            industry: known(&record.industry),
            category: known(&record.category),
            services: record.services.clone(),
            target_audience: record.target_audience.clone(),
            tone: record.tone.clone(),
        }
    }
}

/// Generated copy; only requested keys are ever populated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subheadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub testimonials: Option<Vec<Testimonial>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<Stat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

fn non_blank(value: &Option<String>) -> bool {
    value.as_ref().is_some_and(|v| !v.trim().is_empty())
}

fn non_empty<T>(value: &Option<Vec<T>>) -> bool {
    value.as_ref().is_some_and(|v| !v.is_empty())
}

impl GeneratedContent {
    pub fn has(&self, field: ContentField) -> bool {
        match field {
            ContentField::Headline => non_blank(&self.headline),
            ContentField::Subheadline => non_blank(&self.subheadline),
            ContentField::Services => non_empty(&self.services),
            ContentField::Features => non_empty(&self.features),
            ContentField::AboutText => non_blank(&self.about_text),
            ContentField::Testimonials => non_empty(&self.testimonials),
            ContentField::Stats => non_empty(&self.stats),
            ContentField::CtaText => non_blank(&self.cta_text),
            ContentField::Tagline => non_blank(&self.tagline),
            ContentField::MetaDescription => non_blank(&self.meta_description),
        }
    }

    /// Fields holding a usable value, in canonical order
    pub fn fields(&self) -> Vec<ContentField> {
        ContentField::ALL
            .into_iter()
            .filter(|f| self.has(*f))
            .collect()
    }

    fn clear(&mut self, field: ContentField) {
        match field {
            ContentField::Headline => self.headline = None,
            ContentField::Subheadline => self.subheadline = None,
            ContentField::Services => self.services = None,
            ContentField::Features => self.features = None,
            ContentField::AboutText => self.about_text = None,
            ContentField::Testimonials => self.testimonials = None,
            ContentField::Stats => self.stats = None,
            ContentField::CtaText => self.cta_text = None,
            ContentField::Tagline => self.tagline = None,
            ContentField::MetaDescription => self.meta_description = None,
        }
    }

    fn take_from(&mut self, other: &mut GeneratedContent, field: ContentField) {
        match field {
            ContentField::Headline => self.headline = other.headline.take(),
            ContentField::Subheadline => self.subheadline = other.subheadline.take(),
            ContentField::Services => self.services = other.services.take(),
            ContentField::Features => self.features = other.features.take(),
            ContentField::AboutText => self.about_text = other.about_text.take(),
            ContentField::Testimonials => self.testimonials = other.testimonials.take(),
            ContentField::Stats => self.stats = other.stats.take(),
            ContentField::CtaText => self.cta_text = other.cta_text.take(),
            ContentField::Tagline => self.tagline = other.tagline.take(),
            ContentField::MetaDescription => {
                self.meta_description = other.meta_description.take()
            }
        }
    }

    fn set_from_json(
        &mut self,
        field: ContentField,
        value: serde_json::Value,
    ) -> Result<(), serde_json::Error> {
        use serde_json::from_value;
        match field {
            ContentField::Headline => self.headline = from_value(value)?,
            ContentField::Subheadline => self.subheadline = from_value(value)?,
            ContentField::Services => self.services = from_value(value)?,
            ContentField::Features => self.features = from_value(value)?,
            ContentField::AboutText => self.about_text = from_value(value)?,
            ContentField::Testimonials => self.testimonials = from_value(value)?,
            ContentField::Stats => self.stats = from_value(value)?,
            ContentField::CtaText => self.cta_text = from_value(value)?,
            ContentField::Tagline => self.tagline = from_value(value)?,
            ContentField::MetaDescription => self.meta_description = from_value(value)?,
        }
        Ok(())
    }

    /// Drop everything not requested, and blank values
    fn retain_only(&mut self, requested: &[ContentField]) {
        for field in ContentField::ALL {
            if !requested.contains(&field) || !self.has(field) {
                self.clear(field);
            }
        }
    }
}

/// Produces copy for missing fields
#[derive(Clone, Default)]
pub struct ContentGenerator {
    provider: Option<Arc<dyn LLMProvider>>,
}

impl ContentGenerator {
    pub fn new(provider: Option<Arc<dyn LLMProvider>>) -> Self {
        Self { provider }
    }

    /// Generator that never calls out and always uses templates
    pub fn fallback_only() -> Self {
        Self { provider: None }
    }

    pub fn has_llm(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate exactly the requested fields
    ///
    /// Never fails.
    #[instrument(level = "debug", skip(self, context), fields(business = %context.name))]
    pub async fn generate_missing_content(
        &self,
        context: &ContentContext,
        fields: &[ContentField],
    ) -> GeneratedContent {
        if fields.is_empty() {
            return GeneratedContent::default();
        }

        let Some(provider) = &self.provider else {
            debug!("No LLM provider configured, using template content");
            return generate_fallback_content(context, fields);
        };

        match self.generate_with_llm(provider.as_ref(), context, fields).await {
            Ok(mut content) => {
                content.retain_only(fields);
                let gaps: Vec<ContentField> = fields
                    .iter()
                    .copied()
                    .filter(|f| !content.has(*f))
                    .collect();
                if !gaps.is_empty() {
                    debug!(missing = ?gaps, "LLM omitted some fields, filling from templates");
                    let mut fallback = generate_fallback_content(context, &gaps);
                    for field in gaps {
                        content.take_from(&mut fallback, field);
                    }
                }
                info!(
                    provider = provider.name(),
                    fields = fields.len(),
                    "Generated content with LLM"
                );
                content
            }
            Err(e) => {
                warn!(error = %e, "LLM content generation failed, using template content");
                generate_fallback_content(context, fields)
            }
        }
    }

    async fn generate_with_llm(
        &self,
        provider: &dyn LLMProvider,
        context: &ContentContext,
        fields: &[ContentField],
    ) -> Result<GeneratedContent, PipelineError> {
        let request = CompletionRequest::new(build_generation_prompt(context, fields))
            .with_max_tokens(GENERATION_MAX_TOKENS)
            .with_temperature(GENERATION_TEMPERATURE);

        let raw = provider.complete(request).await?;
        let json = extract_json_from_text(&raw).ok_or_else(|| {
            PipelineError::ParseError("No JSON object in generation response".to_string())
        })?;
        let serde_json::Value::Object(mut object) = serde_json::from_str(json)? else {
            return Err(PipelineError::ParseError(
                "Generation response is not a JSON object".to_string(),
            ));
        };

        // A badly typed key only costs that key; the caller backfills it.
        let mut content = GeneratedContent::default();
        for field in fields {
            let Some(value) = object.remove(field.as_str()) else {
                continue;
            };
            if let Err(e) = content.set_from_json(*field, value) {
                warn!(field = field.as_str(), error = %e, "Ignoring malformed generated field");
            }
        }
        Ok(content)
    }
}

pub fn build_generation_prompt(context: &ContentContext, fields: &[ContentField]) -> String {
    let mut facts = vec![
        format!("Business name: {}", context.name),
        format!("Business type: {}", context.business_type.label()),
    ];
    let optional = [
        ("Description", context.description.as_deref()),
        ("Industry", context.industry.as_deref()),
        ("Category", context.category.as_deref()),
        ("Target audience", context.target_audience.as_deref()),
        ("Tone", context.tone.as_deref()),
    ];
    for (label, value) in optional {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            facts.push(format!("{label}: {value}"));
        }
    }
    if !context.services.is_empty() {
        facts.push(format!("Known services: {}", context.services.join(", ")));
    }

    let keys = fields
        .iter()
        .map(|f| format!("- \"{}\": {}", f.as_str(), f.json_shape()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a copywriter creating a landing page for a small business.\n\n\
        {}\n\n\
        Write marketing copy and respond with strict JSON containing ONLY these keys:\n\
        {keys}\n\n\
        No markdown, no commentary. After the JSON write {END_MARKER} on its own line.",
        facts.join("\n")
    )
}

/// Deterministic index into a variant list, keyed on the business name
fn variant_index(name: &str, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    name.bytes().map(usize::from).sum::<usize>() % len
}

/// Template copy for exactly the requested fields
pub fn generate_fallback_content(
    context: &ContentContext,
    fields: &[ContentField],
) -> GeneratedContent {
    let template = template_for(context.business_type.template_category());
    let label = context.business_type.label();
    let fill = |s: &str| fill_placeholders(s, &context.name, label);

    let mut content = GeneratedContent::default();
    for field in fields {
        match field {
            ContentField::Headline => {
                let i = variant_index(&context.name, template.headlines.len());
                content.headline = template.headlines.get(i).map(|h| fill(h));
            }
            ContentField::Subheadline => {
                let i = variant_index(&context.name, template.subheadlines.len());
                content.subheadline = template.subheadlines.get(i).map(|h| fill(h));
            }
            ContentField::Services => {
                content.services = Some(template.services.iter().map(|s| s.to_string()).collect());
            }
            ContentField::Features => {
                content.features = Some(template.features.iter().map(|s| s.to_string()).collect());
            }
            ContentField::AboutText => content.about_text = Some(fill(template.about)),
            ContentField::Testimonials => {
                content.testimonials = Some(
                    template
                        .testimonials
                        .iter()
                        .map(|t| Testimonial {
                            name: t.name.to_string(),
                            text: fill(t.text),
                            rating: Some(t.rating),
                            role: Some(t.role.to_string()),
                        })
                        .collect(),
                );
            }
            ContentField::Stats => {
                content.stats = Some(
                    template
                        .stats
                        .iter()
                        .map(|(value, label)| Stat {
                            value: value.to_string(),
                            label: label.to_string(),
                        })
                        .collect(),
                );
            }
            ContentField::CtaText => content.cta_text = Some(template.cta.to_string()),
            ContentField::Tagline => content.tagline = Some(fill(template.tagline)),
            ContentField::MetaDescription => {
                content.meta_description = Some(fill(template.meta_description))
            }
        }
    }
    content
}
