//! Checks a merged record against the fields a landing page needs.

use crate::business_type::BusinessType;
use crate::merge::{
    DEFAULT_BUSINESS_NAME, DEFAULT_DESCRIPTION, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR,
};
use crate::records::{LlmExtractedRecord, MergedRecord, ScrapedRecord};

pub const MIN_DESCRIPTION_CHARS: usize = 20;
pub const MIN_ABOUT_CHARS: usize = 50;

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_LOGO: &str = "logo";
pub const FIELD_HERO_IMAGE: &str = "heroImage";
pub const FIELD_GALLERY_IMAGES: &str = "galleryImages";
pub const FIELD_SERVICES: &str = "services";
pub const FIELD_FEATURES: &str = "features";
pub const FIELD_CONTACT_INFO: &str = "contact info";
pub const FIELD_TESTIMONIALS: &str = "testimonials";
pub const FIELD_ABOUT_CONTENT: &str = "aboutContent";
pub const FIELD_PRIMARY_COLOR: &str = "primaryColor";
pub const FIELD_SECONDARY_COLOR: &str = "secondaryColor";
pub const FIELD_BUSINESS_TYPE: &str = "businessType";

fn blank(value: Option<&String>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn shorter_than(value: Option<&str>, min_chars: usize) -> bool {
    value.map_or(true, |v| v.trim().chars().count() < min_chars)
}

/// Names of required fields that are absent or below the quality bar.
///
/// Each check is independent; the order of the returned list is fixed.
pub fn identify_missing_fields(record: &MergedRecord) -> Vec<String> {
    let checks: [(&str, bool); 10] = [
        (FIELD_NAME, record.name == DEFAULT_BUSINESS_NAME),
        (
            FIELD_DESCRIPTION,
            shorter_than(Some(&record.description), MIN_DESCRIPTION_CHARS),
        ),
        (FIELD_LOGO, blank(record.logo.as_ref())),
        (FIELD_HERO_IMAGE, blank(record.hero_image.as_ref())),
        (FIELD_GALLERY_IMAGES, record.gallery_images.is_empty()),
        (FIELD_SERVICES, record.services.is_empty()),
        (FIELD_FEATURES, record.features.is_empty()),
        (
            FIELD_CONTACT_INFO,
            blank(record.phone.as_ref()) && blank(record.email.as_ref()),
        ),
        (FIELD_TESTIMONIALS, record.testimonials.is_empty()),
        (
            FIELD_ABOUT_CONTENT,
            shorter_than(record.about_content.as_deref(), MIN_ABOUT_CHARS),
        ),
    ];

    checks
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(field, _)| field.to_string())
        .collect()
}

/// Fields still holding a default sentinel that no source contributed to.
///
/// Observability only; the pipeline never branches on this.
pub fn identify_generated_fields(
    record: &MergedRecord,
    scraped: Option<&ScrapedRecord>,
    llm: Option<&LlmExtractedRecord>,
) -> Vec<String> {
    let scraped_name = scraped.is_some_and(|s| !blank(s.name.as_ref()));
    let llm_name = llm.is_some_and(|l| !blank(l.business_name.as_ref()));
    let scraped_desc = scraped.is_some_and(|s| !blank(s.description.as_ref()));
    let llm_desc = llm.is_some_and(|l| !blank(l.description.as_ref()));
    let scraped_primary = scraped.is_some_and(|s| !blank(s.primary_color.as_ref()));
    let llm_primary = llm.is_some_and(|l| !blank(l.preferred_colors.primary.as_ref()));
    let scraped_secondary = scraped.is_some_and(|s| !blank(s.secondary_color.as_ref()));
    let llm_secondary = llm.is_some_and(|l| !blank(l.preferred_colors.secondary.as_ref()));
    let any_type = scraped.is_some_and(|s| s.business_type.is_some())
        || llm.is_some_and(|l| {
            l.business_type
                .is_some_and(|bt| bt != BusinessType::Other)
        });

    let checks: [(&str, bool); 5] = [
        (
            FIELD_NAME,
            record.name == DEFAULT_BUSINESS_NAME && !scraped_name && !llm_name,
        ),
        (
            FIELD_DESCRIPTION,
            record.description == DEFAULT_DESCRIPTION && !scraped_desc && !llm_desc,
        ),
        (
            FIELD_PRIMARY_COLOR,
            record.primary_color == DEFAULT_PRIMARY_COLOR && !scraped_primary && !llm_primary,
        ),
        (
            FIELD_SECONDARY_COLOR,
            record.secondary_color == DEFAULT_SECONDARY_COLOR
                && !scraped_secondary
                && !llm_secondary,
        ),
        (
            FIELD_BUSINESS_TYPE,
            record.business_type == BusinessType::Other && !any_type,
        ),
    ];

    checks
        .into_iter()
        .filter(|(_, generated)| *generated)
        .map(|(field, _)| field.to_string())
        .collect()
}
