//! Combines scraped and LLM-extracted facts into one [`MergedRecord`].
//!
//! LLM values represent explicit user intent and win for identity, colour and
//! contact fields. Assets a free-text prompt cannot supply (images, products,
//! hours, testimonials) only ever come from the scrape.

use crate::business_type::BusinessType;
use crate::records::{
    Confidence, LlmExtractedRecord, MergedRecord, ScrapedRecord, SocialLinks,
};
use std::collections::HashSet;

pub const DEFAULT_BUSINESS_NAME: &str = "Business Name";
pub const DEFAULT_DESCRIPTION: &str = "We provide excellent services to our customers.";
pub const DEFAULT_PRIMARY_COLOR: &str = "#3b82f6";
pub const DEFAULT_SECONDARY_COLOR: &str = "#8b5cf6";
pub const DEFAULT_CLASSIFICATION: &str = "other";

pub const DEFAULT_MERGE_LIMIT: usize = 10;
pub const MAX_SERVICES: usize = 8;
pub const MAX_FEATURES: usize = 8;

pub const HIGH_CONFIDENCE_SCORE: u32 = 10;
pub const MEDIUM_CONFIDENCE_SCORE: u32 = 6;

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn pick(preferred: Option<&String>, fallback: Option<&String>) -> Option<String> {
    present(preferred).or(present(fallback)).map(str::to_string)
}

fn pick_or(preferred: Option<&String>, fallback: Option<&String>, default: &str) -> String {
    pick(preferred, fallback).unwrap_or_else(|| default.to_string())
}

/// Merge the two sources
///
/// Absent inputs are treated as empty records.
pub fn merge_data(
    scraped: Option<&ScrapedRecord>,
    llm: Option<&LlmExtractedRecord>,
) -> MergedRecord {
    let empty_scraped = ScrapedRecord::default();
    let empty_llm = LlmExtractedRecord::default();
    let s = scraped.unwrap_or(&empty_scraped);
    let l = llm.unwrap_or(&empty_llm);

    let (score, confidence) = calculate_confidence(scraped, llm);
    tracing::debug!(
        score = score,
        confidence = confidence.as_str(),
        has_scraped = scraped.is_some(),
        has_llm = llm.is_some(),
        "Merging data sources"
    );

    let social_links = SocialLinks {
        instagram: pick(
            l.social_links.instagram.as_ref(),
            s.social_links.instagram.as_ref(),
        ),
        facebook: pick(
            l.social_links.facebook.as_ref(),
            s.social_links.facebook.as_ref(),
        ),
        twitter: pick(l.social_links.twitter.as_ref(), s.social_links.twitter.as_ref()),
        linkedin: pick(
            l.social_links.linkedin.as_ref(),
            s.social_links.linkedin.as_ref(),
        ),
        youtube: pick(s.social_links.youtube.as_ref(), None),
        tiktok: pick(s.social_links.tiktok.as_ref(), None),
    };

    let scraped_images = if s.images.is_empty() {
        s.gallery_images.clone()
    } else {
        s.images.clone()
    };

    MergedRecord {
        name: pick_or(l.business_name.as_ref(), s.name.as_ref(), DEFAULT_BUSINESS_NAME),
        description: pick_or(
            l.description.as_ref(),
            s.description.as_ref(),
            DEFAULT_DESCRIPTION,
        ),
        logo: pick(s.logo.as_ref(), None),
        hero_image: pick(s.hero_image.as_ref(), None),
        gallery_images: s.gallery_images.clone(),
        primary_color: pick_or(
            l.preferred_colors.primary.as_ref(),
            s.primary_color.as_ref(),
            DEFAULT_PRIMARY_COLOR,
        ),
        secondary_color: pick_or(
            l.preferred_colors.secondary.as_ref(),
            s.secondary_color.as_ref(),
            DEFAULT_SECONDARY_COLOR,
        ),
        business_type: l
            .business_type
            .filter(|bt| *bt != BusinessType::Other)
            .or(s.business_type)
            .unwrap_or(BusinessType::Other),
        industry: pick_or(l.industry.as_ref(), s.industry.as_ref(), DEFAULT_CLASSIFICATION),
        category: pick_or(l.category.as_ref(), s.category.as_ref(), DEFAULT_CLASSIFICATION),
        services: merge_arrays(&l.services, &s.services, MAX_SERVICES),
        features: merge_arrays(&l.features, &s.features, MAX_FEATURES),
        products: s.products.clone(),
        phone: pick(l.phone.as_ref(), s.contact.phone.as_ref()),
        email: pick(l.email.as_ref(), s.contact.email.as_ref()),
        address: pick(l.address.as_ref(), s.contact.address.as_ref()),
        city: pick(s.contact.city.as_ref(), None),
        social_links,
        opening_hours: s.opening_hours.clone(),
        about_content: pick(s.about_content.as_ref(), None),
        testimonials: s.testimonials.clone(),
        target_audience: pick(l.target_audience.as_ref(), None),
        tone: pick(l.tone.as_ref(), None),
        unique_selling_points: l.unique_selling_points.clone(),
        key_messages: l.key_messages.clone(),
        call_to_action: pick(l.call_to_action.as_ref(), None),
        confidence,
        raw_text: None,
        scraped_images,
    }
}

/// Concatenate `primary` then `secondary`, de-duplicating case-insensitively.
///
/// The first occurrence keeps its original casing; the result holds at most
/// `max_items` entries.
pub fn merge_arrays(primary: &[String], secondary: &[String], max_items: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    primary
        .iter()
        .chain(secondary)
        .filter(|item| !item.trim().is_empty())
        .filter(|item| seen.insert(item.trim().to_lowercase()))
        .take(max_items)
        .cloned()
        .collect()
}

/// Additive confidence score over both sources.
///
/// Thresholds are policy, not law: see [`HIGH_CONFIDENCE_SCORE`] and
/// [`MEDIUM_CONFIDENCE_SCORE`].
pub fn calculate_confidence(
    scraped: Option<&ScrapedRecord>,
    llm: Option<&LlmExtractedRecord>,
) -> (u32, Confidence) {
    let mut score = 0;

    if let Some(s) = scraped {
        score += match s.confidence {
            Confidence::High => 3,
            Confidence::Medium => 2,
            Confidence::Low => 1,
        };
        if present(s.logo.as_ref()).is_some() {
            score += 1;
        }
        if present(s.hero_image.as_ref()).is_some() {
            score += 1;
        }
        if s.services.len() >= 3 {
            score += 1;
        }
        if s.testimonials.len() >= 2 {
            score += 1;
        }
    }

    if let Some(l) = llm {
        if present(l.business_name.as_ref()).is_some() {
            score += 1;
        }
        if present(l.description.as_ref()).is_some() {
            score += 1;
        }
        if l.services.len() >= 3 {
            score += 1;
        }
        if l.unique_selling_points.len() >= 2 {
            score += 1;
        }
    }

    if scraped.is_some() && llm.is_some() {
        score += 2;
    }

    let level = if score >= HIGH_CONFIDENCE_SCORE {
        Confidence::High
    } else if score >= MEDIUM_CONFIDENCE_SCORE {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    (score, level)
}
