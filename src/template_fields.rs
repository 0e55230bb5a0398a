//! Assembles [`LandingPageData`] from an enriched record.

use crate::fallback_templates::{fill_placeholders, template_for};
use crate::landing_page::{
    copyright_line, lead_form_fields, AboutSection, BrandSection, CtaSection, FeatureItem,
    FeaturesSection, FooterContact, FooterSection, GallerySection, HeroSection, LandingPageData,
    NavItem, SeoSection, ServiceItem, ServicesSection, SocialLink, TestimonialsSection,
};
use crate::merge::{DEFAULT_CLASSIFICATION, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR};
use crate::records::{EnrichedRecord, MergedRecord};
use crate::utils::truncate_str;

pub const MAX_GALLERY_IMAGES: usize = 12;
pub const MAX_SEO_KEYWORDS: usize = 10;
pub const SEO_DESCRIPTION_WIDTH: usize = 160;

const FEATURE_ICONS: [&str; 8] = [
    "star", "shield", "clock", "heart", "check", "award", "users", "zap",
];

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn join_address(address: Option<&String>, city: Option<&String>) -> Option<String> {
    match (non_blank(address), non_blank(city)) {
        (Some(address), Some(city)) if !address.contains(city) => {
            Some(format!("{address}, {city}"))
        }
        (Some(address), _) => Some(address.to_string()),
        (None, city) => city.map(str::to_string),
    }
}

fn nav(label: &str, href: &str) -> NavItem {
    NavItem {
        label: label.to_string(),
        href: href.to_string(),
    }
}

fn resolve_colors(record: &MergedRecord) -> (String, String, String) {
    let palette = record.business_type.palette();
    let primary = if record.primary_color == DEFAULT_PRIMARY_COLOR {
        palette.primary.to_string()
    } else {
        record.primary_color.clone()
    };
    let secondary = if record.secondary_color == DEFAULT_SECONDARY_COLOR {
        palette.secondary.to_string()
    } else {
        record.secondary_color.clone()
    };
    (primary, secondary, palette.accent.to_string())
}

fn service_items(record: &MergedRecord) -> Vec<ServiceItem> {
    if !record.products.is_empty() {
        return record
            .products
            .iter()
            .map(|p| ServiceItem {
                name: p.name.clone(),
                description: p.description.clone().unwrap_or_default(),
                price: p.sale_price.clone().or_else(|| p.price.clone()),
                image: p.image.clone(),
            })
            .collect();
    }

    record
        .services
        .iter()
        .map(|s| ServiceItem {
            name: s.clone(),
            description: format!("Professional {} from {}.", s.to_lowercase(), record.name),
            price: None,
            image: None,
        })
        .collect()
}

fn feature_items(record: &MergedRecord) -> Vec<FeatureItem> {
    record
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| FeatureItem {
            title: feature.clone(),
            description: record
                .unique_selling_points
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("{feature} is part of every visit to {}.", record.name)),
            icon: FEATURE_ICONS[i % FEATURE_ICONS.len()].to_string(),
        })
        .collect()
}

fn seo_keywords(record: &MergedRecord) -> Vec<String> {
    let mut keywords = vec![
        record.name.to_lowercase(),
        record.business_type.label().to_string(),
    ];
    for extra in [&record.industry, &record.category] {
        if extra != DEFAULT_CLASSIFICATION {
            keywords.push(extra.to_lowercase());
        }
    }
    if let Some(city) = non_blank(record.city.as_ref()) {
        keywords.push(city.to_lowercase());
    }
    keywords.extend(record.services.iter().map(|s| s.to_lowercase()));

    let mut seen = std::collections::HashSet::new();
    keywords.retain(|k| seen.insert(k.clone()));
    keywords.truncate(MAX_SEO_KEYWORDS);
    keywords
}

/// Build the page. Total: every section is populated from the record,
/// generated copy, or the business type's template.
pub fn generate_template_fields(enriched: &EnrichedRecord) -> LandingPageData {
    let record = &enriched.record;
    let copy = &enriched.copy;
    let category = record.business_type.template_category();
    let template = template_for(category);
    let label = record.business_type.label();
    let name = record.name.as_str();

    let (primary_color, secondary_color, accent_color) = resolve_colors(record);

    let tagline = non_blank(copy.tagline.as_ref()).map(str::to_string);
    let headline = non_blank(copy.headline.as_ref())
        .or_else(|| non_blank(record.key_messages.first()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Welcome to {name}"));
    let subheadline = non_blank(copy.subheadline.as_ref())
        .unwrap_or(&record.description)
        .to_string();
    let cta_text = non_blank(copy.cta_text.as_ref())
        .or_else(|| non_blank(record.call_to_action.as_ref()))
        .unwrap_or(template.cta)
        .to_string();

    let mut gallery_images = if record.gallery_images.is_empty() {
        record.scraped_images.clone()
    } else {
        record.gallery_images.clone()
    };
    gallery_images.truncate(MAX_GALLERY_IMAGES);

    let services = service_items(record);
    let features = feature_items(record);

    let mut nav_items = vec![nav("About", "#about")];
    if !services.is_empty() {
        nav_items.push(nav("Services", "#services"));
    }
    if !features.is_empty() {
        nav_items.push(nav("Features", "#features"));
    }
    if !record.testimonials.is_empty() {
        nav_items.push(nav("Testimonials", "#testimonials"));
    }
    if !gallery_images.is_empty() {
        nav_items.push(nav("Gallery", "#gallery"));
    }
    nav_items.push(nav("Contact", "#contact"));

    let highlights = if record.unique_selling_points.is_empty() {
        record.features.iter().take(3).cloned().collect()
    } else {
        record.unique_selling_points.clone()
    };

    let seo_description = non_blank(copy.meta_description.as_ref())
        .unwrap_or(&record.description)
        .to_string();

    LandingPageData {
        brand: BrandSection {
            name: name.to_string(),
            logo: record.logo.clone(),
            tagline: tagline.clone(),
            primary_color,
            secondary_color,
            accent_color,
            business_type: record.business_type,
            template: category,
        },
        hero: HeroSection {
            headline,
            subheadline,
            background_image: record
                .hero_image
                .clone()
                .or_else(|| gallery_images.first().cloned()),
            cta_text: cta_text.clone(),
            cta_link: "#contact".to_string(),
        },
        nav: nav_items,
        about: AboutSection {
            title: format!("About {name}"),
            content: non_blank(record.about_content.as_ref())
                .unwrap_or(&record.description)
                .to_string(),
            image: gallery_images.first().cloned(),
            highlights,
            stats: copy.stats.clone(),
        },
        features: FeaturesSection {
            title: "Why Choose Us".to_string(),
            items: features,
        },
        services: ServicesSection {
            title: if record.products.is_empty() {
                "Our Services".to_string()
            } else {
                "Our Products".to_string()
            },
            items: services,
        },
        testimonials: TestimonialsSection {
            title: "What Our Customers Say".to_string(),
            items: record.testimonials.clone(),
        },
        gallery: GallerySection {
            title: "Gallery".to_string(),
            images: gallery_images,
        },
        cta: CtaSection {
            title: format!("Ready to get started with {name}?"),
            subtitle: tagline
                .clone()
                .unwrap_or_else(|| fill_placeholders(template.tagline, name, label)),
            button_text: cta_text,
            form_fields: lead_form_fields(category),
        },
        footer: FooterSection {
            business_name: name.to_string(),
            description: record.description.clone(),
            contact: FooterContact {
                phone: record.phone.clone(),
                email: record.email.clone(),
                address: join_address(record.address.as_ref(), record.city.as_ref()),
            },
            social_links: record
                .social_links
                .iter()
                .map(|(platform, url)| SocialLink {
                    platform: platform.to_string(),
                    url: url.to_string(),
                })
                .collect(),
            opening_hours: record.opening_hours.clone(),
            copyright: copyright_line(name),
        },
        seo: SeoSection {
            title: match &tagline {
                Some(tagline) => format!("{name} | {tagline}"),
                None => name.to_string(),
            },
            description: truncate_str(&seo_description, SEO_DESCRIPTION_WIDTH),
            keywords: seo_keywords(record),
            og_image: record.hero_image.clone().or_else(|| record.logo.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business_type::{BusinessType, TemplateCategory};
    use crate::merge::merge_data;
    use crate::records::{PageCopy, Product, ScrapedRecord, SocialLinks, Stat};

    fn spa_record() -> MergedRecord {
        let scraped = ScrapedRecord {
            name: Some("Luna Spa".into()),
            business_type: Some(BusinessType::Spa),
            services: vec!["Massage".into(), "Facials".into()],
            gallery_images: vec!["https://luna.example/1.jpg".into()],
            social_links: SocialLinks {
                instagram: Some("https://instagram.com/lunaspa".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        merge_data(Some(&scraped), None)
    }

    #[test]
    fn test_default_colors_use_type_palette() {
        let page = generate_template_fields(&EnrichedRecord::from(spa_record()));
        let palette = BusinessType::Spa.palette();
        assert_eq!(page.brand.primary_color, palette.primary);
        assert_eq!(page.brand.secondary_color, palette.secondary);
        assert_eq!(page.brand.template, TemplateCategory::Beauty);
    }

    #[test]
    fn test_explicit_colors_are_kept() {
        let mut record = spa_record();
        record.primary_color = "#112233".into();
        let page = generate_template_fields(&EnrichedRecord::from(record));
        assert_eq!(page.brand.primary_color, "#112233");
    }

    #[test]
    fn test_footer_address_joins_city() {
        let mut record = spa_record();
        record.address = Some("1 Main St".into());
        record.city = Some("Austin".into());
        let page = generate_template_fields(&EnrichedRecord::from(record.clone()));
        assert_eq!(page.footer.contact.address.as_deref(), Some("1 Main St, Austin"));

        record.address = Some("1 Main St, Austin TX".into());
        let page = generate_template_fields(&EnrichedRecord::from(record.clone()));
        assert_eq!(page.footer.contact.address.as_deref(), Some("1 Main St, Austin TX"));

        record.address = Some("  ".into());
        let page = generate_template_fields(&EnrichedRecord::from(record));
        assert_eq!(page.footer.contact.address.as_deref(), Some("Austin"));
    }

    #[test]
    fn test_generated_copy_reaches_the_page() {
        let enriched = EnrichedRecord {
            record: spa_record(),
            copy: PageCopy {
                headline: Some("Unwind at Luna".into()),
                tagline: Some("Calm, restored".into()),
                meta_description: Some("Day spa in town".into()),
                stats: vec![Stat {
                    value: "10+".into(),
                    label: "Years".into(),
                }],
                ..Default::default()
            },
        };
        let page = generate_template_fields(&enriched);
        assert_eq!(page.hero.headline, "Unwind at Luna");
        assert_eq!(page.seo.title, "Luna Spa | Calm, restored");
        assert_eq!(page.seo.description, "Day spa in town");
        assert_eq!(page.about.stats.len(), 1);
        assert_eq!(page.cta.subtitle, "Calm, restored");
    }

    #[test]
    fn test_nav_lists_only_populated_sections() {
        let page = generate_template_fields(&EnrichedRecord::from(spa_record()));
        let labels: Vec<_> = page.nav.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["About", "Services", "Gallery", "Contact"]);
        assert_eq!(page.footer.social_links.len(), 1);
        assert!(page
            .cta
            .form_fields
            .iter()
            .any(|f| f.name == "preferredDate"));
    }

    #[test]
    fn test_products_preferred_over_services() {
        let mut record = spa_record();
        record.products = vec![Product {
            name: "Gift Card".into(),
            price: Some("$50".into()),
            sale_price: Some("$40".into()),
            ..Default::default()
        }];
        let page = generate_template_fields(&EnrichedRecord::from(record));
        assert_eq!(page.services.title, "Our Products");
        assert_eq!(page.services.items.len(), 1);
        assert_eq!(page.services.items[0].price.as_deref(), Some("$40"));
    }

    #[test]
    fn test_empty_record_still_builds_every_section() {
        let page = generate_template_fields(&EnrichedRecord::from(merge_data(None, None)));
        assert_eq!(page.brand.name, "Business Name");
        assert_eq!(page.hero.headline, "Welcome to Business Name");
        assert_eq!(page.hero.cta_text, "Get Started");
        assert!(!page.cta.form_fields.is_empty());
        assert!(page.seo.keywords.contains(&"business".to_string()));
    }
}
