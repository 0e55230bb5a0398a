//! Page-ready landing page data consumed by rendering templates.

use crate::business_type::{BusinessType, TemplateCategory};
use crate::merge::{DEFAULT_DESCRIPTION, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR};
use crate::records::{Stat, Testimonial};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSection {
    pub name: String,
    pub logo: Option<String>,
    pub tagline: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub business_type: BusinessType,
    pub template: TemplateCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    pub headline: String,
    pub subheadline: String,
    pub background_image: Option<String>,
    pub cta_text: String,
    pub cta_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutSection {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub highlights: Vec<String>,
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureItem {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub name: String,
    pub description: String,
    pub price: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesSection {
    pub title: String,
    pub items: Vec<ServiceItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesSection {
    pub title: String,
    pub items: Vec<FeatureItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialsSection {
    pub title: String,
    pub items: Vec<Testimonial>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GallerySection {
    pub title: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldKind {
    Text,
    Email,
    Tel,
    Date,
    Select,
    Textarea,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FormFieldKind,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FormField {
    pub fn new(name: &str, label: &str, kind: FormFieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required,
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| o.to_string()).collect();
        self
    }
}

/// Call to action block with the lead-capture form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaSection {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub form_fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterContact {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterSection {
    pub business_name: String,
    pub description: String,
    pub contact: FooterContact,
    pub social_links: Vec<SocialLink>,
    pub opening_hours: BTreeMap<String, String>,
    pub copyright: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoSection {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub og_image: Option<String>,
}

/// The complete page-ready shape
///
/// Every section is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageData {
    pub brand: BrandSection,
    pub hero: HeroSection,
    pub nav: Vec<NavItem>,
    pub about: AboutSection,
    pub features: FeaturesSection,
    pub services: ServicesSection,
    pub testimonials: TestimonialsSection,
    pub gallery: GallerySection,
    pub cta: CtaSection,
    pub footer: FooterSection,
    pub seo: SeoSection,
}

/// Lead form fields for a template category
pub fn lead_form_fields(category: TemplateCategory) -> Vec<FormField> {
    let mut fields = vec![
        FormField::new("name", "Your Name", FormFieldKind::Text, true),
        FormField::new("email", "Email Address", FormFieldKind::Email, true),
        FormField::new("phone", "Phone Number", FormFieldKind::Tel, false),
    ];
    match category {
        TemplateCategory::Restaurant
        | TemplateCategory::Fitness
        | TemplateCategory::Healthcare
        | TemplateCategory::Beauty => {
            fields.push(FormField::new(
                "preferredDate",
                "Preferred Date",
                FormFieldKind::Date,
                false,
            ));
        }
        TemplateCategory::RealEstate => {
            fields.push(
                FormField::new(
                    "propertyInterest",
                    "I'm interested in",
                    FormFieldKind::Select,
                    false,
                )
                .with_options(&["Buying", "Selling", "Renting", "Valuation"]),
            );
        }
        _ => {}
    }
    fields.push(FormField::new(
        "message",
        "Message",
        FormFieldKind::Textarea,
        false,
    ));
    fields
}

pub fn copyright_line(name: &str) -> String {
    format!(
        "© {} {name}. All rights reserved.",
        chrono::Utc::now().format("%Y")
    )
}

impl LandingPageData {
    /// Bare generic page used when the pipeline cannot produce anything better
    pub fn minimal(name: &str) -> Self {
        let business_type = BusinessType::Other;
        let template = business_type.template_category();
        let accent = business_type.palette().accent;

        Self {
            brand: BrandSection {
                name: name.to_string(),
                logo: None,
                tagline: None,
                primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
                secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
                accent_color: accent.to_string(),
                business_type,
                template,
            },
            hero: HeroSection {
                headline: format!("Welcome to {name}"),
                subheadline: DEFAULT_DESCRIPTION.to_string(),
                background_image: None,
                cta_text: "Contact Us".to_string(),
                cta_link: "#contact".to_string(),
            },
            nav: vec![
                NavItem {
                    label: "About".to_string(),
                    href: "#about".to_string(),
                },
                NavItem {
                    label: "Contact".to_string(),
                    href: "#contact".to_string(),
                },
            ],
            about: AboutSection {
                title: format!("About {name}"),
                content: DEFAULT_DESCRIPTION.to_string(),
                image: None,
                highlights: Vec::new(),
                stats: Vec::new(),
            },
            features: FeaturesSection {
                title: "Why Choose Us".to_string(),
                items: Vec::new(),
            },
            services: ServicesSection {
                title: "Our Services".to_string(),
                items: Vec::new(),
            },
            testimonials: TestimonialsSection {
                title: "What Our Customers Say".to_string(),
                items: Vec::new(),
            },
            gallery: GallerySection {
                title: "Gallery".to_string(),
                images: Vec::new(),
            },
            cta: CtaSection {
                title: "Get In Touch".to_string(),
                subtitle: "We'd love to hear from you.".to_string(),
                button_text: "Send Message".to_string(),
                form_fields: lead_form_fields(template),
            },
            footer: FooterSection {
                business_name: name.to_string(),
                description: DEFAULT_DESCRIPTION.to_string(),
                contact: FooterContact {
                    phone: None,
                    email: None,
                    address: None,
                },
                social_links: Vec::new(),
                opening_hours: BTreeMap::new(),
                copyright: copyright_line(name),
            },
            seo: SeoSection {
                title: name.to_string(),
                description: DEFAULT_DESCRIPTION.to_string(),
                keywords: vec![name.to_lowercase()],
                og_image: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_page() {
        let page = LandingPageData::minimal("example-bakery.com");
        assert_eq!(page.brand.name, "example-bakery.com");
        assert_eq!(page.brand.primary_color, "#3b82f6");
        assert!(page.footer.copyright.contains("example-bakery.com"));
        assert!(page.services.items.is_empty());
    }

    #[test]
    fn test_lead_form_by_category() {
        let names = |c| -> Vec<String> {
            lead_form_fields(c).into_iter().map(|f| f.name).collect()
        };
        assert_eq!(names(TemplateCategory::Agency), ["name", "email", "phone", "message"]);
        assert!(names(TemplateCategory::Beauty).contains(&"preferredDate".to_string()));
        assert!(names(TemplateCategory::RealEstate).contains(&"propertyInterest".to_string()));
    }

    #[test]
    fn test_form_field_wire_format() {
        let field = FormField::new("email", "Email Address", FormFieldKind::Email, true);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "email");
        assert!(json.get("options").is_none());
    }
}
