//! Business type classification, template categories and colour palettes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of business types understood by the pipeline.
///
/// The first twelve variants double as fallback-content categories. The
/// remaining ones are narrower sub-types that carry their own colour palette
/// and detection keywords but borrow copy from a parent category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BusinessType {
    Restaurant,
    Fitness,
    Healthcare,
    Beauty,
    RealEstate,
    Education,
    Agency,
    Portfolio,
    Service,
    Ecommerce,
    Startup,
    #[default]
    Other,
    Cafe,
    Bakery,
    Gym,
    Yoga,
    Dental,
    Spa,
    Salon,
    Consulting,
    Legal,
    Photography,
    Automotive,
    Construction,
    Retail,
    Technology,
}

/// The twelve content categories that have a fallback template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Agency,
    Ecommerce,
    Restaurant,
    Fitness,
    Healthcare,
    Beauty,
    Service,
    Portfolio,
    RealEstate,
    Education,
    Startup,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

impl BusinessType {
    pub const ALL: [BusinessType; 26] = [
        BusinessType::Restaurant,
        BusinessType::Fitness,
        BusinessType::Healthcare,
        BusinessType::Beauty,
        BusinessType::RealEstate,
        BusinessType::Education,
        BusinessType::Agency,
        BusinessType::Portfolio,
        BusinessType::Service,
        BusinessType::Ecommerce,
        BusinessType::Startup,
        BusinessType::Other,
        BusinessType::Cafe,
        BusinessType::Bakery,
        BusinessType::Gym,
        BusinessType::Yoga,
        BusinessType::Dental,
        BusinessType::Spa,
        BusinessType::Salon,
        BusinessType::Consulting,
        BusinessType::Legal,
        BusinessType::Photography,
        BusinessType::Automotive,
        BusinessType::Construction,
        BusinessType::Retail,
        BusinessType::Technology,
    ];

    /// Parses a free-form label
    ///
    /// Unknown labels become [`BusinessType::Other`].
    pub fn parse(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "restaurant" | "restaurants" | "food" | "dining" | "bistro" | "pizzeria" => {
                BusinessType::Restaurant
            }
            "fitness" | "personaltraining" | "crossfit" => BusinessType::Fitness,
            "healthcare" | "health" | "medical" | "clinic" | "doctor" | "physiotherapy" => {
                BusinessType::Healthcare
            }
            "beauty" | "cosmetics" | "nails" | "nailsalon" => BusinessType::Beauty,
            "realestate" | "realtor" | "property" | "realty" => BusinessType::RealEstate,
            "education" | "school" | "tutoring" | "academy" | "courses" => BusinessType::Education,
            "agency" | "marketing" | "marketingagency" | "creativeagency" | "design" => {
                BusinessType::Agency
            }
            "portfolio" | "freelancer" | "artist" | "personal" => BusinessType::Portfolio,
            "service" | "services" | "localservice" | "cleaning" => BusinessType::Service,
            "ecommerce" | "onlinestore" | "eshop" => BusinessType::Ecommerce,
            "startup" => BusinessType::Startup,
            "cafe" | "coffee" | "coffeeshop" => BusinessType::Cafe,
            "bakery" | "patisserie" => BusinessType::Bakery,
            "gym" => BusinessType::Gym,
            "yoga" | "pilates" | "yogastudio" => BusinessType::Yoga,
            "dental" | "dentist" | "orthodontics" => BusinessType::Dental,
            "spa" | "dayspa" | "wellness" | "massage" => BusinessType::Spa,
            "salon" | "hairsalon" | "barber" | "barbershop" => BusinessType::Salon,
            "consulting" | "consultancy" | "consultant" => BusinessType::Consulting,
            "legal" | "law" | "lawfirm" | "lawyer" | "attorney" => BusinessType::Legal,
            "photography" | "photographer" | "photostudio" => BusinessType::Photography,
            "automotive" | "auto" | "carrepair" | "mechanic" | "garage" => {
                BusinessType::Automotive
            }
            "construction" | "contractor" | "plumbing" | "roofing" | "renovation" => {
                BusinessType::Construction
            }
            "retail" | "shop" | "store" | "boutique" => BusinessType::Retail,
            "technology" | "tech" | "software" | "saas" | "it" => BusinessType::Technology,
            _ => BusinessType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::Restaurant => "restaurant",
            BusinessType::Fitness => "fitness",
            BusinessType::Healthcare => "healthcare",
            BusinessType::Beauty => "beauty",
            BusinessType::RealEstate => "realestate",
            BusinessType::Education => "education",
            BusinessType::Agency => "agency",
            BusinessType::Portfolio => "portfolio",
            BusinessType::Service => "service",
            BusinessType::Ecommerce => "ecommerce",
            BusinessType::Startup => "startup",
            BusinessType::Other => "other",
            BusinessType::Cafe => "cafe",
            BusinessType::Bakery => "bakery",
            BusinessType::Gym => "gym",
            BusinessType::Yoga => "yoga",
            BusinessType::Dental => "dental",
            BusinessType::Spa => "spa",
            BusinessType::Salon => "salon",
            BusinessType::Consulting => "consulting",
            BusinessType::Legal => "legal",
            BusinessType::Photography => "photography",
            BusinessType::Automotive => "automotive",
            BusinessType::Construction => "construction",
            BusinessType::Retail => "retail",
            BusinessType::Technology => "technology",
        }
    }

    /// Human-readable label substituted into `{businessType}` placeholders
    pub fn label(&self) -> &'static str {
        match self {
            BusinessType::RealEstate => "real estate",
            BusinessType::Ecommerce => "online store",
            BusinessType::Other => "business",
            BusinessType::Service => "service",
            BusinessType::Spa => "day spa",
            BusinessType::Legal => "law firm",
            BusinessType::Dental => "dental practice",
            BusinessType::Construction => "construction company",
            BusinessType::Technology => "technology company",
            other => other.as_str(),
        }
    }

    pub fn template_category(&self) -> TemplateCategory {
        match self {
            BusinessType::Restaurant | BusinessType::Cafe | BusinessType::Bakery => {
                TemplateCategory::Restaurant
            }
            BusinessType::Fitness | BusinessType::Gym | BusinessType::Yoga => {
                TemplateCategory::Fitness
            }
            BusinessType::Healthcare | BusinessType::Dental => TemplateCategory::Healthcare,
            BusinessType::Beauty | BusinessType::Spa | BusinessType::Salon => {
                TemplateCategory::Beauty
            }
            BusinessType::RealEstate => TemplateCategory::RealEstate,
            BusinessType::Education => TemplateCategory::Education,
            BusinessType::Agency => TemplateCategory::Agency,
            BusinessType::Portfolio | BusinessType::Photography => TemplateCategory::Portfolio,
            BusinessType::Service
            | BusinessType::Consulting
            | BusinessType::Legal
            | BusinessType::Automotive
            | BusinessType::Construction => TemplateCategory::Service,
            BusinessType::Ecommerce | BusinessType::Retail => TemplateCategory::Ecommerce,
            BusinessType::Startup | BusinessType::Technology => TemplateCategory::Startup,
            BusinessType::Other => TemplateCategory::Other,
        }
    }

    pub fn palette(&self) -> ColorPalette {
        let (primary, secondary, accent) = match self {
            BusinessType::Restaurant => ("#dc2626", "#f59e0b", "#fef3c7"),
            BusinessType::Cafe => ("#78350f", "#d97706", "#fef3c7"),
            BusinessType::Bakery => ("#b45309", "#f472b6", "#fff7ed"),
            BusinessType::Fitness => ("#ea580c", "#1f2937", "#fed7aa"),
            BusinessType::Gym => ("#111827", "#ef4444", "#fee2e2"),
            BusinessType::Yoga => ("#7c3aed", "#14b8a6", "#ede9fe"),
            BusinessType::Healthcare => ("#0284c7", "#10b981", "#e0f2fe"),
            BusinessType::Dental => ("#0ea5e9", "#22d3ee", "#ecfeff"),
            BusinessType::Beauty => ("#db2777", "#a855f7", "#fce7f3"),
            BusinessType::Spa => ("#0d9488", "#a7f3d0", "#f0fdfa"),
            BusinessType::Salon => ("#be185d", "#f9a8d4", "#fdf2f8"),
            BusinessType::RealEstate => ("#1e3a8a", "#ca8a04", "#eff6ff"),
            BusinessType::Education => ("#2563eb", "#16a34a", "#dbeafe"),
            BusinessType::Agency => ("#4f46e5", "#ec4899", "#e0e7ff"),
            BusinessType::Consulting => ("#1e40af", "#64748b", "#f1f5f9"),
            BusinessType::Legal => ("#1f2937", "#b45309", "#f5f5f4"),
            BusinessType::Portfolio => ("#18181b", "#6366f1", "#f4f4f5"),
            BusinessType::Photography => ("#0f172a", "#f59e0b", "#f8fafc"),
            BusinessType::Service => ("#0369a1", "#f97316", "#e0f2fe"),
            BusinessType::Automotive => ("#b91c1c", "#374151", "#f3f4f6"),
            BusinessType::Construction => ("#ca8a04", "#1f2937", "#fef9c3"),
            BusinessType::Ecommerce => ("#7c3aed", "#f59e0b", "#f5f3ff"),
            BusinessType::Retail => ("#9333ea", "#f43f5e", "#faf5ff"),
            BusinessType::Startup => ("#6366f1", "#06b6d4", "#eef2ff"),
            BusinessType::Technology => ("#2563eb", "#7c3aed", "#eff6ff"),
            BusinessType::Other => ("#3b82f6", "#8b5cf6", "#eff6ff"),
        };
        ColorPalette {
            primary,
            secondary,
            accent,
        }
    }
}

impl TemplateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Agency => "agency",
            TemplateCategory::Ecommerce => "ecommerce",
            TemplateCategory::Restaurant => "restaurant",
            TemplateCategory::Fitness => "fitness",
            TemplateCategory::Healthcare => "healthcare",
            TemplateCategory::Beauty => "beauty",
            TemplateCategory::Service => "service",
            TemplateCategory::Portfolio => "portfolio",
            TemplateCategory::RealEstate => "realestate",
            TemplateCategory::Education => "education",
            TemplateCategory::Startup => "startup",
            TemplateCategory::Other => "other",
        }
    }
}

impl From<String> for BusinessType {
    fn from(raw: String) -> Self {
        BusinessType::parse(&raw)
    }
}

impl From<BusinessType> for String {
    fn from(bt: BusinessType) -> Self {
        bt.as_str().to_string()
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(BusinessType::parse("Real Estate"), BusinessType::RealEstate);
        assert_eq!(BusinessType::parse("e-commerce"), BusinessType::Ecommerce);
        assert_eq!(BusinessType::parse("Day Spa"), BusinessType::Spa);
        assert_eq!(BusinessType::parse("coffee shop"), BusinessType::Cafe);
        assert_eq!(BusinessType::parse("underwater basket weaving"), BusinessType::Other);
        assert_eq!(BusinessType::parse(""), BusinessType::Other);
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for bt in BusinessType::ALL {
            assert_eq!(BusinessType::parse(bt.as_str()), bt, "{bt}");
        }
    }

    #[test]
    fn test_sub_types_map_to_parent_category() {
        assert_eq!(BusinessType::Spa.template_category(), TemplateCategory::Beauty);
        assert_eq!(BusinessType::Bakery.template_category(), TemplateCategory::Restaurant);
        assert_eq!(BusinessType::Legal.template_category(), TemplateCategory::Service);
        assert_eq!(BusinessType::Other.template_category(), TemplateCategory::Other);
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let json = serde_json::to_string(&BusinessType::RealEstate).unwrap();
        assert_eq!(json, "\"realestate\"");
        let parsed: BusinessType = serde_json::from_str("\"Hair Salon\"").unwrap();
        assert_eq!(parsed, BusinessType::Salon);
    }

    #[test]
    fn test_other_palette_matches_default_colors() {
        let palette = BusinessType::Other.palette();
        assert_eq!(palette.primary, "#3b82f6");
        assert_eq!(palette.secondary, "#8b5cf6");
    }
}
