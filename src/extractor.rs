use crate::business_type::BusinessType;
use crate::records::{Confidence, ContactInfo, Product, ScrapedRecord, SocialLinks, Testimonial};
use crate::utils::{absolutize, squash_whitespace};
use crate::PipelineError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

pub const MAX_GALLERY_IMAGES: usize = 12;
pub const MAX_SECTION_ITEMS: usize = 12;
pub const MAX_TESTIMONIALS: usize = 6;
pub const MAX_ABOUT_CHARS: usize = 1200;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("valid color regex")
});
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\(?\d{1,4}\)?[\s.-]?\(?\d{2,4}\)?[\s.-]?\d{3,4}[\s.-]?\d{3,4}")
        .expect("valid phone regex")
});

/// Keyword table for guessing the business type from page text
const TYPE_KEYWORDS: &[(BusinessType, &[&str])] = &[
    (BusinessType::Bakery, &["bakery", "pastry", "pastries", "croissant", "sourdough"]),
    (BusinessType::Cafe, &["cafe", "café", "coffee", "espresso", "latte"]),
    (BusinessType::Restaurant, &["restaurant", "menu", "dining", "cuisine", "reservation", "chef"]),
    (BusinessType::Gym, &["gym", "weights", "membership", "strength training"]),
    (BusinessType::Yoga, &["yoga", "pilates", "meditation", "vinyasa"]),
    (BusinessType::Fitness, &["fitness", "workout", "personal trainer", "bootcamp"]),
    (BusinessType::Dental, &["dental", "dentist", "teeth", "orthodont"]),
    (
        BusinessType::Healthcare,
        &["clinic", "medical", "doctor", "patients", "health care", "physio"],
    ),
    (BusinessType::Spa, &["spa", "massage", "facial", "wellness"]),
    (BusinessType::Salon, &["salon", "haircut", "barber", "hair color", "stylist"]),
    (BusinessType::Beauty, &["beauty", "nails", "manicure", "lashes", "makeup"]),
    (
        BusinessType::RealEstate,
        &["real estate", "realtor", "properties", "listings", "homes for sale"],
    ),
    (BusinessType::Education, &["school", "courses", "tutoring", "students", "academy", "learn"]),
    (BusinessType::Legal, &["law firm", "attorney", "lawyer", "legal"]),
    (BusinessType::Consulting, &["consulting", "consultancy", "advisory"]),
    (BusinessType::Agency, &["agency", "branding", "marketing", "creative studio"]),
    (BusinessType::Photography, &["photography", "photographer", "photo shoot", "weddings"]),
    (BusinessType::Portfolio, &["portfolio", "my work", "freelance"]),
    (BusinessType::Automotive, &["auto repair", "mechanic", "car service", "tires", "oil change"]),
    (
        BusinessType::Construction,
        &["construction", "contractor", "renovation", "roofing", "plumbing"],
    ),
    (BusinessType::Ecommerce, &["add to cart", "shop now", "free shipping", "checkout"]),
    (BusinessType::Retail, &["boutique", "store hours", "in-store"]),
    (BusinessType::Technology, &["software", "platform", "saas", "api", "cloud"]),
    (BusinessType::Startup, &["startup", "early access", "join the waitlist"]),
];

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

fn text_of(el: ElementRef<'_>) -> String {
    squash_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Whether the element's id or class mentions any of `needles`
fn has_marker(el: &ElementRef<'_>, needles: &[&str]) -> bool {
    let v = el.value();
    let haystack = format!(
        "{} {}",
        v.attr("id").unwrap_or_default(),
        v.attr("class").unwrap_or_default()
    )
    .to_lowercase();
    needles.iter().any(|n| haystack.contains(n))
}

/// HTML to [`ScrapedRecord`] extractor
#[derive(Clone, Default)]
pub struct SiteExtractor;

impl SiteExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, html: &str, url: &str) -> Result<ScrapedRecord, PipelineError> {
        let base = Url::parse(url)?;
        if html.trim().is_empty() {
            return Err(PipelineError::ExtractError("Empty document".to_string()));
        }
        let document = Html::parse_document(html);
        let ld = LinkedData::collect(&document);

        let name = self.extract_name(&document).or_else(|| ld.name.clone());
        let description = self.extract_description(&document);
        let logo = self.extract_logo(&document, &base);
        let hero_image = self
            .meta_content(
                &document,
                "meta[property='og:image'], meta[name='twitter:image'], meta[property='twitter:image']",
            )
            .and_then(|src| absolutize(&base, &src));

        let images = self.extract_images(&document, &base);
        let gallery_images: Vec<String> = images
            .iter()
            .filter(|src| Some(*src) != logo.as_ref() && Some(*src) != hero_image.as_ref())
            .take(MAX_GALLERY_IMAGES)
            .cloned()
            .collect();

        let (primary_color, secondary_color) = self.extract_colors(&document);
        let contact = self.extract_contact(&document, &ld);
        let social_links = self.extract_social_links(&document, &base);
        let services = self.section_items(&document, &["service", "menu", "offer"]);
        let features = self.section_items(&document, &["feature", "benefit", "why-us", "amenit"]);
        let about_content = self.extract_about(&document);
        let testimonials = self.extract_testimonials(&document);
        let products = self.extract_products(&document, &base);

        let mut opening_hours = self.extract_opening_hours(&document);
        for spec in &ld.opening_hours {
            insert_hours(&mut opening_hours, spec);
        }

        let business_type = ld
            .business_type
            .filter(|bt| *bt != BusinessType::Other)
            .or_else(|| detect_business_type(&document));

        let mut record = ScrapedRecord {
            name,
            description,
            logo,
            hero_image,
            gallery_images,
            images,
            primary_color,
            secondary_color,
            business_type,
            industry: business_type.map(|bt| bt.template_category().as_str().to_string()),
            category: business_type.map(|bt| bt.as_str().to_string()),
            services,
            features,
            products,
            contact,
            social_links,
            opening_hours,
            about_content,
            testimonials,
            confidence: Confidence::Low,
        };
        record.confidence = score_confidence(&record);

        debug!(
            url = %url,
            name = record.name.as_deref().unwrap_or("-"),
            images = record.images.len(),
            services = record.services.len(),
            confidence = record.confidence.as_str(),
            "Extracted site data"
        );
        Ok(record)
    }

    fn meta_content(&self, document: &Html, css: &str) -> Option<String> {
        let sel = selector(css)?;
        document
            .select(&sel)
            .filter_map(|el| el.value().attr("content"))
            .find_map(|c| non_empty(c.to_string()))
    }

    fn extract_name(&self, document: &Html) -> Option<String> {
        if let Some(site_name) = self.meta_content(document, "meta[property='og:site_name']") {
            return Some(site_name);
        }
        let title = self
            .meta_content(document, "meta[property='og:title']")
            .or_else(|| {
                let sel = selector("title")?;
                document.select(&sel).next().map(text_of)
            })?;

        // "Luna Spa | Massages in Lisbon" -> "Luna Spa"
        let first = title
            .split(['|', '–', '—', '·'])
            .next()
            .unwrap_or_default()
            .split(" - ")
            .next()
            .unwrap_or_default();
        non_empty(first.to_string())
    }

    fn extract_description(&self, document: &Html) -> Option<String> {
        self.meta_content(document, "meta[property='og:description']")
            .or_else(|| self.meta_content(document, "meta[name='description']"))
    }

    fn extract_logo(&self, document: &Html, base: &Url) -> Option<String> {
        if let Some(img_sel) = selector("img") {
            let logo_img = document.select(&img_sel).find(|img| {
                let v = img.value();
                [v.attr("class"), v.attr("id"), v.attr("alt"), v.attr("src")]
                    .into_iter()
                    .flatten()
                    .any(|a| a.to_lowercase().contains("logo"))
            });
            if let Some(src) = logo_img.and_then(|img| img.value().attr("src")) {
                if let Some(abs) = absolutize(base, src) {
                    return Some(abs);
                }
            }
        }

        let icon_sel = selector(
            "link[rel='apple-touch-icon'], link[rel='icon'], link[rel='shortcut icon']",
        )?;
        document
            .select(&icon_sel)
            .filter_map(|el| el.value().attr("href"))
            .find_map(|href| absolutize(base, href))
    }

    fn extract_images(&self, document: &Html, base: &Url) -> Vec<String> {
        let Some(sel) = selector("img") else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        document
            .select(&sel)
            .filter(|img| {
                // tracking pixels
                !matches!(img.value().attr("width"), Some("1") | Some("0"))
            })
            .filter_map(|img| {
                let v = img.value();
                v.attr("src").or_else(|| v.attr("data-src"))
            })
            .filter_map(|src| absolutize(base, src))
            .filter(|src| seen.insert(src.clone()))
            .collect()
    }

    fn extract_colors(&self, document: &Html) -> (Option<String>, Option<String>) {
        // Named and rgb() colours are skipped; records carry hex only.
        let theme = self
            .meta_content(document, "meta[name='theme-color']")
            .and_then(|c| {
                let c = c.trim();
                HEX_COLOR
                    .find(c)
                    .filter(|m| m.start() == 0 && m.end() == c.len())
                    .map(|m| normalize_hex(m.as_str()))
            });

        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        let mut tally = |text: &str| {
            for m in HEX_COLOR.find_iter(text) {
                let color = normalize_hex(m.as_str());
                if is_neutral(&color) {
                    continue;
                }
                let count = counts.entry(color.clone()).or_insert(0);
                if *count == 0 {
                    order.push(color);
                }
                *count += 1;
            }
        };

        if let Some(style_sel) = selector("style") {
            for el in document.select(&style_sel) {
                tally(&el.text().collect::<String>());
            }
        }
        if let Some(inline_sel) = selector("[style]") {
            for el in document.select(&inline_sel) {
                tally(el.value().attr("style").unwrap_or_default());
            }
        }

        // Stable sort keeps first-seen order among equally frequent colours.
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));
        let mut candidates = theme.into_iter().chain(order);
        let primary = candidates.next();
        let secondary = candidates.find(|c| Some(c) != primary.as_ref());
        (primary, secondary)
    }

    fn extract_contact(&self, document: &Html, ld: &LinkedData) -> ContactInfo {
        let href_value = |css: &str, prefix: &str| -> Option<String> {
            let sel = selector(css)?;
            document
                .select(&sel)
                .filter_map(|a| a.value().attr("href"))
                .filter_map(|href| href.get(prefix.len()..))
                .map(|v| v.split('?').next().unwrap_or_default().trim().to_string())
                .find(|v| !v.is_empty())
        };

        let body_text = selector("body")
            .and_then(|sel| document.select(&sel).next().map(text_of))
            .unwrap_or_default();

        let phone = href_value("a[href^='tel:']", "tel:")
            .or_else(|| ld.telephone.clone())
            .or_else(|| {
                PHONE
                    .find_iter(&body_text)
                    .map(|m| m.as_str().trim().to_string())
                    .find(|p| p.chars().filter(char::is_ascii_digit).count() >= 8)
            });
        let email = href_value("a[href^='mailto:']", "mailto:")
            .or_else(|| ld.email.clone())
            .or_else(|| EMAIL.find(&body_text).map(|m| m.as_str().to_string()));

        let address = selector("address")
            .and_then(|sel| document.select(&sel).next().map(text_of))
            .and_then(non_empty)
            .or_else(|| {
                let sel = selector("[itemprop='streetAddress']")?;
                document.select(&sel).next().map(text_of).and_then(non_empty)
            })
            .or_else(|| ld.street_address.clone());
        let city = selector("[itemprop='addressLocality']")
            .and_then(|sel| document.select(&sel).next().map(text_of))
            .and_then(non_empty)
            .or_else(|| ld.locality.clone());

        ContactInfo {
            phone,
            email,
            address,
            city,
        }
    }

    fn extract_social_links(&self, document: &Html, base: &Url) -> SocialLinks {
        let mut links = SocialLinks::default();
        let Some(sel) = selector("a[href]") else {
            return links;
        };

        for href in document.select(&sel).filter_map(|a| a.value().attr("href")) {
            let Some(abs) = absolutize(base, href) else {
                continue;
            };
            let Some(host) = Url::parse(&abs)
                .ok()
                .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_lowercase()))
            else {
                continue;
            };
            let slot = match host.as_str() {
                "instagram.com" => &mut links.instagram,
                "facebook.com" | "fb.com" | "m.facebook.com" => &mut links.facebook,
                "twitter.com" | "x.com" => &mut links.twitter,
                "linkedin.com" => &mut links.linkedin,
                "youtube.com" | "youtu.be" | "m.youtube.com" => &mut links.youtube,
                "tiktok.com" => &mut links.tiktok,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(abs);
            }
        }
        links
    }

    /// Short headings or list items inside the first section whose id or
    /// class mentions one of `markers`.
    fn section_items(&self, document: &Html, markers: &[&str]) -> Vec<String> {
        let (Some(container_sel), Some(item_sel)) = (
            selector("section, div, ul"),
            selector("h3, h4, li, dt"),
        ) else {
            return Vec::new();
        };
        let Some(section) = document
            .select(&container_sel)
            .find(|el| has_marker(el, markers))
        else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        section
            .select(&item_sel)
            .map(text_of)
            .filter(|t| !t.is_empty() && t.chars().count() <= 80)
            .filter(|t| seen.insert(t.to_lowercase()))
            .take(MAX_SECTION_ITEMS)
            .collect()
    }

    fn extract_about(&self, document: &Html) -> Option<String> {
        let container_sel = selector("section, div, article")?;
        let p_sel = selector("p")?;
        let section = document
            .select(&container_sel)
            .find(|el| has_marker(el, &["about", "story", "who-we-are"]))?;

        let text = section
            .select(&p_sel)
            .map(text_of)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let text: String = text.chars().take(MAX_ABOUT_CHARS).collect();
        non_empty(text)
    }

    fn extract_testimonials(&self, document: &Html) -> Vec<Testimonial> {
        let (Some(block_sel), Some(author_sel), Some(p_sel)) = (
            selector("blockquote, [class*='testimonial'], [class*='review']"),
            selector("cite, footer, [class*='author'], [class*='name']"),
            selector("p"),
        ) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut testimonials = Vec::new();
        for block in document.select(&block_sel) {
            let author = block.select(&author_sel).next().map(text_of);
            let paragraphs: Vec<String> = block
                .select(&p_sel)
                .map(text_of)
                .filter(|t| !t.is_empty())
                .collect();
            let mut text = if paragraphs.is_empty() {
                text_of(block)
            } else {
                paragraphs.join(" ")
            };
            if let Some(author) = author.as_deref().filter(|a| !a.is_empty()) {
                text = text.replace(author, "");
            }
            let text = text
                .trim()
                .trim_matches(|c| matches!(c, '"' | '“' | '”' | '—' | '-'))
                .trim()
                .to_string();

            // Skip wrappers and anything too short to be a quote.
            if text.chars().count() < 20 || text.chars().count() > 600 || !seen.insert(text.clone())
            {
                continue;
            }
            let rating = block
                .value()
                .attr("data-rating")
                .and_then(|r| r.parse::<u8>().ok())
                .filter(|r| (1..=5).contains(r));

            testimonials.push(Testimonial {
                name: author
                    .map(|a| a.trim_start_matches(['—', '-', ' ']).to_string())
                    .filter(|a| !a.is_empty())
                    .unwrap_or_else(|| "Customer".to_string()),
                text,
                rating,
                role: None,
            });
            if testimonials.len() == MAX_TESTIMONIALS {
                break;
            }
        }
        testimonials
    }

    fn extract_opening_hours(&self, document: &Html) -> BTreeMap<String, String> {
        let mut hours = BTreeMap::new();
        if let Some(sel) = selector("[itemprop='openingHours']") {
            for el in document.select(&sel) {
                let v = el.value();
                let spec = v
                    .attr("content")
                    .or_else(|| v.attr("datetime"))
                    .map(str::to_string)
                    .unwrap_or_else(|| text_of(el));
                insert_hours(&mut hours, &spec);
            }
        }
        hours
    }

    fn extract_products(&self, document: &Html, base: &Url) -> Vec<Product> {
        let Some(product_sel) = selector("[itemtype*='schema.org/Product']") else {
            return Vec::new();
        };
        let prop = |scope: ElementRef<'_>, name: &str| -> Option<String> {
            let sel = selector(&format!("[itemprop='{name}']"))?;
            let el = scope.select(&sel).next()?;
            let v = el.value();
            v.attr("content")
                .or_else(|| v.attr("src"))
                .map(str::to_string)
                .or_else(|| Some(text_of(el)))
                .and_then(non_empty)
        };

        document
            .select(&product_sel)
            .filter_map(|scope| {
                let name = prop(scope, "name")?;
                Some(Product {
                    name,
                    description: prop(scope, "description"),
                    price: prop(scope, "price").map(|p| {
                        match prop(scope, "priceCurrency") {
                            Some(currency) if !p.contains(&currency) => format!("{p} {currency}"),
                            _ => p,
                        }
                    }),
                    sale_price: None,
                    image: prop(scope, "image").and_then(|src| absolutize(base, &src)),
                    category: prop(scope, "category"),
                })
            })
            .collect()
    }
}

fn normalize_hex(raw: &str) -> String {
    let hex = raw.trim_start_matches('#').to_lowercase();
    if hex.len() == 3 {
        let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
        format!("#{expanded}")
    } else {
        format!("#{hex}")
    }
}

/// White, black and greys say nothing about a brand
fn is_neutral(color: &str) -> bool {
    let hex = color.trim_start_matches('#');
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
    if hex.len() != 6 {
        return true;
    }
    let (r, g, b) = (channel(0), channel(2), channel(4));
    r.max(g).max(b) - r.min(g).min(b) < 16
}

/// "Mo-Fr 09:00-17:00" becomes `{"Mo-Fr": "09:00-17:00"}`
fn insert_hours(hours: &mut BTreeMap<String, String>, spec: &str) {
    let spec = squash_whitespace(spec);
    match spec.split_once(' ') {
        Some((days, time)) => {
            hours.insert(days.to_string(), time.to_string());
        }
        None if !spec.is_empty() => {
            hours.insert(spec, "Open".to_string());
        }
        None => {}
    }
}

fn detect_business_type(document: &Html) -> Option<BusinessType> {
    let sel = selector("title, meta[name='description'], h1, h2, h3, nav a")?;
    let text = document
        .select(&sel)
        .map(|el| {
            el.value()
                .attr("content")
                .map(str::to_string)
                .unwrap_or_else(|| text_of(el))
        })
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    // First entry wins ties, so narrower types are listed before their parents.
    let mut best: Option<(BusinessType, usize)> = None;
    for (bt, keywords) in TYPE_KEYWORDS {
        let hits = keywords.iter().filter(|k| text.contains(*k)).count();
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((*bt, hits));
        }
    }
    best.map(|(bt, _)| bt)
}

fn score_confidence(record: &ScrapedRecord) -> Confidence {
    let signals = [
        record.name.is_some(),
        record.description.is_some(),
        record.logo.is_some(),
        record.hero_image.is_some(),
        record.images.len() >= 3,
        record.contact.phone.is_some() || record.contact.email.is_some(),
        !record.services.is_empty(),
        record.about_content.is_some(),
        !record.testimonials.is_empty(),
        !record.social_links.is_empty(),
    ]
    .into_iter()
    .filter(|s| *s)
    .count();

    match signals {
        7.. => Confidence::High,
        4..=6 => Confidence::Medium,
        _ => Confidence::Low,
    }
}

/// Facts from `<script type="application/ld+json">` blocks
#[derive(Debug, Default)]
struct LinkedData {
    name: Option<String>,
    business_type: Option<BusinessType>,
    telephone: Option<String>,
    email: Option<String>,
    street_address: Option<String>,
    locality: Option<String>,
    opening_hours: Vec<String>,
}

impl LinkedData {
    fn collect(document: &Html) -> Self {
        let mut ld = LinkedData::default();
        let Some(sel) = selector("script[type='application/ld+json']") else {
            return ld;
        };
        for script in document.select(&sel) {
            let raw = script.text().collect::<String>();
            match serde_json::from_str::<serde_json::Value>(&raw) {
                Ok(value) => ld.absorb(&value),
                Err(e) => debug!(error = %e, "Skipping malformed JSON-LD block"),
            }
        }
        ld
    }

    fn absorb(&mut self, value: &serde_json::Value) {
        use serde_json::Value;

        match value {
            Value::Array(items) => items.iter().for_each(|v| self.absorb(v)),
            Value::Object(map) => {
                if let Some(graph) = map.get("@graph") {
                    self.absorb(graph);
                }
                let kind = map.get("@type").and_then(Value::as_str).unwrap_or_default();
                if kind.is_empty() || matches!(kind, "WebSite" | "WebPage" | "BreadcrumbList") {
                    return;
                }

                let text = |key: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .and_then(|s| non_empty(s.to_string()))
                };
                if self.business_type.is_none() && kind != "Organization" {
                    self.business_type = Some(BusinessType::parse(kind));
                }
                self.name = self.name.take().or_else(|| text("name"));
                self.telephone = self.telephone.take().or_else(|| text("telephone"));
                self.email = self.email.take().or_else(|| text("email"));

                if let Some(Value::Object(address)) = map.get("address") {
                    let field = |key: &str| {
                        address
                            .get(key)
                            .and_then(Value::as_str)
                            .and_then(|s| non_empty(s.to_string()))
                    };
                    self.street_address =
                        self.street_address.take().or_else(|| field("streetAddress"));
                    self.locality = self.locality.take().or_else(|| field("addressLocality"));
                }

                match map.get("openingHours") {
                    Some(Value::String(s)) => self.opening_hours.push(s.clone()),
                    Some(Value::Array(items)) => self
                        .opening_hours
                        .extend(items.iter().filter_map(Value::as_str).map(str::to_string)),
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAKERY: &str = r##"<!DOCTYPE html>
<html>
<head>
  <title>Crumb &amp; Co | Artisan Bakery in Porto</title>
  <meta name="description" content="Sourdough, pastries and coffee baked fresh every morning.">
  <meta property="og:image" content="/img/hero.jpg">
  <meta name="theme-color" content="#B45309">
  <link rel="icon" href="/favicon.ico">
  <style>.btn { background: #f472b6; } .x { color: #ffffff; }</style>
</head>
<body>
  <header><img class="site-logo" src="/img/logo.png" alt="Crumb logo"></header>
  <section id="services">
    <h2>What we bake</h2>
    <ul><li>Sourdough Bread</li><li>Croissants</li><li>Custom Cakes</li><li>croissants</li></ul>
  </section>
  <section class="about-us">
    <p>Crumb &amp; Co started in 2012 as a tiny neighbourhood oven.</p>
    <p>Today we still bake everything by hand before sunrise.</p>
  </section>
  <div class="gallery"><img src="/img/a.jpg"><img src="/img/b.jpg"><img src="/img/a.jpg"><img src="/px.gif" width="1"></div>
  <blockquote data-rating="5"><p>The best croissant I have had outside of Paris.</p><cite>Ana P.</cite></blockquote>
  <div itemscope itemtype="https://schema.org/Product">
    <span itemprop="name">Country Loaf</span>
    <meta itemprop="price" content="6.50"><meta itemprop="priceCurrency" content="EUR">
  </div>
  <footer>
    <a href="tel:+351 222 333 444">Call us</a>
    <a href="mailto:hello@crumb.example?subject=Hi">Email</a>
    <address>Rua das Flores 10</address>
    <span itemprop="openingHours" content="Tu-Su 07:00-19:00">Tue-Sun</span>
    <a href="https://www.instagram.com/crumbco">Instagram</a>
    <a href="https://facebook.com/crumbco">Facebook</a>
  </footer>
</body>
</html>"##;

    fn extract() -> ScrapedRecord {
        SiteExtractor::new()
            .extract(BAKERY, "https://crumb.example/")
            .unwrap()
    }

    #[test]
    fn test_identity_fields() {
        let record = extract();
        assert_eq!(record.name.as_deref(), Some("Crumb & Co"));
        assert!(record.description.unwrap().starts_with("Sourdough"));
        assert_eq!(record.logo.as_deref(), Some("https://crumb.example/img/logo.png"));
        assert_eq!(record.hero_image.as_deref(), Some("https://crumb.example/img/hero.jpg"));
        assert_eq!(record.business_type, Some(BusinessType::Bakery));
    }

    #[test]
    fn test_images_are_deduplicated_and_exclude_logo() {
        let record = extract();
        assert_eq!(
            record.gallery_images,
            vec![
                "https://crumb.example/img/a.jpg".to_string(),
                "https://crumb.example/img/b.jpg".to_string()
            ]
        );
        assert_eq!(record.images.len(), 3);
    }

    #[test]
    fn test_colors_prefer_theme_color() {
        let record = extract();
        assert_eq!(record.primary_color.as_deref(), Some("#b45309"));
        assert_eq!(record.secondary_color.as_deref(), Some("#f472b6"));
    }

    #[test]
    fn test_non_hex_theme_color_is_ignored() {
        let html = r#"<html><head><title>Fig</title>
            <meta name="theme-color" content="rgb(180, 83, 9)">
            <style>.a { color: #0EA5E9; } .b { color: #0ea5e9; } .c { color: #F97316; }</style>
            </head><body></body></html>"#;
        let record = SiteExtractor::new().extract(html, "https://fig.example/").unwrap();
        assert_eq!(record.primary_color.as_deref(), Some("#0ea5e9"));
        assert_eq!(record.secondary_color.as_deref(), Some("#f97316"));

        let html = r#"<html><head><meta name="theme-color" content="red"></head></html>"#;
        let record = SiteExtractor::new().extract(html, "https://fig.example/").unwrap();
        assert_eq!(record.primary_color, None);

        let html = r#"<html><head><meta name="theme-color" content=" #F60 "></head></html>"#;
        let record = SiteExtractor::new().extract(html, "https://fig.example/").unwrap();
        assert_eq!(record.primary_color.as_deref(), Some("#ff6600"));
    }

    #[test]
    fn test_contact_and_social() {
        let record = extract();
        assert_eq!(record.contact.phone.as_deref(), Some("+351 222 333 444"));
        assert_eq!(record.contact.email.as_deref(), Some("hello@crumb.example"));
        assert_eq!(record.contact.address.as_deref(), Some("Rua das Flores 10"));
        assert_eq!(
            record.social_links.instagram.as_deref(),
            Some("https://www.instagram.com/crumbco")
        );
        assert!(record.social_links.facebook.is_some());
        assert!(record.social_links.youtube.is_none());
    }

    #[test]
    fn test_sections() {
        let record = extract();
        assert_eq!(
            record.services,
            vec!["Sourdough Bread", "Croissants", "Custom Cakes"]
        );
        assert!(record.about_content.unwrap().contains("by hand"));
        assert_eq!(record.testimonials.len(), 1);
        assert_eq!(record.testimonials[0].name, "Ana P.");
        assert_eq!(record.testimonials[0].rating, Some(5));
        assert_eq!(record.opening_hours.get("Tu-Su").map(String::as_str), Some("07:00-19:00"));
        assert_eq!(record.products[0].price.as_deref(), Some("6.50 EUR"));
        assert_eq!(record.confidence, Confidence::High);
    }

    #[test]
    fn test_json_ld_fills_gaps() {
        let html = r#"<html><head><title>Home</title>
            <script type="application/ld+json">
            {"@context": "https://schema.org", "@type": "DaySpa", "name": "Luna Spa",
             "telephone": "+1 555 0100 200",
             "address": {"@type": "PostalAddress", "streetAddress": "1 Main St", "addressLocality": "Austin"},
             "openingHours": ["Mo-Fr 10:00-20:00", "Sa 10:00-16:00"]}
            </script></head><body><p>Welcome</p></body></html>"#;
        let record = SiteExtractor::new()
            .extract(html, "https://luna.example")
            .unwrap();
        assert_eq!(record.business_type, Some(BusinessType::Spa));
        assert_eq!(record.contact.phone.as_deref(), Some("+1 555 0100 200"));
        assert_eq!(record.contact.city.as_deref(), Some("Austin"));
        assert_eq!(record.opening_hours.len(), 2);
    }

    #[test]
    fn test_empty_document_is_an_error() {
        assert!(matches!(
            SiteExtractor::new().extract("   ", "https://a.example"),
            Err(PipelineError::ExtractError(_))
        ));
        assert!(SiteExtractor::new().extract("<p>x</p>", "not a url").is_err());
    }

    #[test]
    fn test_neutral_colors_are_ignored() {
        assert!(is_neutral("#ffffff"));
        assert!(is_neutral("#333333"));
        assert!(!is_neutral("#3b82f6"));
        assert_eq!(normalize_hex("#FA0"), "#ffaa00");
    }
}
