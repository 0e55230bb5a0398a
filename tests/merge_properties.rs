use pagesmith::{
    identify_missing_fields, merge_arrays, merge_data, BusinessType, Confidence, ContactInfo,
    LlmExtractedRecord, PreferredColors, ScrapedRecord, DEFAULT_BUSINESS_NAME,
    DEFAULT_DESCRIPTION, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn scraped() -> ScrapedRecord {
    ScrapedRecord {
        name: Some("Harbor Dental".into()),
        description: Some("Family dentistry on the waterfront since 1998.".into()),
        logo: Some("https://harbor.example/logo.svg".into()),
        primary_color: Some("#0ea5e9".into()),
        business_type: Some(BusinessType::Dental),
        services: strings(&["Cleanings", "Whitening", "Implants"]),
        contact: ContactInfo {
            phone: Some("555-0100".into()),
            email: Some("front@harbor.example".into()),
            ..Default::default()
        },
        confidence: Confidence::Medium,
        ..Default::default()
    }
}

fn llm() -> LlmExtractedRecord {
    LlmExtractedRecord {
        business_name: Some("Harbor Family Dental".into()),
        services: strings(&["whitening", "Invisalign"]),
        email: Some("hello@harbor.example".into()),
        preferred_colors: PreferredColors {
            primary: Some("#123456".into()),
            secondary: None,
        },
        ..Default::default()
    }
}

#[test]
fn test_merge_of_nothing_is_all_defaults() {
    let record = merge_data(None, None);
    assert_eq!(record.name, DEFAULT_BUSINESS_NAME);
    assert_eq!(record.description, DEFAULT_DESCRIPTION);
    assert_eq!(record.primary_color, DEFAULT_PRIMARY_COLOR);
    assert_eq!(record.secondary_color, DEFAULT_SECONDARY_COLOR);
    assert_eq!(record.business_type, BusinessType::Other);
    assert_eq!(record.confidence, Confidence::Low);
    assert!(record.services.is_empty());
}

#[test]
fn test_llm_wins_identity_and_contact() {
    let record = merge_data(Some(&scraped()), Some(&llm()));
    assert_eq!(record.name, "Harbor Family Dental");
    assert_eq!(record.email.as_deref(), Some("hello@harbor.example"));
    assert_eq!(record.phone.as_deref(), Some("555-0100"));
    assert_eq!(record.primary_color, "#123456");
    assert_eq!(record.description, "Family dentistry on the waterfront since 1998.");
    assert_eq!(record.logo.as_deref(), Some("https://harbor.example/logo.svg"));
}

#[test]
fn test_services_union_without_case_duplicates() {
    let record = merge_data(Some(&scraped()), Some(&llm()));
    assert_eq!(
        record.services,
        strings(&["whitening", "Invisalign", "Cleanings", "Implants"])
    );
}

#[test]
fn test_merge_is_deterministic() {
    let first = merge_data(Some(&scraped()), Some(&llm()));
    let second = merge_data(Some(&scraped()), Some(&llm()));
    assert_eq!(first, second);
}

#[test]
fn test_merge_arrays_is_idempotent() {
    let items = strings(&["A", "b", "a", "B", "c"]);
    let once = merge_arrays(&items, &[], 10);
    let twice = merge_arrays(&once, &once, 10);
    assert_eq!(once, strings(&["A", "b", "c"]));
    assert_eq!(once, twice);
}

#[test]
fn test_merge_arrays_respects_limit() {
    let many: Vec<String> = (0..20).map(|i| format!("item {i}")).collect();
    assert_eq!(merge_arrays(&many, &many, 5).len(), 5);
    assert!(merge_arrays(&many, &[], 0).is_empty());
}

#[test]
fn test_adding_a_source_never_lowers_confidence() {
    let rank = |c: Confidence| match c {
        Confidence::Low => 0,
        Confidence::Medium => 1,
        Confidence::High => 2,
    };
    let only_scraped = merge_data(Some(&scraped()), None).confidence;
    let only_llm = merge_data(None, Some(&llm())).confidence;
    let both = merge_data(Some(&scraped()), Some(&llm())).confidence;
    assert!(rank(both) >= rank(only_scraped));
    assert!(rank(both) >= rank(only_llm));
}

#[test]
fn test_more_data_means_fewer_missing_fields() {
    let bare = identify_missing_fields(&merge_data(None, None));
    let rich = identify_missing_fields(&merge_data(Some(&scraped()), Some(&llm())));
    assert!(rich.len() < bare.len());
    assert!(rich.iter().all(|field| bare.contains(field)));
    assert!(!rich.contains(&"contact info".to_string()));
    assert!(!rich.contains(&"logo".to_string()));
}
