use super::*;
use std::collections::HashMap;

fn category_counts(catalog: &Catalog) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for record in &catalog.records {
        *counts
            .entry(record.category.clone().unwrap_or_default())
            .or_insert(0) += 1;
    }
    counts
}

#[test]
fn builtin_catalogs_parse() {
    let code_study = BuiltinCatalog::CodeStudy.load().expect("code-study parses");
    assert_eq!(code_study.name, "code-study");
    assert_eq!(code_study.default_source_origin, "code-study");
    assert_eq!(code_study.len(), 25);

    let studies = BuiltinCatalog::Studies5To8.load().expect("studies-5-8 parses");
    assert_eq!(studies.name, "studies-5-8");
    assert_eq!(studies.len(), 25);

    let eiffel_org = BuiltinCatalog::EiffelOrg.load().expect("eiffel-org parses");
    assert_eq!(eiffel_org.name, "eiffel-org");
    assert_eq!(eiffel_org.default_source_origin, "eiffel.org");
    assert_eq!(eiffel_org.len(), 12);
}

#[test]
fn builtin_records_are_complete() {
    for catalog in Catalog::builtin_all().expect("catalogs parse") {
        assert!(!catalog.is_empty());
        for record in &catalog.records {
            assert!(
                !record.question.trim().is_empty(),
                "{}: empty question",
                catalog.name
            );
            assert!(
                !record.answer.trim().is_empty(),
                "{}: empty answer for {}",
                catalog.name,
                record.question
            );
        }
    }
}

#[test]
fn builtin_category_breakdown() {
    let code_study = BuiltinCatalog::CodeStudy.load().expect("code-study parses");
    let counts = category_counts(&code_study);
    assert_eq!(counts.get("architect"), Some(&13));
    assert_eq!(counts.get("newcomer"), Some(&7));
    assert_eq!(counts.get("dbc"), Some(&5));

    let studies = BuiltinCatalog::Studies5To8.load().expect("studies-5-8 parses");
    let counts = category_counts(&studies);
    assert_eq!(counts.get("scoop"), Some(&6));
    assert_eq!(counts.get("debugger"), Some(&1));
}

#[test]
fn builtin_first_records() {
    let code_study = Catalog::builtin("code-study").expect("code-study parses");
    let first = &code_study.records[0];
    assert_eq!(
        first.question,
        "How do I combine an interface with an implementation in Eiffel?"
    );
    assert_eq!(first.difficulty, Some(3));
    assert_eq!(first.category.as_deref(), Some("architect"));
    assert!(first.answer.contains("```eiffel"));

    let eiffel_org = Catalog::builtin("eiffel-org").expect("eiffel-org parses");
    assert_eq!(eiffel_org.records[0].question, "What is Eiffel?");
}

#[test]
fn catalog_name_round_trip() {
    for catalog in BuiltinCatalog::ALL {
        let parsed: BuiltinCatalog = catalog.to_string().parse().expect("name parses");
        assert_eq!(parsed, catalog);

        let value = catalog
            .to_possible_value()
            .expect("every catalog is selectable");
        assert_eq!(value.get_name(), catalog.name());
    }

    assert!(matches!(
        "studies-9-12".parse::<BuiltinCatalog>(),
        Err(LoaderError::Catalog(_))
    ));
}

#[test]
fn custom_catalog_from_toml() {
    let catalog = Catalog::from_toml(
        r#"
        name = "scratch"
        default_source_origin = "manual"

        [[faq]]
        question = "What is a creation procedure?"
        answer = "A routine listed in the create clause."

        [[faq]]
        question = "What does `like Current` mean?"
        answer = "An anchored type."
        category = "newcomer"
        difficulty = 2
        "#,
    )
    .expect("custom catalog parses");

    assert_eq!(catalog.name, "scratch");
    assert_eq!(catalog.description, "");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.records[0].category, None);
    assert_eq!(catalog.records[1].difficulty, Some(2));
}

#[test]
fn malformed_catalog_is_rejected() {
    let result = Catalog::from_toml("name = \"broken\"\n[[faq]]\nquestion = \"no answer\"\n");
    assert!(matches!(result, Err(LoaderError::Catalog(_))));
}
