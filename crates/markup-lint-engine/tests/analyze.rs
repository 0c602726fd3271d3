use markup_lint_engine::{
    Analyzer, DiagnosticTag, ProjectKind, Severity, TagPayload, TagSuppression, analyze, codes,
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

fn codes_of(tags: &[DiagnosticTag]) -> Vec<&str> {
    tags.iter().map(|t| t.error_code.as_str()).collect()
}

#[test]
fn uwp_page_reports_in_closing_order() {
    let doc = fixture("main_page.xaml");
    let tags = analyze(&doc, "MainPage.xaml", ProjectKind::Uwp, &[]);

    assert_eq!(
        codes_of(&tags),
        vec![
            codes::HARDCODED_STRING,
            codes::HARDCODED_STRING,
            codes::TEXT_BOX_WITHOUT_INPUT_SCOPE,
            codes::IMAGE_WITHOUT_NAME,
            codes::MISSING_ROW_DEFINITION,
        ]
    );
    for tag in &tags {
        assert_eq!(tag.file_name, "MainPage.xaml");
        assert!(tag.span.slice(&doc).is_some());
    }
}

#[test]
fn hardcoded_string_spans_cover_the_attribute() {
    let doc = fixture("main_page.xaml");
    let tags = analyze(&doc, "MainPage.xaml", ProjectKind::Uwp, &[]);

    assert_eq!(tags[0].span.slice(&doc), Some("Text=\"Welcome\""));
    assert_eq!(tags[1].span.slice(&doc), Some("Header=\"Name\""));
    assert_eq!(tags[4].span.slice(&doc), Some("Grid.Row=\"2\""));
    assert_eq!(tags[4].severity, Severity::Warning);
}

#[test]
fn existing_uid_needs_no_fix() {
    let doc = fixture("main_page.xaml");
    let tags = analyze(&doc, "MainPage.xaml", ProjectKind::Uwp, &[]);

    match &tags[0].payload {
        TagPayload::HardcodedString { uid, uid_exists, .. } => {
            assert_eq!(uid, "Title");
            assert!(uid_exists);
        }
        other => panic!("unexpected payload {other:?}"),
    }
    assert_eq!(tags[0].suggested_edit(), None);

    let fixed = tags[1].suggested_edit().unwrap().apply(&doc);
    assert!(fixed.contains("<TextBox x:Uid=\"TextBoxName\" Grid.Row=\"1\" Header=\"Name\" />"));
}

#[test]
fn missing_row_fix_clears_the_tag() {
    let doc = fixture("main_page.xaml");
    let tags = analyze(&doc, "MainPage.xaml", ProjectKind::Uwp, &[]);
    let missing = tags
        .iter()
        .find(|t| t.error_code == codes::MISSING_ROW_DEFINITION)
        .unwrap();

    let fixed = missing.suggested_edit().unwrap().apply(&doc);
    assert!(fixed.contains(
        "            <RowDefinition Height=\"*\" />\n            <RowDefinition Height=\"*\" />\n        </Grid.RowDefinitions>"
    ));

    let again = analyze(&fixed, "MainPage.xaml", ProjectKind::Uwp, &[]);
    assert!(!codes_of(&again).contains(&codes::MISSING_ROW_DEFINITION));
}

#[test]
fn file_wide_suppression_wins_over_element_rules() {
    let doc = fixture("main_page.xaml");
    let suppressions = [
        TagSuppression::file_wide(codes::HARDCODED_STRING, "MainPage.xaml").for_element("x:Uid=\"Title\""),
        TagSuppression::file_wide(codes::HARDCODED_STRING, "MainPage.xaml"),
    ];
    let tags = analyze(&doc, "MainPage.xaml", ProjectKind::Uwp, &suppressions);

    assert_eq!(
        codes_of(&tags),
        vec![
            codes::TEXT_BOX_WITHOUT_INPUT_SCOPE,
            codes::IMAGE_WITHOUT_NAME,
            codes::MISSING_ROW_DEFINITION,
        ]
    );
}

#[test]
fn element_suppression_only_hides_that_element() {
    let doc = fixture("main_page.xaml");
    let suppressions =
        [TagSuppression::file_wide(codes::HARDCODED_STRING, "MainPage.xaml").for_element("x:Uid=\"Title\"")];
    let tags = analyze(&doc, "MainPage.xaml", ProjectKind::Uwp, &suppressions);

    let hardcoded: Vec<_> = tags
        .iter()
        .filter(|t| t.error_code == codes::HARDCODED_STRING)
        .collect();
    assert_eq!(hardcoded.len(), 1);
    assert_eq!(hardcoded[0].element_identifier, "Header=\"Name\"");
}

#[test]
fn suppression_for_another_file_is_ignored() {
    let doc = fixture("main_page.xaml");
    let suppressions = [TagSuppression::file_wide(codes::HARDCODED_STRING, "OtherPage.xaml")];
    assert_eq!(analyze(&doc, "MainPage.xaml", ProjectKind::Uwp, &suppressions).len(), 5);
}

#[test]
fn forms_page_uses_short_hand_definitions() {
    let doc = fixture("forms_page.xaml");
    let tags = analyze(&doc, "FormsPage.xaml", ProjectKind::XamarinForms, &[]);

    assert_eq!(
        codes_of(&tags),
        vec![
            codes::HARDCODED_STRING,
            codes::ENTRY_WITHOUT_KEYBOARD,
            codes::HARDCODED_STRING,
            codes::COLUMN_SPAN_OVERFLOW,
        ]
    );
    assert_eq!(tags[3].span.slice(&doc), Some("Grid.ColumnSpan=\"2\""));
    assert_eq!(tags[3].definitions_to_add(), 1);
}

#[test]
fn short_hand_is_not_read_for_windows_projects() {
    let doc = fixture("forms_page.xaml");
    let tags = analyze(&doc, "FormsPage.xaml", ProjectKind::Uwp, &[]);

    assert_eq!(
        codes_of(&tags),
        vec![
            codes::ADD_ROW_AND_COLUMN_DEFINITIONS,
            codes::MISSING_ROW_DEFINITION,
            codes::MISSING_ROW_DEFINITION,
            codes::MISSING_COLUMN_DEFINITION,
            codes::COLUMN_SPAN_OVERFLOW,
        ]
    );
    assert_eq!(tags[0].severity, Severity::Hidden);
}

#[test]
fn add_definitions_fix_produces_a_clean_grid() {
    let doc = "<Page>\n    <Grid>\n        <Button Content=\"{x:Bind Go}\" />\n    </Grid>\n</Page>";
    let tags = analyze(doc, "Page.xaml", ProjectKind::Uwp, &[]);
    assert_eq!(codes_of(&tags), vec![codes::ADD_ROW_AND_COLUMN_DEFINITIONS]);

    let fixed = tags[0].suggested_edit().unwrap().apply(doc);
    assert!(analyze(&fixed, "Page.xaml", ProjectKind::Uwp, &[]).is_empty());
}

#[test]
fn session_gives_stable_suggestions() {
    let doc = "<StackPanel>\n    <TextBlock Text=\"...\" />\n    <TextBlock Text=\"Save changes\" />\n</StackPanel>";
    let mut analyzer = Analyzer::new(ProjectKind::Wpf);
    let uids = |tags: Vec<DiagnosticTag>| -> Vec<String> {
        tags.into_iter()
            .filter_map(|t| match t.payload {
                TagPayload::HardcodedString { uid, .. } => Some(uid),
                _ => None,
            })
            .collect()
    };

    let first = uids(analyzer.analyze(doc, "Page.xaml", &[]));
    assert_eq!(first, vec!["TextBlock1", "TextBlockSaveChanges"]);
    assert_eq!(uids(analyzer.analyze(doc, "Page.xaml", &[])), first);
}

#[test]
fn malformed_documents_degrade_to_partial_results() {
    let doc = "<StackPanel>\n    <TextBlock Text=\"Hello\" />\n    <Grid>\n        <Button Grid.Row=\"1\"";
    let tags = analyze(doc, "Page.xaml", ProjectKind::Uwp, &[]);
    assert_eq!(codes_of(&tags), vec![codes::HARDCODED_STRING]);
}
