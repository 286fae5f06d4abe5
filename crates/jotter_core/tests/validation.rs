use jotter_core::{validate_draft, validation_messages, Draft, DraftIssue};

#[test]
fn both_blank_fields_report_title_then_content() {
    let issues = validate_draft("", "");
    assert_eq!(
        validation_messages(&issues),
        vec![
            "Title is required.".to_string(),
            "Content is required.".to_string()
        ]
    );
}

#[test]
fn whitespace_only_fields_count_as_blank() {
    for blank in ["", " ", "\t", "\n", "  \r\n  "] {
        let title_issues = validate_draft(blank, "body");
        assert_eq!(title_issues, vec![DraftIssue::TitleRequired], "{blank:?}");

        let content_issues = validate_draft("title", blank);
        assert_eq!(content_issues, vec![DraftIssue::ContentRequired], "{blank:?}");
    }
}

#[test]
fn non_blank_draft_is_valid() {
    assert!(validate_draft("A", "x").is_empty());
    assert!(validate_draft("  padded  ", "\tbody\n").is_empty());
    assert!(Draft::new("A", "x").validate().is_empty());
}

#[test]
fn issue_display_matches_message() {
    assert_eq!(DraftIssue::TitleRequired.to_string(), "Title is required.");
    assert_eq!(DraftIssue::ContentRequired.to_string(), "Content is required.");
}
