//! End-to-end checks from source text to issues over the fixture dataset.

use caniemail::{check, Catalog, CheckOptions, CheckResult, Client, Engine, Error, Point, Position};

const DATASET: &str = include_str!("../../caniemail-core/tests/fixtures/caniemail.json");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn engine() -> Engine {
    init_tracing();
    Engine::new(Catalog::from_json_str(DATASET).expect("fixture decodes")).expect("indexes build")
}

fn run(options: CheckOptions) -> CheckResult {
    check(&engine(), &options).expect("check succeeds")
}

fn span(start: (u32, u32), end: (u32, u32)) -> Option<Position> {
    Some(Position::new(Point::new(start.0, start.1), Point::new(end.0, end.1)))
}

fn error_titles(result: &CheckResult, client: Client) -> Vec<&str> {
    result
        .issues
        .errors
        .get(client)
        .unwrap_or_default()
        .iter()
        .map(|issue| issue.title.as_str())
        .collect()
}

#[test]
fn test_flex_direction_fails_on_gmail() {
    let result = run(
        CheckOptions::new(["gmail.desktop-webmail"]).css(".test { flex-direction: column; }"),
    );

    assert!(!result.success);
    let errors = result.issues.errors.get(Client::GmailDesktopWebmail).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].title, "flex-direction");
    assert_eq!(errors[0].position, span((1, 9), (1, 30)));
    assert!(result.issues.warnings.is_empty());
}

#[test]
fn test_blank_template_passes_on_gmail() {
    let html = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<style>\n</style>\n</head>\n<body>\n</body>\n</html>\n";
    let result = run(CheckOptions::new(["gmail.*"]).html(html));

    assert!(result.success);
    assert!(result.issues.is_empty());
}

#[test]
fn test_inline_background_color_passes() {
    let result = run(
        CheckOptions::new(["gmail.*", "apple-mail.*"])
            .html(r##"<div style="background-color: #fff">Hello</div>"##),
    );

    assert!(result.success);
    assert!(result.issues.is_empty());
}

#[test]
fn test_style_block_filter_fails_with_document_position() {
    let html = "<html><head><style>\n.a {\n  filter: blur(2px);\n}\n</style></head><body class=\"a\"></body></html>";
    let result = run(CheckOptions::new(["gmail.desktop-webmail"]).html(html));

    assert!(!result.success);
    let errors = result.issues.errors.get(Client::GmailDesktopWebmail).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].title, "filter");
    assert_eq!(errors[0].position, span((3, 3), (3, 19)));
}

#[test]
fn test_inline_flex_direction_fails_at_element() {
    let result = run(
        CheckOptions::new(["gmail.desktop-webmail"])
            .html(r#"<div style="flex-direction: row">Hello</div>"#),
    );

    assert!(!result.success);
    let errors = result.issues.errors.get(Client::GmailDesktopWebmail).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].title, "flex-direction");
    assert_eq!(errors[0].position, span((1, 1), (1, 44)));
}

#[test]
fn test_inline_and_element_issues_share_position() {
    let result = run(
        CheckOptions::new(["gmail.ios"])
            .html("<p>\n<a href=\"#top\" style=\"flex-direction: row\">Top</a></p>"),
    );

    let titles = error_titles(&result, Client::GmailIos);
    assert_eq!(titles, ["Anchor links", "flex-direction"]);

    let errors = result.issues.errors.get(Client::GmailIos).unwrap();
    assert_eq!(errors[0].position, span((2, 1), (2, 50)));
    assert_eq!(errors[1].position, errors[0].position);
}

#[test]
fn test_selectors_pass_on_gmail_desktop() {
    let css = "div > a#linkId[href=\"https://google.com\"].link {}\n* { box-sizing: border-box }";
    let result = run(CheckOptions::new(["gmail.desktop-webmail"]).css(css));

    assert!(result.success);
    assert!(result.issues.is_empty());
}

#[test]
fn test_selectors_fail_on_gmail_mobile_webmail() {
    let result = run(CheckOptions::new(["gmail.mobile-webmail"]).css(".a { color: red }"));

    assert!(!result.success);
    assert_eq!(error_titles(&result, Client::GmailMobileWebmail), ["Class selector"]);
    let errors = result.issues.errors.get(Client::GmailMobileWebmail).unwrap();
    assert_eq!(errors[0].position, span((1, 1), (1, 17)));
}

#[test]
fn test_anchor_links_fail_on_gmail_ios() {
    let result = run(CheckOptions::new(["gmail.ios"]).html(r##"<a href="#section">Jump</a>"##));

    assert!(!result.success);
    let errors = result.issues.errors.get(Client::GmailIos).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].title, "Anchor links");
    assert_eq!(errors[0].position, span((1, 1), (1, 27)));
}

#[test]
fn test_mailto_links_pass() {
    let result = run(
        CheckOptions::new(["gmail.ios"]).html(r#"<a href="mailto:someone@example.com">Mail</a>"#),
    );

    assert!(result.success);
}

#[test]
fn test_inline_display_flex_fails_on_outlook() {
    let result = run(
        CheckOptions::new(["outlook.windows"]).html(r#"<div style="display: flex">Hello</div>"#),
    );

    assert!(!result.success);
    assert_eq!(error_titles(&result, Client::OutlookWindows), ["display:flex"]);
}

#[test]
fn test_empty_styles_pass() {
    let result = run(CheckOptions::new(["gmail.ios"]).html(r#"<style></style><p style="">Hi</p>"#));

    assert!(result.success);
    assert!(result.issues.is_empty());
}

#[test]
fn test_rem_unit_fails_on_outlook() {
    let result = run(CheckOptions::new(["outlook.windows"]).css("p { font-size: 2rem }"));

    assert!(!result.success);
    assert_eq!(error_titles(&result, Client::OutlookWindows), ["rem unit"]);
}

#[test]
fn test_partial_support_is_a_warning_with_notes() {
    let result = run(CheckOptions::new(["outlook.windows"]).css("p { width: 10px }"));

    assert!(result.success);
    let warnings = result.issues.warnings.get(Client::OutlookWindows).unwrap();
    assert_eq!(warnings[0].title, "width");
    assert_eq!(warnings[0].notes, ["Not supported on `<body>` and `<span>` elements."]);
}

#[test]
fn test_uppercase_property_is_matched() {
    let result = run(CheckOptions::new(["outlook.windows"]).css("p { WIDTH: 10px }"));

    let warnings = result.issues.warnings.get(Client::OutlookWindows).unwrap();
    assert_eq!(warnings[0].title, "width");
}

#[test]
fn test_css_and_html_are_both_checked() {
    let result = run(
        CheckOptions::new(["gmail.ios"])
            .css(".a { flex-direction: row }")
            .html("<video></video>"),
    );

    assert_eq!(error_titles(&result, Client::GmailIos), ["flex-direction", "<video> element"]);
}

#[test]
fn test_nested_rules_are_not_walked() {
    let result = run(
        CheckOptions::new(["gmail.desktop-webmail"])
            .css("@media screen { .a { flex-direction: row } }"),
    );

    assert!(result.success);
}

#[test]
fn test_at_rules_are_reported_without_position() {
    let result = run(CheckOptions::new(["gmail.ios"]).css("@import url(theme.css);"));

    assert!(!result.success);
    let errors = result.issues.errors.get(Client::GmailIos).unwrap();
    assert_eq!(errors[0].title, "@import");
    assert_eq!(errors[0].position, None);

    // Grouping only keeps located issues.
    assert!(result.errors().is_empty());
}

#[test]
fn test_errors_are_grouped_across_clients_and_sorted() {
    let css = "p {\n  top: 0;\n}\n.a { filter: none }";
    let result = run(CheckOptions::new(["gmail.*"]).css(css));

    let groups = result.errors();
    let titles: Vec<_> = groups.iter().map(|group| group.issue.title.as_str()).collect();
    assert_eq!(titles, ["left, right, top, bottom", "Class selector", "filter"]);

    assert_eq!(groups[0].clients.len(), 4);
    assert_eq!(groups[1].clients, [Client::GmailMobileWebmail]);
    assert_eq!(groups[2].issue.position, span((4, 6), (4, 17)));
}

#[test]
fn test_formatted_messages() {
    let result = run(
        CheckOptions::new(["gmail.desktop-webmail", "outlook.windows"])
            .css("p { flex-direction: row; width: 1px }"),
    );

    let messages: Vec<_> = result.formatted().into_iter().map(|f| f.message).collect();
    assert_eq!(
        messages,
        [
            "`flex-direction` is not supported by `gmail.desktop-webmail`",
            "`flex-direction` is not supported by `outlook.windows`",
            "`width` is only partially supported by `outlook.windows`",
        ]
    );
}

#[test]
fn test_checks_are_idempotent() {
    let engine = engine();
    let options = CheckOptions::new(["*"])
        .css("a:hover { width: 50vw }")
        .html(r#"<table width="600"><tr><td style="top: 0"><video></video></td></tr></table>"#);

    let first = check(&engine, &options).unwrap();
    let second = check(&engine, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_result_serializes() {
    let result = run(CheckOptions::new(["gmail.ios"]).css(".a { filter: none }"));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["issues"]["errors"][0][0], "gmail.ios");
    assert_eq!(json["issues"]["errors"][0][1][0]["title"], "filter");
    assert_eq!(json["issues"]["errors"][0][1][0]["support"], "none");
}

#[test]
fn test_missing_input() {
    let err = check(&engine(), &CheckOptions::new(["*"])).unwrap_err();
    assert!(matches!(err, Error::MissingInput));
}

#[test]
fn test_unknown_clients() {
    let err = check(&engine(), &CheckOptions::new(["lotus.*"]).css("p {}")).unwrap_err();
    assert!(matches!(err, Error::NoMatchingClients { .. }));
    assert_eq!(err.to_string(), r#"No email clients match ["lotus.*"]"#);

    let err = check(&engine(), &CheckOptions::new(["gmail.{ios"]).css("p {}")).unwrap_err();
    assert!(matches!(err, Error::InvalidClientPattern { .. }));
}
