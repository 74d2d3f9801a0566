use super::*;

#[test]
fn parses_positional_reference() {
    let cli = Cli::try_parse_from(["persona", "https://www.reddit.com/user/alice/"])
        .expect("expected valid cli args");

    assert_eq!(
        cli.reference.as_deref(),
        Some("https://www.reddit.com/user/alice/")
    );
}

#[test]
fn reference_is_optional() {
    let cli = Cli::try_parse_from(["persona"]).expect("expected valid cli args");
    assert!(cli.reference.is_none());
}

#[test]
fn parses_output_dir_and_template() {
    let cli = Cli::try_parse_from([
        "persona",
        "reddit.com/u/alice",
        "--output-dir",
        "reports",
        "--template",
        "custom.html",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.output_dir, Some(PathBuf::from("reports")));
    assert_eq!(cli.template, Some(PathBuf::from("custom.html")));
}

#[test]
fn rejects_extra_positionals() {
    assert!(Cli::try_parse_from(["persona", "a", "b"]).is_err());
}
