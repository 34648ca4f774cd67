//! End-to-end translation tests
//!
//! LessXaml source in, XML text out, through the same pipeline the CLI uses.

use lessml::lessml::loader::DocumentLoader;
use lessml::{to_dsl_text, translate, LessmlError};

const WINDOW: &str = "\
Window:
    Title = Demo
    xmlns:local = clr-namespace:Demo
    Window.Resources:
        Style:
            TargetType = Button
            .Margin = 4
    Grid:
        Background -> SolidColorBrush
            Color = Red
        TextBlock:
            Text := Name
        local:Badge: New
";

fn pretty(source: &str) -> String {
    translate(source).unwrap().to_pretty_string(2).unwrap()
}

fn compact(source: &str) -> String {
    translate(source).unwrap().to_xml_string().unwrap()
}

#[test]
fn test_window_document() {
    insta::assert_snapshot!(pretty(WINDOW), @r###"
    <Window xmlns:local="clr-namespace:Demo" xmlns="http://schemas.microsoft.com/winfx/2006/xaml/presentation" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml" Title="Demo">
      <Window.Resources>
        <Style TargetType="Button">
          <Setter Property="Margin" Value="4"/>
        </Style>
      </Window.Resources>
      <Grid>
        <Grid.Background>
          <SolidColorBrush Color="Red"/>
        </Grid.Background>
        <TextBlock>
          <TextBlock.Text>
            <Binding Path="Name"/>
          </TextBlock.Text>
        </TextBlock>
        <local:Badge>New</local:Badge>
      </Grid>
    </Window>
    "###);
}

#[test]
fn test_text_literals_and_remarks() {
    let source = "\
Page:
    xmlns = urn:page
    <!-- header -->
    Label: Hello,
        ' world'
    Run:
        \"a & b\"
";
    insta::assert_snapshot!(
        compact(source),
        @r###"<Page xmlns="urn:page" xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml"><!-- header --><Label>Hello, world</Label><Run>a &amp; b</Run></Page>"###
    );
}

#[test]
fn test_resource_references() {
    let source = "\
Border:
    xmlns = urn:b
    xmlns:x = urn:x
    Background = **Accent
    BorderBrush = *Line
";
    insta::assert_snapshot!(
        compact(source),
        @r###"<Border xmlns="urn:b" xmlns:x="urn:x" Background="{DynamicResource Accent}" BorderBrush="{StaticResource Line}"/>"###
    );
}

#[test]
fn test_alias_is_scoped_to_declaring_subtree() {
    let source = "\
Window:
    Grid:
        xmlns:local = clr-namespace:Demo
        local:Badge:
    local:Badge:
";
    match translate(source) {
        Err(LessmlError::UnmappedAlias { alias }) => assert_eq!(alias, "local"),
        other => panic!("expected an unmapped alias, got {:?}", other),
    }
}

#[test]
fn test_declaration_after_use_still_applies() {
    let source = "\
Window:
    local:Badge:
        xmlns:local = urn:demo
";
    let xml = compact(source);
    assert!(xml.contains(r#"<local:Badge xmlns:local="urn:demo"/>"#), "{}", xml);
}

#[test]
fn test_document_needs_one_root() {
    assert!(matches!(
        translate("A:\nB:\n"),
        Err(LessmlError::StructuralViolation(_))
    ));
    assert!(matches!(
        translate("'just text'\n"),
        Err(LessmlError::StructuralViolation(_))
    ));
}

#[test]
fn test_document_level_remarks_are_kept() {
    insta::assert_snapshot!(
        compact("<!-- header -->\nWindow:\n    xmlns = urn:w\n    xmlns:x = urn:x\n"),
        @r###"<!-- header --><Window xmlns="urn:w" xmlns:x="urn:x"/>"###
    );
}

#[test]
fn test_document_level_text_is_rejected() {
    assert!(matches!(
        translate("'stray text'\nWindow:\n"),
        Err(LessmlError::StructuralViolation(_))
    ));
}

#[test]
fn test_commented_out_parent() {
    let source = "\
Window:
    xmlns = urn:w
    xmlns:x = urn:x
    # Grid:
        Button:
";
    insta::assert_snapshot!(
        compact(source),
        @r###"<Window xmlns="urn:w" xmlns:x="urn:x"><Button/></Window>"###
    );
}

#[test]
fn test_lexer_errors_surface() {
    assert!(matches!(
        translate("A:\n\tB:\n    C:\n"),
        Err(LessmlError::MixedIndentation { line: 3 })
    ));
}

#[test]
fn test_translation_is_stable_through_reverse() {
    let first = translate(WINDOW).unwrap();
    let text = to_dsl_text(&first).unwrap();
    let second = DocumentLoader::from_string(text.as_str()).translate().unwrap();
    assert_eq!(first, second, "re-translated from:\n{}", text);
}
