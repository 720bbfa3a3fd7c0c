use super::*;
use crate::scene::color::GREEN;

#[test]
fn bold_group_and_line_breaks() {
    let rt = RichText::parse(r"Finding: Clustering is \textbf{decreasing}. \\ Less linked.").unwrap();
    assert_eq!(rt.lines.len(), 2);
    assert_eq!(rt.lines[0].text(), "Finding: Clustering is decreasing.");
    assert_eq!(rt.lines[1].text(), "Less linked.");

    let bold: Vec<_> = rt.lines[0]
        .spans
        .iter()
        .filter(|s| s.style.bold)
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(bold, vec!["decreasing"]);
}

#[test]
fn inline_math_subscripts_are_italic() {
    let rt = RichText::parse(r"Each cell $z_{ij}$ shows").unwrap();
    let line = &rt.lines[0];
    assert_eq!(line.text(), "Each cell zij shows");
    let z = line.spans.iter().find(|s| s.text == "z").unwrap();
    assert!(z.style.italic);
    assert_eq!(z.style.script, Script::Normal);
    let sub = line.spans.iter().find(|s| s.text == "ij").unwrap();
    assert_eq!(sub.style.script, Script::Sub);
}

#[test]
fn math_comparison_symbol() {
    let rt = RichText::parse(r"Downstream $>$ Upstream.").unwrap();
    assert_eq!(rt.text(), "Downstream > Upstream.");
}

#[test]
fn text_command_is_upright_inside_math() {
    let rt = RichText::parse_math(r"C_{ii} \text{ (Internal)}").unwrap();
    let upright = rt.lines[0]
        .spans
        .iter()
        .find(|s| s.text.contains("Internal"))
        .unwrap();
    assert!(!upright.style.italic);
}

#[test]
fn thin_space_and_escapes() {
    let rt = RichText::parse(r"a\,b 50\% \{x\}").unwrap();
    assert_eq!(rt.text(), "a\u{2009}b 50% {x}");
}

#[test]
fn malformed_markup_is_rejected() {
    for bad in [
        r"\textbf{open",
        r"close}",
        r"$unterminated",
        r"\unknown{x}",
        r"x_1",
        r"\textbf x",
        "dangling\\",
    ] {
        let err = RichText::parse(bad).unwrap_err();
        assert!(err.to_string().contains("markup error:"), "{bad}: {err}");
    }
}

#[test]
fn plain_text_splits_lines_and_trims() {
    let rt = RichText::plain("Financial\nSector ", SpanStyle::default());
    assert_eq!(rt.lines.len(), 2);
    assert_eq!(rt.lines[1].text(), "Sector");
}

#[test]
fn colorize_splits_matching_spans() {
    let mut rt = RichText::plain(
        "1. The financial sector is a key driver via supply-side effects.",
        SpanStyle::default(),
    );
    rt.colorize("supply-side", GREEN);
    let spans = &rt.lines[0].spans;
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[1].text, "supply-side");
    assert_eq!(spans[1].style.color, Some(GREEN));
    assert_eq!(spans[0].style.color, None);
    assert_eq!(rt.text().len(), 64);
}
