use gdoc2latex::{convert, convert_with_options, Options};

fn page(body: &str) -> String {
    format!(
        r#"<html><head><style type="text/css">.c3{{font-weight:700}}.c5{{vertical-align:super}}</style></head><body>{body}</body></html>"#
    )
}

fn reference(key: &str, n: u32) -> String {
    format!(r##"<sup class="c5"><a href="#ftnt{n}" id="ftnt_{key}">[{n}]</a></sup>"##)
}

fn payload(key: &str, n: u32, content: &str) -> String {
    format!(
        r##"<div><p class="c2"><a href="#ftnt_{key}" id="ftnt{n}">[{n}]</a><span class="c1">&nbsp;{content}</span></p></div>"##
    )
}

fn non_blank_lines(latex: &str) -> Vec<&str> {
    latex.lines().filter(|line| !line.trim().is_empty()).collect()
}

fn options() -> Options {
    Options {
        template_start: String::new(),
        template_end: String::new(),
        ..Options::default()
    }
}

#[test]
fn footnote_is_spliced_into_its_reference() {
    let html = page(&format!(
        "<p><span>Claim</span>{}<span>.</span></p><hr>{}",
        reference("k1", 1),
        payload("k1", 1, "Note.")
    ));
    let conversion = convert(&html).expect("converts");

    assert!(conversion
        .latex
        .contains(r"Claim\textsuperscript{\footnote{Note.}}."));
    assert!(!conversion.latex.contains(r"\cite{k1}"));
    assert!(conversion.bibtex.is_none());
}

#[test]
fn order_of_reference_and_payload_does_not_matter() {
    let reference_first = page(&format!(
        "<p><span>A</span>{}</p>{}",
        reference("ref1", 1),
        payload("ref1", 1, "Body.")
    ));
    let payload_first = page(&format!(
        "{}<p><span>A</span>{}</p>",
        payload("ref1", 1, "Body."),
        reference("ref1", 1)
    ));

    let a = convert_with_options(&reference_first, &options()).expect("converts");
    let b = convert_with_options(&payload_first, &options()).expect("converts");
    // The filed division still takes an empty line where it stood.
    assert_eq!(non_blank_lines(&a.latex), non_blank_lines(&b.latex));
    assert_eq!(a.bibtex, b.bibtex);
    assert!(a.latex.contains(r"A\textsuperscript{\footnote{Body.}}"));
}

#[test]
fn payload_keeps_formatting_and_following_paragraphs() {
    let html = page(&format!(
        r##"<p><span>x</span>{}</p><div><p><a href="#ftnt_ref1" id="ftnt1">[1]</a><span>&nbsp;See </span><span class="c3">this</span></p><p><span>More.</span></p></div>"##,
        reference("ref1", 1)
    ));
    let conversion = convert(&html).expect("converts");
    assert!(conversion
        .latex
        .contains("x\\textsuperscript{\\footnote{See \\textbf{this}\n\nMore.}}"));
}

#[test]
fn bibtex_payload_becomes_a_citation() {
    let html = page(&format!(
        "<p><span>Known</span>{}<span>.</span></p>{}",
        reference("ref1", 1),
        payload("ref1", 1, "@article{smith2020, title={On Things}, year={2020}}")
    ));
    let options = Options {
        output_file: "paper.tex".to_string(),
        ..options()
    };
    let conversion = convert_with_options(&html, &options).expect("converts");

    assert!(conversion.latex.contains(r"Known\textsuperscript{\cite{ref1}}."));
    assert!(conversion.latex.contains(r"\bibliography{paper}"));
    assert_eq!(
        conversion.bibtex.as_deref(),
        Some("@article{ref1, title={On Things}, year={2020}}")
    );
}

#[test]
fn bibliography_entries_keep_document_order() {
    let html = page(&format!(
        "<p><span>x</span>{}{}</p>{}{}",
        reference("a", 1),
        reference("b", 2),
        payload("a", 1, "@book{k1, title={First}}"),
        payload("b", 2, "@misc{k2, title={Second}}"),
    ));
    let conversion = convert(&html).expect("converts");
    assert_eq!(
        conversion.bibtex.as_deref(),
        Some("@book{a, title={First}}\n\n@misc{b, title={Second}}")
    );
}

#[test]
fn repeated_payload_key_keeps_the_later_payload() {
    let html = page(&format!(
        "<p><span>x</span>{}</p>{}{}",
        reference("ref1", 1),
        payload("ref1", 1, "Old."),
        payload("ref1", 1, "New.")
    ));
    let conversion = convert(&html).expect("converts");
    assert!(conversion.latex.contains(r"\footnote{New.}"));
    assert!(!conversion.latex.contains("Old."));
}

#[test]
fn reference_without_payload_stays_a_citation() {
    let html = page(&format!("<p><span>x</span>{}</p>", reference("missing", 1)));
    let conversion = convert(&html).expect("converts");
    assert!(conversion.latex.contains(r"x\textsuperscript{\cite{missing}}"));
    assert!(conversion.bibtex.is_none());
}
