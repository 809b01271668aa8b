use gdoc2latex::converter::tidy_citations;
use gdoc2latex::convert;

fn page(body: &str) -> String {
    format!("<html><head><style></style></head><body>{body}</body></html>")
}

fn cite(key: &str, n: u32) -> String {
    format!(r##"<sup><a href="#ftnt{n}" id="ftnt_{key}">[{n}]</a></sup>"##)
}

fn bib(key: &str, n: u32) -> String {
    format!(
        r##"<div><p><a href="#ftnt_{key}" id="ftnt{n}">[{n}]</a><span> @misc{{x{n}, title={{T{n}}}}}</span></p></div>"##
    )
}

#[test]
fn adjacent_citations_merge() {
    let html = page(&format!(
        "<p><span>Prior work</span>{}{}<span>.</span></p>{}{}",
        cite("a", 1),
        cite("b", 2),
        bib("a", 1),
        bib("b", 2)
    ));
    let conversion = convert(&html).expect("converts");
    assert!(conversion.latex.contains(r"Prior work\cite{a,b}."));
}

#[test]
fn parenthesized_citation_with_space_becomes_tied_citep() {
    let html = page(&format!(
        "<p><span>As shown (</span>{}<span>)</span></p>{}",
        cite("a", 1),
        bib("a", 1)
    ));
    let conversion = convert(&html).expect("converts");
    assert!(conversion.latex.contains(r"As shown~\citep{a}"));
}

#[test]
fn footnotes_are_not_treated_as_citations() {
    let html = page(&format!(
        r##"<p><span>Text </span>{}</p><div><p><a href="#ftnt_n" id="ftnt1">[1]</a><span> plain</span></p></div>"##,
        cite("n", 1)
    ));
    let conversion = convert(&html).expect("converts");
    assert!(conversion.latex.contains(r"Text \footnote{plain}"));
}

#[test]
fn tidy_merges_then_parenthesizes_then_ties() {
    assert_eq!(
        tidy_citations(r"one (\cite{a}\cite{b}) two \cite{c}\cite{d}"),
        r"one~\citep{a,b} two~\cite{c,d}"
    );
}

#[test]
fn tidy_leaves_other_commands_alone() {
    let text = r"\citeauthor{a} \textbf{b} (\footnote{c})";
    assert_eq!(tidy_citations(text), text);
}
