//! Document-level tests for the parsing module.
//!
//! Each test parses a whole document and compares normalized snapshots, so
//! failures show which block or diagnostic changed.

use pretty_assertions::assert_eq;
use rstest::rstest;
use xi_rope::Rope;

use crate::parsing::{
    ParseOptions, ParsedDoc,
    blocks::{BlockKind, block_id},
    diagnostics::{Diagnostic, DiagnosticCode, NullReporter},
    parse_document,
    rope::slice_to_string,
    snapshot::{self, DiagnosticSnap, ImageSnap},
};

fn parse(md: &str) -> (Rope, ParsedDoc, Vec<Diagnostic>) {
    let rope = Rope::from(md);
    let mut diags: Vec<Diagnostic> = Vec::new();
    let doc = parse_document(&rope, "guide/cats.md", ParseOptions::default(), &mut diags);
    snapshot::invariants(&rope, &doc.blocks);
    (rope, doc, diags)
}

fn kinds(doc: &ParsedDoc) -> Vec<&'static str> {
    doc.blocks
        .iter()
        .map(|b| match b.kind {
            BlockKind::Paragraph => "Paragraph",
            BlockKind::Image(_) => "Image",
        })
        .collect()
}

#[test]
fn closed_image_block() {
    let md = "::: image source=\"a.png\" alt-text=\"cat\" :::\n:::image-end:::\n";
    let (_, doc, diags) = parse(md);

    assert!(diags.is_empty());
    let images: Vec<ImageSnap> = doc.images().map(ImageSnap::from).collect();
    assert_eq!(
        images,
        vec![ImageSnap {
            id: block_id("guide/cats.md", 0, 0),
            line: 1,
            column: 1,
            fence_len: 3,
            src: "a.png".into(),
            alt: "cat".into(),
            closed: true,
            content_lines: 0,
        }]
    );
}

#[test]
fn missing_alt_text_rejects_open() {
    let md = "::: image source=\"a.png\" :::\n";
    let (_, doc, diags) = parse(md);

    assert_eq!(kinds(&doc), vec!["Paragraph"]);
    assert_eq!(
        snapshot::normalize_diagnostics(&diags),
        vec![DiagnosticSnap {
            code: "missing-attribute".into(),
            severity: "error".into(),
            line: 1,
            message: "alt-text is a required attribute".into(),
            block_id: None,
        }]
    );
}

#[test]
fn shorter_closing_fence_is_content() {
    let md = "\
:::: image source=\"a.png\" alt-text=\"cat\" :::
:::image-end:::
::::image-end:::
after
";
    let (_, doc, diags) = parse(md);

    assert!(diags.is_empty());
    assert_eq!(kinds(&doc), vec!["Image", "Paragraph"]);
    let image = doc.blocks[0].as_image().unwrap();
    assert!(image.is_closed);
    assert_eq!(image.content.len(), 1);
}

#[test]
fn shorter_closing_fence_leaves_block_open() {
    let md = ":::: image source=\"a.png\" alt-text=\"cat\" :::\n:::image-end:::\n";
    let (_, doc, diags) = parse(md);

    let image = doc.images().next().unwrap();
    assert!(!image.is_closed);
    assert_eq!(doc.blocks[0].span.end, md.len());
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, DiagnosticCode::UnterminatedBlock);
}

#[test]
fn trailing_characters_after_end_marker() {
    let md = ":::: image source=\"a.png\" alt-text=\"cat\" :::\n::::image-end:::   !\n";
    let (_, doc, diags) = parse(md);

    assert!(doc.images().next().unwrap().is_closed);
    let snaps = snapshot::normalize_diagnostics(&diags);
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].code, "trailing-characters");
    assert_eq!(snaps[0].severity, "warning");
    assert_eq!(snaps[0].line, 2);
    assert_eq!(snaps[0].block_id, Some(block_id("guide/cats.md", 0, 0)));
}

#[rstest]
#[case(3)]
#[case(4)]
#[case(7)]
fn only_exact_fence_length_closes(#[case] n: usize) {
    let fence = ":".repeat(n);
    let shorter = ":".repeat(n - 1);
    let longer = ":".repeat(n + 1);
    let md = format!(
        "{fence} image source=\"a\" alt-text=\"b\" :::\n\
         {shorter}image-end:::\n\
         {longer}image-end:::\n\
         {fence}image-end:::\n"
    );
    let (_, doc, diags) = parse(&md);

    assert!(diags.is_empty());
    let image = doc.images().next().unwrap();
    assert_eq!(image.fence_len, n);
    assert!(image.is_closed);
    assert_eq!(image.content.len(), 2);
}

#[test]
fn attribute_order_is_irrelevant() {
    let (_, a, _) = parse("::: image source=\"a.png\" alt-text=\"cat\" :::\n:::image-end:::");
    let (_, b, _) = parse("::: image alt-text=\"cat\" source=\"a.png\" :::\n:::image-end:::");
    assert_eq!(a.blocks, b.blocks);
}

#[test]
fn missing_end_marker_keeps_scanning() {
    let md = "\
::: image source=\"a.png\" alt-text=\"cat\" :::
::: oops
:::image-end:::
";
    let (_, doc, diags) = parse(md);

    assert_eq!(kinds(&doc), vec!["Image"]);
    assert!(doc.images().next().unwrap().is_closed);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, DiagnosticCode::MissingEndMarker);
    assert_eq!(diags[0].line, 1);
}

#[test]
fn image_between_paragraphs() {
    let md = "\
Some intro text.

  ::: image source=\"img/cat.png\" alt-text=\"A cat\" :::
  A caption line.
  :::image-end:::
Trailing paragraph.
";
    let (rope, doc, diags) = parse(md);

    assert!(diags.is_empty());
    let snap = snapshot::normalize(&rope, &doc.blocks);
    let kinds: Vec<_> = snap.blocks.iter().map(|b| b.kind.as_str()).collect();
    assert_eq!(kinds, vec!["Paragraph", "Image", "Paragraph"]);
    assert_eq!(
        slice_to_string(&rope, doc.blocks[1].span),
        "::: image source=\"img/cat.png\" alt-text=\"A cat\" :::\n  A caption line.\n  :::image-end:::\n"
    );
    let image = snap.blocks[1].image.as_ref().unwrap();
    assert_eq!((image.line, image.column), (3, 3));
    assert_eq!(image.id, block_id("guide/cats.md", 2, 2));
}

#[test]
fn rejected_candidates_are_paragraph_text() {
    let md = "\
:: image source=\"a\" alt-text=\"b\" :::
::: image source=\"a\" alt-text=\"b\" source=\"c\" :::
::: image source=\"a\" alt-text=\"b\" width=\"10\" :::
";
    let (_, doc, diags) = parse(md);

    assert_eq!(kinds(&doc), vec!["Paragraph"]);
    let codes: Vec<_> = diags.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            DiagnosticCode::DuplicateAttribute,
            DiagnosticCode::UnexpectedAttribute
        ]
    );
}

#[test]
fn two_images_get_distinct_ids() {
    let md = "\
::: image source=\"a\" alt-text=\"b\" :::
:::image-end:::
::: image source=\"c\" alt-text=\"d\" :::
:::image-end:::
";
    let (_, doc, _) = parse(md);

    let ids: Vec<_> = doc.images().map(|i| i.id.clone()).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn ids_depend_on_document_identity() {
    let md = "::: image source=\"a\" alt-text=\"b\" :::\n:::image-end:::";
    let rope = Rope::from(md);
    let id_for = |name: &str| {
        let doc = parse_document(&rope, name, ParseOptions::default(), &mut NullReporter);
        doc.images().next().unwrap().id.clone()
    };
    assert_eq!(id_for("a.md"), id_for("a.md"));
    assert_ne!(id_for("a.md"), id_for("b.md"));
}

#[test]
fn crlf_line_endings() {
    let md = "::: image source=\"a\" alt-text=\"b\" :::\r\nbody\r\n:::image-end:::\r\n";
    let (_, doc, diags) = parse(md);

    assert!(diags.is_empty());
    let image = doc.images().next().unwrap();
    assert!(image.is_closed);
    assert_eq!(image.content.len(), 1);
}

/// Test empty document produces no blocks.
#[test]
fn empty_document() {
    let (_, doc, diags) = parse("");
    assert!(doc.blocks.is_empty());
    assert!(diags.is_empty());
}

/// Test blank lines don't produce blocks.
#[test]
fn blank_lines_only() {
    let (_, doc, _) = parse("\n\n\n");
    assert!(doc.blocks.is_empty());
}

#[test]
fn non_breaking_space_line_does_not_split_paragraph() {
    let (_, doc, _) = parse("first\n\u{a0}\nsecond\n");
    assert_eq!(kinds(&doc), vec!["Paragraph"]);
}
