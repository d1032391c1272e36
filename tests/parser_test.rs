//! Integration tests for document parsing.

use txtpdf::model::{CalloutStyle, InlineSpan};
use txtpdf::{
    parse_str, parse_str_with_options, Block, CalloutKind, ColumnAlignment, Document, Error,
    Heading, ParseOptions,
};

fn headings(doc: &Document) -> Vec<&Heading> {
    doc.headings()
}

const SAMPLE: &str = r#"[DOC title="Arquitectura" subtitle="Resumen" toc_max_level=2 footer_left="ArqComp"]

==========
1) Memorias
==========

1.1. Jerarquía → caché
La caché es **rápida** y *cara*.
Usa `SRAM`.

:::def Localidad
Acceso repetido a direcciones **cercanas**.
:::

| Nivel | Latencia | Tamaño |
|:---|:---:|---:|
| L1 | 1 ns |
| L2 | 4 ns | 256 KB | extra |

[FIG file="Teorico/memorias.pdf" page=12 caption="Jerarquía"]

1.1.1. Detalle fino

2. Ejercicio 3
1) paso uno
2) paso dos

```asm
mov eax, 1
```

    indentado

-----
[PB]
"#;

#[test]
fn test_full_document() {
    let doc = parse_str(SAMPLE).unwrap();
    assert_eq!(doc.config.title.as_deref(), Some("Arquitectura"));
    assert_eq!(doc.config.toc_max_level, 2);
    assert_eq!(doc.config.footer_left(), Some("ArqComp"));

    let kinds: Vec<&str> = doc.blocks.iter().map(Block::kind_name).collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "heading",
            "paragraph",
            "callout",
            "table",
            "figure",
            "heading",
            "heading",
            "list",
            "code",
            "code",
            "separator",
            "pagebreak",
        ]
    );
}

#[test]
fn test_idempotence() {
    assert_eq!(parse_str(SAMPLE).unwrap(), parse_str(SAMPLE).unwrap());
}

#[test]
fn test_heading_level_law() {
    let doc = parse_str("1. A\n1.1. B\n1.1.1. C\n1.1.1.1. D").unwrap();
    for h in headings(&doc) {
        let groups = h.numbering.as_deref().unwrap().split('.').count();
        assert_eq!(usize::from(h.level), groups);
    }
}

#[test]
fn test_heading_block_is_always_level_one() {
    let doc = parse_str("==========\n2.1) Caché\n==========").unwrap();
    let all = headings(&doc);
    let h = all[0];
    assert_eq!(h.level, 1);
    assert_eq!(h.numbering.as_deref(), Some("2.1"));
    assert_eq!(h.text, "Caché");
}

#[test]
fn test_table_tolerance() {
    let doc = parse_str("| A | B | C |\n| x | y |").unwrap();
    match &doc.blocks[0] {
        Block::Table(t) => {
            assert_eq!(t.rows.len(), 1);
            assert_eq!(t.rows[0].len(), 3);
            assert!(t.rows[0][2].is_empty());
        }
        other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn test_table_alignment_and_excess() {
    let doc = parse_str(SAMPLE).unwrap();
    let table = doc
        .blocks
        .iter()
        .find_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        table.alignments,
        vec![ColumnAlignment::Left, ColumnAlignment::Center, ColumnAlignment::Right]
    );
    assert!(table.rows.iter().all(|r| r.len() == 3));
}

#[test]
fn test_inline_spans() {
    let doc = parse_str("**bold** and *italic* and `code`").unwrap();
    match &doc.blocks[0] {
        Block::Paragraph(p) => assert_eq!(
            p.spans,
            vec![
                InlineSpan::bold("bold"),
                InlineSpan::plain(" and "),
                InlineSpan::italic("italic"),
                InlineSpan::plain(" and "),
                InlineSpan::code("code"),
            ]
        ),
        other => panic!("expected paragraph, got {:?}", other),
    }
}

#[test]
fn test_pagebreak_tagging() {
    let doc = parse_str("1.2. Cache\n3.4.5. Ejercicio 3\n1. Memorias").unwrap();
    let flags: Vec<bool> = headings(&doc).iter().map(|h| h.page_break_before).collect();
    assert_eq!(flags, vec![false, true, true]);
}

#[test]
fn test_unterminated_fence_reports_opening_line() {
    let err = parse_str("[DOC]\nintro\n\n```python\nprint(1)\n").unwrap_err();
    assert!(matches!(err, Error::UnterminatedBlock { line: 4, .. }));
}

#[test]
fn test_callout_recursion() {
    let text = ":::info Afuera\n[WARN title=\"Adentro\"]\n1. Oculto\n- item\n[/WARN]\n:::";
    let doc = parse_str(text).unwrap();
    match &doc.blocks[0] {
        Block::Callout(outer) => {
            assert_eq!(outer.kind, CalloutKind::Info);
            match &outer.body[0] {
                Block::Callout(inner) => {
                    assert_eq!(inner.kind.style(), CalloutStyle::Warn);
                    assert_eq!(inner.body.len(), 2);
                    assert!(inner.body[0].as_heading().unwrap().in_callout);
                }
                other => panic!("expected inner callout, got {:?}", other),
            }
        }
        other => panic!("expected callout, got {:?}", other),
    }
    // Callout headings stay out of the table of contents.
    assert!(doc.outline().is_empty());
}

#[test]
fn test_depth_guard() {
    // Same-kind legacy blocks close on the first closer, so nest by alternating kinds.
    let nested = ":::a\n[NOTE]\n[TIP]\nx\n[/TIP]\n[/NOTE]\n:::";
    let options = ParseOptions::new().with_max_depth(2);
    let err = parse_str_with_options(nested, options).unwrap_err();
    assert!(matches!(err, Error::NestingTooDeep { line: 3, limit: 2, .. }));
    assert!(parse_str(nested).is_ok());
}

#[test]
fn test_strict_mode() {
    let strict = ParseOptions::new().strict();
    assert!(matches!(
        parse_str_with_options("[DOC foo=1]", strict.clone()),
        Err(Error::Config { .. })
    ));
    assert!(matches!(
        parse_str_with_options("[BOX]\nx\n[/BOX]", strict),
        Err(Error::UnknownCallout { .. })
    ));

    let doc = parse_str("[DOC foo=1]\n[BOX]\nx\n[/BOX]").unwrap();
    assert_eq!(doc.unknown_keys, vec!["foo"]);
    assert!(matches!(doc.blocks[0], Block::Callout(_)));
}

#[test]
fn test_outline_respects_max_level() {
    let doc = parse_str(SAMPLE).unwrap();
    let outline = doc.outline();
    let titles: Vec<String> = outline.flatten().iter().map(|(_, i)| i.title.clone()).collect();
    assert_eq!(titles, vec!["1. Memorias", "1.1. Jerarquía -> caché", "2. Ejercicio 3"]);
}

#[test]
fn test_escaping_in_spans_but_not_heading_text() {
    let doc = parse_str("1. A<B & C").unwrap();
    let all = headings(&doc);
    let h = all[0];
    assert_eq!(h.text, "A<B & C");
    assert_eq!(h.spans, vec![InlineSpan::plain("A&lt;B &amp; C")]);
}

#[test]
fn test_figure_in_callout_is_collected() {
    let doc = parse_str(":::ej\n[FIG page=2 file=x.pdf]\n:::").unwrap();
    let figs = doc.figures();
    assert_eq!(figs.len(), 1);
    assert_eq!(figs[0].caption_or_default(), "Fuente: x.pdf, pág. 2");
}
