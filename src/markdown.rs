//! Markdown reducido: bloques de código con cercas, títulos `#`/`##`, listas,
//! filas de tabla con `|` y negrita `**...**`.
//!
//! El análisis es puro: produce una lista de [`Block`] en el orden de entrada.
//! El pintado en egui vive en `ui::markdown`.

use std::sync::LazyLock;

use regex::Regex;

pub const FENCE: &str = "```";

/// Etiqueta mostrada cuando el bloque de código no declara lenguaje
pub const DEFAULT_LANGUAGE: &str = "vba";

const MAX_LANGUAGE_LEN: usize = 20;

static LANGUAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9+\-#.]+$").expect("regex de lenguaje"));
static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s*").expect("regex de lista numerada"));
static SEPARATOR_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-+$").expect("regex de separador"));
static BOLD_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("regex de negrita"));

/// Tramo del texto de entrada: prosa o código (con sus cercas incluidas)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Prose(&'a str),
    Code(&'a str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub code: String,
}

impl CodeBlock {
    /// Texto de la cabecera, siempre en mayúsculas
    pub fn label(&self) -> String {
        self.language
            .as_deref()
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_uppercase()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Bullet(Vec<Inline>),
    Numbered { marker: String, content: Vec<Inline> },
    Spacer,
    TableRow(Vec<Vec<Inline>>),
    Paragraph(Vec<Inline>),
    Code(CodeBlock),
}

/// Analiza `content` completo y devuelve los bloques en orden
pub fn parse(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for segment in split_segments(content) {
        match segment {
            Segment::Code(raw) => blocks.push(Block::Code(parse_code_block(raw))),
            Segment::Prose(text) => {
                if text.is_empty() {
                    continue;
                }
                blocks.extend(text.split('\n').filter_map(parse_line));
            }
        }
    }
    blocks
}

/// Divide en prosa/código alternados. Con `k` bloques cerrados devuelve `2k+1`
/// tramos, empezando y terminando en prosa (posiblemente vacía). Una cerca sin
/// cerrar se trata como código hasta el final del texto.
pub fn split_segments(content: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = content;

    loop {
        let Some(open) = rest.find(FENCE) else {
            segments.push(Segment::Prose(rest));
            break;
        };
        segments.push(Segment::Prose(&rest[..open]));

        let body_start = open + FENCE.len();
        match rest[body_start..].find(FENCE) {
            Some(close) => {
                let end = body_start + close + FENCE.len();
                segments.push(Segment::Code(&rest[open..end]));
                rest = &rest[end..];
            }
            None => {
                segments.push(Segment::Code(&rest[open..]));
                segments.push(Segment::Prose(""));
                break;
            }
        }
    }

    segments
}

/// Convierte un tramo de código (con cercas) en lenguaje + cuerpo
pub fn parse_code_block(raw: &str) -> CodeBlock {
    let inner = raw.strip_prefix(FENCE).unwrap_or(raw);
    let inner = inner.strip_suffix(FENCE).unwrap_or(inner);

    // Algunos textos llegan serializados dos veces y traen "\n" literales
    let normalized = inner.replace("\r\n", "\n").replace("\\n", "\n");

    let mut language = None;
    let mut body = normalized.as_str();
    if let Some((first_line, remainder)) = normalized.split_once('\n') {
        let candidate = first_line.trim();
        if is_language_tag(candidate) {
            language = Some(candidate.to_owned());
            body = remainder;
        }
    }

    CodeBlock {
        language,
        code: trim_blank_lines(body),
    }
}

fn is_language_tag(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.chars().count() < MAX_LANGUAGE_LEN
        && LANGUAGE_TAG.is_match(candidate)
}

/// Quita líneas en blanco al principio y al final sin tocar la sangría interna
fn trim_blank_lines(body: &str) -> String {
    let lines: Vec<&str> = body.split('\n').collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Una línea de prosa. `None` para separadores de tabla.
fn parse_line(line: &str) -> Option<Block> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let trimmed = line.trim();

    if let Some(text) = line.strip_prefix("# ") {
        return Some(Block::Heading {
            level: 1,
            text: text.to_owned(),
        });
    }
    if let Some(text) = line.strip_prefix("## ") {
        return Some(Block::Heading {
            level: 2,
            text: text.to_owned(),
        });
    }
    if let Some(text) = line.strip_prefix("* ") {
        return Some(Block::Bullet(parse_inline(text)));
    }
    if let Some(caps) = ORDERED_MARKER.captures(trimmed) {
        let marker = caps[1].to_owned();
        let content = parse_inline(&trimmed[caps[0].len()..]);
        return Some(Block::Numbered { marker, content });
    }
    if trimmed.is_empty() {
        return Some(Block::Spacer);
    }
    if line.starts_with('|') && line.ends_with('|') {
        return parse_table_row(line).map(Block::TableRow);
    }

    Some(Block::Paragraph(parse_inline(line)))
}

/// Celdas de una fila `|A|B|`; `None` si es la fila separadora `|---|---|`
pub fn parse_table_row(line: &str) -> Option<Vec<Vec<Inline>>> {
    let mut fields: Vec<&str> = line.split('|').collect();
    // Los `|` de los extremos dejan un fragmento vacío a cada lado
    if fields.first().is_some_and(|f| f.is_empty()) {
        fields.remove(0);
    }
    if fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }

    if fields.iter().all(|cell| SEPARATOR_CELL.is_match(cell.trim())) {
        return None;
    }

    Some(
        fields
            .into_iter()
            .map(|cell| parse_inline(cell.trim()))
            .collect(),
    )
}

/// Separa los tramos `**...**` (negrita) del texto literal
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in BOLD_SPAN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Inline::Text(text[last..whole.start()].to_owned()));
        }
        spans.push(Inline::Strong(caps[1].to_owned()));
        last = whole.end();
    }
    if last < text.len() {
        spans.push(Inline::Text(text[last..].to_owned()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.into())
    }

    fn strong(s: &str) -> Inline {
        Inline::Strong(s.into())
    }

    #[test]
    fn balanced_fences_give_odd_alternating_segments() {
        let samples = [
            ("sin código", 0),
            ("a```x```b", 1),
            ("```x```", 1),
            ("```a``````b```", 2),
            ("intro\n```vba\nSub A()\nEnd Sub\n```\nmedio\n```\nx\n```\nfin", 2),
        ];
        for (content, k) in samples {
            let segments = split_segments(content);
            assert_eq!(segments.len(), 2 * k + 1, "{content:?}");
            for (i, seg) in segments.iter().enumerate() {
                if i % 2 == 0 {
                    assert!(matches!(seg, Segment::Prose(_)), "{content:?} #{i}");
                } else {
                    assert!(matches!(seg, Segment::Code(c) if c.starts_with(FENCE)));
                }
            }
        }
    }

    #[test]
    fn adjacent_fences_leave_empty_prose_between() {
        let segments = split_segments("```a``````b```");
        assert_eq!(segments[0], Segment::Prose(""));
        assert_eq!(segments[1], Segment::Code("```a```"));
        assert_eq!(segments[2], Segment::Prose(""));
        assert_eq!(segments[3], Segment::Code("```b```"));
        assert_eq!(segments[4], Segment::Prose(""));
    }

    #[test]
    fn unterminated_fence_runs_to_end_of_input() {
        let segments = split_segments("texto\n```vba\nSub A()");
        assert_eq!(
            segments,
            vec![
                Segment::Prose("texto\n"),
                Segment::Code("```vba\nSub A()"),
                Segment::Prose(""),
            ]
        );
        let block = parse_code_block("```vba\nSub A()");
        assert_eq!(block.language.as_deref(), Some("vba"));
        assert_eq!(block.code, "Sub A()");
    }

    #[test]
    fn language_tag_is_extracted_and_blank_lines_trimmed() {
        let block = parse_code_block("```vba\n\nSub Test()\n    MsgBox \"hi\"\nEnd Sub\n\n```");
        assert_eq!(block.language.as_deref(), Some("vba"));
        assert_eq!(block.code, "Sub Test()\n    MsgBox \"hi\"\nEnd Sub");
        assert_eq!(block.label(), "VBA");
    }

    #[test]
    fn first_line_with_space_is_code() {
        let block = parse_code_block("```Dim x As Long\nx = 1\n```");
        assert_eq!(block.language, None);
        assert_eq!(block.code, "Dim x As Long\nx = 1");
        assert_eq!(block.label(), "VBA");
    }

    #[test]
    fn crlf_and_escaped_newlines_are_normalized() {
        let block = parse_code_block("```json\r\n{\\n  \"a\": 1\\n}\r\n```");
        assert_eq!(block.language.as_deref(), Some("json"));
        assert_eq!(block.code, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn long_or_symbolic_first_line_is_not_a_tag() {
        let long = parse_code_block("```abcdefghijklmnopqrstuvwxyz\nbody\n```");
        assert_eq!(long.language, None);
        let symbolic = parse_code_block("```x=1\nbody\n```");
        assert_eq!(symbolic.language, None);
        assert_eq!(symbolic.code, "x=1\nbody");
        let plus = parse_code_block("```c++\nint x;\n```");
        assert_eq!(plus.label(), "C++");
    }

    #[test]
    fn bold_split_keeps_order() {
        assert_eq!(
            parse_inline("**bold** and plain"),
            vec![strong("bold"), text(" and plain")]
        );
        assert_eq!(
            parse_inline("a **b** c **d**"),
            vec![text("a "), strong("b"), text(" c "), strong("d")]
        );
    }

    #[test]
    fn unmatched_bold_marker_is_literal() {
        assert_eq!(parse_inline("2 ** 3"), vec![text("2 ** 3")]);
        assert_eq!(parse_inline("**a** **"), vec![strong("a"), text(" **")]);
    }

    #[test]
    fn table_rows_and_separator() {
        assert_eq!(
            parse_table_row("|A|B|"),
            Some(vec![vec![text("A")], vec![text("B")]])
        );
        assert_eq!(parse_table_row("|---|---|"), None);
        assert_eq!(parse_table_row("| --- | - |"), None);
        assert_eq!(
            parse_table_row("| **x** | y |"),
            Some(vec![vec![strong("x")], vec![text("y")]])
        );
    }

    #[test]
    fn prose_lines_map_to_blocks() {
        let blocks = parse("# Título\n## Sub\n* item **x**\n3. paso\n\n|a|b|\n|---|---|\ntexto");
        assert_eq!(
            blocks,
            vec![
                Block::Heading { level: 1, text: "Título".into() },
                Block::Heading { level: 2, text: "Sub".into() },
                Block::Bullet(vec![text("item "), strong("x")]),
                Block::Numbered { marker: "3".into(), content: vec![text("paso")] },
                Block::Spacer,
                Block::TableRow(vec![vec![text("a")], vec![text("b")]]),
                Block::Paragraph(vec![text("texto")]),
            ]
        );
    }

    #[test]
    fn mixed_document_preserves_order() {
        let blocks = parse("antes\n```vba\nSub A()\nEnd Sub\n```\ndespués");
        assert_eq!(blocks.len(), 5);
        assert_eq!(blocks[0], Block::Paragraph(vec![text("antes")]));
        // el salto de línea tras "antes" deja una línea vacía
        assert_eq!(blocks[1], Block::Spacer);
        assert!(matches!(&blocks[2], Block::Code(c) if c.code == "Sub A()\nEnd Sub"));
        assert_eq!(blocks[3], Block::Spacer);
        assert_eq!(blocks[4], Block::Paragraph(vec![text("después")]));
    }

    #[test]
    fn unrecognized_markup_passes_through_as_paragraph() {
        let blocks = parse("### h3 <b>no</b>");
        assert_eq!(blocks, vec![Block::Paragraph(vec![text("### h3 <b>no</b>")])]);
    }

    #[test]
    fn fenced_suggestion_renders_as_one_code_block() {
        let suggestion = "修正案:\n```vba\nOption Explicit\nSub A()\nEnd Sub\n```";
        let blocks = parse(suggestion);
        let code: Vec<&CodeBlock> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::Code(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(code.len(), 1);
        assert_eq!(code[0].language.as_deref(), Some("vba"));
        assert_eq!(code[0].code, "Option Explicit\nSub A()\nEnd Sub");
        assert_eq!(blocks[0], Block::Paragraph(vec![text("修正案:")]));
    }

    #[test]
    fn quiz_question_with_code_and_bold() {
        let blocks = parse("次のコードの出力は？\n```vba\nDebug.Print 1 + 2\n```\n**ヒント**: 数値の加算");
        assert_eq!(blocks[0], Block::Paragraph(vec![text("次のコードの出力は？")]));
        assert!(matches!(&blocks[2], Block::Code(c) if c.code == "Debug.Print 1 + 2"));
        assert!(blocks.iter().any(|b| matches!(
            b,
            Block::Paragraph(spans) if spans.first() == Some(&Inline::Strong("ヒント".into()))
        )));
    }
}
