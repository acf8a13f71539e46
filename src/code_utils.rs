use egui_code_editor::Syntax;

/// Resaltado de VBA para el editor de la revisión y los bloques de código
pub fn vba_syntax() -> Syntax {
    Syntax::new("vba")
        .with_comment("'")
        .with_case_sensitive(false)
        .with_keywords([
            "SUB", "END", "FUNCTION", "DIM", "AS", "SET", "IF", "THEN", "ELSE", "ELSEIF", "FOR",
            "EACH", "IN", "TO", "STEP", "NEXT", "DO", "WHILE", "UNTIL", "LOOP", "WITH", "SELECT",
            "CASE", "EXIT", "ON", "ERROR", "GOTO", "RESUME", "CALL", "PRIVATE", "PUBLIC", "CONST",
            "OPTION", "EXPLICIT", "BYVAL", "BYREF", "NEW", "NOTHING", "AND", "OR", "NOT", "IS",
            "TRUE", "FALSE", "REDIM", "PRESERVE",
        ])
        .with_types([
            "INTEGER", "LONG", "STRING", "DOUBLE", "BOOLEAN", "VARIANT", "OBJECT", "DATE",
            "RANGE", "WORKSHEET", "WORKBOOK", "COLLECTION", "DICTIONARY",
        ])
}

/// Sólo unifica saltos de línea (CRLF → LF); el resto del texto se respeta
pub fn normalize_code(input: &str) -> String {
    input.replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_converts_crlf_and_keeps_whitespace() {
        assert_eq!(
            normalize_code("Sub A()  \r\n    x = 1\r\nEnd Sub\n"),
            "Sub A()  \n    x = 1\nEnd Sub\n"
        );
    }
}
