/// Longest identifier MySQL accepts for tables and columns.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Quote an identifier for interpolation into MySQL statements.
///
/// Embedded backticks are doubled. Callers must still verify the name
/// against the live schema before using it; quoting only keeps the
/// statement well-formed.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain_identifier() {
        assert_eq!(quote_identifier("users"), "`users`");
    }

    #[test]
    fn test_quote_doubles_backticks() {
        assert_eq!(quote_identifier("we`ird"), "`we``ird`");
        assert_eq!(quote_identifier("`; DROP TABLE x; --"), "```; DROP TABLE x; --`");
    }

    #[test]
    fn test_quote_keeps_spaces_and_unicode() {
        assert_eq!(quote_identifier("order items"), "`order items`");
        assert_eq!(quote_identifier("clientes_año"), "`clientes_año`");
    }
}
