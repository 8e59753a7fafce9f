//! Builders for `filterByFormula` expressions.

/// `{field}='value'`, with the value quoted as a formula string literal.
pub fn field_equals(field: &str, value: &str) -> String {
    format!("{{{field}}}='{}'", escape(value))
}

/// `AND(a,b,...)`. A single clause is returned unwrapped.
pub fn and(clauses: &[String]) -> String {
    match clauses {
        [single] => single.clone(),
        _ => format!("AND({})", clauses.join(",")),
    }
}

/// Escapes backslashes and single quotes so a value cannot terminate the literal.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_equals_plain_value() {
        assert_eq!(field_equals("candidate_id", "rec123"), "{candidate_id}='rec123'");
    }

    #[test]
    fn test_field_equals_escapes_quotes() {
        assert_eq!(field_equals("Skill", "O'Reilly"), r"{Skill}='O\'Reilly'");
    }

    #[test]
    fn test_field_equals_escapes_backslash_before_quote() {
        assert_eq!(field_equals("Skill", r"a\'b"), r"{Skill}='a\\\'b'");
    }

    #[test]
    fn test_field_equals_keeps_special_characters() {
        // URL encoding happens when the query string is built, not here.
        assert_eq!(field_equals("Skill", "C++ & C#"), "{Skill}='C++ & C#'");
    }

    #[test]
    fn test_and_combines_clauses() {
        let formula = and(&[
            field_equals("candidate_id", "rec1"),
            field_equals("Skill", "Go"),
        ]);
        assert_eq!(formula, "AND({candidate_id}='rec1',{Skill}='Go')");
    }

    #[test]
    fn test_and_single_clause_is_unwrapped() {
        assert_eq!(and(&[field_equals("a", "b")]), "{a}='b'");
    }
}
