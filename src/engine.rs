// Embedded JavaScript evaluation.
// - Builds a fresh engine context per call so no state leaks between runs.
// - Renders the completion value with the engine's display formatting.
// - Maps syntax errors and thrown values to their native message text.
use boa_engine::{Context, Source};

pub fn evaluate(source: &str) -> Result<String, String> {
    let mut context = Context::default();

    match context.eval(Source::from_bytes(source)) {
        Ok(value) => Ok(value.display().to_string()),
        Err(err) => Err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::evaluate;

    #[test]
    fn evaluates_final_expression_value() {
        assert_eq!(evaluate("1 + 2"), Ok("3".to_string()));
    }

    #[test]
    fn evaluates_multi_statement_script() {
        let source = "let total = 0; for (let i = 1; i <= 4; i++) { total += i; } total";
        assert_eq!(evaluate(source), Ok("10".to_string()));
    }

    #[test]
    fn thrown_values_surface_their_message() {
        let err = evaluate("throw new Error('boom')").unwrap_err();
        assert!(err.contains("boom"), "unexpected error text: {err}");
    }

    #[test]
    fn syntax_errors_produce_a_description() {
        let err = evaluate("function {").unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn contexts_are_isolated_between_runs() {
        assert_eq!(evaluate("var leaked = 41; leaked + 1"), Ok("42".to_string()));
        assert_eq!(evaluate("typeof leaked"), Ok("\"undefined\"".to_string()));
    }
}
