//! Edge-case tests for the parser's grammar corners.

#[cfg(test)]
mod tests {
    use crate::{parse, BinOp, NodeKind, ParseError};

    #[test]
    fn empty_source_is_an_empty_block() {
        let ast = parse("").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        assert!(block.seq.is_empty());
        assert!(block.defs.is_empty());
    }

    #[test]
    fn whitespace_and_comments_only_is_an_empty_block() {
        let ast = parse("  \n# a comment\n   \n").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        assert!(block.seq.is_empty());
    }

    #[test]
    fn nested_parens_around_a_literal() {
        let ast = parse("((1))").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        assert_eq!(block.seq[0].kind, NodeKind::Lit(dlc_value::Value::Int(1)));
    }

    #[test]
    fn empty_array_and_dict_literals() {
        let ast = parse("[]\n{}").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        assert_eq!(block.seq.len(), 2);
        assert!(matches!(&block.seq[0].kind, NodeKind::Array(elems) if elems.is_empty()));
        assert!(matches!(&block.seq[1].kind, NodeKind::Dict(entries) if entries.is_empty()));
    }

    #[test]
    fn nested_do_block_as_an_expression() {
        let ast = parse("1 + do\n  2\nend").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        let NodeKind::Binary { op: BinOp::Add, right, .. } = &block.seq[0].kind else {
            panic!()
        };
        assert!(matches!(right.kind, NodeKind::Do(_)));
    }

    #[test]
    fn trailing_semicolon_before_end_is_tolerated() {
        let ast = parse("do\n  1;\nend").unwrap();
        let NodeKind::Do(outer) = ast.kind else { panic!() };
        let NodeKind::Do(inner) = &outer.seq[0].kind else { panic!() };
        assert_eq!(inner.seq.len(), 1);
    }

    #[test]
    fn dict_update_chains() {
        let ast = parse("d{a: 1}{b: 2}").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        let NodeKind::DictUp { subj, .. } = &block.seq[0].kind else {
            panic!()
        };
        assert!(matches!(subj.kind, NodeKind::DictUp { .. }));
    }

    #[test]
    fn case_with_underscore_wildcard_pattern() {
        let ast = parse("case x of _ -> 1 end").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        assert!(matches!(block.seq[0].kind, NodeKind::Case { .. }));
    }

    #[test]
    fn dangling_operator_is_an_unexpected_eof_or_token_error() {
        assert!(parse("1 +").is_err());
    }

    #[test]
    fn unterminated_case_is_an_error() {
        assert!(parse("case x of 1 -> 2").is_err());
    }

    #[test]
    fn at_and_tilde_are_valid_inside_patterns_only() {
        assert!(parse("case x of a@1 -> a end").is_ok());
        let err = parse("1 @ 2");
        // `@` is pattern-legal but still a valid *operator token* in
        // expression position per the grammar (expr2 includes `@`); only
        // `=` and `regex` are expression-illegal. So this should parse.
        assert!(err.is_ok());
    }

    #[test]
    fn apply_with_no_arguments() {
        let ast = parse("f()").unwrap();
        let NodeKind::Do(block) = ast.kind else { panic!() };
        let NodeKind::Apply { args, .. } = &block.seq[0].kind else {
            panic!()
        };
        assert!(args.is_empty());
    }

    #[test]
    fn regex_literal_in_expression_position_is_rejected() {
        let err = parse("/abc/").unwrap_err();
        assert!(matches!(err, ParseError::InvalidContext { context: "expression", .. }));
    }
}
