use crate::diagnostics::DiagnosticKind;
use crate::syntax::Parser;
use crate::syntax::cst::SyntaxKind;
use crate::syntax::cst::token_sets::EXPR_FIRST;

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) {
        self.parse_assign();
    }

    /// Assignment is right-associative: `a = b = c` parses as `a = (b = c)`.
    pub(crate) fn parse_assign(&mut self) {
        if !self.enter_recursion() {
            self.start_node(SyntaxKind::Error);
            while !self.should_stop() {
                self.bump();
            }
            self.finish_node();
            return;
        }

        let checkpoint = self.checkpoint();
        let lhs_kind = self.parse_postfix();

        if self.currently_at(SyntaxKind::Equals) {
            if !matches!(lhs_kind, SyntaxKind::NameRef | SyntaxKind::MemberExpr) {
                self.error(DiagnosticKind::InvalidAssignmentTarget);
            }
            self.start_node_at(checkpoint, SyntaxKind::AssignExpr);
            self.bump(); // `=`
            if self.currently_at_set(EXPR_FIRST) {
                self.parse_assign();
            } else {
                self.error(DiagnosticKind::ExpectedExpression);
            }
            self.finish_node();
        }

        self.exit_recursion();
    }

    /// Member access and calls chain left-to-right; each step retroactively
    /// wraps everything parsed so far via the checkpoint.
    fn parse_postfix(&mut self) -> SyntaxKind {
        let checkpoint = self.checkpoint();
        let mut kind = self.parse_primary();

        loop {
            match self.current() {
                SyntaxKind::Dot => {
                    self.start_node_at(checkpoint, SyntaxKind::MemberExpr);
                    self.bump(); // `.`
                    if !self.eat(SyntaxKind::Ident) {
                        self.error(DiagnosticKind::ExpectedPropertyName);
                    }
                    self.finish_node();
                    kind = SyntaxKind::MemberExpr;
                }
                SyntaxKind::ParenOpen => {
                    self.start_node_at(checkpoint, SyntaxKind::CallExpr);
                    self.parse_arg_list();
                    self.finish_node();
                    kind = SyntaxKind::CallExpr;
                }
                _ => break,
            }
        }

        kind
    }

    fn parse_primary(&mut self) -> SyntaxKind {
        match self.current() {
            SyntaxKind::Ident if self.next_is(SyntaxKind::Arrow) => self.parse_arrow_bare_param(),
            SyntaxKind::Ident => {
                self.start_node(SyntaxKind::NameRef);
                self.bump();
                self.finish_node();
                SyntaxKind::NameRef
            }
            SyntaxKind::Number
            | SyntaxKind::KwTrue
            | SyntaxKind::KwFalse
            | SyntaxKind::KwNull => {
                self.start_node(SyntaxKind::Literal);
                self.bump();
                self.finish_node();
                SyntaxKind::Literal
            }
            SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote => {
                self.start_node(SyntaxKind::Literal);
                self.bump_string_tokens();
                self.finish_node();
                SyntaxKind::Literal
            }
            SyntaxKind::ParenOpen if self.arrow_params_ahead() => self.parse_arrow_paren_params(),
            SyntaxKind::ParenOpen => self.parse_paren_expr(),
            SyntaxKind::BraceOpen => self.parse_object_lit(),
            SyntaxKind::BracketOpen => self.parse_array_lit(),
            SyntaxKind::KwFunction => {
                self.parse_function();
                SyntaxKind::FnDecl
            }
            _ => {
                self.error_and_bump(DiagnosticKind::ExpectedExpression);
                SyntaxKind::Error
            }
        }
    }

    /// Scans raw tokens to decide between `(params) => ...` and a
    /// parenthesized expression. Only identifiers and commas may appear in an
    /// arrow parameter list, so the scan stops at the matching `)` and checks
    /// for `=>`.
    fn arrow_params_ahead(&mut self) -> bool {
        self.skip_trivia_to_buffer();
        let mut pos = self.pos;
        debug_assert_eq!(self.tokens.get(pos).map(|t| t.kind), Some(SyntaxKind::ParenOpen));
        pos += 1;

        let mut depth = 1usize;
        while let Some(token) = self.tokens.get(pos) {
            match token.kind {
                SyntaxKind::ParenOpen => depth += 1,
                SyntaxKind::ParenClose => {
                    depth -= 1;
                    if depth == 0 {
                        pos += 1;
                        break;
                    }
                }
                _ => {}
            }
            pos += 1;
        }
        if depth != 0 {
            return false;
        }

        while let Some(token) = self.tokens.get(pos) {
            if !token.kind.is_trivia() {
                return token.kind == SyntaxKind::Arrow;
            }
            pos += 1;
        }
        false
    }

    /// `x => body`
    fn parse_arrow_bare_param(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::ArrowFn);
        self.start_node(SyntaxKind::ParamList);
        self.bump(); // parameter
        self.finish_node();
        self.bump(); // `=>`
        self.parse_arrow_body();
        self.finish_node();
        SyntaxKind::ArrowFn
    }

    /// `(a, b) => body`
    fn parse_arrow_paren_params(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::ArrowFn);
        self.parse_param_list();
        self.expect(SyntaxKind::Arrow, "`=>`");
        self.parse_arrow_body();
        self.finish_node();
        SyntaxKind::ArrowFn
    }

    fn parse_arrow_body(&mut self) {
        if self.currently_at(SyntaxKind::BraceOpen) {
            self.parse_block();
        } else if self.currently_at_set(EXPR_FIRST) {
            self.parse_assign();
        } else {
            self.error(DiagnosticKind::ExpectedExpression);
        }
    }

    fn parse_paren_expr(&mut self) -> SyntaxKind {
        self.assert_current(SyntaxKind::ParenOpen);
        self.start_node(SyntaxKind::ParenExpr);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump(); // `(`

        if self.currently_at_set(EXPR_FIRST) {
            self.parse_expr();
        } else {
            self.error(DiagnosticKind::ExpectedExpression);
        }

        if self.currently_at(SyntaxKind::ParenClose) {
            self.pop_delimiter();
            self.bump();
        } else {
            self.report_unclosed(DiagnosticKind::UnclosedParen, "parenthesis never closed");
        }
        self.finish_node();
        SyntaxKind::ParenExpr
    }

    fn parse_object_lit(&mut self) -> SyntaxKind {
        self.assert_current(SyntaxKind::BraceOpen);
        self.start_node(SyntaxKind::ObjectLit);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump(); // `{`

        loop {
            match self.current() {
                SyntaxKind::BraceClose => {
                    self.pop_delimiter();
                    self.bump();
                    break;
                }
                SyntaxKind::Comma => self.bump(),
                SyntaxKind::Ident
                | SyntaxKind::Number
                | SyntaxKind::DoubleQuote
                | SyntaxKind::SingleQuote => self.parse_object_entry(),
                _ if self.should_stop() => {
                    self.report_unclosed(
                        DiagnosticKind::UnclosedBrace,
                        "object literal never closed",
                    );
                    break;
                }
                _ => self.error_and_bump(DiagnosticKind::ExpectedPropertyName),
            }
        }
        self.finish_node();
        SyntaxKind::ObjectLit
    }

    /// `key: value` | `"key": value` | shorthand `key`
    fn parse_object_entry(&mut self) {
        self.start_node(SyntaxKind::ObjectEntry);
        match self.current() {
            SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote => self.bump_string_tokens(),
            _ => self.bump(), // identifier or number key
        }
        if self.eat(SyntaxKind::Colon) {
            if self.currently_at_set(EXPR_FIRST) {
                self.parse_assign();
            } else {
                self.error(DiagnosticKind::ExpectedExpression);
            }
        }
        self.finish_node();
    }

    fn parse_array_lit(&mut self) -> SyntaxKind {
        self.assert_current(SyntaxKind::BracketOpen);
        self.start_node(SyntaxKind::ArrayLit);
        self.push_delimiter(SyntaxKind::BracketOpen);
        self.bump(); // `[`

        loop {
            match self.current() {
                SyntaxKind::BracketClose => {
                    self.pop_delimiter();
                    self.bump();
                    break;
                }
                SyntaxKind::Comma => self.bump(),
                kind if EXPR_FIRST.contains(kind) => self.parse_assign(),
                _ if self.should_stop() => {
                    self.report_unclosed(
                        DiagnosticKind::UnclosedBracket,
                        "array literal never closed",
                    );
                    break;
                }
                _ => self.error_and_bump(DiagnosticKind::ExpectedExpression),
            }
        }
        self.finish_node();
        SyntaxKind::ArrayLit
    }

    pub(crate) fn parse_arg_list(&mut self) {
        self.assert_current(SyntaxKind::ParenOpen);
        self.start_node(SyntaxKind::ArgList);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump(); // `(`

        loop {
            match self.current() {
                SyntaxKind::ParenClose => {
                    self.pop_delimiter();
                    self.bump();
                    break;
                }
                SyntaxKind::Comma => self.bump(),
                kind if EXPR_FIRST.contains(kind) => self.parse_assign(),
                _ if self.should_stop() => {
                    self.report_unclosed(DiagnosticKind::UnclosedParen, "call never closed");
                    break;
                }
                _ => {
                    self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "expected an argument")
                }
            }
        }
        self.finish_node();
    }

    /// Consumes quote + content + quote as produced by the lexer.
    pub(super) fn bump_string_tokens(&mut self) {
        self.bump(); // opening quote
        if self.currently_at(SyntaxKind::StrVal) {
            self.bump();
        }
        if matches!(
            self.current(),
            SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote
        ) {
            self.bump();
        }
    }
}
