use crate::diagnostics::DiagnosticKind;
use crate::syntax::Parser;
use crate::syntax::cst::SyntaxKind;
use crate::syntax::cst::token_sets::EXPR_FIRST;

impl Parser<'_> {
    pub(crate) fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);
        loop {
            // A trivia-only tail is EOF, not a missing statement.
            self.skip_trivia_to_buffer();
            if self.should_stop() {
                break;
            }
            self.parse_statement();
        }
        // Trailing trivia belongs inside Root; the builder must close with
        // nothing buffered.
        self.drain_trivia();
        self.finish_node();
    }

    pub(crate) fn parse_statement(&mut self) {
        if !self.enter_recursion() {
            self.start_node(SyntaxKind::Error);
            while !self.should_stop() {
                self.bump();
            }
            self.finish_node();
            return;
        }

        match self.current() {
            SyntaxKind::KwImport => self.parse_import(),
            SyntaxKind::KwExport => self.parse_export_default(),
            SyntaxKind::KwConst | SyntaxKind::KwLet | SyntaxKind::KwVar => self.parse_var_decl(),
            SyntaxKind::KwFunction => self.parse_function(),
            SyntaxKind::KwReturn => self.parse_return(),
            SyntaxKind::KwIf => self.parse_if(),
            SyntaxKind::BraceOpen => self.parse_block(),
            SyntaxKind::Semicolon => self.bump(), // empty statement
            kind if EXPR_FIRST.contains(kind) => self.parse_expr_stmt(),
            _ => {
                self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, "expected a statement");
            }
        }

        self.exit_recursion();
    }

    /// `import def from "m"` | `import { a, b } from "m"` | `import def, { a } from "m"`
    fn parse_import(&mut self) {
        self.start_node(SyntaxKind::ImportDecl);
        self.bump(); // `import`

        if self.currently_at(SyntaxKind::Ident) {
            self.bump(); // default specifier
            if self.eat(SyntaxKind::Comma) && self.currently_at(SyntaxKind::BraceOpen) {
                self.parse_named_imports();
            }
        } else if self.currently_at(SyntaxKind::BraceOpen) {
            self.parse_named_imports();
        } else {
            self.error_msg(DiagnosticKind::ExpectedBindingName, "after `import`");
        }

        self.expect(SyntaxKind::KwFrom, "`from`");
        if matches!(
            self.current(),
            SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote
        ) {
            self.bump_string_tokens();
        } else {
            self.error(DiagnosticKind::ExpectedModuleName);
        }
        self.eat(SyntaxKind::Semicolon);
        self.finish_node();
    }

    fn parse_named_imports(&mut self) {
        self.assert_current(SyntaxKind::BraceOpen);
        self.start_node(SyntaxKind::NamedImports);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump(); // `{`

        loop {
            match self.current() {
                SyntaxKind::BraceClose => {
                    self.pop_delimiter();
                    self.bump();
                    break;
                }
                SyntaxKind::Ident | SyntaxKind::Comma => self.bump(),
                _ if self.should_stop() => {
                    self.report_unclosed(DiagnosticKind::UnclosedBrace, "import list never closed");
                    break;
                }
                _ => self.error_and_bump_msg(
                    DiagnosticKind::ExpectedBindingName,
                    "in import list",
                ),
            }
        }
        self.finish_node();
    }

    /// `export default expr;` — the only export form the subset supports.
    fn parse_export_default(&mut self) {
        self.start_node(SyntaxKind::ExportDefault);
        self.bump(); // `export`
        self.expect(SyntaxKind::KwDefault, "`default`");
        if self.currently_at_set(EXPR_FIRST) {
            self.parse_expr();
        } else {
            self.error(DiagnosticKind::ExpectedExpression);
        }
        self.eat(SyntaxKind::Semicolon);
        self.finish_node();
    }

    fn parse_var_decl(&mut self) {
        self.start_node(SyntaxKind::VarDecl);
        self.bump(); // `const` | `let` | `var`

        loop {
            self.parse_declarator();
            if !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.eat(SyntaxKind::Semicolon);
        self.finish_node();
    }

    fn parse_declarator(&mut self) {
        self.start_node(SyntaxKind::Declarator);
        match self.current() {
            SyntaxKind::Ident => self.bump(),
            SyntaxKind::BraceOpen => self.parse_object_pattern(),
            _ => self.error(DiagnosticKind::ExpectedBindingName),
        }
        if self.eat(SyntaxKind::Equals) {
            if self.currently_at_set(EXPR_FIRST) {
                self.parse_expr();
            } else {
                self.error(DiagnosticKind::ExpectedExpression);
            }
        }
        self.finish_node();
    }

    /// `{ a, b: localName }` in binding position.
    fn parse_object_pattern(&mut self) {
        self.assert_current(SyntaxKind::BraceOpen);
        self.start_node(SyntaxKind::ObjectPattern);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump(); // `{`

        loop {
            match self.current() {
                SyntaxKind::BraceClose => {
                    self.pop_delimiter();
                    self.bump();
                    break;
                }
                SyntaxKind::Ident => self.parse_pattern_prop(),
                SyntaxKind::Comma => self.bump(),
                _ if self.should_stop() => {
                    self.report_unclosed(
                        DiagnosticKind::UnclosedBrace,
                        "destructuring pattern never closed",
                    );
                    break;
                }
                _ => self.error_and_bump(DiagnosticKind::ExpectedPropertyName),
            }
        }
        self.finish_node();
    }

    fn parse_pattern_prop(&mut self) {
        self.start_node(SyntaxKind::PatternProp);
        self.bump(); // key
        if self.eat(SyntaxKind::Colon) && !self.eat(SyntaxKind::Ident) {
            self.error(DiagnosticKind::ExpectedBindingName);
        }
        self.finish_node();
    }

    /// Also used for function expressions; the node kind is the same.
    pub(crate) fn parse_function(&mut self) {
        self.start_node(SyntaxKind::FnDecl);
        self.bump(); // `function`
        self.eat(SyntaxKind::Ident); // anonymous in expression position
        if self.currently_at(SyntaxKind::ParenOpen) {
            self.parse_param_list();
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `(`");
        }
        if self.currently_at(SyntaxKind::BraceOpen) {
            self.parse_block();
        } else {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected a function body");
        }
        self.finish_node();
    }

    pub(crate) fn parse_param_list(&mut self) {
        self.assert_current(SyntaxKind::ParenOpen);
        self.start_node(SyntaxKind::ParamList);
        self.push_delimiter(SyntaxKind::ParenOpen);
        self.bump(); // `(`

        loop {
            match self.current() {
                SyntaxKind::ParenClose => {
                    self.pop_delimiter();
                    self.bump();
                    break;
                }
                SyntaxKind::Ident | SyntaxKind::Comma => self.bump(),
                _ if self.should_stop() => {
                    self.report_unclosed(
                        DiagnosticKind::UnclosedParen,
                        "parameter list never closed",
                    );
                    break;
                }
                _ => self.error_and_bump_msg(
                    DiagnosticKind::ExpectedBindingName,
                    "in parameter list",
                ),
            }
        }
        self.finish_node();
    }

    fn parse_return(&mut self) {
        self.start_node(SyntaxKind::ReturnStmt);
        self.bump(); // `return`
        if self.currently_at_set(EXPR_FIRST) {
            self.parse_expr();
        }
        self.eat(SyntaxKind::Semicolon);
        self.finish_node();
    }

    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IfStmt);
        self.bump(); // `if`
        if self.expect(SyntaxKind::ParenOpen, "`(`") {
            self.parse_expr();
            self.expect(SyntaxKind::ParenClose, "`)`");
        }
        if !self.should_stop() {
            self.parse_statement();
        }
        if self.eat(SyntaxKind::KwElse) && !self.should_stop() {
            self.parse_statement();
        }
        self.finish_node();
    }

    pub(crate) fn parse_block(&mut self) {
        self.assert_current(SyntaxKind::BraceOpen);
        self.start_node(SyntaxKind::Block);
        self.push_delimiter(SyntaxKind::BraceOpen);
        self.bump(); // `{`

        loop {
            if self.currently_at(SyntaxKind::BraceClose) {
                self.pop_delimiter();
                self.bump();
                break;
            }
            if self.should_stop() {
                self.report_unclosed(DiagnosticKind::UnclosedBrace, "block never closed");
                break;
            }
            self.parse_statement();
        }
        self.finish_node();
    }

    fn parse_expr_stmt(&mut self) {
        self.start_node(SyntaxKind::ExprStmt);
        self.parse_expr();
        self.eat(SyntaxKind::Semicolon);
        self.finish_node();
    }

    pub(super) fn report_unclosed(&mut self, kind: DiagnosticKind, message: &str) {
        if let Some(open) = self.pop_delimiter() {
            self.error_unclosed_delimiter(kind, message, "opened here", open.span);
        }
    }
}
