//! AST visitor that lowers swc nodes into call-sites and declarations.
//!
//! The visitor walks a module once, in source order, and feeds the
//! [`ExtractionSession`]:
//!
//! - `visit_var_decl`: the declaration (for annotation relocation), before its
//!   initializers are visited
//! - `visit_call_expr`: every call whose callee is a registered translation
//!   function, then its arguments (nested calls are extracted too)
//!
//! Enclosing statements are tracked on a stack so a call that *is* the
//! statement's expression (`gettext("x");`, `return gettext("x")`) can see the
//! statement's leading comments.

use swc_common::{BytePos, SourceMap, Span, Spanned};
use swc_ecma_ast::{
    CallExpr, Callee as SwcCallee, Decl, ExportDecl, Expr, ExprOrSpread, Lit, MemberProp, Module,
    ModuleDecl, Stmt, VarDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::call_site::{
    ArgValue, CallSite, Callee, Declaration, Declarator, SourceLocation, SpanKey,
};
use crate::core::parsers::jsx::ExtractedComments;
use crate::core::session::{CallOutcome, ExtractionSession};

/// Look through parentheses and TypeScript type wrappers.
pub fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_expr(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_expr(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_expr(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_expr(&ts_sat.expr),
        Expr::TsNonNull(ts_non_null) => unwrap_expr(&ts_non_null.expr),
        _ => expr,
    }
}

/// Registry lookup names for a call's callee.
fn callee_of(call: &CallExpr) -> Callee {
    let SwcCallee::Expr(expr) = &call.callee else {
        return Callee::default();
    };
    match unwrap_expr(expr) {
        Expr::Ident(ident) => Callee::ident(ident.sym.as_str()),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => Callee::member(prop.sym.as_str()),
            _ => Callee::default(),
        },
        _ => Callee::default(),
    }
}

fn arg_value(arg: &ExprOrSpread) -> ArgValue {
    if arg.spread.is_some() {
        return ArgValue::Dynamic;
    }
    match unwrap_expr(&arg.expr) {
        Expr::Lit(Lit::Str(s)) => s
            .value
            .as_str()
            .map(ArgValue::literal)
            .unwrap_or(ArgValue::Dynamic),
        // `0` is falsy and never names a message
        Expr::Lit(Lit::Num(num)) if num.value != 0.0 => ArgValue::literal(num.value.to_string()),
        _ => ArgValue::Dynamic,
    }
}

/// A statement enclosing the current node.
#[derive(Debug, Clone, Copy)]
struct StatementFrame {
    /// Position where the statement's leading comments are attached.
    lo: BytePos,
    /// Span of the statement's own expression, if it has exactly one.
    direct_expr: Option<Span>,
}

/// Result of visiting one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileExtraction {
    /// Calls to registered translation functions.
    pub matched_calls: usize,
}

pub struct CallSiteVisitor<'a> {
    /// Path recorded in references (before base directory stripping).
    file_path: &'a str,

    /// SWC source map for looking up line numbers.
    source_map: &'a SourceMap,

    comments: &'a ExtractedComments,

    session: &'a mut ExtractionSession,

    statements: Vec<StatementFrame>,

    /// Set by `export const ...` so the declaration also sees the comments
    /// leading the `export` keyword.
    export_comment_pos: Option<BytePos>,

    matched_calls: usize,
}

impl<'a> CallSiteVisitor<'a> {
    pub fn new(
        file_path: &'a str,
        source_map: &'a SourceMap,
        comments: &'a ExtractedComments,
        session: &'a mut ExtractionSession,
    ) -> Self {
        Self {
            file_path,
            source_map,
            comments,
            session,
            statements: Vec::new(),
            export_comment_pos: None,
            matched_calls: 0,
        }
    }

    /// Main entry point: visit a module and feed everything to the session.
    pub fn extract(mut self, module: &Module) -> FileExtraction {
        self.session.begin_file();
        self.visit_module(module);
        FileExtraction {
            matched_calls: self.matched_calls,
        }
    }

    fn statement_comments(&self, call_span: Span) -> Vec<String> {
        match self.statements.last() {
            Some(frame) if frame.direct_expr == Some(call_span) => {
                self.comments.leading_texts(frame.lo)
            }
            _ => Vec::new(),
        }
    }
}

impl Visit for CallSiteVisitor<'_> {
    fn visit_stmt(&mut self, node: &Stmt) {
        let direct_expr = match node {
            Stmt::Expr(stmt) => Some(&*stmt.expr),
            Stmt::Return(stmt) => stmt.arg.as_deref(),
            Stmt::Throw(stmt) => Some(&*stmt.arg),
            _ => None,
        };

        self.statements.push(StatementFrame {
            lo: node.span().lo,
            direct_expr: direct_expr.map(|expr| unwrap_expr(expr).span()),
        });
        node.visit_children_with(self);
        self.statements.pop();
    }

    fn visit_module_decl(&mut self, node: &ModuleDecl) {
        let ModuleDecl::ExportDefaultExpr(export) = node else {
            node.visit_children_with(self);
            return;
        };

        // `export default gettext("x")` reads like an expression statement
        self.statements.push(StatementFrame {
            lo: export.span.lo,
            direct_expr: Some(unwrap_expr(&export.expr).span()),
        });
        node.visit_children_with(self);
        self.statements.pop();
    }

    fn visit_export_decl(&mut self, node: &ExportDecl) {
        if matches!(node.decl, Decl::Var(_)) {
            self.export_comment_pos = Some(node.span.lo);
        }
        node.visit_children_with(self);
    }

    fn visit_var_decl(&mut self, node: &VarDecl) {
        let mut comments = Vec::new();
        if let Some(pos) = self.export_comment_pos.take() {
            comments.extend(self.comments.leading_texts(pos));
        }
        comments.extend(self.comments.leading_texts(node.span.lo));

        let declaration = Declaration {
            comments,
            declarators: node
                .decls
                .iter()
                .map(|decl| Declarator {
                    comments: self.comments.leading_texts(decl.span.lo),
                    init_span: decl
                        .init
                        .as_deref()
                        .map(|init| SpanKey::from(unwrap_expr(init).span())),
                })
                .collect(),
        };
        self.session.visit_declaration(&declaration);

        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        let callee = callee_of(node);

        if self.session.is_translation_call(&callee) {
            let loc = self.source_map.lookup_char_pos(node.span.lo);
            let call_site = CallSite {
                callee,
                args: node.args.iter().map(arg_value).collect(),
                location: SourceLocation::new(self.file_path, loc.line),
                span: SpanKey::from(node.span),
                comments: self.comments.leading_texts(node.span.lo),
                statement_comments: self.statement_comments(node.span),
            };

            if let CallOutcome::Matched(_) = self.session.visit_call(&call_site) {
                self.matched_calls += 1;
            }
        }

        node.visit_children_with(self);
    }
}
