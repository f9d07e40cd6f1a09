//! Code generation.
//!
//! [`Codegen`] is a [`Reducer`] producing [`CodeRep`]. Each reduction decides
//! where parentheses, braces and statement terminators are needed from the
//! node's own precedence and the [`Flags`] its children report; the finished
//! tree is then emitted through a [`TokenStream`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::ast::*;
use crate::code_rep::{CodeRep, Flags, RepKind};
use crate::d2a::d2a;
use crate::literal::{directive_delimiter, escape_string_literal, is_identifier_name, web_safe};
use crate::operators::{BinaryOperator, Precedence};
use crate::reducer::{fold_expression, fold_program, Reducer};
use crate::token_stream::TokenStream;

/// Failures of web-safe generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("regular expression /{pattern}/ cannot be rendered safely inside a script element")]
    UnsafeRegExp { pattern: String },

    #[error("tagged template text `{raw}` cannot be rendered safely inside a script element")]
    UnsafeTemplate { raw: String },
}

/// Output options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodegenOptions {
    /// Break lines and indent blocks.
    pub pretty: bool,

    /// Spaces per indentation level in pretty mode.
    pub indent: usize,

    /// Render integers in `(1e15, 1e20)` as hexadecimal literals.
    pub hex_large_integers: bool,

    /// Escape output so it can be inlined in an HTML `<script>` element.
    pub web_safe: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
            hex_large_integers: true,
            web_safe: false,
        }
    }
}

impl CodegenOptions {
    /// Enable or disable pretty mode.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set the indentation width.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enable or disable hexadecimal large integers.
    #[must_use]
    pub fn with_hex_large_integers(mut self, enabled: bool) -> Self {
        self.hex_large_integers = enabled;
        self
    }

    /// Enable or disable web-safe escaping.
    #[must_use]
    pub fn with_web_safe(mut self, enabled: bool) -> Self {
        self.web_safe = enabled;
        self
    }
}

/// The code generating reducer.
#[derive(Debug, Default)]
pub struct Codegen {
    options: CodegenOptions,
    /// First web-safe failure seen during the current fold.
    error: Option<CodegenError>,
}

impl Codegen {
    pub fn new(options: CodegenOptions) -> Self {
        Self { options, error: None }
    }

    pub fn options(&self) -> &CodegenOptions {
        &self.options
    }

    /// Render a whole program.
    pub fn generate(&mut self, program: &Program) -> Result<String, CodegenError> {
        self.error = None;
        let rep = fold_program(self, program);
        if let Some(err) = self.error.take() {
            debug!(error = %err, "generation failed");
            return Err(err);
        }
        let out = self.emit(&rep);
        debug!(
            kind = program_kind(program),
            statements = program.len(),
            pretty = self.options.pretty,
            web_safe = self.options.web_safe,
            bytes = out.len(),
            "generated program"
        );
        Ok(out)
    }

    /// Render a lone expression, without a statement terminator.
    pub fn generate_expression(&mut self, expression: &Expression) -> Result<String, CodegenError> {
        self.error = None;
        let rep = fold_expression(self, expression);
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self.emit(&rep)),
        }
    }

    fn emit(&self, rep: &CodeRep) -> String {
        let mut ts = self.token_stream();
        rep.emit(&mut ts, false);
        ts.into_string()
    }

    fn token_stream(&self) -> TokenStream {
        let ts = if self.options.pretty {
            TokenStream::pretty(self.options.indent)
        } else {
            TokenStream::new()
        };
        ts.with_hex_large_integers(self.options.hex_large_integers)
            .with_web_safe(self.options.web_safe)
    }

    fn fail(&mut self, err: CodegenError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Source text, escaped in web-safe mode.
    fn text(&self, source: &str) -> String {
        if self.options.web_safe {
            web_safe(source)
        } else {
            source.to_string()
        }
    }

    fn identifier(&self, name: &str) -> CodeRep {
        let rep = CodeRep::token(self.text(name));
        if name == "let" {
            rep.with_flags(Flags::STARTS_WITH_LET)
        } else {
            rep
        }
    }

    fn string_literal(&self, value: &str) -> CodeRep {
        CodeRep::token(self.text(&escape_string_literal(value)))
    }

    fn static_member(&self, object_node: &ExpressionSuper, object: CodeRep, property: &str) -> CodeRep {
        let object = p_object(object_node, object_node.member_precedence(), object);
        let flags = object.leading();
        CodeRep::seq(vec![object, CodeRep::token("."), CodeRep::token(self.text(property))]).with_flags(flags)
    }

    fn template_text(&mut self, tagged: bool, rep: CodeRep) -> CodeRep {
        if !self.options.web_safe {
            return rep;
        }
        match rep.kind {
            RepKind::RawToken(raw) if tagged => {
                if web_safe(&raw) != raw {
                    self.fail(CodegenError::UnsafeTemplate { raw: raw.clone() });
                }
                CodeRep::raw(raw)
            }
            RepKind::RawToken(raw) => CodeRep::raw(web_safe(&raw)),
            _ => rep,
        }
    }
}

fn program_kind(program: &Program) -> &'static str {
    match program {
        Program::Script(_) => "script",
        Program::Module(_) => "module",
    }
}

/// Parenthesize `rep` when `node` binds looser than `precedence`.
fn p(node: &Expression, precedence: Precedence, rep: CodeRep) -> CodeRep {
    if node.precedence() < precedence {
        CodeRep::paren(rep)
    } else {
        rep
    }
}

fn p_object(node: &ExpressionSuper, precedence: Precedence, rep: CodeRep) -> CodeRep {
    match node {
        ExpressionSuper::Expression(e) => p(e, precedence, rep),
        ExpressionSuper::Super(_) => rep,
    }
}

/// An argument or array element: anything but a bare comma expression.
fn argument(node: &SpreadElementExpression, rep: CodeRep) -> CodeRep {
    match node {
        SpreadElementExpression::Expression(e) => p(e, Precedence::Assignment, rep),
        SpreadElementExpression::SpreadElement(_) => rep,
    }
}

fn arguments(nodes: &[SpreadElementExpression], reps: Vec<CodeRep>) -> CodeRep {
    let args = nodes.iter().zip(reps).map(|(node, rep)| argument(node, rep)).collect();
    CodeRep::paren(CodeRep::comma_sep(args))
}

/// Elements of an array literal or pattern. A trailing hole needs one more
/// comma than the element count suggests.
fn array_elements(elements: Vec<Option<CodeRep>>, rest: Option<CodeRep>) -> CodeRep {
    let trailing_hole = rest.is_none() && matches!(elements.last(), Some(None));
    let mut items: Vec<CodeRep> = elements.into_iter().map(|e| e.unwrap_or_else(CodeRep::empty)).collect();
    if let Some(rest) = rest {
        items.push(CodeRep::seq(vec![CodeRep::token("..."), rest]));
    } else if trailing_hole {
        items.push(CodeRep::empty());
    }
    CodeRep::bracket(CodeRep::comma_sep(items))
}

fn lines(items: impl IntoIterator<Item = CodeRep>) -> CodeRep {
    CodeRep::seq(items.into_iter().map(CodeRep::line).collect())
}

fn block(items: Vec<CodeRep>) -> CodeRep {
    CodeRep::brace(CodeRep::indent(lines(items)))
}

/// A string literal statement in directive position would be read as a
/// directive; parenthesize its expression.
fn directive_safe(statement: CodeRep) -> CodeRep {
    match statement.kind {
        RepKind::StringStatement(expression) => {
            trace!("parenthesizing string statement in directive position");
            CodeRep::seq(vec![CodeRep::paren(*expression), CodeRep::semi_op()])
        }
        kind => CodeRep { kind, flags: statement.flags },
    }
}

/// Join a statement list whose first entry sits where a directive could.
fn prologue(directives: Vec<CodeRep>, statements: Vec<CodeRep>) -> CodeRep {
    let mut statements = statements.into_iter();
    let first = statements.next().map(directive_safe);
    lines(directives.into_iter().chain(first).chain(statements))
}

fn missing_else(body: &CodeRep) -> Flags {
    body.flags & Flags::ENDS_WITH_MISSING_ELSE
}

fn keyword_if(enabled: bool, keyword: &str) -> CodeRep {
    if enabled {
        CodeRep::token(keyword)
    } else {
        CodeRep::empty()
    }
}

fn with_default(binding: CodeRep, init: &Expression, init_rep: CodeRep) -> CodeRep {
    CodeRep::init(binding, Some(p(init, Precedence::Assignment, init_rep)))
}

fn optional_default(binding: CodeRep, init: Option<&Expression>, init_rep: Option<CodeRep>) -> CodeRep {
    match (init, init_rep) {
        (Some(init), Some(rep)) => with_default(binding, init, rep),
        _ => binding,
    }
}

fn class(name: Option<CodeRep>, super_node: Option<&Expression>, super_class: Option<CodeRep>, elements: Vec<CodeRep>) -> CodeRep {
    let mut parts = vec![CodeRep::token("class")];
    parts.extend(name);
    if let (Some(node), Some(rep)) = (super_node, super_class) {
        parts.push(CodeRep::token("extends"));
        parts.push(p(node, Precedence::New, rep));
    }
    parts.push(block(elements));
    CodeRep::seq(parts)
}

fn function(is_async: bool, is_generator: bool, name: Option<CodeRep>, params: CodeRep, body: CodeRep) -> CodeRep {
    let mut parts = vec![keyword_if(is_async, "async"), CodeRep::token("function"), keyword_if(is_generator, "*")];
    parts.extend(name);
    parts.push(CodeRep::paren(params));
    parts.push(CodeRep::brace(body));
    CodeRep::seq(parts)
}

fn declaration_name(name: CodeRep, binding: &BindingIdentifier) -> Option<CodeRep> {
    (binding.name != DEFAULT_EXPORT_NAME).then_some(name)
}

impl Reducer for Codegen {
    type State = CodeRep;

    // === Programs and modules ===

    fn reduce_script(&mut self, _node: &Script, directives: Vec<CodeRep>, statements: Vec<CodeRep>) -> CodeRep {
        prologue(directives, statements)
    }

    fn reduce_module(&mut self, _node: &Module, directives: Vec<CodeRep>, items: Vec<CodeRep>) -> CodeRep {
        prologue(directives, items)
    }

    fn reduce_directive(&mut self, node: &Directive) -> CodeRep {
        let delim = directive_delimiter(&node.raw_value);
        let text = format!("{delim}{}{delim}", node.raw_value);
        CodeRep::seq(vec![CodeRep::token(self.text(&text)), CodeRep::semi_op()])
    }

    fn reduce_import(&mut self, node: &Import, default_binding: Option<CodeRep>, named_imports: Vec<CodeRep>) -> CodeRep {
        let specifier = self.string_literal(&node.module_specifier);
        if default_binding.is_none() && named_imports.is_empty() {
            return CodeRep::seq(vec![CodeRep::token("import"), specifier, CodeRep::semi_op()]);
        }
        let mut bindings: Vec<CodeRep> = default_binding.into_iter().collect();
        if !named_imports.is_empty() {
            bindings.push(CodeRep::brace(CodeRep::comma_sep(named_imports)));
        }
        CodeRep::seq(vec![
            CodeRep::token("import"),
            CodeRep::comma_sep(bindings),
            CodeRep::token("from"),
            specifier,
            CodeRep::semi_op(),
        ])
    }

    fn reduce_import_namespace(&mut self, node: &ImportNamespace, default_binding: Option<CodeRep>, namespace_binding: CodeRep) -> CodeRep {
        let namespace = CodeRep::seq(vec![CodeRep::token("*"), CodeRep::token("as"), namespace_binding]);
        let bindings = default_binding.into_iter().chain(std::iter::once(namespace)).collect();
        CodeRep::seq(vec![
            CodeRep::token("import"),
            CodeRep::comma_sep(bindings),
            CodeRep::token("from"),
            self.string_literal(&node.module_specifier),
            CodeRep::semi_op(),
        ])
    }

    fn reduce_import_specifier(&mut self, node: &ImportSpecifier, binding: CodeRep) -> CodeRep {
        match &node.name {
            Some(name) => CodeRep::seq(vec![CodeRep::token(self.text(name)), CodeRep::token("as"), binding]),
            None => binding,
        }
    }

    fn reduce_export_all_from(&mut self, node: &ExportAllFrom) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token("export"),
            CodeRep::token("*"),
            CodeRep::token("from"),
            self.string_literal(&node.module_specifier),
            CodeRep::semi_op(),
        ])
    }

    fn reduce_export_from(&mut self, node: &ExportFrom, named_exports: Vec<CodeRep>) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token("export"),
            CodeRep::brace(CodeRep::comma_sep(named_exports)),
            CodeRep::token("from"),
            self.string_literal(&node.module_specifier),
            CodeRep::semi_op(),
        ])
    }

    fn reduce_export_from_specifier(&mut self, node: &ExportFromSpecifier) -> CodeRep {
        let name = CodeRep::token(self.text(&node.name));
        match &node.exported_name {
            Some(exported) => CodeRep::seq(vec![name, CodeRep::token("as"), CodeRep::token(self.text(exported))]),
            None => name,
        }
    }

    fn reduce_export_locals(&mut self, _node: &ExportLocals, named_exports: Vec<CodeRep>) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token("export"),
            CodeRep::brace(CodeRep::comma_sep(named_exports)),
            CodeRep::semi_op(),
        ])
    }

    fn reduce_export_local_specifier(&mut self, node: &ExportLocalSpecifier, name: CodeRep) -> CodeRep {
        match &node.exported_name {
            Some(exported) => CodeRep::seq(vec![name, CodeRep::token("as"), CodeRep::token(self.text(exported))]),
            None => name,
        }
    }

    fn reduce_export(&mut self, node: &Export, declaration: CodeRep) -> CodeRep {
        let mut parts = vec![CodeRep::token("export"), declaration];
        if matches!(node.declaration, ExportableDeclaration::VariableDeclaration(_)) {
            parts.push(CodeRep::semi_op());
        }
        CodeRep::seq(parts)
    }

    fn reduce_export_default(&mut self, node: &ExportDefault, body: CodeRep) -> CodeRep {
        let head = [CodeRep::token("export"), CodeRep::token("default")];
        match &node.body {
            ExportDefaultBody::Expression(e) => {
                let body = p(e, Precedence::Assignment, body);
                let body = if body.has(Flags::STARTS_WITH_FUNCTION_OR_CLASS) {
                    CodeRep::paren(body)
                } else {
                    body
                };
                CodeRep::seq(head.into_iter().chain([body, CodeRep::semi_op()]).collect())
            }
            _ => CodeRep::seq(head.into_iter().chain([body]).collect()),
        }
    }

    // === Functions and classes ===

    fn reduce_function_declaration(&mut self, node: &FunctionDeclaration, name: CodeRep, params: CodeRep, body: CodeRep) -> CodeRep {
        let name = declaration_name(name, &node.name);
        function(node.is_async, node.is_generator, name, params, body)
    }

    fn reduce_function_expression(&mut self, node: &FunctionExpression, name: Option<CodeRep>, params: CodeRep, body: CodeRep) -> CodeRep {
        function(node.is_async, node.is_generator, name, params, body)
            .with_flags(Flags::STARTS_WITH_FUNCTION_OR_CLASS)
    }

    fn reduce_arrow_expression(&mut self, node: &ArrowExpression, params: CodeRep, body: CodeRep) -> CodeRep {
        let head = if node.has_simple_head() {
            params
        } else {
            CodeRep::paren(params)
        };
        let (body, flags) = match &node.body {
            ArrowBody::FunctionBody(_) => (CodeRep::brace(body), Flags::empty()),
            ArrowBody::Expression(e) => {
                let body = p(e, Precedence::Assignment, body);
                if body.has(Flags::STARTS_WITH_OBJECT_CURLY) {
                    (CodeRep::paren(body), Flags::empty())
                } else {
                    let flags = body.flags & Flags::CONTAINS_IN;
                    (body, flags)
                }
            }
        };
        CodeRep::seq(vec![keyword_if(node.is_async, "async"), head, CodeRep::operator("=>"), body]).with_flags(flags)
    }

    fn reduce_formal_parameters(&mut self, _node: &FormalParameters, items: Vec<CodeRep>, rest: Option<CodeRep>) -> CodeRep {
        let mut params = items;
        if let Some(rest) = rest {
            params.push(CodeRep::seq(vec![CodeRep::token("..."), rest]));
        }
        CodeRep::comma_sep(params)
    }

    fn reduce_function_body(&mut self, _node: &FunctionBody, directives: Vec<CodeRep>, statements: Vec<CodeRep>) -> CodeRep {
        CodeRep::indent(prologue(directives, statements))
    }

    fn reduce_class_declaration(&mut self, node: &ClassDeclaration, name: CodeRep, super_class: Option<CodeRep>, elements: Vec<CodeRep>) -> CodeRep {
        let name = declaration_name(name, &node.name);
        class(name, node.super_class.as_ref(), super_class, elements)
    }

    fn reduce_class_expression(&mut self, node: &ClassExpression, name: Option<CodeRep>, super_class: Option<CodeRep>, elements: Vec<CodeRep>) -> CodeRep {
        class(name, node.super_class.as_deref(), super_class, elements)
            .with_flags(Flags::STARTS_WITH_FUNCTION_OR_CLASS)
    }

    fn reduce_class_element(&mut self, node: &ClassElement, method: CodeRep) -> CodeRep {
        if node.is_static {
            CodeRep::seq(vec![CodeRep::token("static"), method])
        } else {
            method
        }
    }

    fn reduce_method(&mut self, node: &Method, name: CodeRep, params: CodeRep, body: CodeRep) -> CodeRep {
        CodeRep::seq(vec![
            keyword_if(node.is_async, "async"),
            keyword_if(node.is_generator, "*"),
            name,
            CodeRep::paren(params),
            CodeRep::brace(body),
        ])
    }

    fn reduce_getter(&mut self, _node: &Getter, name: CodeRep, body: CodeRep) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token("get"),
            name,
            CodeRep::paren(CodeRep::empty()),
            CodeRep::brace(body),
        ])
    }

    fn reduce_setter(&mut self, _node: &Setter, name: CodeRep, param: CodeRep, body: CodeRep) -> CodeRep {
        CodeRep::seq(vec![CodeRep::token("set"), name, CodeRep::paren(param), CodeRep::brace(body)])
    }

    // === Properties ===

    fn reduce_computed_property_name(&mut self, node: &ComputedPropertyName, expression: CodeRep) -> CodeRep {
        CodeRep::bracket(p(&node.expression, Precedence::Assignment, expression))
    }

    fn reduce_static_property_name(&mut self, node: &StaticPropertyName) -> CodeRep {
        let value = &node.value;
        if is_identifier_name(value) {
            return CodeRep::token(self.text(value));
        }
        if let Ok(n) = value.parse::<f64>() {
            if n >= 0.0 && n.is_finite() && d2a(n) == *value {
                return CodeRep::number(n);
            }
        }
        self.string_literal(value)
    }

    fn reduce_data_property(&mut self, node: &DataProperty, name: CodeRep, expression: CodeRep) -> CodeRep {
        CodeRep::seq(vec![
            name,
            CodeRep::token(":"),
            p(&node.expression, Precedence::Assignment, expression),
        ])
    }

    fn reduce_shorthand_property(&mut self, _node: &ShorthandProperty, name: CodeRep) -> CodeRep {
        name.with_flags(Flags::empty())
    }

    // === Bindings ===

    fn reduce_binding_identifier(&mut self, node: &BindingIdentifier) -> CodeRep {
        self.identifier(&node.name)
    }

    fn reduce_binding_with_default(&mut self, node: &BindingWithDefault, binding: CodeRep, init: CodeRep) -> CodeRep {
        with_default(binding, &node.init, init)
    }

    fn reduce_array_binding(&mut self, _node: &ArrayBinding, elements: Vec<Option<CodeRep>>, rest: Option<CodeRep>) -> CodeRep {
        array_elements(elements, rest)
    }

    fn reduce_object_binding(&mut self, _node: &ObjectBinding, properties: Vec<CodeRep>) -> CodeRep {
        CodeRep::brace(CodeRep::comma_sep(properties))
    }

    fn reduce_binding_property_identifier(&mut self, node: &BindingPropertyIdentifier, binding: CodeRep, init: Option<CodeRep>) -> CodeRep {
        optional_default(binding, node.init.as_deref(), init)
    }

    fn reduce_binding_property_property(&mut self, _node: &BindingPropertyProperty, name: CodeRep, binding: CodeRep) -> CodeRep {
        CodeRep::seq(vec![name, CodeRep::token(":"), binding])
    }

    // === Assignment targets ===

    fn reduce_assignment_target_identifier(&mut self, node: &AssignmentTargetIdentifier) -> CodeRep {
        self.identifier(&node.name)
    }

    fn reduce_static_member_assignment_target(&mut self, node: &StaticMemberAssignmentTarget, object: CodeRep) -> CodeRep {
        self.static_member(&node.object, object, &node.property)
    }

    fn reduce_computed_member_assignment_target(&mut self, node: &ComputedMemberAssignmentTarget, object: CodeRep, expression: CodeRep) -> CodeRep {
        computed_member(&node.object, object, expression)
    }

    fn reduce_array_assignment_target(&mut self, _node: &ArrayAssignmentTarget, elements: Vec<Option<CodeRep>>, rest: Option<CodeRep>) -> CodeRep {
        array_elements(elements, rest)
    }

    fn reduce_object_assignment_target(&mut self, _node: &ObjectAssignmentTarget, properties: Vec<CodeRep>) -> CodeRep {
        CodeRep::brace(CodeRep::comma_sep(properties)).with_flags(Flags::STARTS_WITH_OBJECT_CURLY)
    }

    fn reduce_assignment_target_with_default(&mut self, node: &AssignmentTargetWithDefault, binding: CodeRep, init: CodeRep) -> CodeRep {
        with_default(binding, &node.init, init)
    }

    fn reduce_assignment_target_property_identifier(&mut self, node: &AssignmentTargetPropertyIdentifier, binding: CodeRep, init: Option<CodeRep>) -> CodeRep {
        optional_default(binding, node.init.as_deref(), init)
    }

    fn reduce_assignment_target_property_property(&mut self, _node: &AssignmentTargetPropertyProperty, name: CodeRep, binding: CodeRep) -> CodeRep {
        CodeRep::seq(vec![name, CodeRep::token(":"), binding])
    }

    // === Statements ===

    fn reduce_block(&mut self, _node: &Block, statements: Vec<CodeRep>) -> CodeRep {
        block(statements)
    }

    fn reduce_block_statement(&mut self, _node: &BlockStatement, block: CodeRep) -> CodeRep {
        block
    }

    fn reduce_break_statement(&mut self, node: &BreakStatement) -> CodeRep {
        jump("break", node.label.as_deref().map(|l| self.text(l)))
    }

    fn reduce_continue_statement(&mut self, node: &ContinueStatement) -> CodeRep {
        jump("continue", node.label.as_deref().map(|l| self.text(l)))
    }

    fn reduce_debugger_statement(&mut self, _node: &DebuggerStatement) -> CodeRep {
        CodeRep::seq(vec![CodeRep::token("debugger"), CodeRep::semi_op()])
    }

    fn reduce_do_while_statement(&mut self, _node: &DoWhileStatement, body: CodeRep, test: CodeRep) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token("do"),
            body,
            CodeRep::token("while"),
            CodeRep::paren(test),
            CodeRep::semi_op(),
        ])
    }

    fn reduce_empty_statement(&mut self, _node: &EmptyStatement) -> CodeRep {
        CodeRep::semi()
    }

    fn reduce_expression_statement(&mut self, node: &ExpressionStatement, expression: CodeRep) -> CodeRep {
        if matches!(node.expression, Expression::LiteralStringExpression(_)) {
            return CodeRep::string_statement(expression);
        }
        let hazards = Flags::STARTS_WITH_OBJECT_CURLY
            | Flags::STARTS_WITH_LET_SQUARE_BRACKET
            | Flags::STARTS_WITH_FUNCTION_OR_CLASS;
        let expression = if expression.flags.intersects(hazards) {
            CodeRep::paren(expression)
        } else {
            expression
        };
        CodeRep::seq(vec![expression, CodeRep::semi_op()])
    }

    fn reduce_for_in_statement(&mut self, node: &ForInStatement, left: CodeRep, right: CodeRep, body: CodeRep) -> CodeRep {
        let left = match node.left {
            ForInOfLeft::VariableDeclaration(_) => CodeRep::no_in(CodeRep::test_in(left)),
            ForInOfLeft::AssignmentTarget(_) if left.has(Flags::STARTS_WITH_LET) => CodeRep::paren(left),
            ForInOfLeft::AssignmentTarget(_) => left,
        };
        let flags = missing_else(&body);
        CodeRep::seq(vec![
            CodeRep::token("for"),
            CodeRep::paren(CodeRep::seq(vec![left, CodeRep::token("in"), right])),
            body,
        ])
        .with_flags(flags)
    }

    fn reduce_for_of_statement(&mut self, node: &ForOfStatement, left: CodeRep, right: CodeRep, body: CodeRep) -> CodeRep {
        let left = match node.left {
            ForInOfLeft::AssignmentTarget(_) if left.has(Flags::STARTS_WITH_LET) => CodeRep::paren(left),
            _ => left,
        };
        let right = p(&node.right, Precedence::Assignment, right);
        let flags = missing_else(&body);
        CodeRep::seq(vec![
            CodeRep::token("for"),
            CodeRep::paren(CodeRep::seq(vec![left, CodeRep::token("of"), right])),
            body,
        ])
        .with_flags(flags)
    }

    fn reduce_for_statement(
        &mut self,
        _node: &ForStatement,
        init: Option<CodeRep>,
        test: Option<CodeRep>,
        update: Option<CodeRep>,
        body: CodeRep,
    ) -> CodeRep {
        let init = init.map_or_else(CodeRep::empty, |init| {
            // `for(let[a]=b;;)` would declare a pattern.
            let init = if init.has(Flags::STARTS_WITH_LET_SQUARE_BRACKET) {
                CodeRep::paren(init)
            } else {
                init
            };
            CodeRep::no_in(CodeRep::test_in(init))
        });
        let flags = missing_else(&body);
        CodeRep::seq(vec![
            CodeRep::token("for"),
            CodeRep::paren(CodeRep::seq(vec![
                init,
                CodeRep::semi(),
                test.unwrap_or_else(CodeRep::empty),
                CodeRep::semi(),
                update.unwrap_or_else(CodeRep::empty),
            ])),
            body,
        ])
        .with_flags(flags)
    }

    fn reduce_if_statement(&mut self, _node: &IfStatement, test: CodeRep, consequent: CodeRep, alternate: Option<CodeRep>) -> CodeRep {
        let head = [CodeRep::token("if"), CodeRep::paren(test)];
        match alternate {
            Some(alternate) => {
                let consequent = if consequent.has(Flags::ENDS_WITH_MISSING_ELSE) {
                    block(vec![consequent])
                } else {
                    consequent
                };
                let flags = missing_else(&alternate);
                CodeRep::seq(head.into_iter().chain([consequent, CodeRep::token("else"), alternate]).collect())
                    .with_flags(flags)
            }
            None => CodeRep::seq(head.into_iter().chain([consequent]).collect())
                .with_flags(Flags::ENDS_WITH_MISSING_ELSE),
        }
    }

    fn reduce_labeled_statement(&mut self, node: &LabeledStatement, body: CodeRep) -> CodeRep {
        let flags = missing_else(&body);
        CodeRep::seq(vec![CodeRep::token(self.text(&node.label)), CodeRep::token(":"), body]).with_flags(flags)
    }

    fn reduce_return_statement(&mut self, _node: &ReturnStatement, expression: Option<CodeRep>) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token("return"),
            expression.unwrap_or_else(CodeRep::empty),
            CodeRep::semi_op(),
        ])
    }

    fn reduce_switch_statement(&mut self, _node: &SwitchStatement, discriminant: CodeRep, cases: Vec<CodeRep>) -> CodeRep {
        CodeRep::seq(vec![CodeRep::token("switch"), CodeRep::paren(discriminant), block(cases)])
    }

    fn reduce_switch_statement_with_default(
        &mut self,
        _node: &SwitchStatementWithDefault,
        discriminant: CodeRep,
        pre_default_cases: Vec<CodeRep>,
        default_case: CodeRep,
        post_default_cases: Vec<CodeRep>,
    ) -> CodeRep {
        let cases = pre_default_cases
            .into_iter()
            .chain(std::iter::once(default_case))
            .chain(post_default_cases)
            .collect();
        CodeRep::seq(vec![CodeRep::token("switch"), CodeRep::paren(discriminant), block(cases)])
    }

    fn reduce_switch_case(&mut self, _node: &SwitchCase, test: CodeRep, consequent: Vec<CodeRep>) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token("case"),
            test,
            CodeRep::token(":"),
            CodeRep::indent(lines(consequent)),
        ])
    }

    fn reduce_switch_default(&mut self, _node: &SwitchDefault, consequent: Vec<CodeRep>) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token("default"),
            CodeRep::token(":"),
            CodeRep::indent(lines(consequent)),
        ])
    }

    fn reduce_throw_statement(&mut self, _node: &ThrowStatement, expression: CodeRep) -> CodeRep {
        CodeRep::seq(vec![CodeRep::token("throw"), expression, CodeRep::semi_op()])
    }

    fn reduce_try_catch_statement(&mut self, _node: &TryCatchStatement, body: CodeRep, catch_clause: CodeRep) -> CodeRep {
        CodeRep::seq(vec![CodeRep::token("try"), body, catch_clause])
    }

    fn reduce_try_finally_statement(&mut self, _node: &TryFinallyStatement, body: CodeRep, catch_clause: Option<CodeRep>, finalizer: CodeRep) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token("try"),
            body,
            catch_clause.unwrap_or_else(CodeRep::empty),
            CodeRep::token("finally"),
            finalizer,
        ])
    }

    fn reduce_catch_clause(&mut self, _node: &CatchClause, binding: CodeRep, body: CodeRep) -> CodeRep {
        CodeRep::seq(vec![CodeRep::token("catch"), CodeRep::paren(binding), body])
    }

    fn reduce_variable_declaration_statement(&mut self, _node: &VariableDeclarationStatement, declaration: CodeRep) -> CodeRep {
        CodeRep::seq(vec![declaration, CodeRep::semi_op()])
    }

    fn reduce_variable_declaration(&mut self, node: &VariableDeclaration, declarators: Vec<CodeRep>) -> CodeRep {
        CodeRep::seq(vec![CodeRep::token(node.kind.name()), CodeRep::comma_sep(declarators)])
    }

    fn reduce_variable_declarator(&mut self, _node: &VariableDeclarator, binding: CodeRep, init: Option<CodeRep>) -> CodeRep {
        let init = init.map(|init| {
            if init.has(Flags::CONTAINS_GROUP) {
                CodeRep::paren(init)
            } else {
                CodeRep::test_in(init)
            }
        });
        CodeRep::init(binding, init)
    }

    fn reduce_while_statement(&mut self, _node: &WhileStatement, test: CodeRep, body: CodeRep) -> CodeRep {
        let flags = missing_else(&body);
        CodeRep::seq(vec![CodeRep::token("while"), CodeRep::paren(test), body]).with_flags(flags)
    }

    fn reduce_with_statement(&mut self, _node: &WithStatement, object: CodeRep, body: CodeRep) -> CodeRep {
        let flags = missing_else(&body);
        CodeRep::seq(vec![CodeRep::token("with"), CodeRep::paren(object), body]).with_flags(flags)
    }

    // === Expressions ===

    fn reduce_array_expression(&mut self, node: &ArrayExpression, elements: Vec<Option<CodeRep>>) -> CodeRep {
        let elements = node
            .elements
            .iter()
            .zip(elements)
            .map(|(element, rep)| match (element, rep) {
                (Some(element), Some(rep)) => Some(argument(element, rep)),
                _ => None,
            })
            .collect();
        array_elements(elements, None)
    }

    fn reduce_assignment_expression(&mut self, node: &AssignmentExpression, binding: CodeRep, expression: CodeRep) -> CodeRep {
        assignment(binding, "=", &node.expression, expression)
    }

    fn reduce_compound_assignment_expression(&mut self, node: &CompoundAssignmentExpression, binding: CodeRep, expression: CodeRep) -> CodeRep {
        assignment(binding, node.operator.name(), &node.expression, expression)
    }

    fn reduce_await_expression(&mut self, node: &AwaitExpression, expression: CodeRep) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token("await"),
            p(&node.expression, Precedence::Prefix, expression),
        ])
    }

    fn reduce_binary_expression(&mut self, node: &BinaryExpression, left: CodeRep, right: CodeRep) -> CodeRep {
        let op = node.operator;
        let precedence = op.precedence();
        let left_precedence = node.left.precedence();
        let right_precedence = node.right.precedence();

        let left_needs_paren = if op.is_right_associative() {
            // `-a ** b` is a syntax error; the operand must be grouped.
            left_precedence <= precedence
                || matches!(*node.left, Expression::UnaryExpression(_) | Expression::AwaitExpression(_))
        } else {
            left_precedence < precedence
        };
        let right_needs_paren = if op.is_right_associative() {
            right_precedence < precedence
        } else {
            right_precedence <= precedence
        };

        let left = if left_needs_paren { CodeRep::paren(left) } else { left };
        let right = if right_needs_paren { CodeRep::paren(right) } else { right };

        let mut flags = left.leading() | ((left.flags | right.flags) & Flags::CONTAINS_IN);
        if op == BinaryOperator::In {
            flags |= Flags::CONTAINS_IN;
        }
        let rep = if op == BinaryOperator::Sequence {
            flags |= Flags::CONTAINS_GROUP;
            CodeRep::comma_sep(vec![left, right])
        } else {
            CodeRep::seq(vec![left, CodeRep::operator(op.name()), right])
        };
        rep.with_flags(flags)
    }

    fn reduce_call_expression(&mut self, node: &CallExpression, callee: CodeRep, arguments_rep: Vec<CodeRep>) -> CodeRep {
        let callee = p_object(&node.callee, Precedence::Call, callee);
        let flags = callee.leading();
        CodeRep::seq(vec![callee, arguments(&node.arguments, arguments_rep)]).with_flags(flags)
    }

    fn reduce_computed_member_expression(&mut self, node: &ComputedMemberExpression, object: CodeRep, expression: CodeRep) -> CodeRep {
        computed_member(&node.object, object, expression)
    }

    fn reduce_conditional_expression(&mut self, node: &ConditionalExpression, test: CodeRep, consequent: CodeRep, alternate: CodeRep) -> CodeRep {
        let test = p(&node.test, Precedence::LogicalOr, test);
        let consequent = p(&node.consequent, Precedence::Assignment, consequent);
        let alternate = p(&node.alternate, Precedence::Assignment, alternate);
        // The consequent always admits `in`; only the outer operands matter.
        let flags = test.leading() | ((test.flags | alternate.flags) & Flags::CONTAINS_IN);
        CodeRep::seq(vec![
            test,
            CodeRep::operator("?"),
            consequent,
            CodeRep::operator(":"),
            alternate,
        ])
        .with_flags(flags)
    }

    fn reduce_identifier_expression(&mut self, node: &IdentifierExpression) -> CodeRep {
        self.identifier(&node.name)
    }

    fn reduce_literal_boolean_expression(&mut self, node: &LiteralBooleanExpression) -> CodeRep {
        CodeRep::token(if node.value { "true" } else { "false" })
    }

    fn reduce_literal_infinity_expression(&mut self, _node: &LiteralInfinityExpression) -> CodeRep {
        CodeRep::number(f64::INFINITY)
    }

    fn reduce_literal_null_expression(&mut self, _node: &LiteralNullExpression) -> CodeRep {
        CodeRep::token("null")
    }

    fn reduce_literal_numeric_expression(&mut self, node: &LiteralNumericExpression) -> CodeRep {
        CodeRep::number(node.value)
    }

    fn reduce_literal_reg_exp_expression(&mut self, node: &LiteralRegExpExpression) -> CodeRep {
        if self.options.web_safe {
            let body = format!("{}/", node.pattern);
            if web_safe(&body) != body {
                self.fail(CodegenError::UnsafeRegExp { pattern: node.pattern.clone() });
            }
        }
        CodeRep::token(format!("/{}/{}", node.pattern, node.flags()))
    }

    fn reduce_literal_string_expression(&mut self, node: &LiteralStringExpression) -> CodeRep {
        self.string_literal(&node.value)
    }

    fn reduce_new_expression(&mut self, node: &NewExpression, callee: CodeRep, arguments_rep: Vec<CodeRep>) -> CodeRep {
        // `new (f())()` would otherwise call the result of `new f`.
        let callee = if node.callee.precedence() == Precedence::Call {
            CodeRep::paren(callee)
        } else {
            let precedence = if node.arguments.is_empty() {
                Precedence::New
            } else {
                Precedence::Member
            };
            p(&node.callee, precedence, callee)
        };
        let args = if node.arguments.is_empty() {
            CodeRep::empty()
        } else {
            arguments(&node.arguments, arguments_rep)
        };
        CodeRep::seq(vec![CodeRep::token("new"), callee, args])
    }

    fn reduce_new_target_expression(&mut self, _node: &NewTargetExpression) -> CodeRep {
        CodeRep::seq(vec![CodeRep::token("new"), CodeRep::token("."), CodeRep::token("target")])
    }

    fn reduce_object_expression(&mut self, _node: &ObjectExpression, properties: Vec<CodeRep>) -> CodeRep {
        CodeRep::brace(CodeRep::comma_sep(properties)).with_flags(Flags::STARTS_WITH_OBJECT_CURLY)
    }

    fn reduce_spread_element(&mut self, node: &SpreadElement, expression: CodeRep) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token("..."),
            p(&node.expression, Precedence::Assignment, expression),
        ])
    }

    fn reduce_static_member_expression(&mut self, node: &StaticMemberExpression, object: CodeRep) -> CodeRep {
        self.static_member(&node.object, object, &node.property)
    }

    fn reduce_super(&mut self, _node: &Super) -> CodeRep {
        CodeRep::token("super")
    }

    fn reduce_template_expression(&mut self, node: &TemplateExpression, tag: Option<CodeRep>, elements: Vec<CodeRep>) -> CodeRep {
        let mut parts = Vec::with_capacity(elements.len() + 3);
        let mut flags = Flags::empty();
        if let (Some(tag_node), Some(tag)) = (&node.tag, tag) {
            let precedence = if tag_node.precedence() == Precedence::Call {
                Precedence::Call
            } else {
                Precedence::Member
            };
            let tag = p(tag_node, precedence, tag);
            flags = tag.leading();
            parts.push(tag);
        }
        let tagged = node.tag.is_some();
        parts.push(CodeRep::token("`"));
        for (item, rep) in node.elements.iter().zip(elements) {
            match item {
                TemplateItem::TemplateElement(_) => parts.push(self.template_text(tagged, rep)),
                TemplateItem::Expression(_) => {
                    parts.push(CodeRep::token("${"));
                    parts.push(rep);
                    parts.push(CodeRep::token("}"));
                }
            }
        }
        parts.push(CodeRep::token("`"));
        CodeRep::seq(parts).with_flags(flags)
    }

    fn reduce_template_element(&mut self, node: &TemplateElement) -> CodeRep {
        CodeRep::raw(node.raw_value.clone())
    }

    fn reduce_this_expression(&mut self, _node: &ThisExpression) -> CodeRep {
        CodeRep::token("this")
    }

    fn reduce_unary_expression(&mut self, node: &UnaryExpression, operand: CodeRep) -> CodeRep {
        CodeRep::seq(vec![
            CodeRep::token(node.operator.name()),
            p(&node.operand, Precedence::Prefix, operand),
        ])
    }

    fn reduce_update_expression(&mut self, node: &UpdateExpression, operand: CodeRep) -> CodeRep {
        let op = CodeRep::token(node.operator.name());
        if node.is_prefix {
            CodeRep::seq(vec![op, operand])
        } else {
            let flags = operand.leading();
            CodeRep::seq(vec![operand, op]).with_flags(flags)
        }
    }

    fn reduce_yield_expression(&mut self, node: &YieldExpression, expression: Option<CodeRep>) -> CodeRep {
        match (&node.expression, expression) {
            (Some(node), Some(expression)) => {
                let expression = p(node, Precedence::Assignment, expression);
                let flags = expression.flags & Flags::CONTAINS_IN;
                CodeRep::seq(vec![CodeRep::token("yield"), expression]).with_flags(flags)
            }
            _ => CodeRep::token("yield"),
        }
    }

    fn reduce_yield_generator_expression(&mut self, node: &YieldGeneratorExpression, expression: CodeRep) -> CodeRep {
        let expression = p(&node.expression, Precedence::Assignment, expression);
        let flags = expression.flags & Flags::CONTAINS_IN;
        CodeRep::seq(vec![CodeRep::token("yield"), CodeRep::token("*"), expression]).with_flags(flags)
    }
}

fn jump(keyword: &str, label: Option<String>) -> CodeRep {
    CodeRep::seq(vec![
        CodeRep::token(keyword),
        label.map_or_else(CodeRep::empty, CodeRep::token),
        CodeRep::semi_op(),
    ])
}

fn computed_member(object_node: &ExpressionSuper, object: CodeRep, expression: CodeRep) -> CodeRep {
    let object = p_object(object_node, object_node.member_precedence(), object);
    let mut flags = object.leading();
    let is_let = matches!(object_node, ExpressionSuper::Expression(e) if e.is_identifier("let"));
    if is_let || object.has(Flags::STARTS_WITH_LET_SQUARE_BRACKET) {
        flags |= Flags::STARTS_WITH_LET_SQUARE_BRACKET;
    }
    CodeRep::seq(vec![object, CodeRep::bracket(expression)]).with_flags(flags)
}

fn assignment(binding: CodeRep, op: &str, rhs_node: &Expression, rhs: CodeRep) -> CodeRep {
    let rhs = p(rhs_node, Precedence::Assignment, rhs);
    let flags = binding.leading() | (rhs.flags & Flags::CONTAINS_IN);
    CodeRep::seq(vec![binding, CodeRep::operator(op), rhs]).with_flags(flags)
}

/// Render `program` in compact form.
pub fn codegen(program: &Program) -> String {
    let mut generator = Codegen::default();
    let rep = fold_program(&mut generator, program);
    generator.emit(&rep)
}

/// Render `program` with `options`. Fails only in web-safe mode.
pub fn codegen_with(program: &Program, options: &CodegenOptions) -> Result<String, CodegenError> {
    Codegen::new(options.clone()).generate(program)
}

/// Render a lone expression in compact form.
pub fn codegen_expression(expression: &Expression) -> String {
    let mut generator = Codegen::default();
    let rep = fold_expression(&mut generator, expression);
    generator.emit(&rep)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expression {
        Expression::IdentifierExpression(IdentifierExpression { name: name.to_string() })
    }

    fn string(value: &str) -> Expression {
        Expression::LiteralStringExpression(LiteralStringExpression { value: value.to_string() })
    }

    fn script(statements: Vec<Statement>) -> Program {
        Program::Script(Script {
            directives: vec![],
            statements,
        })
    }

    fn expression_statement(expression: Expression) -> Statement {
        Statement::ExpressionStatement(ExpressionStatement { expression })
    }

    #[test]
    fn test_options_defaults() {
        let options = CodegenOptions::default();
        assert!(!options.pretty);
        assert_eq!(options.indent, 2);
        assert!(options.hex_large_integers);
        assert!(!options.web_safe);
    }

    #[test]
    fn test_options_deserialize_partial() {
        let options: CodegenOptions = serde_json::from_str(r#"{"pretty": true, "webSafe": true}"#).unwrap();
        assert!(options.pretty);
        assert!(options.web_safe);
        assert_eq!(options.indent, 2);
        assert!(options.hex_large_integers);
    }

    #[test]
    fn test_options_builders() {
        let options = CodegenOptions::default()
            .with_pretty(true)
            .with_indent(4)
            .with_hex_large_integers(false)
            .with_web_safe(true);
        assert_eq!(
            options,
            CodegenOptions {
                pretty: true,
                indent: 4,
                hex_large_integers: false,
                web_safe: true,
            }
        );
    }

    #[test]
    fn test_string_statement_in_directive_position() {
        let program = script(vec![expression_statement(string("a")), expression_statement(string("b"))]);
        assert_eq!(codegen(&program), "(\"a\");\"b\"");
    }

    #[test]
    fn test_let_identifier_flags() {
        let generator = Codegen::default();
        assert!(generator.identifier("let").has(Flags::STARTS_WITH_LET));
        assert!(!generator.identifier("lets").has(Flags::STARTS_WITH_LET));
    }

    #[test]
    fn test_error_messages() {
        let err = CodegenError::UnsafeRegExp {
            pattern: "</script>".to_string(),
        };
        assert!(err.to_string().contains("/</script>/"));
    }

    #[test]
    fn test_first_error_is_kept() {
        let mut generator = Codegen::new(CodegenOptions::default().with_web_safe(true));
        generator.fail(CodegenError::UnsafeTemplate { raw: "a".to_string() });
        generator.fail(CodegenError::UnsafeTemplate { raw: "b".to_string() });
        assert_eq!(generator.error, Some(CodegenError::UnsafeTemplate { raw: "a".to_string() }));
    }

    #[test]
    fn test_expression_entry_point() {
        let mut generator = Codegen::default();
        assert_eq!(generator.generate_expression(&ident("a")).unwrap(), "a");
        assert_eq!(codegen_expression(&ident("b")), "b");
    }
}
