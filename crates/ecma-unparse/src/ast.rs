//! AST node catalog for ECMAScript 2017 programs.
//!
//! One struct per node shape, grouped into category enums. The shapes follow
//! the Shift AST interchange format, so a tree produced by any Shift-compatible
//! parser deserializes directly into these types: every JSON object carries a
//! `"type"` discriminator and camelCase field names.
//!
//! Category enums are internally tagged on `"type"`. Unions that mix a
//! category with a standalone shape (for example `Expression | SpreadElement`)
//! are untagged, trying the tagged category first. The standalone arm of
//! such a union still checks its own `"type"`, so an unknown or misspelled
//! node is an error rather than a match on field shape alone.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;

use crate::operators::{
    BinaryOperator, CompoundAssignmentOperator, Precedence, UnaryOperator, UpdateOperator,
};

// =============================================================================
// Tag-checked union arms
// =============================================================================

/// Deserialize a standalone node, requiring `"type"` to equal `tag`.
fn tag_checked<'de, D, T>(deserializer: D, tag: &str) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value.get("type").and_then(serde_json::Value::as_str) {
        Some(found) if found == tag => {}
        Some(found) => {
            return Err(de::Error::custom(format_args!("unknown node type `{found}`, expected `{tag}`")));
        }
        None => return Err(de::Error::custom(format_args!("missing node type, expected `{tag}`"))),
    }
    T::deserialize(value).map_err(de::Error::custom)
}

macro_rules! tag_checked_arms {
    ($($name:ident => $ty:ident),* $(,)?) => {
        $(
            fn $name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<$ty, D::Error> {
                tag_checked(deserializer, stringify!($ty))
            }
        )*
    };
}

tag_checked_arms! {
    super_arm => Super,
    spread_element_arm => SpreadElement,
    template_element_arm => TemplateElement,
    function_body_arm => FunctionBody,
    function_declaration_arm => FunctionDeclaration,
    class_declaration_arm => ClassDeclaration,
    binding_with_default_arm => BindingWithDefault,
    assignment_target_with_default_arm => AssignmentTargetWithDefault,
    variable_declaration_arm => VariableDeclaration,
}

// =============================================================================
// Programs
// =============================================================================

/// Root of a tree: a script or a module.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Program {
    Script(Script),
    Module(Module),
}

impl Program {
    /// Deserialize a program from Shift JSON.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    /// Number of top-level statements or module items.
    pub fn len(&self) -> usize {
        match self {
            Program::Script(script) => script.statements.len(),
            Program::Module(module) => module.items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub directives: Vec<Directive>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub directives: Vec<Directive>,
    pub items: Vec<ModuleItem>,
}

/// A directive prologue entry such as `"use strict"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directive {
    /// Source text between the quotes, escapes included.
    pub raw_value: String,
}

/// Top-level module entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModuleItem {
    ImportDeclaration(ImportDeclaration),
    ExportDeclaration(ExportDeclaration),
    Statement(Statement),
}

// =============================================================================
// Modules
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ImportDeclaration {
    Import(Import),
    ImportNamespace(ImportNamespace),
}

/// `import a, { b as c } from "m"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Import {
    pub default_binding: Option<BindingIdentifier>,
    pub named_imports: Vec<ImportSpecifier>,
    pub module_specifier: String,
}

/// `import a, * as ns from "m"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportNamespace {
    pub default_binding: Option<BindingIdentifier>,
    pub namespace_binding: BindingIdentifier,
    pub module_specifier: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpecifier {
    /// Imported name when it differs from the local binding.
    pub name: Option<String>,
    pub binding: BindingIdentifier,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ExportDeclaration {
    ExportAllFrom(ExportAllFrom),
    ExportFrom(ExportFrom),
    ExportLocals(ExportLocals),
    Export(Export),
    ExportDefault(ExportDefault),
}

/// `export * from "m"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportAllFrom {
    pub module_specifier: String,
}

/// `export { a as b } from "m"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFrom {
    pub named_exports: Vec<ExportFromSpecifier>,
    pub module_specifier: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFromSpecifier {
    pub name: String,
    pub exported_name: Option<String>,
}

/// `export { a as b }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLocals {
    pub named_exports: Vec<ExportLocalSpecifier>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLocalSpecifier {
    pub name: IdentifierExpression,
    pub exported_name: Option<String>,
}

/// `export <declaration>`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    pub declaration: ExportableDeclaration,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ExportableDeclaration {
    FunctionDeclaration(FunctionDeclaration),
    ClassDeclaration(ClassDeclaration),
    VariableDeclaration(VariableDeclaration),
}

/// `export default <body>`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDefault {
    pub body: ExportDefaultBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExportDefaultBody {
    Expression(Expression),
    #[serde(deserialize_with = "function_declaration_arm")]
    FunctionDeclaration(FunctionDeclaration),
    #[serde(deserialize_with = "class_declaration_arm")]
    ClassDeclaration(ClassDeclaration),
}

// =============================================================================
// Functions and classes
// =============================================================================

/// Name used by `export default function () {}` for the anonymous binding.
pub const DEFAULT_EXPORT_NAME: &str = "*default*";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeclaration {
    pub is_async: bool,
    pub is_generator: bool,
    pub name: BindingIdentifier,
    pub params: FormalParameters,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormalParameters {
    pub items: Vec<Parameter>,
    pub rest: Option<Binding>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Parameter {
    Binding(Binding),
    #[serde(deserialize_with = "binding_with_default_arm")]
    BindingWithDefault(BindingWithDefault),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionBody {
    pub directives: Vec<Directive>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDeclaration {
    pub name: BindingIdentifier,
    #[serde(rename = "super")]
    pub super_class: Option<Expression>,
    pub elements: Vec<ClassElement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassElement {
    pub is_static: bool,
    pub method: MethodDefinition,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum MethodDefinition {
    Method(Method),
    Getter(Getter),
    Setter(Setter),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub is_async: bool,
    pub is_generator: bool,
    pub name: PropertyName,
    pub params: FormalParameters,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Getter {
    pub name: PropertyName,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setter {
    pub name: PropertyName,
    pub param: Parameter,
    pub body: FunctionBody,
}

// =============================================================================
// Properties
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum PropertyName {
    ComputedPropertyName(ComputedPropertyName),
    StaticPropertyName(StaticPropertyName),
}

/// `[expression]` in property position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedPropertyName {
    pub expression: Box<Expression>,
}

/// A literal property name; rendered bare, as a number, or quoted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPropertyName {
    pub value: String,
}

/// Members of an object literal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectProperty {
    DataProperty(DataProperty),
    ShorthandProperty(ShorthandProperty),
    Method(Method),
    Getter(Getter),
    Setter(Setter),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProperty {
    pub name: PropertyName,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShorthandProperty {
    pub name: IdentifierExpression,
}

// =============================================================================
// Bindings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Binding {
    BindingIdentifier(BindingIdentifier),
    ArrayBinding(ArrayBinding),
    ObjectBinding(ObjectBinding),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingIdentifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingWithDefault {
    pub binding: Binding,
    pub init: Box<Expression>,
}

/// `[a, , b = 1, ...rest]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayBinding {
    pub elements: Vec<Option<Parameter>>,
    pub rest: Option<Box<Binding>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectBinding {
    pub properties: Vec<BindingProperty>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BindingProperty {
    BindingPropertyIdentifier(BindingPropertyIdentifier),
    BindingPropertyProperty(BindingPropertyProperty),
}

/// `{ a = 1 }` in a binding pattern.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingPropertyIdentifier {
    pub binding: BindingIdentifier,
    pub init: Option<Box<Expression>>,
}

/// `{ a: b }` in a binding pattern.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingPropertyProperty {
    pub name: PropertyName,
    pub binding: Parameter,
}

// =============================================================================
// Assignment targets
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum AssignmentTarget {
    AssignmentTargetIdentifier(AssignmentTargetIdentifier),
    StaticMemberAssignmentTarget(StaticMemberAssignmentTarget),
    ComputedMemberAssignmentTarget(ComputedMemberAssignmentTarget),
    ArrayAssignmentTarget(ArrayAssignmentTarget),
    ObjectAssignmentTarget(ObjectAssignmentTarget),
}

/// Targets valid for compound assignment and update expressions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum SimpleAssignmentTarget {
    AssignmentTargetIdentifier(AssignmentTargetIdentifier),
    StaticMemberAssignmentTarget(StaticMemberAssignmentTarget),
    ComputedMemberAssignmentTarget(ComputedMemberAssignmentTarget),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentTargetIdentifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticMemberAssignmentTarget {
    pub object: Box<ExpressionSuper>,
    pub property: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedMemberAssignmentTarget {
    pub object: Box<ExpressionSuper>,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayAssignmentTarget {
    pub elements: Vec<Option<AssignmentTargetMaybeDefault>>,
    pub rest: Option<Box<AssignmentTarget>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAssignmentTarget {
    pub properties: Vec<AssignmentTargetProperty>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AssignmentTargetMaybeDefault {
    AssignmentTarget(AssignmentTarget),
    #[serde(deserialize_with = "assignment_target_with_default_arm")]
    AssignmentTargetWithDefault(AssignmentTargetWithDefault),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentTargetWithDefault {
    pub binding: AssignmentTarget,
    pub init: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum AssignmentTargetProperty {
    AssignmentTargetPropertyIdentifier(AssignmentTargetPropertyIdentifier),
    AssignmentTargetPropertyProperty(AssignmentTargetPropertyProperty),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentTargetPropertyIdentifier {
    pub binding: AssignmentTargetIdentifier,
    pub init: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentTargetPropertyProperty {
    pub name: PropertyName,
    pub binding: AssignmentTargetMaybeDefault,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    BlockStatement(BlockStatement),
    BreakStatement(BreakStatement),
    ContinueStatement(ContinueStatement),
    DebuggerStatement(DebuggerStatement),
    DoWhileStatement(DoWhileStatement),
    EmptyStatement(EmptyStatement),
    ExpressionStatement(ExpressionStatement),
    ForInStatement(ForInStatement),
    ForOfStatement(ForOfStatement),
    ForStatement(ForStatement),
    IfStatement(IfStatement),
    LabeledStatement(LabeledStatement),
    ReturnStatement(ReturnStatement),
    SwitchStatement(SwitchStatement),
    SwitchStatementWithDefault(SwitchStatementWithDefault),
    ThrowStatement(ThrowStatement),
    TryCatchStatement(TryCatchStatement),
    TryFinallyStatement(TryFinallyStatement),
    VariableDeclarationStatement(VariableDeclarationStatement),
    WhileStatement(WhileStatement),
    WithStatement(WithStatement),
    FunctionDeclaration(FunctionDeclaration),
    ClassDeclaration(ClassDeclaration),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStatement {
    pub block: Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakStatement {
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueStatement {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DebuggerStatement {}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoWhileStatement {
    pub body: Box<Statement>,
    pub test: Expression,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmptyStatement {}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionStatement {
    pub expression: Expression,
}

/// Left side of `for (left in right)` and `for (left of right)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ForInOfLeft {
    AssignmentTarget(AssignmentTarget),
    #[serde(deserialize_with = "variable_declaration_arm")]
    VariableDeclaration(VariableDeclaration),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForInStatement {
    pub left: ForInOfLeft,
    pub right: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForOfStatement {
    pub left: ForInOfLeft,
    pub right: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ForInit {
    Expression(Expression),
    #[serde(deserialize_with = "variable_declaration_arm")]
    VariableDeclaration(VariableDeclaration),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForStatement {
    pub init: Option<ForInit>,
    pub test: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Box<Statement>,
    pub alternate: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledStatement {
    pub label: String,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnStatement {
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchStatement {
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchStatementWithDefault {
    pub discriminant: Expression,
    pub pre_default_cases: Vec<SwitchCase>,
    pub default_case: SwitchDefault,
    pub post_default_cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchCase {
    pub test: Expression,
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchDefault {
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrowStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryCatchStatement {
    pub body: Block,
    pub catch_clause: CatchClause,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryFinallyStatement {
    pub body: Block,
    pub catch_clause: Option<CatchClause>,
    pub finalizer: Block,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchClause {
    pub binding: Binding,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclarationStatement {
    pub declaration: VariableDeclaration,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclaration {
    pub kind: VariableDeclarationKind,
    pub declarators: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableDeclarationKind {
    Var,
    Let,
    Const,
}

impl VariableDeclarationKind {
    pub fn name(self) -> &'static str {
        match self {
            VariableDeclarationKind::Var => "var",
            VariableDeclarationKind::Let => "let",
            VariableDeclarationKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclarator {
    pub binding: Binding,
    pub init: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhileStatement {
    pub test: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithStatement {
    pub object: Expression,
    pub body: Box<Statement>,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    // === Literals ===
    LiteralBooleanExpression(LiteralBooleanExpression),
    LiteralInfinityExpression(LiteralInfinityExpression),
    LiteralNullExpression(LiteralNullExpression),
    LiteralNumericExpression(LiteralNumericExpression),
    LiteralRegExpExpression(LiteralRegExpExpression),
    LiteralStringExpression(LiteralStringExpression),

    // === Primary ===
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    FunctionExpression(FunctionExpression),
    ClassExpression(ClassExpression),
    IdentifierExpression(IdentifierExpression),
    ThisExpression(ThisExpression),
    TemplateExpression(TemplateExpression),
    NewTargetExpression(NewTargetExpression),

    // === Member and call ===
    StaticMemberExpression(StaticMemberExpression),
    ComputedMemberExpression(ComputedMemberExpression),
    CallExpression(CallExpression),
    NewExpression(NewExpression),

    // === Operators ===
    UnaryExpression(UnaryExpression),
    UpdateExpression(UpdateExpression),
    BinaryExpression(BinaryExpression),
    ConditionalExpression(ConditionalExpression),
    AssignmentExpression(AssignmentExpression),
    CompoundAssignmentExpression(CompoundAssignmentExpression),

    // === Functions ===
    ArrowExpression(ArrowExpression),
    AwaitExpression(AwaitExpression),
    YieldExpression(YieldExpression),
    YieldGeneratorExpression(YieldGeneratorExpression),
}

impl Expression {
    /// Binding strength of this expression as rendered.
    ///
    /// Member, call and tagged-template chains inherit `Call` from their
    /// object so `a().b[c]` never needs parentheses.
    pub fn precedence(&self) -> Precedence {
        match self {
            Expression::StaticMemberExpression(e) => e.object.member_precedence(),
            Expression::ComputedMemberExpression(e) => e.object.member_precedence(),
            Expression::TemplateExpression(e) => match &e.tag {
                Some(tag) if tag.precedence() == Precedence::Call => Precedence::Call,
                _ => Precedence::Member,
            },
            Expression::CallExpression(_) => Precedence::Call,
            Expression::NewExpression(e) => {
                if e.arguments.is_empty() {
                    Precedence::New
                } else {
                    Precedence::Member
                }
            }
            Expression::NewTargetExpression(_) => Precedence::Member,
            Expression::UpdateExpression(e) => {
                if e.is_prefix {
                    Precedence::Prefix
                } else {
                    Precedence::Postfix
                }
            }
            Expression::UnaryExpression(_) | Expression::AwaitExpression(_) => Precedence::Prefix,
            Expression::BinaryExpression(e) => e.operator.precedence(),
            Expression::ConditionalExpression(_) => Precedence::Conditional,
            Expression::AssignmentExpression(_)
            | Expression::CompoundAssignmentExpression(_)
            | Expression::ArrowExpression(_)
            | Expression::YieldExpression(_)
            | Expression::YieldGeneratorExpression(_) => Precedence::Assignment,
            _ => Precedence::Primary,
        }
    }

    /// Is this `IdentifierExpression` named `name`?
    pub fn is_identifier(&self, name: &str) -> bool {
        matches!(self, Expression::IdentifierExpression(id) if id.name == name)
    }
}

/// Callee or object position, which also admits `super`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExpressionSuper {
    Expression(Expression),
    #[serde(deserialize_with = "super_arm")]
    Super(Super),
}

impl ExpressionSuper {
    /// Precedence of a member access on this object: `Call` when the object
    /// is itself a call chain, otherwise `Member`.
    pub fn member_precedence(&self) -> Precedence {
        match self {
            ExpressionSuper::Expression(e) if e.precedence() == Precedence::Call => Precedence::Call,
            _ => Precedence::Member,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Super {}

/// Argument or array-element position, which also admits `...spread`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SpreadElementExpression {
    Expression(Expression),
    #[serde(deserialize_with = "spread_element_arm")]
    SpreadElement(SpreadElement),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadElement {
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralBooleanExpression {
    pub value: bool,
}

/// A numeric literal too large for a double; rendered as `2e308`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LiteralInfinityExpression {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LiteralNullExpression {}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralNumericExpression {
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralRegExpExpression {
    pub pattern: String,
    pub global: bool,
    pub ignore_case: bool,
    pub multi_line: bool,
    pub sticky: bool,
    pub unicode: bool,
}

impl LiteralRegExpExpression {
    /// Flags in canonical `gimuy` order.
    pub fn flags(&self) -> String {
        let mut flags = String::new();
        for (set, flag) in [
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multi_line, 'm'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ] {
            if set {
                flags.push(flag);
            }
        }
        flags
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiteralStringExpression {
    pub value: String,
}

/// `[a, , ...b]`; `None` is a hole.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayExpression {
    pub elements: Vec<Option<SpreadElementExpression>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectExpression {
    pub properties: Vec<ObjectProperty>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionExpression {
    pub is_async: bool,
    pub is_generator: bool,
    pub name: Option<BindingIdentifier>,
    pub params: FormalParameters,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassExpression {
    pub name: Option<BindingIdentifier>,
    #[serde(rename = "super")]
    pub super_class: Option<Box<Expression>>,
    pub elements: Vec<ClassElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierExpression {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ThisExpression {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewTargetExpression {}

/// Template literal, optionally tagged. `elements` alternates raw text and
/// substitutions, starting and ending with a `TemplateElement`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateExpression {
    pub tag: Option<Box<Expression>>,
    pub elements: Vec<TemplateItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TemplateItem {
    Expression(Expression),
    #[serde(deserialize_with = "template_element_arm")]
    TemplateElement(TemplateElement),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateElement {
    pub raw_value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticMemberExpression {
    pub object: Box<ExpressionSuper>,
    pub property: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedMemberExpression {
    pub object: Box<ExpressionSuper>,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallExpression {
    pub callee: Box<ExpressionSuper>,
    pub arguments: Vec<SpreadElementExpression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<SpreadElementExpression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpression {
    pub is_prefix: bool,
    pub operator: UpdateOperator,
    pub operand: SimpleAssignmentTarget,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalExpression {
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentExpression {
    pub binding: AssignmentTarget,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundAssignmentExpression {
    pub binding: SimpleAssignmentTarget,
    pub operator: CompoundAssignmentOperator,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowExpression {
    pub is_async: bool,
    pub params: FormalParameters,
    pub body: ArrowBody,
}

impl ArrowExpression {
    /// `x => x` needs no parentheses around its parameter list.
    pub fn has_simple_head(&self) -> bool {
        self.params.rest.is_none()
            && matches!(
                self.params.items.as_slice(),
                [Parameter::Binding(Binding::BindingIdentifier(_))]
            )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ArrowBody {
    Expression(Box<Expression>),
    #[serde(deserialize_with = "function_body_arm")]
    FunctionBody(FunctionBody),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwaitExpression {
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldExpression {
    pub expression: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldGeneratorExpression {
    pub expression: Box<Expression>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expression {
        Expression::IdentifierExpression(IdentifierExpression { name: name.to_string() })
    }

    fn call(callee: Expression) -> Expression {
        Expression::CallExpression(CallExpression {
            callee: Box::new(ExpressionSuper::Expression(callee)),
            arguments: vec![],
        })
    }

    fn member(object: Expression, property: &str) -> Expression {
        Expression::StaticMemberExpression(StaticMemberExpression {
            object: Box::new(ExpressionSuper::Expression(object)),
            property: property.to_string(),
        })
    }

    #[test]
    fn test_member_precedence_follows_call_object() {
        assert_eq!(member(ident("a"), "b").precedence(), Precedence::Member);
        assert_eq!(member(call(ident("a")), "b").precedence(), Precedence::Call);
        assert_eq!(member(member(call(ident("a")), "b"), "c").precedence(), Precedence::Call);
    }

    #[test]
    fn test_new_precedence() {
        let bare = Expression::NewExpression(NewExpression {
            callee: Box::new(ident("A")),
            arguments: vec![],
        });
        assert_eq!(bare.precedence(), Precedence::New);
        let with_args = Expression::NewExpression(NewExpression {
            callee: Box::new(ident("A")),
            arguments: vec![SpreadElementExpression::Expression(ident("x"))],
        });
        assert_eq!(with_args.precedence(), Precedence::Member);
    }

    #[test]
    fn test_deserialize_script() {
        let json = r#"{
            "type": "Script",
            "directives": [{"type": "Directive", "rawValue": "use strict"}],
            "statements": [{
                "type": "ExpressionStatement",
                "expression": {
                    "type": "CallExpression",
                    "callee": {"type": "Super"},
                    "arguments": [
                        {"type": "SpreadElement", "expression": {"type": "IdentifierExpression", "name": "a"}},
                        {"type": "LiteralNumericExpression", "value": 1.5}
                    ]
                }
            }]
        }"#;
        let program = Program::from_json(json).unwrap();
        let Program::Script(script) = program else {
            panic!("expected a script");
        };
        assert_eq!(script.directives[0].raw_value, "use strict");
        let Statement::ExpressionStatement(stmt) = &script.statements[0] else {
            panic!("expected an expression statement");
        };
        let Expression::CallExpression(call) = &stmt.expression else {
            panic!("expected a call");
        };
        assert_eq!(*call.callee, ExpressionSuper::Super(Super {}));
        assert!(matches!(call.arguments[0], SpreadElementExpression::SpreadElement(_)));
        assert!(matches!(call.arguments[1], SpreadElementExpression::Expression(_)));
    }

    #[test]
    fn test_deserialize_for_in_left() {
        let json = r#"{
            "type": "ForInStatement",
            "left": {"type": "VariableDeclaration", "kind": "let", "declarators": [
                {"type": "VariableDeclarator", "binding": {"type": "BindingIdentifier", "name": "k"}, "init": null}
            ]},
            "right": {"type": "IdentifierExpression", "name": "o"},
            "body": {"type": "EmptyStatement"}
        }"#;
        let stmt: Statement = serde_json::from_str(json).unwrap();
        let Statement::ForInStatement(for_in) = stmt else {
            panic!("expected for-in");
        };
        let ForInOfLeft::VariableDeclaration(decl) = for_in.left else {
            panic!("expected a declaration");
        };
        assert_eq!(decl.kind, VariableDeclarationKind::Let);
    }

    #[test]
    fn test_untagged_arms_check_their_type() {
        let bogus_callee: Result<Expression, _> = serde_json::from_str(
            r#"{"type": "CallExpression", "callee": {"type": "Bogus", "name": "f"}, "arguments": []}"#,
        );
        assert!(bogus_callee.is_err());

        let untyped_spread: Result<SpreadElementExpression, _> =
            serde_json::from_str(r#"{"expression": {"type": "IdentifierExpression", "name": "a"}}"#);
        assert!(untyped_spread.is_err());

        let wrong_template_text: Result<TemplateItem, _> =
            serde_json::from_str(r#"{"type": "Directive", "rawValue": "a"}"#);
        assert!(wrong_template_text.is_err());

        let for_init: Result<ForInit, _> = serde_json::from_str(
            r#"{"type": "VariableDeclarationStatement", "kind": "var", "declarators": []}"#,
        );
        assert!(for_init.is_err());

        let body: ArrowBody =
            serde_json::from_str(r#"{"type": "FunctionBody", "directives": [], "statements": []}"#).unwrap();
        assert!(matches!(body, ArrowBody::FunctionBody(_)));
    }

    #[test]
    fn test_regexp_flags_order() {
        let re = LiteralRegExpExpression {
            pattern: "a".to_string(),
            global: true,
            ignore_case: false,
            multi_line: true,
            sticky: true,
            unicode: true,
        };
        assert_eq!(re.flags(), "gmuy");
    }
}
