//! Bottom-up tree fold.
//!
//! A [`Reducer`] has one method per node shape. The `fold_*` functions walk a
//! tree in post-order: every child is reduced first, then the shape's method
//! receives the original node together with the reduced children. Optional
//! children arrive as `Option`, sequences as `Vec` of the same length and
//! order, and array holes as `None` entries.
//!
//! None of the trait methods have default bodies, so a reducer that forgets a
//! shape does not compile. See [`crate::monoidal`] for a defaulted variant.

use crate::ast::*;

/// One reduction per node shape.
pub trait Reducer {
    type State;

    // === Programs and modules ===
    fn reduce_script(&mut self, node: &Script, directives: Vec<Self::State>, statements: Vec<Self::State>) -> Self::State;
    fn reduce_module(&mut self, node: &Module, directives: Vec<Self::State>, items: Vec<Self::State>) -> Self::State;
    fn reduce_directive(&mut self, node: &Directive) -> Self::State;
    fn reduce_import(&mut self, node: &Import, default_binding: Option<Self::State>, named_imports: Vec<Self::State>) -> Self::State;
    fn reduce_import_namespace(&mut self, node: &ImportNamespace, default_binding: Option<Self::State>, namespace_binding: Self::State) -> Self::State;
    fn reduce_import_specifier(&mut self, node: &ImportSpecifier, binding: Self::State) -> Self::State;
    fn reduce_export_all_from(&mut self, node: &ExportAllFrom) -> Self::State;
    fn reduce_export_from(&mut self, node: &ExportFrom, named_exports: Vec<Self::State>) -> Self::State;
    fn reduce_export_from_specifier(&mut self, node: &ExportFromSpecifier) -> Self::State;
    fn reduce_export_locals(&mut self, node: &ExportLocals, named_exports: Vec<Self::State>) -> Self::State;
    fn reduce_export_local_specifier(&mut self, node: &ExportLocalSpecifier, name: Self::State) -> Self::State;
    fn reduce_export(&mut self, node: &Export, declaration: Self::State) -> Self::State;
    fn reduce_export_default(&mut self, node: &ExportDefault, body: Self::State) -> Self::State;

    // === Functions and classes ===
    fn reduce_function_declaration(&mut self, node: &FunctionDeclaration, name: Self::State, params: Self::State, body: Self::State) -> Self::State;
    fn reduce_function_expression(&mut self, node: &FunctionExpression, name: Option<Self::State>, params: Self::State, body: Self::State) -> Self::State;
    fn reduce_arrow_expression(&mut self, node: &ArrowExpression, params: Self::State, body: Self::State) -> Self::State;
    fn reduce_formal_parameters(&mut self, node: &FormalParameters, items: Vec<Self::State>, rest: Option<Self::State>) -> Self::State;
    fn reduce_function_body(&mut self, node: &FunctionBody, directives: Vec<Self::State>, statements: Vec<Self::State>) -> Self::State;
    fn reduce_class_declaration(&mut self, node: &ClassDeclaration, name: Self::State, super_class: Option<Self::State>, elements: Vec<Self::State>) -> Self::State;
    fn reduce_class_expression(&mut self, node: &ClassExpression, name: Option<Self::State>, super_class: Option<Self::State>, elements: Vec<Self::State>) -> Self::State;
    fn reduce_class_element(&mut self, node: &ClassElement, method: Self::State) -> Self::State;
    fn reduce_method(&mut self, node: &Method, name: Self::State, params: Self::State, body: Self::State) -> Self::State;
    fn reduce_getter(&mut self, node: &Getter, name: Self::State, body: Self::State) -> Self::State;
    fn reduce_setter(&mut self, node: &Setter, name: Self::State, param: Self::State, body: Self::State) -> Self::State;

    // === Properties ===
    fn reduce_computed_property_name(&mut self, node: &ComputedPropertyName, expression: Self::State) -> Self::State;
    fn reduce_static_property_name(&mut self, node: &StaticPropertyName) -> Self::State;
    fn reduce_data_property(&mut self, node: &DataProperty, name: Self::State, expression: Self::State) -> Self::State;
    fn reduce_shorthand_property(&mut self, node: &ShorthandProperty, name: Self::State) -> Self::State;

    // === Bindings ===
    fn reduce_binding_identifier(&mut self, node: &BindingIdentifier) -> Self::State;
    fn reduce_binding_with_default(&mut self, node: &BindingWithDefault, binding: Self::State, init: Self::State) -> Self::State;
    fn reduce_array_binding(&mut self, node: &ArrayBinding, elements: Vec<Option<Self::State>>, rest: Option<Self::State>) -> Self::State;
    fn reduce_object_binding(&mut self, node: &ObjectBinding, properties: Vec<Self::State>) -> Self::State;
    fn reduce_binding_property_identifier(&mut self, node: &BindingPropertyIdentifier, binding: Self::State, init: Option<Self::State>) -> Self::State;
    fn reduce_binding_property_property(&mut self, node: &BindingPropertyProperty, name: Self::State, binding: Self::State) -> Self::State;

    // === Assignment targets ===
    fn reduce_assignment_target_identifier(&mut self, node: &AssignmentTargetIdentifier) -> Self::State;
    fn reduce_static_member_assignment_target(&mut self, node: &StaticMemberAssignmentTarget, object: Self::State) -> Self::State;
    fn reduce_computed_member_assignment_target(&mut self, node: &ComputedMemberAssignmentTarget, object: Self::State, expression: Self::State) -> Self::State;
    fn reduce_array_assignment_target(&mut self, node: &ArrayAssignmentTarget, elements: Vec<Option<Self::State>>, rest: Option<Self::State>) -> Self::State;
    fn reduce_object_assignment_target(&mut self, node: &ObjectAssignmentTarget, properties: Vec<Self::State>) -> Self::State;
    fn reduce_assignment_target_with_default(&mut self, node: &AssignmentTargetWithDefault, binding: Self::State, init: Self::State) -> Self::State;
    fn reduce_assignment_target_property_identifier(&mut self, node: &AssignmentTargetPropertyIdentifier, binding: Self::State, init: Option<Self::State>) -> Self::State;
    fn reduce_assignment_target_property_property(&mut self, node: &AssignmentTargetPropertyProperty, name: Self::State, binding: Self::State) -> Self::State;

    // === Statements ===
    fn reduce_block(&mut self, node: &Block, statements: Vec<Self::State>) -> Self::State;
    fn reduce_block_statement(&mut self, node: &BlockStatement, block: Self::State) -> Self::State;
    fn reduce_break_statement(&mut self, node: &BreakStatement) -> Self::State;
    fn reduce_continue_statement(&mut self, node: &ContinueStatement) -> Self::State;
    fn reduce_debugger_statement(&mut self, node: &DebuggerStatement) -> Self::State;
    fn reduce_do_while_statement(&mut self, node: &DoWhileStatement, body: Self::State, test: Self::State) -> Self::State;
    fn reduce_empty_statement(&mut self, node: &EmptyStatement) -> Self::State;
    fn reduce_expression_statement(&mut self, node: &ExpressionStatement, expression: Self::State) -> Self::State;
    fn reduce_for_in_statement(&mut self, node: &ForInStatement, left: Self::State, right: Self::State, body: Self::State) -> Self::State;
    fn reduce_for_of_statement(&mut self, node: &ForOfStatement, left: Self::State, right: Self::State, body: Self::State) -> Self::State;
    fn reduce_for_statement(&mut self, node: &ForStatement, init: Option<Self::State>, test: Option<Self::State>, update: Option<Self::State>, body: Self::State) -> Self::State;
    fn reduce_if_statement(&mut self, node: &IfStatement, test: Self::State, consequent: Self::State, alternate: Option<Self::State>) -> Self::State;
    fn reduce_labeled_statement(&mut self, node: &LabeledStatement, body: Self::State) -> Self::State;
    fn reduce_return_statement(&mut self, node: &ReturnStatement, expression: Option<Self::State>) -> Self::State;
    fn reduce_switch_statement(&mut self, node: &SwitchStatement, discriminant: Self::State, cases: Vec<Self::State>) -> Self::State;
    fn reduce_switch_statement_with_default(&mut self, node: &SwitchStatementWithDefault, discriminant: Self::State, pre_default_cases: Vec<Self::State>, default_case: Self::State, post_default_cases: Vec<Self::State>) -> Self::State;
    fn reduce_switch_case(&mut self, node: &SwitchCase, test: Self::State, consequent: Vec<Self::State>) -> Self::State;
    fn reduce_switch_default(&mut self, node: &SwitchDefault, consequent: Vec<Self::State>) -> Self::State;
    fn reduce_throw_statement(&mut self, node: &ThrowStatement, expression: Self::State) -> Self::State;
    fn reduce_try_catch_statement(&mut self, node: &TryCatchStatement, body: Self::State, catch_clause: Self::State) -> Self::State;
    fn reduce_try_finally_statement(&mut self, node: &TryFinallyStatement, body: Self::State, catch_clause: Option<Self::State>, finalizer: Self::State) -> Self::State;
    fn reduce_catch_clause(&mut self, node: &CatchClause, binding: Self::State, body: Self::State) -> Self::State;
    fn reduce_variable_declaration_statement(&mut self, node: &VariableDeclarationStatement, declaration: Self::State) -> Self::State;
    fn reduce_variable_declaration(&mut self, node: &VariableDeclaration, declarators: Vec<Self::State>) -> Self::State;
    fn reduce_variable_declarator(&mut self, node: &VariableDeclarator, binding: Self::State, init: Option<Self::State>) -> Self::State;
    fn reduce_while_statement(&mut self, node: &WhileStatement, test: Self::State, body: Self::State) -> Self::State;
    fn reduce_with_statement(&mut self, node: &WithStatement, object: Self::State, body: Self::State) -> Self::State;

    // === Expressions ===
    fn reduce_array_expression(&mut self, node: &ArrayExpression, elements: Vec<Option<Self::State>>) -> Self::State;
    fn reduce_assignment_expression(&mut self, node: &AssignmentExpression, binding: Self::State, expression: Self::State) -> Self::State;
    fn reduce_compound_assignment_expression(&mut self, node: &CompoundAssignmentExpression, binding: Self::State, expression: Self::State) -> Self::State;
    fn reduce_await_expression(&mut self, node: &AwaitExpression, expression: Self::State) -> Self::State;
    fn reduce_binary_expression(&mut self, node: &BinaryExpression, left: Self::State, right: Self::State) -> Self::State;
    fn reduce_call_expression(&mut self, node: &CallExpression, callee: Self::State, arguments: Vec<Self::State>) -> Self::State;
    fn reduce_computed_member_expression(&mut self, node: &ComputedMemberExpression, object: Self::State, expression: Self::State) -> Self::State;
    fn reduce_conditional_expression(&mut self, node: &ConditionalExpression, test: Self::State, consequent: Self::State, alternate: Self::State) -> Self::State;
    fn reduce_identifier_expression(&mut self, node: &IdentifierExpression) -> Self::State;
    fn reduce_literal_boolean_expression(&mut self, node: &LiteralBooleanExpression) -> Self::State;
    fn reduce_literal_infinity_expression(&mut self, node: &LiteralInfinityExpression) -> Self::State;
    fn reduce_literal_null_expression(&mut self, node: &LiteralNullExpression) -> Self::State;
    fn reduce_literal_numeric_expression(&mut self, node: &LiteralNumericExpression) -> Self::State;
    fn reduce_literal_reg_exp_expression(&mut self, node: &LiteralRegExpExpression) -> Self::State;
    fn reduce_literal_string_expression(&mut self, node: &LiteralStringExpression) -> Self::State;
    fn reduce_new_expression(&mut self, node: &NewExpression, callee: Self::State, arguments: Vec<Self::State>) -> Self::State;
    fn reduce_new_target_expression(&mut self, node: &NewTargetExpression) -> Self::State;
    fn reduce_object_expression(&mut self, node: &ObjectExpression, properties: Vec<Self::State>) -> Self::State;
    fn reduce_spread_element(&mut self, node: &SpreadElement, expression: Self::State) -> Self::State;
    fn reduce_static_member_expression(&mut self, node: &StaticMemberExpression, object: Self::State) -> Self::State;
    fn reduce_super(&mut self, node: &Super) -> Self::State;
    fn reduce_template_expression(&mut self, node: &TemplateExpression, tag: Option<Self::State>, elements: Vec<Self::State>) -> Self::State;
    fn reduce_template_element(&mut self, node: &TemplateElement) -> Self::State;
    fn reduce_this_expression(&mut self, node: &ThisExpression) -> Self::State;
    fn reduce_unary_expression(&mut self, node: &UnaryExpression, operand: Self::State) -> Self::State;
    fn reduce_update_expression(&mut self, node: &UpdateExpression, operand: Self::State) -> Self::State;
    fn reduce_yield_expression(&mut self, node: &YieldExpression, expression: Option<Self::State>) -> Self::State;
    fn reduce_yield_generator_expression(&mut self, node: &YieldGeneratorExpression, expression: Self::State) -> Self::State;
}

// =============================================================================
// Programs and modules
// =============================================================================

/// Fold a whole program.
pub fn fold_program<R: Reducer + ?Sized>(r: &mut R, node: &Program) -> R::State {
    match node {
        Program::Script(script) => fold_script(r, script),
        Program::Module(module) => fold_module(r, module),
    }
}

pub fn fold_script<R: Reducer + ?Sized>(r: &mut R, node: &Script) -> R::State {
    let directives = fold_directives(r, &node.directives);
    let statements = fold_statements(r, &node.statements);
    r.reduce_script(node, directives, statements)
}

pub fn fold_module<R: Reducer + ?Sized>(r: &mut R, node: &Module) -> R::State {
    let directives = fold_directives(r, &node.directives);
    let items = node.items.iter().map(|item| fold_module_item(r, item)).collect();
    r.reduce_module(node, directives, items)
}

fn fold_directives<R: Reducer + ?Sized>(r: &mut R, directives: &[Directive]) -> Vec<R::State> {
    directives.iter().map(|d| r.reduce_directive(d)).collect()
}

fn fold_statements<R: Reducer + ?Sized>(r: &mut R, statements: &[Statement]) -> Vec<R::State> {
    statements.iter().map(|s| fold_statement(r, s)).collect()
}

fn fold_expressions<R: Reducer + ?Sized>(r: &mut R, args: &[SpreadElementExpression]) -> Vec<R::State> {
    args.iter().map(|a| fold_spread_element_expression(r, a)).collect()
}

pub fn fold_module_item<R: Reducer + ?Sized>(r: &mut R, node: &ModuleItem) -> R::State {
    match node {
        ModuleItem::ImportDeclaration(import) => fold_import_declaration(r, import),
        ModuleItem::ExportDeclaration(export) => fold_export_declaration(r, export),
        ModuleItem::Statement(statement) => fold_statement(r, statement),
    }
}

pub fn fold_import_declaration<R: Reducer + ?Sized>(r: &mut R, node: &ImportDeclaration) -> R::State {
    match node {
        ImportDeclaration::Import(import) => {
            let default_binding = import.default_binding.as_ref().map(|b| r.reduce_binding_identifier(b));
            let named_imports = import
                .named_imports
                .iter()
                .map(|spec| {
                    let binding = r.reduce_binding_identifier(&spec.binding);
                    r.reduce_import_specifier(spec, binding)
                })
                .collect();
            r.reduce_import(import, default_binding, named_imports)
        }
        ImportDeclaration::ImportNamespace(import) => {
            let default_binding = import.default_binding.as_ref().map(|b| r.reduce_binding_identifier(b));
            let namespace_binding = r.reduce_binding_identifier(&import.namespace_binding);
            r.reduce_import_namespace(import, default_binding, namespace_binding)
        }
    }
}

pub fn fold_export_declaration<R: Reducer + ?Sized>(r: &mut R, node: &ExportDeclaration) -> R::State {
    match node {
        ExportDeclaration::ExportAllFrom(export) => r.reduce_export_all_from(export),
        ExportDeclaration::ExportFrom(export) => {
            let named = export.named_exports.iter().map(|s| r.reduce_export_from_specifier(s)).collect();
            r.reduce_export_from(export, named)
        }
        ExportDeclaration::ExportLocals(export) => {
            let named = export
                .named_exports
                .iter()
                .map(|spec| {
                    let name = r.reduce_identifier_expression(&spec.name);
                    r.reduce_export_local_specifier(spec, name)
                })
                .collect();
            r.reduce_export_locals(export, named)
        }
        ExportDeclaration::Export(export) => {
            let declaration = match &export.declaration {
                ExportableDeclaration::FunctionDeclaration(f) => fold_function_declaration(r, f),
                ExportableDeclaration::ClassDeclaration(c) => fold_class_declaration(r, c),
                ExportableDeclaration::VariableDeclaration(v) => fold_variable_declaration(r, v),
            };
            r.reduce_export(export, declaration)
        }
        ExportDeclaration::ExportDefault(export) => {
            let body = match &export.body {
                ExportDefaultBody::Expression(e) => fold_expression(r, e),
                ExportDefaultBody::FunctionDeclaration(f) => fold_function_declaration(r, f),
                ExportDefaultBody::ClassDeclaration(c) => fold_class_declaration(r, c),
            };
            r.reduce_export_default(export, body)
        }
    }
}

// =============================================================================
// Functions and classes
// =============================================================================

pub fn fold_function_declaration<R: Reducer + ?Sized>(r: &mut R, node: &FunctionDeclaration) -> R::State {
    let name = r.reduce_binding_identifier(&node.name);
    let params = fold_formal_parameters(r, &node.params);
    let body = fold_function_body(r, &node.body);
    r.reduce_function_declaration(node, name, params, body)
}

pub fn fold_formal_parameters<R: Reducer + ?Sized>(r: &mut R, node: &FormalParameters) -> R::State {
    let items = node.items.iter().map(|p| fold_parameter(r, p)).collect();
    let rest = node.rest.as_ref().map(|b| fold_binding(r, b));
    r.reduce_formal_parameters(node, items, rest)
}

pub fn fold_function_body<R: Reducer + ?Sized>(r: &mut R, node: &FunctionBody) -> R::State {
    let directives = fold_directives(r, &node.directives);
    let statements = fold_statements(r, &node.statements);
    r.reduce_function_body(node, directives, statements)
}

pub fn fold_class_declaration<R: Reducer + ?Sized>(r: &mut R, node: &ClassDeclaration) -> R::State {
    let name = r.reduce_binding_identifier(&node.name);
    let super_class = node.super_class.as_ref().map(|e| fold_expression(r, e));
    let elements = node.elements.iter().map(|e| fold_class_element(r, e)).collect();
    r.reduce_class_declaration(node, name, super_class, elements)
}

pub fn fold_class_element<R: Reducer + ?Sized>(r: &mut R, node: &ClassElement) -> R::State {
    let method = fold_method_definition(r, &node.method);
    r.reduce_class_element(node, method)
}

pub fn fold_method_definition<R: Reducer + ?Sized>(r: &mut R, node: &MethodDefinition) -> R::State {
    match node {
        MethodDefinition::Method(m) => fold_method(r, m),
        MethodDefinition::Getter(g) => fold_getter(r, g),
        MethodDefinition::Setter(s) => fold_setter(r, s),
    }
}

fn fold_method<R: Reducer + ?Sized>(r: &mut R, node: &Method) -> R::State {
    let name = fold_property_name(r, &node.name);
    let params = fold_formal_parameters(r, &node.params);
    let body = fold_function_body(r, &node.body);
    r.reduce_method(node, name, params, body)
}

fn fold_getter<R: Reducer + ?Sized>(r: &mut R, node: &Getter) -> R::State {
    let name = fold_property_name(r, &node.name);
    let body = fold_function_body(r, &node.body);
    r.reduce_getter(node, name, body)
}

fn fold_setter<R: Reducer + ?Sized>(r: &mut R, node: &Setter) -> R::State {
    let name = fold_property_name(r, &node.name);
    let param = fold_parameter(r, &node.param);
    let body = fold_function_body(r, &node.body);
    r.reduce_setter(node, name, param, body)
}

// =============================================================================
// Properties
// =============================================================================

pub fn fold_property_name<R: Reducer + ?Sized>(r: &mut R, node: &PropertyName) -> R::State {
    match node {
        PropertyName::ComputedPropertyName(name) => {
            let expression = fold_expression(r, &name.expression);
            r.reduce_computed_property_name(name, expression)
        }
        PropertyName::StaticPropertyName(name) => r.reduce_static_property_name(name),
    }
}

pub fn fold_object_property<R: Reducer + ?Sized>(r: &mut R, node: &ObjectProperty) -> R::State {
    match node {
        ObjectProperty::DataProperty(p) => {
            let name = fold_property_name(r, &p.name);
            let expression = fold_expression(r, &p.expression);
            r.reduce_data_property(p, name, expression)
        }
        ObjectProperty::ShorthandProperty(p) => {
            let name = r.reduce_identifier_expression(&p.name);
            r.reduce_shorthand_property(p, name)
        }
        ObjectProperty::Method(m) => fold_method(r, m),
        ObjectProperty::Getter(g) => fold_getter(r, g),
        ObjectProperty::Setter(s) => fold_setter(r, s),
    }
}

// =============================================================================
// Bindings
// =============================================================================

pub fn fold_binding<R: Reducer + ?Sized>(r: &mut R, node: &Binding) -> R::State {
    match node {
        Binding::BindingIdentifier(id) => r.reduce_binding_identifier(id),
        Binding::ArrayBinding(array) => {
            let elements = array
                .elements
                .iter()
                .map(|e| e.as_ref().map(|p| fold_parameter(r, p)))
                .collect();
            let rest = array.rest.as_ref().map(|b| fold_binding(r, b));
            r.reduce_array_binding(array, elements, rest)
        }
        Binding::ObjectBinding(object) => {
            let properties = object.properties.iter().map(|p| fold_binding_property(r, p)).collect();
            r.reduce_object_binding(object, properties)
        }
    }
}

pub fn fold_parameter<R: Reducer + ?Sized>(r: &mut R, node: &Parameter) -> R::State {
    match node {
        Parameter::Binding(binding) => fold_binding(r, binding),
        Parameter::BindingWithDefault(with_default) => {
            let binding = fold_binding(r, &with_default.binding);
            let init = fold_expression(r, &with_default.init);
            r.reduce_binding_with_default(with_default, binding, init)
        }
    }
}

pub fn fold_binding_property<R: Reducer + ?Sized>(r: &mut R, node: &BindingProperty) -> R::State {
    match node {
        BindingProperty::BindingPropertyIdentifier(p) => {
            let binding = r.reduce_binding_identifier(&p.binding);
            let init = p.init.as_ref().map(|e| fold_expression(r, e));
            r.reduce_binding_property_identifier(p, binding, init)
        }
        BindingProperty::BindingPropertyProperty(p) => {
            let name = fold_property_name(r, &p.name);
            let binding = fold_parameter(r, &p.binding);
            r.reduce_binding_property_property(p, name, binding)
        }
    }
}

// =============================================================================
// Assignment targets
// =============================================================================

pub fn fold_assignment_target<R: Reducer + ?Sized>(r: &mut R, node: &AssignmentTarget) -> R::State {
    match node {
        AssignmentTarget::AssignmentTargetIdentifier(id) => r.reduce_assignment_target_identifier(id),
        AssignmentTarget::StaticMemberAssignmentTarget(t) => fold_static_member_assignment_target(r, t),
        AssignmentTarget::ComputedMemberAssignmentTarget(t) => fold_computed_member_assignment_target(r, t),
        AssignmentTarget::ArrayAssignmentTarget(array) => {
            let elements = array
                .elements
                .iter()
                .map(|e| e.as_ref().map(|t| fold_assignment_target_maybe_default(r, t)))
                .collect();
            let rest = array.rest.as_ref().map(|t| fold_assignment_target(r, t));
            r.reduce_array_assignment_target(array, elements, rest)
        }
        AssignmentTarget::ObjectAssignmentTarget(object) => {
            let properties = object
                .properties
                .iter()
                .map(|p| fold_assignment_target_property(r, p))
                .collect();
            r.reduce_object_assignment_target(object, properties)
        }
    }
}

pub fn fold_simple_assignment_target<R: Reducer + ?Sized>(r: &mut R, node: &SimpleAssignmentTarget) -> R::State {
    match node {
        SimpleAssignmentTarget::AssignmentTargetIdentifier(id) => r.reduce_assignment_target_identifier(id),
        SimpleAssignmentTarget::StaticMemberAssignmentTarget(t) => fold_static_member_assignment_target(r, t),
        SimpleAssignmentTarget::ComputedMemberAssignmentTarget(t) => fold_computed_member_assignment_target(r, t),
    }
}

fn fold_static_member_assignment_target<R: Reducer + ?Sized>(r: &mut R, node: &StaticMemberAssignmentTarget) -> R::State {
    let object = fold_expression_super(r, &node.object);
    r.reduce_static_member_assignment_target(node, object)
}

fn fold_computed_member_assignment_target<R: Reducer + ?Sized>(r: &mut R, node: &ComputedMemberAssignmentTarget) -> R::State {
    let object = fold_expression_super(r, &node.object);
    let expression = fold_expression(r, &node.expression);
    r.reduce_computed_member_assignment_target(node, object, expression)
}

pub fn fold_assignment_target_maybe_default<R: Reducer + ?Sized>(r: &mut R, node: &AssignmentTargetMaybeDefault) -> R::State {
    match node {
        AssignmentTargetMaybeDefault::AssignmentTarget(t) => fold_assignment_target(r, t),
        AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(t) => {
            let binding = fold_assignment_target(r, &t.binding);
            let init = fold_expression(r, &t.init);
            r.reduce_assignment_target_with_default(t, binding, init)
        }
    }
}

pub fn fold_assignment_target_property<R: Reducer + ?Sized>(r: &mut R, node: &AssignmentTargetProperty) -> R::State {
    match node {
        AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(p) => {
            let binding = r.reduce_assignment_target_identifier(&p.binding);
            let init = p.init.as_ref().map(|e| fold_expression(r, e));
            r.reduce_assignment_target_property_identifier(p, binding, init)
        }
        AssignmentTargetProperty::AssignmentTargetPropertyProperty(p) => {
            let name = fold_property_name(r, &p.name);
            let binding = fold_assignment_target_maybe_default(r, &p.binding);
            r.reduce_assignment_target_property_property(p, name, binding)
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

pub fn fold_block<R: Reducer + ?Sized>(r: &mut R, node: &Block) -> R::State {
    let statements = fold_statements(r, &node.statements);
    r.reduce_block(node, statements)
}

pub fn fold_variable_declaration<R: Reducer + ?Sized>(r: &mut R, node: &VariableDeclaration) -> R::State {
    let declarators = node
        .declarators
        .iter()
        .map(|d| {
            let binding = fold_binding(r, &d.binding);
            let init = d.init.as_ref().map(|e| fold_expression(r, e));
            r.reduce_variable_declarator(d, binding, init)
        })
        .collect();
    r.reduce_variable_declaration(node, declarators)
}

fn fold_for_in_of_left<R: Reducer + ?Sized>(r: &mut R, node: &ForInOfLeft) -> R::State {
    match node {
        ForInOfLeft::AssignmentTarget(t) => fold_assignment_target(r, t),
        ForInOfLeft::VariableDeclaration(d) => fold_variable_declaration(r, d),
    }
}

fn fold_switch_case<R: Reducer + ?Sized>(r: &mut R, node: &SwitchCase) -> R::State {
    let test = fold_expression(r, &node.test);
    let consequent = fold_statements(r, &node.consequent);
    r.reduce_switch_case(node, test, consequent)
}

fn fold_catch_clause<R: Reducer + ?Sized>(r: &mut R, node: &CatchClause) -> R::State {
    let binding = fold_binding(r, &node.binding);
    let body = fold_block(r, &node.body);
    r.reduce_catch_clause(node, binding, body)
}

pub fn fold_statement<R: Reducer + ?Sized>(r: &mut R, node: &Statement) -> R::State {
    match node {
        Statement::BlockStatement(s) => {
            let block = fold_block(r, &s.block);
            r.reduce_block_statement(s, block)
        }
        Statement::BreakStatement(s) => r.reduce_break_statement(s),
        Statement::ContinueStatement(s) => r.reduce_continue_statement(s),
        Statement::DebuggerStatement(s) => r.reduce_debugger_statement(s),
        Statement::DoWhileStatement(s) => {
            let body = fold_statement(r, &s.body);
            let test = fold_expression(r, &s.test);
            r.reduce_do_while_statement(s, body, test)
        }
        Statement::EmptyStatement(s) => r.reduce_empty_statement(s),
        Statement::ExpressionStatement(s) => {
            let expression = fold_expression(r, &s.expression);
            r.reduce_expression_statement(s, expression)
        }
        Statement::ForInStatement(s) => {
            let left = fold_for_in_of_left(r, &s.left);
            let right = fold_expression(r, &s.right);
            let body = fold_statement(r, &s.body);
            r.reduce_for_in_statement(s, left, right, body)
        }
        Statement::ForOfStatement(s) => {
            let left = fold_for_in_of_left(r, &s.left);
            let right = fold_expression(r, &s.right);
            let body = fold_statement(r, &s.body);
            r.reduce_for_of_statement(s, left, right, body)
        }
        Statement::ForStatement(s) => {
            let init = s.init.as_ref().map(|init| match init {
                ForInit::Expression(e) => fold_expression(r, e),
                ForInit::VariableDeclaration(d) => fold_variable_declaration(r, d),
            });
            let test = s.test.as_ref().map(|e| fold_expression(r, e));
            let update = s.update.as_ref().map(|e| fold_expression(r, e));
            let body = fold_statement(r, &s.body);
            r.reduce_for_statement(s, init, test, update, body)
        }
        Statement::IfStatement(s) => {
            let test = fold_expression(r, &s.test);
            let consequent = fold_statement(r, &s.consequent);
            let alternate = s.alternate.as_ref().map(|a| fold_statement(r, a));
            r.reduce_if_statement(s, test, consequent, alternate)
        }
        Statement::LabeledStatement(s) => {
            let body = fold_statement(r, &s.body);
            r.reduce_labeled_statement(s, body)
        }
        Statement::ReturnStatement(s) => {
            let expression = s.expression.as_ref().map(|e| fold_expression(r, e));
            r.reduce_return_statement(s, expression)
        }
        Statement::SwitchStatement(s) => {
            let discriminant = fold_expression(r, &s.discriminant);
            let cases = s.cases.iter().map(|c| fold_switch_case(r, c)).collect();
            r.reduce_switch_statement(s, discriminant, cases)
        }
        Statement::SwitchStatementWithDefault(s) => {
            let discriminant = fold_expression(r, &s.discriminant);
            let pre_default_cases = s.pre_default_cases.iter().map(|c| fold_switch_case(r, c)).collect();
            let consequent = fold_statements(r, &s.default_case.consequent);
            let default_case = r.reduce_switch_default(&s.default_case, consequent);
            let post_default_cases = s.post_default_cases.iter().map(|c| fold_switch_case(r, c)).collect();
            r.reduce_switch_statement_with_default(s, discriminant, pre_default_cases, default_case, post_default_cases)
        }
        Statement::ThrowStatement(s) => {
            let expression = fold_expression(r, &s.expression);
            r.reduce_throw_statement(s, expression)
        }
        Statement::TryCatchStatement(s) => {
            let body = fold_block(r, &s.body);
            let catch_clause = fold_catch_clause(r, &s.catch_clause);
            r.reduce_try_catch_statement(s, body, catch_clause)
        }
        Statement::TryFinallyStatement(s) => {
            let body = fold_block(r, &s.body);
            let catch_clause = s.catch_clause.as_ref().map(|c| fold_catch_clause(r, c));
            let finalizer = fold_block(r, &s.finalizer);
            r.reduce_try_finally_statement(s, body, catch_clause, finalizer)
        }
        Statement::VariableDeclarationStatement(s) => {
            let declaration = fold_variable_declaration(r, &s.declaration);
            r.reduce_variable_declaration_statement(s, declaration)
        }
        Statement::WhileStatement(s) => {
            let test = fold_expression(r, &s.test);
            let body = fold_statement(r, &s.body);
            r.reduce_while_statement(s, test, body)
        }
        Statement::WithStatement(s) => {
            let object = fold_expression(r, &s.object);
            let body = fold_statement(r, &s.body);
            r.reduce_with_statement(s, object, body)
        }
        Statement::FunctionDeclaration(f) => fold_function_declaration(r, f),
        Statement::ClassDeclaration(c) => fold_class_declaration(r, c),
    }
}

// =============================================================================
// Expressions
// =============================================================================

pub fn fold_expression_super<R: Reducer + ?Sized>(r: &mut R, node: &ExpressionSuper) -> R::State {
    match node {
        ExpressionSuper::Expression(e) => fold_expression(r, e),
        ExpressionSuper::Super(s) => r.reduce_super(s),
    }
}

pub fn fold_spread_element_expression<R: Reducer + ?Sized>(r: &mut R, node: &SpreadElementExpression) -> R::State {
    match node {
        SpreadElementExpression::Expression(e) => fold_expression(r, e),
        SpreadElementExpression::SpreadElement(spread) => {
            let expression = fold_expression(r, &spread.expression);
            r.reduce_spread_element(spread, expression)
        }
    }
}

pub fn fold_expression<R: Reducer + ?Sized>(r: &mut R, node: &Expression) -> R::State {
    match node {
        Expression::LiteralBooleanExpression(e) => r.reduce_literal_boolean_expression(e),
        Expression::LiteralInfinityExpression(e) => r.reduce_literal_infinity_expression(e),
        Expression::LiteralNullExpression(e) => r.reduce_literal_null_expression(e),
        Expression::LiteralNumericExpression(e) => r.reduce_literal_numeric_expression(e),
        Expression::LiteralRegExpExpression(e) => r.reduce_literal_reg_exp_expression(e),
        Expression::LiteralStringExpression(e) => r.reduce_literal_string_expression(e),
        Expression::ArrayExpression(e) => {
            let elements = e
                .elements
                .iter()
                .map(|el| el.as_ref().map(|x| fold_spread_element_expression(r, x)))
                .collect();
            r.reduce_array_expression(e, elements)
        }
        Expression::ObjectExpression(e) => {
            let properties = e.properties.iter().map(|p| fold_object_property(r, p)).collect();
            r.reduce_object_expression(e, properties)
        }
        Expression::FunctionExpression(e) => {
            let name = e.name.as_ref().map(|n| r.reduce_binding_identifier(n));
            let params = fold_formal_parameters(r, &e.params);
            let body = fold_function_body(r, &e.body);
            r.reduce_function_expression(e, name, params, body)
        }
        Expression::ClassExpression(e) => {
            let name = e.name.as_ref().map(|n| r.reduce_binding_identifier(n));
            let super_class = e.super_class.as_ref().map(|s| fold_expression(r, s));
            let elements = e.elements.iter().map(|el| fold_class_element(r, el)).collect();
            r.reduce_class_expression(e, name, super_class, elements)
        }
        Expression::IdentifierExpression(e) => r.reduce_identifier_expression(e),
        Expression::ThisExpression(e) => r.reduce_this_expression(e),
        Expression::TemplateExpression(e) => {
            let tag = e.tag.as_ref().map(|t| fold_expression(r, t));
            let elements = e
                .elements
                .iter()
                .map(|item| match item {
                    TemplateItem::Expression(x) => fold_expression(r, x),
                    TemplateItem::TemplateElement(el) => r.reduce_template_element(el),
                })
                .collect();
            r.reduce_template_expression(e, tag, elements)
        }
        Expression::NewTargetExpression(e) => r.reduce_new_target_expression(e),
        Expression::StaticMemberExpression(e) => {
            let object = fold_expression_super(r, &e.object);
            r.reduce_static_member_expression(e, object)
        }
        Expression::ComputedMemberExpression(e) => {
            let object = fold_expression_super(r, &e.object);
            let expression = fold_expression(r, &e.expression);
            r.reduce_computed_member_expression(e, object, expression)
        }
        Expression::CallExpression(e) => {
            let callee = fold_expression_super(r, &e.callee);
            let arguments = fold_expressions(r, &e.arguments);
            r.reduce_call_expression(e, callee, arguments)
        }
        Expression::NewExpression(e) => {
            let callee = fold_expression(r, &e.callee);
            let arguments = fold_expressions(r, &e.arguments);
            r.reduce_new_expression(e, callee, arguments)
        }
        Expression::UnaryExpression(e) => {
            let operand = fold_expression(r, &e.operand);
            r.reduce_unary_expression(e, operand)
        }
        Expression::UpdateExpression(e) => {
            let operand = fold_simple_assignment_target(r, &e.operand);
            r.reduce_update_expression(e, operand)
        }
        Expression::BinaryExpression(e) => {
            let left = fold_expression(r, &e.left);
            let right = fold_expression(r, &e.right);
            r.reduce_binary_expression(e, left, right)
        }
        Expression::ConditionalExpression(e) => {
            let test = fold_expression(r, &e.test);
            let consequent = fold_expression(r, &e.consequent);
            let alternate = fold_expression(r, &e.alternate);
            r.reduce_conditional_expression(e, test, consequent, alternate)
        }
        Expression::AssignmentExpression(e) => {
            let binding = fold_assignment_target(r, &e.binding);
            let expression = fold_expression(r, &e.expression);
            r.reduce_assignment_expression(e, binding, expression)
        }
        Expression::CompoundAssignmentExpression(e) => {
            let binding = fold_simple_assignment_target(r, &e.binding);
            let expression = fold_expression(r, &e.expression);
            r.reduce_compound_assignment_expression(e, binding, expression)
        }
        Expression::ArrowExpression(e) => {
            let params = fold_formal_parameters(r, &e.params);
            let body = match &e.body {
                ArrowBody::Expression(x) => fold_expression(r, x),
                ArrowBody::FunctionBody(b) => fold_function_body(r, b),
            };
            r.reduce_arrow_expression(e, params, body)
        }
        Expression::AwaitExpression(e) => {
            let expression = fold_expression(r, &e.expression);
            r.reduce_await_expression(e, expression)
        }
        Expression::YieldExpression(e) => {
            let expression = e.expression.as_ref().map(|x| fold_expression(r, x));
            r.reduce_yield_expression(e, expression)
        }
        Expression::YieldGeneratorExpression(e) => {
            let expression = fold_expression(r, &e.expression);
            r.reduce_yield_generator_expression(e, expression)
        }
    }
}
