//! Reducers whose results only ever combine.
//!
//! Many analyses (counting nodes, collecting names, "does this tree contain
//! X") ignore node shape entirely and just merge what the children produced.
//! [`MonoidalReducer`] gives every shape a default that appends its children's
//! states in order, so an implementation overrides only the shapes it cares
//! about. Wrap it in [`Monoidal`] to drive it with the `fold_*` functions.
//!
//! ```ignore
//! struct Identifiers;
//!
//! impl MonoidalReducer for Identifiers {
//!     type State = Vec<String>;
//!
//!     fn reduce_identifier_expression(&mut self, node: &IdentifierExpression) -> Vec<String> {
//!         vec![node.name.clone()]
//!     }
//! }
//!
//! let names = fold_program(&mut Monoidal(Identifiers), &program);
//! ```

use crate::ast::*;
use crate::reducer::Reducer;

/// An associative combine with an identity element.
pub trait Monoid: Sized {
    fn identity() -> Self;
    fn append(self, other: Self) -> Self;
}

impl Monoid for () {
    fn identity() -> Self {}
    fn append(self, _other: Self) -> Self {}
}

/// Sum.
impl Monoid for usize {
    fn identity() -> Self {
        0
    }
    fn append(self, other: Self) -> Self {
        self + other
    }
}

/// Logical or.
impl Monoid for bool {
    fn identity() -> Self {
        false
    }
    fn append(self, other: Self) -> Self {
        self || other
    }
}

/// Concatenation.
impl<T> Monoid for Vec<T> {
    fn identity() -> Self {
        Vec::new()
    }
    fn append(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

/// Adapter that runs a [`MonoidalReducer`] as a [`Reducer`].
#[derive(Debug, Default, Clone)]
pub struct Monoidal<R>(pub R);

impl<R> Monoidal<R> {
    pub fn into_inner(self) -> R {
        self.0
    }
}

macro_rules! child_ty {
    (one, $s:ty) => { $s };
    (opt, $s:ty) => { Option<$s> };
    (list, $s:ty) => { Vec<$s> };
    (holes, $s:ty) => { Vec<Option<$s>> };
}

macro_rules! fold_child {
    (one, $acc:expr, $c:expr) => {
        Monoid::append($acc, $c)
    };
    (opt, $acc:expr, $c:expr) => {
        match $c {
            Some(state) => Monoid::append($acc, state),
            None => $acc,
        }
    };
    (list, $acc:expr, $c:expr) => {
        $c.into_iter().fold($acc, Monoid::append)
    };
    (holes, $acc:expr, $c:expr) => {
        $c.into_iter().flatten().fold($acc, Monoid::append)
    };
}

macro_rules! monoidal_reducer {
    ($( $method:ident($node:ty $(, $child:ident: $kind:tt)*); )*) => {
        /// A [`Reducer`] with defaults: each shape appends its children's
        /// states left to right, starting from [`Monoid::identity`].
        pub trait MonoidalReducer {
            type State: Monoid;

            $(
                fn $method(&mut self, node: &$node $(, $child: child_ty!($kind, Self::State))*) -> Self::State {
                    let _ = node;
                    let acc = <Self::State as Monoid>::identity();
                    $( let acc = fold_child!($kind, acc, $child); )*
                    acc
                }
            )*
        }

        impl<R: MonoidalReducer> Reducer for Monoidal<R> {
            type State = R::State;

            $(
                fn $method(&mut self, node: &$node $(, $child: child_ty!($kind, Self::State))*) -> Self::State {
                    self.0.$method(node $(, $child)*)
                }
            )*
        }
    };
}

monoidal_reducer! {
    reduce_script(Script, directives: list, statements: list);
    reduce_module(Module, directives: list, items: list);
    reduce_directive(Directive);
    reduce_import(Import, default_binding: opt, named_imports: list);
    reduce_import_namespace(ImportNamespace, default_binding: opt, namespace_binding: one);
    reduce_import_specifier(ImportSpecifier, binding: one);
    reduce_export_all_from(ExportAllFrom);
    reduce_export_from(ExportFrom, named_exports: list);
    reduce_export_from_specifier(ExportFromSpecifier);
    reduce_export_locals(ExportLocals, named_exports: list);
    reduce_export_local_specifier(ExportLocalSpecifier, name: one);
    reduce_export(Export, declaration: one);
    reduce_export_default(ExportDefault, body: one);

    reduce_function_declaration(FunctionDeclaration, name: one, params: one, body: one);
    reduce_function_expression(FunctionExpression, name: opt, params: one, body: one);
    reduce_arrow_expression(ArrowExpression, params: one, body: one);
    reduce_formal_parameters(FormalParameters, items: list, rest: opt);
    reduce_function_body(FunctionBody, directives: list, statements: list);
    reduce_class_declaration(ClassDeclaration, name: one, super_class: opt, elements: list);
    reduce_class_expression(ClassExpression, name: opt, super_class: opt, elements: list);
    reduce_class_element(ClassElement, method: one);
    reduce_method(Method, name: one, params: one, body: one);
    reduce_getter(Getter, name: one, body: one);
    reduce_setter(Setter, name: one, param: one, body: one);

    reduce_computed_property_name(ComputedPropertyName, expression: one);
    reduce_static_property_name(StaticPropertyName);
    reduce_data_property(DataProperty, name: one, expression: one);
    reduce_shorthand_property(ShorthandProperty, name: one);

    reduce_binding_identifier(BindingIdentifier);
    reduce_binding_with_default(BindingWithDefault, binding: one, init: one);
    reduce_array_binding(ArrayBinding, elements: holes, rest: opt);
    reduce_object_binding(ObjectBinding, properties: list);
    reduce_binding_property_identifier(BindingPropertyIdentifier, binding: one, init: opt);
    reduce_binding_property_property(BindingPropertyProperty, name: one, binding: one);

    reduce_assignment_target_identifier(AssignmentTargetIdentifier);
    reduce_static_member_assignment_target(StaticMemberAssignmentTarget, object: one);
    reduce_computed_member_assignment_target(ComputedMemberAssignmentTarget, object: one, expression: one);
    reduce_array_assignment_target(ArrayAssignmentTarget, elements: holes, rest: opt);
    reduce_object_assignment_target(ObjectAssignmentTarget, properties: list);
    reduce_assignment_target_with_default(AssignmentTargetWithDefault, binding: one, init: one);
    reduce_assignment_target_property_identifier(AssignmentTargetPropertyIdentifier, binding: one, init: opt);
    reduce_assignment_target_property_property(AssignmentTargetPropertyProperty, name: one, binding: one);

    reduce_block(Block, statements: list);
    reduce_block_statement(BlockStatement, block: one);
    reduce_break_statement(BreakStatement);
    reduce_continue_statement(ContinueStatement);
    reduce_debugger_statement(DebuggerStatement);
    reduce_do_while_statement(DoWhileStatement, body: one, test: one);
    reduce_empty_statement(EmptyStatement);
    reduce_expression_statement(ExpressionStatement, expression: one);
    reduce_for_in_statement(ForInStatement, left: one, right: one, body: one);
    reduce_for_of_statement(ForOfStatement, left: one, right: one, body: one);
    reduce_for_statement(ForStatement, init: opt, test: opt, update: opt, body: one);
    reduce_if_statement(IfStatement, test: one, consequent: one, alternate: opt);
    reduce_labeled_statement(LabeledStatement, body: one);
    reduce_return_statement(ReturnStatement, expression: opt);
    reduce_switch_statement(SwitchStatement, discriminant: one, cases: list);
    reduce_switch_statement_with_default(SwitchStatementWithDefault, discriminant: one, pre_default_cases: list, default_case: one, post_default_cases: list);
    reduce_switch_case(SwitchCase, test: one, consequent: list);
    reduce_switch_default(SwitchDefault, consequent: list);
    reduce_throw_statement(ThrowStatement, expression: one);
    reduce_try_catch_statement(TryCatchStatement, body: one, catch_clause: one);
    reduce_try_finally_statement(TryFinallyStatement, body: one, catch_clause: opt, finalizer: one);
    reduce_catch_clause(CatchClause, binding: one, body: one);
    reduce_variable_declaration_statement(VariableDeclarationStatement, declaration: one);
    reduce_variable_declaration(VariableDeclaration, declarators: list);
    reduce_variable_declarator(VariableDeclarator, binding: one, init: opt);
    reduce_while_statement(WhileStatement, test: one, body: one);
    reduce_with_statement(WithStatement, object: one, body: one);

    reduce_array_expression(ArrayExpression, elements: holes);
    reduce_assignment_expression(AssignmentExpression, binding: one, expression: one);
    reduce_compound_assignment_expression(CompoundAssignmentExpression, binding: one, expression: one);
    reduce_await_expression(AwaitExpression, expression: one);
    reduce_binary_expression(BinaryExpression, left: one, right: one);
    reduce_call_expression(CallExpression, callee: one, arguments: list);
    reduce_computed_member_expression(ComputedMemberExpression, object: one, expression: one);
    reduce_conditional_expression(ConditionalExpression, test: one, consequent: one, alternate: one);
    reduce_identifier_expression(IdentifierExpression);
    reduce_literal_boolean_expression(LiteralBooleanExpression);
    reduce_literal_infinity_expression(LiteralInfinityExpression);
    reduce_literal_null_expression(LiteralNullExpression);
    reduce_literal_numeric_expression(LiteralNumericExpression);
    reduce_literal_reg_exp_expression(LiteralRegExpExpression);
    reduce_literal_string_expression(LiteralStringExpression);
    reduce_new_expression(NewExpression, callee: one, arguments: list);
    reduce_new_target_expression(NewTargetExpression);
    reduce_object_expression(ObjectExpression, properties: list);
    reduce_spread_element(SpreadElement, expression: one);
    reduce_static_member_expression(StaticMemberExpression, object: one);
    reduce_super(Super);
    reduce_template_expression(TemplateExpression, tag: opt, elements: list);
    reduce_template_element(TemplateElement);
    reduce_this_expression(ThisExpression);
    reduce_unary_expression(UnaryExpression, operand: one);
    reduce_update_expression(UpdateExpression, operand: one);
    reduce_yield_expression(YieldExpression, expression: opt);
    reduce_yield_generator_expression(YieldGeneratorExpression, expression: one);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::fold_program;

    struct Identifiers;

    impl MonoidalReducer for Identifiers {
        type State = Vec<String>;

        fn reduce_identifier_expression(&mut self, node: &IdentifierExpression) -> Vec<String> {
            vec![node.name.clone()]
        }

        fn reduce_binding_identifier(&mut self, node: &BindingIdentifier) -> Vec<String> {
            vec![node.name.clone()]
        }
    }

    struct CountNumbers;

    impl MonoidalReducer for CountNumbers {
        type State = usize;

        fn reduce_literal_numeric_expression(&mut self, _node: &LiteralNumericExpression) -> usize {
            1
        }
    }

    fn program() -> Program {
        Program::from_json(
            r#"{
                "type": "Script",
                "directives": [],
                "statements": [
                    {"type": "VariableDeclarationStatement", "declaration": {
                        "type": "VariableDeclaration", "kind": "var", "declarators": [{
                            "type": "VariableDeclarator",
                            "binding": {"type": "BindingIdentifier", "name": "x"},
                            "init": {"type": "BinaryExpression", "operator": "+",
                                "left": {"type": "IdentifierExpression", "name": "a"},
                                "right": {"type": "LiteralNumericExpression", "value": 1}}
                        }]
                    }},
                    {"type": "ExpressionStatement", "expression": {
                        "type": "ArrayExpression", "elements": [
                            null,
                            {"type": "LiteralNumericExpression", "value": 2},
                            {"type": "IdentifierExpression", "name": "b"}
                        ]
                    }}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_collects_in_source_order() {
        let names = fold_program(&mut Monoidal(Identifiers), &program());
        assert_eq!(names, vec!["x", "a", "b"]);
    }

    #[test]
    fn test_counts_through_holes() {
        assert_eq!(fold_program(&mut Monoidal(CountNumbers), &program()), 2);
    }

    #[test]
    fn test_monoid_laws_for_bool() {
        assert!(!bool::identity());
        assert!(true.append(false));
        assert!(!false.append(bool::identity()));
    }
}
