//! Type checker for Vuo ASTs.
//!
//! Walks the parsed tree bottom-up against a scope stack seeded with the
//! built-ins and rebuilds it with every node's inferred type in its info
//! slot. The first failing node aborts the walk.

mod error;
mod symbol_table;
mod types;

pub use self::error::{TypeError, TypeErrorKind};
pub use self::symbol_table::SymbolTable;
pub use self::types::Type;

use crate::lexer::Position;
use crate::parser::ast::{
    BinaryExpression, BinaryOperator, Block, Expression, FunctionCall, Id, If, Literal,
    LiteralValue, UnaryExpression, VariableDeclaration, WhileLoop,
};

/// Result of type checking a node within the AST.
type TResult<T> = Result<T, TypeError>;

/// Struct for type checking an AST.
pub struct Typechecker {
    ast: Expression<()>,
}

impl Typechecker {
    pub fn from_ast(ast: Expression<()>) -> Self {
        Self { ast }
    }

    /// Type check the contained AST and return it with the inferred type
    /// attached to each node. A fresh symbol table is built per call.
    pub fn check(&self) -> Result<Expression<Type>, TypeError> {
        let mut table = SymbolTable::default();

        self.check_expression(&self.ast, &mut table)
    }

    fn check_expression(
        &self,
        expression: &Expression<()>,
        table: &mut SymbolTable,
    ) -> TResult<Expression<Type>> {
        Ok(match expression {
            Expression::Literal(literal) => Expression::Literal(Self::check_literal(literal)),
            Expression::Id(id) => Expression::Id(self.check_identifier(id, table)?),
            Expression::Unary(unary) => {
                Expression::Unary(Box::new(self.check_unary(unary, table)?))
            }
            Expression::Binary(binary) => {
                Expression::Binary(Box::new(self.check_binary(binary, table)?))
            }
            Expression::If(if_expression) => {
                Expression::If(Box::new(self.check_if(if_expression, table)?))
            }
            Expression::While(while_loop) => {
                Expression::While(Box::new(self.check_while(while_loop, table)?))
            }
            Expression::Call(call) => Expression::Call(Box::new(self.check_call(call, table)?)),
            Expression::Declaration(declaration) => {
                Expression::Declaration(Box::new(self.check_declaration(declaration, table)?))
            }
            Expression::Block(block) => Expression::Block(self.check_block(block, table)?),
        })
    }

    fn check_literal(literal: &Literal<()>) -> Literal<Type> {
        let info = match literal.value {
            LiteralValue::Unit => Type::Unit,
            LiteralValue::Int(_) => Type::Int,
            LiteralValue::Bool(_) => Type::Bool,
        };

        Literal {
            value: literal.value,
            position: literal.position,
            info,
        }
    }

    fn check_identifier(&self, id: &Id<()>, table: &SymbolTable) -> TResult<Id<Type>> {
        // Overloaded names yield their first signature; arity-aware
        // callers go through `check_callee` instead.
        let Some([first, ..]) = table.lookup(&id.name) else {
            return Err(TypeError::new(
                TypeErrorKind::UnknownName {
                    name: id.name.clone(),
                },
                id.position,
            ));
        };

        Ok(Id {
            name: id.name.clone(),
            position: id.position,
            info: first.clone(),
        })
    }

    fn check_unary(
        &self,
        unary: &UnaryExpression<()>,
        table: &mut SymbolTable,
    ) -> TResult<UnaryExpression<Type>> {
        let operand = self.check_expression(&unary.operand, table)?;
        let info = Self::resolve_operator(
            unary.op.as_str(),
            &[operand.info()],
            table,
            unary.position,
        )?;

        Ok(UnaryExpression {
            op: unary.op,
            operand,
            position: unary.position,
            info,
        })
    }

    fn check_binary(
        &self,
        binary: &BinaryExpression<()>,
        table: &mut SymbolTable,
    ) -> TResult<BinaryExpression<Type>> {
        match binary.op {
            BinaryOperator::Assign => self.check_assignment(binary, table),
            BinaryOperator::Equal | BinaryOperator::NotEqual => {
                self.check_comparison(binary, table)
            }
            _ => {
                let left = self.check_expression(&binary.left, table)?;
                let right = self.check_expression(&binary.right, table)?;
                let info = Self::resolve_operator(
                    binary.op.as_str(),
                    &[left.info(), right.info()],
                    table,
                    binary.position,
                )?;

                Ok(BinaryExpression {
                    left,
                    op: binary.op,
                    right,
                    position: binary.position,
                    info,
                })
            }
        }
    }

    /// `a = b`: the target has to be a variable, and the value has to keep
    /// its type.
    fn check_assignment(
        &self,
        binary: &BinaryExpression<()>,
        table: &mut SymbolTable,
    ) -> TResult<BinaryExpression<Type>> {
        if !matches!(binary.left, Expression::Id(_)) {
            return Err(TypeError::new(
                TypeErrorKind::InvalidAssignmentTarget,
                binary.left.position(),
            ));
        }

        let left = self.check_expression(&binary.left, table)?;
        let right = self.check_expression(&binary.right, table)?;
        if left.info() != right.info() {
            return Err(TypeError::new(
                TypeErrorKind::TypeMismatch {
                    expected: left.info(),
                    found: right.info(),
                },
                binary.position,
            ));
        }

        let info = right.info();
        Ok(BinaryExpression {
            left,
            op: binary.op,
            right,
            position: binary.position,
            info,
        })
    }

    /// `==` / `!=`: both sides must agree, and only `Int` and `Bool` values
    /// are comparable.
    fn check_comparison(
        &self,
        binary: &BinaryExpression<()>,
        table: &mut SymbolTable,
    ) -> TResult<BinaryExpression<Type>> {
        let left = self.check_expression(&binary.left, table)?;
        let right = self.check_expression(&binary.right, table)?;

        let left_type = left.info();
        if left_type != right.info() {
            return Err(TypeError::new(
                TypeErrorKind::TypeMismatch {
                    expected: left_type,
                    found: right.info(),
                },
                binary.position,
            ));
        }
        if !matches!(left_type, Type::Int | Type::Bool) {
            return Err(TypeError::new(
                TypeErrorKind::NotComparable { found: left_type },
                binary.position,
            ));
        }

        Ok(BinaryExpression {
            left,
            op: binary.op,
            right,
            position: binary.position,
            info: Type::Bool,
        })
    }

    fn check_if(&self, if_expression: &If<()>, table: &mut SymbolTable) -> TResult<If<Type>> {
        let condition = self.check_expression(&if_expression.condition, table)?;
        if condition.info() != Type::Bool {
            return Err(TypeError::new(
                TypeErrorKind::TypeMismatch {
                    expected: Type::Bool,
                    found: condition.info(),
                },
                condition.position(),
            ));
        }

        let then_branch = self.check_expression(&if_expression.then_branch, table)?;
        let else_branch = match &if_expression.else_branch {
            Some(else_branch) => Some(self.check_expression(else_branch, table)?),
            None => None,
        };

        // The branches are not required to agree; with an else the then
        // branch decides, without one the whole expression is Unit.
        let info = if else_branch.is_some() {
            then_branch.info()
        } else {
            Type::Unit
        };

        Ok(If {
            condition,
            then_branch,
            else_branch,
            position: if_expression.position,
            info,
        })
    }

    fn check_while(
        &self,
        while_loop: &WhileLoop<()>,
        table: &mut SymbolTable,
    ) -> TResult<WhileLoop<Type>> {
        let condition = self.check_expression(&while_loop.condition, table)?;
        if condition.info() != Type::Bool {
            return Err(TypeError::new(
                TypeErrorKind::TypeMismatch {
                    expected: Type::Bool,
                    found: condition.info(),
                },
                condition.position(),
            ));
        }

        let body = self.check_expression(&while_loop.body, table)?;

        Ok(WhileLoop {
            condition,
            body,
            position: while_loop.position,
            info: Type::Unit,
        })
    }

    fn check_call(
        &self,
        call: &FunctionCall<()>,
        table: &mut SymbolTable,
    ) -> TResult<FunctionCall<Type>> {
        let callee = self.check_callee(&call.callee, call.arguments.len(), table)?;

        let Type::Function { params, returns } = callee.info() else {
            return Err(TypeError::new(
                TypeErrorKind::NotCallable {
                    found: callee.info(),
                },
                call.position,
            ));
        };
        if params.len() != call.arguments.len() {
            return Err(TypeError::new(
                TypeErrorKind::ArityMismatch {
                    expected: params.len(),
                    found: call.arguments.len(),
                },
                call.position,
            ));
        }

        let mut arguments = vec![];
        for (argument, param) in call.arguments.iter().zip(&params) {
            let argument = self.check_expression(argument, table)?;
            if argument.info() != *param {
                return Err(TypeError::new(
                    TypeErrorKind::TypeMismatch {
                        expected: param.clone(),
                        found: argument.info(),
                    },
                    argument.position(),
                ));
            }
            arguments.push(argument);
        }

        Ok(FunctionCall {
            callee,
            arguments,
            position: call.position,
            info: *returns,
        })
    }

    /// Check the callee of a call. An identifier callee with several
    /// signatures picks the first one with matching arity.
    fn check_callee(
        &self,
        callee: &Expression<()>,
        arity: usize,
        table: &mut SymbolTable,
    ) -> TResult<Expression<Type>> {
        let Expression::Id(id) = callee else {
            return self.check_expression(callee, table);
        };

        let Some(types) = table.lookup(&id.name) else {
            return Err(TypeError::new(
                TypeErrorKind::UnknownName {
                    name: id.name.clone(),
                },
                id.position,
            ));
        };
        let selected = types
            .iter()
            .find(|t| matches!(t, Type::Function { params, .. } if params.len() == arity))
            .or_else(|| types.first())
            .ok_or_else(|| {
                TypeError::new(
                    TypeErrorKind::UnknownName {
                        name: id.name.clone(),
                    },
                    id.position,
                )
            })?;

        Ok(Expression::Id(Id {
            name: id.name.clone(),
            position: id.position,
            info: selected.clone(),
        }))
    }

    /// The value is typed before the name is bound, so a declaration's
    /// right-hand side can never see its own left-hand side.
    fn check_declaration(
        &self,
        declaration: &VariableDeclaration<()>,
        table: &mut SymbolTable,
    ) -> TResult<VariableDeclaration<Type>> {
        let value = self.check_expression(&declaration.value, table)?;
        let value_type = value.info();

        if let Some(annotation) = &declaration.type_annotation {
            let annotated: Type = annotation.name.parse().map_err(|_| {
                TypeError::new(
                    TypeErrorKind::UnknownTypeAnnotation {
                        name: annotation.name.clone(),
                    },
                    annotation.position,
                )
            })?;
            if annotated != value_type {
                return Err(TypeError::new(
                    TypeErrorKind::TypeMismatch {
                        expected: annotated,
                        found: value_type,
                    },
                    value.position(),
                ));
            }
        }

        if !table.insert(&declaration.name.name, value_type.clone()) {
            return Err(TypeError::new(
                TypeErrorKind::DuplicateName {
                    name: declaration.name.name.clone(),
                },
                declaration.name.position,
            ));
        }

        Ok(VariableDeclaration {
            name: Id {
                name: declaration.name.name.clone(),
                position: declaration.name.position,
                info: value_type,
            },
            type_annotation: declaration.type_annotation.clone(),
            value,
            position: declaration.position,
            info: Type::Unit,
        })
    }

    fn check_block(&self, block: &Block<()>, table: &mut SymbolTable) -> TResult<Block<Type>> {
        table.push();

        let mut statements = vec![];
        for statement in &block.statements {
            statements.push(self.check_expression(statement, table)?);
        }

        table.pop();

        let info = statements
            .last()
            .map(|statement| statement.info())
            .unwrap_or(Type::Unit);

        Ok(Block {
            statements,
            position: block.position,
            info,
        })
    }

    /// Select the first signature of `op` matching the operand types
    /// exactly, by arity and structural equality, and yield its return
    /// type.
    fn resolve_operator(
        op: &str,
        operands: &[Type],
        table: &SymbolTable,
        position: Position,
    ) -> TResult<Type> {
        let Some(signatures) = table.lookup(op) else {
            return Err(TypeError::new(
                TypeErrorKind::UnknownName { name: op.to_owned() },
                position,
            ));
        };

        let mut mismatch = None;
        for signature in signatures {
            let Type::Function { params, returns } = signature else {
                continue;
            };
            if params.len() != operands.len() {
                continue;
            }
            match params
                .iter()
                .zip(operands)
                .find(|(param, operand)| param != operand)
            {
                None => return Ok((**returns).clone()),
                Some((param, operand)) => {
                    if mismatch.is_none() {
                        mismatch = Some((param.clone(), operand.clone()));
                    }
                }
            }
        }

        let Some((expected, found)) = mismatch else {
            return Err(TypeError::new(
                TypeErrorKind::UnknownName { name: op.to_owned() },
                position,
            ));
        };
        Err(TypeError::new(
            TypeErrorKind::TypeMismatch { expected, found },
            position,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Lexer, Position};
    use crate::parser::parse;

    fn check(source: &str) -> Result<Type, TypeError> {
        let tokens = Lexer::new(source).lex().expect("lexing should succeed");
        let ast = parse(tokens).expect("parsing should succeed");

        Typechecker::from_ast(ast).check().map(|checked| checked.info())
    }

    #[test]
    fn test_arithmetic_is_int() {
        assert_eq!(Ok(Type::Int), check("1 + 2 * 3"));
        assert_eq!(Ok(Type::Int), check("7 % (1 - 2) / 3"));
    }

    #[test]
    fn test_comparisons_are_bool() {
        assert_eq!(Ok(Type::Bool), check("1 < 2"));
        assert_eq!(Ok(Type::Bool), check("1 == 2"));
        assert_eq!(Ok(Type::Bool), check("true != false"));
        assert_eq!(Ok(Type::Bool), check("not (1 >= 2) and true or false"));
    }

    #[test]
    fn test_if_else_takes_the_then_type() {
        assert_eq!(Ok(Type::Int), check("if 1 < 2 then 3 else 4"));
        // The branches are deliberately not required to agree.
        assert_eq!(Ok(Type::Int), check("if true then 1 else false"));
    }

    #[test]
    fn test_if_without_else_is_unit() {
        assert_eq!(Ok(Type::Unit), check("if true then 1"));
    }

    #[test]
    fn test_if_condition_must_be_bool() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::TypeMismatch {
                    expected: Type::Bool,
                    found: Type::Int,
                },
                Position::new(1, 4),
            )),
            check("if 1 then 2")
        );
    }

    #[test]
    fn test_while_is_unit() {
        assert_eq!(Ok(Type::Unit), check("while 1 < 2 do print_int(1)"));
    }

    #[test]
    fn test_declaration_assignment_use() {
        assert_eq!(Ok(Type::Int), check("var x: Int = 1; x = 2; x"));
        assert_eq!(Ok(Type::Bool), check("var x = true; not x"));
    }

    #[test]
    fn test_assignment_chain() {
        assert_eq!(Ok(Type::Int), check("var a = 1; var b = 2; a = b = 3"));
    }

    #[test]
    fn test_shadowing_in_nested_scopes() {
        assert_eq!(
            Ok(Type::Unit),
            check("{ var x = 1; { var x = true; print_bool(x) }; print_int(x) }")
        );
    }

    #[test]
    fn test_builtin_can_be_shadowed_inside_a_block() {
        assert_eq!(Ok(Type::Int), check("{ var print_int = 1; print_int }"));
    }

    #[test]
    fn test_block_boundaries() {
        assert_eq!(Ok(Type::Unit), check(""));
        assert_eq!(Ok(Type::Unit), check("{}"));
        assert_eq!(Ok(Type::Int), check("{1}"));
        assert_eq!(Ok(Type::Unit), check("{1;}"));
    }

    #[test]
    fn test_arity_mismatch() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::ArityMismatch {
                    expected: 1,
                    found: 2,
                },
                Position::new(1, 10),
            )),
            check("print_int(1, 2)")
        );
    }

    #[test]
    fn test_operator_operand_mismatch() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::TypeMismatch {
                    expected: Type::Bool,
                    found: Type::Int,
                },
                Position::new(1, 3),
            )),
            check("1 and 2")
        );
    }

    #[test]
    fn test_unary_minus_rejects_bool() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::TypeMismatch {
                    expected: Type::Int,
                    found: Type::Bool,
                },
                Position::new(1, 1),
            )),
            check("- true")
        );
    }

    #[test]
    fn test_duplicate_declaration() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::DuplicateName { name: "x".into() },
                Position::new(1, 16),
            )),
            check("var x = 1; var x = 2")
        );
    }

    #[test]
    fn test_unknown_identifier() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::UnknownName { name: "y".into() },
                Position::new(1, 1),
            )),
            check("y = 1")
        );
    }

    #[test]
    fn test_declaration_value_cannot_see_its_own_name() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::UnknownName { name: "x".into() },
                Position::new(1, 9),
            )),
            check("var x = x")
        );
    }

    #[test]
    fn test_assignment_target_must_be_a_variable() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::InvalidAssignmentTarget,
                Position::new(1, 1),
            )),
            check("1 = 2")
        );
    }

    #[test]
    fn test_assignment_keeps_the_type() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::TypeMismatch {
                    expected: Type::Int,
                    found: Type::Bool,
                },
                Position::new(1, 14),
            )),
            check("var x = 1; x = true")
        );
    }

    #[test]
    fn test_annotation_must_match_value() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::TypeMismatch {
                    expected: Type::Int,
                    found: Type::Bool,
                },
                Position::new(1, 14),
            )),
            check("var x: Int = true")
        );
    }

    #[test]
    fn test_unknown_annotation() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::UnknownTypeAnnotation {
                    name: "Float".into(),
                },
                Position::new(1, 8),
            )),
            check("var x: Float = 1")
        );
    }

    #[test]
    fn test_calling_a_non_function() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::NotCallable { found: Type::Int },
                Position::new(1, 13),
            )),
            check("var x = 1; x(1)")
        );
    }

    #[test]
    fn test_argument_type_mismatch() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::TypeMismatch {
                    expected: Type::Int,
                    found: Type::Bool,
                },
                Position::new(1, 11),
            )),
            check("print_int(true)")
        );
    }

    #[test]
    fn test_functions_are_not_comparable() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::NotComparable {
                    found: Type::function(vec![Type::Int], Type::Unit),
                },
                Position::new(1, 11),
            )),
            check("print_int == print_int")
        );
    }

    #[test]
    fn test_unit_values_are_not_comparable() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::NotComparable { found: Type::Unit },
                Position::new(1, 4),
            )),
            check("{} == {}")
        );
    }

    #[test]
    fn test_equality_sides_must_agree() {
        assert_eq!(
            Err(TypeError::new(
                TypeErrorKind::TypeMismatch {
                    expected: Type::Int,
                    found: Type::Bool,
                },
                Position::new(1, 3),
            )),
            check("1 == true")
        );
    }

    #[test]
    fn test_read_int() {
        assert_eq!(Ok(Type::Int), check("read_int()"));
        assert_eq!(Ok(Type::Unit), check("print_int(read_int())"));
    }

    #[test]
    fn test_typed_ast_carries_types_on_every_node() {
        let tokens = Lexer::new("1 + 2 < 4").lex().expect("should lex");
        let ast = parse(tokens).expect("should parse");
        let checked = Typechecker::from_ast(ast).check().expect("should check");

        let Expression::Binary(comparison) = checked else {
            panic!("expected binary expression");
        };
        assert_eq!(Type::Bool, comparison.info);
        assert_eq!(Type::Int, comparison.left.info());
        assert_eq!(Type::Int, comparison.right.info());
    }
}
