use std::fmt::{Debug, Display};

use super::{
    expressions::{
        BooleanLiteral, CallExpr, FunctionLiteral, Identifier, IfExpr, InfixExpr, IntegerLiteral,
        PrefixExpr,
    },
    statements::{ExpressionStmt, LetStmt, ReturnStmt},
};

/// Node Trait
///
/// Shared by every node of the tree. `Display` gives the canonical textual
/// rendering of the subtree.
pub trait Node: Debug + Display {
    /// Returns the exact source text of the token that introduced the node.
    fn token_literal(&self) -> &str;
}

/// Root of the tree: the top-level statements in source order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(|stmt| stmt.token_literal())
            .unwrap_or("")
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

/// Statement
#[derive(Debug, Clone)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
}

impl Node for Stmt {
    fn token_literal(&self) -> &str {
        match self {
            Stmt::Let(stmt) => stmt.token_literal(),
            Stmt::Return(stmt) => stmt.token_literal(),
            Stmt::Expression(stmt) => stmt.token_literal(),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Let(stmt) => write!(f, "{}", stmt),
            Stmt::Return(stmt) => write!(f, "{}", stmt),
            Stmt::Expression(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Expression
#[derive(Debug, Clone)]
pub enum Expr {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(IfExpr),
    Function(FunctionLiteral),
    Call(CallExpr),
}

impl Expr {
    fn as_node(&self) -> &dyn Node {
        match self {
            Expr::Identifier(expr) => expr,
            Expr::Integer(expr) => expr,
            Expr::Boolean(expr) => expr,
            Expr::Prefix(expr) => expr,
            Expr::Infix(expr) => expr,
            Expr::If(expr) => expr,
            Expr::Function(expr) => expr,
            Expr::Call(expr) => expr,
        }
    }
}

impl Node for Expr {
    fn token_literal(&self) -> &str {
        self.as_node().token_literal()
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_node())
    }
}

/// Implements [`Node`] for node structs that keep their introducing token in a
/// `token` field.
macro_rules! impl_node {
    ($($node:ty),* $(,)?) => {
        $(
            impl Node for $node {
                fn token_literal(&self) -> &str {
                    &self.token.value
                }
            }
        )*
    };
}

impl_node!(
    LetStmt,
    ReturnStmt,
    ExpressionStmt,
    super::statements::BlockStmt,
    Identifier,
    IntegerLiteral,
    BooleanLiteral,
    PrefixExpr,
    InfixExpr,
    IfExpr,
    FunctionLiteral,
    CallExpr,
);
