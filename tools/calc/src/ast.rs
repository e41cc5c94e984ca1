// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Typed AST over the arithmetic parse tree, and its evaluator.

use crate::grammar;
use sprig_parser::CSTNode;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("not a valid arithmetic expression")]
    UnparsableExpression,
    #[error("integer literal out of range: {0}")]
    BadLiteral(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("arithmetic overflow")]
    Overflow,
    #[error("unexpected node in parse tree: {0}")]
    UnexpectedNode(String),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn from_operator(node: &CSTNode) -> Result<Self, CalcError> {
        match node.as_bytes() {
            b"+" => Ok(Self::Add),
            b"-" => Ok(Self::Sub),
            b"*" => Ok(Self::Mul),
            b"/" => Ok(Self::Div),
            _ => Err(CalcError::UnexpectedNode(node.text().into_owned())),
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Value(i64),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

/// Fold a parse tree into an [`Expr`]. `sum` and `product` nodes carry their
/// operands interleaved with `sum_op`/`product_op` operator nodes and fold
/// left-associatively.
pub fn build(node: &CSTNode) -> Result<Expr, CalcError> {
    let tag = node.tag();
    if tag == grammar::grammar.tag() || tag == grammar::expr.tag() || tag == grammar::value.tag() {
        let child = node
            .children()
            .first()
            .ok_or_else(|| CalcError::UnexpectedNode(node.text().into_owned()))?;
        build(child)
    } else if tag == grammar::num.tag() {
        let text = node.text();
        text.parse::<i64>()
            .map(Expr::Value)
            .map_err(|_| CalcError::BadLiteral(text.into_owned()))
    } else if tag == grammar::sum.tag() || tag == grammar::product.tag() {
        let mut operands = node.children().iter();
        let first = operands
            .next()
            .ok_or_else(|| CalcError::UnexpectedNode(node.text().into_owned()))?;
        let mut acc = build(first)?;
        while let (Some(op), Some(rhs)) = (operands.next(), operands.next()) {
            let op = BinaryOp::from_operator(op)?;
            acc = Expr::Binary(op, Box::new(acc), Box::new(build(rhs)?));
        }
        Ok(acc)
    } else {
        Err(CalcError::UnexpectedNode(node.text().into_owned()))
    }
}

pub fn eval(expr: &Expr) -> Result<i64, CalcError> {
    match expr {
        Expr::Value(n) => Ok(*n),
        Expr::Binary(op, lhs, rhs) => {
            let lhs = eval(lhs)?;
            let rhs = eval(rhs)?;
            match op {
                BinaryOp::Add => lhs.checked_add(rhs).ok_or(CalcError::Overflow),
                BinaryOp::Sub => lhs.checked_sub(rhs).ok_or(CalcError::Overflow),
                BinaryOp::Mul => lhs.checked_mul(rhs).ok_or(CalcError::Overflow),
                BinaryOp::Div => {
                    if rhs == 0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    lhs.checked_div(rhs).ok_or(CalcError::Overflow)
                }
            }
        }
    }
}
