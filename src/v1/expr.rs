use crate::v1::position::Position;
use crate::v1::token::TokenKind;
use crate::v1::types::Value;

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum BinaryOp{
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Pow,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    And,
    Or
}

impl BinaryOp {
    pub fn from_token(kind:TokenKind)->Option<Self>{
        Some(match kind {
            TokenKind::Plus => BinaryOp::Plus,
            TokenKind::Minus => BinaryOp::Minus,
            TokenKind::Mul => BinaryOp::Mul,
            TokenKind::Div => BinaryOp::Div,
            TokenKind::Mod => BinaryOp::Mod,
            TokenKind::Pow => BinaryOp::Pow,
            TokenKind::Equal => BinaryOp::Equal,
            TokenKind::NotEqual => BinaryOp::NotEqual,
            TokenKind::Less => BinaryOp::Less,
            TokenKind::Greater => BinaryOp::Greater,
            TokenKind::LessEqual => BinaryOp::LessEqual,
            TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
            TokenKind::And => BinaryOp::And,
            TokenKind::Or => BinaryOp::Or,
            _ => return None
        })
    }
    pub fn symbol(&self)->&'static str{
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "<>",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::And => "Y",
            BinaryOp::Or => "O",
        }
    }
}

#[derive(Debug,Clone,PartialEq)]
pub enum Expr{
    Literal(Value,Position),
    Variable(String,Position),
    /// Position of the operator token.
    Binary(BinaryOp,Box<Expr>,Box<Expr>,Position)
}

impl Expr {
    pub fn position(&self)->Position{
        match self {
            Expr::Literal(_, pos) => *pos,
            Expr::Variable(_, pos) => *pos,
            Expr::Binary(_, _, _, pos) => *pos,
        }
    }
    pub fn binary(op:BinaryOp,left:Expr,right:Expr,pos:Position)->Self{
        Expr::Binary(op,Box::new(left),Box::new(right),pos)
    }
}
