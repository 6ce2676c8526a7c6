use crate::v1::expr::Expr;
use crate::v1::position::Position;
use crate::v1::types::VarType;

#[derive(Debug,Clone,PartialEq)]
pub enum Stmt{
    /// DEFINA a, b COMO ENTERO
    VarDecl(Vec<String>,VarType,Position),
    /// MUESTRE "x = ", x
    Show(Vec<Expr>,Position),
    /// LEA x
    Read(String,Position),
    /// x <- expr
    Assign(String,Box<Expr>,Position),
    /// SI cond ENTONCES ... [SINO ...] FINSI
    If(Box<Expr>,Vec<Stmt>,Option<Vec<Stmt>>,Position)
}

impl Stmt{
    pub fn position(&self)->Position{
        match self {
            Stmt::VarDecl(_,_,pos) => *pos,
            Stmt::Show(_,pos) => *pos,
            Stmt::Read(_,pos) => *pos,
            Stmt::Assign(_,_,pos) => *pos,
            Stmt::If(_,_,_,pos) => *pos,
        }
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct Program{
    pub name:String,
    pub body:Vec<Stmt>,
    pub position:Position
}

impl Program {
    pub fn new(name:String,body:Vec<Stmt>,position:Position)->Self{
        Self{name,body,position}
    }
}
