use std::cmp::Ordering;
use crate::console::Console;
use crate::error::{RuntimeError, RuntimeResult};
use crate::v1::expr::{BinaryOp, Expr};
use crate::v1::stmt::{Program, Stmt};
use crate::v1::symbols::SymbolTable;
use crate::v1::types::Value;

/// Tree-walking evaluator. Owns the variables of one run and talks to the
/// outside world only through its [`Console`].
pub struct Interpreter<C:Console>{
    symbols:SymbolTable,
    console:C
}

impl<C:Console> Interpreter<C>{
    pub fn new(console:C)->Self{
        Self{symbols:SymbolTable::new(),console}
    }
    pub fn symbols(&self)->&SymbolTable{
        &self.symbols
    }
    pub fn console(&self)->&C{
        &self.console
    }
    pub fn into_console(self)->C{
        self.console
    }
    /// Runs the program until it ends or the first runtime error. The error
    /// is written to the console before it is returned.
    pub fn interpret(&mut self,program:&Program)->RuntimeResult<()>{
        if let Err(e)=self.execute(&program.body){
            self.console.write_line(&e.report_line());
            return Err(e)
        }
        Ok(())
    }
    pub fn execute(&mut self,body:&[Stmt])->RuntimeResult<()>{
        for stmt in body{
            self.eval_stmt(stmt)?;
        }
        Ok(())
    }
    pub fn eval_stmt(&mut self,stmt:&Stmt)->RuntimeResult<()>{
        match stmt {
            Stmt::VarDecl(names,var_type,_) => {
                for name in names{
                    self.symbols.define(name,var_type.default_value(),*var_type);
                }
            }
            Stmt::Show(values,_) => {
                let mut line=String::new();
                for expr in values{
                    line.push_str(&self.eval_expr(expr)?.to_string());
                }
                self.console.write_line(&line);
            }
            Stmt::Read(name,_) => {
                let var_type=self.symbols.get_type(name)?;
                let raw=self.console.read_line()?;
                let value=Value::from_input(&raw,var_type,name)?;
                self.symbols.assign(name,value)?;
            }
            Stmt::Assign(name,expr,_) => {
                let var_type=self.symbols.get_type(name)?;
                let value=self.eval_expr(expr)?.coerce_to(var_type,name)?;
                self.symbols.assign(name,value)?;
            }
            Stmt::If(condition,then_body,else_body,_) => {
                let value=self.eval_expr(condition)?;
                let Some(branch)=value.as_bool() else {
                    return Err(RuntimeError::type_mismatch(format!(
                        "La condición del SI debe ser un valor lógico, se obtuvo {value} (tipo {}).",
                        value.type_name()
                    )))
                };
                if branch{
                    self.execute(then_body)?;
                }else if let Some(else_body)=else_body{
                    self.execute(else_body)?;
                }
            }
        }
        Ok(())
    }
    pub fn eval_expr(&self,expr:&Expr)->RuntimeResult<Value>{
        match expr {
            Expr::Literal(value,_) => Ok(value.clone()),
            Expr::Variable(name,_) => self.symbols.get(name).cloned(),
            Expr::Binary(op,l,r,_) => {
                let left=self.eval_expr(l)?;
                let right=self.eval_expr(r)?;
                match op {
                    BinaryOp::Plus => left.try_add(&right),
                    BinaryOp::Minus => left.try_sub(&right),
                    BinaryOp::Mul => left.try_mul(&right),
                    BinaryOp::Div => left.try_div(&right),
                    BinaryOp::Mod => left.try_rem(&right),
                    BinaryOp::Pow => left.try_pow(&right),
                    BinaryOp::Equal => Ok(Value::Boolean(left.loose_eq(&right))),
                    BinaryOp::NotEqual => Ok(Value::Boolean(!left.loose_eq(&right))),
                    BinaryOp::Less|BinaryOp::Greater|BinaryOp::LessEqual|BinaryOp::GreaterEqual => {
                        let ordering=left.try_cmp(&right,*op)?;
                        Ok(Value::Boolean(ordering.is_some_and(|o|holds(*op,o))))
                    }
                    BinaryOp::And|BinaryOp::Or => left.try_logical(&right,*op),
                }
            }
        }
    }
}

fn holds(op:BinaryOp,ordering:Ordering)->bool{
    match op {
        BinaryOp::Less => ordering.is_lt(),
        BinaryOp::Greater => ordering.is_gt(),
        BinaryOp::LessEqual => ordering.is_le(),
        _ => ordering.is_ge(),
    }
}
