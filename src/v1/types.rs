use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use crate::error::{RuntimeError, RuntimeResult};
use crate::v1::expr::BinaryOp;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum VarType{
    Integer,
    Real,
    Boolean,
    Text
}

impl VarType {
    pub fn default_value(&self)->Value{
        match self {
            VarType::Integer => Value::Integer(0),
            VarType::Real => Value::Real(0.0),
            VarType::Boolean => Value::Boolean(false),
            VarType::Text => Value::Text(String::new()),
        }
    }
    pub fn keyword(&self)->&'static str{
        match self {
            VarType::Integer => "ENTERO",
            VarType::Real => "REAL",
            VarType::Boolean => "LOGICO",
            VarType::Text => "TEXTO",
        }
    }
}
impl FromStr for VarType {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ENTERO" => Ok(VarType::Integer),
            "REAL" => Ok(VarType::Real),
            "LOGICO" => Ok(VarType::Boolean),
            "TEXTO"|"CARACTER" => Ok(VarType::Text),
            _ => Err(RuntimeError::UnknownType{name:s.to_string()})
        }
    }
}
impl Display for VarType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.keyword())
    }
}

#[derive(Debug,Clone,PartialEq)]
pub enum Value{
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Text(String)
}
impl From<&str> for Value{
    fn from(value: &str) -> Self {
        Value::Text(String::from(value))
    }
}
impl From<String> for Value{
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}
impl From<i64> for Value{
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}
impl From<f64> for Value{
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(i) => write!(f,"{i}"),
            Value::Real(r) => write!(f,"{}",format_real(*r)),
            Value::Boolean(true) => write!(f,"Verdadero"),
            Value::Boolean(false) => write!(f,"Falso"),
            Value::Text(s) => write!(f,"{s}"),
        }
    }
}
fn assign_mismatch(var_type:VarType,value:&Value,name:&str)->RuntimeError{
    RuntimeError::type_mismatch(format!(
        "No se puede asignar valor '{value}' (tipo {}) a variable {} '{name}'.",
        value.type_name(),
        type_adjective(var_type)
    ))
}
/// Whole reals keep one decimal, a zero real prints `0.0` and never `0`.
fn format_real(r:f64)->String{
    if r.is_finite()&&r.fract()==0.0&&r.abs()<1e16{
        return format!("{r:.1}")
    }
    format!("{r}")
}

const BOOLEAN_TRUE:[&str;5]=["verdadero","v","true","t","1"];
const BOOLEAN_FALSE:[&str;4]=["falso","f","false","0"];

impl Value{
    pub fn type_name(&self)->&'static str{
        match self {
            Value::Integer(_) => "ENTERO",
            Value::Real(_) => "REAL",
            Value::Boolean(_) => "LOGICO",
            Value::Text(_) => "TEXTO",
        }
    }
    pub fn is_text(&self)->bool{
        matches!(self,Value::Text(_))
    }
    pub fn as_bool(&self)->Option<bool>{
        match self {
            Value::Boolean(b)=>Some(*b),
            _=>None
        }
    }
    pub fn as_integer(&self)->Option<i64>{
        match self {
            Value::Integer(i)=>Some(*i),
            _=>None
        }
    }
    pub fn convert_float(&self)->Option<f64>{
        match self {
            Value::Integer(i)=>Some(*i as f64),
            Value::Real(r)=>Some(*r),
            _=>None
        }
    }

    /// Converts a value for storage in a variable declared as `var_type`.
    pub fn coerce_to(self,var_type:VarType,name:&str)->RuntimeResult<Value>{
        match (var_type,self) {
            (VarType::Integer,Value::Integer(i)) => Ok(Value::Integer(i)),
            (VarType::Integer,Value::Real(r)) => truncate(r).ok_or_else(||RuntimeError::IntegerOverflow{
                operation:format!("{name} <- {}",format_real(r))
            }),
            (VarType::Integer,Value::Text(s)) => match s.trim().parse::<i64>() {
                Ok(i) => Ok(Value::Integer(i)),
                Err(_) => Err(assign_mismatch(VarType::Integer,&Value::Text(s),name))
            },
            (VarType::Real,Value::Integer(i)) => Ok(Value::Real(i as f64)),
            (VarType::Real,Value::Real(r)) => Ok(Value::Real(r)),
            (VarType::Boolean,Value::Boolean(b)) => Ok(Value::Boolean(b)),
            (VarType::Text,v) => Ok(Value::Text(v.to_string())),
            (t,v) => Err(assign_mismatch(t,&v,name))
        }
    }
    /// Converts one raw console line for `LEA`.
    pub fn from_input(raw:&str,var_type:VarType,name:&str)->RuntimeResult<Value>{
        let invalid=||RuntimeError::InvalidInput{input:raw.to_string(),name:name.to_string(),var_type};
        let trimmed=raw.trim();
        match var_type {
            VarType::Integer => trimmed.parse::<i64>().map(Value::Integer).map_err(|_|invalid()),
            VarType::Real => trimmed.parse::<f64>().map(Value::Real).map_err(|_|invalid()),
            VarType::Boolean => {
                let lower=trimmed.to_lowercase();
                if BOOLEAN_TRUE.contains(&lower.as_str()){
                    return Ok(Value::Boolean(true))
                }
                if BOOLEAN_FALSE.contains(&lower.as_str()){
                    return Ok(Value::Boolean(false))
                }
                Err(invalid())
            }
            VarType::Text => Ok(Value::Text(raw.to_string())),
        }
    }

    pub fn try_add(&self,rhs:&Value)->RuntimeResult<Value>{
        if self.is_text()||rhs.is_text(){
            return Ok(Value::Text(format!("{self}{rhs}")))
        }
        self.arithmetic(rhs,BinaryOp::Plus,i64::checked_add,|a,b|a+b)
    }
    pub fn try_sub(&self,rhs:&Value)->RuntimeResult<Value>{
        self.arithmetic(rhs,BinaryOp::Minus,i64::checked_sub,|a,b|a-b)
    }
    pub fn try_mul(&self,rhs:&Value)->RuntimeResult<Value>{
        self.arithmetic(rhs,BinaryOp::Mul,i64::checked_mul,|a,b|a*b)
    }
    /// Division always produces a real.
    pub fn try_div(&self,rhs:&Value)->RuntimeResult<Value>{
        let (a,b)=self.numeric_pair(rhs,BinaryOp::Div)?;
        if b==0.0{
            return Err(RuntimeError::DivisionByZero)
        }
        Ok(Value::Real(a/b))
    }
    /// Remainder takes the sign of the divisor.
    pub fn try_rem(&self,rhs:&Value)->RuntimeResult<Value>{
        let (_,b)=self.numeric_pair(rhs,BinaryOp::Mod)?;
        if b==0.0{
            return Err(RuntimeError::ModuloByZero)
        }
        self.arithmetic(rhs,BinaryOp::Mod,floored_rem,|a,b|{
            let r=a%b;
            if r!=0.0&&(r<0.0)!=(b<0.0){ r+b }else{ r }
        })
    }
    pub fn try_pow(&self,rhs:&Value)->RuntimeResult<Value>{
        let (a,b)=self.numeric_pair(rhs,BinaryOp::Pow)?;
        if a==0.0&&b<0.0{
            return Err(RuntimeError::DivisionByZero)
        }
        match (self,rhs) {
            (Value::Integer(base),Value::Integer(exp)) if *exp>=0 => {
                u32::try_from(*exp).ok()
                    .and_then(|e|base.checked_pow(e))
                    .map(Value::Integer)
                    .ok_or_else(||overflow(self,BinaryOp::Pow,rhs))
            }
            _ => Ok(Value::Real(a.powf(b)))
        }
    }
    /// `==`: numbers compare across ENTERO/REAL, unrelated types are never equal.
    pub fn loose_eq(&self,rhs:&Value)->bool{
        match (self,rhs) {
            (Value::Integer(a),Value::Integer(b)) => a==b,
            (Value::Text(a),Value::Text(b)) => a==b,
            (Value::Boolean(a),Value::Boolean(b)) => a==b,
            _ => match (self.convert_float(),rhs.convert_float()) {
                (Some(a),Some(b)) => a==b,
                _ => false
            }
        }
    }
    /// Ordering for `< > <= >=`; `None` when a real is NaN.
    pub fn try_cmp(&self,rhs:&Value,op:BinaryOp)->RuntimeResult<Option<Ordering>>{
        match (self,rhs) {
            (Value::Integer(a),Value::Integer(b)) => Ok(Some(a.cmp(b))),
            (Value::Text(a),Value::Text(b)) => Ok(Some(a.cmp(b))),
            (Value::Boolean(a),Value::Boolean(b)) => Ok(Some(a.cmp(b))),
            _ => {
                let (a,b)=self.numeric_pair(rhs,op)?;
                Ok(a.partial_cmp(&b))
            }
        }
    }
    /// `Y` / `O` without truthiness: both sides must be LOGICO.
    pub fn try_logical(&self,rhs:&Value,op:BinaryOp)->RuntimeResult<Value>{
        match (self,rhs) {
            (Value::Boolean(a),Value::Boolean(b)) => match op {
                BinaryOp::And => Ok(Value::Boolean(*a&&*b)),
                BinaryOp::Or => Ok(Value::Boolean(*a||*b)),
                _ => Err(RuntimeError::Internal(format!("Operador lógico desconocido '{}'",op.symbol())))
            },
            _ => Err(RuntimeError::type_mismatch(format!(
                "Operador '{}' requiere operandos lógicos. Se obtuvo {} y {}",
                op.symbol(),
                self.type_name(),
                rhs.type_name()
            )))
        }
    }

    fn numeric_pair(&self,rhs:&Value,op:BinaryOp)->RuntimeResult<(f64,f64)>{
        match (self.convert_float(),rhs.convert_float()) {
            (Some(a),Some(b)) => Ok((a,b)),
            _ => Err(RuntimeError::type_mismatch(format!(
                "Operador '{}' no admite operandos de tipo {} y {}",
                op.symbol(),
                self.type_name(),
                rhs.type_name()
            )))
        }
    }
    fn arithmetic(&self,rhs:&Value,op:BinaryOp,int_op:fn(i64,i64)->Option<i64>,real_op:fn(f64,f64)->f64)->RuntimeResult<Value>{
        if let (Value::Integer(a),Value::Integer(b))=(self,rhs){
            return int_op(*a,*b).map(Value::Integer).ok_or_else(||overflow(self,op,rhs))
        }
        let (a,b)=self.numeric_pair(rhs,op)?;
        Ok(Value::Real(real_op(a,b)))
    }
}

fn floored_rem(a:i64,b:i64)->Option<i64>{
    let r=a.checked_rem(b)?;
    if r!=0&&(r<0)!=(b<0){
        return Some(r+b)
    }
    Some(r)
}
fn truncate(r:f64)->Option<Value>{
    let t=r.trunc();
    if !t.is_finite()||t< i64::MIN as f64||t>=i64::MAX as f64{
        return None
    }
    Some(Value::Integer(t as i64))
}
fn overflow(lhs:&Value,op:BinaryOp,rhs:&Value)->RuntimeError{
    RuntimeError::IntegerOverflow{operation:format!("{lhs} {} {rhs}",op.symbol())}
}
fn type_adjective(t:VarType)->&'static str{
    match t {
        VarType::Integer => "entera",
        VarType::Real => "real",
        VarType::Boolean => "lógica",
        VarType::Text => "de texto",
    }
}
