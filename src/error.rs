use std::io;
use std::time::Duration;
use thiserror::Error;
use crate::v1::position::Position;
use crate::v1::types::VarType;

pub type PseudoResult<T>=Result<T,PseudoError>;
pub type RuntimeResult<T>=Result<T,RuntimeError>;
pub type ConsoleResult<T>=Result<T,ConsoleError>;

/// Failure of a whole run, by pipeline stage.
#[derive(Debug,Error)]
pub enum PseudoError{
    #[error("{}",join_lines(.0))]
    Lexical(Vec<LexError>),
    #[error("{}",join_lines(.0))]
    Syntax(Vec<SyntaxError>),
    #[error("{}",.0.report_line())]
    Runtime(#[from] RuntimeError),
}

impl PseudoError {
    /// One console line per collected error.
    pub fn report_lines(&self)->Vec<String>{
        match self {
            PseudoError::Lexical(errors) => errors.iter().map(|e|e.to_string()).collect(),
            PseudoError::Syntax(errors) => errors.iter().map(|e|e.to_string()).collect(),
            PseudoError::Runtime(e) => vec![e.report_line()],
        }
    }
}

fn join_lines<T:ToString>(errors:&[T])->String{
    errors.iter().map(|e|e.to_string()).collect::<Vec<String>>().join("\n")
}

#[derive(Debug,Error,Clone,PartialEq,Eq)]
#[error("Error Léxico: Caracter no reconocido '{character}' {position}")]
pub struct LexError{
    pub character:char,
    pub position:Position,
}

#[derive(Debug,Error,Clone,PartialEq,Eq)]
#[error("Error Sintáctico: {message} {position}")]
pub struct SyntaxError{
    pub message:String,
    pub position:Position,
}

impl SyntaxError {
    pub fn new(message:impl Into<String>,position:Position)->Self{
        Self{message:message.into(),position}
    }
}

#[derive(Debug,Error)]
pub enum RuntimeError{
    #[error("Variable '{name}' no ha sido definida.")]
    UndefinedVariable{name:String},
    #[error("{detail}")]
    TypeMismatch{detail:String},
    #[error("Entrada '{input}' no es válida para la variable '{name}' de tipo {var_type}.")]
    InvalidInput{input:String,name:String,var_type:VarType},
    #[error("División por cero.")]
    DivisionByZero,
    #[error("Módulo por cero.")]
    ModuloByZero,
    #[error("Tipo de dato desconocido: {name}")]
    UnknownType{name:String},
    #[error("Desbordamiento numérico en la operación '{operation}'.")]
    IntegerOverflow{operation:String},
    #[error("Fallo de la consola: {0}")]
    Console(#[from] ConsoleError),
    #[error("{0}")]
    Internal(String),
}

impl RuntimeError {
    pub fn type_mismatch(detail:impl Into<String>)->Self{
        RuntimeError::TypeMismatch{detail:detail.into()}
    }
    pub fn undefined(name:impl Into<String>)->Self{
        RuntimeError::UndefinedVariable{name:name.into()}
    }
    /// Failures that are not part of the language semantics.
    pub fn is_unexpected(&self)->bool{
        matches!(self,RuntimeError::Console(_)|RuntimeError::Internal(_))
    }
    pub fn report_line(&self)->String{
        if self.is_unexpected(){
            return format!("Error Inesperado en Intérprete: {self}")
        }
        format!("Error de Ejecución: {self}")
    }
}

#[derive(Debug,Error)]
pub enum ConsoleError{
    #[error("la entrada fue cerrada")]
    Closed,
    #[error("se agotó el tiempo de espera de la entrada ({0:?})")]
    TimedOut(Duration),
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lines(){
        let err=PseudoError::Lexical(vec![
            LexError{character:'@',position:Position::new(2,3)},
            LexError{character:'$',position:Position::new(4,1)},
        ]);
        assert_eq!(err.report_lines(),vec![
            "Error Léxico: Caracter no reconocido '@' en línea 2, columna 3".to_string(),
            "Error Léxico: Caracter no reconocido '$' en línea 4, columna 1".to_string(),
        ]);
        assert_eq!(err.to_string().lines().count(),2);
    }

    #[test]
    fn test_runtime_prefix(){
        let err=RuntimeError::DivisionByZero;
        assert_eq!(err.report_line(),"Error de Ejecución: División por cero.");
        let err=RuntimeError::Console(ConsoleError::Closed);
        assert!(err.is_unexpected());
        assert_eq!(err.report_line(),"Error Inesperado en Intérprete: Fallo de la consola: la entrada fue cerrada");
        let err=SyntaxError::new("Se esperaba FINSI pero se encontró EOF ('EOF')",Position::new(9,1));
        assert_eq!(err.to_string(),"Error Sintáctico: Se esperaba FINSI pero se encontró EOF ('EOF') en línea 9, columna 1");
    }
}
