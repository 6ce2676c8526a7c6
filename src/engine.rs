use std::time::Instant;
use crate::console::Console;
use crate::error::{LexError, PseudoError, PseudoResult, SyntaxError};
use crate::logger::RunLogger;
use crate::v1::interpreter::Interpreter;
use crate::v1::lexer::Lexer;
use crate::v1::parser::PseudoParser;
use crate::v1::position::START;
use crate::v1::stmt::Program;
use crate::v1::token::Token;

/// Source text in, console effects out: lexing, parsing and interpretation,
/// each stage gated on the previous one succeeding.
#[derive(Debug,Clone,Default)]
pub struct PseudoEngine{
    logger:RunLogger
}

impl PseudoEngine{
    pub fn new()->Self{
        Self::default()
    }
    pub fn with_logger(logger:RunLogger)->Self{
        Self{logger}
    }
    pub fn logger(&self)->&RunLogger{
        &self.logger
    }
    pub fn tokenize(&self,source:impl AsRef<str>)->(Vec<Token>,Vec<LexError>){
        let start=Instant::now();
        let (tokens,errors)=Lexer::from_script(source).tokenize();
        self.logger.stage("lexer",start.elapsed(),&format!("{} tokens, {} errores",tokens.len(),errors.len()));
        (tokens,errors)
    }
    /// Lexical errors stop before parsing; syntax errors stop before a program is handed out.
    pub fn compile(&self,source:impl AsRef<str>)->PseudoResult<Program>{
        let (tokens,errors)=self.tokenize(source);
        if !errors.is_empty(){
            return Err(PseudoError::Lexical(errors))
        }
        let start=Instant::now();
        let (program,errors)=PseudoParser::new(tokens).parse();
        self.logger.stage("parser",start.elapsed(),&format!("{} errores",errors.len()));
        if !errors.is_empty(){
            return Err(PseudoError::Syntax(errors))
        }
        program.ok_or_else(||PseudoError::Syntax(vec![
            SyntaxError::new("No se pudo construir el programa",START)
        ]))
    }
    /// Compiles and runs `source`. Every error is also written to `console`, one line each.
    pub fn run<C:Console>(&self,source:impl AsRef<str>,console:&mut C)->PseudoResult<()>{
        let program=match self.compile(source) {
            Ok(program) => program,
            Err(e) => {
                for line in e.report_lines(){
                    console.write_line(&line);
                }
                return Err(e)
            }
        };
        let start=Instant::now();
        let mut interpreter=Interpreter::new(console);
        let result=interpreter.interpret(&program);
        self.logger.stage("intérprete",start.elapsed(),&program.name);
        result.map_err(PseudoError::from)
    }
}
