pub mod position;
pub mod token;
pub mod rules;
pub mod lexer;
pub mod expr;
pub mod stmt;
pub mod types;
pub mod parser;
pub mod symbols;
pub mod interpreter;
