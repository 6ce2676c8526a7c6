use crate::error::SyntaxError;
use crate::v1::expr::{BinaryOp, Expr};
use crate::v1::position::{Position, START};
use crate::v1::stmt::{Program, Stmt};
use crate::v1::token::{Token, TokenKind};
use crate::v1::types::{Value, VarType};

const COMPARISON:[TokenKind;6]=[
    TokenKind::Equal,
    TokenKind::NotEqual,
    TokenKind::Less,
    TokenKind::Greater,
    TokenKind::LessEqual,
    TokenKind::GreaterEqual
];

/// Recursive descent parser over a finished token list.
///
/// Errors are collected instead of returned: every rule reports what it could
/// not match and hands back a partial node or `None`, so one pass finds as
/// many problems as possible.
pub struct PseudoParser{
    tokens:Vec<Token>,
    current:usize,
    errors:Vec<SyntaxError>
}

impl PseudoParser{
    pub fn new(mut tokens:Vec<Token>)->Self{
        if !tokens.last().is_some_and(|t|t.is(TokenKind::EOF)){
            let position=tokens.last().map(|t|t.position).unwrap_or(START);
            tokens.push(Token::eof(position));
        }
        Self{tokens,current:0,errors:vec![]}
    }
    pub fn parse(mut self)->(Option<Program>,Vec<SyntaxError>){
        let program=self.parse_program();
        if !self.check(TokenKind::EOF){
            let position=self.peek().position;
            self.error("Tokens extra después del final del programa",position);
        }
        (program,self.errors)
    }

    fn parse_program(&mut self)->Option<Program>{
        let position=self.peek().position;
        let header=self.expect(TokenKind::Algoritmo);
        let name=self.expect(TokenKind::Identifier).map(|t|t.text);
        let body=self.parse_statement_list(&[TokenKind::FinAlgoritmo]);
        self.expect(TokenKind::FinAlgoritmo);
        header?;
        Some(Program::new(name.unwrap_or_default(),body,position))
    }
    fn parse_statement_list(&mut self,terminators:&[TokenKind])->Vec<Stmt>{
        let mut body=vec![];
        while !self.check(TokenKind::EOF)&&!terminators.contains(&self.peek().kind){
            let before=self.current;
            if let Some(stmt)=self.parse_statement(){
                body.push(stmt)
            }
            if self.current==before{
                self.advance();
            }
        }
        body
    }
    pub fn parse_statement(&mut self)->Option<Stmt>{
        let token=self.peek().clone();
        match token.kind {
            TokenKind::Defina => self.parse_var_decl(),
            TokenKind::Muestre => self.parse_show(),
            TokenKind::Lea => self.parse_read(),
            TokenKind::Si => self.parse_if(),
            TokenKind::Identifier => {
                if self.peek_next().is(TokenKind::Assign){
                    return self.parse_assign()
                }
                self.error(format!("Sentencia no reconocida iniciada con ID '{}'",token.text),token.position);
                self.advance();
                None
            }
            TokenKind::EOF => None,
            _ => {
                self.error(format!("Sentencia inesperada: token '{}'",token.text),token.position);
                self.advance();
                None
            }
        }
    }
    fn parse_var_decl(&mut self)->Option<Stmt>{
        let position=self.advance().position;
        let mut names=vec![];
        names.extend(self.expect(TokenKind::Identifier).map(|t|t.text));
        while self.matches(TokenKind::Comma){
            names.extend(self.expect(TokenKind::Identifier).map(|t|t.text));
        }
        self.expect(TokenKind::Como);
        let type_token=self.advance();
        let var_type=match type_token.text.parse::<VarType>() {
            Ok(t) => Some(t),
            Err(e) => {
                self.error(e.to_string(),type_token.position);
                None
            }
        };
        self.matches(TokenKind::Semicolon);
        if names.is_empty(){
            return None
        }
        Some(Stmt::VarDecl(names,var_type?,position))
    }
    fn parse_show(&mut self)->Option<Stmt>{
        let position=self.advance().position;
        let mut values=vec![];
        values.extend(self.parse_expression());
        while self.matches(TokenKind::Comma){
            values.extend(self.parse_expression());
        }
        self.matches(TokenKind::Semicolon);
        if values.is_empty(){
            return None
        }
        Some(Stmt::Show(values,position))
    }
    fn parse_read(&mut self)->Option<Stmt>{
        let position=self.advance().position;
        let target=self.expect(TokenKind::Identifier);
        self.matches(TokenKind::Semicolon);
        Some(Stmt::Read(target?.text,position))
    }
    fn parse_assign(&mut self)->Option<Stmt>{
        let target=self.advance();
        self.expect(TokenKind::Assign);
        let value=self.parse_expression();
        self.matches(TokenKind::Semicolon);
        Some(Stmt::Assign(target.text,Box::new(value?),target.position))
    }
    fn parse_if(&mut self)->Option<Stmt>{
        let position=self.advance().position;
        let condition=self.parse_expression();
        self.expect(TokenKind::Entonces);
        let then_body=self.parse_statement_list(&[TokenKind::Sino,TokenKind::FinSi,TokenKind::FinAlgoritmo]);
        let else_body=if self.matches(TokenKind::Sino){
            Some(self.parse_statement_list(&[TokenKind::FinSi,TokenKind::FinAlgoritmo]))
        }else{
            None
        };
        self.expect(TokenKind::FinSi)?;
        Some(Stmt::If(Box::new(condition?),then_body,else_body,position))
    }

    pub fn parse_expression(&mut self)->Option<Expr>{
        self.parse_or()
    }
    fn parse_or(&mut self)->Option<Expr>{
        self.parse_binary_level(&[TokenKind::Or],Self::parse_and)
    }
    fn parse_and(&mut self)->Option<Expr>{
        self.parse_binary_level(&[TokenKind::And],Self::parse_comparison)
    }
    fn parse_comparison(&mut self)->Option<Expr>{
        self.parse_binary_level(&COMPARISON,Self::parse_additive)
    }
    fn parse_additive(&mut self)->Option<Expr>{
        self.parse_binary_level(&[TokenKind::Plus,TokenKind::Minus],Self::parse_multiplicative)
    }
    fn parse_multiplicative(&mut self)->Option<Expr>{
        self.parse_binary_level(&[TokenKind::Mul,TokenKind::Div,TokenKind::Mod],Self::parse_power)
    }
    /// `^` binds tighter than `*` and groups to the right.
    fn parse_power(&mut self)->Option<Expr>{
        let base=self.parse_primary();
        if !self.check(TokenKind::Pow){
            return base
        }
        let position=self.advance().position;
        let exponent=self.parse_power();
        Some(Expr::binary(BinaryOp::Pow,base?,exponent?,position))
    }
    /// Left-associative chain of `operators` over `operand`. Both sides are
    /// always parsed so later errors still get reported.
    fn parse_binary_level(&mut self,operators:&[TokenKind],operand:fn(&mut Self)->Option<Expr>)->Option<Expr>{
        let mut left=operand(self);
        while operators.contains(&self.peek().kind){
            let token=self.advance();
            let right=operand(self);
            left=match (left,right,BinaryOp::from_token(token.kind)) {
                (Some(l),Some(r),Some(op)) => Some(Expr::binary(op,l,r,token.position)),
                _ => None
            };
        }
        left
    }
    fn parse_primary(&mut self)->Option<Expr>{
        let token=self.peek().clone();
        match token.kind {
            TokenKind::Integer => {
                self.advance();
                match token.text.parse::<i64>() {
                    Ok(i) => Some(Expr::Literal(Value::Integer(i),token.position)),
                    Err(_) => {
                        self.error(format!("Número fuera de rango: {}",token.text),token.position);
                        None
                    }
                }
            }
            TokenKind::Real => {
                self.advance();
                match token.text.parse::<f64>() {
                    Ok(r) => Some(Expr::Literal(Value::Real(r),token.position)),
                    Err(_) => {
                        self.error(format!("Número fuera de rango: {}",token.text),token.position);
                        None
                    }
                }
            }
            TokenKind::String => {
                self.advance();
                Some(Expr::Literal(Value::Text(unquote(&token.text)),token.position))
            }
            TokenKind::True|TokenKind::False => {
                self.advance();
                Some(Expr::Literal(Value::Boolean(token.is(TokenKind::True)),token.position))
            }
            TokenKind::Identifier => {
                self.advance();
                Some(Expr::Variable(token.text,token.position))
            }
            TokenKind::ParenLeft => {
                self.advance();
                let expr=self.parse_expression();
                self.expect(TokenKind::ParenRight);
                expr
            }
            TokenKind::Minus|TokenKind::Not => {
                self.error(format!("Operadores unarios ('{}') aún no soportados en esta posición.",token.text),token.position);
                self.advance();
                None
            }
            _ => {
                self.error(format!("Factor inesperado en expresión: token '{}'",token.text),token.position);
                self.advance();
                None
            }
        }
    }

    fn peek(&self)->&Token{
        let index=self.current.min(self.tokens.len()-1);
        &self.tokens[index]
    }
    fn peek_next(&self)->&Token{
        let index=(self.current+1).min(self.tokens.len()-1);
        &self.tokens[index]
    }
    fn check(&self,kind:TokenKind)->bool{
        self.peek().is(kind)
    }
    /// Returns the current token and moves on; the cursor never passes `EOF`.
    fn advance(&mut self)->Token{
        let token=self.peek().clone();
        if !token.is(TokenKind::EOF){
            self.current+=1;
        }
        token
    }
    fn matches(&mut self,kind:TokenKind)->bool{
        if self.check(kind){
            self.advance();
            return true
        }
        false
    }
    /// Consumes a token of `kind` or reports it missing without consuming anything.
    fn expect(&mut self,kind:TokenKind)->Option<Token>{
        if self.check(kind){
            return Some(self.advance())
        }
        let found=self.peek().clone();
        self.error(format!("Se esperaba {} pero se encontró {} ('{}')",kind,found.kind,found.text),found.position);
        None
    }
    fn error(&mut self,message:impl Into<String>,position:Position){
        self.errors.push(SyntaxError::new(message,position))
    }
}

fn unquote(text:&str)->String{
    let mut chars=text.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::lexer::Lexer;

    fn parse(source:&str)->(Option<Program>,Vec<String>){
        let (tokens,errors)=Lexer::from_script(source).tokenize();
        assert!(errors.is_empty(),"{errors:?}");
        let (program,errors)=PseudoParser::new(tokens).parse();
        (program,errors.iter().map(|e|e.message.clone()).collect())
    }
    fn expression(source:&str)->Expr{
        let (tokens,_)=Lexer::from_script(source).tokenize();
        let mut parser=PseudoParser::new(tokens);
        let expr=parser.parse_expression().unwrap();
        assert!(parser.errors.is_empty(),"{:?}",parser.errors);
        expr
    }
    fn render(expr:&Expr)->String{
        match expr {
            Expr::Literal(v,_) => v.to_string(),
            Expr::Variable(name,_) => name.clone(),
            Expr::Binary(op,l,r,_) => format!("({} {} {})",render(l),op.symbol(),render(r)),
        }
    }

    #[test]
    fn test_program(){
        let (program,errors)=parse("ALGORITMO Suma\n DEFINA a, b COMO ENTERO;\n a <- 1\n b = a + 2\n MUESTRE \"b=\", b\n LEA a\nFINALGORITMO");
        assert!(errors.is_empty(),"{errors:?}");
        let program=program.unwrap();
        assert_eq!(program.name,"Suma");
        assert_eq!(program.body.len(),5);
        assert_eq!(program.body[0],Stmt::VarDecl(vec!["a".into(),"b".into()],VarType::Integer,Position::new(2,2)));
        assert!(matches!(&program.body[2],Stmt::Assign(name,_,_) if name=="b"));
        assert!(matches!(&program.body[3],Stmt::Show(values,_) if values.len()==2));
        assert_eq!(program.body[4],Stmt::Read("a".into(),Position::new(6,2)));
    }

    #[test]
    fn test_precedence(){
        assert_eq!(render(&expression("1 + 2 * 3 - 4")),"((1 + (2 * 3)) - 4)");
        assert_eq!(render(&expression("a > 1 Y b < 2 O c")),"(((a > 1) Y (b < 2)) O c)");
        assert_eq!(render(&expression("(1 + 2) * 3 MOD 2")),"(((1 + 2) * 3) % 2)");
        assert_eq!(render(&expression("2 ^ 3 ^ 2 * 2")),"((2 ^ (3 ^ 2)) * 2)");
        assert_eq!(render(&expression("\"a\" + 'b' == VERDADERO")),"((a + b) == Verdadero)");
    }

    #[test]
    fn test_if_else(){
        let (program,errors)=parse("ALGORITMO X\nSI a > 1 ENTONCES\n MUESTRE 1\nSINO\n MUESTRE 2\n MUESTRE 3\nFINSI\nFINALGORITMO");
        assert!(errors.is_empty());
        match &program.unwrap().body[0] {
            Stmt::If(_,then_body,Some(else_body),_) => {
                assert_eq!(then_body.len(),1);
                assert_eq!(else_body.len(),2);
            }
            other => panic!("{other:?}")
        }
    }

    #[test]
    fn test_missing_finsi(){
        let (program,errors)=parse("ALGORITMO X\nSI VERDADERO ENTONCES\n MUESTRE 1\nFINALGORITMO");
        assert_eq!(errors,vec![
            "Se esperaba FINSI pero se encontró FINALGORITMO ('FINALGORITMO')".to_string()
        ]);
        assert!(program.unwrap().body.is_empty());
    }

    #[test]
    fn test_statement_errors(){
        let (program,errors)=parse("ALGORITMO X\n contador\n ENTONCES\n MUESTRE -1\n DEFINA z COMO NUMERO\n MIENTRAS\nFINALGORITMO");
        assert_eq!(errors,vec![
            "Sentencia no reconocida iniciada con ID 'contador'".to_string(),
            "Sentencia inesperada: token 'ENTONCES'".to_string(),
            "Operadores unarios ('-') aún no soportados en esta posición.".to_string(),
            "Sentencia inesperada: token '1'".to_string(),
            "Tipo de dato desconocido: NUMERO".to_string(),
            "Sentencia inesperada: token 'MIENTRAS'".to_string(),
        ]);
        assert!(program.unwrap().body.is_empty());
    }

    #[test]
    fn test_missing_header(){
        let (program,errors)=parse("DEFINA x COMO REAL\nFINALGORITMO");
        assert!(program.is_none());
        assert_eq!(errors[0],"Se esperaba ALGORITMO pero se encontró DEFINA ('DEFINA')");
    }

    #[test]
    fn test_trailing_tokens(){
        let (program,errors)=parse("ALGORITMO X\nFINALGORITMO\nMUESTRE 1");
        assert!(program.is_some());
        assert_eq!(errors,vec!["Tokens extra después del final del programa".to_string()]);
    }

    #[test]
    fn test_bad_factor_and_range(){
        let (_,errors)=parse("ALGORITMO X\n x <- * 2\n z <- 99999999999999999999\nFINALGORITMO");
        assert_eq!(errors,vec![
            "Factor inesperado en expresión: token '*'".to_string(),
            "Sentencia inesperada: token '2'".to_string(),
            "Número fuera de rango: 99999999999999999999".to_string(),
        ]);
    }

    #[test]
    fn test_error_position(){
        let (tokens,_)=Lexer::from_script("ALGORITMO X\n  MUESTRE )\nFINALGORITMO").tokenize();
        let (_,errors)=PseudoParser::new(tokens).parse();
        assert_eq!(errors[0].to_string(),"Error Sintáctico: Factor inesperado en expresión: token ')' en línea 2, columna 11");
    }
}
