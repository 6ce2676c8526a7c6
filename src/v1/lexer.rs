use crate::error::LexError;
use crate::v1::position::START;
use crate::v1::rules::{keyword, rules, RuleKind};
use crate::v1::token::{Token, TokenKind};

#[derive(Debug,Clone)]
pub struct Lexer{
    source:String,
}

impl Lexer{
    pub fn from_script(script:impl AsRef<str>)->Self{
        return Self{source:script.as_ref().to_string()}
    }
    /// Scans the whole source. Bad characters are reported and skipped, so
    /// the token list always ends with `EOF`.
    pub fn tokenize(self)->(Vec<Token>,Vec<LexError>){
        let mut tokens=vec![];
        let mut errors=vec![];
        let mut position=START;
        let mut offset=0;
        let source=self.source.as_str();
        while offset<source.len(){
            let rest=&source[offset..];
            let (kind,len)=next_lexeme(rest);
            let lexeme=&rest[..len];
            match kind {
                RuleKind::Keyword => {
                    let kind=keyword(lexeme).unwrap_or(TokenKind::Identifier);
                    tokens.push(Token::new(kind,lexeme,position))
                }
                RuleKind::Emit(kind) => tokens.push(Token::new(kind,lexeme,position)),
                RuleKind::Error => {
                    if let Some(character)=lexeme.chars().next(){
                        errors.push(LexError{character,position})
                    }
                }
                RuleKind::Comment|RuleKind::Newline|RuleKind::Whitespace => {}
            }
            position.advance(lexeme);
            offset+=len;
        }
        tokens.push(Token::eof(position));
        (tokens,errors)
    }
}

fn next_lexeme(rest:&str)->(RuleKind,usize){
    for rule in rules(){
        if let Some(len)=rule.match_len(rest){
            return (rule.kind,len)
        }
    }
    (RuleKind::Error,rest.chars().next().map(char::len_utf8).unwrap_or(rest.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::position::Position;

    fn kinds(source:&str)->Vec<TokenKind>{
        let (tokens,errors)=Lexer::from_script(source).tokenize();
        assert!(errors.is_empty(),"{errors:?}");
        tokens.into_iter().map(|t|t.kind).collect()
    }

    #[test]
    fn test_keywords_any_case(){
        assert_eq!(kinds("algoritmo Proceso FINALGORITMO finproceso"),vec![
            TokenKind::Algoritmo,TokenKind::Algoritmo,TokenKind::FinAlgoritmo,TokenKind::FinAlgoritmo,TokenKind::EOF
        ]);
        assert_eq!(kinds("escriba caracter verdadero falso"),vec![
            TokenKind::Muestre,TokenKind::TypeText,TokenKind::True,TokenKind::False,TokenKind::EOF
        ]);
        assert_eq!(kinds("mientras para funcion no"),vec![
            TokenKind::Mientras,TokenKind::Para,TokenKind::Funcion,TokenKind::Not,TokenKind::EOF
        ]);
    }

    #[test]
    fn test_operators(){
        assert_eq!(kinds("a<-b<=c>=d==e<>f!=g=h"),vec![
            TokenKind::Identifier,TokenKind::Assign,TokenKind::Identifier,TokenKind::LessEqual,
            TokenKind::Identifier,TokenKind::GreaterEqual,TokenKind::Identifier,TokenKind::Equal,
            TokenKind::Identifier,TokenKind::NotEqual,TokenKind::Identifier,TokenKind::NotEqual,
            TokenKind::Identifier,TokenKind::Assign,TokenKind::Identifier,TokenKind::EOF
        ]);
        assert_eq!(kinds("7 MOD 2 % 3 ^ 2 / 1"),vec![
            TokenKind::Integer,TokenKind::Mod,TokenKind::Integer,TokenKind::Mod,TokenKind::Integer,
            TokenKind::Pow,TokenKind::Integer,TokenKind::Div,TokenKind::Integer,TokenKind::EOF
        ]);
    }

    #[test]
    fn test_identifiers_containing_keywords(){
        let (tokens,_)=Lexer::from_script("SIGUIENTE modo y_total Y").tokenize();
        let texts=tokens.iter().map(|t|(t.kind,t.text.as_str())).collect::<Vec<_>>();
        assert_eq!(texts,vec![
            (TokenKind::Identifier,"SIGUIENTE"),
            (TokenKind::Identifier,"modo"),
            (TokenKind::Identifier,"y_total"),
            (TokenKind::And,"Y"),
            (TokenKind::EOF,"EOF"),
        ]);
    }

    #[test]
    fn test_single_letter_operators(){
        assert_eq!(kinds("a y b o c"),vec![
            TokenKind::Identifier,TokenKind::And,TokenKind::Identifier,TokenKind::Or,TokenKind::Identifier,TokenKind::EOF
        ]);
    }

    #[test]
    fn test_keywords_after_numbers(){
        assert_eq!(kinds("n>3Y n<9"),vec![
            TokenKind::Identifier,TokenKind::Greater,TokenKind::Integer,TokenKind::And,
            TokenKind::Identifier,TokenKind::Less,TokenKind::Integer,TokenKind::EOF
        ]);
        let (tokens,_)=Lexer::from_script("8MOD 3").tokenize();
        let texts=tokens.iter().map(|t|(t.kind,t.text.as_str())).collect::<Vec<_>>();
        assert_eq!(texts,vec![
            (TokenKind::Integer,"8"),
            (TokenKind::Mod,"MOD"),
            (TokenKind::Integer,"3"),
            (TokenKind::EOF,"EOF"),
        ]);
    }

    #[test]
    fn test_numbers_and_strings(){
        let (tokens,_)=Lexer::from_script("3.14 .5 42 7. \"hola mundo\" 'x'").tokenize();
        let texts=tokens.iter().map(|t|(t.kind,t.text.as_str())).collect::<Vec<_>>();
        assert_eq!(texts,vec![
            (TokenKind::Real,"3.14"),
            (TokenKind::Real,".5"),
            (TokenKind::Integer,"42"),
            (TokenKind::Real,"7."),
            (TokenKind::String,"\"hola mundo\""),
            (TokenKind::String,"'x'"),
            (TokenKind::EOF,"EOF"),
        ]);
    }

    #[test]
    fn test_comments_and_positions(){
        let source="ALGORITMO Demo // cabecera\n  MUESTRE \"a\nb\", x\nFINALGORITMO";
        let (tokens,errors)=Lexer::from_script(source).tokenize();
        assert!(errors.is_empty());
        let positions=tokens.iter().map(|t|(t.kind,t.position.line(),t.position.column())).collect::<Vec<_>>();
        assert_eq!(positions,vec![
            (TokenKind::Algoritmo,1,1),
            (TokenKind::Identifier,1,11),
            (TokenKind::Muestre,2,3),
            (TokenKind::String,2,11),
            (TokenKind::Comma,3,3),
            (TokenKind::Identifier,3,5),
            (TokenKind::FinAlgoritmo,4,1),
            (TokenKind::EOF,4,13),
        ]);
    }

    #[test]
    fn test_lexical_errors_are_skipped(){
        let (tokens,errors)=Lexer::from_script("x <- 1 @ 2\n$z").tokenize();
        assert_eq!(errors,vec![
            LexError{character:'@',position:Position::new(1,8)},
            LexError{character:'$',position:Position::new(2,1)},
        ]);
        assert_eq!(errors[0].to_string(),"Error Léxico: Caracter no reconocido '@' en línea 1, columna 8");
        let kinds=tokens.iter().map(|t|t.kind).collect::<Vec<_>>();
        assert_eq!(kinds,vec![
            TokenKind::Identifier,TokenKind::Assign,TokenKind::Integer,TokenKind::Integer,TokenKind::Identifier,TokenKind::EOF
        ]);
    }

    #[test]
    fn test_empty_source(){
        let (tokens,errors)=Lexer::from_script("").tokenize();
        assert!(errors.is_empty());
        assert_eq!(tokens,vec![Token::eof(START)]);
    }
}
