use std::sync::OnceLock;
use regex::Regex;
use crate::v1::token::TokenKind;

/// What the lexer does with a lexeme once a rule matched it.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum RuleKind{
    /// Reserved word, resolved through [`keyword`].
    Keyword,
    Emit(TokenKind),
    Comment,
    Newline,
    Whitespace,
    Error
}

#[derive(Debug)]
pub struct Rule{
    pub kind:RuleKind,
    regex:Regex
}

impl Rule {
    fn new(kind:RuleKind,pattern:&str)->Self{
        let regex=Regex::new(&format!("^(?:{pattern})")).expect("lexical rule pattern");
        Self{kind,regex}
    }
    /// Length in bytes of the lexeme at the start of `rest`, if any.
    pub fn match_len(&self,rest:&str)->Option<usize>{
        self.regex.find(rest).map(|m|m.end()).filter(|len|*len>0)
    }
}

const KEYWORDS:[(&str,TokenKind);37]=[
    ("ALGORITMO",TokenKind::Algoritmo),
    ("PROCESO",TokenKind::Algoritmo),
    ("FINALGORITMO",TokenKind::FinAlgoritmo),
    ("FINPROCESO",TokenKind::FinAlgoritmo),
    ("DEFINA",TokenKind::Defina),
    ("COMO",TokenKind::Como),
    ("ENTERO",TokenKind::TypeInteger),
    ("REAL",TokenKind::TypeReal),
    ("LOGICO",TokenKind::TypeBoolean),
    ("TEXTO",TokenKind::TypeText),
    ("CARACTER",TokenKind::TypeText),
    ("MUESTRE",TokenKind::Muestre),
    ("ESCRIBA",TokenKind::Muestre),
    ("LEA",TokenKind::Lea),
    ("SI",TokenKind::Si),
    ("ENTONCES",TokenKind::Entonces),
    ("SINO",TokenKind::Sino),
    ("FINSI",TokenKind::FinSi),
    ("MIENTRAS",TokenKind::Mientras),
    ("HAGA",TokenKind::Haga),
    ("FINMIENTRAS",TokenKind::FinMientras),
    ("REPITA",TokenKind::Repita),
    ("HASTAQUE",TokenKind::HastaQue),
    ("PARA",TokenKind::Para),
    ("HASTA",TokenKind::Hasta),
    ("CONPASO",TokenKind::ConPaso),
    ("FINPARA",TokenKind::FinPara),
    ("FUNCION",TokenKind::Funcion),
    ("SUBPROCESO",TokenKind::Funcion),
    ("FINFUNCION",TokenKind::FinFuncion),
    ("FINSUBPROCESO",TokenKind::FinFuncion),
    ("Y",TokenKind::And),
    ("O",TokenKind::Or),
    ("NO",TokenKind::Not),
    ("VERDADERO",TokenKind::True),
    ("FALSO",TokenKind::False),
    ("MOD",TokenKind::Mod),
];

/// Case-insensitive reserved word lookup.
pub fn keyword(word:&str)->Option<TokenKind>{
    let upper=word.to_uppercase();
    KEYWORDS.iter().find(|(w,_)|*w==upper).map(|(_,k)|*k)
}

/// The ordered rule table; the first rule matching at the cursor wins.
pub fn rules()->&'static [Rule]{
    static RULES:OnceLock<Vec<Rule>>=OnceLock::new();
    RULES.get_or_init(||{
        let words=KEYWORDS.iter().map(|(w,_)|*w).collect::<Vec<&str>>().join("|");
        vec![
            Rule::new(RuleKind::Keyword,&format!(r"(?i:\b(?:{words})\b)")),
            Rule::new(RuleKind::Comment,r"//[^\n]*"),
            Rule::new(RuleKind::Emit(TokenKind::Assign),r"<-"),
            Rule::new(RuleKind::Emit(TokenKind::LessEqual),r"<="),
            Rule::new(RuleKind::Emit(TokenKind::GreaterEqual),r">="),
            Rule::new(RuleKind::Emit(TokenKind::Equal),r"=="),
            Rule::new(RuleKind::Emit(TokenKind::NotEqual),r"<>|!="),
            Rule::new(RuleKind::Emit(TokenKind::Identifier),r"[a-zA-Z_][a-zA-Z0-9_]*"),
            Rule::new(RuleKind::Emit(TokenKind::Real),r"[0-9]+\.[0-9]*|\.[0-9]+"),
            Rule::new(RuleKind::Emit(TokenKind::Integer),r"[0-9]+"),
            Rule::new(RuleKind::Emit(TokenKind::String),r#""[^"]*"|'[^']*'"#),
            Rule::new(RuleKind::Emit(TokenKind::Assign),r"="),
            Rule::new(RuleKind::Emit(TokenKind::Plus),r"\+"),
            Rule::new(RuleKind::Emit(TokenKind::Minus),r"-"),
            Rule::new(RuleKind::Emit(TokenKind::Mul),r"\*"),
            Rule::new(RuleKind::Emit(TokenKind::Div),r"/"),
            Rule::new(RuleKind::Emit(TokenKind::Pow),r"\^"),
            Rule::new(RuleKind::Emit(TokenKind::Mod),r"%"),
            Rule::new(RuleKind::Emit(TokenKind::Less),r"<"),
            Rule::new(RuleKind::Emit(TokenKind::Greater),r">"),
            Rule::new(RuleKind::Emit(TokenKind::ParenLeft),r"\("),
            Rule::new(RuleKind::Emit(TokenKind::ParenRight),r"\)"),
            Rule::new(RuleKind::Emit(TokenKind::SquareBracketLeft),r"\["),
            Rule::new(RuleKind::Emit(TokenKind::SquareBracketRight),r"\]"),
            Rule::new(RuleKind::Emit(TokenKind::Comma),r","),
            Rule::new(RuleKind::Emit(TokenKind::Semicolon),r";"),
            Rule::new(RuleKind::Emit(TokenKind::Colon),r":"),
            Rule::new(RuleKind::Newline,r"\n"),
            Rule::new(RuleKind::Whitespace,r"[ \t\r]+"),
            Rule::new(RuleKind::Error,r"(?s:.)"),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup(){
        assert_eq!(keyword("proceso"),Some(TokenKind::Algoritmo));
        assert_eq!(keyword("Escriba"),Some(TokenKind::Muestre));
        assert_eq!(keyword("mod"),Some(TokenKind::Mod));
        assert_eq!(keyword("contador"),None);
    }

    #[test]
    fn test_rule_order(){
        let first=|rest:&str|rules().iter().find_map(|r|r.match_len(rest).map(|len|(r.kind,len)));
        assert_eq!(first("SINO x"),Some((RuleKind::Keyword,4)));
        assert_eq!(first("SIGUIENTE"),Some((RuleKind::Emit(TokenKind::Identifier),9)));
        assert_eq!(first("// nota\nx"),Some((RuleKind::Comment,7)));
        assert_eq!(first("<-1"),Some((RuleKind::Emit(TokenKind::Assign),2)));
        assert_eq!(first("3.14"),Some((RuleKind::Emit(TokenKind::Real),4)));
        assert_eq!(first("314;"),Some((RuleKind::Emit(TokenKind::Integer),3)));
        assert_eq!(first("\"a\nb\" x"),Some((RuleKind::Emit(TokenKind::String),5)));
        assert_eq!(first("@"),Some((RuleKind::Error,1)));
        assert_eq!(first("ñ"),Some((RuleKind::Error,2)));
    }
}
