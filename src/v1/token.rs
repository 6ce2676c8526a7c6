use std::fmt::{Display, Formatter};
use crate::v1::position::Position;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum TokenKind{
    /// ALGORITMO, PROCESO
    Algoritmo,
    /// FINALGORITMO, FINPROCESO
    FinAlgoritmo,
    Defina,
    Como,
    /// ENTERO
    TypeInteger,
    /// REAL
    TypeReal,
    /// LOGICO
    TypeBoolean,
    /// TEXTO, CARACTER
    TypeText,
    /// MUESTRE, ESCRIBA
    Muestre,
    Lea,
    Si,
    Entonces,
    Sino,
    FinSi,
    Mientras,
    Haga,
    FinMientras,
    Repita,
    HastaQue,
    Para,
    Hasta,
    ConPaso,
    FinPara,
    /// FUNCION, SUBPROCESO
    Funcion,
    /// FINFUNCION, FINSUBPROCESO
    FinFuncion,
    /// Y
    And,
    /// O
    Or,
    /// NO
    Not,
    /// VERDADERO
    True,
    /// FALSO
    False,
    Identifier,
    Real,
    Integer,
    String,
    /// <- =
    Assign,
    /// <=
    LessEqual,
    /// >=
    GreaterEqual,
    /// ==
    Equal,
    /// <> !=
    NotEqual,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Mul,
    /// /
    Div,
    /// ^
    Pow,
    /// % MOD
    Mod,
    /// <
    Less,
    /// >
    Greater,
    /// (
    ParenLeft,
    /// )
    ParenRight,
    /// [
    SquareBracketLeft,
    /// ]
    SquareBracketRight,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// :
    Colon,
    EOF
}

impl TokenKind {
    /// Name used in diagnostics and token dumps.
    pub fn name(&self)->&'static str{
        match self {
            TokenKind::Algoritmo => "ALGORITMO",
            TokenKind::FinAlgoritmo => "FINALGORITMO",
            TokenKind::Defina => "DEFINA",
            TokenKind::Como => "COMO",
            TokenKind::TypeInteger => "TIPO_ENTERO",
            TokenKind::TypeReal => "TIPO_REAL",
            TokenKind::TypeBoolean => "TIPO_LOGICO",
            TokenKind::TypeText => "TIPO_TEXTO",
            TokenKind::Muestre => "MUESTRE",
            TokenKind::Lea => "LEA",
            TokenKind::Si => "SI",
            TokenKind::Entonces => "ENTONCES",
            TokenKind::Sino => "SINO",
            TokenKind::FinSi => "FINSI",
            TokenKind::Mientras => "MIENTRAS",
            TokenKind::Haga => "HAGA",
            TokenKind::FinMientras => "FINMIENTRAS",
            TokenKind::Repita => "REPITA",
            TokenKind::HastaQue => "HASTAQUE",
            TokenKind::Para => "PARA",
            TokenKind::Hasta => "HASTA",
            TokenKind::ConPaso => "CONPASO",
            TokenKind::FinPara => "FINPARA",
            TokenKind::Funcion => "FUNCION",
            TokenKind::FinFuncion => "FINFUNCION",
            TokenKind::And => "OP_Y",
            TokenKind::Or => "OP_O",
            TokenKind::Not => "OP_NO",
            TokenKind::True => "VALOR_VERDADERO",
            TokenKind::False => "VALOR_FALSO",
            TokenKind::Identifier => "ID",
            TokenKind::Real => "NUMERO_REAL",
            TokenKind::Integer => "NUMERO_ENTERO",
            TokenKind::String => "CADENA",
            TokenKind::Assign => "ASIGNACION",
            TokenKind::LessEqual => "OP_MENOR_IGUAL",
            TokenKind::GreaterEqual => "OP_MAYOR_IGUAL",
            TokenKind::Equal => "OP_IGUAL",
            TokenKind::NotEqual => "OP_DISTINTO",
            TokenKind::Plus => "OP_SUMA",
            TokenKind::Minus => "OP_RESTA",
            TokenKind::Mul => "OP_MULT",
            TokenKind::Div => "OP_DIV",
            TokenKind::Pow => "OP_POT",
            TokenKind::Mod => "OP_MOD",
            TokenKind::Less => "OP_MENOR",
            TokenKind::Greater => "OP_MAYOR",
            TokenKind::ParenLeft => "PARENTESIS_IZQ",
            TokenKind::ParenRight => "PARENTESIS_DER",
            TokenKind::SquareBracketLeft => "CORCHETE_IZQ",
            TokenKind::SquareBracketRight => "CORCHETE_DER",
            TokenKind::Comma => "COMA",
            TokenKind::Semicolon => "PUNTOYCOMA",
            TokenKind::Colon => "DOSPUNTOS",
            TokenKind::EOF => "EOF",
        }
    }
    pub fn is_type(&self)->bool{
        matches!(self,TokenKind::TypeInteger|TokenKind::TypeReal|TokenKind::TypeBoolean|TokenKind::TypeText)
    }
}
impl Display for TokenKind{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}",self.name())
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct Token{
    pub kind:TokenKind,
    pub text:String,
    pub position:Position
}

impl Token {
    pub fn new(kind:TokenKind,text:impl Into<String>,position:Position)->Self{
        Self{kind,text:text.into(),position}
    }
    pub fn eof(position:Position)->Self{
        Self::new(TokenKind::EOF,"EOF",position)
    }
    pub fn is(&self,kind:TokenKind)->bool{
        self.kind==kind
    }
}
impl Display for Token{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{} '{}' {}:{}",self.kind,self.text,self.position.line,self.position.column)
    }
}
