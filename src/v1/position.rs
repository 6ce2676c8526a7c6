use std::fmt::{Display, Formatter};

/// 1-based line/column of a character in the source text.
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct Position{
    pub(crate) line:usize,
    pub(crate) column:usize,
}

impl Position {
    pub fn new(line:usize,column:usize)->Self{
        Self{line,column}
    }
    pub fn line(&self)->usize{
        self.line
    }
    pub fn column(&self)->usize{
        self.column
    }
    /// Moves past `text`, a newline starts the next line at column 1.
    pub fn advance(&mut self,text:&str){
        for c in text.chars(){
            if c=='\n'{
                self.line+=1;
                self.column=1;
            }else{
                self.column+=1;
            }
        }
    }
}
impl Default for Position{
    fn default() -> Self {
        START
    }
}
impl Display for Position{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"en línea {}, columna {}",self.line,self.column)
    }
}
pub static START: Position =Position{line:1,column:1};

#[test]
fn test_advance(){
    let mut pos=START;
    pos.advance("DEFINA ");
    assert_eq!(pos,Position::new(1,8));
    pos.advance("\"a\nbc\"");
    assert_eq!(pos,Position::new(2,4));
    pos.advance("ñ");
    assert_eq!(pos.column(),5);
}
