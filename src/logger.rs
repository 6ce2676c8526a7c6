use std::time::Duration;

const RED:&str="\x1b[31m";
const GREEN:&str="\x1b[32m";
const CYAN:&str="\x1b[36m";
const RESET:&str="\x1b[0m";

/// Host diagnostics on stderr. Program output never goes through here.
#[derive(Debug,Clone)]
pub struct RunLogger{
    color:bool,
    verbose:bool
}

impl RunLogger {
    pub fn new()->Self{
        Self{color:std::env::var_os("NO_COLOR").is_none(),verbose:false}
    }
    pub fn set_color(&mut self,b:bool){
        self.color=b;
    }
    pub fn set_verbose(&mut self,b:bool){
        self.verbose=b;
    }
    pub fn is_verbose(&self)->bool{
        self.verbose
    }
    pub fn start_run(&self){
        eprintln!("{}",self.paint(GREEN,">>> Iniciando ejecución..."));
    }
    pub fn finish_run(&self){
        eprintln!("{}",self.paint(GREEN,"<<< Ejecución finalizada."));
    }
    /// Timing of one pipeline stage, shown only in verbose mode.
    pub fn stage(&self,name:&str,elapsed:Duration,detail:&str){
        if !self.verbose{
            return
        }
        eprintln!("  ╰─▶{}",self.paint(CYAN,&format!("[{name}]: {detail} ({:.2?})",elapsed)));
    }
    pub fn error(&self,content:&str){
        eprintln!("{}",self.paint(RED,&format!("[Error]:{content}")));
    }
    /// Continuation line under an error, e.g. each cause of an `anyhow` chain.
    pub fn detail(&self,content:&str){
        eprintln!("  ╰─▶{}",self.paint(RED,content));
    }
    pub fn success(&self,content:&str){
        eprintln!("{}",self.paint(GREEN,content));
    }
    pub fn info(&self,content:&str){
        eprintln!("{content}");
    }
    pub fn paint(&self,color:&str,content:&str)->String{
        if !self.color{
            return content.to_string()
        }
        format!("{color}{content}{RESET}")
    }
}

impl Default for RunLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_paint(){
    let mut logger=RunLogger::new();
    logger.set_color(true);
    assert_eq!(logger.paint(RED,"[Error]:x"),"\x1b[31m[Error]:x\x1b[0m");
    logger.set_color(false);
    assert_eq!(logger.paint(RED,"[Error]:x"),"[Error]:x");
    assert!(!logger.is_verbose());
}
