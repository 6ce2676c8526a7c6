use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::time::Duration;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use crate::error::{ConsoleError, ConsoleResult};

/// Where a running program writes its output and reads its input, one line at a time.
pub trait Console{
    /// Blocks until a line is available. The line has no trailing newline.
    fn read_line(&mut self)->ConsoleResult<String>;
    fn write_line(&mut self,line:&str);
}

impl<C:Console+?Sized> Console for &mut C{
    fn read_line(&mut self)->ConsoleResult<String>{
        (**self).read_line()
    }
    fn write_line(&mut self,line:&str){
        (**self).write_line(line)
    }
}
impl<C:Console+?Sized> Console for Box<C>{
    fn read_line(&mut self)->ConsoleResult<String>{
        (**self).read_line()
    }
    fn write_line(&mut self,line:&str){
        (**self).write_line(line)
    }
}

/// Blocking process stdin/stdout.
#[derive(Debug,Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new()->Self{
        Self
    }
}
impl Console for StdConsole{
    fn read_line(&mut self)->ConsoleResult<String>{
        let mut line=String::new();
        if io::stdin().lock().read_line(&mut line)?==0{
            return Err(ConsoleError::Closed)
        }
        Ok(trim_newline(line))
    }
    fn write_line(&mut self,line:&str){
        println!("{line}");
    }
}

/// In-memory console: queued input lines, collected output lines.
#[derive(Debug,Clone,Default)]
pub struct BufferConsole{
    inputs:VecDeque<String>,
    output:Vec<String>
}

impl BufferConsole {
    pub fn new()->Self{
        Self::default()
    }
    pub fn with_inputs<I,S>(inputs:I)->Self
    where I:IntoIterator<Item=S>,S:Into<String>
    {
        Self{inputs:inputs.into_iter().map(Into::into).collect(),output:vec![]}
    }
    pub fn push_input(&mut self,line:impl Into<String>){
        self.inputs.push_back(line.into())
    }
    pub fn output(&self)->&[String]{
        &self.output
    }
    pub fn take_output(&mut self)->Vec<String>{
        std::mem::take(&mut self.output)
    }
}
impl Console for BufferConsole{
    fn read_line(&mut self)->ConsoleResult<String>{
        self.inputs.pop_front().ok_or(ConsoleError::Closed)
    }
    fn write_line(&mut self,line:&str){
        self.output.push(line.to_string())
    }
}

/// Async producer of input lines for [`ChannelConsole`]. `Ok(None)` means end of input.
#[async_trait]
pub trait LineSource:Send{
    async fn next_line(&mut self)->io::Result<Option<String>>;
}

pub struct StdinSource{
    lines:Lines<BufReader<Stdin>>
}

impl StdinSource {
    pub fn new()->Self{
        Self{lines:BufReader::new(tokio::io::stdin()).lines()}
    }
}
impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}
#[async_trait]
impl LineSource for StdinSource{
    async fn next_line(&mut self)->io::Result<Option<String>>{
        self.lines.next_line().await
    }
}

/// Input lines fixed up front, e.g. from an `--input` file.
#[derive(Debug,Clone,Default)]
pub struct ScriptedSource{
    lines:VecDeque<String>
}

impl ScriptedSource {
    pub fn from_text(text:&str)->Self{
        Self{lines:text.lines().map(String::from).collect()}
    }
}
#[async_trait]
impl LineSource for ScriptedSource{
    async fn next_line(&mut self)->io::Result<Option<String>>{
        Ok(self.lines.pop_front())
    }
}

type InputReply=oneshot::Sender<io::Result<Option<String>>>;

/// Console for an interpreter running on a blocking thread of a tokio runtime.
///
/// Each `read_line` hands a reply slot to the input pump task and waits for
/// it; output lines go to an unbounded channel drained by the host. Must not
/// be used from inside an async task.
#[derive(Debug)]
pub struct ChannelConsole{
    requests:mpsc::Sender<InputReply>,
    output:mpsc::UnboundedSender<String>,
    timeout:Option<Duration>,
    handle:Handle
}

impl Console for ChannelConsole{
    fn read_line(&mut self)->ConsoleResult<String>{
        let (reply,response)=oneshot::channel();
        self.requests.blocking_send(reply).map_err(|_|ConsoleError::Closed)?;
        let line=match self.timeout {
            None => response.blocking_recv().map_err(|_|ConsoleError::Closed)?,
            Some(limit) => self.handle
                .block_on(async{tokio::time::timeout(limit,response).await})
                .map_err(|_|ConsoleError::TimedOut(limit))?
                .map_err(|_|ConsoleError::Closed)?
        };
        line?.ok_or(ConsoleError::Closed)
    }
    fn write_line(&mut self,line:&str){
        // The receiver only goes away when the host stopped printing.
        let _=self.output.send(line.to_string());
    }
}

/// Wires a [`ChannelConsole`] to `source` through an input pump spawned on `handle`.
///
/// The pump ends once the console is dropped.
pub fn channel_console<S>(handle:Handle,source:S,timeout:Option<Duration>)->(ChannelConsole,mpsc::UnboundedReceiver<String>,JoinHandle<()>)
where S:LineSource+'static
{
    let (requests,mut pending)=mpsc::channel::<InputReply>(1);
    let (output,printed)=mpsc::unbounded_channel();
    let pump=handle.spawn(async move{
        let mut source=source;
        while let Some(reply)=pending.recv().await{
            let line=source.next_line().await;
            // A requester that timed out has dropped its slot.
            let _=reply.send(line);
        }
    });
    (ChannelConsole{requests,output,timeout,handle},printed,pump)
}

fn trim_newline(mut line:String)->String{
    while line.ends_with('\n')||line.ends_with('\r'){
        line.pop();
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PendingSource;

    #[async_trait]
    impl LineSource for PendingSource{
        async fn next_line(&mut self)->io::Result<Option<String>>{
            std::future::pending().await
        }
    }

    #[test]
    fn test_buffer_console(){
        let mut console=BufferConsole::with_inputs(["7","hola"]);
        console.write_line("a");
        assert_eq!(console.read_line().unwrap(),"7");
        assert_eq!(console.read_line().unwrap(),"hola");
        assert!(matches!(console.read_line(),Err(ConsoleError::Closed)));
        console.push_input("x");
        assert_eq!(console.read_line().unwrap(),"x");
        assert_eq!(console.output().to_vec(),vec!["a".to_string()]);
        assert_eq!(console.take_output(),vec!["a".to_string()]);
        assert!(console.output().is_empty());
    }

    #[test]
    fn test_trim_newline(){
        assert_eq!(trim_newline("abc\r\n".into()),"abc");
        assert_eq!(trim_newline(" abc ".into())," abc ");
    }

    #[tokio::test(flavor="multi_thread",worker_threads=2)]
    async fn test_channel_console(){
        let (mut console,mut printed,pump)=channel_console(Handle::current(),ScriptedSource::from_text("uno\ndos\n"),None);
        let lines=tokio::task::spawn_blocking(move||{
            console.write_line("hola");
            let first=console.read_line().unwrap();
            let second=console.read_line().unwrap();
            let closed=matches!(console.read_line(),Err(ConsoleError::Closed));
            (first,second,closed)
        }).await.unwrap();
        assert_eq!(lines,("uno".to_string(),"dos".to_string(),true));
        assert_eq!(printed.recv().await,Some("hola".to_string()));
        assert_eq!(printed.recv().await,None);
        pump.await.unwrap();
    }

    #[tokio::test(flavor="multi_thread",worker_threads=2)]
    async fn test_channel_console_timeout(){
        let limit=Duration::from_millis(50);
        let (mut console,_printed,_pump)=channel_console(Handle::current(),PendingSource,Some(limit));
        let result=tokio::task::spawn_blocking(move||console.read_line()).await.unwrap();
        assert!(matches!(result,Err(ConsoleError::TimedOut(d)) if d==limit));
    }
}
