use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tokio::runtime::Handle;
use pseudocol::console::{channel_console, LineSource, ScriptedSource, StdinSource};
use pseudocol::engine::PseudoEngine;
use pseudocol::logger::RunLogger;
use pseudocol::source::{load_source, FILE_EXTENSION};
use pseudocol::template::{init_program, TemplateStore, DEFAULT_TEMPLATE_NAME};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli{
    /// Disable colored diagnostics.
    #[arg(long, global = true)]
    no_color:bool,
    #[command(subcommand)]
    command: Commands,
}
#[derive(Subcommand)]
enum Commands {
    /// Write a starter program.
    Init(InitArgs),
    /// Run a program.
    Run(RunArgs),
    /// Lex and parse a program without running it.
    Check(FileArgs),
    /// Print the token stream of a program.
    Tokens(FileArgs),
    /// List, add or remove user templates.
    Template(TemplateArgs),
}
#[derive(Args)]
struct RunArgs{
    path:PathBuf,
    /// Read program input from this file instead of stdin.
    #[arg(short, long, value_name = "FILE")]
    input:Option<PathBuf>,
    /// Fail a LEA that waits longer than this.
    #[arg(long, value_name = "SECS")]
    input_timeout:Option<u64>,
    /// Show stage timings.
    #[arg(short, long)]
    verbose:bool
}
#[derive(Args)]
struct FileArgs{
    path:PathBuf
}
#[derive(Args)]
struct InitArgs{
    ///Specifies the template to be initialized.
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_TEMPLATE_NAME)]
    template:String,
    #[arg(short, long, value_name = "FILE")]
    output:Option<PathBuf>
}
#[derive(Args)]
struct TemplateArgs{
    /// Save a program as a template under this name.
    #[arg(short, long, value_name = "NAME", requires = "from")]
    add:Option<String>,
    /// Program file for --add.
    #[arg(short, long, value_name = "FILE")]
    from:Option<PathBuf>,
    #[arg(short, long, value_name = "NAME")]
    remove:Option<String>
}

fn handle_run(mut logger:RunLogger,args:&RunArgs)->anyhow::Result<bool>{
    logger.set_verbose(args.verbose);
    let source=load_source(&args.path)?;
    let scripted=match &args.input {
        Some(path) => Some(load_source(path)?),
        None => None
    };
    let timeout=args.input_timeout.map(Duration::from_secs);
    let runtime=tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("no se pudo iniciar el runtime")?;
    let engine=PseudoEngine::with_logger(logger.clone());
    logger.start_run();
    let result=runtime.block_on(async move{
        match scripted {
            Some(text) => execute(engine,source,ScriptedSource::from_text(&text),timeout).await,
            None => execute(engine,source,StdinSource::new(),timeout).await
        }
    });
    // A pump still blocked on stdin must not hold the process open.
    runtime.shutdown_background();
    logger.finish_run();
    result
}

async fn execute<S:LineSource+'static>(engine:PseudoEngine,source:String,input:S,timeout:Option<Duration>)->anyhow::Result<bool>{
    let (mut console,mut printed,pump)=channel_console(Handle::current(),input,timeout);
    let printer=tokio::spawn(async move{
        while let Some(line)=printed.recv().await{
            println!("{line}");
        }
    });
    let result=tokio::task::spawn_blocking(move||engine.run(source,&mut console))
        .await
        .context("el intérprete terminó de forma inesperada")?;
    printer.await.context("no se pudo escribir la salida")?;
    pump.abort();
    Ok(result.is_ok())
}

fn handle_check(logger:&RunLogger,args:&FileArgs)->anyhow::Result<bool>{
    let source=load_source(&args.path)?;
    match PseudoEngine::with_logger(logger.clone()).compile(source) {
        Ok(program) => {
            logger.success(&format!("Análisis completado sin errores: '{}', {} sentencias.",program.name,program.body.len()));
            Ok(true)
        }
        Err(e) => {
            for line in e.report_lines(){
                logger.error(&line);
            }
            Ok(false)
        }
    }
}

fn handle_tokens(logger:&RunLogger,args:&FileArgs)->anyhow::Result<bool>{
    let source=load_source(&args.path)?;
    let (tokens,errors)=PseudoEngine::with_logger(logger.clone()).tokenize(source);
    for token in &tokens{
        println!("{token}");
    }
    for e in &errors{
        logger.error(&e.to_string());
    }
    Ok(errors.is_empty())
}

fn handle_init(logger:&RunLogger,args:&InitArgs)->anyhow::Result<bool>{
    let store=TemplateStore::open()?;
    let target=args.output.clone().unwrap_or_else(||PathBuf::from(format!("main.{FILE_EXTENSION}")));
    init_program(&store,&args.template,&target)?;
    logger.success(&format!("Programa '{}' creado en {}",args.template,target.display()));
    Ok(true)
}

fn handle_template(logger:&RunLogger,args:&TemplateArgs)->anyhow::Result<bool>{
    let store=TemplateStore::open()?;
    if let (Some(name),Some(from))=(&args.add,&args.from){
        let path=store.add(name,from)?;
        logger.success(&format!("Plantilla '{name}' guardada en {}",path.display()));
        return Ok(true)
    }
    if let Some(name)=&args.remove{
        store.remove(name)?;
        logger.success(&format!("Plantilla '{name}' eliminada."));
        return Ok(true)
    }
    let names=store.list()?;
    if names.is_empty(){
        logger.info(&format!("No hay plantillas en {}",store.dir().display()));
    }
    for name in names{
        println!("{name}");
    }
    Ok(true)
}

fn handle_error(logger:&RunLogger,e:&anyhow::Error){
    logger.error(&e.to_string());
    for cause in e.chain().skip(1){
        logger.detail(&cause.to_string());
    }
}

fn main()->ExitCode{
    let cli=Cli::parse();
    let mut logger=RunLogger::new();
    if cli.no_color{
        logger.set_color(false);
    }
    let result=match &cli.command {
        Commands::Init(args) => handle_init(&logger,args),
        Commands::Run(args) => handle_run(logger.clone(),args),
        Commands::Check(args) => handle_check(&logger,args),
        Commands::Tokens(args) => handle_tokens(&logger,args),
        Commands::Template(args) => handle_template(&logger,args),
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            handle_error(&logger,&e);
            ExitCode::FAILURE
        }
    }
}
