use std::fs;
use std::path::Path;
use anyhow::Context;
use encoding_rs::{UTF_8, WINDOWS_1252};

pub const FILE_EXTENSION:&str="pseudocol";

/// Reads a program file. See [`decode_source`] for the accepted encodings.
pub fn load_source(path:impl AsRef<Path>)->anyhow::Result<String>{
    let path=path.as_ref();
    let bytes=fs::read(path).with_context(||format!("no se pudo leer el archivo {}",path.display()))?;
    Ok(decode_source(&bytes))
}

/// UTF-8 (a BOM is dropped); anything that is not valid UTF-8 is read as Windows-1252.
pub fn decode_source(bytes:&[u8])->String{
    let (text,_,had_errors)=UTF_8.decode(bytes);
    if !had_errors{
        return text.into_owned()
    }
    let (text,_,_)=WINDOWS_1252.decode(bytes);
    text.into_owned()
}

pub fn save_source(path:impl AsRef<Path>,content:&str)->anyhow::Result<()>{
    let path=path.as_ref();
    fs::write(path,content).with_context(||format!("no se pudo escribir el archivo {}",path.display()))
}
