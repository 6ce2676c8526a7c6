use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context};
use crate::source::{decode_source, load_source, save_source, FILE_EXTENSION};

pub const DEFAULT_TEMPLATE_NAME:&str="default";

pub const DEFAULT_TEMPLATE:&str=r#"ALGORITMO Saludo
    // Programa de ejemplo
    DEFINA nombre COMO TEXTO
    DEFINA edad COMO ENTERO
    MUESTRE "¿Cómo te llamas?"
    LEA nombre
    MUESTRE "¿Cuántos años tienes?"
    LEA edad
    SI edad >= 18 ENTONCES
        MUESTRE "Hola ", nombre, ", eres mayor de edad."
    SINO
        MUESTRE "Hola ", nombre, ", te faltan ", 18 - edad, " años."
    FINSI
FINALGORITMO
"#;

/// `$PSEUDOCOL_HOME`, or `.pseudocol` under the home directory.
pub fn templates_dir()->anyhow::Result<PathBuf>{
    if let Some(home)=std::env::var_os("PSEUDOCOL_HOME"){
        return Ok(PathBuf::from(home))
    }
    let home=dirs::home_dir().context("no se pudo obtener el directorio del usuario")?;
    Ok(home.join(".pseudocol"))
}

/// User templates, one `<name>.pseudocol` file each.
#[derive(Debug,Clone)]
pub struct TemplateStore{
    dir:PathBuf
}

impl TemplateStore {
    pub fn new(dir:impl Into<PathBuf>)->Self{
        Self{dir:dir.into()}
    }
    pub fn open()->anyhow::Result<Self>{
        Ok(Self::new(templates_dir()?))
    }
    pub fn dir(&self)->&Path{
        &self.dir
    }
    pub fn path_of(&self,name:&str)->PathBuf{
        self.dir.join(format!("{name}.{FILE_EXTENSION}"))
    }
    /// The built-in `default` template unless the user saved one with that name.
    pub fn load(&self,name:&str)->anyhow::Result<String>{
        let path=self.path_of(name);
        if name==DEFAULT_TEMPLATE_NAME&&!path.exists(){
            return Ok(DEFAULT_TEMPLATE.to_string())
        }
        if !path.exists(){
            bail!("la plantilla '{name}' no existe en {}",self.dir.display())
        }
        load_source(&path)
    }
    pub fn add(&self,name:&str,from:impl AsRef<Path>)->anyhow::Result<PathBuf>{
        let from=from.as_ref();
        let bytes=fs::read(from).with_context(||format!("no se pudo leer el archivo {}",from.display()))?;
        fs::create_dir_all(&self.dir).with_context(||format!("no se pudo crear el directorio {}",self.dir.display()))?;
        let path=self.path_of(name);
        save_source(&path,&decode_source(&bytes))?;
        Ok(path)
    }
    pub fn remove(&self,name:&str)->anyhow::Result<()>{
        let path=self.path_of(name);
        fs::remove_file(&path).with_context(||format!("no se pudo eliminar la plantilla '{name}'"))
    }
    /// Sorted template names; a missing directory has none.
    pub fn list(&self)->anyhow::Result<Vec<String>>{
        if !self.dir.exists(){
            return Ok(vec![])
        }
        let entries=fs::read_dir(&self.dir).with_context(||format!("no se pudo abrir el directorio {}",self.dir.display()))?;
        let mut names=vec![];
        for entry in entries{
            let path=entry?.path();
            if path.extension().is_some_and(|e|e==FILE_EXTENSION){
                if let Some(stem)=path.file_stem().and_then(|s|s.to_str()){
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Writes `template` to `target`. An existing file is never overwritten.
pub fn init_program(store:&TemplateStore,template:&str,target:impl AsRef<Path>)->anyhow::Result<()>{
    let target=target.as_ref();
    if target.exists(){
        bail!("el archivo {} ya existe",target.display())
    }
    let content=store.load(template)?;
    save_source(target,&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PseudoEngine;

    fn scratch(name:&str)->PathBuf{
        let dir=std::env::temp_dir().join(format!("pseudocol-{name}-{}",std::process::id()));
        let _=fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_template_compiles(){
        assert!(PseudoEngine::new().compile(DEFAULT_TEMPLATE).is_ok());
    }

    #[test]
    fn test_add_list_remove(){
        let dir=scratch("store");
        let store=TemplateStore::new(dir.join("templates"));
        assert!(store.list().unwrap().is_empty());
        let program=dir.join("base.pseudocol");
        fs::write(&program,"ALGORITMO Base\nFINALGORITMO\n").unwrap();
        store.add("base",&program).unwrap();
        store.add("otra",&program).unwrap();
        assert_eq!(store.list().unwrap(),vec!["base".to_string(),"otra".to_string()]);
        assert_eq!(store.load("base").unwrap(),"ALGORITMO Base\nFINALGORITMO\n");
        store.remove("otra").unwrap();
        assert_eq!(store.list().unwrap(),vec!["base".to_string()]);
        assert!(store.remove("otra").is_err());
        assert!(store.load("otra").is_err());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_init_refuses_overwrite(){
        let dir=scratch("init");
        let store=TemplateStore::new(dir.join("templates"));
        let target=dir.join("main.pseudocol");
        init_program(&store,DEFAULT_TEMPLATE_NAME,&target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(),DEFAULT_TEMPLATE);
        assert!(init_program(&store,DEFAULT_TEMPLATE_NAME,&target).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
