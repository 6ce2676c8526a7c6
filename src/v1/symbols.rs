use std::collections::HashMap;
use crate::error::{RuntimeError, RuntimeResult};
use crate::v1::types::{Value, VarType};

#[derive(Debug,Clone,PartialEq)]
pub struct Symbol{
    pub value:Value,
    pub var_type:VarType
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct ScopeId(usize);

#[derive(Debug,Clone)]
struct Scope{
    parent:Option<ScopeId>,
    data:HashMap<String,Symbol>
}

impl Scope {
    fn new(parent:Option<ScopeId>)->Self{
        Self{parent,data:HashMap::new()}
    }
}

/// Variables of one run. Scopes live in an arena and point at their parent
/// by index; lookups walk from the current scope up to the global one.
#[derive(Debug,Clone)]
pub struct SymbolTable{
    scopes:Vec<Scope>,
    current:ScopeId
}

impl SymbolTable {
    pub fn new()->Self{
        Self{scopes:vec![Scope::new(None)],current:ScopeId(0)}
    }
    pub fn current_scope(&self)->ScopeId{
        self.current
    }
    pub fn push_scope(&mut self)->ScopeId{
        let id=ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(Some(self.current)));
        self.current=id;
        id
    }
    /// Closes the current scope. The global scope stays open and yields `None`.
    pub fn pop_scope(&mut self)->Option<ScopeId>{
        let parent=self.scopes[self.current.0].parent?;
        let closed=self.current;
        if closed.0+1==self.scopes.len(){
            self.scopes.pop();
        }
        self.current=parent;
        Some(closed)
    }
    /// Declares `name` in the current scope, replacing an earlier declaration.
    pub fn define(&mut self,name:&str,value:Value,var_type:VarType){
        self.scopes[self.current.0].data.insert(name.into(),Symbol{value,var_type});
    }
    pub fn assign(&mut self,name:&str,value:Value)->RuntimeResult<()>{
        let id=self.resolve(name).ok_or_else(||RuntimeError::undefined(name))?;
        if let Some(symbol)=self.scopes[id.0].data.get_mut(name){
            symbol.value=value;
        }
        Ok(())
    }
    pub fn get(&self,name:&str)->RuntimeResult<&Value>{
        self.symbol(name).map(|s|&s.value)
    }
    pub fn get_type(&self,name:&str)->RuntimeResult<VarType>{
        self.symbol(name).map(|s|s.var_type)
    }
    pub fn exists(&self,name:&str,include_parents:bool)->bool{
        if include_parents{
            return self.resolve(name).is_some()
        }
        self.scopes[self.current.0].data.contains_key(name)
    }
    pub fn symbol(&self,name:&str)->RuntimeResult<&Symbol>{
        self.resolve(name)
            .and_then(|id|self.scopes[id.0].data.get(name))
            .ok_or_else(||RuntimeError::undefined(name))
    }
    fn resolve(&self,name:&str)->Option<ScopeId>{
        let mut id=Some(self.current);
        while let Some(scope_id)=id{
            let scope=&self.scopes[scope_id.0];
            if scope.data.contains_key(name){
                return Some(scope_id)
            }
            id=scope.parent;
        }
        None
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_assign(){
        let mut table=SymbolTable::new();
        table.define("n",Value::Integer(0),VarType::Integer);
        table.assign("n",Value::Integer(5)).unwrap();
        assert_eq!(table.get("n").unwrap(),&Value::Integer(5));
        assert_eq!(table.get_type("n").unwrap(),VarType::Integer);
        table.define("n",Value::from(""),VarType::Text);
        assert_eq!(table.get_type("n").unwrap(),VarType::Text);
    }

    #[test]
    fn test_undefined(){
        let mut table=SymbolTable::new();
        assert!(matches!(table.assign("x",Value::Integer(1)),Err(RuntimeError::UndefinedVariable{..})));
        let err=table.get("x").unwrap_err();
        assert_eq!(err.to_string(),"Variable 'x' no ha sido definida.");
        assert!(!table.exists("x",true));
    }

    #[test]
    fn test_nested_scopes(){
        let mut table=SymbolTable::new();
        table.define("g",Value::Integer(1),VarType::Integer);
        let global=table.current_scope();
        let inner=table.push_scope();
        assert_ne!(global,inner);
        table.define("l",Value::Boolean(true),VarType::Boolean);
        assert!(table.exists("g",true));
        assert!(!table.exists("g",false));
        table.assign("g",Value::Integer(2)).unwrap();
        assert_eq!(table.pop_scope(),Some(inner));
        assert_eq!(table.get("g").unwrap(),&Value::Integer(2));
        assert!(!table.exists("l",true));
        assert_eq!(table.pop_scope(),None);
        assert_eq!(table.current_scope(),global);
    }
}
