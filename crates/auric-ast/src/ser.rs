//! JSON serialization for Auric ASTs

use crate::decl::{Definitions, Module};
use crate::expr::Expr;
use crate::types::Type;
use thiserror::Error;

/// Serialization error
#[derive(Error, Debug)]
pub enum SerError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SerError>;

// ============ Module ============

/// Serialize module to JSON string
pub fn to_json(module: &Module) -> Result<String> {
    Ok(serde_json::to_string_pretty(module)?)
}

/// Deserialize module from JSON string
pub fn from_json(json: &str) -> Result<Module> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize elaborated definitions to JSON
pub fn definitions_to_json(defs: &Definitions) -> Result<String> {
    Ok(serde_json::to_string_pretty(defs)?)
}

/// Deserialize elaborated definitions from JSON
pub fn definitions_from_json(json: &str) -> Result<Definitions> {
    Ok(serde_json::from_str(json)?)
}

// ============ Expression / type level ============

pub fn expr_to_json(expr: &Expr) -> Result<String> {
    Ok(serde_json::to_string_pretty(expr)?)
}

pub fn expr_from_json(json: &str) -> Result<Expr> {
    Ok(serde_json::from_str(json)?)
}

pub fn type_to_json(ty: &Type) -> Result<String> {
    Ok(serde_json::to_string(ty)?)
}

pub fn type_from_json(json: &str) -> Result<Type> {
    Ok(serde_json::from_str(json)?)
}
