//! ABI JSON parameter objects.
//!
//! Both parameter kinds validate on the way in: the `type` string must parse
//! strictly, and `components` must be present exactly when the type is a
//! tuple (bare or inside arrays). Components are themselves full parameters,
//! so tuples nest to any depth.

use crate::{AbiError, ParamType, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A function input/output or struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiParameter {
    pub name: String,
    pub ty: ParamType,
    pub internal_type: Option<String>,
    pub components: Option<Vec<AbiParameter>>,
}

/// An event input; identical to [`AbiParameter`] plus `indexed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiEventParameter {
    pub name: String,
    pub ty: ParamType,
    pub internal_type: Option<String>,
    pub components: Option<Vec<AbiParameter>>,
    pub indexed: bool,
}

/// Anything that renders to a canonical type inside a signature.
pub trait Parameter {
    fn canonical_type(&self) -> String;
}

impl AbiParameter {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        AbiParameter {
            name: name.into(),
            ty,
            internal_type: None,
            components: None,
        }
    }

    /// A tuple-rooted parameter with the given members.
    pub fn tuple(name: impl Into<String>, ty: ParamType, components: Vec<AbiParameter>) -> Self {
        AbiParameter {
            name: name.into(),
            ty,
            internal_type: None,
            components: Some(components),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a JSON array of parameters, such as a function's `inputs`.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_dynamic(&self) -> bool {
        type_is_dynamic(&self.ty, self.components.as_deref())
    }

    pub fn components(&self) -> &[AbiParameter] {
        self.components.as_deref().unwrap_or_default()
    }
}

impl AbiEventParameter {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_dynamic(&self) -> bool {
        type_is_dynamic(&self.ty, self.components.as_deref())
    }
}

impl Parameter for AbiParameter {
    fn canonical_type(&self) -> String {
        canonical_type(&self.ty, self.components.as_deref())
    }
}

impl Parameter for AbiEventParameter {
    fn canonical_type(&self) -> String {
        canonical_type(&self.ty, self.components.as_deref())
    }
}

/// `name(type1,type2,...)`, the text hashed into selectors and topics.
pub fn signature<P: Parameter>(name: &str, params: &[P]) -> String {
    let types: Vec<String> = params.iter().map(Parameter::canonical_type).collect();
    format!("{}({})", name, types.join(","))
}

fn canonical_type(ty: &ParamType, components: Option<&[AbiParameter]>) -> String {
    match components {
        Some(components) if ty.is_tuple_rooted() => {
            let tuple = format!("({})", signature_types(components));
            ty.render_with_tuple(&tuple)
        }
        _ => ty.to_string(),
    }
}

fn signature_types(params: &[AbiParameter]) -> String {
    params
        .iter()
        .map(Parameter::canonical_type)
        .collect::<Vec<_>>()
        .join(",")
}

fn type_is_dynamic(ty: &ParamType, components: Option<&[AbiParameter]>) -> bool {
    let (base, dims) = ty.dimensions();
    if dims.iter().any(Option::is_none) {
        return true;
    }
    match base {
        ParamType::String | ParamType::Bytes => true,
        ParamType::Tuple => components
            .unwrap_or_default()
            .iter()
            .any(AbiParameter::is_dynamic),
        _ => false,
    }
}

fn validate_components(name: &str, ty: &ParamType, components: Option<&[AbiParameter]>) -> Result<()> {
    match (ty.is_tuple_rooted(), components.is_some()) {
        (true, false) => Err(AbiError::MissingComponents(name.to_string())),
        (false, true) => Err(AbiError::UnexpectedComponents(name.to_string())),
        _ => Ok(()),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParamInner {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    internal_type: Option<String>,
    #[serde(default)]
    components: Option<Vec<AbiParameter>>,
    #[serde(default)]
    indexed: Option<bool>,
}

impl ParamInner {
    fn parse_type(&self) -> Result<ParamType> {
        let ty = ParamType::parse(&self.ty)?;
        validate_components(&self.name, &ty, self.components.as_deref())?;
        Ok(ty)
    }

    fn into_param(self) -> Result<AbiParameter> {
        if self.indexed.is_some() {
            return Err(AbiError::UnexpectedIndexed(self.name));
        }
        let ty = self.parse_type()?;
        Ok(AbiParameter {
            name: self.name,
            ty,
            internal_type: self.internal_type,
            components: self.components,
        })
    }

    fn into_event_param(self) -> Result<AbiEventParameter> {
        let ty = self.parse_type()?;
        let indexed = self
            .indexed
            .ok_or_else(|| AbiError::MissingIndexed(self.name.clone()))?;
        Ok(AbiEventParameter {
            name: self.name,
            ty,
            internal_type: self.internal_type,
            components: self.components,
            indexed,
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParamRef<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: &'a ParamType,
    #[serde(skip_serializing_if = "Option::is_none")]
    internal_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<&'a [AbiParameter]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    indexed: Option<bool>,
}

impl<'de> Deserialize<'de> for AbiParameter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        ParamInner::deserialize(deserializer)
            .and_then(|inner| inner.into_param().map_err(serde::de::Error::custom))
    }
}

impl Serialize for AbiParameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ParamRef {
            name: &self.name,
            ty: &self.ty,
            internal_type: self.internal_type.as_deref(),
            components: self.components.as_deref(),
            indexed: None,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AbiEventParameter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        ParamInner::deserialize(deserializer)
            .and_then(|inner| inner.into_event_param().map_err(serde::de::Error::custom))
    }
}

impl Serialize for AbiEventParameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ParamRef {
            name: &self.name,
            ty: &self.ty,
            internal_type: self.internal_type.as_deref(),
            components: self.components.as_deref(),
            indexed: Some(self.indexed),
        }
        .serialize(serializer)
    }
}
