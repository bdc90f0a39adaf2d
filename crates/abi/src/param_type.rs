//! Solidity parameter types and the canonical type-string parser.

use crate::{AbiError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::str::FromStr;

/// Width used when `int`/`uint` appear without a suffix.
pub const DEFAULT_BITS: usize = 256;
/// Width of the enum produced by the lenient fallback.
pub const ENUM_FALLBACK_BITS: usize = 8;

/// A Solidity parameter type.
///
/// Array variants own their element type, so a `ParamType` is always a tree.
/// Nesting depth is unbounded: every walk over the array levels (parsing,
/// rendering, comparison, cloning, dropping) is a loop, not a recursion.
pub enum ParamType {
    Address,
    String,
    Bool,
    /// Dynamic `bytes`.
    Bytes,
    /// A tuple; its members live in the owning parameter's `components`.
    Tuple,
    Uint(usize),
    Int(usize),
    FixedBytes(usize),
    Enum(usize),
    FixedArray(Box<ParamType>, usize),
    Array(Box<ParamType>),
}

/// Knobs for [`ParamType::parse_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Treat unrecognized scalar names as `enum(8)` instead of failing.
    pub unknown_as_enum: bool,
}

impl ParserOptions {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        ParserOptions {
            unknown_as_enum: true,
        }
    }
}

impl ParamType {
    /// Parses a canonical type string such as `uint256` or `int24[5][]`.
    pub fn parse(signature: &str) -> Result<Self> {
        Self::parse_with(signature, ParserOptions::strict())
    }

    pub fn parse_with(signature: &str, options: ParserOptions) -> Result<Self> {
        // suffixes are peeled right to left, so `dims` is outermost first
        let mut rest = signature;
        let mut dims = Vec::new();
        while let Some(body) = rest.strip_suffix(']') {
            let open = body
                .rfind('[')
                .ok_or_else(|| AbiError::InvalidArrayType(signature.to_string()))?;
            let dim = match &body[open + 1..] {
                "" => None,
                size => match parse_number(size)? {
                    0 => return Err(AbiError::InvalidArrayType(signature.to_string())),
                    size => Some(size),
                },
            };
            dims.push(dim);
            rest = &body[..open];
        }

        if rest.is_empty() {
            return Err(AbiError::EmptyType);
        }

        let mut ty = parse_scalar(rest, options)?;
        for dim in dims.into_iter().rev() {
            ty = ty.wrap(dim);
        }
        Ok(ty)
    }

    fn wrap(self, dim: Option<usize>) -> Self {
        match dim {
            Some(size) => ParamType::FixedArray(Box::new(self), size),
            None => ParamType::Array(Box::new(self)),
        }
    }

    /// Splits the type into its innermost non-array type and the array
    /// dimensions around it, outermost first. `None` is a dynamic `[]`.
    pub fn dimensions(&self) -> (&ParamType, Vec<Option<usize>>) {
        let mut dims = Vec::new();
        let mut ty = self;
        loop {
            match ty {
                ParamType::Array(child) => {
                    dims.push(None);
                    ty = &**child;
                }
                ParamType::FixedArray(child, size) => {
                    dims.push(Some(*size));
                    ty = &**child;
                }
                base => return (base, dims),
            }
        }
    }

    /// Number of array levels wrapped around the innermost type.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut ty = self;
        while let ParamType::Array(child) | ParamType::FixedArray(child, _) = ty {
            depth += 1;
            ty = &**child;
        }
        depth
    }

    /// The innermost non-array type.
    pub fn base(&self) -> &ParamType {
        let mut ty = self;
        while let ParamType::Array(child) | ParamType::FixedArray(child, _) = ty {
            ty = &**child;
        }
        ty
    }

    /// True when the type is `tuple`, possibly wrapped in arrays.
    pub fn is_tuple_rooted(&self) -> bool {
        matches!(self.base(), ParamType::Tuple)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ParamType::Array(_) | ParamType::FixedArray(..))
    }

    /// Renders the type with its `tuple` base swapped for the given text, keeping
    /// array suffixes. Used to build `(uint256,address)[]` style signatures.
    pub(crate) fn render_with_tuple(&self, tuple: &str) -> String {
        let (base, dims) = self.dimensions();
        let base = match base {
            ParamType::Tuple => tuple.to_string(),
            other => other.to_string(),
        };
        base + &suffixes(&dims)
    }

    fn clone_scalar(&self) -> ParamType {
        match self {
            ParamType::Address => ParamType::Address,
            ParamType::String => ParamType::String,
            ParamType::Bool => ParamType::Bool,
            ParamType::Bytes => ParamType::Bytes,
            ParamType::Tuple => ParamType::Tuple,
            ParamType::Uint(bits) => ParamType::Uint(*bits),
            ParamType::Int(bits) => ParamType::Int(*bits),
            ParamType::FixedBytes(size) => ParamType::FixedBytes(*size),
            ParamType::Enum(bits) => ParamType::Enum(*bits),
            ParamType::Array(_) | ParamType::FixedArray(..) => {
                unreachable!("array levels are peeled off by dimensions()")
            }
        }
    }

    /// Detaches the child node when it is itself an array, leaving a scalar
    /// placeholder behind.
    fn take_nested(&mut self) -> Option<ParamType> {
        match self {
            ParamType::Array(child) | ParamType::FixedArray(child, _) if child.is_array() => {
                Some(mem::replace(&mut **child, ParamType::Bool))
            }
            _ => None,
        }
    }
}

/// Array suffixes, innermost first, for dimensions listed outermost first.
fn suffixes(dims: &[Option<usize>]) -> String {
    dims.iter()
        .rev()
        .map(|dim| match dim {
            Some(size) => format!("[{}]", size),
            None => "[]".to_string(),
        })
        .collect()
}

fn parse_scalar(name: &str, options: ParserOptions) -> Result<ParamType> {
    let ty = match name {
        "address" => ParamType::Address,
        "string" => ParamType::String,
        "bool" => ParamType::Bool,
        "bytes" => ParamType::Bytes,
        "tuple" => ParamType::Tuple,
        _ => {
            if let Some(bits) = name.strip_prefix("uint") {
                ParamType::Uint(parse_bits(bits)?)
            } else if let Some(bits) = name.strip_prefix("int") {
                ParamType::Int(parse_bits(bits)?)
            } else if let Some(size) = name.strip_prefix("bytes") {
                let size = parse_number(size)?;
                if !(1..=32).contains(&size) {
                    return Err(AbiError::InvalidBytesAlignment(size));
                }
                ParamType::FixedBytes(size)
            } else if options.unknown_as_enum {
                tracing::debug!("Treating unknown type `{}` as enum({})", name, ENUM_FALLBACK_BITS);
                ParamType::Enum(ENUM_FALLBACK_BITS)
            } else {
                return Err(AbiError::UnknownType(name.to_string()));
            }
        }
    };

    Ok(ty)
}

fn parse_bits(suffix: &str) -> Result<usize> {
    if suffix.is_empty() {
        return Ok(DEFAULT_BITS);
    }
    let bits = parse_number(suffix)?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(AbiError::InvalidBitWidth(bits));
    }
    Ok(bits)
}

fn parse_number(digits: &str) -> Result<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::InvalidNumber(digits.to_string()));
    }
    digits
        .parse()
        .map_err(|_| AbiError::InvalidNumber(digits.to_string()))
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (base, dims) = self.dimensions();
        match base {
            ParamType::Address => f.write_str("address")?,
            ParamType::String => f.write_str("string")?,
            ParamType::Bool => f.write_str("bool")?,
            ParamType::Bytes => f.write_str("bytes")?,
            ParamType::Tuple => f.write_str("tuple")?,
            // enums travel as their backing unsigned integer
            ParamType::Uint(bits) | ParamType::Enum(bits) => write!(f, "uint{}", bits)?,
            ParamType::Int(bits) => write!(f, "int{}", bits)?,
            ParamType::FixedBytes(size) => write!(f, "bytes{}", size)?,
            ParamType::Array(_) | ParamType::FixedArray(..) => {}
        }
        f.write_str(&suffixes(&dims))
    }
}

impl fmt::Debug for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (base, dims) = self.dimensions();
        for dim in &dims {
            match dim {
                Some(_) => f.write_str("FixedArray(")?,
                None => f.write_str("Array(")?,
            }
        }
        match base {
            ParamType::Address => f.write_str("Address")?,
            ParamType::String => f.write_str("String")?,
            ParamType::Bool => f.write_str("Bool")?,
            ParamType::Bytes => f.write_str("Bytes")?,
            ParamType::Tuple => f.write_str("Tuple")?,
            ParamType::Uint(bits) => write!(f, "Uint({})", bits)?,
            ParamType::Int(bits) => write!(f, "Int({})", bits)?,
            ParamType::FixedBytes(size) => write!(f, "FixedBytes({})", size)?,
            ParamType::Enum(bits) => write!(f, "Enum({})", bits)?,
            ParamType::Array(_) | ParamType::FixedArray(..) => {}
        }
        for dim in dims.iter().rev() {
            match dim {
                Some(size) => write!(f, ", {})", size)?,
                None => f.write_str(")")?,
            }
        }
        Ok(())
    }
}

impl Clone for ParamType {
    fn clone(&self) -> Self {
        let (base, dims) = self.dimensions();
        let mut ty = base.clone_scalar();
        for dim in dims.into_iter().rev() {
            ty = ty.wrap(dim);
        }
        ty
    }
}

impl PartialEq for ParamType {
    fn eq(&self, other: &Self) -> bool {
        let (mut left, mut right) = (self, other);
        loop {
            match (left, right) {
                (ParamType::Array(a), ParamType::Array(b)) => {
                    left = &**a;
                    right = &**b;
                }
                (ParamType::FixedArray(a, n), ParamType::FixedArray(b, m)) if n == m => {
                    left = &**a;
                    right = &**b;
                }
                (ParamType::Uint(a), ParamType::Uint(b))
                | (ParamType::Int(a), ParamType::Int(b))
                | (ParamType::FixedBytes(a), ParamType::FixedBytes(b))
                | (ParamType::Enum(a), ParamType::Enum(b)) => return a == b,
                (ParamType::Array(_), _)
                | (ParamType::FixedArray(..), _)
                | (_, ParamType::Array(_))
                | (_, ParamType::FixedArray(..)) => return false,
                _ => return mem::discriminant(left) == mem::discriminant(right),
            }
        }
    }
}

impl Eq for ParamType {}

impl Hash for ParamType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut ty = self;
        loop {
            mem::discriminant(ty).hash(state);
            match ty {
                ParamType::Array(child) => ty = &**child,
                ParamType::FixedArray(child, size) => {
                    size.hash(state);
                    ty = &**child;
                }
                ParamType::Uint(n) | ParamType::Int(n) | ParamType::FixedBytes(n) | ParamType::Enum(n) => {
                    n.hash(state);
                    return;
                }
                _ => return,
            }
        }
    }
}

impl Drop for ParamType {
    fn drop(&mut self) {
        let mut next = self.take_nested();
        while let Some(mut node) = next {
            next = node.take_nested();
        }
    }
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for ParamType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        ParamType::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(ParamType::parse("address").unwrap(), ParamType::Address);
        assert_eq!(ParamType::parse("string").unwrap(), ParamType::String);
        assert_eq!(ParamType::parse("bool").unwrap(), ParamType::Bool);
        assert_eq!(ParamType::parse("bytes").unwrap(), ParamType::Bytes);
        assert_eq!(ParamType::parse("tuple").unwrap(), ParamType::Tuple);
        assert_eq!(ParamType::parse("uint8").unwrap(), ParamType::Uint(8));
        assert_eq!(ParamType::parse("int24").unwrap(), ParamType::Int(24));
        assert_eq!(ParamType::parse("bytes32").unwrap(), ParamType::FixedBytes(32));
        assert_eq!(ParamType::parse("bytes1").unwrap(), ParamType::FixedBytes(1));
    }

    #[test]
    fn test_parse_default_width() {
        assert_eq!(ParamType::parse("uint").unwrap(), ParamType::Uint(256));
        assert_eq!(ParamType::parse("int").unwrap(), ParamType::Int(256));
        assert_eq!(ParamType::parse("uint").unwrap().to_string(), "uint256");
    }

    #[test]
    fn test_parse_nested_arrays() {
        let ty = ParamType::parse("int[5][]").unwrap();
        assert_eq!(
            ty,
            ParamType::Array(Box::new(ParamType::FixedArray(Box::new(ParamType::Int(256)), 5)))
        );
        assert_eq!(ty.depth(), 2);
        assert_eq!(ty.base(), &ParamType::Int(256));
        drop(ty);

        let ty = ParamType::parse("address[][2]").unwrap();
        assert_eq!(
            ty,
            ParamType::FixedArray(Box::new(ParamType::Array(Box::new(ParamType::Address))), 2)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(ParamType::parse(""), Err(AbiError::EmptyType)));
        assert!(matches!(ParamType::parse("[]"), Err(AbiError::EmptyType)));
        assert!(matches!(ParamType::parse("uint256]"), Err(AbiError::InvalidArrayType(_))));
        assert!(matches!(ParamType::parse("uint256[0]"), Err(AbiError::InvalidArrayType(_))));
        assert!(matches!(ParamType::parse("uint256[x]"), Err(AbiError::InvalidNumber(_))));
        assert!(matches!(ParamType::parse("uint256[+2]"), Err(AbiError::InvalidNumber(_))));
        assert!(matches!(ParamType::parse("uintx"), Err(AbiError::InvalidNumber(_))));
        assert!(matches!(ParamType::parse("bytes0"), Err(AbiError::InvalidBytesAlignment(0))));
        assert!(matches!(ParamType::parse("bytes33"), Err(AbiError::InvalidBytesAlignment(33))));
        assert!(matches!(ParamType::parse("uint7"), Err(AbiError::InvalidBitWidth(7))));
        assert!(matches!(ParamType::parse("int264"), Err(AbiError::InvalidBitWidth(264))));
        assert!(matches!(ParamType::parse("MyEnum"), Err(AbiError::UnknownType(_))));
    }

    #[test]
    fn test_lenient_enum_fallback() {
        let options = ParserOptions::lenient();
        assert_eq!(ParamType::parse_with("MyEnum", options).unwrap(), ParamType::Enum(8));
        assert_eq!(
            ParamType::parse_with("MyEnum[]", options).unwrap(),
            ParamType::Array(Box::new(ParamType::Enum(8)))
        );
        // malformed numerics still fail
        assert!(ParamType::parse_with("bytes40", options).is_err());
        assert_eq!(ParamType::Enum(8).to_string(), "uint8");
    }

    #[test]
    fn test_deep_nesting() {
        let signature = format!("bool{}", "[]".repeat(64));
        let ty = ParamType::parse(&signature).unwrap();
        assert_eq!(ty.depth(), 64);
        assert_eq!(ty.to_string(), signature);
    }

    #[test]
    fn test_very_deep_nesting() {
        let depth = 100_000;
        let signature = format!("uint8{}", "[3][]".repeat(depth / 2));
        let ty = ParamType::parse(&signature).unwrap();
        assert_eq!(ty.depth(), depth);
        assert_eq!(ty.base(), &ParamType::Uint(8));
        assert_eq!(ty.to_string(), signature);

        let copy = ty.clone();
        assert!(copy == ty);
        let shallower = ParamType::parse(&signature[..signature.len() - 2]).unwrap();
        assert!(shallower != ty);
        drop(copy);
        drop(shallower);
        drop(ty);
    }

    #[test]
    fn test_debug_and_hash() {
        use std::collections::HashSet;

        let ty = ParamType::parse("int[5][]").unwrap();
        assert_eq!(format!("{:?}", ty), "Array(FixedArray(Int(256), 5))");

        let mut seen = HashSet::new();
        assert!(seen.insert(ty.clone()));
        assert!(!seen.insert(ParamType::parse("int256[5][]").unwrap()));
        assert!(seen.insert(ParamType::parse("int256[4][]").unwrap()));
        assert!(seen.insert(ParamType::parse("uint256[5][]").unwrap()));
    }

    #[test]
    fn test_serde_as_string() {
        let ty: ParamType = serde_json::from_str("\"uint256[3]\"").unwrap();
        assert_eq!(ty, ParamType::FixedArray(Box::new(ParamType::Uint(256)), 3));
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"uint256[3]\"");
        assert!(serde_json::from_str::<ParamType>("\"uint3\"").is_err());
    }

    fn scalar_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("address".to_string()),
            Just("string".to_string()),
            Just("bool".to_string()),
            Just("bytes".to_string()),
            Just("tuple".to_string()),
            (1usize..=32).prop_map(|bits| format!("uint{}", bits * 8)),
            (1usize..=32).prop_map(|bits| format!("int{}", bits * 8)),
            (1usize..=32).prop_map(|size| format!("bytes{}", size)),
        ]
    }

    proptest! {
        #[test]
        fn prop_canonical_round_trip(
            scalar in scalar_strategy(),
            dims in proptest::collection::vec(proptest::option::of(1usize..100), 0..6),
        ) {
            let mut signature = scalar;
            for dim in &dims {
                match dim {
                    Some(size) => signature.push_str(&format!("[{}]", size)),
                    None => signature.push_str("[]"),
                }
            }
            let ty = ParamType::parse(&signature).unwrap();
            prop_assert_eq!(ty.depth(), dims.len());
            prop_assert_eq!(ty.to_string(), signature);
        }
    }
}
