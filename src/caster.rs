//! String-to-value casters.
//!
//! A [`Caster`] turns the raw string a provider returned into a typed
//! [`Value`]. Casters are stateless and shared between cloned declarations,
//! so implementations must not rely on interior mutability.

use std::fmt;
use std::sync::Arc;

use crate::error::CastError;
use crate::value::Value;

/// Converts a raw provider string into a typed value.
pub trait Caster: Send + Sync {
    fn cast(&self, raw: &str) -> Result<Value, CastError>;

    /// Type name shown in generated docs, e.g. `"int"` or `"list[int]"`.
    ///
    /// `None` when the type cannot be meaningfully named.
    fn type_name(&self) -> Option<String>;
}

/// Name used for a caster in error messages.
pub(crate) fn caster_label(caster: &dyn Caster) -> String {
    caster.type_name().unwrap_or_else(|| "custom".to_string())
}

/// Casts to [`Value::Integer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCaster;

impl Caster for IntCaster {
    fn cast(&self, raw: &str) -> Result<Value, CastError> {
        Ok(Value::Integer(raw.parse::<i64>()?))
    }

    fn type_name(&self) -> Option<String> {
        Some("int".into())
    }
}

/// Casts to [`Value::Float`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatCaster;

impl Caster for FloatCaster {
    fn cast(&self, raw: &str) -> Result<Value, CastError> {
        Ok(Value::Float(raw.parse::<f64>()?))
    }

    fn type_name(&self) -> Option<String> {
        Some("float".into())
    }
}

/// Casts to [`Value::Boolean`] using fixed, case-sensitive vocabularies.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCaster;

impl BoolCaster {
    pub const TRUE: &'static [&'static str] = &["true", "yes", "on", "enable", "enabled", "1"];
    pub const FALSE: &'static [&'static str] =
        &["false", "no", "off", "disable", "disabled", "0"];
}

impl Caster for BoolCaster {
    fn cast(&self, raw: &str) -> Result<Value, CastError> {
        if Self::TRUE.contains(&raw) {
            Ok(Value::Boolean(true))
        } else if Self::FALSE.contains(&raw) {
            Ok(Value::Boolean(false))
        } else {
            Err(CastError::Bool(raw.to_string()))
        }
    }

    fn type_name(&self) -> Option<String> {
        Some("bool".into())
    }
}

/// Splits on a separator and optionally casts every item.
///
/// A single failing item fails the whole cast; no partial list is returned.
#[derive(Clone)]
pub struct ListCaster {
    separator: String,
    item_caster: Option<Arc<dyn Caster>>,
}

impl ListCaster {
    pub fn new() -> Self {
        Self {
            separator: ",".to_string(),
            item_caster: None,
        }
    }

    /// Override the item separator (default: `","`).
    pub fn separator(mut self, sep: &str) -> Self {
        self.separator = sep.to_string();
        self
    }

    /// Cast every item with `caster` instead of keeping raw strings.
    pub fn item_caster(mut self, caster: impl Caster + 'static) -> Self {
        self.item_caster = Some(Arc::new(caster));
        self
    }
}

impl Default for ListCaster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ListCaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListCaster")
            .field("separator", &self.separator)
            .field("item_type", &self.item_caster.as_ref().map(|c| c.type_name()))
            .finish()
    }
}

impl Caster for ListCaster {
    fn cast(&self, raw: &str) -> Result<Value, CastError> {
        let pieces = raw.split(self.separator.as_str());
        let Some(item_caster) = &self.item_caster else {
            return Ok(Value::List(pieces.map(|s| Value::String(s.to_string())).collect()));
        };

        let items = pieces
            .map(|item| {
                item_caster
                    .cast(item)
                    .map_err(|source| CastError::ListItem {
                        item: item.to_string(),
                        caster: caster_label(item_caster.as_ref()),
                        source: Box::new(source),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::List(items))
    }

    fn type_name(&self) -> Option<String> {
        match &self.item_caster {
            None => Some("list[str]".into()),
            Some(item) => match item.type_name() {
                Some(name) => Some(format!("list[{name}]")),
                None => Some("list".into()),
            },
        }
    }
}

type JsonLoader = dyn Fn(&str) -> Result<serde_json::Value, CastError> + Send + Sync;

/// Parses structured values, by default with `serde_json`.
#[derive(Clone)]
pub struct JsonCaster {
    loader: Arc<JsonLoader>,
}

impl JsonCaster {
    pub fn new() -> Self {
        Self {
            loader: Arc::new(decode_json),
        }
    }

    /// Replace the decoder, e.g. to accept a relaxed JSON dialect.
    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn(&str) -> Result<serde_json::Value, CastError> + Send + Sync + 'static,
    {
        Self {
            loader: Arc::new(loader),
        }
    }
}

fn decode_json(raw: &str) -> Result<serde_json::Value, CastError> {
    Ok(serde_json::from_str(raw)?)
}

impl Default for JsonCaster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JsonCaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonCaster").finish_non_exhaustive()
    }
}

impl Caster for JsonCaster {
    fn cast(&self, raw: &str) -> Result<Value, CastError> {
        (self.loader)(raw).map(Value::Json)
    }

    fn type_name(&self) -> Option<String> {
        Some("json".into())
    }
}
