//! A single configuration leaf and its resolution rules.
//!
//! A [`Field`] starts life as a declaration (name, caster, default,
//! description) and is cloned into every [`ConfigGroup`](crate::ConfigGroup)
//! instance, where it receives its final name and later its value. Resolution
//! against a provider goes:
//!
//! 1. Look up the field's own key.
//! 2. If a file field is attached, look up `{NAME}_FILE` too. Both present is
//!    a conflict, detected before any file is opened.
//! 3. With only the `_FILE` key present, read that file and trim it.
//! 4. With neither present, use the default verbatim (never cast) or fail.
//! 5. Cast the raw string if a caster is set, otherwise keep it as a string.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::caster::{Caster, caster_label};
use crate::error::{FileOrigin, MinicfgError};
use crate::provider::Provider;
use crate::types::ValueSource;
use crate::value::Value;

const FILE_SUFFIX: &str = "_FILE";

#[derive(Debug, Clone)]
struct Resolved {
    value: Value,
    source: ValueSource,
}

/// A named, optionally typed configuration value.
#[derive(Clone)]
pub struct Field {
    name: Option<String>,
    default: Option<Value>,
    caster: Option<Arc<dyn Caster>>,
    description: Option<String>,
    file_field: Option<Box<Field>>,
    resolved: Option<Resolved>,
}

#[allow(clippy::new_without_default)]
impl Field {
    /// A field named after the key it is declared under.
    pub fn new() -> Self {
        Self {
            name: None,
            default: None,
            caster: None,
            description: None,
            file_field: None,
            resolved: None,
        }
    }

    /// A field with an explicit name instead of its declared key.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::new()
        }
    }

    /// Value used when nothing is provided. Defaults are never cast.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn caster(mut self, caster: impl Caster + 'static) -> Self {
        self.caster = Some(Arc::new(caster));
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Also accept the value from a file whose path is given in `{NAME}_FILE`.
    pub fn attach_file_field(mut self) -> Self {
        let file_name = self.name.as_deref().map(file_field_name);
        self.file_field = Some(Box::new(Field {
            name: file_name,
            ..Field::new()
        }));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The caster's type name; `"str"` for fields without a caster.
    pub fn type_name(&self) -> Option<String> {
        match &self.caster {
            Some(caster) => caster.type_name(),
            None => Some("str".to_string()),
        }
    }

    pub fn file_field(&self) -> Option<&Field> {
        self.file_field.as_deref()
    }

    /// The resolved value, `None` until populated.
    pub fn value(&self) -> Option<&Value> {
        self.resolved.as_ref().map(|r| &r.value)
    }

    pub fn source(&self) -> Option<&ValueSource> {
        self.resolved.as_ref().map(|r| &r.source)
    }

    /// Give the field its final name: the declared key unless it was named
    /// explicitly, prefixed with `{prefix}{separator}` when the owning group
    /// has a name. The attached file field follows as `{final}_FILE`.
    pub(crate) fn assign_name(&mut self, key: &str, prefix: Option<(&str, &str)>) {
        let base = self.name.take().unwrap_or_else(|| key.to_string());
        let name = match prefix {
            Some((group, sep)) => format!("{group}{sep}{base}"),
            None => base,
        };
        if let Some(file_field) = self.file_field.as_deref_mut() {
            file_field.name = Some(file_field_name(&name));
        }
        self.name = Some(name);
    }

    /// Resolve this field's value from `provider`.
    ///
    /// Any previous value is discarded first, so a failed re-population
    /// leaves the field unset. A field that was never named (neither through
    /// [`Field::named`] nor by being declared in a group) is
    /// [`MinicfgError::Unnamed`] and queries nothing.
    pub fn populate(&mut self, provider: &dyn Provider) -> Result<(), MinicfgError> {
        self.resolved = None;
        let name = self.name.clone().ok_or(MinicfgError::Unnamed)?;

        trace!(key = %name, "looking up field");
        let raw = provider.get(&name);
        let file = match self.file_field.as_deref_mut() {
            Some(file_field) => file_field.lookup_path(provider),
            None => None,
        };

        let (raw, source) = match (raw, file) {
            (Some(_), Some((file_key, _))) => {
                return Err(MinicfgError::Conflict {
                    field: name,
                    file_field: file_key,
                });
            }
            (Some(raw), None) => (raw, ValueSource::Provider { key: name.clone() }),
            (None, Some((key, path))) => {
                let raw = read_trimmed(&path)?;
                debug!(key = %key, path = %path.display(), "read field value from file");
                (raw, ValueSource::File { key, path })
            }
            (None, None) => {
                let Some(default) = &self.default else {
                    return Err(MinicfgError::ValueNotProvided {
                        field: name,
                        file_field: self.file_field.as_ref().and_then(|f| f.name.clone()),
                    });
                };
                debug!(key = %name, "using default value");
                self.resolved = Some(Resolved {
                    value: default.clone(),
                    source: ValueSource::Default,
                });
                return Ok(());
            }
        };

        let value = self.cast(&name, raw, &source)?;
        self.resolved = Some(Resolved { value, source });
        Ok(())
    }

    /// File-field half of resolution: record and return the path if the
    /// provider has one.
    fn lookup_path(&mut self, provider: &dyn Provider) -> Option<(String, PathBuf)> {
        self.resolved = None;
        let key = self.name.clone()?;
        trace!(key = %key, "looking up file field");
        let path = provider.get(&key)?;
        self.resolved = Some(Resolved {
            value: Value::String(path.clone()),
            source: ValueSource::Provider { key: key.clone() },
        });
        Some((key, PathBuf::from(path)))
    }

    fn cast(&self, name: &str, raw: String, source: &ValueSource) -> Result<Value, MinicfgError> {
        let Some(caster) = &self.caster else {
            return Ok(Value::String(raw));
        };
        caster
            .cast(&raw)
            .map_err(|err| MinicfgError::Casting {
                field: name.to_string(),
                caster: caster_label(caster.as_ref()),
                file: match source {
                    ValueSource::File { key, path } => Some(FileOrigin {
                        field: key.clone(),
                        path: path.clone(),
                    }),
                    _ => None,
                },
                raw_value: raw,
                source: err,
            })
    }
}

fn file_field_name(name: &str) -> String {
    format!("{name}{FILE_SUFFIX}")
}

fn read_trimmed(path: &Path) -> Result<String, MinicfgError> {
    let content = std::fs::read_to_string(path).map_err(|e| MinicfgError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(content.trim().to_string())
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type", &self.type_name())
            .field("default", &self.default)
            .field("description", &self.description)
            .field("file_field", &self.file_field.as_ref().and_then(|f| f.name.as_ref()))
            .field("value", &self.value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caster::IntCaster;
    use crate::error::CastError;
    use crate::fixtures::test::{UpperCaster, provider};
    use std::fs;
    use tempfile::TempDir;

    fn named(name: &str) -> Field {
        let mut field = Field::new();
        field.assign_name(name, None);
        field
    }

    fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn raw_value_without_caster_is_string() {
        let mut field = named("HOST");
        field.populate(&provider(&[("HOST", "example.com")])).unwrap();
        assert_eq!(field.value(), Some(&Value::from("example.com")));
        assert_eq!(
            field.source(),
            Some(&ValueSource::Provider { key: "HOST".into() })
        );
    }

    #[test]
    fn raw_value_is_cast() {
        let mut field = Field::new().caster(UpperCaster);
        field.assign_name("F", None);
        field.populate(&provider(&[("F", "raw_value")])).unwrap();
        assert_eq!(field.value(), Some(&Value::from("RAW_VALUE")));
    }

    #[test]
    fn empty_string_is_a_provided_value() {
        let mut field = Field::new().default("fallback");
        field.assign_name("F", None);
        field.populate(&provider(&[("F", "")])).unwrap();
        assert_eq!(field.value(), Some(&Value::from("")));
    }

    #[test]
    fn default_is_used_uncast() {
        let mut field = Field::new().caster(IntCaster).default(5432);
        field.assign_name("PORT", None);
        field.populate(&provider(&[])).unwrap();
        assert_eq!(field.value(), Some(&Value::Integer(5432)));
        assert_eq!(field.source(), Some(&ValueSource::Default));

        // A caster that would reject the default is never consulted.
        let mut field = Field::new().caster(IntCaster).default("not a number");
        field.assign_name("PORT", None);
        field.populate(&provider(&[])).unwrap();
        assert_eq!(field.value(), Some(&Value::from("not a number")));
    }

    #[test]
    fn null_default_differs_from_no_default() {
        let mut field = Field::new().default(Value::Null);
        field.assign_name("OPT", None);
        field.populate(&provider(&[])).unwrap();
        assert_eq!(field.value(), Some(&Value::Null));

        let mut field = named("REQ");
        assert!(matches!(
            field.populate(&provider(&[])),
            Err(MinicfgError::ValueNotProvided { .. })
        ));
    }

    #[test]
    fn missing_value_names_field() {
        let mut field = named("DATABASE_HOST");
        let err = field.populate(&provider(&[])).unwrap_err();
        match err {
            MinicfgError::ValueNotProvided { field, file_field } => {
                assert_eq!(field, "DATABASE_HOST");
                assert_eq!(file_field, None);
            }
            other => panic!("Expected ValueNotProvided, got {other:?}"),
        }
    }

    #[test]
    fn missing_value_names_file_field_too() {
        let mut field = Field::new().attach_file_field();
        field.assign_name("HOST", None);
        let err = field.populate(&provider(&[])).unwrap_err();
        match err {
            MinicfgError::ValueNotProvided { file_field, .. } => {
                assert_eq!(file_field.as_deref(), Some("HOST_FILE"));
            }
            other => panic!("Expected ValueNotProvided, got {other:?}"),
        }
    }

    #[test]
    fn casting_failure_reports_field_and_raw_value() {
        let mut field = Field::new().caster(IntCaster);
        field.assign_name("PORT", None);
        let err = field.populate(&provider(&[("PORT", "abc")])).unwrap_err();
        match err {
            MinicfgError::Casting {
                field,
                raw_value,
                caster,
                file,
                source,
            } => {
                assert_eq!(field, "PORT");
                assert_eq!(raw_value, "abc");
                assert_eq!(caster, "int");
                assert_eq!(file, None);
                assert!(matches!(source, CastError::Int(_)));
            }
            other => panic!("Expected Casting, got {other:?}"),
        }
        assert_eq!(field.value(), None);
    }

    #[test]
    fn file_field_value_is_read_and_trimmed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "hostname", "myhost\n");
        let mut field = Field::new().attach_file_field();
        field.assign_name("HOST", Some(("DATABASE", "_")));

        field
            .populate(&provider(&[("DATABASE_HOST_FILE", path.as_str())]))
            .unwrap();
        assert_eq!(field.value(), Some(&Value::from("myhost")));
        assert_eq!(
            field.source(),
            Some(&ValueSource::File {
                key: "DATABASE_HOST_FILE".into(),
                path: path.clone().into(),
            })
        );
        let file_field = field.file_field().unwrap();
        assert_eq!(file_field.value(), Some(&Value::from(path.as_str())));
    }

    #[test]
    fn file_contents_are_cast() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "port", "  5432  \n");
        let mut field = Field::new().caster(IntCaster).attach_file_field();
        field.assign_name("PORT", None);
        field.populate(&provider(&[("PORT_FILE", path.as_str())])).unwrap();
        assert_eq!(field.value(), Some(&Value::Integer(5432)));
    }

    #[test]
    fn bad_file_contents_report_file_origin() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "port", "eighty");
        let mut field = Field::new().caster(IntCaster).attach_file_field();
        field.assign_name("PORT", None);
        let err = field
            .populate(&provider(&[("PORT_FILE", path.as_str())]))
            .unwrap_err();
        match err {
            MinicfgError::Casting { file, raw_value, .. } => {
                assert_eq!(raw_value, "eighty");
                let origin = file.unwrap();
                assert_eq!(origin.field, "PORT_FILE");
                assert_eq!(origin.path, PathBuf::from(&path));
            }
            other => panic!("Expected Casting, got {other:?}"),
        }
    }

    #[test]
    fn both_keys_conflict_before_file_io() {
        let mut field = Field::new().default("d").attach_file_field();
        field.assign_name("KEY", None);
        // The path does not exist; a conflict must win over the I/O error.
        let err = field
            .populate(&provider(&[("KEY", "v"), ("KEY_FILE", "/nonexistent/minicfg/x")]))
            .unwrap_err();
        match err {
            MinicfgError::Conflict { field, file_field } => {
                assert_eq!(field, "KEY");
                assert_eq!(file_field, "KEY_FILE");
            }
            other => panic!("Expected Conflict, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let mut field = Field::new().default("d").attach_file_field();
        field.assign_name("KEY", None);
        let err = field
            .populate(&provider(&[("KEY_FILE", "/nonexistent/minicfg/x")]))
            .unwrap_err();
        match err {
            MinicfgError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("/nonexistent/minicfg/x"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected Io, got {other:?}"),
        }
    }

    #[test]
    fn default_applies_when_file_field_absent() {
        let mut field = Field::new().default("localhost").attach_file_field();
        field.assign_name("HOST", None);
        field.populate(&provider(&[])).unwrap();
        assert_eq!(field.value(), Some(&Value::from("localhost")));
        assert_eq!(field.file_field().unwrap().value(), None);
    }

    #[test]
    fn explicit_name_is_prefixed_and_file_field_follows() {
        let mut field = Field::named("HOSTNAME").attach_file_field();
        field.assign_name("HOST", Some(("SERVICE_DB", "_")));
        assert_eq!(field.name(), Some("SERVICE_DB_HOSTNAME"));
        assert_eq!(
            field.file_field().unwrap().name(),
            Some("SERVICE_DB_HOSTNAME_FILE")
        );
    }

    #[test]
    fn type_name_defaults_to_str() {
        assert_eq!(Field::new().type_name().as_deref(), Some("str"));
        assert_eq!(
            Field::new().caster(IntCaster).type_name().as_deref(),
            Some("int")
        );
        assert_eq!(Field::new().caster(UpperCaster).type_name(), None);
    }

    #[test]
    fn unnamed_field_is_rejected_before_lookup() {
        let mut field = Field::new().default("d").attach_file_field();
        let result = field.populate(&provider(&[("", "oops"), ("_FILE", "/tmp/x")]));
        assert!(matches!(result, Err(MinicfgError::Unnamed)));
        assert_eq!(field.value(), None);
        assert_eq!(field.file_field().unwrap().value(), None);
    }

    #[test]
    fn explicitly_named_field_populates_standalone() {
        let mut field = Field::named("TOKEN").attach_file_field();
        field.populate(&provider(&[("TOKEN", "t")])).unwrap();
        assert_eq!(field.value(), Some(&Value::from("t")));
    }

    #[test]
    fn clones_do_not_share_state() {
        let template = Field::new().default("d");
        let mut a = template.clone();
        let mut b = template.clone();
        a.assign_name("A", None);
        b.assign_name("B", None);
        a.populate(&provider(&[("A", "from-a")])).unwrap();
        b.populate(&provider(&[])).unwrap();
        assert_eq!(a.value(), Some(&Value::from("from-a")));
        assert_eq!(b.value(), Some(&Value::from("d")));
        assert_eq!(template.value(), None);
    }
}
