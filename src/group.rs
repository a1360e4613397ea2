//! Declaration and instantiation of configuration groups.
//!
//! A [`Minicfg`] is a reusable declaration: fields, nested groups, a name,
//! a separator and an optional default provider. It never holds values.
//! [`Minicfg::instantiate`] deep-clones that declaration into a
//! [`ConfigGroup`], resolving every final key up front, so two instances of
//! the same declaration never share field state.
//!
//! # Naming
//!
//! With separator `_`, a group named `A` holding a child named `B` holding a
//! field `C` resolves the field to `A_B_C`. A child without a name of its own
//! takes its parent's name unchanged, so its fields land directly under `A`.
//! The separator is inherited by descendants unless they set their own; the
//! parent's separator joins the parent name to a child's own name.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::MinicfgError;
use crate::field::Field;
use crate::populated::Populated;
use crate::provider::{EnvProvider, Provider};

const DEFAULT_SEPARATOR: &str = "_";

#[derive(Clone)]
enum Member {
    Field(Field),
    Group(Minicfg),
}

/// Declaration of a configuration group.
///
/// ```ignore
/// let config = Minicfg::new()
///     .name("DATABASE")
///     .field("HOST", Field::new().default("localhost"))
///     .field("PORT", Field::new().caster(IntCaster))
///     .populated()?;
/// ```
#[derive(Clone, Default)]
pub struct Minicfg {
    name: Option<String>,
    separator: Option<String>,
    provider: Option<Arc<dyn Provider>>,
    members: Vec<(String, Member)>,
}

impl Minicfg {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name prefixed to every field key in this group and its descendants.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Separator between name segments (default: `"_"`, or the parent's).
    pub fn separator(mut self, sep: &str) -> Self {
        self.separator = Some(sep.to_string());
        self
    }

    /// Provider used by [`ConfigGroup::populate`] for this group and any
    /// descendant that does not declare its own.
    pub fn provider(mut self, provider: impl Provider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Declare a field under `key`. The key becomes the field's name unless
    /// the field was created with [`Field::named`].
    ///
    /// Re-declaring a key replaces the earlier field or group in place.
    pub fn field(self, key: &str, field: Field) -> Self {
        self.member(key, Member::Field(field))
    }

    /// Declare a nested group under `key`.
    pub fn child(self, key: &str, group: Minicfg) -> Self {
        self.member(key, Member::Group(group))
    }

    fn member(mut self, key: &str, member: Member) -> Self {
        match self.members.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = member,
            None => self.members.push((key.to_string(), member)),
        }
        self
    }

    /// Clone the declaration into a new instance with all names resolved.
    pub fn instantiate(&self) -> ConfigGroup {
        self.instantiate_under(None, None)
    }

    /// Instantiate and populate from the declared provider, or the
    /// environment when none was declared.
    pub fn populated(&self) -> Result<ConfigGroup, MinicfgError> {
        let mut group = self.instantiate();
        group.populate()?;
        Ok(group)
    }

    /// Instantiate and populate every group from `provider`.
    pub fn populated_with(&self, provider: &dyn Provider) -> Result<ConfigGroup, MinicfgError> {
        let mut group = self.instantiate();
        group.populate_with(provider)?;
        Ok(group)
    }

    fn instantiate_under(&self, key: Option<&str>, parent: Option<&ConfigGroup>) -> ConfigGroup {
        let separator = self
            .separator
            .clone()
            .or_else(|| parent.map(|p| p.separator.clone()))
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());

        let inherited = parent.and_then(|p| p.name.as_deref().map(|n| (n, p.separator.as_str())));
        let name = match (inherited, self.name.as_deref()) {
            (Some((parent_name, parent_sep)), Some(own)) => {
                Some(format!("{parent_name}{parent_sep}{own}"))
            }
            (Some((parent_name, _)), None) => Some(parent_name.to_string()),
            (None, own) => own.map(str::to_string),
        };

        let provider = self
            .provider
            .clone()
            .or_else(|| parent.and_then(|p| p.provider.clone()));

        let mut group = ConfigGroup {
            key: key.map(str::to_string),
            name,
            separator,
            provider,
            fields: Vec::new(),
            children: Vec::new(),
            populated: false,
        };

        for (member_key, member) in &self.members {
            match member {
                Member::Field(template) => {
                    let mut field = template.clone();
                    let prefix = group.name.as_deref().map(|n| (n, group.separator.as_str()));
                    field.assign_name(member_key, prefix);
                    group.fields.push((member_key.clone(), field));
                }
                Member::Group(decl) => {
                    let child = decl.instantiate_under(Some(member_key), Some(&group));
                    group.children.push((member_key.clone(), child));
                }
            }
        }

        group
    }
}

impl fmt::Debug for Minicfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Minicfg")
            .field("name", &self.name)
            .field("separator", &self.separator)
            .field("has_provider", &self.provider.is_some())
            .field(
                "members",
                &self.members.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// An instantiated configuration group: names resolved, values pending or
/// populated.
#[derive(Clone)]
pub struct ConfigGroup {
    key: Option<String>,
    name: Option<String>,
    separator: String,
    provider: Option<Arc<dyn Provider>>,
    fields: Vec<(String, Field)>,
    children: Vec<(String, ConfigGroup)>,
    populated: bool,
}

impl ConfigGroup {
    /// Effective name, including every inherited prefix.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Key this group was declared under in its parent; `None` for the root.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Heading used in generated docs.
    pub fn title(&self) -> &str {
        self.name
            .as_deref()
            .or(self.key.as_deref())
            .unwrap_or("Config")
    }

    /// Direct fields in declaration order, keyed by declared key.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(k, f)| (k.as_str(), f))
    }

    /// Direct child groups in declaration order, keyed by declared key.
    pub fn children(&self) -> impl Iterator<Item = (&str, &ConfigGroup)> {
        self.children.iter().map(|(k, g)| (k.as_str(), g))
    }

    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    pub fn child(&self, key: &str) -> Option<&ConfigGroup> {
        self.children.iter().find(|(k, _)| k == key).map(|(_, g)| g)
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Populate from the declared provider (inherited from ancestors), or the
    /// process environment when none was declared anywhere up the tree.
    pub fn populate(&mut self) -> Result<(), MinicfgError> {
        self.walk(None)
    }

    /// Populate this group and every descendant from `provider`, ignoring
    /// declared providers.
    pub fn populate_with(&mut self, provider: &dyn Provider) -> Result<(), MinicfgError> {
        self.walk(Some(provider))
    }

    /// Read-only view of the populated values.
    pub fn values(&self) -> Result<Populated<'_>, MinicfgError> {
        if !self.populated {
            return Err(MinicfgError::NotPopulated);
        }
        Ok(Populated::new(self))
    }

    /// Fields first, then children, stopping at the first error. Fields
    /// already resolved keep their values; the group stays unpopulated.
    fn walk(&mut self, forced: Option<&dyn Provider>) -> Result<(), MinicfgError> {
        self.populated = false;
        let declared = self.provider.clone();
        let provider: &dyn Provider = match (forced, declared.as_deref()) {
            (Some(p), _) => p,
            (None, Some(p)) => p,
            (None, None) => &EnvProvider,
        };

        debug!(group = %self.title(), fields = self.fields.len(), "populating group");
        for (_, field) in &mut self.fields {
            field.populate(provider)?;
        }
        for (_, child) in &mut self.children {
            child.walk(forced)?;
        }

        self.populated = true;
        debug!(group = %self.title(), "group populated");
        Ok(())
    }
}

impl fmt::Debug for ConfigGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigGroup")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("separator", &self.separator)
            .field("fields", &self.fields)
            .field("children", &self.children)
            .field("populated", &self.populated)
            .finish()
    }
}
