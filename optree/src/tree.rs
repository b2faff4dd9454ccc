//! The group hierarchy: an arena of named groups owning typed options.
//!
//! The tree owns every group and every option; callers hold plain
//! [`GroupId`] handles. Parent links are arena indices, so moving or
//! dropping the tree can never leave a dangling back-reference, and the
//! aggregated short-flag table stores `(group, long-name)` entries rather
//! than pointers into the arena.

use std::collections::BTreeMap;

use tracing::debug;

use crate::designator::{self, Designator};
use crate::error::DeclarationError;
use crate::option::{OptionEntry, RepeatableOption, ScalarOption};
use crate::value::Value;

/// Handle to a group within an [`OptionTree`].
///
/// Handles are only meaningful for the tree that issued them; passing a
/// handle to a different tree panics or addresses an unrelated group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(usize);

const ROOT: GroupId = GroupId(0);

/// One short-flag registration: the owning group and the option's long name.
#[derive(Debug)]
struct ShortFlagEntry {
    group: GroupId,
    name: String,
}

/// A named node owning option declarations and child groups.
#[derive(Debug, Default)]
pub struct Group {
    name: String,
    description: String,
    parent: Option<GroupId>,
    subgroups: BTreeMap<String, GroupId>,
    options: BTreeMap<String, Box<dyn OptionEntry>>,
}

impl Group {
    /// The group's name; empty for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The owning group, or `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    /// The options declared directly on this group, ordered by long name.
    pub fn options(&self) -> impl Iterator<Item = (&str, &dyn OptionEntry)> {
        self.options.iter().map(|(name, opt)| (name.as_str(), &**opt))
    }

    /// The direct subgroups, ordered by name.
    pub fn subgroups(&self) -> impl Iterator<Item = (&str, GroupId)> {
        self.subgroups.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

/// A tree of option groups with an implicit, unnamed root.
///
/// Registration validates as it stores: group names against the naming
/// pattern, long names for uniqueness within their group, and short flags
/// for uniqueness across the whole tree.
#[derive(Debug)]
pub struct OptionTree {
    nodes: Vec<Group>,
    shorts: BTreeMap<char, ShortFlagEntry>,
}

impl Default for OptionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionTree {
    /// Create a tree containing only the unnamed root group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Group::default()],
            shorts: BTreeMap::new(),
        }
    }

    /// Handle to the root group.
    #[must_use]
    pub const fn root(&self) -> GroupId {
        ROOT
    }

    /// The group addressed by `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different tree.
    #[must_use]
    pub fn group(&self, id: GroupId) -> &Group {
        &self.nodes[id.0]
    }

    /// Register a child group under `parent`.
    ///
    /// # Errors
    ///
    /// Fails when `name` violates `[a-zA-Z][a-zA-Z0-9_-]*` or a sibling of
    /// the same name already exists.
    pub fn add_subgroup(
        &mut self,
        parent: GroupId,
        name: &str,
        description: &str,
    ) -> Result<GroupId, DeclarationError> {
        if !designator::is_valid_name(name) {
            return Err(DeclarationError::InvalidName {
                name: name.to_owned(),
            });
        }
        if self.group(parent).subgroups.contains_key(name) {
            return Err(DeclarationError::DuplicateGroup {
                name: name.to_owned(),
            });
        }

        let id = GroupId(self.nodes.len());
        self.nodes.push(Group {
            name: name.to_owned(),
            description: description.to_owned(),
            parent: Some(parent),
            subgroups: BTreeMap::new(),
            options: BTreeMap::new(),
        });
        self.node_mut(parent).subgroups.insert(name.to_owned(), id);
        debug!(group = %self.prefix(id), "registered subgroup");
        Ok(id)
    }

    /// Register a scalar option on `group`.
    ///
    /// Boolean options start optional with arity 0; every other type starts
    /// required until a default is installed.
    ///
    /// # Errors
    ///
    /// Fails for an empty description or designator, a malformed designator,
    /// a long name already declared in this group, or a short flag already
    /// registered anywhere in the tree.
    pub fn add_option<T: Value>(
        &mut self,
        group: GroupId,
        designator: &str,
        description: &str,
    ) -> Result<&mut ScalarOption<T>, DeclarationError> {
        let parsed = self.check_args(group, designator, description)?;
        let option = ScalarOption::new(parsed.short, parsed.long, description.to_owned());
        Ok(self.register(group, option))
    }

    /// Register a scalar option with an implicit default, leaving it
    /// optional.
    ///
    /// # Errors
    ///
    /// As for [`OptionTree::add_option`].
    pub fn add_option_with_default<T: Value>(
        &mut self,
        group: GroupId,
        designator: &str,
        description: &str,
        default: T,
    ) -> Result<&mut ScalarOption<T>, DeclarationError> {
        let option = self.add_option(group, designator, description)?;
        option.set_default(default);
        Ok(option)
    }

    /// Register a repeatable option on `group`. Repeatable options are never
    /// required.
    ///
    /// # Errors
    ///
    /// As for [`OptionTree::add_option`].
    pub fn add_repeatable<T: Value>(
        &mut self,
        group: GroupId,
        designator: &str,
        description: &str,
    ) -> Result<&mut RepeatableOption<T>, DeclarationError> {
        let parsed = self.check_args(group, designator, description)?;
        let option = RepeatableOption::new(parsed.short, parsed.long, description.to_owned());
        Ok(self.register(group, option))
    }

    /// Look an option up by long name within `group`.
    #[must_use]
    pub fn option(&self, group: GroupId, long: &str) -> Option<&dyn OptionEntry> {
        self.group(group).options.get(long).map(|opt| &**opt)
    }

    /// Mutable counterpart of [`OptionTree::option`], for the parser driving
    /// [`OptionEntry::parse`].
    pub fn option_mut(&mut self, group: GroupId, long: &str) -> Option<&mut dyn OptionEntry> {
        self.node_mut(group).options.get_mut(long).map(|opt| &mut **opt)
    }

    /// Resolve a short flag through the root's aggregated table.
    ///
    /// An unregistered flag yields `None` rather than an error.
    #[must_use]
    pub fn find_short(&self, flag: char) -> Option<(GroupId, &dyn OptionEntry)> {
        let entry = self.shorts.get(&flag)?;
        let option = self.group(entry.group).options.get(&entry.name)?;
        Some((entry.group, &**option))
    }

    /// Mutable counterpart of [`OptionTree::find_short`].
    pub fn find_short_mut(&mut self, flag: char) -> Option<(GroupId, &mut dyn OptionEntry)> {
        let (group, name) = {
            let entry = self.shorts.get(&flag)?;
            (entry.group, entry.name.clone())
        };
        let option = self.node_mut(group).options.get_mut(&name)?;
        Some((group, &mut **option))
    }

    /// Typed access to a scalar option declared with element type `T`.
    ///
    /// Yields `None` when the long name is unknown in `group` or was
    /// declared with a different shape or element type.
    #[must_use]
    pub fn scalar<T: Value>(&self, group: GroupId, long: &str) -> Option<&ScalarOption<T>> {
        self.group(group).options.get(long)?.as_any().downcast_ref()
    }

    /// Typed access to a repeatable option declared with element type `T`.
    #[must_use]
    pub fn repeatable<T: Value>(&self, group: GroupId, long: &str) -> Option<&RepeatableOption<T>> {
        self.group(group).options.get(long)?.as_any().downcast_ref()
    }

    /// The dotted diagnostic identifier of `long` declared on `group`:
    /// ancestor group names joined with `.`, then the long name. The root
    /// contributes nothing.
    #[must_use]
    pub fn full_name(&self, group: GroupId, long: &str) -> String {
        let mut name = self.prefix(group);
        name.push_str(long);
        name
    }

    fn prefix(&self, id: GroupId) -> String {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(gid) = cursor {
            let node = self.group(gid);
            if !node.name.is_empty() {
                names.push(node.name.as_str());
            }
            cursor = node.parent;
        }
        let mut out = String::new();
        for name in names.iter().rev() {
            out.push_str(name);
            out.push('.');
        }
        out
    }

    fn node_mut(&mut self, id: GroupId) -> &mut Group {
        &mut self.nodes[id.0]
    }

    /// Validate a declaration before anything is stored, in the same order
    /// the checks are reported: description, designator grammar, long-name
    /// collision within the group, short-flag collision across the tree.
    fn check_args(
        &self,
        group: GroupId,
        designator: &str,
        description: &str,
    ) -> Result<Designator, DeclarationError> {
        if description.is_empty() {
            return Err(DeclarationError::EmptyDescription);
        }
        let parsed = designator::parse(designator)?;

        if self.group(group).options.contains_key(&parsed.long) {
            return Err(DeclarationError::DuplicateOption {
                full_name: self.full_name(group, &parsed.long),
            });
        }

        if let Some(flag) = parsed.short {
            if let Some((owner_group, owner)) = self.find_short(flag) {
                return Err(DeclarationError::ShortFlagInUse {
                    flag,
                    owner: self.full_name(owner_group, owner.meta().name()),
                });
            }
        }

        Ok(parsed)
    }

    /// Commit a validated option: store it under its long name and, when a
    /// short flag is declared, record it in the root table.
    fn register<O: OptionEntry>(&mut self, group: GroupId, option: O) -> &mut O {
        let name = option.meta().name().to_owned();
        if let Some(flag) = option.meta().short_flag() {
            self.shorts.insert(
                flag,
                ShortFlagEntry {
                    group,
                    name: name.clone(),
                },
            );
        }
        debug!(
            option = %self.full_name(group, &name),
            short = ?option.meta().short_flag(),
            "registered option"
        );

        let slot = self
            .node_mut(group)
            .options
            .entry(name)
            .or_insert_with(|| Box::new(option));
        match slot.as_any_mut().downcast_mut() {
            Some(typed) => typed,
            // The slot was vacant (check_args) and filled just above.
            None => unreachable!("freshly registered option has a fixed concrete type"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OptionTree;

    #[test]
    fn root_prefix_is_empty() {
        let tree = OptionTree::new();
        assert_eq!(tree.full_name(tree.root(), "verbose"), "verbose");
    }

    #[test]
    fn full_names_join_ancestors_with_dots() {
        let mut tree = OptionTree::new();
        let net = tree.add_subgroup(tree.root(), "net", "network").unwrap();
        let tls = tree.add_subgroup(net, "tls", "TLS").unwrap();
        assert_eq!(tree.full_name(tls, "cert"), "net.tls.cert");
    }

    #[test]
    fn group_iteration_is_name_ordered() {
        let mut tree = OptionTree::new();
        let root = tree.root();
        tree.add_subgroup(root, "zeta", "z").unwrap();
        tree.add_subgroup(root, "alpha", "a").unwrap();
        tree.add_option::<bool>(root, "verbose", "chatty output").unwrap();
        tree.add_option::<bool>(root, "quiet", "silent output").unwrap();

        let groups: Vec<_> = tree.group(root).subgroups().map(|(n, _)| n).collect();
        assert_eq!(groups, ["alpha", "zeta"]);
        let options: Vec<_> = tree.group(root).options().map(|(n, _)| n).collect();
        assert_eq!(options, ["quiet", "verbose"]);
    }
}
