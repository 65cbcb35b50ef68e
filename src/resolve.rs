//! Constraint resolution for exclusive groups
//!
//! Turns an extracted [`CommandDeclaration`] into the field order and the
//! constructor overloads the emitter renders:
//!
//! 1. single-member groups dissolve into the default group (their member is
//!    narrowed to mandatory when the group was required)
//! 2. the remaining groups must have at least two members
//! 3. fields without a default move to the front, order otherwise kept
//! 4. one overload per element of the Cartesian product of each group's
//!    contribution possibilities; a single combination means no overloads

use crate::error::{Error, Result};
use crate::model::{ArgumentDescriptor, ArgumentGroup, CommandDeclaration, GroupId};

/// A command ready for emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    /// Dissolved groups removed, arguments in emission order
    pub declaration: CommandDeclaration,
    /// Exclusive groups that survived dissolution, in declaration order
    pub exclusive_groups: Vec<ArgumentGroup>,
    /// Keyword sets of the `@overload` signatures; empty when one suffices
    pub overloads: Vec<Vec<ArgumentDescriptor>>,
}

impl ResolvedCommand {
    /// Members of `group` in emission order
    pub fn members(&self, group: &ArgumentGroup) -> Vec<&ArgumentDescriptor> {
        let id = group.id();
        self.declaration
            .arguments
            .iter()
            .filter(|a| a.group == id)
            .collect()
    }
}

pub fn resolve(mut declaration: CommandDeclaration) -> Result<ResolvedCommand> {
    dissolve_single_member_groups(&mut declaration);

    for group in &declaration.groups {
        if group.members.len() < 2 {
            return Err(Error::inconsistent(
                declaration.name.as_str(),
                format!(
                    "exclusive group `{}` has {} live member(s), expected at least 2",
                    group.name,
                    group.members.len()
                ),
            ));
        }
        if let Some(missing) = group
            .members
            .iter()
            .find(|m| declaration.argument(m).is_none())
        {
            return Err(Error::inconsistent(
                declaration.name.as_str(),
                format!("group `{}` lists unknown argument `{}`", group.name, missing),
            ));
        }
    }

    sort_mandatory_first(&mut declaration.arguments);
    let overloads = overloads(&declaration)?;

    Ok(ResolvedCommand {
        exclusive_groups: declaration.groups.clone(),
        declaration,
        overloads,
    })
}

fn dissolve_single_member_groups(declaration: &mut CommandDeclaration) {
    let (single, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut declaration.groups)
        .into_iter()
        .partition(|g| g.members.len() == 1);
    declaration.groups = kept;

    for group in single {
        let id = group.id();
        for argument in declaration.arguments.iter_mut().filter(|a| a.group == id) {
            let mut dissolved = if group.is_required {
                argument.make_mandatory()
            } else {
                argument.clone()
            };
            dissolved.group = GroupId::Default;
            *argument = dissolved;
        }
    }
}

/// Stable: fields without a default first
fn sort_mandatory_first(arguments: &mut [ArgumentDescriptor]) {
    arguments.sort_by_key(ArgumentDescriptor::has_default);
}

fn overloads(declaration: &CommandDeclaration) -> Result<Vec<Vec<ArgumentDescriptor>>> {
    let mut order: Vec<&GroupId> = Vec::new();
    for argument in &declaration.arguments {
        if !order.contains(&&argument.group) {
            order.push(&argument.group);
        }
    }

    let mut combinations: Vec<Vec<ArgumentDescriptor>> = vec![Vec::new()];
    for id in order {
        let possibilities = possibilities(declaration, id)?;
        combinations = combinations
            .iter()
            .flat_map(|prefix| {
                possibilities.iter().map(move |contribution| {
                    prefix.iter().chain(contribution).cloned().collect::<Vec<_>>()
                })
            })
            .collect();
    }

    if combinations.len() == 1 {
        return Ok(Vec::new());
    }
    for combination in &mut combinations {
        sort_mandatory_first(combination);
    }
    Ok(combinations)
}

/// What one group can contribute to a constructor call
fn possibilities(
    declaration: &CommandDeclaration,
    id: &GroupId,
) -> Result<Vec<Vec<ArgumentDescriptor>>> {
    let members = declaration
        .arguments
        .iter()
        .filter(|a| &a.group == id)
        .cloned();

    let GroupId::Named(name) = id else {
        return Ok(vec![members.collect()]);
    };
    let group = declaration.group(name).ok_or_else(|| {
        Error::inconsistent(
            declaration.name.as_str(),
            format!("argument registered on unknown group `{}`", name),
        )
    })?;

    let mut options = Vec::new();
    if !group.is_required {
        options.push(Vec::new());
    }
    options.extend(members.map(|m| vec![m.make_mandatory()]));
    Ok(options)
}


#[cfg(all(test, feature = "proptest"))]
mod proptests {
    use super::*;
    use crate::model::{PyDefault, PyType, SourceRef};
    use proptest::prelude::*;

    fn arb_command() -> impl Strategy<Value = CommandDeclaration> {
        // (group index or none, has default) per argument
        prop::collection::vec((prop::option::of(0usize..3), any::<bool>()), 0..10).prop_flat_map(
            |specs| {
                let n_groups = 3;
                prop::collection::vec(any::<bool>(), n_groups).prop_map(move |required| {
                    let arguments: Vec<_> = specs
                        .iter()
                        .enumerate()
                        .map(|(i, (group, has_default))| ArgumentDescriptor {
                            group: group.map_or(GroupId::Default, |g| GroupId::Named(format!("g{}", g))),
                            name: format!("arg{}", i),
                            documentation: None,
                            type_expr: if *has_default { PyType::Str.optional() } else { PyType::Str },
                            is_optional: *has_default,
                            default: has_default.then_some(PyDefault::NoValue),
                        })
                        .collect();
                    let groups = (0..n_groups)
                        .map(|g| ArgumentGroup {
                            name: format!("g{}", g),
                            is_mutually_exclusive: true,
                            is_required: required[g],
                            members: arguments
                                .iter()
                                .filter(|a| a.group == GroupId::Named(format!("g{}", g)))
                                .map(|a| a.name.clone())
                                .collect(),
                        })
                        .filter(|g| !g.members.is_empty())
                        .collect();
                    CommandDeclaration {
                        name: "Prop".into(),
                        help: None,
                        arguments,
                        groups,
                        output_type: "Empty".into(),
                        source: SourceRef::default(),
                    }
                })
            },
        )
    }

    proptest! {
        #[test]
        fn fields_without_default_come_first(cmd in arb_command()) {
            let resolved = resolve(cmd).unwrap();
            let defaults: Vec<bool> = resolved.declaration.arguments.iter().map(|a| a.has_default()).collect();
            let mut sorted = defaults.clone();
            sorted.sort();
            prop_assert_eq!(defaults, sorted);
            for overload in &resolved.overloads {
                let d: Vec<bool> = overload.iter().map(|a| a.has_default()).collect();
                let mut s = d.clone();
                s.sort();
                prop_assert_eq!(d, s);
            }
        }

        #[test]
        fn overload_count_is_product_of_possibilities(cmd in arb_command()) {
            let resolved = resolve(cmd).unwrap();
            let expected: usize = resolved
                .exclusive_groups
                .iter()
                .map(|g| g.members.len() + usize::from(!g.is_required))
                .product();
            if expected == 1 {
                prop_assert!(resolved.overloads.is_empty());
            } else {
                prop_assert_eq!(resolved.overloads.len(), expected);
            }
        }

        #[test]
        fn every_overload_has_at_most_one_member_per_group(cmd in arb_command()) {
            let resolved = resolve(cmd).unwrap();
            for overload in &resolved.overloads {
                for group in &resolved.exclusive_groups {
                    let present = overload.iter().filter(|a| a.group == group.id()).count();
                    prop_assert!(present <= 1);
                    if group.is_required {
                        prop_assert_eq!(present, 1);
                    }
                }
            }
        }
    }
}
