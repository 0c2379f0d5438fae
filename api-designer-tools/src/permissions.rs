use std::fmt::{Display, Formatter};
use crate::models::MemberRole;
use crate::{ApiDesignerError, Result};

/// Something a project member may want to do.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Capability {
    /// Add, edit, remove or (de)activate other members.
    ManageMembers,
    EditProject,
    DeleteProject,
    ManageDataSources,
    EditInterfaces,
    ManageCategories,
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Capability::ManageMembers => "manage members",
            Capability::EditProject => "edit the project",
            Capability::DeleteProject => "delete the project",
            Capability::ManageDataSources => "manage data sources",
            Capability::EditInterfaces => "edit interfaces",
            Capability::ManageCategories => "manage categories",
        };
        f.write_str(s)
    }
}

/// The one place that decides what a role may do.
///
/// `target` is the role of the member being acted upon, for capabilities that act on
/// another member. Admins can manage plain members, but never owners or other admins.
/// These checks are advisory, nothing here authenticates anyone.
pub fn can(actor: MemberRole, capability: Capability, target: Option<MemberRole>) -> bool {
    match actor {
        MemberRole::Owner => true,
        MemberRole::Admin => match capability {
            Capability::ManageMembers => target.map_or(true, |t| t == MemberRole::Member),
            Capability::DeleteProject => false,
            Capability::EditProject
            | Capability::ManageDataSources
            | Capability::EditInterfaces
            | Capability::ManageCategories => true,
        },
        MemberRole::Member => matches!(capability, Capability::EditInterfaces | Capability::ManageCategories),
    }
}

/// Same as [can], but as an error that can be shown to the user.
pub fn check(actor: MemberRole, capability: Capability, target: Option<MemberRole>) -> Result {
    if can(actor, capability, target) {
        return Ok(());
    }

    let message = match target {
        Some(target) if capability == Capability::ManageMembers && actor == MemberRole::Admin => {
            format!("admins cannot manage members with the {target:?} role")
        }
        _ => format!("a {actor:?} cannot {capability}"),
    };

    Err(ApiDesignerError::PermissionDenied(message.to_lowercase()))
}
