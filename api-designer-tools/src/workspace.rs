use itertools::Itertools;
use tracing::{debug, info, instrument};
use crate::helpers::{new_id, now};
use crate::models::*;
use crate::permissions::{check, Capability};
use crate::schema_catalog::SchemaCatalog;
use crate::seed::{seed_categories, seed_data_sources, seed_interfaces, seed_projects};
use crate::selection::{DesignerSelection, ShapeKind};
use crate::storage::*;
use crate::type_mapping::MappingField;
use crate::{ApiDesignerError, Confirmation, Outcome, Result};

/// Everything a user can edit, backed by a [KeyValueStore].
///
/// Every mutation writes the whole affected collection back to the store. There is no
/// merging, the last write wins.
pub struct Workspace<S: KeyValueStore> {
    store: S,
    projects: Vec<Project>,
    data_sources: Vec<DataSource>,
    categories: Vec<InterfaceCategory>,
    interfaces: Vec<ApiInterface>,
}

impl<S: KeyValueStore> Workspace<S> {
    /// Reads every collection from the store. Collections that are missing or unreadable
    /// start out with the seed data.
    #[instrument(skip_all)]
    pub fn load(store: S) -> Self {
        let workspace = Workspace {
            projects: load_collection(&store, PROJECTS_KEY, seed_projects),
            data_sources: load_collection(&store, DATA_SOURCES_KEY, seed_data_sources),
            categories: load_collection(&store, CATEGORIES_KEY, seed_categories),
            interfaces: load_collection(&store, INTERFACES_KEY, seed_interfaces),
            store,
        };

        debug!(
            projects = workspace.projects.len(),
            data_sources = workspace.data_sources.len(),
            categories = workspace.categories.len(),
            interfaces = workspace.interfaces.len(),
            "Loaded workspace"
        );

        workspace
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn save_projects(&mut self) -> Result {
        save_collection(&mut self.store, PROJECTS_KEY, &self.projects)
    }

    fn save_data_sources(&mut self) -> Result {
        save_collection(&mut self.store, DATA_SOURCES_KEY, &self.data_sources)
    }

    fn save_categories(&mut self) -> Result {
        save_collection(&mut self.store, CATEGORIES_KEY, &self.categories)
    }

    fn save_interfaces(&mut self) -> Result {
        save_collection(&mut self.store, INTERFACES_KEY, &self.interfaces)
    }

    // Projects

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, project_id: &str) -> Result<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| ApiDesignerError::not_found("Project", project_id))
    }

    fn project_mut(&mut self, project_id: &str) -> Result<&mut Project> {
        self.projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| ApiDesignerError::not_found("Project", project_id))
    }

    /// Projects whose name or description contains `term`, ignoring case. An empty term matches everything.
    pub fn search_projects<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a Project> + 'a {
        self.projects.iter().filter(move |p| p.matches_search(term))
    }

    /// Creates a project, with the creating user as its owner.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub fn create_project(&mut self, draft: ProjectDraft, owner: MemberDraft) -> Result<String> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ApiDesignerError::validation("name", "a project needs a name"));
        }

        let id = new_id();
        let created_at = now();
        let owner = ProjectMember {
            id: new_id(),
            project_id: id.clone(),
            user_id: owner.user_id,
            username: owner.username,
            email: owner.email,
            role: MemberRole::Owner,
            joined_at: created_at,
            status: ActivityStatus::Active,
        };

        self.projects.push(Project {
            id: id.clone(),
            name: name.to_string(),
            description: draft.description,
            status: draft.status,
            created_at,
            updated_at: created_at,
            members: vec![owner],
        });
        self.save_projects()?;

        info!(project = %id, "Created project");
        Ok(id)
    }

    fn role_of(&self, project_id: &str, user_id: &str) -> Result<MemberRole> {
        let project = self.project(project_id)?;
        match project.member_for_user(user_id) {
            Some(member) if member.status == ActivityStatus::Active => Ok(member.role),
            Some(_) => Err(ApiDesignerError::PermissionDenied(format!("user '{user_id}' is inactive in project '{project_id}'"))),
            None => Err(ApiDesignerError::PermissionDenied(format!("user '{user_id}' is not a member of project '{project_id}'"))),
        }
    }

    fn authorize(&self, project_id: &str, actor: &str, capability: Capability) -> Result {
        check(self.role_of(project_id, actor)?, capability, None)
    }

    #[instrument(skip(self, draft))]
    pub fn update_project(&mut self, project_id: &str, actor: &str, draft: ProjectDraft) -> Result {
        self.authorize(project_id, actor, Capability::EditProject)?;

        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(ApiDesignerError::validation("name", "a project needs a name"));
        }

        let project = self.project_mut(project_id)?;
        project.name = name;
        project.description = draft.description;
        project.status = draft.status;
        project.updated_at = now();

        self.save_projects()
    }

    #[instrument(skip(self))]
    pub fn toggle_project_status(&mut self, project_id: &str, actor: &str) -> Result<ActivityStatus> {
        self.authorize(project_id, actor, Capability::EditProject)?;

        let project = self.project_mut(project_id)?;
        project.status = project.status.toggled();
        project.updated_at = now();
        let status = project.status;

        self.save_projects()?;
        Ok(status)
    }

    /// Deletes the project together with its data sources, categories and interfaces.
    #[instrument(skip(self))]
    pub fn delete_project(&mut self, project_id: &str, actor: &str, confirmation: Confirmation) -> Result<Outcome> {
        self.authorize(project_id, actor, Capability::DeleteProject)?;

        if confirmation == Confirmation::Declined {
            return Ok(Outcome::Declined);
        }

        self.projects.retain(|p| p.id != project_id);
        self.data_sources.retain(|d| d.project_id != project_id);
        self.categories.retain(|c| c.project_id != project_id);
        self.interfaces.retain(|i| i.project_id != project_id);

        self.save_projects()?;
        self.save_data_sources()?;
        self.save_categories()?;
        self.save_interfaces()?;

        info!(project = %project_id, "Deleted project");
        Ok(Outcome::Applied)
    }

    // Members

    #[instrument(skip(self, draft), fields(user = %draft.user_id))]
    pub fn add_member(&mut self, project_id: &str, actor: &str, draft: MemberDraft) -> Result<String> {
        check(self.role_of(project_id, actor)?, Capability::ManageMembers, Some(draft.role))?;

        if draft.username.trim().is_empty() {
            return Err(ApiDesignerError::validation("username", "a member needs a username"));
        }

        let project = self.project_mut(project_id)?;
        if project.member_for_user(&draft.user_id).is_some() {
            return Err(ApiDesignerError::validation("userId", format!("user '{}' is already a member", draft.user_id)));
        }

        let id = new_id();
        project.members.push(ProjectMember {
            id: id.clone(),
            project_id: project_id.to_string(),
            user_id: draft.user_id,
            username: draft.username,
            email: draft.email,
            role: draft.role,
            joined_at: now(),
            status: ActivityStatus::Active,
        });

        self.save_projects()?;
        Ok(id)
    }

    fn member_role(&self, project_id: &str, member_id: &str) -> Result<MemberRole> {
        self.project(project_id)?
            .find_member(member_id)
            .map(|m| m.role)
            .ok_or_else(|| ApiDesignerError::not_found("Member", member_id))
    }

    #[instrument(skip(self))]
    pub fn remove_member(&mut self, project_id: &str, actor: &str, member_id: &str, confirmation: Confirmation) -> Result<Outcome> {
        let target = self.member_role(project_id, member_id)?;
        check(self.role_of(project_id, actor)?, Capability::ManageMembers, Some(target))?;

        if confirmation == Confirmation::Declined {
            return Ok(Outcome::Declined);
        }

        self.project_mut(project_id)?.members.retain(|m| m.id != member_id);
        self.save_projects()?;
        Ok(Outcome::Applied)
    }

    #[instrument(skip(self))]
    pub fn toggle_member_status(&mut self, project_id: &str, actor: &str, member_id: &str) -> Result<ActivityStatus> {
        let target = self.member_role(project_id, member_id)?;
        check(self.role_of(project_id, actor)?, Capability::ManageMembers, Some(target))?;

        let project = self.project_mut(project_id)?;
        let status = match project.members.iter_mut().find(|m| m.id == member_id) {
            Some(member) => {
                member.status = member.status.toggled();
                member.status
            }
            None => return Err(ApiDesignerError::not_found("Member", member_id)),
        };

        self.save_projects()?;
        Ok(status)
    }

    // Data sources

    pub fn data_sources_for_project<'a>(&'a self, project_id: &'a str) -> impl Iterator<Item = &'a DataSource> + 'a {
        self.data_sources.iter().filter(move |d| d.project_id == project_id)
    }

    pub fn data_source(&self, data_source_id: &str) -> Result<&DataSource> {
        self.data_sources
            .iter()
            .find(|d| d.id == data_source_id)
            .ok_or_else(|| ApiDesignerError::not_found("Data source", data_source_id))
    }

    fn data_source_mut(&mut self, data_source_id: &str) -> Result<&mut DataSource> {
        self.data_sources
            .iter_mut()
            .find(|d| d.id == data_source_id)
            .ok_or_else(|| ApiDesignerError::not_found("Data source", data_source_id))
    }

    /// Looks up the data source and checks that `actor` may change it.
    fn authorize_data_source(&self, data_source_id: &str, actor: &str) -> Result {
        let project_id = &self.data_source(data_source_id)?.project_id;
        self.authorize(project_id, actor, Capability::ManageDataSources)
    }

    fn validate_data_source(draft: &DataSourceDraft) -> Result {
        let mut missing = vec![];
        if draft.name.trim().is_empty() {
            missing.push("name");
        }
        if draft.kind.is_networked() {
            if draft.host.trim().is_empty() {
                missing.push("host");
            }
            if draft.username.trim().is_empty() {
                missing.push("username");
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiDesignerError::validation("dataSource", format!("missing {}", missing.iter().join(", "))))
        }
    }

    #[instrument(skip(self, draft), fields(name = %draft.name, kind = %draft.kind))]
    pub fn create_data_source(&mut self, actor: &str, draft: DataSourceDraft) -> Result<String> {
        self.authorize(&draft.project_id, actor, Capability::ManageDataSources)?;
        Self::validate_data_source(&draft)?;

        let id = new_id();
        self.data_sources.push(DataSource {
            id: id.clone(),
            project_id: draft.project_id,
            name: draft.name.trim().to_string(),
            kind: draft.kind,
            host: draft.host,
            port: draft.port.unwrap_or_else(|| draft.kind.default_port()),
            database: draft.database,
            username: draft.username,
            password: draft.password,
            status: ConnectionStatus::Disconnected,
            created_at: now(),
            type_mappings: vec![],
        });
        self.save_data_sources()?;

        info!(data_source = %id, "Created data source");
        Ok(id)
    }

    /// Replaces the connection description. The data source stays in its project and keeps
    /// its type mappings. The connection status goes back to disconnected.
    #[instrument(skip(self, draft), fields(name = %draft.name, kind = %draft.kind))]
    pub fn update_data_source(&mut self, data_source_id: &str, actor: &str, draft: DataSourceDraft) -> Result {
        self.authorize_data_source(data_source_id, actor)?;
        Self::validate_data_source(&draft)?;

        let data_source = self.data_source_mut(data_source_id)?;
        data_source.name = draft.name.trim().to_string();
        data_source.kind = draft.kind;
        data_source.host = draft.host;
        data_source.port = draft.port.unwrap_or_else(|| draft.kind.default_port());
        data_source.database = draft.database;
        data_source.username = draft.username;
        data_source.password = draft.password;
        data_source.status = ConnectionStatus::Disconnected;

        self.save_data_sources()
    }

    /// Nothing is actually contacted. A networked data source without a host or port is marked
    /// as failed, anything else as connected.
    #[instrument(skip(self))]
    pub fn test_connection(&mut self, data_source_id: &str, actor: &str) -> Result<ConnectionStatus> {
        self.authorize_data_source(data_source_id, actor)?;

        let data_source = self.data_source_mut(data_source_id)?;
        let unreachable = data_source.kind.is_networked() && (data_source.host.trim().is_empty() || data_source.port == 0);
        data_source.status = if unreachable { ConnectionStatus::Error } else { ConnectionStatus::Connected };
        let status = data_source.status;
        debug!(host = %data_source.host, port = data_source.port, ?status, "Simulated connection test");

        self.save_data_sources()?;
        Ok(status)
    }

    #[instrument(skip(self))]
    pub fn delete_data_source(&mut self, data_source_id: &str, actor: &str, confirmation: Confirmation) -> Result<Outcome> {
        self.authorize_data_source(data_source_id, actor)?;

        if confirmation == Confirmation::Declined {
            return Ok(Outcome::Declined);
        }

        self.data_sources.retain(|d| d.id != data_source_id);
        self.save_data_sources()?;
        Ok(Outcome::Applied)
    }

    pub fn add_type_mapping(&mut self, data_source_id: &str, actor: &str) -> Result<String> {
        self.authorize_data_source(data_source_id, actor)?;

        let id = self.data_source_mut(data_source_id)?.add_type_mapping();
        self.save_data_sources()?;
        Ok(id)
    }

    pub fn update_type_mapping(&mut self, data_source_id: &str, actor: &str, mapping_id: &str, field: MappingField, value: &str) -> Result {
        self.authorize_data_source(data_source_id, actor)?;

        self.data_source_mut(data_source_id)?.update_type_mapping(mapping_id, field, value)?;
        self.save_data_sources()
    }

    pub fn delete_type_mapping(&mut self, data_source_id: &str, actor: &str, mapping_id: &str) -> Result {
        self.authorize_data_source(data_source_id, actor)?;

        self.data_source_mut(data_source_id)?.delete_type_mapping(mapping_id)?;
        self.save_data_sources()
    }

    pub fn reset_type_mappings(&mut self, data_source_id: &str, actor: &str, confirmation: Confirmation) -> Result<Outcome> {
        self.authorize_data_source(data_source_id, actor)?;

        let outcome = self.data_source_mut(data_source_id)?.reset_type_mappings(confirmation);
        if outcome == Outcome::Applied {
            self.save_data_sources()?;
        }
        Ok(outcome)
    }

    // Categories

    pub fn category_tree(&self, project_id: &str) -> Vec<CategoryNode<'_>> {
        let categories = self.categories.iter().filter(|c| c.project_id == project_id).collect_vec();
        build_category_tree(&categories)
    }

    #[instrument(skip(self, description))]
    pub fn create_category(&mut self, project_id: &str, actor: &str, name: &str, description: &str, parent_id: Option<&str>) -> Result<String> {
        self.authorize(project_id, actor, Capability::ManageCategories)?;

        if name.trim().is_empty() {
            return Err(ApiDesignerError::validation("name", "a category needs a name"));
        }
        if let Some(parent_id) = parent_id {
            if !self.categories.iter().any(|c| c.id == parent_id && c.project_id == project_id) {
                return Err(ApiDesignerError::not_found("Category", parent_id));
            }
        }

        let id = new_id();
        self.categories.push(InterfaceCategory {
            id: id.clone(),
            project_id: project_id.to_string(),
            name: name.trim().to_string(),
            description: description.to_string(),
            parent_id: parent_id.map(str::to_string),
        });
        self.save_categories()?;
        Ok(id)
    }

    /// Interfaces in the category stay where they are, and child categories become roots.
    #[instrument(skip(self))]
    pub fn delete_category(&mut self, category_id: &str, actor: &str, confirmation: Confirmation) -> Result<Outcome> {
        let project_id = match self.categories.iter().find(|c| c.id == category_id) {
            Some(category) => &category.project_id,
            None => return Err(ApiDesignerError::not_found("Category", category_id)),
        };
        self.authorize(project_id, actor, Capability::ManageCategories)?;

        if confirmation == Confirmation::Declined {
            return Ok(Outcome::Declined);
        }

        self.categories.retain(|c| c.id != category_id);
        self.save_categories()?;
        Ok(Outcome::Applied)
    }

    // Interfaces

    pub fn interface(&self, interface_id: &str) -> Result<&ApiInterface> {
        self.interfaces
            .iter()
            .find(|i| i.id == interface_id)
            .ok_or_else(|| ApiDesignerError::not_found("Interface", interface_id))
    }

    fn interface_mut(&mut self, interface_id: &str) -> Result<&mut ApiInterface> {
        self.interfaces
            .iter_mut()
            .find(|i| i.id == interface_id)
            .ok_or_else(|| ApiDesignerError::not_found("Interface", interface_id))
    }

    fn authorize_interface(&self, interface_id: &str, actor: &str) -> Result {
        let project_id = &self.interface(interface_id)?.project_id;
        self.authorize(project_id, actor, Capability::EditInterfaces)
    }

    pub fn list_interfaces<'a>(&'a self, project_id: &'a str, category_id: Option<&'a str>) -> impl Iterator<Item = &'a ApiInterface> + 'a {
        self.interfaces
            .iter()
            .filter(move |i| i.project_id == project_id)
            .filter(move |i| category_id.map_or(true, |c| i.category_id == c))
    }

    fn validate_interface(draft: &InterfaceDraft) -> Result {
        if draft.name.trim().is_empty() {
            return Err(ApiDesignerError::validation("name", "an interface needs a name"));
        }
        if draft.path.trim().is_empty() {
            return Err(ApiDesignerError::validation("path", "an interface needs a path"));
        }
        if !draft.path.starts_with('/') {
            return Err(ApiDesignerError::validation("path", format!("'{}' must start with '/'", draft.path)));
        }
        Ok(())
    }

    #[instrument(skip(self, draft), fields(name = %draft.name, method = %draft.method, path = %draft.path))]
    pub fn create_interface(&mut self, actor: &str, draft: InterfaceDraft) -> Result<String> {
        self.authorize(&draft.project_id, actor, Capability::EditInterfaces)?;
        Self::validate_interface(&draft)?;

        let id = new_id();
        let created_at = now();
        self.interfaces.push(ApiInterface {
            id: id.clone(),
            project_id: draft.project_id,
            category_id: draft.category_id,
            name: draft.name.trim().to_string(),
            path: draft.path,
            method: draft.method,
            description: draft.description,
            request_params: vec![],
            response_params: vec![],
            request_main_table: None,
            response_main_table: None,
            created_at,
            updated_at: created_at,
        });
        self.save_interfaces()?;

        info!(interface = %id, "Created interface");
        Ok(id)
    }

    /// Replaces the descriptive parts of an interface. The saved design is kept.
    #[instrument(skip(self, draft))]
    pub fn update_interface(&mut self, interface_id: &str, actor: &str, draft: InterfaceDraft) -> Result {
        self.authorize_interface(interface_id, actor)?;
        Self::validate_interface(&draft)?;

        let interface = self.interface_mut(interface_id)?;
        interface.category_id = draft.category_id;
        interface.name = draft.name.trim().to_string();
        interface.path = draft.path;
        interface.method = draft.method;
        interface.description = draft.description;
        interface.updated_at = now();

        self.save_interfaces()
    }

    #[instrument(skip(self))]
    pub fn delete_interface(&mut self, interface_id: &str, actor: &str, confirmation: Confirmation) -> Result<Outcome> {
        self.authorize_interface(interface_id, actor)?;

        if confirmation == Confirmation::Declined {
            return Ok(Outcome::Declined);
        }

        self.interfaces.retain(|i| i.id != interface_id);
        self.save_interfaces()?;
        Ok(Outcome::Applied)
    }

    /// Stores both shapes of a designer session on the interface.
    #[instrument(skip(self, selection, catalog))]
    pub fn save_design(&mut self, interface_id: &str, actor: &str, selection: &DesignerSelection, catalog: &SchemaCatalog) -> Result {
        self.authorize_interface(interface_id, actor)?;

        let request = selection.shape(ShapeKind::Request);
        let response = selection.shape(ShapeKind::Response);

        let interface = self.interface_mut(interface_id)?;
        interface.request_params = request.to_selected_fields(ShapeKind::Request, catalog);
        interface.response_params = response.to_selected_fields(ShapeKind::Response, catalog);
        interface.request_main_table = request.main_table().map(str::to_string);
        interface.response_main_table = response.main_table().map(str::to_string);
        interface.updated_at = now();

        debug!(
            request_fields = interface.request_params.len(),
            response_fields = interface.response_params.len(),
            "Saved interface design"
        );

        self.save_interfaces()
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::InMemoryStore;
    use super::*;

    const OWNER: &str = "user-owner1";
    const ADMIN: &str = "user-admin1";
    const DEV: &str = "user-dev1";

    fn workspace() -> Workspace<InMemoryStore> {
        Workspace::load(InMemoryStore::new())
    }

    fn reload(workspace: Workspace<InMemoryStore>) -> Workspace<InMemoryStore> {
        Workspace::load(workspace.into_store())
    }

    fn member_id(workspace: &Workspace<InMemoryStore>, user_id: &str) -> String {
        workspace.project("1").unwrap().member_for_user(user_id).unwrap().id.clone()
    }

    fn is_denied<T>(result: Result<T>) -> bool {
        matches!(result, Err(ApiDesignerError::PermissionDenied(_)))
    }

    #[test]
    fn empty_store_starts_with_seed_data() {
        let workspace = workspace();

        assert_eq!(workspace.projects().len(), 3);
        assert_eq!(workspace.data_sources_for_project("1").count(), 2);
        assert_eq!(workspace.list_interfaces("1", None).count(), 2);
        assert_eq!(workspace.category_tree("1").len(), 3);
    }

    #[test]
    fn created_projects_survive_a_reload() {
        let mut workspace = workspace();
        let id = workspace
            .create_project(ProjectDraft::new("Billing", "Invoices"), MemberDraft::new("user-new", "new", MemberRole::Member))
            .unwrap();

        let workspace = reload(workspace);
        let project = workspace.project(&id).unwrap();

        assert_eq!(project.name, "Billing");
        assert_eq!(project.members.len(), 1);
        assert_eq!(project.members[0].role, MemberRole::Owner);
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn project_needs_a_name() {
        let mut workspace = workspace();
        let result = workspace.create_project(ProjectDraft::new("   ", ""), MemberDraft::new("u", "u", MemberRole::Owner));

        assert!(matches!(result, Err(ApiDesignerError::Validation { field: "name", .. })));
    }

    #[test]
    fn search_ignores_case() {
        let workspace = workspace();

        let names = workspace.search_projects("PAYMENT").map(|p| p.name.as_str()).collect_vec();
        assert_eq!(names, vec!["Payment gateway"]);
        assert_eq!(workspace.search_projects("").count(), 3);
    }

    #[test]
    fn updating_a_project_refreshes_updated_at() {
        let mut workspace = workspace();
        let before = workspace.project("1").unwrap().updated_at;

        workspace.update_project("1", ADMIN, ProjectDraft::new("Renamed", "d")).unwrap();

        let project = workspace.project("1").unwrap();
        assert_eq!(project.name, "Renamed");
        assert!(project.updated_at > before);
        assert_eq!(project.created_at, before);
    }

    #[test]
    fn toggle_status_twice_restores_it() {
        let mut workspace = workspace();

        assert_eq!(workspace.toggle_project_status("1", OWNER).unwrap(), ActivityStatus::Inactive);
        assert_eq!(workspace.toggle_project_status("1", OWNER).unwrap(), ActivityStatus::Active);
    }

    #[test]
    fn declined_project_delete_changes_nothing() {
        let mut workspace = workspace();

        assert_eq!(workspace.delete_project("1", OWNER, Confirmation::Declined).unwrap(), Outcome::Declined);
        assert!(workspace.project("1").is_ok());
        assert!(workspace.store().is_empty());
    }

    #[test]
    fn deleting_a_project_removes_its_contents() {
        let mut workspace = workspace();

        assert_eq!(workspace.delete_project("1", OWNER, Confirmation::Confirmed).unwrap(), Outcome::Applied);

        let workspace = reload(workspace);
        assert!(matches!(workspace.project("1"), Err(ApiDesignerError::NotFound { .. })));
        assert_eq!(workspace.data_sources_for_project("1").count(), 0);
        assert_eq!(workspace.list_interfaces("1", None).count(), 0);
        assert_eq!(workspace.projects().len(), 2);
    }

    #[test]
    fn only_owners_delete_projects() {
        let mut workspace = workspace();

        assert!(is_denied(workspace.delete_project("1", ADMIN, Confirmation::Confirmed)));
        assert!(is_denied(workspace.delete_project("1", "user-stranger", Confirmation::Confirmed)));
    }

    #[test]
    fn admins_manage_plain_members_only() {
        let mut workspace = workspace();
        let dev = member_id(&workspace, DEV);
        let owner = member_id(&workspace, OWNER);

        assert_eq!(workspace.toggle_member_status("1", ADMIN, &dev).unwrap(), ActivityStatus::Inactive);
        assert!(is_denied(workspace.toggle_member_status("1", ADMIN, &owner)));
        assert!(is_denied(workspace.add_member("1", ADMIN, MemberDraft::new("user-x", "x", MemberRole::Admin))));
    }

    #[test]
    fn members_cannot_manage_members() {
        let mut workspace = workspace();
        let admin = member_id(&workspace, ADMIN);

        assert!(is_denied(workspace.remove_member("1", DEV, &admin, Confirmation::Confirmed)));
    }

    #[test]
    fn inactive_members_lose_their_permissions() {
        let mut workspace = workspace();
        let admin = member_id(&workspace, ADMIN);
        workspace.toggle_member_status("1", OWNER, &admin).unwrap();

        assert!(is_denied(workspace.toggle_project_status("1", ADMIN)));
    }

    #[test]
    fn add_and_remove_member() {
        let mut workspace = workspace();
        let id = workspace.add_member("1", OWNER, MemberDraft::new("user-new", "new", MemberRole::Admin)).unwrap();
        assert_eq!(workspace.project("1").unwrap().members.len(), 4);

        assert!(matches!(
            workspace.add_member("1", OWNER, MemberDraft::new("user-new", "new", MemberRole::Member)),
            Err(ApiDesignerError::Validation { .. })
        ));

        assert_eq!(workspace.remove_member("1", OWNER, &id, Confirmation::Declined).unwrap(), Outcome::Declined);
        assert_eq!(workspace.remove_member("1", OWNER, &id, Confirmation::Confirmed).unwrap(), Outcome::Applied);
        assert_eq!(reload(workspace).project("1").unwrap().members.len(), 3);
    }

    #[test]
    fn data_source_gets_default_port() {
        let mut workspace = workspace();
        let draft = DataSourceDraft::new("1", "Reporting", DatabaseKind::Oracle).connection("db.local", "rep", "scott", "tiger");

        let id = workspace.create_data_source(ADMIN, draft).unwrap();
        let data_source = workspace.data_source(&id).unwrap();

        assert_eq!(data_source.port, 1521);
        assert_eq!(data_source.status, ConnectionStatus::Disconnected);
    }

    #[test]
    fn data_source_validation_lists_missing_fields() {
        let mut workspace = workspace();
        let err = workspace.create_data_source(OWNER, DataSourceDraft::new("1", "", DatabaseKind::Mysql)).unwrap_err();

        assert_eq!(err.to_string(), "Invalid value for 'dataSource': missing name, host, username");
    }

    #[test]
    fn sqlite_needs_no_host() {
        let mut workspace = workspace();
        let id = workspace.create_data_source(OWNER, DataSourceDraft::new("1", "Local", DatabaseKind::Sqlite)).unwrap();

        assert_eq!(workspace.data_source(&id).unwrap().port, 0);
        assert_eq!(workspace.test_connection(&id, OWNER).unwrap(), ConnectionStatus::Connected);
    }

    #[test]
    fn connection_test_marks_connected() {
        let mut workspace = workspace();

        assert_eq!(workspace.test_connection("1", ADMIN).unwrap(), ConnectionStatus::Connected);
        assert_eq!(reload(workspace).data_source("1").unwrap().status, ConnectionStatus::Connected);
    }

    #[test]
    fn updated_data_source_keeps_identity_and_mappings() {
        let mut workspace = workspace();
        let mapping = workspace.add_type_mapping("1", OWNER).unwrap();
        workspace.update_type_mapping("1", OWNER, &mapping, MappingField::DbType, "json").unwrap();
        workspace.test_connection("1", OWNER).unwrap();
        let before = workspace.data_source("1").unwrap().clone();

        let mut draft = DataSourceDraft::new("1", " Primary database ", DatabaseKind::Mysql).connection("db.internal", "shop", "app", "secret");
        draft.port = Some(3307);
        workspace.update_data_source("1", ADMIN, draft).unwrap();

        let workspace = reload(workspace);
        let after = workspace.data_source("1").unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.type_mappings, before.type_mappings);
        assert_eq!(after.name, "Primary database");
        assert_eq!(after.host, "db.internal");
        assert_eq!(after.port, 3307);
        assert_eq!(after.status, ConnectionStatus::Disconnected);
    }

    #[test]
    fn updated_data_source_is_validated() {
        let mut workspace = workspace();

        let result = workspace.update_data_source("1", OWNER, DataSourceDraft::new("1", "Main", DatabaseKind::Postgresql));
        assert!(matches!(result, Err(ApiDesignerError::Validation { field: "dataSource", .. })));
        assert_eq!(workspace.data_source("1").unwrap().kind, DatabaseKind::Mysql);
    }

    #[test]
    fn connection_test_fails_without_a_port() {
        let mut workspace = workspace();
        let mut draft = DataSourceDraft::new("1", "Main", DatabaseKind::Mysql).connection("localhost", "shop", "root", "");
        draft.port = Some(0);
        workspace.update_data_source("1", OWNER, draft).unwrap();

        assert_eq!(workspace.test_connection("1", OWNER).unwrap(), ConnectionStatus::Error);
    }

    #[test]
    fn mapping_edits_are_persisted() {
        let mut workspace = workspace();
        let id = workspace.add_type_mapping("1", OWNER).unwrap();
        workspace.update_type_mapping("1", OWNER, &id, MappingField::DbType, "json").unwrap();
        workspace.update_type_mapping("1", OWNER, &id, MappingField::CodeType, "object").unwrap();

        let mut workspace = reload(workspace);
        assert_eq!(workspace.data_source("1").unwrap().resolve_type("json"), "object");
        assert_eq!(workspace.data_source("1").unwrap().type_mappings.len(), 9);

        assert_eq!(workspace.reset_type_mappings("1", OWNER, Confirmation::Declined).unwrap(), Outcome::Declined);
        assert_eq!(workspace.data_source("1").unwrap().type_mappings.len(), 9);

        workspace.reset_type_mappings("1", OWNER, Confirmation::Confirmed).unwrap();
        assert_eq!(reload(workspace).data_source("1").unwrap().resolve_type("json"), "any");
    }

    #[test]
    fn delete_data_source_is_confirmed() {
        let mut workspace = workspace();

        assert_eq!(workspace.delete_data_source("2", OWNER, Confirmation::Declined).unwrap(), Outcome::Declined);
        assert_eq!(workspace.delete_data_source("2", OWNER, Confirmation::Confirmed).unwrap(), Outcome::Applied);
        assert!(workspace.data_source("2").is_err());
    }

    #[test]
    fn members_cannot_touch_data_sources() {
        let mut workspace = workspace();
        let draft = DataSourceDraft::new("1", "Local", DatabaseKind::Sqlite);

        assert!(is_denied(workspace.delete_data_source("1", DEV, Confirmation::Confirmed)));
        assert!(is_denied(workspace.create_data_source(DEV, draft.clone())));
        assert!(is_denied(workspace.update_data_source("1", DEV, draft)));
        assert!(is_denied(workspace.test_connection("1", DEV)));
        assert!(is_denied(workspace.add_type_mapping("1", DEV)));
        assert!(is_denied(workspace.reset_type_mappings("1", DEV, Confirmation::Confirmed)));

        let workspace = reload(workspace);
        assert!(workspace.data_source("1").is_ok());
        assert!(workspace.data_source("1").unwrap().type_mappings.is_empty());
    }

    #[test]
    fn members_edit_interfaces_and_categories() {
        let mut workspace = workspace();
        let catalog = SchemaCatalog::seeded();

        let category = workspace.create_category("1", DEV, "Payments", "", None).unwrap();
        let interface = workspace
            .create_interface(DEV, InterfaceDraft::new("1", &category, "Pay order", HttpMethod::Post, "/api/pay"))
            .unwrap();
        workspace
            .update_interface(&interface, DEV, InterfaceDraft::new("1", &category, "Pay an order", HttpMethod::Post, "/api/pay"))
            .unwrap();

        let mut selection = DesignerSelection::new();
        selection.toggle_field("orders.order_no", ShapeKind::Request);
        workspace.save_design(&interface, DEV, &selection, &catalog).unwrap();

        assert_eq!(workspace.delete_interface(&interface, DEV, Confirmation::Confirmed).unwrap(), Outcome::Applied);
        assert_eq!(workspace.delete_category(&category, DEV, Confirmation::Confirmed).unwrap(), Outcome::Applied);
    }

    #[test]
    fn strangers_cannot_edit_interfaces() {
        let mut workspace = workspace();
        let catalog = SchemaCatalog::seeded();

        assert!(is_denied(workspace.create_interface("user-admin3", InterfaceDraft::new("1", "1", "Logout", HttpMethod::Post, "/api/logout"))));
        assert!(is_denied(workspace.save_design("1", "user-admin3", &DesignerSelection::new(), &catalog)));
        assert!(is_denied(workspace.delete_category("1", "user-admin3", Confirmation::Confirmed)));
    }

    #[test]
    fn nested_categories_form_a_tree() {
        let mut workspace = workspace();
        let child = workspace.create_category("1", OWNER, "Addresses", "", Some("1")).unwrap();

        let tree = workspace.category_tree("1");
        assert_eq!(tree.len(), 3);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].category.id, child);

        workspace.delete_category("1", OWNER, Confirmation::Confirmed).unwrap();
        let tree = workspace.category_tree("1");
        assert!(tree.iter().any(|n| n.category.id == child));
    }

    #[test]
    fn category_parent_must_exist() {
        let mut workspace = workspace();

        let result = workspace.create_category("1", OWNER, "Orphan", "", Some("missing"));
        assert!(matches!(result, Err(ApiDesignerError::NotFound { kind: "Category", .. })));
    }

    #[test]
    fn interface_paths_start_with_a_slash() {
        let mut workspace = workspace();

        let result = workspace.create_interface(OWNER, InterfaceDraft::new("1", "1", "Logout", HttpMethod::Post, "api/logout"));
        assert!(matches!(result, Err(ApiDesignerError::Validation { field: "path", .. })));

        let result = workspace.create_interface(OWNER, InterfaceDraft::new("1", "1", "", HttpMethod::Post, "/api/logout"));
        assert!(matches!(result, Err(ApiDesignerError::Validation { field: "name", .. })));
    }

    #[test]
    fn interfaces_filter_by_category() {
        let mut workspace = workspace();
        workspace
            .create_interface(OWNER, InterfaceDraft::new("1", "2", "Get product", HttpMethod::Get, "/api/products/{id}").description("One product"))
            .unwrap();

        let names = workspace.list_interfaces("1", Some("2")).map(|i| i.name.as_str()).collect_vec();
        assert_eq!(names, vec!["Get product list", "Get product"]);
        assert_eq!(workspace.list_interfaces("2", None).count(), 0);
    }

    #[test]
    fn update_interface_keeps_the_design() {
        let mut workspace = workspace();
        let catalog = SchemaCatalog::seeded();
        let mut selection = DesignerSelection::new();
        selection.toggle_field("users.id", ShapeKind::Request);
        workspace.save_design("1", OWNER, &selection, &catalog).unwrap();

        workspace
            .update_interface("1", OWNER, InterfaceDraft::new("1", "1", "Sign in", HttpMethod::Post, "/api/user/sign-in"))
            .unwrap();

        let interface = workspace.interface("1").unwrap();
        assert_eq!(interface.name, "Sign in");
        assert_eq!(interface.request_params.len(), 1);
    }

    #[test]
    fn saved_design_reopens_identically() {
        let mut workspace = workspace();
        let catalog = SchemaCatalog::seeded();

        let mut selection = DesignerSelection::new();
        selection.toggle_field("users.id", ShapeKind::Request);
        selection.toggle_field("users.username", ShapeKind::Response);
        selection.toggle_field("orders.total_amount", ShapeKind::Response);
        selection.set_main_table("users", ShapeKind::Response, &catalog).unwrap();

        workspace.save_design("1", OWNER, &selection, &catalog).unwrap();

        let workspace = reload(workspace);
        let interface = workspace.interface("1").unwrap();
        assert_eq!(interface.response_main_table.as_deref(), Some("users"));
        assert_eq!(interface.request_main_table, None);
        assert_eq!(interface.response_params.len(), 2);
        assert!(interface.updated_at > interface.created_at);

        assert_eq!(DesignerSelection::from_interface(interface), selection);
    }

    #[test]
    fn declined_interface_delete_keeps_it() {
        let mut workspace = workspace();

        assert_eq!(workspace.delete_interface("2", OWNER, Confirmation::Declined).unwrap(), Outcome::Declined);
        assert!(workspace.interface("2").is_ok());
        assert_eq!(workspace.delete_interface("2", OWNER, Confirmation::Confirmed).unwrap(), Outcome::Applied);
        assert!(workspace.interface("2").is_err());
    }
}
