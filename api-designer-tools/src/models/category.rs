use serde::{Deserialize, Serialize};

/// Groups interfaces inside a project. Categories are stored flat, `parent_id` makes them a tree.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceCategory {
    pub id: String,
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// A category together with its child categories. Only ever computed, never stored.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct CategoryNode<'a> {
    pub category: &'a InterfaceCategory,
    pub children: Vec<CategoryNode<'a>>,
}

/// Builds the category tree for a flat list of categories, keeping the input order among siblings.
///
/// Categories whose parent cannot be found are treated as roots, so nothing disappears
/// from the tree when a parent gets deleted.
pub fn build_category_tree<'a>(categories: &[&'a InterfaceCategory]) -> Vec<CategoryNode<'a>> {
    fn children_of<'a>(parent_id: &str, categories: &[&'a InterfaceCategory], depth: usize) -> Vec<CategoryNode<'a>> {
        // A parent cycle would recurse forever otherwise.
        if depth > categories.len() {
            return vec![];
        }

        categories
            .iter()
            .filter(|c| c.parent_id.as_deref() == Some(parent_id))
            .map(|c| CategoryNode {
                category: c,
                children: children_of(&c.id, categories, depth + 1),
            })
            .collect()
    }

    categories
        .iter()
        .filter(|c| match &c.parent_id {
            None => true,
            Some(parent) => !categories.iter().any(|p| &p.id == parent),
        })
        .map(|c| CategoryNode {
            category: c,
            children: children_of(&c.id, categories, 1),
        })
        .collect()
}
