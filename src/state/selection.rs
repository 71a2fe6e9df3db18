use crate::model::{GardenState, Tree, TreeId};

/// Tree picked in the scene. Holds only the id; the tree itself is looked up
/// in the current store snapshot so the panel shows live values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Tree(TreeId),
}

impl Selection {
    pub fn id(&self) -> Option<TreeId> {
        match self {
            Selection::None => None,
            Selection::Tree(id) => Some(*id),
        }
    }

    /// The selected tree, if it still exists in `state`.
    pub fn resolve<'a>(&self, state: &'a GardenState) -> Option<&'a Tree> {
        self.id().and_then(|id| state.tree(id))
    }
}

/// Info toast text shown when a tree is clicked.
pub fn selection_message(tree: &Tree) -> String {
    format!(
        "Selected {} tree (Age: {} days, Health: {}%)",
        tree.species.label(),
        tree.age.floor(),
        tree.health.floor()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GardenConfig;
    use chrono::Utc;

    #[test]
    fn test_resolve_tracks_store() {
        let state = GardenState::new_demo(GardenConfig::default(), Utc::now());
        let id = state.trees[1].id;
        let sel = Selection::Tree(id);
        assert_eq!(sel.resolve(&state).map(|t| t.id), Some(id));
        assert!(Selection::Tree(TreeId::new()).resolve(&state).is_none());
        assert!(Selection::None.resolve(&state).is_none());
    }

    #[test]
    fn test_selection_message_floors_values() {
        let mut state = GardenState::new_demo(GardenConfig::default(), Utc::now());
        state.trees[0].age = 15.7;
        state.trees[0].health = 84.9;
        assert_eq!(
            selection_message(&state.trees[0]),
            "Selected oak tree (Age: 15 days, Health: 84%)"
        );
    }
}
